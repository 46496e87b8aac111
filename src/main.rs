use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use email_triage::api::classify_routes;
use email_triage::config::ServiceConfig;
use email_triage::logging;
use email_triage::pipeline::EmailProcessor;
use email_triage::store::{EmailStore, LibSqlBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::from_env().context("invalid configuration")?;

    let _log_guard = logging::init(config.log_dir.as_deref());

    eprintln!("📬 Email Triage v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Classify API: http://{}/classify-email", config.bind_addr());
    eprintln!("   Health: http://{}/health", config.bind_addr());

    // ── Database ─────────────────────────────────────────────────────────
    let backend = if config.is_in_memory() {
        LibSqlBackend::new_memory().await
    } else {
        LibSqlBackend::new_local(Path::new(&config.db_path)).await
    }
    .with_context(|| format!("failed to open database at {}", config.db_path))?;
    let store: Arc<dyn EmailStore> = Arc::new(backend);

    eprintln!("   Database: {}", config.db_path);

    // ── Processor ────────────────────────────────────────────────────────
    let processor =
        Arc::new(EmailProcessor::new(Arc::clone(&store)).with_recent_limit(config.recent_limit));

    match processor.stuck().await {
        Ok(stuck) if !stuck.is_empty() => {
            tracing::warn!(count = stuck.len(), "Emails left in processing from a previous run");
        }
        Ok(_) => {}
        Err(e) => tracing::warn!(error = %e, "Could not check for stuck emails"),
    }

    // ── HTTP server ──────────────────────────────────────────────────────
    let app = classify_routes(processor);
    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr()))?;
    tracing::info!(addr = %config.bind_addr(), "Email triage server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Shutting down");
        })
        .await
        .context("server error")?;

    Ok(())
}
