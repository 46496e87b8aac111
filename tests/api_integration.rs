//! Integration tests for the classification REST API.
//!
//! Each test spins up an Axum server on a random port backed by an
//! in-memory store, and exercises the real HTTP contract with reqwest.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::time::timeout;

use email_triage::api::classify_routes;
use email_triage::pipeline::EmailProcessor;
use email_triage::store::{EmailStore, LibSqlBackend};

/// Maximum time any test is allowed to run before we consider it hung.
const TEST_TIMEOUT: Duration = Duration::from_secs(5);

const PROPOSAL: &str = "Assunto: Proposta de contrato. Prezado, segue em anexo o orçamento do projeto. Atenciosamente.";
const PROMO: &str = "COMPRE JÁ!!! Desconto imperdível, clique aqui e ganhe um prêmio grátis!";

/// Start an Axum server on a random port, return its base URL.
async fn start_server() -> String {
    let store: Arc<dyn EmailStore> = Arc::new(LibSqlBackend::new_memory().await.unwrap());
    let processor = Arc::new(EmailProcessor::new(store));
    let app = classify_routes(processor);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start accepting connections.
    tokio::time::sleep(Duration::from_millis(50)).await;

    format!("http://127.0.0.1:{port}")
}

async fn classify(base: &str, body: Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{base}/classify-email"))
        .json(&body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn rest_health_endpoint() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server().await;

        let resp = reqwest::get(format!("{base}/health")).await.unwrap();
        assert_eq!(resp.status(), 200);

        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "email-triage");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn classify_productive_email() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server().await;

        let resp = classify(&base, json!({ "content": PROPOSAL, "filename": "proposta.txt" })).await;
        assert_eq!(resp.status(), 200);

        let body: Value = resp.json().await.unwrap();
        assert!(body["id"].is_string());
        assert_eq!(body["category"], "Produtivo");
        assert!(
            body["suggested_response"]
                .as_str()
                .unwrap()
                .starts_with("Prezado(a),")
        );
        assert!(body["reasoning"].as_str().unwrap().contains(": 6 indicadores"));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn classify_promotional_email() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server().await;

        let resp = classify(&base, json!({ "content": PROMO })).await;
        assert_eq!(resp.status(), 200);

        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["category"], "Improdutivo");
        assert!(body["reasoning"].as_str().unwrap().contains(": 9 indicadores"));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn blank_content_is_bad_request() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server().await;

        let resp = classify(&base, json!({ "content": "   ", "filename": "x.txt" })).await;
        assert_eq!(resp.status(), 400);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["error"], "Email content is required");

        let resp = classify(&base, json!({ "filename": "x.txt" })).await;
        assert_eq!(resp.status(), 400);

        // Nothing was stored
        let list: Vec<Value> = reqwest::get(format!("{base}/classify-email"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(list.is_empty());
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server().await;

        let resp = reqwest::Client::new()
            .post(format!("{base}/classify-email"))
            .header("content-type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400);
        let body: Value = resp.json().await.unwrap();
        assert!(body["error"].is_string());
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn fetch_by_id_returns_completed_record() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server().await;

        let created: Value = classify(&base, json!({ "content": PROPOSAL, "filename": "p.txt" }))
            .await
            .json()
            .await
            .unwrap();
        let id = created["id"].as_str().unwrap();

        let resp = reqwest::get(format!("{base}/classify-email?id={id}"))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let record: Value = resp.json().await.unwrap();
        assert_eq!(record["id"], id);
        assert_eq!(record["content"], PROPOSAL);
        assert_eq!(record["filename"], "p.txt");
        assert_eq!(record["category"], "Produtivo");
        assert_eq!(record["processing_status"], "completed");
        assert!(record["processed_at"].is_string());
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn fetch_unknown_id_returns_null() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server().await;

        let resp = reqwest::get(format!("{base}/classify-email?id=does-not-exist"))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        assert!(body.is_null());
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn list_returns_newest_first() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server().await;

        classify(&base, json!({ "content": PROPOSAL })).await;
        classify(&base, json!({ "content": PROMO })).await;

        let list: Vec<Value> = reqwest::get(format!("{base}/classify-email"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["content"], PROMO);
        assert_eq!(list[1]["content"], PROPOSAL);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn stuck_list_is_empty_after_success() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server().await;

        classify(&base, json!({ "content": PROPOSAL })).await;

        let stuck: Vec<Value> = reqwest::get(format!("{base}/classify-email/stuck"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(stuck.is_empty());
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn unsupported_method_is_405() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server().await;

        let resp = reqwest::Client::new()
            .delete(format!("{base}/classify-email"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 405);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["error"], "Method not allowed");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn options_returns_ok_with_cors() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server().await;
        let client = reqwest::Client::new();

        // Plain OPTIONS
        let resp = client
            .request(reqwest::Method::OPTIONS, format!("{base}/classify-email"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        assert!(resp.text().await.unwrap().is_empty());

        // Browser preflight
        let resp = client
            .request(reqwest::Method::OPTIONS, format!("{base}/classify-email"))
            .header("origin", "http://localhost:5173")
            .header("access-control-request-method", "POST")
            .header("access-control-request-headers", "content-type,apikey")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["access-control-allow-origin"], "*");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn responses_carry_allow_origin() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server().await;

        let resp = reqwest::Client::new()
            .post(format!("{base}/classify-email"))
            .header("origin", "http://localhost:5173")
            .json(&json!({ "content": PROMO }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["access-control-allow-origin"], "*");
    })
    .await
    .expect("test timed out");
}
