//! Reply templates and reasoning text per category.

use crate::pipeline::types::{Category, ClassificationResult};

/// Formal acknowledgment sent for actionable emails.
pub const PRODUCTIVE_REPLY: &str = "Prezado(a),\n\n\
Recebemos seu email e agradecemos pelo contato. Estamos analisando as informações enviadas e retornaremos em breve com uma resposta detalhada.\n\n\
Caso necessite de uma resposta mais urgente, não hesite em nos contatar diretamente.\n\n\
Atenciosamente,\n\
Equipe de Atendimento";

/// Triage notice for low-priority emails.
pub const UNPRODUCTIVE_REPLY: &str = "Este email foi identificado como não prioritário. \
Caso seja uma comunicação importante, por favor reenvie com mais detalhes sobre o assunto.";

/// Build the suggested reply and reasoning for a decided category.
///
/// Only the score of the chosen category is interpolated.
pub fn generate(category: Category, productive: u32, unproductive: u32) -> ClassificationResult {
    let (suggested_response, reasoning) = match category {
        Category::Productive => (
            PRODUCTIVE_REPLY,
            format!(
                "Email classificado como Produtivo com base em: {productive} indicadores de conteúdo profissional encontrados (palavras-chave relacionadas a trabalho, estrutura formal, itens de ação)."
            ),
        ),
        Category::Unproductive => (
            UNPRODUCTIVE_REPLY,
            format!(
                "Email classificado como Improdutivo com base em: {unproductive} indicadores de conteúdo promocional/spam encontrados, estrutura informal, ou ausência de elementos profissionais."
            ),
        ),
    };

    ClassificationResult {
        category,
        suggested_response: suggested_response.to_string(),
        reasoning,
    }
}
