use crate::domain::CompanyId;

use super::AppError;

/// Collaborator interface for the help-chat feature. The completion call
/// itself (model, prompts, request timeout) lives outside this crate; a
/// boundary client wires an implementation to its language-model provider.
pub trait ChatAssistant: Send + Sync {
    fn chat(&self, message: &str, company_id: Option<CompanyId>) -> Result<String, AppError>;
}

/// Canned questions offered to users before they type their own.
pub const SUGGESTED_QUESTIONS: &[&str] = &[
    "Como adicionar um novo produto ao estoque?",
    "Qual a diferença entre produto e serviço no sistema?",
    "Como configurar estoque mínimo para produtos?",
    "Como registrar uma venda no fluxo de caixa?",
    "Como cadastrar um novo funcionário?",
    "Como criar um agendamento para um cliente?",
    "Como visualizar o resumo financeiro do mês?",
    "Como gerenciar tipos de produtos e serviços?",
    "Como cancelar uma transação já registrada?",
    "Como cadastrar um novo cliente?",
    "Como configurar uma nova empresa?",
    "Como visualizar produtos com estoque baixo?",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestions_are_nonempty() {
        assert_eq!(SUGGESTED_QUESTIONS.len(), 12);
        assert!(SUGGESTED_QUESTIONS.iter().all(|s| !s.is_empty()));
    }
}
