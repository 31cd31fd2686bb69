use thiserror::Error;
use uuid::Uuid;

/// Application error taxonomy. `status_code` exposes the HTTP mapping that
/// boundary clients (the REST layer, the CLI) translate from.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Usuário não autenticado")]
    Unauthenticated,

    #[error("{0}")]
    Forbidden(String),

    #[error("Empresa não encontrada: {0}")]
    CompanyNotFound(Uuid),

    #[error("Empresa já está cadastrada: {0}")]
    CompanyAlreadyExists(String),

    #[error("Produto não encontrado: {0}")]
    ProductNotFound(Uuid),

    #[error("Produto já está cadastrado nesta empresa: {0}")]
    ProductAlreadyExists(String),

    #[error("Tipo não encontrado: {0}")]
    TypeNotFound(Uuid),

    #[error("Funcionário não encontrado: {0}")]
    EmployeeNotFound(Uuid),

    #[error("Já existe um funcionário com este e-mail: {0}")]
    EmployeeEmailTaken(String),

    #[error("Cliente não encontrado: {0}")]
    CustomerNotFound(Uuid),

    #[error("Agendamento não encontrado: {0}")]
    ScheduleNotFound(Uuid),

    #[error("Transação não encontrada: {0}")]
    EntryNotFound(Uuid),

    #[error("Transação já está cancelada: {0}")]
    AlreadyCancelled(Uuid),

    #[error("Estoque insuficiente: disponível {available}, solicitado {requested}")]
    InsufficientStock { available: i64, requested: i64 },

    #[error("Campo obrigatório ausente ou inválido: {0}")]
    ValidationFailed(String),

    #[error("Erro interno do servidor")]
    Database(#[from] anyhow::Error),
}

impl AppError {
    /// HTTP status the REST boundary maps this error to.
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::Unauthenticated => 401,
            AppError::Forbidden(_)
            | AppError::CompanyAlreadyExists(_)
            | AppError::ProductAlreadyExists(_) => 403,
            AppError::CompanyNotFound(_)
            | AppError::ProductNotFound(_)
            | AppError::TypeNotFound(_)
            | AppError::EmployeeNotFound(_)
            | AppError::CustomerNotFound(_)
            | AppError::ScheduleNotFound(_)
            | AppError::EntryNotFound(_) => 404,
            AppError::AlreadyCancelled(_)
            | AppError::InsufficientStock { .. }
            | AppError::ValidationFailed(_)
            | AppError::EmployeeEmailTaken(_) => 400,
            AppError::Database(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::Unauthenticated.status_code(), 401);
        assert_eq!(AppError::CompanyNotFound(Uuid::new_v4()).status_code(), 404);
        assert_eq!(
            AppError::InsufficientStock {
                available: 1,
                requested: 3
            }
            .status_code(),
            400
        );
        assert_eq!(
            AppError::Forbidden("Empresa não pertence ao usuário".into()).status_code(),
            403
        );
        assert_eq!(
            AppError::Database(anyhow::anyhow!("disk on fire")).status_code(),
            500
        );
    }

    #[test]
    fn test_internal_error_is_generic_to_callers() {
        let err = AppError::Database(anyhow::anyhow!("connection refused"));
        assert_eq!(err.to_string(), "Erro interno do servidor");
    }
}
