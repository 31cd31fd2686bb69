use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Cents, CompanyId, ProductId};

pub type EntryId = Uuid;

/// Direction of a cash-flow entry: money coming into the till or leaving it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Money in (a sale).
    Entrada,
    /// Money out.
    Saida,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Entrada => "entrada",
            TransactionType::Saida => "saida",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "entrada" => Some(TransactionType::Entrada),
            "saida" => Some(TransactionType::Saida),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Dinheiro,
    CartaoCredito,
    CartaoDebito,
    Pix,
    Transferencia,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Dinheiro => "dinheiro",
            PaymentMethod::CartaoCredito => "cartao_credito",
            PaymentMethod::CartaoDebito => "cartao_debito",
            PaymentMethod::Pix => "pix",
            PaymentMethod::Transferencia => "transferencia",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "dinheiro" => Some(PaymentMethod::Dinheiro),
            "cartao_credito" => Some(PaymentMethod::CartaoCredito),
            "cartao_debito" => Some(PaymentMethod::CartaoDebito),
            "pix" => Some(PaymentMethod::Pix),
            "transferencia" => Some(PaymentMethod::Transferencia),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pendente,
    Confirmado,
    Cancelado,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pendente => "pendente",
            TransactionStatus::Confirmado => "confirmado",
            TransactionStatus::Cancelado => "cancelado",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pendente" => Some(TransactionStatus::Pendente),
            "confirmado" => Some(TransactionStatus::Confirmado),
            "cancelado" => Some(TransactionStatus::Cancelado),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One recorded cash-flow event tied to a product and a company.
/// Entries are never deleted; the only permitted mutation is the
/// `confirmado -> cancelado` status transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub id: EntryId,
    pub product_id: ProductId,
    pub company_id: CompanyId,
    pub transaction_type: TransactionType,
    /// Monetary value in cents.
    pub amount: Cents,
    /// Units moved; drives the stock decrement.
    pub quantity: i64,
    pub description: Option<String>,
    pub payment_method: PaymentMethod,
    pub status: TransactionStatus,
    pub customer_name: Option<String>,
    pub customer_document: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LedgerEntry {
    /// Create a new entry. Entries start out `confirmado`; the pending state
    /// exists in the schema but no current flow creates one.
    pub fn new(
        product_id: ProductId,
        company_id: CompanyId,
        transaction_type: TransactionType,
        amount: Cents,
        quantity: i64,
        payment_method: PaymentMethod,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            product_id,
            company_id,
            transaction_type,
            amount,
            quantity,
            description: None,
            payment_method,
            status: TransactionStatus::Confirmado,
            customer_name: None,
            customer_document: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_customer(
        mut self,
        name: Option<String>,
        document: Option<String>,
    ) -> Self {
        self.customer_name = name;
        self.customer_document = document;
        self
    }

    /// Backdate the entry (summary/filter tests and imports).
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = created_at;
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == TransactionStatus::Cancelado
    }

    /// True when cancelling this entry must give stock back and pull the
    /// revenue aggregates down. Only sales are ever reversed.
    pub fn reverses_on_cancel(&self) -> bool {
        self.transaction_type == TransactionType::Entrada
    }
}
