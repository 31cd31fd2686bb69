use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Cents, CompanyId};

pub type ProductId = Uuid;

/// A product or service offered by a company.
///
/// `stock_enabled` distinguishes physical goods (on-hand quantity tracked and
/// enforced on sale) from pure services (stock checks and decrements skipped).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Free-text reference to a registered product/service type name.
    pub product_type: String,
    /// On-hand units. Signed: sales drive it down and nothing clamps it for
    /// stock-disabled products.
    pub amount: i64,
    /// Restock threshold.
    pub min_amount: i64,
    pub stock_enabled: bool,
    /// Acquisition cost in cents.
    pub cost_value: Cents,
    pub supplier: String,
    pub internal_cod: String,
    pub barcode: String,
    pub observation: String,
    pub company_id: CompanyId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(name: String, product_type: String, company_id: CompanyId) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            product_type,
            amount: 0,
            min_amount: 0,
            stock_enabled: false,
            cost_value: 0,
            supplier: String::new(),
            internal_cod: String::new(),
            barcode: String::new(),
            observation: String::new(),
            company_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_stock(mut self, amount: i64, min_amount: i64) -> Self {
        self.amount = amount;
        self.min_amount = min_amount;
        self.stock_enabled = true;
        self
    }

    pub fn with_cost_value(mut self, cost_value: Cents) -> Self {
        self.cost_value = cost_value;
        self
    }

    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = supplier.into();
        self
    }

    pub fn with_codes(
        mut self,
        internal_cod: impl Into<String>,
        barcode: impl Into<String>,
    ) -> Self {
        self.internal_cod = internal_cod.into();
        self.barcode = barcode.into();
        self
    }

    pub fn with_observation(mut self, observation: impl Into<String>) -> Self {
        self.observation = observation.into();
        self
    }

    /// Whether a sale of `quantity` units can go through. Stock-disabled
    /// products always accept.
    pub fn has_stock_for(&self, quantity: i64) -> bool {
        !self.stock_enabled || self.amount >= quantity
    }

    /// On-hand quantity at or below the restock threshold.
    pub fn is_low_stock(&self) -> bool {
        self.stock_enabled && self.amount <= self.min_amount
    }
}
