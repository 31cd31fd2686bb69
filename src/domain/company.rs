use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Cents;

pub type CompanyId = Uuid;

/// Identifier of the owning account in the external auth system. No local
/// user table exists; identities are minted by the auth collaborator.
pub type UserId = Uuid;

/// A tenant. The three `*_value` fields are running sums of confirmed
/// entrada amounts, maintained incrementally by the ledger operations.
/// There is no rollover job: "day" means "since this counter was last
/// adjusted", not a calendar-bounded window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    /// Free-text headcount description.
    pub employees: String,
    pub location: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub day_value: Cents,
    pub month_value: Cents,
    pub anual_value: Cents,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Company {
    /// Create a company with zeroed revenue aggregates.
    pub fn new(name: String, user_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            employees: String::new(),
            location: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            day_value: 0,
            month_value: 0,
            anual_value: 0,
            user_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_profile(
        mut self,
        employees: impl Into<String>,
        location: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        self.employees = employees.into();
        self.location = location.into();
        self.email = email.into();
        self.phone = phone.into();
        self.address = address.into();
        self
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    /// Bump all three buckets by a confirmed amount.
    pub fn record_revenue(&mut self, amount: Cents) {
        self.day_value += amount;
        self.month_value += amount;
        self.anual_value += amount;
    }

    /// Undo a previously recorded amount (entry cancellation).
    pub fn reverse_revenue(&mut self, amount: Cents) {
        self.day_value -= amount;
        self.month_value -= amount;
        self.anual_value -= amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_company_has_zeroed_aggregates() {
        let company = Company::new("Barbearia Silva".into(), Uuid::new_v4());
        assert_eq!(company.day_value, 0);
        assert_eq!(company.month_value, 0);
        assert_eq!(company.anual_value, 0);
    }

    #[test]
    fn test_record_and_reverse_revenue() {
        let mut company = Company::new("Barbearia Silva".into(), Uuid::new_v4());
        company.record_revenue(5000);
        company.record_revenue(2500);
        assert_eq!(company.day_value, 7500);
        assert_eq!(company.month_value, 7500);
        assert_eq!(company.anual_value, 7500);

        company.reverse_revenue(5000);
        assert_eq!(company.day_value, 2500);
        assert_eq!(company.month_value, 2500);
        assert_eq!(company.anual_value, 2500);
    }

    #[test]
    fn test_ownership() {
        let owner = Uuid::new_v4();
        let company = Company::new("Barbearia Silva".into(), owner);
        assert!(company.is_owned_by(owner));
        assert!(!company.is_owned_by(Uuid::new_v4()));
    }
}
