use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CompanyId;

pub type CustomerId = Uuid;

/// A registered customer of a company.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub document: Option<String>,
    pub notes: Option<String>,
    pub company_id: CompanyId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    pub fn new(name: String, company_id: CompanyId) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email: None,
            phone: None,
            address: None,
            document: None,
            notes: None,
            company_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_contact(
        mut self,
        email: Option<String>,
        phone: Option<String>,
        address: Option<String>,
    ) -> Self {
        self.email = email;
        self.phone = phone;
        self.address = address;
        self
    }

    pub fn with_document(mut self, document: impl Into<String>) -> Self {
        self.document = Some(document.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
