use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CompanyId;

pub type TypeId = Uuid;

/// A product/service category registered by a company. Products reference
/// these by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeProdService {
    pub id: TypeId,
    pub name: String,
    pub company_id: CompanyId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TypeProdService {
    pub fn new(name: String, company_id: CompanyId) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            company_id,
            created_at: now,
            updated_at: now,
        }
    }
}
