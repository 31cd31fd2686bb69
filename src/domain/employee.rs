use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Cents, CompanyId};

pub type EmployeeId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
    Ativo,
    Inativo,
}

impl EmployeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Ativo => "ativo",
            EmployeeStatus::Inativo => "inativo",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ativo" => Some(EmployeeStatus::Ativo),
            "inativo" => Some(EmployeeStatus::Inativo),
            _ => None,
        }
    }
}

impl std::fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A company employee. Email is unique across the whole system, not just
/// within the company.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: String,
    pub salary: Cents,
    pub hire_date: Option<NaiveDate>,
    pub status: EmployeeStatus,
    pub company_id: CompanyId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    pub fn new(name: String, email: String, position: String, company_id: CompanyId) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            phone: None,
            position,
            salary: 0,
            hire_date: None,
            status: EmployeeStatus::Ativo,
            company_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_salary(mut self, salary: Cents) -> Self {
        self.salary = salary;
        self
    }

    pub fn with_hire_date(mut self, hire_date: NaiveDate) -> Self {
        self.hire_date = Some(hire_date);
        self
    }

    pub fn with_status(mut self, status: EmployeeStatus) -> Self {
        self.status = status;
        self
    }
}
