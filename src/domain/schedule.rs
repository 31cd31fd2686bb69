use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CompanyId;

pub type ScheduleId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    Agendado,
    Confirmado,
    EmAndamento,
    Concluido,
    Cancelado,
}

impl ScheduleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleStatus::Agendado => "agendado",
            ScheduleStatus::Confirmado => "confirmado",
            ScheduleStatus::EmAndamento => "em_andamento",
            ScheduleStatus::Concluido => "concluido",
            ScheduleStatus::Cancelado => "cancelado",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "agendado" => Some(ScheduleStatus::Agendado),
            "confirmado" => Some(ScheduleStatus::Confirmado),
            "em_andamento" => Some(ScheduleStatus::EmAndamento),
            "concluido" => Some(ScheduleStatus::Concluido),
            "cancelado" => Some(ScheduleStatus::Cancelado),
            _ => None,
        }
    }
}

impl std::fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An appointment booked for a walk-in customer (the customer fields are
/// free text, not a reference into the customers table).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: ScheduleId,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub service_type: String,
    pub service_description: Option<String>,
    pub scheduled_date: NaiveDate,
    /// Wall-clock time of day, "HH:MM".
    pub scheduled_time: String,
    /// Duration in minutes.
    pub duration: i64,
    pub status: ScheduleStatus,
    pub notes: Option<String>,
    pub company_id: CompanyId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Schedule {
    pub fn new(
        customer_name: String,
        customer_phone: String,
        service_type: String,
        scheduled_date: NaiveDate,
        scheduled_time: String,
        company_id: CompanyId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            customer_name,
            customer_phone,
            customer_email: None,
            service_type,
            service_description: None,
            scheduled_date,
            scheduled_time,
            duration: 60,
            status: ScheduleStatus::Agendado,
            notes: None,
            company_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_customer_email(mut self, email: impl Into<String>) -> Self {
        self.customer_email = Some(email.into());
        self
    }

    pub fn with_service_description(mut self, description: impl Into<String>) -> Self {
        self.service_description = Some(description.into());
        self
    }

    pub fn with_duration(mut self, minutes: i64) -> Self {
        self.duration = minutes;
        self
    }

    pub fn with_status(mut self, status: ScheduleStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for st in [
            ScheduleStatus::Agendado,
            ScheduleStatus::Confirmado,
            ScheduleStatus::EmAndamento,
            ScheduleStatus::Concluido,
            ScheduleStatus::Cancelado,
        ] {
            assert_eq!(ScheduleStatus::from_str(st.as_str()), Some(st));
        }
    }

    #[test]
    fn test_new_schedule_defaults() {
        let schedule = Schedule::new(
            "João".into(),
            "11 99999-0000".into(),
            "corte".into(),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            "14:30".into(),
            Uuid::new_v4(),
        );
        assert_eq!(schedule.status, ScheduleStatus::Agendado);
        assert_eq!(schedule.duration, 60);
    }
}
