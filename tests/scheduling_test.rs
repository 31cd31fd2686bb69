mod common;

use anyhow::Result;
use chrono::NaiveDate;
use common::{test_identity, test_service, Fixtures};
use nexos::application::{
    AppError, CustomerUpdate, EmployeeUpdate, NewCustomer, NewEmployee, NewSchedule,
    ScheduleUpdate,
};
use nexos::domain::{EmployeeStatus, ScheduleStatus};
use uuid::Uuid;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[tokio::test]
async fn test_employee_requires_core_fields_and_known_company() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let identity = test_identity();
    let company = Fixtures::company(&service, &identity).await?;

    let result = service
        .create_employee(
            &identity,
            NewEmployee {
                name: "Maria".into(),
                email: "".into(),
                position: "Atendente".into(),
                company_id: company.id,
                ..NewEmployee::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::ValidationFailed(_))));

    let result = service
        .create_employee(
            &identity,
            NewEmployee {
                name: "Maria".into(),
                email: "maria@example.com".into(),
                position: "Atendente".into(),
                company_id: Uuid::new_v4(),
                ..NewEmployee::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::CompanyNotFound(_))));

    Ok(())
}

#[tokio::test]
async fn test_employee_email_is_unique() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let identity = test_identity();
    let company = Fixtures::company(&service, &identity).await?;

    service
        .create_employee(
            &identity,
            NewEmployee {
                name: "Maria".into(),
                email: "maria@example.com".into(),
                position: "Atendente".into(),
                salary: 250_000,
                company_id: company.id,
                ..NewEmployee::default()
            },
        )
        .await?;

    let result = service
        .create_employee(
            &identity,
            NewEmployee {
                name: "Outra Maria".into(),
                email: "maria@example.com".into(),
                position: "Gerente".into(),
                company_id: company.id,
                ..NewEmployee::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::EmployeeEmailTaken(_))));

    Ok(())
}

#[tokio::test]
async fn test_employee_update_and_status() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let identity = test_identity();
    let company = Fixtures::company(&service, &identity).await?;

    let employee = service
        .create_employee(
            &identity,
            NewEmployee {
                name: "Maria".into(),
                email: "maria@example.com".into(),
                position: "Atendente".into(),
                hire_date: Some(date("2024-02-01")),
                company_id: company.id,
                ..NewEmployee::default()
            },
        )
        .await?;
    assert_eq!(employee.status, EmployeeStatus::Ativo);

    let updated = service
        .update_employee(
            &identity,
            employee.id,
            EmployeeUpdate {
                salary: Some(300_000),
                status: Some(EmployeeStatus::Inativo),
                ..EmployeeUpdate::default()
            },
        )
        .await?;
    assert_eq!(updated.salary, 300_000);
    assert_eq!(updated.status, EmployeeStatus::Inativo);
    assert_eq!(updated.email, "maria@example.com");
    assert_eq!(updated.hire_date, Some(date("2024-02-01")));

    let by_company = service
        .list_employees_by_company(&identity, company.id)
        .await?;
    assert_eq!(by_company.len(), 1);

    service.delete_employee(&identity, employee.id).await?;
    assert!(service.list_employees(&identity).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_customer_lifecycle() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let identity = test_identity();
    let company = Fixtures::company(&service, &identity).await?;

    let result = service
        .create_customer(
            &identity,
            NewCustomer {
                name: "  ".into(),
                company_id: company.id,
                ..NewCustomer::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::ValidationFailed(_))));

    let customer = service
        .create_customer(
            &identity,
            NewCustomer {
                name: "João".into(),
                phone: Some("11 99999-0000".into()),
                company_id: company.id,
                ..NewCustomer::default()
            },
        )
        .await?;

    let updated = service
        .update_customer(
            &identity,
            customer.id,
            CustomerUpdate {
                email: Some("joao@example.com".into()),
                ..CustomerUpdate::default()
            },
        )
        .await?;
    assert_eq!(updated.email.as_deref(), Some("joao@example.com"));
    assert_eq!(updated.phone.as_deref(), Some("11 99999-0000"));

    let listed = service
        .list_customers_by_company(&identity, company.id)
        .await?;
    assert_eq!(listed.len(), 1);

    service.delete_customer(&identity, customer.id).await?;
    let result = service.get_customer(&identity, customer.id).await;
    assert!(matches!(result, Err(AppError::CustomerNotFound(_))));

    Ok(())
}

#[tokio::test]
async fn test_schedule_validation_and_lifecycle() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let identity = test_identity();
    let company = Fixtures::company(&service, &identity).await?;

    let result = service
        .create_schedule(
            &identity,
            NewSchedule {
                customer_name: "João".into(),
                customer_phone: "".into(),
                customer_email: None,
                service_type: "corte".into(),
                service_description: None,
                scheduled_date: date("2024-03-15"),
                scheduled_time: "14:30".into(),
                duration: None,
                notes: None,
                company_id: company.id,
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::ValidationFailed(_))));

    let schedule = service
        .create_schedule(
            &identity,
            NewSchedule {
                customer_name: "João".into(),
                customer_phone: "11 99999-0000".into(),
                customer_email: None,
                service_type: "corte".into(),
                service_description: None,
                scheduled_date: date("2024-03-15"),
                scheduled_time: "14:30".into(),
                duration: Some(30),
                notes: None,
                company_id: company.id,
            },
        )
        .await?;
    assert_eq!(schedule.status, ScheduleStatus::Agendado);
    assert_eq!(schedule.duration, 30);

    let updated = service
        .update_schedule(
            &identity,
            schedule.id,
            ScheduleUpdate {
                status: Some(ScheduleStatus::Concluido),
                ..ScheduleUpdate::default()
            },
        )
        .await?;
    assert_eq!(updated.status, ScheduleStatus::Concluido);

    service.delete_schedule(&identity, schedule.id).await?;
    let result = service.get_schedule(&identity, schedule.id).await;
    assert!(matches!(result, Err(AppError::ScheduleNotFound(_))));

    Ok(())
}

#[tokio::test]
async fn test_schedules_date_range_is_inclusive_and_ordered() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let identity = test_identity();
    let company = Fixtures::company(&service, &identity).await?;

    for (day, time) in [
        ("2024-03-10", "09:00"),
        ("2024-03-12", "14:00"),
        ("2024-03-12", "10:00"),
        ("2024-03-20", "11:00"),
    ] {
        service
            .create_schedule(
                &identity,
                NewSchedule {
                    customer_name: "João".into(),
                    customer_phone: "11 99999-0000".into(),
                    customer_email: None,
                    service_type: "corte".into(),
                    service_description: None,
                    scheduled_date: date(day),
                    scheduled_time: time.into(),
                    duration: None,
                    notes: None,
                    company_id: company.id,
                },
            )
            .await?;
    }

    let in_range = service
        .schedules_in_range(&identity, company.id, date("2024-03-10"), date("2024-03-12"))
        .await?;

    let listed: Vec<(String, String)> = in_range
        .iter()
        .map(|s| (s.scheduled_date.to_string(), s.scheduled_time.clone()))
        .collect();
    assert_eq!(
        listed,
        vec![
            ("2024-03-10".to_string(), "09:00".to_string()),
            ("2024-03-12".to_string(), "10:00".to_string()),
            ("2024-03-12".to_string(), "14:00".to_string()),
        ]
    );

    let result = service
        .schedules_in_range(&identity, company.id, date("2024-03-12"), date("2024-03-10"))
        .await;
    assert!(matches!(result, Err(AppError::ValidationFailed(_))));

    Ok(())
}
