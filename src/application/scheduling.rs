use chrono::{NaiveDate, Utc};

use crate::domain::{
    Cents, CompanyId, Customer, CustomerId, Employee, EmployeeId, EmployeeStatus, Schedule,
    ScheduleId, ScheduleStatus,
};

use super::{AppError, ErpService, Identity};

/// Input for registering an employee. Name, email, position and company are
/// required.
#[derive(Debug, Clone, Default)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: String,
    pub salary: Cents,
    pub hire_date: Option<NaiveDate>,
    pub status: Option<EmployeeStatus>,
    pub company_id: CompanyId,
}

#[derive(Debug, Clone, Default)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub salary: Option<Cents>,
    pub hire_date: Option<NaiveDate>,
    pub status: Option<EmployeeStatus>,
    pub company_id: Option<CompanyId>,
}

/// Input for registering a customer.
#[derive(Debug, Clone, Default)]
pub struct NewCustomer {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub document: Option<String>,
    pub notes: Option<String>,
    pub company_id: CompanyId,
}

#[derive(Debug, Clone, Default)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub document: Option<String>,
    pub notes: Option<String>,
}

/// Input for booking an appointment.
#[derive(Debug, Clone)]
pub struct NewSchedule {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub service_type: String,
    pub service_description: Option<String>,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: String,
    pub duration: Option<i64>,
    pub notes: Option<String>,
    pub company_id: CompanyId,
}

#[derive(Debug, Clone, Default)]
pub struct ScheduleUpdate {
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub service_type: Option<String>,
    pub service_description: Option<String>,
    pub scheduled_date: Option<NaiveDate>,
    pub scheduled_time: Option<String>,
    pub duration: Option<i64>,
    pub status: Option<ScheduleStatus>,
    pub notes: Option<String>,
}

impl ErpService {
    // ========================
    // Employee operations
    // ========================

    pub async fn list_employees(&self, _identity: &Identity) -> Result<Vec<Employee>, AppError> {
        Ok(self.repo().list_employees().await?)
    }

    pub async fn list_employees_by_company(
        &self,
        _identity: &Identity,
        company_id: CompanyId,
    ) -> Result<Vec<Employee>, AppError> {
        Ok(self.repo().list_employees_by_company(company_id).await?)
    }

    pub async fn get_employee(
        &self,
        _identity: &Identity,
        employee_id: EmployeeId,
    ) -> Result<Employee, AppError> {
        self.repo()
            .get_employee(employee_id)
            .await?
            .ok_or(AppError::EmployeeNotFound(employee_id))
    }

    /// Register an employee. Email is unique across the whole system.
    pub async fn create_employee(
        &self,
        _identity: &Identity,
        input: NewEmployee,
    ) -> Result<Employee, AppError> {
        for (field, value) in [
            ("name", &input.name),
            ("email", &input.email),
            ("position", &input.position),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::ValidationFailed(field.to_string()));
            }
        }

        self.repo()
            .get_company(input.company_id)
            .await?
            .ok_or(AppError::CompanyNotFound(input.company_id))?;

        if self
            .repo()
            .get_employee_by_email(&input.email)
            .await?
            .is_some()
        {
            return Err(AppError::EmployeeEmailTaken(input.email));
        }

        let mut employee =
            Employee::new(input.name, input.email, input.position, input.company_id);
        employee.phone = input.phone;
        employee.salary = input.salary;
        employee.hire_date = input.hire_date;
        if let Some(status) = input.status {
            employee.status = status;
        }

        self.repo().save_employee(&employee).await?;
        Ok(employee)
    }

    pub async fn update_employee(
        &self,
        _identity: &Identity,
        employee_id: EmployeeId,
        update: EmployeeUpdate,
    ) -> Result<Employee, AppError> {
        let mut employee = self
            .repo()
            .get_employee(employee_id)
            .await?
            .ok_or(AppError::EmployeeNotFound(employee_id))?;

        if let Some(company_id) = update.company_id {
            self.repo()
                .get_company(company_id)
                .await?
                .ok_or(AppError::CompanyNotFound(company_id))?;
            employee.company_id = company_id;
        }
        if let Some(email) = update.email {
            if email != employee.email
                && self.repo().get_employee_by_email(&email).await?.is_some()
            {
                return Err(AppError::EmployeeEmailTaken(email));
            }
            employee.email = email;
        }
        if let Some(name) = update.name {
            employee.name = name;
        }
        if let Some(phone) = update.phone {
            employee.phone = Some(phone);
        }
        if let Some(position) = update.position {
            employee.position = position;
        }
        if let Some(salary) = update.salary {
            employee.salary = salary;
        }
        if let Some(hire_date) = update.hire_date {
            employee.hire_date = Some(hire_date);
        }
        if let Some(status) = update.status {
            employee.status = status;
        }
        employee.updated_at = Utc::now();

        self.repo().update_employee(&employee).await?;
        Ok(employee)
    }

    pub async fn delete_employee(
        &self,
        _identity: &Identity,
        employee_id: EmployeeId,
    ) -> Result<(), AppError> {
        self.repo()
            .get_employee(employee_id)
            .await?
            .ok_or(AppError::EmployeeNotFound(employee_id))?;
        self.repo().delete_employee(employee_id).await?;
        Ok(())
    }

    // ========================
    // Customer operations
    // ========================

    pub async fn list_customers(&self, _identity: &Identity) -> Result<Vec<Customer>, AppError> {
        Ok(self.repo().list_customers().await?)
    }

    pub async fn list_customers_by_company(
        &self,
        _identity: &Identity,
        company_id: CompanyId,
    ) -> Result<Vec<Customer>, AppError> {
        Ok(self.repo().list_customers_by_company(company_id).await?)
    }

    pub async fn get_customer(
        &self,
        _identity: &Identity,
        customer_id: CustomerId,
    ) -> Result<Customer, AppError> {
        self.repo()
            .get_customer(customer_id)
            .await?
            .ok_or(AppError::CustomerNotFound(customer_id))
    }

    pub async fn create_customer(
        &self,
        _identity: &Identity,
        input: NewCustomer,
    ) -> Result<Customer, AppError> {
        if input.name.trim().is_empty() {
            return Err(AppError::ValidationFailed("name".to_string()));
        }
        self.repo()
            .get_company(input.company_id)
            .await?
            .ok_or(AppError::CompanyNotFound(input.company_id))?;

        let mut customer = Customer::new(input.name, input.company_id)
            .with_contact(input.email, input.phone, input.address);
        customer.document = input.document;
        customer.notes = input.notes;

        self.repo().save_customer(&customer).await?;
        Ok(customer)
    }

    pub async fn update_customer(
        &self,
        _identity: &Identity,
        customer_id: CustomerId,
        update: CustomerUpdate,
    ) -> Result<Customer, AppError> {
        let mut customer = self
            .repo()
            .get_customer(customer_id)
            .await?
            .ok_or(AppError::CustomerNotFound(customer_id))?;

        if let Some(name) = update.name {
            customer.name = name;
        }
        if let Some(email) = update.email {
            customer.email = Some(email);
        }
        if let Some(phone) = update.phone {
            customer.phone = Some(phone);
        }
        if let Some(address) = update.address {
            customer.address = Some(address);
        }
        if let Some(document) = update.document {
            customer.document = Some(document);
        }
        if let Some(notes) = update.notes {
            customer.notes = Some(notes);
        }
        customer.updated_at = Utc::now();

        self.repo().update_customer(&customer).await?;
        Ok(customer)
    }

    pub async fn delete_customer(
        &self,
        _identity: &Identity,
        customer_id: CustomerId,
    ) -> Result<(), AppError> {
        self.repo()
            .get_customer(customer_id)
            .await?
            .ok_or(AppError::CustomerNotFound(customer_id))?;
        self.repo().delete_customer(customer_id).await?;
        Ok(())
    }

    // ========================
    // Schedule operations
    // ========================

    pub async fn list_schedules(&self, _identity: &Identity) -> Result<Vec<Schedule>, AppError> {
        Ok(self.repo().list_schedules().await?)
    }

    pub async fn list_schedules_by_company(
        &self,
        _identity: &Identity,
        company_id: CompanyId,
    ) -> Result<Vec<Schedule>, AppError> {
        Ok(self.repo().list_schedules_by_company(company_id).await?)
    }

    /// Appointments within an inclusive date range, earliest first.
    pub async fn schedules_in_range(
        &self,
        _identity: &Identity,
        company_id: CompanyId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Schedule>, AppError> {
        if end < start {
            return Err(AppError::ValidationFailed("date range".to_string()));
        }
        Ok(self
            .repo()
            .list_schedules_in_range(company_id, start, end)
            .await?)
    }

    pub async fn get_schedule(
        &self,
        _identity: &Identity,
        schedule_id: ScheduleId,
    ) -> Result<Schedule, AppError> {
        self.repo()
            .get_schedule(schedule_id)
            .await?
            .ok_or(AppError::ScheduleNotFound(schedule_id))
    }

    /// Book an appointment. Customer name/phone, service type and time are
    /// required.
    pub async fn create_schedule(
        &self,
        _identity: &Identity,
        input: NewSchedule,
    ) -> Result<Schedule, AppError> {
        for (field, value) in [
            ("customerName", &input.customer_name),
            ("customerPhone", &input.customer_phone),
            ("serviceType", &input.service_type),
            ("scheduledTime", &input.scheduled_time),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::ValidationFailed(field.to_string()));
            }
        }

        self.repo()
            .get_company(input.company_id)
            .await?
            .ok_or(AppError::CompanyNotFound(input.company_id))?;

        let mut schedule = Schedule::new(
            input.customer_name,
            input.customer_phone,
            input.service_type,
            input.scheduled_date,
            input.scheduled_time,
            input.company_id,
        );
        schedule.customer_email = input.customer_email;
        schedule.service_description = input.service_description;
        schedule.notes = input.notes;
        if let Some(duration) = input.duration {
            schedule.duration = duration;
        }

        self.repo().save_schedule(&schedule).await?;
        Ok(schedule)
    }

    pub async fn update_schedule(
        &self,
        _identity: &Identity,
        schedule_id: ScheduleId,
        update: ScheduleUpdate,
    ) -> Result<Schedule, AppError> {
        let mut schedule = self
            .repo()
            .get_schedule(schedule_id)
            .await?
            .ok_or(AppError::ScheduleNotFound(schedule_id))?;

        if let Some(customer_name) = update.customer_name {
            schedule.customer_name = customer_name;
        }
        if let Some(customer_phone) = update.customer_phone {
            schedule.customer_phone = customer_phone;
        }
        if let Some(customer_email) = update.customer_email {
            schedule.customer_email = Some(customer_email);
        }
        if let Some(service_type) = update.service_type {
            schedule.service_type = service_type;
        }
        if let Some(service_description) = update.service_description {
            schedule.service_description = Some(service_description);
        }
        if let Some(scheduled_date) = update.scheduled_date {
            schedule.scheduled_date = scheduled_date;
        }
        if let Some(scheduled_time) = update.scheduled_time {
            schedule.scheduled_time = scheduled_time;
        }
        if let Some(duration) = update.duration {
            schedule.duration = duration;
        }
        if let Some(status) = update.status {
            schedule.status = status;
        }
        if let Some(notes) = update.notes {
            schedule.notes = Some(notes);
        }
        schedule.updated_at = Utc::now();

        self.repo().update_schedule(&schedule).await?;
        Ok(schedule)
    }

    pub async fn delete_schedule(
        &self,
        _identity: &Identity,
        schedule_id: ScheduleId,
    ) -> Result<(), AppError> {
        self.repo()
            .get_schedule(schedule_id)
            .await?
            .ok_or(AppError::ScheduleNotFound(schedule_id))?;
        self.repo().delete_schedule(schedule_id).await?;
        Ok(())
    }
}
