use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::{debug, error};
use uuid::Uuid;

use crate::domain::{
    Company, CompanyId, Customer, CustomerId, Employee, EmployeeId, EmployeeStatus, EntryId,
    LedgerEntry, PaymentMethod, Product, ProductId, Schedule, ScheduleId, ScheduleStatus,
    TransactionStatus, TransactionType, TypeId, TypeProdService, UserId,
};

use super::{MIGRATION_001_INITIAL, MIGRATION_002_LEDGER, MIGRATION_003_SCHEDULING};

/// Result of atomically recording a ledger entry together with its stock
/// and revenue effects.
#[derive(Debug, Clone, Copy)]
pub enum RecordOutcome {
    /// All three writes committed; carries the product's post-sale stock.
    Recorded { new_stock: i64 },
    /// The conditional stock decrement found too few units; nothing was
    /// written.
    InsufficientStock { available: i64 },
}

/// Result of atomically cancelling a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    Cancelled,
    /// The status flip matched no row: some other caller got there first.
    AlreadyCancelled,
}

/// Filter for the paginated transaction listing.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pub transaction_type: Option<TransactionType>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Repository for persisting and querying the ERP tables.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given URL. WAL journaling plus a
    /// busy timeout let concurrent sale recordings queue on the write lock
    /// instead of failing.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .context("Invalid database URL")?
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePool::connect_with(options)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        for (name, sql) in [
            ("001", MIGRATION_001_INITIAL),
            ("002", MIGRATION_002_LEDGER),
            ("003", MIGRATION_003_SCHEDULING),
        ] {
            sqlx::raw_sql(sql)
                .execute(&self.pool)
                .await
                .with_context(|| format!("Failed to run migration {}", name))?;
        }
        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    // ========================
    // Company operations
    // ========================

    pub async fn save_company(&self, company: &Company) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO companies (id, name, employees, location, email, phone, address,
                                   day_value, month_value, anual_value, user_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(company.id.to_string())
        .bind(&company.name)
        .bind(&company.employees)
        .bind(&company.location)
        .bind(&company.email)
        .bind(&company.phone)
        .bind(&company.address)
        .bind(company.day_value)
        .bind(company.month_value)
        .bind(company.anual_value)
        .bind(company.user_id.to_string())
        .bind(company.created_at.to_rfc3339())
        .bind(company.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .context("Failed to save company")?;
        Ok(())
    }

    pub async fn get_company(&self, id: CompanyId) -> Result<Option<Company>> {
        let row = sqlx::query("SELECT * FROM companies WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch company")?;

        row.as_ref().map(Self::row_to_company).transpose()
    }

    pub async fn get_company_by_name(&self, name: &str) -> Result<Option<Company>> {
        let row = sqlx::query("SELECT * FROM companies WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch company by name")?;

        row.as_ref().map(Self::row_to_company).transpose()
    }

    pub async fn list_companies_for_user(&self, user_id: UserId) -> Result<Vec<Company>> {
        let rows = sqlx::query("SELECT * FROM companies WHERE user_id = ? ORDER BY name")
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .context("Failed to list companies")?;

        rows.iter().map(Self::row_to_company).collect()
    }

    /// Delete a company. Products, ledger entries, employees, customers and
    /// schedules cascade with it.
    pub async fn delete_company(&self, id: CompanyId) -> Result<()> {
        sqlx::query("DELETE FROM companies WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .context("Failed to delete company")?;
        Ok(())
    }

    fn row_to_company(row: &SqliteRow) -> Result<Company> {
        Ok(Company {
            id: parse_uuid(row, "id")?,
            name: row.get("name"),
            employees: row.get("employees"),
            location: row.get("location"),
            email: row.get("email"),
            phone: row.get("phone"),
            address: row.get("address"),
            day_value: row.get("day_value"),
            month_value: row.get("month_value"),
            anual_value: row.get("anual_value"),
            user_id: parse_uuid(row, "user_id")?,
            created_at: parse_timestamp(row, "created_at")?,
            updated_at: parse_timestamp(row, "updated_at")?,
        })
    }

    // ========================
    // Product operations
    // ========================

    pub async fn save_product(&self, product: &Product) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, product_type, amount, min_amount, stock_enabled,
                                  cost_value, supplier, internal_cod, barcode, observation,
                                  company_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(product.id.to_string())
        .bind(&product.name)
        .bind(&product.product_type)
        .bind(product.amount)
        .bind(product.min_amount)
        .bind(product.stock_enabled)
        .bind(product.cost_value)
        .bind(&product.supplier)
        .bind(&product.internal_cod)
        .bind(&product.barcode)
        .bind(&product.observation)
        .bind(product.company_id.to_string())
        .bind(product.created_at.to_rfc3339())
        .bind(product.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .context("Failed to save product")?;
        Ok(())
    }

    pub async fn get_product(&self, id: ProductId) -> Result<Option<Product>> {
        let row = sqlx::query("SELECT * FROM products WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch product")?;

        row.as_ref().map(Self::row_to_product).transpose()
    }

    pub async fn get_product_by_name(
        &self,
        company_id: CompanyId,
        name: &str,
    ) -> Result<Option<Product>> {
        let row = sqlx::query("SELECT * FROM products WHERE company_id = ? AND name = ?")
            .bind(company_id.to_string())
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch product by name")?;

        row.as_ref().map(Self::row_to_product).transpose()
    }

    pub async fn list_products(&self, company_id: CompanyId) -> Result<Vec<Product>> {
        let rows = sqlx::query("SELECT * FROM products WHERE company_id = ? ORDER BY name")
            .bind(company_id.to_string())
            .fetch_all(&self.pool)
            .await
            .context("Failed to list products")?;

        rows.iter().map(Self::row_to_product).collect()
    }

    /// Write back every mutable product column.
    pub async fn update_product(&self, product: &Product) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE products
            SET name = ?, product_type = ?, amount = ?, min_amount = ?, stock_enabled = ?,
                cost_value = ?, supplier = ?, internal_cod = ?, barcode = ?, observation = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&product.name)
        .bind(&product.product_type)
        .bind(product.amount)
        .bind(product.min_amount)
        .bind(product.stock_enabled)
        .bind(product.cost_value)
        .bind(&product.supplier)
        .bind(&product.internal_cod)
        .bind(&product.barcode)
        .bind(&product.observation)
        .bind(product.updated_at.to_rfc3339())
        .bind(product.id.to_string())
        .execute(&self.pool)
        .await
        .context("Failed to update product")?;
        Ok(())
    }

    pub async fn delete_product(&self, id: ProductId) -> Result<()> {
        sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .context("Failed to delete product")?;
        Ok(())
    }

    fn row_to_product(row: &SqliteRow) -> Result<Product> {
        Ok(Product {
            id: parse_uuid(row, "id")?,
            name: row.get("name"),
            product_type: row.get("product_type"),
            amount: row.get("amount"),
            min_amount: row.get("min_amount"),
            stock_enabled: row.get::<i32, _>("stock_enabled") != 0,
            cost_value: row.get("cost_value"),
            supplier: row.get("supplier"),
            internal_cod: row.get("internal_cod"),
            barcode: row.get("barcode"),
            observation: row.get("observation"),
            company_id: parse_uuid(row, "company_id")?,
            created_at: parse_timestamp(row, "created_at")?,
            updated_at: parse_timestamp(row, "updated_at")?,
        })
    }

    // ========================
    // Type operations
    // ========================

    pub async fn save_type(&self, type_prod_service: &TypeProdService) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO types_prod_services (id, name, company_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(type_prod_service.id.to_string())
        .bind(&type_prod_service.name)
        .bind(type_prod_service.company_id.to_string())
        .bind(type_prod_service.created_at.to_rfc3339())
        .bind(type_prod_service.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .context("Failed to save type")?;
        Ok(())
    }

    pub async fn get_type(&self, id: TypeId) -> Result<Option<TypeProdService>> {
        let row = sqlx::query("SELECT * FROM types_prod_services WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch type")?;

        row.as_ref().map(Self::row_to_type).transpose()
    }

    pub async fn list_types(&self, company_id: CompanyId) -> Result<Vec<TypeProdService>> {
        let rows =
            sqlx::query("SELECT * FROM types_prod_services WHERE company_id = ? ORDER BY name")
                .bind(company_id.to_string())
                .fetch_all(&self.pool)
                .await
                .context("Failed to list types")?;

        rows.iter().map(Self::row_to_type).collect()
    }

    pub async fn update_type(&self, type_prod_service: &TypeProdService) -> Result<()> {
        sqlx::query("UPDATE types_prod_services SET name = ?, updated_at = ? WHERE id = ?")
            .bind(&type_prod_service.name)
            .bind(type_prod_service.updated_at.to_rfc3339())
            .bind(type_prod_service.id.to_string())
            .execute(&self.pool)
            .await
            .context("Failed to update type")?;
        Ok(())
    }

    pub async fn delete_type(&self, id: TypeId) -> Result<()> {
        sqlx::query("DELETE FROM types_prod_services WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .context("Failed to delete type")?;
        Ok(())
    }

    fn row_to_type(row: &SqliteRow) -> Result<TypeProdService> {
        Ok(TypeProdService {
            id: parse_uuid(row, "id")?,
            name: row.get("name"),
            company_id: parse_uuid(row, "company_id")?,
            created_at: parse_timestamp(row, "created_at")?,
            updated_at: parse_timestamp(row, "updated_at")?,
        })
    }

    // ========================
    // Ledger operations
    // ========================

    /// Record a ledger entry with its side effects as one unit: conditional
    /// stock decrement, company aggregate bump, entry insert. Either all
    /// three commit or none do.
    ///
    /// The stock guard lives in the UPDATE itself (`amount >= quantity` for
    /// stock-enabled products), so two concurrent sales against the same
    /// product serialize on the row and can never overdraw it.
    pub async fn record_entry(&self, entry: &LedgerEntry) -> Result<RecordOutcome> {
        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await.context("Failed to begin transaction")?;

        // Stock and revenue move regardless of entry direction.
        let updated = sqlx::query(
            r#"
            UPDATE products
            SET amount = amount - ?, updated_at = ?
            WHERE id = ? AND (stock_enabled = 0 OR amount >= ?)
            RETURNING amount
            "#,
        )
        .bind(entry.quantity)
        .bind(&now)
        .bind(entry.product_id.to_string())
        .bind(entry.quantity)
        .fetch_optional(&mut *tx)
        .await
        .context("Failed to update product stock")?;

        let new_stock: i64 = match updated {
            Some(row) => row.get("amount"),
            None => {
                tx.rollback().await.context("Failed to roll back")?;
                let available: i64 =
                    sqlx::query("SELECT amount FROM products WHERE id = ?")
                        .bind(entry.product_id.to_string())
                        .fetch_one(&self.pool)
                        .await
                        .context("Failed to read product stock")?
                        .get("amount");
                return Ok(RecordOutcome::InsufficientStock { available });
            }
        };

        sqlx::query(
            r#"
            UPDATE companies
            SET day_value = day_value + ?,
                month_value = month_value + ?,
                anual_value = anual_value + ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(entry.amount)
        .bind(entry.amount)
        .bind(entry.amount)
        .bind(&now)
        .bind(entry.company_id.to_string())
        .execute(&mut *tx)
        .await
        .context("Failed to update company aggregates")?;

        sqlx::query(
            r#"
            INSERT INTO transitions_buy_sells (id, product_id, company_id, transaction_type,
                                               amount, quantity, description, payment_method,
                                               status, customer_name, customer_document,
                                               created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(entry.id.to_string())
        .bind(entry.product_id.to_string())
        .bind(entry.company_id.to_string())
        .bind(entry.transaction_type.as_str())
        .bind(entry.amount)
        .bind(entry.quantity)
        .bind(&entry.description)
        .bind(entry.payment_method.as_str())
        .bind(entry.status.as_str())
        .bind(&entry.customer_name)
        .bind(&entry.customer_document)
        .bind(entry.created_at.to_rfc3339())
        .bind(entry.updated_at.to_rfc3339())
        .execute(&mut *tx)
        .await
        .context("Failed to insert ledger entry")?;

        tx.commit().await.inspect_err(|e| {
            error!("Failed to commit ledger entry {}: {}", entry.id, e);
        })?;

        debug!(
            "Recorded {} entry {} for product {}",
            entry.transaction_type, entry.id, entry.product_id
        );
        Ok(RecordOutcome::Recorded { new_stock })
    }

    /// Flip an entry to `cancelado` and, for entradas, give the stock back
    /// and pull the company aggregates down, atomically. The status flip is
    /// conditional so a concurrent double-cancel can never reverse twice.
    pub async fn cancel_entry(&self, entry: &LedgerEntry) -> Result<CancelOutcome> {
        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await.context("Failed to begin transaction")?;

        let flipped = sqlx::query(
            r#"
            UPDATE transitions_buy_sells
            SET status = 'cancelado', updated_at = ?
            WHERE id = ? AND status <> 'cancelado'
            "#,
        )
        .bind(&now)
        .bind(entry.id.to_string())
        .execute(&mut *tx)
        .await
        .context("Failed to cancel ledger entry")?
        .rows_affected();

        if flipped == 0 {
            tx.rollback().await.context("Failed to roll back")?;
            return Ok(CancelOutcome::AlreadyCancelled);
        }

        // Only sales ever applied stock/revenue effects worth reversing.
        if entry.reverses_on_cancel() {
            sqlx::query("UPDATE products SET amount = amount + ?, updated_at = ? WHERE id = ?")
                .bind(entry.quantity)
                .bind(&now)
                .bind(entry.product_id.to_string())
                .execute(&mut *tx)
                .await
                .context("Failed to restore product stock")?;

            sqlx::query(
                r#"
                UPDATE companies
                SET day_value = day_value - ?,
                    month_value = month_value - ?,
                    anual_value = anual_value - ?,
                    updated_at = ?
                WHERE id = ?
                "#,
            )
            .bind(entry.amount)
            .bind(entry.amount)
            .bind(entry.amount)
            .bind(&now)
            .bind(entry.company_id.to_string())
            .execute(&mut *tx)
            .await
            .context("Failed to reverse company aggregates")?;
        }

        tx.commit().await.inspect_err(|e| {
            error!("Failed to commit cancellation of {}: {}", entry.id, e);
        })?;

        debug!("Cancelled ledger entry {}", entry.id);
        Ok(CancelOutcome::Cancelled)
    }

    pub async fn get_entry(&self, id: EntryId) -> Result<Option<LedgerEntry>> {
        let row = sqlx::query("SELECT * FROM transitions_buy_sells WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch ledger entry")?;

        row.as_ref().map(Self::row_to_entry).transpose()
    }

    /// One page of a company's ledger, newest first, with the unpaged total.
    pub async fn list_entries_page(
        &self,
        company_id: CompanyId,
        filter: &EntryFilter,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<LedgerEntry>, i64)> {
        let mut where_clause = String::from("WHERE company_id = ?");
        if filter.transaction_type.is_some() {
            where_clause.push_str(" AND transaction_type = ?");
        }
        if filter.start_date.is_some() {
            where_clause.push_str(" AND created_at >= ?");
        }
        if filter.end_date.is_some() {
            where_clause.push_str(" AND created_at < ?");
        }

        let company_id_str = company_id.to_string();
        let start_str = filter.start_date.map(|dt| dt.to_rfc3339());
        let end_str = filter.end_date.map(|dt| dt.to_rfc3339());

        let count_sql = format!(
            "SELECT COUNT(*) as count FROM transitions_buy_sells {}",
            where_clause
        );
        let mut count_query = sqlx::query(&count_sql).bind(&company_id_str);
        if let Some(tt) = filter.transaction_type {
            count_query = count_query.bind(tt.as_str());
        }
        if let Some(ref start) = start_str {
            count_query = count_query.bind(start);
        }
        if let Some(ref end) = end_str {
            count_query = count_query.bind(end);
        }
        let total: i64 = count_query
            .fetch_one(&self.pool)
            .await
            .context("Failed to count ledger entries")?
            .get("count");

        let offset = (page.max(1) - 1) * limit;
        let data_sql = format!(
            "SELECT * FROM transitions_buy_sells {} ORDER BY created_at DESC LIMIT {} OFFSET {}",
            where_clause, limit, offset
        );
        let mut data_query = sqlx::query(&data_sql).bind(&company_id_str);
        if let Some(tt) = filter.transaction_type {
            data_query = data_query.bind(tt.as_str());
        }
        if let Some(ref start) = start_str {
            data_query = data_query.bind(start);
        }
        if let Some(ref end) = end_str {
            data_query = data_query.bind(end);
        }

        let rows = data_query
            .fetch_all(&self.pool)
            .await
            .context("Failed to list ledger entries")?;

        let entries = rows
            .iter()
            .map(Self::row_to_entry)
            .collect::<Result<Vec<_>>>()?;
        Ok((entries, total))
    }

    /// All of a company's entries with the given status in `[start, end)`.
    pub async fn list_entries_between(
        &self,
        company_id: CompanyId,
        status: TransactionStatus,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<LedgerEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM transitions_buy_sells
            WHERE company_id = ? AND status = ? AND created_at >= ? AND created_at < ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(company_id.to_string())
        .bind(status.as_str())
        .bind(start.to_rfc3339())
        .bind(end.to_rfc3339())
        .fetch_all(&self.pool)
        .await
        .context("Failed to list ledger entries in range")?;

        rows.iter().map(Self::row_to_entry).collect()
    }

    /// Every entry of a company, oldest first (export).
    pub async fn list_entries(&self, company_id: CompanyId) -> Result<Vec<LedgerEntry>> {
        let rows = sqlx::query(
            "SELECT * FROM transitions_buy_sells WHERE company_id = ? ORDER BY created_at",
        )
        .bind(company_id.to_string())
        .fetch_all(&self.pool)
        .await
        .context("Failed to list ledger entries")?;

        rows.iter().map(Self::row_to_entry).collect()
    }

    /// Best-selling products in `[start, end)` by total entrada quantity.
    /// Mirrors the summary contract: filtered by direction, not by status.
    pub async fn top_products_by_quantity(
        &self,
        company_id: CompanyId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<(Product, i64)>> {
        let rows = sqlx::query(
            r#"
            SELECT p.*, SUM(t.quantity) as total_quantity
            FROM transitions_buy_sells t
            JOIN products p ON p.id = t.product_id
            WHERE t.company_id = ? AND t.transaction_type = 'entrada'
              AND t.created_at >= ? AND t.created_at < ?
            GROUP BY t.product_id
            ORDER BY total_quantity DESC
            LIMIT ?
            "#,
        )
        .bind(company_id.to_string())
        .bind(start.to_rfc3339())
        .bind(end.to_rfc3339())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to rank products")?;

        rows.iter()
            .map(|row| {
                let product = Self::row_to_product(row)?;
                let total: i64 = row.get("total_quantity");
                Ok((product, total))
            })
            .collect()
    }

    fn row_to_entry(row: &SqliteRow) -> Result<LedgerEntry> {
        let type_str: String = row.get("transaction_type");
        let method_str: String = row.get("payment_method");
        let status_str: String = row.get("status");

        Ok(LedgerEntry {
            id: parse_uuid(row, "id")?,
            product_id: parse_uuid(row, "product_id")?,
            company_id: parse_uuid(row, "company_id")?,
            transaction_type: TransactionType::from_str(&type_str)
                .ok_or_else(|| anyhow::anyhow!("Invalid transaction type: {}", type_str))?,
            amount: row.get("amount"),
            quantity: row.get("quantity"),
            description: row.get("description"),
            payment_method: PaymentMethod::from_str(&method_str)
                .ok_or_else(|| anyhow::anyhow!("Invalid payment method: {}", method_str))?,
            status: TransactionStatus::from_str(&status_str)
                .ok_or_else(|| anyhow::anyhow!("Invalid status: {}", status_str))?,
            customer_name: row.get("customer_name"),
            customer_document: row.get("customer_document"),
            created_at: parse_timestamp(row, "created_at")?,
            updated_at: parse_timestamp(row, "updated_at")?,
        })
    }

    // ========================
    // Employee operations
    // ========================

    pub async fn save_employee(&self, employee: &Employee) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO employees (id, name, email, phone, position, salary, hire_date,
                                   status, company_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(employee.id.to_string())
        .bind(&employee.name)
        .bind(&employee.email)
        .bind(&employee.phone)
        .bind(&employee.position)
        .bind(employee.salary)
        .bind(employee.hire_date.map(|d| d.to_string()))
        .bind(employee.status.as_str())
        .bind(employee.company_id.to_string())
        .bind(employee.created_at.to_rfc3339())
        .bind(employee.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .context("Failed to save employee")?;
        Ok(())
    }

    pub async fn get_employee(&self, id: EmployeeId) -> Result<Option<Employee>> {
        let row = sqlx::query("SELECT * FROM employees WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch employee")?;

        row.as_ref().map(Self::row_to_employee).transpose()
    }

    pub async fn get_employee_by_email(&self, email: &str) -> Result<Option<Employee>> {
        let row = sqlx::query("SELECT * FROM employees WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch employee by email")?;

        row.as_ref().map(Self::row_to_employee).transpose()
    }

    pub async fn list_employees(&self) -> Result<Vec<Employee>> {
        let rows = sqlx::query("SELECT * FROM employees ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list employees")?;

        rows.iter().map(Self::row_to_employee).collect()
    }

    pub async fn list_employees_by_company(&self, company_id: CompanyId) -> Result<Vec<Employee>> {
        let rows =
            sqlx::query("SELECT * FROM employees WHERE company_id = ? ORDER BY created_at DESC")
                .bind(company_id.to_string())
                .fetch_all(&self.pool)
                .await
                .context("Failed to list employees for company")?;

        rows.iter().map(Self::row_to_employee).collect()
    }

    pub async fn update_employee(&self, employee: &Employee) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE employees
            SET name = ?, email = ?, phone = ?, position = ?, salary = ?, hire_date = ?,
                status = ?, company_id = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&employee.name)
        .bind(&employee.email)
        .bind(&employee.phone)
        .bind(&employee.position)
        .bind(employee.salary)
        .bind(employee.hire_date.map(|d| d.to_string()))
        .bind(employee.status.as_str())
        .bind(employee.company_id.to_string())
        .bind(employee.updated_at.to_rfc3339())
        .bind(employee.id.to_string())
        .execute(&self.pool)
        .await
        .context("Failed to update employee")?;
        Ok(())
    }

    pub async fn delete_employee(&self, id: EmployeeId) -> Result<()> {
        sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .context("Failed to delete employee")?;
        Ok(())
    }

    fn row_to_employee(row: &SqliteRow) -> Result<Employee> {
        let status_str: String = row.get("status");
        let hire_date_str: Option<String> = row.get("hire_date");

        Ok(Employee {
            id: parse_uuid(row, "id")?,
            name: row.get("name"),
            email: row.get("email"),
            phone: row.get("phone"),
            position: row.get("position"),
            salary: row.get("salary"),
            hire_date: hire_date_str
                .map(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d"))
                .transpose()
                .context("Invalid hire_date")?,
            status: EmployeeStatus::from_str(&status_str)
                .ok_or_else(|| anyhow::anyhow!("Invalid employee status: {}", status_str))?,
            company_id: parse_uuid(row, "company_id")?,
            created_at: parse_timestamp(row, "created_at")?,
            updated_at: parse_timestamp(row, "updated_at")?,
        })
    }

    // ========================
    // Customer operations
    // ========================

    pub async fn save_customer(&self, customer: &Customer) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO customers (id, name, email, phone, address, document, notes,
                                   company_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(customer.id.to_string())
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.address)
        .bind(&customer.document)
        .bind(&customer.notes)
        .bind(customer.company_id.to_string())
        .bind(customer.created_at.to_rfc3339())
        .bind(customer.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .context("Failed to save customer")?;
        Ok(())
    }

    pub async fn get_customer(&self, id: CustomerId) -> Result<Option<Customer>> {
        let row = sqlx::query("SELECT * FROM customers WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch customer")?;

        row.as_ref().map(Self::row_to_customer).transpose()
    }

    pub async fn list_customers(&self) -> Result<Vec<Customer>> {
        let rows = sqlx::query("SELECT * FROM customers ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list customers")?;

        rows.iter().map(Self::row_to_customer).collect()
    }

    pub async fn list_customers_by_company(&self, company_id: CompanyId) -> Result<Vec<Customer>> {
        let rows =
            sqlx::query("SELECT * FROM customers WHERE company_id = ? ORDER BY created_at DESC")
                .bind(company_id.to_string())
                .fetch_all(&self.pool)
                .await
                .context("Failed to list customers for company")?;

        rows.iter().map(Self::row_to_customer).collect()
    }

    pub async fn update_customer(&self, customer: &Customer) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE customers
            SET name = ?, email = ?, phone = ?, address = ?, document = ?, notes = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.address)
        .bind(&customer.document)
        .bind(&customer.notes)
        .bind(customer.updated_at.to_rfc3339())
        .bind(customer.id.to_string())
        .execute(&self.pool)
        .await
        .context("Failed to update customer")?;
        Ok(())
    }

    pub async fn delete_customer(&self, id: CustomerId) -> Result<()> {
        sqlx::query("DELETE FROM customers WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .context("Failed to delete customer")?;
        Ok(())
    }

    fn row_to_customer(row: &SqliteRow) -> Result<Customer> {
        Ok(Customer {
            id: parse_uuid(row, "id")?,
            name: row.get("name"),
            email: row.get("email"),
            phone: row.get("phone"),
            address: row.get("address"),
            document: row.get("document"),
            notes: row.get("notes"),
            company_id: parse_uuid(row, "company_id")?,
            created_at: parse_timestamp(row, "created_at")?,
            updated_at: parse_timestamp(row, "updated_at")?,
        })
    }

    // ========================
    // Schedule operations
    // ========================

    pub async fn save_schedule(&self, schedule: &Schedule) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO schedules (id, customer_name, customer_phone, customer_email,
                                   service_type, service_description, scheduled_date,
                                   scheduled_time, duration, status, notes, company_id,
                                   created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(schedule.id.to_string())
        .bind(&schedule.customer_name)
        .bind(&schedule.customer_phone)
        .bind(&schedule.customer_email)
        .bind(&schedule.service_type)
        .bind(&schedule.service_description)
        .bind(schedule.scheduled_date.to_string())
        .bind(&schedule.scheduled_time)
        .bind(schedule.duration)
        .bind(schedule.status.as_str())
        .bind(&schedule.notes)
        .bind(schedule.company_id.to_string())
        .bind(schedule.created_at.to_rfc3339())
        .bind(schedule.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .context("Failed to save schedule")?;
        Ok(())
    }

    pub async fn get_schedule(&self, id: ScheduleId) -> Result<Option<Schedule>> {
        let row = sqlx::query("SELECT * FROM schedules WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch schedule")?;

        row.as_ref().map(Self::row_to_schedule).transpose()
    }

    pub async fn list_schedules(&self) -> Result<Vec<Schedule>> {
        let rows = sqlx::query("SELECT * FROM schedules ORDER BY scheduled_date, scheduled_time")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list schedules")?;

        rows.iter().map(Self::row_to_schedule).collect()
    }

    pub async fn list_schedules_by_company(&self, company_id: CompanyId) -> Result<Vec<Schedule>> {
        let rows = sqlx::query(
            "SELECT * FROM schedules WHERE company_id = ? ORDER BY scheduled_date, scheduled_time",
        )
        .bind(company_id.to_string())
        .fetch_all(&self.pool)
        .await
        .context("Failed to list schedules for company")?;

        rows.iter().map(Self::row_to_schedule).collect()
    }

    /// Appointments within an inclusive date range, earliest first.
    pub async fn list_schedules_in_range(
        &self,
        company_id: CompanyId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Schedule>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM schedules
            WHERE company_id = ? AND scheduled_date >= ? AND scheduled_date <= ?
            ORDER BY scheduled_date, scheduled_time
            "#,
        )
        .bind(company_id.to_string())
        .bind(start.to_string())
        .bind(end.to_string())
        .fetch_all(&self.pool)
        .await
        .context("Failed to list schedules in range")?;

        rows.iter().map(Self::row_to_schedule).collect()
    }

    pub async fn update_schedule(&self, schedule: &Schedule) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE schedules
            SET customer_name = ?, customer_phone = ?, customer_email = ?, service_type = ?,
                service_description = ?, scheduled_date = ?, scheduled_time = ?, duration = ?,
                status = ?, notes = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&schedule.customer_name)
        .bind(&schedule.customer_phone)
        .bind(&schedule.customer_email)
        .bind(&schedule.service_type)
        .bind(&schedule.service_description)
        .bind(schedule.scheduled_date.to_string())
        .bind(&schedule.scheduled_time)
        .bind(schedule.duration)
        .bind(schedule.status.as_str())
        .bind(&schedule.notes)
        .bind(schedule.updated_at.to_rfc3339())
        .bind(schedule.id.to_string())
        .execute(&self.pool)
        .await
        .context("Failed to update schedule")?;
        Ok(())
    }

    pub async fn delete_schedule(&self, id: ScheduleId) -> Result<()> {
        sqlx::query("DELETE FROM schedules WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .context("Failed to delete schedule")?;
        Ok(())
    }

    fn row_to_schedule(row: &SqliteRow) -> Result<Schedule> {
        let status_str: String = row.get("status");
        let date_str: String = row.get("scheduled_date");

        Ok(Schedule {
            id: parse_uuid(row, "id")?,
            customer_name: row.get("customer_name"),
            customer_phone: row.get("customer_phone"),
            customer_email: row.get("customer_email"),
            service_type: row.get("service_type"),
            service_description: row.get("service_description"),
            scheduled_date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                .context("Invalid scheduled_date")?,
            scheduled_time: row.get("scheduled_time"),
            duration: row.get("duration"),
            status: ScheduleStatus::from_str(&status_str)
                .ok_or_else(|| anyhow::anyhow!("Invalid schedule status: {}", status_str))?,
            notes: row.get("notes"),
            company_id: parse_uuid(row, "company_id")?,
            created_at: parse_timestamp(row, "created_at")?,
            updated_at: parse_timestamp(row, "updated_at")?,
        })
    }
}

fn parse_uuid(row: &SqliteRow, column: &str) -> Result<Uuid> {
    let value: String = row.get(column);
    Uuid::parse_str(&value).with_context(|| format!("Invalid UUID in column {}", column))
}

fn parse_timestamp(row: &SqliteRow, column: &str) -> Result<DateTime<Utc>> {
    let value: String = row.get(column);
    Ok(DateTime::parse_from_rfc3339(&value)
        .with_context(|| format!("Invalid timestamp in column {}", column))?
        .with_timezone(&Utc))
}
