use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use crate::application::{
    ErpService, Identity, NewCashEntry, NewCompany, NewCustomer, NewEmployee, NewProduct,
    NewSchedule, NewTransaction, ProductUpdate, TransactionQuery, SUGGESTED_QUESTIONS,
};
use crate::domain::{
    format_cents, parse_cents, PaymentMethod, SummaryPeriod, TransactionType,
};
use crate::io::Exporter;

/// Nexos - ERP backend operator console
#[derive(Parser)]
#[command(name = "nexos")]
#[command(about = "Products, stock, cash flow and scheduling for small multi-tenant ERPs")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "nexos.db", env = "NEXOS_DATABASE")]
    pub database: String,

    /// Operator user id (identity minted out of band)
    #[arg(long, env = "NEXOS_OPERATOR_ID")]
    pub operator: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Company management commands
    #[command(subcommand)]
    Company(CompanyCommands),

    /// Product management commands
    #[command(subcommand)]
    Product(ProductCommands),

    /// Record a quick sale (entrada with till defaults)
    Sale {
        /// Product ID
        product: String,

        /// Company ID
        #[arg(long)]
        company: String,

        /// Sale amount (e.g., "50.00" or "50,00")
        #[arg(short, long)]
        amount: String,

        /// Units sold (defaults to 1)
        #[arg(short, long)]
        quantity: Option<i64>,

        /// Description (defaults to "Venda de <product>")
        #[arg(long)]
        description: Option<String>,

        /// Payment method: dinheiro, cartao_credito, cartao_debito, pix, transferencia
        #[arg(short, long)]
        method: Option<String>,

        /// Customer name
        #[arg(long)]
        customer: Option<String>,

        /// Customer document
        #[arg(long)]
        document: Option<String>,
    },

    /// Ledger transaction commands
    #[command(subcommand)]
    Transaction(TransactionCommands),

    /// Show the cash-flow summary for a company
    Summary {
        /// Company ID
        company: String,

        /// Period: today, week, month, year
        #[arg(short, long, default_value = "today")]
        period: String,

        /// Emit the summary as JSON (the REST response shape)
        #[arg(long)]
        json: bool,
    },

    /// Employee management commands
    #[command(subcommand)]
    Employee(EmployeeCommands),

    /// Customer management commands
    #[command(subcommand)]
    Customer(CustomerCommands),

    /// Appointment schedule commands
    #[command(subcommand)]
    Schedule(ScheduleCommands),

    /// Export data to CSV
    Export {
        /// What to export: transactions, products
        export_type: String,

        /// Company ID
        #[arg(long)]
        company: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show suggested help-chat questions
    Suggestions,
}

#[derive(Subcommand)]
pub enum CompanyCommands {
    /// Register a company
    Add {
        /// Company name (must be unique)
        name: String,

        /// Headcount description
        #[arg(long, default_value = "")]
        employees: String,

        #[arg(long, default_value = "")]
        location: String,

        #[arg(long, default_value = "")]
        email: String,

        #[arg(long, default_value = "")]
        phone: String,

        #[arg(long, default_value = "")]
        address: String,
    },

    /// List your companies
    List,

    /// Show a company with its revenue aggregates
    Show {
        /// Company ID
        id: String,
    },

    /// Delete a company (cascades products, ledger, staff, schedules)
    Delete {
        /// Company ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ProductCommands {
    /// Register a product or service
    Add {
        /// Product name (unique within the company)
        name: String,

        /// Product/service type name
        #[arg(short = 't', long = "type")]
        product_type: String,

        /// Company ID
        #[arg(long)]
        company: String,

        /// Initial on-hand units
        #[arg(long, default_value = "0")]
        amount: i64,

        /// Restock threshold
        #[arg(long, default_value = "0")]
        min_amount: i64,

        /// Track and enforce stock (leave off for services)
        #[arg(long)]
        stock: bool,

        /// Acquisition cost (e.g., "12.50")
        #[arg(long)]
        cost: Option<String>,

        #[arg(long, default_value = "")]
        supplier: String,

        #[arg(long, default_value = "")]
        barcode: String,
    },

    /// List a company's products with stock levels
    List {
        /// Company ID
        company: String,
    },

    /// Update product fields
    Update {
        /// Product ID
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(short = 't', long = "type")]
        product_type: Option<String>,

        #[arg(long)]
        amount: Option<i64>,

        #[arg(long)]
        min_amount: Option<i64>,

        #[arg(long)]
        stock: Option<bool>,

        #[arg(long)]
        cost: Option<String>,

        #[arg(long)]
        supplier: Option<String>,
    },

    /// Delete a product
    Delete {
        /// Product ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a transaction (entrada or saida)
    Add {
        /// Product ID
        product: String,

        /// Company ID
        #[arg(long)]
        company: String,

        /// Direction: entrada, saida
        #[arg(short = 't', long = "type")]
        transaction_type: String,

        /// Amount (e.g., "50.00")
        #[arg(short, long)]
        amount: String,

        /// Units moved
        #[arg(short, long, default_value = "1")]
        quantity: i64,

        #[arg(long)]
        description: Option<String>,

        /// Payment method: dinheiro, cartao_credito, cartao_debito, pix, transferencia
        #[arg(short, long, default_value = "dinheiro")]
        method: String,

        #[arg(long)]
        customer: Option<String>,

        #[arg(long)]
        document: Option<String>,
    },

    /// Cancel a transaction (reverses entrada side effects)
    Cancel {
        /// Transaction ID
        id: String,
    },

    /// List a company's transactions, newest first
    List {
        /// Company ID
        company: String,

        #[arg(short, long, default_value = "1")]
        page: i64,

        #[arg(short, long, default_value = "20")]
        limit: i64,

        /// Filter by direction: entrada, saida
        #[arg(short = 't', long = "type")]
        transaction_type: Option<String>,

        /// Filter from date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        from: Option<String>,

        /// Filter to date (YYYY-MM-DD, exclusive)
        #[arg(long)]
        to: Option<String>,

        /// Emit the page as JSON (the REST response shape)
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum EmployeeCommands {
    /// Register an employee
    Add {
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        position: String,

        /// Company ID
        #[arg(long)]
        company: String,

        /// Salary (e.g., "2500.00")
        #[arg(long)]
        salary: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        /// Hire date (YYYY-MM-DD)
        #[arg(long)]
        hired: Option<String>,
    },

    /// List employees of a company
    List {
        /// Company ID
        company: String,
    },

    /// Delete an employee
    Delete {
        /// Employee ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum CustomerCommands {
    /// Register a customer
    Add {
        name: String,

        /// Company ID
        #[arg(long)]
        company: String,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        document: Option<String>,
    },

    /// List customers of a company
    List {
        /// Company ID
        company: String,
    },

    /// Delete a customer
    Delete {
        /// Customer ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ScheduleCommands {
    /// Book an appointment
    Add {
        /// Customer name
        customer: String,

        #[arg(long)]
        phone: String,

        /// Service type name
        #[arg(long)]
        service: String,

        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Time of day (HH:MM)
        #[arg(long)]
        time: String,

        /// Company ID
        #[arg(long)]
        company: String,

        /// Duration in minutes
        #[arg(long)]
        duration: Option<i64>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// List appointments of a company
    List {
        /// Company ID
        company: String,

        /// Range start (YYYY-MM-DD); requires --to
        #[arg(long)]
        from: Option<String>,

        /// Range end (YYYY-MM-DD, inclusive); requires --from
        #[arg(long)]
        to: Option<String>,
    },

    /// Delete an appointment
    Delete {
        /// Schedule ID
        id: String,
    },
}

impl Cli {
    fn identity(&self) -> Result<Identity> {
        match &self.operator {
            Some(raw) => {
                let user_id =
                    Uuid::parse_str(raw).context("Invalid operator ID (expected UUID)")?;
                Ok(Identity::new(user_id))
            }
            None => Ok(Identity::local_operator()),
        }
    }

    pub async fn run(self) -> Result<()> {
        let identity = self.identity()?;

        match self.command {
            Commands::Init => {
                ErpService::init(&self.database).await?;
                println!("Database initialized: {}", self.database);
            }

            Commands::Company(company_cmd) => {
                let service = ErpService::connect(&self.database).await?;
                run_company_command(&service, &identity, company_cmd).await?;
            }

            Commands::Product(product_cmd) => {
                let service = ErpService::connect(&self.database).await?;
                run_product_command(&service, &identity, product_cmd).await?;
            }

            Commands::Sale {
                product,
                company,
                amount,
                quantity,
                description,
                method,
                customer,
                document,
            } => {
                let service = ErpService::connect(&self.database).await?;
                let receipt = service
                    .cash_entry(
                        &identity,
                        NewCashEntry {
                            product_id: parse_id(&product, "product")?,
                            company_id: parse_id(&company, "company")?,
                            amount: parse_cents(&amount)
                                .context("Invalid amount format. Use '50.00' or '50,00'")?,
                            quantity,
                            description,
                            payment_method: method.as_deref().map(parse_method).transpose()?,
                            customer_name: customer,
                            customer_document: document,
                        },
                    )
                    .await?;

                println!(
                    "Recorded sale: {} x{} {} ({})",
                    receipt.transaction.product.name,
                    receipt.transaction.transaction.quantity,
                    format_cents(receipt.transaction.transaction.amount),
                    receipt.transaction.transaction.id
                );
                println!("New stock: {}", receipt.new_stock);
            }

            Commands::Transaction(tx_cmd) => {
                let service = ErpService::connect(&self.database).await?;
                run_transaction_command(&service, &identity, tx_cmd).await?;
            }

            Commands::Summary {
                company,
                period,
                json,
            } => {
                let service = ErpService::connect(&self.database).await?;
                let summary = service
                    .cash_flow_summary(
                        &identity,
                        parse_id(&company, "company")?,
                        SummaryPeriod::parse_or_today(&period),
                    )
                    .await?;

                if json {
                    println!("{}", serde_json::to_string_pretty(&summary)?);
                    return Ok(());
                }

                println!(
                    "Summary ({}) {} .. {}",
                    summary.period,
                    summary.start_date.format("%Y-%m-%d %H:%M"),
                    summary.end_date.format("%Y-%m-%d %H:%M")
                );
                println!(
                    "  Entradas: {}  Saldo: {}  Transactions: {}",
                    format_cents(summary.summary.total_entradas),
                    format_cents(summary.summary.saldo),
                    summary.summary.total_transactions
                );
                if !summary.payment_methods.is_empty() {
                    println!("  By payment method:");
                    let mut methods: Vec<_> = summary.payment_methods.iter().collect();
                    methods.sort();
                    for (method, total) in methods {
                        println!("    {:<16} {}", method, format_cents(*total));
                    }
                }
                if !summary.top_products.is_empty() {
                    println!("  Top products:");
                    for top in &summary.top_products {
                        println!("    {:<24} x{}", top.product.name, top.total_quantity);
                    }
                }
            }

            Commands::Employee(employee_cmd) => {
                let service = ErpService::connect(&self.database).await?;
                run_employee_command(&service, &identity, employee_cmd).await?;
            }

            Commands::Customer(customer_cmd) => {
                let service = ErpService::connect(&self.database).await?;
                run_customer_command(&service, &identity, customer_cmd).await?;
            }

            Commands::Schedule(schedule_cmd) => {
                let service = ErpService::connect(&self.database).await?;
                run_schedule_command(&service, &identity, schedule_cmd).await?;
            }

            Commands::Export {
                export_type,
                company,
                output,
            } => {
                let service = ErpService::connect(&self.database).await?;
                let company_id = parse_id(&company, "company")?;
                let exporter = Exporter::new(&service);

                let count = match (export_type.as_str(), output) {
                    ("transactions", Some(path)) => {
                        let file = std::fs::File::create(&path)
                            .with_context(|| format!("Failed to create {}", path))?;
                        exporter
                            .export_entries_csv(&identity, company_id, file)
                            .await?
                    }
                    ("transactions", None) => {
                        exporter
                            .export_entries_csv(&identity, company_id, std::io::stdout())
                            .await?
                    }
                    ("products", Some(path)) => {
                        let file = std::fs::File::create(&path)
                            .with_context(|| format!("Failed to create {}", path))?;
                        exporter
                            .export_products_csv(&identity, company_id, file)
                            .await?
                    }
                    ("products", None) => {
                        exporter
                            .export_products_csv(&identity, company_id, std::io::stdout())
                            .await?
                    }
                    (other, _) => {
                        anyhow::bail!(
                            "Unknown export type '{}'. Use: transactions, products",
                            other
                        );
                    }
                };
                eprintln!("Exported {} row(s)", count);
            }

            Commands::Suggestions => {
                for suggestion in SUGGESTED_QUESTIONS {
                    println!("- {}", suggestion);
                }
            }
        }

        Ok(())
    }
}

async fn run_company_command(
    service: &ErpService,
    identity: &Identity,
    command: CompanyCommands,
) -> Result<()> {
    match command {
        CompanyCommands::Add {
            name,
            employees,
            location,
            email,
            phone,
            address,
        } => {
            let company = service
                .create_company(
                    identity,
                    NewCompany {
                        name,
                        employees,
                        location,
                        email,
                        phone,
                        address,
                    },
                )
                .await?;
            println!("Created company: {} ({})", company.name, company.id);
        }

        CompanyCommands::List => {
            let companies = service.list_companies(identity).await?;
            if companies.is_empty() {
                println!("No companies registered.");
            }
            for company in companies {
                println!("{}  {}", company.id, company.name);
            }
        }

        CompanyCommands::Show { id } => {
            let company = service
                .get_company(identity, parse_id(&id, "company")?)
                .await?;
            println!("{} ({})", company.name, company.id);
            println!("  Location: {}", company.location);
            println!(
                "  Revenue: day {}  month {}  year {}",
                format_cents(company.day_value),
                format_cents(company.month_value),
                format_cents(company.anual_value)
            );
        }

        CompanyCommands::Delete { id } => {
            service
                .delete_company(identity, parse_id(&id, "company")?)
                .await?;
            println!("Deleted company: {}", id);
        }
    }
    Ok(())
}

async fn run_product_command(
    service: &ErpService,
    identity: &Identity,
    command: ProductCommands,
) -> Result<()> {
    match command {
        ProductCommands::Add {
            name,
            product_type,
            company,
            amount,
            min_amount,
            stock,
            cost,
            supplier,
            barcode,
        } => {
            let cost_value = cost
                .map(|c| parse_cents(&c))
                .transpose()
                .context("Invalid cost format")?
                .unwrap_or(0);

            let product = service
                .create_product(
                    identity,
                    NewProduct {
                        name,
                        product_type,
                        company_id: parse_id(&company, "company")?,
                        amount,
                        min_amount,
                        stock_enabled: stock,
                        cost_value,
                        supplier,
                        barcode,
                        ..NewProduct::default()
                    },
                )
                .await?;
            println!("Created product: {} ({})", product.name, product.id);
        }

        ProductCommands::List { company } => {
            let products = service
                .list_products(identity, parse_id(&company, "company")?)
                .await?;
            for product in products {
                let stock = if product.stock_enabled {
                    let marker = if product.is_low_stock() { "  LOW" } else { "" };
                    format!("{}{}", product.amount, marker)
                } else {
                    "-".to_string()
                };
                println!(
                    "{}  {:<24} {:<12} stock: {}",
                    product.id, product.name, product.product_type, stock
                );
            }
        }

        ProductCommands::Update {
            id,
            name,
            product_type,
            amount,
            min_amount,
            stock,
            cost,
            supplier,
        } => {
            let cost_value = cost
                .map(|c| parse_cents(&c))
                .transpose()
                .context("Invalid cost format")?;

            let product = service
                .update_product(
                    identity,
                    parse_id(&id, "product")?,
                    ProductUpdate {
                        name,
                        product_type,
                        amount,
                        min_amount,
                        stock_enabled: stock,
                        cost_value,
                        supplier,
                        ..ProductUpdate::default()
                    },
                )
                .await?;
            println!("Updated product: {} ({})", product.name, product.id);
        }

        ProductCommands::Delete { id } => {
            service
                .delete_product(identity, parse_id(&id, "product")?)
                .await?;
            println!("Deleted product: {}", id);
        }
    }
    Ok(())
}

async fn run_transaction_command(
    service: &ErpService,
    identity: &Identity,
    command: TransactionCommands,
) -> Result<()> {
    match command {
        TransactionCommands::Add {
            product,
            company,
            transaction_type,
            amount,
            quantity,
            description,
            method,
            customer,
            document,
        } => {
            let view = service
                .create_transaction(
                    identity,
                    NewTransaction {
                        product_id: parse_id(&product, "product")?,
                        company_id: parse_id(&company, "company")?,
                        transaction_type: TransactionType::from_str(&transaction_type)
                            .with_context(|| {
                                format!("Invalid transaction type '{}'", transaction_type)
                            })?,
                        amount: parse_cents(&amount)
                            .context("Invalid amount format. Use '50.00' or '50,00'")?,
                        quantity,
                        description,
                        payment_method: parse_method(&method)?,
                        customer_name: customer,
                        customer_document: document,
                    },
                )
                .await?;

            println!(
                "Recorded {}: {} {} ({})",
                view.transaction.transaction_type,
                view.product.name,
                format_cents(view.transaction.amount),
                view.transaction.id
            );
        }

        TransactionCommands::Cancel { id } => {
            let entry = service
                .cancel_transaction(identity, parse_id(&id, "transaction")?)
                .await?;
            println!(
                "Cancelled {} of {} ({})",
                entry.transaction_type,
                format_cents(entry.amount),
                entry.id
            );
        }

        TransactionCommands::List {
            company,
            page,
            limit,
            transaction_type,
            from,
            to,
            json,
        } => {
            let query = TransactionQuery {
                page,
                limit,
                transaction_type: transaction_type
                    .as_deref()
                    .map(|t| {
                        TransactionType::from_str(t)
                            .with_context(|| format!("Invalid transaction type '{}'", t))
                    })
                    .transpose()?,
                start_date: from.as_deref().map(parse_day_start).transpose()?,
                end_date: to.as_deref().map(parse_day_start).transpose()?,
            };

            let result = service
                .transactions(identity, parse_id(&company, "company")?, query)
                .await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
                return Ok(());
            }

            for view in &result.data {
                let entry = &view.transaction;
                let marker = if entry.is_cancelled() { " [cancelled]" } else { "" };
                println!(
                    "{}  {}  {:<7} {:>12} x{:<4} {} {}{}",
                    entry.id,
                    entry.created_at.format("%Y-%m-%d %H:%M"),
                    entry.transaction_type,
                    format_cents(entry.amount),
                    entry.quantity,
                    entry.payment_method,
                    view.product.name,
                    marker
                );
            }
            println!(
                "Page {}/{} ({} total)",
                result.meta.current_page, result.meta.last_page, result.meta.total
            );
        }
    }
    Ok(())
}

async fn run_employee_command(
    service: &ErpService,
    identity: &Identity,
    command: EmployeeCommands,
) -> Result<()> {
    match command {
        EmployeeCommands::Add {
            name,
            email,
            position,
            company,
            salary,
            phone,
            hired,
        } => {
            let employee = service
                .create_employee(
                    identity,
                    NewEmployee {
                        name,
                        email,
                        phone,
                        position,
                        salary: salary
                            .map(|s| parse_cents(&s))
                            .transpose()
                            .context("Invalid salary format")?
                            .unwrap_or(0),
                        hire_date: hired.as_deref().map(parse_date).transpose()?,
                        status: None,
                        company_id: parse_id(&company, "company")?,
                    },
                )
                .await?;
            println!("Created employee: {} ({})", employee.name, employee.id);
        }

        EmployeeCommands::List { company } => {
            let employees = service
                .list_employees_by_company(identity, parse_id(&company, "company")?)
                .await?;
            for employee in employees {
                println!(
                    "{}  {:<24} {:<16} {} [{}]",
                    employee.id,
                    employee.name,
                    employee.position,
                    format_cents(employee.salary),
                    employee.status
                );
            }
        }

        EmployeeCommands::Delete { id } => {
            service
                .delete_employee(identity, parse_id(&id, "employee")?)
                .await?;
            println!("Deleted employee: {}", id);
        }
    }
    Ok(())
}

async fn run_customer_command(
    service: &ErpService,
    identity: &Identity,
    command: CustomerCommands,
) -> Result<()> {
    match command {
        CustomerCommands::Add {
            name,
            company,
            email,
            phone,
            document,
        } => {
            let customer = service
                .create_customer(
                    identity,
                    NewCustomer {
                        name,
                        email,
                        phone,
                        document,
                        company_id: parse_id(&company, "company")?,
                        ..NewCustomer::default()
                    },
                )
                .await?;
            println!("Created customer: {} ({})", customer.name, customer.id);
        }

        CustomerCommands::List { company } => {
            let customers = service
                .list_customers_by_company(identity, parse_id(&company, "company")?)
                .await?;
            for customer in customers {
                println!(
                    "{}  {:<24} {}",
                    customer.id,
                    customer.name,
                    customer.phone.as_deref().unwrap_or("-")
                );
            }
        }

        CustomerCommands::Delete { id } => {
            service
                .delete_customer(identity, parse_id(&id, "customer")?)
                .await?;
            println!("Deleted customer: {}", id);
        }
    }
    Ok(())
}

async fn run_schedule_command(
    service: &ErpService,
    identity: &Identity,
    command: ScheduleCommands,
) -> Result<()> {
    match command {
        ScheduleCommands::Add {
            customer,
            phone,
            service: service_type,
            date,
            time,
            company,
            duration,
            notes,
        } => {
            let schedule = service
                .create_schedule(
                    identity,
                    NewSchedule {
                        customer_name: customer,
                        customer_phone: phone,
                        customer_email: None,
                        service_type,
                        service_description: None,
                        scheduled_date: parse_date(&date)?,
                        scheduled_time: time,
                        duration,
                        notes,
                        company_id: parse_id(&company, "company")?,
                    },
                )
                .await?;
            println!(
                "Booked {} for {} on {} {} ({})",
                schedule.service_type,
                schedule.customer_name,
                schedule.scheduled_date,
                schedule.scheduled_time,
                schedule.id
            );
        }

        ScheduleCommands::List { company, from, to } => {
            let company_id = parse_id(&company, "company")?;
            let schedules = match (from, to) {
                (Some(from), Some(to)) => {
                    service
                        .schedules_in_range(
                            identity,
                            company_id,
                            parse_date(&from)?,
                            parse_date(&to)?,
                        )
                        .await?
                }
                (None, None) => service.list_schedules_by_company(identity, company_id).await?,
                _ => anyhow::bail!("--from and --to must be given together"),
            };

            for schedule in schedules {
                println!(
                    "{}  {} {}  {:<20} {} [{}]",
                    schedule.id,
                    schedule.scheduled_date,
                    schedule.scheduled_time,
                    schedule.customer_name,
                    schedule.service_type,
                    schedule.status
                );
            }
        }

        ScheduleCommands::Delete { id } => {
            service
                .delete_schedule(identity, parse_id(&id, "schedule")?)
                .await?;
            println!("Deleted schedule: {}", id);
        }
    }
    Ok(())
}

fn parse_id(raw: &str, what: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).with_context(|| format!("Invalid {} ID (expected UUID)", what))
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}'. Use YYYY-MM-DD", raw))
}

/// Parse a day into the UTC instant at its midnight, for half-open filters.
fn parse_day_start(raw: &str) -> Result<DateTime<Utc>> {
    Ok(parse_date(raw)?.and_hms_opt(0, 0, 0).unwrap().and_utc())
}

fn parse_method(raw: &str) -> Result<PaymentMethod> {
    PaymentMethod::from_str(raw)
        .with_context(|| format!("Invalid payment method '{}'", raw))
}
