// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use nexos::application::{ErpService, Identity, NewCompany, NewProduct};
use nexos::domain::{Company, Product};
use nexos::storage::Repository;
use tempfile::TempDir;
use uuid::Uuid;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(ErpService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = ErpService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Like `test_service`, but also hands back a second repository connection
/// onto the same database, for tests that need to seed backdated ledger
/// entries directly.
pub async fn test_service_with_repo() -> Result<(ErpService, Repository, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = ErpService::init(db_path.to_str().unwrap()).await?;
    let repo = Repository::connect(&format!("sqlite:{}", db_path.to_str().unwrap())).await?;
    Ok((service, repo, temp_dir))
}

/// A fresh caller identity.
pub fn test_identity() -> Identity {
    Identity::new(Uuid::new_v4())
}

/// Helper to parse a date string into DateTime<Utc>
pub fn parse_date(date_str: &str) -> DateTime<Utc> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
}

/// Test fixture: standard company and product setup
pub struct Fixtures;

impl Fixtures {
    /// Create a company owned by the given identity.
    pub async fn company(service: &ErpService, identity: &Identity) -> Result<Company> {
        Self::company_named(service, identity, "Barbearia Teste").await
    }

    pub async fn company_named(
        service: &ErpService,
        identity: &Identity,
        name: &str,
    ) -> Result<Company> {
        let company = service
            .create_company(
                identity,
                NewCompany {
                    name: name.into(),
                    employees: "3".into(),
                    location: "Centro".into(),
                    ..NewCompany::default()
                },
            )
            .await?;
        Ok(company)
    }

    /// Create a stock-tracked product with the given on-hand amount.
    pub async fn stocked_product(
        service: &ErpService,
        identity: &Identity,
        company: &Company,
        name: &str,
        amount: i64,
    ) -> Result<Product> {
        let product = service
            .create_product(
                identity,
                NewProduct {
                    name: name.into(),
                    product_type: "cosmetico".into(),
                    company_id: company.id,
                    amount,
                    min_amount: 2,
                    stock_enabled: true,
                    cost_value: 1000,
                    ..NewProduct::default()
                },
            )
            .await?;
        Ok(product)
    }

    /// Create a stock-disabled product (a service).
    pub async fn service_product(
        service: &ErpService,
        identity: &Identity,
        company: &Company,
        name: &str,
    ) -> Result<Product> {
        let product = service
            .create_product(
                identity,
                NewProduct {
                    name: name.into(),
                    product_type: "servico".into(),
                    company_id: company.id,
                    stock_enabled: false,
                    ..NewProduct::default()
                },
            )
            .await?;
        Ok(product)
    }
}
