use std::collections::HashMap;
use std::io::Write;

use anyhow::Result;

use crate::application::{ErpService, Identity};
use crate::domain::{CompanyId, Product, ProductId};

/// Exporter for turning ERP data into CSV reports.
pub struct Exporter<'a> {
    service: &'a ErpService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a ErpService) -> Self {
        Self { service }
    }

    /// Export a company's full ledger to CSV, oldest first, with product
    /// names resolved. Returns the number of rows written.
    pub async fn export_entries_csv<W: Write>(
        &self,
        identity: &Identity,
        company_id: CompanyId,
        writer: W,
    ) -> Result<usize> {
        let company = self.service.owned_company(identity, company_id).await?;
        let entries = self.service.repo().list_entries(company_id).await?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "id",
            "created_at",
            "company",
            "product",
            "transaction_type",
            "amount_cents",
            "quantity",
            "payment_method",
            "status",
            "customer_name",
            "description",
        ])?;

        let mut product_names: HashMap<ProductId, String> = HashMap::new();
        let mut count = 0;
        for entry in &entries {
            let product_name = match product_names.get(&entry.product_id) {
                Some(name) => name.clone(),
                None => {
                    // Ledger rows cascade with their product, so the lookup
                    // should always hit; emit an empty name if it does not.
                    let name = self
                        .service
                        .repo()
                        .get_product(entry.product_id)
                        .await?
                        .map(|p| p.name)
                        .unwrap_or_default();
                    product_names.insert(entry.product_id, name.clone());
                    name
                }
            };

            csv_writer.write_record([
                entry.id.to_string(),
                entry.created_at.to_rfc3339(),
                company.name.clone(),
                product_name,
                entry.transaction_type.as_str().to_string(),
                entry.amount.to_string(),
                entry.quantity.to_string(),
                entry.payment_method.as_str().to_string(),
                entry.status.as_str().to_string(),
                entry.customer_name.clone().unwrap_or_default(),
                entry.description.clone().unwrap_or_default(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export a company's product list with stock levels to CSV.
    pub async fn export_products_csv<W: Write>(
        &self,
        identity: &Identity,
        company_id: CompanyId,
        writer: W,
    ) -> Result<usize> {
        let products: Vec<Product> = self.service.list_products(identity, company_id).await?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "name",
            "type",
            "amount",
            "min_amount",
            "stock_enabled",
            "cost_value_cents",
            "supplier",
            "low_stock",
        ])?;

        let mut count = 0;
        for product in &products {
            csv_writer.write_record([
                product.name.clone(),
                product.product_type.clone(),
                product.amount.to_string(),
                product.min_amount.to_string(),
                product.stock_enabled.to_string(),
                product.cost_value.to_string(),
                product.supplier.clone(),
                product.is_low_stock().to_string(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }
}
