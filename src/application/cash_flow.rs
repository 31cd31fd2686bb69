use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::{
    payment_method_totals, total_entradas, Cents, CompanyId, EntryId, LedgerEntry, PaymentMethod,
    Product, ProductId, SummaryPeriod, TransactionStatus, TransactionType,
};
use crate::storage::{CancelOutcome, EntryFilter, RecordOutcome};

use super::{
    AppError, CashEntryReceipt, CashFlowSummary, ErpService, Identity, Page, SummaryTotals,
    TopProduct, TransactionView,
};

/// Input for recording a cash-flow transaction.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub product_id: ProductId,
    pub company_id: CompanyId,
    pub transaction_type: TransactionType,
    pub amount: Cents,
    pub quantity: i64,
    pub description: Option<String>,
    pub payment_method: PaymentMethod,
    pub customer_name: Option<String>,
    pub customer_document: Option<String>,
}

/// Input for the quick sale path. Omitted fields take the till defaults:
/// one unit, paid in cash, described as a sale of the product.
#[derive(Debug, Clone)]
pub struct NewCashEntry {
    pub product_id: ProductId,
    pub company_id: CompanyId,
    pub amount: Cents,
    pub quantity: Option<i64>,
    pub description: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    pub customer_name: Option<String>,
    pub customer_document: Option<String>,
}

/// Query for the paginated transaction listing. Date bounds are half-open
/// (`>= start`, `< end`) and each is optional.
#[derive(Debug, Clone)]
pub struct TransactionQuery {
    pub page: i64,
    pub limit: i64,
    pub transaction_type: Option<TransactionType>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl Default for TransactionQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 20,
            transaction_type: None,
            start_date: None,
            end_date: None,
        }
    }
}

impl ErpService {
    // ========================
    // Cash flow operations
    // ========================

    /// Record a transaction and its side effects: the entry lands
    /// `confirmado`, the product loses `quantity` units and all three
    /// company revenue buckets gain `amount`, whichever direction the
    /// entry has. The three writes commit or roll back together.
    pub async fn create_transaction(
        &self,
        _identity: &Identity,
        input: NewTransaction,
    ) -> Result<TransactionView, AppError> {
        let entry = LedgerEntry::new(
            input.product_id,
            input.company_id,
            input.transaction_type,
            input.amount,
            input.quantity,
            input.payment_method,
        )
        .with_customer(input.customer_name, input.customer_document);

        let entry = match input.description {
            Some(description) => entry.with_description(description),
            None => entry,
        };

        let (view, _new_stock) = self.record_entry_checked(entry).await?;
        Ok(view)
    }

    /// Record a sale (entrada) with the till defaults, returning the entry
    /// plus the product's post-sale stock level.
    pub async fn cash_entry(
        &self,
        _identity: &Identity,
        input: NewCashEntry,
    ) -> Result<CashEntryReceipt, AppError> {
        // The auto-description needs the product name, so resolve it before
        // building the entry; record_entry_checked re-validates existence.
        let product = self
            .repo()
            .get_product(input.product_id)
            .await?
            .ok_or(AppError::ProductNotFound(input.product_id))?;

        let description = input
            .description
            .unwrap_or_else(|| format!("Venda de {}", product.name));

        let entry = LedgerEntry::new(
            input.product_id,
            input.company_id,
            TransactionType::Entrada,
            input.amount,
            input.quantity.unwrap_or(1),
            input.payment_method.unwrap_or(PaymentMethod::Dinheiro),
        )
        .with_description(description)
        .with_customer(input.customer_name, input.customer_document);

        let (transaction, new_stock) = self.record_entry_checked(entry).await?;
        Ok(CashEntryReceipt {
            transaction,
            new_stock,
        })
    }

    /// Cancel a transaction. Entrada entries get their stock and revenue
    /// effects reversed; saida entries only flip status. Terminal: a second
    /// cancel fails and reverses nothing.
    pub async fn cancel_transaction(
        &self,
        _identity: &Identity,
        entry_id: EntryId,
    ) -> Result<LedgerEntry, AppError> {
        let entry = self
            .repo()
            .get_entry(entry_id)
            .await?
            .ok_or(AppError::EntryNotFound(entry_id))?;
        if entry.is_cancelled() {
            return Err(AppError::AlreadyCancelled(entry_id));
        }

        match self.repo().cancel_entry(&entry).await? {
            CancelOutcome::AlreadyCancelled => Err(AppError::AlreadyCancelled(entry_id)),
            CancelOutcome::Cancelled => {
                info!(
                    "Cancelled {} transaction {} ({})",
                    entry.transaction_type, entry.id, entry.amount
                );
                self.repo()
                    .get_entry(entry_id)
                    .await?
                    .ok_or(AppError::EntryNotFound(entry_id))
            }
        }
    }

    /// One page of a company's transactions, newest first, each joined with
    /// its product and company snapshots.
    pub async fn transactions(
        &self,
        _identity: &Identity,
        company_id: CompanyId,
        query: TransactionQuery,
    ) -> Result<Page<TransactionView>, AppError> {
        let company = self
            .repo()
            .get_company(company_id)
            .await?
            .ok_or(AppError::CompanyNotFound(company_id))?;

        let filter = EntryFilter {
            transaction_type: query.transaction_type,
            start_date: query.start_date,
            end_date: query.end_date,
        };
        let page = query.page.max(1);
        let limit = query.limit.max(1);
        let (entries, total) = self
            .repo()
            .list_entries_page(company_id, &filter, page, limit)
            .await?;

        let mut products: std::collections::HashMap<ProductId, Product> =
            std::collections::HashMap::new();
        let mut data = Vec::with_capacity(entries.len());
        for entry in entries {
            if !products.contains_key(&entry.product_id) {
                let product = self
                    .repo()
                    .get_product(entry.product_id)
                    .await?
                    .ok_or(AppError::ProductNotFound(entry.product_id))?;
                products.insert(entry.product_id, product);
            }
            data.push(TransactionView {
                product: products[&entry.product_id].clone(),
                company: company.clone(),
                transaction: entry,
            });
        }

        Ok(Page::new(data, total, page, limit))
    }

    /// Cash-flow summary for a reporting period: revenue total over
    /// confirmed entradas, per-payment-method totals over all confirmed
    /// entries, and the five best-selling products.
    pub async fn cash_flow_summary(
        &self,
        _identity: &Identity,
        company_id: CompanyId,
        period: SummaryPeriod,
    ) -> Result<CashFlowSummary, AppError> {
        let (start, end) = period.range(Utc::now());

        let entries = self
            .repo()
            .list_entries_between(company_id, TransactionStatus::Confirmado, start, end)
            .await?;

        let total = total_entradas(&entries);
        let payment_methods = payment_method_totals(&entries)
            .into_iter()
            .map(|(method, amount)| (method.as_str().to_string(), amount))
            .collect();

        let top_products = self
            .repo()
            .top_products_by_quantity(company_id, start, end, 5)
            .await?
            .into_iter()
            .map(|(product, total_quantity)| TopProduct {
                product,
                total_quantity,
            })
            .collect();

        Ok(CashFlowSummary {
            period,
            start_date: start,
            end_date: end,
            summary: SummaryTotals {
                total_entradas: total,
                saldo: total,
                total_transactions: entries.len() as i64,
            },
            payment_methods,
            top_products,
        })
    }

    /// Shared create path: fail-fast validation, atomic record, fresh
    /// snapshots for the response.
    async fn record_entry_checked(
        &self,
        entry: LedgerEntry,
    ) -> Result<(TransactionView, i64), AppError> {
        let product = self
            .repo()
            .get_product(entry.product_id)
            .await?
            .ok_or(AppError::ProductNotFound(entry.product_id))?;
        self.repo()
            .get_company(entry.company_id)
            .await?
            .ok_or(AppError::CompanyNotFound(entry.company_id))?;

        // Friendly fail-fast check; the conditional update inside
        // record_entry is what actually guarantees no overdraft.
        if !product.has_stock_for(entry.quantity) {
            return Err(AppError::InsufficientStock {
                available: product.amount,
                requested: entry.quantity,
            });
        }

        let new_stock = match self.repo().record_entry(&entry).await? {
            RecordOutcome::InsufficientStock { available } => {
                return Err(AppError::InsufficientStock {
                    available,
                    requested: entry.quantity,
                });
            }
            RecordOutcome::Recorded { new_stock } => new_stock,
        };

        info!(
            "Recorded {} transaction {} for company {}",
            entry.transaction_type, entry.id, entry.company_id
        );

        let product = self
            .repo()
            .get_product(entry.product_id)
            .await?
            .ok_or(AppError::ProductNotFound(entry.product_id))?;
        let company = self
            .repo()
            .get_company(entry.company_id)
            .await?
            .ok_or(AppError::CompanyNotFound(entry.company_id))?;

        Ok((
            TransactionView {
                transaction: entry,
                product,
                company,
            },
            new_stock,
        ))
    }
}
