mod common;

use std::sync::Arc;

use anyhow::Result;
use common::{test_identity, test_service, Fixtures};
use nexos::application::{AppError, NewCashEntry};

/// Two concurrent sales against a product with 5 units, each asking for 3:
/// exactly one must succeed and one must fail with InsufficientStock. The
/// conditional stock decrement makes overdraft impossible regardless of
/// interleaving.
#[tokio::test]
async fn test_concurrent_sales_never_overdraw_stock() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let identity = test_identity();
    let company = Fixtures::company(&service, &identity).await?;
    let product = Fixtures::stocked_product(&service, &identity, &company, "Shampoo", 5).await?;

    let service = Arc::new(service);

    let make_input = |amount| NewCashEntry {
        product_id: product.id,
        company_id: company.id,
        amount,
        quantity: Some(3),
        description: None,
        payment_method: None,
        customer_name: None,
        customer_document: None,
    };

    let first = {
        let service = Arc::clone(&service);
        let identity = identity.clone();
        let input = make_input(3000);
        tokio::spawn(async move { service.cash_entry(&identity, input).await })
    };
    let second = {
        let service = Arc::clone(&service);
        let identity = identity.clone();
        let input = make_input(3000);
        tokio::spawn(async move { service.cash_entry(&identity, input).await })
    };

    let results = [first.await?, second.await?];

    let successes = results.iter().filter(|r| r.is_ok()).count();
    let shortages = results
        .iter()
        .filter(|r| matches!(r, Err(AppError::InsufficientStock { .. })))
        .count();
    assert_eq!(successes, 1, "exactly one sale must go through");
    assert_eq!(shortages, 1, "the other must hit the stock guard");

    // 5 - 3 = 2 units left, and exactly one sale's worth of revenue.
    let product_after = service.get_product(&identity, product.id).await?;
    assert_eq!(product_after.amount, 2);
    let company_after = service.get_company(&identity, company.id).await?;
    assert_eq!(company_after.day_value, 3000);
    assert_eq!(company_after.month_value, 3000);
    assert_eq!(company_after.anual_value, 3000);

    Ok(())
}

/// Cancelling the same entry from two tasks must reverse it exactly once.
#[tokio::test]
async fn test_concurrent_cancel_reverses_once() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let identity = test_identity();
    let company = Fixtures::company(&service, &identity).await?;
    let product = Fixtures::stocked_product(&service, &identity, &company, "Shampoo", 10).await?;

    let receipt = service
        .cash_entry(
            &identity,
            NewCashEntry {
                product_id: product.id,
                company_id: company.id,
                amount: 5000,
                quantity: Some(2),
                description: None,
                payment_method: None,
                customer_name: None,
                customer_document: None,
            },
        )
        .await?;
    let entry_id = receipt.transaction.transaction.id;

    let service = Arc::new(service);
    let tasks: Vec<_> = (0..2)
        .map(|_| {
            let service = Arc::clone(&service);
            let identity = identity.clone();
            tokio::spawn(async move { service.cancel_transaction(&identity, entry_id).await })
        })
        .collect();

    let mut successes = 0;
    for task in tasks {
        if task.await?.is_ok() {
            successes += 1;
        }
    }
    assert_eq!(successes, 1, "only one cancel may win");

    let product_after = service.get_product(&identity, product.id).await?;
    assert_eq!(product_after.amount, 10);
    let company_after = service.get_company(&identity, company.id).await?;
    assert_eq!(company_after.day_value, 0);

    Ok(())
}
