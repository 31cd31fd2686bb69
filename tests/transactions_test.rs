mod common;

use anyhow::Result;
use chrono::{Duration, Utc};
use common::{test_identity, test_service_with_repo, Fixtures};
use nexos::application::{AppError, TransactionQuery};
use nexos::domain::{LedgerEntry, PaymentMethod, TransactionType};
use uuid::Uuid;

#[tokio::test]
async fn test_listing_is_newest_first_and_joined() -> Result<()> {
    let (service, repo, _temp) = test_service_with_repo().await?;
    let identity = test_identity();
    let company = Fixtures::company(&service, &identity).await?;
    let product = Fixtures::stocked_product(&service, &identity, &company, "Shampoo", 50).await?;

    for (days_ago, amount) in [(3, 1000), (1, 2000), (2, 3000)] {
        let entry = LedgerEntry::new(
            product.id,
            company.id,
            TransactionType::Entrada,
            amount,
            1,
            PaymentMethod::Pix,
        )
        .with_created_at(Utc::now() - Duration::days(days_ago));
        repo.record_entry(&entry).await?;
    }

    let page = service
        .transactions(&identity, company.id, TransactionQuery::default())
        .await?;

    let amounts: Vec<i64> = page.data.iter().map(|v| v.transaction.amount).collect();
    assert_eq!(amounts, vec![2000, 3000, 1000]);
    assert!(page.data.iter().all(|v| v.product.name == "Shampoo"));
    assert!(page.data.iter().all(|v| v.company.id == company.id));

    Ok(())
}

#[tokio::test]
async fn test_pagination_meta() -> Result<()> {
    let (service, repo, _temp) = test_service_with_repo().await?;
    let identity = test_identity();
    let company = Fixtures::company(&service, &identity).await?;
    let product = Fixtures::stocked_product(&service, &identity, &company, "Shampoo", 50).await?;

    for i in 0..5 {
        let entry = LedgerEntry::new(
            product.id,
            company.id,
            TransactionType::Entrada,
            1000 + i,
            1,
            PaymentMethod::Pix,
        )
        .with_created_at(Utc::now() - Duration::minutes(i));
        repo.record_entry(&entry).await?;
    }

    let page = service
        .transactions(
            &identity,
            company.id,
            TransactionQuery {
                page: 2,
                limit: 2,
                ..TransactionQuery::default()
            },
        )
        .await?;

    assert_eq!(page.data.len(), 2);
    assert_eq!(page.meta.total, 5);
    assert_eq!(page.meta.per_page, 2);
    assert_eq!(page.meta.current_page, 2);
    assert_eq!(page.meta.last_page, 3);

    Ok(())
}

#[tokio::test]
async fn test_type_and_date_filters() -> Result<()> {
    let (service, repo, _temp) = test_service_with_repo().await?;
    let identity = test_identity();
    let company = Fixtures::company(&service, &identity).await?;
    let product = Fixtures::stocked_product(&service, &identity, &company, "Shampoo", 50).await?;

    let now = Utc::now();
    for (days_ago, transaction_type) in [
        (1, TransactionType::Entrada),
        (3, TransactionType::Saida),
        (5, TransactionType::Entrada),
    ] {
        let entry = LedgerEntry::new(
            product.id,
            company.id,
            transaction_type,
            1000,
            1,
            PaymentMethod::Pix,
        )
        .with_created_at(now - Duration::days(days_ago));
        repo.record_entry(&entry).await?;
    }

    let entradas = service
        .transactions(
            &identity,
            company.id,
            TransactionQuery {
                transaction_type: Some(TransactionType::Entrada),
                ..TransactionQuery::default()
            },
        )
        .await?;
    assert_eq!(entradas.meta.total, 2);

    // Half-open range: start inclusive, end exclusive.
    let start = now - Duration::days(4);
    let end = now - Duration::days(1);
    let ranged = service
        .transactions(
            &identity,
            company.id,
            TransactionQuery {
                start_date: Some(start),
                end_date: Some(end),
                ..TransactionQuery::default()
            },
        )
        .await?;
    assert_eq!(ranged.meta.total, 1);
    assert_eq!(
        ranged.data[0].transaction.transaction_type,
        TransactionType::Saida
    );

    // Open-ended lower bound only.
    let since = service
        .transactions(
            &identity,
            company.id,
            TransactionQuery {
                start_date: Some(now - Duration::days(4)),
                ..TransactionQuery::default()
            },
        )
        .await?;
    assert_eq!(since.meta.total, 2);

    Ok(())
}

#[tokio::test]
async fn test_listing_unknown_company() -> Result<()> {
    let (service, _repo, _temp) = test_service_with_repo().await?;
    let identity = test_identity();

    let result = service
        .transactions(&identity, Uuid::new_v4(), TransactionQuery::default())
        .await;
    assert!(matches!(result, Err(AppError::CompanyNotFound(_))));

    Ok(())
}
