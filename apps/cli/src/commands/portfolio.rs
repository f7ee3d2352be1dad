//! `costwise portfolio <ids..> | --all`

use std::collections::HashSet;

use tracing::{debug, info};

use super::item::load_item;
use crate::error::AppResult;
use costwise_core::allocation::{allocate_portfolio, PortfolioAllocation, PortfolioItem};
use costwise_core::{Item, ItemKind};
use costwise_db::Database;

/// Allocates the monthly operating cost pool over the chosen products.
///
/// With `all` every product is used; otherwise `ids` in the given order,
/// each id once.
/// Components, an empty selection or a selection without expected units are
/// rejected by the allocator.
pub async fn portfolio(db: &Database, ids: &[i64], all: bool) -> AppResult<PortfolioAllocation> {
    let items: Vec<Item> = if all {
        db.items().list(Some(ItemKind::Product)).await?
    } else {
        // Repeated ids select the item once, at its first position.
        let mut seen = HashSet::with_capacity(ids.len());
        let mut items = Vec::with_capacity(ids.len());
        for &id in ids.iter().filter(|&&id| seen.insert(id)) {
            items.push(load_item(db, id).await?);
        }
        items
    };

    let mut selection = Vec::with_capacity(items.len());
    for item in &items {
        let subproducts_cost = db.bom().total_for_parent(item.id).await?;
        selection.push(PortfolioItem::from_item(item, subproducts_cost));
    }

    let total = db.operating_costs().monthly_total().await?;
    debug!(items = selection.len(), total = %total, "Allocating portfolio");

    let allocation = allocate_portfolio(&selection, total)?;
    info!(
        items = allocation.items.len(),
        per_unit = %allocation.operating_cost_per_unit(),
        "Portfolio allocated"
    );
    Ok(allocation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::{assert_money, item_args, test_db};
    use crate::commands::{cost, item};
    use crate::error::ErrorCode;
    use costwise_core::CostFrequency;

    #[tokio::test]
    async fn test_costs_split_by_expected_units() {
        let db = test_db().await;
        cost::add(&db, "Rent", 1000.0, CostFrequency::Monthly).await.unwrap();

        let mut a = item_args("Board", ItemKind::Product, 10.0);
        a.expected_units = 300.0;
        let a = item::add(&db, a).await.unwrap();
        let mut b = item_args("Shelf", ItemKind::Product, 20.0);
        b.expected_units = 100.0;
        let b = item::add(&db, b).await.unwrap();

        let allocation = portfolio(&db, &[a.id, b.id], false).await.unwrap();
        assert_eq!(allocation.total_units, 400.0);
        assert_money(allocation.operating_cost_per_unit(), 2.5);

        let board = &allocation.items[0];
        assert_eq!(board.item_id, a.id);
        assert_money(board.share, 750.0);
        assert!((board.percentage - 75.0).abs() < 1e-9);
        assert_money(board.operating_cost_per_unit, 2.5);
        assert_money(allocation.items[1].operating_cost_per_unit, 2.5);

        let shares: f64 = allocation.items.iter().map(|l| l.share.amount()).sum();
        assert!((shares - 1000.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_repeated_ids_count_once() {
        let db = test_db().await;
        cost::add(&db, "Rent", 600.0, CostFrequency::Monthly).await.unwrap();
        let a = item::add(&db, item_args("Board", ItemKind::Product, 10.0)).await.unwrap();
        let b = item::add(&db, item_args("Shelf", ItemKind::Product, 20.0)).await.unwrap();

        let allocation = portfolio(&db, &[b.id, a.id, b.id, a.id], false).await.unwrap();
        assert_eq!(allocation.items.len(), 2);
        assert_eq!(allocation.total_units, 200.0);
        assert_eq!(allocation.items[0].item_id, b.id);
        assert_eq!(allocation.items[1].item_id, a.id);
        assert_money(allocation.items[0].share, 300.0);
    }

    #[tokio::test]
    async fn test_all_uses_products_only() {
        let db = test_db().await;
        item::add(&db, item_args("Board", ItemKind::Product, 10.0)).await.unwrap();
        item::add(&db, item_args("Plank", ItemKind::Component, 5.0)).await.unwrap();

        let allocation = portfolio(&db, &[], true).await.unwrap();
        assert_eq!(allocation.items.len(), 1);
        assert_eq!(allocation.items[0].name, "Board");
    }

    #[tokio::test]
    async fn test_rejections() {
        let db = test_db().await;

        let err = portfolio(&db, &[], false).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let plank = item::add(&db, item_args("Plank", ItemKind::Component, 5.0)).await.unwrap();
        let err = portfolio(&db, &[plank.id], false).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let mut idle = item_args("Idle", ItemKind::Product, 5.0);
        idle.expected_units = 0.0;
        let idle = item::add(&db, idle).await.unwrap();
        let err = portfolio(&db, &[idle.id], false).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = portfolio(&db, &[idle.id, 404], false).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
