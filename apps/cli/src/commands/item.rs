//! `costwise item ...`

use serde::Serialize;
use tracing::info;

use crate::cli::{ItemAddArgs, ItemUpdateArgs};
use crate::config::AppConfig;
use crate::error::AppResult;
use crate::report::{field, Message, Render};
use costwise_core::bom::bom_total;
use costwise_core::conversion::convert as convert_kind;
use costwise_core::validation::validate_item;
use costwise_core::{BomLine, CoreError, Item, ItemKind, ItemMetadata, Money, Percent};
use costwise_db::Database;

/// Loads an item or fails with `ItemNotFound`.
pub(crate) async fn load_item(db: &Database, id: i64) -> AppResult<Item> {
    db.items()
        .get_by_id(id)
        .await?
        .ok_or_else(|| CoreError::ItemNotFound(id).into())
}

/// Trims a text option; blank means "not set".
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub async fn add(db: &Database, args: ItemAddArgs) -> AppResult<Item> {
    let base_cost = Money::new(args.base_cost);
    let mut item = match args.kind {
        ItemKind::Product => Item::new_product(args.name.trim(), base_cost),
        ItemKind::Component => Item::new_component(args.name.trim(), base_cost),
    }
    .with_units_per_package(args.units_per_package)
    .with_expected_monthly_units(args.expected_units);

    if let Some(markup) = args.markup {
        item.markup = Percent::new(markup);
    }
    if let Some(tax) = args.tax {
        item.tax_rate = Percent::new(tax);
    }
    item.metadata = ItemMetadata {
        category: non_blank(args.category),
        company: non_blank(args.company),
        purchase_link: non_blank(args.link),
    };

    validate_item(&item)?;
    let saved = db.items().insert(&item).await?;
    info!(id = saved.id, name = %saved.name, kind = %saved.kind, "Item created");
    Ok(saved)
}

pub async fn list(db: &Database, kind: Option<ItemKind>) -> AppResult<Vec<Item>> {
    Ok(db.items().list(kind).await?)
}

/// An item with the BOM lines it currently carries.
#[derive(Debug, Clone, Serialize)]
pub struct ItemDetail {
    pub item: Item,
    pub bom_lines: Vec<BomLine>,
    pub subproducts_cost: Money,
}

impl Render for ItemDetail {
    fn render(&self, config: &AppConfig) -> String {
        let mut out = self.item.render(config);
        out.push_str("\nBill of Materials\n");
        if self.bom_lines.is_empty() {
            out.push_str("  (none)\n");
        }
        for line in &self.bom_lines {
            out.push_str(&format!(
                "  #{:<5} {:<40} {:>12}\n",
                line.id,
                line.name,
                config.money(line.cost)
            ));
        }
        out.push_str(&field("Subproducts total", config.money(self.subproducts_cost)));
        out
    }
}

pub async fn show(db: &Database, id: i64) -> AppResult<ItemDetail> {
    let item = load_item(db, id).await?;
    let bom_lines = db.bom().list_for_parent(id).await?;
    let subproducts_cost = bom_total(&bom_lines);

    Ok(ItemDetail {
        item,
        bom_lines,
        subproducts_cost,
    })
}

/// Replaces a metadata field when the flag was given. A blank value clears it.
fn apply_text(target: &mut Option<String>, value: Option<String>) {
    if let Some(value) = value {
        *target = non_blank(Some(value));
    }
}

pub async fn update(db: &Database, args: ItemUpdateArgs) -> AppResult<Item> {
    let mut item = load_item(db, args.id).await?;

    if let Some(name) = args.name {
        item.name = name.trim().to_string();
    }
    if let Some(cost) = args.base_cost {
        item.base_cost = Money::new(cost);
    }
    if let Some(markup) = args.markup {
        item.markup = Percent::new(markup);
    }
    if let Some(tax) = args.tax {
        item.tax_rate = Percent::new(tax);
    }
    if let Some(units) = args.units_per_package {
        item.units_per_package = units;
    }
    if let Some(units) = args.expected_units {
        item.expected_monthly_units = units;
    }
    apply_text(&mut item.metadata.category, args.category);
    apply_text(&mut item.metadata.company, args.company);
    apply_text(&mut item.metadata.purchase_link, args.link);

    validate_item(&item)?;
    let saved = db.items().update(&item).await?;
    info!(id = saved.id, "Item updated");
    Ok(saved)
}

pub async fn delete(db: &Database, id: i64) -> AppResult<Message> {
    let item = load_item(db, id).await?;
    let lines = db.bom().list_for_parent(id).await?.len();

    db.items().delete(id).await?;
    info!(id, lines, "Item deleted");

    Ok(Message::new(format!(
        "Deleted item #{} '{}' and {} BOM line(s)",
        id, item.name, lines
    )))
}

/// Outcome of `item convert`.
#[derive(Debug, Clone, Serialize)]
pub struct Conversion {
    pub item: Item,
    /// False when the item already had the requested kind.
    pub changed: bool,
}

impl Render for Conversion {
    fn render(&self, _config: &AppConfig) -> String {
        if self.changed {
            format!(
                "Converted #{} '{}' to {} (markup {}, tax {})",
                self.item.id, self.item.name, self.item.kind, self.item.markup, self.item.tax_rate
            )
        } else {
            format!(
                "#{} '{}' is already a {}",
                self.item.id, self.item.name, self.item.kind
            )
        }
    }
}

pub async fn convert(db: &Database, id: i64, to: ItemKind) -> AppResult<Conversion> {
    let mut item = load_item(db, id).await?;
    let changed = convert_kind(&mut item, to);

    if changed {
        item = db.items().update(&item).await?;
        info!(id, kind = %item.kind, "Item converted");
    }

    Ok(Conversion { item, changed })
}

// =============================================================================
// Unit Tests
// =============================================================================
