//! `costwise bom ...`
//!
//! ```text
//! bom attach --parent P --component C --quantity Q
//!      │
//!      ├── load P            (ItemNotFound if missing)
//!      ├── load C + C's lines (ItemNotFound if missing)
//!      ├── resolve_component_line   ← may reject Q, P == C or a product C
//!      └── insert the frozen line
//! ```
//!
//! Nothing is written unless every step before the insert succeeded.

use serde::Serialize;
use tracing::info;

use super::item::load_item;
use crate::config::AppConfig;
use crate::error::AppResult;
use crate::report::{field, Message, Render};
use costwise_core::bom::{bom_total, resolve_component_line, ComponentSnapshot};
use costwise_core::validation::validate_item_name;
use costwise_core::{BomLine, Money, ValidationError};
use costwise_db::Database;

pub async fn attach(db: &Database, parent_id: i64, component_id: i64, quantity: f64) -> AppResult<BomLine> {
    let parent = load_item(db, parent_id).await?;
    let source = load_item(db, component_id).await?;
    let source_lines = db.bom().list_for_parent(source.id).await?;

    let snapshot = ComponentSnapshot::new(source, &source_lines);
    let line = resolve_component_line(parent.id, &snapshot, quantity)?;
    let saved = db.bom().insert(&line).await?;

    info!(
        parent_id,
        component_id,
        quantity,
        cost = %saved.cost,
        "Component attached"
    );
    Ok(saved)
}

/// Adds a cost line that does not come from another item.
pub async fn add_manual(
    db: &Database,
    parent_id: i64,
    name: &str,
    cost: f64,
    description: Option<String>,
) -> AppResult<BomLine> {
    validate_item_name(name)?;
    if !cost.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "cost".to_string(),
        }
        .into());
    }

    let parent = load_item(db, parent_id).await?;
    let mut line = BomLine::manual(parent.id, name.trim(), Money::new(cost));
    line.description = description.unwrap_or_default();

    let saved = db.bom().insert(&line).await?;
    info!(parent_id, line_id = saved.id, "Manual BOM line added");
    Ok(saved)
}

/// The lines of one item and their sum.
#[derive(Debug, Clone, Serialize)]
pub struct BomList {
    pub parent_id: i64,
    pub parent_name: String,
    pub lines: Vec<BomLine>,
    pub total: Money,
}

impl Render for BomList {
    fn render(&self, config: &AppConfig) -> String {
        let mut out = format!("BOM of #{} {}\n", self.parent_id, self.parent_name);
        if self.lines.is_empty() {
            out.push_str("  (none)\n");
        }
        for line in &self.lines {
            out.push_str(&format!(
                "  #{:<5} {:<40} {:>12}\n",
                line.id,
                line.name,
                config.money(line.cost)
            ));
            if !line.description.is_empty() {
                out.push_str(&format!("         {}\n", line.description));
            }
        }
        out.push_str(&field("Total", config.money(self.total)));
        out
    }
}

pub async fn list(db: &Database, parent_id: i64) -> AppResult<BomList> {
    let parent = load_item(db, parent_id).await?;
    let lines = db.bom().list_for_parent(parent_id).await?;

    Ok(BomList {
        parent_id,
        parent_name: parent.name,
        total: bom_total(&lines),
        lines,
    })
}

pub async fn remove(db: &Database, line_id: i64) -> AppResult<Message> {
    db.bom().delete(line_id).await?;
    Ok(Message::new(format!("Removed BOM line #{}", line_id)))
}

// =============================================================================
// Unit Tests
// =============================================================================
