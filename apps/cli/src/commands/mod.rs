//! # Commands
//!
//! Each command loads what it needs from the record store, hands the
//! snapshot to `costwise-core`, persists the result and returns a
//! serializable value. [`dispatch`] turns that value into text or JSON.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Command ──► dispatch ──► item / bom / cost / price / portfolio / lookup │
//! │                                  │                                      │
//! │                                  ▼                                      │
//! │                   Database ◄──► costwise-core                           │
//! │                                  │                                      │
//! │                                  ▼                                      │
//! │                       Output::emit (text | JSON)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod bom;
pub mod cost;
pub mod item;
pub mod lookup;
pub mod portfolio;
pub mod price;

use crate::cli::{BomCommand, CategoryCommand, Command, CompanyCommand, CostCommand, ItemCommand};
use crate::error::AppResult;
use crate::report::Output;
use costwise_db::Database;

/// Runs one parsed command and renders its result.
pub async fn dispatch(db: &Database, command: Command, out: Output<'_>) -> AppResult<String> {
    match command {
        Command::Item { action } => match action {
            ItemCommand::Add(args) => out.emit(&item::add(db, args).await?),
            ItemCommand::List { kind } => out.emit(&item::list(db, kind).await?),
            ItemCommand::Show { id } => out.emit(&item::show(db, id).await?),
            ItemCommand::Update(args) => out.emit(&item::update(db, args).await?),
            ItemCommand::Delete { id } => out.emit(&item::delete(db, id).await?),
            ItemCommand::Convert { id, to } => out.emit(&item::convert(db, id, to).await?),
        },

        Command::Bom { action } => match action {
            BomCommand::Attach {
                parent,
                component,
                quantity,
            } => out.emit(&bom::attach(db, parent, component, quantity).await?),
            BomCommand::Add {
                parent,
                name,
                cost,
                description,
            } => out.emit(&bom::add_manual(db, parent, &name, cost, description).await?),
            BomCommand::List { parent } => out.emit(&bom::list(db, parent).await?),
            BomCommand::Remove { line_id } => out.emit(&bom::remove(db, line_id).await?),
        },

        Command::Cost { action } => match action {
            CostCommand::Add {
                name,
                amount,
                frequency,
            } => out.emit(&cost::add(db, &name, amount, frequency).await?),
            CostCommand::List { units } => out.emit(&cost::list(db, units).await?),
            CostCommand::Update {
                id,
                name,
                amount,
                frequency,
            } => out.emit(&cost::update(db, id, name, amount, frequency).await?),
            CostCommand::Remove { id } => out.emit(&cost::remove(db, id).await?),
        },

        Command::Price(args) => out.emit(&price::price(db, args.id, args.quantity).await?),

        Command::Portfolio(args) => {
            out.emit(&portfolio::portfolio(db, &args.ids, args.all).await?)
        }

        Command::Category { action } => match action {
            CategoryCommand::Add { name, description } => {
                out.emit(&lookup::add_category(db, &name, description.as_deref()).await?)
            }
            CategoryCommand::List => out.emit(&lookup::list_categories(db).await?),
            CategoryCommand::Remove { id } => out.emit(&lookup::remove_category(db, id).await?),
        },

        Command::Company { action } => match action {
            CompanyCommand::Add {
                name,
                website,
                contact,
            } => out.emit(
                &lookup::add_company(db, &name, website.as_deref(), contact.as_deref()).await?,
            ),
            CompanyCommand::List => out.emit(&lookup::list_companies(db).await?),
            CompanyCommand::Remove { id } => out.emit(&lookup::remove_company(db, id).await?),
        },
    }
}

// =============================================================================
// Shared Test Helpers
// =============================================================================
