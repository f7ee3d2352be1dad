//! Command line definition (clap derive).
//!
//! ```text
//! costwise [--json] [--db PATH] [--config PATH] [-v] <COMMAND>
//!
//!   item       add | list | show | update | delete | convert
//!   bom        attach | add | list | remove
//!   cost       add | list | update | remove
//!   price      <ID> [--quantity N]
//!   portfolio  <ID>... | --all
//!   category   add | list | remove
//!   company    add | list | remove
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use costwise_core::{CostFrequency, ItemKind};

#[derive(Debug, Parser)]
#[command(name = "costwise", version, about = "Item costing, BOM snapshots and operating cost allocation")]
pub struct Cli {
    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Database file (overrides config and COSTWISE_DB_PATH)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Config file (default: platform config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage products and components
    Item {
        #[command(subcommand)]
        action: ItemCommand,
    },
    /// Manage bill-of-materials lines
    Bom {
        #[command(subcommand)]
        action: BomCommand,
    },
    /// Manage shared operating costs
    Cost {
        #[command(subcommand)]
        action: CostCommand,
    },
    /// Price one item carrying the whole monthly operating cost pool
    Price(PriceArgs),
    /// Distribute operating costs over several products by expected units
    Portfolio(PortfolioArgs),
    /// Manage categories
    Category {
        #[command(subcommand)]
        action: CategoryCommand,
    },
    /// Manage companies (sources / vendors)
    Company {
        #[command(subcommand)]
        action: CompanyCommand,
    },
}

// =============================================================================
// Items
// =============================================================================

#[derive(Debug, Subcommand)]
pub enum ItemCommand {
    /// Create a product or component
    Add(ItemAddArgs),
    /// List items, products first
    List {
        #[arg(long)]
        kind: Option<ItemKind>,
    },
    /// Show an item and its BOM lines
    Show { id: i64 },
    /// Change fields of an item
    Update(ItemUpdateArgs),
    /// Delete an item and its BOM lines
    Delete { id: i64 },
    /// Turn a product into a component or back
    Convert {
        id: i64,
        #[arg(long)]
        to: ItemKind,
    },
}

#[derive(Debug, Clone, Args)]
pub struct ItemAddArgs {
    pub name: String,

    #[arg(long, default_value_t = ItemKind::Product)]
    pub kind: ItemKind,

    /// Cost per unit, or per package for bulk components
    #[arg(long, default_value_t = 0.0)]
    pub base_cost: f64,

    /// Markup percent (default: 30 for products, 0 for components)
    #[arg(long, allow_negative_numbers = true)]
    pub markup: Option<f64>,

    /// Tax rate percent (default: 8.5 for products, 0 for components)
    #[arg(long, allow_negative_numbers = true)]
    pub tax: Option<f64>,

    #[arg(long, default_value_t = 1.0)]
    pub units_per_package: f64,

    #[arg(long, default_value_t = costwise_core::DEFAULT_EXPECTED_MONTHLY_UNITS)]
    pub expected_units: f64,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub company: Option<String>,

    /// Purchase link
    #[arg(long)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ItemUpdateArgs {
    pub id: i64,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub base_cost: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub markup: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub tax: Option<f64>,

    #[arg(long)]
    pub units_per_package: Option<f64>,

    #[arg(long)]
    pub expected_units: Option<f64>,

    /// Empty string clears the value
    #[arg(long)]
    pub category: Option<String>,

    /// Empty string clears the value
    #[arg(long)]
    pub company: Option<String>,

    /// Empty string clears the value
    #[arg(long)]
    pub link: Option<String>,
}

// =============================================================================
// BOM
// =============================================================================

#[derive(Debug, Subcommand)]
pub enum BomCommand {
    /// Snapshot a component's current cost into a new line
    Attach {
        #[arg(long)]
        parent: i64,
        #[arg(long)]
        component: i64,
        #[arg(long)]
        quantity: f64,
    },
    /// Add a manual cost line (packaging, labour, ...)
    Add {
        #[arg(long)]
        parent: i64,
        name: String,
        #[arg(long, allow_negative_numbers = true)]
        cost: f64,
        #[arg(long)]
        description: Option<String>,
    },
    /// List the lines of an item
    List { parent: i64 },
    /// Remove a line
    Remove { line_id: i64 },
}

// =============================================================================
// Operating costs
// =============================================================================

#[derive(Debug, Subcommand)]
pub enum CostCommand {
    /// Add an operating cost
    Add {
        name: String,
        #[arg(long)]
        amount: f64,
        /// monthly or one-time
        #[arg(long, default_value_t = CostFrequency::Monthly)]
        frequency: CostFrequency,
    },
    /// List operating costs and the monthly total
    List {
        /// Also show the per-unit charge at this monthly volume
        #[arg(long)]
        units: Option<f64>,
    },
    /// Change an operating cost
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        amount: Option<f64>,
        #[arg(long)]
        frequency: Option<CostFrequency>,
    },
    /// Remove an operating cost
    Remove { id: i64 },
}

// =============================================================================
// Pricing
// =============================================================================

#[derive(Debug, Clone, Args)]
pub struct PriceArgs {
    pub id: i64,

    #[arg(short, long, default_value_t = 1)]
    pub quantity: i64,
}

#[derive(Debug, Clone, Args)]
pub struct PortfolioArgs {
    /// Product ids to allocate over
    #[arg(required_unless_present = "all", conflicts_with = "all")]
    pub ids: Vec<i64>,

    /// Use every product
    #[arg(long)]
    pub all: bool,
}

// =============================================================================
// Lookups
// =============================================================================

#[derive(Debug, Subcommand)]
pub enum CategoryCommand {
    Add {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    List,
    Remove { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum CompanyCommand {
    Add {
        name: String,
        #[arg(long)]
        website: Option<String>,
        #[arg(long)]
        contact: Option<String>,
    },
    List,
    Remove { id: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_bom_attach() {
        let cli = Cli::try_parse_from([
            "costwise", "--json", "bom", "attach", "--parent", "7", "--component", "3",
            "--quantity", "2.5",
        ])
        .unwrap();

        assert!(cli.json);
        match cli.command {
            Command::Bom {
                action: BomCommand::Attach { parent, component, quantity },
            } => {
                assert_eq!((parent, component), (7, 3));
                assert_eq!(quantity, 2.5);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_item_add_with_negative_markup() {
        let cli = Cli::try_parse_from([
            "costwise", "item", "add", "Clearance lamp", "--base-cost", "20", "--markup", "-10",
        ])
        .unwrap();

        match cli.command {
            Command::Item { action: ItemCommand::Add(args) } => {
                assert_eq!(args.kind, ItemKind::Product);
                assert_eq!(args.markup, Some(-10.0));
                assert_eq!(args.tax, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_portfolio_needs_ids_or_all() {
        assert!(Cli::try_parse_from(["costwise", "portfolio"]).is_err());
        assert!(Cli::try_parse_from(["costwise", "portfolio", "1", "--all"]).is_err());
        assert!(Cli::try_parse_from(["costwise", "portfolio", "--all"]).is_ok());
        assert!(Cli::try_parse_from(["costwise", "portfolio", "1", "2"]).is_ok());
    }

    #[test]
    fn test_cost_frequency_flag() {
        let cli = Cli::try_parse_from([
            "costwise", "cost", "add", "Laser cutter", "--amount", "4500", "--frequency", "one-time",
        ])
        .unwrap();

        match cli.command {
            Command::Cost { action: CostCommand::Add { frequency, .. } } => {
                assert_eq!(frequency, CostFrequency::OneTime);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
