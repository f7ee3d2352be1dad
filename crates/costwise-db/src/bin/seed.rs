//! # Seed Data Generator
//!
//! Fills a database with a small woodshop catalogue for development.
//!
//! ## Usage
//! ```bash
//! cargo run -p costwise-db --bin seed
//! cargo run -p costwise-db --bin seed -- --db ./data/costwise.db
//! ```
//!
//! ## Generated Data
//! - Components bought in bulk (planks, screws, finish)
//! - Products whose BOM lines are resolved from those components
//! - Monthly and one-time operating costs
//! - Matching categories and companies

use std::env;

use costwise_core::bom::{resolve_component_line, ComponentSnapshot};
use costwise_core::{Item, Money, OperatingCostEntry, Percent};
use costwise_db::{Database, DbConfig};

/// (name, package price, units per package, company)
const COMPONENTS: &[(&str, f64, f64, &str)] = &[
    ("Oak plank", 48.0, 4.0, "Northwood Timber"),
    ("Wood screws", 6.0, 100.0, "Fastline Hardware"),
    ("Linseed finish", 12.0, 20.0, "Northwood Timber"),
    ("Felt pads", 3.5, 24.0, "Fastline Hardware"),
];

/// (name, base cost, expected monthly units, category, BOM as (component, quantity))
const PRODUCTS: &[(&str, f64, f64, &str, &[(&str, f64)])] = &[
    (
        "Cutting board",
        4.0,
        120.0,
        "Kitchen",
        &[("Oak plank", 0.5), ("Linseed finish", 1.0), ("Felt pads", 4.0)],
    ),
    (
        "Wall shelf",
        9.0,
        35.0,
        "Furniture",
        &[("Oak plank", 2.0), ("Wood screws", 12.0), ("Linseed finish", 3.0)],
    ),
    (
        "Step stool",
        14.0,
        20.0,
        "Furniture",
        &[("Oak plank", 3.0), ("Wood screws", 16.0), ("Felt pads", 4.0)],
    ),
];

const OPERATING_COSTS: &[(&str, f64, bool)] = &[
    ("Workshop rent", 850.0, true),
    ("Electricity", 120.0, true),
    ("Accounting software", 29.0, true),
    ("Dust extraction system", 1800.0, false),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let mut db_path = "./costwise_dev.db".to_string();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Costwise Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./costwise_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Costwise Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected and migrated");

    let existing = db.items().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} items", existing);
        println!("  Skipping seed to avoid duplicates.");
        return Ok(());
    }

    for category in ["Kitchen", "Furniture"] {
        db.categories().insert(category, None).await?;
    }
    for company in ["Northwood Timber", "Fastline Hardware"] {
        db.companies().insert(company, None, None).await?;
    }

    let mut components = Vec::new();
    for (name, price, units, company) in COMPONENTS {
        let mut item = Item::new_component(*name, Money::new(*price)).with_units_per_package(*units);
        item.metadata.company = Some(company.to_string());
        components.push(db.items().insert(&item).await?);
    }
    println!("✓ {} components", components.len());

    for (name, base, units, category, bom) in PRODUCTS {
        let mut item = Item::new_product(*name, Money::new(*base))
            .with_expected_monthly_units(*units)
            .with_rates(Percent::new(35.0), Percent::new(8.5));
        item.metadata.category = Some(category.to_string());
        let product = db.items().insert(&item).await?;

        for (component_name, quantity) in bom.iter() {
            let Some(source) = components.iter().find(|c| c.name == *component_name) else {
                eprintln!("Unknown component {}, skipping", component_name);
                continue;
            };
            let source_lines = db.bom().list_for_parent(source.id).await?;
            let snapshot = ComponentSnapshot::new(source.clone(), &source_lines);
            let line = resolve_component_line(product.id, &snapshot, *quantity)?;
            db.bom().insert(&line).await?;
        }

        let subtotal = db.bom().total_for_parent(product.id).await?;
        println!("✓ {} (BOM {})", product.name, subtotal);
    }

    for (name, amount, monthly) in OPERATING_COSTS {
        let entry = if *monthly {
            OperatingCostEntry::monthly(*name, Money::new(*amount))
        } else {
            OperatingCostEntry::one_time(*name, Money::new(*amount))
        };
        db.operating_costs().insert(&entry).await?;
    }
    println!(
        "✓ Operating costs: {} per month",
        db.operating_costs().monthly_total().await?
    );

    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}
