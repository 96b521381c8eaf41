//! # Seed Data Generator
//!
//! Populates the database with demo products and a sample sales group
//! for development.
//!
//! ## Usage
//! ```bash
//! # Seed with defaults
//! cargo run -p lagoon-db --bin seed
//!
//! # Specify database path
//! cargo run -p lagoon-db --bin seed -- --db ./data/lagoon.db
//! ```
//!
//! ## Generated Data
//! - A product catalog across the shop's categories (dive gear, batik,
//!   wood carvings, gems, spices), each with a unique item code, a price,
//!   and a stock level
//! - One demo group (`G-DEMO-001`) with two sales documents so the
//!   cross-document redistribution paths have something to chew on

use chrono::Utc;
use std::env;
use uuid::Uuid;

use lagoon_core::{
    BoatmanShare, CompanySplit, DiscountSplit, GuideSplit, Order, OrderLine, Product,
    SalesDocument,
};
use lagoon_db::{Database, DbConfig};

/// Catalog categories with item names for realistic demo data.
const CATEGORIES: &[(&str, &str, &[&str])] = &[
    (
        "DIVE",
        "DeepSee",
        &[
            "Snorkel Mask",
            "Swim Fins",
            "Dive Torch",
            "Rash Guard",
            "Dry Bag",
        ],
    ),
    (
        "BATIK",
        "Lanka Batik",
        &["Batik Sarong", "Batik Shirt", "Wall Hanging", "Table Runner"],
    ),
    (
        "WOOD",
        "Island Craft",
        &["Elephant Carving", "Mask Carving", "Jewelry Box", "Salad Bowl"],
    ),
    (
        "GEM",
        "Ceylon Gems",
        &["Sapphire Pendant", "Moonstone Ring", "Garnet Earrings"],
    ),
    (
        "SPICE",
        "Spice Garden",
        &["Cinnamon Pack", "Curry Blend", "Vanilla Pods", "Pepper Mill"],
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./lagoon_dev.db");

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
                println!("Lagoon POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./lagoon_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Lagoon POS Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("* Connected to database");
    println!("* Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("! Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Products
    println!();
    println!("Seeding products...");

    let mut products = Vec::new();
    let mut seed = 0usize;
    for (category_code, brand_name, names) in CATEGORIES {
        for name in *names {
            let product = generate_product(category_code, brand_name, name, seed);
            db.products().insert(&product).await?;
            products.push(product);
            seed += 1;
        }
    }
    println!("* Seeded {} products", products.len());

    // A demo group spanning two documents
    println!();
    println!("Seeding demo group G-DEMO-001...");

    let first = demo_document(
        "G-DEMO-001",
        demo_order("ORD-001", 250_000, 4_000, &products[0], 2),
    );
    let second = demo_document(
        "G-DEMO-001",
        demo_order("ORD-002", 375_000, 6_000, &products[1], 1),
    );

    for doc in [&first, &second] {
        let mut tx = db.begin().await?;
        db.sales().insert_document(&mut tx, doc).await?;
        tx.commit().await?;
    }

    let group = db.sales().find_by_group_code("G-DEMO-001").await?;
    println!(
        "* Group G-DEMO-001: {} documents, {} orders",
        group.len(),
        group.iter().map(|d| d.orders.len()).sum::<usize>()
    );

    println!();
    println!("Seed complete");

    Ok(())
}

/// Generates a single product with deterministic demo data.
fn generate_product(category: &str, brand: &str, name: &str, seed: usize) -> Product {
    let now = Utc::now();

    let code_stem: String = name
        .split_whitespace()
        .map(|w| &w[..1])
        .collect::<String>()
        .to_uppercase();

    // Price between Rs 9.99 and Rs 89.99, stock between 3 and 42
    let price_cents = 999 + ((seed * 37) % 8000) as i64;
    let stock = 3 + ((seed * 13) % 40) as i64;

    Product {
        id: Uuid::new_v4().to_string(),
        item_code: format!("{}-{}-{:03}", category, code_stem, seed),
        item_name: name.to_string(),
        brand_name: brand.to_string(),
        category_code: category.to_string(),
        price_cents,
        stock,
        is_active: true,
        updated_by: "seed".to_string(),
        created_at: now,
        updated_at: now,
    }
}

fn demo_document(group_code: &str, order: Order) -> SalesDocument {
    let now = Utc::now();
    SalesDocument {
        id: Uuid::new_v4().to_string(),
        group_code: group_code.to_string(),
        orders: vec![order],
        created_at: now,
        updated_at: now,
    }
}

fn demo_order(order_code: &str, price_cents: i64, less_cents: i64, product: &Product, qty: i64) -> Order {
    Order {
        id: Uuid::new_v4().to_string(),
        order_code: order_code.to_string(),
        guide: GuideSplit {
            name: "Nimal".to_string(),
            rate_bps: 1500,
            amount_cents: 0,
        },
        company: CompanySplit {
            rate_bps: 1000,
            amount_cents: 0,
        },
        discount: DiscountSplit {
            rate_bps: 0,
            amount_cents: 0,
        },
        boatmen: vec![
            BoatmanShare {
                name: "Sunil".to_string(),
                rate_bps: 800,
                cost_amount_cents: 0,
            },
            BoatmanShare {
                name: "Kamal".to_string(),
                rate_bps: 800,
                cost_amount_cents: 0,
            },
        ],
        lines: vec![OrderLine {
            product_id: product.id.clone(),
            product_name: product.item_name.clone(),
            quantity: qty,
        }],
        price_cents,
        item_wise_total_cents: price_cents,
        category_code: product.category_code.clone(),
        exotic: false,
        less_cents,
        gift_cents: 0,
        demonstrator_name: "Ruwan".to_string(),
        created_at: Utc::now(),
    }
}
