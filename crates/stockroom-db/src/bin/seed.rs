//! # Seed Data Generator
//!
//! Populates the database with demo stores and products for development.
//!
//! ## Usage
//! ```bash
//! # 200 products across 3 stores (default)
//! cargo run -p stockroom-db --bin seed
//!
//! # Custom amounts, dump the result as JSON
//! cargo run -p stockroom-db --bin seed -- --count 1000 --stores 5 --json
//!
//! # Specify database path (otherwise STOCKROOM_DB_PATH or ./stockroom.db)
//! cargo run -p stockroom-db --bin seed -- --db ./data/stockroom.db
//! ```
//!
//! Every third product is left without a store; the rest are spread over
//! the stores round-robin.

use std::env;
use std::time::Instant;

use stockroom_core::validation::validate_new_product;
use stockroom_core::{CoreError, Money, NewProduct};
use stockroom_db::{Database, DbConfig, ProductRepository};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Product families for demo data: (article prefix, names).
const FAMILIES: &[(&str, &[&str])] = &[
    ("HW", &["Hammer", "Screwdriver", "Wrench", "Pliers", "Tape Measure"]),
    ("EL", &["Extension Cord", "Light Bulb", "Battery Pack", "Power Strip"]),
    ("GD", &["Garden Hose", "Trowel", "Seed Mix", "Watering Can", "Rake"]),
    ("KT", &["Kettle", "Toaster", "Cutting Board", "Chef Knife"]),
];

/// Store names for demo data.
const STORE_NAMES: &[&str] = &["Downtown", "Harbor", "Airport", "Uptown", "Mall", "Outlet"];

struct Args {
    count: usize,
    stores: usize,
    db_path: Option<String>,
    json: bool,
}

fn parse_args() -> Option<Args> {
    let args: Vec<String> = env::args().collect();
    let mut parsed = Args {
        count: 200,
        stores: 3,
        db_path: None,
        json: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    parsed.count = args[i + 1].parse().unwrap_or(parsed.count);
                    i += 1;
                }
            }
            "--stores" | "-s" => {
                if i + 1 < args.len() {
                    parsed.stores = args[i + 1].parse().unwrap_or(parsed.stores);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    parsed.db_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--json" => parsed.json = true,
            "--help" | "-h" => {
                println!("Stockroom Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: 200)");
                println!("  -s, --stores <N>   Number of stores to create (default: 3, max: {})", STORE_NAMES.len());
                println!("  -d, --db <PATH>    Database file path (default: $STOCKROOM_DB_PATH or ./stockroom.db)");
                println!("      --json         Print every product as JSON when done");
                println!("  -h, --help         Show this help message");
                return None;
            }
            other => warn!(arg = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    parsed.stores = parsed.stores.min(STORE_NAMES.len());
    Some(parsed)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let Some(args) = parse_args() else {
        return Ok(());
    };

    let mut config = DbConfig::from_env()?;
    if let Some(path) = &args.db_path {
        config.database_path = path.into();
    }

    info!(
        path = %config.database_path.display(),
        products = args.count,
        stores = args.stores,
        "Seeding database"
    );

    let db = Database::new(config).await?;
    let repo = db.products();

    let existing = repo.count().await?;
    if existing > 0 {
        warn!(existing, "Database already has products, skipping seed");
        return Ok(());
    }

    let start = Instant::now();

    let mut store_ids = Vec::with_capacity(args.stores);
    for name in STORE_NAMES.iter().take(args.stores) {
        store_ids.push(insert_store(&db, name).await?);
    }

    let mut generated = 0;
    for seed in 0..args.count {
        let product = generate_product(seed);

        if let Err(e) = insert_product(&repo, &product).await {
            warn!(article = %product.article, error = %e, "Skipping product");
            continue;
        }
        generated += 1;

        if seed % 3 != 2 && !store_ids.is_empty() {
            let store_id = store_ids[seed % store_ids.len()];
            if let Some(saved) = repo.find_by_article(&product.article).await? {
                repo.assign_store_for_product(saved.id, store_id).await?;
            }
        }

        if generated % 100 == 0 {
            info!(generated, "Progress");
        }
    }

    let unassigned = repo.get_all_products_not_in_store().await?.len();
    info!(
        generated,
        unassigned,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Products generated"
    );

    for &store_id in &store_ids {
        let products = repo.get_all_products_in_store(store_id).await?;
        let value = products
            .iter()
            .map(|p| p.stock_value())
            .collect::<Option<Vec<Money>>>()
            .and_then(Money::checked_sum);
        match value {
            Some(value) => {
                info!(store_id, products = products.len(), stock_value = %value, "Store summary")
            }
            None => warn!(store_id, products = products.len(), "Store stock value overflows"),
        }
    }

    if args.json {
        let all = repo.get_all().await?;
        println!("{}", serde_json::to_string_pretty(&all)?);
    }

    db.close().await;
    Ok(())
}

/// Stores are not managed by the repository, so they go in through the pool.
async fn insert_store(db: &Database, name: &str) -> Result<i64, sqlx::Error> {
    let result = sqlx::query("INSERT INTO store (name, address) VALUES (?1, ?2)")
        .bind(name)
        .bind(format!("{} Street 1", name))
        .execute(db.pool())
        .await?;

    Ok(result.last_insert_rowid())
}

/// Validates and saves one product, refusing an article that is already taken.
async fn insert_product(
    repo: &ProductRepository,
    product: &NewProduct,
) -> Result<(), Box<dyn std::error::Error>> {
    validate_new_product(product).map_err(CoreError::from)?;

    if repo.find_by_article(&product.article).await?.is_some() {
        return Err(CoreError::ArticleInUse(product.article.clone()).into());
    }

    repo.save(product).await?;
    Ok(())
}

/// Generates a deterministic demo product.
fn generate_product(seed: usize) -> NewProduct {
    let (prefix, names) = FAMILIES[seed % FAMILIES.len()];
    let name = names[(seed / FAMILIES.len()) % names.len()];

    // $0.99 - $49.98
    let price = Money::from_cents(99 + ((seed * 37) % 4900) as i64);

    NewProduct {
        name: format!("{} #{}", name, seed),
        article: format!("{}-{:05}", prefix, seed),
        price,
        quantity: (seed % 51) as i64,
        description: if seed % 4 == 0 {
            None
        } else {
            Some(format!("{} from the {} range", name, prefix))
        },
    }
}
