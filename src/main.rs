use std::sync::Arc;

use attrcast::persist::Persistor;
use attrcast::settings::Settings;
use attrcast::{CastRegistry, LogicalValue, Model, ModelSchema};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Money {
    cents: i64,
    currency: String,
}
attrcast::json_cast!(Money);

fn run(settings: &Settings) -> attrcast::Result<()> {
    let registry = Arc::new(CastRegistry::new().with::<Money>()?);
    let schema = ModelSchema::builder("orders")
        .cast("quantity", "integer")
        .cast("paid", "boolean")
        .cast("tags", "array")
        .cast("placed_at", "datetime")
        .cast("price", "Money")
        .date_format(&settings.date_format)
        .build();

    let mut order = Model::new(Arc::clone(&schema), Arc::clone(&registry));
    order
        .set_attribute("quantity", "3")?
        .set_attribute("paid", 1)?
        .set_attribute("tags", serde_json::json!(["gift", "express"]))?
        .set_attribute("placed_at", "2024-05-01 09:30:00")?
        .set_attribute(
            "price",
            LogicalValue::custom(Money {
                cents: 1250,
                currency: String::from("EUR"),
            }),
        )?;

    let connection = Connection::open(&settings.database)?;
    let mut persistor = Persistor::new(&connection)?;
    persistor.persist_model(1, &order)?;

    match persistor.restore_model(1, schema, registry)? {
        Some(restored) => {
            for field in ["quantity", "paid", "tags", "placed_at", "price"] {
                let raw = restored.raw(field).cloned().unwrap_or(attrcast::RawValue::Null);
                println!("{:<10} {:<40} {}", field, raw, restored.get_attribute(field)?);
            }
        }
        None => info!("nothing stored for order 1"),
    }
    Ok(())
}

fn main() {
    let settings = match Settings::load("attrcast") {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_level.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    info!(database = %settings.database, date_format = %settings.date_format, "starting");

    if let Err(e) = run(&settings) {
        error!(error = %e, "demo failed");
        std::process::exit(1);
    }
}
