//! Wiring styles example for singleton-injector.
//!
//! Demonstrates:
//! - Positional wiring: dependencies passed as separate `Arc<T>` arguments
//! - Named wiring: dependencies passed as one `Dependencies` map, read with `try_get`
//! - Registering dependents before their dependencies
//! - Resolving many tokens at once with `resolve_array()` / `resolve_dictionary()`
//!
//! Run with: `RUST_LOG=singleton_injector=debug cargo run --example wiring_styles`

use singleton_injector::{named, positional, Factory, Registry, RegistryError};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

struct Settings {
    database_url: String,
    pool_size: usize,
}

struct Database {
    url: String,
    pool_size: usize,
}

struct Cache {
    capacity: usize,
}

struct UserService {
    db: Arc<Database>,
    cache: Arc<Cache>,
}

impl UserService {
    fn describe(&self) -> String {
        format!(
            "users on {} (pool {}), cache of {}",
            self.db.url, self.db.pool_size, self.cache.capacity
        )
    }
}

fn main() -> Result<(), RegistryError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== singleton-injector: Wiring Styles ===\n");

    let registry = Registry::new();

    // -------------------------------------------------------------------------
    // 1. Register the top of the graph first
    // -------------------------------------------------------------------------
    println!("1. Registering the user service by name, before its dependencies...");

    registry.register_with(
        "users",
        Factory::try_named(|deps| {
            Ok(UserService {
                db: deps.try_get("db")?,
                cache: deps.try_get("cache")?,
            })
        }),
        named! { db => "database", cache => "cache" },
    )?;

    // -------------------------------------------------------------------------
    // 2. Register dependencies with positional wiring
    // -------------------------------------------------------------------------
    println!("2. Registering database and cache positionally...");

    registry.register_with(
        "database",
        |settings: Arc<Settings>| Database {
            url: settings.database_url.clone(),
            pool_size: settings.pool_size,
        },
        positional!["settings"],
    )?;
    registry.register_with(
        "cache",
        |settings: Arc<Settings>| Cache {
            capacity: settings.pool_size * 64,
        },
        positional!["settings"],
    )?;
    registry.register(
        "settings",
        || Settings {
            database_url: "postgres://localhost/app".to_string(),
            pool_size: 8,
        },
    )?;

    // -------------------------------------------------------------------------
    // 3. Resolve the service; the whole graph is built on demand
    // -------------------------------------------------------------------------
    println!("\n3. Resolving the user service...");

    let users: Arc<UserService> = registry.resolve("users")?;
    println!("   {}", users.describe());

    let db: Arc<Database> = registry.resolve("database")?;
    println!("   service shares the cached database: {}", Arc::ptr_eq(&users.db, &db));

    // -------------------------------------------------------------------------
    // 4. Resolve several tokens at once
    // -------------------------------------------------------------------------
    println!("\n4. Resolving several tokens at once...");

    let instances = registry.resolve_array(["database", "cache"])?;
    println!("   resolve_array returned {} instances", instances.len());

    let deps = registry.resolve_dictionary([("primary", "database"), ("hot", "cache")])?;
    if let Some(cache) = deps.get::<Cache>("hot") {
        println!("   resolve_dictionary[\"hot\"] capacity = {}", cache.capacity);
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
