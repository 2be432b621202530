//! Basic usage example for singleton-injector.
//!
//! Demonstrates:
//! - Registering factories under string and symbol tokens
//! - Lazy instantiation: factories run on first resolution, once
//! - Retrieving values with `resolve()` (returns `Arc<T>`)
//! - Retrieving cloned values with `resolve_cloned()` (returns `T`)
//! - Handling registry errors
//!
//! Run with: `RUST_LOG=singleton_injector=debug cargo run --example basic_usage`

use singleton_injector::{Registry, RegistryError, Symbol};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq)]
struct AppConfig {
    name: String,
    version: u32,
    debug_mode: bool,
}

fn main() -> Result<(), RegistryError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== singleton-injector: Basic Usage ===\n");

    let registry = Registry::new();

    // -------------------------------------------------------------------------
    // 1. Register factories
    // -------------------------------------------------------------------------
    println!("1. Registering factories...");

    registry.register("answer", || 42i32)?;
    registry.register("greeting", || "Hello, singleton-injector!".to_string())?;
    registry.register(
        "config",
        || {
            println!("   (config factory running)");
            AppConfig {
                name: "MyApp".to_string(),
                version: 1,
                debug_mode: true,
            }
        },
    )?;

    let secret = Symbol::described("secret");
    registry.register(&secret, || vec![0xde_u8, 0xad, 0xbe, 0xef])?;

    println!("   Registered {} tokens; no factory has run yet", registry.len());

    // -------------------------------------------------------------------------
    // 2. Check registration with contains()
    // -------------------------------------------------------------------------
    println!("\n2. Checking registration status with contains()...");

    println!("   contains(\"config\")  = {}", registry.contains("config")?);
    println!("   contains(&secret)   = {}", registry.contains(&secret)?);
    println!("   contains(\"secret\")  = {}", registry.contains("secret")?);

    // -------------------------------------------------------------------------
    // 3. Resolve values - factories run now, once
    // -------------------------------------------------------------------------
    println!("\n3. Resolving values with resolve() -> Arc<T>...");

    let first: Arc<AppConfig> = registry.resolve("config")?;
    let second: Arc<AppConfig> = registry.resolve("config")?;
    let answer: Arc<i32> = registry.resolve("answer")?;
    let bytes: Arc<Vec<u8>> = registry.resolve(&secret)?;

    println!("   AppConfig: {:?}", *first);
    println!("   same instance on second resolve: {}", Arc::ptr_eq(&first, &second));
    println!("   i32:       {}", *answer);
    println!("   Vec<u8>:   {:02x?}", *bytes);

    // -------------------------------------------------------------------------
    // 4. Resolve cloned values
    // -------------------------------------------------------------------------
    println!("\n4. Retrieving cloned values with resolve_cloned() -> T...");

    let message: String = registry.resolve_cloned("greeting")?;
    let cfg_owned: AppConfig = registry.resolve_cloned("config")?;

    println!("   String (owned):    {}", message);
    println!("   AppConfig (owned): {:?}", cfg_owned);

    // -------------------------------------------------------------------------
    // 5. Handle errors
    // -------------------------------------------------------------------------
    println!("\n5. Handling errors...");

    if let Err(e) = registry.register(42, || ()) {
        println!("   Error (expected): {}", e);
    }
    if let Err(e) = registry.register("answer", || 0i32) {
        println!("   Error (expected): {}", e);
    }
    if let Err(e) = registry.resolve::<i32>("missing") {
        println!("   Error (expected): {}", e);
    }
    if let Err(e) = registry.resolve::<u64>("answer") {
        println!("   Error (expected): {}", e);
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
