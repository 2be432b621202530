//! Trait contracts example for singleton-injector.
//!
//! Demonstrates wiring services against traits:
//! - `Clock` is injected positionally into a `Stamper`
//! - `Ledger` is injected by name into an `InvoiceService`, whose factory can fail
//! - Each registry picks the implementations behind the contract tokens
//!
//! Run with: `RUST_LOG=singleton_injector=debug cargo run --example trait_contracts`

use singleton_injector::{named, positional, Factory, Registry, RegistryError};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing_subscriber::EnvFilter;

trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

/// Append-only record of issued invoices.
trait Ledger: Send + Sync {
    fn record(&self, line: String);
    fn lines(&self) -> Vec<String>;
}

struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs())
    }
}

/// Frozen time, for reproducible runs.
struct FixedClock(u64);

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        self.0
    }
}

#[derive(Default)]
struct MemoryLedger {
    lines: Mutex<Vec<String>>,
}

impl Ledger for MemoryLedger {
    fn record(&self, line: String) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line);
        }
    }

    fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|lines| lines.clone()).unwrap_or_default()
    }
}

struct StdoutLedger;

impl Ledger for StdoutLedger {
    fn record(&self, line: String) {
        println!("   [ledger] {}", line);
    }

    fn lines(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Labels values with the current time. Receives its clock positionally.
struct Stamper {
    clock: Arc<dyn Clock>,
}

impl Stamper {
    fn stamp(&self, label: &str) -> String {
        format!("{}@{}", label, self.clock.now())
    }
}

/// Receives the stamper and the ledger by name.
struct InvoiceService {
    stamper: Arc<Stamper>,
    ledger: Arc<dyn Ledger>,
}

impl InvoiceService {
    fn issue(&self, customer: &str, cents: u64) {
        let id = self.stamper.stamp("invoice");
        self.ledger
            .record(format!("{} {} {}.{:02}", id, customer, cents / 100, cents % 100));
    }
}

fn configure(deterministic: bool) -> Result<Registry, RegistryError> {
    let registry = Registry::new();

    registry.register_with(
        "invoices",
        Factory::try_named(|deps| {
            Ok(InvoiceService {
                stamper: deps.try_get("stamper")?,
                ledger: Arc::clone(&*deps.try_get::<Arc<dyn Ledger>>("ledger")?),
            })
        }),
        named! { stamper => "stamper", ledger => "ledger" },
    )?;
    registry.register_with(
        "stamper",
        |clock: Arc<Arc<dyn Clock>>| Stamper {
            clock: (*clock).clone(),
        },
        positional!["clock"],
    )?;

    if deterministic {
        registry.register("clock", || Arc::new(FixedClock(1_700_000_000)) as Arc<dyn Clock>)?;
        registry.register("ledger", || Arc::new(MemoryLedger::default()) as Arc<dyn Ledger>)?;
    } else {
        registry.register("clock", || Arc::new(SystemClock) as Arc<dyn Clock>)?;
        registry.register("ledger", || Arc::new(StdoutLedger) as Arc<dyn Ledger>)?;
    }

    Ok(registry)
}

fn main() -> Result<(), RegistryError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== singleton-injector: Trait Contracts ===\n");

    // -------------------------------------------------------------------------
    // 1. Live wiring: system clock, ledger printing to stdout
    // -------------------------------------------------------------------------
    println!("1. Issuing invoices with the live registry...");

    let live = configure(false)?;
    let invoices: Arc<InvoiceService> = live.resolve("invoices")?;
    invoices.issue("acme", 12_50);
    invoices.issue("globex", 99_99);

    // -------------------------------------------------------------------------
    // 2. Deterministic wiring: same service, fixed clock, in-memory ledger
    // -------------------------------------------------------------------------
    println!("\n2. Issuing invoices with the deterministic registry...");

    let deterministic = configure(true)?;
    let invoices: Arc<InvoiceService> = deterministic.resolve("invoices")?;
    invoices.issue("acme", 12_50);
    invoices.issue("globex", 99_99);

    let ledger: Arc<dyn Ledger> = deterministic.resolve_cloned("ledger")?;
    for line in ledger.lines() {
        println!("   recorded: {}", line);
    }

    // -------------------------------------------------------------------------
    // 3. Contracts are singletons shared by every dependent
    // -------------------------------------------------------------------------
    println!("\n3. Checking shared instances...");

    let stamper: Arc<Stamper> = deterministic.resolve("stamper")?;
    println!(
        "   invoice service shares the stamper: {}",
        Arc::ptr_eq(&stamper, &invoices.stamper)
    );
    println!(
        "   invoice service shares the ledger:  {}",
        Arc::ptr_eq(&ledger, &invoices.ledger)
    );

    println!("\n=== Example Complete ===");
    Ok(())
}
