//! Integration tests for wiring trait objects.
//!
//! Factories may produce `Arc<dyn Trait>` so dependents are written against a
//! contract rather than a concrete type. The registry wraps every instance in its
//! own `Arc`, so a trait object is resolved as `Arc<Arc<dyn Trait>>` and injected
//! positionally the same way.

use singleton_injector::{named, positional, Dependencies, Registry, Symbol};
use std::sync::Arc;

trait Logger: Send + Sync {
    fn get_name(&self) -> &str;
}

trait Calculator: Send + Sync {
    fn calculate(&self, a: i32, b: i32) -> i32;
}

trait Formatter: Send + Sync {
    fn format(&self, value: &str) -> String;
}

struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn get_name(&self) -> &str {
        "ConsoleLogger"
    }
}

struct AddCalculator;

impl Calculator for AddCalculator {
    fn calculate(&self, a: i32, b: i32) -> i32 {
        a + b
    }
}

struct UppercaseFormatter;

impl Formatter for UppercaseFormatter {
    fn format(&self, value: &str) -> String {
        value.to_uppercase()
    }
}

struct Report {
    calculator: Arc<dyn Calculator>,
    formatter: Arc<dyn Formatter>,
}

impl Report {
    fn render(&self) -> String {
        self.formatter
            .format(&format!("total: {}", self.calculator.calculate(40, 2)))
    }
}

#[test]
fn test_register_multiple_trait_objects() {
    let registry = Registry::new();

    registry
        .register("logger", || Arc::new(ConsoleLogger) as Arc<dyn Logger>)
        .unwrap();
    registry
        .register("calculator", || Arc::new(AddCalculator) as Arc<dyn Calculator>)
        .unwrap();

    let logger: Arc<Arc<dyn Logger>> = registry.resolve("logger").unwrap();
    assert_eq!(logger.get_name(), "ConsoleLogger");

    // Cloning the stored Arc<dyn Calculator> only bumps its reference count.
    let calc: Arc<dyn Calculator> = registry.resolve_cloned("calculator").unwrap();
    assert_eq!(calc.calculate(40, 2), 42);
}

#[test]
fn test_positional_injection_of_trait_objects() {
    let registry = Registry::new();
    let calculator = Symbol::described("calculator");
    let formatter = Symbol::described("formatter");

    registry
        .register(&calculator, || Arc::new(AddCalculator) as Arc<dyn Calculator>)
        .unwrap();
    registry
        .register(
            &formatter,
            || Arc::new(UppercaseFormatter) as Arc<dyn Formatter>,
        )
        .unwrap();
    registry
        .register_with(
            "report",
            |calculator: Arc<Arc<dyn Calculator>>, formatter: Arc<Arc<dyn Formatter>>| Report {
                calculator: (*calculator).clone(),
                formatter: (*formatter).clone(),
            },
            positional![&calculator, &formatter],
        )
        .unwrap();

    let report: Arc<Report> = registry.resolve("report").unwrap();
    assert_eq!(report.render(), "TOTAL: 42");
}

#[test]
fn test_named_injection_of_trait_objects() {
    let registry = Registry::new();

    registry
        .register("calculator", || Arc::new(AddCalculator) as Arc<dyn Calculator>)
        .unwrap();
    registry
        .register(
            "formatter",
            || Arc::new(UppercaseFormatter) as Arc<dyn Formatter>,
        )
        .unwrap();
    registry
        .register_with(
            "report",
            |deps: &Dependencies| Report {
                calculator: (*deps.get::<Arc<dyn Calculator>>("calc").unwrap()).clone(),
                formatter: (*deps.get::<Arc<dyn Formatter>>("fmt").unwrap()).clone(),
            },
            named! { calc => "calculator", fmt => "formatter" },
        )
        .unwrap();

    let report: Arc<Report> = registry.resolve("report").unwrap();
    assert_eq!(report.render(), "TOTAL: 42");

    // The report holds the very calculator the registry cached.
    let calc: Arc<dyn Calculator> = registry.resolve_cloned("calculator").unwrap();
    assert!(Arc::ptr_eq(&calc, &report.calculator));
}

#[test]
fn test_concrete_and_trait_tokens_are_distinct() {
    #[derive(Clone)]
    struct MultiLogger {
        prefix: String,
    }

    impl Logger for MultiLogger {
        fn get_name(&self) -> &str {
            &self.prefix
        }
    }

    let registry = Registry::new();
    registry
        .register(
            "concrete",
            || MultiLogger {
                prefix: "[CONCRETE]".to_string(),
            },
        )
        .unwrap();
    registry
        .register(
            "contract",
            || {
                Arc::new(MultiLogger {
                    prefix: "[TRAIT]".to_string(),
                }) as Arc<dyn Logger>
            },
        )
        .unwrap();

    let concrete = registry.resolve::<MultiLogger>("concrete").unwrap();
    assert_eq!(concrete.prefix, "[CONCRETE]");

    let contract = registry.resolve::<Arc<dyn Logger>>("contract").unwrap();
    assert_eq!(contract.get_name(), "[TRAIT]");

    // The instance type is fixed by the factory, not by the token.
    assert!(registry.resolve::<Arc<dyn Logger>>("concrete").is_err());
}
