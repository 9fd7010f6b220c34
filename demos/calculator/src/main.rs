//! Wires a small calculator app and runs it twice:
//! once through the default store and once with overrides.

use std::sync::{Arc, Mutex};
use tracing::info;
use tracing_subscriber::{EnvFilter, prelude::*};
use wiring::{Dependency, Error, Store, declare, resolve};

type BinaryOp = Box<dyn Fn(i32, i32) -> i32 + Send + Sync>;

type Logger = Box<dyn Log>;

trait Log: Send + Sync {
    fn log(&self, value: i32);
}

/// Writes to the process standard output
#[derive(Debug, Default)]
struct Stdout;

impl Stdout {
    fn log(&self, value: i32) {
        println!("{value}");
    }
}

struct ConsoleLogger {
    console: Arc<Stdout>
}

impl Log for ConsoleLogger {
    fn log(&self, value: i32) {
        self.console.log(value);
    }
}

/// Keeps logged values in memory instead of printing them
#[derive(Clone, Default)]
struct MemoryLogger(Arc<Mutex<Vec<i32>>>);

impl Log for MemoryLogger {
    fn log(&self, value: i32) {
        if let Ok(mut values) = self.0.lock() {
            values.push(value);
        }
    }
}

struct Calculator {
    add: Arc<BinaryOp>,
    sub: Arc<BinaryOp>,
}

struct App {
    calculator: Arc<Calculator>,
    logger: Arc<Logger>,
}

impl App {
    fn run(&self) {
        let calc = &self.calculator;
        self.logger.log((calc.sub)((calc.add)(1, 2), 7));
    }
}

fn main() -> Result<(), Error> {
    // Configuring tracing output to the stdout
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let add = declare!(=> Box::new(|a: i32, b: i32| a + b) as BinaryOp);
    let sub = declare!(=> Box::new(|a: i32, b: i32| a - b) as BinaryOp);
    let calculator = declare!(
        add: BinaryOp = &add,
        sub: BinaryOp = &sub
        => Calculator { add, sub }
    );
    let logger = declare!(
        console: Stdout = Dependency::value(Stdout)
        => Box::new(ConsoleLogger { console }) as Logger
    );
    let app = declare!(
        calculator: Calculator = &calculator,
        logger: Logger = &logger
        => App { calculator, logger }
    );

    // prints -4
    info!("running with the default store");
    resolve(&app)?.run();

    let memory = MemoryLogger::default();
    let store = Store::new()
        .with(&add, Box::new(|_: i32, _: i32| 10) as BinaryOp)
        .with(&logger, Box::new(memory.clone()) as Logger);

    // logs 3 into memory, since add(1, 2) is overridden to return 10
    info!("running with overrides");
    store.resolve(&app)?.run();

    if let Ok(values) = memory.0.lock() {
        info!(values = ?*values, "overridden logger received");
    }

    Ok(())
}
