//! Common test fixtures: the calculator graph
//!
//! `app -> { calculator -> { add, sub }, logger -> { console } }`

#![allow(missing_docs)]
#![allow(unreachable_pub)]
#![allow(dead_code)]
#![allow(missing_debug_implementations)]

use std::sync::{Arc, Mutex};
use wiring::{Declaration, Dependency, declare};

pub type BinaryOp = Box<dyn Fn(i32, i32) -> i32 + Send + Sync>;

pub type Logger = Box<dyn Log>;

pub trait Log: Send + Sync {
    fn log(&self, value: i32);
}

/// Stands in for the process console and remembers what was printed
#[derive(Default)]
pub struct Console {
    lines: Mutex<Vec<i32>>
}

impl Console {
    pub fn log(&self, value: i32) {
        self.lines.lock().unwrap().push(value);
    }

    pub fn calls(&self) -> Vec<i32> {
        self.lines.lock().unwrap().clone()
    }
}

struct ConsoleLogger {
    console: Arc<Console>
}

impl Log for ConsoleLogger {
    fn log(&self, value: i32) {
        self.console.log(value);
    }
}

#[derive(Clone, Default)]
pub struct MockLogger {
    calls: Arc<Mutex<Vec<i32>>>
}

impl MockLogger {
    pub fn calls(&self) -> Vec<i32> {
        self.calls.lock().unwrap().clone()
    }
}

impl Log for MockLogger {
    fn log(&self, value: i32) {
        self.calls.lock().unwrap().push(value);
    }
}

pub struct Calculator {
    pub add: Arc<BinaryOp>,
    pub sub: Arc<BinaryOp>,
}

pub struct App {
    calculator: Arc<Calculator>,
    logger: Arc<Logger>,
}

impl App {
    pub fn run(&self) {
        let calc = &self.calculator;
        self.logger.log((calc.sub)((calc.add)(1, 2), 7));
    }
}

pub struct Graph {
    pub console: Arc<Console>,
    pub add: Declaration<BinaryOp>,
    pub sub: Declaration<BinaryOp>,
    pub calculator: Declaration<Calculator>,
    pub logger: Declaration<Logger>,
    pub app: Declaration<App>,
}

pub fn setup() -> Graph {
    let console = Arc::new(Console::default());

    let add = declare!(=> Box::new(|a: i32, b: i32| a + b) as BinaryOp);
    let sub = declare!(=> Box::new(|a: i32, b: i32| a - b) as BinaryOp);
    let calculator = declare!(
        add: BinaryOp = &add,
        sub: BinaryOp = &sub
        => Calculator { add, sub }
    );
    let logger = declare!(
        console: Console = Dependency::shared(console.clone())
        => Box::new(ConsoleLogger { console }) as Logger
    );
    let app = declare!(
        calculator: Calculator = &calculator,
        logger: Logger = &logger
        => App { calculator, logger }
    );

    Graph { console, add, sub, calculator, logger, app }
}
