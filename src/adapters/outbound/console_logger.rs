use crate::domains::logger::DomainLogger;
use std::sync::Arc;

/// Prints to stdout, errors to stderr, each line tagged with a label.
struct ConsoleLogger {
    label: String,
}

impl DomainLogger for ConsoleLogger {
    fn info(&self, msg: &str) {
        println!("[{}] {}", self.label, msg);
    }

    fn warn(&self, msg: &str) {
        println!("[{}] WARN: {}", self.label, msg);
    }

    fn error(&self, msg: &str) {
        eprintln!("[{}] ERROR: {}", self.label, msg);
    }
}

pub fn init_console_logger(label: &str) -> Arc<dyn DomainLogger> {
    Arc::new(ConsoleLogger {
        label: label.to_string(),
    })
}
