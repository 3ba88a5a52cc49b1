use crate::domains::logger::DomainLogger;
use std::sync::Arc;

/// Fans every message out to each wrapped logger in order.
pub struct MultiLogger {
    targets: Vec<Arc<dyn DomainLogger>>,
}

impl MultiLogger {
    pub fn new(targets: Vec<Arc<dyn DomainLogger>>) -> Self {
        Self { targets }
    }
}

impl DomainLogger for MultiLogger {
    fn info(&self, msg: &str) {
        self.targets.iter().for_each(|t| t.info(msg));
    }

    fn warn(&self, msg: &str) {
        self.targets.iter().for_each(|t| t.warn(msg));
    }

    fn error(&self, msg: &str) {
        self.targets.iter().for_each(|t| t.error(msg));
    }
}

/// Console logging, plus a file when `path` is given and the file logger starts.
pub fn init_session_logger(path: Option<&str>) -> Arc<dyn DomainLogger> {
    let console = crate::adapters::outbound::init_console_logger("rrt*");
    match path.map(crate::adapters::outbound::init_file_logger) {
        Some(Ok(file)) => Arc::new(MultiLogger::new(vec![file, console])) as Arc<dyn DomainLogger>,
        Some(Err(e)) => {
            console.warn(&format!("{}; logging to console only", e));
            console
        }
        None => console,
    }
}
