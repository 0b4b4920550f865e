use std::sync::OnceLock;
use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

pub struct Logger {
    prefix: Option<String>,
}

impl Logger {
    fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    fn format_line(&self, timestamp: &str, file: &str, line: u32, message: &str) -> String {
        let file_name = file.rsplit(['/', '\\']).next().unwrap_or(file);
        match self.prefix {
            Some(ref prefix) => format!("[{}][{}][{}:{}] {}", timestamp, prefix, file_name, line, message),
            None => format!("[{}][{}:{}] {}", timestamp, file_name, line, message),
        }
    }

    pub fn log(&self, file: &str, line: u32, message: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        println!("{}", self.format_line(&timestamp, file, line, message));
    }
}

pub fn init_logger(prefix: Option<String>) {
    LOGGER.get_or_init(|| Logger::new(prefix));
}

/// Lines logged before `init_logger` are dropped; the engine runs silently in tests and benches.
pub fn log(file: &str, line: u32, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(file, line, message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(file!(), line!(), &format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_without_prefix() {
        let logger = Logger::new(None);
        let line = logger.format_line("2024-01-01 10:00:00", "src/arena.rs", 42, "Game over");
        assert_eq!(line, "[2024-01-01 10:00:00][arena.rs:42] Game over");
    }

    #[test]
    fn test_format_with_prefix() {
        let logger = Logger::new(Some("Runner".to_string()));
        let line = logger.format_line("2024-01-01 10:00:00", "C:\\src\\main.rs", 7, "started");
        assert_eq!(line, "[2024-01-01 10:00:00][Runner][main.rs:7] started");
    }
}
