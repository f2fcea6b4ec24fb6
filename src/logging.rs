//! Logger setup.
//!
//! Diagnostics go through the `log` facade; `env_logger` writes them to stderr.

const DEFAULT_FILTER: &str = "info";

/// `RUST_LOG` when set, otherwise info and above.
fn resolve_filter(rust_log: Option<String>) -> String {
    match rust_log {
        Some(filter) if !filter.trim().is_empty() => filter,
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Installs the global logger. Call once, early in `main`.
pub fn init_logging() {
    env_logger::Builder::new()
        .parse_filters(&resolve_filter(std::env::var("RUST_LOG").ok()))
        .init();
    log::debug!("logging initialized");
}

/// Records log output per thread so tests can assert on what was emitted.
#[cfg(test)]
pub mod capture {
    use std::sync::{Mutex, Once};
    use std::thread::{self, ThreadId};

    struct CaptureLogger {
        records: Mutex<Vec<(ThreadId, log::Level, String)>>,
    }

    impl log::Log for CaptureLogger {
        fn enabled(&self, _metadata: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            self.records.lock().unwrap().push((
                thread::current().id(),
                record.level(),
                record.args().to_string(),
            ));
        }

        fn flush(&self) {}
    }

    static LOGGER: CaptureLogger = CaptureLogger { records: Mutex::new(Vec::new()) };
    static INSTALL: Once = Once::new();

    /// Installs the capturing logger and forgets anything this thread logged before.
    pub fn start() {
        INSTALL.call_once(|| {
            log::set_logger(&LOGGER).unwrap();
            log::set_max_level(log::LevelFilter::Trace);
        });
        let id = thread::current().id();
        LOGGER.records.lock().unwrap().retain(|(thread, _, _)| *thread != id);
    }

    /// Everything the current thread logged since `start`.
    pub fn records() -> Vec<(log::Level, String)> {
        let id = thread::current().id();
        LOGGER
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|(thread, _, _)| *thread == id)
            .map(|(_, level, message)| (*level, message.clone()))
            .collect()
    }

    pub fn errors() -> Vec<String> {
        records()
            .into_iter()
            .filter(|(level, _)| *level == log::Level::Error)
            .map(|(_, message)| message)
            .collect()
    }
}
