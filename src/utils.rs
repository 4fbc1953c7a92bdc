use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Appends timestamped lines to the log panel shown in the window.
/// Lines are pushed before `log` returns, so the next frame already shows them.
pub struct Logger {
    log_messages: Arc<Mutex<Vec<String>>>,
}

impl Logger {
    pub fn new(log_messages: Arc<Mutex<Vec<String>>>) -> Self {
        Logger { log_messages }
    }

    pub fn log(&self, message: String) {
        tracing::info!("{message}");
        let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
        let log_message = format!("[{}] {}", timestamp, message);
        self.log_messages.lock().push(log_message);
    }
}

pub fn measure_time<F, T>(f: F) -> (T, Duration)
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let result = f();
    let duration = start.elapsed();
    (result, duration)
}
