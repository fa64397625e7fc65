use crate::LogLevel;
use std::sync::{Arc, Mutex, OnceLock, RwLock};
use tracing::Subscriber;
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

const LOG_BUFFER_LIMIT: usize = 10000;

pub struct LogCaptureLayer;

impl<S> Layer<S> for LogCaptureLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = metadata.level();
        let target = metadata.target();

        let message_level = match *level {
            tracing::Level::ERROR => LogLevel::Error,
            tracing::Level::WARN => LogLevel::Warn,
            tracing::Level::INFO => LogLevel::Info,
            tracing::Level::DEBUG => LogLevel::Debug,
            tracing::Level::TRACE => LogLevel::Trace,
        };

        append_log(
            message_level,
            format!("[{}] {}: {}", level, target, event_message(event)),
        );
    }
}

/// The `message` field of an event, or an empty string.
pub(crate) fn event_message(event: &tracing::Event<'_>) -> String {
    struct MessageVisitor {
        message: String,
    }

    impl tracing::field::Visit for MessageVisitor {
        fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                self.message = format!("{:?}", value);
            }
        }

        fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
            if field.name() == "message" {
                self.message = value.to_string();
            }
        }
    }

    let mut visitor = MessageVisitor {
        message: String::new(),
    };
    event.record(&mut visitor);
    visitor.message
}

static LOG_BUFFER: OnceLock<Arc<Mutex<String>>> = OnceLock::new();
static CAPTURE_LEVEL: OnceLock<Arc<Mutex<LogLevel>>> = OnceLock::new();

fn get_log_buffer() -> &'static Arc<Mutex<String>> {
    LOG_BUFFER.get_or_init(|| Arc::new(Mutex::new(String::new())))
}

fn get_capture_level() -> &'static Arc<Mutex<LogLevel>> {
    CAPTURE_LEVEL.get_or_init(|| Arc::new(Mutex::new(LogLevel::Info)))
}

/// Capture messages at `level` and every more severe level.
pub fn set_capture_level(level: LogLevel) {
    if let Ok(mut current) = get_capture_level().lock() {
        *current = level;
    }
}

pub fn capture_level() -> LogLevel {
    get_capture_level()
        .lock()
        .map(|level| *level)
        .unwrap_or_default()
}

pub fn append_log(level: LogLevel, message: String) {
    let should_log = get_capture_level()
        .lock()
        .map(|selected| level.priority() <= selected.priority())
        .unwrap_or(false);
    if !should_log {
        return;
    }

    if let Ok(mut buffer) = get_log_buffer().lock() {
        push_capped(&mut buffer, &message, LOG_BUFFER_LIMIT);
    }
}

/// Snapshot of the captured lines, oldest first.
pub fn captured_logs() -> String {
    get_log_buffer()
        .lock()
        .map(|buffer| buffer.clone())
        .unwrap_or_default()
}

fn push_capped(buffer: &mut String, line: &str, limit: usize) {
    buffer.push_str(line);
    buffer.push('\n');

    let excess = buffer.chars().count().saturating_sub(limit);
    if excess > 0 {
        *buffer = buffer.chars().skip(excess).collect();
    }
}

// Type-erased reload handle using a closure
type ReloadFn = Box<dyn Fn(&str) + Send + Sync>;

static RELOAD_HANDLE: OnceLock<Arc<RwLock<Option<ReloadFn>>>> = OnceLock::new();

fn get_reload_handle() -> &'static Arc<RwLock<Option<ReloadFn>>> {
    RELOAD_HANDLE.get_or_init(|| Arc::new(RwLock::new(None)))
}

/// Store the reload handle for later use (type-erased)
pub fn set_reload_fn<F>(reload_fn: F)
where
    F: Fn(&str) + Send + Sync + 'static,
{
    if let Ok(mut handle) = get_reload_handle().write() {
        *handle = Some(Box::new(reload_fn));
    }
}

/// Update the tracing log level at runtime
pub fn update_tracing_level(level: &str) {
    if let Ok(handle) = get_reload_handle().read() {
        if let Some(ref reload_fn) = *handle {
            reload_fn(level);
        }
    }
    if let Some(level) = LogLevel::parse(level) {
        set_capture_level(level);
    }
}

/// Serializes tests that change the process-wide level.
#[cfg(test)]
pub(crate) static LEVEL_TEST_LOCK: Mutex<()> = Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_capped_keeps_newest_characters() {
        let mut buffer = String::new();
        push_capped(&mut buffer, "first", 13);
        push_capped(&mut buffer, "second", 13);
        assert_eq!(buffer, "first\nsecond\n");

        push_capped(&mut buffer, "third", 13);
        assert_eq!(buffer, "second\nthird\n");
    }

    #[test]
    fn test_push_capped_counts_characters_not_bytes() {
        let mut buffer = String::new();
        push_capped(&mut buffer, "äöü", 3);
        assert_eq!(buffer, "öü\n");
    }

    #[test]
    fn test_update_tracing_level_reloads_filter_and_capture_level() {
        let _guard = LEVEL_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let requested = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&requested);
        set_reload_fn(move |level: &str| sink.lock().unwrap().push(level.to_string()));

        update_tracing_level("debug");

        assert_eq!(*requested.lock().unwrap(), vec!["debug".to_string()]);
        assert_eq!(capture_level(), LogLevel::Debug);
    }
}
