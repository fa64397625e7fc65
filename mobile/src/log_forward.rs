use crate::log_capture::event_message;
use tracing::Subscriber;
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

/// Hands every tracing event to a `log::Log` sink. On Android the sink is
/// `android_logger::AndroidLogger`, which writes to logcat.
pub struct LogForwardLayer<L> {
    logger: L,
}

impl<L> LogForwardLayer<L>
where
    L: log::Log,
{
    pub fn new(logger: L) -> Self {
        Self { logger }
    }
}

fn as_log_level(level: tracing::Level) -> log::Level {
    match level {
        tracing::Level::ERROR => log::Level::Error,
        tracing::Level::WARN => log::Level::Warn,
        tracing::Level::INFO => log::Level::Info,
        tracing::Level::DEBUG => log::Level::Debug,
        tracing::Level::TRACE => log::Level::Trace,
    }
}

impl<S, L> Layer<S> for LogForwardLayer<L>
where
    S: Subscriber,
    L: log::Log + 'static,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let message = event_message(event);

        self.logger.log(
            &log::Record::builder()
                .level(as_log_level(*metadata.level()))
                .target(metadata.target())
                .module_path(metadata.module_path())
                .file(metadata.file())
                .line(metadata.line())
                .args(format_args!("{}", message))
                .build(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::EnvFilter;

    #[derive(Clone, Default)]
    struct RecordingLogger {
        records: Arc<Mutex<Vec<(log::Level, String, String)>>>,
    }

    impl log::Log for RecordingLogger {
        fn enabled(&self, _metadata: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            self.records.lock().unwrap().push((
                record.level(),
                record.target().to_string(),
                record.args().to_string(),
            ));
        }

        fn flush(&self) {}
    }

    #[test]
    fn test_events_reach_log_sink_with_level_and_target() {
        let logger = RecordingLogger::default();
        let subscriber =
            tracing_subscriber::registry().with(LogForwardLayer::new(logger.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::error!(target: "apk_share", "Failed to share APK of {}", "org.example.mail");
            tracing::debug!(target: "refresh", "Loaded {} launchable apps", 3);
        });

        let records = logger.records.lock().unwrap();
        assert_eq!(
            *records,
            vec![
                (
                    log::Level::Error,
                    "apk_share".to_string(),
                    "Failed to share APK of org.example.mail".to_string()
                ),
                (
                    log::Level::Debug,
                    "refresh".to_string(),
                    "Loaded 3 launchable apps".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_filtered_events_are_not_forwarded() {
        let logger = RecordingLogger::default();
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new("warn"))
            .with(LogForwardLayer::new(logger.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("hidden");
            tracing::warn!("shown");
        });

        let records = logger.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0, log::Level::Warn);
        assert_eq!(records[0].2, "shown");
    }
}
