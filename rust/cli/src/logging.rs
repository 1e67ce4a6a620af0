//! Tracing setup for the binary, plus a capturing layer for tests.

use std::marker::PhantomData;
use std::sync::{Arc, Mutex};
use tracing::Level;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "warn";

/// Installs a `fmt` subscriber on stderr so stdout stays clean for game
/// output. Does nothing if a subscriber is already installed.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Structured log entry captured by [`CaptureLayer`]
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: Level,
    pub target: String,
    pub message: String,
    pub fields: Vec<(String, String)>,
}

/// Collects events in memory so tests can assert on them.
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn into_layer<S>(self) -> CaptureLayer<S>
    where
        S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    {
        CaptureLayer {
            capture: self,
            _phantom: PhantomData,
        }
    }
}

pub struct CaptureLayer<S> {
    capture: LogCapture,
    _phantom: PhantomData<S>,
}

impl<S> Layer<S> for CaptureLayer<S>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let entry = LogEntry {
            level: *metadata.level(),
            target: metadata.target().to_string(),
            message: visitor.message.unwrap_or_default(),
            fields: visitor.fields,
        };

        if let Ok(mut entries) = self.capture.entries.lock() {
            entries.push(entry);
        }
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Vec<(String, String)>,
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        let value_str = format!("{:?}", value);
        if field.name() == "message" {
            self.message = Some(value_str);
        } else {
            self.fields.push((field.name().to_string(), value_str));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flip7_engine::engine::{Game, GameConfig};
    use flip7_engine::strategy::Seat;
    use tracing_subscriber::Registry;
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn engine_reports_round_scoring() {
        let capture = LogCapture::new();
        let registry = Registry::default().with(capture.clone().into_layer::<Registry>());

        tracing::subscriber::with_default(registry, || {
            let seats = vec![
                Seat::new("a", Box::new(flip7_ai::create_policy("score:15").unwrap())),
                Seat::new("b", Box::new(flip7_ai::create_policy("ev").unwrap())),
            ];
            let config = GameConfig {
                seed: Some(8),
                ..GameConfig::default()
            };
            let mut game = Game::new(seats, config).unwrap();
            game.play_round().unwrap();
        });

        let entries = capture.entries();
        let scored = entries
            .iter()
            .find(|e| e.message.contains("round scored"))
            .expect("round scoring event");
        assert_eq!(scored.level, Level::INFO);
        assert!(scored.target.starts_with("flip7_engine"));
        assert!(scored.fields.iter().any(|(k, _)| k == "totals"));
        assert!(
            entries
                .iter()
                .any(|e| e.level == Level::DEBUG && e.message.contains("draws"))
        );
    }
}
