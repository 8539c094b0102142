// Logging module - In-memory log capture for the gallery
//
// A tracing layer that turns events into log entries held in a bounded
// buffer. The gallery renders them in its own LogContainer, so nothing is
// written through the alternate screen.

use crate::components::log::{LogEntry, LogLevel};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{Level, Metadata, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

/// Maximum number of log entries to keep in memory
pub const MAX_LOG_ENTRIES: usize = 1000;

impl From<&Level> for LogLevel {
    fn from(level: &Level) -> Self {
        match *level {
            Level::ERROR => LogLevel::Error,
            Level::WARN => LogLevel::Warn,
            Level::INFO => LogLevel::Info,
            // The container has no trace row style
            Level::DEBUG | Level::TRACE => LogLevel::Debug,
        }
    }
}

struct Inner {
    entries: VecDeque<LogEntry>,
    next_id: i64,
}

/// In-memory log buffer with bounded size (ring buffer)
#[derive(Clone)]
pub struct LogBuffer {
    inner: Arc<Mutex<Inner>>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::with_capacity(MAX_LOG_ENTRIES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                entries: VecDeque::with_capacity(capacity),
                next_id: 1,
            })),
            capacity: capacity.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panic while holding the lock leaves the deque intact
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record a message, assigning it the next id
    /// If the buffer is full, removes the oldest entry
    pub fn add(&self, level: LogLevel, target: &str, message: String) {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;

        if inner.entries.len() >= self.capacity {
            inner.entries.pop_front();
        }
        let entry = LogEntry::new(id, level, message).component(short_target(target));
        inner.entries.push_back(entry);
    }

    /// All entries, oldest first
    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.lock().entries.iter().cloned().collect()
    }

    /// Total entries ever recorded; changes whenever a new one arrives
    pub fn generation(&self) -> i64 {
        self.lock().next_id - 1
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lock().entries.clear();
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Last path segment of a tracing target: `canoe_ui::components::menu` -> `menu`
fn short_target(target: &str) -> &str {
    target.rsplit("::").next().unwrap_or(target)
}

/// Tracing layer that captures events into a [`LogBuffer`]
pub struct LogCaptureLayer {
    buffer: LogBuffer,
}

impl LogCaptureLayer {
    pub fn new(buffer: LogBuffer) -> Self {
        Self { buffer }
    }
}

impl<S> Layer<S> for LogCaptureLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        self.buffer
            .add(LogLevel::from(metadata.level()), metadata.target(), visitor.finish());
    }

    fn enabled(&self, _metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        // Filtering happens at subscriber level
        true
    }
}

/// Collects the `message` field, then any structured fields as `key=value`
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: Vec<String>,
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            return self.message;
        }
        let fields = self.fields.join(" ");
        if self.message.is_empty() {
            fields
        } else {
            format!("{} {}", self.message, fields)
        }
    }
}

impl tracing::field::Visit for MessageVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        let rendered = format!("{:?}", value);
        if field.name() == "message" {
            // format_args! messages arrive here without quotes
            self.message = rendered;
        } else {
            self.fields.push(format!("{}={}", field.name(), rendered));
        }
    }
}
