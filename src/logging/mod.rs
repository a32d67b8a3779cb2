//! Structured JSON logging.
//!
//! The layout tree never logs unless a [`Logger`] is configured, and a failing
//! sink is ignored so a broken log file cannot interrupt a frame.

mod event;
mod sink;

pub use event::{
    LogEvent, LogFields, LogLevel, event_with_fields, field_map, json_kv, json_str, message_event,
};
pub use sink::{FileSink, LogSink, Logger, LoggingError, LoggingResult, MemorySink};

/// Default target for events emitted by the layout tree.
pub const LAYOUT_TARGET: &str = "room::layout";
