//! Logging infrastructure: the debate event transcript.
//!
//! Provides [`JsonlEventLogger`], a JSONL file writer that implements the
//! [`EventLogger`](council_application::EventLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlEventLogger;
