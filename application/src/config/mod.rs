//! Application-level configuration.
//!
//! Runtime knobs for the debate protocol and the dispatch engine. Values are
//! plain data; loading them from files is the infrastructure layer's job.

mod debate;
mod engine;

pub use debate::{DebateConfig, QcPolicy};
pub use engine::EngineConfig;
