//! Work items dispatched by the engine.

pub mod entities;

pub use entities::{ExecutionResult, Task, TaskKind, TaskOutput};
