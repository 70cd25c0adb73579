//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod approval_gate;
pub mod dispatch_engine;
pub mod run_debate;
