//! Agent adapters.

mod process;

pub use process::ProcessAgent;
