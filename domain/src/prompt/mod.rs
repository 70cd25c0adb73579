//! Prompt text for each debate phase.

mod template;

pub use template::DebatePromptTemplate;
