//! Automated code checks backed by external commands.

mod shell;

pub use shell::ShellCodeCheck;
