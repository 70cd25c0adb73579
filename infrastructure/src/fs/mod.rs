//! Filesystem adapters.

mod local_reader;

pub use local_reader::LocalFileReader;
