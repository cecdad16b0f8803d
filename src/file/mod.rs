//! File I/O for JSON documents.
//!
//! Loading reads files (plain or gzip) and standard input into a parsed tree;
//! saving writes command output atomically.

pub mod loader;
pub mod saver;

pub use loader::{load_json_file, load_json_from_stdin, LoadOptions};
pub use saver::write_output;
