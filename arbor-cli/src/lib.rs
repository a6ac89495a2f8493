//! Terminal driver for an arbor tree store.
//!
//! Loads a tree from a JSON outline, then applies line commands read from
//! stdin and prints the visible rows after each one.

pub mod command;
pub mod config;
pub mod error;
pub mod outline;
pub mod paths;
pub mod render;
pub mod session;

pub use error::CliError;
