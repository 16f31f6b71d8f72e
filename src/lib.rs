//! publog - offline PUB LOG catalog search
//!
//! Loads the FLIS extracts (items, part numbers, CAGE addresses and statuses,
//! usage rules, management data) into an in-memory index and resolves NSNs,
//! part numbers, CAGE codes and item-name keywords against it.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod test_utils;

pub use error::{CatalogError, Result};
