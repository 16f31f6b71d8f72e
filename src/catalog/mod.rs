//! Catalog engine: record model, tokenizer, index and query surface.
//!
//! Resolves NSNs, part numbers, CAGE codes and free-text item names against
//! the FLIS reference extracts held in memory.

mod composite;
pub mod index;
pub mod service;
pub mod tokenizer;
pub mod types;

pub use index::CatalogIndex;
pub use service::CatalogService;
pub use tokenizer::tokenize;
pub use types::{
    CatalogItem, CatalogStats, CompositeResult, ManagementRecord, ManufacturerAddress,
    ManufacturerInfo, ManufacturerStatus, PartNumberRef, UsageRule,
};
