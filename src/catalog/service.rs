//! Query surface for callers outside the catalog.
//!
//! Wraps a shared [`CatalogIndex`] and adds shape-based dispatch: a query
//! that looks like an NSN is tried as one, a query that looks like a part
//! number is tried as one, and everything else falls through to name search.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use super::index::CatalogIndex;
use super::types::{CatalogStats, CompositeResult, ManufacturerInfo};
use crate::config::DataConfig;
use crate::error::{CatalogError, Result};
use crate::loader::{DataLoader, LoadReport};

const PART_NUMBER_MIN_LEN: usize = 3;
const PART_NUMBER_MAX_LEN: usize = 50;
const CAGE_CODE_LEN: usize = 5;

#[derive(Debug, Clone, Default)]
pub struct CatalogService {
    index: Arc<CatalogIndex>,
}

impl CatalogService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_index(index: Arc<CatalogIndex>) -> Self {
        Self { index }
    }

    #[must_use]
    pub fn index(&self) -> &Arc<CatalogIndex> {
        &self.index
    }

    /// Load every configured dataset found in `dir`.
    pub fn load_directory(&self, dir: &Path, config: &DataConfig) -> Result<LoadReport> {
        info!(directory = %dir.display(), "loading catalog data");
        let report = DataLoader::new(&self.index, config).load_directory(dir)?;
        let stats = self.index.stats();
        info!(
            items = stats.items,
            part_numbers = stats.part_numbers,
            addresses = stats.addresses,
            statuses = stats.statuses,
            rules = stats.rules,
            management = stats.management,
            "catalog data loaded"
        );
        Ok(report)
    }

    /// Universal search: NSN, then part number, then item name.
    pub fn search(&self, query: &str) -> Result<Vec<CompositeResult>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CatalogError::InvalidQuery("empty search query".to_string()));
        }

        if is_nsn_format(query) {
            match self.index.search_by_nsn(query) {
                Ok(result) => return Ok(vec![result]),
                Err(err) => debug!(query, %err, "NSN-shaped query did not resolve"),
            }
        }

        if is_part_number_format(query) {
            match self.index.search_by_part_number(query) {
                Ok(results) => return Ok(results),
                Err(err) => debug!(query, %err, "part-number-shaped query did not resolve"),
            }
        }

        self.index.search_by_name(query)
    }

    /// CAGE lookup by code when the query has code shape, else by company name.
    pub fn search_manufacturer(&self, query: &str) -> Result<Vec<ManufacturerInfo>> {
        let query = query.trim();
        if is_cage_code_format(query) {
            if let Ok(info) = self.index.search_manufacturer_by_code(query) {
                return Ok(vec![info]);
            }
        }
        self.index.search_manufacturer_by_name(query)
    }

    pub fn search_by_nsn(&self, nsn: &str) -> Result<CompositeResult> {
        self.index.search_by_nsn(nsn)
    }

    pub fn search_by_part_number(&self, part_number: &str) -> Result<Vec<CompositeResult>> {
        self.index.search_by_part_number(part_number)
    }

    pub fn search_by_name(&self, query: &str) -> Result<Vec<CompositeResult>> {
        self.index.search_by_name(query)
    }

    pub fn search_manufacturer_by_code(&self, cage_code: &str) -> Result<ManufacturerInfo> {
        self.index.search_manufacturer_by_code(cage_code)
    }

    pub fn search_manufacturer_by_name(&self, query: &str) -> Result<Vec<ManufacturerInfo>> {
        self.index.search_manufacturer_by_name(query)
    }

    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        self.index.stats()
    }
}

/// `####-##-###-####`, digits only.
#[must_use]
pub fn is_nsn_format(s: &str) -> bool {
    const GROUPS: [usize; 4] = [4, 2, 3, 4];
    let parts: Vec<&str> = s.split('-').collect();
    parts.len() == GROUPS.len()
        && parts
            .iter()
            .zip(GROUPS)
            .all(|(part, len)| part.len() == len && part.bytes().all(|b| b.is_ascii_digit()))
}

/// Letters, digits, `-`, `_` and spaces, 3 to 50 characters, at least one
/// letter or digit.
#[must_use]
pub fn is_part_number_format(s: &str) -> bool {
    if !(PART_NUMBER_MIN_LEN..=PART_NUMBER_MAX_LEN).contains(&s.len()) {
        return false;
    }
    let allowed = s
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ' '));
    allowed && s.chars().any(|c| c.is_ascii_alphanumeric())
}

#[must_use]
pub fn is_cage_code_format(s: &str) -> bool {
    s.len() == CAGE_CODE_LEN && s.bytes().all(|b| b.is_ascii_alphanumeric())
}
