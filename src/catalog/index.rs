//! In-memory catalog index.
//!
//! All primary tables and derived indexes live in one `CatalogTables`
//! behind a single reader/writer lock. Loads hold the write lock for the
//! whole batch; searches share the read lock. No table is ever observed
//! half-updated relative to another.
//!
//! Posting lists are append-only. Reloading a record appends its key again
//! and never removes postings for words it no longer contains; searches
//! de-duplicate keys before tallying.

use std::collections::HashMap;

use itertools::Itertools;
use parking_lot::RwLock;
use rayon::prelude::*;

use super::composite;
use super::tokenizer::tokenize;
use super::types::{
    CatalogItem, CatalogStats, CompositeResult, ManagementRecord, ManufacturerAddress,
    ManufacturerInfo, ManufacturerStatus, PartNumberRef, UsageRule,
};
use crate::error::{CatalogError, Result};

/// Word (or part number) to the keys whose text produced it.
type Postings = HashMap<String, Vec<String>>;

#[derive(Debug, Default)]
pub(super) struct CatalogTables {
    pub(super) items: HashMap<String, CatalogItem>,
    /// NSN -> part refs in load order.
    pub(super) part_numbers: HashMap<String, Vec<PartNumberRef>>,
    part_number_count: usize,
    pub(super) addresses: HashMap<String, ManufacturerAddress>,
    pub(super) statuses: HashMap<String, ManufacturerStatus>,
    pub(super) rules: HashMap<String, UsageRule>,
    pub(super) management: HashMap<String, ManagementRecord>,

    part_index: Postings,
    name_index: Postings,
    manufacturer_name_index: Postings,
}

impl CatalogTables {
    fn insert_part(&mut self, part: PartNumberRef) {
        let refs = self.part_numbers.entry(part.nsn.clone()).or_default();
        if let Some(existing) = refs.iter_mut().find(|r| r.same_reference(&part)) {
            *existing = part;
        } else {
            refs.push(part);
            self.part_number_count += 1;
        }
    }

    /// Address and status for a code, or `None` when neither is loaded.
    pub(super) fn manufacturer(&self, cage_code: &str) -> Option<ManufacturerInfo> {
        let info = ManufacturerInfo {
            address: self.addresses.get(cage_code).cloned(),
            status: self.statuses.get(cage_code).cloned(),
        };
        (!info.is_empty()).then_some(info)
    }

    fn stats(&self) -> CatalogStats {
        CatalogStats {
            items: self.items.len(),
            part_numbers: self.part_number_count,
            addresses: self.addresses.len(),
            statuses: self.statuses.len(),
            rules: self.rules.len(),
            management: self.management.len(),
        }
    }
}

/// Count, per key, how many of `words` have a posting for it.
///
/// `words` must already be distinct (as returned by [`tokenize`]); repeated
/// keys within one posting list count once.
fn tally<'a>(index: &'a Postings, words: &[String]) -> HashMap<&'a str, usize> {
    let mut counts: HashMap<&'a str, usize> = HashMap::new();
    for word in words {
        let Some(keys) = index.get(word) else {
            continue;
        };
        for key in keys.iter().unique() {
            *counts.entry(key.as_str()).or_insert(0) += 1;
        }
    }
    counts
}

/// The catalog: load once per dataset, query from any number of threads.
#[derive(Debug, Default)]
pub struct CatalogIndex {
    tables: RwLock<CatalogTables>,
}

impl CatalogIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Loads
    // =========================================================================

    /// Insert items and index their name and description words.
    ///
    /// Returns the number of records processed.
    pub fn load_items<I>(&self, items: I) -> usize
    where
        I: IntoIterator<Item = CatalogItem>,
    {
        let prepared: Vec<(CatalogItem, Vec<String>)> = items
            .into_iter()
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|item| {
                let words = tokenize(&item.searchable_text());
                (item, words)
            })
            .collect();
        let count = prepared.len();

        let mut guard = self.tables.write();
        let tables = &mut *guard;
        for (item, words) in prepared {
            for word in words {
                tables
                    .name_index
                    .entry(word)
                    .or_default()
                    .push(item.nsn.clone());
            }
            tables.items.insert(item.nsn.clone(), item);
        }
        count
    }

    /// Insert part-number cross references. Unknown NSNs are accepted.
    pub fn load_part_numbers<I>(&self, parts: I) -> usize
    where
        I: IntoIterator<Item = PartNumberRef>,
    {
        let mut count = 0;
        let mut guard = self.tables.write();
        let tables = &mut *guard;
        for part in parts {
            tables
                .part_index
                .entry(part.part_number.clone())
                .or_default()
                .push(part.nsn.clone());
            tables.insert_part(part);
            count += 1;
        }
        count
    }

    /// Insert manufacturer addresses and index company-name words.
    pub fn load_addresses<I>(&self, addresses: I) -> usize
    where
        I: IntoIterator<Item = ManufacturerAddress>,
    {
        let prepared: Vec<(ManufacturerAddress, Vec<String>)> = addresses
            .into_iter()
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|address| {
                let words = tokenize(&address.company_name);
                (address, words)
            })
            .collect();
        let count = prepared.len();

        let mut guard = self.tables.write();
        let tables = &mut *guard;
        for (address, words) in prepared {
            for word in words {
                tables
                    .manufacturer_name_index
                    .entry(word)
                    .or_default()
                    .push(address.cage_code.clone());
            }
            tables.addresses.insert(address.cage_code.clone(), address);
        }
        count
    }

    pub fn load_statuses<I>(&self, statuses: I) -> usize
    where
        I: IntoIterator<Item = ManufacturerStatus>,
    {
        let mut count = 0;
        let mut tables = self.tables.write();
        for status in statuses {
            tables.statuses.insert(status.cage_code.clone(), status);
            count += 1;
        }
        count
    }

    pub fn load_rules<I>(&self, rules: I) -> usize
    where
        I: IntoIterator<Item = UsageRule>,
    {
        let mut count = 0;
        let mut tables = self.tables.write();
        for rule in rules {
            tables.rules.insert(rule.nsn.clone(), rule);
            count += 1;
        }
        count
    }

    pub fn load_management<I>(&self, records: I) -> usize
    where
        I: IntoIterator<Item = ManagementRecord>,
    {
        let mut count = 0;
        let mut tables = self.tables.write();
        for record in records {
            tables.management.insert(record.nsn.clone(), record);
            count += 1;
        }
        count
    }

    // =========================================================================
    // Searches
    // =========================================================================

    /// Exact NSN lookup. No normalization is applied to `nsn`.
    pub fn search_by_nsn(&self, nsn: &str) -> Result<CompositeResult> {
        let tables = self.tables.read();
        let item = tables
            .items
            .get(nsn)
            .ok_or_else(|| CatalogError::not_found("NSN", nsn))?;
        Ok(composite::build(&tables, item))
    }

    /// Exact part-number lookup; one result per distinct NSN, in load order.
    pub fn search_by_part_number(&self, part_number: &str) -> Result<Vec<CompositeResult>> {
        let tables = self.tables.read();
        let results: Vec<CompositeResult> = tables
            .part_index
            .get(part_number)
            .into_iter()
            .flatten()
            .unique()
            .filter_map(|nsn| tables.items.get(nsn))
            .map(|item| composite::build(&tables, item))
            .collect();

        if results.is_empty() {
            return Err(CatalogError::not_found("part number", part_number));
        }
        Ok(results)
    }

    /// Items whose name or description contains every query word.
    ///
    /// Results are ordered by NSN.
    pub fn search_by_name(&self, query: &str) -> Result<Vec<CompositeResult>> {
        let words = tokenize(query);
        if words.is_empty() {
            return Err(CatalogError::InvalidQuery(query.to_string()));
        }

        let tables = self.tables.read();
        let mut matches: Vec<&str> = tally(&tables.name_index, &words)
            .into_iter()
            .filter(|&(_, count)| count == words.len())
            .map(|(nsn, _)| nsn)
            .collect();
        matches.sort_unstable();

        let results: Vec<CompositeResult> = matches
            .into_iter()
            .filter_map(|nsn| tables.items.get(nsn))
            .map(|item| composite::build(&tables, item))
            .collect();

        if results.is_empty() {
            return Err(CatalogError::not_found("item name", query));
        }
        Ok(results)
    }

    /// Address and/or status for a CAGE code.
    pub fn search_manufacturer_by_code(&self, cage_code: &str) -> Result<ManufacturerInfo> {
        self.tables
            .read()
            .manufacturer(cage_code)
            .ok_or_else(|| CatalogError::not_found("CAGE code", cage_code))
    }

    /// Manufacturers whose company name contains any query word.
    ///
    /// Unlike [`Self::search_by_name`] a single matching word is enough.
    /// Results are ordered by CAGE code.
    pub fn search_manufacturer_by_name(&self, query: &str) -> Result<Vec<ManufacturerInfo>> {
        let words = tokenize(query);
        if words.is_empty() {
            return Err(CatalogError::InvalidQuery(query.to_string()));
        }

        let tables = self.tables.read();
        let mut codes: Vec<&str> = tally(&tables.manufacturer_name_index, &words)
            .into_iter()
            .filter(|&(_, count)| count > 0)
            .map(|(code, _)| code)
            .collect();
        codes.sort_unstable();

        let results: Vec<ManufacturerInfo> = codes
            .into_iter()
            .filter_map(|code| tables.manufacturer(code))
            .collect();

        if results.is_empty() {
            return Err(CatalogError::not_found("manufacturer name", query));
        }
        Ok(results)
    }

    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        self.tables.read().stats()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stats().total() == 0
    }
}
