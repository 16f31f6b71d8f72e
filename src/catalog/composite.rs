//! Composite result assembly.
//!
//! Joins an item with its part numbers, usage rule, management record and a
//! single manufacturer block. The manufacturer is the first CAGE code, walking
//! the item's part list in load order, that has an address or a status. Items
//! sourced from several manufacturers therefore surface only one of them; the
//! full set is still visible through `part_numbers`.

use super::index::CatalogTables;
use super::types::{CatalogItem, CompositeResult, ManufacturerInfo, PartNumberRef};

/// Build the answer for an item already confirmed present in `tables`.
pub(super) fn build(tables: &CatalogTables, item: &CatalogItem) -> CompositeResult {
    let part_numbers = tables
        .part_numbers
        .get(&item.nsn)
        .cloned()
        .unwrap_or_default();
    let manufacturer = first_manufacturer(tables, &part_numbers);

    CompositeResult {
        item: item.clone(),
        usage_rule: tables.rules.get(&item.nsn).cloned(),
        management: tables.management.get(&item.nsn).cloned(),
        manufacturer,
        part_numbers,
    }
}

fn first_manufacturer(tables: &CatalogTables, parts: &[PartNumberRef]) -> Option<ManufacturerInfo> {
    parts
        .iter()
        .find_map(|part| tables.manufacturer(&part.cage_code))
}
