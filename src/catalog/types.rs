//! Record model for the catalog.
//!
//! Each table stores exactly one of these record types, keyed by its natural
//! key. Records only reference each other through keys (NSN or CAGE code);
//! nothing here holds a pointer into another table.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A stocked item, keyed by its National Stock Number (`XXXX-XX-XXX-XXXX`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogItem {
    pub nsn: String,
    pub item_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub niin: Option<String>,
    /// Federal Supply Class (first four digits of the NSN).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supply_class: Option<String>,
    /// Federal Supply Group (first two digits of the FSC).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fsg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_of_issue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demil_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shelf_life: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_code: Option<String>,
}

impl CatalogItem {
    pub fn new(nsn: impl Into<String>, item_name: impl Into<String>) -> Self {
        Self {
            nsn: nsn.into(),
            item_name: item_name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Text that feeds the item-name index.
    pub(crate) fn searchable_text(&self) -> String {
        format!("{} {}", self.item_name, self.description)
    }
}

/// Part-number cross reference. One item may carry many.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PartNumberRef {
    pub nsn: String,
    pub cage_code: String,
    pub part_number: String,
    /// Reference number category code (RNCC).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PartNumberRef {
    pub fn new(
        nsn: impl Into<String>,
        cage_code: impl Into<String>,
        part_number: impl Into<String>,
    ) -> Self {
        Self {
            nsn: nsn.into(),
            cage_code: cage_code.into(),
            part_number: part_number.into(),
            ..Self::default()
        }
    }

    /// True when both refs share the (cage code, part number) half of the key.
    pub(crate) fn same_reference(&self, other: &Self) -> bool {
        self.cage_code == other.cage_code && self.part_number == other.part_number
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ManufacturerAddress {
    pub cage_code: String,
    pub company_name: String,
    #[serde(default)]
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub phone: String,
}

impl ManufacturerAddress {
    pub fn new(cage_code: impl Into<String>, company_name: impl Into<String>) -> Self {
        Self {
            cage_code: cage_code.into(),
            company_name: company_name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ManufacturerStatus {
    pub cage_code: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cage_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<NaiveDate>,
}

impl ManufacturerStatus {
    pub fn new(cage_code: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            cage_code: cage_code.into(),
            status: status.into(),
            ..Self::default()
        }
    }
}

/// Method-of-evaluation (MOE) rule for an item.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UsageRule {
    pub nsn: String,
    #[serde(default)]
    pub supply_code: String,
    #[serde(default)]
    pub acquisition_code: String,
    #[serde(default)]
    pub recoverability_code: String,
    #[serde(default)]
    pub material_control: String,
    #[serde(default)]
    pub essentiality_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ManagementRecord {
    pub nsn: String,
    #[serde(default)]
    pub management_control_code: String,
    #[serde(default)]
    pub acquisition_advice_code: String,
    #[serde(default)]
    pub source_of_supply: String,
    #[serde(default)]
    pub lead_time_days: u32,
    #[serde(default)]
    pub reorder_point: u32,
    #[serde(default)]
    pub reorder_quantity: u32,
}

/// Address and status for one CAGE code. At least one side is present when
/// returned from a search.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ManufacturerInfo {
    pub address: Option<ManufacturerAddress>,
    pub status: Option<ManufacturerStatus>,
}

impl ManufacturerInfo {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.address.is_none() && self.status.is_none()
    }

    #[must_use]
    pub fn cage_code(&self) -> Option<&str> {
        self.address
            .as_ref()
            .map(|a| a.cage_code.as_str())
            .or_else(|| self.status.as_ref().map(|s| s.cage_code.as_str()))
    }
}

/// Full answer for one NSN: the item joined with everything keyed off it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeResult {
    pub item: CatalogItem,
    #[serde(default)]
    pub part_numbers: Vec<PartNumberRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_rule: Option<UsageRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub management: Option<ManagementRecord>,
    /// First resolvable manufacturer in part-number order; see
    /// the `composite` module.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<ManufacturerInfo>,
}

/// Row counts of every primary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogStats {
    pub items: usize,
    pub part_numbers: usize,
    pub addresses: usize,
    pub statuses: usize,
    pub rules: usize,
    pub management: usize,
}

impl CatalogStats {
    /// Dataset name to count, for diagnostic reporting.
    #[must_use]
    pub fn entries(&self) -> BTreeMap<&'static str, usize> {
        BTreeMap::from([
            ("items", self.items),
            ("part_numbers", self.part_numbers),
            ("addresses", self.addresses),
            ("statuses", self.statuses),
            ("rules", self.rules),
            ("management", self.management),
        ])
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.items + self.part_numbers + self.addresses + self.statuses + self.rules + self.management
    }
}
