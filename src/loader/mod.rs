//! Bulk loader for a PUB LOG data directory.
//!
//! Two directory layouts are understood. An extracted directory holds
//! `master_nsn_all.txt` and its companions, each with a header row naming the
//! columns. A directory without that items file but with the raw
//! `V_FLIS_NSN.TAB` set is read by column position, with or without a header
//! line. Records are handed to a [`CatalogIndex`] in batches. Only the items
//! file is mandatory; any other dataset that is missing or unreadable is
//! skipped with a warning.

pub mod reader;

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog::CatalogIndex;
use crate::catalog::types::{
    CatalogItem, ManagementRecord, ManufacturerAddress, ManufacturerStatus, PartNumberRef,
    UsageRule,
};
use crate::config::DataConfig;
use crate::error::{CatalogError, Result};

pub use reader::{ColumnMap, Row, TableReader, clean_field, detect_delimiter};

const FSC_LEN: usize = 4;
const NIIN_LEN: usize = 9;

pub const TAB_ITEMS_FILE: &str = "V_FLIS_NSN.TAB";
pub const TAB_PART_NUMBERS_FILE: &str = "V_FLIS_PART.TAB";
pub const TAB_ADDRESSES_FILE: &str = "V_CAGE_ADDRESS.TAB";
pub const TAB_RULES_FILE: &str = "V_MOE_RULE.TAB";
pub const TAB_MANAGEMENT_FILE: &str = "V_FLIS_MANAGEMENT.TAB";

/// Column layout of one dataset in both directory formats.
struct Schema {
    /// Header columns an extracted file must carry; each entry lists
    /// alternative names.
    required: &'static [&'static [&'static str]],
    /// Layout of the `.TAB` counterpart, when the raw set has one.
    positional: Option<Positional>,
}

struct Positional {
    columns: &'static [&'static str],
    /// Rows with fewer fields are skipped.
    min_fields: usize,
    /// A first line whose first field contains this is a header.
    header_marker: &'static str,
}

const ITEMS: Schema = Schema {
    required: &[&["ITEM_NAME"], &["FSC"], &["NIIN"]],
    positional: Some(Positional {
        columns: &[
            "NSN",
            "ITEM_NAME",
            "FSC",
            "FSG",
            "NIIN",
            "DESCRIPTION",
            "UI",
            "UNIT_PRICE",
            "DEMIL",
            "SECURITY_CODE",
        ],
        min_fields: 10,
        header_marker: "nsn",
    }),
};

const PART_NUMBERS: Schema = Schema {
    required: &[&["NSN", "NIIN"], &["PART_NUMBER"]],
    positional: Some(Positional {
        columns: &["NSN", "PART_NUMBER", "CAGE_CODE", "RNCC", "DESCRIPTION"],
        min_fields: 4,
        header_marker: "nsn",
    }),
};

const ADDRESSES: Schema = Schema {
    required: &[&["CAGE_CODE"]],
    positional: Some(Positional {
        columns: &[
            "CAGE_CODE",
            "COMPANY_NAME",
            "STREET_ADDRESS_1",
            "STREET_ADDRESS_2",
            "CITY",
            "STATE",
            "ZIP",
            "COUNTRY",
            "PHONE",
        ],
        min_fields: 8,
        header_marker: "cage",
    }),
};

const STATUSES: Schema = Schema {
    required: &[&["CAGE_CODE"]],
    positional: None,
};

const RULES: Schema = Schema {
    required: &[&["NSN", "NIIN"]],
    positional: Some(Positional {
        columns: &[
            "NSN",
            "SUPPLY_CODE",
            "ACQUISITION_CODE",
            "RECOVERABILITY_CODE",
            "MATERIAL_CONTROL",
            "ESSENTIALITY_CODE",
        ],
        min_fields: 6,
        header_marker: "nsn",
    }),
};

const MANAGEMENT: Schema = Schema {
    required: &[&["NSN", "NIIN"]],
    positional: Some(Positional {
        columns: &[
            "NSN",
            "MANAGEMENT_CONTROL_CODE",
            "ACQUISITION_ADVICE_CODE",
            "SOURCE_OF_SUPPLY",
            "LEAD_TIME",
            "REORDER_POINT",
            "REORDER_QUANTITY",
        ],
        min_fields: 7,
        header_marker: "nsn",
    }),
};

/// Which directory layout a load read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    /// Header-row files such as `master_nsn_all.txt`.
    #[default]
    Extracted,
    /// Positional `V_*.TAB` files.
    Tab,
}

impl DataFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Extracted => "extracted",
            Self::Tab => "tab",
        }
    }
}

/// Outcome of loading one dataset file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DatasetReport {
    /// False when the file was absent or unreadable and therefore skipped.
    pub present: bool,
    pub loaded: usize,
    /// Non-blank rows dropped for lacking a required value.
    pub skipped: usize,
}

/// A dataset that stopped partway. Rows read before the failure are already
/// in the index and counted in `report`.
#[derive(Debug)]
pub struct PartialLoad {
    pub report: DatasetReport,
    pub error: CatalogError,
}

impl From<PartialLoad> for CatalogError {
    fn from(partial: PartialLoad) -> Self {
        partial.error
    }
}

pub type DatasetResult = std::result::Result<DatasetReport, PartialLoad>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub format: DataFormat,
    pub items: DatasetReport,
    pub part_numbers: DatasetReport,
    pub addresses: DatasetReport,
    pub statuses: DatasetReport,
    pub rules: DatasetReport,
    pub management: DatasetReport,
}

impl LoadReport {
    #[must_use]
    pub const fn total_loaded(&self) -> usize {
        self.items.loaded
            + self.part_numbers.loaded
            + self.addresses.loaded
            + self.statuses.loaded
            + self.rules.loaded
            + self.management.loaded
    }

    #[must_use]
    pub const fn total_skipped(&self) -> usize {
        self.items.skipped
            + self.part_numbers.skipped
            + self.addresses.skipped
            + self.statuses.skipped
            + self.rules.skipped
            + self.management.skipped
    }
}

pub struct DataLoader<'a> {
    index: &'a CatalogIndex,
    config: &'a DataConfig,
    format: DataFormat,
    /// NIIN to full NSN, for files keyed only by NIIN.
    niins: HashMap<String, String>,
}

impl<'a> DataLoader<'a> {
    #[must_use]
    pub fn new(index: &'a CatalogIndex, config: &'a DataConfig) -> Self {
        Self {
            index,
            config,
            format: DataFormat::Extracted,
            niins: HashMap::new(),
        }
    }

    /// Load every dataset under `dir`, items first.
    ///
    /// Falls back to the `.TAB` set when the configured items file is absent
    /// and `V_FLIS_NSN.TAB` is present.
    pub fn load_directory(self, dir: &Path) -> Result<LoadReport> {
        if !dir.is_dir() {
            return Err(CatalogError::Load(format!(
                "data directory {} does not exist",
                dir.display()
            )));
        }

        let items_path = dir.join(&self.config.items_file);
        if !items_path.exists() && dir.join(TAB_ITEMS_FILE).exists() {
            return self.load_tab_directory(dir);
        }
        self.load_extracted_directory(dir)
    }

    fn load_extracted_directory(mut self, dir: &Path) -> Result<LoadReport> {
        let config = self.config;
        let items = self.load_items(&dir.join(&config.items_file))?;
        let part_numbers =
            self.optional(&dir.join(&config.part_numbers_file), Self::load_part_numbers);
        let addresses = self.optional(&dir.join(&config.addresses_file), Self::load_addresses);
        let statuses = self.optional(&dir.join(&config.statuses_file), Self::load_statuses);
        let rules = self.optional(&dir.join(&config.rules_file), Self::load_rules);
        let management =
            self.optional(&dir.join(&config.management_file), Self::load_management);

        Ok(LoadReport {
            format: DataFormat::Extracted,
            items,
            part_numbers,
            addresses,
            statuses,
            rules,
            management,
        })
    }

    fn load_tab_directory(mut self, dir: &Path) -> Result<LoadReport> {
        info!(directory = %dir.display(), "no extracted items file, reading .TAB files");
        self.format = DataFormat::Tab;

        let items = self.load_items(&dir.join(TAB_ITEMS_FILE))?;
        let part_numbers =
            self.optional(&dir.join(TAB_PART_NUMBERS_FILE), Self::load_part_numbers);
        let addresses = self.optional(&dir.join(TAB_ADDRESSES_FILE), Self::load_addresses);
        let rules = self.optional(&dir.join(TAB_RULES_FILE), Self::load_rules);
        let management = self.optional(&dir.join(TAB_MANAGEMENT_FILE), Self::load_management);

        Ok(LoadReport {
            format: DataFormat::Tab,
            items,
            part_numbers,
            addresses,
            statuses: DatasetReport::default(),
            rules,
            management,
        })
    }

    fn optional(
        &mut self,
        path: &Path,
        load: fn(&mut Self, &Path) -> DatasetResult,
    ) -> DatasetReport {
        if !path.exists() {
            warn!(file = %path.display(), "dataset file not found, skipping");
            return DatasetReport::default();
        }
        match load(self, path) {
            Ok(report) => report,
            Err(partial) => {
                warn!(
                    file = %path.display(),
                    error = %partial.error,
                    loaded = partial.report.loaded,
                    "dataset load stopped early"
                );
                partial.report
            }
        }
    }

    /// Mandatory; every failure is fatal.
    pub fn load_items(&mut self, path: &Path) -> DatasetResult {
        let index = self.index;
        let niins = &mut self.niins;
        let report = read_dataset(
            path,
            self.config,
            self.format,
            &ITEMS,
            |row| {
                let item = parse_item(row)?;
                if let Some(niin) = &item.niin {
                    niins.insert(niin.clone(), item.nsn.clone());
                }
                Some(item)
            },
            |batch| index.load_items(batch),
        )
        .map_err(|partial| PartialLoad {
            report: partial.report,
            error: CatalogError::Load(format!(
                "items file {}: {}",
                path.display(),
                partial.error
            )),
        })?;
        info!(file = %path.display(), loaded = report.loaded, skipped = report.skipped, "items loaded");
        Ok(report)
    }

    pub fn load_part_numbers(&mut self, path: &Path) -> DatasetResult {
        let index = self.index;
        let niins = &self.niins;
        let mut unresolved = 0usize;
        let report = read_dataset(
            path,
            self.config,
            self.format,
            &PART_NUMBERS,
            |row| {
                let part_number = row.first_of(&["PART_NUMBER"])?;
                let (nsn, resolved) = resolve_nsn(row, niins)?;
                if !resolved {
                    unresolved += 1;
                }
                Some(PartNumberRef {
                    nsn,
                    cage_code: row.get("CAGE_CODE").to_string(),
                    part_number: part_number.to_string(),
                    reference_type: row.optional("RNCC"),
                    description: row.optional("DESCRIPTION"),
                })
            },
            |batch| index.load_part_numbers(batch),
        )?;
        if unresolved > 0 {
            debug!(unresolved, "part numbers keyed by a NIIN with no loaded item");
        }
        info!(file = %path.display(), loaded = report.loaded, skipped = report.skipped, "part numbers loaded");
        Ok(report)
    }

    pub fn load_addresses(&mut self, path: &Path) -> DatasetResult {
        let index = self.index;
        let report = read_dataset(
            path,
            self.config,
            self.format,
            &ADDRESSES,
            |row| {
                let cage_code = row.first_of(&["CAGE_CODE"])?;
                Some(ManufacturerAddress {
                    cage_code: cage_code.to_string(),
                    company_name: row.get("COMPANY_NAME").to_string(),
                    address_line1: row.get("STREET_ADDRESS_1").to_string(),
                    address_line2: row.get("STREET_ADDRESS_2").to_string(),
                    city: row.get("CITY").to_string(),
                    state: row.get("STATE").to_string(),
                    zip_code: row.get("ZIP").to_string(),
                    country: row.get("COUNTRY").to_string(),
                    phone: row.get("PHONE").to_string(),
                })
            },
            |batch| index.load_addresses(batch),
        )?;
        info!(file = %path.display(), loaded = report.loaded, skipped = report.skipped, "CAGE addresses loaded");
        Ok(report)
    }

    pub fn load_statuses(&mut self, path: &Path) -> DatasetResult {
        let index = self.index;
        let report = read_dataset(
            path,
            self.config,
            self.format,
            &STATUSES,
            |row| {
                let cage_code = row.first_of(&["CAGE_CODE"])?;
                Some(ManufacturerStatus {
                    cage_code: cage_code.to_string(),
                    status: row.get("STATUS").to_string(),
                    cage_type: row.optional("TYPE"),
                    effective_date: parse_date(row.get("EFFECTIVE_DATE")),
                })
            },
            |batch| index.load_statuses(batch),
        )?;
        info!(file = %path.display(), loaded = report.loaded, skipped = report.skipped, "CAGE statuses loaded");
        Ok(report)
    }

    pub fn load_rules(&mut self, path: &Path) -> DatasetResult {
        let index = self.index;
        let niins = &self.niins;
        let report = read_dataset(
            path,
            self.config,
            self.format,
            &RULES,
            |row| {
                let (nsn, _) = resolve_nsn(row, niins)?;
                Some(UsageRule {
                    nsn,
                    supply_code: row.get("SUPPLY_CODE").to_string(),
                    acquisition_code: row.get("ACQUISITION_CODE").to_string(),
                    recoverability_code: row.get("RECOVERABILITY_CODE").to_string(),
                    material_control: row.get("MATERIAL_CONTROL").to_string(),
                    essentiality_code: row.get("ESSENTIALITY_CODE").to_string(),
                })
            },
            |batch| index.load_rules(batch),
        )?;
        info!(file = %path.display(), loaded = report.loaded, skipped = report.skipped, "usage rules loaded");
        Ok(report)
    }

    pub fn load_management(&mut self, path: &Path) -> DatasetResult {
        let index = self.index;
        let niins = &self.niins;
        let report = read_dataset(
            path,
            self.config,
            self.format,
            &MANAGEMENT,
            |row| {
                let (nsn, _) = resolve_nsn(row, niins)?;
                Some(ManagementRecord {
                    nsn,
                    management_control_code: row.get("MANAGEMENT_CONTROL_CODE").to_string(),
                    acquisition_advice_code: row.get("ACQUISITION_ADVICE_CODE").to_string(),
                    source_of_supply: row.get("SOURCE_OF_SUPPLY").to_string(),
                    lead_time_days: parse_count(row.get("LEAD_TIME")),
                    reorder_point: parse_count(row.get("REORDER_POINT")),
                    reorder_quantity: parse_count(row.get("REORDER_QUANTITY")),
                })
            },
            |batch| index.load_management(batch),
        )?;
        info!(file = %path.display(), loaded = report.loaded, skipped = report.skipped, "management records loaded");
        Ok(report)
    }
}

/// Stream `path` through `parse`, flushing every `batch_size` records.
fn read_dataset<T>(
    path: &Path,
    config: &DataConfig,
    format: DataFormat,
    schema: &Schema,
    parse: impl FnMut(&Row) -> Option<T>,
    flush: impl FnMut(Vec<T>) -> usize,
) -> DatasetResult {
    let (reader, min_fields) =
        open_dataset(path, config, format, schema).map_err(|error| PartialLoad {
            report: DatasetReport::default(),
            error,
        })?;
    debug!(file = %path.display(), delimiter = ?reader.delimiter(), ?format, "reading dataset");
    read_rows(reader, min_fields, config.batch_size, parse, flush)
}

fn open_dataset(
    path: &Path,
    config: &DataConfig,
    format: DataFormat,
    schema: &Schema,
) -> Result<(TableReader<BufReader<File>>, usize)> {
    match (format, &schema.positional) {
        (DataFormat::Extracted, _) => {
            let reader = TableReader::open(path, config.delimiter)?;
            reader.columns().require(schema.required)?;
            Ok((reader, 0))
        }
        (DataFormat::Tab, Some(layout)) => {
            let file = File::open(path)
                .map_err(|err| CatalogError::Load(format!("open {}: {err}", path.display())))?;
            let reader = TableReader::positional(
                BufReader::new(file),
                Some(config.delimiter.unwrap_or('\t')),
                layout.columns,
                layout.header_marker,
            )?;
            Ok((reader, layout.min_fields))
        }
        (DataFormat::Tab, None) => Err(CatalogError::Load(format!(
            "{} has no .TAB layout",
            path.display()
        ))),
    }
}

/// `parse` returns `None` for rows lacking a required value; those, and rows
/// narrower than `min_fields`, are counted as skipped. A read error flushes
/// what is already parsed before it is returned.
fn read_rows<R: BufRead, T>(
    reader: TableReader<R>,
    min_fields: usize,
    batch_size: usize,
    mut parse: impl FnMut(&Row) -> Option<T>,
    mut flush: impl FnMut(Vec<T>) -> usize,
) -> DatasetResult {
    let batch_size = batch_size.max(1);
    let mut report = DatasetReport {
        present: true,
        ..DatasetReport::default()
    };
    let mut batch = Vec::with_capacity(batch_size.min(1024));

    for row in reader {
        let row = match row {
            Ok(row) => row,
            Err(error) => {
                if !batch.is_empty() {
                    report.loaded += flush(batch);
                }
                return Err(PartialLoad { report, error });
            }
        };
        let record = if row.width() >= min_fields {
            parse(&row)
        } else {
            None
        };
        match record {
            Some(record) => batch.push(record),
            None => report.skipped += 1,
        }
        if batch.len() >= batch_size {
            report.loaded += flush(std::mem::take(&mut batch));
            debug!(line = row.line(), loaded = report.loaded, "flushed batch");
        }
    }
    if !batch.is_empty() {
        report.loaded += flush(batch);
    }
    Ok(report)
}

/// An `NSN` value wins; otherwise the NSN is built from `FSC` and `NIIN`.
fn parse_item(row: &Row) -> Option<CatalogItem> {
    let item_name = row.first_of(&["ITEM_NAME"])?;
    let fsc = row.first_of(&["FSC"]).map(|fsc| pad_digits(fsc, FSC_LEN));
    let niin = row.first_of(&["NIIN"]).map(|niin| pad_digits(niin, NIIN_LEN));

    let nsn = match (row.first_of(&["NSN"]), &fsc, &niin) {
        (Some(nsn), _, _) => nsn.to_string(),
        (None, Some(fsc), Some(niin)) => format_nsn(fsc, niin),
        _ => return None,
    };
    let fsg = row
        .first_of(&["FSG"])
        .or_else(|| fsc.as_deref().and_then(|fsc| fsc.get(..2)))
        .map(str::to_string);

    Some(CatalogItem {
        nsn,
        item_name: item_name.to_string(),
        description: row
            .first_of(&["END_ITEM_NAME", "DESCRIPTION"])
            .unwrap_or_default()
            .to_string(),
        fsg,
        supply_class: fsc,
        niin,
        unit_of_issue: row.optional("UI"),
        unit_price: row.get("UNIT_PRICE").parse::<f64>().ok(),
        demil_code: row.optional("DEMIL"),
        shelf_life: row.optional("SHELF_LIFE"),
        security_code: row.optional("SECURITY_CODE"),
    })
}

/// NSN for a row keyed by `NSN` or `NIIN`; the flag is false when a NIIN had
/// no loaded item and is used as-is.
fn resolve_nsn(row: &Row, niins: &HashMap<String, String>) -> Option<(String, bool)> {
    if let Some(nsn) = row.first_of(&["NSN"]) {
        return Some((nsn.to_string(), true));
    }
    let niin = pad_digits(row.first_of(&["NIIN"])?, NIIN_LEN);
    Some(match niins.get(&niin) {
        Some(nsn) => (nsn.clone(), true),
        None => (niin, false),
    })
}

/// `FSC-NN-NNN-NNNN` from a class and a NIIN, each left-padded with zeros.
/// A NIIN longer than nine characters is appended unsplit.
#[must_use]
pub fn format_nsn(fsc: &str, niin: &str) -> String {
    let fsc = pad_digits(fsc, FSC_LEN);
    let niin = pad_digits(niin, NIIN_LEN);
    if niin.len() == NIIN_LEN && niin.is_ascii() {
        format!("{fsc}-{}-{}-{}", &niin[..2], &niin[2..5], &niin[5..])
    } else {
        format!("{fsc}-{niin}")
    }
}

fn pad_digits(value: &str, width: usize) -> String {
    format!("{:0>width$}", value.trim())
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y%m%d"))
        .ok()
}

fn parse_count(value: &str) -> u32 {
    value.parse().unwrap_or(0)
}
