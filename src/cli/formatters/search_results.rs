//! Search results formatter
//!
//! Renders composite results and manufacturer blocks as a styled terminal
//! listing (Human) or header-less TSV (Plain). JSON output serializes the
//! same structs directly.

use console::style;
use serde::Serialize;
use tracing::debug;

use crate::catalog::{CompositeResult, ManufacturerAddress, ManufacturerInfo};
use crate::cli::output::{Formattable, HumanLayout, tsv_row};

/// A page of composite results for one query.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub query: String,
    /// Which lookup produced the results (`search`, `part`, `name`, `nsn`).
    pub search_type: String,
    /// Matches before the display limit was applied.
    pub total: usize,
    pub results: Vec<CompositeResult>,
}

impl SearchResults {
    /// Keep at most `limit` of `results`, remembering the full count.
    pub fn new(
        query: impl Into<String>,
        search_type: impl Into<String>,
        mut results: Vec<CompositeResult>,
        limit: usize,
    ) -> Self {
        let total = results.len();
        results.truncate(limit);
        Self {
            query: query.into(),
            search_type: search_type.into(),
            total,
            results,
        }
    }

    /// Warnings worth surfacing alongside the results.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        if self.total > self.results.len() {
            vec![format!(
                "showing {} of {} results; raise --limit to see more",
                self.results.len(),
                self.total
            )]
        } else {
            Vec::new()
        }
    }

    fn build_metadata_header(&self) -> String {
        let noun = if self.total == 1 { "result" } else { "results" };
        format!(
            "{} {noun} for '{}' ({} search)",
            self.total, self.query, self.search_type
        )
    }
}

impl Formattable for SearchResults {
    fn format_human(&self) -> String {
        debug!(target: "search", results = self.results.len(), "rendering results");

        if let ([single], 1) = (self.results.as_slice(), self.total) {
            return render_detail(single);
        }

        let mut out = self.build_metadata_header();
        out.push_str("\n\n");
        for (i, result) in self.results.iter().enumerate() {
            out.push_str(&format!(
                "{:>3}. {}  {}\n",
                i + 1,
                style(&result.item.nsn).cyan(),
                style(&result.item.item_name).bold()
            ));
            if !result.item.description.is_empty() {
                out.push_str(&format!("     {}\n", result.item.description));
            }
            if !result.part_numbers.is_empty() {
                let parts: Vec<&str> = result
                    .part_numbers
                    .iter()
                    .map(|p| p.part_number.as_str())
                    .collect();
                out.push_str(&format!(
                    "     {} {}\n",
                    style("P/N").dim(),
                    parts.join(", ")
                ));
            }
            if let Some(name) = manufacturer_name(result) {
                out.push_str(&format!("     {} {name}\n", style("MFR").dim()));
            }
        }
        out
    }

    /// `NSN<TAB>ITEM_NAME<TAB>PART_NUMBERS<TAB>CAGE`
    fn format_plain(&self) -> String {
        self.results
            .iter()
            .map(|r| {
                let parts = r
                    .part_numbers
                    .iter()
                    .map(|p| p.part_number.as_str())
                    .collect::<Vec<_>>()
                    .join(",");
                let cage = r
                    .manufacturer
                    .as_ref()
                    .and_then(ManufacturerInfo::cage_code)
                    .unwrap_or_default();
                tsv_row(&[
                    r.item.nsn.as_str(),
                    r.item.item_name.as_str(),
                    parts.as_str(),
                    cage,
                ])
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn manufacturer_name(result: &CompositeResult) -> Option<String> {
    let info = result.manufacturer.as_ref()?;
    let code = info.cage_code()?;
    Some(match &info.address {
        Some(address) if !address.company_name.is_empty() => {
            format!("{} ({code})", address.company_name)
        }
        _ => code.to_string(),
    })
}

/// Full single-item view.
fn render_detail(result: &CompositeResult) -> String {
    let item = &result.item;
    let mut layout = HumanLayout::new();
    layout
        .title(&format!("{}  {}", item.nsn, item.item_name))
        .kv_opt("Description", Some(item.description.as_str()))
        .kv_opt("NIIN", item.niin.as_deref())
        .kv_opt("Supply class", item.supply_class.as_deref())
        .kv_opt("Supply group", item.fsg.as_deref())
        .kv_opt("Unit of issue", item.unit_of_issue.as_deref())
        .kv_opt(
            "Unit price",
            item.unit_price.map(|p| format!("{p:.2}")).as_deref(),
        )
        .kv_opt("DEMIL", item.demil_code.as_deref())
        .kv_opt("Shelf life", item.shelf_life.as_deref())
        .kv_opt("Security", item.security_code.as_deref());

    if !result.part_numbers.is_empty() {
        layout.blank().section("Part numbers");
        for part in &result.part_numbers {
            let mut line = format!("{}  CAGE {}", part.part_number, part.cage_code);
            if let Some(rncc) = &part.reference_type {
                line.push_str(&format!("  RNCC {rncc}"));
            }
            layout.bullet(&line);
        }
    }

    if let Some(rule) = &result.usage_rule {
        layout
            .blank()
            .section("Usage rule")
            .kv_opt("Supply", Some(rule.supply_code.as_str()))
            .kv_opt("Acquisition", Some(rule.acquisition_code.as_str()))
            .kv_opt("Recoverability", Some(rule.recoverability_code.as_str()))
            .kv_opt("Material control", Some(rule.material_control.as_str()))
            .kv_opt("Essentiality", Some(rule.essentiality_code.as_str()));
    }

    if let Some(mgmt) = &result.management {
        layout
            .blank()
            .section("Management")
            .kv_opt("Control code", Some(mgmt.management_control_code.as_str()))
            .kv_opt("AAC", Some(mgmt.acquisition_advice_code.as_str()))
            .kv_opt("Source of supply", Some(mgmt.source_of_supply.as_str()))
            .kv("Lead time (days)", &mgmt.lead_time_days.to_string())
            .kv("Reorder point", &mgmt.reorder_point.to_string())
            .kv("Reorder quantity", &mgmt.reorder_quantity.to_string());
    }

    if let Some(info) = &result.manufacturer {
        layout.blank().section("Manufacturer");
        push_manufacturer(&mut layout, info);
    }

    layout.build()
}

fn push_manufacturer(layout: &mut HumanLayout, info: &ManufacturerInfo) {
    layout.kv_opt("CAGE", info.cage_code());
    if let Some(address) = &info.address {
        layout
            .kv_opt("Company", Some(address.company_name.as_str()))
            .kv_opt("Address", Some(postal_line(address).as_str()))
            .kv_opt("Phone", Some(address.phone.as_str()));
    }
    if let Some(status) = &info.status {
        layout
            .kv_opt("Status", Some(status.status.as_str()))
            .kv_opt("Type", status.cage_type.as_deref())
            .kv_opt(
                "Effective",
                status.effective_date.map(|d| d.to_string()).as_deref(),
            );
    }
}

fn postal_line(address: &ManufacturerAddress) -> String {
    [
        address.address_line1.as_str(),
        address.address_line2.as_str(),
        address.city.as_str(),
        address.state.as_str(),
        address.zip_code.as_str(),
        address.country.as_str(),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(", ")
}

/// Manufacturer blocks for one CAGE query.
#[derive(Debug, Clone, Serialize)]
pub struct ManufacturerResults {
    pub query: String,
    pub total: usize,
    pub results: Vec<ManufacturerInfo>,
}

impl ManufacturerResults {
    pub fn new(query: impl Into<String>, mut results: Vec<ManufacturerInfo>, limit: usize) -> Self {
        let total = results.len();
        results.truncate(limit);
        Self {
            query: query.into(),
            total,
            results,
        }
    }

    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        if self.total > self.results.len() {
            vec![format!(
                "showing {} of {} manufacturers; raise --limit to see more",
                self.results.len(),
                self.total
            )]
        } else {
            Vec::new()
        }
    }
}

impl Formattable for ManufacturerResults {
    fn format_human(&self) -> String {
        let mut layout = HumanLayout::new();
        let noun = if self.total == 1 { "manufacturer" } else { "manufacturers" };
        layout.title(&format!("{} {noun} for '{}'", self.total, self.query));
        for (i, info) in self.results.iter().enumerate() {
            if i > 0 {
                layout.blank();
            }
            push_manufacturer(&mut layout, info);
        }
        layout.build()
    }

    /// `CAGE<TAB>COMPANY<TAB>CITY<TAB>STATUS`
    fn format_plain(&self) -> String {
        self.results
            .iter()
            .map(|info| {
                let (company, city) = info
                    .address
                    .as_ref()
                    .map_or(("", ""), |a| (a.company_name.as_str(), a.city.as_str()));
                let status = info.status.as_ref().map_or("", |s| s.status.as_str());
                tsv_row(&[info.cage_code().unwrap_or_default(), company, city, status])
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
