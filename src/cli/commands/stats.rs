//! publog stats - Loaded record counts

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::catalog::CatalogStats;
use crate::cli::output::{Formattable, HumanLayout, emit, tsv_row};
use crate::error::Result;
use crate::loader::LoadReport;

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Include per-file loaded/skipped row counts
    #[arg(long)]
    pub load_report: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsView {
    pub data_dir: PathBuf,
    pub stats: CatalogStats,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_report: Option<LoadReport>,
}

pub fn run(ctx: &AppContext, args: &StatsArgs) -> Result<()> {
    let stats = ctx.service.stats();
    let view = StatsView {
        data_dir: ctx.data_dir.clone(),
        total: stats.total(),
        stats,
        load_report: args.load_report.then_some(ctx.load_report),
    };
    emit(ctx, &view, Vec::new())
}

impl Formattable for StatsView {
    fn format_human(&self) -> String {
        let mut layout = HumanLayout::new();
        layout.title(&format!("Catalog {}", self.data_dir.display()));
        for (name, count) in self.stats.entries() {
            layout.kv(name, &count.to_string());
        }
        layout.kv("total", &self.total.to_string());

        if let Some(report) = &self.load_report {
            layout
                .blank()
                .section("Load report")
                .kv("format", report.format.as_str());
            for (name, dataset) in [
                ("items", report.items),
                ("part_numbers", report.part_numbers),
                ("addresses", report.addresses),
                ("statuses", report.statuses),
                ("rules", report.rules),
                ("management", report.management),
            ] {
                let line = if dataset.present {
                    format!("{} loaded, {} skipped", dataset.loaded, dataset.skipped)
                } else {
                    "not loaded".to_string()
                };
                layout.kv(name, &line);
            }
        }
        layout.build()
    }

    /// `DATASET<TAB>COUNT`, one per table.
    fn format_plain(&self) -> String {
        self.stats
            .entries()
            .into_iter()
            .map(|(name, count)| tsv_row(&[name, count.to_string().as_str()]))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
