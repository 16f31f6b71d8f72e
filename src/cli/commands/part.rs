//! publog part - Exact part-number lookup

use clap::Args;

use crate::app::AppContext;
use crate::cli::formatters::SearchResults;
use crate::cli::output::emit;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct PartArgs {
    /// Manufacturer part number, matched exactly
    pub part_number: String,

    /// Maximum number of results (0 for all)
    #[arg(long, short)]
    pub limit: Option<usize>,
}

pub fn run(ctx: &AppContext, args: &PartArgs) -> Result<()> {
    let results = ctx.service.search_by_part_number(&args.part_number)?;
    let page = SearchResults::new(&args.part_number, "part", results, ctx.limit(args.limit));
    let warnings = page.warnings();
    emit(ctx, &page, warnings)
}
