//! publog cage - Manufacturer lookup

use clap::Args;

use crate::app::AppContext;
use crate::cli::formatters::ManufacturerResults;
use crate::cli::output::emit;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct CageArgs {
    /// Five-character CAGE code, or company name keywords
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Only match by company name, even for code-shaped queries
    #[arg(long)]
    pub by_name: bool,

    /// Maximum number of results (0 for all)
    #[arg(long, short)]
    pub limit: Option<usize>,
}

pub fn run(ctx: &AppContext, args: &CageArgs) -> Result<()> {
    let query = args.query.join(" ");
    let results = if args.by_name {
        ctx.service.search_manufacturer_by_name(&query)?
    } else {
        ctx.service.search_manufacturer(&query)?
    };
    let page = ManufacturerResults::new(query, results, ctx.limit(args.limit));
    let warnings = page.warnings();
    emit(ctx, &page, warnings)
}
