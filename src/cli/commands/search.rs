//! publog search - Universal lookup

use clap::Args;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::formatters::SearchResults;
use crate::cli::output::emit;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// NSN, part number or item-name keywords
    pub query: String,

    /// Maximum number of results (0 for all)
    #[arg(long, short)]
    pub limit: Option<usize>,
}

pub fn run(ctx: &AppContext, args: &SearchArgs) -> Result<()> {
    let results = ctx.service.search(&args.query)?;
    debug!(target: "search", query = %args.query, matches = results.len(), "search complete");

    let page = SearchResults::new(args.query.trim(), "search", results, ctx.limit(args.limit));
    let warnings = page.warnings();
    emit(ctx, &page, warnings)
}
