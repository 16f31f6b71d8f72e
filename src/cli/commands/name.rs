//! publog name - Keyword search over item names and descriptions

use clap::Args;

use crate::app::AppContext;
use crate::cli::formatters::SearchResults;
use crate::cli::output::emit;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct NameArgs {
    /// Keywords; every one must match
    #[arg(required = true, num_args = 1..)]
    pub words: Vec<String>,

    /// Maximum number of results (0 for all)
    #[arg(long, short)]
    pub limit: Option<usize>,
}

pub fn run(ctx: &AppContext, args: &NameArgs) -> Result<()> {
    let query = args.words.join(" ");
    let results = ctx.service.search_by_name(&query)?;
    let page = SearchResults::new(query, "name", results, ctx.limit(args.limit));
    let warnings = page.warnings();
    emit(ctx, &page, warnings)
}
