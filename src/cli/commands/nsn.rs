//! publog nsn - Exact NSN lookup

use clap::Args;

use crate::app::AppContext;
use crate::cli::formatters::SearchResults;
use crate::cli::output::emit;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct NsnArgs {
    /// National Stock Number, dashes included
    pub nsn: String,
}

pub fn run(ctx: &AppContext, args: &NsnArgs) -> Result<()> {
    let result = ctx.service.search_by_nsn(&args.nsn)?;
    let page = SearchResults::new(&args.nsn, "nsn", vec![result], 1);
    emit(ctx, &page, Vec::new())
}
