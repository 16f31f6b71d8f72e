//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - run() function to execute the command

use clap::Subcommand;

pub mod cage;
pub mod name;
pub mod nsn;
pub mod part;
pub mod search;
pub mod stats;

use crate::app::AppContext;
use crate::error::Result;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search by NSN, part number or item name, whichever the query looks like
    Search(search::SearchArgs),

    /// Look up one item by exact NSN (XXXX-XX-XXX-XXXX)
    Nsn(nsn::NsnArgs),

    /// Items referencing an exact part number
    Part(part::PartArgs),

    /// Items whose name or description contains every query word
    Name(name::NameArgs),

    /// Manufacturer by CAGE code, or by company name keywords
    Cage(cage::CageArgs),

    /// Loaded record counts per dataset
    Stats(stats::StatsArgs),
}

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Search(args) => search::run(ctx, args),
        Commands::Nsn(args) => nsn::run(ctx, args),
        Commands::Part(args) => part::run(ctx, args),
        Commands::Name(args) => name::run(ctx, args),
        Commands::Cage(args) => cage::run(ctx, args),
        Commands::Stats(args) => stats::run(ctx, args),
    }
}
