use std::path::PathBuf;

use clap::Parser;

use publog::cli::{Cli, Commands, OutputFormat};

fn parse_cli(args: &[&str]) -> Cli {
    let mut argv = vec!["publog"];
    argv.extend_from_slice(args);
    Cli::parse_from(argv)
}

fn parse(args: &[&str]) -> Commands {
    parse_cli(args).command
}

#[test]
fn parse_search_with_limit() {
    match parse(&["search", "night vision", "--limit", "3"]) {
        Commands::Search(args) => {
            assert_eq!(args.query, "night vision");
            assert_eq!(args.limit, Some(3));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parse_nsn() {
    match parse(&["nsn", "5820-01-546-5288"]) {
        Commands::Nsn(args) => assert_eq!(args.nsn, "5820-01-546-5288"),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parse_part_default_limit_is_unset() {
    match parse(&["part", "MS90725-60"]) {
        Commands::Part(args) => {
            assert_eq!(args.part_number, "MS90725-60");
            assert!(args.limit.is_none());
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parse_name_collects_words() {
    match parse(&["name", "night", "vision", "-l", "0"]) {
        Commands::Name(args) => {
            assert_eq!(args.words, vec!["night", "vision"]);
            assert_eq!(args.limit, Some(0));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parse_cage_by_name() {
    match parse(&["cage", "--by-name", "ITT", "NIGHT"]) {
        Commands::Cage(args) => {
            assert!(args.by_name);
            assert_eq!(args.query, vec!["ITT", "NIGHT"]);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parse_stats_load_report() {
    match parse(&["stats", "--load-report"]) {
        Commands::Stats(args) => assert!(args.load_report),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn global_flags_after_subcommand() {
    let cli = parse_cli(&["stats", "--robot", "--data-dir", "/data", "-vv"]);
    assert!(cli.robot);
    assert_eq!(cli.data_dir, Some(PathBuf::from("/data")));
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.output_format(), OutputFormat::Json);
}

#[test]
fn plain_output_format() {
    let cli = parse_cli(&["--plain", "stats"]);
    assert_eq!(cli.output_format(), OutputFormat::Plain);
    assert!(Cli::try_parse_from(["publog", "--plain", "--robot", "stats"]).is_err());
}

#[test]
fn name_requires_a_word() {
    assert!(Cli::try_parse_from(["publog", "name"]).is_err());
}
