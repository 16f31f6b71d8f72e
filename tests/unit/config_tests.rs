use std::fs;
use std::path::PathBuf;

use publog::config::Config;
use publog::test_utils::{TestCase, run_table_tests};

fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

fn load_fixture(relative: &str) -> Config {
    let content = fs::read_to_string(fixture_path(relative)).expect("read fixture");
    Config::from_toml_str(&content).expect("parse config")
}

#[test]
fn config_data_section_from_fixture() -> Result<(), String> {
    let cases = vec![
        TestCase {
            name: "default",
            input: "tests/fixtures/configs/default.toml",
            expected: (
                None,
                "master_nsn_all.txt".to_string(),
                "part_numbers_sample.txt".to_string(),
                None,
                10_000usize,
            ),
            should_panic: false,
        },
        TestCase {
            name: "custom",
            input: "tests/fixtures/configs/custom.toml",
            expected: (
                Some(PathBuf::from("/srv/publog/extract")),
                "V_FLIS_NSN.TAB".to_string(),
                "V_FLIS_PART.TAB".to_string(),
                Some('\t'),
                500usize,
            ),
            should_panic: false,
        },
    ];

    run_table_tests(cases, |relative_path| {
        let config = load_fixture(relative_path);
        (
            config.data.dir,
            config.data.items_file,
            config.data.part_numbers_file,
            config.data.delimiter,
            config.data.batch_size,
        )
    })
}

#[test]
fn config_search_and_robot_from_fixture() -> Result<(), String> {
    let cases = vec![
        TestCase {
            name: "default",
            input: "tests/fixtures/configs/default.toml",
            expected: (25usize, false, true),
            should_panic: false,
        },
        TestCase {
            name: "custom",
            input: "tests/fixtures/configs/custom.toml",
            expected: (5usize, true, false),
            should_panic: false,
        },
        TestCase {
            name: "partial",
            input: "tests/fixtures/configs/partial.toml",
            expected: (100usize, false, true),
            should_panic: false,
        },
    ];

    run_table_tests(cases, |relative_path| {
        let config = load_fixture(relative_path);
        (
            config.search.limit,
            config.robot.compact(),
            config.robot.include_metadata,
        )
    })
}

#[test]
fn partial_file_keeps_data_defaults() {
    let config = load_fixture("tests/fixtures/configs/partial.toml");
    assert_eq!(config.data.addresses_file, "cage_addresses_sample.txt");
    assert_eq!(config.data.batch_size, 10_000);
}

#[test]
fn explicit_file_is_loaded() {
    let config = Config::load(Some(&fixture_path("tests/fixtures/configs/custom.toml")))
        .expect("load custom config");
    assert_eq!(config.data.items_file, "V_FLIS_NSN.TAB");
}

#[test]
fn config_serializes_back_to_toml() {
    let config = load_fixture("tests/fixtures/configs/custom.toml");
    let rendered = toml::to_string(&config).expect("serialize config");
    let reparsed = Config::from_toml_str(&rendered).expect("reparse");
    assert_eq!(reparsed.data.items_file, config.data.items_file);
    assert_eq!(reparsed.search.limit, 5);
}
