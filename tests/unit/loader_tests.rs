use publog::catalog::{CatalogService, tokenize};
use publog::config::DataConfig;
use publog::loader::format_nsn;
use publog::test_utils::fixtures::{ITEMS_FILE, UnitTestFixture};
use publog::test_utils::{TestCase, run_table_tests};

#[test]
fn sample_directory_loads_every_dataset() {
    let fixture = UnitTestFixture::with_sample_catalog();
    let service = CatalogService::new();
    let report = service
        .load_directory(&fixture.data_path, &DataConfig::default())
        .unwrap();

    assert_eq!(report.items.loaded, 4);
    assert_eq!(report.items.skipped, 1);
    assert_eq!(report.part_numbers.loaded, 4);
    assert_eq!(report.addresses.loaded, 3);
    assert_eq!(report.statuses.loaded, 2);
    assert_eq!(report.rules.loaded, 1);
    assert_eq!(report.management.loaded, 1);
    assert_eq!(report.total_skipped(), 1);

    let stats = service.stats();
    assert_eq!(stats.items, 4);
    assert_eq!(stats.part_numbers, 4);
}

#[test]
fn loaded_directory_answers_like_the_in_memory_sample() {
    let fixture = UnitTestFixture::with_sample_catalog();
    let service = CatalogService::new();
    service
        .load_directory(&fixture.data_path, &DataConfig::default())
        .unwrap();

    let goggles = service.search("A3256371").unwrap();
    assert_eq!(goggles.len(), 1);
    let result = &goggles[0];
    assert_eq!(result.item.nsn, "5855-01-228-0937");
    assert_eq!(result.item.unit_of_issue.as_deref(), Some("PR"));
    assert_eq!(result.usage_rule.as_ref().unwrap().recoverability_code, "A");
    assert_eq!(result.management.as_ref().unwrap().reorder_quantity, 10);

    let manufacturer = result.manufacturer.as_ref().unwrap();
    let address = manufacturer.address.as_ref().unwrap();
    assert_eq!(address.city, "ROANOKE");
    assert_eq!(manufacturer.status.as_ref().unwrap().status, "A");
}

#[test]
fn configured_file_names_and_delimiter() {
    let fixture = UnitTestFixture::new();
    fixture.create_file(
        "V_FLIS_NSN.TAB",
        &ITEMS_FILE.replace('|', "\t"),
    );
    let config = DataConfig {
        items_file: "V_FLIS_NSN.TAB".to_string(),
        delimiter: Some('\t'),
        ..DataConfig::default()
    };

    let service = CatalogService::new();
    let report = service.load_directory(&fixture.data_path, &config).unwrap();
    assert_eq!(report.items.loaded, 4);
    assert!(!report.part_numbers.present);
    assert!(service.search_by_nsn("5820-01-546-5288").is_ok());
}

#[test]
fn nsn_formatting_cases() -> Result<(), String> {
    let cases = vec![
        TestCase {
            name: "full width",
            input: ("5820", "015465288"),
            expected: "5820-01-546-5288".to_string(),
            should_panic: false,
        },
        TestCase {
            name: "leading zeros dropped by a spreadsheet",
            input: ("5305", "680510"),
            expected: "5305-00-068-0510".to_string(),
            should_panic: false,
        },
        TestCase {
            name: "short class",
            input: ("305", "000680510"),
            expected: "0305-00-068-0510".to_string(),
            should_panic: false,
        },
    ];
    run_table_tests(cases, |(fsc, niin)| format_nsn(fsc, niin))
}

#[test]
fn loaded_names_are_searchable_by_their_tokens() {
    let fixture = UnitTestFixture::with_sample_catalog();
    let service = CatalogService::new();
    service
        .load_directory(&fixture.data_path, &DataConfig::default())
        .unwrap();

    for name in ["CAMERA, TELEVISION", "SCREW, CAP, HEXAGON HEAD"] {
        let words = tokenize(name).join(" ");
        let results = service.search_by_name(&words).unwrap();
        assert!(results.iter().any(|r| r.item.item_name == name), "{name}");
    }
}
