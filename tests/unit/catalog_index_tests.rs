use publog::CatalogError;
use publog::catalog::{CatalogIndex, CatalogItem, ManufacturerAddress, PartNumberRef};
use publog::test_utils::fixtures::sample_index;

const CAMERA: &str = "5820-01-546-5288";

#[test]
fn camera_scenario() {
    let index = CatalogIndex::new();
    index.load_items([CatalogItem::new(CAMERA, "CAMERA, TELEVISION")]);

    let result = index.search_by_nsn(CAMERA).unwrap();
    assert_eq!(result.item.item_name, "CAMERA, TELEVISION");
    assert!(result.part_numbers.is_empty());
    assert!(result.manufacturer.is_none());

    let by_name = index.search_by_name("camera").unwrap();
    assert!(by_name.iter().any(|r| r.item.nsn == CAMERA));

    let err = index.search_by_name("xyz").unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { .. }));
}

#[test]
fn item_search_requires_every_word() {
    let index = sample_index();
    let results = index.search_by_name("night vision").unwrap();
    let names: Vec<&str> = results.iter().map(|r| r.item.item_name.as_str()).collect();
    assert_eq!(names, vec!["NIGHT VISION GOGGLES"]);

    let vision = index.search_by_name("vision").unwrap();
    assert_eq!(vision.len(), 2);
}

#[test]
fn manufacturer_search_accepts_any_word() {
    let index = sample_index();
    let results = index.search_manufacturer_by_name("night standards").unwrap();
    let mut codes: Vec<&str> = results.iter().filter_map(|m| m.cage_code()).collect();
    codes.sort_unstable();
    assert_eq!(codes, vec!["1AB23", "2CD45", "80205"]);
}

#[test]
fn identifiers_are_exact() {
    let index = sample_index();
    assert!(index.search_by_nsn(CAMERA).is_ok());
    assert!(index.search_by_nsn("5820015465288").unwrap_err().is_not_found());
    assert!(index.search_by_nsn("5820-01-546-5288 ").unwrap_err().is_not_found());
    assert!(index.search_by_part_number("a3256371").unwrap_err().is_not_found());
    assert!(index.search_manufacturer_by_code("1ab23").unwrap_err().is_not_found());
}

#[test]
fn reload_is_monotonic_and_last_write_wins() {
    let items: Vec<CatalogItem> = (0..50)
        .map(|n| CatalogItem::new(format!("5305-00-000-{n:04}"), format!("SCREW {n}")))
        .collect();

    let index = CatalogIndex::new();
    index.load_items(items.clone());
    assert_eq!(index.stats().items, 50);
    let before = index.search_by_nsn("5305-00-000-0007").unwrap();

    index.load_items(items);
    assert_eq!(index.stats().items, 50);
    assert_eq!(index.search_by_nsn("5305-00-000-0007").unwrap(), before);
    assert_eq!(index.search_by_name("screw").unwrap().len(), 50);

    index.load_items([CatalogItem::new("5305-00-000-0007", "BOLT, MACHINE")]);
    assert_eq!(index.stats().items, 50);
    assert_eq!(
        index.search_by_nsn("5305-00-000-0007").unwrap().item.item_name,
        "BOLT, MACHINE"
    );
}

#[test]
fn composite_shows_one_manufacturer_in_part_order() {
    let index = sample_index();
    let goggles = index.search_by_nsn("5855-01-228-0937").unwrap();
    assert_eq!(goggles.part_numbers.len(), 2);
    let manufacturer = goggles.manufacturer.unwrap();
    assert_eq!(manufacturer.cage_code(), Some("1AB23"));
    assert!(manufacturer.status.is_some());
    assert_eq!(goggles.usage_rule.unwrap().supply_code, "J");
    assert_eq!(goggles.management.unwrap().lead_time_days, 120);
}

#[test]
fn part_number_lookup_across_items() {
    let index = CatalogIndex::new();
    index.load_items([
        CatalogItem::new(CAMERA, "CAMERA, TELEVISION"),
        CatalogItem::new("5820-01-546-5289", "CAMERA, TELEVISION, SPARE"),
    ]);
    index.load_part_numbers([
        PartNumberRef::new("5820-01-546-5289", "1AB23", "TV-100"),
        PartNumberRef::new(CAMERA, "2CD45", "TV-100"),
    ]);
    index.load_addresses([ManufacturerAddress::new("2CD45", "VIDEO SYSTEMS")]);

    let results = index.search_by_part_number("TV-100").unwrap();
    let nsns: Vec<&str> = results.iter().map(|r| r.item.nsn.as_str()).collect();
    assert_eq!(nsns, vec!["5820-01-546-5289", CAMERA]);
    assert!(results[0].manufacturer.is_none());
    assert_eq!(
        results[1].manufacturer.as_ref().and_then(|m| m.cage_code()),
        Some("2CD45")
    );
}

#[test]
fn empty_index_reports_not_found_everywhere() {
    let index = CatalogIndex::new();
    assert!(index.is_empty());
    assert!(index.search_by_nsn(CAMERA).unwrap_err().is_not_found());
    assert!(index.search_by_part_number("TV-100").unwrap_err().is_not_found());
    assert!(index.search_by_name("camera").unwrap_err().is_not_found());
    assert!(index.search_manufacturer_by_code("1AB23").unwrap_err().is_not_found());
    assert!(index.search_manufacturer_by_name("acme").unwrap_err().is_not_found());
    assert_eq!(index.stats().total(), 0);
}

#[test]
fn noise_only_queries_are_invalid() {
    let index = sample_index();
    assert!(matches!(
        index.search_by_name("a, of"),
        Err(CatalogError::InvalidQuery(_))
    ));
}
