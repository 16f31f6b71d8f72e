use std::path::PathBuf;

use tempfile::TempDir;

use crate::catalog::{
    CatalogIndex, CatalogItem, ManagementRecord, ManufacturerAddress, ManufacturerStatus,
    PartNumberRef, UsageRule,
};

/// Pipe-delimited items extract, keyed by FSC + NIIN.
pub const ITEMS_FILE: &str = "\
FSC|NIIN|ITEM_NAME|END_ITEM_NAME|UI|UNIT_PRICE|DEMIL
5820|015465288|CAMERA, TELEVISION|AN/TVS-5|EA|1250.00|A
5855|012280937|NIGHT VISION GOGGLES|AN/PVS-7B|PR|3400.00|D
6540|013340211|VISION CORRECTION LENS||EA|12.50|A
5305|000680510|SCREW, CAP, HEXAGON HEAD||HD|4.10|A
5855||ROW WITHOUT NIIN|||
";

pub const PART_NUMBERS_FILE: &str = "\
NIIN|PART_NUMBER|CAGE_CODE|RNCC
012280937|A3256371|1AB23|3
012280937|A3256371-2|2CD45|5
000680510|MS90725-60|80205|3
013340211|VCL-100|9ZZ99|3
";

pub const ADDRESSES_FILE: &str = "\
CAGE_CODE\tCOMPANY_NAME\tSTREET_ADDRESS_1\tCITY\tSTATE\tZIP\tCOUNTRY
1AB23\tITT NIGHT VISION\t7635 PLANTATION RD\tROANOKE\tVA\t24019\tUSA
2CD45\tNIGHT OPTICS USA\t15182 TRIUMPH LN\tHUNTINGTON BEACH\tCA\t92649\tUSA
80205\tNATIONAL AEROSPACE STANDARDS\t1000 WILSON BLVD\tARLINGTON\tVA\t22209\tUSA
";

pub const STATUSES_FILE: &str = "\
CAGE_CODE|STATUS|TYPE|EFFECTIVE_DATE
1AB23|A|1|2019-06-01
9ZZ99|H|2|20210115
";

pub const RULES_FILE: &str = "\
NIIN|SUPPLY_CODE|ACQUISITION_CODE|RECOVERABILITY_CODE
012280937|J|D|A
";

pub const MANAGEMENT_FILE: &str = "\
NSN|MANAGEMENT_CONTROL_CODE|ACQUISITION_ADVICE_CODE|SOURCE_OF_SUPPLY|LEAD_TIME|REORDER_POINT|REORDER_QUANTITY
5855-01-228-0937|M|D|SMS|120|4|10
";

/// Test fixture providing isolated filesystem environment.
pub struct UnitTestFixture {
    pub temp_dir: TempDir,
    pub data_path: PathBuf,
}

impl Default for UnitTestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitTestFixture {
    #[must_use]
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_path = temp_dir.path().to_path_buf();
        Self {
            temp_dir,
            data_path,
        }
    }

    /// A data directory holding every dataset under its default file name.
    #[must_use]
    pub fn with_sample_catalog() -> Self {
        let fixture = Self::new();
        fixture.create_file("master_nsn_all.txt", ITEMS_FILE);
        fixture.create_file("part_numbers_sample.txt", PART_NUMBERS_FILE);
        fixture.create_file("cage_addresses_sample.txt", ADDRESSES_FILE);
        fixture.create_file("cage_status.txt", STATUSES_FILE);
        fixture.create_file("moe_rules.txt", RULES_FILE);
        fixture.create_file("management.txt", MANAGEMENT_FILE);
        fixture
    }

    /// Create a test file with content.
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.data_path.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }
}

/// The sample catalog loaded straight into an index, no files involved.
#[must_use]
pub fn sample_index() -> CatalogIndex {
    let index = CatalogIndex::new();
    index.load_items([
        CatalogItem::new("5820-01-546-5288", "CAMERA, TELEVISION").with_description("AN/TVS-5"),
        CatalogItem::new("5855-01-228-0937", "NIGHT VISION GOGGLES").with_description("AN/PVS-7B"),
        CatalogItem::new("6540-01-334-0211", "VISION CORRECTION LENS"),
        CatalogItem::new("5305-00-068-0510", "SCREW, CAP, HEXAGON HEAD"),
    ]);
    index.load_part_numbers([
        PartNumberRef::new("5855-01-228-0937", "1AB23", "A3256371"),
        PartNumberRef::new("5855-01-228-0937", "2CD45", "A3256371-2"),
        PartNumberRef::new("5305-00-068-0510", "80205", "MS90725-60"),
        PartNumberRef::new("6540-01-334-0211", "9ZZ99", "VCL-100"),
    ]);
    index.load_addresses([
        ManufacturerAddress::new("1AB23", "ITT NIGHT VISION"),
        ManufacturerAddress::new("2CD45", "NIGHT OPTICS USA"),
        ManufacturerAddress::new("80205", "NATIONAL AEROSPACE STANDARDS"),
    ]);
    index.load_statuses([
        ManufacturerStatus::new("1AB23", "A"),
        ManufacturerStatus::new("9ZZ99", "H"),
    ]);
    index.load_rules([UsageRule {
        nsn: "5855-01-228-0937".to_string(),
        supply_code: "J".to_string(),
        ..UsageRule::default()
    }]);
    index.load_management([ManagementRecord {
        nsn: "5855-01-228-0937".to_string(),
        lead_time_days: 120,
        ..ManagementRecord::default()
    }]);
    index
}

/// `count` synthetic items whose names cycle through a small vocabulary, for
/// load and search benchmarks.
#[must_use]
pub fn synthetic_items(count: usize) -> Vec<CatalogItem> {
    const NOUNS: [&str; 8] = [
        "CAMERA", "GOGGLES", "LENS", "SCREW", "BOLT", "VALVE", "CABLE", "FILTER",
    ];
    const MODIFIERS: [&str; 6] = ["NIGHT", "VISION", "TELEVISION", "HEXAGON", "ASSEMBLY", "ELECTRICAL"];

    (0..count)
        .map(|n| {
            let name = format!(
                "{}, {} {}",
                NOUNS[n % NOUNS.len()],
                MODIFIERS[n % MODIFIERS.len()],
                MODIFIERS[(n / 7) % MODIFIERS.len()]
            );
            let niin = format!("{n:09}");
            let nsn = format!("5820-{}-{}-{}", &niin[..2], &niin[2..5], &niin[5..]);
            CatalogItem::new(nsn, name)
        })
        .collect()
}
