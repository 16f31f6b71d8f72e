use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub robot: RobotConfig,
}

impl Config {
    /// Defaults, then the explicit file (or `PUBLOG_CONFIG`, or the global
    /// config), then `PUBLOG_*` environment overrides.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("PUBLOG_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(CatalogError::MissingConfig(format!(
                    "config file {} does not exist",
                    path.display()
                )));
            }
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        } else if let Some(global) = Self::load_global()? {
            config.merge_patch(global);
        }

        config.apply_env_overrides()?;

        Ok(config)
    }

    /// Parse a full or partial config from TOML text, on top of defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let patch: ConfigPatch = toml::from_str(raw)
            .map_err(|err| CatalogError::Config(format!("parse config: {err}")))?;
        let mut config = Self::default();
        config.merge_patch(patch);
        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let Some(dir) = dirs::config_dir() else {
            return Ok(None);
        };
        Self::load_patch(&dir.join("publog/config.toml"))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path).map_err(|err| {
            CatalogError::Config(format!("read config {}: {err}", path.display()))
        })?;
        let patch = toml::from_str(&raw).map_err(|err| {
            CatalogError::Config(format!("parse config {}: {err}", path.display()))
        })?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.data {
            self.data.merge(patch);
        }
        if let Some(patch) = patch.search {
            self.search.merge(patch);
        }
        if let Some(patch) = patch.robot {
            self.robot.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(value) = env_string("PUBLOG_DATA_DIR") {
            self.data.dir = Some(PathBuf::from(value));
        }
        if let Some(value) = env_string("PUBLOG_DELIMITER") {
            self.data.delimiter = Some(parse_delimiter(&value)?);
        }
        if let Some(value) = env_usize("PUBLOG_BATCH_SIZE")? {
            self.data.batch_size = value;
        }
        if let Some(value) = env_usize("PUBLOG_SEARCH_LIMIT")? {
            self.search.limit = value;
        }
        if let Some(value) = env_bool("PUBLOG_ROBOT_METADATA") {
            self.robot.include_metadata = value;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding the extracted files.
    pub dir: Option<PathBuf>,
    pub items_file: String,
    pub part_numbers_file: String,
    pub addresses_file: String,
    pub statuses_file: String,
    pub rules_file: String,
    pub management_file: String,
    /// Field separator; detected from each file's header when unset.
    pub delimiter: Option<char>,
    /// Records handed to the index per load call.
    pub batch_size: usize,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: None,
            items_file: "master_nsn_all.txt".to_string(),
            part_numbers_file: "part_numbers_sample.txt".to_string(),
            addresses_file: "cage_addresses_sample.txt".to_string(),
            statuses_file: "cage_status.txt".to_string(),
            rules_file: "moe_rules.txt".to_string(),
            management_file: "management.txt".to_string(),
            delimiter: None,
            batch_size: 10_000,
        }
    }
}

impl DataConfig {
    fn merge(&mut self, patch: DataPatch) {
        if let Some(value) = patch.dir {
            self.dir = Some(value);
        }
        if let Some(value) = patch.items_file {
            self.items_file = value;
        }
        if let Some(value) = patch.part_numbers_file {
            self.part_numbers_file = value;
        }
        if let Some(value) = patch.addresses_file {
            self.addresses_file = value;
        }
        if let Some(value) = patch.statuses_file {
            self.statuses_file = value;
        }
        if let Some(value) = patch.rules_file {
            self.rules_file = value;
        }
        if let Some(value) = patch.management_file {
            self.management_file = value;
        }
        if let Some(value) = patch.delimiter {
            self.delimiter = Some(value);
        }
        if let Some(value) = patch.batch_size {
            self.batch_size = value.max(1);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum results shown by list-producing commands.
    pub limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { limit: 25 }
    }
}

impl SearchConfig {
    fn merge(&mut self, patch: SearchPatch) {
        if let Some(value) = patch.limit {
            self.limit = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotConfig {
    /// `json` (pretty) or `compact` (one line).
    pub format: String,
    /// Wrap robot output in the status/timestamp/version envelope.
    pub include_metadata: bool,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            include_metadata: true,
        }
    }
}

impl RobotConfig {
    #[must_use]
    pub fn compact(&self) -> bool {
        self.format.eq_ignore_ascii_case("compact")
    }

    fn merge(&mut self, patch: RobotPatch) {
        if let Some(value) = patch.format {
            self.format = value;
        }
        if let Some(value) = patch.include_metadata {
            self.include_metadata = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub data: Option<DataPatch>,
    pub search: Option<SearchPatch>,
    pub robot: Option<RobotPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DataPatch {
    pub dir: Option<PathBuf>,
    pub items_file: Option<String>,
    pub part_numbers_file: Option<String>,
    pub addresses_file: Option<String>,
    pub statuses_file: Option<String>,
    pub rules_file: Option<String>,
    pub management_file: Option<String>,
    pub delimiter: Option<char>,
    pub batch_size: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SearchPatch {
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RobotPatch {
    pub format: Option<String>,
    pub include_metadata: Option<bool>,
}

/// Accepts a single character or one of `tab`, `pipe`, `comma`.
pub fn parse_delimiter(value: &str) -> Result<char> {
    match value.to_lowercase().as_str() {
        "tab" | "\\t" => Ok('\t'),
        "pipe" => Ok('|'),
        "comma" => Ok(','),
        _ => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(c),
                _ => Err(CatalogError::Config(format!(
                    "invalid delimiter {value:?} (expected one character or tab|pipe|comma)"
                ))),
            }
        }
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

fn env_usize(key: &str) -> Result<Option<usize>> {
    match std::env::var(key) {
        Ok(value) => value
            .parse::<usize>()
            .map(Some)
            .map_err(|err| CatalogError::Config(format!("invalid {key} value {value}: {err}"))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_extracted_file_names() {
        let config = Config::default();
        assert_eq!(config.data.items_file, "master_nsn_all.txt");
        assert_eq!(config.data.part_numbers_file, "part_numbers_sample.txt");
        assert_eq!(config.data.addresses_file, "cage_addresses_sample.txt");
        assert_eq!(config.data.batch_size, 10_000);
        assert!(config.data.delimiter.is_none());
        assert_eq!(config.search.limit, 25);
    }

    #[test]
    fn partial_patch_keeps_other_defaults() {
        let config = Config::from_toml_str(
            r#"
            [data]
            dir = "/srv/publog"
            delimiter = "|"

            [search]
            limit = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.data.dir, Some(PathBuf::from("/srv/publog")));
        assert_eq!(config.data.delimiter, Some('|'));
        assert_eq!(config.data.items_file, "master_nsn_all.txt");
        assert_eq!(config.search.limit, 5);
        assert_eq!(config.robot.format, "json");
    }

    #[test]
    fn zero_batch_size_is_clamped() {
        let config = Config::from_toml_str("[data]\nbatch_size = 0\n").unwrap();
        assert_eq!(config.data.batch_size, 1);
    }

    #[test]
    fn bad_toml_is_a_config_error() {
        let err = Config::from_toml_str("[search]\nlimit = \"many\"\n").unwrap_err();
        assert!(matches!(err, CatalogError::Config(_)));
    }

    #[test]
    fn missing_explicit_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, CatalogError::MissingConfig(_)));
    }

    #[test]
    fn delimiter_names() {
        assert_eq!(parse_delimiter("tab").unwrap(), '\t');
        assert_eq!(parse_delimiter("PIPE").unwrap(), '|');
        assert_eq!(parse_delimiter(";").unwrap(), ';');
        assert!(parse_delimiter("||").is_err());
        assert!(parse_delimiter("").is_err());
    }
}
