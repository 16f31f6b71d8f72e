use std::path::PathBuf;

use tracing::debug;

use crate::catalog::CatalogService;
use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::error::{CatalogError, Result};
use crate::loader::LoadReport;

pub struct AppContext {
    pub config: Config,
    pub data_dir: PathBuf,
    pub service: CatalogService,
    pub load_report: LoadReport,
    pub robot_mode: bool,
    pub output_format: OutputFormat,
    pub verbosity: u8,
}

impl AppContext {
    /// Resolve configuration and load the data directory into a fresh index.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = Config::load(cli.config.as_deref())?;
        let data_dir = resolve_data_dir(cli, &config)?;
        debug!(data_dir = %data_dir.display(), "resolved data directory");

        let service = CatalogService::new();
        let load_report = service.load_directory(&data_dir, &config.data)?;

        Ok(Self {
            config,
            data_dir,
            service,
            load_report,
            robot_mode: cli.robot,
            output_format: cli.output_format(),
            verbosity: cli.verbose,
        })
    }

    /// `--limit` when given, else the configured default. Zero means no limit.
    #[must_use]
    pub fn limit(&self, requested: Option<usize>) -> usize {
        match requested.unwrap_or(self.config.search.limit) {
            0 => usize::MAX,
            n => n,
        }
    }
}

fn resolve_data_dir(cli: &Cli, config: &Config) -> Result<PathBuf> {
    cli.data_dir
        .clone()
        .or_else(|| config.data.dir.clone())
        .ok_or_else(|| {
            CatalogError::MissingConfig(
                "no data directory (use --data-dir, PUBLOG_DATA_DIR or [data] dir)".to_string(),
            )
        })
}
