use anyhow::{anyhow, ensure, Context as _, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::report::ReportFormat;
use crate::sales::RegionSource;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding the master file, the import log and the files to import
    pub data_dir: PathBuf,
    /// Relative to `data_dir`
    pub master_file: PathBuf,
    /// Relative to `data_dir`
    pub import_log: PathBuf,
    pub delimiter: char,
    pub import_region_source: RegionSource,
    pub report: ReportFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("p01_files"),
            master_file: PathBuf::from("all_sales.csv"),
            import_log: PathBuf::from("imported_files.txt"),
            delimiter: ',',
            import_region_source: RegionSource::Row,
            report: ReportFormat::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        log::info!("Loading config from {}...", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        log::info!("Loading config...done");
        Ok(config)
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.delimiter_byte()?;
        ensure!(
            !self.report.decimal_separator.is_empty(),
            "The decimal separator can't be empty"
        );
        ensure!(
            self.report.decimal_separator != self.report.thousands_separator,
            "Decimal separator and thousands separator must differ, both are '{}'",
            self.report.decimal_separator,
        );
        Ok(())
    }

    pub fn delimiter_byte(&self) -> Result<u8> {
        let delimiter = u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| anyhow!("Delimiter '{}' must be an ASCII character", self.delimiter))?;
        ensure!(
            !matches!(delimiter, b'"' | b'\n' | b'\r'),
            "Delimiter can't be a quote or a line break"
        );
        Ok(delimiter)
    }

    pub fn master_file_path(&self) -> PathBuf {
        self.data_dir.join(&self.master_file)
    }

    pub fn import_log_path(&self) -> PathBuf {
        self.data_dir.join(&self.import_log)
    }
}
