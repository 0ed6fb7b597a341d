use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

use super::{reader::read_sales, RegionSource, SalesList};

/// The file holding the complete set of sales. It is always rewritten in full.
#[derive(Debug, Clone)]
pub struct MasterFile {
    path: PathBuf,
    delimiter: u8,
}

impl MasterFile {
    pub fn new(path: PathBuf, delimiter: u8) -> Self {
        Self { path, delimiter }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> Result<bool> {
        Ok(self.path.try_exists()?)
    }

    /// Returns an empty list if the file doesn't exist yet
    pub fn load_all(&self) -> Result<SalesList> {
        log::info!("Loading sales from {}...", self.path.display());
        if !self.exists()? {
            log::info!("Loading sales...not found, starting empty");
            return Ok(SalesList::new_empty());
        }

        let records = read_sales(&self.path, self.delimiter, RegionSource::Row)?;

        log::info!("Loading sales...done ({} records)", records.len());
        Ok(SalesList::from(records))
    }

    /// Overwrites the file in place. This isn't atomic, a failure halfway leaves a truncated file.
    pub fn save_all(&self, sales: &SalesList) -> Result<()> {
        log::info!("Saving sales to {}...", self.path.display());

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .delimiter(self.delimiter)
            .from_path(&self.path)
            .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
        for record in sales.iter() {
            writer.write_record(record.to_row())?;
        }
        writer.flush()?;

        log::info!("Saving sales...done ({} records)", sales.len());
        Ok(())
    }
}
