use anyhow::{Context as _, Result};
use std::{io::Read, path::Path};

use super::coercion::{coerce_row, region_code_from_file_name};
use super::{RegionSource, SaleRecord};

/// Read all records from a delimited sales file. Rows that don't have exactly three fields are skipped.
pub fn read_sales(
    path: &Path,
    delimiter: u8,
    region_source: RegionSource,
) -> Result<Vec<SaleRecord>> {
    let file =
        std::fs::File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let file_region = match region_source {
        RegionSource::Row => None,
        RegionSource::FileName => Some(region_code_from_file_name(path)),
    };
    read_sales_from(file, delimiter, file_region.as_deref())
        .with_context(|| format!("Failed to read {}", path.display()))
}

pub fn read_sales_from(
    input_stream: impl Read,
    delimiter: u8,
    file_region: Option<&str>,
) -> Result<Vec<SaleRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(input_stream);
    let mut records = vec![];
    for row in reader.records() {
        if let Some(record) = coerce_row(&row?, file_region) {
            records.push(record);
        }
    }
    Ok(records)
}
