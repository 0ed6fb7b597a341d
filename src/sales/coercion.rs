use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use csv::StringRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Field, Region, SaleRecord, DATE_FORMAT};

const FIELDS_PER_ROW: usize = 3;

/// Where the region of an imported row comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionSource {
    /// Take the region from the row's third column. Used for files written by this tool.
    #[default]
    Row,
    /// Derive the region from the source file name (`sales_q1_2024_w.csv` is region `w`) and
    /// ignore the third column. Used for quarterly source files.
    FileName,
}

/// Convert a raw row into a record. Returns None if the row doesn't have exactly three fields.
/// Fields that fail to parse are kept as [Field::Invalid] instead of failing the row.
///
/// If `file_region` is set, it is used as the region code instead of the row's third column.
pub fn coerce_row(row: &StringRecord, file_region: Option<&str>) -> Option<SaleRecord> {
    if row.len() != FIELDS_PER_ROW {
        return None;
    }
    let region = file_region.unwrap_or(&row[2]);
    Some(SaleRecord {
        amount: coerce_amount(&row[0]),
        sales_date: coerce_date(&row[1]),
        region: coerce_region(region),
    })
}

/// Parse an amount in plain (`12.50`) or scientific (`1.25e1`) notation
pub fn parse_decimal(raw: &str) -> Result<Decimal, rust_decimal::Error> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed))
}

pub fn coerce_amount(raw: &str) -> Field<Decimal> {
    match parse_decimal(raw) {
        Ok(amount) => Field::Valid(amount),
        Err(err) => Field::invalid(raw, format!("Invalid amount: {err}")),
    }
}

pub fn coerce_date(raw: &str) -> Field<NaiveDate> {
    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(date) => Field::Valid(date),
        Err(err) => Field::invalid(raw, format!("Invalid date: {err}")),
    }
}

pub fn coerce_region(raw: &str) -> Field<Region> {
    match Region::from_code(raw) {
        Some(region) => Field::Valid(region),
        None => Field::invalid(raw, "Unknown region code"),
    }
}

/// The region code encoded in a source file name: the first character of the last
/// `_`-separated part, e.g. `w` for `sales_q1_2024_w.csv`.
pub fn region_code_from_file_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    file_name
        .rsplit('_')
        .next()
        .and_then(|last_part| last_part.chars().next())
        .map(String::from)
        .unwrap_or_default()
}
