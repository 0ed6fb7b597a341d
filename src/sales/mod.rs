pub mod calendar;
pub mod coercion;
mod field;
mod import_log;
mod master_file;
pub mod reader;
mod record;
pub mod region;

/// Canonical text form of a sales date
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub use coercion::RegionSource;
pub use field::{Field, FieldText, InvalidField};
pub use import_log::{normalize_path, ImportLog};
pub use master_file::MasterFile;
pub use record::{SaleRecord, SalesList};
pub use region::Region;
