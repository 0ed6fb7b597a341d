use anyhow::{anyhow, Result};
use chrono::{Datelike as _, NaiveDate};
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::config::Config;
use crate::report::{render_report, ReportFormat};
use crate::sales::{
    calendar::max_day_of, coercion::parse_decimal, reader::read_sales, region, ImportLog,
    MasterFile, Region, RegionSource, SaleRecord, SalesList, DATE_FORMAT,
};
use crate::terminal::{LineWriter, Prompter};

/// Naming convention of the files to import. Only the extension is checked.
pub const NAMING_CONVENTION: &str = "sales_qn_yyyy_r.csv";
const IMPORT_FILE_EXTENSION: &str = ".csv";

const MIN_YEAR: i32 = 2000;
const MAX_YEAR: i32 = 2999;

#[derive(Debug, PartialEq, Eq)]
#[must_use]
pub enum ImportOutcome {
    /// The file name doesn't have the expected extension. The file wasn't read.
    BadFileName,
    /// The file is in the import log. The file wasn't read.
    AlreadyImported,
    /// The file had no usable rows. It isn't logged and can be imported again.
    NoValidData,
    Imported { count: usize },
}

pub struct SalesManager {
    sales: SalesList,
    master_file: MasterFile,
    import_log: ImportLog,
    import_dir: PathBuf,
    import_delimiter: u8,
    import_region_source: RegionSource,
    report_format: ReportFormat,
}

impl SalesManager {
    /// Load the master file. A missing master file gives an empty sales list.
    pub fn load(config: &Config) -> Result<Self> {
        let mut manager = Self::new_empty(config)?;
        manager.sales = manager.master_file.load_all()?;
        Ok(manager)
    }

    pub fn new_empty(config: &Config) -> Result<Self> {
        config.validate()?;
        let delimiter = config.delimiter_byte()?;
        Ok(Self {
            sales: SalesList::new_empty(),
            master_file: MasterFile::new(config.master_file_path(), delimiter),
            import_log: ImportLog::new(config.import_log_path()),
            import_dir: config.data_dir.clone(),
            import_delimiter: delimiter,
            import_region_source: config.import_region_source,
            report_format: config.report.clone(),
        })
    }

    pub fn sales(&self) -> &SalesList {
        &self.sales
    }

    /// Ask for amount, year, month, day and region, one after the other
    pub fn add_by_components(&mut self, prompter: &mut dyn Prompter) -> Result<&SaleRecord> {
        self.collect_record(prompter, &ComponentDate)
    }

    /// Ask for amount, the date as `YYYY-MM-DD`, and region
    pub fn add_by_date(&mut self, prompter: &mut dyn Prompter) -> Result<&SaleRecord> {
        self.collect_record(prompter, &FreeTextDate)
    }

    /// Every field is asked for again until it is valid. Only fails if the prompter fails.
    pub fn collect_record(
        &mut self,
        prompter: &mut dyn Prompter,
        date_acquisition: &dyn DateAcquisition,
    ) -> Result<&SaleRecord> {
        let amount = prompt_until_valid(prompter, "Amount", parse_amount)?;
        let sales_date = date_acquisition.acquire(prompter)?;
        let region = prompt_until_valid(
            prompter,
            &format!("Region {}", region::valid_codes_display()),
            parse_region,
        )?;

        self.sales.push(SaleRecord::new(amount, sales_date, region));
        log::debug!("Added sale of {amount} on {sales_date} in {region}");
        prompter.info(&format!(
            "Sales for {} is added.",
            sales_date.format(DATE_FORMAT)
        ));
        self.sales
            .last()
            .ok_or_else(|| anyhow!("Sales list is empty right after adding a record"))
    }

    /// Import a file from the data directory. File system errors are returned as `Err` and
    /// leave both the sales list and the import log unchanged.
    pub fn import_from_file(&mut self, file_name: &str) -> Result<ImportOutcome> {
        if !file_name.ends_with(IMPORT_FILE_EXTENSION) {
            return Ok(ImportOutcome::BadFileName);
        }
        let path = self.import_dir.join(file_name);
        if self.import_log.already_imported(&path)? {
            log::info!("Skipping {}, it was already imported", path.display());
            return Ok(ImportOutcome::AlreadyImported);
        }

        let records = read_sales(&path, self.import_delimiter, self.import_region_source)?;
        if records.is_empty() {
            log::warn!("{} has no valid rows", path.display());
            return Ok(ImportOutcome::NoValidData);
        }

        self.import_log.record_imported(&path)?;
        let count = records.len();
        self.sales.extend(records);
        log::info!("Imported {count} records from {}", path.display());
        Ok(ImportOutcome::Imported { count })
    }

    /// Returns false if there was nothing to show
    pub fn view(&self, writer: &impl LineWriter) -> bool {
        render_report(&self.sales, &self.report_format, writer)
    }

    pub fn save(&self) -> Result<()> {
        self.master_file.save_all(&self.sales)
    }
}

/// How the date of a manually entered sale is asked for
pub trait DateAcquisition {
    fn acquire(&self, prompter: &mut dyn Prompter) -> Result<NaiveDate>;
}

/// Year, month and day as separate prompts
pub struct ComponentDate;

impl DateAcquisition for ComponentDate {
    fn acquire(&self, prompter: &mut dyn Prompter) -> Result<NaiveDate> {
        let year = prompt_until_valid(
            prompter,
            &format!("Year ({MIN_YEAR}-{MAX_YEAR})"),
            parse_year,
        )?;
        let month = prompt_until_valid(prompter, "Month (1-12)", parse_month)?;
        let max_day = max_day_of(year, month);
        let day = prompt_until_valid(prompter, &format!("Day (1-{max_day})"), |input| {
            parse_day(input, max_day)
        })?;
        NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| anyhow!("{year}-{month}-{day} is not a calendar date"))
    }
}

/// One `YYYY-MM-DD` prompt
pub struct FreeTextDate;

impl DateAcquisition for FreeTextDate {
    fn acquire(&self, prompter: &mut dyn Prompter) -> Result<NaiveDate> {
        prompt_until_valid(prompter, "Date (YYYY-MM-DD)", parse_sales_date)
    }
}

fn prompt_until_valid<T>(
    prompter: &mut dyn Prompter,
    prompt: &str,
    parse: impl Fn(&str) -> Result<T, String>,
) -> Result<T> {
    loop {
        let input = prompter.prompt(prompt)?;
        match parse(&input) {
            Ok(value) => return Ok(value),
            Err(message) => prompter.warn(&message),
        }
    }
}

pub fn parse_amount(input: &str) -> Result<Decimal, String> {
    let amount = parse_decimal(input)
        .map_err(|_| "Invalid input. Please enter a valid amount.".to_string())?;
    if amount <= Decimal::ZERO {
        return Err("Amount must be greater than zero.".to_string());
    }
    Ok(amount)
}

pub fn parse_year(input: &str) -> Result<i32, String> {
    let year: i32 = input
        .trim()
        .parse()
        .map_err(|_| "Invalid input. Please enter a valid year.".to_string())?;
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(format!("Year must be between {MIN_YEAR} and {MAX_YEAR}."));
    }
    Ok(year)
}

pub fn parse_month(input: &str) -> Result<u32, String> {
    let month: u32 = input
        .trim()
        .parse()
        .map_err(|_| "Invalid input. Please enter a valid month.".to_string())?;
    if !(1..=12).contains(&month) {
        return Err("Month must be between 1 and 12.".to_string());
    }
    Ok(month)
}

pub fn parse_day(input: &str, max_day: u32) -> Result<u32, String> {
    let day: u32 = input
        .trim()
        .parse()
        .map_err(|_| "Invalid input. Please enter a valid day.".to_string())?;
    if !(1..=max_day).contains(&day) {
        return Err(format!("Day must be between 1 and {max_day}."));
    }
    Ok(day)
}

pub fn parse_region(input: &str) -> Result<Region, String> {
    Region::from_code(&input.trim().to_lowercase()).ok_or_else(|| {
        format!(
            "Region must be one of the following: {}.",
            region::valid_codes_display()
        )
    })
}

pub fn parse_sales_date(input: &str) -> Result<NaiveDate, String> {
    let input = input.trim();
    let date = NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|_| format!("{input} is not in a valid date format."))?;
    if !(MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
        return Err(format!(
            "Year of the date must be between {MIN_YEAR} and {MAX_YEAR}."
        ));
    }
    Ok(date)
}
