use chrono::Datelike as _;
use console::{pad_str, Alignment};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::sales::{calendar::quarter_of, region, Field, SaleRecord, SalesList};
use crate::terminal::LineWriter;

const INDEX_WIDTH: usize = 5;
const COLUMN_WIDTH: usize = 15;
const LINE_WIDTH: usize = INDEX_WIDTH + 4 * COLUMN_WIDTH;
const TOTAL_OVERFLOW: &str = "overflow";

/// How currency amounts are rendered in the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportFormat {
    pub currency_symbol: String,
    pub thousands_separator: String,
    pub decimal_separator: String,
}

impl Default for ReportFormat {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            thousands_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
        }
    }
}

/// Round to cents, with exact halves going away from zero
pub fn round_half_up(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub fn format_currency(amount: Decimal, format: &ReportFormat) -> String {
    let rounded = round_half_up(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = format!("{:.2}", rounded.abs());
    let (integer_part, fraction_part) = digits.split_once('.').unwrap_or((&digits, "00"));
    format!(
        "{sign}{}{}{}{fraction_part}",
        format.currency_symbol,
        group_thousands(integer_part, &format.thousands_separator),
        format.decimal_separator,
    )
}

fn group_thousands(digits: &str, separator: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(digit);
    }
    grouped
}

/// Sum of all valid amounts, each rounded to cents first. Invalid amounts don't count.
/// Returns None if the sum doesn't fit into a [Decimal].
pub fn report_total(sales: &SalesList) -> Option<Decimal> {
    sales
        .iter()
        .filter_map(|record| record.amount.valid())
        .try_fold(Decimal::ZERO, |total, amount| {
            total.checked_add(round_half_up(*amount))
        })
}

/// Writes the sales table followed by the total. Returns false without writing anything if
/// there are no sales.
pub fn render_report(sales: &SalesList, format: &ReportFormat, writer: &impl LineWriter) -> bool {
    if sales.is_empty() {
        return false;
    }

    writer.write_line(&format!(
        "{}{}{}{}{}",
        pad_str("Index", INDEX_WIDTH, Alignment::Left, None),
        pad_str("Date", COLUMN_WIDTH, Alignment::Left, None),
        pad_str("Quarter", COLUMN_WIDTH, Alignment::Left, None),
        pad_str("Region", COLUMN_WIDTH, Alignment::Left, None),
        pad_str("Amount", COLUMN_WIDTH, Alignment::Right, None),
    ));
    writer.write_line(&"-".repeat(LINE_WIDTH));
    for (index, record) in sales.iter().enumerate() {
        writer.write_line(&render_row(index + 1, record, format));
    }
    writer.write_line(&"-".repeat(LINE_WIDTH));
    let total = match report_total(sales) {
        Some(total) => format_currency(total, format),
        None => {
            log::warn!("Total of {} sales is too large to compute", sales.len());
            TOTAL_OVERFLOW.to_string()
        }
    };
    writer.write_line(&format!(
        "{}{}",
        pad_str("Total", LINE_WIDTH - COLUMN_WIDTH, Alignment::Left, None),
        pad_str(&total, COLUMN_WIDTH, Alignment::Right, None),
    ));
    true
}

fn render_row(index: usize, record: &SaleRecord, format: &ReportFormat) -> String {
    let amount = match &record.amount {
        Field::Valid(amount) => format_currency(*amount, format),
        Field::Invalid(invalid) => invalid.raw.clone(),
    };
    let region = match &record.region {
        Field::Valid(region) => region.name(),
        Field::Invalid(invalid) => region::name_of(&invalid.raw),
    };
    format!(
        "{}{}{}{}{}",
        pad_str(&index.to_string(), INDEX_WIDTH, Alignment::Left, None),
        pad_str(&record.sales_date.to_text(), COLUMN_WIDTH, Alignment::Left, None),
        pad_str(&quarter_of_date(record).to_string(), COLUMN_WIDTH, Alignment::Left, None),
        pad_str(region, COLUMN_WIDTH, Alignment::Left, None),
        pad_str(&amount, COLUMN_WIDTH, Alignment::Right, None),
    )
}

/// For dates that didn't parse, falls back to the month part of the raw text, or 0.
fn quarter_of_date(record: &SaleRecord) -> u32 {
    match &record.sales_date {
        Field::Valid(date) => quarter_of(date.month()),
        Field::Invalid(invalid) => invalid
            .raw
            .split('-')
            .nth(1)
            .and_then(|month| month.trim().parse().ok())
            .map(quarter_of)
            .unwrap_or(0),
    }
}
