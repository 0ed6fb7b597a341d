use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{Field, Region};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleRecord {
    pub amount: Field<Decimal>,
    pub sales_date: Field<NaiveDate>,
    pub region: Field<Region>,
}

impl SaleRecord {
    pub fn new(amount: Decimal, sales_date: NaiveDate, region: Region) -> Self {
        Self {
            amount: Field::Valid(amount),
            sales_date: Field::Valid(sales_date),
            region: Field::Valid(region),
        }
    }

    pub fn is_fully_valid(&self) -> bool {
        self.amount.is_valid() && self.sales_date.is_valid() && self.region.is_valid()
    }

    /// The `[amount, sales_date, region]` row this record is persisted as
    pub fn to_row(&self) -> [String; 3] {
        [
            self.amount.to_text(),
            self.sales_date.to_text(),
            self.region.to_text(),
        ]
    }
}

/// All sales of the running session, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalesList {
    records: Vec<SaleRecord>,
}

impl SalesList {
    pub fn new_empty() -> Self {
        Self { records: vec![] }
    }

    pub fn push(&mut self, record: SaleRecord) {
        self.records.push(record);
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = SaleRecord>) {
        self.records.extend(records);
    }

    pub fn iter(&self) -> impl Iterator<Item = &SaleRecord> {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&SaleRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<SaleRecord>> for SalesList {
    fn from(records: Vec<SaleRecord>) -> Self {
        Self { records }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_of_valid_record() {
        let record = SaleRecord::new(
            Decimal::new(123456, 2),
            NaiveDate::from_ymd_opt(2024, 11, 3).unwrap(),
            Region::East,
        );
        assert!(record.is_fully_valid());
        assert_eq!(
            ["1234.56".to_string(), "2024-11-03".to_string(), "e".to_string()],
            record.to_row()
        );
    }

    #[test]
    fn row_of_record_with_invalid_fields() {
        let record = SaleRecord {
            amount: Field::invalid("abc", "not a number"),
            sales_date: Field::invalid("2024-13-01", "not a date"),
            region: Field::invalid("q", "unknown region"),
        };
        assert!(!record.is_fully_valid());
        assert_eq!(
            ["abc".to_string(), "2024-13-01".to_string(), "q".to_string()],
            record.to_row()
        );
    }

    #[test]
    fn list_keeps_insertion_order_and_duplicates() {
        let first = SaleRecord::new(
            Decimal::new(1, 0),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            Region::West,
        );
        let second = SaleRecord::new(
            Decimal::new(2, 0),
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            Region::Central,
        );
        let mut list = SalesList::new_empty();
        assert!(list.is_empty());
        list.push(first.clone());
        list.extend([second.clone(), first.clone()]);
        assert_eq!(3, list.len());
        assert_eq!(
            vec![&first, &second, &first],
            list.iter().collect::<Vec<_>>()
        );
    }
}
