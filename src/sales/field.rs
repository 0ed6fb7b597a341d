use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{Region, DATE_FORMAT};

/// A value read from an untrusted source. Fields that failed to parse keep their raw text
/// so they can be shown to the operator and written back to disk unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    Valid(T),
    Invalid(InvalidField),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidField {
    pub raw: String,
    pub reason: String,
}

impl<T> Field<T> {
    pub fn invalid(raw: impl Into<String>, reason: impl Into<String>) -> Self {
        Field::Invalid(InvalidField {
            raw: raw.into(),
            reason: reason.into(),
        })
    }

    pub fn valid(&self) -> Option<&T> {
        match self {
            Field::Valid(value) => Some(value),
            Field::Invalid(_) => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Field::Valid(_))
    }
}

impl<T: FieldText> Field<T> {
    /// The text this field is persisted as
    pub fn to_text(&self) -> String {
        match self {
            Field::Valid(value) => value.to_field_text(),
            Field::Invalid(invalid) => invalid.raw.clone(),
        }
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Field::Valid(value)
    }
}

pub trait FieldText {
    fn to_field_text(&self) -> String;
}

impl FieldText for Decimal {
    fn to_field_text(&self) -> String {
        self.to_string()
    }
}

impl FieldText for NaiveDate {
    fn to_field_text(&self) -> String {
        self.format(DATE_FORMAT).to_string()
    }
}

impl FieldText for Region {
    fn to_field_text(&self) -> String {
        self.code().to_string()
    }
}
