use crate::form::{Draft, ValidationErrors};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical text form of a record date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Store-assigned record identifier. Monotonic, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        s.strip_prefix('#').unwrap_or(s).parse().map(RecordId)
    }
}

/// The editable columns of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Date,
    Value,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Date, Field::Value];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Date => "date",
            Field::Value => "value",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(Field::Name),
            "date" => Ok(Field::Date),
            "value" => Ok(Field::Value),
            other => Err(format!("Unknown field: {}", other)),
        }
    }
}

/// Parses a strict `YYYY-MM-DD` date.
///
/// Only four-digit years are accepted so every stored date has a canonical
/// ten-character text form.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    let bytes = text.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Decimal text of a value, as shown in the table and matched by search.
pub fn format_value(value: f64) -> String {
    value.to_string()
}

/// The non-id body of a record. Only constructible through validation,
/// so a `RecordFields` always satisfies the stored-record invariants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordFields {
    name: String,
    date: NaiveDate,
    value: f64,
}

impl RecordFields {
    pub fn new(
        name: impl Into<String>,
        date: NaiveDate,
        value: f64,
    ) -> Result<Self, ValidationErrors> {
        Draft {
            name: name.into(),
            date: Some(date),
            value: Some(value),
        }
        .validate()
    }

    pub(crate) fn new_unchecked(name: String, date: NaiveDate, value: f64) -> Self {
        Self { name, date, value }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    pub date: NaiveDate,
    pub value: f64,
}

impl Record {
    pub fn new(id: RecordId, fields: RecordFields) -> Self {
        Self {
            id,
            name: fields.name,
            date: fields.date,
            value: fields.value,
        }
    }

    /// Replaces the whole body, keeping the id.
    pub fn replace(&mut self, fields: RecordFields) {
        self.name = fields.name;
        self.date = fields.date;
        self.value = fields.value;
    }

    pub fn date_text(&self) -> String {
        format_date(self.date)
    }

    pub fn value_text(&self) -> String {
        format_value(self.value)
    }

    /// Text forms of the searchable columns, in column order.
    pub fn search_texts(&self) -> [String; 3] {
        [self.name.clone(), self.date_text(), self.value_text()]
    }
}
