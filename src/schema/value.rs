// Copyright 2022 Asen Lazarov

use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

/// Text form of a date column, `yyyy-MM-dd`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Text form of a timestamp column, `yyyy-MM-dd HH:mm:ss.SSS`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";
// %.f accepts a missing or shorter fraction when parsing
const TIMESTAMP_PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// A single column value of a result row.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    BigInt(i64),
    Integer(i32),
    Double(f64),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    Str(String),
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::BigInt(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

pub type Row = Vec<Value>;

/// Declared type of a result column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Varchar,
    Double,
    BigInt,
    Integer,
    Boolean,
    Date,
    Timestamp,
    /// Any type name we have no dedicated handling for. Treated as a string.
    Other(Arc<str>),
}

impl FieldType {
    pub fn from_type_name(s: &str) -> FieldType {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "varchar" | "str" | "" => FieldType::Varchar,
            "double" => FieldType::Double,
            "bigint" => FieldType::BigInt,
            "integer" | "int" => FieldType::Integer,
            "boolean" | "bool" => FieldType::Boolean,
            "date" => FieldType::Date,
            "timestamp" => FieldType::Timestamp,
            x if x.starts_with("varchar(") => FieldType::Varchar,
            _ => FieldType::Other(Arc::from(s.trim())),
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            FieldType::Varchar => "varchar",
            FieldType::Double => "double",
            FieldType::BigInt => "bigint",
            FieldType::Integer => "integer",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::Timestamp => "timestamp",
            FieldType::Other(name) => name.as_ref(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_PARSE_FORMAT).ok()
}

/// Types a text cell according to `ftype`. Returns `None` when the text is
/// not a valid value of that type.
pub fn str2val(s: &str, ftype: &FieldType) -> Option<Value> {
    match ftype {
        FieldType::Varchar | FieldType::Other(_) => Some(Value::Str(s.to_string())),
        FieldType::Double => s.trim().parse::<f64>().ok().map(Value::Double),
        FieldType::BigInt => s.trim().parse::<i64>().ok().map(Value::BigInt),
        FieldType::Integer => s.trim().parse::<i32>().ok().map(Value::Integer),
        FieldType::Boolean => {
            let t = s.trim();
            if t.eq_ignore_ascii_case("true") {
                Some(Value::Bool(true))
            } else if t.eq_ignore_ascii_case("false") {
                Some(Value::Bool(false))
            } else {
                None
            }
        }
        FieldType::Date => parse_date(s).map(Value::Date),
        FieldType::Timestamp => parse_timestamp(s).map(Value::Timestamp),
    }
}
