use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Values that can be bound to a statement parameter or read back from a row.
///
/// ```rust
/// use sql_forwarding::prelude::*;
///
/// let params = vec![
///     SqlValue::Int(1),
///     SqlValue::Text("alice".into()),
///     SqlValue::Bool(true),
/// ];
/// # let _ = params;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// NULL value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Binary data
    Blob(Vec<u8>),
    /// Calendar date
    Date(NaiveDate),
    /// Time of day
    Time(NaiveTime),
    /// Timestamp without zone
    Timestamp(NaiveDateTime),
    /// Timestamp pinned to an offset
    TimestampTz(DateTime<FixedOffset>),
    /// JSON value
    Json(JsonValue),
    /// SQL array
    Array(Vec<SqlValue>),
}

impl SqlValue {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        if let SqlValue::Int(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let SqlValue::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    /// Booleans, plus the integers 0 and 1 that engines without a boolean type store.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SqlValue::Bool(value) => Some(*value),
            SqlValue::Int(1) => Some(true),
            SqlValue::Int(0) => Some(false),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        if let SqlValue::Float(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let SqlValue::Blob(bytes) = self {
            Some(bytes)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            SqlValue::Timestamp(value) => Some(*value),
            SqlValue::Text(s) => {
                // Try "YYYY-MM-DD HH:MM:SS" then with fractional seconds
                NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                    .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
                    .ok()
            }
            _ => None,
        }
    }
}

/// SQL type tags used for typed NULLs and typed object binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SqlType {
    Boolean,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    Real,
    Double,
    Decimal,
    Numeric,
    Char,
    VarChar,
    LongVarChar,
    NChar,
    NVarChar,
    Clob,
    NClob,
    Binary,
    VarBinary,
    Blob,
    Date,
    Time,
    Timestamp,
    TimestampWithTimeZone,
    Json,
    Array,
    Null,
    Other,
}

impl SqlType {
    #[must_use]
    pub fn is_integral(self) -> bool {
        matches!(
            self,
            SqlType::TinyInt | SqlType::SmallInt | SqlType::Integer | SqlType::BigInt
        )
    }

    #[must_use]
    pub fn is_textual(self) -> bool {
        matches!(
            self,
            SqlType::Char
                | SqlType::VarChar
                | SqlType::LongVarChar
                | SqlType::NChar
                | SqlType::NVarChar
                | SqlType::Clob
                | SqlType::NClob
        )
    }

    #[must_use]
    pub fn is_binary(self) -> bool {
        matches!(self, SqlType::Binary | SqlType::VarBinary | SqlType::Blob)
    }

    #[must_use]
    pub fn is_fractional(self) -> bool {
        matches!(
            self,
            SqlType::Real | SqlType::Double | SqlType::Decimal | SqlType::Numeric
        )
    }
}
