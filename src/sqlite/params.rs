use std::io::Read;

use rusqlite::types::{Value, ValueRef};

use crate::error::SqlError;
use crate::types::{SqlType, SqlValue};

const DATE_FORMAT: &str = "%F";
const TIME_FORMAT: &str = "%T%.f";
const TIMESTAMP_FORMAT: &str = "%F %T%.f";
const TIMESTAMP_TZ_FORMAT: &str = "%F %T%.f%:z";

/// Convert a single [`SqlValue`] to a rusqlite [`Value`].
///
/// `SQLite` has no boolean, temporal or JSON storage classes: booleans become
/// integers, temporal values ISO-8601 text and JSON its serialized text.
///
/// # Errors
/// Returns [`SqlErrorKind::Unimplemented`](crate::SqlErrorKind::Unimplemented) for arrays.
pub fn sql_value_to_sqlite(value: &SqlValue) -> Result<Value, SqlError> {
    let converted = match value {
        SqlValue::Null => Value::Null,
        SqlValue::Bool(b) => Value::Integer(i64::from(*b)),
        SqlValue::Int(i) => Value::Integer(*i),
        SqlValue::Float(f) => Value::Real(*f),
        SqlValue::Text(s) => Value::Text(s.clone()),
        SqlValue::Blob(bytes) => Value::Blob(bytes.clone()),
        SqlValue::Date(d) => Value::Text(d.format(DATE_FORMAT).to_string()),
        SqlValue::Time(t) => Value::Text(t.format(TIME_FORMAT).to_string()),
        SqlValue::Timestamp(ts) => Value::Text(ts.format(TIMESTAMP_FORMAT).to_string()),
        SqlValue::TimestampTz(ts) => Value::Text(ts.format(TIMESTAMP_TZ_FORMAT).to_string()),
        SqlValue::Json(json) => Value::Text(json.to_string()),
        SqlValue::Array(_) => {
            return Err(SqlError::unimplemented(
                "array parameters are not supported by SQLite",
            ));
        }
    };
    Ok(converted)
}

/// Convert a column value read from `SQLite` back into a [`SqlValue`].
#[must_use]
pub fn sqlite_value_to_sql_value(value: ValueRef<'_>) -> SqlValue {
    match value {
        ValueRef::Null => SqlValue::Null,
        ValueRef::Integer(i) => SqlValue::Int(i),
        ValueRef::Real(f) => SqlValue::Float(f),
        ValueRef::Text(bytes) => SqlValue::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => SqlValue::Blob(bytes.to_vec()),
    }
}

fn render_temporal(value: &SqlValue) -> Option<String> {
    match value {
        SqlValue::Date(d) => Some(d.format(DATE_FORMAT).to_string()),
        SqlValue::Time(t) => Some(t.format(TIME_FORMAT).to_string()),
        SqlValue::Timestamp(ts) => Some(ts.format(TIMESTAMP_FORMAT).to_string()),
        SqlValue::TimestampTz(ts) => Some(ts.format(TIMESTAMP_TZ_FORMAT).to_string()),
        _ => None,
    }
}

/// Convert `value` to the representation `target` calls for before binding.
///
/// For decimal targets `scale_or_length` rounds to that many fractional digits;
/// for text and binary targets it truncates to that many characters or bytes.
///
/// # Errors
/// Returns a parameter error when the value cannot represent `target`.
pub fn coerce(
    value: SqlValue,
    target: SqlType,
    scale_or_length: Option<u32>,
) -> Result<SqlValue, SqlError> {
    let mismatch =
        |value: &SqlValue| SqlError::parameter(format!("cannot convert {value:?} to {target:?}"));

    let coerced = match (value, target) {
        (SqlValue::Null, _) | (_, SqlType::Null) => SqlValue::Null,
        (value, SqlType::Other) => value,

        (SqlValue::Bool(b), SqlType::Boolean) => SqlValue::Bool(b),
        (SqlValue::Bool(b), t) if t.is_integral() => SqlValue::Int(i64::from(b)),
        (SqlValue::Int(i), SqlType::Boolean) => SqlValue::Bool(i != 0),
        (SqlValue::Int(i), t) if t.is_integral() => SqlValue::Int(i),
        (SqlValue::Int(i), t) if t.is_fractional() => {
            #[allow(clippy::cast_precision_loss)]
            let f = i as f64;
            SqlValue::Float(round_to_scale(f, target, scale_or_length))
        }
        (SqlValue::Float(f), t) if t.is_integral() => {
            if !f.is_finite() || f.trunc() > i64::MAX as f64 || f.trunc() < i64::MIN as f64 {
                return Err(mismatch(&SqlValue::Float(f)));
            }
            #[allow(clippy::cast_possible_truncation)]
            let i = f.trunc() as i64;
            SqlValue::Int(i)
        }
        (SqlValue::Float(f), t) if t.is_fractional() => {
            SqlValue::Float(round_to_scale(f, target, scale_or_length))
        }

        (SqlValue::Text(s), SqlType::Boolean) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => SqlValue::Bool(true),
            "false" | "0" => SqlValue::Bool(false),
            _ => return Err(mismatch(&SqlValue::Text(s))),
        },
        (SqlValue::Text(s), t) if t.is_integral() => match s.trim().parse::<i64>() {
            Ok(i) => SqlValue::Int(i),
            Err(_) => return Err(mismatch(&SqlValue::Text(s))),
        },
        (SqlValue::Text(s), t) if t.is_fractional() => match s.trim().parse::<f64>() {
            Ok(f) => SqlValue::Float(round_to_scale(f, target, scale_or_length)),
            Err(_) => return Err(mismatch(&SqlValue::Text(s))),
        },
        (SqlValue::Text(s), SqlType::Json) => match serde_json::from_str(&s) {
            Ok(json) => SqlValue::Json(json),
            Err(_) => return Err(mismatch(&SqlValue::Text(s))),
        },
        (SqlValue::Text(s), t) if t.is_binary() => {
            SqlValue::Blob(truncate_bytes(s.into_bytes(), scale_or_length))
        }
        (SqlValue::Blob(bytes), t) if t.is_binary() => {
            SqlValue::Blob(truncate_bytes(bytes, scale_or_length))
        }

        (SqlValue::Date(d), SqlType::Date) => SqlValue::Date(d),
        (SqlValue::Time(t), SqlType::Time) => SqlValue::Time(t),
        (SqlValue::Timestamp(ts), SqlType::Timestamp) => SqlValue::Timestamp(ts),
        (SqlValue::Timestamp(ts), SqlType::Date) => SqlValue::Date(ts.date()),
        (SqlValue::Timestamp(ts), SqlType::Time) => SqlValue::Time(ts.time()),
        (SqlValue::TimestampTz(ts), SqlType::TimestampWithTimeZone) => SqlValue::TimestampTz(ts),
        (SqlValue::TimestampTz(ts), SqlType::Timestamp) => SqlValue::Timestamp(ts.naive_local()),

        (SqlValue::Json(json), SqlType::Json) => SqlValue::Json(json),
        (SqlValue::Array(values), SqlType::Array) => SqlValue::Array(values),

        (value, t) if t.is_textual() => match render_text(&value) {
            Some(text) => SqlValue::Text(truncate_chars(text, scale_or_length)),
            None => return Err(mismatch(&value)),
        },
        (value, _) => return Err(mismatch(&value)),
    };
    Ok(coerced)
}

fn render_text(value: &SqlValue) -> Option<String> {
    match value {
        SqlValue::Text(s) => Some(s.clone()),
        SqlValue::Bool(b) => Some(b.to_string()),
        SqlValue::Int(i) => Some(i.to_string()),
        SqlValue::Float(f) => Some(f.to_string()),
        SqlValue::Json(json) => Some(json.to_string()),
        other => render_temporal(other),
    }
}

fn round_to_scale(value: f64, target: SqlType, scale: Option<u32>) -> f64 {
    match (target, scale) {
        (SqlType::Decimal | SqlType::Numeric, Some(scale)) => {
            // f64 carries ~15 significant decimal digits
            let factor = 10f64.powi(i32::try_from(scale.min(15)).unwrap_or(15));
            (value * factor).round() / factor
        }
        _ => value,
    }
}

fn truncate_chars(text: String, length: Option<u32>) -> String {
    match length {
        Some(len) => text.chars().take(len as usize).collect(),
        None => text,
    }
}

fn truncate_bytes(mut bytes: Vec<u8>, length: Option<u32>) -> Vec<u8> {
    if let Some(len) = length {
        bytes.truncate(len as usize);
    }
    bytes
}

/// Read a parameter stream, stopping after `length` bytes when given.
pub(crate) fn read_bytes(mut reader: Box<dyn Read>, length: Option<u64>) -> Result<Vec<u8>, SqlError> {
    let mut buf = Vec::new();
    match length {
        Some(limit) => reader.take(limit).read_to_end(&mut buf)?,
        None => reader.read_to_end(&mut buf)?,
    };
    Ok(buf)
}

pub(crate) fn read_text(reader: Box<dyn Read>, length: Option<u64>) -> Result<String, SqlError> {
    String::from_utf8(read_bytes(reader, length)?)
        .map_err(|e| SqlError::parameter(format!("character stream is not valid UTF-8: {e}")))
}

pub(crate) fn read_ascii(reader: Box<dyn Read>, length: Option<u64>) -> Result<String, SqlError> {
    let bytes = read_bytes(reader, length)?;
    if !bytes.is_ascii() {
        return Err(SqlError::parameter("ASCII stream contains non-ASCII bytes"));
    }
    String::from_utf8(bytes)
        .map_err(|e| SqlError::parameter(format!("ASCII stream is not valid text: {e}")))
}
