//! Dynamically typed row values and their transport-safe JSON forms.

use std::fmt::Write;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use indexmap::IndexMap;
use mysql_async::consts::{ColumnFlags, ColumnType};
use mysql_async::prelude::FromValue;
use mysql_async::{Column as MysqlColumn, Row as MysqlRow};

use crate::errors::{ExecError, Result};

/// Timestamp rendering; the fraction is omitted for whole seconds.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S%.f";

/// One cell of a materialized result row.
///
/// Values are heterogeneously typed at runtime; the date/time and bytes
/// variants are the ones without a JSON-native representation and get
/// rendered to canonical text during normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    DateTime(NaiveDateTime),
    Date(NaiveDate),
    Time(NaiveTime),
}

/// A materialized row: column name to value, in projection order.
pub type Row = IndexMap<String, CellValue>;

/// A normalized row ready for the response body.
pub type JsonRow = IndexMap<String, serde_json::Value>;

impl CellValue {
    /// Convert into a transport-safe JSON value.
    ///
    /// Non-finite floats have no JSON representation and degrade to null.
    pub fn into_json(self) -> serde_json::Value {
        match self {
            CellValue::Null => serde_json::Value::Null,
            CellValue::Bool(v) => serde_json::Value::Bool(v),
            CellValue::Int(v) => serde_json::Value::Number(v.into()),
            CellValue::UInt(v) => serde_json::Value::Number(v.into()),
            CellValue::Float(v) => serde_json::Number::from_f64(v)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            CellValue::Text(v) => serde_json::Value::String(v),
            CellValue::Bytes(v) => serde_json::Value::String(encode_binary(&v)),
            CellValue::DateTime(v) => {
                serde_json::Value::String(v.format(TIMESTAMP_FORMAT).to_string())
            }
            CellValue::Date(v) => serde_json::Value::String(v.format(DATE_FORMAT).to_string()),
            CellValue::Time(v) => serde_json::Value::String(v.format(TIME_FORMAT).to_string()),
        }
    }
}

/// Normalize materialized rows for transport, preserving row and column
/// order.
pub fn normalize_rows(rows: Vec<Row>) -> Vec<JsonRow> {
    rows.into_iter()
        .map(|row| row.into_iter().map(|(k, v)| (k, v.into_json())).collect())
        .collect()
}

/// Read one cell from a binary-protocol row, driven by the column metadata.
///
/// MySQL DATE, DATETIME, TIMESTAMP and TIME all arrive as temporal wire
/// values; the column type decides which variant they decode to.
pub fn read_cell(row: &MysqlRow, col: &MysqlColumn, idx: usize) -> Result<CellValue> {
    use ColumnType::*;

    let flags = col.flags();
    let unsigned = flags.contains(ColumnFlags::UNSIGNED_FLAG);
    let binary = flags.contains(ColumnFlags::BINARY_FLAG);

    let value = match col.column_type() {
        MYSQL_TYPE_TINY | MYSQL_TYPE_SHORT | MYSQL_TYPE_LONG | MYSQL_TYPE_INT24
        | MYSQL_TYPE_LONGLONG
            if unsigned =>
        {
            cell::<u64>(row, idx)?.map_or(CellValue::Null, CellValue::UInt)
        }
        MYSQL_TYPE_TINY | MYSQL_TYPE_SHORT | MYSQL_TYPE_LONG | MYSQL_TYPE_INT24
        | MYSQL_TYPE_LONGLONG | MYSQL_TYPE_YEAR => {
            cell::<i64>(row, idx)?.map_or(CellValue::Null, CellValue::Int)
        }
        MYSQL_TYPE_FLOAT => {
            cell::<f32>(row, idx)?.map_or(CellValue::Null, |v| CellValue::Float(v as f64))
        }
        MYSQL_TYPE_DOUBLE => cell::<f64>(row, idx)?.map_or(CellValue::Null, CellValue::Float),
        MYSQL_TYPE_NULL => CellValue::Null,
        // Decimals ship as text; that is the lossless transport form.
        MYSQL_TYPE_DECIMAL | MYSQL_TYPE_NEWDECIMAL => {
            cell::<String>(row, idx)?.map_or(CellValue::Null, CellValue::Text)
        }
        MYSQL_TYPE_TIMESTAMP | MYSQL_TYPE_DATETIME => {
            cell::<NaiveDateTime>(row, idx)?.map_or(CellValue::Null, CellValue::DateTime)
        }
        MYSQL_TYPE_DATE => cell::<NaiveDate>(row, idx)?.map_or(CellValue::Null, CellValue::Date),
        MYSQL_TYPE_TIME => cell::<NaiveTime>(row, idx)?.map_or(CellValue::Null, CellValue::Time),
        MYSQL_TYPE_VARCHAR | MYSQL_TYPE_VAR_STRING | MYSQL_TYPE_STRING | MYSQL_TYPE_JSON
        | MYSQL_TYPE_ENUM | MYSQL_TYPE_SET => {
            cell::<String>(row, idx)?.map_or(CellValue::Null, CellValue::Text)
        }
        MYSQL_TYPE_TINY_BLOB | MYSQL_TYPE_MEDIUM_BLOB | MYSQL_TYPE_LONG_BLOB | MYSQL_TYPE_BLOB
            if binary =>
        {
            cell::<Vec<u8>>(row, idx)?.map_or(CellValue::Null, CellValue::Bytes)
        }
        MYSQL_TYPE_TINY_BLOB | MYSQL_TYPE_MEDIUM_BLOB | MYSQL_TYPE_LONG_BLOB | MYSQL_TYPE_BLOB => {
            cell::<String>(row, idx)?.map_or(CellValue::Null, CellValue::Text)
        }
        MYSQL_TYPE_BIT | MYSQL_TYPE_GEOMETRY => {
            cell::<Vec<u8>>(row, idx)?.map_or(CellValue::Null, CellValue::Bytes)
        }
        unknown_type => {
            return Err(ExecError::UnsupportedColumnType(
                unknown_type as u8,
                col.name_str().into_owned(),
            ));
        }
    };

    Ok(value)
}

fn cell<T: FromValue>(row: &MysqlRow, idx: usize) -> Result<Option<T>> {
    let value: std::result::Result<Option<T>, mysql_async::FromValueError> = row
        .get_opt(idx)
        .ok_or_else(|| ExecError::Internal(format!("missing value at column index {idx}")))?;
    Ok(value?)
}

fn encode_binary(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(2 + bytes.len() * 2);
    s.push_str("0x");
    for b in bytes {
        write!(&mut s, "{b:02x}").unwrap();
    }
    s
}
