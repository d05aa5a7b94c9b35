use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use fanout_core::{Cell, Row};
use serde_json::Value;
use sqlx::postgres::types::PgInterval;
use sqlx::postgres::PgRow;
use sqlx::types::Decimal;
use sqlx::{Column, Decode, Postgres, Row as _, Type, TypeInfo, ValueRef};

/// Decode every column of a result row into a [`Cell`].
///
/// Scalars map onto the matching cell variant. `NUMERIC` keeps its exact
/// decimal text, arrays render as JSON arrays and `INTERVAL` uses the
/// server's default output style. Types without any mapping are rendered as
/// a `<TYPE>` marker rather than failing the query.
pub fn decode_row(row: &PgRow) -> Result<Row> {
    (0..row.len()).map(|idx| decode_cell(row, idx)).collect()
}

fn decode_cell(row: &PgRow, idx: usize) -> Result<Cell> {
    let column = &row.columns()[idx];

    let raw = row.try_get_raw(idx).map_err(|e| decode_error(column.name(), e))?;
    if raw.is_null() {
        return Ok(Cell::Null);
    }

    let type_name = column.type_info().name().to_string();
    let cell = match type_name.as_str() {
        "BOOL" => Cell::Bool(get::<bool>(row, idx)?),
        "INT2" => Cell::Int(get::<i16>(row, idx)?.into()),
        "INT4" => Cell::Int(get::<i32>(row, idx)?.into()),
        "INT8" => Cell::Int(get::<i64>(row, idx)?),
        "FLOAT4" => Cell::Float(get::<f32>(row, idx)?.into()),
        "FLOAT8" => Cell::Float(get::<f64>(row, idx)?),
        "NUMERIC" => Cell::Text(get::<Decimal>(row, idx)?.to_string()),
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => Cell::Text(get::<String>(row, idx)?),
        "\"CHAR\"" => Cell::Text(char_text(get::<i8>(row, idx)?)),
        "UUID" => Cell::Text(get::<uuid::Uuid>(row, idx)?.to_string()),
        "TIMESTAMPTZ" => Cell::Text(get::<DateTime<Utc>>(row, idx)?.to_rfc3339()),
        "TIMESTAMP" => Cell::Text(get::<NaiveDateTime>(row, idx)?.to_string()),
        "DATE" => Cell::Text(get::<NaiveDate>(row, idx)?.to_string()),
        "TIME" => Cell::Text(get::<NaiveTime>(row, idx)?.to_string()),
        "INTERVAL" => Cell::Text(format_interval(&get::<PgInterval>(row, idx)?)),
        "JSON" | "JSONB" => Cell::Text(get::<Value>(row, idx)?.to_string()),
        "BOOL[]" => array::<bool, _>(row, idx, Value::from)?,
        "INT2[]" => array::<i16, _>(row, idx, Value::from)?,
        "INT4[]" => array::<i32, _>(row, idx, Value::from)?,
        "INT8[]" => array::<i64, _>(row, idx, Value::from)?,
        "FLOAT4[]" => array::<f32, _>(row, idx, Value::from)?,
        "FLOAT8[]" => array::<f64, _>(row, idx, Value::from)?,
        "NUMERIC[]" => array::<Decimal, _>(row, idx, |d| Value::String(d.to_string()))?,
        "TEXT[]" | "VARCHAR[]" | "BPCHAR[]" | "NAME[]" => {
            array::<String, _>(row, idx, Value::String)?
        }
        "UUID[]" => array::<uuid::Uuid, _>(row, idx, |u| Value::String(u.to_string()))?,
        other => {
            tracing::debug!(column = column.name(), "No decoder for type {}", other);
            Cell::Text(format!("<{}>", other))
        }
    };

    Ok(cell)
}

fn get<'r, T>(row: &'r PgRow, idx: usize) -> Result<T>
where
    T: Decode<'r, Postgres> + Type<Postgres>,
{
    row.try_get::<T, _>(idx)
        .map_err(|e| decode_error(row.columns()[idx].name(), e))
}

// One-dimensional arrays become JSON array text; NULL elements stay null.
fn array<'r, T, F>(row: &'r PgRow, idx: usize, render: F) -> Result<Cell>
where
    Vec<Option<T>>: Decode<'r, Postgres> + Type<Postgres>,
    F: Fn(T) -> Value,
{
    let items = get::<Vec<Option<T>>>(row, idx)?;
    Ok(Cell::Text(render_array(items, render)))
}

fn render_array<T>(items: Vec<Option<T>>, render: impl Fn(T) -> Value) -> String {
    Value::Array(
        items
            .into_iter()
            .map(|item| item.map(&render).unwrap_or(Value::Null))
            .collect(),
    )
    .to_string()
}

fn char_text(value: i8) -> String {
    char::from(value as u8).to_string()
}

/// Render an interval the way PostgreSQL's `postgres` output style does,
/// e.g. `1 year 2 mons 3 days 04:05:06.5`.
fn format_interval(interval: &PgInterval) -> String {
    let mut parts = Vec::new();

    let years = interval.months / 12;
    let months = interval.months % 12;
    for (amount, unit) in [(years, "year"), (months, "mon"), (interval.days, "day")] {
        if amount != 0 {
            let plural = if amount == 1 { "" } else { "s" };
            parts.push(format!("{} {}{}", amount, unit, plural));
        }
    }

    if interval.microseconds != 0 || parts.is_empty() {
        let sign = if interval.microseconds < 0 { "-" } else { "" };
        let micros = interval.microseconds.unsigned_abs();
        let secs = micros / 1_000_000;
        let mut time = format!(
            "{}{:02}:{:02}:{:02}",
            sign,
            secs / 3600,
            secs / 60 % 60,
            secs % 60
        );
        let fraction = micros % 1_000_000;
        if fraction != 0 {
            let digits = format!("{:06}", fraction);
            time.push('.');
            time.push_str(digits.trim_end_matches('0'));
        }
        parts.push(time);
    }

    parts.join(" ")
}

fn decode_error(column: &str, err: sqlx::Error) -> Error {
    Error::Decode {
        column: column.to_string(),
        message: err.to_string(),
    }
}
