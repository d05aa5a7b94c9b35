use crate::{Error, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use fanout_core::{Cell, ColumnType, Table};
use std::io::Read;
use std::path::Path;

/// Load a delimited file with a header row into a [`Table`].
pub async fn load_csv(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    tracing::info!("[CSV] Loading {}...", path.display());

    let bytes = tokio::fs::read(path).await.map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let table = parse_csv(path, bytes.as_slice())?;

    tracing::info!("[CSV] Loaded {} rows from {}", table.len(), path.display());

    Ok(table)
}

/// Parse CSV text. `path` is only used to label errors.
///
/// Every record must have as many fields as the header. Column types are
/// inferred from the non-empty fields of each column; empty fields become
/// [`Cell::Null`]. Text fields are kept verbatim; surrounding whitespace is
/// only ignored when a field is read as a number or bool.
pub fn parse_csv<R: Read>(path: &Path, reader: R) -> Result<Table> {
    let csv_err = |source| Error::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::None)
        .from_reader(reader);

    let headers = reader.headers().map_err(csv_err)?.clone();
    if headers.is_empty() {
        return Err(Error::MissingHeader(path.to_path_buf()));
    }

    let records = reader
        .records()
        .collect::<std::result::Result<Vec<StringRecord>, _>>()
        .map_err(csv_err)?;

    let column_types: Vec<ColumnType> = (0..headers.len())
        .map(|idx| infer_column_type(records.iter().map(|r| r.get(idx).unwrap_or(""))))
        .collect();

    let rows = records
        .iter()
        .map(|record| {
            record
                .iter()
                .zip(&column_types)
                .map(|(field, column_type)| parse_cell(field, *column_type))
                .collect()
        })
        .collect();

    Ok(Table::new(
        headers.iter().map(str::to_string).collect(),
        column_types,
        rows,
    ))
}

fn infer_column_type<'a>(values: impl Iterator<Item = &'a str>) -> ColumnType {
    let mut seen_value = false;
    let mut all_int = true;
    let mut all_float = true;
    let mut all_bool = true;

    for value in values.filter(|v| !v.is_empty()) {
        seen_value = true;
        let value = value.trim();
        all_int &= value.parse::<i64>().is_ok();
        all_float &= value.parse::<f64>().is_ok();
        all_bool &= parse_bool(value).is_some();

        if !(all_int || all_float || all_bool) {
            break;
        }
    }

    if !seen_value {
        ColumnType::Text
    } else if all_int {
        ColumnType::Int
    } else if all_float {
        ColumnType::Float
    } else if all_bool {
        ColumnType::Bool
    } else {
        ColumnType::Text
    }
}

fn parse_cell(field: &str, column_type: ColumnType) -> Cell {
    if field.is_empty() {
        return Cell::Null;
    }

    let value = field.trim();
    let parsed = match column_type {
        ColumnType::Int => value.parse::<i64>().ok().map(Cell::Int),
        ColumnType::Float => value.parse::<f64>().ok().map(Cell::Float),
        ColumnType::Bool => parse_bool(value).map(Cell::Bool),
        ColumnType::Text => None,
    };

    parsed.unwrap_or_else(|| Cell::Text(field.to_string()))
}

fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
