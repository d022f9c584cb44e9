//! CSV loading with per-column type inference.
//!
//! The first line is the header. Each column becomes the narrowest type that
//! fits every non-missing cell: integer, then float, then boolean, else text.
//! Missing cells (see [`NA_VALUES`]) are null regardless of the column type.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use super::{DatasetError, Table, Value};

/// Cell spellings treated as missing.
const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Int,
    Float,
    Bool,
    Text,
}

/// Load the CSV file at `path` into a [`Table`].
pub fn load_table(path: &Path) -> Result<Table, DatasetError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DatasetError::NotFound {
            path: path.to_path_buf(),
        },
        _ => DatasetError::Read {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let table = parse_table(file, path)?;

    tracing::info!(
        path = %path.display(),
        rows = table.len(),
        columns = table.columns().len(),
        "Loaded dataset"
    );

    Ok(table)
}

/// Parse CSV from `reader`. `path` is only used to label errors.
pub fn parse_table<R: Read>(reader: R, path: &Path) -> Result<Table, DatasetError> {
    let parse_err = |source: csv::Error| DatasetError::Parse {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let header = reader.headers().map_err(parse_err)?.clone();
    if header.is_empty() {
        return Err(DatasetError::MissingHeader {
            path: path.to_path_buf(),
        });
    }

    let records = reader
        .records()
        .collect::<Result<Vec<StringRecord>, _>>()
        .map_err(parse_err)?;

    let kinds: Vec<ColumnKind> = (0..header.len())
        .map(|i| infer_kind(records.iter().filter_map(|r| r.get(i))))
        .collect();

    let rows = records
        .iter()
        .map(|record| {
            record
                .iter()
                .zip(&kinds)
                .map(|(cell, kind)| convert(cell, *kind))
                .collect()
        })
        .collect();

    let columns = dedupe_columns(&header);

    Ok(Table::new(columns, rows))
}

/// Rename repeated header names to `name.1`, `name.2`, ... so every column
/// keeps its own key in the JSON rows.
fn dedupe_columns(header: &StringRecord) -> Vec<String> {
    let mut seen = HashSet::with_capacity(header.len());
    let mut columns = Vec::with_capacity(header.len());

    for name in header.iter() {
        let mut column = name.to_string();
        let mut suffix = 0;
        while seen.contains(&column) {
            suffix += 1;
            column = format!("{}.{}", name, suffix);
        }
        if suffix > 0 {
            tracing::warn!(original = %name, renamed = %column, "Renamed duplicate column");
        }
        seen.insert(column.clone());
        columns.push(column);
    }

    columns
}

fn is_missing(cell: &str) -> bool {
    NA_VALUES.iter().any(|na| *na == cell)
}

fn parse_bool(cell: &str) -> Option<bool> {
    if cell.eq_ignore_ascii_case("true") {
        Some(true)
    } else if cell.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn infer_kind<'a>(cells: impl Iterator<Item = &'a str>) -> ColumnKind {
    let mut int = true;
    let mut float = true;
    let mut boolean = true;

    for cell in cells.filter(|c| !is_missing(c)) {
        let trimmed = cell.trim();
        int = int && trimmed.parse::<i64>().is_ok();
        float = float && trimmed.parse::<f64>().is_ok();
        boolean = boolean && parse_bool(trimmed).is_some();
        if !int && !float && !boolean {
            return ColumnKind::Text;
        }
    }

    // An all-missing column stays text so every cell serializes as null
    if int && float && boolean {
        ColumnKind::Text
    } else if int {
        ColumnKind::Int
    } else if float {
        ColumnKind::Float
    } else if boolean {
        ColumnKind::Bool
    } else {
        ColumnKind::Text
    }
}

fn convert(cell: &str, kind: ColumnKind) -> Value {
    if is_missing(cell) {
        return Value::Null;
    }
    let trimmed = cell.trim();
    // Kinds were inferred from these same cells, so the parses succeed
    match kind {
        ColumnKind::Int => trimmed.parse().map(Value::Int).unwrap_or(Value::Null),
        ColumnKind::Float => trimmed.parse().map(Value::Float).unwrap_or(Value::Null),
        ColumnKind::Bool => parse_bool(trimmed).map(Value::Bool).unwrap_or(Value::Null),
        ColumnKind::Text => Value::Text(cell.to_string()),
    }
}
