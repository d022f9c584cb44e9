//! Table, row and cell types, and their JSON shapes.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::config::STRESS_RECORD_ID_KEY;

/// A single cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Int(v) => serializer.serialize_i64(*v),
            // JSON has no NaN or infinity
            Value::Float(v) if !v.is_finite() => serializer.serialize_unit(),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Text(v) => serializer.serialize_str(v),
        }
    }
}

/// Immutable dataset: a fixed header and rows of equal width.
///
/// Serializes as a JSON array of row objects in row order.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Builds a table. Every row must have one value per column.
    pub(crate) fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = Row<'_>> {
        self.rows.iter().map(|values| Row {
            columns: &self.columns,
            values,
        })
    }

    /// Projects `column` into `{id, column}` records, or `None` if the table
    /// has no such column.
    pub fn stress_records<'a>(&'a self, column: &'a str) -> Option<StressRecords<'a>> {
        let index = self.column_index(column)?;
        Some(StressRecords {
            table: self,
            column,
            index,
        })
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for row in self.rows() {
            seq.serialize_element(&row)?;
        }
        seq.end()
    }
}

/// Borrowed view of one row, keyed by column name in header order.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    columns: &'a [String],
    values: &'a [Value],
}

impl<'a> Row<'a> {
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.values.get(index)
    }

    pub fn values(&self) -> &'a [Value] {
        self.values
    }
}

impl Serialize for Row<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, value) in self.columns.iter().zip(self.values) {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// The `{id, <column>}` projection of a table, ids 1-based by row position.
#[derive(Debug, Clone, Copy)]
pub struct StressRecords<'a> {
    table: &'a Table,
    column: &'a str,
    index: usize,
}

impl StressRecords<'_> {
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Serialize for StressRecords<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for (position, values) in self.table.rows.iter().enumerate() {
            seq.serialize_element(&StressRecord {
                id: position + 1,
                column: self.column,
                value: &values[self.index],
            })?;
        }
        seq.end()
    }
}

struct StressRecord<'a> {
    id: usize,
    column: &'a str,
    value: &'a Value,
}

impl Serialize for StressRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(STRESS_RECORD_ID_KEY, &self.id)?;
        map.serialize_entry(self.column, self.value)?;
        map.end()
    }
}
