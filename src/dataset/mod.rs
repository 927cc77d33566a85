//! In-memory tabular dataset parsed from delimited text.

use std::io::Read;
use std::path::Path;

use thiserror::Error;

/// Errors that can occur while parsing delimited text into a dataset.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input has no header row.
    #[error("input has no header row")]
    MissingHeader,
    /// Header contains an empty or duplicate column name.
    #[error("invalid header: {0}")]
    InvalidHeader(String),
    /// Underlying read or decode failure (ragged rows, bad UTF-8, I/O).
    #[error("malformed delimited text: {0}")]
    Malformed(String),
}

impl From<csv::Error> for ParseError {
    fn from(e: csv::Error) -> Self {
        ParseError::Malformed(e.to_string())
    }
}

/// Declared scalar type of a column, inferred from the parsed content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Text,
}

impl ColumnType {
    /// MySQL column type used when creating the sink table.
    pub fn mysql_type(&self) -> &'static str {
        match self {
            ColumnType::Integer => "INT",
            ColumnType::Text => "VARCHAR(255)",
        }
    }

    /// Hive/Glue column type used when registering the external table.
    pub fn catalog_type(&self) -> &'static str {
        match self {
            ColumnType::Integer => "int",
            ColumnType::Text => "string",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub column_type: ColumnType,
}

/// A single scalar cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Text(String),
}

/// Ordered rows with a fixed column list. Lives only for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Value>>,
}

impl Dataset {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Parse delimited text from a local file.
    pub fn from_delimited_path(path: &Path, delimiter: u8) -> Result<Self, ParseError> {
        let reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .from_path(path)?;
        Self::from_csv_reader(reader)
    }

    /// Parse delimited text from an in-memory buffer.
    pub fn from_delimited_bytes(bytes: &[u8], delimiter: u8) -> Result<Self, ParseError> {
        let reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .from_reader(bytes);
        Self::from_csv_reader(reader)
    }

    fn from_csv_reader<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, ParseError> {
        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Err(ParseError::MissingHeader);
        }

        let mut names: Vec<String> = Vec::with_capacity(headers.len());
        for name in headers.iter() {
            let name = name.trim();
            if name.is_empty() {
                return Err(ParseError::InvalidHeader("empty column name".to_string()));
            }
            if names.iter().any(|n| n == name) {
                return Err(ParseError::InvalidHeader(format!(
                    "duplicate column name '{}'",
                    name
                )));
            }
            names.push(name.to_string());
        }

        // First pass: collect raw records. The csv reader rejects ragged rows.
        let mut raw_rows: Vec<csv::StringRecord> = Vec::new();
        for record in reader.records() {
            let record = record?;
            raw_rows.push(record);
        }

        // Infer each column type: Integer only if every cell parses as i64.
        let types: Vec<ColumnType> = (0..names.len())
            .map(|col| {
                let all_integer = !raw_rows.is_empty()
                    && raw_rows
                        .iter()
                        .all(|row| row[col].trim().parse::<i64>().is_ok());
                if all_integer {
                    ColumnType::Integer
                } else {
                    ColumnType::Text
                }
            })
            .collect();

        let rows = raw_rows
            .iter()
            .map(|record| {
                record
                    .iter()
                    .zip(&types)
                    .map(|(cell, column_type)| match column_type {
                        ColumnType::Integer => match cell.trim().parse() {
                            Ok(i) => Value::Integer(i),
                            // Inference only picks Integer when every cell
                            // parsed, so this arm is unreachable in practice.
                            Err(_) => Value::Text(cell.to_string()),
                        },
                        ColumnType::Text => Value::Text(cell.to_string()),
                    })
                    .collect()
            })
            .collect();

        let columns = names
            .into_iter()
            .zip(types)
            .map(|(name, column_type)| Column { name, column_type })
            .collect();

        Ok(Dataset { columns, rows })
    }
}
