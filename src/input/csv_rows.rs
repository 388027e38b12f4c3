use std::error::Error;
use std::fmt;
use std::io::Read;

use crate::schema::{str2val, FieldType, ResultSchema, Row, SchemaError, Value};

#[derive(Debug)]
pub enum InputError {
    Csv(csv::Error),
    Schema(SchemaError),
    Value {
        line: u64,
        column: String,
        text: String,
        field_type: FieldType,
    },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InputError::Csv(e) => write!(f, "Input error: {}", e),
            InputError::Schema(e) => write!(f, "Input error: {}", e),
            InputError::Value {
                line,
                column,
                text,
                field_type,
            } => write!(
                f,
                "Input error: line {} column {}: '{}' is not a valid {}",
                line, column, text, field_type
            ),
        }
    }
}

impl Error for InputError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            InputError::Csv(e) => Some(e),
            InputError::Schema(e) => Some(e),
            InputError::Value { .. } => None,
        }
    }
}

impl From<csv::Error> for InputError {
    fn from(e: csv::Error) -> Self {
        InputError::Csv(e)
    }
}

/// Reads a CSV result set in batches of typed rows. The header row names
/// the fields.
pub struct CsvRowSource<R: Read> {
    reader: csv::Reader<R>,
    schema: ResultSchema,
    null_marker: String,
    batch_size: usize,
    record: csv::StringRecord,
    done: bool,
}

impl<R: Read> CsvRowSource<R> {
    /// Without `field_types` every column is read as varchar.
    pub fn new(
        rdr: R,
        field_types: &[FieldType],
        null_marker: &str,
        batch_size: usize,
    ) -> Result<Self, InputError> {
        let mut reader = csv::Reader::from_reader(rdr);
        let names: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
        let types = if field_types.is_empty() {
            vec![FieldType::Varchar; names.len()]
        } else {
            field_types.to_vec()
        };
        let schema = ResultSchema::new(&names, &types).map_err(InputError::Schema)?;
        Ok(Self {
            reader,
            schema,
            null_marker: null_marker.to_string(),
            batch_size: batch_size.max(1),
            record: csv::StringRecord::new(),
            done: false,
        })
    }

    pub fn schema(&self) -> &ResultSchema {
        &self.schema
    }

    fn typed_row(&self) -> Result<Row, InputError> {
        let line = self.record.position().map(|p| p.line()).unwrap_or(0);
        self.record
            .iter()
            .zip(self.schema.col_defs())
            .map(|(text, cd)| {
                if text == self.null_marker {
                    return Ok(Value::Null);
                }
                str2val(text, cd.field_type()).ok_or_else(|| InputError::Value {
                    line,
                    column: cd.name().to_string(),
                    text: text.to_string(),
                    field_type: cd.field_type().clone(),
                })
            })
            .collect()
    }

    /// Returns the next batch. An empty batch means the input is exhausted.
    pub fn next_batch(&mut self) -> Result<Vec<Row>, InputError> {
        let mut batch = Vec::new();
        while !self.done && batch.len() < self.batch_size {
            if self.reader.read_record(&mut self.record)? {
                batch.push(self.typed_row()?);
            } else {
                self.done = true;
            }
        }
        Ok(batch)
    }
}
