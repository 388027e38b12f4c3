use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{Datelike, Timelike};
use log::{error, info, warn};

use crate::conf::ExtractConfig;
use crate::extract::{
    Collation, ColumnType, Extract, ExtractError, ExtractRow, Table, TableDefinition,
    EXTRACT_TABLE,
};
use crate::printer::{format_value, OutputPrinter};
use crate::publish::{DynServerConnection, PublishError};
use crate::schema::{str2val, FieldType, ResultSchema, Row, Value};
use crate::DynError;

/// File name of the extract written before it is published.
pub const TEMP_EXTRACT_NAME: &str = "tempExtract.arrow";

#[derive(Debug)]
pub struct ExtractInitError {
    path: PathBuf,
    source: ExtractError,
}

impl ExtractInitError {
    fn new(path: &Path, source: ExtractError) -> Self {
        Self {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl fmt::Display for ExtractInitError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Could not open extract {}: {}",
            self.path.display(),
            self.source
        )
    }
}

impl Error for ExtractInitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// A row that could not be converted for the extract.
#[derive(Debug)]
pub struct RejectedRow {
    pub index: usize,
    pub error: ExtractError,
}

#[derive(Debug, Default)]
pub struct InsertReport {
    pub inserted: usize,
    pub rejected: Vec<RejectedRow>,
}

/// Collects result rows into a typed extract and optionally publishes the
/// finished extract to a server.
pub struct ExtractFilePrinter {
    schema: ResultSchema,
    config: ExtractConfig,
    publisher: Option<DynServerConnection>,
    extract_path: PathBuf,
    extract: Option<Extract>,
    started: Instant,
    total_rows: usize,
}

impl ExtractFilePrinter {
    /// Opens a fresh extract. With a `publisher` the extract goes to a
    /// temporary file in the configured work dir, otherwise to the
    /// configured extract name. An existing file at that path is replaced.
    pub fn create(
        schema: ResultSchema,
        config: ExtractConfig,
        publisher: Option<DynServerConnection>,
    ) -> Result<Self, ExtractInitError> {
        let extract_path = if publisher.is_some() {
            config.work_dir().join(TEMP_EXTRACT_NAME)
        } else {
            PathBuf::from(config.extract_name())
        };
        if config.extract_name().is_empty() && publisher.is_none() {
            return Err(ExtractInitError::new(
                &extract_path,
                ExtractError::Io(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "no extract name configured",
                )),
            ));
        }
        if extract_path.exists() {
            info!("Overwriting existing extract {}", extract_path.display());
            fs::remove_file(&extract_path)
                .map_err(|e| ExtractInitError::new(&extract_path, e.into()))?;
        }
        let extract = Extract::create(&extract_path)
            .map_err(|e| ExtractInitError::new(&extract_path, e))?;
        Ok(Self {
            schema,
            config,
            publisher,
            extract_path,
            extract: Some(extract),
            started: Instant::now(),
            total_rows: 0,
        })
    }

    pub fn extract_path(&self) -> &Path {
        &self.extract_path
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Inserts the rows into the extract table, creating the table on first
    /// use. Rows that cannot be converted are skipped and reported; I/O
    /// failures abort the batch.
    pub fn insert_rows(&mut self, rows: &[Row]) -> Result<InsertReport, ExtractError> {
        let extract = self.extract.as_mut().ok_or(ExtractError::Closed)?;
        let table = extract_table(extract, &self.schema)?;
        let mut report = InsertReport::default();
        for (index, row) in rows.iter().enumerate() {
            match build_row(&self.schema, table.table_definition(), row) {
                Ok(extract_row) => {
                    table.insert(extract_row)?;
                    report.inserted += 1;
                }
                Err(error) => report.rejected.push(RejectedRow { index, error }),
            }
        }
        self.total_rows += report.inserted;
        info!(
            "{} rows inserted in {:?}",
            self.total_rows,
            self.started.elapsed()
        );
        Ok(report)
    }

    /// Completes the extract file. Closing twice is a no-op.
    pub fn close(&mut self) -> Result<(), ExtractError> {
        let mut extract = match self.extract.take() {
            Some(e) => e,
            None => return Ok(()),
        };
        let flush_start = Instant::now();
        // an empty result still gets its columns
        if !self.schema.is_empty() {
            extract_table(&mut extract, &self.schema)?;
        }
        extract.close()?;
        info!(
            "Flushed: {} rows in: {:?}",
            self.total_rows,
            flush_start.elapsed()
        );
        Ok(())
    }

    /// Uploads the closed extract using the configured connection. Does
    /// nothing when no publisher was given.
    pub fn publish(&mut self) -> Result<(), PublishError> {
        if self.extract.is_some() {
            return Err(PublishError::invalid_argument(
                "extract must be closed before publishing",
            ));
        }
        let conn = match self.publisher.as_mut() {
            Some(c) => c,
            None => return Ok(()),
        };
        let cfg = &self.config;
        info!("Publishing extract to server");
        info!("[Host] {}", cfg.host());
        info!("[Username] {}", cfg.username());
        info!("[Site ID] {}", cfg.site_id());
        info!("[Project] {}", cfg.project());
        info!("[Datasource] {}", cfg.datasource());
        info!("[Overwrite] {}", cfg.overwrite());

        conn.connect(cfg.host(), cfg.username(), cfg.password(), cfg.site_id())?;
        let published = conn.publish_extract(
            &self.extract_path,
            cfg.project(),
            cfg.datasource(),
            cfg.overwrite(),
        );
        let disconnected = conn.disconnect();
        published.and(disconnected)
    }
}

fn extract_table<'a>(
    extract: &'a mut Extract,
    schema: &ResultSchema,
) -> Result<&'a mut Table, ExtractError> {
    if extract.has_table(EXTRACT_TABLE) {
        extract.open_table(EXTRACT_TABLE)
    } else {
        extract.add_table(EXTRACT_TABLE, make_table_definition(schema))
    }
}

pub fn column_type(field_type: &FieldType) -> ColumnType {
    match field_type {
        FieldType::Varchar | FieldType::Other(_) => ColumnType::CharString,
        FieldType::Double => ColumnType::Double,
        FieldType::BigInt | FieldType::Integer => ColumnType::Integer,
        FieldType::Boolean => ColumnType::Boolean,
        FieldType::Date => ColumnType::Date,
        FieldType::Timestamp => ColumnType::DateTime,
    }
}

pub fn make_table_definition(schema: &ResultSchema) -> TableDefinition {
    info!("Table Schema:");
    let mut def = TableDefinition::new();
    def.set_default_collation(Collation::EnGb);
    for cd in schema.col_defs() {
        let ct = column_type(cd.field_type());
        def.add_column(cd.name(), ct);
        match cd.field_type() {
            FieldType::Other(type_name) => info!("[{} -> String] {}", type_name, cd.name()),
            _ => info!("[{}] {}", ct.label(), cd.name()),
        }
    }
    def
}

fn conversion_error(index: usize, field_type: &FieldType, v: &Value) -> ExtractError {
    ExtractError::column(
        index,
        &format!("cannot store {:?} in a {} column", v, field_type),
    )
}

fn set_value(
    row: &mut ExtractRow,
    index: usize,
    field_type: &FieldType,
    v: &Value,
) -> Result<(), ExtractError> {
    match (field_type, v) {
        (_, Value::Null) => row.set_null(index),
        (FieldType::Varchar | FieldType::Other(_), v) => {
            row.set_char_string(index, &format_value(v))
        }
        (_, Value::Str(s)) => match str2val(s, field_type) {
            Some(typed) => set_value(row, index, field_type, &typed),
            None => Err(ExtractError::column(
                index,
                &format!("cannot parse '{}' as {}", s, field_type),
            )),
        },
        (FieldType::Double, Value::Double(d)) => row.set_double(index, *d),
        (FieldType::Double, Value::BigInt(n)) => row.set_double(index, *n as f64),
        (FieldType::Double, Value::Integer(n)) => row.set_double(index, *n as f64),
        (FieldType::BigInt, Value::BigInt(n)) => row.set_long_integer(index, *n),
        (FieldType::BigInt, Value::Integer(n)) => row.set_long_integer(index, *n as i64),
        (FieldType::Integer, Value::Integer(n)) => row.set_integer(index, *n),
        (FieldType::Integer, Value::BigInt(n)) => match i32::try_from(*n) {
            Ok(n) => row.set_integer(index, n),
            Err(_) => Err(conversion_error(index, field_type, v)),
        },
        (FieldType::Boolean, Value::Bool(b)) => row.set_boolean(index, *b),
        (FieldType::Date, Value::Date(d)) => row.set_date(index, d.year(), d.month(), d.day()),
        (FieldType::Timestamp, Value::Timestamp(t)) => {
            let millis = (t.nanosecond() / 1_000_000).min(999);
            row.set_date_time(
                index,
                t.year(),
                t.month(),
                t.day(),
                t.hour(),
                t.minute(),
                t.second(),
                millis * 10,
            )
        }
        _ => Err(conversion_error(index, field_type, v)),
    }
}

fn build_row(
    schema: &ResultSchema,
    def: &TableDefinition,
    row: &[Value],
) -> Result<ExtractRow, ExtractError> {
    if row.len() != schema.len() {
        return Err(ExtractError::RowLength {
            expected: schema.len(),
            actual: row.len(),
        });
    }
    let mut out = ExtractRow::new(def);
    for (index, (v, cd)) in row.iter().zip(schema.col_defs()).enumerate() {
        set_value(&mut out, index, cd.field_type(), v)?;
    }
    Ok(out)
}

impl OutputPrinter for ExtractFilePrinter {
    fn print_rows(&mut self, rows: &[Row], _complete: bool) -> Result<(), DynError> {
        let report = self.insert_rows(rows)?;
        for rejected in &report.rejected {
            error!(
                "Row {} of batch not inserted: {}",
                rejected.index, rejected.error
            );
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), DynError> {
        if self.extract.is_none() {
            return Ok(());
        }
        self.close()?;
        if self.publisher.is_none() {
            return Ok(());
        }
        let publish_start = Instant::now();
        match self.publish() {
            Ok(()) => info!("Published extract in {:?}", publish_start.elapsed()),
            Err(err) => error!("{}", err),
        }
        if let Err(err) = fs::remove_file(&self.extract_path) {
            warn!(
                "Could not remove temporary extract {}: {}",
                self.extract_path.display(),
                err
            );
        }
        Ok(())
    }
}
