use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use arrow::datatypes::Schema;
use arrow::ipc::writer::FileWriter;

use crate::extract::{ExtractError, Table, TableDefinition};

/// The only table name an extract supports.
pub const EXTRACT_TABLE: &str = "Extract";

/// A typed columnar extract file, written as an Arrow IPC file.
///
/// The file is created when the extract is opened and completed by
/// [`Extract::close`]. An extract holds at most one table, named
/// [`EXTRACT_TABLE`].
pub struct Extract {
    out: Option<BufWriter<File>>,
    table: Option<Table>,
}

impl Extract {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, ExtractError> {
        let path = path.as_ref().to_path_buf();
        let file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(ExtractError::AlreadyExists(path))
            }
            Err(e) => return Err(ExtractError::Io(e)),
        };
        Ok(Self {
            out: Some(BufWriter::new(file)),
            table: None,
        })
    }

    pub fn has_table(&self, name: &str) -> bool {
        name == EXTRACT_TABLE && self.table.is_some()
    }

    pub fn add_table(
        &mut self,
        name: &str,
        definition: TableDefinition,
    ) -> Result<&mut Table, ExtractError> {
        if name != EXTRACT_TABLE {
            return Err(ExtractError::Table(format!(
                "unsupported table name '{}', only '{}' is allowed",
                name, EXTRACT_TABLE
            )));
        }
        let out = self
            .out
            .take()
            .ok_or_else(|| ExtractError::table("table already exists"))?;
        let table = Table::create(definition, out)?;
        Ok(self.table.insert(table))
    }

    pub fn open_table(&mut self, name: &str) -> Result<&mut Table, ExtractError> {
        if name != EXTRACT_TABLE {
            return Err(ExtractError::Table(format!("no such table '{}'", name)));
        }
        self.table
            .as_mut()
            .ok_or_else(|| ExtractError::table("table has not been added"))
    }

    /// Writes any buffered rows and the file footer.
    pub fn close(self) -> Result<(), ExtractError> {
        match (self.table, self.out) {
            (Some(table), _) => table.close(),
            (None, Some(out)) => {
                let mut writer = FileWriter::try_new(out, &Schema::empty())?;
                writer.finish()?;
                writer.into_inner()?.flush()?;
                Ok(())
            }
            (None, None) => Ok(()),
        }
    }
}
