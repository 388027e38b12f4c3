use chrono::{Datelike, NaiveDate};

use crate::extract::{ColumnType, ExtractError, TableDefinition};

/// Days between 0001-01-01 and 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;
/// Sub-second ticks per second for datetime columns (100 microsecond ticks).
pub const TICKS_PER_SECOND: u32 = 10_000;
const MICROS_PER_TICK: u32 = 1_000_000 / TICKS_PER_SECOND;

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    CharString(String),
    Double(f64),
    Integer(i64),
    Boolean(bool),
    /// days since the unix epoch
    Date(i32),
    /// microseconds since the unix epoch
    DateTime(i64),
}

impl Cell {
    pub fn fits(&self, column_type: ColumnType) -> bool {
        matches!(
            (self, column_type),
            (Cell::Null, _)
                | (Cell::CharString(_), ColumnType::CharString)
                | (Cell::Double(_), ColumnType::Double)
                | (Cell::Integer(_), ColumnType::Integer)
                | (Cell::Boolean(_), ColumnType::Boolean)
                | (Cell::Date(_), ColumnType::Date)
                | (Cell::DateTime(_), ColumnType::DateTime)
        )
    }
}

/// One row being assembled for insertion into a table. Cells start out null.
#[derive(Debug, Clone)]
pub struct ExtractRow {
    column_types: Vec<ColumnType>,
    cells: Vec<Cell>,
}

impl ExtractRow {
    pub fn new(def: &TableDefinition) -> Self {
        let column_types = def.column_types();
        let cells = vec![Cell::Null; column_types.len()];
        Self {
            column_types,
            cells,
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn column_types(&self) -> &[ColumnType] {
        &self.column_types
    }

    fn set(&mut self, index: usize, expected: ColumnType, cell: Cell) -> Result<(), ExtractError> {
        match self.column_types.get(index) {
            None => Err(ExtractError::column(index, "column index out of range")),
            Some(&ct) if ct != expected => Err(ExtractError::column(
                index,
                &format!(
                    "cannot set a {} value on a {} column",
                    expected.label(),
                    ct.label()
                ),
            )),
            Some(_) => {
                self.cells[index] = cell;
                Ok(())
            }
        }
    }

    pub fn set_null(&mut self, index: usize) -> Result<(), ExtractError> {
        if index >= self.cells.len() {
            return Err(ExtractError::column(index, "column index out of range"));
        }
        self.cells[index] = Cell::Null;
        Ok(())
    }

    pub fn set_char_string(&mut self, index: usize, s: &str) -> Result<(), ExtractError> {
        self.set(index, ColumnType::CharString, Cell::CharString(s.to_string()))
    }

    pub fn set_double(&mut self, index: usize, d: f64) -> Result<(), ExtractError> {
        self.set(index, ColumnType::Double, Cell::Double(d))
    }

    pub fn set_long_integer(&mut self, index: usize, n: i64) -> Result<(), ExtractError> {
        self.set(index, ColumnType::Integer, Cell::Integer(n))
    }

    pub fn set_integer(&mut self, index: usize, n: i32) -> Result<(), ExtractError> {
        self.set(index, ColumnType::Integer, Cell::Integer(n as i64))
    }

    pub fn set_boolean(&mut self, index: usize, b: bool) -> Result<(), ExtractError> {
        self.set(index, ColumnType::Boolean, Cell::Boolean(b))
    }

    pub fn set_date(
        &mut self,
        index: usize,
        year: i32,
        month: u32,
        day: u32,
    ) -> Result<(), ExtractError> {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            ExtractError::column(index, &format!("invalid date {}-{}-{}", year, month, day))
        })?;
        let days = date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE;
        self.set(index, ColumnType::Date, Cell::Date(days))
    }

    /// `frac` is the sub-second part in ticks of 1/10000 second.
    #[allow(clippy::too_many_arguments)]
    pub fn set_date_time(
        &mut self,
        index: usize,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        frac: u32,
    ) -> Result<(), ExtractError> {
        if frac >= TICKS_PER_SECOND {
            return Err(ExtractError::column(
                index,
                &format!("sub-second tick {} out of range", frac),
            ));
        }
        let dt = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_micro_opt(hour, minute, second, frac * MICROS_PER_TICK))
            .ok_or_else(|| {
                ExtractError::column(
                    index,
                    &format!(
                        "invalid datetime {}-{}-{} {}:{}:{}",
                        year, month, day, hour, minute, second
                    ),
                )
            })?;
        let micros = dt.and_utc().timestamp_micros();
        self.set(index, ColumnType::DateTime, Cell::DateTime(micros))
    }
}
