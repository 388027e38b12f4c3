use std::fs::File;
use std::io::{BufWriter, Write};
use std::sync::Arc;

use arrow::array::{
    ArrayRef, BooleanBuilder, Date32Builder, Float64Builder, Int64Builder, StringBuilder,
    TimestampMicrosecondBuilder,
};
use arrow::datatypes::SchemaRef;
use arrow::ipc::writer::FileWriter;
use arrow::record_batch::RecordBatch;
use log::debug;

use crate::extract::{Cell, ColumnType, ExtractError, ExtractRow, TableDefinition};

/// Rows buffered in memory before a record batch is written out.
pub const BATCH_ROWS: usize = 8192;

enum ColumnBuilder {
    CharString(StringBuilder),
    Double(Float64Builder),
    Integer(Int64Builder),
    Boolean(BooleanBuilder),
    Date(Date32Builder),
    DateTime(TimestampMicrosecondBuilder),
}

impl ColumnBuilder {
    fn new(column_type: ColumnType) -> Self {
        match column_type {
            ColumnType::CharString => ColumnBuilder::CharString(StringBuilder::new()),
            ColumnType::Double => ColumnBuilder::Double(Float64Builder::new()),
            ColumnType::Integer => ColumnBuilder::Integer(Int64Builder::new()),
            ColumnType::Boolean => ColumnBuilder::Boolean(BooleanBuilder::new()),
            ColumnType::Date => ColumnBuilder::Date(Date32Builder::new()),
            ColumnType::DateTime => ColumnBuilder::DateTime(TimestampMicrosecondBuilder::new()),
        }
    }

    // the caller has checked Cell::fits for this column
    fn append(&mut self, cell: &Cell) {
        match (self, cell) {
            (ColumnBuilder::CharString(b), Cell::Null) => b.append_null(),
            (ColumnBuilder::Double(b), Cell::Null) => b.append_null(),
            (ColumnBuilder::Integer(b), Cell::Null) => b.append_null(),
            (ColumnBuilder::Boolean(b), Cell::Null) => b.append_null(),
            (ColumnBuilder::Date(b), Cell::Null) => b.append_null(),
            (ColumnBuilder::DateTime(b), Cell::Null) => b.append_null(),
            (ColumnBuilder::CharString(b), Cell::CharString(s)) => b.append_value(s),
            (ColumnBuilder::Double(b), Cell::Double(d)) => b.append_value(*d),
            (ColumnBuilder::Integer(b), Cell::Integer(n)) => b.append_value(*n),
            (ColumnBuilder::Boolean(b), Cell::Boolean(v)) => b.append_value(*v),
            (ColumnBuilder::Date(b), Cell::Date(d)) => b.append_value(*d),
            (ColumnBuilder::DateTime(b), Cell::DateTime(t)) => b.append_value(*t),
            (_, c) => unreachable!("BUG: cell {:?} does not fit its column", c),
        }
    }

    fn finish(&mut self) -> ArrayRef {
        match self {
            ColumnBuilder::CharString(b) => Arc::new(b.finish()),
            ColumnBuilder::Double(b) => Arc::new(b.finish()),
            ColumnBuilder::Integer(b) => Arc::new(b.finish()),
            ColumnBuilder::Boolean(b) => Arc::new(b.finish()),
            ColumnBuilder::Date(b) => Arc::new(b.finish()),
            ColumnBuilder::DateTime(b) => Arc::new(b.finish()),
        }
    }
}

/// The single table of an extract. Obtained from `Extract::add_table` or
/// `Extract::open_table`.
pub struct Table {
    definition: TableDefinition,
    schema: SchemaRef,
    columns: Vec<ColumnBuilder>,
    pending: usize,
    inserted: usize,
    writer: FileWriter<BufWriter<File>>,
}

impl Table {
    pub(crate) fn create(
        definition: TableDefinition,
        out: BufWriter<File>,
    ) -> Result<Self, ExtractError> {
        if definition.column_count() == 0 {
            return Err(ExtractError::table("table definition has no columns"));
        }
        let schema: SchemaRef = Arc::new(definition.to_arrow_schema());
        let writer = FileWriter::try_new(out, &schema)?;
        let columns = definition
            .column_types()
            .into_iter()
            .map(ColumnBuilder::new)
            .collect();
        Ok(Self {
            definition,
            schema,
            columns,
            pending: 0,
            inserted: 0,
            writer,
        })
    }

    pub fn table_definition(&self) -> &TableDefinition {
        &self.definition
    }

    pub fn row_count(&self) -> usize {
        self.inserted
    }

    pub fn insert(&mut self, row: ExtractRow) -> Result<(), ExtractError> {
        if row.column_types() != self.definition.column_types().as_slice() {
            return Err(ExtractError::table(
                "row was built for a different table definition",
            ));
        }
        for (index, (cell, ct)) in row.cells().iter().zip(row.column_types()).enumerate() {
            if !cell.fits(*ct) {
                return Err(ExtractError::column(
                    index,
                    &format!("value does not fit a {} column", ct.label()),
                ));
            }
        }
        for (builder, cell) in self.columns.iter_mut().zip(row.cells()) {
            builder.append(cell);
        }
        self.pending += 1;
        self.inserted += 1;
        if self.pending >= BATCH_ROWS {
            self.write_batch()?;
        }
        Ok(())
    }

    fn write_batch(&mut self) -> Result<(), ExtractError> {
        if self.pending == 0 {
            return Ok(());
        }
        let arrays: Vec<ArrayRef> = self.columns.iter_mut().map(|c| c.finish()).collect();
        let batch = RecordBatch::try_new(Arc::clone(&self.schema), arrays)?;
        self.writer.write(&batch)?;
        debug!("Wrote extract batch of {} rows", self.pending);
        self.pending = 0;
        Ok(())
    }

    pub(crate) fn close(mut self) -> Result<(), ExtractError> {
        self.write_batch()?;
        self.writer.finish()?;
        let mut out = self.writer.into_inner()?;
        out.flush()?;
        Ok(())
    }
}
