use std::collections::HashMap;
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, TimeUnit};

/// Schema metadata key holding the table's default collation.
pub const COLLATION_METADATA_KEY: &str = "extract.collation";

/// Storage type of an extract column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    CharString,
    Double,
    Integer,
    Boolean,
    Date,
    DateTime,
}

impl ColumnType {
    pub fn data_type(&self) -> DataType {
        match self {
            ColumnType::CharString => DataType::Utf8,
            ColumnType::Double => DataType::Float64,
            ColumnType::Integer => DataType::Int64,
            ColumnType::Boolean => DataType::Boolean,
            ColumnType::Date => DataType::Date32,
            ColumnType::DateTime => DataType::Timestamp(TimeUnit::Microsecond, None),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ColumnType::CharString => "String",
            ColumnType::Double => "Double",
            ColumnType::Integer => "Integer",
            ColumnType::Boolean => "Boolean",
            ColumnType::Date => "Date",
            ColumnType::DateTime => "Datetime",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Collation {
    #[default]
    Binary,
    EnGb,
}

impl Collation {
    pub fn name(&self) -> &'static str {
        match self {
            Collation::Binary => "binary",
            Collation::EnGb => "en_GB",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TableDefinition {
    columns: Vec<(Arc<str>, ColumnType)>,
    collation: Collation,
}

impl TableDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_default_collation(&mut self, collation: Collation) {
        self.collation = collation;
    }

    pub fn default_collation(&self) -> Collation {
        self.collation
    }

    pub fn add_column(&mut self, name: &str, column_type: ColumnType) {
        self.columns.push((Arc::from(name), column_type));
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_types(&self) -> Vec<ColumnType> {
        self.columns.iter().map(|(_, t)| *t).collect()
    }

    pub fn to_arrow_schema(&self) -> Schema {
        let fields: Vec<Field> = self
            .columns
            .iter()
            .map(|(name, ct)| Field::new(name.as_ref(), ct.data_type(), true))
            .collect();
        let mut metadata = HashMap::new();
        metadata.insert(
            COLLATION_METADATA_KEY.to_string(),
            self.collation.name().to_string(),
        );
        Schema::new_with_metadata(fields, metadata)
    }
}
