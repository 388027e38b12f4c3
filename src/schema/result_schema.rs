use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::schema::FieldType;

#[derive(Clone, Debug, PartialEq)]
pub struct ColumnDef {
    name: Arc<str>,
    field_type: FieldType,
}

impl ColumnDef {
    pub fn new(name: &str, field_type: FieldType) -> Self {
        Self {
            name: Arc::from(name),
            field_type,
        }
    }

    pub fn name(&self) -> &Arc<str> {
        &self.name
    }

    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }
}

#[derive(Debug, Clone)]
pub struct SchemaError(String);

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Schema error: {}", self.0)
    }
}

impl Error for SchemaError {}

/// Column layout of a query result: parallel field names and types.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultSchema {
    col_defs: Vec<ColumnDef>,
}

impl ResultSchema {
    pub fn new<S: AsRef<str>>(
        field_names: &[S],
        field_types: &[FieldType],
    ) -> Result<Self, SchemaError> {
        if field_names.len() != field_types.len() {
            return Err(SchemaError(format!(
                "{} field names but {} field types",
                field_names.len(),
                field_types.len()
            )));
        }
        let col_defs = field_names
            .iter()
            .zip(field_types)
            .map(|(n, t)| ColumnDef::new(n.as_ref(), t.clone()))
            .collect();
        Ok(Self { col_defs })
    }

    pub fn col_defs(&self) -> &[ColumnDef] {
        &self.col_defs
    }

    pub fn field_names(&self) -> Vec<String> {
        self.col_defs.iter().map(|cd| cd.name.to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.col_defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.col_defs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_mismatched_lengths() {
        let ret = ResultSchema::new(&["a", "b"], &[FieldType::Varchar]);
        assert!(ret.is_err());
    }

    #[test]
    fn new_works() {
        let schema =
            ResultSchema::new(&["id", "_name"], &[FieldType::BigInt, FieldType::Varchar]).unwrap();
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.field_names(), vec!["id", "_name"]);
        assert_eq!(schema.col_defs()[0].field_type(), &FieldType::BigInt);
    }
}
