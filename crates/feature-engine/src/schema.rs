//! Model Feature Schema

use crate::error::SchemaError;
use crate::field::{FeatureKind, Field};
use serde::Serialize;
use std::collections::HashSet;

/// One column the model expects
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    /// Column name as used in training
    pub name: String,
    /// Value kind
    pub kind: FeatureKind,
}

impl ColumnSpec {
    /// Create a column spec
    pub fn new(name: impl Into<String>, kind: FeatureKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Ordered, duplicate-free list of columns a model was fit on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FeatureSchema {
    columns: Vec<ColumnSpec>,
}

impl FeatureSchema {
    /// Create a schema, rejecting empty or duplicated column lists
    pub fn new(columns: Vec<ColumnSpec>) -> Result<Self, SchemaError> {
        if columns.is_empty() {
            return Err(SchemaError::Empty);
        }

        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(SchemaError::DuplicateColumn(column.name.clone()));
            }
        }

        Ok(Self { columns })
    }

    /// Schema made of the canonical columns of the given fields
    pub fn from_fields(fields: &[Field]) -> Result<Self, SchemaError> {
        Self::new(
            fields
                .iter()
                .map(|f| ColumnSpec::new(f.column_name(), f.kind()))
                .collect(),
        )
    }

    /// Columns in model order
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Column names in model order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always false for a constructed schema
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_rejected() {
        assert_eq!(FeatureSchema::new(Vec::new()), Err(SchemaError::Empty));
    }

    #[test]
    fn test_duplicate_rejected() {
        let result = FeatureSchema::new(vec![
            ColumnSpec::new("CV", FeatureKind::Numeric),
            ColumnSpec::new("CV", FeatureKind::Numeric),
        ]);
        assert_eq!(result, Err(SchemaError::DuplicateColumn("CV".to_string())));
    }

    #[test]
    fn test_from_fields_preserves_order() {
        let schema = FeatureSchema::from_fields(&[Field::Year, Field::Brand, Field::Power]).unwrap();
        let names: Vec<_> = schema.names().collect();
        assert_eq!(names, vec!["Año", "Marca", "CV"]);
        assert_eq!(schema.columns()[1].kind, FeatureKind::Categorical);
    }
}
