//! Feature Row Assembly
//!
//! A [`RowBuilder`] is constructed once per model from the model's schema,
//! the default table and the set of fields the form always collects. Every
//! way a schema can drift away from what the form and defaults provide is
//! rejected at construction, so building a row from a complete form cannot
//! fail.

use crate::defaults::DefaultTable;
use crate::error::SchemaError;
use crate::field::Field;
use crate::form::UserInputs;
use crate::row::FeatureRow;
use crate::schema::FeatureSchema;
use crate::value::FeatureValue;
use std::collections::HashMap;
use tracing::{debug, info};

/// How one model column is filled
#[derive(Debug, Clone)]
struct ColumnPlan {
    /// Column name, as the model expects it
    name: String,
    field: Field,
    fallback: Option<FeatureValue>,
    /// Always supplied by the form
    exposed: bool,
}

/// Builds feature rows matching one model schema
#[derive(Debug, Clone)]
pub struct RowBuilder {
    schema: FeatureSchema,
    plan: Vec<ColumnPlan>,
}

impl RowBuilder {
    /// Reconcile `schema` against the exposed fields and the default table
    pub fn new(
        schema: FeatureSchema,
        defaults: &DefaultTable,
        exposed: &[Field],
    ) -> Result<Self, SchemaError> {
        let mut plan = Vec::with_capacity(schema.len());
        let mut claimed: HashMap<Field, &str> = HashMap::with_capacity(schema.len());

        for column in schema.columns() {
            let field = Field::from_column_name(&column.name)
                .ok_or_else(|| SchemaError::UnknownColumn(column.name.clone()))?;

            if let Some(first) = claimed.insert(field, &column.name) {
                return Err(SchemaError::DuplicateField {
                    field,
                    first: first.to_string(),
                    second: column.name.clone(),
                });
            }

            if column.kind != field.kind() {
                return Err(SchemaError::ColumnKindMismatch {
                    column: column.name.clone(),
                    field,
                    declared: column.kind,
                    expected: field.kind(),
                });
            }

            let fallback = defaults.get(field).cloned();
            match &fallback {
                Some(value) if value.kind() != field.kind() => {
                    return Err(SchemaError::DefaultKindMismatch {
                        field,
                        expected: field.kind(),
                        actual: value.kind(),
                    });
                }
                None if !exposed.contains(&field) => {
                    return Err(SchemaError::UncoveredColumn {
                        column: column.name.clone(),
                        field,
                    });
                }
                _ => {}
            }

            plan.push(ColumnPlan {
                name: column.name.clone(),
                field,
                fallback,
                exposed: exposed.contains(&field),
            });
        }

        info!(
            "Row builder ready: {} columns, {} exposed fields",
            plan.len(),
            exposed.len()
        );

        Ok(Self { schema, plan })
    }

    /// Schema this builder produces rows for
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Columns the form does not always supply, with the default that fills
    /// them, in model order
    pub fn defaulted_columns(&self) -> impl Iterator<Item = (&str, &FeatureValue)> + '_ {
        self.plan
            .iter()
            .filter(|c| !c.exposed)
            .filter_map(|c| c.fallback.as_ref().map(|v| (c.name.as_str(), v)))
    }

    /// Build a row in schema order, taking user values over defaults.
    /// Inputs for fields outside the schema are ignored.
    pub fn build(&self, inputs: &UserInputs) -> Result<FeatureRow, SchemaError> {
        let mut entries = Vec::with_capacity(self.plan.len());

        for column in &self.plan {
            let value = match inputs.get(&column.field) {
                Some(value) => {
                    if value.kind() != column.field.kind() {
                        return Err(SchemaError::InputKindMismatch {
                            field: column.field,
                            expected: column.field.kind(),
                            actual: value.kind(),
                        });
                    }
                    value.clone()
                }
                None => column
                    .fallback
                    .clone()
                    .ok_or(SchemaError::MissingInput(column.field))?,
            };
            entries.push((column.name.clone(), value));
        }

        let ignored = inputs
            .keys()
            .filter(|f| !self.plan.iter().any(|c| c.field == **f))
            .count();
        if ignored > 0 {
            debug!("Ignored {} inputs not in the model schema", ignored);
        }

        Ok(FeatureRow::from_entries(entries))
    }
}

/// One-shot row assembly: the fields present in `inputs` count as exposed
pub fn build_row(
    inputs: &UserInputs,
    defaults: &DefaultTable,
    schema: &FeatureSchema,
) -> Result<FeatureRow, SchemaError> {
    let exposed: Vec<Field> = inputs.keys().copied().collect();
    RowBuilder::new(schema.clone(), defaults, &exposed)?.build(inputs)
}
