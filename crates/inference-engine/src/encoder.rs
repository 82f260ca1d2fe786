//! Feature Row Encoding
//!
//! Turns a feature row into the dense numeric vector the estimator was fit
//! on: numeric columns are standard-scaled, categorical columns one-hot
//! encoded. Unknown levels are an error, never an all-zero vector.

use crate::InferenceError;
use feature_engine::{ColumnSpec, FeatureKind, FeatureRow, FeatureSchema};
use serde::{Deserialize, Serialize};

/// How a single column is encoded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnEncoding {
    /// `(x - mean) / scale`
    Numeric { mean: f64, scale: f64 },
    /// One slot per level, in order
    Categorical { levels: Vec<String> },
}

impl ColumnEncoding {
    /// Value kind this encoding accepts
    pub fn kind(&self) -> FeatureKind {
        match self {
            ColumnEncoding::Numeric { .. } => FeatureKind::Numeric,
            ColumnEncoding::Categorical { .. } => FeatureKind::Categorical,
        }
    }

    /// Number of encoded slots
    pub fn width(&self) -> usize {
        match self {
            ColumnEncoding::Numeric { .. } => 1,
            ColumnEncoding::Categorical { levels } => levels.len(),
        }
    }
}

/// Encoder for one model's input columns
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    columns: Vec<(String, ColumnEncoding)>,
    width: usize,
}

impl FeatureEncoder {
    /// Create an encoder, checking every encoding is usable
    pub fn new(columns: Vec<(String, ColumnEncoding)>) -> Result<Self, InferenceError> {
        for (name, encoding) in &columns {
            match encoding {
                ColumnEncoding::Numeric { mean, scale } => {
                    if !mean.is_finite() || !scale.is_finite() || *scale <= 0.0 {
                        return Err(InferenceError::InvalidArtifact(format!(
                            "column '{}' has invalid scaling (mean={}, scale={})",
                            name, mean, scale
                        )));
                    }
                }
                ColumnEncoding::Categorical { levels } => {
                    if levels.is_empty() {
                        return Err(InferenceError::InvalidArtifact(format!(
                            "column '{}' has no levels",
                            name
                        )));
                    }
                }
            }
        }

        let width = columns.iter().map(|(_, e)| e.width()).sum();
        Ok(Self { columns, width })
    }

    /// Schema the encoder expects
    pub fn schema(&self) -> Result<FeatureSchema, InferenceError> {
        let specs = self
            .columns
            .iter()
            .map(|(name, encoding)| ColumnSpec::new(name.clone(), encoding.kind()))
            .collect();
        Ok(FeatureSchema::new(specs)?)
    }

    /// Levels of a categorical column; `None` for numeric or unknown columns
    pub fn levels(&self, column: &str) -> Option<&[String]> {
        self.columns.iter().find(|(name, _)| name == column).and_then(|(_, encoding)| {
            match encoding {
                ColumnEncoding::Categorical { levels } => Some(levels.as_slice()),
                ColumnEncoding::Numeric { .. } => None,
            }
        })
    }

    /// Length of encoded vectors
    pub fn width(&self) -> usize {
        self.width
    }

    /// Encode a row; its columns must match the encoder's exactly, in order
    pub fn encode(&self, row: &FeatureRow) -> Result<Vec<f64>, InferenceError> {
        let same_columns = row.len() == self.columns.len()
            && row
                .columns()
                .zip(&self.columns)
                .all(|(actual, (expected, _))| actual == expected);
        if !same_columns {
            return Err(InferenceError::ColumnMismatch {
                expected: self.columns.iter().map(|(n, _)| n.clone()).collect(),
                actual: row.columns().map(str::to_string).collect(),
            });
        }

        let mut encoded = Vec::with_capacity(self.width);
        for ((name, encoding), (_, value)) in self.columns.iter().zip(row.iter()) {
            match encoding {
                ColumnEncoding::Numeric { mean, scale } => {
                    let x = value.as_f64().ok_or_else(|| InferenceError::WrongKind {
                        column: name.clone(),
                        expected: FeatureKind::Numeric,
                    })?;
                    encoded.push((x - mean) / scale);
                }
                ColumnEncoding::Categorical { levels } => {
                    let level = value.as_str().ok_or_else(|| InferenceError::WrongKind {
                        column: name.clone(),
                        expected: FeatureKind::Categorical,
                    })?;
                    let hot = levels.iter().position(|l| l == level).ok_or_else(|| {
                        InferenceError::UnknownCategory {
                            column: name.clone(),
                            value: level.to_string(),
                        }
                    })?;
                    encoded.extend((0..levels.len()).map(|i| if i == hot { 1.0 } else { 0.0 }));
                }
            }
        }

        Ok(encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feature_engine::FeatureValue;

    fn encoder() -> FeatureEncoder {
        FeatureEncoder::new(vec![
            (
                "Marca".to_string(),
                ColumnEncoding::Categorical {
                    levels: vec!["Audi".into(), "Toyota".into(), "Otro".into()],
                },
            ),
            (
                "CV".to_string(),
                ColumnEncoding::Numeric {
                    mean: 100.0,
                    scale: 50.0,
                },
            ),
        ])
        .unwrap()
    }

    fn row(brand: &str, power: f64) -> FeatureRow {
        FeatureRow::from_entries(vec![
            ("Marca".to_string(), FeatureValue::from(brand)),
            ("CV".to_string(), FeatureValue::from(power)),
        ])
    }

    #[test]
    fn test_encode() {
        let encoded = encoder().encode(&row("Toyota", 200.0)).unwrap();
        assert_eq!(encoded, vec![0.0, 1.0, 0.0, 2.0]);
        assert_eq!(encoder().width(), 4);
    }

    #[test]
    fn test_levels() {
        let encoder = encoder();
        assert_eq!(
            encoder.levels("Marca"),
            Some(&["Audi".to_string(), "Toyota".to_string(), "Otro".to_string()][..])
        );
        assert_eq!(encoder.levels("CV"), None);
        assert_eq!(encoder.levels("Mercado"), None);
    }

    #[test]
    fn test_unknown_level() {
        let err = encoder().encode(&row("Tesla", 200.0)).unwrap_err();
        assert!(matches!(err, InferenceError::UnknownCategory { value, .. } if value == "Tesla"));
    }

    #[test]
    fn test_column_order_mismatch() {
        let swapped = FeatureRow::from_entries(vec![
            ("CV".to_string(), FeatureValue::from(200.0)),
            ("Marca".to_string(), FeatureValue::from("Audi")),
        ]);
        assert!(matches!(
            encoder().encode(&swapped),
            Err(InferenceError::ColumnMismatch { .. })
        ));
    }

    #[test]
    fn test_missing_column() {
        let short = FeatureRow::from_entries(vec![("Marca".to_string(), FeatureValue::from("Audi"))]);
        assert!(matches!(
            encoder().encode(&short),
            Err(InferenceError::ColumnMismatch { .. })
        ));
    }

    #[test]
    fn test_wrong_kind() {
        let bad = FeatureRow::from_entries(vec![
            ("Marca".to_string(), FeatureValue::from("Audi")),
            ("CV".to_string(), FeatureValue::from("fast")),
        ]);
        assert!(matches!(
            encoder().encode(&bad),
            Err(InferenceError::WrongKind { expected: FeatureKind::Numeric, .. })
        ));
    }

    #[test]
    fn test_invalid_scale_rejected() {
        let result = FeatureEncoder::new(vec![(
            "CV".to_string(),
            ColumnEncoding::Numeric {
                mean: 0.0,
                scale: 0.0,
            },
        )]);
        assert!(matches!(result, Err(InferenceError::InvalidArtifact(_))));
    }
}
