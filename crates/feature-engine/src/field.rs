//! Known Vehicle Fields

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of value a feature column holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    /// Real-valued column, fed to the model as a number
    Numeric,
    /// String-valued column with a closed set of levels
    Categorical,
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureKind::Numeric => write!(f, "numeric"),
            FeatureKind::Categorical => write!(f, "categorical"),
        }
    }
}

/// A vehicle attribute the valuation model may be trained on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Manufacturer
    Brand,
    /// Engine power (CV)
    Power,
    /// Manufacture year
    Year,
    /// Market popularity score
    Popularity,
    /// City fuel consumption
    CityConsumption,
    /// Highway fuel consumption
    HighwayConsumption,
    /// Cylinder count
    Cylinders,
    /// Size class
    Size,
    /// Transmission type
    Transmission,
    /// Door count
    Doors,
    /// Drivetrain
    Drivetrain,
    /// Market segment
    Market,
    /// Body style
    Style,
    /// Fuel type
    Fuel,
}

impl Field {
    /// Every known field
    pub const ALL: [Field; 14] = [
        Field::Brand,
        Field::Power,
        Field::Year,
        Field::Popularity,
        Field::CityConsumption,
        Field::HighwayConsumption,
        Field::Cylinders,
        Field::Size,
        Field::Transmission,
        Field::Doors,
        Field::Drivetrain,
        Field::Market,
        Field::Style,
        Field::Fuel,
    ];

    /// Column name used by the trained models
    pub fn column_name(&self) -> &'static str {
        match self {
            Field::Brand => "Marca",
            Field::Power => "CV",
            Field::Year => "Año",
            Field::Popularity => "Popularidad",
            Field::CityConsumption => "Consumo Ciudad",
            Field::HighwayConsumption => "Consumo Carretera",
            Field::Cylinders => "Cilindros",
            Field::Size => "Tamaño",
            Field::Transmission => "Transmisión",
            Field::Doors => "Puertas",
            Field::Drivetrain => "Tracción",
            Field::Market => "Mercado",
            Field::Style => "Estilo",
            Field::Fuel => "Combustible",
        }
    }

    /// Other column names that refer to the same field
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Field::Power => &["Potencia (CV)"],
            _ => &[],
        }
    }

    /// Value kind of this field
    pub fn kind(&self) -> FeatureKind {
        match self {
            Field::Power
            | Field::Year
            | Field::Popularity
            | Field::CityConsumption
            | Field::HighwayConsumption
            | Field::Cylinders
            | Field::Doors => FeatureKind::Numeric,
            Field::Brand
            | Field::Size
            | Field::Transmission
            | Field::Drivetrain
            | Field::Market
            | Field::Style
            | Field::Fuel => FeatureKind::Categorical,
        }
    }

    /// Resolve a model column name (canonical or alias) to its field
    pub fn from_column_name(name: &str) -> Option<Field> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.column_name() == name || field.aliases().contains(&name))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}
