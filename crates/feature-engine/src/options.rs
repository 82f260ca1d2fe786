//! Enumerated Form Options
//!
//! Every user-selectable categorical value is a closed enum. The serde name of
//! each variant is the level label the models were trained with; English
//! aliases are accepted on input.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Selectable cylinder counts
pub const CYLINDER_OPTIONS: [u8; 3] = [4, 6, 8];

/// Selectable door counts
pub const DOOR_OPTIONS: [u8; 2] = [2, 4];

/// A closed set of categorical levels
pub trait CategoricalOption: Copy + Sized + 'static {
    /// Every level, in display order
    const ALL: &'static [Self];

    /// Level label as seen by the model
    fn label(&self) -> &'static str;

    /// Labels of every level
    fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|o| o.label()).collect()
    }
}

/// Vehicle manufacturer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Brand {
    Audi,
    #[serde(rename = "BMW", alias = "Bmw")]
    Bmw,
    Chevrolet,
    Nissan,
    Toyota,
    Ford,
    Honda,
    #[serde(rename = "Otro", alias = "Other")]
    Other,
}

impl CategoricalOption for Brand {
    const ALL: &'static [Self] = &[
        Brand::Audi,
        Brand::Bmw,
        Brand::Chevrolet,
        Brand::Nissan,
        Brand::Toyota,
        Brand::Ford,
        Brand::Honda,
        Brand::Other,
    ];

    fn label(&self) -> &'static str {
        match self {
            Brand::Audi => "Audi",
            Brand::Bmw => "BMW",
            Brand::Chevrolet => "Chevrolet",
            Brand::Nissan => "Nissan",
            Brand::Toyota => "Toyota",
            Brand::Ford => "Ford",
            Brand::Honda => "Honda",
            Brand::Other => "Otro",
        }
    }
}

/// Transmission type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transmission {
    #[serde(rename = "Automática", alias = "Automatic", alias = "Automatica")]
    Automatic,
    Manual,
}

impl CategoricalOption for Transmission {
    const ALL: &'static [Self] = &[Transmission::Automatic, Transmission::Manual];

    fn label(&self) -> &'static str {
        match self {
            Transmission::Automatic => "Automática",
            Transmission::Manual => "Manual",
        }
    }
}

/// Body style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyStyle {
    Sedan,
    #[serde(rename = "SUV", alias = "Suv")]
    Suv,
    Coupe,
    Wagon,
    Hatchback,
}

impl CategoricalOption for BodyStyle {
    const ALL: &'static [Self] = &[
        BodyStyle::Sedan,
        BodyStyle::Suv,
        BodyStyle::Coupe,
        BodyStyle::Wagon,
        BodyStyle::Hatchback,
    ];

    fn label(&self) -> &'static str {
        match self {
            BodyStyle::Sedan => "Sedan",
            BodyStyle::Suv => "SUV",
            BodyStyle::Coupe => "Coupe",
            BodyStyle::Wagon => "Wagon",
            BodyStyle::Hatchback => "Hatchback",
        }
    }
}

/// Fuel type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fuel {
    #[serde(rename = "Gasolina", alias = "Gasoline")]
    Gasoline,
    Diesel,
    #[serde(rename = "Híbrido", alias = "Hybrid", alias = "Hibrido")]
    Hybrid,
}

impl CategoricalOption for Fuel {
    const ALL: &'static [Self] = &[Fuel::Gasoline, Fuel::Diesel, Fuel::Hybrid];

    fn label(&self) -> &'static str {
        match self {
            Fuel::Gasoline => "Gasolina",
            Fuel::Diesel => "Diesel",
            Fuel::Hybrid => "Híbrido",
        }
    }
}

/// Size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeClass {
    Compact,
    Midsize,
    Large,
}

impl CategoricalOption for SizeClass {
    const ALL: &'static [Self] = &[SizeClass::Compact, SizeClass::Midsize, SizeClass::Large];

    fn label(&self) -> &'static str {
        match self {
            SizeClass::Compact => "Compact",
            SizeClass::Midsize => "Midsize",
            SizeClass::Large => "Large",
        }
    }
}

/// Drivetrain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Drivetrain {
    #[serde(rename = "Delantera", alias = "Front")]
    Front,
    #[serde(rename = "Trasera", alias = "Rear")]
    Rear,
    #[serde(rename = "Integral", alias = "AWD")]
    AllWheel,
}

impl CategoricalOption for Drivetrain {
    const ALL: &'static [Self] = &[Drivetrain::Front, Drivetrain::Rear, Drivetrain::AllWheel];

    fn label(&self) -> &'static str {
        match self {
            Drivetrain::Front => "Delantera",
            Drivetrain::Rear => "Trasera",
            Drivetrain::AllWheel => "Integral",
        }
    }
}

macro_rules! display_as_label {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )*
    };
}

display_as_label!(Brand, Transmission, BodyStyle, Fuel, SizeClass, Drivetrain);
