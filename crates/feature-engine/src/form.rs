//! Vehicle Form Input

use crate::field::Field;
use crate::options::{BodyStyle, Brand, CategoricalOption, Drivetrain, Fuel, SizeClass, Transmission};
use crate::value::FeatureValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Values supplied by the user, keyed by field
pub type UserInputs = BTreeMap<Field, FeatureValue>;

/// Manufacture year of a vehicle that is `age_years` old in `current_year`
pub fn manufacture_year(current_year: i32, age_years: u32) -> i32 {
    current_year.saturating_sub(i32::try_from(age_years).unwrap_or(i32::MAX))
}

/// Attributes the user fills in to request a valuation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VehicleForm {
    pub brand: Brand,
    /// Engine power (CV)
    pub power_cv: u32,
    /// Vehicle age in years
    pub age_years: u32,
    pub fuel: Fuel,
    pub transmission: Transmission,
    pub body_style: BodyStyle,
    pub cylinders: u8,
    pub doors: u8,
    /// Falls back to the default table when omitted
    #[serde(default)]
    pub size: Option<SizeClass>,
    /// Falls back to the default table when omitted
    #[serde(default)]
    pub drivetrain: Option<Drivetrain>,
}

impl VehicleForm {
    /// Fields every submitted form supplies
    pub const EXPOSED_FIELDS: [Field; 8] = [
        Field::Brand,
        Field::Power,
        Field::Year,
        Field::Fuel,
        Field::Transmission,
        Field::Style,
        Field::Cylinders,
        Field::Doors,
    ];

    /// Convert to field inputs, deriving the manufacture year from the age
    pub fn to_inputs(&self, current_year: i32) -> UserInputs {
        let mut inputs = UserInputs::new();
        inputs.insert(Field::Brand, self.brand.label().into());
        inputs.insert(Field::Power, self.power_cv.into());
        inputs.insert(
            Field::Year,
            manufacture_year(current_year, self.age_years).into(),
        );
        inputs.insert(Field::Fuel, self.fuel.label().into());
        inputs.insert(Field::Transmission, self.transmission.label().into());
        inputs.insert(Field::Style, self.body_style.label().into());
        inputs.insert(Field::Cylinders, self.cylinders.into());
        inputs.insert(Field::Doors, self.doors.into());
        if let Some(size) = self.size {
            inputs.insert(Field::Size, size.label().into());
        }
        if let Some(drivetrain) = self.drivetrain {
            inputs.insert(Field::Drivetrain, drivetrain.label().into());
        }
        inputs
    }
}

impl Default for VehicleForm {
    /// Initial selections of the form
    fn default() -> Self {
        Self {
            brand: Brand::Audi,
            power_cv: 150,
            age_years: 5,
            fuel: Fuel::Gasoline,
            transmission: Transmission::Automatic,
            body_style: BodyStyle::Sedan,
            cylinders: 4,
            doors: 4,
            size: None,
            drivetrain: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manufacture_year() {
        assert_eq!(manufacture_year(2024, 5), 2019);
        assert_eq!(manufacture_year(2024, 0), 2024);
        for age in 0..=25 {
            assert_eq!(manufacture_year(2030, age), 2030 - age as i32);
        }
    }

    #[test]
    fn test_to_inputs() {
        let form = VehicleForm {
            brand: Brand::Toyota,
            ..Default::default()
        };
        let inputs = form.to_inputs(2024);

        assert_eq!(inputs.len(), 8);
        assert_eq!(inputs[&Field::Brand], FeatureValue::from("Toyota"));
        assert_eq!(inputs[&Field::Year], FeatureValue::from(2019));
        assert_eq!(inputs[&Field::Transmission], FeatureValue::from("Automática"));
        assert!(!inputs.contains_key(&Field::Drivetrain));
        for field in VehicleForm::EXPOSED_FIELDS {
            assert!(inputs.contains_key(&field), "{}", field);
        }
    }

    #[test]
    fn test_optional_fields() {
        let form = VehicleForm {
            drivetrain: Some(Drivetrain::AllWheel),
            size: Some(SizeClass::Large),
            ..Default::default()
        };
        let inputs = form.to_inputs(2024);
        assert_eq!(inputs[&Field::Drivetrain], FeatureValue::from("Integral"));
        assert_eq!(inputs[&Field::Size], FeatureValue::from("Large"));
    }

    #[test]
    fn test_deserialize_with_english_labels() {
        let json = r#"{
            "brand": "Toyota",
            "power_cv": 150,
            "age_years": 5,
            "fuel": "Gasoline",
            "transmission": "Automatic",
            "body_style": "Sedan",
            "cylinders": 4,
            "doors": 4
        }"#;
        let form: VehicleForm = serde_json::from_str(json).unwrap();
        assert_eq!(form.brand, Brand::Toyota);
        assert_eq!(form.fuel, Fuel::Gasoline);
        assert_eq!(form.drivetrain, None);
    }
}
