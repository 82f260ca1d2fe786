//! Form Option Routes

use axum::{extract::State, Json};
use feature_engine::{
    BodyStyle, Brand, CategoricalOption, Drivetrain, Fuel, SizeClass, Transmission, VehicleForm,
};
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;

/// Numeric slider definition
#[derive(Debug, Serialize)]
pub struct RangeOption {
    pub min: u32,
    pub max: u32,
    pub step: u32,
}

/// Everything a client needs to render the valuation form
#[derive(Debug, Serialize)]
pub struct FormOptions {
    pub brands: Vec<&'static str>,
    pub fuels: Vec<&'static str>,
    pub transmissions: Vec<&'static str>,
    pub body_styles: Vec<&'static str>,
    pub sizes: Vec<&'static str>,
    pub drivetrains: Vec<&'static str>,
    pub cylinders: Vec<u8>,
    pub doors: Vec<u8>,
    pub power_cv: RangeOption,
    pub age_years: RangeOption,
    /// Initial selections
    pub initial: VehicleForm,
}

/// Get the form definition
pub async fn get_options(State(state): State<Arc<AppState>>) -> Json<FormOptions> {
    let config = state.validator.config();

    Json(FormOptions {
        brands: Brand::labels(),
        fuels: Fuel::labels(),
        transmissions: Transmission::labels(),
        body_styles: BodyStyle::labels(),
        sizes: SizeClass::labels(),
        drivetrains: Drivetrain::labels(),
        cylinders: config.cylinder_options.clone(),
        doors: config.door_options.clone(),
        power_cv: RangeOption {
            min: config.power_range.0,
            max: config.power_range.1,
            step: config.power_step,
        },
        age_years: RangeOption {
            min: config.age_range.0,
            max: config.age_range.1,
            step: 1,
        },
        initial: VehicleForm::default(),
    })
}
