//! Feature Engine
//!
//! Assembles vehicle feature rows in exactly the column order a valuation
//! model was trained on, filling fields the user did not provide from a
//! static default table.

mod builder;
mod defaults;
mod error;
mod field;
mod form;
mod options;
mod row;
mod schema;
mod value;

pub use builder::{build_row, RowBuilder};
pub use defaults::DefaultTable;
pub use error::SchemaError;
pub use field::{FeatureKind, Field};
pub use form::{manufacture_year, UserInputs, VehicleForm};
pub use options::{
    BodyStyle, Brand, CategoricalOption, Drivetrain, Fuel, SizeClass, Transmission,
    CYLINDER_OPTIONS, DOOR_OPTIONS,
};
pub use row::FeatureRow;
pub use schema::{ColumnSpec, FeatureSchema};
pub use value::FeatureValue;
