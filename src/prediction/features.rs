use crate::core::error::PredictionError;
use crate::models::claim::{FormInput, Gender, VehicleCategory};
use std::collections::{HashMap, HashSet};

pub const DRIVER_AGE: &str = "driver_age";
pub const ANNUAL_INCOME: &str = "annual_income";
pub const MONTHLY_PREMIUM: &str = "monthly_premium";
pub const DEPENDENTS: &str = "dependents";

/// Numeric columns every schema has to carry
pub const REQUIRED_COLUMNS: [&str; 4] = [DRIVER_AGE, ANNUAL_INCOME, MONTHLY_PREMIUM, DEPENDENTS];

pub fn gender_column(gender: Gender) -> String {
    format!("gender_{}", gender.as_str())
}

pub fn vehicle_column(vehicle: VehicleCategory) -> String {
    format!("vehicle_category_{}", vehicle.as_str())
}

/// Every column the encoder can produce, in canonical order
pub fn default_schema() -> Vec<String> {
    REQUIRED_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain(Gender::ALL.into_iter().map(gender_column))
        .chain(VehicleCategory::ALL.into_iter().map(vehicle_column))
        .collect()
}

/// Check that a schema can be aligned against: no duplicates and every
/// numeric column present
pub fn check_schema(schema: &[String]) -> Result<(), PredictionError> {
    let mut seen = HashSet::with_capacity(schema.len());
    for column in schema {
        if !seen.insert(column.as_str()) {
            return Err(PredictionError::SchemaMismatch(format!(
                "duplicate column '{}'",
                column
            )));
        }
    }

    if let Some(missing) = REQUIRED_COLUMNS.iter().find(|c| !seen.contains(*c)) {
        return Err(PredictionError::SchemaMismatch(format!(
            "required column '{}' missing from schema",
            missing
        )));
    }

    Ok(())
}

/// Encode a form and align it to `schema`
///
/// Categorical fields are one-hot encoded; expected columns the encoding does
/// not produce are filled with 0. The output has exactly one value per schema
/// column, in schema order.
pub fn build_feature_vector(
    input: &FormInput,
    schema: &[String],
) -> Result<Vec<f64>, PredictionError> {
    check_schema(schema)?;

    let mut encoded: HashMap<String, f64> = HashMap::with_capacity(6);
    encoded.insert(DRIVER_AGE.to_string(), input.driver_age as f64);
    encoded.insert(ANNUAL_INCOME.to_string(), input.annual_income);
    encoded.insert(MONTHLY_PREMIUM.to_string(), input.monthly_premium);
    encoded.insert(DEPENDENTS.to_string(), input.dependents as f64);
    encoded.insert(gender_column(input.gender), 1.0);
    encoded.insert(vehicle_column(input.vehicle_category), 1.0);

    Ok(schema
        .iter()
        .map(|column| encoded.get(column).copied().unwrap_or(0.0))
        .collect())
}
