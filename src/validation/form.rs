use crate::core::error::ValidationError;
use crate::models::claim::{FormInput, Gender, VehicleCategory};
use serde::{Deserialize, Serialize};

pub const MIN_DRIVER_AGE: i64 = 18;
pub const MAX_DRIVER_AGE: i64 = 100;
pub const MIN_DEPENDENTS: i64 = 0;
pub const MAX_DEPENDENTS: i64 = 5;
/// ₹100 crore a year
pub const MAX_ANNUAL_INCOME: f64 = 1_000_000_000.0;
/// ₹1 crore a month
pub const MAX_MONTHLY_PREMIUM: f64 = 10_000_000.0;

/// Claim form as submitted by a client, before any checks
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawClaimForm {
    pub driver_age: Option<i64>,
    pub annual_income: Option<f64>,
    pub monthly_premium: Option<f64>,
    pub dependents: Option<i64>,
    pub gender: Option<String>,
    pub vehicle_category: Option<String>,
}

impl RawClaimForm {
    /// Check every field and build a `FormInput`
    ///
    /// Out-of-range values are rejected, never clamped.
    pub fn validate(self) -> Result<FormInput, ValidationError> {
        let driver_age = validate_int_range(
            "driver_age",
            self.driver_age,
            MIN_DRIVER_AGE,
            MAX_DRIVER_AGE,
        )? as u8;

        let annual_income =
            validate_amount("annual_income", self.annual_income, MAX_ANNUAL_INCOME)?;
        let monthly_premium =
            validate_amount("monthly_premium", self.monthly_premium, MAX_MONTHLY_PREMIUM)?;

        let dependents = validate_int_range(
            "dependents",
            self.dependents,
            MIN_DEPENDENTS,
            MAX_DEPENDENTS,
        )? as u8;

        let gender = validate_option("gender", self.gender.as_deref(), Gender::parse)?;
        let vehicle_category = validate_option(
            "vehicle_category",
            self.vehicle_category.as_deref(),
            VehicleCategory::parse,
        )?;

        Ok(FormInput {
            driver_age,
            annual_income,
            monthly_premium,
            dependents,
            gender,
            vehicle_category,
        })
    }
}

fn validate_int_range(
    field: &str,
    value: Option<i64>,
    min: i64,
    max: i64,
) -> Result<i64, ValidationError> {
    let value = value.ok_or_else(|| ValidationError::MissingField(field.to_string()))?;

    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        });
    }

    Ok(value)
}

fn validate_amount(field: &str, value: Option<f64>, max: f64) -> Result<f64, ValidationError> {
    let value = value.ok_or_else(|| ValidationError::MissingField(field.to_string()))?;

    if !value.is_finite() {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if value < 0.0 {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            reason: "must not be negative".to_string(),
        });
    }

    if value > max {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            value: value.to_string(),
            min: "0".to_string(),
            max: max.to_string(),
        });
    }

    Ok(value)
}

fn validate_option<T>(
    field: &str,
    value: Option<&str>,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, ValidationError> {
    let value = value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ValidationError::MissingField(field.to_string()))?;

    parse(value).ok_or_else(|| ValidationError::UnknownOption {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Description of one form field for clients that render the form
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldSpec {
    Integer {
        name: &'static str,
        label: &'static str,
        min: i64,
        max: i64,
        default: i64,
    },
    Amount {
        name: &'static str,
        label: &'static str,
        min: f64,
        max: f64,
        default: f64,
    },
    Choice {
        name: &'static str,
        label: &'static str,
        options: Vec<&'static str>,
        default: &'static str,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct FormSchema {
    pub fields: Vec<FieldSpec>,
}

/// Field list with ranges, options and pre-filled defaults
pub fn form_schema() -> FormSchema {
    FormSchema {
        fields: vec![
            FieldSpec::Integer {
                name: "driver_age",
                label: "Driver Age",
                min: MIN_DRIVER_AGE,
                max: MAX_DRIVER_AGE,
                default: 36,
            },
            FieldSpec::Amount {
                name: "annual_income",
                label: "Annual Income (₹)",
                min: 0.0,
                max: MAX_ANNUAL_INCOME,
                default: 60000.0,
            },
            FieldSpec::Amount {
                name: "monthly_premium",
                label: "Monthly Premium (₹)",
                min: 0.0,
                max: MAX_MONTHLY_PREMIUM,
                default: 150.0,
            },
            FieldSpec::Integer {
                name: "dependents",
                label: "Number of Dependents",
                min: MIN_DEPENDENTS,
                max: MAX_DEPENDENTS,
                default: 3,
            },
            FieldSpec::Choice {
                name: "gender",
                label: "Driver Gender",
                options: Gender::ALL.iter().map(|g| g.as_str()).collect(),
                default: Gender::Male.as_str(),
            },
            FieldSpec::Choice {
                name: "vehicle_category",
                label: "Vehicle Category",
                options: VehicleCategory::ALL.iter().map(|v| v.as_str()).collect(),
                default: VehicleCategory::TwoWheeler.as_str(),
            },
        ],
    }
}
