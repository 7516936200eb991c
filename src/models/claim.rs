use serde::{Deserialize, Serialize};
use std::fmt;

/// Driver gender as offered by the claim form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed list of vehicle categories accepted by the claim form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleCategory {
    #[serde(rename = "2-Wheeler")]
    TwoWheeler,
    Cars,
    #[serde(rename = "Luxury Cars")]
    LuxuryCars,
    Bikes,
    Trucks,
    #[serde(rename = "Electric Vehicles")]
    ElectricVehicles,
    Aeroplanes,
}

impl VehicleCategory {
    pub const ALL: [VehicleCategory; 7] = [
        VehicleCategory::TwoWheeler,
        VehicleCategory::Cars,
        VehicleCategory::LuxuryCars,
        VehicleCategory::Bikes,
        VehicleCategory::Trucks,
        VehicleCategory::ElectricVehicles,
        VehicleCategory::Aeroplanes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleCategory::TwoWheeler => "2-Wheeler",
            VehicleCategory::Cars => "Cars",
            VehicleCategory::LuxuryCars => "Luxury Cars",
            VehicleCategory::Bikes => "Bikes",
            VehicleCategory::Trucks => "Trucks",
            VehicleCategory::ElectricVehicles => "Electric Vehicles",
            VehicleCategory::Aeroplanes => "Aeroplanes",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated claim form submission
///
/// Only produced by `RawClaimForm::validate`, so every field is within its
/// declared range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormInput {
    pub driver_age: u8,
    pub annual_income: f64,
    pub monthly_premium: f64,
    pub dependents: u8,
    pub gender: Gender,
    pub vehicle_category: VehicleCategory,
}

/// One prediction as shown in the monitoring table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimRecord {
    /// Wall-clock "HH:MM" at submission
    pub timestamp: String,
    pub vehicle_category: VehicleCategory,
    pub predicted_amount: f64,
    /// Rupee-formatted amount, e.g. "₹825.00"
    pub display_amount: String,
}

impl ClaimRecord {
    /// `None` when the amount cannot be shown to the exact paisa
    pub fn new(
        timestamp: String,
        vehicle_category: VehicleCategory,
        predicted_amount: f64,
    ) -> Option<Self> {
        let display_amount = crate::utils::currency::format_inr(predicted_amount)?;
        Some(Self {
            timestamp,
            vehicle_category,
            predicted_amount,
            display_amount,
        })
    }
}
