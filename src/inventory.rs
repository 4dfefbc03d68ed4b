//! Operational Inventory - Activity data and emission factor arithmetic
//!
//! Maps self-reported activity quantities (fleet fuel, grid power, supply
//! chain weight or spend) to scope-level CO2e totals using fixed emission
//! factors. Computation is pure and total; validation is a separate,
//! explicit step enforced at the HTTP boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// kg CO2e per gallon of fleet fuel.
pub const FUEL_FACTOR_KG_PER_GAL: f64 = 8.8;
/// kg CO2e per kWh of purchased grid electricity.
pub const GRID_FACTOR_KG_PER_KWH: f64 = 0.385;
/// kg CO2e per kg of shipped supply-chain weight (activity-based).
pub const WEIGHT_FACTOR_KG_PER_KG: f64 = 1.58;
/// kg CO2e per currency unit of supplier spend (spend-based).
pub const SPEND_FACTOR_KG_PER_UNIT: f64 = 0.45;

/// How the scope 3 (supply chain) quantity should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplyMethod {
    /// Shipment weights in kilograms (activity-based modeling).
    WeightBased,
    /// Annual supplier spend in currency units (spend-based modeling).
    SpendBased,
}

impl SupplyMethod {
    /// Human-readable methodology label echoed into the report.
    pub fn label(&self) -> &'static str {
        match self {
            SupplyMethod::WeightBased => "Logistic Node Calculation (Activity-Based)",
            SupplyMethod::SpendBased => "Economic Input-Output Model (Spend-Based)",
        }
    }

    /// Emission factor applied to the supply-chain quantity.
    pub fn factor(&self) -> f64 {
        match self {
            SupplyMethod::WeightBased => WEIGHT_FACTOR_KG_PER_KG,
            SupplyMethod::SpendBased => SPEND_FACTOR_KG_PER_UNIT,
        }
    }
}

/// One render cycle's worth of self-reported activity data.
///
/// Serde defaults mirror the dashboard's initial form values, so a partial
/// request body still computes something sensible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInputs {
    /// Scope 1: fleet/fuel use in gallons.
    #[serde(default = "default_fuel_gallons")]
    pub fuel_gallons: f64,
    /// Scope 2: grid power in kWh.
    #[serde(default = "default_grid_kwh")]
    pub grid_kwh: f64,
    /// Scope 3 data source selector.
    #[serde(default = "default_supply_method")]
    pub supply_method: SupplyMethod,
    /// Scope 3 quantity; kilograms for weight-based, currency for spend-based.
    #[serde(default = "default_supply_value")]
    pub supply_value: f64,
}

fn default_fuel_gallons() -> f64 {
    2500.0
}

fn default_grid_kwh() -> f64 {
    48000.0
}

fn default_supply_method() -> SupplyMethod {
    SupplyMethod::WeightBased
}

fn default_supply_value() -> f64 {
    142000.0
}

impl Default for RawInputs {
    fn default() -> Self {
        Self {
            fuel_gallons: default_fuel_gallons(),
            grid_kwh: default_grid_kwh(),
            supply_method: default_supply_method(),
            supply_value: default_supply_value(),
        }
    }
}

/// Rejection reasons for out-of-range activity data.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("fuel gallons must be a non-negative finite number, got {0}")]
    InvalidFuel(f64),
    #[error("grid kWh must be a non-negative finite number, got {0}")]
    InvalidGrid(f64),
    #[error("supply-chain value must be a non-negative finite number, got {0}")]
    InvalidSupply(f64),
}

impl RawInputs {
    /// Range-check the inputs before they reach `compute`.
    ///
    /// `compute` itself stays total and will happily multiply negative
    /// quantities into negative "emissions"; callers that care reject them
    /// here first.
    pub fn validate(&self) -> Result<(), InputError> {
        if !self.fuel_gallons.is_finite() || self.fuel_gallons < 0.0 {
            return Err(InputError::InvalidFuel(self.fuel_gallons));
        }
        if !self.grid_kwh.is_finite() || self.grid_kwh < 0.0 {
            return Err(InputError::InvalidGrid(self.grid_kwh));
        }
        if !self.supply_value.is_finite() || self.supply_value < 0.0 {
            return Err(InputError::InvalidSupply(self.supply_value));
        }
        Ok(())
    }
}

/// Scope-level CO2e totals for one inventory, all in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionTotals {
    pub scope1_kg: f64,
    pub scope2_kg: f64,
    pub scope3_kg: f64,
    pub total_kg: f64,
}

impl EmissionTotals {
    /// The three scope totals paired with their display labels, in order.
    pub fn scopes(&self) -> [(&'static str, f64); 3] {
        [
            ("Scope 1", self.scope1_kg),
            ("Scope 2", self.scope2_kg),
            ("Scope 3", self.scope3_kg),
        ]
    }
}

/// Apply the emission factors. Pure, never fails, no rounding; all display
/// rounding happens at render time.
pub fn compute(inputs: &RawInputs) -> EmissionTotals {
    let scope1_kg = inputs.fuel_gallons * FUEL_FACTOR_KG_PER_GAL;
    let scope2_kg = inputs.grid_kwh * GRID_FACTOR_KG_PER_KWH;
    let scope3_kg = inputs.supply_value * inputs.supply_method.factor();
    EmissionTotals {
        scope1_kg,
        scope2_kg,
        scope3_kg,
        total_kg: scope1_kg + scope2_kg + scope3_kg,
    }
}
