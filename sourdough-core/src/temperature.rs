//! Desired dough temperature (DDT) solver.
//!
//! All temperatures are °F. The four-factor rule:
//! `water = DDT*4 - room - flour - starter - friction`.

use crate::error::{Result, ensure_finite};
use std::fmt;

/// Typical friction rise for hand or stand-mixer mixing, °F.
pub const DEFAULT_FRICTION_FACTOR_F: f64 = 24.0;

pub fn required_water_temp_f(
    target_ddt_f: f64,
    room_temp_f: f64,
    flour_temp_f: f64,
    starter_temp_f: f64,
    friction_factor_f: f64,
) -> Result<f64> {
    ensure_finite("target dough temperature", target_ddt_f)?;
    ensure_finite("room temperature", room_temp_f)?;
    ensure_finite("flour temperature", flour_temp_f)?;
    ensure_finite("starter temperature", starter_temp_f)?;
    ensure_finite("friction factor", friction_factor_f)?;
    Ok(target_ddt_f * 4.0 - room_temp_f - flour_temp_f - starter_temp_f - friction_factor_f)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// What kind of water the solved temperature calls for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WaterTempAdvice {
    IceWater,
    RoomOrCold,
    Warm,
    TooHot,
}

impl WaterTempAdvice {
    pub fn classify(water_temp_f: f64) -> Self {
        if water_temp_f < 32.0 {
            WaterTempAdvice::IceWater
        } else if water_temp_f > 100.0 {
            WaterTempAdvice::TooHot
        } else if water_temp_f >= 85.0 {
            WaterTempAdvice::Warm
        } else {
            WaterTempAdvice::RoomOrCold
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            WaterTempAdvice::IceWater => Severity::Warning,
            WaterTempAdvice::TooHot => Severity::Error,
            WaterTempAdvice::RoomOrCold | WaterTempAdvice::Warm => Severity::Info,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            WaterTempAdvice::IceWater => "Use ice water",
            WaterTempAdvice::RoomOrCold => "Room temperature or cold water",
            WaterTempAdvice::Warm => "Warm water needed",
            WaterTempAdvice::TooHot => "Temperature too high, adjust inputs",
        }
    }
}

impl fmt::Display for WaterTempAdvice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DdtInputs {
    pub target_ddt_f: f64,
    pub room_temp_f: f64,
    pub flour_temp_f: f64,
    pub starter_temp_f: f64,
    pub friction_factor_f: f64,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DdtSolution {
    pub water_temp_f: f64,
    pub advice: WaterTempAdvice,
}

impl DdtInputs {
    pub fn solve(&self) -> Result<DdtSolution> {
        let water_temp_f = required_water_temp_f(
            self.target_ddt_f,
            self.room_temp_f,
            self.flour_temp_f,
            self.starter_temp_f,
            self.friction_factor_f,
        )?;
        Ok(DdtSolution {
            water_temp_f,
            advice: WaterTempAdvice::classify(water_temp_f),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use approx::assert_relative_eq;

    #[test]
    fn test_ddt_scenario() {
        let w = required_water_temp_f(78.0, 72.0, 70.0, 75.0, 25.0).unwrap();
        assert_relative_eq!(w, 70.0, epsilon = 1e-9);
        assert_eq!(WaterTempAdvice::classify(w), WaterTempAdvice::RoomOrCold);
    }

    #[test]
    fn test_no_clamping() {
        let w = required_water_temp_f(75.0, 90.0, 88.0, 85.0, 30.0).unwrap();
        assert_relative_eq!(w, 7.0, epsilon = 1e-9);
        assert_eq!(WaterTempAdvice::classify(w), WaterTempAdvice::IceWater);
    }

    #[test]
    fn test_advice_boundaries() {
        assert_eq!(WaterTempAdvice::classify(31.9), WaterTempAdvice::IceWater);
        assert_eq!(WaterTempAdvice::classify(32.0), WaterTempAdvice::RoomOrCold);
        assert_eq!(WaterTempAdvice::classify(84.9), WaterTempAdvice::RoomOrCold);
        assert_eq!(WaterTempAdvice::classify(85.0), WaterTempAdvice::Warm);
        assert_eq!(WaterTempAdvice::classify(100.0), WaterTempAdvice::Warm);
        assert_eq!(WaterTempAdvice::classify(100.1), WaterTempAdvice::TooHot);
        assert_eq!(WaterTempAdvice::TooHot.severity(), Severity::Error);
        assert_eq!(WaterTempAdvice::IceWater.severity(), Severity::Warning);
    }

    #[test]
    fn test_solve() {
        let s = DdtInputs {
            target_ddt_f: 80.0,
            room_temp_f: 65.0,
            flour_temp_f: 65.0,
            starter_temp_f: 68.0,
            friction_factor_f: DEFAULT_FRICTION_FACTOR_F,
        }
        .solve()
        .unwrap();
        assert_relative_eq!(s.water_temp_f, 98.0, epsilon = 1e-9);
        assert_eq!(s.advice, WaterTempAdvice::Warm);
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(matches!(
            required_water_temp_f(78.0, f64::NAN, 70.0, 75.0, 25.0),
            Err(Error::InvalidInput(_))
        ));
        assert!(required_water_temp_f(78.0, 72.0, 70.0, 75.0, f64::INFINITY).is_err());
    }
}
