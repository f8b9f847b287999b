//! Bulk fermentation time estimate.
//!
//! Empirical model around a 4 h bulk at 24°C with a 20% strong starter:
//! - temperature: Q10 ≈ 2 (rate doubles every 10°C above 24°C)
//! - starter: inverse with starter percentage
//! - strength, hydration and whole grain: mild multiplicative effects
//!
//! The result is clamped to 1..24 h and widened to a min/max range.

use crate::error::{Error, Result, ensure_finite, ensure_positive};
use serde::{Deserialize, Serialize};
use std::fmt;

const BASE_HOURS: f64 = 4.0;
const BASE_TEMP_C: f64 = 24.0;
const BASE_STARTER_PERCENT: f64 = 20.0;
const BASE_HYDRATION_PERCENT: f64 = 75.0;
const MIN_HOURS: f64 = 1.0;
const MAX_HOURS: f64 = 24.0;

/// How vigorous the starter is.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StarterStrength {
    Weak,
    Moderate,
    Strong,
    VeryStrong,
}

impl StarterStrength {
    pub fn factor(self) -> f64 {
        match self {
            StarterStrength::Weak => 1.5,
            StarterStrength::Moderate => 1.2,
            StarterStrength::Strong => 1.0,
            StarterStrength::VeryStrong => 0.85,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BulkInput {
    pub temperature_c: f64,
    pub starter_percent: f64,
    pub strength: StarterStrength,
    pub hydration_percent: Option<f64>,
    pub whole_grain_percent: Option<f64>,
}

/// Advisory attached to an estimate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FermentationNote {
    ColdFermentation,
    WarmFermentation,
    LowStarter,
    HighStarter,
    HighHydration,
    LowHydration,
    HighWholeGrain,
    WeakStarter,
    Clamped,
}

impl FermentationNote {
    pub fn message(self) -> &'static str {
        match self {
            FermentationNote::ColdFermentation => {
                "Cold fermentation: expect a slow bulk; consider an overnight retard."
            }
            FermentationNote::WarmFermentation => {
                "Warm fermentation: check the dough often, it can over-proof quickly."
            }
            FermentationNote::LowStarter => {
                "Low starter percentage: long fermentation with more acidity development."
            }
            FermentationNote::HighStarter => {
                "High starter percentage: fast fermentation, watch for over-proofing."
            }
            FermentationNote::HighHydration => {
                "High hydration: dough ferments faster and needs gentle handling."
            }
            FermentationNote::LowHydration => "Low hydration: stiff dough ferments more slowly.",
            FermentationNote::HighWholeGrain => {
                "High whole-grain content: bran feeds the culture and speeds fermentation."
            }
            FermentationNote::WeakStarter => {
                "Weak starter: consider a few extra feedings before baking."
            }
            FermentationNote::Clamped => {
                "Estimate reached the model limit; treat the range as approximate."
            }
        }
    }
}

impl fmt::Display for FermentationNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BulkEstimate {
    pub optimal_hours: f64,
    pub min_hours: f64,
    pub max_hours: f64,
    pub notes: Vec<FermentationNote>,
}

#[inline]
fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        v
    }
}

/// 2^(-(T-24)/10)
pub fn temperature_factor(temperature_c: f64) -> f64 {
    2f64.powf(-(temperature_c - BASE_TEMP_C) / 10.0)
}

pub fn starter_factor(starter_percent: f64) -> f64 {
    BASE_STARTER_PERCENT / starter_percent
}

pub fn hydration_factor(hydration_percent: Option<f64>) -> f64 {
    hydration_percent.map_or(1.0, |h| (BASE_HYDRATION_PERCENT / h).powf(0.2))
}

pub fn whole_grain_factor(whole_grain_percent: Option<f64>) -> f64 {
    whole_grain_percent.map_or(1.0, |wg| 0.95f64.powf(wg / 10.0))
}

fn validate(input: &BulkInput) -> Result<()> {
    ensure_positive("temperature", input.temperature_c)?;
    ensure_positive("starter percent", input.starter_percent)?;
    if let Some(h) = input.hydration_percent {
        ensure_positive("hydration", h)?;
    }
    if let Some(wg) = input.whole_grain_percent {
        ensure_finite("whole grain percent", wg)?;
        if !(0.0..=100.0).contains(&wg) {
            return Err(Error::invalid(format!(
                "whole grain percent must be within 0..=100 (got {wg})"
            )));
        }
    }
    Ok(())
}

fn notes_for(input: &BulkInput, clamped: bool) -> Vec<FermentationNote> {
    let mut notes = Vec::new();
    if input.temperature_c < 18.0 {
        notes.push(FermentationNote::ColdFermentation);
    }
    if input.temperature_c > 28.0 {
        notes.push(FermentationNote::WarmFermentation);
    }
    if input.starter_percent < 10.0 {
        notes.push(FermentationNote::LowStarter);
    }
    if input.starter_percent > 30.0 {
        notes.push(FermentationNote::HighStarter);
    }
    if let Some(h) = input.hydration_percent {
        if h > 80.0 {
            notes.push(FermentationNote::HighHydration);
        }
        if h < 60.0 {
            notes.push(FermentationNote::LowHydration);
        }
    }
    if input.whole_grain_percent.is_some_and(|wg| wg > 30.0) {
        notes.push(FermentationNote::HighWholeGrain);
    }
    if input.strength == StarterStrength::Weak {
        notes.push(FermentationNote::WeakStarter);
    }
    if clamped {
        notes.push(FermentationNote::Clamped);
    }
    notes
}

pub fn estimate_bulk(input: BulkInput) -> Result<BulkEstimate> {
    validate(&input)?;

    let raw = BASE_HOURS
        * temperature_factor(input.temperature_c)
        * starter_factor(input.starter_percent)
        * input.strength.factor()
        * hydration_factor(input.hydration_percent)
        * whole_grain_factor(input.whole_grain_percent);
    let optimal_hours = clamp(raw, MIN_HOURS, MAX_HOURS);
    let clamped = optimal_hours != raw;

    let estimate = BulkEstimate {
        optimal_hours,
        min_hours: optimal_hours * 0.75,
        max_hours: (optimal_hours * 1.25).min(MAX_HOURS),
        notes: notes_for(&input, clamped),
    };
    tracing::debug!(raw, optimal = estimate.optimal_hours, "bulk estimate");
    Ok(estimate)
}
