//! Levain and preferment decomposition.
//!
//! A levain's mass is split into the flour and water it contains by its
//! hydration; feedings are built from a starter:flour:water ratio; preferments
//! carry a fixed hydration/yeast/salt profile per kind.

use crate::error::{Error, Result, ensure_non_negative, ensure_positive};
use crate::types::FeedingRatio;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Flour and water contained in a levain.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LevainSplit {
    pub flour_g: f64,
    pub water_g: f64,
}

pub fn decompose_levain(total_mass_g: f64, hydration_percent: f64) -> Result<LevainSplit> {
    ensure_positive("levain mass", total_mass_g)?;
    ensure_non_negative("levain hydration", hydration_percent)?;
    let flour_g = total_mass_g / (1.0 + hydration_percent / 100.0);
    Ok(LevainSplit {
        flour_g,
        water_g: total_mass_g - flour_g,
    })
}

/// What to combine (and throw away) to build the starter a recipe needs.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FeedingBuild {
    pub use_starter_g: f64,
    pub add_flour_g: f64,
    pub add_water_g: f64,
    pub discard_g: f64,
}

pub fn build_feeding(
    recipe_starter_needed_g: f64,
    current_starter_g: f64,
    ratio: FeedingRatio,
) -> Result<FeedingBuild> {
    ensure_positive("starter needed", recipe_starter_needed_g)?;
    ensure_non_negative("current starter", current_starter_g)?;

    let total = ratio.total() as f64;
    let part = |n: u32| recipe_starter_needed_g * n as f64 / total;
    let use_starter_g = part(ratio.starter());

    let build = FeedingBuild {
        use_starter_g,
        add_flour_g: part(ratio.flour()),
        add_water_g: part(ratio.water()),
        discard_g: (current_starter_g - use_starter_g).max(0.0),
    };
    tracing::debug!(?build, %ratio, "feeding build");
    Ok(build)
}

// ============================================================================
// Preferments
// ============================================================================

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PrefermentKind {
    Poolish,
    Biga,
    PateFermentee,
}

/// Water, yeast and salt of a preferment, as percent of its own flour.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PrefermentProfile {
    pub water_percent: f64,
    pub yeast_percent: f64,
    pub salt_percent: f64,
}

impl PrefermentKind {
    pub fn profile(self) -> PrefermentProfile {
        match self {
            PrefermentKind::Poolish => PrefermentProfile {
                water_percent: 100.0,
                yeast_percent: 0.1,
                salt_percent: 0.0,
            },
            PrefermentKind::Biga => PrefermentProfile {
                water_percent: 55.0,
                yeast_percent: 0.1,
                salt_percent: 0.0,
            },
            PrefermentKind::PateFermentee => PrefermentProfile {
                water_percent: 65.0,
                yeast_percent: 2.0,
                salt_percent: 2.0,
            },
        }
    }
}

impl fmt::Display for PrefermentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefermentKind::Poolish => write!(f, "Poolish"),
            PrefermentKind::Biga => write!(f, "Biga"),
            PrefermentKind::PateFermentee => write!(f, "Pâte fermentée"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PrefermentComposition {
    pub kind: PrefermentKind,
    pub flour_g: f64,
    pub water_g: f64,
    pub yeast_g: f64,
    pub salt_g: f64,
    /// Weight of the finished preferment.
    pub total_g: f64,
    /// Flour left for the final mix.
    pub main_dough_flour_g: f64,
}

pub fn preferment(
    total_flour_g: f64,
    preferment_percent: f64,
    kind: PrefermentKind,
) -> Result<PrefermentComposition> {
    ensure_positive("total flour", total_flour_g)?;
    ensure_positive("preferment percent", preferment_percent)?;
    if preferment_percent > 100.0 {
        return Err(Error::invalid(format!(
            "preferment percent must be within (0, 100] (got {preferment_percent})"
        )));
    }

    let p = kind.profile();
    let flour_g = total_flour_g * preferment_percent / 100.0;
    let water_g = flour_g * p.water_percent / 100.0;
    let yeast_g = flour_g * p.yeast_percent / 100.0;
    let salt_g = flour_g * p.salt_percent / 100.0;

    Ok(PrefermentComposition {
        kind,
        flour_g,
        water_g,
        yeast_g,
        salt_g,
        total_g: flour_g + water_g + yeast_g + salt_g,
        main_dough_flour_g: total_flour_g - flour_g,
    })
}

// ============================================================================
// Starter percentage
// ============================================================================

/// Expected fermentation pace for a given starter percentage.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FermentationSpeed {
    VerySlow,
    Slow,
    Moderate,
    Fast,
    VeryFast,
}

impl FermentationSpeed {
    pub fn advice(self) -> &'static str {
        match self {
            FermentationSpeed::VerySlow => {
                "Very slow fermentation. Expect a long bulk; suited to cold or overnight schedules."
            }
            FermentationSpeed::Slow => {
                "Slow fermentation. Good for flavour development and flexible timing."
            }
            FermentationSpeed::Moderate => {
                "Moderate fermentation. A balanced, predictable bulk at room temperature."
            }
            FermentationSpeed::Fast => {
                "Fast fermentation. Standard same-day schedule; watch the dough closely."
            }
            FermentationSpeed::VeryFast => {
                "Very fast fermentation. Risk of over-proofing; consider a cooler spot or less starter."
            }
        }
    }
}

impl fmt::Display for FermentationSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FermentationSpeed::VerySlow => write!(f, "Very slow"),
            FermentationSpeed::Slow => write!(f, "Slow"),
            FermentationSpeed::Moderate => write!(f, "Moderate"),
            FermentationSpeed::Fast => write!(f, "Fast"),
            FermentationSpeed::VeryFast => write!(f, "Very fast"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StarterPercentClass {
    pub speed: FermentationSpeed,
    pub advice: &'static str,
}

/// Classify a starter percentage (of flour). Bands are inclusive at the low end.
pub fn starter_percent_class(starter_percent: f64) -> Result<StarterPercentClass> {
    ensure_non_negative("starter percent", starter_percent)?;
    let speed = if starter_percent < 5.0 {
        FermentationSpeed::VerySlow
    } else if starter_percent < 10.0 {
        FermentationSpeed::Slow
    } else if starter_percent < 15.0 {
        FermentationSpeed::Moderate
    } else if starter_percent < 25.0 {
        FermentationSpeed::Fast
    } else {
        FermentationSpeed::VeryFast
    };
    Ok(StarterPercentClass {
        speed,
        advice: speed.advice(),
    })
}
