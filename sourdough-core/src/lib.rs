//! Sourdough formulation and scheduling engine.
//!
//! Pure calculators over validated value types:
//! - baker's percentages and hydration
//! - levain decomposition, feeding builds and preferments
//! - flour-blend protein
//! - bulk fermentation time and desired dough temperature
//! - recipe scaling and baking loss
//! - starter health and feeding schedule
//!
//! Nothing here performs I/O or holds state; callers read their own store,
//! compute, and write the returned values back.

pub mod blend;
pub mod error;
pub mod fermentation;
pub mod hydration;
pub mod levain;
pub mod percentages;
pub mod scaling;
pub mod schedule;
pub mod temperature;
pub mod types;

pub use error::{Error, Result};
pub use types::*;

pub use blend::{BlendComponent, BlendProtein, TwoFlourBlend, blend_protein, solve_two_flour_blend};
pub use fermentation::{BulkEstimate, BulkInput, FermentationNote, StarterStrength, estimate_bulk};
pub use hydration::{
    flour_for_target_hydration, hydration_percent, overall_hydration, water_for_target_hydration,
};
pub use levain::{
    FeedingBuild, FermentationSpeed, LevainSplit, PrefermentComposition, PrefermentKind,
    StarterPercentClass, build_feeding, decompose_levain, preferment, starter_percent_class,
};
pub use percentages::{to_percentages, to_weights, total_weight};
pub use scaling::{BakeWeights, post_bake_weight, pre_bake_weight, scale};
pub use schedule::{
    FeedingStatus, average_activity, classify, feeding_status, human_feeding_text, is_overdue,
    next_feeding_due,
};
pub use temperature::{DdtInputs, DdtSolution, WaterTempAdvice, required_water_temp_f};
