//! Shared value types.
//!
//! Every type here is built through a validating constructor, so a value that
//! exists is a value the calculators accept. Deserialization goes through the
//! same checks (`#[serde(try_from = ...)]`).

use crate::error::{Error, Result, ensure_non_negative, ensure_positive};
use crate::percentages;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Ingredients
// ============================================================================

/// How an ingredient amount is expressed.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IngredientUnit {
    Grams,
    PercentOfFlour,
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IngredientCategory {
    Flour,
    Fat,
    Sweetener,
    Inclusion,
    Other,
}

/// A named amount, either in grams or as a baker's percentage.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "IngredientRecord")]
pub struct Ingredient {
    name: String,
    amount: f64,
    unit: IngredientUnit,
    category: IngredientCategory,
}

#[derive(Deserialize)]
struct IngredientRecord {
    name: String,
    amount: f64,
    unit: IngredientUnit,
    category: IngredientCategory,
}

impl TryFrom<IngredientRecord> for Ingredient {
    type Error = Error;

    fn try_from(r: IngredientRecord) -> Result<Self> {
        Ingredient::new(r.name, r.amount, r.unit, r.category)
    }
}

impl Ingredient {
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        unit: IngredientUnit,
        category: IngredientCategory,
    ) -> Result<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(Error::invalid("ingredient name must not be empty"));
        }
        ensure_non_negative(&format!("amount of {name}"), amount)?;
        Ok(Self {
            name,
            amount,
            unit,
            category,
        })
    }

    pub fn grams(name: impl Into<String>, grams: f64, category: IngredientCategory) -> Result<Self> {
        Self::new(name, grams, IngredientUnit::Grams, category)
    }

    pub fn percent(
        name: impl Into<String>,
        percent: f64,
        category: IngredientCategory,
    ) -> Result<Self> {
        Self::new(name, percent, IngredientUnit::PercentOfFlour, category)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn unit(&self) -> IngredientUnit {
        self.unit
    }

    pub fn category(&self) -> IngredientCategory {
        self.category
    }

    /// Same ingredient with a different amount/unit. Amounts produced by the
    /// converters are already validated, so this stays crate-private.
    pub(crate) fn with_amount(&self, amount: f64, unit: IngredientUnit) -> Self {
        Self {
            name: self.name.clone(),
            amount,
            unit,
            category: self.category,
        }
    }
}

// ============================================================================
// Formula
// ============================================================================

/// A baker's-percentage formula. Flour is the 100% reference.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "FormulaRecord")]
pub struct Formula {
    flour_weight_g: f64,
    water_percent: f64,
    salt_percent: f64,
    starter_percent: f64,
    additional_ingredients: Vec<Ingredient>,
    /// Display-only link to the caller's starter record.
    #[serde(skip_serializing_if = "Option::is_none")]
    starter_id: Option<String>,
}

#[derive(Deserialize)]
struct FormulaRecord {
    flour_weight_g: f64,
    water_percent: f64,
    salt_percent: f64,
    starter_percent: f64,
    #[serde(default)]
    additional_ingredients: Vec<Ingredient>,
    #[serde(default)]
    starter_id: Option<String>,
}

impl TryFrom<FormulaRecord> for Formula {
    type Error = Error;

    fn try_from(r: FormulaRecord) -> Result<Self> {
        let f = Formula::new(r.flour_weight_g, r.water_percent, r.salt_percent, r.starter_percent)?;
        let f = r
            .additional_ingredients
            .into_iter()
            .fold(f, |f, i| f.with_ingredient(i));
        Ok(match r.starter_id {
            Some(id) => f.with_starter_id(id),
            None => f,
        })
    }
}

/// Absolute weights of every part of a [`Formula`].
#[derive(Clone, Debug, PartialEq)]
pub struct FormulaWeights {
    pub flour_g: f64,
    pub water_g: f64,
    pub salt_g: f64,
    pub starter_g: f64,
    /// Additional ingredients, in formula order, all in grams.
    pub additions: Vec<Ingredient>,
    pub total_g: f64,
}

impl Formula {
    pub fn new(
        flour_weight_g: f64,
        water_percent: f64,
        salt_percent: f64,
        starter_percent: f64,
    ) -> Result<Self> {
        ensure_positive("flour weight", flour_weight_g)?;
        ensure_non_negative("water percent", water_percent)?;
        ensure_non_negative("salt percent", salt_percent)?;
        ensure_non_negative("starter percent", starter_percent)?;
        Ok(Self {
            flour_weight_g,
            water_percent,
            salt_percent,
            starter_percent,
            additional_ingredients: Vec::new(),
            starter_id: None,
        })
    }

    /// Size a formula so the whole dough (flour + water + salt + starter)
    /// weighs `total_dough_g`.
    pub fn for_dough_weight(
        total_dough_g: f64,
        water_percent: f64,
        salt_percent: f64,
        starter_percent: f64,
    ) -> Result<Self> {
        ensure_positive("total dough weight", total_dough_g)?;
        ensure_non_negative("water percent", water_percent)?;
        ensure_non_negative("salt percent", salt_percent)?;
        ensure_non_negative("starter percent", starter_percent)?;
        let flour =
            total_dough_g / (1.0 + (water_percent + salt_percent + starter_percent) / 100.0);
        Self::new(flour, water_percent, salt_percent, starter_percent)
    }

    /// New snapshot with `ingredient` appended.
    pub fn with_ingredient(mut self, ingredient: Ingredient) -> Self {
        self.additional_ingredients.push(ingredient);
        self
    }

    pub fn with_starter_id(mut self, starter_id: impl Into<String>) -> Self {
        self.starter_id = Some(starter_id.into());
        self
    }

    pub fn starter_id(&self) -> Option<&str> {
        self.starter_id.as_deref()
    }

    pub fn flour_weight_g(&self) -> f64 {
        self.flour_weight_g
    }

    pub fn water_percent(&self) -> f64 {
        self.water_percent
    }

    pub fn salt_percent(&self) -> f64 {
        self.salt_percent
    }

    pub fn starter_percent(&self) -> f64 {
        self.starter_percent
    }

    pub fn additional_ingredients(&self) -> &[Ingredient] {
        &self.additional_ingredients
    }

    /// Convert every percentage into grams.
    pub fn weights(&self) -> FormulaWeights {
        let flour = self.flour_weight_g;
        let pct = |p: f64| flour * p / 100.0;
        let additions = percentages::in_grams(flour, &self.additional_ingredients);

        let water_g = pct(self.water_percent);
        let salt_g = pct(self.salt_percent);
        let starter_g = pct(self.starter_percent);
        let total_g = flour
            + water_g
            + salt_g
            + starter_g
            + additions.iter().map(Ingredient::amount).sum::<f64>();

        FormulaWeights {
            flour_g: flour,
            water_g,
            salt_g,
            starter_g,
            additions,
            total_g,
        }
    }
}

// ============================================================================
// Flour types
// ============================================================================

/// A flour and its protein content, used by the blend solver.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "FlourTypeRecord")]
pub struct FlourType {
    name: String,
    protein_percent: f64,
}

#[derive(Deserialize)]
struct FlourTypeRecord {
    name: String,
    protein_percent: f64,
}

impl TryFrom<FlourTypeRecord> for FlourType {
    type Error = Error;

    fn try_from(r: FlourTypeRecord) -> Result<Self> {
        FlourType::new(r.name, r.protein_percent)
    }
}

const REFERENCE_FLOURS: &[(&str, f64)] = &[
    ("Bread", 12.7),
    ("All-purpose", 11.7),
    ("Whole wheat", 13.0),
    ("Tipo 00", 12.0),
    ("Rye", 9.0),
    ("Spelt", 12.5),
    ("Pastry", 9.0),
    ("Cake", 7.5),
    ("High-gluten", 14.0),
    ("Einkorn", 15.0),
];

impl FlourType {
    pub fn new(name: impl Into<String>, protein_percent: f64) -> Result<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(Error::invalid("flour name must not be empty"));
        }
        ensure_non_negative("protein percent", protein_percent)?;
        if protein_percent > 100.0 {
            return Err(Error::invalid(format!(
                "protein percent must be <= 100 (got {protein_percent})"
            )));
        }
        Ok(Self {
            name,
            protein_percent,
        })
    }

    /// Typical protein contents of common flours.
    pub fn reference_set() -> Vec<FlourType> {
        REFERENCE_FLOURS
            .iter()
            .map(|&(name, protein_percent)| FlourType {
                name: name.to_string(),
                protein_percent,
            })
            .collect()
    }

    /// Case-insensitive lookup in the reference set.
    pub fn lookup(name: &str) -> Option<FlourType> {
        let name = name.trim();
        Self::reference_set()
            .into_iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn protein_percent(&self) -> f64 {
        self.protein_percent
    }
}

// ============================================================================
// Feeding ratio
// ============================================================================

/// Starter : flour : water parts for a feeding, e.g. `1:2:2`.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub struct FeedingRatio {
    starter: u32,
    flour: u32,
    water: u32,
}

impl FeedingRatio {
    pub fn new(starter: u32, flour: u32, water: u32) -> Result<Self> {
        if starter == 0 || flour == 0 || water == 0 {
            return Err(Error::invalid(format!(
                "feeding ratio parts must be > 0 (got {starter}:{flour}:{water})"
            )));
        }
        Ok(Self {
            starter,
            flour,
            water,
        })
    }

    pub fn starter(&self) -> u32 {
        self.starter
    }

    pub fn flour(&self) -> u32 {
        self.flour
    }

    pub fn water(&self) -> u32 {
        self.water
    }

    pub fn total(&self) -> u64 {
        u64::from(self.starter) + u64::from(self.flour) + u64::from(self.water)
    }

    /// Hydration of the fed starter, assuming the existing starter sits at
    /// the same flour:water proportion as the feed.
    pub fn hydration_percent(&self) -> f64 {
        self.water as f64 / self.flour as f64 * 100.0
    }
}

impl Default for FeedingRatio {
    fn default() -> Self {
        Self {
            starter: 1,
            flour: 1,
            water: 1,
        }
    }
}

impl fmt::Display for FeedingRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.starter, self.flour, self.water)
    }
}

impl FromStr for FeedingRatio {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.trim().split(':').map(str::trim).collect();
        let [s_part, f_part, w_part] = parts.as_slice() else {
            return Err(Error::invalid(format!(
                "feeding ratio must look like S:F:W (got {s:?})"
            )));
        };
        let parse = |p: &str| {
            p.parse::<u32>().map_err(|_| {
                Error::invalid(format!("feeding ratio part {p:?} is not a positive whole number"))
            })
        };
        FeedingRatio::new(parse(*s_part)?, parse(*f_part)?, parse(*w_part)?)
    }
}

impl TryFrom<String> for FeedingRatio {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<FeedingRatio> for String {
    fn from(r: FeedingRatio) -> Self {
        r.to_string()
    }
}

// ============================================================================
// Starter and feeding logs
// ============================================================================

/// Health of a starter, as classified by the scheduler.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Excellent,
    Good,
    Fair,
    Poor,
    Inactive,
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthStatus::Excellent => write!(f, "Excellent"),
            HealthStatus::Good => write!(f, "Good"),
            HealthStatus::Fair => write!(f, "Fair"),
            HealthStatus::Poor => write!(f, "Poor"),
            HealthStatus::Inactive => write!(f, "Inactive"),
        }
    }
}

/// A sourdough starter as kept in the caller's store.
///
/// Updates go through the pure methods in [`crate::schedule`], each of which
/// returns a new value.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "StarterRecord")]
pub struct Starter {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) flour_type: String,
    pub(crate) feeding_ratio: FeedingRatio,
    pub(crate) feeding_frequency_hours: u32,
    pub(crate) is_active: bool,
    pub(crate) last_fed_at: Option<DateTime<Utc>>,
    pub(crate) next_feeding_due_at: Option<DateTime<Utc>>,
    pub(crate) health_status: HealthStatus,
    pub(crate) avg_activity_level: Option<f64>,
}

#[derive(Deserialize)]
struct StarterRecord {
    id: String,
    name: String,
    flour_type: String,
    feeding_ratio: FeedingRatio,
    feeding_frequency_hours: u32,
    is_active: bool,
    last_fed_at: Option<DateTime<Utc>>,
    next_feeding_due_at: Option<DateTime<Utc>>,
    health_status: HealthStatus,
    avg_activity_level: Option<f64>,
}

impl TryFrom<StarterRecord> for Starter {
    type Error = Error;

    fn try_from(r: StarterRecord) -> Result<Self> {
        let mut s = Starter::new(
            r.id,
            r.name,
            r.flour_type,
            r.feeding_ratio,
            r.feeding_frequency_hours,
        )?;
        if let Some(level) = r.avg_activity_level {
            check_activity_average(level)?;
        }
        if let Some(at) = r.last_fed_at {
            s = s.fed_at(at)?;
        }
        if r.next_feeding_due_at.is_some() && r.next_feeding_due_at != s.next_feeding_due_at {
            return Err(Error::invalid(format!(
                "next feeding due at {:?} does not match last feeding plus {} hours",
                r.next_feeding_due_at, s.feeding_frequency_hours
            )));
        }
        s.is_active = r.is_active;
        // Only `is_active` decides whether a starter is inactive.
        s.health_status = match (r.is_active, r.health_status) {
            (false, _) => HealthStatus::Inactive,
            (true, HealthStatus::Inactive) => HealthStatus::Good,
            (true, health) => health,
        };
        s.avg_activity_level = r.avg_activity_level;
        Ok(s)
    }
}

fn check_activity_average(level: f64) -> Result<f64> {
    if level.is_finite() && (1.0..=5.0).contains(&level) {
        Ok(level)
    } else {
        Err(Error::invalid(format!(
            "average activity level must be within 1.0..=5.0 (got {level})"
        )))
    }
}

impl Starter {
    /// A new active starter in `Good` health that has never been fed.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        flour_type: impl Into<String>,
        feeding_ratio: FeedingRatio,
        feeding_frequency_hours: u32,
    ) -> Result<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(Error::invalid("starter name must not be empty"));
        }
        if feeding_frequency_hours == 0 {
            return Err(Error::invalid("feeding frequency must be > 0 hours"));
        }
        Ok(Self {
            id: id.into(),
            name,
            flour_type: flour_type.into(),
            feeding_ratio,
            feeding_frequency_hours,
            is_active: true,
            last_fed_at: None,
            next_feeding_due_at: None,
            health_status: HealthStatus::Good,
            avg_activity_level: None,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn flour_type(&self) -> &str {
        &self.flour_type
    }

    pub fn feeding_ratio(&self) -> FeedingRatio {
        self.feeding_ratio
    }

    pub fn feeding_frequency_hours(&self) -> u32 {
        self.feeding_frequency_hours
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn last_fed_at(&self) -> Option<DateTime<Utc>> {
        self.last_fed_at
    }

    pub fn next_feeding_due_at(&self) -> Option<DateTime<Utc>> {
        self.next_feeding_due_at
    }

    pub fn health_status(&self) -> HealthStatus {
        self.health_status
    }

    pub fn avg_activity_level(&self) -> Option<f64> {
        self.avg_activity_level
    }
}

/// One feeding event. Append-only.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "FeedingLogRecord")]
pub struct FeedingLog {
    starter_id: String,
    created_at: DateTime<Utc>,
    activity_level: Option<u8>,
    peak_time_hours: Option<f64>,
    notes: Option<String>,
}

#[derive(Deserialize)]
struct FeedingLogRecord {
    starter_id: String,
    created_at: DateTime<Utc>,
    activity_level: Option<u8>,
    peak_time_hours: Option<f64>,
    notes: Option<String>,
}

impl TryFrom<FeedingLogRecord> for FeedingLog {
    type Error = Error;

    fn try_from(r: FeedingLogRecord) -> Result<Self> {
        let mut log = FeedingLog::new(r.starter_id, r.created_at);
        if let Some(level) = r.activity_level {
            log = log.with_activity_level(level)?;
        }
        if let Some(hours) = r.peak_time_hours {
            log = log.with_peak_time_hours(hours)?;
        }
        if let Some(notes) = r.notes {
            log = log.with_notes(notes);
        }
        Ok(log)
    }
}

impl FeedingLog {
    pub fn new(starter_id: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            starter_id: starter_id.into(),
            created_at,
            activity_level: None,
            peak_time_hours: None,
            notes: None,
        }
    }

    /// Activity on a 1 (sluggish) to 5 (vigorous) scale.
    pub fn with_activity_level(mut self, level: u8) -> Result<Self> {
        if !(1..=5).contains(&level) {
            return Err(Error::invalid(format!(
                "activity level must be within 1..=5 (got {level})"
            )));
        }
        self.activity_level = Some(level);
        Ok(self)
    }

    pub fn with_peak_time_hours(mut self, hours: f64) -> Result<Self> {
        ensure_non_negative("peak time", hours)?;
        self.peak_time_hours = Some(hours);
        Ok(self)
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn starter_id(&self) -> &str {
        &self.starter_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn activity_level(&self) -> Option<u8> {
        self.activity_level
    }

    pub fn peak_time_hours(&self) -> Option<f64> {
        self.peak_time_hours
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}
