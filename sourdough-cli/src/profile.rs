//! Kitchen profile: the baker's usual conditions, kept as JSON.
//!
//! Precedence for every value: explicit flag, then profile, then the
//! built-in default. The profile saved with `--save-profile` holds the
//! values the last command actually used.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use sourdough_core::temperature::{DEFAULT_FRICTION_FACTOR_F, DdtInputs};
use sourdough_core::{FeedingRatio, StarterStrength};
use std::{fs, path::Path};

pub const DEFAULT_TARGET_DDT_F: f64 = 78.0;
pub const DEFAULT_ROOM_TEMP_F: f64 = 72.0;
pub const DEFAULT_FLOUR_TEMP_F: f64 = 72.0;
pub const DEFAULT_STARTER_TEMP_F: f64 = 72.0;
pub const DEFAULT_BULK_TEMP_C: f64 = 24.0;
pub const DEFAULT_STARTER_HYDRATION: f64 = 100.0;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KitchenProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_ddt_f: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_temp_f: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flour_temp_f: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starter_temp_f: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friction_factor_f: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bulk_temp_c: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<StarterStrength>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feeding_ratio: Option<FeedingRatio>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starter_hydration: Option<f64>,
}

/// `flag` if given, otherwise keep what the profile had.
pub fn prefer<T: Copy>(slot: &mut Option<T>, flag: Option<T>) {
    if flag.is_some() {
        *slot = flag;
    }
}

impl KitchenProfile {
    pub fn load(path: &Path) -> Result<Self> {
        let txt = fs::read_to_string(path).map_err(|source| CliError::ProfileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let profile = serde_json::from_str(&txt).map_err(|source| CliError::ProfileParse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("Loaded profile from {}", path.display());
        Ok(profile)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let txt = serde_json::to_string_pretty(self)?;
        fs::write(path, txt).map_err(|source| CliError::ProfileWrite {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("Saved profile to {}", path.display());
        Ok(())
    }

    pub fn ddt_inputs(&self) -> DdtInputs {
        DdtInputs {
            target_ddt_f: self.target_ddt_f.unwrap_or(DEFAULT_TARGET_DDT_F),
            room_temp_f: self.room_temp_f.unwrap_or(DEFAULT_ROOM_TEMP_F),
            flour_temp_f: self.flour_temp_f.unwrap_or(DEFAULT_FLOUR_TEMP_F),
            starter_temp_f: self.starter_temp_f.unwrap_or(DEFAULT_STARTER_TEMP_F),
            friction_factor_f: self.friction_factor_f.unwrap_or(DEFAULT_FRICTION_FACTOR_F),
        }
    }

    pub fn bulk_temp_c_or_default(&self) -> f64 {
        self.bulk_temp_c.unwrap_or(DEFAULT_BULK_TEMP_C)
    }

    pub fn strength_or_default(&self) -> StarterStrength {
        self.strength.unwrap_or(StarterStrength::Strong)
    }

    pub fn feeding_ratio_or_default(&self) -> FeedingRatio {
        self.feeding_ratio.unwrap_or_default()
    }

    pub fn starter_hydration_or_default(&self) -> f64 {
        self.starter_hydration.unwrap_or(DEFAULT_STARTER_HYDRATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_gaps() {
        let p = KitchenProfile {
            room_temp_f: Some(68.0),
            ..Default::default()
        };
        let d = p.ddt_inputs();
        assert_eq!(d.room_temp_f, 68.0);
        assert_eq!(d.target_ddt_f, DEFAULT_TARGET_DDT_F);
        assert_eq!(d.friction_factor_f, DEFAULT_FRICTION_FACTOR_F);
    }

    #[test]
    fn test_prefer_flag_over_profile() {
        let mut slot = Some(70.0);
        prefer(&mut slot, None);
        assert_eq!(slot, Some(70.0));
        prefer(&mut slot, Some(65.0));
        assert_eq!(slot, Some(65.0));
    }

    #[test]
    fn test_partial_json() {
        let p: KitchenProfile =
            serde_json::from_str(r#"{"bulk_temp_c": 21.5, "feeding_ratio": "1:5:5"}"#).unwrap();
        assert_eq!(p.bulk_temp_c_or_default(), 21.5);
        assert_eq!(p.feeding_ratio_or_default().to_string(), "1:5:5");
        assert_eq!(p.strength_or_default(), StarterStrength::Strong);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kitchen.json");
        let p = KitchenProfile {
            strength: Some(StarterStrength::Weak),
            friction_factor_f: Some(28.0),
            ..Default::default()
        };
        p.save(&path).unwrap();
        assert_eq!(KitchenProfile::load(&path).unwrap(), p);
    }

    #[test]
    fn test_bad_json_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            KitchenProfile::load(&path),
            Err(CliError::ProfileParse { .. })
        ));
    }
}
