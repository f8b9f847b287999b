//! Hydration engine: water as a percentage of flour.

use crate::error::{Result, ensure_non_negative, ensure_positive};
use crate::levain::decompose_levain;

pub fn hydration_percent(flour_g: f64, water_g: f64) -> Result<f64> {
    ensure_positive("flour weight", flour_g)?;
    ensure_non_negative("water weight", water_g)?;
    Ok(water_g / flour_g * 100.0)
}

pub fn water_for_target_hydration(flour_g: f64, target_percent: f64) -> Result<f64> {
    ensure_positive("flour weight", flour_g)?;
    ensure_non_negative("target hydration", target_percent)?;
    Ok(flour_g * target_percent / 100.0)
}

pub fn flour_for_target_hydration(water_g: f64, target_percent: f64) -> Result<f64> {
    ensure_non_negative("water weight", water_g)?;
    ensure_positive("target hydration", target_percent)?;
    Ok(water_g * 100.0 / target_percent)
}

/// True dough hydration once the starter is split into its flour and water.
///
/// `starter_g` may be zero (no levain); `starter_hydration` is the levain's
/// own hydration, e.g. 100 for a 1:1 flour:water culture.
pub fn overall_hydration(
    flour_g: f64,
    water_g: f64,
    starter_g: f64,
    starter_hydration: f64,
) -> Result<f64> {
    ensure_positive("flour weight", flour_g)?;
    ensure_non_negative("water weight", water_g)?;
    ensure_non_negative("starter weight", starter_g)?;
    ensure_non_negative("starter hydration", starter_hydration)?;

    if starter_g == 0.0 {
        return hydration_percent(flour_g, water_g);
    }
    let split = decompose_levain(starter_g, starter_hydration)?;
    hydration_percent(flour_g + split.flour_g, water_g + split.water_g)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use approx::assert_relative_eq;

    #[test]
    fn test_hydration_percent() {
        assert_relative_eq!(hydration_percent(500.0, 350.0).unwrap(), 70.0, epsilon = 1e-9);
        assert!(matches!(hydration_percent(0.0, 350.0), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_hydration_inverse() {
        for flour in [50.0, 500.0, 1000.0, 3333.3] {
            for h in [1.0, 55.0, 70.0, 78.5, 100.0, 125.0] {
                let water = water_for_target_hydration(flour, h).unwrap();
                assert_relative_eq!(hydration_percent(flour, water).unwrap(), h, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_flour_for_target() {
        assert_relative_eq!(flour_for_target_hydration(375.0, 75.0).unwrap(), 500.0, epsilon = 1e-9);
        assert!(matches!(flour_for_target_hydration(375.0, 0.0), Err(Error::InvalidInput(_))));
        assert!(flour_for_target_hydration(375.0, -10.0).is_err());
    }

    #[test]
    fn test_overall_hydration_counts_starter() {
        // 500 flour, 350 water, 100 g of 100% starter -> 400 / 550
        let h = overall_hydration(500.0, 350.0, 100.0, 100.0).unwrap();
        assert_relative_eq!(h, 400.0 / 550.0 * 100.0, epsilon = 1e-9);

        let plain = overall_hydration(500.0, 350.0, 0.0, 100.0).unwrap();
        assert_relative_eq!(plain, 70.0, epsilon = 1e-9);
    }
}
