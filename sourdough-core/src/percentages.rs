//! Baker's-percentage converter.
//!
//! Flour is pinned at 100%; every other amount is relative to it. Percentages
//! of the non-flour ingredients do not need to sum to anything in particular.

use crate::error::{Result, ensure_non_negative, ensure_positive};
use crate::types::{Ingredient, IngredientUnit};

/// Grams for `percent` of `flour_g`.
pub fn grams_for_percent(flour_g: f64, percent: f64) -> Result<f64> {
    ensure_positive("flour weight", flour_g)?;
    ensure_non_negative("percent", percent)?;
    Ok(flour_g * percent / 100.0)
}

/// Baker's percentage of `grams` relative to `flour_g`.
pub fn percent_for_grams(flour_g: f64, grams: f64) -> Result<f64> {
    ensure_positive("flour weight", flour_g)?;
    ensure_non_negative("grams", grams)?;
    Ok(grams / flour_g * 100.0)
}

/// Convert percent-of-flour ingredients into grams. Gram entries pass through.
pub fn to_weights(flour_g: f64, ingredients: &[Ingredient]) -> Result<Vec<Ingredient>> {
    ensure_positive("flour weight", flour_g)?;
    Ok(in_grams(flour_g, ingredients))
}

/// Convert gram ingredients into percent of flour. Percent entries pass through.
pub fn to_percentages(flour_g: f64, ingredients: &[Ingredient]) -> Result<Vec<Ingredient>> {
    ensure_positive("flour weight", flour_g)?;
    Ok(ingredients
        .iter()
        .map(|i| match i.unit() {
            IngredientUnit::PercentOfFlour => i.clone(),
            IngredientUnit::Grams => {
                i.with_amount(i.amount() / flour_g * 100.0, IngredientUnit::PercentOfFlour)
            }
        })
        .collect())
}

/// Flour plus every ingredient, in grams.
pub fn total_weight(flour_g: f64, ingredients: &[Ingredient]) -> Result<f64> {
    ensure_positive("flour weight", flour_g)?;
    let rest: f64 = in_grams(flour_g, ingredients)
        .iter()
        .map(Ingredient::amount)
        .sum();
    Ok(flour_g + rest)
}

/// `flour_g` must already be validated.
pub(crate) fn in_grams(flour_g: f64, ingredients: &[Ingredient]) -> Vec<Ingredient> {
    ingredients
        .iter()
        .map(|i| match i.unit() {
            IngredientUnit::Grams => i.clone(),
            IngredientUnit::PercentOfFlour => {
                i.with_amount(flour_g * i.amount() / 100.0, IngredientUnit::Grams)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::IngredientCategory;
    use approx::assert_relative_eq;

    fn pct(name: &str, p: f64) -> Ingredient {
        Ingredient::percent(name, p, IngredientCategory::Other).unwrap()
    }

    #[test]
    fn test_bakers_percent_scenario() {
        let ings = vec![pct("water", 70.0), pct("salt", 2.0), pct("starter", 20.0)];
        let w = to_weights(500.0, &ings).unwrap();
        assert_relative_eq!(w[0].amount(), 350.0, epsilon = 1e-9);
        assert_relative_eq!(w[1].amount(), 10.0, epsilon = 1e-9);
        assert_relative_eq!(w[2].amount(), 100.0, epsilon = 1e-9);
        assert!(w.iter().all(|i| i.unit() == IngredientUnit::Grams));
        assert_relative_eq!(total_weight(500.0, &ings).unwrap(), 960.0, epsilon = 1e-9);
    }

    #[test]
    fn test_roundtrip_percentages() {
        for flour in [1.0, 250.0, 500.0, 1234.5] {
            for p in [0.0, 0.1, 2.0, 20.0, 72.5, 100.0, 180.0] {
                let ings = vec![pct("x", p)];
                let back = to_percentages(flour, &to_weights(flour, &ings).unwrap()).unwrap();
                assert_relative_eq!(back[0].amount(), p, epsilon = 1e-9);
                assert_eq!(back[0].unit(), IngredientUnit::PercentOfFlour);
            }
        }
    }

    #[test]
    fn test_percentages_need_not_sum_to_hundred() {
        let ings = vec![pct("water", 85.0), pct("starter", 40.0), pct("seeds", 30.0)];
        assert!(to_weights(400.0, &ings).is_ok());
    }

    #[test]
    fn test_mixed_units_total() {
        let ings = vec![
            pct("water", 65.0),
            Ingredient::grams("raisins", 80.0, IngredientCategory::Inclusion).unwrap(),
        ];
        assert_relative_eq!(total_weight(200.0, &ings).unwrap(), 200.0 + 130.0 + 80.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rejects_non_positive_flour() {
        let ings = vec![pct("water", 70.0)];
        assert!(matches!(to_weights(0.0, &ings), Err(Error::InvalidInput(_))));
        assert!(matches!(to_percentages(-1.0, &ings), Err(Error::InvalidInput(_))));
        assert!(matches!(total_weight(f64::NAN, &ings), Err(Error::InvalidInput(_))));
        assert!(grams_for_percent(0.0, 10.0).is_err());
    }

    #[test]
    fn test_scalar_helpers() {
        assert_relative_eq!(grams_for_percent(500.0, 2.0).unwrap(), 10.0, epsilon = 1e-9);
        assert_relative_eq!(percent_for_grams(500.0, 350.0).unwrap(), 70.0, epsilon = 1e-9);
    }
}
