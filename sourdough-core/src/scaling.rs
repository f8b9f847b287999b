//! Recipe scaling and pre/post-bake weight conversion.

use crate::error::{Error, Result, ensure_non_negative, ensure_positive};
use crate::types::{Ingredient, IngredientUnit};

pub fn scale_factor(original_yield: f64, target_yield: f64) -> Result<f64> {
    ensure_positive("original yield", original_yield)?;
    ensure_non_negative("target yield", target_yield)?;
    Ok(target_yield / original_yield)
}

/// Scale gram amounts from `original_yield` to `target_yield`.
///
/// Percent-of-flour entries are ratios and are left as they are.
pub fn scale(
    ingredients: &[Ingredient],
    original_yield: f64,
    target_yield: f64,
) -> Result<Vec<Ingredient>> {
    let factor = scale_factor(original_yield, target_yield)?;
    Ok(ingredients
        .iter()
        .map(|i| match i.unit() {
            IngredientUnit::Grams => i.with_amount(i.amount() * factor, IngredientUnit::Grams),
            IngredientUnit::PercentOfFlour => i.clone(),
        })
        .collect())
}

/// Dough weight before and after baking.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BakeWeights {
    pub pre_bake_g: f64,
    pub post_bake_g: f64,
    pub weight_loss_g: f64,
}

fn check_loss(baking_loss_percent: f64) -> Result<f64> {
    ensure_non_negative("baking loss", baking_loss_percent)?;
    if baking_loss_percent >= 100.0 {
        return Err(Error::invalid(format!(
            "baking loss must be below 100% (got {baking_loss_percent})"
        )));
    }
    Ok(baking_loss_percent)
}

/// Dough weight needed to end up with `post_bake_g` after baking.
pub fn pre_bake_weight(post_bake_g: f64, baking_loss_percent: f64) -> Result<BakeWeights> {
    ensure_positive("post-bake weight", post_bake_g)?;
    let loss = check_loss(baking_loss_percent)?;
    let pre_bake_g = post_bake_g / (1.0 - loss / 100.0);
    Ok(BakeWeights {
        pre_bake_g,
        post_bake_g,
        weight_loss_g: pre_bake_g - post_bake_g,
    })
}

/// Expected loaf weight from a dough of `pre_bake_g`.
pub fn post_bake_weight(pre_bake_g: f64, baking_loss_percent: f64) -> Result<BakeWeights> {
    ensure_positive("pre-bake weight", pre_bake_g)?;
    let loss = check_loss(baking_loss_percent)?;
    let post_bake_g = pre_bake_g * (1.0 - loss / 100.0);
    Ok(BakeWeights {
        pre_bake_g,
        post_bake_g,
        weight_loss_g: pre_bake_g - post_bake_g,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IngredientCategory;
    use approx::assert_relative_eq;

    fn recipe() -> Vec<Ingredient> {
        vec![
            Ingredient::grams("flour", 500.0, IngredientCategory::Flour).unwrap(),
            Ingredient::grams("water", 350.0, IngredientCategory::Other).unwrap(),
            Ingredient::grams("salt", 10.0, IngredientCategory::Other).unwrap(),
            Ingredient::percent("oil", 2.0, IngredientCategory::Fat).unwrap(),
        ]
    }

    #[test]
    fn test_scale_doubles() {
        let out = scale(&recipe(), 1.0, 2.0).unwrap();
        assert_relative_eq!(out[0].amount(), 1000.0, epsilon = 1e-9);
        assert_relative_eq!(out[1].amount(), 700.0, epsilon = 1e-9);
        assert_relative_eq!(out[2].amount(), 20.0, epsilon = 1e-9);
        assert_relative_eq!(out[3].amount(), 2.0);
        assert_eq!(out[3].unit(), IngredientUnit::PercentOfFlour);
    }

    #[test]
    fn test_scale_identity() {
        let r = recipe();
        for y in [0.5, 1.0, 3.0, 12.0] {
            assert_eq!(scale(&r, y, y).unwrap(), r);
        }
    }

    #[test]
    fn test_scale_rejects() {
        assert!(matches!(scale(&recipe(), 0.0, 2.0), Err(Error::InvalidInput(_))));
        assert!(scale(&recipe(), 2.0, -1.0).is_err());
        assert!(scale(&recipe(), 2.0, f64::NAN).is_err());
    }

    #[test]
    fn test_pre_bake_weight() {
        let w = pre_bake_weight(900.0, 10.0).unwrap();
        assert_relative_eq!(w.pre_bake_g, 1000.0, epsilon = 1e-9);
        assert_relative_eq!(w.weight_loss_g, 100.0, epsilon = 1e-9);

        let none = pre_bake_weight(900.0, 0.0).unwrap();
        assert_relative_eq!(none.weight_loss_g, 0.0);
    }

    #[test]
    fn test_post_bake_inverse() {
        let pre = pre_bake_weight(750.0, 15.0).unwrap();
        let post = post_bake_weight(pre.pre_bake_g, 15.0).unwrap();
        assert_relative_eq!(post.post_bake_g, 750.0, epsilon = 1e-9);
    }

    #[test]
    fn test_loss_bounds() {
        assert!(pre_bake_weight(900.0, 100.0).is_err());
        assert!(pre_bake_weight(900.0, -1.0).is_err());
        assert!(pre_bake_weight(0.0, 10.0).is_err());
        assert!(post_bake_weight(900.0, 150.0).is_err());
    }
}
