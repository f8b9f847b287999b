//! Flour-blend protein solver.

use crate::error::{Error, Result, ensure_finite, ensure_non_negative};

/// Tolerance for a blend's percentages to count as summing to 100.
pub const BLEND_SUM_TOLERANCE: f64 = 0.1;

/// One flour in a blend: its share of the flour and its protein content.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BlendComponent {
    pub percent: f64,
    pub protein_percent: f64,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BlendProtein {
    pub protein_percent: f64,
    /// Sum of the component percentages.
    pub total_percent: f64,
}

impl BlendProtein {
    /// A blend that does not sum to 100% is still computed; callers warn.
    pub fn sums_to_hundred(&self) -> bool {
        (self.total_percent - 100.0).abs() <= BLEND_SUM_TOLERANCE
    }
}

pub fn blend_protein(components: &[BlendComponent]) -> Result<BlendProtein> {
    if components.is_empty() {
        return Err(Error::invalid("a blend needs at least one flour"));
    }
    for c in components {
        ensure_non_negative("blend percent", c.percent)?;
        check_protein(c.protein_percent)?;
    }

    let protein_percent: f64 = components
        .iter()
        .map(|c| c.percent / 100.0 * c.protein_percent)
        .sum();
    let total_percent: f64 = components.iter().map(|c| c.percent).sum();
    Ok(BlendProtein {
        protein_percent,
        total_percent,
    })
}

/// Shares of flour A and flour B hitting a target protein.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TwoFlourBlend {
    pub percent_a: f64,
    pub percent_b: f64,
}

pub fn solve_two_flour_blend(
    target_protein: f64,
    protein_a: f64,
    protein_b: f64,
) -> Result<TwoFlourBlend> {
    check_protein(target_protein)?;
    check_protein(protein_a)?;
    check_protein(protein_b)?;

    if protein_a == protein_b {
        return Err(Error::Unachievable {
            reason: format!(
                "both flours have {protein_a}% protein; mixing them cannot change the blend"
            ),
            range: None,
        });
    }

    let percent_a = (target_protein - protein_b) / (protein_a - protein_b) * 100.0;
    if !(0.0..=100.0).contains(&percent_a) {
        let lo = protein_a.min(protein_b);
        let hi = protein_a.max(protein_b);
        return Err(Error::Unachievable {
            reason: format!(
                "target {target_protein}% protein is outside the achievable range {lo}%–{hi}%"
            ),
            range: Some((lo, hi)),
        });
    }

    tracing::debug!(target_protein, protein_a, protein_b, percent_a, "two-flour blend");
    Ok(TwoFlourBlend {
        percent_a,
        percent_b: 100.0 - percent_a,
    })
}

fn check_protein(p: f64) -> Result<f64> {
    ensure_finite("protein percent", p)?;
    if (0.0..=100.0).contains(&p) {
        Ok(p)
    } else {
        Err(Error::invalid(format!(
            "protein percent must be within 0..=100 (got {p})"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn c(percent: f64, protein_percent: f64) -> BlendComponent {
        BlendComponent {
            percent,
            protein_percent,
        }
    }

    #[test]
    fn test_blend_protein_weighted_average() {
        let b = blend_protein(&[c(80.0, 12.7), c(20.0, 13.0)]).unwrap();
        assert_relative_eq!(b.protein_percent, 0.8 * 12.7 + 0.2 * 13.0, epsilon = 1e-9);
        assert!(b.sums_to_hundred());
    }

    #[test]
    fn test_blend_bounds() {
        let proteins = [7.5, 9.0, 11.7, 12.7, 14.0];
        let splits: [[f64; 5]; 4] = [
            [20.0, 20.0, 20.0, 20.0, 20.0],
            [100.0, 0.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 0.0, 100.0],
            [5.0, 10.0, 50.0, 30.0, 5.0],
        ];
        for split in splits {
            let comps: Vec<_> = split.iter().zip(proteins).map(|(&p, pr)| c(p, pr)).collect();
            let b = blend_protein(&comps).unwrap();
            assert!(b.protein_percent >= 7.5 - 1e-9 && b.protein_percent <= 14.0 + 1e-9);
        }
    }

    #[test]
    fn test_blend_not_summing_is_warning_only() {
        let b = blend_protein(&[c(60.0, 12.0), c(30.0, 10.0)]).unwrap();
        assert!(!b.sums_to_hundred());
        assert_relative_eq!(b.total_percent, 90.0);

        let close = blend_protein(&[c(50.05, 12.0), c(50.0, 10.0)]).unwrap();
        assert!(close.sums_to_hundred());
    }

    #[test]
    fn test_blend_rejects() {
        assert!(blend_protein(&[]).is_err());
        assert!(blend_protein(&[c(-1.0, 12.0)]).is_err());
        assert!(blend_protein(&[c(100.0, 120.0)]).is_err());
    }

    #[test]
    fn test_two_flour_solve() {
        let s = solve_two_flour_blend(12.0, 12.7, 9.0).unwrap();
        assert_relative_eq!(s.percent_a, 3.0 / 3.7 * 100.0, epsilon = 1e-9);
        assert_relative_eq!(s.percent_a + s.percent_b, 100.0, epsilon = 1e-9);

        let check = blend_protein(&[c(s.percent_a, 12.7), c(s.percent_b, 9.0)]).unwrap();
        assert_relative_eq!(check.protein_percent, 12.0, epsilon = 1e-9);
    }

    #[test]
    fn test_two_flour_endpoints() {
        let s = solve_two_flour_blend(12.5, 12.5, 10.5).unwrap();
        assert_relative_eq!(s.percent_a, 100.0, epsilon = 1e-9);
        let s = solve_two_flour_blend(10.5, 12.5, 10.5).unwrap();
        assert_relative_eq!(s.percent_a, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_unachievable_scenario() {
        match solve_two_flour_blend(20.0, 12.5, 10.5) {
            Err(Error::Unachievable { range, .. }) => assert_eq!(range, Some((10.5, 12.5))),
            other => panic!("expected Unachievable, got {other:?}"),
        }
    }

    #[test]
    fn test_equal_proteins_unachievable() {
        assert!(matches!(
            solve_two_flour_blend(12.0, 11.0, 11.0),
            Err(Error::Unachievable { range: None, .. })
        ));
    }
}
