//! Numeric vital composition.

use medsim_core::{ModifierKind, NumericModifier};

/// Fold numeric modifiers onto a baseline.
///
/// `baseline × Π(multiplicative factors) + Σ(additive deltas)`. Factors apply
/// to the baseline before any delta, whatever order the modifiers arrive in.
pub fn compose(baseline: f64, modifiers: impl IntoIterator<Item = NumericModifier>) -> f64 {
    let (factor, delta) = modifiers
        .into_iter()
        .fold((1.0, 0.0), |(factor, delta), m| match m.kind {
            ModifierKind::Multiplicative => (factor * m.value, delta),
            ModifierKind::Additive => (factor, delta + m.value),
        });
    baseline * factor + delta
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9 * (1.0 + a.abs().max(b.abs()))
    }

    #[test]
    fn no_modifiers_keeps_baseline() {
        assert_eq!(compose(80.0, []), 80.0);
    }

    #[test]
    fn additive_only_sums() {
        assert_eq!(
            compose(16.0, [NumericModifier::add(4.0), NumericModifier::add(-2.0)]),
            18.0
        );
    }

    #[test]
    fn multiplicative_applies_before_additive() {
        let mods = [NumericModifier::add(-10.0), NumericModifier::multiply(1.25)];
        assert_eq!(compose(80.0, mods), 90.0);
        let reversed = [NumericModifier::multiply(1.25), NumericModifier::add(-10.0)];
        assert_eq!(compose(80.0, reversed), 90.0);
    }

    proptest! {
        #[test]
        fn multiplicative_factors_commute(
            b in 1.0f64..200.0,
            m1 in 0.1f64..3.0,
            m2 in 0.1f64..3.0,
        ) {
            let forward = compose(b, [NumericModifier::multiply(m1), NumericModifier::multiply(m2)]);
            let backward = compose(b, [NumericModifier::multiply(m2), NumericModifier::multiply(m1)]);
            prop_assert!(close(forward, b * m1 * m2));
            prop_assert!(close(forward, backward));
        }

        #[test]
        fn mixed_modifiers_scale_baseline_only(
            b in 1.0f64..200.0,
            m in 0.1f64..3.0,
            d in -50.0f64..50.0,
        ) {
            let result = compose(b, [NumericModifier::add(d), NumericModifier::multiply(m)]);
            prop_assert!(close(result, b * m + d));
        }
    }
}
