//! Qualitative model of a 1-D cart pushed by a horizontal force.

use super::{NumericState, QualitativeAction, QualitativeEffect, QualitativeModel};

/// Single control channel `F` with decrease/hold/increase choices.
///
/// Qualitative model:
///
/// ```text
/// a = M+(F)
/// deriv(x, v)
/// deriv(v, a)
/// ```
///
/// A relative qualitative effect propagates across the derivative chain, so
/// the direction of `F` reaches both `v` and `x`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CartModel;

impl QualitativeModel for CartModel {
    fn actions(&self, _numeric_state: &NumericState) -> Vec<QualitativeAction> {
        vec![
            QualitativeAction::new().with("F", -1),
            QualitativeAction::new().with("F", 0),
            QualitativeAction::new().with("F", 1),
        ]
    }

    fn effect(
        &self,
        action: &QualitativeAction,
        _numeric_state: &NumericState,
    ) -> QualitativeEffect {
        let f = action.direction("F").unwrap_or(0);
        QualitativeEffect::new().with("x", f).with("v", f)
    }
}
