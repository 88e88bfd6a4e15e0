//! Qualitative model of a three-engine lunar lander.

use super::{NumericState, QualitativeAction, QualitativeEffect, QualitativeModel};

/// Sentinel magnitude for a non-deterministic effect entry.
const NON_DETERMINISTIC: i32 = -2;

/// Lander with side engines `m1`/`m3` and main engine `m2`.
///
/// Qualitative model:
///
/// ```text
/// ax = M-,+(m1, m3)
/// ay = M+(m2)
/// ar = M+,-(m1, m3)
///
/// deriv(x, vx)    deriv(vx, ax)
/// deriv(y, vy)    deriv(vy, ay)
/// deriv(r, vr)    deriv(vr, ar)
/// ```
///
/// When both side engines pull the same way on `ax` or `ar`, the combined
/// direction is unresolvable without magnitudes and the entry is declared
/// non-deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct LanderModel;

/// Resolve `M-,+(m1, m3)`: the first argument opposes the output, the
/// second supports it.
fn resolve_opposing(m1: i32, m3: i32) -> i32 {
    if m1 == 0 && m3 == 0 {
        0
    } else if m1 == 0 {
        m3
    } else if m3 == 0 {
        -m1
    } else if m1 < 0 && m3 > 0 {
        1
    } else if m1 > 0 && m3 < 0 {
        -1
    } else {
        NON_DETERMINISTIC
    }
}

impl QualitativeModel for LanderModel {
    fn actions(&self, _numeric_state: &NumericState) -> Vec<QualitativeAction> {
        vec![
            // do nothing
            QualitativeAction::new().with("m1", 0).with("m2", 0).with("m3", 0),
            // left engine
            QualitativeAction::new().with("m1", 1).with("m2", 0).with("m3", 0),
            // main engine
            QualitativeAction::new().with("m1", 0).with("m2", 1).with("m3", 0),
            // right engine
            QualitativeAction::new().with("m1", 0).with("m2", 0).with("m3", 1),
        ]
    }

    fn effect(
        &self,
        action: &QualitativeAction,
        _numeric_state: &NumericState,
    ) -> QualitativeEffect {
        let m1 = action.direction("m1").unwrap_or(0);
        let m2 = action.direction("m2").unwrap_or(0);
        let m3 = action.direction("m3").unwrap_or(0);

        // ax = M-,+(m1, m3); ar = M+,-(m1, m3) is the same resolution with
        // the roles of the two engines swapped.
        let ax = resolve_opposing(m1, m3);
        let ar = resolve_opposing(m3, m1);
        let ay = m2;

        // Propagate relative qualitative effects across the derivative chains.
        QualitativeEffect::new()
            .with("x", ax)
            .with("vx", ax)
            .with("y", ay)
            .with("vy", ay)
            .with("r", ar)
            .with("vr", ar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn effect_of(m1: i32, m2: i32, m3: i32) -> QualitativeEffect {
        let action = QualitativeAction::new()
            .with("m1", m1)
            .with("m2", m2)
            .with("m3", m3);
        LanderModel.effect(&action, &NumericState::new())
    }

    #[test]
    fn four_engine_actions() {
        let actions = LanderModel.actions(&NumericState::new());
        assert_eq!(actions.len(), 4);
        assert_eq!(actions[0].rank(), 0, "idle action commits no channel");
        for action in &actions[1..] {
            assert_eq!(action.rank(), 1, "engine actions commit one channel");
        }
    }

    #[test]
    fn left_engine_pushes_right_and_rolls_positive() {
        let effect = effect_of(1, 0, 0);
        assert_eq!(effect.direction("x"), Some(-1));
        assert_eq!(effect.direction("vx"), Some(-1));
        assert_eq!(effect.direction("r"), Some(1));
        assert_eq!(effect.direction("vr"), Some(1));
        assert_eq!(effect.direction("y"), Some(0));
    }

    #[test]
    fn right_engine_mirrors_left() {
        let effect = effect_of(0, 0, 1);
        assert_eq!(effect.direction("x"), Some(1));
        assert_eq!(effect.direction("r"), Some(-1));
    }

    #[test]
    fn main_engine_lifts() {
        let effect = effect_of(0, 1, 0);
        assert_eq!(effect.direction("y"), Some(1));
        assert_eq!(effect.direction("vy"), Some(1));
        assert_eq!(effect.direction("x"), Some(0));
        assert_eq!(effect.direction("r"), Some(0));
    }

    #[test]
    fn opposed_side_engines_resolve() {
        // m1 pulls ax negative, m3 pulls it positive; opposite firing
        // directions agree on the sign.
        let effect = effect_of(-1, 0, 1);
        assert_eq!(effect.direction("x"), Some(1));
        assert_eq!(effect.direction("r"), Some(-1));
    }

    #[test]
    fn same_direction_side_engines_are_non_deterministic() {
        let effect = effect_of(1, 0, 1);
        assert_eq!(effect.direction("x"), Some(NON_DETERMINISTIC));
        assert_eq!(effect.direction("r"), Some(NON_DETERMINISTIC));
        // The selector sees these as abstentions.
        assert_eq!(effect.voting_direction("x"), Some(0));
        assert_eq!(effect.voting_direction("r"), Some(0));
    }
}
