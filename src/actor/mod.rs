//! Qualitative-reasoning control actor.
//!
//! The actor watches numeric observations, infers per-variable kinematics,
//! and each control step picks the qualitative action whose declared
//! effects best agree with the directions the target asks for. Agreement on
//! a variable is weighted by that variable's estimated time-to-arrival, so
//! the selector preferentially serves whichever variable is farthest (in
//! time) from its target.
//!
//! The core is synchronous and single-threaded: one `observe` then one
//! `act` per control step, serialized by `&mut self`.

pub mod estimator;
pub mod kinematics;

pub use estimator::{StateEstimator, VariableKinematics};

use tracing::{debug, trace};

use crate::errors::ActorError;
use crate::model::{NumericState, QualitativeAction, QualitativeModel, Target};

/// Decision engine pairing a qualitative model with a state estimator.
///
/// The model is shared read-only for the actor's lifetime; all mutable
/// state lives in the estimator.
#[derive(Debug)]
pub struct QualitativeActor<M: QualitativeModel> {
    model: M,
    estimator: StateEstimator,
}

impl<M: QualitativeModel> QualitativeActor<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            estimator: StateEstimator::new(),
        }
    }

    /// Clear all state, learned extrema included.
    pub fn reset(&mut self) {
        self.estimator.reset();
    }

    /// Clear the transient state but keep the learned extrema, so a new
    /// episode against the same system starts with usable limit estimates.
    pub fn restart(&mut self) {
        self.estimator.restart();
    }

    /// Feed one numeric sample; `dt` is the elapsed time since the
    /// previous one and must be strictly positive.
    pub fn observe(&mut self, numeric_state: &NumericState, dt: f64) -> Result<(), ActorError> {
        self.estimator.observe(numeric_state, dt)
    }

    /// Read-only view of the estimator, for collaborators and diagnostics.
    pub fn estimator(&self) -> &StateEstimator {
        &self.estimator
    }

    /// Decide which qualitative action to take toward `target`.
    ///
    /// Every candidate action collects one vote term per target variable:
    /// `desired_direction × action_direction × eta`. ETA is non-negative,
    /// so the sign of each term is governed entirely by direction
    /// agreement. Ties in the vote are broken by the determinism rank
    /// (more committed channels win); remaining ties keep the first action
    /// in the model's enumeration order.
    pub fn act(&self, target: &Target) -> Result<QualitativeAction, ActorError> {
        let current = self.estimator.positions();

        let candidates = self.model.actions(&current);
        if candidates.is_empty() {
            return Err(ActorError::NoActions);
        }

        let mut best: Option<(QualitativeAction, f64, usize)> = None;
        for action in candidates {
            let effect = self.model.effect(&action, &current);

            let mut vote = 0.0;
            for (variable, &target_value) in target {
                let position = current
                    .get(variable)
                    .copied()
                    .ok_or_else(|| ActorError::unobserved(variable))?;

                // Exactly at target: no direction preference, the term
                // contributes nothing either way (its ETA factor is 0 too).
                let dist = target_value - position;
                let desired = if dist == 0.0 { 0.0 } else { dist.signum() };

                let direction = effect
                    .voting_direction(variable)
                    .ok_or_else(|| ActorError::missing_effect(variable))?;

                let eta = self.estimator.eta(variable, target_value)?;
                vote += desired * f64::from(direction) * eta;
            }

            let rank = action.rank();
            trace!(?action, vote, rank, "scored candidate");

            let better = match &best {
                None => true,
                Some((_, best_vote, best_rank)) => {
                    vote > *best_vote || (vote == *best_vote && rank > *best_rank)
                }
            };
            if better {
                best = Some((action, vote, rank));
            }
        }

        // Candidates were non-empty, so a best entry exists.
        let (action, vote, rank) = best.ok_or(ActorError::NoActions)?;
        debug!(?action, vote, rank, "selected action");
        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QualitativeEffect;

    /// Fixed action/effect table, indexed by enumeration order.
    struct TableModel {
        actions: Vec<QualitativeAction>,
        effects: Vec<QualitativeEffect>,
    }

    impl QualitativeModel for TableModel {
        fn actions(&self, _numeric_state: &NumericState) -> Vec<QualitativeAction> {
            self.actions.clone()
        }

        fn effect(
            &self,
            action: &QualitativeAction,
            _numeric_state: &NumericState,
        ) -> QualitativeEffect {
            let idx = self
                .actions
                .iter()
                .position(|a| a == action)
                .expect("effect queried for an unknown action");
            self.effects[idx].clone()
        }
    }

    fn state_of(pairs: &[(&str, f64)]) -> NumericState {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn target_of(pairs: &[(&str, f64)]) -> Target {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn prefers_the_action_pushing_toward_the_target() {
        let model = TableModel {
            actions: vec![
                QualitativeAction::new().with("u", 1),
                QualitativeAction::new().with("u", 0),
            ],
            effects: vec![
                QualitativeEffect::new().with("x", 1),
                QualitativeEffect::new().with("x", 0),
            ],
        };
        let mut actor = QualitativeActor::new(model);
        actor.observe(&state_of(&[("x", 0.0)]), 1.0).unwrap();

        // x is below target, so the +1-effect action gets a strictly
        // positive vote while the 0-effect action scores zero.
        let action = actor.act(&target_of(&[("x", 3.0)])).unwrap();
        assert_eq!(action.direction("u"), Some(1));
    }

    #[test]
    fn opposing_effect_loses_to_neutral() {
        let model = TableModel {
            actions: vec![
                QualitativeAction::new().with("u", -1),
                QualitativeAction::new().with("u", 0),
            ],
            effects: vec![
                QualitativeEffect::new().with("x", -1),
                QualitativeEffect::new().with("x", 0),
            ],
        };
        let mut actor = QualitativeActor::new(model);
        actor.observe(&state_of(&[("x", 0.0)]), 1.0).unwrap();

        let action = actor.act(&target_of(&[("x", 3.0)])).unwrap();
        assert_eq!(action.direction("u"), Some(0), "a negative vote must lose to zero");
    }

    #[test]
    fn vote_tie_broken_by_determinism_rank() {
        // Both actions abstain on x (vote 0), but the second commits two
        // channels while the first commits one.
        let model = TableModel {
            actions: vec![
                QualitativeAction::new().with("u", 1),
                QualitativeAction::new().with("u", 1).with("w", -1),
            ],
            effects: vec![
                QualitativeEffect::new().with("x", 0),
                QualitativeEffect::new().with("x", 0),
            ],
        };
        let mut actor = QualitativeActor::new(model);
        actor.observe(&state_of(&[("x", 0.0)]), 1.0).unwrap();

        let action = actor.act(&target_of(&[("x", 3.0)])).unwrap();
        assert_eq!(action.direction("w"), Some(-1), "higher rank wins the tie");
    }

    #[test]
    fn full_ties_keep_enumeration_order() {
        let first = QualitativeAction::new().with("u", 1);
        let second = QualitativeAction::new().with("w", 1);
        let model = TableModel {
            actions: vec![first.clone(), second],
            effects: vec![
                QualitativeEffect::new().with("x", 1),
                QualitativeEffect::new().with("x", 1),
            ],
        };
        let mut actor = QualitativeActor::new(model);
        actor.observe(&state_of(&[("x", 0.0)]), 1.0).unwrap();

        let action = actor.act(&target_of(&[("x", 3.0)])).unwrap();
        assert_eq!(action, first, "equal vote and rank keeps the first candidate");
    }

    #[test]
    fn non_deterministic_effect_abstains_from_voting() {
        // |effect| > 1 must contribute exactly nothing: the magnitude-2
        // action ties the neutral one instead of winning or losing, and the
        // deterministic +1 action beats both.
        let model = TableModel {
            actions: vec![
                QualitativeAction::new().with("u", 1).with("w", 1),
                QualitativeAction::new().with("u", 1),
            ],
            effects: vec![
                QualitativeEffect::new().with("x", 2),
                QualitativeEffect::new().with("x", 1),
            ],
        };
        let mut actor = QualitativeActor::new(model);
        actor.observe(&state_of(&[("x", 0.0)]), 1.0).unwrap();

        let action = actor.act(&target_of(&[("x", 3.0)])).unwrap();
        assert_eq!(
            action.direction("w"),
            None,
            "the deterministic single-channel action must beat the rank-2 abstainer"
        );
    }

    #[test]
    fn exactly_at_target_contributes_no_preference() {
        // x sits exactly on target; only v distinguishes the actions.
        let model = TableModel {
            actions: vec![
                QualitativeAction::new().with("u", 1),
                QualitativeAction::new().with("u", -1),
            ],
            effects: vec![
                QualitativeEffect::new().with("x", 1).with("v", 1),
                QualitativeEffect::new().with("x", -1).with("v", -1),
            ],
        };
        let mut actor = QualitativeActor::new(model);
        actor
            .observe(&state_of(&[("x", 2.0), ("v", 1.0)]), 1.0)
            .unwrap();

        // v must come down toward 0, so the -1 action wins.
        let action = actor.act(&target_of(&[("x", 2.0), ("v", 0.0)])).unwrap();
        assert_eq!(action.direction("u"), Some(-1));
    }

    #[test]
    fn empty_action_list_is_a_model_contract_violation() {
        let model = TableModel {
            actions: vec![],
            effects: vec![],
        };
        let mut actor = QualitativeActor::new(model);
        actor.observe(&state_of(&[("x", 0.0)]), 1.0).unwrap();
        assert_eq!(actor.act(&target_of(&[("x", 1.0)])), Err(ActorError::NoActions));
    }

    #[test]
    fn unobserved_target_variable_fails() {
        let model = TableModel {
            actions: vec![QualitativeAction::new().with("u", 1)],
            effects: vec![QualitativeEffect::new().with("x", 1)],
        };
        let actor = QualitativeActor::new(model);
        assert_eq!(
            actor.act(&target_of(&[("x", 1.0)])),
            Err(ActorError::UnobservedVariable("x".to_string()))
        );
    }

    #[test]
    fn effect_missing_a_target_variable_fails() {
        let model = TableModel {
            actions: vec![QualitativeAction::new().with("u", 1)],
            effects: vec![QualitativeEffect::new().with("x", 1)],
        };
        let mut actor = QualitativeActor::new(model);
        actor
            .observe(&state_of(&[("x", 0.0), ("y", 0.0)]), 1.0)
            .unwrap();
        assert_eq!(
            actor.act(&target_of(&[("y", 1.0)])),
            Err(ActorError::MissingEffect("y".to_string()))
        );
    }

    #[test]
    fn farther_variable_dominates_the_vote() {
        // Two variables want opposite directions; y is much farther away,
        // so the action serving y must win despite hurting x.
        let model = TableModel {
            actions: vec![
                QualitativeAction::new().with("u", 1),
                QualitativeAction::new().with("u", -1),
            ],
            effects: vec![
                QualitativeEffect::new().with("x", 1).with("y", 1),
                QualitativeEffect::new().with("x", -1).with("y", -1),
            ],
        };
        let mut actor = QualitativeActor::new(model);
        actor
            .observe(&state_of(&[("x", 0.5), ("y", 0.0)]), 1.0)
            .unwrap();

        // x wants -1 (target below), y wants +1 and is farther in time.
        let action = actor
            .act(&target_of(&[("x", 0.0), ("y", 100.0)]))
            .unwrap();
        assert_eq!(action.direction("u"), Some(1));
    }
}
