//! Qualitative model abstraction and the action/effect vocabulary.
//!
//! A qualitative model is the declarative, system-specific half of the
//! actor: it enumerates the discrete control choices available in the
//! current operating region and maps each choice to the signed direction in
//! which it pushes every modeled state variable. Models are stateless and
//! pure; the actor queries them read-only on every control step.

mod cart;
mod lander;

pub use cart::CartModel;
pub use lander::LanderModel;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Numeric state: variable name → current value.
pub type NumericState = HashMap<String, f64>;

/// Target: variable name → desired value.
pub type Target = HashMap<String, f64>;

/// A discrete control choice, expressed as a signed direction per control
/// channel, conventionally drawn from {-1, 0, +1}.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QualitativeAction(HashMap<String, i32>);

impl QualitativeAction {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Builder-style channel assignment.
    pub fn with(mut self, channel: &str, direction: i32) -> Self {
        self.0.insert(channel.to_string(), direction);
        self
    }

    /// Direction committed on `channel`, if the action names it.
    pub fn direction(&self, channel: &str) -> Option<i32> {
        self.0.get(channel).copied()
    }

    /// Determinism rank: how many channels this action commits to a
    /// definite non-zero direction. Used to break vote ties.
    pub fn rank(&self) -> usize {
        self.0.values().filter(|d| d.abs() == 1).count()
    }

    /// Iterate over (channel, direction) pairs.
    pub fn channels(&self) -> impl Iterator<Item = (&str, i32)> + '_ {
        self.0.iter().map(|(name, d)| (name.as_str(), *d))
    }
}

/// The signed-direction influence an action has on state variables.
///
/// A magnitude outside {-1, 0, 1} marks a non-deterministic effect: the
/// true direction depends on unmodeled interaction, and the selector must
/// abstain from voting on that variable for that action.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QualitativeEffect(HashMap<String, i32>);

impl QualitativeEffect {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Builder-style variable assignment.
    pub fn with(mut self, variable: &str, direction: i32) -> Self {
        self.0.insert(variable.to_string(), direction);
        self
    }

    /// Raw declared direction for `variable`, if the effect covers it.
    pub fn direction(&self, variable: &str) -> Option<i32> {
        self.0.get(variable).copied()
    }

    /// Direction usable for voting: non-deterministic entries abstain as 0.
    pub fn voting_direction(&self, variable: &str) -> Option<i32> {
        self.0
            .get(variable)
            .map(|&d| if d.abs() <= 1 { d } else { 0 })
    }
}

/// Declarative model of how qualitative actions influence the signs of a
/// system's state derivatives.
pub trait QualitativeModel {
    /// Enumerate the legal actions. The numeric state lets region-dependent
    /// models vary the action set; single-region models ignore it. Must
    /// return at least one action.
    fn actions(&self, numeric_state: &NumericState) -> Vec<QualitativeAction>;

    /// Map an action to its qualitative effect vector. Must return an entry
    /// for every variable the caller will ever place in a target.
    fn effect(
        &self,
        action: &QualitativeAction,
        numeric_state: &NumericState,
    ) -> QualitativeEffect;
}
