use thiserror::Error;

/// Errors surfaced by the qualitative actor.
///
/// Every variant is a contract violation by the caller or by the
/// qualitative model, never a recoverable runtime condition: the actor has
/// no I/O and nothing to retry. Non-deterministic model effects are *not*
/// errors — they are handled by abstaining from the vote.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActorError {
    /// `observe` was called with a zero or negative time step.
    #[error("invalid time step dt = {dt}; observations must advance time")]
    InvalidTimeStep { dt: f64 },

    /// A target referenced a variable the actor has never observed.
    #[error("variable '{0}' has no recorded observation")]
    UnobservedVariable(String),

    /// The qualitative model enumerated no candidate actions.
    #[error("qualitative model returned an empty action list")]
    NoActions,

    /// The model's effect vector has no entry for a target variable.
    #[error("effect vector has no entry for target variable '{0}'")]
    MissingEffect(String),

    /// The kinematic solver was asked to cover a remaining distance with no
    /// usable acceleration or cruise speed.
    #[error("degenerate kinematics: distance {dist} remaining with acceleration {acc} and cruise speed {cruise}")]
    DegenerateKinematics { dist: f64, acc: f64, cruise: f64 },
}

// Convenience constructors for the string-carrying variants
impl ActorError {
    /// A target variable the estimator has never seen.
    pub fn unobserved(variable: impl Into<String>) -> Self {
        ActorError::UnobservedVariable(variable.into())
    }

    /// An effect vector missing a required target variable.
    pub fn missing_effect(variable: impl Into<String>) -> Self {
        ActorError::MissingEffect(variable.into())
    }
}
