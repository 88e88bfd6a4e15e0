//! Incremental kinematic state estimation from successive observations.
//!
//! The estimator never smooths or fits anything: velocity is the exact
//! finite-difference slope of the last two positions, acceleration the
//! slope of the last two velocities. What it *learns* are the per-sign
//! extrema of both, which the ETA solver later uses as proxies for the
//! controlled system's physical limits.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::errors::ActorError;
use crate::model::NumericState;

/// Per-variable kinematic record.
///
/// Every field is optional: velocity exists only after two position
/// samples, acceleration only after two velocities, and each extremum only
/// after a non-zero sample of its sign. "Not yet observed" is always an
/// explicit `None`, never a sentinel value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariableKinematics {
    pub(crate) position: Option<f64>,
    pub(crate) velocity: Option<f64>,
    pub(crate) acceleration: Option<f64>,
    /// Largest velocity magnitude seen moving in the positive direction.
    pub(crate) max_velocity_pos: Option<f64>,
    /// Largest velocity magnitude seen moving in the negative direction.
    pub(crate) max_velocity_neg: Option<f64>,
    /// Largest acceleration magnitude seen in the positive direction.
    pub(crate) max_accel_pos: Option<f64>,
    /// Largest acceleration magnitude seen in the negative direction.
    pub(crate) max_accel_neg: Option<f64>,
}

impl VariableKinematics {
    /// Forget the transient state, keep the learned extrema.
    fn clear_transient(&mut self) {
        self.position = None;
        self.velocity = None;
        self.acceleration = None;
    }
}

/// Grow `slot` to at least `magnitude`. Extrema are monotone in magnitude
/// over the estimator's lifetime; only `reset` discards them.
fn update_extremum(slot: &mut Option<f64>, magnitude: f64) {
    match slot {
        Some(current) if *current >= magnitude => {}
        _ => *slot = Some(magnitude),
    }
}

/// Tracks position, inferred velocity/acceleration and signed extrema for
/// every observed variable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateEstimator {
    variables: HashMap<String, VariableKinematics>,
}

impl StateEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything, learned extrema included. A fresh estimator.
    pub fn reset(&mut self) {
        self.variables.clear();
    }

    /// Forget where the system is, but not how fast it can move: clears
    /// positions, velocities and accelerations while keeping the learned
    /// extrema. This is what makes the actor reusable across independent
    /// episodes against the same physical system.
    pub fn restart(&mut self) {
        for kin in self.variables.values_mut() {
            kin.clear_transient();
        }
    }

    /// Record one numeric sample per variable and infer derivatives.
    ///
    /// `dt` is the elapsed time since the previous observation and must be
    /// strictly positive.
    pub fn observe(&mut self, numeric_state: &NumericState, dt: f64) -> Result<(), ActorError> {
        if dt <= 0.0 {
            return Err(ActorError::InvalidTimeStep { dt });
        }

        for (name, &x) in numeric_state {
            let kin = self.variables.entry(name.clone()).or_default();

            // Velocity needs a previous position; the new position is
            // recorded unconditionally.
            let v = kin.position.map(|x0| (x - x0) / dt);
            kin.position = Some(x);

            if let Some(v) = v {
                // Acceleration needs a previous velocity.
                let a = kin.velocity.map(|v0| (v - v0) / dt);
                kin.velocity = Some(v);

                if v != 0.0 {
                    let slot = if v > 0.0 {
                        &mut kin.max_velocity_pos
                    } else {
                        &mut kin.max_velocity_neg
                    };
                    update_extremum(slot, v.abs());
                }

                if let Some(a) = a {
                    kin.acceleration = Some(a);
                    if a != 0.0 {
                        let slot = if a > 0.0 {
                            &mut kin.max_accel_pos
                        } else {
                            &mut kin.max_accel_neg
                        };
                        update_extremum(slot, a.abs());
                    }
                }
            }

            trace!(
                variable = %name,
                position = x,
                velocity = ?kin.velocity,
                acceleration = ?kin.acceleration,
                "observed sample"
            );
        }

        Ok(())
    }

    /// Last observed position of `variable`, if any.
    pub fn position(&self, variable: &str) -> Option<f64> {
        self.variables.get(variable).and_then(|k| k.position)
    }

    /// Last inferred velocity of `variable`, if any.
    pub fn velocity(&self, variable: &str) -> Option<f64> {
        self.variables.get(variable).and_then(|k| k.velocity)
    }

    /// Last inferred acceleration of `variable`, if any.
    pub fn acceleration(&self, variable: &str) -> Option<f64> {
        self.variables.get(variable).and_then(|k| k.acceleration)
    }

    /// Learned velocity extrema for `variable` as (positive, negative)
    /// unsigned magnitudes.
    pub fn velocity_extrema(&self, variable: &str) -> (Option<f64>, Option<f64>) {
        match self.variables.get(variable) {
            Some(kin) => (kin.max_velocity_pos, kin.max_velocity_neg),
            None => (None, None),
        }
    }

    /// Learned acceleration extrema for `variable` as (positive, negative)
    /// unsigned magnitudes.
    pub fn acceleration_extrema(&self, variable: &str) -> (Option<f64>, Option<f64>) {
        match self.variables.get(variable) {
            Some(kin) => (kin.max_accel_pos, kin.max_accel_neg),
            None => (None, None),
        }
    }

    /// Current numeric state: every variable with a recorded position.
    pub fn positions(&self) -> NumericState {
        self.variables
            .iter()
            .filter_map(|(name, kin)| kin.position.map(|x| (name.clone(), x)))
            .collect()
    }

    /// Estimated time for `variable` to arrive at `target_value` from its
    /// last known position, under accelerate-then-cruise kinematics with
    /// the learned extrema as limits (unit magnitudes until learned).
    pub fn eta(&self, variable: &str, target_value: f64) -> Result<f64, ActorError> {
        self.variables
            .get(variable)
            .ok_or_else(|| ActorError::unobserved(variable))?
            .eta(variable, target_value)
    }
}
