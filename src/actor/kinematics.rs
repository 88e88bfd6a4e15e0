//! Closed-form bang-bang time-to-arrival.
//!
//! The ETA model is deliberately idealized: accelerate at the largest
//! acceleration ever observed, cruise at the largest speed ever observed,
//! and treat the target as reached on arrival. That is enough to order
//! candidate actions by how long each target variable still needs, which is
//! all the selector uses the number for.

use crate::errors::ActorError;

use super::estimator::VariableKinematics;

/// Extremum magnitude assumed before anything has been learned. Keeps the
/// solver defined on a fresh estimator and gives a usable first estimate.
const UNIT_EXTREMUM: f64 = 1.0;

impl VariableKinematics {
    /// ETA of this variable at `target_value`, mirroring negative-direction
    /// goals into the one-directional solver. `variable` is only for error
    /// reporting.
    pub(crate) fn eta(&self, variable: &str, target_value: f64) -> Result<f64, ActorError> {
        let x = self
            .position
            .ok_or_else(|| ActorError::unobserved(variable))?;
        let v0 = self.velocity.unwrap_or(0.0);
        let v1_pos = self.max_velocity_pos.unwrap_or(UNIT_EXTREMUM);
        let v1_neg = self.max_velocity_neg.unwrap_or(UNIT_EXTREMUM);
        let acc = self.max_accel_pos.unwrap_or(UNIT_EXTREMUM);
        let dcc = self.max_accel_neg.unwrap_or(UNIT_EXTREMUM);

        let dist = target_value - x;
        if dist > 0.0 {
            time_to_goal(dist, v0, v1_pos, acc, dcc)
        } else if dist < 0.0 {
            // Mirror into the positive direction: flip the velocity sign
            // and swap the acceleration roles. Time is sign-agnostic.
            time_to_goal(-dist, -v0, v1_neg, dcc, acc)
        } else {
            Ok(0.0)
        }
    }
}

/// Time to cover `dist` toward a goal under bang-bang kinematics.
///
/// - `dist`: distance to be made (unsigned, > 0)
/// - `v0`: current speed, signed, positive toward the goal
/// - `v1`: cruise speed (unsigned)
/// - `acc`: acceleration toward the goal (unsigned)
/// - `dcc`: acceleration away from the goal (unsigned)
///
/// The parameters are goal-relative, not direction-relative: a system
/// moving away from the goal brakes with `acc`, because braking *is*
/// acceleration toward the goal. Once stopped, the problem reduces to the
/// moving-toward case, so the recursion is at most one call deep.
pub(crate) fn time_to_goal(
    dist: f64,
    v0: f64,
    v1: f64,
    acc: f64,
    dcc: f64,
) -> Result<f64, ActorError> {
    if acc <= 0.0 {
        return Err(ActorError::DegenerateKinematics {
            dist,
            acc,
            cruise: v1,
        });
    }

    if v0 >= 0.0 {
        // Moving toward the goal. Speed reached at the goal position under
        // constant acceleration: v² = v0² + 2·a·s.
        let vx = (v0 * v0 + 2.0 * acc * dist).sqrt();
        if vx <= v1 {
            Ok((vx - v0) / acc)
        } else {
            if v1 <= 0.0 {
                return Err(ActorError::DegenerateKinematics {
                    dist,
                    acc,
                    cruise: v1,
                });
            }
            // Accelerate to cruise speed, then cover the rest at cruise.
            let t_accel = (v1 - v0) / acc;
            let s_accel = (v1 * v1 - v0 * v0) / (2.0 * acc);
            Ok(t_accel + (dist - s_accel) / v1)
        }
    } else {
        // Moving away from the goal: brake to a stop first, covering extra
        // distance, then solve the stopped problem.
        let s_stop = v0 * v0 / (2.0 * acc);
        let t_stop = -v0 / acc;
        Ok(t_stop + time_to_goal(dist + s_stop, 0.0, v1, acc, dcc)?)
    }
}
