//! Episode glue: drive a simulator with the actor one control step at a
//! time, translating qualitative decisions into numeric force updates.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use super::cart::CartSimulator;
use crate::actor::QualitativeActor;
use crate::errors::ActorError;
use crate::model::{NumericState, QualitativeModel, Target};

/// Knobs for one cart episode.
#[derive(Debug, Clone)]
pub struct EpisodeConfig {
    /// Control steps to run.
    pub steps: usize,
    /// Time step per control cycle.
    pub dt: f64,
    /// Numeric force increment per unit of qualitative direction.
    pub force_step: f64,
    /// Force clamp magnitude.
    pub max_force: f64,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self {
            steps: 400,
            dt: 0.01,
            force_step: 1.0,
            max_force: 10.0,
        }
    }
}

/// Outcome of one episode.
#[derive(Debug, Clone, Serialize)]
pub struct EpisodeReport {
    /// Simulated time at which the cart first reached the origin, if it did.
    pub goal_time: Option<f64>,
    pub final_position: f64,
    pub final_velocity: f64,
    pub steps: usize,
}

/// Run one cart episode toward `x = 0, v = 0`.
///
/// Restarts the actor (keeping its learned extrema) and resets the
/// simulator, then loops observe → act → force update → integrate. The
/// qualitative direction on channel `F` nudges the numeric force in fixed
/// increments, clamped to `±max_force`.
pub fn run_cart_episode<M: QualitativeModel>(
    actor: &mut QualitativeActor<M>,
    sim: &mut CartSimulator,
    config: &EpisodeConfig,
) -> Result<EpisodeReport, ActorError> {
    actor.restart();
    sim.reset();

    let target: Target = HashMap::from([("x".to_string(), 0.0), ("v".to_string(), 0.0)]);
    let start_side = sim.x.signum();
    let mut force = 0.0;
    let mut goal_time = None;

    for _ in 0..config.steps {
        let state: NumericState =
            HashMap::from([("x".to_string(), sim.x), ("v".to_string(), sim.v)]);
        actor.observe(&state, config.dt)?;

        let action = actor.act(&target)?;
        force += config.force_step * f64::from(action.direction("F").unwrap_or(0));
        force = force.clamp(-config.max_force, config.max_force);

        sim.step(force, config.dt);

        // Reached the origin coming from the starting side.
        if goal_time.is_none() && sim.x * start_side <= 0.0 {
            goal_time = Some(sim.t);
        }
    }

    debug!(
        goal_time = ?goal_time,
        final_position = sim.x,
        final_velocity = sim.v,
        "episode finished"
    );

    Ok(EpisodeReport {
        goal_time,
        final_position: sim.x,
        final_velocity: sim.v,
        steps: config.steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CartModel;

    #[test]
    fn cart_reaches_the_origin_within_one_episode() {
        let mut actor = QualitativeActor::new(CartModel);
        let mut sim = CartSimulator::new(1.0, -10.0);
        let config = EpisodeConfig {
            steps: 800,
            ..Default::default()
        };

        let report = run_cart_episode(&mut actor, &mut sim, &config).unwrap();
        assert!(
            report.goal_time.is_some(),
            "cart should cross the origin within {} steps, ended at x = {}",
            config.steps,
            report.final_position
        );
    }

    #[test]
    fn extrema_survive_across_episodes() {
        let mut actor = QualitativeActor::new(CartModel);
        let mut sim = CartSimulator::new(1.0, -10.0);
        let config = EpisodeConfig::default();

        run_cart_episode(&mut actor, &mut sim, &config).unwrap();
        let (vpos, _) = actor.estimator().velocity_extrema("x");
        let learned = vpos.expect("first episode must learn a velocity extremum");

        run_cart_episode(&mut actor, &mut sim, &config).unwrap();
        let (vpos, _) = actor.estimator().velocity_extrema("x");
        assert!(
            vpos.expect("extremum still present") >= learned,
            "restart must keep learned extrema monotone across episodes"
        );
    }
}
