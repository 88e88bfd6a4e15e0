#![deny(unreachable_pub)]

//! Qualitative-reasoning control actor.
//!
//! Decides, at each control step, which discrete qualitative action most
//! plausibly drives a continuous system toward a numeric target — without
//! a quantitative dynamics model and without a training phase. The actor
//! infers per-variable velocity and acceleration from successive
//! observations, keeps running per-sign extrema as proxies for the
//! system's physical limits, and scores candidate actions by a closed-form
//! accelerate-then-cruise time-to-arrival estimate.
//!
//! ```
//! use qactor::{QualitativeActor, Target};
//! use qactor::model::CartModel;
//! use std::collections::HashMap;
//!
//! let mut actor = QualitativeActor::new(CartModel);
//! actor.observe(&HashMap::from([("x".to_string(), -10.0), ("v".to_string(), 0.0)]), 0.01)?;
//! let target: Target = HashMap::from([("x".to_string(), 0.0), ("v".to_string(), 0.0)]);
//! let action = actor.act(&target)?;
//! assert_eq!(action.direction("F"), Some(1));
//! # Ok::<(), qactor::ActorError>(())
//! ```

pub mod actor;
mod errors;
pub mod model;
pub mod sim;

pub use actor::{QualitativeActor, StateEstimator, VariableKinematics};
pub use errors::ActorError;
pub use model::{
    NumericState, QualitativeAction, QualitativeEffect, QualitativeModel, Target,
};
