//! Simulation collaborators: numeric environments driven by the actor.
//!
//! The actor core performs no numerical integration itself; these modules
//! stand in for the physical system in the demo binary and the
//! integration tests, the same role a paper-trading environment plays for
//! a live one.

mod cart;
mod episode;

pub use cart::CartSimulator;
pub use episode::{run_cart_episode, EpisodeConfig, EpisodeReport};
