//! Multi-armed bandit agents for reinforcement learning experiments.
//!
//! The caller drives the experiment, supplying a reward for every selected action:
//!
//! ```
//! use banditry::{BanditAgentConfig, BuildAgent};
//!
//! let true_values = [0.2, 0.8, 0.5];
//! let mut agent = BanditAgentConfig::ucb(2.0).build_agent(true_values.len(), 0)?;
//! for _ in 0..500 {
//!     let action = agent.select_action();
//!     agent.update(action, true_values[action])?;
//! }
//! assert_eq!(agent.greedy_action(), 1);
//! # Ok::<(), banditry::BanditError>(())
//! ```
#![warn(clippy::cast_lossless)]
#![warn(clippy::cast_possible_truncation)]
#![warn(clippy::doc_markdown)]
#![warn(clippy::explicit_iter_loop)]
#![warn(clippy::missing_const_for_fn)] // has some false positives
#![warn(clippy::needless_borrow)]
#![warn(clippy::needless_pass_by_value)]
#![warn(clippy::redundant_closure_for_method_calls)]
#![warn(clippy::use_self)]
pub mod agents;
mod error;
pub mod logging;
pub mod utils;

pub use agents::{
    Actor, ActorMode, Agent, BanditAgent, BanditAgentConfig, BuildAgent, SetActorMode, StepSize,
};
pub use error::BanditError;

/// Pseudo-random number generator used by agents unless another is injected.
pub type Prng = rand_chacha::ChaCha8Rng;
