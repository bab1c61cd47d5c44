//! Multi-armed bandit agents.
//!
//! These agents have no notion of state; each estimates a value per action.
mod action_value;

pub use action_value::{BanditAgent, BanditAgentConfig, StepSize};
