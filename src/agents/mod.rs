//! Reinforcement learning agents
mod bandits;
#[cfg(test)]
pub mod testing;

pub use bandits::{BanditAgent, BanditAgentConfig, StepSize};

use crate::error::BanditError;
use crate::logging::StatsLogger;
use serde::{Deserialize, Serialize};

/// An actor that selects one of a finite set of actions.
pub trait Actor {
    /// Choose an action index.
    ///
    /// Every call counts as one time step.
    fn act(&mut self) -> usize;
}

/// A learning agent.
///
/// Can select actions and learns from the reward that follows.
pub trait Agent: Actor {
    /// Update the agent with the reward observed for an action.
    ///
    /// # Args
    /// * `action` - The action taken; normally the result of the most recent [`Actor::act`].
    /// * `reward` - The reward received for taking `action`.
    /// * `logger` - Logger for update statistics.
    ///
    /// # Errors
    /// Returns an error if `action` or `reward` is invalid, in which case the agent is unchanged.
    fn update(
        &mut self,
        action: usize,
        reward: f64,
        logger: &mut dyn StatsLogger,
    ) -> Result<(), BanditError>;
}

/// Actor behaviour mode
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorMode {
    /// Training mode: the actor explores.
    Training,
    /// Release mode: the actor greedily exploits what it has learned.
    Release,
}

impl Default for ActorMode {
    fn default() -> Self {
        Self::Training
    }
}

/// Set the actor behaviour mode.
pub trait SetActorMode {
    /// Set the actor mode.
    fn set_actor_mode(&mut self, _mode: ActorMode) {}
}

/// Build an agent instance.
pub trait BuildAgent {
    type Agent;

    /// Build an agent for a bandit with the given number of arms.
    ///
    /// # Args
    /// * `num_arms` - Number of actions available to the agent.
    /// * `seed` - Seed for the agent's pseudo-random number generator.
    ///
    /// # Errors
    /// Returns an error if the configuration or the number of arms is invalid.
    fn build_agent(&self, num_arms: usize, seed: u64) -> Result<Self::Agent, BanditError>;
}
