//! Incremental action-value bandit agent.
use super::super::{Actor, ActorMode, Agent, BuildAgent, SetActorMode};
use crate::error::BanditError;
use crate::logging::{Loggable, StatsLogger};
use crate::utils::iter::ArgMaxBy;
use crate::Prng;
use log::{trace, warn};
use ndarray::{Array, Array1, ArrayView1};
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Step size rule for action value updates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StepSize {
    /// Step size `1 / N(a)`: each value is the mean of all rewards observed for its action.
    SampleAverage,
    /// A fixed step size: an exponentially weighted average favouring recent rewards.
    Constant(f64),
}

impl Default for StepSize {
    fn default() -> Self {
        Self::SampleAverage
    }
}

impl From<Option<f64>> for StepSize {
    fn from(alpha: Option<f64>) -> Self {
        alpha.map_or(Self::SampleAverage, Self::Constant)
    }
}

/// Configuration for a [`BanditAgent`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BanditAgentConfig {
    /// Step size rule of the value updates.
    pub step_size: StepSize,
    /// Scale factor `c` on the upper confidence bound exploration bonus.
    ///
    /// If zero, the agent uses epsilon-greedy exploration instead.
    pub exploration_rate: f64,
    /// Probability of taking a uniform random action under epsilon-greedy exploration.
    pub epsilon: f64,
    /// Initial estimate of every action value.
    ///
    /// Values above any plausible reward ("optimistic initialization") encourage exploration.
    pub initial_value: f64,
}

impl BanditAgentConfig {
    pub const fn new(
        step_size: StepSize,
        exploration_rate: f64,
        epsilon: f64,
        initial_value: f64,
    ) -> Self {
        Self {
            step_size,
            exploration_rate,
            epsilon,
            initial_value,
        }
    }

    /// Sample-average epsilon-greedy configuration.
    pub const fn epsilon_greedy(epsilon: f64) -> Self {
        Self::new(StepSize::SampleAverage, 0.0, epsilon, 0.0)
    }

    /// Sample-average upper confidence bound configuration.
    pub const fn ucb(exploration_rate: f64) -> Self {
        Self::new(StepSize::SampleAverage, exploration_rate, 0.0, 0.0)
    }

    pub const fn with_step_size(mut self, step_size: StepSize) -> Self {
        self.step_size = step_size;
        self
    }

    pub const fn with_initial_value(mut self, initial_value: f64) -> Self {
        self.initial_value = initial_value;
        self
    }

    /// Whether actions are selected by upper confidence bound (otherwise epsilon-greedy).
    pub fn is_ucb(&self) -> bool {
        self.exploration_rate != 0.0
    }

    /// Check that all parameters are in range.
    ///
    /// # Errors
    /// Returns the first invalid parameter found.
    pub fn validate(&self) -> Result<(), BanditError> {
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(BanditError::InvalidEpsilon(self.epsilon));
        }
        if !(self.exploration_rate.is_finite() && self.exploration_rate >= 0.0) {
            return Err(BanditError::InvalidExplorationRate(self.exploration_rate));
        }
        if let StepSize::Constant(alpha) = self.step_size {
            if !(alpha.is_finite() && alpha > 0.0) {
                return Err(BanditError::InvalidStepSize(alpha));
            }
        }
        if !self.initial_value.is_finite() {
            return Err(BanditError::InvalidInitialValue(self.initial_value));
        }
        Ok(())
    }
}

impl Default for BanditAgentConfig {
    fn default() -> Self {
        Self::epsilon_greedy(0.1)
    }
}

impl BuildAgent for BanditAgentConfig {
    type Agent = BanditAgent;

    fn build_agent(&self, num_arms: usize, seed: u64) -> Result<Self::Agent, BanditError> {
        BanditAgent::new(*self, num_arms, Prng::seed_from_u64(seed))
    }
}

/// A multi-armed bandit agent with incrementally updated action value estimates.
///
/// Selects actions either epsilon-greedily or by upper confidence bound (UCB1 with scale `c`)
/// and moves the value of the selected action towards each observed reward.
/// Ties between equally valued actions always go to the lowest index.
///
/// Not synchronized; each agent belongs to a single experiment thread.
#[derive(Debug, Clone, PartialEq)]
pub struct BanditAgent<R = Prng> {
    /// Mode of actor behaviour
    pub mode: ActorMode,

    config: BanditAgentConfig,
    /// Estimated value of each action
    values: Array1<f64>,
    /// Number of updates of each action
    counts: Array1<u64>,
    /// Number of actions selected so far
    time_step: u64,

    rng: R,
}

impl<R> BanditAgent<R> {
    /// Create a new agent.
    ///
    /// # Args
    /// * `config` - Agent parameters.
    /// * `num_arms` - Number of actions; must be at least 1.
    /// * `rng` - Source of randomness for epsilon-greedy exploration.
    ///
    /// # Errors
    /// Returns an error if there are no arms or `config` is invalid.
    pub fn new(config: BanditAgentConfig, num_arms: usize, rng: R) -> Result<Self, BanditError> {
        if num_arms == 0 {
            return Err(BanditError::NoArms);
        }
        config.validate()?;
        Ok(Self {
            mode: ActorMode::Training,
            config,
            values: Array::from_elem(num_arms, config.initial_value),
            counts: Array::zeros(num_arms),
            time_step: 0,
            rng,
        })
    }

    pub fn num_arms(&self) -> usize {
        self.values.len()
    }

    pub const fn config(&self) -> &BanditAgentConfig {
        &self.config
    }

    /// Estimated value of each action.
    pub fn values(&self) -> ArrayView1<f64> {
        self.values.view()
    }

    /// Number of times each action has been updated.
    pub fn counts(&self) -> ArrayView1<u64> {
        self.counts.view()
    }

    /// Number of calls to [`select_action`](Self::select_action) so far.
    pub const fn time_step(&self) -> u64 {
        self.time_step
    }

    /// The first action with the highest estimated value.
    ///
    /// Values compare numerically, so `-0.0` and `0.0` tie.
    pub fn greedy_action(&self) -> usize {
        // Values are always finite so no pair is incomparable
        self.values
            .iter()
            .argmax_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
            .expect("agent has at least one arm")
    }

    /// The first action with the highest upper confidence bound at the current time step.
    ///
    /// Untried actions have an infinite bound.
    #[allow(clippy::cast_precision_loss)]
    fn ucb_action(&self) -> usize {
        let log_time_step = (self.time_step as f64).ln();
        let mut best_preference = f64::NEG_INFINITY;
        let mut best_action = 0;
        for (action, (&value, &count)) in self.values.iter().zip(&self.counts).enumerate() {
            let preference = if count == 0 {
                f64::INFINITY
            } else {
                value + self.config.exploration_rate * (log_time_step / count as f64).sqrt()
            };
            if preference > best_preference {
                best_preference = preference;
                best_action = action;
            }
        }
        best_action
    }

    /// Update the value estimate of an action with an observed reward.
    ///
    /// # Errors
    /// Returns an error if `action` is out of range, `reward` is not finite
    /// or the updated estimate would overflow.
    /// The agent is not modified in that case.
    pub fn update(&mut self, action: usize, reward: f64) -> Result<(), BanditError> {
        self.update_logged(action, reward, &mut ())
    }

    /// Update the value estimate of an action and log update statistics.
    ///
    /// Logs `reward`, `td_error` (the reward minus the previous estimate) and `action`,
    /// then marks the logger step as done.
    ///
    /// # Errors
    /// Returns an error if `action` is out of range, `reward` is not finite
    /// or the updated estimate would overflow.
    /// The agent is not modified in that case.
    pub fn update_logged(
        &mut self,
        action: usize,
        reward: f64,
        logger: &mut dyn StatsLogger,
    ) -> Result<(), BanditError> {
        let num_arms = self.num_arms();
        if action >= num_arms {
            return Err(BanditError::ActionOutOfRange { action, num_arms });
        }
        if !reward.is_finite() {
            return Err(BanditError::InvalidReward(reward));
        }

        let count = self.counts[action] + 1;
        #[allow(clippy::cast_precision_loss)]
        let step_size = match self.config.step_size {
            StepSize::SampleAverage => (count as f64).recip(),
            StepSize::Constant(alpha) => alpha,
        };
        let value = self.values[action];
        let td_error = reward - value;
        let new_value = value + step_size * td_error;
        if !new_value.is_finite() {
            return Err(BanditError::ValueOverflow { action, reward });
        }
        self.counts[action] = count;
        self.values[action] = new_value;

        let mut log = |name: &'static str, loggable: Loggable| {
            logger
                .log(name, loggable)
                .unwrap_or_else(|err| warn!("error logging update: {}", err))
        };
        log("reward", Loggable::Scalar(reward));
        log("td_error", Loggable::Scalar(td_error));
        log(
            "action",
            Loggable::IndexSample {
                value: action,
                size: num_arms,
            },
        );
        logger.done();
        Ok(())
    }
}

impl<R: Rng> BanditAgent<R> {
    /// Select the next action, advancing the time step by one.
    ///
    /// In training mode the action is chosen by upper confidence bound if the exploration
    /// rate is nonzero and epsilon-greedily otherwise.
    /// In release mode the greedy action is always chosen.
    pub fn select_action(&mut self) -> usize {
        self.time_step += 1;
        let num_arms = self.num_arms();
        let (action, explore) = match self.mode {
            ActorMode::Release => (self.greedy_action(), false),
            ActorMode::Training if self.config.is_ucb() => (self.ucb_action(), false),
            ActorMode::Training => {
                if self.rng.gen::<f64>() <= self.config.epsilon {
                    (self.rng.gen_range(0..num_arms), true)
                } else {
                    (self.greedy_action(), false)
                }
            }
        };
        trace!(
            "time step {}: action {} (explore: {})",
            self.time_step,
            action,
            explore
        );
        action
    }
}

impl<R> fmt::Display for BanditAgent<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "BanditAgent(k={}, ", self.num_arms())?;
        if self.config.is_ucb() {
            write!(f, "ucb c={}", self.config.exploration_rate)?;
        } else {
            write!(f, "ϵ-greedy ϵ={}", self.config.epsilon)?;
        }
        match self.config.step_size {
            StepSize::SampleAverage => write!(f, ", sample-average")?,
            StepSize::Constant(alpha) => write!(f, ", α={}", alpha)?,
        }
        write!(f, ", Q₀={})", self.config.initial_value)
    }
}

impl<R: Rng> Actor for BanditAgent<R> {
    fn act(&mut self) -> usize {
        self.select_action()
    }
}

impl<R: Rng> Agent for BanditAgent<R> {
    fn update(
        &mut self,
        action: usize,
        reward: f64,
        logger: &mut dyn StatsLogger,
    ) -> Result<(), BanditError> {
        self.update_logged(action, reward, logger)
    }
}

impl<R> SetActorMode for BanditAgent<R> {
    fn set_actor_mode(&mut self, mode: ActorMode) {
        self.mode = mode
    }
}
