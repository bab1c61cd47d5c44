//! Error type
use thiserror::Error;

/// Invalid argument given to a bandit agent.
///
/// Raised either when building an agent or when updating it.
/// The agent state is never modified by a call that returns an error.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum BanditError {
    #[error("an agent must have at least one arm")]
    NoArms,
    #[error("action {action} is out of range for {num_arms} arm(s)")]
    ActionOutOfRange { action: usize, num_arms: usize },
    #[error("exploration probability must be in [0, 1], got {0}")]
    InvalidEpsilon(f64),
    #[error("step size must be finite and positive, got {0}")]
    InvalidStepSize(f64),
    #[error("exploration rate must be finite and non-negative, got {0}")]
    InvalidExplorationRate(f64),
    #[error("initial value must be finite, got {0}")]
    InvalidInitialValue(f64),
    #[error("reward must be finite, got {0}")]
    InvalidReward(f64),
    #[error("reward {reward} overflows the value estimate of action {action}")]
    ValueOverflow { action: usize, reward: f64 },
}

#[cfg(test)]
mod bandit_error {
    use super::*;

    #[test]
    fn action_out_of_range_message() {
        let err = BanditError::ActionOutOfRange {
            action: 3,
            num_arms: 3,
        };
        assert_eq!(err.to_string(), "action 3 is out of range for 3 arm(s)");
    }
}
