//! Agent testing utilities
use crate::agents::{ActorMode, Agent, SetActorMode};

/// Rewards of the deterministic bandit used for training checks.
const DETERMINISTIC_BANDIT_REWARDS: [f64; 2] = [0.0, 1.0];

/// Check that the agent can be trained to perform well on a trivial bandit.
///
/// The bandit is deterministic with two arms:
/// the first arm always gives 0 reward and the second 1.
///
/// # Args
/// * `make_agent` - Build an agent given the number of arms.
/// * `num_train_steps` - Number of act-update cycles to train for.
/// * `threshold` - Minimum fraction of evaluation steps that must choose the second arm.
pub fn train_deterministic_bandit<A, F>(make_agent: F, num_train_steps: u64, threshold: f64)
where
    A: Agent + SetActorMode,
    F: FnOnce(usize) -> A,
{
    let mut agent = make_agent(DETERMINISTIC_BANDIT_REWARDS.len());

    // Training
    for _ in 0..num_train_steps {
        let action = agent.act();
        agent
            .update(action, DETERMINISTIC_BANDIT_REWARDS[action], &mut ())
            .unwrap();
    }

    eval_deterministic_bandit(agent, threshold);
}

/// Evaluate a trained agent on the 0-1 deterministic bandit.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn eval_deterministic_bandit<A>(mut agent: A, threshold: f64)
where
    A: Agent + SetActorMode,
{
    agent.set_actor_mode(ActorMode::Release);

    let num_eval_steps = 1000;
    let action_1_count = (0..num_eval_steps).filter(|_| agent.act() == 1).count();
    assert!(action_1_count >= ((num_eval_steps as f64) * threshold) as usize);
}
