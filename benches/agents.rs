//! Benchmark action selection and updates of bandit agents.
use banditry::agents::{Actor, BanditAgentConfig, BuildAgent, StepSize};
use banditry::Prng;
use criterion::{
    criterion_group, criterion_main, measurement::Measurement, BenchmarkGroup, Criterion,
};
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

const NUM_ARMS: usize = 10;

/// Benchmark one act-update cycle of an agent on a Gaussian bandit.
///
/// Arm `i` has mean reward `i / NUM_ARMS` and unit variance.
fn benchmark_agent_step<M>(group: &mut BenchmarkGroup<M>, name: &str, config: &BanditAgentConfig)
where
    M: Measurement,
{
    let mut rng = Prng::seed_from_u64(0);
    let mut agent = config.build_agent(NUM_ARMS, 1).unwrap();
    #[allow(clippy::cast_precision_loss)]
    let arms: Vec<_> = (0..NUM_ARMS)
        .map(|i| Normal::new(i as f64 / NUM_ARMS as f64, 1.0).unwrap())
        .collect();

    group.bench_function(name, |b| {
        b.iter(|| {
            let action = agent.act();
            // Sampling the reward is part of the measurement but should be cheap.
            let reward = arms[action].sample(&mut rng);
            agent.update(action, reward).unwrap();
        })
    });
}

fn bench_agents_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("agents_step");
    benchmark_agent_step(&mut group, "epsilon_greedy", &BanditAgentConfig::default());
    benchmark_agent_step(
        &mut group,
        "epsilon_greedy_constant_step",
        &BanditAgentConfig::default().with_step_size(StepSize::Constant(0.1)),
    );
    benchmark_agent_step(&mut group, "ucb", &BanditAgentConfig::ucb(2.0));
}

criterion_group!(benches, bench_agents_step);
criterion_main!(benches);
