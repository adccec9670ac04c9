use policy::{
    discount_with_rewards, Frame, FrameGeometry, PolicyNet, Preprocessor, RmsProp, Tensor,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::env::{choose_action, Env};

/// Hyperparameters for a training run. The defaults are the configuration
/// the 80x80 difference-frame setup was tuned with.
#[derive(Clone, Debug)]
pub struct TrainConfig {
    /// Episodes per parameter update.
    pub batch_size: usize,
    /// Reward discount factor, in (0, 1).
    pub gamma: f32,
    /// RMSProp decay for the squared-gradient average, in (0, 1).
    pub decay_rate: f32,
    /// Hidden layer width.
    pub hidden_size: usize,
    /// Flattened observation length; must match the preprocessor geometry.
    pub input_dim: usize,
    /// RMSProp learning rate.
    pub learning_rate: f32,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            batch_size: 10,
            gamma: 0.99,
            decay_rate: 0.99,
            hidden_size: 200,
            input_dim: 80 * 80,
            learning_rate: 1e-4,
        }
    }
}

/// Episodic REINFORCE trainer.
///
/// Owns the environment, the policy network, the updater, and the per-step
/// trajectory buffers. [`episode`] is the cooperative unit of work: it runs
/// one full environment episode, performs the end-of-episode gradient and
/// update bookkeeping, and returns; the host calls it in a loop until it
/// decides to stop. Training itself has no terminal state.
///
/// [`episode`]: ReinforceTrainer::episode
pub struct ReinforceTrainer<E: Env> {
    env: E,
    cfg: TrainConfig,
    net: PolicyNet,
    optim: RmsProp,
    preproc: Preprocessor,
    rng: fastrand::Rng,
    frame: Frame,
    prev_processed: Option<Vec<f32>>,
    observations: Vec<Vec<f32>>,
    hiddens: Vec<Vec<f32>>,
    grad_log_ps: Vec<f32>,
    rewards: Vec<f32>,
    episodes_done: u64,
    running_reward: Option<f32>,
    render: bool,
}

impl<E: Env> ReinforceTrainer<E> {
    /// Trainer with freshly initialized weights.
    pub fn new(env: E, cfg: TrainConfig, seed: u64) -> Self {
        let mut init_rng = StdRng::seed_from_u64(seed);
        let net = PolicyNet::random(cfg.input_dim, cfg.hidden_size, &mut init_rng);
        Self::with_net(env, cfg, net, seed)
    }

    /// Trainer over an existing network, e.g. to continue from known
    /// weights or to pin them down in tests.
    pub fn with_net(mut env: E, cfg: TrainConfig, net: PolicyNet, seed: u64) -> Self {
        assert_eq!(net.in_dim(), cfg.input_dim);
        assert_eq!(net.hidden_dim(), cfg.hidden_size);
        let preproc = Preprocessor::new(FrameGeometry::default(), env.frame_width(), cfg.input_dim);
        let optim = RmsProp::new(cfg.learning_rate, cfg.decay_rate, &[&net.w1, &net.w2]);
        let frame = env.reset();
        Self {
            env,
            cfg,
            net,
            optim,
            preproc,
            rng: fastrand::Rng::with_seed(seed),
            frame,
            prev_processed: None,
            observations: Vec::new(),
            hiddens: Vec::new(),
            grad_log_ps: Vec::new(),
            rewards: Vec::new(),
            episodes_done: 0,
            running_reward: None,
            render: false,
        }
    }

    /// Call the environment's render hook every step.
    pub fn set_render(&mut self, render: bool) {
        self.render = render;
    }

    pub fn net(&self) -> &PolicyNet {
        &self.net
    }

    pub fn episodes_done(&self) -> u64 {
        self.episodes_done
    }

    /// Exponential moving average of episode rewards, seeded with the first
    /// episode's total.
    pub fn running_reward(&self) -> Option<f32> {
        self.running_reward
    }

    /// Runs one full episode and applies the end-of-episode update rule.
    /// Returns the episode's total reward.
    pub fn episode(&mut self) -> f32 {
        let mut total = 0.0;
        loop {
            let (reward, finished) = self.step_once();
            total += reward;
            if finished {
                break;
            }
        }
        self.finish_episode(total);
        total
    }

    fn step_once(&mut self) -> (f32, bool) {
        if self.render {
            self.env.render();
        }
        let (observation, processed) = self
            .preproc
            .process(&self.frame, self.prev_processed.as_deref());
        self.prev_processed = Some(processed);

        let (hidden, up_probability) = self.net.forward(&observation);
        self.observations.push(observation);
        self.hiddens.push(hidden);

        let action = choose_action(up_probability, &mut self.rng);
        let (frame, reward, done, truncated) = self.env.step(action);
        self.frame = frame;
        self.rewards.push(reward);
        self.grad_log_ps.push(action.label() - up_probability);
        (reward, done || truncated)
    }

    fn finish_episode(&mut self, total: f32) {
        self.episodes_done += 1;

        let hiddens = Tensor::stack(&self.hiddens);
        let observations = Tensor::stack(&self.observations);
        let shaped = discount_with_rewards(&self.grad_log_ps, &self.rewards, self.cfg.gamma);
        let grad = self.net.gradient(&shaped, &hiddens, &observations);
        self.optim.accumulate(&[&grad.w1, &grad.w2]);
        self.optim.maybe_step(
            &mut [&mut self.net.w1, &mut self.net.w2],
            self.episodes_done,
            self.cfg.batch_size,
        );

        let running = match self.running_reward {
            Some(prev) => prev * 0.99 + total * 0.01,
            None => total,
        };
        self.running_reward = Some(running);
        tracing::info!(
            "resetting env. episode {} reward total: {:.2}. running mean: {:.2}",
            self.episodes_done,
            total,
            running
        );

        self.observations.clear();
        self.hiddens.clear();
        self.grad_log_ps.clear();
        self.rewards.clear();
        self.frame = self.env.reset();
        self.prev_processed = None;
    }
}
