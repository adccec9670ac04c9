//! # pongrl
//!
//! Entry point for the paddle-game policy-gradient trainer.
//!
//! This executable wires the built-in paddle environment to the episodic
//! REINFORCE trainer and runs episodes until the requested count is reached
//! or the process is stopped. One log line is emitted per finished episode
//! with the episode total and the running mean reward.

mod app;

use anyhow::Result;
use clap::Parser;

/// Command-line options for a training run.
#[derive(Parser)]
#[command(about = "Train a paddle-game policy with episodic policy gradients")]
pub struct Args {
    /// Number of episodes to train for (0 = run until interrupted).
    #[arg(long, default_value_t = 0)]
    pub episodes: u64,

    /// Seed for weight initialization and action sampling.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Episodes per parameter update.
    #[arg(long, default_value_t = 10)]
    pub batch_size: usize,

    /// RMSProp learning rate.
    #[arg(long, default_value_t = 1e-4)]
    pub learning_rate: f32,

    /// Call the environment's render hook every step.
    #[arg(long)]
    pub render: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    app::run(&args)
}
