//! Outer training loop: builds the environment and trainer from the
//! command-line options and drives episodes until the requested count is
//! reached. The per-episode logging itself lives in the trainer.

use anyhow::Result;
use rl::{PaddleEnv, ReinforceTrainer, TrainConfig};

use crate::Args;

pub fn run(args: &Args) -> Result<()> {
    tracing_subscriber::fmt::init();

    let cfg = TrainConfig {
        batch_size: args.batch_size,
        learning_rate: args.learning_rate,
        ..TrainConfig::default()
    };
    tracing::info!(
        "initializing policy network ({} -> {} -> 1), batch size {}...",
        cfg.input_dim,
        cfg.hidden_size,
        cfg.batch_size
    );

    let env = PaddleEnv::new(args.seed);
    let mut trainer = ReinforceTrainer::new(env, cfg, args.seed);
    trainer.set_render(args.render);

    loop {
        trainer.episode();
        if args.episodes != 0 && trainer.episodes_done() >= args.episodes {
            break;
        }
    }

    if let Some(mean) = trainer.running_reward() {
        tracing::info!(
            "finished after {} episodes. running mean: {:.2}",
            trainer.episodes_done(),
            mean
        );
    }
    Ok(())
}
