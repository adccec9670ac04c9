//! Episodic REINFORCE training over frame-based paddle environments.

pub mod env;
pub mod paddle;
pub mod reinforce;

pub use env::{choose_action, Action, Env};
pub use paddle::PaddleEnv;
pub use reinforce::{ReinforceTrainer, TrainConfig};
