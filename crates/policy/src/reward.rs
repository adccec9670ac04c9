/// Discounted returns over one episode.
///
/// The running return resets to zero at every step that carries a nonzero
/// reward: this game only rewards at point boundaries, so a nonzero reward
/// is also the value horizon for everything before it. The reset applies
/// before accumulating that step's own reward.
pub fn discount_rewards(rewards: &[f32], gamma: f32) -> Vec<f32> {
    let mut discounted = vec![0.0_f32; rewards.len()];
    let mut running = 0.0_f32;
    for t in (0..rewards.len()).rev() {
        if rewards[t] != 0.0 {
            running = 0.0;
        }
        running = running * gamma + rewards[t];
        discounted[t] = running;
    }
    discounted
}

/// REINFORCE gradient signal: per-step log-probability gradients scaled by
/// the mean-centered, std-normalized discounted returns.
///
/// A single-step episode has zero std; the epsilon keeps the division
/// finite but the resulting signal is near zero. That is the documented
/// behavior, not something to compensate for here.
pub fn discount_with_rewards(grad_log_p: &[f32], rewards: &[f32], gamma: f32) -> Vec<f32> {
    assert_eq!(grad_log_p.len(), rewards.len());
    let mut discounted = discount_rewards(rewards, gamma);
    let n = discounted.len() as f32;
    let mean = discounted.iter().sum::<f32>() / n;
    let var = discounted.iter().map(|d| (d - mean) * (d - mean)).sum::<f32>() / n;
    let std = var.sqrt();
    for d in &mut discounted {
        *d = (*d - mean) / (std + 1e-5);
    }
    grad_log_p
        .iter()
        .zip(&discounted)
        .map(|(g, d)| g * d)
        .collect()
}
