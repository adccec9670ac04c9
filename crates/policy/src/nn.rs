use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::Tensor;

/// Two-layer policy network: linear, relu, linear, sigmoid.
///
/// `w1` is `[hidden, input]` row-major and `w2` is `[hidden]`. There are no
/// bias terms. The scalar output is the probability of choosing the "up"
/// action.
pub struct PolicyNet {
    pub w1: Tensor,
    pub w2: Tensor,
    in_dim: usize,
    hidden_dim: usize,
}

/// Per-layer parameter gradients, shapes mirroring [`PolicyNet`] weights.
pub struct PolicyGrad {
    pub w1: Tensor,
    pub w2: Tensor,
}

impl PolicyNet {
    pub fn new(w1: Tensor, w2: Tensor) -> Self {
        assert_eq!(w1.shape.len(), 2, "w1 must be [hidden, input]");
        assert_eq!(w2.shape, vec![w1.shape[0]], "w2 must be [hidden]");
        let hidden_dim = w1.shape[0];
        let in_dim = w1.shape[1];
        Self {
            w1,
            w2,
            in_dim,
            hidden_dim,
        }
    }

    /// Gaussian initialization scaled by 1/sqrt(fan-in).
    pub fn random(in_dim: usize, hidden_dim: usize, rng: &mut impl Rng) -> Self {
        assert!(in_dim > 0 && hidden_dim > 0);
        let d1 = Normal::new(0.0_f32, 1.0 / (in_dim as f32).sqrt()).unwrap();
        let d2 = Normal::new(0.0_f32, 1.0 / (hidden_dim as f32).sqrt()).unwrap();
        let w1: Vec<f32> = (0..hidden_dim * in_dim).map(|_| d1.sample(rng)).collect();
        let w2: Vec<f32> = (0..hidden_dim).map(|_| d2.sample(rng)).collect();
        Self::new(
            Tensor::from_vec(vec![hidden_dim, in_dim], w1),
            Tensor::from_vec(vec![hidden_dim], w2),
        )
    }

    pub fn in_dim(&self) -> usize {
        self.in_dim
    }

    pub fn hidden_dim(&self) -> usize {
        self.hidden_dim
    }

    /// Forward pass for a single observation.
    ///
    /// Returns the rectified hidden activations (the backward pass needs
    /// them) and the probability of the "up" action.
    pub fn forward(&self, x: &[f32]) -> (Vec<f32>, f32) {
        assert_eq!(x.len(), self.in_dim);
        let mut hidden = vec![0.0_f32; self.hidden_dim];
        for (h, out) in hidden.iter_mut().enumerate() {
            let row = &self.w1.data[h * self.in_dim..(h + 1) * self.in_dim];
            let mut sum = 0.0;
            for (w, xv) in row.iter().zip(x) {
                sum += w * xv;
            }
            *out = sum.max(0.0);
        }
        let logit: f32 = hidden.iter().zip(&self.w2.data).map(|(h, w)| h * w).sum();
        (hidden, sigmoid(logit))
    }

    /// Backward pass over one episode, hand-derived for this architecture.
    ///
    /// `grad_log_p` is `[T]`, `hidden` is `[T, hidden]`, `obs` is
    /// `[T, input]`. The rectification is applied to the outer product
    /// `grad_log_p x w2` itself rather than gated by the forward hidden
    /// activation's sign; the training rule depends on this exact form.
    pub fn gradient(&self, grad_log_p: &[f32], hidden: &Tensor, obs: &Tensor) -> PolicyGrad {
        let steps = grad_log_p.len();
        assert_eq!(hidden.shape, vec![steps, self.hidden_dim]);
        assert_eq!(obs.shape, vec![steps, self.in_dim]);

        // d_w2 = hidden^T . grad_log_p
        let mut d_w2 = vec![0.0_f32; self.hidden_dim];
        for t in 0..steps {
            let g = grad_log_p[t];
            for (acc, h) in d_w2.iter_mut().zip(hidden.row(t)) {
                *acc += h * g;
            }
        }

        // d_w1 = relu(outer(grad_log_p, w2))^T . obs
        let mut d_w1 = vec![0.0_f32; self.hidden_dim * self.in_dim];
        for t in 0..steps {
            let g = grad_log_p[t];
            let obs_row = obs.row(t);
            for h in 0..self.hidden_dim {
                let delta = (g * self.w2.data[h]).max(0.0);
                if delta == 0.0 {
                    continue;
                }
                let out = &mut d_w1[h * self.in_dim..(h + 1) * self.in_dim];
                for (acc, o) in out.iter_mut().zip(obs_row) {
                    *acc += delta * o;
                }
            }
        }

        PolicyGrad {
            w1: Tensor::from_vec(vec![self.hidden_dim, self.in_dim], d_w1),
            w2: Tensor::from_vec(vec![self.hidden_dim], d_w2),
        }
    }
}

/// Logistic function, branched so the exponential never overflows.
pub fn sigmoid(x: f32) -> f32 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}
