use crate::Tensor;

const EPSILON: f32 = 1e-5;

/// RMSProp with per-batch gradient accumulation. Episode gradients are
/// summed into `pending`; once per batch the summed gradient is applied as
/// an ascent step and `pending` is cleared. `grad_sq` decays geometrically
/// for the lifetime of the run.
pub struct RmsProp {
    lr: f32,
    decay: f32,
    grad_sq: Vec<Vec<f32>>,
    pending: Vec<Vec<f32>>,
}

impl RmsProp {
    pub fn new(lr: f32, decay: f32, params: &[&Tensor]) -> Self {
        Self {
            lr,
            decay,
            grad_sq: params.iter().map(|p| vec![0.0; p.len()]).collect(),
            pending: params.iter().map(|p| vec![0.0; p.len()]).collect(),
        }
    }

    /// Adds one episode's gradients, layer order matching `new`.
    pub fn accumulate(&mut self, grads: &[&Tensor]) {
        assert_eq!(grads.len(), self.pending.len());
        for (acc, g) in self.pending.iter_mut().zip(grads) {
            assert_eq!(acc.len(), g.len());
            for (a, gv) in acc.iter_mut().zip(&g.data) {
                *a += gv;
            }
        }
    }

    /// Applies the accumulated batch when `episode % batch_size == 0`.
    /// Returns whether an update fired.
    pub fn maybe_step(
        &mut self,
        params: &mut [&mut Tensor],
        episode: u64,
        batch_size: usize,
    ) -> bool {
        if batch_size == 0 || episode % batch_size as u64 != 0 {
            return false;
        }
        self.step(params);
        true
    }

    fn step(&mut self, params: &mut [&mut Tensor]) {
        assert_eq!(params.len(), self.pending.len());
        for ((p, sq), g) in params
            .iter_mut()
            .zip(self.grad_sq.iter_mut())
            .zip(self.pending.iter_mut())
        {
            for i in 0..p.data.len() {
                sq[i] = self.decay * sq[i] + (1.0 - self.decay) * g[i] * g[i];
                p.data[i] += self.lr * g[i] / (sq[i] + EPSILON).sqrt();
                g[i] = 0.0;
            }
        }
    }

    pub fn pending(&self) -> &[Vec<f32>] {
        &self.pending
    }

    pub fn grad_sq(&self) -> &[Vec<f32>] {
        &self.grad_sq
    }
}
