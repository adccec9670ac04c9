//! Numeric core of the paddle-game policy-gradient trainer.
//!
//! Everything in here is plain CPU arithmetic over flat `f32` buffers: the
//! frame preprocessor, the two-layer policy network with its hand-derived
//! backward pass, reward discounting, and the batched RMSProp updater. The
//! episode orchestration lives in the `rl` crate.

mod nn;
mod optim;
mod preprocess;
mod reward;

pub use nn::{sigmoid, PolicyGrad, PolicyNet};
pub use optim::RmsProp;
pub use preprocess::{Frame, FrameGeometry, Preprocessor};
pub use reward::{discount_rewards, discount_with_rewards};

/// Dense row-major float array with an explicit shape.
#[derive(Clone, Debug)]
pub struct Tensor {
    pub data: Vec<f32>,
    pub shape: Vec<usize>,
}

impl Tensor {
    pub fn from_vec(shape: Vec<usize>, data: Vec<f32>) -> Self {
        assert_eq!(shape.iter().product::<usize>(), data.len());
        Self { data, shape }
    }

    pub fn zeros(shape: Vec<usize>) -> Self {
        let len = shape.iter().product();
        Self {
            data: vec![0.0; len],
            shape,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Stacks equal-length rows into a `[rows.len(), row_len]` tensor.
    pub fn stack(rows: &[Vec<f32>]) -> Self {
        assert!(!rows.is_empty(), "cannot stack zero rows");
        let width = rows[0].len();
        let mut data = Vec::with_capacity(rows.len() * width);
        for row in rows {
            assert_eq!(row.len(), width);
            data.extend_from_slice(row);
        }
        Self {
            data,
            shape: vec![rows.len(), width],
        }
    }

    /// Row `i` of a 2-D tensor.
    pub fn row(&self, i: usize) -> &[f32] {
        assert_eq!(self.shape.len(), 2);
        let width = self.shape[1];
        &self.data[i * width..(i + 1) * width]
    }
}
