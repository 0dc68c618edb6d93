//! Explicit forward-time centered-space stepper.

use crate::error::{DiffusionError, Result};
use crate::grid::SimulationParameters;

use super::{Scheme, Stepper};

/// Three-point explicit update `U'[i] = alpha U[i-1] + d U[i] + alpha U[i+1]`.
///
/// Boundary values are copied through unchanged. For `alpha >= 0.5` the
/// diagonal weight `d = 1 - 2 alpha` is non-positive and the iteration
/// diverges; this is not checked.
#[derive(Debug, Clone)]
pub struct FtcsStepper {
    alpha: f64,
    d: f64,
}

impl FtcsStepper {
    /// Create a stepper for the given parameters.
    pub fn new(params: &SimulationParameters) -> Self {
        Self {
            alpha: params.alpha,
            d: params.ftcs_diagonal(),
        }
    }

    /// Neighbour weight.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Main-diagonal weight.
    pub fn diagonal(&self) -> f64 {
        self.d
    }
}

impl Stepper for FtcsStepper {
    fn step(&mut self, current: &[f64], next: &mut [f64]) -> Result<()> {
        let n = current.len();
        if next.len() != n {
            return Err(DiffusionError::grid_mismatch("next field", n, next.len()));
        }
        if n < 2 {
            return Err(DiffusionError::grid_mismatch("field", 2, n));
        }

        next[0] = current[0];
        next[n - 1] = current[n - 1];

        for (i, window) in current.windows(3).enumerate() {
            next[i + 1] = self.alpha * window[0] + self.d * window[1] + self.alpha * window[2];
        }

        Ok(())
    }

    fn scheme(&self) -> Scheme {
        Scheme::Ftcs
    }
}
