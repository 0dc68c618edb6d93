//! Simulation parameters and the grid quantities derived from them.

use crate::error::{DiffusionError, Result};
use crate::{DEFAULT_ALPHA, DEFAULT_H, DEFAULT_K};

/// Largest grid accepted by [`SimulationParameters::validate`].
pub const MAX_GRID_POINTS: usize = 10_000_000;

/// Largest full-run step count accepted by [`SimulationParameters::validate`].
pub const MAX_TIME_STEPS: usize = 1_000_000_000;

/// Physical and numerical parameters of a run.
///
/// The spatial domain is the unit bar `[0, 1]`. From the three inputs the
/// grid size `N = floor(1/h) + 1`, the time step `tau = alpha * h^2 / K` and
/// the step count `floor(1/tau) + 1` are derived. None of these change once
/// a simulation is constructed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParameters {
    /// Stability (Fourier) parameter, `K * tau / h^2`
    pub alpha: f64,
    /// Spatial step
    pub h: f64,
    /// Diffusivity
    pub k: f64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            h: DEFAULT_H,
            k: DEFAULT_K,
        }
    }
}

impl SimulationParameters {
    /// Create validated parameters.
    pub fn new(alpha: f64, h: f64, k: f64) -> Result<Self> {
        let params = Self { alpha, h, k };
        params.validate()?;
        Ok(params)
    }

    /// Set the stability parameter.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the spatial step.
    pub fn with_h(mut self, h: f64) -> Self {
        self.h = h;
        self
    }

    /// Set the diffusivity.
    pub fn with_k(mut self, k: f64) -> Self {
        self.k = k;
        self
    }

    /// Check every parameter against its valid range.
    ///
    /// `alpha >= 0.5` is accepted: FTCS diverges there, which is a result to
    /// observe rather than an error.
    pub fn validate(&self) -> Result<()> {
        if !self.h.is_finite() || self.h <= 0.0 || self.h > 1.0 {
            return Err(DiffusionError::invalid_parameter(
                "h",
                self.h,
                "spatial step must be in (0, 1]",
            ));
        }

        if !self.k.is_finite() || self.k <= 0.0 {
            return Err(DiffusionError::invalid_parameter(
                "K",
                self.k,
                "diffusivity must be positive",
            ));
        }

        // tau and the step count are undefined for a non-positive alpha
        if !self.alpha.is_finite() || self.alpha <= 0.0 {
            return Err(DiffusionError::invalid_parameter(
                "alpha",
                self.alpha,
                "stability parameter must be positive",
            ));
        }

        let intervals = (1.0 / self.h).floor();
        if intervals.is_nan() || intervals >= MAX_GRID_POINTS as f64 {
            return Err(DiffusionError::invalid_parameter(
                "h",
                self.h,
                format!("grid would exceed {MAX_GRID_POINTS} points"),
            ));
        }

        let steps = (1.0 / self.tau()).floor();
        if steps.is_nan() || steps >= MAX_TIME_STEPS as f64 {
            return Err(DiffusionError::invalid_parameter(
                "alpha",
                self.alpha,
                format!("time step {:e} would need more than {MAX_TIME_STEPS} steps", self.tau()),
            ));
        }

        Ok(())
    }

    /// Time step `tau = alpha * h^2 / K`.
    pub fn tau(&self) -> f64 {
        self.alpha * self.h.powi(2) / self.k
    }

    /// Number of spatial grid points, `floor(1/h) + 1`.
    ///
    /// Saturates for parameters that were never validated.
    pub fn grid_points(&self) -> usize {
        ((1.0 / self.h).floor() as usize).saturating_add(1)
    }

    /// Number of time steps in a full run, `floor(1/tau) + 1`.
    ///
    /// Saturates for parameters that were never validated.
    pub fn time_steps(&self) -> usize {
        ((1.0 / self.tau()).floor() as usize).saturating_add(1)
    }

    /// Simulated time reached after a full run.
    pub fn final_time(&self) -> f64 {
        self.time_steps() as f64 * self.tau()
    }

    /// Main-diagonal weight of the explicit stencil, `1 - 2*alpha`.
    pub fn ftcs_diagonal(&self) -> f64 {
        1.0 - 2.0 * self.alpha
    }

    /// Main-diagonal coefficient of the implicit system, `1 + alpha`.
    pub fn cn_diagonal(&self) -> f64 {
        1.0 + self.alpha
    }

    /// Whether FTCS stays bounded for this alpha.
    pub fn is_ftcs_stable(&self) -> bool {
        self.alpha < 0.5
    }

    /// Coordinate of grid point `i`.
    pub fn x(&self, i: usize) -> f64 {
        i as f64 * self.h
    }

    /// Coordinates of every grid point.
    pub fn x_grid(&self) -> Vec<f64> {
        (0..self.grid_points()).map(|i| self.x(i)).collect()
    }
}
