//! Main simulation interface.

use std::path::PathBuf;

use tracing::{debug, error, info, trace, warn};

use crate::analytical;
use crate::error::{DiffusionError, Result};
use crate::export::{self, ExportOptions};
use crate::grid::{initial_condition, max_abs, FieldSnapshot, SimulationParameters};

use super::{CrankNicolsonConfig, CrankNicolsonStepper, FtcsStepper, Scheme, Stepper};

/// A temperature field on the unit bar and the steppers that advance it.
///
/// The field starts from the tent initial condition and is advanced by
/// exactly one scheme until [`Simulation::reset`] is called. A failed step
/// leaves the field as it was before that step.
pub struct Simulation {
    /// Validated parameters
    params: SimulationParameters,
    /// Current temperature field
    field: Vec<f64>,
    /// Buffer the next field is written into
    scratch: Vec<f64>,
    /// Explicit stepper
    ftcs: FtcsStepper,
    /// Implicit stepper
    crank_nicolson: CrankNicolsonStepper,
    /// Scheme that has advanced the field since the last reset
    active: Option<Scheme>,
    /// Steps taken since the last reset
    steps_taken: usize,
}

impl Simulation {
    /// Create a simulation with the default Crank-Nicolson configuration.
    pub fn new(params: SimulationParameters) -> Result<Self> {
        Self::with_config(params, CrankNicolsonConfig::default())
    }

    /// Create a simulation with a custom Crank-Nicolson configuration.
    pub fn with_config(params: SimulationParameters, config: CrankNicolsonConfig) -> Result<Self> {
        params.validate()?;

        let field = initial_condition(&params);
        let scratch = vec![0.0; field.len()];
        let ftcs = FtcsStepper::new(&params);
        let crank_nicolson = CrankNicolsonStepper::with_config(&params, config)?;

        debug!(
            alpha = params.alpha,
            h = params.h,
            k = params.k,
            n = params.grid_points(),
            tau = params.tau(),
            time_steps = params.time_steps(),
            boundary = crank_nicolson.boundary().name(),
            "simulation initialized"
        );

        Ok(Self {
            params,
            field,
            scratch,
            ftcs,
            crank_nicolson,
            active: None,
            steps_taken: 0,
        })
    }

    /// Get the simulation parameters.
    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    /// Read-only view of the current field.
    pub fn current_field(&self) -> &[f64] {
        &self.field
    }

    /// Owned copy of the current field with coordinates and time.
    pub fn snapshot(&self) -> FieldSnapshot {
        FieldSnapshot {
            x: self.params.x_grid(),
            values: self.field.clone(),
            time: self.elapsed_time(),
            steps: self.steps_taken,
        }
    }

    /// Steps taken since construction or the last reset.
    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// Simulated time reached, `steps_taken * tau`.
    pub fn elapsed_time(&self) -> f64 {
        self.steps_taken as f64 * self.params.tau()
    }

    /// Scheme advancing the field, if any step has been taken.
    pub fn active_scheme(&self) -> Option<Scheme> {
        self.active
    }

    /// Restore the initial condition and release the active scheme.
    pub fn reset(&mut self) {
        self.field = initial_condition(&self.params);
        self.active = None;
        self.steps_taken = 0;
    }

    /// Advance the field by one step.
    pub fn step(&mut self, scheme: Scheme) -> Result<()> {
        match self.active {
            Some(active) if active != scheme => {
                return Err(DiffusionError::SchemeConflict {
                    active: active.name(),
                    requested: scheme.name(),
                });
            }
            _ => {}
        }

        match scheme {
            Scheme::Ftcs => self.ftcs.step(&self.field, &mut self.scratch)?,
            Scheme::CrankNicolson => self.crank_nicolson.step(&self.field, &mut self.scratch)?,
        }

        std::mem::swap(&mut self.field, &mut self.scratch);
        self.active = Some(scheme);
        self.steps_taken += 1;

        trace!(
            scheme = scheme.name(),
            step = self.steps_taken,
            max = max_abs(&self.field),
            "step complete"
        );

        Ok(())
    }

    /// Advance the field by `steps` steps, stopping at the first failure.
    pub fn run_for(&mut self, scheme: Scheme, steps: usize) -> Result<()> {
        if scheme == Scheme::Ftcs && !self.params.is_ftcs_stable() {
            warn!(
                alpha = self.params.alpha,
                "FTCS with alpha >= 0.5 is unstable; the field will diverge"
            );
        }

        for _ in 0..steps {
            if let Err(e) = self.step(scheme) {
                if e.is_numerical() {
                    error!(scheme = scheme.name(), step = self.steps_taken + 1, "{e}");
                }
                return Err(e);
            }
        }

        info!(
            scheme = scheme.name(),
            steps = self.steps_taken,
            time = self.elapsed_time(),
            max = max_abs(&self.field),
            sum = self.field.iter().sum::<f64>(),
            "run complete"
        );

        Ok(())
    }

    /// Advance the field over the full horizon, `floor(1/tau) + 1` steps.
    pub fn run(&mut self, scheme: Scheme) -> Result<()> {
        self.run_for(scheme, self.params.time_steps())
    }

    /// Advance the full horizon with FTCS.
    pub fn run_explicit(&mut self) -> Result<()> {
        self.run(Scheme::Ftcs)
    }

    /// Advance the full horizon with Crank-Nicolson.
    pub fn run_crank_nicolson(&mut self) -> Result<()> {
        self.run(Scheme::CrankNicolson)
    }

    /// Closed-form temperature at `(x, t)` for unit diffusivity.
    pub fn evaluate_analytical(&self, x: f64, t: f64) -> f64 {
        analytical::evaluate(x, t)
    }

    /// Closed-form field on this grid at the current simulated time,
    /// accounting for the diffusivity.
    pub fn analytical_field(&self) -> Vec<f64> {
        analytical::analytical_field(&self.params, self.elapsed_time())
    }

    /// Write the current field as `x value` lines.
    ///
    /// Normalization, when requested, applies to the written copy only.
    pub fn export(&self, options: &ExportOptions, file_name: &str) -> Result<PathBuf> {
        export::write_xy(options, file_name, &self.params.x_grid(), &self.field)
    }
}
