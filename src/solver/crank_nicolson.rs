//! Implicit Crank-Nicolson stepper.

use crate::error::{DiffusionError, Result};
use crate::grid::SimulationParameters;

use super::{BoundaryTreatment, Scheme, Stepper, TridiagonalSystem};

/// Configuration for the Crank-Nicolson stepper.
#[derive(Debug, Clone, Default)]
pub struct CrankNicolsonConfig {
    /// Treatment of the first and last rows.
    pub boundary: BoundaryTreatment,
}

impl CrankNicolsonConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the boundary-row treatment.
    pub fn with_boundary(mut self, boundary: BoundaryTreatment) -> Self {
        self.boundary = boundary;
        self
    }
}

/// Crank-Nicolson stepper.
///
/// The matrix is fixed at construction; each step only rebuilds the
/// right-hand side `U*` and reruns the elimination.
#[derive(Debug, Clone)]
pub struct CrankNicolsonStepper {
    alpha: f64,
    boundary: BoundaryTreatment,
    system: TridiagonalSystem,
    /// Right-hand side for the current step
    rhs: Vec<f64>,
}

impl CrankNicolsonStepper {
    /// Create a stepper with the default configuration.
    pub fn new(params: &SimulationParameters) -> Result<Self> {
        Self::with_config(params, CrankNicolsonConfig::default())
    }

    /// Create a stepper with a custom configuration.
    pub fn with_config(params: &SimulationParameters, config: CrankNicolsonConfig) -> Result<Self> {
        let n = params.grid_points();
        let system = TridiagonalSystem::crank_nicolson(n, params.alpha, config.boundary)?;

        Ok(Self {
            alpha: params.alpha,
            boundary: config.boundary,
            system,
            rhs: vec![0.0; n],
        })
    }

    /// The implicit system solved every step.
    pub fn system(&self) -> &TridiagonalSystem {
        &self.system
    }

    /// Right-hand side built by the most recent step.
    pub fn rhs(&self) -> &[f64] {
        &self.rhs
    }

    /// Boundary-row treatment in use.
    pub fn boundary(&self) -> BoundaryTreatment {
        self.boundary
    }

    /// Build `U*` from the current field.
    ///
    /// Interior rows are the explicit half of the scheme,
    /// `alpha/2 U[i-1] + (1 - alpha) U[i] + alpha/2 U[i+1]`.
    fn build_rhs(&mut self, current: &[f64]) {
        let n = current.len();
        let half = self.alpha / 2.0;
        let centre = 1.0 - self.alpha;

        for (i, window) in current.windows(3).enumerate() {
            self.rhs[i + 1] = half * window[0] + centre * window[1] + half * window[2];
        }

        match self.boundary {
            BoundaryTreatment::Literal => {
                self.rhs[0] = half * current[1];
                self.rhs[n - 1] = half * current[n - 2];
            }
            BoundaryTreatment::Dirichlet => {
                self.rhs[0] = 0.0;
                self.rhs[n - 1] = 0.0;
            }
        }
    }
}

impl Stepper for CrankNicolsonStepper {
    fn step(&mut self, current: &[f64], next: &mut [f64]) -> Result<()> {
        let n = self.system.size();
        if current.len() != n {
            return Err(DiffusionError::grid_mismatch("current field", n, current.len()));
        }
        if next.len() != n {
            return Err(DiffusionError::grid_mismatch("next field", n, next.len()));
        }

        self.build_rhs(current);
        self.system.solve_into(&self.rhs, next)?;

        // Zero Dirichlet condition
        next[0] = 0.0;
        next[n - 1] = 0.0;

        Ok(())
    }

    fn scheme(&self) -> Scheme {
        Scheme::CrankNicolson
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{initial_condition, max_abs};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn one_step(params: &SimulationParameters, config: CrankNicolsonConfig) -> (Vec<f64>, Vec<f64>) {
        let mut stepper = CrankNicolsonStepper::with_config(params, config).unwrap();
        let u = initial_condition(params);
        let mut next = vec![0.0; u.len()];
        stepper.step(&u, &mut next).unwrap();
        (u, next)
    }

    #[test]
    fn test_literal_rhs() {
        let params = SimulationParameters::new(0.5, 0.25, 1.0).unwrap();
        let mut stepper = CrankNicolsonStepper::new(&params).unwrap();
        let u = initial_condition(&params);
        let mut next = vec![0.0; u.len()];
        stepper.step(&u, &mut next).unwrap();

        // u = [0, 0.5, 1, 0.5, 0]
        let rhs = stepper.rhs();
        assert_relative_eq!(rhs[0], 0.125);
        assert_relative_eq!(rhs[1], 0.5);
        assert_relative_eq!(rhs[2], 0.75);
        assert_relative_eq!(rhs[3], 0.5);
        assert_relative_eq!(rhs[4], 0.125);
    }

    #[test]
    fn test_solution_satisfies_system_inside() {
        let params = SimulationParameters::default();
        let mut stepper = CrankNicolsonStepper::new(&params).unwrap();
        let u = initial_condition(&params);
        let mut next = vec![0.0; u.len()];
        stepper.step(&u, &mut next).unwrap();

        let system = stepper.system().clone();
        let mut solved = system.clone();
        let raw = solved.solve(stepper.rhs()).unwrap();
        let ax = system.multiply(&raw).unwrap();
        for (lhs, rhs) in ax.iter().zip(stepper.rhs()) {
            assert_abs_diff_eq!(*lhs, *rhs, epsilon = 1e-12);
        }
        // Interior values are the raw solve; only the ends are reset
        for i in 1..u.len() - 1 {
            assert_eq!(next[i], raw[i]);
        }
    }

    #[test]
    fn test_boundaries_stay_zero() {
        for boundary in [BoundaryTreatment::Literal, BoundaryTreatment::Dirichlet] {
            let params = SimulationParameters::default();
            let config = CrankNicolsonConfig::new().with_boundary(boundary);
            let mut stepper = CrankNicolsonStepper::with_config(&params, config).unwrap();
            let mut u = initial_condition(&params);
            let mut next = vec![0.0; u.len()];
            for _ in 0..params.time_steps() {
                stepper.step(&u, &mut next).unwrap();
                std::mem::swap(&mut u, &mut next);
                assert_eq!(u[0], 0.0);
                assert_eq!(u[u.len() - 1], 0.0);
            }
        }
    }

    #[test]
    fn test_stable_where_ftcs_is_not() {
        let params = SimulationParameters::new(0.502, 0.1, 1.0).unwrap();
        let mut stepper = CrankNicolsonStepper::new(&params).unwrap();
        let mut u = initial_condition(&params);
        let initial = max_abs(&u);
        let mut next = vec![0.0; u.len()];
        for _ in 0..100 {
            stepper.step(&u, &mut next).unwrap();
            std::mem::swap(&mut u, &mut next);
        }
        assert!(max_abs(&u) <= 2.0 * initial);
        assert!(u.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_large_alpha_stays_bounded() {
        let params = SimulationParameters::new(5.0, 0.1, 1.0).unwrap();
        let mut stepper = CrankNicolsonStepper::new(&params).unwrap();
        let mut u = initial_condition(&params);
        let mut next = vec![0.0; u.len()];
        for _ in 0..params.time_steps() {
            stepper.step(&u, &mut next).unwrap();
            std::mem::swap(&mut u, &mut next);
            assert!(max_abs(&u) <= 1.0);
        }
    }

    #[test]
    fn test_dirichlet_step_smooths_every_interior_point() {
        let params = SimulationParameters::default();
        let config = CrankNicolsonConfig::new().with_boundary(BoundaryTreatment::Dirichlet);
        let (u, next) = one_step(&params, config);

        for i in 1..u.len() - 1 {
            assert!(next[i] < u[i], "U[{i}]: {} >= {}", next[i], u[i]);
        }

        let before: f64 = u.iter().sum();
        let after: f64 = next.iter().sum();
        assert_relative_eq!(after, before, max_relative = 0.05);
    }

    #[test]
    fn test_literal_step_lowers_peak_and_keeps_mass() {
        let params = SimulationParameters::default();
        let (u, next) = one_step(&params, CrankNicolsonConfig::default());

        // The peak region diffuses; the linear flanks are nudged by the
        // boundary rows.
        for i in 3..=7 {
            assert!(next[i] < u[i], "U[{i}]: {} >= {}", next[i], u[i]);
        }
        assert!(max_abs(&next) < max_abs(&u));

        let before: f64 = u.iter().sum();
        let after: f64 = next.iter().sum();
        assert_relative_eq!(after, before, max_relative = 0.05);
    }

    #[test]
    fn test_symmetric_profile_stays_symmetric() {
        let params = SimulationParameters::default();
        let (_, next) = one_step(&params, CrankNicolsonConfig::default());
        let n = next.len();
        for i in 0..n {
            assert_abs_diff_eq!(next[i], next[n - 1 - i], epsilon = 1e-12);
        }
    }
}
