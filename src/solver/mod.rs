//! Time-stepping engine for the 1-D heat equation.
//!
//! This module advances a temperature field on the unit bar under
//! `u_t = K u_xx` with zero Dirichlet boundaries.
//!
//! ## Schemes
//!
//! Both schemes use the stability parameter `alpha = K * tau / h^2`.
//!
//! - **FTCS** (explicit): each interior point is a weighted sum of its
//!   neighbours from the previous step,
//!   `U'[i] = alpha U[i-1] + (1 - 2 alpha) U[i] + alpha U[i+1]`.
//!   Bounded only for `alpha < 0.5`.
//! - **Crank-Nicolson** (implicit): half explicit, half implicit. Each step
//!   builds a right-hand side `U*` and solves the tridiagonal system
//!   ```text
//!   -alpha/2 U'[i-1] + (1 + alpha) U'[i] - alpha/2 U'[i+1] = U*[i]
//!   ```
//!   with the Thomas algorithm. Stable for every `alpha > 0`.

mod comparison;
mod crank_nicolson;
mod ftcs;
mod simulation;
mod tridiagonal;

use std::fmt;
use std::str::FromStr;

use crate::error::{DiffusionError, Result};

pub use comparison::{compare, Comparison};
pub use crank_nicolson::{CrankNicolsonConfig, CrankNicolsonStepper};
pub use ftcs::FtcsStepper;
pub use simulation::Simulation;
pub use tridiagonal::TridiagonalSystem;

/// Pivot magnitude below which a tridiagonal system is treated as singular.
pub const SINGULAR_PIVOT_TOLERANCE: f64 = 1e-15;

/// One time step of a finite-difference scheme.
pub trait Stepper {
    /// Write the field one step after `current` into `next`.
    ///
    /// Both slices have the grid length. On error `next` holds no usable
    /// state and the caller must keep `current`.
    fn step(&mut self, current: &[f64], next: &mut [f64]) -> Result<()>;

    /// Scheme implemented by this stepper.
    fn scheme(&self) -> Scheme;
}

/// Finite-difference scheme used to advance the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Forward-time centered-space, explicit
    Ftcs,
    /// Crank-Nicolson, implicit
    CrankNicolson,
}

impl Scheme {
    /// Short name used in logs and file names.
    pub fn name(&self) -> &'static str {
        match self {
            Scheme::Ftcs => "ftcs",
            Scheme::CrankNicolson => "crank-nicolson",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scheme {
    type Err = DiffusionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ftcs" | "explicit" => Ok(Scheme::Ftcs),
            "cn" | "crank-nicolson" | "crank_nicolson" | "implicit" => Ok(Scheme::CrankNicolson),
            _ => Err(DiffusionError::UnknownVariant {
                kind: "scheme",
                name: s.to_string(),
            }),
        }
    }
}

/// How the first and last rows of the Crank-Nicolson step are formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryTreatment {
    /// `U*[0] = alpha/2 U[1]`, `U*[N-1] = alpha/2 U[N-2]`, and the boundary
    /// rows keep the constant `(-alpha/2, 1 + alpha, -alpha/2)` coefficients.
    /// The solved boundary values are then reset to zero.
    #[default]
    Literal,
    /// Identity boundary rows with a zero right-hand side, so the solve
    /// itself enforces `U[0] = U[N-1] = 0`.
    Dirichlet,
}

impl BoundaryTreatment {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            BoundaryTreatment::Literal => "literal",
            BoundaryTreatment::Dirichlet => "dirichlet",
        }
    }
}

impl FromStr for BoundaryTreatment {
    type Err = DiffusionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "literal" => Ok(BoundaryTreatment::Literal),
            "dirichlet" => Ok(BoundaryTreatment::Dirichlet),
            _ => Err(DiffusionError::UnknownVariant {
                kind: "boundary treatment",
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_from_str() {
        assert_eq!("FTCS".parse::<Scheme>().unwrap(), Scheme::Ftcs);
        assert_eq!("cn".parse::<Scheme>().unwrap(), Scheme::CrankNicolson);
        assert_eq!(
            "crank-nicolson".parse::<Scheme>().unwrap(),
            Scheme::CrankNicolson
        );
        assert!("euler".parse::<Scheme>().is_err());
    }

    #[test]
    fn test_steppers_report_scheme() {
        let params = crate::grid::SimulationParameters::default();
        let steppers: Vec<Box<dyn Stepper>> = vec![
            Box::new(FtcsStepper::new(&params)),
            Box::new(CrankNicolsonStepper::new(&params).unwrap()),
        ];
        let schemes: Vec<Scheme> = steppers.iter().map(|s| s.scheme()).collect();
        assert_eq!(schemes, vec![Scheme::Ftcs, Scheme::CrankNicolson]);
    }

    #[test]
    fn test_boundary_from_str() {
        assert_eq!(BoundaryTreatment::default(), BoundaryTreatment::Literal);
        assert_eq!(
            "Dirichlet".parse::<BoundaryTreatment>().unwrap(),
            BoundaryTreatment::Dirichlet
        );
        assert!("neumann".parse::<BoundaryTreatment>().is_err());
    }
}
