//! Side-by-side run of both schemes against the closed-form solution.

use tracing::info;

use crate::analytical;
use crate::error::Result;
use crate::grid::SimulationParameters;

use super::{CrankNicolsonConfig, Scheme, Simulation};

/// Final fields of both schemes and the reference solution.
#[derive(Debug, Clone)]
pub struct Comparison {
    /// Grid coordinates
    pub x: Vec<f64>,
    /// Time reached by both runs
    pub final_time: f64,
    /// FTCS result
    pub ftcs: Vec<f64>,
    /// Crank-Nicolson result
    pub crank_nicolson: Vec<f64>,
    /// Closed-form solution at `final_time`
    pub analytical: Vec<f64>,
}

impl Comparison {
    /// Largest pointwise FTCS error.
    pub fn ftcs_max_error(&self) -> f64 {
        max_error(&self.ftcs, &self.analytical)
    }

    /// Largest pointwise Crank-Nicolson error.
    pub fn crank_nicolson_max_error(&self) -> f64 {
        max_error(&self.crank_nicolson, &self.analytical)
    }
}

fn max_error(numeric: &[f64], exact: &[f64]) -> f64 {
    numeric
        .iter()
        .zip(exact)
        .fold(0.0f64, |acc, (n, e)| acc.max((n - e).abs()))
}

/// Run FTCS and Crank-Nicolson over the full horizon from the same start.
pub fn compare(params: SimulationParameters, config: CrankNicolsonConfig) -> Result<Comparison> {
    let mut explicit = Simulation::new(params)?;
    explicit.run(Scheme::Ftcs)?;

    let mut implicit = Simulation::with_config(params, config)?;
    implicit.run(Scheme::CrankNicolson)?;

    let final_time = implicit.elapsed_time();
    let comparison = Comparison {
        x: params.x_grid(),
        final_time,
        ftcs: explicit.current_field().to_vec(),
        crank_nicolson: implicit.current_field().to_vec(),
        analytical: analytical::analytical_field(&params, final_time),
    };

    info!(
        final_time,
        ftcs_error = comparison.ftcs_max_error(),
        cn_error = comparison.crank_nicolson_max_error(),
        "scheme comparison"
    );

    Ok(comparison)
}
