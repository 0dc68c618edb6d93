//! Closed-form reference solution.
//!
//! For the tent initial condition with zero ends the heat equation on the
//! unit bar (K = 1) has the Fourier-series solution
//!
//! ```text
//! U(x, t) = 8/pi^2 * sum_{n>=1} sin(n pi/2) / n^2 * sin(n pi x) * exp(-(n pi)^2 t)
//! ```
//!
//! Only odd `n` contribute. The series is cut after [`SERIES_TERMS`] terms:
//! for `t > 0` the exponential makes the tail vanish far below `f64`
//! precision, and at `t = 0` the remaining error is bounded by the `1/n^2`
//! tail, roughly `8/pi^2 / SERIES_TERMS`.

use std::f64::consts::PI;

use crate::error::{DiffusionError, Result};
use crate::grid::SimulationParameters;

/// Number of series terms summed by [`evaluate`].
pub const SERIES_TERMS: usize = 200;

/// Temperature at position `x` and time `t >= 0`.
pub fn evaluate(x: f64, t: f64) -> f64 {
    evaluate_with_terms(x, t, SERIES_TERMS)
}

/// Temperature at `(x, t)` using the first `terms` terms of the series.
pub fn evaluate_with_terms(x: f64, t: f64, terms: usize) -> f64 {
    let sum: f64 = (1..=terms)
        .map(|n| {
            let n = n as f64;
            let decay = (-(n * PI).powi(2) * t).exp();
            (n * PI / 2.0).sin() * (n * PI * x).sin() * decay / n.powi(2)
        })
        .sum();

    sum * 8.0 / PI.powi(2)
}

/// Closed-form field on the simulation grid at physical time `t`.
///
/// A diffusivity `K` rescales time, so the series is evaluated at `K * t`.
pub fn analytical_field(params: &SimulationParameters, t: f64) -> Vec<f64> {
    let scaled = params.k * t;
    (0..params.grid_points())
        .map(|i| evaluate(params.x(i), scaled))
        .collect()
}

/// Temperature at the centre of the bar for each time in `times`.
pub fn center_series(times: &[f64]) -> Vec<f64> {
    times.iter().map(|&t| evaluate(0.5, t)).collect()
}

/// `steps` evenly spaced values from `t_min` to `t_max` inclusive.
pub fn linspace(steps: usize, t_min: f64, t_max: f64) -> Result<Vec<f64>> {
    if steps < 2 {
        return Err(DiffusionError::invalid_parameter(
            "steps",
            steps as f64,
            "a time grid needs at least two points",
        ));
    }
    if !t_min.is_finite() || !t_max.is_finite() || t_max < t_min {
        return Err(DiffusionError::invalid_parameter(
            "t_max",
            t_max,
            format!("time range must be finite and end after {t_min}"),
        ));
    }

    let dt = (t_max - t_min) / (steps - 1) as f64;
    Ok((0..steps).map(|i| t_min + i as f64 * dt).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::tent;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_symmetric_about_centre() {
        for &t in &[1e-4, 0.01, 0.05, 0.2, 1.0] {
            for i in 0..=20 {
                let x = i as f64 / 20.0;
                assert_abs_diff_eq!(evaluate(x, t), evaluate(1.0 - x, t), epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_zero_at_ends() {
        for &t in &[0.0, 0.01, 0.5] {
            assert_abs_diff_eq!(evaluate(0.0, t), 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(evaluate(1.0, t), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_matches_tent_at_start() {
        for i in 1..10 {
            let x = i as f64 / 10.0;
            assert_abs_diff_eq!(evaluate(x, 0.0), tent(x), epsilon = 5e-3);
        }
    }

    #[test]
    fn test_decays_like_first_mode() {
        // Late times are dominated by n = 1
        let t = 0.5;
        let first_mode = 8.0 / PI.powi(2) * (PI * 0.3).sin() * (-(PI * PI) * t).exp();
        assert_abs_diff_eq!(evaluate(0.3, t), first_mode, epsilon = 1e-15);
    }

    #[test]
    fn test_centre_series_decreases() {
        let times = linspace(50, 0.0, 1.0).unwrap();
        let series = center_series(&times);
        assert_eq!(series.len(), 50);
        for pair in series.windows(2) {
            assert!(pair[1] < pair[0]);
        }
    }

    #[test]
    fn test_truncation_is_converged() {
        let t = 0.01;
        assert_abs_diff_eq!(
            evaluate(0.37, t),
            evaluate_with_terms(0.37, t, 2000),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_field_on_grid() {
        let params = SimulationParameters::default();
        let field = analytical_field(&params, 0.05);
        assert_eq!(field.len(), 11);
        assert!(field[5] > field[4]);
    }

    #[test]
    fn test_field_rescales_time_by_diffusivity() {
        let unit = SimulationParameters::default();
        let fast = unit.with_k(4.0);
        let slow = analytical_field(&unit, 0.08);
        let quick = analytical_field(&fast, 0.02);
        for (a, b) in slow.iter().zip(&quick) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-15);
        }
        assert_abs_diff_eq!(quick[5], evaluate(0.5, 0.08), epsilon = 1e-15);
    }

    #[test]
    fn test_linspace() {
        let t = linspace(5, 0.0, 1.0).unwrap();
        assert_eq!(t, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert!(linspace(1, 0.0, 1.0).is_err());
        assert!(linspace(5, 1.0, 0.0).is_err());
    }
}
