//! Initial temperature profile.

use super::SimulationParameters;

/// Tent profile peaking at the middle of the bar.
///
/// ```text
/// f(x) = 2x        for 0   < x <= 0.5
/// f(x) = 2(1 - x)  for 0.5 < x <= 1
/// f(x) = 0         otherwise
/// ```
pub fn tent(x: f64) -> f64 {
    if 0.0 < x && x <= 0.5 {
        2.0 * x
    } else if 0.5 < x && x <= 1.0 {
        2.0 * (1.0 - x)
    } else {
        0.0
    }
}

/// Build the initial field: tent values inside, zero at both ends.
pub fn initial_condition(params: &SimulationParameters) -> Vec<f64> {
    let n = params.grid_points();
    let mut u = vec![0.0; n];

    if n > 2 {
        for (i, value) in u.iter_mut().enumerate().take(n - 1).skip(1) {
            *value = tent(params.x(i));
        }
    }

    u
}
