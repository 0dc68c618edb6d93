//! Grid setup for the unit bar.
//!
//! The bar `[0, 1]` is sampled at `N = floor(1/h) + 1` points `x_i = i * h`.
//! Both end points carry a zero Dirichlet condition for the whole run.

mod field;
mod initial;
mod params;

pub use field::{max_abs, FieldSnapshot};
pub use initial::{initial_condition, tent};
pub use params::{SimulationParameters, MAX_GRID_POINTS, MAX_TIME_STEPS};
