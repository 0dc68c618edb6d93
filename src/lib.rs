//! # Diffusion Core
//!
//! Finite-difference solvers for the 1-D heat equation on a bar with both
//! ends held at zero.
//!
//! This library provides:
//! - An explicit Forward-Time Centered-Space (FTCS) stepper
//! - An implicit Crank-Nicolson stepper backed by a Thomas tridiagonal solver
//! - The truncated Fourier-series solution used as ground truth
//! - Two-column text export for plotting
//!
//! ## Architecture
//!
//! - [`grid`] - Parameters, derived grid quantities and the initial condition
//! - [`solver`] - Steppers, the tridiagonal solver and the [`Simulation`] driver
//! - [`analytical`] - Closed-form reference solution
//! - [`export`] - Plot-ready file output
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! diffusion --scheme cn --alpha 0.499 --h 0.1 --k 1.0 --output cn.data --normalize
//! ```
//!
//! ### Library
//!
//! ```
//! use diffusion_core::{Simulation, SimulationParameters};
//!
//! let params = SimulationParameters::new(0.499, 0.1, 1.0)?;
//! let mut sim = Simulation::new(params)?;
//! sim.run_crank_nicolson()?;
//! assert_eq!(sim.current_field().len(), 11);
//! # Ok::<(), diffusion_core::DiffusionError>(())
//! ```
//!
//! ## Discretization
//!
//! With `alpha = K tau / h^2`, the grid has `N = floor(1/h) + 1` points and a
//! full run takes `floor(1/tau) + 1` steps. FTCS is bounded only for
//! `alpha < 0.5`; Crank-Nicolson is bounded for every `alpha > 0`.

pub mod analytical;
pub mod error;
pub mod export;
pub mod grid;
pub mod solver;

// Re-export main types for convenience
pub use error::{DiffusionError, Result};
pub use export::ExportOptions;
pub use grid::SimulationParameters;
pub use solver::{Scheme, Simulation};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmDiffusion;

/// Default stability parameter, just under the FTCS limit
pub const DEFAULT_ALPHA: f64 = 0.499;

/// Default spatial step
pub const DEFAULT_H: f64 = 0.1;

/// Default diffusivity
pub const DEFAULT_K: f64 = 1.0;

/// Default directory for exported fields
pub const DEFAULT_OUTPUT_DIR: &str = "data";
