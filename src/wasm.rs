//! WASM bindings for Diffusion Core.
//!
//! This module provides JavaScript-friendly bindings so a browser page can
//! run the solvers and plot the field directly.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmDiffusion, analytical_solution } from 'diffusion_core';
//!
//! await init();
//!
//! const sim = new WasmDiffusion(0.499, 0.1, 1.0);
//! sim.run("cn");
//! const field = sim.field();     // Float64Array
//! const x = sim.x_grid();
//! const exact = analytical_solution(0.5, sim.elapsed_time);
//! ```

use wasm_bindgen::prelude::*;

use crate::analytical;
use crate::error::DiffusionError;
use crate::grid::SimulationParameters;
use crate::solver::{BoundaryTreatment, CrankNicolsonConfig, Scheme, Simulation};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(err: DiffusionError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// WASM-compatible heat equation simulation.
///
/// Wraps the native [`Simulation`]; schemes are selected by name
/// (`"ftcs"` or `"cn"`).
#[wasm_bindgen]
pub struct WasmDiffusion {
    simulation: Simulation,
}

#[wasm_bindgen]
impl WasmDiffusion {
    /// Create a simulation with the literal Crank-Nicolson boundary rows.
    ///
    /// # Arguments
    /// * `alpha` - Stability parameter `K tau / h^2`
    /// * `h` - Spatial step in (0, 1]
    /// * `k` - Diffusivity
    #[wasm_bindgen(constructor)]
    pub fn new(alpha: f64, h: f64, k: f64) -> Result<WasmDiffusion, JsValue> {
        Self::with_boundary(alpha, h, k, "literal")
    }

    /// Create a simulation with a named boundary treatment
    /// (`"literal"` or `"dirichlet"`).
    #[wasm_bindgen]
    pub fn with_boundary(alpha: f64, h: f64, k: f64, boundary: &str) -> Result<WasmDiffusion, JsValue> {
        let params = SimulationParameters::new(alpha, h, k).map_err(to_js)?;
        let boundary: BoundaryTreatment = boundary.parse().map_err(to_js)?;
        let config = CrankNicolsonConfig::new().with_boundary(boundary);
        let simulation = Simulation::with_config(params, config).map_err(to_js)?;

        Ok(WasmDiffusion { simulation })
    }

    /// Advance the full horizon with the named scheme.
    #[wasm_bindgen]
    pub fn run(&mut self, scheme: &str) -> Result<(), JsValue> {
        let scheme: Scheme = scheme.parse().map_err(to_js)?;
        self.simulation.run(scheme).map_err(to_js)
    }

    /// Advance `steps` steps with the named scheme.
    ///
    /// Lets an animation loop draw intermediate fields.
    #[wasm_bindgen]
    pub fn advance(&mut self, scheme: &str, steps: usize) -> Result<(), JsValue> {
        let scheme: Scheme = scheme.parse().map_err(to_js)?;
        self.simulation.run_for(scheme, steps).map_err(to_js)
    }

    /// Restore the initial condition.
    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.simulation.reset();
    }

    /// Copy of the current field.
    #[wasm_bindgen]
    pub fn field(&self) -> Vec<f64> {
        self.simulation.current_field().to_vec()
    }

    /// Grid coordinates.
    #[wasm_bindgen]
    pub fn x_grid(&self) -> Vec<f64> {
        self.simulation.params().x_grid()
    }

    /// Closed-form field at the current simulated time.
    #[wasm_bindgen]
    pub fn analytical_field(&self) -> Vec<f64> {
        self.simulation.analytical_field()
    }

    /// Steps taken since the last reset.
    #[wasm_bindgen(getter)]
    pub fn steps_taken(&self) -> usize {
        self.simulation.steps_taken()
    }

    /// Simulated time reached.
    #[wasm_bindgen(getter)]
    pub fn elapsed_time(&self) -> f64 {
        self.simulation.elapsed_time()
    }

    /// Steps in a full run.
    #[wasm_bindgen(getter)]
    pub fn time_steps(&self) -> usize {
        self.simulation.params().time_steps()
    }
}

/// Closed-form temperature at `(x, t)` for unit diffusivity.
#[wasm_bindgen]
pub fn analytical_solution(x: f64, t: f64) -> f64 {
    analytical::evaluate(x, t)
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
