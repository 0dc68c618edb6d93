//! Diffusion - 1-D heat equation solver
//!
//! Evolves the tent profile on the unit bar with FTCS or Crank-Nicolson and
//! writes the result as a two-column data file.
//!
//! # Usage
//!
//! ```bash
//! diffusion --scheme cn --alpha 0.499 --h 0.1 --output cn.data
//! diffusion --scheme analytical --samples 100
//! diffusion --scheme compare --alpha 0.6 --normalize
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use diffusion_core::{
    analytical,
    error::Result,
    export::{self, ExportOptions},
    solver::{compare, BoundaryTreatment, CrankNicolsonConfig},
    Scheme, Simulation, SimulationParameters, DEFAULT_ALPHA, DEFAULT_H, DEFAULT_K,
    DEFAULT_OUTPUT_DIR,
};

/// What to compute
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Explicit forward-time centered-space
    Ftcs,
    /// Implicit Crank-Nicolson
    Cn,
    /// Closed-form centre temperature against time
    Analytical,
    /// Both schemes and the closed form at the final time
    Compare,
}

/// 1-D heat equation solver
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scheme or reference computation to run
    #[arg(short, long, value_enum, default_value_t = Mode::Cn)]
    scheme: Mode,

    /// Stability parameter alpha = K tau / h^2
    #[arg(short, long, default_value_t = DEFAULT_ALPHA)]
    alpha: f64,

    /// Spatial step
    #[arg(long, default_value_t = DEFAULT_H)]
    h: f64,

    /// Diffusivity
    #[arg(short, long, default_value_t = DEFAULT_K)]
    k: f64,

    /// Number of steps (defaults to the full horizon floor(1/tau) + 1)
    #[arg(long)]
    steps: Option<usize>,

    /// Crank-Nicolson boundary rows (literal, dirichlet)
    #[arg(short, long, default_value = "literal")]
    boundary: BoundaryTreatment,

    /// Directory for exported data files
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Output file name inside the output directory
    #[arg(short, long)]
    output: Option<String>,

    /// Divide values by their maximum before writing
    #[arg(short, long)]
    normalize: bool,

    /// Print the final field to stdout
    #[arg(short, long)]
    print: bool,

    /// Number of time samples for the analytical series
    #[arg(long, default_value_t = 100)]
    samples: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level)
        .with_target(false)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("warning: logging already initialized");
    }

    let params = SimulationParameters::new(args.alpha, args.h, args.k)?;
    let options = ExportOptions::new()
        .with_output_dir(&args.output_dir)
        .with_normalize(args.normalize);
    let config = CrankNicolsonConfig::new().with_boundary(args.boundary);

    match args.scheme {
        Mode::Ftcs => run_scheme(&args, params, config, Scheme::Ftcs, &options),
        Mode::Cn => run_scheme(&args, params, config, Scheme::CrankNicolson, &options),
        Mode::Analytical => run_analytical(&args, &options),
        Mode::Compare => run_compare(&args, params, config, &options),
    }
}

fn run_scheme(
    args: &Args,
    params: SimulationParameters,
    config: CrankNicolsonConfig,
    scheme: Scheme,
    options: &ExportOptions,
) -> Result<()> {
    let mut simulation = Simulation::with_config(params, config)?;
    let steps = args.steps.unwrap_or_else(|| params.time_steps());
    simulation.run_for(scheme, steps)?;

    let file_name = args
        .output
        .clone()
        .unwrap_or_else(|| format!("U_{}.data", scheme.name().replace('-', "_")));

    let snapshot = simulation.snapshot();
    info!(
        sum = snapshot.sum(),
        max = snapshot.max_abs(),
        time = snapshot.time,
        "final field"
    );

    // A failed export still reports the computed field
    let exported = simulation.export(options, &file_name);
    if args.print || exported.is_err() {
        print!("{snapshot}");
    }

    match exported {
        Ok(path) => {
            info!("exported {} to {}", scheme, path.display());
            Ok(())
        }
        Err(e) => {
            error!("export failed: {e}");
            Err(e)
        }
    }
}

fn run_analytical(args: &Args, options: &ExportOptions) -> Result<()> {
    let times = analytical::linspace(args.samples, 0.0, 1.0)?;
    let values = analytical::center_series(&times);

    let file_name = args
        .output
        .clone()
        .unwrap_or_else(|| "U_vs_t_analytical.data".to_string());
    let path = export::write_xy(options, &file_name, &times, &values)?;

    if args.print {
        for (t, u) in times.iter().zip(&values) {
            println!("U(0.5, {t:.6}) = {u:.6}");
        }
    }

    info!("exported U vs t to {}", path.display());
    Ok(())
}

fn run_compare(
    args: &Args,
    params: SimulationParameters,
    config: CrankNicolsonConfig,
    options: &ExportOptions,
) -> Result<()> {
    let result = compare(params, config)?;

    println!("t = {:.6}", result.final_time);
    println!("FTCS max error:           {:.3e}", result.ftcs_max_error());
    println!("Crank-Nicolson max error: {:.3e}", result.crank_nicolson_max_error());

    let prefix = args.output.as_deref().unwrap_or("U");
    export::write_xy(options, &format!("{prefix}_ftcs.data"), &result.x, &result.ftcs)?;
    export::write_xy(
        options,
        &format!("{prefix}_crank_nicolson.data"),
        &result.x,
        &result.crank_nicolson,
    )?;
    export::write_xy(
        options,
        &format!("{prefix}_analytical.data"),
        &result.x,
        &result.analytical,
    )?;

    Ok(())
}
