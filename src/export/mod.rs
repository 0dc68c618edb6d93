//! Plot-ready text export.
//!
//! Fields are written as two whitespace-separated columns, one grid point
//! per line:
//!
//! ```text
//! 0 0
//! 0.1 0.2
//! ...
//! ```
//!
//! Files land in a fixed output directory (`data/` by default) under a
//! caller-supplied name.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{DiffusionError, Result};
use crate::DEFAULT_OUTPUT_DIR;

/// Where and how vectors are written.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Directory every export file is placed in.
    pub output_dir: PathBuf,
    /// Divide the value column by its maximum before writing.
    pub normalize: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            normalize: false,
        }
    }
}

impl ExportOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Enable or disable normalization.
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }
}

/// Divide every value by the vector's maximum value.
pub fn normalize_by_max(values: &mut [f64]) -> Result<()> {
    let max = values
        .iter()
        .copied()
        .reduce(f64::max)
        .ok_or(DiffusionError::EmptyVector {
            operation: "normalize",
        })?;

    if max == 0.0 || !max.is_finite() {
        return Err(DiffusionError::ZeroMaximum { max });
    }

    for v in values.iter_mut() {
        *v /= max;
    }

    Ok(())
}

/// Normalize, then replace every value with the mean.
pub fn fill_with_average(values: &mut [f64]) -> Result<()> {
    normalize_by_max(values)?;

    let mean = values.iter().sum::<f64>() / values.len() as f64;
    values.fill(mean);

    Ok(())
}

/// Write `x y` pairs to `options.output_dir/file_name`.
///
/// Lengths are checked before anything touches the filesystem, so a
/// mismatch never leaves a partial file behind. `y` itself is not modified.
pub fn write_xy(options: &ExportOptions, file_name: &str, x: &[f64], y: &[f64]) -> Result<PathBuf> {
    if x.is_empty() {
        return Err(DiffusionError::EmptyVector { operation: "export" });
    }
    if x.len() != y.len() {
        return Err(DiffusionError::grid_mismatch(
            format!("values in '{file_name}'"),
            x.len(),
            y.len(),
        ));
    }

    let mut values = y.to_vec();
    if options.normalize {
        normalize_by_max(&mut values)?;
    }

    fs::create_dir_all(&options.output_dir).map_err(|e| DiffusionError::OutputDirectory {
        path: options.output_dir.display().to_string(),
        source: e,
    })?;

    let path = options.output_dir.join(file_name);
    write_columns(&path, x, &values).map_err(|e| DiffusionError::FileWrite {
        path: path.display().to_string(),
        source: e,
    })?;

    info!(path = %path.display(), points = x.len(), "exported field");

    Ok(path)
}

fn write_columns(path: &Path, x: &[f64], y: &[f64]) -> std::io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    for (xi, yi) in x.iter().zip(y) {
        writeln!(file, "{xi} {yi}")?;
    }
    file.flush()
}
