//! Read-only copy of a temperature field.

use std::fmt;

/// Temperature values on the grid at one instant, with their coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSnapshot {
    /// Grid coordinates `x_i = i * h`
    pub x: Vec<f64>,
    /// Temperature at each grid point
    pub values: Vec<f64>,
    /// Simulated time of the snapshot
    pub time: f64,
    /// Number of steps taken to reach it
    pub steps: usize,
}

impl FieldSnapshot {
    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the snapshot holds no points.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Largest absolute temperature.
    pub fn max_abs(&self) -> f64 {
        max_abs(&self.values)
    }

    /// Sum of all values (discrete heat content up to a factor of h).
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }
}

impl fmt::Display for FieldSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "U at t = {:.6} ({} steps):", self.time, self.steps)?;
        for (i, value) in self.values.iter().enumerate() {
            writeln!(f, "U[{i}] = {value:.6}")?;
        }
        Ok(())
    }
}

/// Largest absolute value in a slice, 0 for an empty slice.
pub fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0f64, |acc, v| acc.max(v.abs()))
}
