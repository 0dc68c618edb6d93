//! Tridiagonal system storage and the Thomas algorithm.

use crate::error::{DiffusionError, Result};

use super::{BoundaryTreatment, SINGULAR_PIVOT_TOLERANCE};

/// Tridiagonal system `A x = d`.
///
/// Row `i` reads `a[i] * x[i-1] + b[i] * x[i] + c[i] * x[i+1] = d[i]`;
/// `a[0]` and `c[n-1]` are stored but never applied. The forward-elimination
/// coefficients are kept alongside the diagonals and recomputed on every
/// solve, since only the right-hand side changes between steps.
#[derive(Debug, Clone)]
pub struct TridiagonalSystem {
    /// Sub-diagonal
    pub a: Vec<f64>,
    /// Main diagonal
    pub b: Vec<f64>,
    /// Super-diagonal
    pub c: Vec<f64>,
    /// Modified super-diagonal from forward elimination
    c_prime: Vec<f64>,
    /// Modified right-hand side from forward elimination
    d_prime: Vec<f64>,
}

impl TridiagonalSystem {
    /// Create a system from its three diagonals.
    pub fn new(a: Vec<f64>, b: Vec<f64>, c: Vec<f64>) -> Result<Self> {
        let n = b.len();
        if n == 0 {
            return Err(DiffusionError::system_shape("system has no rows"));
        }
        if a.len() != n || c.len() != n {
            return Err(DiffusionError::system_shape(format!(
                "diagonal lengths differ (a: {}, b: {}, c: {})",
                a.len(),
                n,
                c.len()
            )));
        }

        Ok(Self {
            a,
            b,
            c,
            c_prime: vec![0.0; n],
            d_prime: vec![0.0; n],
        })
    }

    /// Create a system with the same coefficients on every row.
    pub fn constant(size: usize, sub: f64, diag: f64, sup: f64) -> Result<Self> {
        Self::new(vec![sub; size], vec![diag; size], vec![sup; size])
    }

    /// Crank-Nicolson matrix: `-alpha/2` off the diagonal, `1 + alpha` on it.
    ///
    /// With [`BoundaryTreatment::Dirichlet`] the first and last rows become
    /// identity rows so the boundary values solve to the right-hand side.
    pub fn crank_nicolson(size: usize, alpha: f64, boundary: BoundaryTreatment) -> Result<Self> {
        let off = -alpha / 2.0;
        let mut system = Self::constant(size, off, 1.0 + alpha, off)?;

        if boundary == BoundaryTreatment::Dirichlet {
            let last = size - 1;
            system.b[0] = 1.0;
            system.c[0] = 0.0;
            system.b[last] = 1.0;
            system.a[last] = 0.0;
        }

        Ok(system)
    }

    /// Number of rows.
    pub fn size(&self) -> usize {
        self.b.len()
    }

    /// Solve for `x` given the right-hand side.
    pub fn solve(&mut self, rhs: &[f64]) -> Result<Vec<f64>> {
        let mut x = vec![0.0; self.size()];
        self.solve_into(rhs, &mut x)?;
        Ok(x)
    }

    /// Solve for `x` into a caller-owned buffer.
    ///
    /// `out` is only fully written on success; a zero pivot aborts the
    /// elimination before back substitution starts.
    pub fn solve_into(&mut self, rhs: &[f64], out: &mut [f64]) -> Result<()> {
        let n = self.size();
        if rhs.len() != n {
            return Err(DiffusionError::grid_mismatch("right-hand side", n, rhs.len()));
        }
        if out.len() != n {
            return Err(DiffusionError::grid_mismatch("solution buffer", n, out.len()));
        }

        // Forward elimination
        let pivot = self.b[0];
        if pivot.abs() < SINGULAR_PIVOT_TOLERANCE {
            return Err(DiffusionError::SingularSystem { row: 0, pivot });
        }
        self.c_prime[0] = self.c[0] / pivot;
        self.d_prime[0] = rhs[0] / pivot;

        for i in 1..n {
            let pivot = self.b[i] - self.c_prime[i - 1] * self.a[i];
            if pivot.abs() < SINGULAR_PIVOT_TOLERANCE {
                return Err(DiffusionError::SingularSystem { row: i, pivot });
            }
            let beta = 1.0 / pivot;
            self.c_prime[i] = beta * self.c[i];
            self.d_prime[i] = beta * (rhs[i] - self.d_prime[i - 1] * self.a[i]);
        }

        // Back substitution
        out[n - 1] = self.d_prime[n - 1];
        for i in (0..n - 1).rev() {
            out[i] = self.d_prime[i] - self.c_prime[i] * out[i + 1];
        }

        Ok(())
    }

    /// Compute `A x`.
    pub fn multiply(&self, x: &[f64]) -> Result<Vec<f64>> {
        let n = self.size();
        if x.len() != n {
            return Err(DiffusionError::grid_mismatch("multiplied vector", n, x.len()));
        }

        let y = (0..n)
            .map(|i| {
                let mut row = self.b[i] * x[i];
                if i > 0 {
                    row += self.a[i] * x[i - 1];
                }
                if i + 1 < n {
                    row += self.c[i] * x[i + 1];
                }
                row
            })
            .collect();

        Ok(y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_identity() {
        let mut system = TridiagonalSystem::constant(5, 0.0, 1.0, 0.0).unwrap();
        let d = [1.0, 2.0, 3.0, 4.0, 5.0];
        let x = system.solve(&d).unwrap();
        for i in 0..5 {
            assert_abs_diff_eq!(x[i], d[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_recovers_known_solution() {
        // Hand-built, non-symmetric, diagonally dominant
        let a = vec![0.0, -1.0, 0.5, -2.0, 1.0, -0.25];
        let b = vec![4.0, 5.0, 3.5, 6.0, 4.5, 3.0];
        let c = vec![1.0, -1.5, 0.75, 1.0, -0.5, 0.0];
        let expected = [0.3, -1.2, 2.5, 0.0, 7.125, -3.0];

        let mut system = TridiagonalSystem::new(a, b, c).unwrap();
        let rhs = system.multiply(&expected).unwrap();
        let x = system.solve(&rhs).unwrap();

        for i in 0..expected.len() {
            assert_abs_diff_eq!(x[i], expected[i], epsilon = 1e-9);
        }
    }

    #[test]
    fn test_laplacian_residual() {
        let mut system = TridiagonalSystem::constant(4, -1.0, 2.0, -1.0).unwrap();
        let d = [1.0, 0.0, 0.0, 1.0];
        let x = system.solve(&d).unwrap();

        let ax = system.multiply(&x).unwrap();
        for i in 0..4 {
            assert_abs_diff_eq!(ax[i], d[i], epsilon = 1e-10);
        }
        // [1, 1, 1, 1] is the exact solution
        for xi in x {
            assert_abs_diff_eq!(xi, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_crank_nicolson_coefficients() {
        let system = TridiagonalSystem::crank_nicolson(11, 0.5, BoundaryTreatment::Literal).unwrap();
        assert!(system.a.iter().all(|&v| v == -0.25));
        assert!(system.c.iter().all(|&v| v == -0.25));
        assert!(system.b.iter().all(|&v| v == 1.5));
    }

    #[test]
    fn test_dirichlet_rows() {
        let mut system =
            TridiagonalSystem::crank_nicolson(5, 0.5, BoundaryTreatment::Dirichlet).unwrap();
        assert_eq!(system.b[0], 1.0);
        assert_eq!(system.c[0], 0.0);
        assert_eq!(system.b[4], 1.0);
        assert_eq!(system.a[4], 0.0);

        let x = system.solve(&[0.0, 1.0, 1.0, 1.0, 0.0]).unwrap();
        assert_eq!(x[0], 0.0);
        assert_eq!(x[4], 0.0);
    }

    #[test]
    fn test_zero_pivot_is_reported() {
        // Second pivot: 1 - (1/1) * 1 = 0
        let mut system =
            TridiagonalSystem::new(vec![0.0, 1.0, 1.0], vec![1.0, 1.0, 1.0], vec![1.0, 1.0, 0.0])
                .unwrap();
        let err = system.solve(&[1.0, 1.0, 1.0]).unwrap_err();
        assert!(matches!(err, DiffusionError::SingularSystem { row: 1, .. }));

        let mut system = TridiagonalSystem::constant(3, 1.0, 0.0, 1.0).unwrap();
        let err = system.solve(&[1.0, 1.0, 1.0]).unwrap_err();
        assert!(matches!(err, DiffusionError::SingularSystem { row: 0, .. }));
    }

    #[test]
    fn test_deterministic() {
        let mut system = TridiagonalSystem::constant(8, -0.3, 1.6, -0.3).unwrap();
        let rhs: Vec<f64> = (0..8).map(|i| (i as f64).sin()).collect();
        let first = system.solve(&rhs).unwrap();
        let second = system.solve(&rhs).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_shape_errors() {
        assert!(TridiagonalSystem::new(vec![0.0; 2], vec![1.0; 3], vec![0.0; 3]).is_err());
        assert!(TridiagonalSystem::new(vec![], vec![], vec![]).is_err());

        let mut system = TridiagonalSystem::constant(3, 0.0, 1.0, 0.0).unwrap();
        assert!(matches!(
            system.solve(&[1.0, 2.0]),
            Err(DiffusionError::GridMismatch { expected: 3, found: 2, .. })
        ));
    }
}
