//! Dense symmetric linear algebra for the least-squares fit.
//!
//! Matrices are row-major `Vec<f64>` of length `n * n`. The solver goes
//! through an eigendecomposition of the (symmetric, positive semi-definite)
//! normal-equations matrix so that rank-deficient designs yield the
//! minimum-norm solution instead of an error, the way pseudo-inverse-based
//! solvers behave.

use crate::error::{ForecastError, Result};

/// Upper bound on Jacobi sweeps; symmetric matrices of this size settle in
/// well under ten.
const MAX_SWEEPS: usize = 64;

/// Relative eigenvalue cutoff below which a direction is treated as null.
const RCOND: f64 = 1e-10;

/// Eigendecomposition of a symmetric matrix by the cyclic Jacobi method.
///
/// Returns `(eigenvalues, eigenvectors)` where eigenvector `k` is column `k`
/// of the returned row-major matrix, so `a = v * diag(vals) * v^T`.
pub(crate) fn symmetric_eigen(mut a: Vec<f64>, n: usize) -> Result<(Vec<f64>, Vec<f64>)> {
    let mut v = vec![0.0; n * n];
    for i in 0..n {
        v[i * n + i] = 1.0;
    }
    if n < 2 {
        let vals = (0..n).map(|i| a[i * n + i]).collect();
        return Ok((vals, v));
    }

    let total_sq: f64 = a.iter().map(|x| x * x).sum();
    if !total_sq.is_finite() {
        return Err(ForecastError::FitFailure(
            "normal equations contain non-finite values".to_string(),
        ));
    }
    let tol = 1e-24 * total_sq.max(f64::MIN_POSITIVE);

    let mut converged = false;
    for _ in 0..MAX_SWEEPS {
        let off_sq: f64 = (0..n)
            .flat_map(|p| ((p + 1)..n).map(move |q| (p, q)))
            .map(|(p, q)| a[p * n + q] * a[p * n + q])
            .sum();
        if off_sq <= tol {
            converged = true;
            break;
        }

        for p in 0..n - 1 {
            for q in (p + 1)..n {
                let apq = a[p * n + q];
                if apq == 0.0 {
                    continue;
                }
                let app = a[p * n + p];
                let aqq = a[q * n + q];
                let tau = (aqq - app) / (2.0 * apq);
                let t = if tau >= 0.0 {
                    1.0 / (tau + (1.0 + tau * tau).sqrt())
                } else {
                    -1.0 / (-tau + (1.0 + tau * tau).sqrt())
                };
                let c = 1.0 / (1.0 + t * t).sqrt();
                let s = t * c;

                // a <- J^T a J, applied as a column then a row rotation
                for k in 0..n {
                    let akp = a[k * n + p];
                    let akq = a[k * n + q];
                    a[k * n + p] = c * akp - s * akq;
                    a[k * n + q] = s * akp + c * akq;
                }
                for k in 0..n {
                    let apk = a[p * n + k];
                    let aqk = a[q * n + k];
                    a[p * n + k] = c * apk - s * aqk;
                    a[q * n + k] = s * apk + c * aqk;
                }
                // accumulate v <- v J
                for k in 0..n {
                    let vkp = v[k * n + p];
                    let vkq = v[k * n + q];
                    v[k * n + p] = c * vkp - s * vkq;
                    v[k * n + q] = s * vkp + c * vkq;
                }
            }
        }
    }

    if !converged {
        return Err(ForecastError::FitFailure(
            "eigendecomposition did not converge".to_string(),
        ));
    }

    let vals = (0..n).map(|i| a[i * n + i]).collect();
    Ok((vals, v))
}

/// Moore-Penrose pseudo-inverse of a symmetric matrix.
///
/// Eigenvalues below `RCOND` times the largest magnitude are treated as
/// zero, so singular and rank-deficient matrices invert cleanly.
pub(crate) fn pseudo_inverse_sym(a: Vec<f64>, n: usize) -> Result<Vec<f64>> {
    let (vals, vecs) = symmetric_eigen(a, n)?;
    let largest = vals.iter().fold(0.0_f64, |m, &v| m.max(v.abs()));
    let cutoff = largest * RCOND;

    let mut pinv = vec![0.0; n * n];
    for k in 0..n {
        let lam = vals[k];
        if lam.abs() <= cutoff || lam == 0.0 {
            continue;
        }
        let inv = 1.0 / lam;
        for i in 0..n {
            let w = vecs[i * n + k] * inv;
            if w == 0.0 {
                continue;
            }
            for j in 0..n {
                pinv[i * n + j] += w * vecs[j * n + k];
            }
        }
    }
    Ok(pinv)
}

/// Multiply a row-major `n x n` matrix by a vector.
pub(crate) fn mat_vec(a: &[f64], n: usize, x: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; n];
    for i in 0..n {
        let row = &a[i * n..(i + 1) * n];
        out[i] = row.iter().zip(x).map(|(aij, xj)| aij * xj).sum();
    }
    out
}

/// Multiply two row-major `n x n` matrices.
pub(crate) fn mat_mul(a: &[f64], b: &[f64], n: usize) -> Vec<f64> {
    let mut out = vec![0.0; n * n];
    for i in 0..n {
        for k in 0..n {
            let aik = a[i * n + k];
            if aik == 0.0 {
                continue;
            }
            for j in 0..n {
                out[i * n + j] += aik * b[k * n + j];
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_eigen_diagonal_matrix() {
        let a = vec![3.0, 0.0, 0.0, 7.0];
        let (vals, _) = symmetric_eigen(a, 2).unwrap();
        let mut sorted = vals.clone();
        sorted.sort_by(|x, y| x.partial_cmp(y).unwrap());
        assert!(approx_eq(sorted[0], 3.0, 1e-12));
        assert!(approx_eq(sorted[1], 7.0, 1e-12));
    }

    #[test]
    fn test_eigen_known_2x2() {
        // [[2, 1], [1, 2]] has eigenvalues 1 and 3.
        let a = vec![2.0, 1.0, 1.0, 2.0];
        let (vals, vecs) = symmetric_eigen(a.clone(), 2).unwrap();
        let mut sorted = vals.clone();
        sorted.sort_by(|x, y| x.partial_cmp(y).unwrap());
        assert!(approx_eq(sorted[0], 1.0, 1e-12));
        assert!(approx_eq(sorted[1], 3.0, 1e-12));

        // Reconstruct a = v diag(vals) v^T.
        for i in 0..2 {
            for j in 0..2 {
                let mut sum = 0.0;
                for k in 0..2 {
                    sum += vecs[i * 2 + k] * vals[k] * vecs[j * 2 + k];
                }
                assert!(approx_eq(sum, a[i * 2 + j], 1e-12));
            }
        }
    }

    #[test]
    fn test_pinv_inverts_full_rank() {
        let a = vec![4.0, 1.0, 1.0, 3.0];
        let pinv = pseudo_inverse_sym(a.clone(), 2).unwrap();
        let product = mat_mul(&pinv, &a, 2);
        assert!(approx_eq(product[0], 1.0, 1e-10));
        assert!(approx_eq(product[1], 0.0, 1e-10));
        assert!(approx_eq(product[2], 0.0, 1e-10));
        assert!(approx_eq(product[3], 1.0, 1e-10));
    }

    #[test]
    fn test_pinv_rank_deficient_min_norm() {
        // [[1, 1], [1, 1]] is rank one; its pseudo-inverse is the same
        // matrix scaled by 1/4, and pinv * (1, 1) is the minimum-norm
        // solution (0.5, 0.5).
        let a = vec![1.0, 1.0, 1.0, 1.0];
        let pinv = pseudo_inverse_sym(a, 2).unwrap();
        for value in &pinv {
            assert!(approx_eq(*value, 0.25, 1e-12));
        }
        let x = mat_vec(&pinv, 2, &[1.0, 1.0]);
        assert!(approx_eq(x[0], 0.5, 1e-12));
        assert!(approx_eq(x[1], 0.5, 1e-12));
    }

    #[test]
    fn test_pinv_zero_matrix() {
        let pinv = pseudo_inverse_sym(vec![0.0; 9], 3).unwrap();
        assert!(pinv.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_non_finite_input_is_fit_failure() {
        let a = vec![1.0, f64::NAN, f64::NAN, 1.0];
        assert!(matches!(
            symmetric_eigen(a, 2),
            Err(ForecastError::FitFailure(_))
        ));
    }

    #[test]
    fn test_eigen_larger_matrix_reconstructs() {
        // Symmetric 4x4 built from b^T b plus a diagonal shift.
        let n = 4;
        let b: Vec<f64> = (0..n * n).map(|i| ((i * 7 % 11) as f64) - 5.0).collect();
        let mut a = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..n {
                for k in 0..n {
                    a[i * n + j] += b[k * n + i] * b[k * n + j];
                }
            }
            a[i * n + i] += 1.0;
        }

        let (vals, vecs) = symmetric_eigen(a.clone(), n).unwrap();
        for i in 0..n {
            for j in 0..n {
                let mut sum = 0.0;
                for k in 0..n {
                    sum += vecs[i * n + k] * vals[k] * vecs[j * n + k];
                }
                assert!(approx_eq(sum, a[i * n + j], 1e-9));
            }
        }
    }
}
