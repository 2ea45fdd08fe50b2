//! Autoregressive model with dynamic multi-step prediction.
//!
//! Each observation is modeled as a linear combination of the preceding
//! `lags` observations plus an intercept, estimated by ordinary least
//! squares on the lagged design matrix. Heteroskedasticity-robust (HC0)
//! standard errors are computed alongside the point estimates; they describe
//! coefficient uncertainty only and never change a forecast value.
//!
//! ## Example
//!
//! ```rust
//! use stockcast_forecast::AutoReg;
//!
//! let data: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
//! let mut model = AutoReg::new(2).unwrap();
//! model.fit(&data).unwrap();
//! let ahead = model.predict(5).unwrap();
//! assert_eq!(ahead.len(), 5);
//! ```

use crate::error::{ForecastError, Result};
use crate::linalg::{mat_mul, mat_vec, pseudo_inverse_sym};

/// Fixed-order autoregressive model.
///
/// Unfitted until [`AutoReg::fit`] succeeds; prediction methods refuse to
/// run before that.
#[derive(Debug, Clone)]
pub struct AutoReg {
    /// Number of lagged observations feeding each prediction
    lags: usize,
    /// Intercept term
    intercept: f64,
    /// `coeffs[j]` multiplies the value `j + 1` steps back
    coeffs: Vec<f64>,
    /// HC0 standard errors, intercept first, then one per lag coefficient
    robust_se: Vec<f64>,
    /// Mean squared residual of the fit
    sigma2: f64,
    /// Training series, kept for dynamic-prediction seeding
    data: Vec<f64>,
    /// Whether the model has been fitted
    fitted: bool,
}

impl AutoReg {
    /// Create an unfitted model of the given lag order.
    pub fn new(lags: usize) -> Result<Self> {
        if lags == 0 {
            return Err(ForecastError::InvalidOrder(
                "lag order must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            lags,
            intercept: 0.0,
            coeffs: Vec::new(),
            robust_se: Vec::new(),
            sigma2: 0.0,
            data: Vec::new(),
            fitted: false,
        })
    }

    /// Lag order.
    pub fn lag_order(&self) -> usize {
        self.lags
    }

    /// Fitted intercept. Zero until fitted.
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Fitted lag coefficients; `coefficients()[j]` multiplies the value
    /// `j + 1` steps back. Empty until fitted.
    pub fn coefficients(&self) -> &[f64] {
        &self.coeffs
    }

    /// HC0 standard errors, intercept first. Empty until fitted.
    pub fn robust_std_errors(&self) -> &[f64] {
        &self.robust_se
    }

    /// Mean squared residual of the fit. Zero until fitted.
    pub fn residual_variance(&self) -> f64 {
        self.sigma2
    }

    /// Whether the model has been fitted.
    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    /// Fit by least squares on the lagged design matrix.
    ///
    /// Requires strictly more observations than the lag order. The solve is
    /// minimum-norm, so a rank-deficient design (fewer usable rows than
    /// coefficients, or a degenerate series) still produces estimates;
    /// only numerical breakdown is an error.
    pub fn fit(&mut self, data: &[f64]) -> Result<()> {
        let n = data.len();
        if n <= self.lags {
            return Err(ForecastError::InsufficientHistory {
                required: self.lags + 1,
                actual: n,
            });
        }
        if data.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::FitFailure(
                "training series contains non-finite values".to_string(),
            ));
        }

        let rows = n - self.lags;
        let p = self.lags + 1;

        // Row r targets observation `lags + r`; regressors are the intercept
        // column followed by the lags in recency order.
        let mut x = vec![0.0; rows * p];
        let mut y = vec![0.0; rows];
        for r in 0..rows {
            let i = self.lags + r;
            x[r * p] = 1.0;
            for j in 1..=self.lags {
                x[r * p + j] = data[i - j];
            }
            y[r] = data[i];
        }

        let mut xtx = vec![0.0; p * p];
        let mut xty = vec![0.0; p];
        for r in 0..rows {
            let row = &x[r * p..(r + 1) * p];
            for a in 0..p {
                let xa = row[a];
                if xa == 0.0 {
                    continue;
                }
                xty[a] += xa * y[r];
                for b in a..p {
                    xtx[a * p + b] += xa * row[b];
                }
            }
        }
        for a in 0..p {
            for b in 0..a {
                xtx[a * p + b] = xtx[b * p + a];
            }
        }

        let pinv = pseudo_inverse_sym(xtx, p)?;
        let beta = mat_vec(&pinv, p, &xty);
        if beta.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::FitFailure(
                "least-squares solution is non-finite".to_string(),
            ));
        }

        let mut residuals = vec![0.0; rows];
        for r in 0..rows {
            let row = &x[r * p..(r + 1) * p];
            let fit: f64 = row.iter().zip(&beta).map(|(xj, bj)| xj * bj).sum();
            residuals[r] = y[r] - fit;
        }
        let sigma2 = residuals.iter().map(|e| e * e).sum::<f64>() / rows as f64;

        // HC0 sandwich: (X'X)^+ X' diag(e^2) X (X'X)^+, diagonal only.
        let mut meat = vec![0.0; p * p];
        for r in 0..rows {
            let w = residuals[r] * residuals[r];
            if w == 0.0 {
                continue;
            }
            let row = &x[r * p..(r + 1) * p];
            for a in 0..p {
                let wa = w * row[a];
                if wa == 0.0 {
                    continue;
                }
                for b in a..p {
                    meat[a * p + b] += wa * row[b];
                }
            }
        }
        for a in 0..p {
            for b in 0..a {
                meat[a * p + b] = meat[b * p + a];
            }
        }
        let bread_meat = mat_mul(&pinv, &meat, p);
        let mut robust_se = vec![0.0; p];
        for j in 0..p {
            let mut var = 0.0;
            for b in 0..p {
                var += bread_meat[j * p + b] * pinv[b * p + j];
            }
            robust_se[j] = var.max(0.0).sqrt();
        }

        self.intercept = beta[0];
        self.coeffs = beta[1..].to_vec();
        self.robust_se = robust_se;
        self.sigma2 = sigma2;
        self.data = data.to_vec();
        self.fitted = true;
        Ok(())
    }

    /// Dynamic predictions for `steps` consecutive positions starting at
    /// index `start` of the training series (`start == len` continues past
    /// the end).
    ///
    /// The lag buffer is seeded with the `lags` actual observations strictly
    /// before `start`; every prediction is pushed into the buffer as it is
    /// made, so positions at and after `start` are only ever represented by
    /// model output. Errors compound forward by construction.
    pub fn predict_dynamic(&self, start: usize, steps: usize) -> Result<Vec<f64>> {
        if !self.fitted {
            return Err(ForecastError::NotFitted);
        }
        if start < self.lags || start > self.data.len() {
            return Err(ForecastError::InsufficientHistory {
                required: self.lags,
                actual: start.min(self.data.len()),
            });
        }

        let mut buffer = self.data[start - self.lags..start].to_vec();
        let mut out = Vec::with_capacity(steps);
        for _ in 0..steps {
            let mut value = self.intercept;
            for (j, coeff) in self.coeffs.iter().enumerate() {
                value += coeff * buffer[buffer.len() - 1 - j];
            }
            out.push(value);
            buffer.push(value);
        }
        Ok(out)
    }

    /// Dynamic predictions continuing past the last training observation.
    pub fn predict(&self, steps: usize) -> Result<Vec<f64>> {
        self.predict_dynamic(self.data.len(), steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_order() {
        assert!(matches!(
            AutoReg::new(0),
            Err(ForecastError::InvalidOrder(_))
        ));
    }

    #[test]
    fn test_fit_requires_more_observations_than_lags() {
        let mut model = AutoReg::new(5).unwrap();
        let result = model.fit(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!(matches!(
            result,
            Err(ForecastError::InsufficientHistory {
                required: 6,
                actual: 5
            })
        ));
        assert!(!model.is_fitted());
    }

    #[test]
    fn test_fit_rejects_non_finite() {
        let mut model = AutoReg::new(1).unwrap();
        let result = model.fit(&[1.0, f64::NAN, 3.0]);
        assert!(matches!(result, Err(ForecastError::FitFailure(_))));
    }

    #[test]
    fn test_predict_before_fit() {
        let model = AutoReg::new(3).unwrap();
        assert!(matches!(model.predict(1), Err(ForecastError::NotFitted)));
    }

    #[test]
    fn test_recovers_pure_ar1() {
        // y_t = 2 + 0.5 y_{t-1}, no noise: the fit should recover the
        // generating coefficients almost exactly.
        let mut data = vec![10.0];
        for t in 1..120 {
            data.push(2.0 + 0.5 * data[t - 1]);
        }
        let mut model = AutoReg::new(1).unwrap();
        model.fit(&data).unwrap();

        assert!((model.coefficients()[0] - 0.5).abs() < 1e-6);
        assert!((model.intercept() - 2.0).abs() < 1e-4);
        assert!(model.residual_variance() < 1e-10);
    }

    #[test]
    fn test_first_dynamic_step_uses_actual_lags() {
        let data: Vec<f64> = (0..30).map(|i| (i as f64).sin() + 10.0).collect();
        let mut model = AutoReg::new(3).unwrap();
        model.fit(&data).unwrap();

        // Dynamic start inside the sample: first value is the closed-form
        // one-step prediction from the actual observations before `start`.
        let start = 20;
        let predicted = model.predict_dynamic(start, 1).unwrap();
        let expected = model.intercept()
            + model.coefficients()[0] * data[start - 1]
            + model.coefficients()[1] * data[start - 2]
            + model.coefficients()[2] * data[start - 3];
        assert_eq!(predicted.len(), 1);
        assert!((predicted[0] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_dynamic_steps_feed_back_predictions() {
        let data: Vec<f64> = (0..30).map(|i| (i as f64).cos() + 5.0).collect();
        let mut model = AutoReg::new(2).unwrap();
        model.fit(&data).unwrap();

        let start = 25;
        let predicted = model.predict_dynamic(start, 3).unwrap();

        // Second step must use the first prediction, not the actual value
        // at `start`.
        let step2 = model.intercept()
            + model.coefficients()[0] * predicted[0]
            + model.coefficients()[1] * data[start - 1];
        assert!((predicted[1] - step2).abs() < 1e-12);

        // Third step is fully self-referencing.
        let step3 = model.intercept()
            + model.coefficients()[0] * predicted[1]
            + model.coefficients()[1] * predicted[0];
        assert!((predicted[2] - step3).abs() < 1e-12);
    }

    #[test]
    fn test_predict_dynamic_rejects_start_without_lags() {
        let data: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let mut model = AutoReg::new(5).unwrap();
        model.fit(&data).unwrap();

        assert!(model.predict_dynamic(4, 1).is_err());
        assert!(model.predict_dynamic(21, 1).is_err());
        assert!(model.predict_dynamic(5, 1).is_ok());
    }

    #[test]
    fn test_predict_zero_steps() {
        let data: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let mut model = AutoReg::new(2).unwrap();
        model.fit(&data).unwrap();
        assert!(model.predict(0).unwrap().is_empty());
    }

    #[test]
    fn test_constant_series_fits_flat() {
        // Degenerate design: every regressor column equals 100. The
        // minimum-norm solve still succeeds and reproduces the level.
        let data = vec![100.0; 60];
        let mut model = AutoReg::new(4).unwrap();
        model.fit(&data).unwrap();

        let ahead = model.predict(10).unwrap();
        for value in ahead {
            assert!(value.is_finite());
            assert!((value - 100.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_robust_std_errors_shape() {
        let data: Vec<f64> = (0..50).map(|i| 20.0 + (i as f64) * 0.3 + ((i * i) % 7) as f64).collect();
        let mut model = AutoReg::new(3).unwrap();
        model.fit(&data).unwrap();

        // Intercept plus one per coefficient, all finite and non-negative.
        assert_eq!(model.robust_std_errors().len(), 4);
        assert!(model
            .robust_std_errors()
            .iter()
            .all(|se| se.is_finite() && *se >= 0.0));
    }

    #[test]
    fn test_deterministic_refit() {
        let data: Vec<f64> = (0..80).map(|i| 50.0 + (i as f64 * 0.7).sin() * 3.0).collect();
        let mut first = AutoReg::new(6).unwrap();
        let mut second = AutoReg::new(6).unwrap();
        first.fit(&data).unwrap();
        second.fit(&data).unwrap();

        assert_eq!(first.intercept(), second.intercept());
        assert_eq!(first.coefficients(), second.coefficients());
        assert_eq!(first.predict(30).unwrap(), second.predict(30).unwrap());
    }
}
