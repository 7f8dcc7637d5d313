//! Shapiro-Wilk normality test.
//!
//! Coefficients and p-value follow Royston's approximation (Applied
//! Statistics algorithm AS R94), valid for 3 <= n <= 5000.

use statrs::distribution::{ContinuousCDF, Normal};
use thiserror::Error;

use super::descriptive::sorted;

const MIN_SAMPLES: usize = 3;
const MAX_SAMPLES: usize = 5000;
const SMALL: f64 = 1e-19;

// Polynomial coefficients, lowest order first.
const C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.071190, 4.434685, -2.706056];
const C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
const C3: [f64; 4] = [0.5440, -0.39978, 0.025054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
const C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
const C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];
const G: [f64; 2] = [-2.273, 0.459];

/// Why a normality test could not be computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalityError {
    #[error("insufficient data: {0} values")]
    TooFewSamples(usize),

    #[error("too many values for the test: {0}, at most 5000")]
    TooManySamples(usize),

    #[error("all values are identical")]
    ZeroRange,

    #[error("distribution error: {0}")]
    Distribution(String),
}

/// Test statistic and p-value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapiroWilk {
    pub statistic: f64,
    pub p_value: f64,
}

impl ShapiroWilk {
    /// Run the test on an unordered sample.
    pub fn test(values: &[f64]) -> Result<Self, NormalityError> {
        let n = values.len();
        if n < MIN_SAMPLES {
            return Err(NormalityError::TooFewSamples(n));
        }
        if n > MAX_SAMPLES {
            return Err(NormalityError::TooManySamples(n));
        }

        let x = sorted(values);
        let range = x[n - 1] - x[0];
        if range < SMALL {
            return Err(NormalityError::ZeroRange);
        }

        let normal =
            Normal::new(0.0, 1.0).map_err(|e| NormalityError::Distribution(e.to_string()))?;

        let half = coefficients(n, &normal);

        // Antisymmetric weights: -a for the lower half, +a for the upper half.
        let mut numerator = 0.0;
        for (i, a) in half.iter().enumerate() {
            numerator += a * (x[n - 1 - i] - x[i]) / range;
        }

        let mean = x.iter().map(|v| v / range).sum::<f64>() / n as f64;
        let ssq: f64 = x.iter().map(|v| (v / range - mean).powi(2)).sum();

        let w = (numerator * numerator / ssq).min(1.0);
        let p_value = p_value(w, n, &normal);

        Ok(Self {
            statistic: w,
            p_value,
        })
    }

    /// Normal at significance level `alpha` (p strictly above alpha).
    pub fn is_normal(&self, alpha: f64) -> bool {
        self.p_value > alpha
    }
}

/// Evaluate `cc[0] + cc[1] x + cc[2] x^2 + ...`.
fn poly(cc: &[f64], x: f64) -> f64 {
    cc.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

/// Weights for the lower half of the order statistics, largest first.
fn coefficients(n: usize, normal: &Normal) -> Vec<f64> {
    let half = n / 2;

    if n == 3 {
        return vec![std::f64::consts::FRAC_1_SQRT_2];
    }

    let an = n as f64;
    let an25 = an + 0.25;
    let m: Vec<f64> = (1..=half)
        .map(|i| normal.inverse_cdf((i as f64 - 0.375) / an25))
        .collect();

    let summ2 = 2.0 * m.iter().map(|v| v * v).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / an.sqrt();
    let a1 = poly(&C1, rsn) - m[0] / ssumm2;

    let mut a: Vec<f64> = m.iter().map(|v| -v).collect();

    let (first_scaled, fac) = if n > 5 {
        let a2 = -m[1] / ssumm2 + poly(&C2, rsn);
        let fac = ((summ2 - 2.0 * m[0] * m[0] - 2.0 * m[1] * m[1])
            / (1.0 - 2.0 * a1 * a1 - 2.0 * a2 * a2))
            .sqrt();
        a[1] = a2;
        (2, fac)
    } else {
        let fac = ((summ2 - 2.0 * m[0] * m[0]) / (1.0 - 2.0 * a1 * a1)).sqrt();
        (1, fac)
    };

    a[0] = a1;
    for value in a.iter_mut().skip(first_scaled) {
        *value /= fac;
    }
    a
}

/// Upper-tail p-value for the statistic `w`.
fn p_value(w: f64, n: usize, normal: &Normal) -> f64 {
    if n == 3 {
        // Exact distribution for three observations.
        const PI6: f64 = 6.0 / std::f64::consts::PI;
        const STQR: f64 = std::f64::consts::FRAC_PI_3;
        return (PI6 * (w.sqrt().asin() - STQR)).clamp(0.0, 1.0);
    }

    let w1 = 1.0 - w;
    if w1 <= 0.0 {
        return 1.0;
    }

    let an = n as f64;
    let mut y = w1.ln();

    let (m, s) = if n <= 11 {
        let gamma = poly(&G, an);
        if y >= gamma {
            return 1e-99;
        }
        y = -(gamma - y).ln();
        (poly(&C3, an), poly(&C4, an).exp())
    } else {
        let xx = an.ln();
        (poly(&C5, xx), poly(&C6, xx).exp())
    };

    normal.sf((y - m) / s).clamp(0.0, 1.0)
}
