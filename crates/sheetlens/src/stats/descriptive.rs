//! Descriptive statistics over numeric samples.

/// Round to a fixed number of decimal places.
///
/// Magnitudes too large to scale are already integral and come back as is.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

/// Arithmetic mean, `None` for an empty sample.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator), `None` below two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// Sort a sample ascending. NaN never reaches here; cells are finite.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(|a, b| a.total_cmp(b));
    out
}

/// Quantile of an ascending sample with linear interpolation at `(n - 1) * p`.
pub fn quantile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = (sorted.len() - 1) as f64 * p.clamp(0.0, 1.0);
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Five-number summary plus count, mean and standard deviation.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    /// Undefined for a single value.
    pub std: Option<f64>,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl Summary {
    /// Summarize a sample, `None` when it is empty.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let s = sorted(values);
        Some(Self {
            count: s.len(),
            mean: mean(&s)?,
            std: sample_std(&s),
            min: *s.first()?,
            q1: quantile(&s, 0.25)?,
            median: quantile(&s, 0.5)?,
            q3: quantile(&s, 0.75)?,
            max: *s.last()?,
        })
    }

    /// Coefficient of variation in percent; zero when the mean is zero.
    pub fn coefficient_of_variation(&self) -> Option<f64> {
        let std = self.std?;
        if self.mean == 0.0 {
            Some(0.0)
        } else {
            Some(std / self.mean * 100.0)
        }
    }
}

/// Tukey fences around the interquartile range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IqrBounds {
    pub q1: f64,
    pub q3: f64,
    pub lower: f64,
    pub upper: f64,
}

impl IqrBounds {
    /// Compute fences at `multiplier * IQR` beyond the quartiles.
    pub fn from_values(values: &[f64], multiplier: f64) -> Option<Self> {
        let s = sorted(values);
        let q1 = quantile(&s, 0.25)?;
        let q3 = quantile(&s, 0.75)?;
        let iqr = q3 - q1;
        Some(Self {
            q1,
            q3,
            lower: q1 - multiplier * iqr,
            upper: q3 + multiplier * iqr,
        })
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Strictly outside `[lower, upper]`.
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }
}

/// Pearson correlation over pairwise-complete observations.
///
/// Returns `None` with fewer than two complete pairs or zero variance.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();

    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mx = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let my = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let dx = a - mx;
        let dy = b - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return None;
    }

    Some((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantiles_interpolate() {
        let s = sorted(&[5.0, 1.0, 100.0, 3.0, 2.0, 4.0]);
        assert!((quantile(&s, 0.25).unwrap() - 2.25).abs() < 1e-12);
        assert!((quantile(&s, 0.75).unwrap() - 4.75).abs() < 1e-12);
        assert_eq!(quantile(&s, 0.5), Some(3.5));
    }

    #[test]
    fn test_iqr_bounds() {
        let bounds = IqrBounds::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0], 1.5).unwrap();
        assert!((bounds.iqr() - 2.5).abs() < 1e-12);
        assert!((bounds.lower + 1.5).abs() < 1e-12);
        assert!((bounds.upper - 8.5).abs() < 1e-12);
        assert!(bounds.is_outlier(100.0));
        assert!(!bounds.is_outlier(8.5));
    }

    #[test]
    fn test_summary() {
        let summary = Summary::from_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(summary.count, 8);
        assert_eq!(summary.mean, 5.0);
        assert!((summary.std.unwrap() - 2.138089935).abs() < 1e-6);
        assert_eq!(summary.min, 2.0);
        assert_eq!(summary.max, 9.0);
        assert!(Summary::from_values(&[]).is_none());
        assert!(Summary::from_values(&[1.0]).unwrap().std.is_none());
    }

    #[test]
    fn test_pearson() {
        let x = [Some(1.0), Some(2.0), Some(3.0), None];
        let y = [Some(2.0), Some(4.0), Some(6.0), Some(1.0)];
        assert!((pearson(&x, &y).unwrap() - 1.0).abs() < 1e-12);

        let flat = [Some(1.0), Some(1.0), Some(1.0), Some(1.0)];
        assert_eq!(pearson(&flat, &y), None);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(100.0 / 6.0, 2), 16.67);
        assert_eq!(round_to(0.12346, 4), 0.1235);
    }

    #[test]
    fn test_round_to_huge_values() {
        assert_eq!(round_to(1e307, 2), 1e307);
        assert_eq!(round_to(-f64::MAX, 3), -f64::MAX);
    }
}
