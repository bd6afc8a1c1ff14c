//! Moving average indicators.

use rulebook_core::traits::Indicator;

/// Simple Moving Average (SMA).
///
/// Arithmetic mean of the last N closes; undefined while fewer than
/// N bars exist.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Indicator for Sma {
    fn compute(&self, closes: &[f64]) -> Vec<Option<f64>> {
        let mut result = vec![None; closes.len()];
        if closes.len() < self.period {
            return result;
        }

        let period_f64 = self.period as f64;

        // Initial window, then slide.
        let mut sum: f64 = closes[..self.period].iter().sum();
        result[self.period - 1] = Some(sum / period_f64);

        for i in self.period..closes.len() {
            sum = sum - closes[i - self.period] + closes[i];
            result[i] = Some(sum / period_f64);
        }

        result
    }

    fn name(&self) -> &str {
        "SMA"
    }
}

/// Exponential Moving Average (EMA).
///
/// Smoothing factor `2 / (period + 1)`, seeded with the first close
/// so the series is defined from bar 0. This matches recursive
/// (`adjust=False`) EMA semantics, not the SMA-seeded variant.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
}

impl Ema {
    /// Create a new EMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Indicator for Ema {
    fn compute(&self, closes: &[f64]) -> Vec<Option<f64>> {
        let mut result = Vec::with_capacity(closes.len());
        let mut ema = match closes.first() {
            Some(&first) => first,
            None => return result,
        };
        result.push(Some(ema));

        let multiplier = 2.0 / (self.period as f64 + 1.0);
        let one_minus_mult = 1.0 - multiplier;
        for &price in &closes[1..] {
            ema = price * multiplier + ema * one_minus_mult;
            result.push(Some(ema));
        }

        result
    }

    fn name(&self) -> &str {
        "EMA"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma_is_trailing_mean() {
        let sma = Sma::new(3);
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = sma.compute(&data);

        assert_eq!(result.len(), 5);
        assert_eq!(result[0], None);
        assert_eq!(result[1], None);
        assert!((result[2].unwrap() - 2.0).abs() < 1e-12); // (1+2+3)/3
        assert!((result[3].unwrap() - 3.0).abs() < 1e-12); // (2+3+4)/3
        assert!((result[4].unwrap() - 4.0).abs() < 1e-12); // (3+4+5)/3
    }

    #[test]
    fn test_sma_insufficient_data() {
        let sma = Sma::new(5);
        let result = sma.compute(&[1.0, 2.0, 3.0]);
        assert_eq!(result, vec![None, None, None]);
    }

    #[test]
    fn test_ema_matches_recurrence() {
        let period = 4;
        let ema = Ema::new(period);
        let data = vec![100.0, 102.0, 101.0, 104.0, 103.0, 106.0];
        let result = ema.compute(&data);

        // Closed-form recurrence: seeded with the first close.
        let alpha = 2.0 / (period as f64 + 1.0);
        let mut expected = data[0];
        assert_eq!(result[0], Some(expected));
        for (i, &price) in data.iter().enumerate().skip(1) {
            expected = alpha * price + (1.0 - alpha) * expected;
            assert!((result[i].unwrap() - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_ema_empty_series() {
        let ema = Ema::new(9);
        assert!(ema.compute(&[]).is_empty());
    }
}
