//! Momentum indicators.

use rulebook_core::traits::Indicator;

/// Relative Strength Index (RSI).
///
/// Uses plain rolling means of positive and negative close-to-close
/// deltas over the period (not Wilder smoothing), so the value at bar
/// *i* depends on the `period` deltas ending at *i*. Undefined until
/// `period + 1` bars exist.
///
/// When the rolling loss is zero the value is defined as 100.0, the
/// strongest bullish reading. This covers the all-gain window and the
/// flat window rather than producing an undefined hole in the column.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator. The common period is 14.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Indicator for Rsi {
    fn compute(&self, closes: &[f64]) -> Vec<Option<f64>> {
        let n = closes.len();
        let mut result = vec![None; n];
        if n <= self.period {
            return result;
        }

        // Split close-to-close deltas into gain/loss components.
        let mut gains = Vec::with_capacity(n - 1);
        let mut losses = Vec::with_capacity(n - 1);
        for i in 1..n {
            let change = closes[i] - closes[i - 1];
            if change > 0.0 {
                gains.push(change);
                losses.push(0.0);
            } else {
                gains.push(0.0);
                losses.push(-change);
            }
        }

        let period_f64 = self.period as f64;
        let mut gain_sum: f64 = gains[..self.period].iter().sum();
        let mut loss_sum: f64 = losses[..self.period].iter().sum();

        // Bar i uses the `period` deltas ending at i; the first
        // defined slot is bar `period`.
        for i in self.period..n {
            if i > self.period {
                let drop = i - self.period - 1;
                gain_sum = gain_sum - gains[drop] + gains[i - 1];
                loss_sum = loss_sum - losses[drop] + losses[i - 1];
            }

            let avg_gain = gain_sum / period_f64;
            let avg_loss = loss_sum / period_f64;

            let rsi = if avg_loss == 0.0 {
                100.0
            } else {
                100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
            };
            result[i] = Some(rsi);
        }

        result
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_alignment_and_range() {
        let rsi = Rsi::new(5);
        let data: Vec<f64> = (0..20)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0)
            .collect();
        let result = rsi.compute(&data);

        assert_eq!(result.len(), data.len());
        for slot in &result[..5] {
            assert!(slot.is_none());
        }
        for slot in &result[5..] {
            let value = slot.unwrap();
            assert!((0.0..=100.0).contains(&value));
        }
    }

    #[test]
    fn test_rsi_zero_loss_policy() {
        let rsi = Rsi::new(5);
        // Strictly rising: rolling loss is zero everywhere.
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let result = rsi.compute(&data);

        assert_eq!(result[5], Some(100.0));
        assert_eq!(result[6], Some(100.0));
    }

    #[test]
    fn test_rsi_flat_window_reads_100() {
        let rsi = Rsi::new(3);
        let data = vec![5.0; 8];
        let result = rsi.compute(&data);

        // Gain and loss both zero: defined as 100 by policy.
        assert_eq!(result[3], Some(100.0));
    }

    #[test]
    fn test_rsi_all_losses() {
        let rsi = Rsi::new(5);
        let data = vec![7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0];
        let result = rsi.compute(&data);

        assert_eq!(result[5], Some(0.0));
    }

    #[test]
    fn test_rsi_insufficient_data() {
        let rsi = Rsi::new(14);
        let result = rsi.compute(&[1.0, 2.0, 3.0]);
        assert!(result.iter().all(Option::is_none));
    }
}
