//! Indicator trait definition.

/// Trait for technical indicators over a close-price sequence.
///
/// The output is index-aligned with the input: one slot per bar,
/// `None` while the indicator is still warming up. Value *i* depends
/// only on inputs up to and including *i*, which is what keeps the
/// backtest free of lookahead.
pub trait Indicator: Send + Sync {
    /// Calculate indicator values for the given closes.
    fn compute(&self, closes: &[f64]) -> Vec<Option<f64>>;

    /// Get the name of the indicator.
    fn name(&self) -> &str;
}
