//! Indicator-augmented view over a bar sequence.

use std::collections::HashMap;

use super::Bar;

/// A bar sequence plus named indicator columns.
///
/// Each column holds one slot per bar; `None` marks warm-up bars
/// where the indicator is not yet defined. Condition tokens resolve
/// against the built-in OHLCV fields first, then indicator columns.
#[derive(Debug, Clone, Default)]
pub struct IndicatorFrame {
    bars: Vec<Bar>,
    columns: HashMap<String, Vec<Option<f64>>>,
}

impl IndicatorFrame {
    /// Build a frame over the given bars with no indicator columns.
    pub fn new(bars: Vec<Bar>) -> Self {
        Self {
            bars,
            columns: HashMap::new(),
        }
    }

    /// Number of bars in the frame.
    #[inline]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Check if the frame has no bars.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// The underlying bars.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Get a bar by index.
    pub fn bar(&self, idx: usize) -> Option<&Bar> {
        self.bars.get(idx)
    }

    /// Close prices of all bars.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Add (or replace) an indicator column. The column must be
    /// index-aligned with the bars.
    pub fn insert_column(&mut self, id: impl Into<String>, values: Vec<Option<f64>>) {
        debug_assert_eq!(values.len(), self.bars.len());
        self.columns.insert(id.into(), values);
    }

    /// Whether a token names a field on this frame's bars.
    pub fn has_field(&self, token: &str) -> bool {
        matches!(token, "open" | "high" | "low" | "close" | "volume")
            || self.columns.contains_key(token)
    }

    /// Resolve a field token at a bar index. Returns `None` for
    /// unknown tokens, out-of-range indices, and warm-up slots.
    pub fn value(&self, idx: usize, token: &str) -> Option<f64> {
        let bar = self.bars.get(idx)?;
        match token {
            "open" => Some(bar.open),
            "high" => Some(bar.high),
            "low" => Some(bar.low),
            "close" => Some(bar.close),
            "volume" => Some(bar.volume),
            _ => self.columns.get(token)?.get(idx).copied().flatten(),
        }
    }
}
