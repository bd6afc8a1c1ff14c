//! Populates indicator columns on a frame from strategy specs.

use rulebook_core::traits::Indicator;
use rulebook_core::types::{IndicatorFrame, IndicatorKind, IndicatorSpec};

use crate::{Ema, Rsi, Sma};

/// Instantiate the calculator for one spec.
fn build(spec: &IndicatorSpec) -> Box<dyn Indicator> {
    let period = spec.params.period;
    match spec.kind {
        IndicatorKind::Ema => Box::new(Ema::new(period)),
        IndicatorKind::Sma => Box::new(Sma::new(period)),
        IndicatorKind::Rsi => Box::new(Rsi::new(period)),
    }
}

/// Compute every spec over the frame's closes and attach one column
/// per indicator id. Pure with respect to the bars; safe to call
/// redundantly. An empty frame is returned unchanged.
pub fn apply_indicators(frame: &mut IndicatorFrame, specs: &[IndicatorSpec]) {
    if frame.is_empty() {
        return;
    }
    let closes = frame.closes();
    for spec in specs {
        let column = build(spec).compute(&closes);
        frame.insert_column(spec.id.clone(), column);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulebook_core::types::{Bar, IndicatorParams};

    fn spec(id: &str, kind: IndicatorKind, period: usize) -> IndicatorSpec {
        IndicatorSpec {
            id: id.to_string(),
            kind,
            params: IndicatorParams { period },
        }
    }

    fn frame_from_closes(closes: &[f64]) -> IndicatorFrame {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::from_close(i as i64, c))
            .collect();
        IndicatorFrame::new(bars)
    }

    #[test]
    fn test_apply_adds_column_per_spec() {
        let mut frame = frame_from_closes(&[1.0, 2.0, 3.0, 4.0]);
        let specs = vec![
            spec("ema_fast", IndicatorKind::Ema, 2),
            spec("sma_slow", IndicatorKind::Sma, 3),
        ];

        apply_indicators(&mut frame, &specs);

        assert!(frame.has_field("ema_fast"));
        assert!(frame.has_field("sma_slow"));
        assert_eq!(frame.value(0, "ema_fast"), Some(1.0));
        assert_eq!(frame.value(1, "sma_slow"), None);
        assert_eq!(frame.value(2, "sma_slow"), Some(2.0));
    }

    #[test]
    fn test_empty_frame_unchanged() {
        let mut frame = frame_from_closes(&[]);
        apply_indicators(&mut frame, &[spec("rsi_main", IndicatorKind::Rsi, 14)]);
        assert!(!frame.has_field("rsi_main"));
    }
}
