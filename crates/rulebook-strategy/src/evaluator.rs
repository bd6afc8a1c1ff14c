//! Recursive condition tree evaluation.

use rulebook_core::types::{ConditionNode, IndicatorFrame, Operand, Operator, StrategyDefinition};
use tracing::warn;

/// Entry/exit outcome of evaluating a strategy against a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Signals {
    pub entry: bool,
    pub exit: bool,
}

/// Evaluate a strategy's entry and exit trees against the bar at
/// `idx` (normally the last bar of the frame).
pub fn signals_at(def: &StrategyDefinition, frame: &IndicatorFrame, idx: usize) -> Signals {
    Signals {
        entry: evaluate(&def.entry_conditions, frame, idx),
        exit: evaluate(&def.exit_conditions, frame, idx),
    }
}

/// Evaluate a strategy against the latest bar.
pub fn signals(def: &StrategyDefinition, frame: &IndicatorFrame) -> Signals {
    if frame.is_empty() {
        return Signals::default();
    }
    signals_at(def, frame, frame.len() - 1)
}

/// Evaluate one condition node at a bar index. An empty frame (or an
/// out-of-range index) asserts nothing and evaluates false.
pub fn evaluate(node: &ConditionNode, frame: &IndicatorFrame, idx: usize) -> bool {
    if idx >= frame.len() {
        return false;
    }
    match node {
        ConditionNode::And { and } => and.iter().all(|child| evaluate(child, frame, idx)),
        ConditionNode::Or { or } => or.iter().any(|child| evaluate(child, frame, idx)),
        ConditionNode::Leaf {
            operator,
            left,
            right,
        } => evaluate_leaf(*operator, left, right, frame, idx),
    }
}

fn evaluate_leaf(
    operator: Operator,
    left: &Operand,
    right: &Operand,
    frame: &IndicatorFrame,
    idx: usize,
) -> bool {
    let (Some(curr_left), Some(curr_right)) = (resolve(left, frame, idx), resolve(right, frame, idx))
    else {
        // Warm-up slot or unresolvable token: nothing can be asserted.
        return false;
    };

    match operator {
        Operator::GreaterThan => curr_left > curr_right,
        Operator::LessThan => curr_left < curr_right,
        Operator::Equal => curr_left == curr_right,
        Operator::CrossOver | Operator::CrossUnder => {
            // With fewer than two bars prev == curr, so a strict
            // crossing is vacuously false.
            let prev_idx = if idx == 0 { idx } else { idx - 1 };
            let (Some(prev_left), Some(prev_right)) =
                (resolve(left, frame, prev_idx), resolve(right, frame, prev_idx))
            else {
                return false;
            };
            match operator {
                Operator::CrossOver => prev_left <= prev_right && curr_left > curr_right,
                Operator::CrossUnder => prev_left >= prev_right && curr_left < curr_right,
                _ => unreachable!(),
            }
        }
    }
}

/// Resolve an operand at a bar index. Tokens that name a field use
/// the field's value; anything else is treated as a numeric literal.
fn resolve(operand: &Operand, frame: &IndicatorFrame, idx: usize) -> Option<f64> {
    match operand {
        Operand::Number(n) => Some(*n),
        Operand::Token(token) => {
            if frame.has_field(token) {
                frame.value(idx, token)
            } else if let Ok(n) = token.parse::<f64>() {
                Some(n)
            } else {
                warn!(token = %token, "condition token is neither a known field nor a number");
                None
            }
        }
    }
}
