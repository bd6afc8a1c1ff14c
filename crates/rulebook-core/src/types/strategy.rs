//! Declarative strategy definition model.
//!
//! Definitions are loaded from JSON and immutable once loaded; a
//! reload replaces the whole active set. The wire shape matches the
//! strategy files: condition groups are `{"and": [...]}` or
//! `{"or": [...]}`, leaves are `{"operator": ..., "left": ...,
//! "right": ...}`, and operands are field tokens or plain numbers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::Timeframe;
use crate::error::StrategyError;

/// Supported indicator types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorKind {
    Ema,
    Sma,
    Rsi,
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IndicatorKind::Ema => "ema",
            IndicatorKind::Sma => "sma",
            IndicatorKind::Rsi => "rsi",
        };
        f.write_str(s)
    }
}

fn default_period() -> usize {
    14
}

/// Indicator parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorParams {
    #[serde(default = "default_period")]
    pub period: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            period: default_period(),
        }
    }
}

/// One indicator attached to a strategy. The `id` becomes the field
/// name condition tokens resolve against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSpec {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: IndicatorKind,
    #[serde(default)]
    pub params: IndicatorParams,
}

/// Partial indicator parameters used for backtest overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorParamsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<usize>,
}

/// Backtest parameter overrides, keyed by indicator id.
pub type OverrideMap = HashMap<String, IndicatorParamsPatch>;

/// Comparison operator in a condition leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = "cross_over")]
    CrossOver,
    #[serde(rename = "cross_under")]
    CrossUnder,
}

/// A condition operand: an indicator id / bar field token, or a
/// literal number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    Number(f64),
    Token(String),
}

/// Recursive boolean condition tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionNode {
    And {
        and: Vec<ConditionNode>,
    },
    Or {
        or: Vec<ConditionNode>,
    },
    Leaf {
        operator: Operator,
        left: Operand,
        right: Operand,
    },
}

fn default_stop_loss_perc() -> f64 {
    1.0
}

fn default_target_perc() -> f64 {
    2.0
}

/// Stop-loss / target percentages relative to entry price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskParams {
    #[serde(default = "default_stop_loss_perc")]
    pub stop_loss_perc: f64,
    #[serde(default = "default_target_perc")]
    pub target_perc: f64,
}

impl Default for RiskParams {
    fn default() -> Self {
        Self {
            stop_loss_perc: default_stop_loss_perc(),
            target_perc: default_target_perc(),
        }
    }
}

/// A complete declarative strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyDefinition {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub timeframe: Timeframe,
    pub indicators: Vec<IndicatorSpec>,
    pub entry_conditions: ConditionNode,
    pub exit_conditions: ConditionNode,
    #[serde(default)]
    pub risk_management: RiskParams,
}

impl StrategyDefinition {
    /// Structural validation beyond what serde enforces.
    pub fn validate(&self) -> Result<(), StrategyError> {
        if self.symbol.trim().is_empty() {
            return Err(StrategyError::InvalidDefinition(
                "symbol must not be empty".to_string(),
            ));
        }
        let mut seen = std::collections::HashSet::new();
        for spec in &self.indicators {
            if spec.params.period == 0 {
                return Err(StrategyError::InvalidDefinition(format!(
                    "indicator '{}' has period 0",
                    spec.id
                )));
            }
            if !seen.insert(spec.id.as_str()) {
                return Err(StrategyError::InvalidDefinition(format!(
                    "duplicate indicator id '{}'",
                    spec.id
                )));
            }
        }
        Ok(())
    }

    /// Clone this definition with parameter overrides merged into the
    /// indicator specs. The receiver is never mutated.
    pub fn with_overrides(&self, overrides: &OverrideMap) -> StrategyDefinition {
        if overrides.is_empty() {
            return self.clone();
        }
        let mut def = self.clone();
        for spec in &mut def.indicators {
            if let Some(patch) = overrides.get(&spec.id) {
                if let Some(period) = patch.period {
                    spec.params.period = period;
                }
            }
        }
        def
    }
}
