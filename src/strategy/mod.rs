//! Decision engine — edge detection and stake sizing for both sides.

pub mod edge;
pub mod kelly;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{AccountConfig, Decision, FairOdds, FairPrice, MarketQuote, OddsApexError, Recommendation, Side};
use edge::EdgeDetector;
use kelly::KellyCalculator;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Commission and the two independent value gates.
///
/// Setting both thresholds to the commission rate reproduces the older
/// single-threshold behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Exchange commission on net winnings.
    pub commission: f64,
    /// Minimum relative edge between market and fair odds.
    pub edge_threshold: f64,
    /// Minimum expected value per unit staked.
    pub ev_threshold: f64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            commission: 0.05,
            edge_threshold: 0.05,
            ev_threshold: 0.02,
        }
    }
}

impl StrategyConfig {
    pub fn validate(&self) -> Result<(), OddsApexError> {
        if !(0.0..1.0).contains(&self.commission) {
            return Err(OddsApexError::Config(format!(
                "strategy.commission must be in [0, 1), got {}",
                self.commission
            )));
        }
        if !(self.edge_threshold >= 0.0) || !(self.ev_threshold >= 0.0) {
            return Err(OddsApexError::Config(format!(
                "strategy thresholds must be non-negative, got edge {} / ev {}",
                self.edge_threshold, self.ev_threshold
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Pipelines edge detection → Kelly sizing for the Back and Lay sides.
///
/// Pure: the same fair price, quote and account always give the same
/// decision.
pub struct DecisionEngine {
    config: StrategyConfig,
    edge_detector: EdgeDetector,
    kelly: KellyCalculator,
}

impl DecisionEngine {
    pub fn new(config: StrategyConfig) -> Self {
        Self {
            edge_detector: EdgeDetector::new(config.commission, config.edge_threshold, config.ev_threshold),
            kelly: KellyCalculator::new(config.commission),
            config,
        }
    }

    /// Access the strategy configuration.
    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    /// Evaluate both sides independently.
    pub fn decide(&self, fair: &FairPrice, quote: &MarketQuote, account: &AccountConfig) -> Decision {
        let fair_odds = match fair.over_odds {
            FairOdds::Price(odds) => odds,
            FairOdds::NoPrice => {
                debug!("No fair price available, skipping both sides");
                return Decision {
                    back: Recommendation::NoPrice,
                    lay: Recommendation::NoPrice,
                };
            }
        };

        Decision {
            back: self.evaluate_side(Side::Back, fair.over_probability, fair_odds, quote, account),
            lay: self.evaluate_side(Side::Lay, fair.over_probability, fair_odds, quote, account),
        }
    }

    fn evaluate_side(
        &self,
        side: Side,
        fair_prob: f64,
        fair_odds: f64,
        quote: &MarketQuote,
        account: &AccountConfig,
    ) -> Recommendation {
        match self.edge_detector.detect(side, fair_prob, fair_odds, quote.over_odds) {
            Some(edge) => self.kelly.size(&edge, account),
            None => Recommendation::NoValue,
        }
    }
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::new(StrategyConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
