//! Calculation boundary — one request in, one structured result out.
//!
//! Parses the raw inputs, runs rates → score grid → fair price →
//! decision, and hands back `Insights` or a typed failure. Nothing
//! survives between calls.

pub mod input;
pub mod report;

use tracing::{info, warn};

use crate::model::{ModelConfig, OverUnderModel};
use crate::strategy::{DecisionEngine, StrategyConfig};
use crate::types::{Insights, MatchInputs, OddsApexError};
use input::CalculationRequest;

pub struct Calculator {
    model: OverUnderModel,
    strategy: DecisionEngine,
}

impl Calculator {
    pub fn new(model: ModelConfig, strategy: StrategyConfig) -> Self {
        Self {
            model: OverUnderModel::new(model),
            strategy: DecisionEngine::new(strategy),
        }
    }

    pub fn model_config(&self) -> &ModelConfig {
        self.model.config()
    }

    pub fn strategy_config(&self) -> &StrategyConfig {
        self.strategy.config()
    }

    /// Parse and evaluate a raw form submission.
    pub fn calculate(&self, request: &CalculationRequest) -> Result<Insights, OddsApexError> {
        let inputs = request.parse().inspect_err(|e| {
            warn!(error = %e, "Rejected calculation input");
        })?;
        self.evaluate(&inputs)
    }

    /// Evaluate already-parsed inputs.
    pub fn evaluate(&self, inputs: &MatchInputs) -> Result<Insights, OddsApexError> {
        let output = self.model.price(&inputs.stats, &inputs.xg).inspect_err(|e| {
            warn!(error = %e, "Model could not price the fixture");
        })?;

        let decision = self
            .strategy
            .decide(&output.fair, &inputs.quote, &inputs.account);

        info!(
            market = %self.model.config().market_label(),
            p_over = format!("{:.1}%", output.fair.over_probability * 100.0),
            fair_odds = %output.fair.over_odds,
            market_odds = inputs.quote.over_odds,
            back = decision.back.has_value(),
            lay = decision.lay.has_value(),
            "Calculation complete"
        );

        Ok(Insights {
            goal_line: self.model.config().goal_line,
            rates: output.rates,
            fair: output.fair,
            market_odds: inputs.quote.over_odds,
            decision,
        })
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(ModelConfig::default(), StrategyConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FairOdds, Recommendation};

    fn request(fields: &[(&str, &str)]) -> CalculationRequest {
        let mut map = serde_json::Map::new();
        for (k, v) in fields {
            map.insert((*k).to_string(), serde_json::Value::String((*v).to_string()));
        }
        serde_json::from_value(serde_json::Value::Object(map)).unwrap()
    }

    #[test]
    fn test_calculate_scenario_back() {
        let calc = Calculator::default();
        let req = request(&[
            ("home_avg_scored", "1.5"),
            ("home_avg_conceded", "1.5"),
            ("away_avg_scored", "1.5"),
            ("away_avg_conceded", "1.5"),
            ("home_xg", "1.6"),
            ("away_xg", "1.1"),
            ("home_xg_against", "1.0"),
            ("away_xg_against", "1.0"),
            ("account_balance", "1000"),
            ("kelly_fraction", "5"),
            ("live_over", "2.10"),
        ]);
        let insights = calc.calculate(&req).unwrap();
        assert_eq!(insights.goal_line, 2);
        assert_eq!(insights.market_odds, 2.10);
        assert!(matches!(insights.decision.back, Recommendation::Back { .. }));
        assert_eq!(insights.decision.lay, Recommendation::NoValue);
    }

    #[test]
    fn test_calculate_invalid_input() {
        let calc = Calculator::default();
        let req = request(&[("home_xg", "lots")]);
        assert!(matches!(
            calc.calculate(&req),
            Err(OddsApexError::InvalidInput { field: "home_xg", .. })
        ));
    }

    #[test]
    fn test_calculate_blank_form() {
        let calc = Calculator::default();
        let insights = calc.calculate(&CalculationRequest::default()).unwrap();
        assert_eq!(insights.fair.over_odds, FairOdds::NoPrice);
        assert_eq!(insights.decision.back, Recommendation::NoPrice);
    }

    #[test]
    fn test_calculate_degenerate_rates() {
        let calc = Calculator::default();
        // xG-against of -20 flips the home rate negative.
        let req = request(&[("home_xg", "1.5"), ("away_xg", "1.2"), ("away_xg_against", "-20")]);
        assert!(matches!(
            calc.calculate(&req),
            Err(OddsApexError::DegenerateDistribution { .. })
        ));
    }

    #[test]
    fn test_custom_goal_line_flows_through() {
        let calc = Calculator::new(
            ModelConfig {
                goal_line: 1,
                ..ModelConfig::default()
            },
            StrategyConfig::default(),
        );
        let req = request(&[("home_xg", "1.5"), ("away_xg", "1.2"), ("live_over", "1.5")]);
        let insights = calc.calculate(&req).unwrap();
        assert_eq!(insights.goal_line, 1);
        assert!(insights.fair.over_probability > 0.55);
    }
}
