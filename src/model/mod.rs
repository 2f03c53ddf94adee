//! Probability model — scoring rates, score grid, fair price.

pub mod distribution;
pub mod rates;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{ExpectedGoals, FairPrice, OddsApexError, ScoringRates, TeamStats};
use distribution::JointDistribution;

/// Over 2.5: over means three goals or more.
pub const DEFAULT_GOAL_LINE: u32 = 2;

/// Goals per side covered by the score grid.
pub const DEFAULT_MAX_GOALS: usize = 10;

/// Human label of the market for a goal line, e.g. "Over 2.5".
pub fn market_label(goal_line: u32) -> String {
    format!("Over {goal_line}.5")
}

// ---------------------------------------------------------------------------
// Configuration (defaults — overridden by config.toml at runtime)
// ---------------------------------------------------------------------------

/// Model tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Weight of xG in the rate blend; the averages proxy gets the rest.
    pub xg_weight: f64,
    /// Floor on the conceded average used as the proxy denominator.
    pub conceded_floor: f64,
    /// Rate change per unit of opposing xG-against above 1.0.
    pub defence_coefficient: f64,
    /// Common-shock rate as a fraction of `sqrt(lh * la)`.
    pub covariance_coefficient: f64,
    pub max_goals: usize,
    pub goal_line: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            xg_weight: 0.85,
            conceded_floor: 0.75,
            defence_coefficient: 0.1,
            covariance_coefficient: 0.05,
            max_goals: DEFAULT_MAX_GOALS,
            goal_line: DEFAULT_GOAL_LINE,
        }
    }
}

impl ModelConfig {
    pub fn validate(&self) -> Result<(), OddsApexError> {
        if !(0.0..=1.0).contains(&self.xg_weight) {
            return Err(OddsApexError::Config(format!(
                "model.xg_weight must be between 0 and 1, got {}",
                self.xg_weight
            )));
        }
        if !(self.conceded_floor > 0.0) {
            return Err(OddsApexError::Config(format!(
                "model.conceded_floor must be positive, got {}",
                self.conceded_floor
            )));
        }
        if self.max_goals == 0 || self.max_goals > 50 {
            return Err(OddsApexError::Config(format!(
                "model.max_goals must be between 1 and 50, got {}",
                self.max_goals
            )));
        }
        if self.goal_line as usize >= 2 * self.max_goals {
            return Err(OddsApexError::Config(format!(
                "model.goal_line {} leaves no Over scorelines on a grid of {} goals per side",
                self.goal_line, self.max_goals
            )));
        }
        if !self.covariance_coefficient.is_finite() || !self.defence_coefficient.is_finite() {
            return Err(OddsApexError::Config(
                "model coefficients must be finite".to_string(),
            ));
        }
        if self.covariance_coefficient < 0.0 {
            return Err(OddsApexError::Config(format!(
                "model.covariance_coefficient must not be negative, got {}",
                self.covariance_coefficient
            )));
        }
        Ok(())
    }

    pub fn market_label(&self) -> String {
        market_label(self.goal_line)
    }
}

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// Output of one model pass.
#[derive(Debug, Clone)]
pub struct ModelOutput {
    pub rates: ScoringRates,
    pub fair: FairPrice,
}

/// Runs rate estimation → score grid → fair price.
#[derive(Debug, Clone, Default)]
pub struct OverUnderModel {
    config: ModelConfig,
}

impl OverUnderModel {
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }

    /// Access the model configuration.
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Full pass from raw statistics.
    pub fn price(&self, stats: &TeamStats, xg: &ExpectedGoals) -> Result<ModelOutput, OddsApexError> {
        let rates = rates::estimate_rates(stats, xg, &self.config);
        self.price_rates(&rates)
    }

    /// Fair price for already-estimated rates.
    pub fn price_rates(&self, rates: &ScoringRates) -> Result<ModelOutput, OddsApexError> {
        let distribution = JointDistribution::from_rates(
            rates,
            self.config.covariance_coefficient,
            self.config.max_goals,
        )
        .normalize()?;

        let fair = FairPrice::from_over_probability(distribution.over_probability(self.config.goal_line));

        debug!(
            lambda_home = rates.home,
            lambda_away = rates.away,
            p_over = format!("{:.2}%", fair.over_probability * 100.0),
            fair_odds = %fair.over_odds,
            "Fair price computed"
        );

        Ok(ModelOutput {
            rates: *rates,
            fair,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
