//! Shared types for the ODDS APEX model.
//!
//! These types form the data model passed between the rate estimator,
//! the distribution engine and the decision engine. Every value here is
//! created fresh for one calculation and dropped once the result is out.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Season scoring averages for both teams.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TeamStats {
    pub home_avg_scored: f64,
    pub home_avg_conceded: f64,
    pub away_avg_scored: f64,
    pub away_avg_conceded: f64,
}

/// Expected-goals figures for both teams.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ExpectedGoals {
    pub home_xg: f64,
    pub away_xg: f64,
    /// xG conceded per match by the home side.
    pub home_xg_against: f64,
    /// xG conceded per match by the away side.
    pub away_xg_against: f64,
}

/// Smallest Kelly fraction allowed, so a stake is never multiplied by zero.
pub const MIN_KELLY_FRACTION: f64 = 0.001;

/// Bankroll and sizing aggressiveness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Effective balance, never negative.
    pub balance: f64,
    /// Fraction of the bankroll scaled by edge (0.05 = 5%).
    pub kelly_fraction: f64,
}

impl AccountConfig {
    /// Build from a raw balance and a Kelly percentage (0–100).
    pub fn new(balance: f64, kelly_pct: f64) -> Self {
        Self {
            balance: balance.max(0.0),
            kelly_fraction: (kelly_pct / 100.0).max(MIN_KELLY_FRACTION),
        }
    }
}

/// Live decimal price for the Over side of the goal line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketQuote {
    pub over_odds: f64,
}

/// Everything one calculation needs, already parsed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchInputs {
    pub stats: TeamStats,
    pub xg: ExpectedGoals,
    pub account: AccountConfig,
    pub quote: MarketQuote,
}

// ---------------------------------------------------------------------------
// Model outputs
// ---------------------------------------------------------------------------

/// Expected goals for each side in this match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringRates {
    pub home: f64,
    pub away: f64,
}

impl ScoringRates {
    pub fn new(home: f64, away: f64) -> Self {
        Self { home, away }
    }

    /// Same rates with home and away exchanged.
    pub fn swapped(&self) -> Self {
        Self {
            home: self.away,
            away: self.home,
        }
    }
}

/// Fair decimal price, or no finite price when the probability is zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "odds", rename_all = "snake_case")]
pub enum FairOdds {
    Price(f64),
    NoPrice,
}

impl FairOdds {
    pub fn from_probability(probability: f64) -> Self {
        if probability > 0.0 {
            FairOdds::Price(1.0 / probability)
        } else {
            FairOdds::NoPrice
        }
    }

    pub fn price(&self) -> Option<f64> {
        match self {
            FairOdds::Price(odds) => Some(*odds),
            FairOdds::NoPrice => None,
        }
    }
}

impl fmt::Display for FairOdds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FairOdds::Price(odds) => write!(f, "{odds:.2}"),
            FairOdds::NoPrice => write!(f, "no price"),
        }
    }
}

/// Model price for the Over/Under line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FairPrice {
    pub over_probability: f64,
    pub under_probability: f64,
    pub over_odds: FairOdds,
}

impl FairPrice {
    pub fn from_over_probability(over_probability: f64) -> Self {
        let p = over_probability.clamp(0.0, 1.0);
        Self {
            over_probability: p,
            under_probability: 1.0 - p,
            over_odds: FairOdds::from_probability(p),
        }
    }
}

// ---------------------------------------------------------------------------
// Decisions
// ---------------------------------------------------------------------------

/// Market side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Back,
    Lay,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Back => write!(f, "BACK"),
            Side::Lay => write!(f, "LAY"),
        }
    }
}

/// Recommendation for one side of the market.
///
/// `edge` and `ev` are fractions (0.05 = 5%); the report scales them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recommendation {
    NoValue,
    /// Fair odds are infinite; nothing to compare the market against.
    NoPrice,
    Back {
        edge: f64,
        ev: f64,
        stake: f64,
        profit: f64,
    },
    Lay {
        edge: f64,
        ev: f64,
        liability: f64,
        stake: f64,
    },
}

impl Recommendation {
    pub fn has_value(&self) -> bool {
        matches!(self, Recommendation::Back { .. } | Recommendation::Lay { .. })
    }
}

/// Back and Lay verdicts, evaluated independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub back: Recommendation,
    pub lay: Recommendation,
}

/// Full structured result of one calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    /// Over means total goals strictly above this many (2 = Over 2.5).
    pub goal_line: u32,
    pub rates: ScoringRates,
    pub fair: FairPrice,
    pub market_odds: f64,
    pub decision: Decision,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for ODDS APEX.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OddsApexError {
    #[error("Invalid numeric input for {field}: {value:?}")]
    InvalidInput { field: &'static str, value: String },

    #[error("Model degenerate: total probability mass {total_mass}")]
    DegenerateDistribution { total_mass: f64 },

    #[error("Configuration error: {0}")]
    Config(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
