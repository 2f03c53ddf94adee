//! Raw form input → typed match inputs.
//!
//! Every field arrives as text. Blank fields count as zero; anything
//! else must parse as a finite number.

use serde::{Deserialize, Serialize};

use crate::types::{AccountConfig, ExpectedGoals, MarketQuote, MatchInputs, OddsApexError, TeamStats};

/// The eleven form fields, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationRequest {
    pub home_avg_scored: String,
    pub home_avg_conceded: String,
    pub away_avg_scored: String,
    pub away_avg_conceded: String,
    pub home_xg: String,
    pub away_xg: String,
    pub home_xg_against: String,
    pub away_xg_against: String,
    pub account_balance: String,
    /// Percentage, 0–100.
    pub kelly_fraction: String,
    pub live_over: String,
}

impl CalculationRequest {
    /// Parse every field in form order; the first bad field is reported.
    pub fn parse(&self) -> Result<MatchInputs, OddsApexError> {
        let stats = TeamStats {
            home_avg_scored: parse_field("home_avg_scored", &self.home_avg_scored)?,
            home_avg_conceded: parse_field("home_avg_conceded", &self.home_avg_conceded)?,
            away_avg_scored: parse_field("away_avg_scored", &self.away_avg_scored)?,
            away_avg_conceded: parse_field("away_avg_conceded", &self.away_avg_conceded)?,
        };
        let xg = ExpectedGoals {
            home_xg: parse_field("home_xg", &self.home_xg)?,
            away_xg: parse_field("away_xg", &self.away_xg)?,
            home_xg_against: parse_field("home_xg_against", &self.home_xg_against)?,
            away_xg_against: parse_field("away_xg_against", &self.away_xg_against)?,
        };
        let balance = parse_field("account_balance", &self.account_balance)?;
        let kelly_pct = parse_field("kelly_fraction", &self.kelly_fraction)?;
        let over_odds = parse_field("live_over", &self.live_over)?;

        Ok(MatchInputs {
            stats,
            xg,
            account: AccountConfig::new(balance, kelly_pct),
            quote: MarketQuote { over_odds },
        })
    }
}

fn parse_field(field: &'static str, raw: &str) -> Result<f64, OddsApexError> {
    let s = raw.trim();
    if s.is_empty() {
        return Ok(0.0);
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(OddsApexError::InvalidInput {
            field,
            value: raw.to_string(),
        }),
    }
}
