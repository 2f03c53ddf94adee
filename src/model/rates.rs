//! Scoring-rate estimation.
//!
//! Blends xG with a season-average strength proxy, then nudges each
//! side's rate by the quality of the opposing defence.

use tracing::debug;

use super::ModelConfig;
use crate::types::{ExpectedGoals, ScoringRates, TeamStats};

/// Expected goals for home and away in this fixture.
///
/// Rates can only go negative if an xG-against figure is far below zero;
/// that is left to the distribution engine to reject.
pub fn estimate_rates(stats: &TeamStats, xg: &ExpectedGoals, config: &ModelConfig) -> ScoringRates {
    let proxy_home = stats.home_avg_scored / stats.away_avg_conceded.max(config.conceded_floor);
    let proxy_away = stats.away_avg_scored / stats.home_avg_conceded.max(config.conceded_floor);

    let w = config.xg_weight;
    let mut home = w * xg.home_xg + (1.0 - w) * proxy_home;
    let mut away = w * xg.away_xg + (1.0 - w) * proxy_away;

    // A leaky opponent (xGA > 1) inflates the attacking rate.
    home *= 1.0 + (xg.away_xg_against - 1.0) * config.defence_coefficient;
    away *= 1.0 + (xg.home_xg_against - 1.0) * config.defence_coefficient;

    debug!(
        proxy_home,
        proxy_away,
        lambda_home = home,
        lambda_away = away,
        "Scoring rates estimated"
    );

    ScoringRates::new(home, away)
}
