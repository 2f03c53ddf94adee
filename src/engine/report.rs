//! Text report — the human-readable view of a calculation.
//!
//! Each line carries a kind so front ends can colour it (heading green,
//! back blue, lay red in the web form).

use rust_decimal::prelude::*;
use serde::Serialize;
use tracing::warn;

use crate::model::market_label;
use crate::types::{Insights, OddsApexError, Recommendation};

/// Shown for any unparseable field, whichever it was.
pub const INVALID_INPUT_MESSAGE: &str = "Please enter valid numerical values.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Heading,
    Back,
    Lay,
    Normal,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportLine {
    pub kind: LineKind,
    pub text: String,
}

impl ReportLine {
    fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Render either outcome of a calculation.
pub fn render_result(result: &Result<Insights, OddsApexError>) -> Vec<ReportLine> {
    match result {
        Ok(insights) => render(insights),
        Err(err) => render_error(err),
    }
}

pub fn render(insights: &Insights) -> Vec<ReportLine> {
    let market = market_label(insights.goal_line);
    let mut lines = vec![
        ReportLine::new(LineKind::Heading, "=== Pre-Match Over Insights ==="),
        ReportLine::new(
            LineKind::Normal,
            format!(
                "Fair Pr({market}): {:.1}%  (Fair Odds: {})",
                insights.fair.over_probability * 100.0,
                insights.fair.over_odds
            ),
        ),
        ReportLine::new(
            LineKind::Normal,
            format!("Market Odds {market}: {:.2}", insights.market_odds),
        ),
    ];

    lines.push(match insights.decision.back {
        Recommendation::Back {
            edge,
            ev,
            stake,
            profit,
        } => ReportLine::new(
            LineKind::Back,
            format!(
                "Back {market} → Edge {:.2}%, EV {:.2}%, Stake {}, Profit {}",
                edge * 100.0,
                ev * 100.0,
                money(stake),
                money(profit)
            ),
        ),
        Recommendation::NoPrice => no_price_line(&market, "back"),
        _ => ReportLine::new(LineKind::Normal, format!("No back value on {market}")),
    });

    lines.push(match insights.decision.lay {
        Recommendation::Lay {
            edge,
            ev,
            liability,
            stake,
        } => ReportLine::new(
            LineKind::Lay,
            format!(
                "Lay {market} → Edge {:.2}%, EV {:.2}%, Liability {}, Stake {}",
                edge * 100.0,
                ev * 100.0,
                money(liability),
                money(stake)
            ),
        ),
        Recommendation::NoPrice => no_price_line(&market, "lay"),
        _ => ReportLine::new(LineKind::Normal, format!("No lay value on {market}")),
    });

    lines
}

pub fn render_error(err: &OddsApexError) -> Vec<ReportLine> {
    let line = match err {
        OddsApexError::InvalidInput { .. } => ReportLine::new(LineKind::Normal, INVALID_INPUT_MESSAGE),
        OddsApexError::DegenerateDistribution { .. } => ReportLine::new(
            LineKind::Error,
            "Model degenerate: these inputs give no scoring probability. Check the xG-against figures.",
        ),
        OddsApexError::Config(_) => ReportLine::new(LineKind::Error, err.to_string()),
    };
    vec![line]
}

/// Plain text, one line per entry.
pub fn to_text(lines: &[ReportLine]) -> String {
    lines
        .iter()
        .map(|l| l.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

fn no_price_line(market: &str, side: &str) -> ReportLine {
    ReportLine::new(
        LineKind::Normal,
        format!("No price available for {market} ({side}): fair probability is zero"),
    )
}

/// Currency amount rounded to cents, half away from zero.
fn cents(amount: f64) -> Option<Decimal> {
    Decimal::from_f64(amount).map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// Currency amount as printed in the report.
fn money(amount: f64) -> String {
    match cents(amount) {
        Some(d) => format!("{d:.2}"),
        None => {
            warn!(amount, "Amount outside decimal range, printing raw value");
            format!("{amount:.2}")
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Decision, FairPrice, ScoringRates};
    use rust_decimal_macros::dec;

    fn insights(back: Recommendation, lay: Recommendation, p: f64) -> Insights {
        Insights {
            goal_line: 2,
            rates: ScoringRates::new(1.51, 1.085),
            fair: FairPrice::from_over_probability(p),
            market_odds: 2.10,
            decision: Decision { back, lay },
        }
    }

    #[test]
    fn test_cents_rounds_half_away_from_zero() {
        assert_eq!(cents(3.345287143938145), Some(dec!(3.35)));
        assert_eq!(cents(0.125), Some(dec!(0.13)));
        assert_eq!(cents(f64::NAN), None);
        assert_eq!(cents(1e30), None);
    }

    #[test]
    fn test_money_prints_two_places() {
        assert_eq!(money(3.345287143938145), "3.35");
        assert_eq!(money(2.5), "2.50");
        assert_eq!(money(3.0), "3.00");
    }

    #[test]
    fn test_money_out_of_decimal_range_keeps_value() {
        let text = money(1e30);
        assert_ne!(text, "0.00");
        assert!(text.starts_with("1000000000000000"), "{text}");
        assert!(text.ends_with(".00"));
    }

    #[test]
    fn test_render_uses_market_label_for_goal_line() {
        let mut ins = insights(Recommendation::NoValue, Recommendation::NoValue, 0.3);
        ins.goal_line = 3;
        let lines = render(&ins);
        assert_eq!(lines[2].text, format!("Market Odds {}: 2.10", market_label(3)));
        assert_eq!(lines[3].text, "No back value on Over 3.5");
    }

    #[test]
    fn test_render_back_line() {
        let lines = render(&insights(
            Recommendation::Back {
                edge: 0.0669057428787629,
                ev: 0.03896297342241439,
                stake: 3.345287143938145,
                profit: 3.4956250654153614,
            },
            Recommendation::NoValue,
            0.5080503537517919,
        ));
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0].kind, LineKind::Heading);
        assert_eq!(lines[1].text, "Fair Pr(Over 2.5): 50.8%  (Fair Odds: 1.97)");
        assert_eq!(lines[2].text, "Market Odds Over 2.5: 2.10");
        assert_eq!(lines[3].kind, LineKind::Back);
        assert_eq!(
            lines[3].text,
            "Back Over 2.5 → Edge 6.69%, EV 3.90%, Stake 3.35, Profit 3.50"
        );
        assert_eq!(lines[4].text, "No lay value on Over 2.5");
    }

    #[test]
    fn test_render_lay_line() {
        let lines = render(&insights(
            Recommendation::NoValue,
            Recommendation::Lay {
                edge: 0.2887,
                ev: 0.2641,
                liability: 14.436,
                stake: 36.09,
            },
            0.508,
        ));
        assert_eq!(lines[3].text, "No back value on Over 2.5");
        assert_eq!(lines[4].kind, LineKind::Lay);
        assert!(lines[4].text.starts_with("Lay Over 2.5 → Edge 28.87%"));
        assert!(lines[4].text.ends_with("Liability 14.44, Stake 36.09"));
    }

    #[test]
    fn test_render_no_price() {
        let lines = render(&insights(Recommendation::NoPrice, Recommendation::NoPrice, 0.0));
        assert!(lines[1].text.contains("Fair Odds: no price"));
        assert!(lines[3].text.starts_with("No price available"));
        assert!(lines[4].text.contains("(lay)"));
    }

    #[test]
    fn test_render_invalid_input() {
        let err = OddsApexError::InvalidInput {
            field: "home_xg",
            value: "x".into(),
        };
        let lines = render_result(&Err(err));
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, INVALID_INPUT_MESSAGE);
    }

    #[test]
    fn test_render_degenerate_is_distinct() {
        let lines = render_error(&OddsApexError::DegenerateDistribution { total_mass: f64::NAN });
        assert_eq!(lines[0].kind, LineKind::Error);
        assert!(lines[0].text.starts_with("Model degenerate"));
        assert_ne!(lines[0].text, INVALID_INPUT_MESSAGE);
    }

    #[test]
    fn test_to_text_joins_lines() {
        let lines = render_error(&OddsApexError::InvalidInput {
            field: "live_over",
            value: "?".into(),
        });
        assert_eq!(to_text(&lines), INVALID_INPUT_MESSAGE);
    }
}
