//! Mispricing detection.
//!
//! Compares the model's fair odds to the live market price on both sides
//! of the Over line and keeps only edges that clear both thresholds.

use tracing::debug;

use crate::types::Side;

// ---------------------------------------------------------------------------
// Formulas
// ---------------------------------------------------------------------------

/// Relative amount by which the market pays more than fair.
pub fn back_edge(fair_odds: f64, market_odds: f64) -> f64 {
    (market_odds - fair_odds) / fair_odds
}

/// Relative amount by which the market underprices the event.
pub fn lay_edge(fair_odds: f64, market_odds: f64) -> f64 {
    (fair_odds - market_odds) / fair_odds
}

/// Expected return per unit backed, commission taken from winnings.
pub fn back_ev(fair_prob: f64, market_odds: f64, commission: f64) -> f64 {
    fair_prob * (market_odds - 1.0) * (1.0 - commission) - (1.0 - fair_prob)
}

/// Expected return per unit of backer's stake accepted.
pub fn lay_ev(fair_prob: f64, market_odds: f64, commission: f64) -> f64 {
    (1.0 - fair_prob) * (1.0 - commission) - fair_prob * (market_odds - 1.0)
}

// ---------------------------------------------------------------------------
// Edge detection
// ---------------------------------------------------------------------------

/// Edge and EV for one side of the market.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub side: Side,
    pub edge: f64,
    pub ev: f64,
    pub market_odds: f64,
}

/// Threshold gate for back/lay opportunities.
#[derive(Debug, Clone)]
pub struct EdgeDetector {
    commission: f64,
    edge_threshold: f64,
    ev_threshold: f64,
}

impl EdgeDetector {
    pub fn new(commission: f64, edge_threshold: f64, ev_threshold: f64) -> Self {
        Self {
            commission,
            edge_threshold,
            ev_threshold,
        }
    }

    /// Raw edge and EV for a side, before any threshold check.
    pub fn assess(&self, side: Side, fair_prob: f64, fair_odds: f64, market_odds: f64) -> Edge {
        let (edge, ev) = match side {
            Side::Back => (
                back_edge(fair_odds, market_odds),
                back_ev(fair_prob, market_odds, self.commission),
            ),
            Side::Lay => (
                lay_edge(fair_odds, market_odds),
                lay_ev(fair_prob, market_odds, self.commission),
            ),
        };
        Edge {
            side,
            edge,
            ev,
            market_odds,
        }
    }

    /// Edge for a side if it clears both thresholds.
    ///
    /// Laying is never considered at odds of 1.0 or below.
    pub fn detect(&self, side: Side, fair_prob: f64, fair_odds: f64, market_odds: f64) -> Option<Edge> {
        if side == Side::Lay && !(market_odds > 1.0) {
            debug!(market_odds, "Lay skipped: odds at or below evens floor");
            return None;
        }

        let edge = self.assess(side, fair_prob, fair_odds, market_odds);
        if edge.edge > self.edge_threshold && edge.ev > self.ev_threshold {
            debug!(
                side = %side,
                edge = format!("{:.2}%", edge.edge * 100.0),
                ev = format!("{:.2}%", edge.ev * 100.0),
                "Edge detected"
            );
            Some(edge)
        } else {
            debug!(
                side = %side,
                edge = format!("{:.2}%", edge.edge * 100.0),
                ev = format!("{:.2}%", edge.ev * 100.0),
                edge_threshold = self.edge_threshold,
                ev_threshold = self.ev_threshold,
                "Edge below threshold"
            );
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
