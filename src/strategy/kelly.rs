//! Fractional-Kelly stake sizing.
//!
//! Uses the detected edge as a stand-in for the full Kelly fraction and
//! scales it by the account's Kelly fraction. A back stakes
//! `balance * kelly * edge`; a lay risks a liability of
//! `balance * kelly * edge` and asks for a backer stake of
//! `liability / (odds - 1)`.

use tracing::debug;

use super::edge::Edge;
use crate::types::{AccountConfig, Recommendation, Side};

pub struct KellyCalculator {
    commission: f64,
}

impl KellyCalculator {
    pub fn new(commission: f64) -> Self {
        Self { commission }
    }

    /// Turn a qualifying edge into a sized recommendation.
    pub fn size(&self, edge: &Edge, account: &AccountConfig) -> Recommendation {
        match edge.side {
            Side::Back => self.size_back(edge, account),
            Side::Lay => self.size_lay(edge, account),
        }
    }

    fn size_back(&self, edge: &Edge, account: &AccountConfig) -> Recommendation {
        let stake = account.balance * account.kelly_fraction * edge.edge;
        let profit = stake * (edge.market_odds - 1.0) * (1.0 - self.commission);

        debug!(
            stake = format!("{:.2}", stake),
            profit = format!("{:.2}", profit),
            "Back sized"
        );

        Recommendation::Back {
            edge: edge.edge,
            ev: edge.ev,
            stake,
            profit,
        }
    }

    fn size_lay(&self, edge: &Edge, account: &AccountConfig) -> Recommendation {
        let stake_fraction = account.kelly_fraction * edge.edge;
        let liability = account.balance * stake_fraction;
        // Backer's stake that carries this liability at these odds.
        let stake = liability / (edge.market_odds - 1.0);

        debug!(
            liability = format!("{:.2}", liability),
            stake = format!("{:.2}", stake),
            "Lay sized"
        );

        Recommendation::Lay {
            edge: edge.edge,
            ev: edge.ev,
            liability,
            stake,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
