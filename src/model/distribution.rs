//! Bivariate Poisson score grid.
//!
//! Two independent Poisson components plus a shared "common shock"
//! component, truncated at `max_goals` per side and renormalised so the
//! grid is a proper distribution over the scorelines it covers.

use tracing::debug;

use crate::types::{OddsApexError, ScoringRates};

/// Probability mass over (home goals, away goals), both in `0..=max_goals`.
#[derive(Debug, Clone, PartialEq)]
pub struct JointDistribution {
    max_goals: usize,
    /// Row-major: index `home * (max_goals + 1) + away`.
    cells: Vec<f64>,
}

impl JointDistribution {
    /// Build the unnormalised grid.
    ///
    /// `P(i,j) = e^-(lh+la+lc) * sum_k lh^(i-k)/(i-k)! * la^(j-k)/(j-k)! * lc^k/k!`
    pub fn bivariate_poisson(home: f64, away: f64, common: f64, max_goals: usize) -> Self {
        let home_terms = power_terms(home, max_goals);
        let away_terms = power_terms(away, max_goals);
        let common_terms = power_terms(common, max_goals);
        let scale = (-(home + away + common)).exp();

        let side = max_goals + 1;
        let mut cells = vec![0.0; side * side];
        for i in 0..side {
            for j in 0..side {
                let mut mass = 0.0;
                for k in 0..=i.min(j) {
                    mass += scale * home_terms[i - k] * away_terms[j - k] * common_terms[k];
                }
                cells[i * side + j] = mass;
            }
        }

        Self { max_goals, cells }
    }

    /// Grid for a pair of rates, correlated by `covariance_coefficient * sqrt(lh * la)`.
    pub fn from_rates(rates: &ScoringRates, covariance_coefficient: f64, max_goals: usize) -> Self {
        let common = covariance_coefficient * (rates.home * rates.away).sqrt();
        Self::bivariate_poisson(rates.home, rates.away, common, max_goals)
    }

    pub fn max_goals(&self) -> usize {
        self.max_goals
    }

    /// Mass at a scoreline, or `None` outside the grid.
    pub fn get(&self, home_goals: usize, away_goals: usize) -> Option<f64> {
        if home_goals > self.max_goals || away_goals > self.max_goals {
            return None;
        }
        Some(self.cells[home_goals * (self.max_goals + 1) + away_goals])
    }

    pub fn total_mass(&self) -> f64 {
        self.cells.iter().sum()
    }

    /// Rescale so the grid sums to one.
    ///
    /// Fails when the total mass is zero, negative or not finite, which
    /// only happens for negative or NaN rates.
    pub fn normalize(mut self) -> Result<Self, OddsApexError> {
        let total_mass = self.total_mass();
        if !(total_mass > 0.0 && total_mass.is_finite()) {
            return Err(OddsApexError::DegenerateDistribution { total_mass });
        }
        for cell in &mut self.cells {
            *cell /= total_mass;
        }
        debug!(
            total_mass,
            truncated_tail = 1.0 - total_mass,
            "Score grid normalised"
        );
        Ok(self)
    }

    /// Mass of every scoreline whose total exceeds `goal_line`.
    pub fn over_probability(&self, goal_line: u32) -> f64 {
        self.sum_where(|total| total > goal_line as usize)
    }

    fn sum_where(&self, keep: impl Fn(usize) -> bool) -> f64 {
        let side = self.max_goals + 1;
        self.cells
            .iter()
            .enumerate()
            .filter(|(idx, _)| keep(idx / side + idx % side))
            .map(|(_, p)| p)
            .sum()
    }
}

/// `lambda^n / n!` for `n` in `0..=max_n`, by recurrence.
fn power_terms(lambda: f64, max_n: usize) -> Vec<f64> {
    let mut out = vec![0.0; max_n + 1];
    out[0] = 1.0;
    for n in 1..=max_n {
        out[n] = out[n - 1] * lambda / n as f64;
    }
    out
}
