//! Score-weighted capital allocation.
//!
//! Distributes a fixed dollar budget across a ranked candidate list in
//! proportion to composite score, rounding each position to a
//! practical increment and reconciling the rounding slack so the plan
//! always sums to the requested budget exactly.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use screener_core::ValuationTag;

/// One scored, tagged candidate, as produced by the research pipeline.
/// Input lists must already be ranked best-first; the allocator
/// preserves order and parks all rounding slack on the first record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub ticker: String,
    pub company: String,
    pub price: Option<f64>,
    pub score: f64,
    pub valuation: ValuationTag,
}

/// One line of the allocation plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub ticker: String,
    pub company: String,
    pub price: f64,
    pub dollars: f64,
    pub approx_shares: f64,
}

/// Rounding and floor parameters for the allocation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationPolicy {
    /// Dollar increments positions are rounded to.
    pub rounding_step: f64,
    /// Smallest position worth opening.
    pub min_allocation: f64,
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            rounding_step: 10.0,
            min_allocation: 10.0,
        }
    }
}

/// Fractional shares are quoted to two decimals, truncated rather than
/// rounded so the estimate never overstates what the dollars buy.
fn approx_shares(dollars: f64, price: f64) -> f64 {
    (dollars / price * 100.0).floor() / 100.0
}

impl AllocationPolicy {
    /// Distribute `budget` across the eligible candidates.
    ///
    /// Candidates tagged OVERPRICED or without a positive price are
    /// skipped. An empty eligible set yields an empty plan, not an
    /// error. After per-candidate rounding, the whole residual
    /// (positive or negative) lands on the first record, which then has
    /// its share count recomputed, so the plan total equals `budget`
    /// exactly.
    pub fn allocate(&self, ranked: &[Candidate], budget: f64) -> Result<Vec<Allocation>> {
        if !budget.is_finite() || budget <= 0.0 {
            bail!("budget must be a positive amount");
        }

        let eligible: Vec<(&Candidate, f64)> = ranked
            .iter()
            .filter(|c| c.valuation != ValuationTag::Overpriced)
            .filter_map(|c| match c.price {
                Some(p) if p > 0.0 => Some((c, p)),
                _ => None,
            })
            .collect();

        if eligible.is_empty() {
            return Ok(vec![]);
        }

        let total_score: f64 = eligible.iter().map(|(c, _)| c.score).sum();
        let equal_weight = 1.0 / eligible.len() as f64;

        let mut allocations = Vec::with_capacity(eligible.len());
        let mut allocated = 0.0;

        for (candidate, price) in &eligible {
            let weight = if total_score > 0.0 {
                candidate.score / total_score
            } else {
                equal_weight
            };

            let raw = budget * weight;
            let rounded = ((raw / self.rounding_step).round() * self.rounding_step)
                .max(self.min_allocation);

            allocations.push(Allocation {
                ticker: candidate.ticker.clone(),
                company: candidate.company.clone(),
                price: *price,
                dollars: rounded,
                approx_shares: approx_shares(rounded, *price),
            });
            allocated += rounded;
        }

        // The top pick absorbs all rounding slack.
        let residual = budget - allocated;
        if let Some(top) = allocations.first_mut() {
            top.dollars += residual;
            top.approx_shares = approx_shares(top.dollars, top.price);
        }

        Ok(allocations)
    }
}
