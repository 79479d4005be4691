//! Valuation tag classifier: four independent cheap/fair/expensive
//! votes resolved by majority, with ties favoring UNDERPRICED.

use screener_core::{StockSnapshot, ValuationTag};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Vote {
    Cheap,
    Fair,
    Expensive,
}

/// Vote on a valuation multiple: below `cheap_below` is cheap, up to
/// `fair_max` inclusive is fair, above is expensive. Missing or
/// non-positive values vote fair.
fn multiple_vote(value: Option<f64>, cheap_below: f64, fair_max: f64) -> Vote {
    match value {
        Some(v) if v > 0.0 => {
            if v < cheap_below {
                Vote::Cheap
            } else if v <= fair_max {
                Vote::Fair
            } else {
                Vote::Expensive
            }
        }
        _ => Vote::Fair,
    }
}

/// Vote on the price's position within its 52-week range. Requires
/// price, high, and low, with high above low; otherwise fair.
fn range_position_vote(snapshot: &StockSnapshot) -> Vote {
    let (price, high, low) = match (
        snapshot.current_price,
        snapshot.fifty_two_week_high,
        snapshot.fifty_two_week_low,
    ) {
        (Some(p), Some(h), Some(l)) if h > l => (p, h, l),
        _ => return Vote::Fair,
    };

    let position = (price - low) / (high - low);
    if position < 0.33 {
        Vote::Cheap
    } else if position <= 0.66 {
        Vote::Fair
    } else {
        Vote::Expensive
    }
}

/// Classify a stock as UNDERPRICED, FAIR VALUE, or OVERPRICED.
///
/// Cheap wins any tie it is part of; expensive needs to strictly beat
/// cheap. The asymmetry is intentional: when the evidence is split, the
/// classifier leans toward opportunity rather than caution.
pub fn classify(snapshot: &StockSnapshot) -> ValuationTag {
    let votes = [
        multiple_vote(snapshot.pe_ratio, 15.0, 25.0),
        multiple_vote(snapshot.pb_ratio, 1.5, 3.0),
        multiple_vote(snapshot.peg_ratio, 1.0, 2.0),
        range_position_vote(snapshot),
    ];

    let cheap = votes.iter().filter(|v| **v == Vote::Cheap).count();
    let fair = votes.iter().filter(|v| **v == Vote::Fair).count();
    let expensive = votes.iter().filter(|v| **v == Vote::Expensive).count();

    if cheap >= fair && cheap >= expensive {
        ValuationTag::Underpriced
    } else if expensive >= fair && expensive > cheap {
        ValuationTag::Overpriced
    } else {
        ValuationTag::FairValue
    }
}
