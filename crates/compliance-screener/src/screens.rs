//! AAOIFI-style compliance screens: one categorical business-activity
//! check plus four financial-ratio checks against market cap or revenue.

use screener_core::{ComplianceStatus, StockSnapshot};

use crate::report::{ActivityCheck, ComplianceReport, RatioCheck, ScreenSet};
use crate::rules;

/// Debt, liquid-assets, and receivables ratios share this cap.
pub const RATIO_THRESHOLD: f64 = 0.33;
/// Interest-derived income must stay below this share of revenue.
pub const IMPURE_INCOME_THRESHOLD: f64 = 0.05;

fn pct(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

fn threshold_reason(label: &str, ratio: f64, threshold: f64) -> String {
    let relation = if ratio < threshold {
        "below"
    } else {
        "above or equal to"
    };
    format!(
        "{} {} is {} the {:.0}% threshold",
        label,
        pct(ratio),
        relation,
        threshold * 100.0
    )
}

/// A ratio check whose inputs were unavailable. Passes permissively;
/// the missing value marks the overall report doubtful.
fn unavailable(threshold: f64, reason: &str) -> RatioCheck {
    RatioCheck {
        passed: true,
        value: None,
        threshold,
        reason: reason.to_string(),
    }
}

/// Check whether the company's business activity is permissible.
///
/// The curated ticker list takes precedence over the sector/industry
/// tables. Missing sector and industry pass (permissive default).
pub fn screen_business_activity(ticker: &str, snapshot: &StockSnapshot) -> ActivityCheck {
    if let Some(reason) = rules::ticker_exclusion(ticker) {
        return ActivityCheck {
            passed: false,
            detail: format!("Ticker '{}' is on the curated exclusion list", ticker.to_ascii_uppercase()),
            reason: reason.to_string(),
        };
    }

    let sector = snapshot.sector.as_deref().unwrap_or("");
    let industry = snapshot.industry.as_deref().unwrap_or("");

    if rules::sector_is_prohibited(sector) {
        return ActivityCheck {
            passed: false,
            detail: format!("Sector '{}' is non-compliant", sector),
            reason: format!("Sector '{}' falls under prohibited financial services", sector),
        };
    }

    if rules::industry_is_prohibited(industry) {
        return ActivityCheck {
            passed: false,
            detail: format!("Industry '{}' is non-compliant", industry),
            reason: format!("Industry '{}' involves prohibited activities", industry),
        };
    }

    ActivityCheck {
        passed: true,
        detail: format!("Sector '{}', Industry '{}' are compliant", sector, industry),
        reason: "Business activity is permissible".to_string(),
    }
}

/// Total debt to market cap, must stay below 33%.
pub fn screen_debt_ratio(snapshot: &StockSnapshot) -> RatioCheck {
    let (total_debt, market_cap) = match (snapshot.total_debt, snapshot.market_cap) {
        (Some(d), Some(m)) if m != 0.0 => (d, m),
        _ => return unavailable(RATIO_THRESHOLD, "Data unavailable - assumed compliant"),
    };

    let ratio = total_debt / market_cap;
    RatioCheck {
        passed: ratio < RATIO_THRESHOLD,
        value: Some(ratio),
        threshold: RATIO_THRESHOLD,
        reason: threshold_reason("Debt ratio", ratio, RATIO_THRESHOLD),
    }
}

/// Liquid assets (cash + short-term investments) to market cap, below
/// 33%. Missing cash or investments count as zero; market cap must be
/// present and non-zero.
pub fn screen_liquid_assets_ratio(snapshot: &StockSnapshot) -> RatioCheck {
    let market_cap = match snapshot.market_cap {
        Some(m) if m != 0.0 => m,
        _ => return unavailable(RATIO_THRESHOLD, "Data unavailable - assumed compliant"),
    };

    let liquid = snapshot.total_cash.unwrap_or(0.0) + snapshot.short_term_investments.unwrap_or(0.0);
    let ratio = liquid / market_cap;
    RatioCheck {
        passed: ratio < RATIO_THRESHOLD,
        value: Some(ratio),
        threshold: RATIO_THRESHOLD,
        reason: threshold_reason("Liquid assets ratio", ratio, RATIO_THRESHOLD),
    }
}

/// Interest-derived income as a share of revenue, below 5%. Uses the
/// larger of |interest expense| and |interest income| to capture
/// interest exposure on either side of the income statement.
pub fn screen_impure_income(snapshot: &StockSnapshot) -> RatioCheck {
    let total_revenue = match snapshot.total_revenue {
        Some(r) if r != 0.0 => r,
        _ => return unavailable(IMPURE_INCOME_THRESHOLD, "Data unavailable - assumed compliant"),
    };

    let interest_expense = snapshot.interest_expense.unwrap_or(0.0).abs();
    let interest_income = snapshot.interest_income.unwrap_or(0.0).abs();
    let impure_amount = interest_expense.max(interest_income);

    let ratio = impure_amount / total_revenue;
    RatioCheck {
        passed: ratio < IMPURE_INCOME_THRESHOLD,
        value: Some(ratio),
        threshold: IMPURE_INCOME_THRESHOLD,
        reason: threshold_reason("Impure income ratio", ratio, IMPURE_INCOME_THRESHOLD),
    }
}

/// Net receivables to market cap, below 33%. Unlike the liquid-assets
/// check, missing receivables are not assumed zero.
pub fn screen_receivables_ratio(snapshot: &StockSnapshot) -> RatioCheck {
    let (net_receivables, market_cap) = match (snapshot.net_receivables, snapshot.market_cap) {
        (Some(r), Some(m)) if m != 0.0 => (r, m),
        _ => return unavailable(RATIO_THRESHOLD, "Data unavailable - marked doubtful"),
    };

    let ratio = net_receivables / market_cap;
    RatioCheck {
        passed: ratio < RATIO_THRESHOLD,
        value: Some(ratio),
        threshold: RATIO_THRESHOLD,
        reason: threshold_reason("Receivables ratio", ratio, RATIO_THRESHOLD),
    }
}

/// Run all five screens against one snapshot and derive the overall
/// status. Pure: identical snapshots always produce identical reports.
pub fn evaluate(ticker: &str, snapshot: &StockSnapshot) -> ComplianceReport {
    let business_activity = screen_business_activity(ticker, snapshot);
    let debt_ratio = screen_debt_ratio(snapshot);
    let liquid_assets_ratio = screen_liquid_assets_ratio(snapshot);
    let impure_income = screen_impure_income(snapshot);
    let receivables_ratio = screen_receivables_ratio(snapshot);

    let any_failed = !business_activity.passed
        || !debt_ratio.passed
        || !liquid_assets_ratio.passed
        || !impure_income.passed
        || !receivables_ratio.passed;

    let any_ratio_unavailable = [
        &debt_ratio,
        &liquid_assets_ratio,
        &impure_income,
        &receivables_ratio,
    ]
    .iter()
    .any(|check| check.value.is_none());

    // A hard fail always wins over data-unavailability.
    let status = if any_failed {
        ComplianceStatus::Fail
    } else if any_ratio_unavailable {
        ComplianceStatus::Doubtful
    } else {
        ComplianceStatus::Pass
    };

    ComplianceReport {
        ticker: ticker.to_string(),
        company: snapshot.name.clone().unwrap_or_else(|| ticker.to_string()),
        sector: snapshot.sector.clone(),
        industry: snapshot.industry.clone(),
        status,
        screens: Some(ScreenSet {
            business_activity,
            debt_ratio,
            liquid_assets_ratio,
            impure_income,
            receivables_ratio,
        }),
    }
}
