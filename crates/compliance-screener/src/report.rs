use serde::{Deserialize, Serialize};

use screener_core::ComplianceStatus;

/// Outcome of the categorical business-activity check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityCheck {
    pub passed: bool,
    pub detail: String,
    pub reason: String,
}

/// Outcome of one financial-ratio check. `value` is `None` when the
/// inputs needed to compute the ratio were unavailable; the check still
/// passes in that case but the report is marked doubtful overall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioCheck {
    pub passed: bool,
    pub value: Option<f64>,
    pub threshold: f64,
    pub reason: String,
}

/// The five sub-screens that make up one compliance evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenSet {
    pub business_activity: ActivityCheck,
    pub debt_ratio: RatioCheck,
    pub liquid_assets_ratio: RatioCheck,
    pub impure_income: RatioCheck,
    pub receivables_ratio: RatioCheck,
}

/// Full compliance report for one ticker. `screens` is absent only when
/// the attribute fetch itself failed (`status == Error`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub ticker: String,
    pub company: String,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub status: ComplianceStatus,
    pub screens: Option<ScreenSet>,
}

impl ComplianceReport {
    /// Report for a ticker whose attribute fetch failed entirely. The
    /// failure is isolated to this ticker; batch evaluation continues.
    pub fn fetch_error(ticker: &str) -> Self {
        Self {
            ticker: ticker.to_string(),
            company: ticker.to_string(),
            sector: None,
            industry: None,
            status: ComplianceStatus::Error,
            screens: None,
        }
    }
}
