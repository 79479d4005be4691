use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OHLCV bar data, ordered oldest to newest within a series.
/// The closing price of the last bar is treated as the current price
/// for technical purposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Point-in-time snapshot of a company's named financial facts.
///
/// Any field may be absent; absence means "unknown", never zero. Each
/// rule documents its own treatment of missing inputs; nothing here
/// substitutes defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockSnapshot {
    pub name: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,

    // Balance sheet / income statement facts used by the compliance screen
    pub market_cap: Option<f64>,
    pub total_debt: Option<f64>,
    pub total_cash: Option<f64>,
    pub short_term_investments: Option<f64>,
    pub net_receivables: Option<f64>,
    pub total_revenue: Option<f64>,
    pub interest_income: Option<f64>,
    pub interest_expense: Option<f64>,

    // Valuation
    pub pe_ratio: Option<f64>,
    pub forward_pe: Option<f64>,
    pub pb_ratio: Option<f64>,
    pub peg_ratio: Option<f64>,
    pub ev_ebitda: Option<f64>,

    // Profitability
    pub gross_margin: Option<f64>,
    pub operating_margin: Option<f64>,
    pub net_margin: Option<f64>,
    pub roe: Option<f64>,
    pub roa: Option<f64>,

    // Growth
    pub revenue_growth: Option<f64>,
    pub earnings_growth: Option<f64>,

    // Financial health
    pub debt_to_equity: Option<f64>,
    pub current_ratio: Option<f64>,
    pub free_cash_flow: Option<f64>,

    // Dividends
    pub dividend_yield: Option<f64>,
    pub payout_ratio: Option<f64>,

    // Price context
    pub current_price: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
}

/// Directional trading signal emitted by a technical indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
    NotAvailable,
}

impl Signal {
    pub fn label(&self) -> &'static str {
        match self {
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::Hold => "HOLD",
            Signal::NotAvailable => "N/A",
        }
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Volume activity level. Informational only, excluded from the
/// directional consensus vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeLevel {
    High,
    Normal,
    NotAvailable,
}

impl VolumeLevel {
    pub fn label(&self) -> &'static str {
        match self {
            VolumeLevel::High => "HIGH VOLUME",
            VolumeLevel::Normal => "NORMAL",
            VolumeLevel::NotAvailable => "N/A",
        }
    }
}

impl std::fmt::Display for VolumeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Overall compliance status for one ticker.
///
/// Precedence: Error (the fetch itself failed) beats everything, a hard
/// Fail beats Doubtful, and Doubtful (all rules passed but a ratio could
/// not be computed) beats Pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceStatus {
    Pass,
    Doubtful,
    Fail,
    Error,
}

impl ComplianceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ComplianceStatus::Pass => "PASS",
            ComplianceStatus::Doubtful => "DOUBTFUL",
            ComplianceStatus::Fail => "FAIL",
            ComplianceStatus::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Valuation classification from the four-way majority vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValuationTag {
    Underpriced,
    FairValue,
    Overpriced,
}

impl ValuationTag {
    pub fn label(&self) -> &'static str {
        match self {
            ValuationTag::Underpriced => "UNDERPRICED",
            ValuationTag::FairValue => "FAIR VALUE",
            ValuationTag::Overpriced => "OVERPRICED",
        }
    }
}

impl std::fmt::Display for ValuationTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
