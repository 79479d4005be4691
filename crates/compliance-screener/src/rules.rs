//! Exclusion rule tables for the business-activity screen.
//!
//! Kept as plain data so thresholds and memberships can be reviewed and
//! tuned without touching the screening control flow.

/// Sectors that fail the business-activity screen outright.
pub const PROHIBITED_SECTORS: &[&str] = &["Financial Services", "Financials"];

/// Industries that fail the business-activity screen. Includes both
/// generic names and the provider-style variants seen in live attribute
/// feeds (e.g. "Beverages - Brewers").
pub const PROHIBITED_INDUSTRIES: &[&str] = &[
    "Alcoholic Beverages",
    "Beverages - Brewers",
    "Beverages - Wineries & Distilleries",
    "Brewers",
    "Distillers & Vintners",
    "Tobacco",
    "Gambling",
    "Casinos & Gaming",
    "Resorts & Casinos",
    "Adult Entertainment",
    "Cannabis",
    "Aerospace & Defense",
];

/// Curated per-ticker exclusions with specific justifications. Checked
/// case-insensitively and ahead of the sector/industry tables, since a
/// company's listed sector can be permissible while its actual business
/// mix is not.
pub const PROHIBITED_TICKERS: &[(&str, &str)] = &[
    ("NFLX", "Produces and streams explicit adult-rated content"),
    ("DIS", "Significant revenue from non-compliant entertainment content"),
    ("WBD", "Significant revenue from non-compliant entertainment content"),
    ("PARA", "Significant revenue from non-compliant entertainment content"),
    ("HON", "Significant aerospace & defense revenue"),
];

pub fn sector_is_prohibited(sector: &str) -> bool {
    PROHIBITED_SECTORS.contains(&sector)
}

pub fn industry_is_prohibited(industry: &str) -> bool {
    PROHIBITED_INDUSTRIES.contains(&industry)
}

/// Look up a curated ticker exclusion, returning its justification.
pub fn ticker_exclusion(ticker: &str) -> Option<&'static str> {
    let upper = ticker.to_ascii_uppercase();
    PROHIBITED_TICKERS
        .iter()
        .find(|(t, _)| *t == upper)
        .map(|(_, reason)| *reason)
}
