use async_trait::async_trait;

use crate::{Bar, ScreenerError, StockSnapshot};

/// Source of point-in-time company attributes and historical prices.
///
/// The engine treats this as an opaque, potentially slow and fallible
/// external call. Timeouts, retries, and rate limiting belong to the
/// implementor; the engine only isolates failures per ticker.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn snapshot(&self, ticker: &str) -> Result<StockSnapshot, ScreenerError>;

    /// Daily OHLCV history for the trailing `lookback_days`, ordered
    /// oldest to newest.
    async fn price_history(
        &self,
        ticker: &str,
        lookback_days: i64,
    ) -> Result<Vec<Bar>, ScreenerError>;
}

/// Source of an eligible-ticker universe (index constituents, ETF
/// holdings, a custom list). The engine treats the result as an opaque
/// ordered sequence of ticker strings.
#[async_trait]
pub trait UniverseProvider: Send + Sync {
    async fn tickers(&self) -> Result<Vec<String>, ScreenerError>;
}
