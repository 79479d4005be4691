//! Per-ticker evaluation pipeline over the market-data provider
//! boundary.
//!
//! Each ticker's screen, signal, score, and tag computation is a pure
//! function of its own fetched inputs; the orchestrator sequences the
//! fetches, isolates per-ticker failures so a batch never aborts, and
//! paces requests to respect provider rate limits. The allocation step
//! runs only after every candidate score is final, since its weights
//! depend on the whole candidate set.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::time::{sleep, Duration};


use capital_allocator::{Allocation, AllocationPolicy, Candidate};
use compliance_screener::ComplianceReport;
use composite_scorer::ScoreBreakdown;
use screener_core::{
    ComplianceStatus, MarketDataProvider, ScreenerError, UniverseProvider, ValuationTag,
};
use technical_analysis::SignalReport;

/// Tunables for a screening run. The defaults mirror a daily
/// whole-index sweep: one year of history, a short pause every ten
/// fetches, a five-stock shortlist, and a $1,000 budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub lookback_days: i64,
    pub pacing_delay_ms: u64,
    /// Tickers fetched between pacing pauses.
    pub pacing_batch: usize,
    pub top_n: usize,
    pub budget: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            lookback_days: 365,
            pacing_delay_ms: 500,
            pacing_batch: 10,
            top_n: 5,
            budget: 1000.0,
        }
    }
}

/// Full per-ticker evaluation: compliance screen, technical signals,
/// composite score, and valuation tag, assembled from one snapshot and
/// one price series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAssessment {
    pub ticker: String,
    pub company: String,
    pub price: Option<f64>,
    pub compliance: ComplianceReport,
    pub signals: SignalReport,
    pub score: ScoreBreakdown,
    pub valuation: ValuationTag,
    pub timestamp: DateTime<Utc>,
}

/// Outcome of a compliance sweep over one universe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchScreenResult {
    pub reports: Vec<ComplianceReport>,
    pub total_screened: usize,
    /// PASS or DOUBTFUL reports.
    pub total_passed: usize,
    pub timestamp: DateTime<Utc>,
}

/// Result of the full pipeline: sweep, research, and allocation plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningRun {
    pub screened: BatchScreenResult,
    pub assessments: Vec<StockAssessment>,
    pub plan: Vec<Allocation>,
    pub timestamp: DateTime<Utc>,
}

pub struct ScreeningOrchestrator {
    provider: Arc<dyn MarketDataProvider>,
    config: PipelineConfig,
    allocation: AllocationPolicy,
}

impl ScreeningOrchestrator {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self {
            provider,
            config: PipelineConfig::default(),
            allocation: AllocationPolicy::default(),
        }
    }

    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_allocation_policy(mut self, policy: AllocationPolicy) -> Self {
        self.allocation = policy;
        self
    }

    /// Screen a single ticker. A failed attribute fetch degrades to an
    /// ERROR-status report for this ticker alone.
    pub async fn screen_one(&self, ticker: &str) -> ComplianceReport {
        match self.provider.snapshot(ticker).await {
            Ok(snapshot) => compliance_screener::evaluate(ticker, &snapshot),
            Err(e) => {
                tracing::warn!("Attribute fetch failed for {}: {}", ticker, e);
                ComplianceReport::fetch_error(ticker)
            }
        }
    }

    async fn pace(&self, done: usize, total: usize) {
        if self.config.pacing_delay_ms > 0
            && self.config.pacing_batch > 0
            && done % self.config.pacing_batch == 0
            && done < total
        {
            sleep(Duration::from_millis(self.config.pacing_delay_ms)).await;
        }
    }

    /// Screen every ticker in the universe sequentially, pacing fetches
    /// to stay under provider rate limits. One ticker's failure never
    /// aborts the sweep.
    pub async fn screen_universe(&self, tickers: &[String]) -> BatchScreenResult {
        tracing::info!("Screening {} tickers for compliance", tickers.len());

        let mut reports = Vec::with_capacity(tickers.len());
        for (i, ticker) in tickers.iter().enumerate() {
            reports.push(self.screen_one(ticker).await);

            let done = i + 1;
            if done % 50 == 0 || done == tickers.len() {
                tracing::info!("Screening progress: {}/{}", done, tickers.len());
            }
            self.pace(done, tickers.len()).await;
        }

        let total_passed = reports
            .iter()
            .filter(|r| matches!(r.status, ComplianceStatus::Pass | ComplianceStatus::Doubtful))
            .count();

        tracing::info!(
            "Screen complete: {}/{} tickers passed",
            total_passed,
            reports.len()
        );

        BatchScreenResult {
            total_screened: reports.len(),
            total_passed,
            reports,
            timestamp: Utc::now(),
        }
    }

    /// Build the full assessment for one ticker.
    ///
    /// A missing price series degrades the technical leg to an all-N/A
    /// signal report; only a failed snapshot fetch is an error.
    pub async fn research_one(&self, ticker: &str) -> Result<StockAssessment, ScreenerError> {
        let snapshot = self.provider.snapshot(ticker).await?;

        let bars = match self
            .provider
            .price_history(ticker, self.config.lookback_days)
            .await
        {
            Ok(bars) => bars,
            Err(e) => {
                tracing::warn!("Price history unavailable for {}: {}", ticker, e);
                Vec::new()
            }
        };

        let compliance = compliance_screener::evaluate(ticker, &snapshot);
        let signals = technical_analysis::compute(ticker, &bars);
        let score = composite_scorer::score(&snapshot, signals.overall.signal);
        let valuation = composite_scorer::classify(&snapshot);

        Ok(StockAssessment {
            ticker: ticker.to_string(),
            company: compliance.company.clone(),
            price: snapshot.current_price,
            compliance,
            signals,
            score,
            valuation,
            timestamp: Utc::now(),
        })
    }

    /// Research a list of tickers, keeping each ticker's outcome (or
    /// error) as its own entry so callers can report partial batches.
    pub async fn research_universe(
        &self,
        tickers: &[String],
    ) -> Vec<(String, Result<StockAssessment, ScreenerError>)> {
        let mut outcomes = Vec::with_capacity(tickers.len());
        for (i, ticker) in tickers.iter().enumerate() {
            let outcome = self.research_one(ticker).await;
            if let Err(e) = &outcome {
                tracing::warn!("Research failed for {}: {}", ticker, e);
            }
            outcomes.push((ticker.clone(), outcome));
            self.pace(i + 1, tickers.len()).await;
        }
        outcomes
    }

    /// Rank compliant assessments by composite score and allocate the
    /// configured budget across the top picks. Must only run once every
    /// candidate's score is final: the weights are a function of the
    /// whole set's score sum.
    pub fn build_allocation_plan(
        &self,
        assessments: &[StockAssessment],
        budget: f64,
    ) -> anyhow::Result<Vec<Allocation>> {
        let mut candidates: Vec<&StockAssessment> = assessments
            .iter()
            .filter(|a| {
                matches!(
                    a.compliance.status,
                    ComplianceStatus::Pass | ComplianceStatus::Doubtful
                )
            })
            .collect();

        // Score descending, ticker ascending on ties, so identical
        // inputs always rank identically.
        candidates.sort_by(|a, b| {
            b.score
                .composite
                .partial_cmp(&a.score.composite)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.ticker.cmp(&b.ticker))
        });
        candidates.truncate(self.config.top_n);

        let ranked: Vec<Candidate> = candidates
            .iter()
            .map(|a| Candidate {
                ticker: a.ticker.clone(),
                company: a.company.clone(),
                price: a.price,
                score: a.score.composite,
                valuation: a.valuation,
            })
            .collect();

        self.allocation.allocate(&ranked, budget)
    }

    /// Full pipeline: compliance sweep, research on the survivors, then
    /// the score-weighted allocation plan.
    pub async fn run(&self, tickers: &[String]) -> anyhow::Result<ScreeningRun> {
        let screened = self.screen_universe(tickers).await;

        let survivors: Vec<String> = screened
            .reports
            .iter()
            .filter(|r| {
                matches!(r.status, ComplianceStatus::Pass | ComplianceStatus::Doubtful)
            })
            .map(|r| r.ticker.clone())
            .collect();

        tracing::info!("Researching {} compliant tickers", survivors.len());
        let assessments: Vec<StockAssessment> = self
            .research_universe(&survivors)
            .await
            .into_iter()
            .filter_map(|(_, outcome)| outcome.ok())
            .collect();

        let plan = self.build_allocation_plan(&assessments, self.config.budget)?;

        Ok(ScreeningRun {
            screened,
            assessments,
            plan,
            timestamp: Utc::now(),
        })
    }

    /// Convenience wrapper: resolve a universe provider, then run the
    /// full pipeline over its tickers.
    pub async fn run_universe(
        &self,
        universe: &dyn UniverseProvider,
    ) -> anyhow::Result<ScreeningRun> {
        let tickers = universe.tickers().await?;
        self.run(&tickers).await
    }
}
