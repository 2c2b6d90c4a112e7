//! Quote supply with bounded retry and fallback.
//!
//! Wraps [`QuoteSource`] calls in the retry policy: each attempt fetches a
//! payload (under a defensive timeout), runs it through the domain validator,
//! and counts transport errors and under-threshold results alike as failed
//! attempts. Exhausting the bound never fails the caller — batch mode yields
//! an empty pool for the caller to surface, single mode yields the fixed
//! fallback quote so the game always has something to display.

use crate::config::SupplyParams;
use crate::ports::quote_source::{QuoteSource, SourceError};
use botlines_domain::quote::parser::{parse_quote_batch, parse_quote_single};
use botlines_domain::util::truncate_str;
use botlines_domain::{Personalization, Quote, QuotePool, RecentHistory};
use std::sync::Arc;
use tracing::{debug, warn};

/// Retry-bounded quote supplier
pub struct QuoteSupplier {
    source: Arc<dyn QuoteSource>,
    params: SupplyParams,
}

impl QuoteSupplier {
    pub fn new(source: Arc<dyn QuoteSource>, params: SupplyParams) -> Self {
        Self { source, params }
    }

    /// Obtain a quote pool for a batch-mode run.
    ///
    /// Up to `batch_attempts` tries; a batch is usable once it yields at
    /// least `acceptance_threshold` valid quotes. Exhaustion returns an empty
    /// pool — the caller surfaces "no quotes available" and the session stays
    /// idle.
    pub async fn obtain_pool(&self, personalization: &Personalization) -> QuotePool {
        for attempt in 1..=self.params.batch_attempts {
            match self.fetch_batch_raw(personalization).await {
                Ok(raw) => {
                    debug!(
                        source = self.source.name(),
                        attempt,
                        payload = truncate_str(&raw, 200),
                        "Received batch payload"
                    );
                    let mut quotes = parse_quote_batch(&raw);
                    if quotes.len() >= self.params.acceptance_threshold {
                        quotes.truncate(self.params.batch_size);
                        debug!(accepted = quotes.len(), "Batch accepted");
                        return QuotePool::new(quotes);
                    }
                    warn!(
                        source = self.source.name(),
                        attempt,
                        accepted = quotes.len(),
                        threshold = self.params.acceptance_threshold,
                        "Batch below acceptance threshold"
                    );
                }
                Err(e) => {
                    warn!(
                        source = self.source.name(),
                        attempt,
                        error = %e,
                        "Batch fetch failed"
                    );
                }
            }
        }
        warn!(
            source = self.source.name(),
            attempts = self.params.batch_attempts,
            "Batch attempts exhausted; no quotes available"
        );
        QuotePool::default()
    }

    /// Obtain one quote for a single-fetch run.
    ///
    /// Up to `single_attempts` tries; candidates matching a recently served
    /// text are rejected and re-fetched. Exhaustion returns the deterministic
    /// fallback quote (origin AI) rather than failing the caller.
    pub async fn obtain_one(
        &self,
        personalization: &Personalization,
        recent: &RecentHistory,
    ) -> Quote {
        for attempt in 1..=self.params.single_attempts {
            match self.fetch_one_raw(personalization).await {
                Ok(raw) => match parse_quote_single(&raw) {
                    Some(quote) if recent.contains(quote.text()) => {
                        warn!(
                            source = self.source.name(),
                            attempt,
                            "Duplicate quote rejected; refetching"
                        );
                    }
                    Some(quote) => {
                        debug!(source = self.source.name(), attempt, "Quote accepted");
                        return quote;
                    }
                    None => {
                        warn!(
                            source = self.source.name(),
                            attempt,
                            payload = truncate_str(&raw, 200),
                            "No valid quote in payload"
                        );
                    }
                },
                Err(e) => {
                    warn!(
                        source = self.source.name(),
                        attempt,
                        error = %e,
                        "Single fetch failed"
                    );
                }
            }
        }
        warn!(
            source = self.source.name(),
            attempts = self.params.single_attempts,
            "Single-fetch attempts exhausted; serving fallback quote"
        );
        Quote::fallback()
    }

    async fn fetch_batch_raw(
        &self,
        personalization: &Personalization,
    ) -> Result<String, SourceError> {
        tokio::time::timeout(
            self.params.request_timeout,
            self.source.fetch_batch(personalization, self.params.batch_size),
        )
        .await
        .unwrap_or(Err(SourceError::Timeout))
    }

    async fn fetch_one_raw(
        &self,
        personalization: &Personalization,
    ) -> Result<String, SourceError> {
        tokio::time::timeout(
            self.params.request_timeout,
            self.source.fetch_one(personalization),
        )
        .await
        .unwrap_or(Err(SourceError::Timeout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameParams;
    use async_trait::async_trait;
    use botlines_domain::Origin;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Scripted source: pops one pre-canned response per call, recording the
    /// call count. Exhausted scripts report a connection error.
    struct ScriptedSource {
        responses: Mutex<VecDeque<Result<String, SourceError>>>,
        calls: Mutex<u32>,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Result<String, SourceError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: Mutex::new(0),
            }
        }

        fn call_count(&self) -> u32 {
            *self.calls.lock().unwrap()
        }

        fn next_response(&self) -> Result<String, SourceError> {
            *self.calls.lock().unwrap() += 1;
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(SourceError::Connection("script exhausted".into())))
        }
    }

    #[async_trait]
    impl QuoteSource for ScriptedSource {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn fetch_batch(
            &self,
            _personalization: &Personalization,
            _count: usize,
        ) -> Result<String, SourceError> {
            self.next_response()
        }

        async fn fetch_one(
            &self,
            _personalization: &Personalization,
        ) -> Result<String, SourceError> {
            self.next_response()
        }
    }

    fn valid_batch(count: usize) -> String {
        let records: Vec<String> = (0..count)
            .map(|i| format!(r#"{{"quote": "Batch quote {}", "source": "AI"}}"#, i))
            .collect();
        format!("[{}]", records.join(","))
    }

    fn single_record(text: &str) -> String {
        format!(r#"{{"quote": "{}", "source": "Human", "author": "none"}}"#, text)
    }

    fn supplier(source: Arc<ScriptedSource>) -> QuoteSupplier {
        QuoteSupplier::new(source, SupplyParams::default())
    }

    #[tokio::test]
    async fn test_pool_succeeds_on_third_attempt() {
        let source = Arc::new(ScriptedSource::new(vec![
            Err(SourceError::Connection("down".into())),
            Ok("no json here, sorry".into()),
            Ok(valid_batch(5)),
        ]));
        let pool = supplier(source.clone())
            .obtain_pool(&Personalization::default())
            .await;

        assert_eq!(source.call_count(), 3);
        assert_eq!(pool.len(), 5);
        assert_eq!(pool.get(0).unwrap().text(), "Batch quote 0");
    }

    #[tokio::test]
    async fn test_pool_below_threshold_counts_as_failure() {
        let source = Arc::new(ScriptedSource::new(vec![
            Ok(valid_batch(2)), // below threshold of 3
            Ok(valid_batch(3)),
        ]));
        let pool = supplier(source.clone())
            .obtain_pool(&Personalization::default())
            .await;

        assert_eq!(source.call_count(), 2);
        assert_eq!(pool.len(), 3);
    }

    #[tokio::test]
    async fn test_pool_exhaustion_yields_empty_pool() {
        let source = Arc::new(ScriptedSource::new(vec![]));
        let pool = supplier(source.clone())
            .obtain_pool(&Personalization::default())
            .await;

        assert_eq!(source.call_count(), 3);
        assert!(pool.is_empty());
    }

    #[tokio::test]
    async fn test_pool_truncated_to_batch_size() {
        let source = Arc::new(ScriptedSource::new(vec![Ok(valid_batch(10))]));
        let mut params = SupplyParams::default();
        params.batch_size = 4;
        let pool = QuoteSupplier::new(source, params)
            .obtain_pool(&Personalization::default())
            .await;
        assert_eq!(pool.len(), 4);
    }

    #[tokio::test]
    async fn test_pool_accepts_batch_smaller_than_default_threshold() {
        // A source that honors a small batch_size returns fewer quotes than
        // the default threshold; normalization keeps that a success
        let source = Arc::new(ScriptedSource::new(vec![Ok(valid_batch(2))]));
        let mut params = GameParams::default();
        params.supply.batch_size = 2;
        let params = params.normalized();

        let pool = QuoteSupplier::new(source.clone(), params.supply)
            .obtain_pool(&Personalization::default())
            .await;

        assert_eq!(source.call_count(), 1);
        assert_eq!(pool.len(), 2);
    }

    /// Never resolves; only the timeout wrap gets these attempts unstuck.
    struct HangingSource {
        calls: Mutex<u32>,
    }

    impl HangingSource {
        fn new() -> Self {
            Self {
                calls: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl QuoteSource for HangingSource {
        fn name(&self) -> &str {
            "hanging"
        }

        async fn fetch_batch(
            &self,
            _personalization: &Personalization,
            _count: usize,
        ) -> Result<String, SourceError> {
            *self.calls.lock().unwrap() += 1;
            std::future::pending().await
        }

        async fn fetch_one(
            &self,
            _personalization: &Personalization,
        ) -> Result<String, SourceError> {
            *self.calls.lock().unwrap() += 1;
            std::future::pending().await
        }
    }

    fn hanging_params() -> SupplyParams {
        SupplyParams {
            request_timeout: Duration::from_millis(20),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_pool_timeout_counts_as_failed_attempt() {
        let source = Arc::new(HangingSource::new());
        let pool = QuoteSupplier::new(source.clone(), hanging_params())
            .obtain_pool(&Personalization::default())
            .await;

        assert_eq!(*source.calls.lock().unwrap(), 3);
        assert!(pool.is_empty());
    }

    #[tokio::test]
    async fn test_one_timeout_exhaustion_yields_fallback() {
        let source = Arc::new(HangingSource::new());
        let quote = QuoteSupplier::new(source.clone(), hanging_params())
            .obtain_one(&Personalization::default(), &RecentHistory::new())
            .await;

        assert_eq!(*source.calls.lock().unwrap(), 5);
        assert_eq!(quote, Quote::fallback());
    }

    #[tokio::test]
    async fn test_one_succeeds_first_try() {
        let source = Arc::new(ScriptedSource::new(vec![Ok(single_record("Fresh"))]));
        let quote = supplier(source)
            .obtain_one(&Personalization::default(), &RecentHistory::new())
            .await;
        assert_eq!(quote.text(), "Fresh");
        assert_eq!(quote.origin(), Origin::Human);
    }

    #[tokio::test]
    async fn test_one_rejects_recent_duplicate_and_refetches() {
        let source = Arc::new(ScriptedSource::new(vec![
            Ok(single_record("Already seen")),
            Ok(single_record("Brand new")),
        ]));
        let mut recent = RecentHistory::new();
        recent.record("Already seen");

        let quote = supplier(source.clone())
            .obtain_one(&Personalization::default(), &recent)
            .await;

        assert_eq!(source.call_count(), 2);
        assert_eq!(quote.text(), "Brand new");
    }

    #[tokio::test]
    async fn test_one_exhaustion_yields_ai_fallback() {
        let source = Arc::new(ScriptedSource::new(vec![]));
        let quote = supplier(source.clone())
            .obtain_one(&Personalization::default(), &RecentHistory::new())
            .await;

        assert_eq!(source.call_count(), 5);
        assert_eq!(quote, Quote::fallback());
        assert_eq!(quote.origin(), Origin::Ai);
    }

    #[tokio::test]
    async fn test_one_all_duplicates_yields_fallback() {
        let responses = (0..5).map(|_| Ok(single_record("Same old"))).collect();
        let source = Arc::new(ScriptedSource::new(responses));
        let mut recent = RecentHistory::new();
        recent.record("Same old");

        let quote = supplier(source.clone())
            .obtain_one(&Personalization::default(), &recent)
            .await;

        assert_eq!(source.call_count(), 5);
        assert_eq!(quote, Quote::fallback());
    }
}
