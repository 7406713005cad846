// ABOUTME: Bounded-concurrency batch fetcher with cancel-on-first-error semantics
// ABOUTME: Fans requests out over tokio tasks gated by a semaphore and collects unordered results

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::{JoinError, JoinSet};

use crate::constants::fetch::DEFAULT_CONCURRENCY;

/// Shared flag tripped by the first failing worker of a batch.
///
/// Workers check it before starting each network call. Calls already in
/// flight are left to finish and their results are dropped.
#[derive(Debug, Clone, Default)]
pub struct Cancellation(Arc<AtomicBool>);

impl Cancellation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A remote record that can be fetched by identifier.
#[async_trait]
pub trait RecordSource: Send + Sync + 'static {
    type Output: Send + 'static;
    type Error: From<JoinError> + Send + 'static;

    /// Fetch one record. Multi-step implementations should consult
    /// `cancel` before each remote call.
    async fn fetch(&self, id: &str, cancel: &Cancellation) -> Result<Self::Output, Self::Error>;
}

/// Runs a batch of fetches with at most `limit` in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundedFetcher {
    limit: usize,
}

impl Default for BoundedFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_CONCURRENCY)
    }
}

impl BoundedFetcher {
    /// A limit of zero would never make progress and is raised to one.
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Fetch every id and return all records, or the first error.
    ///
    /// Results come back in completion order, not request order. On failure
    /// no further fetches start, and the call returns once every worker has
    /// finished or bailed out.
    pub async fn fetch_all<S, I>(&self, source: Arc<S>, ids: I) -> Result<Vec<S::Output>, S::Error>
    where
        S: RecordSource,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let total = ids.len();
        let limiter = Arc::new(Semaphore::new(self.limit));
        let cancel = Cancellation::new();
        let (result_tx, mut result_rx) = mpsc::channel(total);
        // Capacity one: the first failure is kept, later ones are dropped.
        let (failure_tx, mut failure_rx) = mpsc::channel::<S::Error>(1);

        log::debug!(
            "Fetching {} records with at most {} in flight",
            total,
            self.limit
        );

        let mut workers = JoinSet::new();
        for id in ids {
            let source = Arc::clone(&source);
            let limiter = Arc::clone(&limiter);
            let cancel = cancel.clone();
            let result_tx = result_tx.clone();
            let failure_tx = failure_tx.clone();

            workers.spawn(async move {
                // The limiter is closed once the batch has failed.
                let Ok(_permit) = Arc::clone(&limiter).acquire_owned().await else {
                    return;
                };
                if cancel.is_cancelled() {
                    return;
                }

                match source.fetch(&id, &cancel).await {
                    Ok(record) => {
                        let _ = result_tx.send(record).await;
                    }
                    Err(err) => {
                        if !cancel.is_cancelled() {
                            log::debug!("Fetch of {} failed, cancelling batch", id);
                        }
                        let _ = failure_tx.try_send(err);
                        cancel.cancel();
                        limiter.close();
                    }
                }
            });
        }
        drop(result_tx);

        while let Some(joined) = workers.join_next().await {
            if let Err(join_err) = joined {
                log::error!("Fetch worker aborted: {}", join_err);
                let _ = failure_tx.try_send(S::Error::from(join_err));
                cancel.cancel();
                limiter.close();
            }
        }
        drop(failure_tx);

        if let Ok(err) = failure_rx.try_recv() {
            return Err(err);
        }

        let mut records = Vec::with_capacity(total);
        while let Some(record) = result_rx.recv().await {
            records.push(record);
        }
        Ok(records)
    }
}
