//! Last-write-wins publication of recomputed views
//!
//! Every change event takes a ticket from a monotonically increasing counter.
//! A finished computation is published only if its ticket is still the most
//! recently issued one, so a slow, superseded computation can never overwrite
//! a newer result. Subscribers observe publications through a `watch` channel.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use crate::error::{EngineError, EngineResult};

/// A published result and the ticket that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Publication<T> {
    pub ticket: u64,
    pub value: T,
}

/// What happened to a submitted computation
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Published(T),
    /// A newer event was issued while this one was computing
    Superseded { ticket: u64, latest: u64 },
}

impl<T> Outcome<T> {
    pub fn is_published(&self) -> bool {
        matches!(self, Outcome::Published(_))
    }
}

pub type PublicationReceiver<T> = watch::Receiver<Option<Arc<Publication<T>>>>;

pub struct LatestWins<T> {
    issued: AtomicU64,
    slot: watch::Sender<Option<Arc<Publication<T>>>>,
}

impl<T> LatestWins<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            issued: AtomicU64::new(0),
            slot,
        }
    }

    /// Take the next ticket; tickets start at 1
    pub fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Most recently issued ticket, 0 before the first event
    pub fn latest_issued(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        ticket == self.latest_issued()
    }

    /// Publish `value` if `ticket` is still current; returns whether it was published
    pub fn publish(&self, ticket: u64, value: T) -> bool {
        // The check runs under the channel lock so two publishers cannot interleave
        self.slot.send_if_modified(|slot| {
            if !self.is_current(ticket) {
                return false;
            }
            if slot.as_ref().is_some_and(|current| current.ticket >= ticket) {
                return false;
            }
            *slot = Some(Arc::new(Publication { ticket, value }));
            true
        })
    }

    pub fn latest(&self) -> Option<Arc<Publication<T>>> {
        self.slot.borrow().clone()
    }

    pub fn subscribe(&self) -> PublicationReceiver<T> {
        self.slot.subscribe()
    }

    /// Issue a ticket, run `compute` on the blocking pool, publish if still current
    ///
    /// An error from `compute` is returned as-is and publishes nothing.
    pub async fn submit<F>(&self, compute: F) -> EngineResult<Outcome<T>>
    where
        F: FnOnce() -> EngineResult<T> + Send + 'static,
    {
        let ticket = self.issue();
        self.submit_with_ticket(ticket, compute).await
    }

    /// Run `compute` for a ticket taken earlier with `issue`
    ///
    /// Callers that receive events in order issue tickets as events arrive and
    /// hand the computation to another task, so arrival order decides the
    /// winner rather than task scheduling.
    pub async fn submit_with_ticket<F>(&self, ticket: u64, compute: F) -> EngineResult<Outcome<T>>
    where
        F: FnOnce() -> EngineResult<T> + Send + 'static,
    {
        let value = tokio::task::spawn_blocking(compute)
            .await
            .map_err(|e| EngineError::TaskFailed { message: e.to_string() })??;

        if self.publish(ticket, value.clone()) {
            tracing::debug!(ticket, "Published recomputed view");
            Ok(Outcome::Published(value))
        } else {
            let latest = self.latest_issued();
            tracing::debug!(ticket, latest, "Dropped superseded recomputation");
            Ok(Outcome::Superseded { ticket, latest })
        }
    }
}

impl<T> Default for LatestWins<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for LatestWins<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LatestWins")
            .field("issued", &self.issued.load(Ordering::SeqCst))
            .finish()
    }
}
