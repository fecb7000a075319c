//! Generation-counted store for the latest published forecast collection.

use crate::types::canonical::CanonicalLocationSeries;
use crate::types::provider::ProviderKind;
use chrono::{DateTime, Utc};
use log::{info, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Handed out when a fetch cycle starts. Later tickets always carry a higher
/// generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CycleTicket {
    generation: u64,
}

impl CycleTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// The immutable result of one fetch cycle.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub generation: u64,
    pub provider: ProviderKind,
    pub fetched_at: DateTime<Utc>,
    pub series: Arc<[CanonicalLocationSeries]>,
}

/// Holds the newest published [`Snapshot`].
///
/// A cycle that finishes after a newer cycle has already published is
/// rejected, so network completion order never decides what is displayed.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    issued: AtomicU64,
    current: RwLock<Option<Arc<Snapshot>>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new cycle.
    pub fn begin(&self) -> CycleTicket {
        CycleTicket {
            generation: self.issued.fetch_add(1, Ordering::SeqCst) + 1,
        }
    }

    /// Publishes the result of `ticket`'s cycle. Returns `false`, leaving the
    /// store unchanged, when a cycle started later has already published.
    pub async fn publish(
        &self,
        ticket: CycleTicket,
        provider: ProviderKind,
        fetched_at: DateTime<Utc>,
        series: Vec<CanonicalLocationSeries>,
    ) -> bool {
        let mut current = self.current.write().await;
        if let Some(existing) = current.as_ref() {
            if existing.generation >= ticket.generation {
                warn!(
                    "Discarding {} results of cycle {}: cycle {} already published",
                    provider, ticket.generation, existing.generation
                );
                return false;
            }
        }
        info!(
            "Publishing cycle {} from {} with {} location(s)",
            ticket.generation,
            provider,
            series.len()
        );
        *current = Some(Arc::new(Snapshot {
            generation: ticket.generation,
            provider,
            fetched_at,
            series: series.into(),
        }));
        true
    }

    pub async fn latest(&self) -> Option<Arc<Snapshot>> {
        self.current.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_tickets_increase() {
        let store = SnapshotStore::new();
        let first = store.begin();
        let second = store.begin();
        assert!(second > first);
        assert_eq!(first.generation(), 1);
    }

    #[tokio::test]
    async fn test_stale_cycle_never_overwrites_newer() {
        let store = SnapshotStore::new();
        let slow = store.begin();
        let fast = store.begin();

        assert!(store.publish(fast, ProviderKind::OpenMeteo, now(), Vec::new()).await);
        assert!(!store.publish(slow, ProviderKind::TomorrowIo, now(), Vec::new()).await);

        let latest = store.latest().await.unwrap();
        assert_eq!(latest.generation, fast.generation());
        assert_eq!(latest.provider, ProviderKind::OpenMeteo);
    }

    #[tokio::test]
    async fn test_in_order_cycles_replace_each_other() {
        let store = SnapshotStore::new();
        assert!(store.latest().await.is_none());
        for provider in ProviderKind::ALL {
            let ticket = store.begin();
            assert!(store.publish(ticket, provider, now(), Vec::new()).await);
        }
        let latest = store.latest().await.unwrap();
        assert_eq!(latest.provider, ProviderKind::OpenWeather);
        assert_eq!(latest.generation, 3);
    }
}
