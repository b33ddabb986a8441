// Request coalescing
//
// Deduplicates concurrent fetches for the same cache key:
// - First caller (leader): goes to the network, writes the cache, then drops its guard
// - Later callers (followers): wait for the leader, then re-read the cache
//
// The leader marks its guard once the cache holds its answer, and followers
// serve that entry even when it is already stale. A follower released by a
// leader that stored nothing fetches on its own.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::watch;

use crate::cache::CacheKey;
use crate::transport::CancelToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Progress {
    InFlight,
    Done { stored: bool },
}

/// Tracks in-flight fetches by cache key
#[derive(Debug, Clone, Default)]
pub struct RequestCoalescer {
    /// key -> progress of the leader's fetch
    in_flight: Arc<Mutex<HashMap<CacheKey, watch::Sender<Progress>>>>,
}

impl RequestCoalescer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire a coalescing slot for a fetch
    ///
    /// Returns `CoalescingSlot::Leader` if no fetch for `key` is in flight.
    /// Otherwise waits for the in-flight fetch to finish and returns
    /// `CoalescingSlot::Follower`, or `CoalescingSlot::Cancelled` as soon as
    /// `cancel` fires.
    pub async fn acquire(&self, key: &CacheKey, cancel: Option<&CancelToken>) -> CoalescingSlot {
        let mut rx = {
            let mut in_flight = self.in_flight.lock();
            match in_flight.get(key) {
                Some(sender) => sender.subscribe(),
                None => {
                    let (tx, _rx) = watch::channel(Progress::InFlight);
                    in_flight.insert(key.clone(), tx);
                    return CoalescingSlot::Leader(LeaderGuard {
                        key: key.clone(),
                        coalescer: self.clone(),
                        stored: false,
                    });
                }
            }
        };

        let finished = async {
            // An error means the sender is gone, which also ends the wait
            match rx.wait_for(|&progress| progress != Progress::InFlight).await {
                Ok(progress) => *progress == Progress::Done { stored: true },
                Err(_) => false,
            }
        };

        let leader_stored = match cancel {
            Some(token) => tokio::select! {
                stored = finished => stored,
                _ = token.cancelled() => return CoalescingSlot::Cancelled,
            },
            None => finished.await,
        };
        CoalescingSlot::Follower { leader_stored }
    }

    /// Number of keys with a fetch in flight
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.lock().len()
    }

    fn complete(&self, key: &CacheKey, stored: bool) {
        if let Some(sender) = self.in_flight.lock().remove(key) {
            sender.send_replace(Progress::Done { stored });
        }
    }
}

/// Result of acquiring a coalescing slot
#[derive(Debug)]
pub enum CoalescingSlot {
    /// First caller for the key; followers are released when the guard drops
    Leader(LeaderGuard),

    /// A leader for the key has finished; `leader_stored` is set when the
    /// cache holds its answer
    Follower { leader_stored: bool },

    /// The caller cancelled while waiting for the leader
    Cancelled,
}

impl CoalescingSlot {
    pub fn is_leader(&self) -> bool {
        matches!(self, CoalescingSlot::Leader(_))
    }

    pub fn is_follower(&self) -> bool {
        matches!(self, CoalescingSlot::Follower { .. })
    }
}

/// Guard held by the leader; dropping it releases every follower
#[derive(Debug)]
pub struct LeaderGuard {
    key: CacheKey,
    coalescer: RequestCoalescer,
    stored: bool,
}

impl LeaderGuard {
    /// Record that the cache now holds this fetch's answer
    pub fn mark_stored(&mut self) {
        self.stored = true;
    }
}

impl Drop for LeaderGuard {
    fn drop(&mut self) {
        self.coalescer.complete(&self.key, self.stored);
    }
}
