use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
};

use chrono::{DateTime, Utc};
use tokio::sync::Notify;
use uuid::Uuid;

use crate::{errors::MatchmakingError, transport::PlayerEndpoint};

/// A player waiting to be paired. There is no explicit state field: a
/// participant is either in the pool, inside an in-flight pairing attempt,
/// or gone, and that is tracked entirely by pool membership.
pub struct Participant {
    pub token: Uuid,
    pub name: String,
    pub endpoint: Arc<dyn PlayerEndpoint>,
    pub enqueued_at: DateTime<Utc>,
}

impl Participant {
    pub fn new(name: String, endpoint: Arc<dyn PlayerEndpoint>) -> Arc<Self> {
        Arc::new(Self {
            token: Uuid::new_v4(),
            name,
            endpoint,
            enqueued_at: Utc::now(),
        })
    }
}

#[derive(Default)]
struct PoolInner {
    queue: VecDeque<Arc<Participant>>,
    by_token: HashMap<Uuid, Arc<Participant>>,
}

/// Shared waiting pool. The queue holds participants eligible for the next
/// pairing attempt in FIFO order; the token index additionally covers
/// participants whose attempt is currently in flight. Every structural
/// mutation happens under one mutex so concurrent registration,
/// cancellation and the matching loop cannot interleave partial updates.
#[derive(Default)]
pub struct WaitingPool {
    inner: Mutex<PoolInner>,
    arrivals: Notify,
}

impl WaitingPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit a new participant at the tail and wake the matching loop.
    /// Registering the same token twice is a caller bug.
    pub fn register(&self, participant: Arc<Participant>) {
        {
            let mut inner = self.inner.lock().unwrap();
            let previous = inner.by_token.insert(participant.token, participant.clone());
            debug_assert!(previous.is_none(), "token registered twice");
            inner.queue.push_back(participant);
        }
        self.arrivals.notify_one();
    }

    /// Atomically remove and return the two oldest participants, or `None`
    /// if fewer than two are waiting. The size check and both pops happen
    /// in one critical section so a concurrent cancellation can never split
    /// the pair. Index entries are retained while the attempt is in flight.
    pub fn dequeue_pair(&self) -> Option<(Arc<Participant>, Arc<Participant>)> {
        let mut inner = self.inner.lock().unwrap();
        if inner.queue.len() < 2 {
            return None;
        }
        let first = inner.queue.pop_front()?;
        let second = inner.queue.pop_front()?;
        Some((first, second))
    }

    /// Wait until a pair can be dequeued. Wakes on every arrival instead of
    /// spinning.
    pub async fn next_pair(&self) -> (Arc<Participant>, Arc<Participant>) {
        loop {
            let arrival = self.arrivals.notified();
            if let Some(pair) = self.dequeue_pair() {
                return pair;
            }
            arrival.await;
        }
    }

    /// Head-priority reinsertion for a participant bounced out of a failed
    /// pairing attempt; it already waited once and goes ahead of ordinary
    /// arrivals. Returns `false` without reinserting if the participant
    /// cancelled while the attempt was in flight.
    pub fn requeue_front(&self, participant: Arc<Participant>) -> bool {
        let reinserted = {
            let mut inner = self.inner.lock().unwrap();
            if inner.by_token.contains_key(&participant.token) {
                inner.queue.push_front(participant);
                true
            } else {
                false
            }
        };
        if reinserted {
            self.arrivals.notify_one();
        }
        reinserted
    }

    /// Cancellation path: remove a participant wherever it currently sits.
    pub fn remove_by_token(&self, token: Uuid) -> Result<Arc<Participant>, MatchmakingError> {
        let mut inner = self.inner.lock().unwrap();
        let participant = inner
            .by_token
            .remove(&token)
            .ok_or(MatchmakingError::UnknownToken(token))?;
        inner.queue.retain(|waiting| waiting.token != token);
        Ok(participant)
    }

    /// Drop the index entry of an in-flight participant that left the
    /// system (matched, declined, or failed verification). No-op if a
    /// concurrent cancellation already removed it.
    pub fn release(&self, token: Uuid) {
        let mut inner = self.inner.lock().unwrap();
        inner.by_token.remove(&token);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, token: Uuid) -> bool {
        self.inner.lock().unwrap().by_token.contains_key(&token)
    }
}
