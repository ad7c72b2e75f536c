// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Progress hub: retained per-job sessions plus per-owner fan-out.
//!
//! Sessions live in a fixed set of shards keyed by job id so concurrent jobs
//! rarely contend on the same lock. Every mutation updates the retained
//! session and broadcasts the resulting event to the owner's subscribers
//! while the shard lock is held, so events for one job go out in the order
//! they were applied.
//!
//! A terminal session stays pollable for a retention window. Each terminal
//! call schedules its own eviction timer; a generation counter keeps a stale
//! timer from evicting a session that was restarted in the meantime.

use fl_core::{Clock, JobId, OwnerId, ProgressEvent, ProgressSession, Stage, TransitionError};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::hash_map::RandomState;
use std::collections::HashMap;
use std::hash::BuildHasher;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::broadcast;
use tokio::time::Instant;

const SHARD_COUNT: usize = 16;

/// Events buffered per owner before slow subscribers start lagging
const OWNER_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("no progress session for {0}")]
    UnknownJob(JobId),

    #[error("progress session for {0} already finished")]
    Finished(JobId),

    #[error(transparent)]
    Transition(#[from] TransitionError),
}

/// Retention windows for terminal sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Retention {
    pub completed: Duration,
    pub failed: Duration,
}

impl Default for Retention {
    fn default() -> Self {
        Self { completed: Duration::from_secs(300), failed: Duration::from_secs(60) }
    }
}

struct Slot {
    session: ProgressSession,
    generation: u64,
    expires_at: Option<Instant>,
}

impl Slot {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

type Shard = Mutex<HashMap<JobId, Slot>>;

struct HubInner<C: Clock> {
    shards: Vec<Shard>,
    owners: Mutex<HashMap<OwnerId, broadcast::Sender<ProgressEvent>>>,
    hasher: RandomState,
    generation: AtomicU64,
    retention: Retention,
    clock: C,
}

/// Cheaply cloneable handle to the shared registry
pub struct ProgressHub<C: Clock> {
    inner: Arc<HubInner<C>>,
}

impl<C: Clock> Clone for ProgressHub<C> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<C: Clock> ProgressHub<C> {
    pub fn new(retention: Retention, clock: C) -> Self {
        Self {
            inner: Arc::new(HubInner {
                shards: (0..SHARD_COUNT).map(|_| Mutex::new(HashMap::new())).collect(),
                owners: Mutex::new(HashMap::new()),
                hasher: RandomState::new(),
                generation: AtomicU64::new(0),
                retention,
                clock,
            }),
        }
    }

    /// Open (or reset) the session for a job and announce it.
    pub fn start_session(&self, job_id: &JobId, owner_id: &OwnerId) -> ProgressEvent {
        let session = ProgressSession::new(job_id.clone(), owner_id.clone(), self.inner.clock.epoch_ms());
        let event = session.to_event();
        let generation = self.inner.generation.fetch_add(1, Ordering::Relaxed);

        let mut shard = self.inner.shard(job_id).lock();
        shard.insert(job_id.clone(), Slot { session, generation, expires_at: None });
        self.inner.publish(&event);
        event
    }

    /// Record intermediate progress for a non-terminal stage.
    ///
    /// The percent never goes down; a lower value keeps the previous one.
    pub fn update(
        &self,
        job_id: &JobId,
        stage: Stage,
        percent: u8,
        message: impl Into<String>,
        payload: Value,
    ) -> Result<ProgressEvent, ProgressError> {
        let message = message.into();
        let (event, _) = self.mutate(job_id, |session| {
            if stage.is_terminal() {
                return Err(TransitionError { from: session.stage, to: stage }.into());
            }
            session.stage.check_transition(stage)?;
            session.stage = stage;
            session.percent = session.percent.max(percent.min(100));
            session.message = message;
            session.payload = payload;
            Ok(())
        })?;
        Ok(event)
    }

    /// Mark the job completed and schedule eviction after the completed window.
    pub fn complete(&self, job_id: &JobId, payload: Value) -> Result<ProgressEvent, ProgressError> {
        let (event, generation) = self.mutate(job_id, |session| {
            session.stage = Stage::Completed;
            session.percent = 100;
            session.message = Stage::Completed.status_message().to_string();
            session.payload = payload;
            session.completed = true;
            Ok(())
        })?;
        self.schedule_eviction(job_id, generation, self.inner.retention.completed);
        Ok(event)
    }

    /// Mark the job failed and schedule eviction after the failed window.
    ///
    /// The percent reached so far is kept.
    pub fn fail(
        &self,
        job_id: &JobId,
        message: impl Into<String>,
        payload: Value,
    ) -> Result<ProgressEvent, ProgressError> {
        let message = message.into();
        let (event, generation) = self.mutate(job_id, |session| {
            session.stage = Stage::Failed;
            session.message = message;
            session.payload = payload;
            session.has_error = true;
            Ok(())
        })?;
        self.schedule_eviction(job_id, generation, self.inner.retention.failed);
        Ok(event)
    }

    /// Last known state of a job, or `None` once evicted.
    pub fn snapshot(&self, job_id: &JobId) -> Option<ProgressSession> {
        let mut shard = self.inner.shard(job_id).lock();
        if shard.get(job_id)?.is_expired(Instant::now()) {
            shard.remove(job_id);
            return None;
        }
        shard.get(job_id).map(|slot| slot.session.clone())
    }

    /// Stream of every event for jobs owned by `owner_id`, from now on.
    ///
    /// Channels left without receivers by earlier subscribers are dropped
    /// here as well as on publish.
    pub fn subscribe(&self, owner_id: &OwnerId) -> Subscription {
        let mut owners = self.inner.owners.lock();
        owners.retain(|_, tx| tx.receiver_count() > 0);
        let rx = match owners.get(owner_id) {
            Some(tx) => tx.subscribe(),
            None => {
                let (tx, rx) = broadcast::channel(OWNER_CHANNEL_CAPACITY);
                owners.insert(owner_id.clone(), tx);
                rx
            }
        };
        Subscription { owner_id: owner_id.clone(), rx }
    }

    /// Number of owners with a live broadcast channel.
    pub fn owner_channel_count(&self) -> usize {
        self.inner.owners.lock().len()
    }

    /// Number of retained sessions, expired ones included until swept.
    pub fn session_count(&self) -> usize {
        self.inner.shards.iter().map(|shard| shard.lock().len()).sum()
    }

    fn mutate(
        &self,
        job_id: &JobId,
        apply: impl FnOnce(&mut ProgressSession) -> Result<(), ProgressError>,
    ) -> Result<(ProgressEvent, u64), ProgressError> {
        let now_ms = self.inner.clock.epoch_ms();
        let mut shard = self.inner.shard(job_id).lock();
        let slot = match shard.get_mut(job_id) {
            Some(slot) if !slot.is_expired(Instant::now()) => slot,
            _ => return Err(ProgressError::UnknownJob(job_id.clone())),
        };
        if slot.session.is_terminal() {
            return Err(ProgressError::Finished(job_id.clone()));
        }

        apply(&mut slot.session)?;
        slot.session.last_update_ms = now_ms;
        let event = slot.session.to_event();
        let generation = slot.generation;
        self.inner.publish(&event);
        Ok((event, generation))
    }

    fn schedule_eviction(&self, job_id: &JobId, generation: u64, after: Duration) {
        let deadline = Instant::now() + after;
        {
            let mut shard = self.inner.shard(job_id).lock();
            match shard.get_mut(job_id) {
                Some(slot) if slot.generation == generation => slot.expires_at = Some(deadline),
                _ => return,
            }
        }

        // Without a runtime the deadline still hides the session from
        // `snapshot`; the timer only reclaims memory.
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::debug!(job_id = %job_id, "no runtime, eviction left to the next snapshot");
            return;
        };
        let weak: Weak<HubInner<C>> = Arc::downgrade(&self.inner);
        let job_id = job_id.clone();
        handle.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if let Some(inner) = weak.upgrade() {
                inner.evict(&job_id, generation);
            }
        });
    }
}

impl<C: Clock> HubInner<C> {
    fn shard(&self, job_id: &JobId) -> &Shard {
        let index = (self.hasher.hash_one(job_id) as usize) % self.shards.len();
        &self.shards[index]
    }

    fn publish(&self, event: &ProgressEvent) {
        let mut owners = self.owners.lock();
        if let Some(tx) = owners.get(&event.owner_id) {
            // Only fails when nobody is listening any more
            if tx.send(event.clone()).is_err() {
                owners.remove(&event.owner_id);
            }
        }
    }

    fn evict(&self, job_id: &JobId, generation: u64) {
        let mut shard = self.shard(job_id).lock();
        if shard.get(job_id).is_some_and(|slot| slot.generation == generation) {
            shard.remove(job_id);
            tracing::debug!(job_id = %job_id, "progress session evicted");
        }
    }
}

/// Live progress feed for one owner
pub struct Subscription {
    owner_id: OwnerId,
    rx: broadcast::Receiver<ProgressEvent>,
}

impl Subscription {
    pub fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }

    /// Next event, skipping over anything dropped while this subscriber lagged.
    ///
    /// Returns `None` once the hub is gone.
    pub async fn recv(&mut self) -> Option<ProgressEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(owner = %self.owner_id, skipped, "progress subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Next already-published event, if any.
    pub fn try_recv(&mut self) -> Option<ProgressEvent> {
        loop {
            match self.rx.try_recv() {
                Ok(event) => return Some(event),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(owner = %self.owner_id, skipped, "progress subscriber lagged");
                }
                Err(_) => return None,
            }
        }
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
