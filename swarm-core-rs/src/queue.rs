//! Pending payload-drop ledger.
//!
//! Append-only from the coordinator side; cleared only by an explicit
//! drain from the actuator side. Handles are cheap clones sharing one
//! underlying queue, so the drain can happen on another thread.

use crate::actuator::Actuator;
use crate::types::{unix_timestamp, Coordinate, QueuedPayload};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Shared payload queue
#[derive(Debug, Clone, Default)]
pub struct PayloadQueue {
    entries: Arc<Mutex<Vec<QueuedPayload>>>,
}

impl PayloadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a drop and return the queued entry
    pub fn push(&self, coord: Coordinate, payload_type: &str, eta_secs: u64) -> QueuedPayload {
        let entry = QueuedPayload {
            drop_id: Uuid::new_v4().to_string(),
            coord,
            payload_type: payload_type.to_string(),
            eta_secs,
            queued_at: unix_timestamp(),
        };

        self.entries.lock().push(entry.clone());
        info!(
            "PayloadQueue: Queuing {} pod to {} | ETA: {}s",
            payload_type, coord, eta_secs
        );
        entry
    }

    /// Take every pending entry, oldest first
    pub fn drain(&self) -> Vec<QueuedPayload> {
        let drained = std::mem::take(&mut *self.entries.lock());
        debug!("PayloadQueue: Drained {} entries", drained.len());
        drained
    }

    /// Drain and hand each entry to an actuator; returns how many were delivered
    pub fn drain_into(&self, actuator: &mut dyn Actuator) -> usize {
        let drained = self.drain();
        for payload in &drained {
            actuator.deliver(payload);
        }
        drained.len()
    }

    /// Copy of pending entries without clearing them
    pub fn snapshot(&self) -> Vec<QueuedPayload> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
