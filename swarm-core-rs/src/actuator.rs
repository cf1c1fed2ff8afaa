//! Actuator seam for payload drops.
//!
//! Actuators consume entries drained from a `PayloadQueue`. The coordinator
//! only queues; it never calls an actuator.

use crate::types::QueuedPayload;
use tracing::info;

/// Performs (or simulates) a physical payload drop
pub trait Actuator {
    fn deliver(&mut self, payload: &QueuedPayload);
}

/// Mock actuator that records every delivery in order
#[derive(Debug, Default, Clone)]
pub struct RecordingActuator {
    delivered: Vec<QueuedPayload>,
}

impl RecordingActuator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delivered(&self) -> &[QueuedPayload] {
        &self.delivered
    }
}

impl Actuator for RecordingActuator {
    fn deliver(&mut self, payload: &QueuedPayload) {
        info!(
            "Actuator: Dropping {} pod at {} (id={})",
            payload.payload_type, payload.coord, payload.drop_id
        );
        self.delivered.push(payload.clone());
    }
}
