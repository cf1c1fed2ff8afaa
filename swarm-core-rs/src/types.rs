//! Core types for the swarm coordinator

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Index of an agent within a coverage pattern (0-based)
pub type AgentIndex = usize;

/// Planar 2D point.
///
/// Units are whatever the caller uses consistently: kilometers for coverage
/// planning, meters for ping coordinates. Nothing in the core converts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset this point by a polar displacement
    pub fn offset_polar(&self, radius: f64, angle_rad: f64) -> Self {
        Self {
            x: self.x + radius * angle_rad.cos(),
            y: self.y + radius * angle_rad.sin(),
        }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// One agent's assignment in a coverage pattern
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoveragePoint {
    pub agent: AgentIndex,
    pub coord: Coordinate,
}

/// Local hone-in squad sent to converge on a ping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FollowUp {
    pub center: Coordinate,
    pub radius_m: f64,
    pub count: usize,
}

/// Raw output of a sensor sweep.
///
/// Opaque to the coordinator; only a `PathExtractor` interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawScan {
    pub center: Coordinate,
    pub sensor_mode: String,
    pub point_count: usize,
    pub summary: String,
}

/// Label attached to a post-processed path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    SafeCorridor,
    AvoidZone,
}

impl std::fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SegmentKind::SafeCorridor => write!(f, "safe corridor"),
            SegmentKind::AvoidZone => write!(f, "avoid zone"),
        }
    }
}

/// Presentation-ready path segment for a downstream renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledSegment {
    pub kind: SegmentKind,
    pub description: String,
}

impl LabeledSegment {
    pub fn safe(description: impl Into<String>) -> Self {
        Self {
            kind: SegmentKind::SafeCorridor,
            description: description.into(),
        }
    }

    pub fn avoid(description: impl Into<String>) -> Self {
        Self {
            kind: SegmentKind::AvoidZone,
            description: description.into(),
        }
    }
}

/// Pending payload drop awaiting an actuator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedPayload {
    /// Unique per entry; duplicate drops at one coordinate stay distinguishable
    pub drop_id: String,
    pub coord: Coordinate,
    pub payload_type: String,
    pub eta_secs: u64,
    /// Unix timestamp (seconds) when queued
    pub queued_at: u64,
}

/// Outcome tag of a processed ping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PingStatus {
    Locked,
    BelowThreshold,
}

impl std::fmt::Display for PingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PingStatus::Locked => write!(f, "locked"),
            PingStatus::BelowThreshold => write!(f, "below_threshold"),
        }
    }
}

/// Result of running one ping through the escalation cascade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PingResult {
    /// Signature exceeded the mode threshold and the full cascade ran
    Locked {
        coords: Coordinate,
        follow_up: FollowUp,
        paths: Vec<LabeledSegment>,
        payload: QueuedPayload,
    },

    /// Signature at or below threshold; nothing was dispatched
    BelowThreshold {
        heat_signature: f64,
        threshold: f64,
    },
}

impl PingResult {
    pub fn status(&self) -> PingStatus {
        match self {
            PingResult::Locked { .. } => PingStatus::Locked,
            PingResult::BelowThreshold { .. } => PingStatus::BelowThreshold,
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, PingResult::Locked { .. })
    }

    /// Number of follow-up agents dispatched (0 when below threshold)
    pub fn follow_up_count(&self) -> usize {
        match self {
            PingResult::Locked { follow_up, .. } => follow_up.count,
            PingResult::BelowThreshold { .. } => 0,
        }
    }

    pub fn paths(&self) -> &[LabeledSegment] {
        match self {
            PingResult::Locked { paths, .. } => paths,
            PingResult::BelowThreshold { .. } => &[],
        }
    }

    /// Serialize result to JSON bytes
    pub fn to_bytes(&self) -> std::result::Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

/// Current Unix timestamp in seconds
pub fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
