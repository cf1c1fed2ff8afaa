//! Configuration for the coordinator
//!
//! Design constants of the escalation cascade and the coverage spiral.
//! Every field has a default, so a partial JSON object is a valid config.

use crate::coverage::check_golden_angle;
use crate::error::{Result, SwarmError};
use serde::{Deserialize, Serialize};

/// Agents sent to hone in on a locked ping
pub const DEFAULT_FOLLOW_UP_COUNT: usize = 3;

/// Convergence radius around the ping (meters)
pub const DEFAULT_FOLLOW_UP_RADIUS_M: f64 = 50.0;

/// Simulated dispatch delay for a queued drop
pub const DEFAULT_PAYLOAD_ETA_SECS: u64 = 30;

/// Incremental spiral angle; approximates the golden angle
pub const GOLDEN_ANGLE_DEG: f64 = 137.5;

/// Coordinator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    #[serde(default = "default_follow_up_count")]
    pub follow_up_count: usize,

    #[serde(default = "default_follow_up_radius_m")]
    pub follow_up_radius_m: f64,

    #[serde(default = "default_payload_eta_secs")]
    pub payload_eta_secs: u64,

    #[serde(default = "default_golden_angle_deg")]
    pub golden_angle_deg: f64,
}

fn default_follow_up_count() -> usize {
    DEFAULT_FOLLOW_UP_COUNT
}

fn default_follow_up_radius_m() -> f64 {
    DEFAULT_FOLLOW_UP_RADIUS_M
}

fn default_payload_eta_secs() -> u64 {
    DEFAULT_PAYLOAD_ETA_SECS
}

fn default_golden_angle_deg() -> f64 {
    GOLDEN_ANGLE_DEG
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            follow_up_count: DEFAULT_FOLLOW_UP_COUNT,
            follow_up_radius_m: DEFAULT_FOLLOW_UP_RADIUS_M,
            payload_eta_secs: DEFAULT_PAYLOAD_ETA_SECS,
            golden_angle_deg: GOLDEN_ANGLE_DEG,
        }
    }
}

impl CoordinatorConfig {
    /// Parse config from a JSON object; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set follow-up squad size
    pub fn with_follow_up_count(mut self, count: usize) -> Self {
        self.follow_up_count = count;
        self
    }

    /// Set follow-up convergence radius
    pub fn with_follow_up_radius(mut self, radius_m: f64) -> Self {
        self.follow_up_radius_m = radius_m;
        self
    }

    /// Set payload ETA
    pub fn with_payload_eta(mut self, eta_secs: u64) -> Self {
        self.payload_eta_secs = eta_secs;
        self
    }

    /// Set spiral angle increment
    pub fn with_golden_angle(mut self, degrees: f64) -> Self {
        self.golden_angle_deg = degrees;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.follow_up_count == 0 {
            return Err(SwarmError::invalid("follow_up_count must be at least 1"));
        }
        if !self.follow_up_radius_m.is_finite() || self.follow_up_radius_m <= 0.0 {
            return Err(SwarmError::invalid(format!(
                "follow_up_radius_m must be > 0, got {}",
                self.follow_up_radius_m
            )));
        }
        check_golden_angle(self.golden_angle_deg)
    }
}
