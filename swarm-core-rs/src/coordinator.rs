//! Mode-bound swarm coordinator.
//!
//! Implements:
//! - Golden-angle coverage patterns for N agents
//! - Ping escalation: threshold test, follow-up dispatch, sensor sweep,
//!   path post-processing, payload queuing
//!
//! A ping either runs the whole cascade or leaves no trace; the payload
//! queue is the only state that outlives a call.

use crate::config::CoordinatorConfig;
use crate::coverage::golden_spiral;
use crate::error::{Result, SwarmError};
use crate::modes::{ModeProfile, ModeRegistry};
use crate::queue::PayloadQueue;
use crate::sensor::{EdgeDetectExtractor, MockLidar, PathExtractor, SensorService};
use crate::types::{Coordinate, CoveragePoint, FollowUp, PingResult, QueuedPayload};
use tracing::{debug, info};

/// Swarm coordinator bound to one emergency mode
pub struct Coordinator {
    mode_name: String,
    profile: ModeProfile,
    config: CoordinatorConfig,
    sensor: Box<dyn SensorService>,
    extractor: Box<dyn PathExtractor>,
    queue: PayloadQueue,
}

impl Coordinator {
    /// Coordinator for a built-in mode with default config and mock collaborators
    pub fn new(mode: &str) -> Result<Self> {
        CoordinatorBuilder::new(mode).build()
    }

    pub fn builder(mode: &str) -> CoordinatorBuilder {
        CoordinatorBuilder::new(mode)
    }

    pub fn mode_name(&self) -> &str {
        &self.mode_name
    }

    pub fn profile(&self) -> &ModeProfile {
        &self.profile
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    /// Compute the coverage pattern for `agent_count` agents.
    ///
    /// Pure given its inputs; each point is also logged with the sensor mode.
    pub fn compute_coverage(
        &self,
        origin: Coordinate,
        radius_km: f64,
        agent_count: usize,
    ) -> Result<Vec<CoveragePoint>> {
        let points = golden_spiral(
            origin,
            radius_km,
            agent_count,
            self.profile.tightness(),
            self.config.golden_angle_deg,
        )?;

        for point in &points {
            info!(
                "Coordinator: Deploying spotter {} to {} | Sensor: {}",
                point.agent + 1,
                point.coord,
                self.profile.sensor_mode
            );
        }

        Ok(points)
    }

    /// Run one thermal ping through the escalation cascade
    pub fn handle_ping(&self, coords: Coordinate, heat_signature: f64) -> Result<PingResult> {
        if !heat_signature.is_finite() || !(0.0..=1.0).contains(&heat_signature) {
            return Err(SwarmError::invalid(format!(
                "heat_signature must be in [0, 1], got {}",
                heat_signature
            )));
        }
        if !coords.is_finite() {
            return Err(SwarmError::invalid(format!(
                "ping coordinates must be finite, got {:?}",
                coords
            )));
        }

        let threshold = self.profile.thermal_threshold;
        if heat_signature <= threshold {
            debug!(
                "Coordinator: Ping at {} below threshold ({:.2} <= {:.2})",
                coords, heat_signature, threshold
            );
            return Ok(PingResult::BelowThreshold {
                heat_signature,
                threshold,
            });
        }

        info!(
            "Coordinator: Lock-on at {} (heat {:.2} > {:.2})",
            coords, heat_signature, threshold
        );

        let follow_up = self.dispatch_follow_ups(coords);
        let scan = self.sensor.sweep(coords, &self.profile.sensor_mode);
        let paths = self.extractor.extract_paths(&scan);
        let payload = self.queue_payload(coords);

        Ok(PingResult::Locked {
            coords,
            follow_up,
            paths,
            payload,
        })
    }

    /// Local hone-in squad; no spiral math
    fn dispatch_follow_ups(&self, coords: Coordinate) -> FollowUp {
        let follow_up = FollowUp {
            center: coords,
            radius_m: self.config.follow_up_radius_m,
            count: self.config.follow_up_count,
        };
        info!(
            "Coordinator: Deploying {} follow-ups around {} | Radius: {}m",
            follow_up.count, coords, follow_up.radius_m
        );
        follow_up
    }

    fn queue_payload(&self, coords: Coordinate) -> QueuedPayload {
        self.queue.push(coords, &self.profile.payload_type, self.config.payload_eta_secs)
    }

    /// Take every pending drop for the actuator
    pub fn drain_payload_queue(&self) -> Vec<QueuedPayload> {
        self.queue.drain()
    }

    /// Pending drops without clearing them
    pub fn pending_payloads(&self) -> Vec<QueuedPayload> {
        self.queue.snapshot()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Shared handle to the payload queue, for an actuator on another thread
    pub fn payload_queue(&self) -> PayloadQueue {
        self.queue.clone()
    }
}

impl std::fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("mode_name", &self.mode_name)
            .field("profile", &self.profile)
            .field("config", &self.config)
            .field("queue_len", &self.queue.len())
            .finish()
    }
}

/// Builder for `Coordinator` with injectable registry, config and collaborators
pub struct CoordinatorBuilder {
    mode: String,
    registry: Option<ModeRegistry>,
    config: CoordinatorConfig,
    sensor: Option<Box<dyn SensorService>>,
    extractor: Option<Box<dyn PathExtractor>>,
    queue: Option<PayloadQueue>,
}

impl CoordinatorBuilder {
    pub fn new(mode: impl Into<String>) -> Self {
        Self {
            mode: mode.into(),
            registry: None,
            config: CoordinatorConfig::default(),
            sensor: None,
            extractor: None,
            queue: None,
        }
    }

    /// Resolve the mode against this registry instead of the built-in one
    pub fn registry(mut self, registry: ModeRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn config(mut self, config: CoordinatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn sensor(mut self, sensor: impl SensorService + 'static) -> Self {
        self.sensor = Some(Box::new(sensor));
        self
    }

    pub fn extractor(mut self, extractor: impl PathExtractor + 'static) -> Self {
        self.extractor = Some(Box::new(extractor));
        self
    }

    /// Append into an existing queue (e.g. one shared by several coordinators)
    pub fn queue(mut self, queue: PayloadQueue) -> Self {
        self.queue = Some(queue);
        self
    }

    /// Build the coordinator
    pub fn build(self) -> Result<Coordinator> {
        let registry = self.registry.unwrap_or_else(ModeRegistry::builtin);
        let profile = registry.resolve(&self.mode)?.clone();
        self.config.validate()?;

        info!(
            "Coordinator: Bound to mode {} (priority={}, threshold={:.2}, payload={})",
            self.mode, profile.scan_priority, profile.thermal_threshold, profile.payload_type
        );

        Ok(Coordinator {
            mode_name: self.mode,
            profile,
            config: self.config,
            sensor: self.sensor.unwrap_or_else(|| Box::new(MockLidar::new())),
            extractor: self
                .extractor
                .unwrap_or_else(|| Box::new(EdgeDetectExtractor::new())),
            queue: self.queue.unwrap_or_default(),
        })
    }
}
