//! Swarm Core Library
//!
//! Planning and decision layer for a search-and-rescue drone swarm.
//! Generates golden-angle coverage spirals and escalates thermal pings
//! into follow-up dispatch, sensor sweeps and queued payload drops, all
//! tuned by an emergency-mode profile.
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │           Coordinator               │
//! │  coverage │ ping escalation │ queue │
//! └──────┬──────────────┬───────────────┘
//!        │              │ SensorService / PathExtractor
//!        ▼              ▼
//!  ModeRegistry    external collaborators
//! ```
//!
//! ## Usage
//!
//! ```
//! use swarm_core::{Coordinate, Coordinator};
//!
//! let coord = Coordinator::new("wildfire")?;
//! let spiral = coord.compute_coverage(Coordinate::new(0.0, 0.0), 3.0, 4)?;
//! assert_eq!(spiral.len(), 4);
//!
//! let result = coord.handle_ping(Coordinate::new(1.2, 0.8), 0.92)?;
//! assert!(result.is_locked());
//! assert_eq!(coord.drain_payload_queue().len(), 1);
//! # Ok::<(), swarm_core::SwarmError>(())
//! ```

pub mod types;
pub mod error;
pub mod modes;
pub mod config;
pub mod coverage;
pub mod sensor;
pub mod actuator;
pub mod queue;
pub mod coordinator;

pub use types::*;
pub use error::{Result, SwarmError};
pub use modes::{ModeProfile, ModeRegistry, SpiralAdjust};
pub use config::CoordinatorConfig;
pub use coverage::golden_spiral;
pub use sensor::{EdgeDetectExtractor, MockLidar, PathExtractor, SensorService};
pub use actuator::{Actuator, RecordingActuator};
pub use queue::PayloadQueue;
pub use coordinator::{Coordinator, CoordinatorBuilder};
