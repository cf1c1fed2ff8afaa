//! Sensor sweep and path extraction seams.
//!
//! The coordinator never scans or routes by itself; it calls a
//! `SensorService` for a raw sweep and a `PathExtractor` to turn that sweep
//! into labeled segments. The mocks here are deterministic stand-ins;
//! real LiDAR and point-cloud pipelines plug in behind the same traits.

use crate::types::{Coordinate, LabeledSegment, RawScan};
use tracing::debug;

/// Default cloud size reported by the mock LiDAR
pub const MOCK_POINT_COUNT: usize = 10_000;

/// Default breach offset used by the mock extractor (same unit as coords)
pub const BREACH_OFFSET: f64 = 2.0;

/// Source of sweep data around a coordinate
pub trait SensorService: Send + Sync {
    fn sweep(&self, coords: Coordinate, sensor_mode: &str) -> RawScan;
}

/// Turns a raw sweep into renderer-ready segments
pub trait PathExtractor: Send + Sync {
    fn extract_paths(&self, scan: &RawScan) -> Vec<LabeledSegment>;
}

/// Mock LiDAR burst returning a fixed-size cloud summary
#[derive(Debug, Clone)]
pub struct MockLidar {
    point_count: usize,
}

impl MockLidar {
    pub fn new() -> Self {
        Self {
            point_count: MOCK_POINT_COUNT,
        }
    }

    pub fn with_point_count(point_count: usize) -> Self {
        Self { point_count }
    }
}

impl Default for MockLidar {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorService for MockLidar {
    fn sweep(&self, coords: Coordinate, sensor_mode: &str) -> RawScan {
        debug!("MockLidar: {} burst at {}", sensor_mode, coords);
        RawScan {
            center: coords,
            sensor_mode: sensor_mode.to_string(),
            point_count: self.point_count,
            summary: format!(
                "Mock {} cloud: {} points around {}",
                sensor_mode, self.point_count, coords
            ),
        }
    }
}

/// Mock edge detection: one breach corridor beside the scan center, and
/// the center itself flagged as a collapse zone
#[derive(Debug, Clone)]
pub struct EdgeDetectExtractor {
    breach_offset: f64,
}

impl EdgeDetectExtractor {
    pub fn new() -> Self {
        Self {
            breach_offset: BREACH_OFFSET,
        }
    }

    pub fn with_breach_offset(breach_offset: f64) -> Self {
        Self { breach_offset }
    }
}

impl Default for EdgeDetectExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PathExtractor for EdgeDetectExtractor {
    fn extract_paths(&self, scan: &RawScan) -> Vec<LabeledSegment> {
        if scan.point_count == 0 {
            return Vec::new();
        }

        let breach = Coordinate::new(scan.center.x + self.breach_offset, scan.center.y);
        vec![
            LabeledSegment::safe(format!("Breach at {}", breach)),
            LabeledSegment::avoid(format!("Avoid collapse zone at {}", scan.center)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SegmentKind;

    #[test]
    fn test_mock_lidar_sweep() {
        let lidar = MockLidar::new();
        let scan = lidar.sweep(Coordinate::new(1.2, 0.8), "fire_front");

        assert_eq!(scan.center, Coordinate::new(1.2, 0.8));
        assert_eq!(scan.sensor_mode, "fire_front");
        assert_eq!(scan.point_count, MOCK_POINT_COUNT);
        assert_eq!(scan.summary, "Mock fire_front cloud: 10000 points around (1.20, 0.80)");
    }

    #[test]
    fn test_extractor_labels() {
        let scan = MockLidar::new().sweep(Coordinate::new(1.0, 1.0), "debris_edge");
        let paths = EdgeDetectExtractor::new().extract_paths(&scan);

        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].kind, SegmentKind::SafeCorridor);
        assert_eq!(paths[0].description, "Breach at (3.00, 1.00)");
        assert_eq!(paths[1].kind, SegmentKind::AvoidZone);
    }

    #[test]
    fn test_empty_cloud_yields_no_paths() {
        let scan = MockLidar::with_point_count(0).sweep(Coordinate::new(0.0, 0.0), "topo_map");
        assert!(EdgeDetectExtractor::with_breach_offset(5.0).extract_paths(&scan).is_empty());
    }
}
