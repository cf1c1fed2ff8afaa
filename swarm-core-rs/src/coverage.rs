//! Golden-angle spiral coverage.
//!
//! Agent `i` of `n` is placed at angle `i * golden_angle` and radius
//! `radius * tightness * sqrt((i + 1) / n)`. The square-root scaling gives
//! uniform areal density over the disk; the golden-angle step keeps
//! consecutive agents from lining up on a repeating bearing.

use crate::error::{Result, SwarmError};
use crate::types::{Coordinate, CoveragePoint};

/// Reject spiral steps that are non-finite, non-positive, or a whole number
/// of turns (every agent would land on one bearing).
pub fn check_golden_angle(golden_angle_deg: f64) -> Result<()> {
    if !golden_angle_deg.is_finite()
        || golden_angle_deg <= 0.0
        || golden_angle_deg.rem_euclid(360.0) == 0.0
    {
        return Err(SwarmError::invalid(format!(
            "golden_angle_deg must be > 0 and not a multiple of 360, got {}",
            golden_angle_deg
        )));
    }
    Ok(())
}

/// Compute a coverage pattern of `agent_count` points around `origin`.
///
/// Output is ordered by agent index and depends only on the inputs.
pub fn golden_spiral(
    origin: Coordinate,
    radius: f64,
    agent_count: usize,
    tightness: f64,
    golden_angle_deg: f64,
) -> Result<Vec<CoveragePoint>> {
    if agent_count == 0 {
        return Err(SwarmError::invalid("agent_count must be at least 1"));
    }
    if !radius.is_finite() || radius <= 0.0 {
        return Err(SwarmError::invalid(format!("radius must be > 0, got {}", radius)));
    }
    if !origin.is_finite() {
        return Err(SwarmError::invalid(format!("origin must be finite, got {:?}", origin)));
    }
    if !tightness.is_finite() || tightness <= 0.0 {
        return Err(SwarmError::invalid(format!("tightness must be > 0, got {}", tightness)));
    }
    check_golden_angle(golden_angle_deg)?;

    let step = golden_angle_deg.to_radians();
    let n = agent_count as f64;

    let points = (0..agent_count)
        .map(|i| {
            let angle = i as f64 * step;
            let fraction = ((i + 1) as f64 / n).sqrt();
            CoveragePoint {
                agent: i,
                coord: origin.offset_polar(radius * tightness * fraction, angle),
            }
        })
        .collect();

    Ok(points)
}
