//! Emergency mode profiles and the registry that resolves them.
//!
//! A `ModeProfile` is a closed record; the `ModeRegistry` is an open map
//! keyed by mode name, so new modes are pure data additions (either via
//! `register` or by loading a JSON mode table).
//!
//! The JSON shape mirrors the built-in table:
//!
//! ```json
//! {
//!   "flood": {
//!     "scan_priority": "rooftops",
//!     "thermal_threshold": 0.75,
//!     "lidar_mode": "water_line",
//!     "payload": "life_vests",
//!     "spiral_adjust": { "tightness": 0.9, "wind_resist": true, "drift_comp": 12 }
//!   }
//! }
//! ```

use crate::error::{Result, SwarmError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// Default spiral tightness when a profile omits it
pub const DEFAULT_TIGHTNESS: f64 = 1.0;

/// Keys owned by `SpiralAdjust` fields; never valid as extras
pub const RESERVED_SPIRAL_KEYS: [&str; 2] = ["tightness", "wind_resist"];

fn default_tightness() -> f64 {
    DEFAULT_TIGHTNESS
}

/// Spiral tuning knobs for a mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpiralAdjust {
    /// Multiplier on the coverage radius (> 0)
    #[serde(default = "default_tightness")]
    pub tightness: f64,

    #[serde(default)]
    pub wind_resist: bool,

    /// Mode-specific optional knobs (gust_dodge, updraft_nav, stealth, ...)
    #[serde(flatten)]
    pub extras: BTreeMap<String, serde_json::Value>,
}

impl Default for SpiralAdjust {
    fn default() -> Self {
        Self {
            tightness: DEFAULT_TIGHTNESS,
            wind_resist: false,
            extras: BTreeMap::new(),
        }
    }
}

impl SpiralAdjust {
    pub fn new(tightness: f64, wind_resist: bool) -> Self {
        Self {
            tightness,
            wind_resist,
            extras: BTreeMap::new(),
        }
    }

    /// Add an optional tuning knob. Reserved field names are ignored.
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        let key = key.into();
        if RESERVED_SPIRAL_KEYS.contains(&key.as_str()) {
            warn!("SpiralAdjust: Ignoring extra '{}' (reserved field)", key);
            return self;
        }
        self.extras.insert(key, value);
        self
    }

    pub fn extra(&self, key: &str) -> Option<&serde_json::Value> {
        self.extras.get(key)
    }
}

/// Tunable parameters for one emergency mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeProfile {
    /// Informational label
    pub scan_priority: String,

    /// Detection cutoff in [0, 1]; pings must exceed it to lock on
    pub thermal_threshold: f64,

    /// Sweep style handed to the sensor service
    #[serde(alias = "lidar_mode")]
    pub sensor_mode: String,

    /// Drop contents queued on lock-on
    #[serde(alias = "payload")]
    pub payload_type: String,

    #[serde(default)]
    pub spiral_adjust: SpiralAdjust,
}

impl ModeProfile {
    pub fn new(
        scan_priority: impl Into<String>,
        thermal_threshold: f64,
        sensor_mode: impl Into<String>,
        payload_type: impl Into<String>,
        spiral_adjust: SpiralAdjust,
    ) -> Self {
        Self {
            scan_priority: scan_priority.into(),
            thermal_threshold,
            sensor_mode: sensor_mode.into(),
            payload_type: payload_type.into(),
            spiral_adjust,
        }
    }

    pub fn tightness(&self) -> f64 {
        self.spiral_adjust.tightness
    }

    /// Check field ranges
    pub fn validate(&self) -> Result<()> {
        let t = self.thermal_threshold;
        if !t.is_finite() || !(0.0..=1.0).contains(&t) {
            return Err(SwarmError::invalid(format!(
                "thermal_threshold must be in [0, 1], got {}",
                t
            )));
        }

        let tightness = self.spiral_adjust.tightness;
        if !tightness.is_finite() || tightness <= 0.0 {
            return Err(SwarmError::invalid(format!(
                "spiral tightness must be > 0, got {}",
                tightness
            )));
        }

        if let Some(key) = RESERVED_SPIRAL_KEYS
            .iter()
            .find(|k| self.spiral_adjust.extras.contains_key(**k))
        {
            return Err(SwarmError::invalid(format!(
                "spiral extra '{}' shadows a reserved field",
                key
            )));
        }

        Ok(())
    }
}

/// Name-keyed map of mode profiles
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModeRegistry {
    profiles: BTreeMap<String, ModeProfile>,
}

impl ModeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the five built-in emergency modes
    pub fn builtin() -> Self {
        let mut profiles = BTreeMap::new();

        profiles.insert(
            "earthquake".to_string(),
            ModeProfile::new(
                "rubble_voids",
                0.8,
                "surround_burst",
                "stabilizers",
                SpiralAdjust::new(1.2, false),
            ),
        );
        profiles.insert(
            "hurricane".to_string(),
            ModeProfile::new(
                "flood_zones",
                0.7,
                "topo_map",
                "water_purifiers",
                SpiralAdjust::new(0.8, true),
            ),
        );
        profiles.insert(
            "tornado".to_string(),
            ModeProfile::new(
                "debris_voids",
                0.85,
                "debris_edge",
                "tourniquets",
                SpiralAdjust::new(1.0, true).with_extra("gust_dodge", serde_json::json!(40)),
            ),
        );
        profiles.insert(
            "wildfire".to_string(),
            ModeProfile::new(
                "ember_chasing",
                0.9,
                "fire_front",
                "foam_misters",
                SpiralAdjust::new(0.7, true).with_extra("updraft_nav", serde_json::json!(true)),
            ),
        );
        // Opt-in recon only; no tightness override
        profiles.insert(
            "civvy_shield".to_string(),
            ModeProfile::new(
                "non_combat",
                0.6,
                "safe_corridor",
                "data_relays",
                SpiralAdjust::default()
                    .with_extra("stealth", serde_json::json!(true))
                    .with_extra("ethics_lock", serde_json::json!(true)),
            ),
        );

        Self { profiles }
    }

    /// Parse a JSON mode table into a new registry
    pub fn from_json(json: &str) -> Result<Self> {
        let mut registry = Self::new();
        registry.extend_from_json(json)?;
        Ok(registry)
    }

    /// Load a JSON mode table from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let registry = Self::from_json(&json)?;
        info!(
            "ModeRegistry: Loaded {} modes from {}",
            registry.len(),
            path.display()
        );
        Ok(registry)
    }

    /// Add every mode of a JSON mode table, replacing same-named entries.
    ///
    /// All entries are validated before any is inserted.
    pub fn extend_from_json(&mut self, json: &str) -> Result<usize> {
        let table: BTreeMap<String, ModeProfile> = serde_json::from_str(json)?;

        for (name, profile) in &table {
            validate_entry(name, profile)?;
        }

        let count = table.len();
        for (name, profile) in table {
            self.insert(name, profile);
        }
        Ok(count)
    }

    /// Register a mode, returning the profile it replaced (if any)
    pub fn register(
        &mut self,
        name: impl Into<String>,
        profile: ModeProfile,
    ) -> Result<Option<ModeProfile>> {
        let name = name.into();
        validate_entry(&name, &profile)?;
        Ok(self.insert(name, profile))
    }

    fn insert(&mut self, name: String, profile: ModeProfile) -> Option<ModeProfile> {
        debug!("ModeRegistry: Registering mode {}", name);
        let previous = self.profiles.insert(name.clone(), profile);
        if previous.is_some() {
            warn!("ModeRegistry: Mode {} replaced", name);
        }
        previous
    }

    /// Look up a mode by name
    pub fn resolve(&self, name: &str) -> Result<&ModeProfile> {
        let profile = self
            .profiles
            .get(name)
            .ok_or_else(|| SwarmError::UnknownMode {
                name: name.to_string(),
                valid: self.names(),
            })?;
        profile.validate()?;
        Ok(profile)
    }

    /// Registered mode names, sorted
    pub fn names(&self) -> Vec<String> {
        self.profiles.keys().cloned().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Name and range checks shared by every insertion path
fn validate_entry(name: &str, profile: &ModeProfile) -> Result<()> {
    if name.trim().is_empty() {
        return Err(SwarmError::invalid("mode name must not be empty"));
    }
    profile.validate().map_err(|e| match e {
        SwarmError::InvalidArgument(msg) => {
            SwarmError::invalid(format!("mode '{}': {}", name, msg))
        }
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_modes() {
        let registry = ModeRegistry::builtin();
        assert_eq!(
            registry.names(),
            vec!["civvy_shield", "earthquake", "hurricane", "tornado", "wildfire"]
        );

        let wildfire = registry.resolve("wildfire").unwrap();
        assert_eq!(wildfire.thermal_threshold, 0.9);
        assert_eq!(wildfire.payload_type, "foam_misters");
        assert_eq!(wildfire.sensor_mode, "fire_front");
        assert_eq!(wildfire.tightness(), 0.7);
        assert_eq!(wildfire.spiral_adjust.extra("updraft_nav"), Some(&serde_json::json!(true)));

        let tornado = registry.resolve("tornado").unwrap();
        assert_eq!(tornado.spiral_adjust.extra("gust_dodge"), Some(&serde_json::json!(40)));
    }

    #[test]
    fn test_shield_defaults_tightness() {
        let registry = ModeRegistry::builtin();
        let shield = registry.resolve("civvy_shield").unwrap();

        assert_eq!(shield.tightness(), DEFAULT_TIGHTNESS);
        assert!(!shield.spiral_adjust.wind_resist);
        assert_eq!(shield.spiral_adjust.extra("ethics_lock"), Some(&serde_json::json!(true)));
    }

    #[test]
    fn test_unknown_mode() {
        let registry = ModeRegistry::builtin();

        match registry.resolve("flood") {
            Err(SwarmError::UnknownMode { name, valid }) => {
                assert_eq!(name, "flood");
                assert_eq!(valid.len(), 5);
                assert!(valid.contains(&"earthquake".to_string()));
            }
            other => panic!("Expected UnknownMode, got {:?}", other),
        }
    }

    #[test]
    fn test_register_new_mode() {
        let mut registry = ModeRegistry::builtin();
        let flood = ModeProfile::new(
            "rooftops",
            0.75,
            "water_line",
            "life_vests",
            SpiralAdjust::new(0.9, true),
        );

        let previous = registry.register("flood", flood.clone()).unwrap();
        assert!(previous.is_none());
        assert_eq!(registry.resolve("flood").unwrap(), &flood);
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn test_register_rejects_bad_profiles() {
        let mut registry = ModeRegistry::new();

        let hot = ModeProfile::new("x", 1.5, "y", "z", SpiralAdjust::default());
        assert!(matches!(
            registry.register("hot", hot),
            Err(SwarmError::InvalidArgument(_))
        ));

        let flat = ModeProfile::new("x", 0.5, "y", "z", SpiralAdjust::new(0.0, false));
        assert!(matches!(
            registry.register("flat", flat),
            Err(SwarmError::InvalidArgument(_))
        ));

        let ok = ModeProfile::new("x", 0.5, "y", "z", SpiralAdjust::default());
        assert!(registry.register("  ", ok).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_from_json_accepts_original_field_names() {
        let json = r#"{
            "flood": {
                "scan_priority": "rooftops",
                "thermal_threshold": 0.75,
                "lidar_mode": "water_line",
                "payload": "life_vests",
                "spiral_adjust": {"wind_resist": true, "drift_comp": 12}
            }
        }"#;

        let registry = ModeRegistry::from_json(json).unwrap();
        let flood = registry.resolve("flood").unwrap();

        assert_eq!(flood.sensor_mode, "water_line");
        assert_eq!(flood.payload_type, "life_vests");
        assert_eq!(flood.tightness(), DEFAULT_TIGHTNESS);
        assert!(flood.spiral_adjust.wind_resist);
        assert_eq!(flood.spiral_adjust.extra("drift_comp"), Some(&serde_json::json!(12)));
    }

    #[test]
    fn test_extend_is_all_or_nothing() {
        let mut registry = ModeRegistry::builtin();
        let json = r#"{
            "good": {"scan_priority": "a", "thermal_threshold": 0.5,
                     "sensor_mode": "b", "payload_type": "c"},
            "bad": {"scan_priority": "a", "thermal_threshold": -0.1,
                    "sensor_mode": "b", "payload_type": "c"}
        }"#;

        assert!(registry.extend_from_json(json).is_err());
        assert!(!registry.contains("good"));
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn test_json_rejects_blank_mode_name() {
        let json = r#"{
            "  ": {"scan_priority": "a", "thermal_threshold": 0.5,
                   "sensor_mode": "b", "payload_type": "c"}
        }"#;

        assert!(matches!(
            ModeRegistry::from_json(json),
            Err(SwarmError::InvalidArgument(_))
        ));

        let mut registry = ModeRegistry::builtin();
        assert!(registry.extend_from_json(json).is_err());
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn test_reserved_extras_are_ignored() {
        let adjust = SpiralAdjust::new(0.7, true)
            .with_extra("tightness", serde_json::json!(5.0))
            .with_extra("wind_resist", serde_json::json!(false))
            .with_extra("updraft_nav", serde_json::json!(true));

        assert_eq!(adjust.extras.len(), 1);

        let json = serde_json::to_string(&adjust).unwrap();
        let parsed: SpiralAdjust = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, adjust);
        assert_eq!(parsed.tightness, 0.7);
    }

    #[test]
    fn test_validate_rejects_reserved_extras() {
        let mut adjust = SpiralAdjust::default();
        adjust
            .extras
            .insert("tightness".to_string(), serde_json::json!(2.0));
        let profile = ModeProfile::new("x", 0.5, "y", "z", adjust);

        assert!(matches!(
            ModeRegistry::new().register("shadowed", profile),
            Err(SwarmError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            ModeRegistry::from_json("{not json"),
            Err(SwarmError::Parse(_))
        ));
    }

    #[test]
    fn test_profile_serialization_roundtrip() {
        let registry = ModeRegistry::builtin();
        let tornado = registry.resolve("tornado").unwrap();

        let json = serde_json::to_value(tornado).unwrap();
        assert_eq!(json["spiral_adjust"]["gust_dodge"], 40);

        let parsed: ModeProfile = serde_json::from_value(json).unwrap();
        assert_eq!(&parsed, tornado);
    }
}
