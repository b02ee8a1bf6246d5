use std::collections::HashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::game::GameConfig;

/// Fastest orbital speed a body may have, in radians per tick.
pub const MAX_ORBIT_SPEED: f32 = 0.1;

/// Errors returned while loading a system manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Malformed JSON or missing required fields.
    #[error("manifest parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("manifest declares no bodies")]
    Empty,

    #[error("duplicate body name: {0}")]
    DuplicateBody(String),

    /// Size or distance is not a positive finite number.
    #[error("body {name} has non-positive size or distance")]
    InvalidGeometry { name: String },

    #[error("body {name} has speed {speed} outside [0, 0.1]")]
    SpeedOutOfRange { name: String, speed: f32 },

    /// The scene would not fit the buffers sized at init.
    #[error("manifest needs {needed} {what} but capacity is {capacity}")]
    CapacityExceeded { what: &'static str, needed: usize, capacity: usize },
}

/// Scene description of a planetary system.
/// Loaded from JSON at startup or replaced at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemManifest {
    /// The central, unlit, non-pickable star.
    #[serde(default)]
    pub sun: SunDescriptor,
    /// Orbiting bodies in declaration order.
    pub bodies: Vec<BodyDescriptor>,
    #[serde(default)]
    pub starfield: StarfieldDescriptor,
    /// Segments per orbit ring.
    #[serde(default = "default_orbit_segments")]
    pub orbit_segments: u32,
    /// Point light at the sun.
    #[serde(default)]
    pub light: LightDescriptor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunDescriptor {
    pub name: String,
    pub radius: f32,
    /// 0xRRGGBB
    pub color: u32,
}

impl Default for SunDescriptor {
    fn default() -> Self {
        Self {
            name: "Sun".to_string(),
            radius: 4.0,
            color: 0xffcc00,
        }
    }
}

/// One orbiting body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDescriptor {
    pub name: String,
    /// Sphere radius.
    pub size: f32,
    /// Orbit radius around the origin.
    pub distance: f32,
    /// Angular speed in radians per tick.
    pub speed: f32,
    /// 0xRRGGBB
    pub color: u32,
    /// Starting orbital angle in radians.
    #[serde(default)]
    pub angle: f32,
}

impl BodyDescriptor {
    pub fn new(name: impl Into<String>, size: f32, distance: f32, speed: f32, color: u32) -> Self {
        Self {
            name: name.into(),
            size,
            distance,
            speed,
            color,
            angle: 0.0,
        }
    }
}

/// Background points scattered in a cube centred on the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarfieldDescriptor {
    pub count: u32,
    /// Side length of the cube.
    pub extent: f32,
    #[serde(default = "default_star_size")]
    pub size: f32,
    pub seed: u64,
}

impl Default for StarfieldDescriptor {
    fn default() -> Self {
        Self {
            count: 1000,
            extent: 2000.0,
            size: default_star_size(),
            seed: 0x5eed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightDescriptor {
    /// 0xRRGGBB
    pub color: u32,
    pub intensity: f32,
    /// Falloff distance (0 = infinite).
    pub range: f32,
}

impl Default for LightDescriptor {
    fn default() -> Self {
        Self {
            color: 0xffffff,
            intensity: 2.0,
            range: 300.0,
        }
    }
}

fn default_orbit_segments() -> u32 {
    64
}

fn default_star_size() -> f32 {
    0.5
}

impl SystemManifest {
    /// Manifest with default scenery around the given bodies.
    pub fn with_bodies(bodies: Vec<BodyDescriptor>) -> Self {
        Self {
            sun: SunDescriptor::default(),
            bodies,
            starfield: StarfieldDescriptor::default(),
            orbit_segments: default_orbit_segments(),
            light: LightDescriptor::default(),
        }
    }

    /// Parse and validate a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        let manifest: Self = serde_json::from_str(json)?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn to_json(&self) -> Result<String, ManifestError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check body invariants. The first violation found is returned.
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.bodies.is_empty() {
            return Err(ManifestError::Empty);
        }

        let mut seen = HashSet::new();
        for body in &self.bodies {
            if !seen.insert(body.name.as_str()) {
                return Err(ManifestError::DuplicateBody(body.name.clone()));
            }
            let positive = |v: f32| v.is_finite() && v > 0.0;
            if !positive(body.size) || !positive(body.distance) {
                return Err(ManifestError::InvalidGeometry { name: body.name.clone() });
            }
            if !(0.0..=MAX_ORBIT_SPEED).contains(&body.speed) {
                return Err(ManifestError::SpeedOutOfRange {
                    name: body.name.clone(),
                    speed: body.speed,
                });
            }
        }

        if !(self.sun.radius.is_finite() && self.sun.radius > 0.0) {
            return Err(ManifestError::InvalidGeometry { name: self.sun.name.clone() });
        }
        Ok(())
    }

    /// Render instances the scene spawns: the sun plus one per body.
    pub fn instance_count(&self) -> usize {
        self.bodies.len() + 1
    }

    /// Orbit ring vertices plus stars.
    pub fn scenery_vertex_count(&self) -> usize {
        self.bodies.len() * self.orbit_segments as usize + self.starfield.count as usize
    }

    /// The sun's point light.
    pub fn light_count(&self) -> usize {
        1
    }

    /// Check that the scene fits the capacities in `config`.
    pub fn check_capacity(&self, config: &GameConfig) -> Result<(), ManifestError> {
        let sections = [
            ("render instances", self.instance_count(), config.max_instances),
            ("scenery vertices", self.scenery_vertex_count(), config.max_scenery_vertices),
            ("lights", self.light_count(), config.max_lights),
        ];
        for (what, needed, capacity) in sections {
            if needed > capacity {
                return Err(ManifestError::CapacityExceeded { what, needed, capacity });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_manifest_fills_defaults() {
        let json = r#"{
            "bodies": [
                { "name": "Earth", "size": 1.3, "distance": 22, "speed": 0.03, "color": 3381759 }
            ]
        }"#;
        let manifest = SystemManifest::from_json(json).unwrap();
        assert_eq!(manifest.bodies.len(), 1);
        assert_eq!(manifest.bodies[0].color, 0x3399ff);
        assert_eq!(manifest.bodies[0].angle, 0.0);
        assert_eq!(manifest.sun.radius, 4.0);
        assert_eq!(manifest.orbit_segments, 64);
        assert_eq!(manifest.starfield.count, 1000);
        assert_eq!(manifest.light.intensity, 2.0);
    }

    #[test]
    fn json_round_trip_preserves_manifest() {
        let manifest = SystemManifest::with_bodies(vec![
            BodyDescriptor::new("Mars", 1.0, 27.0, 0.028, 0xff6633),
        ]);
        let json = manifest.to_json().unwrap();
        assert_eq!(SystemManifest::from_json(&json).unwrap(), manifest);
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = SystemManifest::from_json("{ \"bodies\": [ }").unwrap_err();
        assert!(matches!(err, ManifestError::Parse(_)));
    }

    #[test]
    fn rejects_empty_bodies() {
        let err = SystemManifest::from_json(r#"{ "bodies": [] }"#).unwrap_err();
        assert!(matches!(err, ManifestError::Empty));
    }

    #[test]
    fn rejects_duplicate_names() {
        let manifest = SystemManifest::with_bodies(vec![
            BodyDescriptor::new("Io", 1.0, 10.0, 0.01, 0xffffff),
            BodyDescriptor::new("Io", 1.0, 12.0, 0.01, 0xffffff),
        ]);
        match manifest.validate() {
            Err(ManifestError::DuplicateBody(name)) => assert_eq!(name, "Io"),
            other => panic!("expected DuplicateBody, got {:?}", other),
        }
    }

    #[test]
    fn rejects_bad_geometry_and_speed() {
        let flat = SystemManifest::with_bodies(vec![BodyDescriptor::new("Flat", 0.0, 10.0, 0.01, 0)]);
        assert!(matches!(flat.validate(), Err(ManifestError::InvalidGeometry { .. })));

        let fast = SystemManifest::with_bodies(vec![BodyDescriptor::new("Fast", 1.0, 10.0, 0.2, 0)]);
        match fast.validate() {
            Err(ManifestError::SpeedOutOfRange { name, speed }) => {
                assert_eq!(name, "Fast");
                assert_eq!(speed, 0.2);
            }
            other => panic!("expected SpeedOutOfRange, got {:?}", other),
        }

        let backwards = SystemManifest::with_bodies(vec![BodyDescriptor::new("Retro", 1.0, 10.0, -0.01, 0)]);
        assert!(backwards.validate().is_err());
    }

    fn numbered_bodies(count: usize) -> Vec<BodyDescriptor> {
        (0..count)
            .map(|i| BodyDescriptor::new(format!("Body {i}"), 1.0, 10.0 + i as f32, 0.01, 0xffffff))
            .collect()
    }

    #[test]
    fn capacity_counts_sun_rings_and_stars() {
        let manifest = SystemManifest::with_bodies(numbered_bodies(8));
        assert_eq!(manifest.instance_count(), 9);
        assert_eq!(manifest.scenery_vertex_count(), 8 * 64 + 1000);
        assert!(manifest.check_capacity(&GameConfig::default()).is_ok());
    }

    #[test]
    fn too_many_bodies_exceed_instances() {
        let config = GameConfig::default();
        let manifest = SystemManifest::with_bodies(numbered_bodies(config.max_instances));
        match manifest.check_capacity(&config) {
            Err(ManifestError::CapacityExceeded { what, needed, capacity }) => {
                assert_eq!(what, "render instances");
                assert_eq!(needed, config.max_instances + 1);
                assert_eq!(capacity, config.max_instances);
            }
            other => panic!("expected CapacityExceeded, got {:?}", other),
        }
    }

    #[test]
    fn dense_starfield_exceeds_scenery() {
        let mut manifest = SystemManifest::with_bodies(numbered_bodies(1));
        manifest.starfield.count = 20_000;
        assert!(matches!(
            manifest.check_capacity(&GameConfig::default()),
            Err(ManifestError::CapacityExceeded { what: "scenery vertices", .. })
        ));
    }
}
