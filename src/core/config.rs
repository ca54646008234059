//! Toolkit configuration
//!
//! Saved and loaded in RON (Rusty Object Notation) or JSON. Every section
//! falls back to its defaults when missing from the file.

use std::fs;
use std::path::Path;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::ai::{DistanceComparer, Granularity, ReferenceFrame, TieBreakMode};
use crate::physics::{Physics, RigidBodyHandle};

/// How candidates are ranked around an agent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Ground-plane or full 3D distance
    pub granularity: Granularity,
    /// Farthest first instead of nearest first
    pub farthest: bool,
    /// Ordering for equidistant candidates
    pub tie_break: Option<TieBreakMode>,
    /// Fixed facing used for tie-breaks
    pub forward: Option<Vec2>,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            granularity: Granularity::Planar,
            farthest: false,
            tie_break: None,
            forward: None,
        }
    }
}

impl RankingConfig {
    /// Reference frame around `position`
    pub fn frame(&self, position: Vec3) -> ReferenceFrame {
        ReferenceFrame {
            position,
            farthest: self.farthest,
            tie_break: self.tie_break,
            forward: self.forward,
        }
    }

    /// Comparer ranking around `position`
    pub fn comparer(&self, position: Vec3) -> DistanceComparer {
        DistanceComparer::new(self.frame(position), self.granularity)
    }
}

/// Pursuit tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PursuitConfig {
    /// Top speed of the pursuer
    pub max_speed: f32,
}

impl Default for PursuitConfig {
    fn default() -> Self {
        Self { max_speed: 5.0 }
    }
}

/// Line-of-sight checks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SightConfig {
    /// Radius of the swept probe; zero uses a thin ray
    pub probe_radius: f32,
    /// Height of the eyes above an agent's position
    pub eye_height: f32,
}

impl Default for SightConfig {
    fn default() -> Self {
        Self {
            probe_radius: 0.0,
            eye_height: 1.0,
        }
    }
}

impl SightConfig {
    /// Whether an agent at `from` can see the point `to`
    pub fn can_see(
        &self,
        physics: &Physics,
        from: Vec3,
        to: Vec3,
        exclude: Option<RigidBodyHandle>,
    ) -> bool {
        let eye = from + Vec3::Y * self.eye_height;
        if self.probe_radius > 0.0 {
            physics.sphere_line_of_sight(eye, to, self.probe_radius, exclude)
        } else {
            physics.line_of_sight(eye, to, exclude)
        }
    }
}

/// Configuration for ranking, pursuit and sight
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    pub ranking: RankingConfig,
    pub pursuit: PursuitConfig,
    pub sight: SightConfig,
}

impl ToolkitConfig {
    /// Set the ranking section
    #[must_use]
    pub fn with_ranking(mut self, ranking: RankingConfig) -> Self {
        self.ranking = ranking;
        self
    }

    /// Set the pursuer's top speed
    #[must_use]
    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.pursuit.max_speed = max_speed;
        self
    }

    /// Set the sight section
    #[must_use]
    pub fn with_sight(mut self, sight: SightConfig) -> Self {
        self.sight = sight;
        self
    }

    /// Save the config to a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save_ron(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let ron_string = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;
        fs::write(path.as_ref(), ron_string).map_err(|e| ConfigError::IoError(e.to_string()))?;
        log::debug!("Saved config to {}", path.as_ref().display());
        Ok(())
    }

    /// Load a config from a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or deserialization fails
    pub fn load_ron(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::IoError(e.to_string()))?;
        let config: ToolkitConfig =
            ron::from_str(&content).map_err(|e| ConfigError::DeserializeError(e.to_string()))?;
        log::debug!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Save the config to a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json_string = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;
        fs::write(path.as_ref(), json_string).map_err(|e| ConfigError::IoError(e.to_string()))?;
        log::debug!("Saved config to {}", path.as_ref().display());
        Ok(())
    }

    /// Load a config from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or deserialization fails
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::IoError(e.to_string()))?;
        let config: ToolkitConfig = serde_json::from_str(&content)
            .map_err(|e| ConfigError::DeserializeError(e.to_string()))?;
        log::debug!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }
}

/// Errors that can occur while loading or saving configuration
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// IO error
    IoError(String),
    /// Serialization error
    SerializeError(String),
    /// Deserialization error
    DeserializeError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "IO error: {e}"),
            Self::SerializeError(e) => write!(f, "Serialization error: {e}"),
            Self::DeserializeError(e) => write!(f, "Deserialization error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use super::*;

    fn sample() -> ToolkitConfig {
        ToolkitConfig::default()
            .with_ranking(RankingConfig {
                granularity: Granularity::Spatial,
                farthest: true,
                tie_break: Some(TieBreakMode::Clockwise),
                forward: Some(Vec2::new(0.0, -1.0)),
            })
            .with_max_speed(8.5)
    }

    #[test]
    fn test_config_serialization_ron() {
        let config = sample();

        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::default()).unwrap();
        assert!(ron_str.contains("Clockwise"));

        let loaded: ToolkitConfig = ron::from_str(&ron_str).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let loaded: ToolkitConfig = ron::from_str("(pursuit: (max_speed: 2.0))").unwrap();
        assert_eq!(loaded.pursuit.max_speed, 2.0);
        assert_eq!(loaded.ranking, RankingConfig::default());
        assert_eq!(loaded.sight, SightConfig::default());

        let loaded: ToolkitConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(loaded, ToolkitConfig::default());
    }

    #[test]
    fn test_config_files() {
        let dir = std::env::temp_dir();
        let ron_path = dir.join(format!("agent_toolkit_{}.ron", std::process::id()));
        let json_path = dir.join(format!("agent_toolkit_{}.json", std::process::id()));
        let config = sample();

        config.save_ron(&ron_path).unwrap();
        assert_eq!(ToolkitConfig::load_ron(&ron_path).unwrap(), config);

        config.save_json(&json_path).unwrap();
        assert_eq!(ToolkitConfig::load_json(&json_path).unwrap(), config);

        let _ = fs::remove_file(ron_path);
        let _ = fs::remove_file(json_path);
    }

    #[test]
    fn test_load_errors() {
        let missing = ToolkitConfig::load_ron("/nonexistent/agent_toolkit.ron");
        assert!(matches!(missing, Err(ConfigError::IoError(_))));

        let bad = ron::from_str::<ToolkitConfig>("(ranking: 3)")
            .map_err(|e| ConfigError::DeserializeError(e.to_string()));
        assert!(bad.unwrap_err().to_string().starts_with("Deserialization error"));
    }

    #[test]
    fn test_comparer_from_config() {
        let comparer = sample().ranking.comparer(Vec3::ZERO);

        assert_eq!(comparer.granularity(), Granularity::Spatial);
        assert!(comparer.frame().farthest);
        assert_eq!(
            comparer.compare(&Vec3::X, &Vec3::new(2.0, 0.0, 0.0)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_can_see() {
        let mut physics = Physics::with_gravity(Vec3::ZERO);
        let wall = physics.create_static_body(Vec3::new(5.0, 0.0, 0.0));
        physics.add_box_collider(wall, Vec3::new(0.5, 1.5, 2.0));
        physics.step(1.0 / 60.0);

        let target = Vec3::new(10.0, 1.0, 0.0);
        let short = SightConfig {
            probe_radius: 0.0,
            eye_height: 1.0,
        };
        let tall = SightConfig {
            probe_radius: 0.0,
            eye_height: 3.0,
        };
        let wide = SightConfig {
            probe_radius: 2.0,
            eye_height: 3.0,
        };

        assert!(!short.can_see(&physics, Vec3::ZERO, target, None));
        assert!(tall.can_see(&physics, Vec3::ZERO, target, None));
        assert!(!wide.can_see(&physics, Vec3::ZERO, target, None));
    }
}
