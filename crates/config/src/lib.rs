//! Shared configuration for playfield collider generation
//!
//! This crate is the single source of truth for the tunables the collider
//! builders and the mesh simplifier read: skin margin, simplification floor,
//! bracket geometry, drag-point spline accuracy and the mesh edge policy.
//! It also owns [`PhysicsMaterial`], the material snapshot stamped on every
//! collider.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Skin margin added to analytic colliders (world units)
pub const DEFAULT_SKIN: f32 = 0.1;

/// Historical vertex floor for mesh simplification. Not re-derived.
pub const MIN_SIMPLIFIED_VERTICES: usize = 420;

/// Radius of the post circles emitted for bracketed gates and spinners
pub const DEFAULT_BRACKET_RADIUS: f32 = 0.01;

/// Height of the post circles above the bar
pub const DEFAULT_BRACKET_POST_HEIGHT: f32 = 30.0;

/// Amount subtracted from a trigger's hit height for its boundary segments
pub const DEFAULT_TRIGGER_HIT_HEIGHT_OFFSET: f32 = 8.0;

/// Flatness tolerance used when subdividing drag-point splines
pub const DEFAULT_DRAG_POINT_ACCURACY: f32 = 4.0;

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse collider config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid value for `{field}`: {value}")]
    InvalidValue { field: &'static str, value: f32 },
    #[error("Simplification floor {value} is below the minimum of {min} vertices")]
    FloorTooLow { value: usize, min: usize },
}

/// Which mesh edges receive a dedicated edge collider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeColliderMode {
    /// First contribution of every undirected edge wins
    #[default]
    AllEdges,
    /// Only edges contributed by exactly one triangle
    BoundaryOnly,
}

/// Physics material snapshot copied onto each collider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsMaterial {
    pub elasticity: f32,
    pub elasticity_falloff: f32,
    pub friction: f32,
    /// Scatter angle in degrees
    pub scatter_angle: f32,
}

impl PhysicsMaterial {
    /// Table-wide default used for the playfield surface.
    pub const TABLE_DEFAULT: Self = Self {
        elasticity: 0.25,
        elasticity_falloff: 0.0,
        friction: 0.075,
        scatter_angle: 0.0,
    };

    pub fn new(elasticity: f32, elasticity_falloff: f32, friction: f32, scatter_angle: f32) -> Self {
        Self {
            elasticity,
            elasticity_falloff,
            friction,
            scatter_angle,
        }
    }
}

impl Default for PhysicsMaterial {
    fn default() -> Self {
        Self::TABLE_DEFAULT
    }
}

/// Collider generation tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColliderConfig {
    /// Skin margin applied once to analytic shapes
    pub skin: f32,
    /// Simplifier never goes below min(original, this). May be raised,
    /// never lowered below [`MIN_SIMPLIFIED_VERTICES`].
    pub min_simplified_vertices: usize,
    pub bracket_radius: f32,
    pub bracket_post_height: f32,
    pub trigger_hit_height_offset: f32,
    pub drag_point_accuracy: f32,
    pub edge_mode: EdgeColliderMode,
}

impl Default for ColliderConfig {
    fn default() -> Self {
        Self {
            skin: DEFAULT_SKIN,
            min_simplified_vertices: MIN_SIMPLIFIED_VERTICES,
            bracket_radius: DEFAULT_BRACKET_RADIUS,
            bracket_post_height: DEFAULT_BRACKET_POST_HEIGHT,
            trigger_hit_height_offset: DEFAULT_TRIGGER_HIT_HEIGHT_OFFSET,
            drag_point_accuracy: DEFAULT_DRAG_POINT_ACCURACY,
            edge_mode: EdgeColliderMode::AllEdges,
        }
    }
}

impl ColliderConfig {
    /// Create a config with a custom skin margin and defaults elsewhere
    pub fn with_skin(skin: f32) -> Self {
        Self {
            skin,
            ..Self::default()
        }
    }

    /// Parse a JSON document. Missing fields fall back to their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the builders cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("skin", self.skin),
            ("bracket_radius", self.bracket_radius),
            ("bracket_post_height", self.bracket_post_height),
            ("trigger_hit_height_offset", self.trigger_hit_height_offset),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }

        if !self.drag_point_accuracy.is_finite() || self.drag_point_accuracy <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "drag_point_accuracy",
                value: self.drag_point_accuracy,
            });
        }

        if self.min_simplified_vertices < MIN_SIMPLIFIED_VERTICES {
            return Err(ConfigError::FloorTooLow {
                value: self.min_simplified_vertices,
                min: MIN_SIMPLIFIED_VERTICES,
            });
        }

        Ok(())
    }

    /// Height of the band emitted for bar segments
    pub fn bar_band_height(&self) -> f32 {
        2.0 * self.skin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ColliderConfig::default();
        assert_eq!(config.skin, DEFAULT_SKIN);
        assert_eq!(config.min_simplified_vertices, 420);
        assert_eq!(config.edge_mode, EdgeColliderMode::AllEdges);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bar_band_height() {
        let config = ColliderConfig::with_skin(0.25);
        assert_eq!(config.bar_band_height(), 0.5);
    }

    #[test]
    fn test_from_json_partial_document() {
        let config = ColliderConfig::from_json(r#"{ "skin": 0.5, "edge_mode": "boundary_only" }"#)
            .unwrap();
        assert_eq!(config.skin, 0.5);
        assert_eq!(config.edge_mode, EdgeColliderMode::BoundaryOnly);
        assert_eq!(config.bracket_radius, DEFAULT_BRACKET_RADIUS);
        assert_eq!(config.min_simplified_vertices, MIN_SIMPLIFIED_VERTICES);
    }

    #[test]
    fn test_from_json_rejects_negative_skin() {
        let err = ColliderConfig::from_json(r#"{ "skin": -1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "skin", .. }));
    }

    #[test]
    fn test_from_json_rejects_zero_accuracy() {
        let err = ColliderConfig::from_json(r#"{ "drag_point_accuracy": 0.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "drag_point_accuracy",
                ..
            }
        ));
    }

    #[test]
    fn test_simplification_floor_can_only_rise() {
        let err = ColliderConfig::from_json(r#"{ "min_simplified_vertices": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::FloorTooLow { value: 0, min: 420 }));

        let config = ColliderConfig::from_json(r#"{ "min_simplified_vertices": 1000 }"#).unwrap();
        assert_eq!(config.min_simplified_vertices, 1000);
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            ColliderConfig::from_json("{ skin: "),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_material_defaults() {
        let material = PhysicsMaterial::default();
        assert_eq!(material, PhysicsMaterial::TABLE_DEFAULT);
        assert_eq!(material.elasticity, 0.25);
        assert_eq!(material.friction, 0.075);

        let parsed: PhysicsMaterial = serde_json::from_str(r#"{ "friction": 0.3 }"#).unwrap();
        assert_eq!(parsed.friction, 0.3);
        assert_eq!(parsed.elasticity, 0.25);
    }
}
