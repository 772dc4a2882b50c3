//! Item descriptors: the decoded, read-only parameters of playfield items.
//!
//! Defaults follow the values a freshly placed item gets in the table editor.

use glam::{Affine3A, EulerRot, Quat, Vec2, Vec3};
use playfield_config::PhysicsMaterial;
use serde::{Deserialize, Serialize};

use crate::drag_points::DragPoint;

/// Swinging gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateData {
    pub name: String,
    pub center: Vec2,
    pub length: f32,
    /// Height of the bar above its surface
    pub height: f32,
    /// Degrees
    pub rotation: f32,
    /// Radians
    pub angle_min: f32,
    /// Radians
    pub angle_max: f32,
    /// Ball may pass in both directions
    pub two_way: bool,
    pub show_bracket: bool,
    pub surface: String,
    pub material: PhysicsMaterial,
    pub collidable: bool,
    pub hit_event: bool,
}

impl Default for GateData {
    fn default() -> Self {
        Self {
            name: "Gate".to_string(),
            center: Vec2::ZERO,
            length: 100.0,
            height: 50.0,
            rotation: -90.0,
            angle_min: 0.0,
            angle_max: std::f32::consts::FRAC_PI_2,
            two_way: false,
            show_bracket: true,
            surface: String::new(),
            material: PhysicsMaterial::new(0.3, 0.0, 0.02, 0.0),
            collidable: true,
            hit_event: false,
        }
    }
}

/// Spinning flap; always one-sided
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinnerData {
    pub name: String,
    pub center: Vec2,
    pub length: f32,
    pub height: f32,
    /// Degrees
    pub rotation: f32,
    /// Radians
    pub angle_min: f32,
    /// Radians
    pub angle_max: f32,
    pub show_bracket: bool,
    pub surface: String,
    pub material: PhysicsMaterial,
    pub collidable: bool,
}

impl Default for SpinnerData {
    fn default() -> Self {
        Self {
            name: "Spinner".to_string(),
            center: Vec2::ZERO,
            length: 80.0,
            height: 60.0,
            rotation: 0.0,
            angle_min: 0.0,
            angle_max: 0.0,
            show_bracket: true,
            surface: String::new(),
            material: PhysicsMaterial::new(0.3, 0.0, 0.0, 0.0),
            collidable: true,
        }
    }
}

/// Visual style of a trigger, which also selects its collision shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerShape {
    None,
    #[default]
    WireA,
    WireB,
    WireC,
    WireD,
    Star,
    Button,
    Inder,
}

impl TriggerShape {
    /// Round triggers collide as a single circle instead of an outline
    pub fn is_round(self) -> bool {
        matches!(self, Self::Star | Self::Button)
    }
}

/// Ball-detection area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerData {
    pub name: String,
    pub center: Vec2,
    pub radius: f32,
    pub hit_height: f32,
    pub shape: TriggerShape,
    pub drag_points: Vec<DragPoint>,
    pub surface: String,
    pub enabled: bool,
}

impl Default for TriggerData {
    fn default() -> Self {
        Self {
            name: "Trigger".to_string(),
            center: Vec2::ZERO,
            radius: 25.0,
            hit_height: 50.0,
            shape: TriggerShape::WireA,
            drag_points: Vec::new(),
            surface: String::new(),
            enabled: true,
        }
    }
}

/// Drop and hit target models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    DropTargetBeveled,
    #[default]
    DropTargetSimple,
    DropTargetFlatSimple,
    HitTargetRound,
    HitTargetRectangle,
    HitFatTargetRectangle,
    HitFatTargetSquare,
    HitTargetSlim,
    HitFatTargetSlim,
}

impl TargetType {
    pub fn is_drop_target(self) -> bool {
        matches!(
            self,
            Self::DropTargetBeveled | Self::DropTargetSimple | Self::DropTargetFlatSimple
        )
    }
}

/// Drop target or hit target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetData {
    pub name: String,
    pub position: Vec3,
    pub size: Vec3,
    /// Degrees
    pub rot_z: f32,
    pub target_type: TargetType,
    pub surface: String,
    pub is_dropped: bool,
    pub collidable: bool,
    pub hit_event: bool,
    pub threshold: f32,
    pub material: PhysicsMaterial,
}

impl Default for TargetData {
    fn default() -> Self {
        Self {
            name: "Target".to_string(),
            position: Vec3::ZERO,
            size: Vec3::splat(32.0),
            rot_z: 0.0,
            target_type: TargetType::DropTargetSimple,
            surface: String::new(),
            is_dropped: false,
            collidable: true,
            hit_event: true,
            threshold: 2.0,
            material: PhysicsMaterial::new(0.35, 0.5, 0.2, 5.0),
        }
    }
}

/// Free-form mesh item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimitiveData {
    pub name: String,
    pub position: Vec3,
    pub size: Vec3,
    /// Degrees around X, Y and Z, applied in that order
    pub rotation: Vec3,
    /// 0 keeps the mesh, 1 simplifies as hard as allowed
    pub reduction_factor: f32,
    /// Visual only, no collision
    pub is_toy: bool,
    pub use_as_playfield: bool,
    pub visible: bool,
    pub collidable: bool,
    pub hit_event: bool,
    pub threshold: f32,
    pub material: PhysicsMaterial,
}

impl Default for PrimitiveData {
    fn default() -> Self {
        Self {
            name: "Primitive".to_string(),
            position: Vec3::ZERO,
            size: Vec3::ONE,
            rotation: Vec3::ZERO,
            reduction_factor: 0.0,
            is_toy: false,
            use_as_playfield: false,
            visible: true,
            collidable: true,
            hit_event: false,
            threshold: 2.0,
            material: PhysicsMaterial::new(0.3, 0.5, 0.3, 0.0),
        }
    }
}

impl PrimitiveData {
    /// Local-to-world transform: scale, rotate X then Y then Z, translate
    pub fn world_transform(&self) -> Affine3A {
        let [rx, ry, rz] = self.rotation.to_array().map(f32::to_radians);
        let rotation = Quat::from_euler(EulerRot::ZYX, rz, ry, rx);
        Affine3A::from_scale_rotation_translation(self.size, rotation, self.position)
    }

    /// Named or flagged as the playfield surface
    pub fn is_playfield(&self) -> bool {
        self.use_as_playfield || self.name.eq_ignore_ascii_case(PLAYFIELD_MESH_NAME)
    }
}

/// Mesh item name that always acts as the playfield surface
pub const PLAYFIELD_MESH_NAME: &str = "playfield_mesh";
