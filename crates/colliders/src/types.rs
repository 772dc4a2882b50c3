use std::sync::Arc;

use playfield_config::PhysicsMaterial;
use playfield_mesh::SimplifyStats;
use serde::{Deserialize, Serialize};

use crate::shapes::Collider;

/// Kind of playfield item a collider belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ItemKind {
    Gate = 0,
    Spinner = 1,
    Trigger = 2,
    Target = 3,
    Primitive = 4,
}

/// Owning-item tag carried by every collider
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemTag {
    /// Item name, shared by all colliders of the item
    pub name: Arc<str>,
    pub kind: ItemKind,
}

impl ItemTag {
    pub fn new(name: &str, kind: ItemKind) -> Self {
        Self {
            name: Arc::from(name),
            kind,
        }
    }
}

/// Broad-phase slot written by the physics engine after creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BroadPhaseTag {
    pub index: u32,
    pub version: u32,
}

/// Metadata shared by every collider shape
#[derive(Debug, Clone, PartialEq)]
pub struct ColliderHeader {
    pub item: ItemTag,
    pub enabled: bool,
    /// Contacts with this collider raise hit events
    pub fires_events: bool,
    /// Minimum impact speed for a hit event
    pub threshold: f32,
    pub material: PhysicsMaterial,
    /// `None` until the broad phase indexes the collider
    pub broad_phase: Option<BroadPhaseTag>,
}

impl ColliderHeader {
    /// Enabled header with the table default material and no events
    pub fn new(item: ItemTag) -> Self {
        Self {
            item,
            enabled: true,
            fires_events: false,
            threshold: 0.0,
            material: PhysicsMaterial::TABLE_DEFAULT,
            broad_phase: None,
        }
    }

    pub fn with_material(mut self, material: PhysicsMaterial) -> Self {
        self.material = material;
        self
    }

    pub fn with_events(mut self, fires_events: bool, threshold: f32) -> Self {
        self.fires_events = fires_events;
        self.threshold = threshold;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Angle limits after fixing an inverted authored range.
///
/// Returned to the caller instead of written back into the descriptor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleCorrection {
    pub angle_min: f32,
    pub angle_max: f32,
}

/// Effective flags of a mesh item that is treated as the playfield surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayfieldOverride {
    pub visible: bool,
    pub is_toy: bool,
    pub use_as_playfield: bool,
}

impl PlayfieldOverride {
    pub const PLAYFIELD: Self = Self {
        visible: false,
        is_toy: false,
        use_as_playfield: true,
    };
}

/// Everything built for one playfield item
#[derive(Debug, Clone)]
pub struct ItemColliders {
    pub item: ItemTag,
    pub colliders: Vec<Collider>,
    /// Set when the authored angle range was inverted
    pub angle_correction: Option<AngleCorrection>,
    /// Set when a mesh item was promoted to the playfield surface
    pub playfield: Option<PlayfieldOverride>,
    /// Set when a mesh went through the simplifier
    pub simplify_stats: Option<SimplifyStats>,
}

impl ItemColliders {
    pub fn new(item: ItemTag) -> Self {
        Self {
            item,
            colliders: Vec::new(),
            angle_correction: None,
            playfield: None,
            simplify_stats: None,
        }
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }
}
