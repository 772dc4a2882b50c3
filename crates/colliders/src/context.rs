//! Build context: configuration plus the surface-height collaborator.

use std::collections::HashMap;

use playfield_config::{ColliderConfig, PhysicsMaterial};

/// Height of a named surface at a playfield position.
///
/// An empty surface name means the playfield itself.
pub trait SurfaceHeight {
    fn height_at(&self, surface: &str, x: f32, y: f32) -> f32;
}

/// Every surface sits at one height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlatPlayfield {
    pub height: f32,
}

impl SurfaceHeight for FlatPlayfield {
    fn height_at(&self, _surface: &str, _x: f32, _y: f32) -> f32 {
        self.height
    }
}

/// Named flat surfaces (walls, ramps tops) over a flat playfield
#[derive(Debug, Clone, Default)]
pub struct SurfaceHeights {
    pub playfield: f32,
    surfaces: HashMap<String, f32>,
}

impl SurfaceHeights {
    pub fn new(playfield: f32) -> Self {
        Self {
            playfield,
            surfaces: HashMap::new(),
        }
    }

    pub fn with_surface(mut self, name: &str, height: f32) -> Self {
        self.insert(name, height);
        self
    }

    pub fn insert(&mut self, name: &str, height: f32) {
        self.surfaces.insert(name.to_string(), height);
    }
}

impl SurfaceHeight for SurfaceHeights {
    fn height_at(&self, surface: &str, _x: f32, _y: f32) -> f32 {
        // Unknown surfaces fall back to the playfield
        self.surfaces.get(surface).copied().unwrap_or(self.playfield)
    }
}

impl<F> SurfaceHeight for F
where
    F: Fn(&str, f32, f32) -> f32,
{
    fn height_at(&self, surface: &str, x: f32, y: f32) -> f32 {
        self(surface, x, y)
    }
}

/// Read-only inputs shared by every builder in one build call
#[derive(Clone, Copy)]
pub struct BuildContext<'a> {
    pub config: &'a ColliderConfig,
    pub surfaces: &'a dyn SurfaceHeight,
    /// Material for items promoted to the playfield surface
    pub table_material: PhysicsMaterial,
}

impl<'a> BuildContext<'a> {
    pub fn new(config: &'a ColliderConfig, surfaces: &'a dyn SurfaceHeight) -> Self {
        Self {
            config,
            surfaces,
            table_material: PhysicsMaterial::TABLE_DEFAULT,
        }
    }

    pub fn with_table_material(mut self, material: PhysicsMaterial) -> Self {
        self.table_material = material;
        self
    }

    /// Surface height, treating a non-finite answer as the ground plane
    pub fn surface_height(&self, surface: &str, x: f32, y: f32) -> f32 {
        let height = self.surfaces.height_at(surface, x, y);
        if height.is_finite() { height } else { 0.0 }
    }
}

impl std::fmt::Debug for BuildContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildContext")
            .field("config", self.config)
            .field("table_material", &self.table_material)
            .finish_non_exhaustive()
    }
}
