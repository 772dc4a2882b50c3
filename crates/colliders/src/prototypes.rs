//! Shared target meshes.
//!
//! Each prototype is built once, never mutated, and cloned before a
//! per-instance transform. Meshes are in unit local space (scaled by the
//! target size) with clockwise render winding.

use std::f32::consts::TAU;
use std::sync::LazyLock;

use glam::Vec3;
use playfield_mesh::Mesh;

use crate::descriptors::TargetType;

/// Sides of the round hit target prism
const ROUND_TARGET_SEGMENTS: u32 = 12;

static DROP_TARGET: LazyLock<Mesh> =
    LazyLock::new(|| box_mesh(Vec3::new(-0.5, -0.08, 0.0), Vec3::new(0.5, 0.08, 1.5)));

static HIT_TARGET_RECTANGLE: LazyLock<Mesh> =
    LazyLock::new(|| box_mesh(Vec3::new(-0.5, -0.1, 0.0), Vec3::new(0.5, 0.1, 1.0)));

static HIT_TARGET_SQUARE: LazyLock<Mesh> =
    LazyLock::new(|| box_mesh(Vec3::new(-0.5, -0.25, 0.0), Vec3::new(0.5, 0.25, 1.0)));

static HIT_TARGET_SLIM: LazyLock<Mesh> =
    LazyLock::new(|| box_mesh(Vec3::new(-0.25, -0.05, 0.0), Vec3::new(0.25, 0.05, 1.0)));

static HIT_TARGET_ROUND: LazyLock<Mesh> =
    LazyLock::new(|| prism_mesh(0.5, 0.0, 0.6, ROUND_TARGET_SEGMENTS));

/// Read-only prototype mesh for a target model
pub fn target_prototype(target_type: TargetType) -> &'static Mesh {
    let prototype = match target_type {
        TargetType::DropTargetBeveled
        | TargetType::DropTargetSimple
        | TargetType::DropTargetFlatSimple => &DROP_TARGET,
        TargetType::HitTargetRound => &HIT_TARGET_ROUND,
        TargetType::HitTargetRectangle | TargetType::HitFatTargetRectangle => {
            &HIT_TARGET_RECTANGLE
        }
        TargetType::HitFatTargetSquare => &HIT_TARGET_SQUARE,
        TargetType::HitTargetSlim | TargetType::HitFatTargetSlim => &HIT_TARGET_SLIM,
    };
    LazyLock::force(prototype)
}

/// Push a counter-clockwise quad as two clockwise triangles
fn push_quad(indices: &mut Vec<u32>, [a, b, c, d]: [u32; 4]) {
    indices.extend_from_slice(&[a, c, b, a, d, c]);
}

fn box_mesh(min: Vec3, max: Vec3) -> Mesh {
    let corners: Vec<Vec3> = (0..8u32)
        .map(|i| {
            Vec3::new(
                if i & 1 == 0 { min.x } else { max.x },
                if i & 2 == 0 { min.y } else { max.y },
                if i & 4 == 0 { min.z } else { max.z },
            )
        })
        .collect();

    let mut indices = Vec::with_capacity(36);
    for quad in [
        [0, 2, 3, 1], // -z
        [4, 5, 7, 6], // +z
        [0, 1, 5, 4], // -y
        [2, 6, 7, 3], // +y
        [0, 4, 6, 2], // -x
        [1, 3, 7, 5], // +x
    ] {
        push_quad(&mut indices, quad);
    }
    Mesh::from_positions(&corners, indices)
}

/// Closed regular prism around the Z axis
fn prism_mesh(radius: f32, z_low: f32, z_high: f32, segments: u32) -> Mesh {
    let ring = |z: f32| {
        (0..segments).map(move |i| {
            let angle = TAU * i as f32 / segments as f32;
            Vec3::new(radius * angle.cos(), radius * angle.sin(), z)
        })
    };
    let positions: Vec<Vec3> = ring(z_low).chain(ring(z_high)).collect();

    let mut indices = Vec::new();
    for i in 0..segments {
        let next = (i + 1) % segments;
        push_quad(&mut indices, [i, next, segments + next, segments + i]);
    }
    // Caps as fans, clockwise seen from outside
    for k in 1..segments - 1 {
        indices.extend_from_slice(&[segments, segments + k + 1, segments + k]);
        indices.extend_from_slice(&[0, k, k + 1]);
    }
    Mesh::from_positions(&positions, indices)
}
