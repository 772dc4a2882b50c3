//! Vertex budget for collision-mesh simplification.
//!
//! The budget grows sub-linearly with the authored vertex count so dense
//! artist meshes are reduced harder than sparse ones, and never drops below
//! a fixed floor so small meshes survive intact.

/// Clamp an authored reduction factor into `[0, 1]`. NaN means "no reduction".
pub fn sanitize_reduction_factor(reduction_factor: f32) -> f32 {
    if reduction_factor.is_nan() {
        0.0
    } else {
        reduction_factor.clamp(0.0, 1.0)
    }
}

/// Number of vertices to keep for a mesh of `original_vertices`.
///
/// `max(floor, round(n ^ (0.75 + 0.25 * (1 - factor))))`. A result greater
/// than or equal to `original_vertices` means "do not simplify".
pub fn target_vertex_count(original_vertices: usize, reduction_factor: f32, floor: usize) -> usize {
    // Guard before exponentiation: 0^x and tiny counts gain nothing
    if original_vertices <= floor {
        return original_vertices.max(floor);
    }

    let factor = sanitize_reduction_factor(reduction_factor);
    let exponent = 0.75 + 0.25 * (1.0 - factor as f64);
    let reduced = (original_vertices as f64).powf(exponent).round();

    if !reduced.is_finite() {
        return original_vertices;
    }

    (reduced as usize).max(floor)
}
