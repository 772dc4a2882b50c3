//! Per-kind collider builders.
//!
//! Analytic builders (gate, spinner, trigger) derive segments and circles
//! from descriptor parameters. Mesh builders (primitive, target) go through
//! [`primitive::assemble_mesh`].

pub mod bar;
pub mod gate;
pub mod primitive;
pub mod spinner;
pub mod target;
pub mod trigger;

pub use bar::{RotatedBar, correct_angles};
pub use gate::build_gate;
pub use primitive::{MeshColliders, assemble_mesh, build_primitive};
pub use spinner::build_spinner;
pub use target::build_target;
pub use trigger::build_trigger;
