use playfield_mesh::MeshError;
use thiserror::Error;

/// Hard failures while building colliders.
///
/// Malformed geometry is filtered and logged rather than reported here; only
/// corrupt mesh data stops an item.
#[derive(Debug, Error)]
pub enum ColliderError {
    #[error(transparent)]
    Mesh(#[from] MeshError),
}
