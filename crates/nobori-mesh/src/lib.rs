//! # nobori-mesh
//!
//! The renderer-side view of the cloth: a triangle mesh with
//! Structure-of-Arrays (SoA) layout, the parametric surfaces that place
//! the cloth in the scene, and vertex normal computation.
//!
//! ## Key Types
//!
//! - [`TriangleMesh`]: positions, normals, UVs and triangle indices in
//!   contiguous SoA buffers. Vertex `i` is particle slot `i`.
//! - [`Surface`]: `(u, v) → position` mapping, implemented by
//!   [`PlaneSurface`] and by any `Fn(f32, f32) -> Vec3`.
//! - [`generators::parametric_grid`]: builds the display mesh from a surface.

pub mod generators;
pub mod mesh;
pub mod normals;
pub mod surface;

pub use mesh::TriangleMesh;
pub use surface::{PlaneSurface, Surface};
