//! Procedural mesh generators.
//!
//! The display mesh must share its vertex ordering with the solver's
//! particle pool: vertex `u + v * (width_segments + 1)` sits at
//! `surface.point(u / width_segments, v / height_segments)`.

use crate::mesh::TriangleMesh;
use crate::normals::compute_vertex_normals;
use crate::surface::{PlaneSurface, Surface};

/// Samples `surface` on a `(width_segments + 1) × (height_segments + 1)`
/// vertex grid and triangulates each cell into two faces.
///
/// For the cell with corners `a = (u, v)`, `b = (u+1, v)`, `c = (u+1, v+1)`,
/// `d = (u, v+1)` the faces are `(a, b, d)` and `(b, c, d)`. Normals are
/// computed from the resulting geometry.
///
/// # Example
/// ```
/// use nobori_mesh::generators::parametric_grid;
/// use nobori_mesh::PlaneSurface;
/// let mesh = parametric_grid(&PlaneSurface::default(), 2, 2);
/// assert_eq!(mesh.vertex_count(), 9);   // 3×3 vertices
/// assert_eq!(mesh.triangle_count(), 8); // 2×2 cells × 2 tris each
/// ```
pub fn parametric_grid<S: Surface + ?Sized>(
    surface: &S,
    width_segments: u32,
    height_segments: u32,
) -> TriangleMesh {
    let w = width_segments as usize;
    let h = height_segments as usize;
    let row = w + 1;
    let vertex_count = row * (h + 1);
    let tri_count = w * h * 2;

    let mut mesh = TriangleMesh::with_capacity(vertex_count, tri_count);

    for v in 0..=h {
        let fv = v as f32 / h.max(1) as f32;
        for u in 0..=w {
            let fu = u as f32 / w.max(1) as f32;
            let p = surface.point(fu, fv);

            mesh.pos_x.push(p.x);
            mesh.pos_y.push(p.y);
            mesh.pos_z.push(p.z);

            mesh.normal_x.push(0.0);
            mesh.normal_y.push(0.0);
            mesh.normal_z.push(0.0);

            mesh.uv_u.push(fu);
            mesh.uv_v.push(fv);
        }
    }

    for v in 0..h {
        for u in 0..w {
            let a = (v * row + u) as u32;
            let b = a + 1;
            let d = a + row as u32;
            let c = d + 1;

            mesh.indices.extend_from_slice(&[a, b, d]);
            mesh.indices.extend_from_slice(&[b, c, d]);
        }
    }

    compute_vertex_normals(&mut mesh);
    mesh
}

/// Flat grid centered at the origin in the XY plane.
///
/// Convenience wrapper over [`parametric_grid`] with a [`PlaneSurface`]
/// spanning `[-width/2, width/2] × [-height/2, height/2]`.
pub fn plane_grid(
    width_segments: u32,
    height_segments: u32,
    width: f32,
    height: f32,
) -> TriangleMesh {
    let surface = PlaneSurface {
        width,
        height,
        offset_u: 0.5,
        offset_v: 0.5,
    };
    parametric_grid(&surface, width_segments, height_segments)
}
