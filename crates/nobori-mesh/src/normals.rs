//! Vertex normal computation from triangle mesh data.
//!
//! Computes area-weighted vertex normals by accumulating
//! face normals from each adjacent triangle.

use crate::mesh::TriangleMesh;

/// Recompute vertex normals from triangle geometry (area-weighted).
///
/// Each triangle's face normal (weighted by its area) is accumulated
/// at each vertex and the result is normalized. Vertices with no
/// incident area keep a zero normal.
///
/// This modifies the mesh's `normal_x`, `normal_y`, `normal_z` arrays in place.
pub fn compute_vertex_normals(mesh: &mut TriangleMesh) {
    let n = mesh.vertex_count();

    mesh.normal_x.iter_mut().for_each(|x| *x = 0.0);
    mesh.normal_y.iter_mut().for_each(|y| *y = 0.0);
    mesh.normal_z.iter_mut().for_each(|z| *z = 0.0);

    for t in 0..mesh.triangle_count() {
        let [ia, ib, ic] = mesh.triangle(t);
        let (a, b, c) = (ia as usize, ib as usize, ic as usize);

        let pa = mesh.position(a);
        let e1 = mesh.position(b) - pa;
        let e2 = mesh.position(c) - pa;

        // Magnitude = 2 × triangle area
        let face = e1.cross(e2);

        for i in [a, b, c] {
            mesh.normal_x[i] += face.x;
            mesh.normal_y[i] += face.y;
            mesh.normal_z[i] += face.z;
        }
    }

    for i in 0..n {
        let normal = mesh.normal(i).normalize_or_zero();
        mesh.normal_x[i] = normal.x;
        mesh.normal_y[i] = normal.y;
        mesh.normal_z[i] = normal.z;
    }
}
