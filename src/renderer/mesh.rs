//! Unit icosphere shared by every body in the scene.

use glam::Vec3;
use rustc_hash::FxHashMap;

/// Vertex of the unit sphere mesh.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Position on the unit sphere.
    pub position: [f32; 3],
    /// Outward normal (equal to the position).
    pub normal: [f32; 3],
}

/// Indexed triangle mesh.
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Vertices.
    pub vertices: Vec<MeshVertex>,
    /// Triangle list indices, counter-clockwise from outside.
    pub indices: Vec<u32>,
}

/// Icosphere with `subdivisions` rounds of 4:1 triangle splitting.
///
/// Level 0 is the icosahedron (20 triangles); each level quadruples the
/// triangle count.
#[must_use]
pub fn icosphere(subdivisions: u32) -> Mesh {
    let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let mut positions: Vec<Vec3> = [
        (-1.0, phi, 0.0),
        (1.0, phi, 0.0),
        (-1.0, -phi, 0.0),
        (1.0, -phi, 0.0),
        (0.0, -1.0, phi),
        (0.0, 1.0, phi),
        (0.0, -1.0, -phi),
        (0.0, 1.0, -phi),
        (phi, 0.0, -1.0),
        (phi, 0.0, 1.0),
        (-phi, 0.0, -1.0),
        (-phi, 0.0, 1.0),
    ]
    .into_iter()
    .map(|(x, y, z)| Vec3::new(x, y, z).normalize())
    .collect();

    #[rustfmt::skip]
    let mut indices: Vec<u32> = vec![
        0, 11, 5,   0, 5, 1,    0, 1, 7,    0, 7, 10,   0, 10, 11,
        1, 5, 9,    5, 11, 4,   11, 10, 2,  10, 7, 6,   7, 1, 8,
        3, 9, 4,    3, 4, 2,    3, 2, 6,    3, 6, 8,    3, 8, 9,
        4, 9, 5,    2, 4, 11,   6, 2, 10,   8, 6, 7,    9, 8, 1,
    ];

    let mut midpoints: FxHashMap<(u32, u32), u32> = FxHashMap::default();
    for _ in 0..subdivisions {
        let mut split = Vec::with_capacity(indices.len() * 4);
        for tri in indices.chunks_exact(3) {
            let (v0, v1, v2) = (tri[0], tri[1], tri[2]);
            let a = midpoint(&mut positions, &mut midpoints, v0, v1);
            let b = midpoint(&mut positions, &mut midpoints, v1, v2);
            let c = midpoint(&mut positions, &mut midpoints, v2, v0);
            split.extend_from_slice(&[v0, a, c, v1, b, a, v2, c, b, a, b, c]);
        }
        indices = split;
    }

    let vertices = positions
        .iter()
        .map(|p| MeshVertex {
            position: p.to_array(),
            normal: p.to_array(),
        })
        .collect();
    Mesh { vertices, indices }
}

/// Index of the unit-sphere midpoint of edge `(v0, v1)`, shared between
/// the two triangles on either side of the edge.
fn midpoint(
    positions: &mut Vec<Vec3>,
    cache: &mut FxHashMap<(u32, u32), u32>,
    v0: u32,
    v1: u32,
) -> u32 {
    let key = if v0 < v1 { (v0, v1) } else { (v1, v0) };
    *cache.entry(key).or_insert_with(|| {
        let mid = (positions[v0 as usize] + positions[v1 as usize])
            .normalize();
        positions.push(mid);
        (positions.len() - 1) as u32
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icosahedron_counts() {
        let mesh = icosphere(0);
        assert_eq!(mesh.vertices.len(), 12);
        assert_eq!(mesh.indices.len(), 60);
    }

    #[test]
    fn subdivision_shares_edge_midpoints() {
        let mesh = icosphere(2);
        assert_eq!(mesh.vertices.len(), 162);
        assert_eq!(mesh.indices.len(), 320 * 3);
    }

    #[test]
    fn vertices_are_on_the_unit_sphere() {
        for v in icosphere(3).vertices {
            let p = Vec3::from(v.position);
            assert!((p.length() - 1.0).abs() < 1e-5);
            assert_eq!(v.position, v.normal);
        }
    }

    #[test]
    fn triangles_face_outward() {
        let mesh = icosphere(1);
        for tri in mesh.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]]
                .map(|i| Vec3::from(mesh.vertices[i as usize].position));
            let normal = (b - a).cross(c - a);
            assert!(normal.dot(a + b + c) > 0.0);
        }
    }
}
