use std::f32::consts::PI;

use glam::Vec3;
use crate::api::types::GeometryId;
use crate::components::material::Material;

/// Floats per interleaved vertex: position(3) + normal(3) + uv(2).
pub const VERTEX_FLOATS: usize = 8;

/// Non-indexed triangle soup. Every three vertices form one triangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn push_vertex(&mut self, position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) {
        self.positions.push(position);
        self.normals.push(normal);
        self.uvs.push(uv);
    }

    /// Interleave into the upload layout (`VERTEX_FLOATS` per vertex).
    pub fn interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.vertex_count() * VERTEX_FLOATS);
        for i in 0..self.vertex_count() {
            out.extend_from_slice(&self.positions[i]);
            out.extend_from_slice(&self.normals[i]);
            out.extend_from_slice(&self.uvs[i]);
        }
        out
    }

    /// UV sphere centered on the origin.
    /// Same vertex layout and winding as the usual `SphereGeometry`.
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let w = width_segments.max(3);
        let h = height_segments.max(2);

        let mut grid: Vec<Vec<(Vec3, [f32; 2])>> = Vec::with_capacity(h as usize + 1);
        for iy in 0..=h {
            let v = iy as f32 / h as f32;
            let mut row = Vec::with_capacity(w as usize + 1);
            for ix in 0..=w {
                let u = ix as f32 / w as f32;
                let p = Vec3::new(
                    -radius * (u * 2.0 * PI).cos() * (v * PI).sin(),
                    radius * (v * PI).cos(),
                    radius * (u * 2.0 * PI).sin() * (v * PI).sin(),
                );
                row.push((p, [u, 1.0 - v]));
            }
            grid.push(row);
        }

        let mut mesh = MeshData::default();
        let push = |mesh: &mut MeshData, (p, uv): (Vec3, [f32; 2])| {
            let n = p.normalize_or_zero();
            mesh.push_vertex(p.to_array(), n.to_array(), uv);
        };

        for iy in 0..h as usize {
            for ix in 0..w as usize {
                let a = grid[iy][ix + 1];
                let b = grid[iy][ix];
                let c = grid[iy + 1][ix];
                let d = grid[iy + 1][ix + 1];
                // Poles collapse to single triangles.
                if iy != 0 {
                    push(&mut mesh, a);
                    push(&mut mesh, b);
                    push(&mut mesh, d);
                }
                if iy != h as usize - 1 {
                    push(&mut mesh, b);
                    push(&mut mesh, c);
                    push(&mut mesh, d);
                }
            }
        }
        mesh
    }

    /// Axis-aligned box centered on the origin, one texture per face.
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let half = Vec3::new(width, height, depth) / 2.0;
        // (normal, u axis, v axis)
        let faces = [
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        ];

        let mut mesh = MeshData::default();
        for (normal, u_axis, v_axis) in faces {
            let center = normal * half;
            let du = u_axis * half;
            let dv = v_axis * half;
            let corners = [
                (center - du - dv, [0.0, 0.0]),
                (center + du - dv, [1.0, 0.0]),
                (center + du + dv, [1.0, 1.0]),
                (center - du + dv, [0.0, 1.0]),
            ];
            for i in [0usize, 1, 2, 0, 2, 3] {
                let (p, uv) = corners[i];
                mesh.push_vertex(p.to_array(), normal.to_array(), uv);
            }
        }
        mesh
    }
}

/// A drawable: geometry from the library plus its surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub geometry: GeometryId,
    pub material: Material,
}

impl Mesh {
    pub fn new(geometry: GeometryId, material: Material) -> Self {
        Self { geometry, material }
    }
}

/// Node of an entity's model tree. Loaded models have one child per
/// object/material run; primitives are a single mesh-bearing root.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    pub name: String,
    pub mesh: Option<Mesh>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn from_mesh(name: impl Into<String>, mesh: Mesh) -> Self {
        Self {
            name: name.into(),
            mesh: Some(mesh),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Depth-first visit of every mesh-bearing node.
    pub fn for_each_mesh<'a>(&'a self, f: &mut impl FnMut(&'a Mesh)) {
        if let Some(mesh) = &self.mesh {
            f(mesh);
        }
        for child in &self.children {
            child.for_each_mesh(f);
        }
    }

    /// Depth-first mutable visit of every mesh-bearing node.
    pub fn for_each_mesh_mut(&mut self, f: &mut impl FnMut(&mut Mesh)) {
        if let Some(mesh) = &mut self.mesh {
            f(mesh);
        }
        for child in &mut self.children {
            child.for_each_mesh_mut(f);
        }
    }

    pub fn mesh_count(&self) -> usize {
        let mut count = 0;
        self.for_each_mesh(&mut |_| count += 1);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::material::BasicMaterial;

    #[test]
    fn sphere_vertices_lie_on_radius() {
        let mesh = MeshData::sphere(7.0, 32, 32);
        assert_eq!(mesh.vertex_count() % 3, 0);
        for p in &mesh.positions {
            let len = Vec3::from_array(*p).length();
            assert!((len - 7.0).abs() < 1e-4, "vertex off sphere: {}", len);
        }
    }

    #[test]
    fn sphere_triangle_count() {
        // w * (h - 1) * 2 triangles for a UV sphere with collapsed poles.
        let mesh = MeshData::sphere(0.25, 24, 24);
        assert_eq!(mesh.triangle_count(), 24 * 23 * 2);
    }

    #[test]
    fn cuboid_has_twelve_triangles() {
        let mesh = MeshData::cuboid(5.0, 5.0, 5.0);
        assert_eq!(mesh.triangle_count(), 12);
        for p in &mesh.positions {
            assert!(p.iter().all(|c| c.abs() <= 2.5 + 1e-6));
        }
    }

    #[test]
    fn interleaved_stride() {
        let mesh = MeshData::cuboid(1.0, 1.0, 1.0);
        assert_eq!(mesh.interleaved().len(), mesh.vertex_count() * VERTEX_FLOATS);
    }

    #[test]
    fn traversal_visits_nested_meshes() {
        let mesh = Mesh::new(GeometryId(0), Material::Basic(BasicMaterial::default()));
        let mut root = Node::group("root")
            .with_child(Node::from_mesh("a", mesh.clone()))
            .with_child(Node::group("g").with_child(Node::from_mesh("b", mesh)));
        assert_eq!(root.mesh_count(), 2);

        root.for_each_mesh_mut(&mut |m| m.geometry = GeometryId(9));
        root.for_each_mesh(&mut |m| assert_eq!(m.geometry, GeometryId(9)));
    }
}
