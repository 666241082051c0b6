//! Wavefront OBJ geometry.
//!
//! Produces one triangle soup per (object, material) run, the same split a
//! browser OBJ loader makes when it builds one mesh per `usemtl` section.

use glam::Vec3;

use crate::assets::error::ParseError;
use crate::assets::mtl::MaterialSet;
use crate::components::material::Material;
use crate::components::mesh::MeshData;

/// A contiguous run of faces sharing one object name and one material.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjGroup {
    pub name: String,
    pub material: Option<String>,
    pub mesh: MeshData,
}

/// Parsed `.obj` file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjModel {
    pub groups: Vec<ObjGroup>,
}

/// A group with its material resolved, ready to be materialized.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedPart {
    pub name: String,
    pub mesh: MeshData,
    pub material: Material,
}

#[derive(Clone, Copy)]
struct Corner {
    position: usize,
    uv: Option<usize>,
    normal: Option<usize>,
}

impl ObjModel {
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut positions: Vec<[f32; 3]> = Vec::new();
        let mut uvs: Vec<[f32; 2]> = Vec::new();
        let mut normals: Vec<[f32; 3]> = Vec::new();

        let mut groups: Vec<ObjGroup> = vec![ObjGroup::default()];

        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            let raw = raw.trim();
            if raw.is_empty() || raw.starts_with('#') {
                continue;
            }
            let mut tokens = raw.split_whitespace();
            let keyword = tokens.next().unwrap_or_default();

            match keyword {
                "v" => positions.push(parse_floats::<3>(tokens, line, "v")?),
                "vn" => normals.push(parse_floats::<3>(tokens, line, "vn")?),
                "vt" => uvs.push(parse_floats::<2>(tokens, line, "vt")?),
                "o" | "g" => {
                    let name = tokens.collect::<Vec<_>>().join(" ");
                    let current = last_group(&mut groups);
                    if current.mesh.is_empty() {
                        current.name = name;
                    } else {
                        let material = current.material.clone();
                        groups.push(ObjGroup { name, material, mesh: MeshData::default() });
                    }
                }
                "usemtl" => {
                    let material = Some(tokens.collect::<Vec<_>>().join(" "));
                    let current = last_group(&mut groups);
                    if current.mesh.is_empty() {
                        current.material = material;
                    } else {
                        let name = current.name.clone();
                        groups.push(ObjGroup { name, material, mesh: MeshData::default() });
                    }
                }
                "f" => {
                    let corners = tokens
                        .map(|t| parse_corner(t, line, positions.len(), uvs.len(), normals.len()))
                        .collect::<Result<Vec<Corner>, _>>()?;
                    if corners.len() < 3 {
                        return Err(ParseError::Arity { line, keyword: "f", expected: 3 });
                    }
                    let mesh = &mut last_group(&mut groups).mesh;
                    // Fan triangulation for quads and n-gons.
                    for i in 1..corners.len() - 1 {
                        let tri = [corners[0], corners[i], corners[i + 1]];
                        push_triangle(mesh, &tri, &positions, &uvs, &normals);
                    }
                }
                // s, l, p, mtllib: nothing to draw.
                _ => {}
            }
        }

        groups.retain(|g| !g.mesh.is_empty());
        Ok(Self { groups })
    }

    pub fn vertex_count(&self) -> usize {
        self.groups.iter().map(|g| g.mesh.vertex_count()).sum()
    }

    /// Pair every group with its material. Unknown names get the default
    /// lit material, as a browser loader would.
    pub fn resolve(self, materials: &MaterialSet) -> Vec<LoadedPart> {
        self.groups
            .into_iter()
            .map(|g| {
                let material = match g.material.as_deref() {
                    Some(name) => materials.get(name).cloned().unwrap_or_else(|| {
                        log::warn!("material '{}' not in library, using default", name);
                        Material::default()
                    }),
                    None => Material::default(),
                };
                LoadedPart {
                    name: g.name,
                    mesh: g.mesh,
                    material,
                }
            })
            .collect()
    }
}

fn last_group(groups: &mut Vec<ObjGroup>) -> &mut ObjGroup {
    if groups.is_empty() {
        groups.push(ObjGroup::default());
    }
    let last = groups.len() - 1;
    &mut groups[last]
}

fn parse_floats<'a, const N: usize>(
    tokens: impl Iterator<Item = &'a str>,
    line: usize,
    keyword: &'static str,
) -> Result<[f32; N], ParseError> {
    let mut out = [0.0f32; N];
    let mut count = 0;
    // Extra components (w, vertex colors) are ignored.
    for (slot, token) in out.iter_mut().zip(tokens) {
        *slot = token.parse::<f32>().map_err(|_| ParseError::Number {
            line,
            text: token.to_string(),
        })?;
        count += 1;
    }
    if count < N {
        return Err(ParseError::Arity { line, keyword, expected: N });
    }
    Ok(out)
}

fn resolve_index(token: &str, line: usize, len: usize) -> Result<usize, ParseError> {
    let index = token.parse::<i64>().map_err(|_| ParseError::Number {
        line,
        text: token.to_string(),
    })?;
    let resolved = if index > 0 {
        index - 1
    } else {
        len as i64 + index
    };
    if index == 0 || resolved < 0 || resolved >= len as i64 {
        return Err(ParseError::Index { line, index });
    }
    Ok(resolved as usize)
}

fn parse_corner(
    token: &str,
    line: usize,
    n_pos: usize,
    n_uv: usize,
    n_norm: usize,
) -> Result<Corner, ParseError> {
    let mut parts = token.split('/');
    let position = resolve_index(parts.next().unwrap_or_default(), line, n_pos)?;
    let uv = match parts.next() {
        Some(t) if !t.is_empty() => Some(resolve_index(t, line, n_uv)?),
        _ => None,
    };
    let normal = match parts.next() {
        Some(t) if !t.is_empty() => Some(resolve_index(t, line, n_norm)?),
        _ => None,
    };
    Ok(Corner { position, uv, normal })
}

fn push_triangle(
    mesh: &mut MeshData,
    tri: &[Corner; 3],
    positions: &[[f32; 3]],
    uvs: &[[f32; 2]],
    normals: &[[f32; 3]],
) {
    let p = (*tri).map(|c| Vec3::from_array(positions[c.position]));
    let face_normal = (p[1] - p[0]).cross(p[2] - p[0]).normalize_or_zero();

    for (corner, pos) in tri.iter().zip(p) {
        let normal = corner
            .normal
            .map(|n| normals[n])
            .unwrap_or(face_normal.to_array());
        let uv = corner.uv.map(|t| uvs[t]).unwrap_or([0.0, 0.0]);
        mesh.push_vertex(pos.to_array(), normal, uv);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::mtl::MaterialLibrary;

    const QUAD_OBJ: &str = "\
# quad
mtllib quad.mtl
o Quad
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
usemtl Surface
s off
f 1/1/1 2/2/1 3/3/1 4/4/1
";

    #[test]
    fn quad_is_fan_triangulated() {
        let model = ObjModel::parse(QUAD_OBJ).unwrap();
        assert_eq!(model.groups.len(), 1);
        let g = &model.groups[0];
        assert_eq!(g.name, "Quad");
        assert_eq!(g.material.as_deref(), Some("Surface"));
        assert_eq!(g.mesh.triangle_count(), 2);
        assert_eq!(g.mesh.uvs[2], [1.0, 1.0]);
        assert!(g.mesh.normals.iter().all(|n| *n == [0.0, 0.0, 1.0]));
    }

    #[test]
    fn negative_indices_and_missing_normals() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n";
        let model = ObjModel::parse(text).unwrap();
        let mesh = &model.groups[0].mesh;
        assert_eq!(mesh.vertex_count(), 3);
        // Computed from winding: +Z.
        assert!((Vec3::from_array(mesh.normals[0]) - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn usemtl_splits_groups() {
        let text = "\
v 0 0 0
v 1 0 0
v 0 1 0
o Ball
usemtl A
f 1 2 3
usemtl B
f 1 3 2
";
        let model = ObjModel::parse(text).unwrap();
        assert_eq!(model.groups.len(), 2);
        assert_eq!(model.groups[0].name, "Ball");
        assert_eq!(model.groups[1].name, "Ball");
        assert_eq!(model.groups[1].material.as_deref(), Some("B"));
        assert_eq!(model.vertex_count(), 6);
    }

    #[test]
    fn out_of_range_face_is_an_error() {
        let err = ObjModel::parse("v 0 0 0\nf 1 2 3\n").unwrap_err();
        assert_eq!(err, ParseError::Index { line: 2, index: 2 });
    }

    #[test]
    fn resolve_uses_library_and_falls_back_to_default() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nusemtl Known\nf 1 2 3\nusemtl Missing\nf 1 2 3\n";
        let set = MaterialLibrary::parse("newmtl Known\nKd 1 0 0\n").unwrap().preload("x/");
        let parts = ObjModel::parse(text).unwrap().resolve(&set);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].material.color().r, 1.0);
        assert_eq!(parts[0].material.color().g, 0.0);
        assert_eq!(parts[1].material, Material::default());
    }
}
