//! Wavefront MTL material libraries.
//!
//! Parsing keeps the raw statements; `preload` turns them into lit
//! `StandardMaterial`s with texture paths resolved against the body directory.

use std::collections::HashMap;

use crate::assets::error::ParseError;
use crate::assets::source::join_path;
use crate::components::material::{Color, Material, StandardMaterial, TextureRef};

/// One `newmtl` block as written in the file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MtlMaterial {
    pub name: String,
    pub ambient: Option<Color>,
    pub diffuse: Option<Color>,
    pub specular: Option<Color>,
    pub emissive: Option<Color>,
    pub shininess: Option<f32>,
    /// `d` (or `1 - Tr`).
    pub dissolve: Option<f32>,
    pub illum: Option<u32>,
    pub map_diffuse: Option<String>,
    pub map_specular: Option<String>,
    pub map_bump: Option<String>,
}

/// Parsed `.mtl` file, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialLibrary {
    pub materials: Vec<MtlMaterial>,
}

impl MaterialLibrary {
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut materials: Vec<MtlMaterial> = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            let raw = raw.trim();
            if raw.is_empty() || raw.starts_with('#') {
                continue;
            }
            let (keyword, rest) = match raw.split_once(char::is_whitespace) {
                Some((k, r)) => (k, r.trim()),
                None => (raw, ""),
            };

            if keyword == "newmtl" {
                materials.push(MtlMaterial {
                    name: rest.to_string(),
                    ..Default::default()
                });
                continue;
            }

            let current = materials.last_mut().ok_or_else(|| ParseError::NoMaterial {
                line,
                keyword: keyword.to_string(),
            })?;

            match keyword {
                "Ka" => current.ambient = Some(parse_color(rest, line, "Ka")?),
                "Kd" => current.diffuse = Some(parse_color(rest, line, "Kd")?),
                "Ks" => current.specular = Some(parse_color(rest, line, "Ks")?),
                "Ke" => current.emissive = Some(parse_color(rest, line, "Ke")?),
                "Ns" => current.shininess = Some(parse_float(first(rest, line, "Ns")?, line)?),
                "d" => current.dissolve = Some(parse_float(first(rest, line, "d")?, line)?),
                "Tr" => {
                    let tr = parse_float(first(rest, line, "Tr")?, line)?;
                    current.dissolve = Some(1.0 - tr);
                }
                "illum" => {
                    let v = first(rest, line, "illum")?;
                    let illum = v.parse::<u32>().map_err(|_| ParseError::Number {
                        line,
                        text: v.to_string(),
                    })?;
                    current.illum = Some(illum);
                }
                "map_Kd" => current.map_diffuse = map_file(rest),
                "map_Ks" => current.map_specular = map_file(rest),
                "map_Bump" | "map_bump" | "bump" | "norm" => current.map_bump = map_file(rest),
                // Ni, Tf, map_Ka, refl, ...: not used by the renderer.
                _ => {}
            }
        }

        Ok(Self { materials })
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Build lit materials with texture paths joined onto `base_path`.
    pub fn preload(&self, base_path: &str) -> MaterialSet {
        let mut materials = HashMap::with_capacity(self.materials.len());
        for m in &self.materials {
            let defaults = StandardMaterial::default();
            let texture = |file: &Option<String>| {
                file.as_deref().map(|f| TextureRef::new(join_path(base_path, f)))
            };
            let material = StandardMaterial {
                color: m.diffuse.unwrap_or(defaults.color),
                map: texture(&m.map_diffuse),
                normal_map: texture(&m.map_bump),
                specular: m.specular.unwrap_or(defaults.specular),
                specular_map: texture(&m.map_specular),
                emissive: m.emissive.unwrap_or(defaults.emissive),
                shininess: m.shininess.unwrap_or(defaults.shininess),
                opacity: m.dissolve.unwrap_or(defaults.opacity),
            };
            materials.insert(m.name.clone(), Material::Standard(material));
        }
        MaterialSet { materials }
    }
}

/// Ready-to-use materials keyed by `newmtl` name.
#[derive(Debug, Clone, Default)]
pub struct MaterialSet {
    materials: HashMap<String, Material>,
}

impl MaterialSet {
    pub fn get(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

fn first<'a>(rest: &'a str, line: usize, keyword: &'static str) -> Result<&'a str, ParseError> {
    rest.split_whitespace().next().ok_or(ParseError::Arity {
        line,
        keyword,
        expected: 1,
    })
}

fn parse_float(text: &str, line: usize) -> Result<f32, ParseError> {
    text.parse::<f32>().map_err(|_| ParseError::Number {
        line,
        text: text.to_string(),
    })
}

fn parse_color(rest: &str, line: usize, keyword: &'static str) -> Result<Color, ParseError> {
    let values = rest
        .split_whitespace()
        .map(|t| parse_float(t, line))
        .collect::<Result<Vec<f32>, _>>()?;
    match values.as_slice() {
        [r, g, b, ..] => Ok(Color::new(*r, *g, *b)),
        // A single value means grey.
        [v] => Ok(Color::new(*v, *v, *v)),
        _ => Err(ParseError::Arity { line, keyword, expected: 3 }),
    }
}

/// Texture statements may carry options (`-bm 1 file.png`); the file is last.
fn map_file(rest: &str) -> Option<String> {
    rest.split_whitespace().last().map(str::to_string)
}
