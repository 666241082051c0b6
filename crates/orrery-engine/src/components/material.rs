use serde::{Deserialize, Serialize};

/// Linear RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// From a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    pub fn is_black(&self) -> bool {
        self.r == 0.0 && self.g == 0.0 && self.b == 0.0
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Path of an image the host renderer loads, relative to the asset root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureRef(pub String);

impl TextureRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &str {
        &self.0
    }
}

/// Lit surface: shaded by the scene lights (Phong-style).
#[derive(Debug, Clone, PartialEq)]
pub struct StandardMaterial {
    pub color: Color,
    pub map: Option<TextureRef>,
    pub normal_map: Option<TextureRef>,
    pub specular: Color,
    pub specular_map: Option<TextureRef>,
    pub emissive: Color,
    /// Phong specular exponent.
    pub shininess: f32,
    /// 1.0 = opaque.
    pub opacity: f32,
}

impl Default for StandardMaterial {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            map: None,
            normal_map: None,
            specular: Color::from_hex(0x111111),
            specular_map: None,
            emissive: Color::BLACK,
            shininess: 30.0,
            opacity: 1.0,
        }
    }
}

impl StandardMaterial {
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// Unlit surface: color and texture only, independent of scene lights.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicMaterial {
    pub color: Color,
    pub map: Option<TextureRef>,
    /// Only used by hand-built decorations; loaded planets never carry one.
    pub normal_map: Option<TextureRef>,
    pub emissive: Color,
}

impl Default for BasicMaterial {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            map: None,
            normal_map: None,
            emissive: Color::BLACK,
        }
    }
}

impl BasicMaterial {
    pub fn textured(map: TextureRef) -> Self {
        Self {
            map: Some(map),
            ..Default::default()
        }
    }

    pub fn with_normal_map(mut self, normal_map: TextureRef) -> Self {
        self.normal_map = Some(normal_map);
        self
    }
}

/// Surface description attached to every mesh.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    Standard(StandardMaterial),
    Basic(BasicMaterial),
}

impl Default for Material {
    fn default() -> Self {
        Material::Standard(StandardMaterial::default())
    }
}

impl Material {
    /// Unlit copy that keeps only `color` and `map`; emissive is forced to black.
    pub fn unlit(&self) -> Material {
        let (color, map) = match self {
            Material::Standard(m) => (m.color, m.map.clone()),
            Material::Basic(m) => (m.color, m.map.clone()),
        };
        Material::Basic(BasicMaterial {
            color,
            map,
            normal_map: None,
            emissive: Color::BLACK,
        })
    }

    /// Whether the shading result depends on scene lights.
    pub fn is_lit(&self) -> bool {
        match self {
            Material::Standard(_) => true,
            Material::Basic(m) => m.normal_map.is_some(),
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Material::Standard(m) => m.color,
            Material::Basic(m) => m.color,
        }
    }

    pub fn emissive(&self) -> Color {
        match self {
            Material::Standard(m) => m.emissive,
            Material::Basic(m) => m.emissive,
        }
    }

    pub fn map(&self) -> Option<&TextureRef> {
        match self {
            Material::Standard(m) => m.map.as_ref(),
            Material::Basic(m) => m.map.as_ref(),
        }
    }

    pub fn normal_map(&self) -> Option<&TextureRef> {
        match self {
            Material::Standard(m) => m.normal_map.as_ref(),
            Material::Basic(m) => m.normal_map.as_ref(),
        }
    }

    pub fn opacity(&self) -> f32 {
        match self {
            Material::Standard(m) => m.opacity,
            Material::Basic(_) => 1.0,
        }
    }
}
