/// Scene data: the eight loaded planets and the hand-placed decorations.
///
/// Positions are absolute world coordinates; planets sit far along +Z so the
/// scroll-driven camera reaches them one after another.

use glam::Vec3;
use orrery_engine::LoadRequest;

pub const PLANET_COUNT: usize = 8;

/// One row of the planet table.
pub struct PlanetSpec {
    pub name: &'static str,
    pub scale: f32,
    pub position: [f32; 3],
    /// Radians per frame around Y.
    pub rotation_speed: f32,
}

pub const PLANETS: [PlanetSpec; PLANET_COUNT] = [
    PlanetSpec { name: "mercury", scale: 0.3, position: [50.0, 20.0, 95.0], rotation_speed: 0.003 },
    PlanetSpec { name: "venus", scale: 0.38, position: [155.0, 83.0, 205.0], rotation_speed: -0.003 },
    PlanetSpec { name: "earth", scale: 0.35, position: [195.0, 170.0, 395.0], rotation_speed: 0.03 },
    PlanetSpec { name: "mars", scale: 0.3, position: [325.0, 265.0, 555.0], rotation_speed: 0.025 },
    PlanetSpec { name: "jupiter", scale: 0.3, position: [362.0, 333.0, 715.0], rotation_speed: 0.05 },
    PlanetSpec { name: "saturn", scale: 0.3, position: [475.0, 410.0, 847.0], rotation_speed: 0.04 },
    PlanetSpec { name: "uranus", scale: 0.3, position: [520.0, 490.0, 1030.0], rotation_speed: -0.03 },
    PlanetSpec { name: "neptune", scale: 0.3, position: [642.0, 573.0, 1178.0], rotation_speed: 0.04 },
];

/// Load requests in table order, using the `<name>/<name>.{mtl,obj}` layout.
pub fn planet_requests() -> Vec<LoadRequest> {
    PLANETS
        .iter()
        .map(|p| LoadRequest::conventional(p.name, p.scale, Vec3::from_array(p.position), p.rotation_speed))
        .collect()
}

// ── Decorations ─────────────────────────────────────────────────────

pub const BACKGROUND: &str = "space.avif";

pub const MOON_RADIUS: f32 = 7.0;
pub const MOON_SEGMENTS: u32 = 32;
pub const MOON_MAP: &str = "moon.jpeg";
pub const MOON_NORMAL_MAP: &str = "crater.jpeg";
pub const MOON_POSITION: Vec3 = Vec3::new(-10.0, 0.0, 30.0);

pub const URANUS_MAP: &str = "uranus.webp";
pub const URANUS_POSITION: Vec3 = Vec3::new(-20.0, 0.0, -40.0);

pub const GRIZZ_SIZE: f32 = 5.0;
pub const GRIZZ_MAP: &str = "grizz.JPG";
pub const GRIZZ_POSITION: Vec3 = Vec3::new(40.0, 50.0, 10.0);
/// Added to every grizz rotation axis per frame.
pub const GRIZZ_SPIN: f32 = 0.01;
