//! Random star field: many small identical spheres scattered in a cube.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::api::game::EngineContext;
use crate::api::types::EntityId;
use crate::components::entity::{Entity, EntityKind};
use crate::components::material::{Color, Material, StandardMaterial};
use crate::components::mesh::{Mesh, MeshData};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarFieldConfig {
    pub count: u32,
    /// Edge length of the cube; coordinates fall in `[-spread/2, spread/2]`.
    pub spread: f32,
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    pub color: Color,
}

impl Default for StarFieldConfig {
    fn default() -> Self {
        Self {
            count: 200,
            spread: 100.0,
            radius: 0.25,
            width_segments: 24,
            height_segments: 24,
            color: Color::WHITE,
        }
    }
}

/// Uniform float in `[-spread/2, spread/2]`.
fn rand_float_spread(rng: &mut impl Rng, spread: f32) -> f32 {
    let half = spread * 0.5;
    if half <= 0.0 {
        return 0.0;
    }
    rng.random_range(-half..=half)
}

/// Spawn `config.count` stars into the scene. All of them share one geometry.
pub fn scatter_stars(
    ctx: &mut EngineContext,
    rng: &mut impl Rng,
    config: &StarFieldConfig,
) -> Vec<EntityId> {
    let geometry = ctx.geometries.insert(MeshData::sphere(
        config.radius,
        config.width_segments,
        config.height_segments,
    ));
    let material = Material::Standard(StandardMaterial::default().with_color(config.color));

    let spread = if config.spread.is_finite() {
        config.spread
    } else {
        let fallback = StarFieldConfig::default().spread;
        log::error!("Invalid star spread {}, using {}", config.spread, fallback);
        fallback
    };

    let mut ids = Vec::with_capacity(config.count as usize);
    for _ in 0..config.count {
        let position = Vec3::new(
            rand_float_spread(rng, spread),
            rand_float_spread(rng, spread),
            rand_float_spread(rng, spread),
        );
        let id = ctx.next_id();
        ctx.spawn(
            Entity::new(id)
                .with_tag("star")
                .with_kind(EntityKind::Star)
                .with_mesh(Mesh::new(geometry, material.clone()))
                .with_pos(position),
        );
        ids.push(id);
    }

    log::info!("Scattered {} stars", ids.len());
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::game::OrreryConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn scatter(seed: u64, config: &StarFieldConfig) -> (EngineContext, Vec<EntityId>) {
        let mut ctx = EngineContext::new(OrreryConfig::default());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let ids = scatter_stars(&mut ctx, &mut rng, config);
        (ctx, ids)
    }

    #[test]
    fn spawns_exactly_count_stars_in_range() {
        let (ctx, ids) = scatter(7, &StarFieldConfig::default());
        assert_eq!(ids.len(), 200);
        assert_eq!(ctx.scene.count_kind(EntityKind::Star), 200);
        for id in &ids {
            let p = ctx.scene.get(*id).unwrap().position();
            assert!(p.abs().max_element() <= 50.0, "star out of range: {:?}", p);
        }
    }

    #[test]
    fn stars_share_one_lit_white_geometry() {
        let (ctx, ids) = scatter(1, &StarFieldConfig { count: 5, ..Default::default() });
        assert_eq!(ctx.geometries.len(), 1);
        let mut geometry = None;
        for id in ids {
            ctx.scene.get(id).unwrap().model.for_each_mesh(&mut |mesh| {
                assert!(mesh.material.is_lit());
                assert_eq!(mesh.material.color(), Color::WHITE);
                assert_eq!(*geometry.get_or_insert(mesh.geometry), mesh.geometry);
            });
        }
    }

    #[test]
    fn same_seed_same_sky() {
        let config = StarFieldConfig { count: 20, ..Default::default() };
        let (a, ids_a) = scatter(42, &config);
        let (b, ids_b) = scatter(42, &config);
        for (x, y) in ids_a.iter().zip(&ids_b) {
            assert_eq!(a.scene.get(*x).unwrap().position(), b.scene.get(*y).unwrap().position());
        }
    }

    #[test]
    fn non_finite_spread_falls_back_to_default() {
        for spread in [f32::INFINITY, f32::NAN] {
            let (ctx, ids) = scatter(5, &StarFieldConfig { count: 10, spread, ..Default::default() });
            assert_eq!(ids.len(), 10);
            for id in &ids {
                let p = ctx.scene.get(*id).unwrap().position();
                assert!(p.is_finite());
                assert!(p.abs().max_element() <= 50.0);
            }
        }
    }

    #[test]
    fn zero_count_spawns_nothing() {
        let (ctx, ids) = scatter(3, &StarFieldConfig { count: 0, ..Default::default() });
        assert!(ids.is_empty());
        assert_eq!(ctx.scene.count_kind(EntityKind::Star), 0);
    }
}
