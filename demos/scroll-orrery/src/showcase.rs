/// Scroll Orrery: a scroll-driven fly-through of eight OBJ planets.
///
/// Page scroll moves the camera along a fixed line and nudges the moon and
/// uranus decorations; pointer drag and wheel orbit the camera on top.

use glam::Vec3;
use rand_chacha::ChaCha8Rng;

use orrery_engine::*;

use crate::bodies::*;

pub struct ScrollOrrery {
    pub moon: Option<EntityId>,
    pub uranus: Option<EntityId>,
    pub grizz: Option<EntityId>,
    pub stars: Vec<EntityId>,
}

impl ScrollOrrery {
    pub fn new() -> Self {
        Self {
            moon: None,
            uranus: None,
            grizz: None,
            stars: Vec::new(),
        }
    }

    fn spawn_decorations(&mut self, ctx: &mut EngineContext) {
        let sphere = ctx
            .geometries
            .insert(MeshData::sphere(MOON_RADIUS, MOON_SEGMENTS, MOON_SEGMENTS));
        let cube = ctx
            .geometries
            .insert(MeshData::cuboid(GRIZZ_SIZE, GRIZZ_SIZE, GRIZZ_SIZE));

        let moon_material = Material::Basic(
            BasicMaterial::textured(TextureRef::new(MOON_MAP))
                .with_normal_map(TextureRef::new(MOON_NORMAL_MAP)),
        );
        let id = ctx.next_id();
        self.moon = Some(ctx.spawn(
            Entity::new(id)
                .with_tag("moon")
                .with_mesh(Mesh::new(sphere, moon_material))
                .with_pos(MOON_POSITION),
        ));

        let id = ctx.next_id();
        self.uranus = Some(ctx.spawn(
            Entity::new(id)
                .with_tag("uranus-decoration")
                .with_mesh(Mesh::new(
                    sphere,
                    Material::Basic(BasicMaterial::textured(TextureRef::new(URANUS_MAP))),
                ))
                .with_pos(URANUS_POSITION),
        ));

        let id = ctx.next_id();
        self.grizz = Some(ctx.spawn(
            Entity::new(id)
                .with_tag("grizz")
                .with_mesh(Mesh::new(
                    cube,
                    Material::Basic(BasicMaterial::textured(TextureRef::new(GRIZZ_MAP))),
                ))
                .with_pos(GRIZZ_POSITION),
        ));
    }
}

impl Default for ScrollOrrery {
    fn default() -> Self {
        Self::new()
    }
}

impl Showcase for ScrollOrrery {
    fn init(&mut self, ctx: &mut EngineContext, rng: &mut ChaCha8Rng) {
        ctx.scene.background = Some(TextureRef::new(BACKGROUND));
        ctx.scene.ambient = AmbientLight { color: Color::WHITE, intensity: 1.0 };

        let stars = ctx.config.stars;
        self.stars = scatter_stars(ctx, rng, &stars);
        self.spawn_decorations(ctx);

        for id in [self.moon, self.uranus].into_iter().flatten() {
            ctx.scroll.bind_spinner(id);
        }

        let grizz = self.grizz;
        ctx.scheduler.register(
            "global",
            Box::new(move |scene: &mut SceneRegistry, rig: &mut CameraRig| {
                if let Some(e) = grizz.and_then(|id| scene.get_mut(id)) {
                    e.transform.rotate_by(Vec3::splat(GRIZZ_SPIN));
                }
                rig.update_orbit();
            }),
        );

        for request in planet_requests() {
            ctx.request_load(request);
        }
        log::info!(
            "Scroll orrery: {} stars, {} bodies requested",
            self.stars.len(),
            PLANET_COUNT
        );
    }
}
