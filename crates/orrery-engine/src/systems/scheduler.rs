//! Per-refresh task runner.
//!
//! One list of animation tasks, run in registration order every tick, followed
//! by the draw. Tasks are never removed.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::api::types::{EntityId, TaskId};
use crate::core::geometry::GeometryLibrary;
use crate::core::scene::SceneRegistry;
use crate::renderer::rig::CameraRig;
use crate::renderer::traits::{FrameData, Renderer};

/// Work done by a task on each tick.
pub type TaskStep = Box<dyn FnMut(&mut SceneRegistry, &mut CameraRig)>;

/// When the scheduler draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RedrawMode {
    /// Once per tick, after every task has run.
    #[default]
    Shared,
    /// After each task, so N tasks draw N times per tick.
    PerTask,
}

pub struct AnimationTask {
    pub id: TaskId,
    pub label: String,
    step: TaskStep,
}

pub struct FrameScheduler {
    tasks: Vec<AnimationTask>,
    mode: RedrawMode,
    next_task: u32,
    ticks: u64,
}

impl FrameScheduler {
    pub fn new(mode: RedrawMode) -> Self {
        Self {
            tasks: Vec::new(),
            mode,
            next_task: 0,
            ticks: 0,
        }
    }

    pub fn mode(&self) -> RedrawMode {
        self.mode
    }

    pub fn register(&mut self, label: impl Into<String>, step: TaskStep) -> TaskId {
        let id = TaskId(self.next_task);
        self.next_task += 1;
        let label = label.into();
        log::debug!("task {} registered: {}", id.0, label);
        self.tasks.push(AnimationTask { id, label, step });
        id
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.tasks.iter().map(|t| t.label.as_str())
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run every task once and draw. Returns the number of draws issued.
    pub fn tick(
        &mut self,
        scene: &mut SceneRegistry,
        rig: &mut CameraRig,
        geometries: &GeometryLibrary,
        renderer: &mut impl Renderer,
    ) -> u32 {
        self.ticks += 1;
        let mut draws = 0;
        for task in &mut self.tasks {
            (task.step)(scene, rig);
            if self.mode == RedrawMode::PerTask {
                renderer.draw(&FrameData { scene, camera: rig.camera(), geometries });
                draws += 1;
            }
        }
        if self.mode == RedrawMode::Shared {
            renderer.draw(&FrameData { scene, camera: rig.camera(), geometries });
            draws += 1;
        }
        draws
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new(RedrawMode::default())
    }
}

/// Step that adds `delta` to an entity's rotation each tick.
pub fn spin(entity: EntityId, delta: Vec3) -> TaskStep {
    Box::new(move |scene: &mut SceneRegistry, _rig: &mut CameraRig| {
        if let Some(e) = scene.get_mut(entity) {
            e.transform.rotate_by(delta);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Entity;
    use crate::renderer::camera::CameraConfig;
    use crate::renderer::rig::CameraPolicy;
    use crate::renderer::traits::NullRenderer;
    use crate::systems::orbit::OrbitConfig;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn rig() -> CameraRig {
        CameraRig::new(&CameraConfig::default(), OrbitConfig::default(), 1.0, CameraPolicy::Composed)
    }

    #[test]
    fn tasks_run_in_registration_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut scheduler = FrameScheduler::default();
        for name in ["global", "mercury", "venus"] {
            let order = order.clone();
            scheduler.register(name, Box::new(move |_: &mut SceneRegistry, _: &mut CameraRig| order.borrow_mut().push(name)));
        }

        let mut scene = SceneRegistry::new();
        let mut rig = rig();
        let geometries = GeometryLibrary::new();
        let mut renderer = NullRenderer::default();
        scheduler.tick(&mut scene, &mut rig, &geometries, &mut renderer);
        scheduler.tick(&mut scene, &mut rig, &geometries, &mut renderer);

        assert_eq!(
            *order.borrow(),
            vec!["global", "mercury", "venus", "global", "mercury", "venus"]
        );
        assert_eq!(scheduler.ticks(), 2);
    }

    #[test]
    fn shared_mode_draws_once_per_tick() {
        let mut scheduler = FrameScheduler::new(RedrawMode::Shared);
        for i in 0..9 {
            scheduler.register(format!("t{}", i), Box::new(|_: &mut SceneRegistry, _: &mut CameraRig| {}));
        }
        let mut renderer = NullRenderer::default();
        let draws = scheduler.tick(
            &mut SceneRegistry::new(),
            &mut rig(),
            &GeometryLibrary::new(),
            &mut renderer,
        );
        assert_eq!(draws, 1);
        assert_eq!(renderer.draws, 1);
    }

    #[test]
    fn per_task_mode_draws_after_every_task() {
        let mut scheduler = FrameScheduler::new(RedrawMode::PerTask);
        for i in 0..9 {
            scheduler.register(format!("t{}", i), Box::new(|_: &mut SceneRegistry, _: &mut CameraRig| {}));
        }
        let mut renderer = NullRenderer::default();
        let draws = scheduler.tick(
            &mut SceneRegistry::new(),
            &mut rig(),
            &GeometryLibrary::new(),
            &mut renderer,
        );
        assert_eq!(draws, 9);
        assert_eq!(renderer.draws, 9);
    }

    #[test]
    fn spin_step_accumulates() {
        let mut scene = SceneRegistry::new();
        scene.insert(Entity::new(EntityId(4)));
        let mut scheduler = FrameScheduler::default();
        scheduler.register("earth", spin(EntityId(4), Vec3::new(0.0, 0.03, 0.0)));

        let mut rig = rig();
        let geometries = GeometryLibrary::new();
        let mut renderer = NullRenderer::default();
        for _ in 0..10 {
            scheduler.tick(&mut scene, &mut rig, &geometries, &mut renderer);
        }
        let y = scene.get(EntityId(4)).unwrap().rotation().y;
        assert!((y - 0.3).abs() < 1e-5);
    }

    #[test]
    fn spin_on_missing_entity_is_a_no_op() {
        let mut scheduler = FrameScheduler::default();
        scheduler.register("ghost", spin(EntityId(99), Vec3::ONE));
        let mut renderer = NullRenderer::default();
        scheduler.tick(&mut SceneRegistry::new(), &mut rig(), &GeometryLibrary::new(), &mut renderer);
        assert_eq!(renderer.draws, 1);
    }
}
