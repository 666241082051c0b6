//! Two-stage body loading: material library first, then geometry.
//!
//! `load_body` only does I/O and parsing, so it can run as a detached
//! future. Its result travels through a `LoadInbox` and is materialized
//! into the scene by `EngineContext::complete_load` on the next tick.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::api::types::{EntityId, GeometryId};
use crate::assets::error::{LoadError, StageError};
use crate::assets::mtl::MaterialLibrary;
use crate::assets::obj::{LoadedPart, ObjModel};
use crate::assets::request::LoadRequest;
use crate::assets::source::AssetSource;
use crate::components::entity::{Entity, EntityKind};
use crate::components::mesh::{Mesh, Node};
use crate::core::geometry::GeometryLibrary;

/// Parsed meshes with their lit materials, not yet in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedBody {
    pub parts: Vec<LoadedPart>,
}

/// Fetch + parse both files for one request.
pub async fn load_body<S: AssetSource>(
    source: &S,
    request: &LoadRequest,
) -> Result<LoadedBody, LoadError> {
    let material_stage = |source: StageError| LoadError::Material {
        file: request.material_file.clone(),
        source,
    };
    let geometry_stage = |source: StageError| LoadError::Geometry {
        file: request.geometry_file.clone(),
        source,
    };

    let mtl_text = source
        .fetch_text(&request.material_path())
        .await
        .map_err(|e| material_stage(e.into()))?;
    let library = MaterialLibrary::parse(&mtl_text).map_err(|e| material_stage(e.into()))?;
    let materials = library.preload(&request.base_path);

    let obj_text = source
        .fetch_text(&request.geometry_path())
        .await
        .map_err(|e| geometry_stage(e.into()))?;
    let model = ObjModel::parse(&obj_text).map_err(|e| geometry_stage(e.into()))?;

    Ok(LoadedBody {
        parts: model.resolve(&materials),
    })
}

/// Build the planet entity: register geometry, swap every mesh material
/// for its unlit variant, apply the uniform scale and absolute position.
pub fn materialize(
    id: EntityId,
    request: &LoadRequest,
    body: LoadedBody,
    geometries: &mut GeometryLibrary,
) -> Entity {
    let mut root = Node::group(request.name.clone());
    for part in body.parts {
        let geometry: GeometryId = geometries.insert(part.mesh);
        root.children.push(Node::from_mesh(part.name, Mesh::new(geometry, part.material)));
    }

    root.for_each_mesh_mut(&mut |mesh| {
        mesh.material = mesh.material.unlit();
    });

    Entity::new(id)
        .with_tag(request.name.clone())
        .with_kind(EntityKind::Planet)
        .with_scale(request.scale)
        .with_pos(request.position)
        .with_model(root)
}

/// What to do when the material stage fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MaterialFailurePolicy {
    /// Log at error level and record the failure in the load report.
    #[default]
    Report,
    /// Log at debug level only; the body silently never appears.
    Swallow,
}

/// A finished pipeline, successful or not.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub request: LoadRequest,
    pub result: Result<LoadedBody, LoadError>,
}

/// Single-threaded mailbox between detached load futures and the frame loop.
/// Outcomes come out in completion order.
#[derive(Debug, Clone, Default)]
pub struct LoadInbox {
    queue: Rc<RefCell<VecDeque<LoadOutcome>>>,
}

impl LoadInbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&self, outcome: LoadOutcome) {
        self.queue.borrow_mut().push_back(outcome);
    }

    pub fn drain(&self) -> Vec<LoadOutcome> {
        self.queue.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

/// Run one pipeline to completion and post the outcome.
pub async fn run_pipeline<S: AssetSource>(source: &S, request: LoadRequest, inbox: LoadInbox) {
    let result = load_body(source, &request).await;
    inbox.post(LoadOutcome { request, result });
}

/// One recorded failure, as shown to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadFailure {
    pub name: String,
    pub file: String,
    pub stage: &'static str,
    pub message: String,
}

/// Counts for the host UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadReport {
    pub issued: usize,
    pub loaded: Vec<String>,
    pub failed: Vec<LoadFailure>,
    pub in_flight: usize,
}

/// Bookkeeping for every request issued so far.
#[derive(Debug, Default)]
pub struct LoadTracker {
    pending: Vec<LoadRequest>,
    issued: usize,
    settled: usize,
    loaded: Vec<String>,
    failures: Vec<LoadFailure>,
    policy: MaterialFailurePolicy,
}

impl LoadTracker {
    pub fn new(policy: MaterialFailurePolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    pub fn policy(&self) -> MaterialFailurePolicy {
        self.policy
    }

    /// Queue a request; the runner picks it up and starts its pipeline.
    pub fn queue(&mut self, request: LoadRequest) {
        self.issued += 1;
        self.pending.push(request);
    }

    /// Requests not yet handed to an executor.
    pub fn take_pending(&mut self) -> Vec<LoadRequest> {
        std::mem::take(&mut self.pending)
    }

    pub fn record_loaded(&mut self, request: &LoadRequest) {
        self.settled += 1;
        self.loaded.push(request.name.clone());
    }

    /// Log the failure according to its stage and the policy.
    pub fn record_failure(&mut self, request: &LoadRequest, err: &LoadError) {
        self.settled += 1;
        if err.is_material() && self.policy == MaterialFailurePolicy::Swallow {
            log::debug!("{}: material stage failed, skipping: {}", request.name, err);
            return;
        }

        match err {
            LoadError::Geometry { file, .. } => log::error!("Error loading {}: {}", file, err),
            LoadError::Material { file, .. } => {
                log::error!("Error loading {} for {}: {}", file, request.name, err)
            }
        }
        self.failures.push(LoadFailure {
            name: request.name.clone(),
            file: err.file().to_string(),
            stage: if err.is_material() { "material" } else { "geometry" },
            message: err.to_string(),
        });
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    pub fn failures(&self) -> &[LoadFailure] {
        &self.failures
    }

    /// Issued but not yet settled.
    pub fn in_flight(&self) -> usize {
        self.issued.saturating_sub(self.settled)
    }

    pub fn report(&self) -> LoadReport {
        LoadReport {
            issued: self.issued,
            loaded: self.loaded.clone(),
            failed: self.failures.clone(),
            in_flight: self.in_flight(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::error::AssetError;
    use crate::assets::source::MemorySource;
    use glam::Vec3;

    const MTL: &str = "newmtl Rock\nKd 0.5 0.4 0.3\nKe 0.2 0.2 0.2\nmap_Kd rock.jpg\nmap_Bump rock_n.jpg\n";
    const OBJ: &str = "\
v 0 0 0
v 1 0 0
v 0 1 0
v 0 0 1
o Core
usemtl Rock
f 1 2 3
o Crust
usemtl Rock
f 1 3 4
";

    fn request() -> LoadRequest {
        LoadRequest::conventional("rock", 0.38, Vec3::new(155.0, 83.0, 205.0), -0.003)
    }

    fn source() -> MemorySource {
        MemorySource::new()
            .with_file("rock/rock.mtl", MTL)
            .with_file("rock/rock.obj", OBJ)
    }

    #[test]
    fn load_body_resolves_materials() {
        let body = pollster::block_on(load_body(&source(), &request())).unwrap();
        assert_eq!(body.parts.len(), 2);
        assert!(body.parts.iter().all(|p| p.material.is_lit()));
        assert_eq!(
            body.parts[0].material.map().map(|t| t.path()),
            Some("rock/rock.jpg")
        );
    }

    #[test]
    fn materialize_applies_transform_and_unlit_materials() {
        let body = pollster::block_on(load_body(&source(), &request())).unwrap();
        let mut geometries = GeometryLibrary::new();
        let entity = materialize(EntityId(5), &request(), body, &mut geometries);

        assert_eq!(entity.kind, EntityKind::Planet);
        assert_eq!(entity.transform.scale, Vec3::splat(0.38));
        assert_eq!(entity.position(), Vec3::new(155.0, 83.0, 205.0));
        assert_eq!(entity.model.mesh_count(), 2);
        assert_eq!(geometries.len(), 2);

        entity.model.for_each_mesh(&mut |mesh| {
            assert!(!mesh.material.is_lit());
            assert!(mesh.material.emissive().is_black());
            assert!(mesh.material.normal_map().is_none());
            assert_eq!(mesh.material.map().map(|t| t.path()), Some("rock/rock.jpg"));
            assert!((mesh.material.color().r - 0.5).abs() < 1e-6);
        });
    }

    #[test]
    fn missing_material_fails_material_stage() {
        let src = MemorySource::new().with_file("rock/rock.obj", OBJ);
        let err = pollster::block_on(load_body(&src, &request())).unwrap_err();
        assert!(err.is_material());
        assert_eq!(err.file(), "rock.mtl");
    }

    #[test]
    fn network_error_fails_geometry_stage() {
        let mut src = source();
        src.fail("rock/rock.obj");
        let err = pollster::block_on(load_body(&src, &request())).unwrap_err();
        match err {
            LoadError::Geometry { file, source } => {
                assert_eq!(file, "rock.obj");
                assert!(matches!(source, StageError::Fetch(AssetError::Fetch { .. })));
            }
            other => panic!("expected geometry failure, got {:?}", other),
        }
    }

    #[test]
    fn malformed_geometry_is_a_parse_failure() {
        let src = source().with_file("rock/rock.obj", "v 0 0 0\nf 1 2 3\n");
        let err = pollster::block_on(load_body(&src, &request())).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Geometry { source: StageError::Parse(_), .. }
        ));
    }

    #[test]
    fn inbox_preserves_completion_order() {
        let inbox = LoadInbox::new();
        let src = source();
        let mut a = request();
        a.name = "a".into();
        let mut b = request();
        b.name = "b".into();

        pollster::block_on(run_pipeline(&src, b, inbox.clone()));
        pollster::block_on(run_pipeline(&src, a, inbox.clone()));

        let names: Vec<String> = inbox.drain().into_iter().map(|o| o.request.name).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert!(inbox.is_empty());
    }

    #[test]
    fn tracker_policy_controls_reporting() {
        let err = LoadError::Material {
            file: "rock.mtl".into(),
            source: StageError::Fetch(AssetError::NotFound("rock/rock.mtl".into())),
        };

        let mut report = LoadTracker::new(MaterialFailurePolicy::Report);
        report.queue(request());
        report.record_failure(&request(), &err);
        assert_eq!(report.failures().len(), 1);
        assert_eq!(report.failures()[0].stage, "material");
        assert_eq!(report.in_flight(), 0);

        let mut swallow = LoadTracker::new(MaterialFailurePolicy::Swallow);
        swallow.queue(request());
        swallow.record_failure(&request(), &err);
        assert!(swallow.failures().is_empty());
        assert_eq!(swallow.in_flight(), 0);
    }

    #[test]
    fn geometry_failures_are_reported_under_either_policy() {
        let err = LoadError::Geometry {
            file: "rock.obj".into(),
            source: StageError::Fetch(AssetError::NotFound("rock/rock.obj".into())),
        };
        let mut swallow = LoadTracker::new(MaterialFailurePolicy::Swallow);
        swallow.queue(request());
        swallow.record_failure(&request(), &err);
        assert_eq!(swallow.report().failed.len(), 1);
    }

    #[test]
    fn settling_an_unqueued_request_keeps_report_sane() {
        let mut tracker = LoadTracker::new(MaterialFailurePolicy::Report);
        tracker.record_loaded(&request());
        let report = tracker.report();
        assert_eq!(report.issued, 0);
        assert_eq!(report.in_flight, 0);
        assert_eq!(report.loaded, vec!["rock".to_string()]);
    }
}
