//! Pointer orbit controls.
//!
//! Drag with the primary button to orbit around `target`, with the middle
//! button or the wheel to dolly, with the secondary button to pan. Gestures
//! only accumulate a pending delta; `take_delta` hands it to the camera rig
//! once per frame.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::input::queue::InputEvent;
use crate::renderer::camera::Camera3D;

/// Keeps the polar angle off the poles.
const POLAR_EPS: f32 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub enable_pan: bool,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    /// Canvas height in CSS pixels; a full-height drag is one full turn.
    pub viewport_height: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            enable_pan: true,
            min_distance: 0.0,
            max_distance: 100_000.0,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            viewport_height: 900.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragMode {
    Rotate,
    Dolly,
    Pan,
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    mode: DragMode,
    last: Vec2,
}

/// Gesture result for one frame, in spherical terms around the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitDelta {
    /// Added to the azimuth (around world +Y).
    pub theta: f32,
    /// Added to the polar angle (from world +Y).
    pub phi: f32,
    /// Multiplies the orbit radius.
    pub scale: f32,
    /// World-space target translation.
    pub pan: Vec3,
}

impl Default for OrbitDelta {
    fn default() -> Self {
        Self {
            theta: 0.0,
            phi: 0.0,
            scale: 1.0,
            pan: Vec3::ZERO,
        }
    }
}

impl OrbitDelta {
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

/// Radius / polar / azimuth around a center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub phi: f32,
    pub theta: f32,
}

impl Spherical {
    pub fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self { radius, phi: 0.0, theta: 0.0 };
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn to_offset(self) -> Vec3 {
        let sin_phi_r = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_r * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_r * self.theta.cos(),
        )
    }
}

pub struct OrbitController {
    pub config: OrbitConfig,
    /// Point the camera orbits around.
    pub target: Vec3,
    drag: Option<Drag>,
    pending_theta: f32,
    pending_phi: f32,
    pending_scale: f32,
    /// Pan in pixels; turned into world units against the camera at take time.
    pending_pan: Vec2,
}

impl OrbitController {
    pub fn new(config: OrbitConfig) -> Self {
        Self {
            config,
            target: Vec3::ZERO,
            drag: None,
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_scale: 1.0,
            pending_pan: Vec2::ZERO,
        }
    }

    fn zoom_scale(&self) -> f32 {
        0.95f32.powf(self.config.zoom_speed)
    }

    /// Feed one host event. Returns true if it was a pointer/wheel gesture.
    pub fn handle(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::PointerDown { x, y, button } => {
                let mode = match button {
                    0 => DragMode::Rotate,
                    1 => DragMode::Dolly,
                    _ if self.config.enable_pan => DragMode::Pan,
                    _ => return true,
                };
                self.drag = Some(Drag { mode, last: Vec2::new(x, y) });
                true
            }
            InputEvent::PointerMove { x, y } => {
                let Some(drag) = self.drag.as_mut() else {
                    return true;
                };
                let pos = Vec2::new(x, y);
                let delta = pos - drag.last;
                drag.last = pos;
                let mode = drag.mode;
                match mode {
                    DragMode::Rotate => self.rotate(delta),
                    DragMode::Dolly => {
                        if delta.y > 0.0 {
                            self.dolly_out();
                        } else if delta.y < 0.0 {
                            self.dolly_in();
                        }
                    }
                    DragMode::Pan => self.pending_pan += delta * self.config.pan_speed,
                }
                true
            }
            InputEvent::PointerUp { .. } => {
                self.drag = None;
                true
            }
            InputEvent::Wheel { delta_y } => {
                if delta_y < 0.0 {
                    self.dolly_in();
                } else if delta_y > 0.0 {
                    self.dolly_out();
                }
                true
            }
            InputEvent::Scroll { .. } => false,
        }
    }

    fn rotate(&mut self, delta: Vec2) {
        let h = self.config.viewport_height.max(1.0);
        self.pending_theta -= TAU * delta.x / h * self.config.rotate_speed;
        self.pending_phi -= TAU * delta.y / h * self.config.rotate_speed;
    }

    fn dolly_in(&mut self) {
        self.pending_scale *= self.zoom_scale();
    }

    fn dolly_out(&mut self) {
        self.pending_scale /= self.zoom_scale();
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Hand over and reset everything accumulated since the last frame.
    /// Pan is resolved in the camera's screen plane at its current distance.
    pub fn take_delta(&mut self, camera: &Camera3D) -> OrbitDelta {
        let mut pan = Vec3::ZERO;
        if self.pending_pan != Vec2::ZERO {
            let h = self.config.viewport_height.max(1.0);
            let distance = (camera.position - self.target).length()
                * (camera.fov_y_degrees.to_radians() / 2.0).tan();
            let world = camera.world_matrix();
            let right = world.x_axis.truncate();
            let up = world.y_axis.truncate();
            pan = right * (-2.0 * self.pending_pan.x * distance / h)
                + up * (2.0 * self.pending_pan.y * distance / h);
        }

        let delta = OrbitDelta {
            theta: self.pending_theta,
            phi: self.pending_phi,
            scale: self.pending_scale,
            pan,
        };
        self.pending_theta = 0.0;
        self.pending_phi = 0.0;
        self.pending_scale = 1.0;
        self.pending_pan = Vec2::ZERO;
        delta
    }

    fn polar_limits(&self) -> (f32, f32) {
        let lo = self.config.min_polar_angle.max(POLAR_EPS);
        let hi = self.config.max_polar_angle.min(PI - POLAR_EPS).max(lo);
        (lo, hi)
    }

    fn distance_limits(&self) -> (f32, f32) {
        let near = self.config.min_distance.max(0.0);
        (near, self.config.max_distance.max(near))
    }

    /// Spherical position of `position` around `center` after `delta`,
    /// with polar and distance limits applied.
    pub fn orbit_point(&self, position: Vec3, center: Vec3, delta: &OrbitDelta) -> Vec3 {
        let (lo, hi) = self.polar_limits();
        let (near, far) = self.distance_limits();
        let mut s = Spherical::from_offset(position - center);
        s.theta += delta.theta;
        s.phi = (s.phi + delta.phi).clamp(lo, hi);
        s.radius = (s.radius * delta.scale).clamp(near, far);
        center + s.to_offset()
    }

    /// `delta` with its polar and dolly parts cut back so that, applied to
    /// `position` around `center`, it ends exactly at the limits.
    pub fn limit_delta(&self, position: Vec3, center: Vec3, delta: &OrbitDelta) -> OrbitDelta {
        let s = Spherical::from_offset(position - center);
        let (lo, hi) = self.polar_limits();
        let mut limited = *delta;
        limited.phi = (s.phi + delta.phi).clamp(lo, hi) - s.phi;
        if s.radius > 0.0 {
            let (near, far) = self.distance_limits();
            limited.scale = (s.radius * delta.scale).clamp(near, far) / s.radius;
        }
        limited
    }

    /// Classic orbit-controls update: move the target by the pan, re-orbit
    /// the camera's current position and aim it at the target.
    pub fn apply(&mut self, camera: &mut Camera3D, delta: &OrbitDelta) {
        let old_target = self.target;
        self.target += delta.pan;
        let moved = camera.position + delta.pan;
        camera.position = self.orbit_point(moved, self.target, delta);
        if camera.position != moved || old_target != self.target || !delta.is_identity() {
            log::trace!("orbit: camera at {:?}", camera.position);
        }
        camera.look_at(self.target);
    }
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new(OrbitConfig::default())
    }
}
