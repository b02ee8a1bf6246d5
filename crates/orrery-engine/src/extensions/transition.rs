// extensions/transition.rs
//
// Camera transitions: an eased flight of the camera eye from where it is now
// to a target position, re-aiming after every step at a look-at target that
// may itself be moving.
//
// Usage:
//   let mut flight = CameraTransition::new();
//   flight.start(&camera, target, LookAt::Entity(id), 1.5, Easing::QuadOut);
//   flight.tick(dt, &mut camera, &scene);  // once per tick

use glam::Vec3;
use crate::api::types::EntityId;
use crate::core::scene::Scene;
use crate::renderer::camera::PerspectiveCamera;
use super::easing::{Easing, ease_vec3};

/// Absorbs f32 drift when summing fixed ticks up to the duration.
const COMPLETION_SLACK: f32 = 1e-4;

/// What the camera aims at while it flies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LookAt {
    /// A fixed world point.
    Point(Vec3),
    /// The live position of an entity, re-read every step.
    Entity(EntityId),
}

/// Handle identifying one started transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionId(pub u32);

/// An in-flight camera move.
#[derive(Debug, Clone)]
pub struct Flight {
    pub id: TransitionId,
    pub from: Vec3,
    pub to: Vec3,
    pub look_at: LookAt,
    /// Duration in seconds.
    pub duration: f32,
    pub elapsed: f32,
    pub easing: Easing,
    /// Last resolved aim point, kept if an aimed-at entity disappears.
    last_aim: Vec3,
}

impl Flight {
    /// Normalized progress [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    fn is_done(&self) -> bool {
        self.elapsed + COMPLETION_SLACK >= self.duration
    }
}

/// Exactly one of these holds at any time.
#[derive(Debug, Clone, Default)]
pub enum TransitionState {
    #[default]
    AtRest,
    Transitioning(Flight),
}

/// Outcome of one `tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStep {
    /// Nothing in flight.
    Idle,
    /// Moved one step, still flying.
    Moving,
    /// Reached the target this step; the camera is at rest.
    Finished(TransitionId),
}

/// Owns the camera's current-vs-target state.
#[derive(Debug, Default)]
pub struct CameraTransition {
    state: TransitionState,
    next_id: u32,
}

impl CameraTransition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start flying from the camera's current position to `to`.
    /// Any flight already in progress is replaced and none of its remaining
    /// steps will be applied.
    pub fn start(
        &mut self,
        camera: &PerspectiveCamera,
        to: Vec3,
        look_at: LookAt,
        duration: f32,
        easing: Easing,
    ) -> TransitionId {
        if let TransitionState::Transitioning(old) = &self.state {
            log::debug!("camera transition {} replaced at {:.0}%", old.id.0, old.progress() * 100.0);
        }

        let id = TransitionId(self.next_id);
        self.next_id += 1;
        self.state = TransitionState::Transitioning(Flight {
            id,
            from: camera.position,
            to,
            look_at,
            duration,
            elapsed: 0.0,
            easing,
            last_aim: camera.look_target(),
        });
        log::debug!("camera transition {} started toward {:?}", id.0, to);
        id
    }

    /// Drop the current flight, leaving the camera where it is.
    pub fn cancel(&mut self) -> bool {
        matches!(std::mem::take(&mut self.state), TransitionState::Transitioning(_))
    }

    pub fn state(&self) -> &TransitionState {
        &self.state
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.state, TransitionState::Transitioning(_))
    }

    /// Destination of the current flight.
    pub fn target(&self) -> Option<Vec3> {
        match &self.state {
            TransitionState::Transitioning(flight) => Some(flight.to),
            TransitionState::AtRest => None,
        }
    }

    pub fn active_id(&self) -> Option<TransitionId> {
        match &self.state {
            TransitionState::Transitioning(flight) => Some(flight.id),
            TransitionState::AtRest => None,
        }
    }

    /// Advance the flight by `dt` seconds: move the eye along the eased
    /// curve, then aim at the look-at target's current position. On the
    /// final step the eye snaps exactly onto the target.
    pub fn tick(&mut self, dt: f32, camera: &mut PerspectiveCamera, scene: &Scene) -> TransitionStep {
        let TransitionState::Transitioning(flight) = &mut self.state else {
            return TransitionStep::Idle;
        };

        flight.elapsed += dt;
        let aim = match flight.look_at {
            LookAt::Point(point) => point,
            LookAt::Entity(id) => scene.position_of(id).unwrap_or(flight.last_aim),
        };
        flight.last_aim = aim;

        if flight.is_done() {
            let id = flight.id;
            camera.position = flight.to;
            camera.look_at(aim);
            self.state = TransitionState::AtRest;
            log::debug!("camera transition {} finished", id.0);
            return TransitionStep::Finished(id);
        }

        camera.position = ease_vec3(flight.from, flight.to, flight.progress(), flight.easing);
        camera.look_at(aim);
        TransitionStep::Moving
    }
}
