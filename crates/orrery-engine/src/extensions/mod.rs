// extensions/mod.rs
//
// Optional extension modules. Decoupled from core Entity/Scene: games opt in
// by owning these systems themselves.

pub mod easing;
pub mod transition;

pub use easing::{Easing, lerp_vec3, ease_vec3};
pub use transition::{CameraTransition, Flight, LookAt, TransitionId, TransitionState, TransitionStep};
