pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, RenderContext};
pub use api::types::{EntityId, GameEvent};
pub use components::entity::Entity;
pub use components::mesh::{MeshComponent, MeshColor, MeshShape, Shading};
pub use core::scene::Scene;
pub use core::time::FixedTimestep;
pub use renderer::instance::{RenderInstance, RenderBuffer};
pub use renderer::camera::{PerspectiveCamera, CameraUniform};
pub use input::queue::{InputEvent, InputQueue};
pub use assets::manifest::{
    SystemManifest, BodyDescriptor, SunDescriptor, StarfieldDescriptor,
    LightDescriptor, ManifestError, MAX_ORBIT_SPEED,
};
pub use bridge::protocol::ProtocolLayout;
pub use systems::lighting::{PointLight, LightState};
pub use systems::picking::{Ray, PickHit, pick_nearest, ray_sphere};
pub use systems::rng::Rng;
pub use systems::scenery::{SceneryState, SceneryVertex, LineLoop, orbit_ring, starfield};

// Extensions: decoupled optional systems
pub use extensions::{
    Easing, lerp_vec3, ease_vec3,
    CameraTransition, LookAt, TransitionId, TransitionState, TransitionStep,
};
