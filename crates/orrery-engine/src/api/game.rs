use crate::api::types::{EntityId, GameEvent};
use crate::assets::manifest::SystemManifest;
use crate::core::scene::Scene;
use crate::input::queue::InputQueue;
use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::instance::RenderBuffer;
use crate::systems::lighting::LightState;
use crate::systems::scenery::SceneryState;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Initial viewport width in pixels.
    pub viewport_width: f32,
    /// Initial viewport height in pixels.
    pub viewport_height: f32,
    /// Maximum number of render instances (default: 64).
    pub max_instances: usize,
    /// Maximum number of scenery vertices (default: 4096).
    pub max_scenery_vertices: usize,
    /// Maximum number of point lights (default: 8).
    pub max_lights: usize,
    /// Maximum number of game events per frame (default: 64).
    pub max_events: usize,
    /// Vertical field of view in degrees.
    pub fovy_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            viewport_width: 1280.0,
            viewport_height: 720.0,
            max_instances: 64,
            max_scenery_vertices: 4096,
            max_lights: 8,
            max_events: 64,
            fovy_degrees: 75.0,
            near: 0.1,
            far: 2000.0,
        }
    }
}

impl GameConfig {
    /// Perspective camera matching this configuration.
    pub fn camera(&self) -> PerspectiveCamera {
        let aspect = if self.viewport_height > 0.0 {
            self.viewport_width / self.viewport_height
        } else {
            1.0
        };
        PerspectiveCamera::new(self.fovy_degrees, aspect, self.near, self.far)
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, configure the scene.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed tick. `input` holds the events queued since the last frame
    /// on the first tick of a frame and is empty on the rest.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Optional read-only render pass for custom render commands.
    fn render(&self, _ctx: &mut RenderContext) {}

    /// Replace the running scene with a validated manifest.
    fn apply_manifest(&mut self, _ctx: &mut EngineContext, _manifest: SystemManifest) {
        log::debug!("game does not support manifest reloads");
    }
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub scenery: SceneryState,
    pub lights: LightState,
    pub camera: PerspectiveCamera,
    pub events: Vec<GameEvent>,
    /// Viewport size in pixels when the game is initialized. Later changes
    /// arrive as `InputEvent::Resize`.
    pub viewport: (f32, f32),
    max_events: usize,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_config(&GameConfig::default())
    }

    pub fn with_config(config: &GameConfig) -> Self {
        Self {
            scene: Scene::new(),
            scenery: SceneryState::new(),
            lights: LightState::new(),
            camera: config.camera(),
            events: Vec::with_capacity(config.max_events),
            viewport: (config.viewport_width, config.viewport_height),
            max_events: config.max_events,
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a game event to be forwarded to the host.
    /// Events past the per-frame capacity are dropped.
    pub fn emit_event(&mut self, event: GameEvent) {
        if self.events.len() < self.max_events {
            self.events.push(event);
        } else {
            log::debug!("event buffer full, dropping kind {}", event.kind);
        }
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }

    /// Drop every entity, scenery vertex and light. The camera is kept.
    pub fn reset(&mut self) {
        self.scene.clear();
        self.scenery.clear();
        self.lights.clear();
        self.events.clear();
        self.next_id = 1;
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Render context for optional custom render commands.
pub struct RenderContext<'a> {
    pub render_buffer: &'a mut RenderBuffer,
    pub camera: &'a PerspectiveCamera,
}
