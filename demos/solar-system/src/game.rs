/// Solar System: eight planets on circular orbits around an unlit sun.
///
/// Hovering a planet shows its name; clicking flies the camera next to it
/// and keeps it in view while it orbits. Clicking empty space flies back home.

use glam::Vec3;
use orrery_engine::*;

use crate::bodies::{self, BodyIndex, BodyRegistry};
use crate::controls::{self, ControlPanel};
use crate::orbit;
use crate::session::Session;

const FIXED_DT: f32 = 1.0 / 60.0;

// ── Camera flights ───────────────────────────────────────────────────

/// Seconds per camera flight.
const TRANSITION_SECONDS: f32 = 1.5;
const TRANSITION_EASING: Easing = Easing::QuadOut;
/// Where the camera parks relative to a clicked planet.
const ZOOM_OFFSET: Vec3 = Vec3::new(5.0, 5.0, 5.0);

// ── Custom event kinds from the host ─────────────────────────────────

/// a = body index, b = speed in radians per tick.
pub const CUSTOM_SET_SPEED: u32 = 1;
pub const CUSTOM_TOGGLE_PAUSE: u32 = 2;

// ── Game event kinds to the host ─────────────────────────────────────

/// a, b = tooltip anchor in pixels, c = body index or -1 when hidden.
pub const EVENT_TOOLTIP: f32 = 1.0;
/// a = body index or -1, b = zoomed (0/1).
pub const EVENT_SELECTION: f32 = 2.0;
/// a = paused (0/1).
pub const EVENT_PAUSE: f32 = 3.0;
/// a = transition id.
pub const EVENT_TRANSITION_FINISHED: f32 = 4.0;

fn flag(value: bool) -> f32 {
    if value { 1.0 } else { 0.0 }
}

fn index_or_none(index: Option<BodyIndex>) -> f32 {
    index.map(|i| i as f32).unwrap_or(-1.0)
}

pub struct SolarSystem {
    manifest: SystemManifest,
    registry: BodyRegistry,
    controls: ControlPanel,
    session: Session,
    transition: CameraTransition,
}

impl SolarSystem {
    pub fn new() -> Self {
        Self::with_manifest(bodies::default_manifest())
    }

    pub fn with_manifest(manifest: SystemManifest) -> Self {
        let config = GameConfig::default();
        Self {
            manifest,
            registry: BodyRegistry::default(),
            controls: ControlPanel::default(),
            session: Session::new(config.viewport_width, config.viewport_height),
            transition: CameraTransition::new(),
        }
    }

    // ── Queries for host exports ───────────────────────────────────

    pub fn body_name(&self, index: BodyIndex) -> Option<&str> {
        self.registry.name(index)
    }

    pub fn controls_json(&self) -> Result<String, serde_json::Error> {
        self.controls.to_json(self.session.paused)
    }

    pub fn pause_label(&self) -> &'static str {
        controls::pause_label(self.session.paused)
    }

    pub fn body_count(&self) -> usize {
        self.registry.count()
    }

    pub fn selected(&self) -> Option<BodyIndex> {
        self.session.selected
    }

    pub fn is_zoomed(&self) -> bool {
        self.session.zoomed
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_transitioning()
    }

    // ── Scene setup ────────────────────────────────────────────────

    fn spawn(&mut self, ctx: &mut EngineContext) {
        self.registry = BodyRegistry::build(ctx, &self.manifest);
        self.controls = ControlPanel::from_registry(&self.registry);
    }

    fn go_home_now(&self, camera: &mut PerspectiveCamera) {
        camera.position = self.session.home;
        camera.look_at(Vec3::ZERO);
    }

    // ── Pointer handling ───────────────────────────────────────────

    /// Nearest planet under viewport pixel (x, y).
    fn pick(&mut self, ctx: &EngineContext, x: f32, y: f32) -> Option<BodyIndex> {
        let ndc = self.session.track_pointer(x, y);
        let ray = ctx.camera.ray_from_ndc(ndc);
        pick_nearest(&ray, ctx.scene.iter()).and_then(|hit| self.registry.index_of(hit.id))
    }

    fn on_pointer_move(&mut self, ctx: &EngineContext, x: f32, y: f32) {
        let hovered = self.pick(ctx, x, y);
        self.session.set_hover(x, y, hovered);
    }

    /// One tooltip event per tick, carrying the state after the last move.
    fn emit_tooltip(&self, ctx: &mut EngineContext) {
        let event = match self.session.tooltip {
            Some(tip) => GameEvent::new(EVENT_TOOLTIP, tip.x, tip.y, tip.body as f32),
            None => GameEvent::new(EVENT_TOOLTIP, 0.0, 0.0, -1.0),
        };
        ctx.emit_event(event);
    }

    fn on_click(&mut self, ctx: &mut EngineContext, x: f32, y: f32) {
        match self.pick(ctx, x, y) {
            Some(index) => {
                let Some(body) = self.registry.body(index) else { return };
                let live = ctx.scene.position_of(body.entity).unwrap_or_else(|| body.position());
                self.transition.start(
                    &ctx.camera,
                    live + ZOOM_OFFSET,
                    LookAt::Entity(body.entity),
                    TRANSITION_SECONDS,
                    TRANSITION_EASING,
                );
                log::info!("selected {}", body.name);
                self.session.select(index);
            }
            None if self.session.zoomed => {
                self.transition.start(
                    &ctx.camera,
                    self.session.home,
                    LookAt::Point(Vec3::ZERO),
                    TRANSITION_SECONDS,
                    TRANSITION_EASING,
                );
                log::info!("selection cleared, returning home");
                self.session.clear_selection();
            }
            None => return,
        }

        ctx.emit_event(GameEvent::new(
            EVENT_SELECTION,
            index_or_none(self.session.selected),
            flag(self.session.zoomed),
            0.0,
        ));
    }

    /// Home follows the viewport width; the camera only jumps there when it
    /// is idle at home already.
    fn on_resize(&mut self, ctx: &mut EngineContext, width: f32, height: f32) {
        ctx.camera.set_viewport(width, height);
        self.session.resize(width, height);
        if !self.transition.is_transitioning() && !self.session.zoomed {
            self.go_home_now(&mut ctx.camera);
        }
    }

    fn on_custom(&mut self, ctx: &mut EngineContext, kind: u32, a: f32, b: f32) {
        match kind {
            CUSTOM_SET_SPEED => {
                if a.is_finite() && a >= 0.0 {
                    self.controls.set_speed(&mut self.registry, a as BodyIndex, b);
                } else {
                    log::debug!("ignoring speed change for body index {}", a);
                }
            }
            CUSTOM_TOGGLE_PAUSE => {
                let paused = self.session.toggle_pause();
                ctx.emit_event(GameEvent::new(EVENT_PAUSE, flag(paused), 0.0, 0.0));
            }
            other => log::debug!("ignoring custom event kind {}", other),
        }
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for SolarSystem {
    fn config(&self) -> GameConfig {
        GameConfig {
            fixed_dt: FIXED_DT,
            max_instances: 64,
            max_scenery_vertices: 4096,
            max_lights: 4,
            max_events: 64,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        let (width, height) = ctx.viewport;
        self.session.resize(width, height);
        ctx.camera.set_viewport(width, height);
        self.spawn(ctx);
        self.go_home_now(&mut ctx.camera);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        // ── Handle input ─────────────────────────────────────────────
        let mut moved = false;
        for event in input.iter() {
            match *event {
                InputEvent::PointerMove { x, y } => {
                    self.on_pointer_move(ctx, x, y);
                    moved = true;
                }
                InputEvent::Click { x, y } => self.on_click(ctx, x, y),
                InputEvent::Resize { width, height } => self.on_resize(ctx, width, height),
                InputEvent::Custom { kind, a, b, .. } => self.on_custom(ctx, kind, a, b),
            }
        }
        if moved {
            self.emit_tooltip(ctx);
        }

        // ── Orbits ───────────────────────────────────────────────────
        orbit::advance(&mut self.registry, &mut ctx.scene, self.session.paused);

        // ── Camera ───────────────────────────────────────────────────
        if let TransitionStep::Finished(id) = self.transition.tick(FIXED_DT, &mut ctx.camera, &ctx.scene) {
            ctx.emit_event(GameEvent::new(EVENT_TRANSITION_FINISHED, id.0 as f32, 0.0, 0.0));
        }
    }

    fn apply_manifest(&mut self, ctx: &mut EngineContext, manifest: SystemManifest) {
        self.transition.cancel();
        ctx.reset();
        self.manifest = manifest;
        self.spawn(ctx);

        self.session.clear_selection();
        self.session.tooltip = None;
        self.go_home_now(&mut ctx.camera);
        ctx.emit_event(GameEvent::new(EVENT_SELECTION, -1.0, 0.0, 0.0));
    }
}
