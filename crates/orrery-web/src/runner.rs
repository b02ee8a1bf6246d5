use orrery_engine::{
    Game, GameConfig, EngineContext, RenderContext,
    InputEvent, InputQueue, RenderBuffer, CameraUniform,
    FixedTimestep, ProtocolLayout, SystemManifest,
};
use orrery_engine::bridge::protocol::{
    HEADER_FLOATS, HEADER_FRAME_COUNTER, HEADER_VIEWPORT_WIDTH, HEADER_VIEWPORT_HEIGHT,
    HEADER_INSTANCE_COUNT, HEADER_LINE_VERTEX_COUNT, HEADER_POINT_COUNT, HEADER_LOOP_COUNT,
    HEADER_LIGHT_COUNT, HEADER_EVENT_COUNT,
};
use orrery_engine::systems::render::build_render_buffer;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game (e.g., `solar-system`) creates a `thread_local!`
/// GameRunner and exports free functions via `#[wasm_bindgen]`, because
/// wasm-bindgen cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    /// Handed to every tick after the first one of a frame.
    no_input: InputQueue,
    render_buffer: RenderBuffer,
    camera_uniform: CameraUniform,
    header: [f32; HEADER_FLOATS],
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    viewport: (f32, f32),
    frame_counter: u32,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt);
        let layout = ProtocolLayout::from_config(&config);
        let ctx = EngineContext::with_config(&config);
        let camera_uniform = ctx.camera.uniform();
        let viewport = (config.viewport_width, config.viewport_height);

        Self {
            game,
            ctx,
            input: InputQueue::new(),
            no_input: InputQueue::new(),
            render_buffer: RenderBuffer::with_capacity(config.max_instances),
            camera_uniform,
            header: layout.header(viewport.0, viewport.1),
            timestep,
            layout,
            config,
            viewport,
            frame_counter: 0,
            initialized: false,
        }
    }

    /// Record the host's viewport size before `init`, so the game starts
    /// with the real surface instead of the configured default.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.viewport = (width, height);
        self.ctx.viewport = (width, height);
        self.ctx.camera.set_viewport(width, height);
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.check_scenery_capacity();
        self.rebuild_frame();
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        if let InputEvent::Resize { width, height } = event {
            self.viewport = (width, height);
        }
        self.input.push(event);
    }

    /// Run one frame: whole fixed ticks, then rebuild the output buffers.
    /// Queued input goes to the first tick only; a frame too short for a
    /// single tick leaves it queued.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();

        let steps = self.timestep.accumulate(dt);
        for step in 0..steps {
            let input = if step == 0 { &self.input } else { &self.no_input };
            self.game.update(&mut self.ctx, input);
        }
        if steps > 0 {
            self.input.drain();
        }

        self.rebuild_frame();
    }

    /// Parse, validate and apply a system manifest. A manifest that is
    /// rejected or would overflow the buffers sized at init leaves the
    /// running scene untouched.
    pub fn load_manifest(&mut self, json: &str) -> bool {
        let parsed = SystemManifest::from_json(json)
            .and_then(|manifest| manifest.check_capacity(&self.config).map(|()| manifest));
        match parsed {
            Ok(manifest) => {
                log::info!("loading manifest with {} bodies", manifest.bodies.len());
                self.game.apply_manifest(&mut self.ctx, manifest);
                self.rebuild_frame();
                true
            }
            Err(err) => {
                log::warn!("manifest rejected: {}", err);
                false
            }
        }
    }

    fn rebuild_frame(&mut self) {
        build_render_buffer(self.ctx.scene.iter(), &mut self.render_buffer);
        {
            let mut render_ctx = RenderContext {
                render_buffer: &mut self.render_buffer,
                camera: &self.ctx.camera,
            };
            self.game.render(&mut render_ctx);
        }
        self.camera_uniform = self.ctx.camera.uniform();

        self.frame_counter = self.frame_counter.wrapping_add(1);
        let scenery = &self.ctx.scenery;
        self.header[HEADER_FRAME_COUNTER] = self.frame_counter as f32;
        self.header[HEADER_VIEWPORT_WIDTH] = self.viewport.0;
        self.header[HEADER_VIEWPORT_HEIGHT] = self.viewport.1;
        self.header[HEADER_INSTANCE_COUNT] = self.instance_count() as f32;
        self.header[HEADER_LINE_VERTEX_COUNT] = scenery.line_vertices().len() as f32;
        self.header[HEADER_POINT_COUNT] = scenery.points().len() as f32;
        self.header[HEADER_LOOP_COUNT] = scenery.loops().len() as f32;
        self.header[HEADER_LIGHT_COUNT] = self.light_count() as f32;
        self.header[HEADER_EVENT_COUNT] = self.game_events_len() as f32;
    }

    fn check_scenery_capacity(&self) {
        let scenery = &self.ctx.scenery;
        let used = scenery.line_vertices().len() + scenery.points().len();
        if used > self.layout.max_scenery_vertices {
            log::warn!(
                "scenery has {} vertices but capacity is {}",
                used,
                self.layout.max_scenery_vertices
            );
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    // ---- Pointer accessors for host buffer reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn camera_ptr(&self) -> *const f32 {
        &self.camera_uniform as *const CameraUniform as *const f32
    }

    pub fn camera_uniform(&self) -> &CameraUniform {
        &self.camera_uniform
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count().min(self.layout.max_instances as u32)
    }

    pub fn line_vertices_ptr(&self) -> *const f32 {
        self.ctx.scenery.line_vertices_ptr()
    }

    pub fn line_vertex_count(&self) -> u32 {
        self.ctx.scenery.line_vertices().len() as u32
    }

    pub fn line_loops_ptr(&self) -> *const u32 {
        self.ctx.scenery.loops_ptr()
    }

    pub fn line_loop_count(&self) -> u32 {
        self.ctx.scenery.loops().len() as u32
    }

    pub fn points_ptr(&self) -> *const f32 {
        self.ctx.scenery.points_ptr()
    }

    pub fn point_count(&self) -> u32 {
        self.ctx.scenery.points().len() as u32
    }

    pub fn lights_ptr(&self) -> *const f32 {
        self.ctx.lights.buffer_ptr()
    }

    pub fn light_count(&self) -> u32 {
        self.ctx.lights.count().min(self.layout.max_lights) as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport.0
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport.1
    }

    // ---- Capacity accessors (read by the host via wasm_bindgen exports) ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_scenery_vertices(&self) -> u32 {
        self.layout.max_scenery_vertices as u32
    }

    pub fn max_lights(&self) -> u32 {
        self.layout.max_lights as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::{BodyDescriptor, Entity, GameEvent, MeshColor, MeshComponent};
    use orrery_engine::bridge::protocol::HEADER_MAX_INSTANCES;
    use glam::Vec3;

    const DT: f32 = 1.0 / 60.0;

    /// Records what each tick saw.
    #[derive(Default)]
    struct Recorder {
        seen_per_tick: Vec<Vec<InputEvent>>,
        manifests: usize,
        init_viewport: (f32, f32),
    }

    impl Game for Recorder {
        fn init(&mut self, ctx: &mut EngineContext) {
            self.init_viewport = ctx.viewport;
            let id = ctx.next_id();
            ctx.scene.spawn(
                Entity::new(id)
                    .with_pos(Vec3::new(1.0, 2.0, 3.0))
                    .with_mesh(MeshComponent::sphere(1.0, MeshColor::WHITE)),
            );
        }

        fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
            self.seen_per_tick.push(input.iter().copied().collect());
            ctx.emit_event(GameEvent::new(9.0, 0.0, 0.0, 0.0));
        }

        fn apply_manifest(&mut self, _ctx: &mut EngineContext, _manifest: SystemManifest) {
            self.manifests += 1;
        }
    }

    fn runner() -> GameRunner<Recorder> {
        let mut runner = GameRunner::new(Recorder::default());
        runner.init();
        runner
    }

    #[test]
    fn input_goes_to_first_tick_only() {
        let mut r = runner();
        r.push_input(InputEvent::Click { x: 1.0, y: 1.0 });
        r.tick(DT * 3.0 + 1e-4);

        let seen = &r.game().seen_per_tick;
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0], vec![InputEvent::Click { x: 1.0, y: 1.0 }]);
        assert!(seen[1].is_empty());
        assert!(seen[2].is_empty());
    }

    #[test]
    fn short_frame_keeps_input_queued() {
        let mut r = runner();
        r.push_input(InputEvent::PointerMove { x: 5.0, y: 5.0 });
        r.tick(DT * 0.25);
        assert!(r.game().seen_per_tick.is_empty());

        r.tick(DT);
        assert_eq!(r.game().seen_per_tick[0], vec![InputEvent::PointerMove { x: 5.0, y: 5.0 }]);
    }

    #[test]
    fn tick_before_init_is_ignored() {
        let mut r = GameRunner::new(Recorder::default());
        r.tick(1.0);
        assert!(r.game().seen_per_tick.is_empty());
    }

    #[test]
    fn buffers_and_header_reflect_scene() {
        let mut r = runner();
        assert_eq!(r.instance_count(), 1);
        r.tick(DT * 2.0 + 1e-4);

        let header = unsafe { std::slice::from_raw_parts(r.header_ptr(), HEADER_FLOATS) };
        assert_eq!(header[HEADER_INSTANCE_COUNT], 1.0);
        assert_eq!(header[HEADER_EVENT_COUNT], 2.0);
        assert_eq!(header[HEADER_MAX_INSTANCES], r.max_instances() as f32);

        let instance = unsafe { std::slice::from_raw_parts(r.instances_ptr(), 8) };
        assert_eq!(&instance[..3], &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn resize_updates_viewport() {
        let mut r = runner();
        r.push_input(InputEvent::Resize { width: 400.0, height: 800.0 });
        assert_eq!(r.viewport_width(), 400.0);
        assert_eq!(r.viewport_height(), 800.0);
    }

    #[test]
    fn rejected_manifest_is_not_applied() {
        let mut r = runner();
        assert!(!r.load_manifest("{ not json"));
        assert!(!r.load_manifest(r#"{ "bodies": [] }"#));
        assert_eq!(r.game().manifests, 0);

        let ok = r#"{ "bodies": [ { "name": "A", "size": 1, "distance": 10, "speed": 0.01, "color": 0 } ] }"#;
        assert!(r.load_manifest(ok));
        assert_eq!(r.game().manifests, 1);
    }

    fn manifest_json(bodies: usize, stars: u32) -> String {
        let mut manifest = SystemManifest::with_bodies(
            (0..bodies)
                .map(|i| BodyDescriptor::new(format!("B{i}"), 1.0, 10.0 + i as f32, 0.01, 0))
                .collect(),
        );
        manifest.starfield.count = stars;
        manifest.to_json().unwrap()
    }

    #[test]
    fn over_capacity_manifest_is_not_applied() {
        let mut r = runner();
        let max = r.max_instances() as usize;

        assert!(!r.load_manifest(&manifest_json(max + 6, 10)));
        assert!(!r.load_manifest(&manifest_json(2, 20_000)));
        assert_eq!(r.game().manifests, 0);
        assert_eq!(r.instance_count(), 1);

        assert!(r.load_manifest(&manifest_json(max - 1, 10)));
        assert_eq!(r.game().manifests, 1);
    }

    #[test]
    fn viewport_set_before_init_reaches_game() {
        let mut r = GameRunner::new(Recorder::default());
        r.set_viewport(400.0, 800.0);
        r.set_viewport(0.0, 100.0);
        r.init();
        assert_eq!(r.game().init_viewport, (400.0, 800.0));
        assert_eq!(r.context().camera.aspect, 0.5);
        assert_eq!(r.viewport_width(), 400.0);
    }
}
