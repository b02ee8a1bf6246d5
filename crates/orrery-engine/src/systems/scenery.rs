//! Static scenery geometry: orbit guide rings and the background starfield.
//!
//! Built once when a scene is loaded and never touched by the per-tick update.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use crate::systems::rng::Rng;

/// Vertex for lines and points.
/// Wire format (8 floats): `[x, y, z, r, g, b, a, size]`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SceneryVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
    /// Point size or line width.
    pub size: f32,
}

impl SceneryVertex {
    pub const FLOATS: usize = 8;

    pub fn new(pos: Vec3, rgba: [f32; 4], size: f32) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            z: pos.z,
            r: rgba[0],
            g: rgba[1],
            b: rgba[2],
            a: rgba[3],
            size,
        }
    }

    pub fn pos(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// A closed polyline inside the line vertex buffer.
/// Wire format (2 u32): `[first, count]`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct LineLoop {
    pub first: u32,
    pub count: u32,
}

/// Circle of `radius` in the XZ plane, `segments` vertices; the renderer closes the loop.
pub fn orbit_ring(radius: f32, segments: u32, rgba: [f32; 4]) -> Vec<SceneryVertex> {
    let segments = segments.max(3);
    (0..segments)
        .map(|i| {
            let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
            let pos = Vec3::new(radius * angle.cos(), 0.0, radius * angle.sin());
            SceneryVertex::new(pos, rgba, 1.0)
        })
        .collect()
}

/// `count` points spread uniformly in a cube of side `extent` centred on the origin.
pub fn starfield(rng: &mut Rng, count: u32, extent: f32, rgba: [f32; 4], size: f32) -> Vec<SceneryVertex> {
    let half = extent / 2.0;
    (0..count)
        .map(|_| {
            let x = rng.next_centered(half);
            let y = rng.next_centered(half);
            let z = rng.next_centered(half);
            SceneryVertex::new(Vec3::new(x, y, z), rgba, size)
        })
        .collect()
}

/// All static scenery of a loaded scene.
#[derive(Debug, Default)]
pub struct SceneryState {
    line_vertices: Vec<SceneryVertex>,
    loops: Vec<LineLoop>,
    points: Vec<SceneryVertex>,
}

impl SceneryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a closed line loop.
    pub fn add_loop(&mut self, vertices: Vec<SceneryVertex>) {
        let first = self.line_vertices.len() as u32;
        let count = vertices.len() as u32;
        self.line_vertices.extend(vertices);
        self.loops.push(LineLoop { first, count });
    }

    pub fn add_points(&mut self, points: Vec<SceneryVertex>) {
        self.points.extend(points);
    }

    pub fn clear(&mut self) {
        self.line_vertices.clear();
        self.loops.clear();
        self.points.clear();
    }

    pub fn line_vertices(&self) -> &[SceneryVertex] {
        &self.line_vertices
    }

    pub fn loops(&self) -> &[LineLoop] {
        &self.loops
    }

    pub fn points(&self) -> &[SceneryVertex] {
        &self.points
    }

    pub fn line_vertices_ptr(&self) -> *const f32 {
        self.line_vertices.as_ptr() as *const f32
    }

    pub fn loops_ptr(&self) -> *const u32 {
        self.loops.as_ptr() as *const u32
    }

    pub fn points_ptr(&self) -> *const f32 {
        self.points.as_ptr() as *const f32
    }
}
