use crate::components::entity::Entity;
use crate::components::mesh::Shading;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Rebuild the render buffer from a set of entities, in iteration order.
/// Inactive entities and entities without a mesh are skipped.
pub fn build_render_buffer<'a>(entities: impl Iterator<Item = &'a Entity>, buffer: &mut RenderBuffer) {
    buffer.clear();

    for entity in entities {
        if !entity.active {
            continue;
        }

        let mesh = match &entity.mesh {
            Some(m) => m,
            None => continue,
        };

        buffer.push(RenderInstance {
            x: entity.pos.x,
            y: entity.pos.y,
            z: entity.pos.z,
            radius: mesh.radius(),
            r: mesh.color.r,
            g: mesh.color.g,
            b: mesh.color.b,
            lit: match mesh.shading {
                Shading::Lit => 1.0,
                Shading::Unlit => 0.0,
            },
        });
    }
}
