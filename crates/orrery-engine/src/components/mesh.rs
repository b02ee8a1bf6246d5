/// Linear RGB color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl MeshColor {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self {
            r: channel(16),
            g: channel(8),
            b: channel(0),
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for MeshColor {
    fn default() -> Self {
        Self { r: 0.6, g: 0.6, b: 0.8 }
    }
}

/// How the renderer shades a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shading {
    /// Flat color, ignores lights (the sun).
    Unlit,
    /// Lit by the scene's point lights.
    #[default]
    Lit,
}

/// Mesh primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeshShape {
    Sphere { radius: f32 },
}

/// Component for renderable meshes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshComponent {
    pub shape: MeshShape,
    pub color: MeshColor,
    pub shading: Shading,
}

impl Default for MeshComponent {
    fn default() -> Self {
        Self {
            shape: MeshShape::Sphere { radius: 1.0 },
            color: MeshColor::default(),
            shading: Shading::Lit,
        }
    }
}

impl MeshComponent {
    pub fn sphere(radius: f32, color: MeshColor) -> Self {
        Self {
            shape: MeshShape::Sphere { radius },
            color,
            ..Default::default()
        }
    }

    pub fn unlit(mut self) -> Self {
        self.shading = Shading::Unlit;
        self
    }

    /// Bounding radius used for rendering size and picking.
    pub fn radius(&self) -> f32 {
        match self.shape {
            MeshShape::Sphere { radius } => radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_hex_unpacks_channels() {
        let c = MeshColor::from_hex(0x3399ff);
        assert!((c.r - 0.2).abs() < 1e-6);
        assert!((c.g - 0.6).abs() < 1e-6);
        assert!((c.b - 1.0).abs() < 1e-6);
    }

    #[test]
    fn unlit_builder_switches_shading() {
        let mesh = MeshComponent::sphere(4.0, MeshColor::WHITE).unlit();
        assert_eq!(mesh.shading, Shading::Unlit);
        assert_eq!(mesh.radius(), 4.0);
    }
}
