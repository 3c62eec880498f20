//! Flat per-particle attribute buffers consumed by the renderer.
//!
//! Layout is `index * components + component`: 3 floats of position, 3 floats
//! of straight RGB color and 1 float of size per particle.

use stardust_core::{Color, Vec3};

#[derive(Clone, Debug, Default)]
pub struct AttributeBuffers {
    positions: Vec<f32>,
    colors: Vec<f32>,
    sizes: Vec<f32>,
}

impl AttributeBuffers {
    pub fn with_len(len: usize) -> Self {
        Self {
            positions: vec![0.0; len * 3],
            colors: vec![0.0; len * 3],
            sizes: vec![0.0; len],
        }
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Grow or shrink to `len` particles, reusing the allocations
    pub fn resize(&mut self, len: usize) {
        self.positions.resize(len * 3, 0.0);
        self.colors.resize(len * 3, 0.0);
        self.sizes.resize(len, 0.0);
    }

    pub fn clear(&mut self) {
        self.resize(0);
    }

    /// Write one particle. Color is clamped to [0, 1], size to >= 0,
    /// and non-finite values are written as 0.
    pub fn write(&mut self, index: usize, position: Vec3, color: Color, size: f32) {
        self.set_position(index, position);
        self.set_color(index, color);
        self.set_size(index, size);
    }

    pub fn set_position(&mut self, index: usize, position: Vec3) {
        let i3 = index * 3;
        self.positions[i3] = position.x;
        self.positions[i3 + 1] = position.y;
        self.positions[i3 + 2] = position.z;
    }

    pub fn set_color(&mut self, index: usize, color: Color) {
        let c = color.clamped();
        let i3 = index * 3;
        self.colors[i3] = c.r;
        self.colors[i3 + 1] = c.g;
        self.colors[i3 + 2] = c.b;
    }

    pub fn set_size(&mut self, index: usize, size: f32) {
        self.sizes[index] = if size.is_finite() { size.max(0.0) } else { 0.0 };
    }

    pub fn position(&self, index: usize) -> Vec3 {
        let i3 = index * 3;
        Vec3::new(
            self.positions[i3],
            self.positions[i3 + 1],
            self.positions[i3 + 2],
        )
    }

    pub fn color(&self, index: usize) -> Color {
        let i3 = index * 3;
        Color::new(self.colors[i3], self.colors[i3 + 1], self.colors[i3 + 2])
    }

    pub fn size(&self, index: usize) -> f32 {
        self.sizes[index]
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    /// Raw bytes of the position buffer, for GPU upload
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    pub fn size_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.sizes)
    }
}
