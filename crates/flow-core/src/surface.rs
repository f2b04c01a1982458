//! Drawing surface abstraction.
//!
//! The engine only ever clears, fills dots and strokes rings. The web
//! frontend implements [`Surface`] over a 2D canvas context; tests and the
//! native preview use [`RecordingSurface`], whose ops are plain-old-data so
//! two frames can be compared byte for byte.

use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn white(a: f32) -> Self {
        Self::new(255, 255, 255, a)
    }

    pub const fn from_rgb(rgb: [u8; 3], a: f32) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2], a)
    }

    /// CSS `rgba(...)` string, alpha rounded to 4 decimals.
    pub fn css(&self) -> String {
        format!(
            "rgba({},{},{},{:.4})",
            self.r,
            self.g,
            self.b,
            self.a.clamp(0.0, 1.0)
        )
    }
}

pub trait Surface {
    /// Size of the drawing area in CSS pixels.
    fn size(&self) -> Vec2;
    fn clear(&mut self);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Rgba);
}

pub const OP_CLEAR: u32 = 0;
pub const OP_FILL_CIRCLE: u32 = 1;
pub const OP_STROKE_CIRCLE: u32 = 2;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawOp {
    pub kind: u32,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub line_width: f32,
    pub rgb: u32,
    pub alpha: f32,
}

impl DrawOp {
    fn packed_rgb(c: Rgba) -> u32 {
        ((c.r as u32) << 16) | ((c.g as u32) << 8) | c.b as u32
    }
}

/// In-memory surface that records every call.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    size: Vec2,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.ops)
    }

    /// Ops recorded since the last `clear`.
    pub fn last_frame(&self) -> &[DrawOp] {
        let start = self
            .ops
            .iter()
            .rposition(|op| op.kind == OP_CLEAR)
            .unwrap_or(0);
        &self.ops[start..]
    }

    pub fn count(&self, kind: u32) -> usize {
        self.ops.iter().filter(|op| op.kind == kind).count()
    }

    pub fn reset(&mut self) {
        self.ops.clear();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp {
            kind: OP_CLEAR,
            x: 0.0,
            y: 0.0,
            radius: 0.0,
            line_width: 0.0,
            rgb: 0,
            alpha: 0.0,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.ops.push(DrawOp {
            kind: OP_FILL_CIRCLE,
            x: center.x,
            y: center.y,
            radius,
            line_width: 0.0,
            rgb: DrawOp::packed_rgb(color),
            alpha: color.a,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Rgba) {
        self.ops.push(DrawOp {
            kind: OP_STROKE_CIRCLE,
            x: center.x,
            y: center.y,
            radius,
            line_width,
            rgb: DrawOp::packed_rgb(color),
            alpha: color.a,
        });
    }
}
