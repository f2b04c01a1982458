use crate::constants::MAX_DEVICE_PIXEL_RATIO;
use flow_core::{Rgba, Surface};
use glam::Vec2;
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys as web;

/// 2D canvas implementation of the engine's drawing surface.
///
/// Drawing happens in CSS pixels; the backing store is scaled by the device
/// pixel ratio so dots stay crisp on high-density screens.
pub struct Canvas2dSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    size: Vec2,
    dpr: f64,
}

impl Canvas2dSurface {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("getContext failed: {:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        Ok(Self {
            canvas,
            ctx,
            size: Vec2::ZERO,
            dpr: 1.0,
        })
    }

    /// Match the backing store to the CSS size. Cheap when nothing changed.
    pub fn sync_size(&mut self, css: Vec2) {
        let dpr = web::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0)
            .clamp(1.0, MAX_DEVICE_PIXEL_RATIO);
        if css == self.size && dpr == self.dpr {
            return;
        }
        self.size = css;
        self.dpr = dpr;
        self.canvas
            .set_width(((css.x as f64) * dpr).round().max(1.0) as u32);
        self.canvas
            .set_height(((css.y as f64) * dpr).round().max(1.0) as u32);
        _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
    }

    fn arc(&self, center: Vec2, radius: f32) -> bool {
        self.ctx.begin_path();
        self.ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)
            .is_ok()
    }
}

impl Surface for Canvas2dSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self) {
        self.ctx
            .clear_rect(0.0, 0.0, self.size.x as f64, self.size.y as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        if self.arc(center, radius) {
            self.ctx.set_fill_style_str(&color.css());
            self.ctx.fill();
        }
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Rgba) {
        if self.arc(center, radius) {
            self.ctx.set_stroke_style_str(&color.css());
            self.ctx.set_line_width(line_width as f64);
            self.ctx.stroke();
        }
    }
}
