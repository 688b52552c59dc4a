//! Canvas 2D backend for `Surface`

use glam::Vec2;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::surface::{Color, ImageId, Surface, TextAlign, TextStyle};
use crate::Viewport;

/// Draws onto a 2D canvas at the device pixel ratio
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    size: Vec2,
    face: HtmlImageElement,
    logo: HtmlImageElement,
}

impl CanvasSurface {
    pub fn new(
        ctx: CanvasRenderingContext2d,
        face: HtmlImageElement,
        logo: HtmlImageElement,
    ) -> Self {
        Self {
            ctx,
            size: Vec2::ZERO,
            face,
            logo,
        }
    }

    /// Match the backing store to the canvas' CSS size; returns the CSS size
    pub fn fit(&mut self, canvas: &HtmlCanvasElement, dpr: f64) -> Viewport {
        let mut css_w = canvas.client_width() as f64;
        let mut css_h = canvas.client_height() as f64;
        if css_w <= 0.0 || css_h <= 0.0 {
            let rect = canvas.get_bounding_client_rect();
            let fallback = Viewport::new(rect.width() as f32, rect.height() as f32);
            css_w = fallback.width as f64;
            css_h = fallback.height as f64;
        }

        let dpr = dpr.max(1.0);
        let want_w = (css_w * dpr).round() as u32;
        let want_h = (css_h * dpr).round() as u32;
        if canvas.width() != want_w || canvas.height() != want_h {
            canvas.set_width(want_w);
            canvas.set_height(want_h);
        }
        let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);

        self.size = Vec2::new(css_w as f32, css_h as f32);
        Viewport::new(self.size.x, self.size.y)
    }

    fn image(&self, image: ImageId) -> &HtmlImageElement {
        match image {
            ImageId::Face => &self.face,
            ImageId::Logo => &self.logo,
        }
    }

    /// Centre-crop source rect that fills `w`×`h` without stretching
    fn cover_crop(img: &HtmlImageElement, w: f32, h: f32) -> (f64, f64, f64, f64) {
        let iw = img.natural_width() as f64;
        let ih = img.natural_height() as f64;
        let image_ratio = iw / ih;
        let target_ratio = (w / h) as f64;
        if image_ratio > target_ratio {
            let sw = ih * target_ratio;
            ((iw - sw) * 0.5, 0.0, sw, ih)
        } else {
            let sh = iw / target_ratio;
            (0.0, (ih - sh) * 0.5, iw, sh)
        }
    }

    fn set_fill(&self, color: Color) {
        self.ctx.set_fill_style_str(&css_color(color));
    }
}

fn css_color(c: Color) -> String {
    format!(
        "rgba({:.0},{:.0},{:.0},{:.3})",
        c[0] * 255.0,
        c[1] * 255.0,
        c[2] * 255.0,
        c[3]
    )
}

impl Surface for CanvasSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.set_fill(color);
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.set_fill(color);
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius as f64,
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.fill();
    }

    fn stroke_path(&mut self, points: &[Vec2], width: f32, color: Color) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.set_stroke_style_str(&css_color(color));
        self.ctx.set_line_width(width as f64);
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, style: TextStyle, color: Color) {
        self.set_fill(color);
        let weight = if style.bold { "bold " } else { "" };
        self.ctx
            .set_font(&format!("{weight}{}px system-ui, sans-serif", style.size));
        self.ctx.set_text_align(match style.align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        });
        self.ctx.set_text_baseline("middle");
        let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
    }

    fn image_ready(&self, image: ImageId) -> bool {
        let img = self.image(image);
        img.complete() && img.natural_width() > 0
    }

    fn draw_image(&mut self, image: ImageId, x: f32, y: f32, w: f32, h: f32) {
        let img = self.image(image);
        let (sx, sy, sw, sh) = Self::cover_crop(img, w, h);
        let _ = self
            .ctx
            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                img, sx, sy, sw, sh, x as f64, y as f64, w as f64, h as f64,
            );
    }

    fn draw_image_circle(&mut self, image: ImageId, center: Vec2, radius: f32) {
        self.ctx.save();
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius as f64,
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.clip();
        let d = radius * 2.0;
        self.draw_image(image, center.x - radius, center.y - radius, d, d);
        self.ctx.restore();
    }
}
