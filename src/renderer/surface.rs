//! Drawing primitives the scene is built from
//!
//! The browser implements these on a 2D canvas; tests record them.

use glam::Vec2;

/// Linear RGBA in [0, 1]
pub type Color = [f32; 4];

/// Opaque colour from 8-bit channels
pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Colour from 8-bit channels with alpha in [0, 1]
pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Color {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a]
}

/// Images the page loads in the background
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageId {
    /// Player face, clipped into the head circle
    Face,
    /// Sponsor logo on lamps, billboards and the shirt
    Logo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// Font settings for `fill_text` (y is the text's vertical middle)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub bold: bool,
    pub align: TextAlign,
}

impl TextStyle {
    pub const fn new(size: f32) -> Self {
        Self {
            size,
            bold: false,
            align: TextAlign::Center,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn left(mut self) -> Self {
        self.align = TextAlign::Left;
        self
    }
}

/// A 2D target in screen space (CSS pixels, y down)
pub trait Surface {
    /// Visible size
    fn size(&self) -> Vec2;

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Open polyline through `points`
    fn stroke_path(&mut self, points: &[Vec2], width: f32, color: Color);

    fn fill_text(&mut self, text: &str, pos: Vec2, style: TextStyle, color: Color);

    /// True once the image has loaded and can be drawn
    fn image_ready(&self, image: ImageId) -> bool;

    /// Draw an image cover-fitted into the rectangle
    fn draw_image(&mut self, image: ImageId, x: f32, y: f32, w: f32, h: f32);

    /// Draw an image cover-fitted and clipped to a circle
    fn draw_image_circle(&mut self, image: ImageId, center: Vec2, radius: f32);
}

/// Colors for game elements
pub mod colors {
    use super::{Color, rgb, rgba};

    pub const SKY_TOP: Color = rgb(0xa6, 0xc9, 0xef);
    pub const SKY_BOTTOM: Color = rgb(0xd6, 0xe8, 0xfb);
    pub const BUILDING_NEAR: Color = rgb(0xa5, 0xb4, 0xcf);
    pub const BUILDING_MID: Color = rgb(0xb0, 0xbf, 0xd9);
    pub const BUILDING_FAR: Color = rgb(0xb8, 0xc7, 0xe0);
    pub const WINDOW: Color = rgba(255, 255, 255, 0.25);
    pub const STREET: Color = rgb(0x5b, 0x6b, 0x7e);
    pub const LANE_LINE: Color = rgba(255, 255, 255, 0.8);

    pub const POLE: Color = rgb(0x3c, 0x3f, 0x46);
    pub const BULB_ON: Color = rgb(0xff, 0xf8, 0xb0);
    pub const BULB_OFF: Color = rgb(0x9a, 0xa3, 0xad);
    pub const GLOW: Color = rgba(255, 250, 200, 0.35);
    pub const PLUG_BOX: Color = rgb(0xc7, 0xcb, 0xd3);
    pub const PLUG_HOLE: Color = rgb(0x7b, 0x80, 0x8a);
    pub const LOGO_BACKING: Color = rgba(0, 0, 0, 0.25);
    pub const PROMPT_BG: Color = rgba(0, 0, 0, 0.5);
    pub const CORD: Color = rgb(0x22, 0x22, 0x22);

    pub const STORE: Color = rgb(0x2d, 0x2f, 0x37);
    pub const STORE_SIGN: Color = rgb(0xff, 0xd6, 0x00);
    pub const STORE_DOOR: Color = rgb(0x6a, 0xa7, 0xd9);

    pub const VAN_BODY: Color = rgb(0xe5, 0xe7, 0xeb);
    pub const VAN_CAB: Color = rgb(0xd1, 0xd5, 0xdb);
    pub const VAN_WINDOW: Color = rgb(0x93, 0xc5, 0xfd);
    pub const VAN_STRIPE: Color = rgb(0x1f, 0x29, 0x37);
    pub const WHEEL: Color = rgb(0x11, 0x18, 0x27);
    pub const BUBBLE: Color = rgb(0xff, 0xff, 0xff);

    pub const SHIRT: Color = rgb(0x1e, 0x3a, 0x8a);
    pub const BELT: Color = rgb(0xd2, 0xa6, 0x79);
    pub const PANTS: Color = rgb(0x22, 0x31, 0x4d);
    pub const BOOTS: Color = rgb(0x3b, 0x2f, 0x2a);
    pub const SKIN: Color = rgb(0xf2, 0xc3, 0x90);
    pub const HARD_HAT: Color = rgb(0xff, 0x8c, 0x00);

    pub const BILLBOARD_POST: Color = rgb(0x3b, 0x3f, 0x4a);
    pub const BILLBOARD: Color = rgb(0x0b, 0x12, 0x22);
    pub const BILLBOARD_FRAME: Color = rgb(0x91, 0xa4, 0xc0);
    pub const BILLBOARD_TEXT: Color = rgb(0x93, 0xc5, 0xfd);

    pub const BAR_BG: Color = rgba(0, 0, 0, 0.4);
    pub const BAR_FILL: Color = rgb(0xff, 0xd6, 0x00);
    pub const TEXT_DARK: Color = rgb(0x11, 0x11, 0x11);
    pub const TEXT_LIGHT: Color = rgb(0xff, 0xff, 0xff);
    pub const BLACK: Color = rgb(0, 0, 0);
}
