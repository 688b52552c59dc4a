//! Frame drawing for the street
//!
//! Reads the game state and camera, writes primitives to a `Surface`.
//! World x is turned into screen x by subtracting the camera; y is already
//! in screen space.

use glam::Vec2;

use super::surface::{Color, ImageId, Surface, TextStyle, colors};
use crate::game::Hud;
use crate::sim::{GameState, LightPost, Player, Van};

/// Building bands scroll at this fraction of the camera
const PARALLAX: f32 = 0.3;
const SKY_BANDS: usize = 8;
const LANE_DASH: f32 = 20.0;

const STORE_WIDTH: f32 = 280.0;
const STORE_HEIGHT: f32 = 140.0;

/// Draw one complete frame
pub fn draw_frame(surface: &mut impl Surface, state: &GameState, camera_x: f32, hud: &Hud) {
    let ground_y = state.world.ground_y;

    draw_background(surface, camera_x, ground_y);

    draw_billboard(
        surface,
        state.tuning.left_margin - 250.0 - camera_x,
        ground_y - 160.0,
        200.0,
        120.0,
    );
    for &bx in &state.world.billboard_xs {
        draw_billboard(surface, bx - camera_x, ground_y - 180.0, 240.0, 140.0);
    }

    for light in &state.lights {
        draw_lamp(surface, light, state, camera_x);
    }
    draw_store(surface, state.world.store_x - camera_x, ground_y);
    draw_van(surface, &state.van, camera_x);
    draw_player(surface, &state.player, camera_x);
    draw_progress(surface, hud);
}

/// Sky, parallax buildings, street and lane markings
fn draw_background(surface: &mut impl Surface, camera_x: f32, ground_y: f32) {
    let size = surface.size();

    let band_h = size.y / SKY_BANDS as f32;
    for i in 0..SKY_BANDS {
        let t = i as f32 / (SKY_BANDS - 1) as f32;
        let color = lerp_color(colors::SKY_TOP, colors::SKY_BOTTOM, t);
        surface.fill_rect(0.0, i as f32 * band_h, size.x, band_h + 1.0, color);
    }

    let offset = -camera_x * PARALLAX;
    for i in -1..20 {
        let bx = i as f32 * 320.0 + offset;
        draw_building(surface, bx + 40.0, size.y - 240.0, 180.0, 180.0, colors::BUILDING_NEAR);
        draw_building(surface, bx + 220.0, size.y - 280.0, 220.0, 220.0, colors::BUILDING_MID);
        draw_building(surface, bx + 480.0, size.y - 210.0, 150.0, 150.0, colors::BUILDING_FAR);
    }

    surface.fill_rect(0.0, ground_y, size.x, size.y - ground_y, colors::STREET);

    // Dashes are anchored to world x so they scroll with the street
    let period = LANE_DASH * 2.0;
    let mut x = -(camera_x.rem_euclid(period));
    while x < size.x {
        surface.fill_rect(x, ground_y + 38.0, LANE_DASH, 4.0, colors::LANE_LINE);
        x += period;
    }
}

fn draw_building(surface: &mut impl Surface, x: f32, y: f32, w: f32, h: f32, color: Color) {
    if x + w < 0.0 || x > surface.size().x {
        return;
    }
    surface.fill_rect(x, y, w, h, color);

    let mut i = 10.0;
    while i < w - 10.0 {
        let mut j = 10.0;
        while j < h - 10.0 {
            surface.fill_rect(x + i, y + j, 12.0, 18.0, colors::WINDOW);
            j += 26.0;
        }
        i += 24.0;
    }
}

fn draw_billboard(surface: &mut impl Surface, x: f32, y: f32, w: f32, h: f32) {
    if x + w < 0.0 || x > surface.size().x {
        return;
    }
    surface.fill_rect(x + w / 2.0 - 6.0, y + h, 12.0, 40.0, colors::BILLBOARD_POST);
    surface.fill_rect(x - 1.0, y - 1.0, w + 2.0, h + 2.0, colors::BILLBOARD_FRAME);
    surface.fill_rect(x + 1.0, y + 1.0, w - 2.0, h - 2.0, colors::BILLBOARD);

    if surface.image_ready(ImageId::Logo) {
        surface.draw_image(ImageId::Logo, x + 10.0, y + 10.0, w - 20.0, h - 20.0);
    } else {
        surface.fill_text(
            "LIT ELECTRICAL",
            Vec2::new(x + w / 2.0, y + h / 2.0),
            TextStyle::new(18.0).bold(),
            colors::BILLBOARD_TEXT,
        );
    }
}

fn draw_lamp(surface: &mut impl Surface, light: &LightPost, state: &GameState, camera_x: f32) {
    let x = light.x - camera_x;
    let base_y = state.world.ground_y;
    let bulb = Vec2::new(x + 36.0, base_y - 116.0);

    surface.stroke_path(
        &[Vec2::new(x, base_y), Vec2::new(x, base_y - 90.0)],
        8.0,
        colors::POLE,
    );
    surface.stroke_path(
        &[Vec2::new(x, base_y - 90.0), Vec2::new(x + 28.0, base_y - 110.0)],
        5.0,
        colors::POLE,
    );

    if light.on {
        surface.fill_circle(bulb, 80.0, colors::GLOW);
    }
    let bulb_color = if light.on { colors::BULB_ON } else { colors::BULB_OFF };
    surface.fill_circle(bulb, 12.0, bulb_color);

    // Plug box
    surface.fill_rect(x - 16.0, base_y - 24.0, 18.0, 18.0, colors::PLUG_BOX);
    surface.fill_rect(x - 12.0, base_y - 18.0, 4.0, 4.0, colors::PLUG_HOLE);
    surface.fill_rect(x - 6.0, base_y - 18.0, 4.0, 4.0, colors::PLUG_HOLE);

    if surface.image_ready(ImageId::Logo) {
        let (lw, lh) = (24.0, 14.0);
        surface.fill_rect(x - lw / 2.0, base_y - 56.0, lw, lh, colors::LOGO_BACKING);
        surface.draw_image(ImageId::Logo, x - lw / 2.0 + 1.0, base_y - 55.0, lw - 2.0, lh - 2.0);
    }

    let player = &state.player;
    if !light.on && light.in_range(player.pos.x, state.tuning.plug_range) {
        surface.fill_rect(x - 54.0, base_y - 150.0, 108.0, 22.0, colors::PROMPT_BG);
        surface.fill_text(
            "Press E to plug",
            Vec2::new(x, base_y - 139.0),
            TextStyle::new(12.0),
            colors::TEXT_LIGHT,
        );
    }

    if light.cord_ticks > 0 {
        let plug = Vec2::new(x - 8.0, base_y - 15.0);
        let hand = Vec2::new(
            player.pos.x - camera_x + player.facing.sign() * 14.0,
            player.pos.y + 30.0,
        );
        let sag = Vec2::new((plug.x + hand.x) / 2.0, base_y - 50.0);
        surface.stroke_path(&[plug, sag, hand], 2.0, colors::CORD);
    }
}

fn draw_store(surface: &mut impl Surface, x: f32, ground_y: f32) {
    let (w, h) = (STORE_WIDTH, STORE_HEIGHT);
    let y = ground_y - h;
    surface.fill_rect(x, y, w, h, colors::STORE);
    surface.fill_rect(x + 10.0, y + 10.0, w - 20.0, 40.0, colors::STORE_SIGN);
    surface.fill_text(
        "JB HI-FI",
        Vec2::new(x + w / 2.0, y + 30.0),
        TextStyle::new(24.0).bold(),
        colors::TEXT_DARK,
    );
    surface.fill_rect(x + w / 2.0 - 20.0, y + 60.0, 40.0, 70.0, colors::STORE_DOOR);
}

fn draw_van(surface: &mut impl Surface, van: &Van, camera_x: f32) {
    let x = van.pos.x - camera_x;
    let y = van.pos.y;
    let (w, h) = (van.size.x, van.size.y);

    surface.fill_rect(x, y, w, h, colors::VAN_BODY);
    surface.fill_rect(x + w - 42.0, y + 6.0, 36.0, h - 12.0, colors::VAN_CAB);
    surface.fill_rect(x + w - 36.0, y + 12.0, 24.0, 18.0, colors::VAN_WINDOW);
    surface.fill_rect(x + 42.0, y + 22.0, w - 94.0, 10.0, colors::VAN_STRIPE);
    surface.fill_text(
        "ATO",
        Vec2::new(x + 18.0, y + 15.0),
        TextStyle::new(16.0).bold().left(),
        colors::BLACK,
    );

    for wheel_x in [x + 22.0, x + w - 42.0] {
        surface.fill_circle(Vec2::new(wheel_x, y + h), 12.0, colors::WHEEL);
    }

    if van.bubble_ticks > 0 {
        draw_speech_bubble(surface, x + w + 10.0, y - 10.0, 160.0, 50.0, "Time to pay the tax man");
    }
}

/// Speech bubble with a pointer on its left side
fn draw_speech_bubble(surface: &mut impl Surface, x: f32, y: f32, w: f32, h: f32, text: &str) {
    surface.fill_rect(x - 1.0, y - 1.0, w + 2.0, h + 2.0, colors::LOGO_BACKING);
    surface.fill_rect(x, y, w, h, colors::BUBBLE);
    surface.stroke_path(
        &[
            Vec2::new(x, y + h / 2.0 - 6.0),
            Vec2::new(x - 12.0, y + h / 2.0),
            Vec2::new(x, y + h / 2.0 + 6.0),
        ],
        2.0,
        colors::BUBBLE,
    );
    surface.fill_text(
        text,
        Vec2::new(x + 10.0, y + h / 2.0),
        TextStyle::new(12.0).left(),
        colors::TEXT_DARK,
    );
}

fn draw_player(surface: &mut impl Surface, player: &Player, camera_x: f32) {
    let origin = Vec2::new(player.pos.x - camera_x, player.pos.y);
    let sign = player.facing.sign();

    // Body parts in facing-local coordinates: (x, y, w, h, colour)
    let parts: [(f32, f32, f32, f32, Color); 7] = [
        (-18.0, 8.0, 36.0, 42.0, colors::SHIRT),
        (-18.0, 30.0, 36.0, 8.0, colors::BELT),
        (-16.0, 42.0, 12.0, 22.0, colors::PANTS),
        (4.0, 42.0, 12.0, 22.0, colors::PANTS),
        (-18.0, 62.0, 16.0, 10.0, colors::BOOTS),
        (2.0, 62.0, 16.0, 10.0, colors::BOOTS),
        // Shirt pocket, on the facing side
        (8.0, 12.0, 6.0, 6.0, colors::BELT),
    ];
    for (lx, ly, w, h, color) in parts {
        let x = mirror_x(origin.x, sign, lx, w);
        surface.fill_rect(x, origin.y + ly, w, h, color);
    }

    // Hard hat peeks out above the head
    let head_r = 22.0;
    surface.fill_circle(origin + Vec2::new(0.0, -4.0), head_r + 4.0, colors::HARD_HAT);
    if surface.image_ready(ImageId::Face) {
        surface.draw_image_circle(ImageId::Face, origin, head_r);
    } else {
        surface.fill_circle(origin, head_r, colors::SKIN);
    }

    if surface.image_ready(ImageId::Logo) {
        surface.draw_image(ImageId::Logo, origin.x - 12.0, origin.y + 18.0, 24.0, 12.0);
    } else {
        surface.fill_text(
            "LIT",
            origin + Vec2::new(0.0, 24.0),
            TextStyle::new(10.0).bold(),
            colors::TEXT_LIGHT,
        );
    }
}

/// Screen x of a local rect after mirroring around `origin_x`
#[inline]
fn mirror_x(origin_x: f32, sign: f32, local_x: f32, width: f32) -> f32 {
    if sign >= 0.0 {
        origin_x + local_x
    } else {
        origin_x - local_x - width
    }
}

fn draw_progress(surface: &mut impl Surface, hud: &Hud) {
    let size = surface.size();
    let (x, y, w, h) = (8.0, size.y - 28.0, size.x - 16.0, 20.0);
    surface.fill_rect(x, y, w, h, colors::BAR_BG);
    surface.fill_rect(x, y, w * hud.progress(), h, colors::BAR_FILL);
    surface.fill_text(
        &format!("${} / ${}", hud.money, hud.goal),
        Vec2::new(size.x / 2.0, y + h / 2.0),
        TextStyle::new(12.0).bold(),
        colors::BLACK,
    );
}

fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Viewport;
    use crate::game::Game;
    use crate::sim::Binding;
    use crate::tuning::Tuning;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Rect { x: f32, y: f32, w: f32, h: f32 },
        Circle { center: Vec2, radius: f32 },
        Path(Vec<Vec2>),
        Text { text: String, pos: Vec2 },
        Image { image: ImageId, x: f32 },
        ImageCircle(ImageId),
    }

    struct Recorder {
        size: Vec2,
        face_ready: bool,
        logo_ready: bool,
        ops: Vec<Op>,
    }

    impl Recorder {
        fn new(face_ready: bool, logo_ready: bool) -> Self {
            Self {
                size: Vec2::new(960.0, 540.0),
                face_ready,
                logo_ready,
                ops: Vec::new(),
            }
        }

        fn texts(&self) -> Vec<&str> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Text { text, .. } => Some(text.as_str()),
                    _ => None,
                })
                .collect()
        }

        fn text_pos(&self, wanted: &str) -> Option<Vec2> {
            self.ops.iter().find_map(|op| match op {
                Op::Text { text, pos } if text == wanted => Some(*pos),
                _ => None,
            })
        }
    }

    impl Surface for Recorder {
        fn size(&self) -> Vec2 {
            self.size
        }

        fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, _color: Color) {
            self.ops.push(Op::Rect { x, y, w, h });
        }

        fn fill_circle(&mut self, center: Vec2, radius: f32, _color: Color) {
            self.ops.push(Op::Circle { center, radius });
        }

        fn stroke_path(&mut self, points: &[Vec2], _width: f32, _color: Color) {
            self.ops.push(Op::Path(points.to_vec()));
        }

        fn fill_text(&mut self, text: &str, pos: Vec2, _style: TextStyle, _color: Color) {
            self.ops.push(Op::Text {
                text: text.to_string(),
                pos,
            });
        }

        fn image_ready(&self, image: ImageId) -> bool {
            match image {
                ImageId::Face => self.face_ready,
                ImageId::Logo => self.logo_ready,
            }
        }

        fn draw_image(&mut self, image: ImageId, x: f32, _y: f32, _w: f32, _h: f32) {
            self.ops.push(Op::Image { image, x });
        }

        fn draw_image_circle(&mut self, image: ImageId, _center: Vec2, _radius: f32) {
            self.ops.push(Op::ImageCircle(image));
        }
    }

    fn render(game: &Game, face: bool, logo: bool) -> Recorder {
        let mut surface = Recorder::new(face, logo);
        draw_frame(&mut surface, game.state(), game.camera_x(), &game.hud());
        surface
    }

    fn new_game() -> Game {
        Game::new(Tuning::default(), Viewport::default())
    }

    #[test]
    fn test_placeholders_without_assets() {
        let surface = render(&new_game(), false, false);
        let texts = surface.texts();
        assert!(texts.contains(&"LIT"));
        assert!(texts.contains(&"LIT ELECTRICAL"));
        assert!(!surface.ops.iter().any(|op| matches!(op, Op::Image { .. } | Op::ImageCircle(_))));
    }

    #[test]
    fn test_images_when_ready() {
        let surface = render(&new_game(), true, true);
        assert!(surface.ops.contains(&Op::ImageCircle(ImageId::Face)));
        assert!(surface.ops.iter().any(|op| matches!(op, Op::Image { image: ImageId::Logo, .. })));
        assert!(!surface.texts().contains(&"LIT"));
    }

    #[test]
    fn test_plug_prompt_only_in_range() {
        let mut game = new_game();
        assert!(!render(&game, false, false).texts().contains(&"Press E to plug"));

        game.press(Binding::ArrowRight);
        while game.state().pluggable_light().is_none() {
            game.step();
        }
        let surface = render(&game, false, false);
        let pos = surface.text_pos("Press E to plug").unwrap();
        assert_eq!(pos.x, 400.0 - game.camera_x());
    }

    #[test]
    fn test_bubble_and_cord_after_first_lamp() {
        let mut game = new_game();
        game.press(Binding::ArrowRight);
        while game.state().pluggable_light().is_none() {
            game.step();
        }
        game.release(Binding::ArrowRight);
        game.press(Binding::KeyE);
        game.step();

        let surface = render(&game, false, false);
        assert!(surface.texts().contains(&"Time to pay the tax man"));
        // Cord is the only three-point path besides the bubble pointer
        let paths = surface
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Path(p) if p.len() == 3))
            .count();
        assert_eq!(paths, 2);
        assert!(!surface.texts().contains(&"Press E to plug"));
    }

    #[test]
    fn test_store_sign_scrolls_with_camera() {
        let mut game = new_game();
        game.press(Binding::ArrowRight);
        for _ in 0..600 {
            game.step();
        }
        let surface = render(&game, false, false);
        let sign = surface.text_pos("JB HI-FI").unwrap();
        let expected = game.state().world.store_x + STORE_WIDTH / 2.0 - game.camera_x();
        assert!((sign.x - expected).abs() < 1e-3);
    }

    #[test]
    fn test_progress_bar() {
        let game = new_game();
        let surface = render(&game, false, false);
        assert!(surface.texts().contains(&"$0 / $1000"));

        let hud = Hud {
            money: 500,
            lights_on: 5,
            lights_needed: 10,
            goal: 1000,
        };
        let mut surface = Recorder::new(false, false);
        draw_frame(&mut surface, game.state(), 0.0, &hud);
        assert!(surface.texts().contains(&"$500 / $1000"));
        assert!(surface.ops.contains(&Op::Rect {
            x: 8.0,
            y: 512.0,
            w: 472.0,
            h: 20.0
        }));
    }

    #[test]
    fn test_mirror_x() {
        assert_eq!(mirror_x(100.0, 1.0, 8.0, 6.0), 108.0);
        assert_eq!(mirror_x(100.0, -1.0, 8.0, 6.0), 86.0);
    }
}
