//! Lamp Run entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement, KeyboardEvent,
        PointerEvent,
    };

    use lamp_run::consts::SIM_DT;
    use lamp_run::renderer::{CanvasSurface, draw_frame};
    use lamp_run::sim::{Binding, GameEvent, Overlay};
    use lamp_run::{Game, Tuning};

    const DEFAULT_FACE: &str = "assets/tyler_face.jpg";
    const LOGO: &str = "assets/lit_logo.png";

    /// Game instance plus the page pieces it draws into
    struct App {
        game: Game,
        surface: CanvasSurface,
        canvas: HtmlCanvasElement,
        dpr: f64,
        last_time: f64,
        /// Overlay currently on the page
        shown: Option<Overlay>,
    }

    impl App {
        /// Run one display frame: simulate, then draw
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            self.last_time = time;

            let viewport = self.surface.fit(&self.canvas, self.dpr);
            self.game.resize(viewport);

            for event in self.game.advance(dt) {
                log_event(&event);
            }

            self.sync_overlay();
            self.update_hud();
            draw_frame(
                &mut self.surface,
                self.game.state(),
                self.game.camera_x(),
                &self.game.hud(),
            );
        }

        /// Show, replace or hide the overlay to match the game
        fn sync_overlay(&mut self) {
            let wanted = self.game.overlay();
            if wanted == self.shown {
                return;
            }
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            match &wanted {
                Some(overlay) => show_overlay(&document, overlay),
                None => hide_overlay(&document),
            }
            self.shown = wanted;
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let hud = self.game.hud();
            if let Some(el) = document.get_element_by_id("money") {
                el.set_text_content(Some(&hud.money_text()));
            }
            if let Some(el) = document.get_element_by_id("lights") {
                el.set_text_content(Some(&hud.lights_text()));
            }
        }
    }

    fn log_event(event: &GameEvent) {
        match event {
            GameEvent::LightOn { index } => log::debug!("Lamp {} plugged in", index),
            GameEvent::VanDispatched => log::info!("The van is coming"),
            GameEvent::Caught { taken } => log::info!("Caught by the van, lost ${}", taken),
            GameEvent::ReachedGoal { money } => log::info!("Reached the store with ${}", money),
            GameEvent::ReachedStoreShort { money } => {
                log::info!("Reached the store short: ${}", money)
            }
        }
    }

    fn show_overlay(document: &Document, overlay: &Overlay) {
        let Some(root) = document.get_element_by_id("overlay") else {
            return;
        };
        root.set_inner_html("");

        let Ok(panel) = document.create_element("div") else {
            return;
        };
        panel.set_class_name("panel");

        if let Ok(title) = document.create_element("h1") {
            title.set_text_content(Some(&overlay.title));
            let _ = panel.append_child(&title);
        }
        for line in &overlay.lines {
            if let Ok(p) = document.create_element("p") {
                p.set_text_content(Some(line));
                let _ = panel.append_child(&p);
            }
        }
        if let (Ok(p), Ok(button)) = (
            document.create_element("p"),
            document.create_element("button"),
        ) {
            button.set_text_content(Some(overlay.button));
            let _ = p.append_child(&button);
            let _ = panel.append_child(&p);
        }

        let _ = root.append_child(&panel);
        let _ = root.class_list().add_1("visible");
    }

    fn hide_overlay(document: &Document) {
        if let Some(root) = document.get_element_by_id("overlay") {
            let _ = root.class_list().remove_1("visible");
            root.set_inner_html("");
        }
    }

    /// `window.GAME_CONFIG` overrides, falling back to defaults on any problem
    fn load_tuning(window: &web_sys::Window) -> Tuning {
        let value = js_sys::Reflect::get(window, &JsValue::from_str("GAME_CONFIG"))
            .unwrap_or(JsValue::UNDEFINED);
        if value.is_undefined() || value.is_null() {
            return Tuning::default();
        }

        let json: Option<String> = js_sys::JSON::stringify(&value).ok().map(String::from);
        match json.as_deref().map(Tuning::from_json) {
            Some(Ok(tuning)) => {
                log::info!("Loaded GAME_CONFIG overrides");
                tuning
            }
            Some(Err(e)) => {
                log::warn!("Ignoring GAME_CONFIG: {}", e);
                Tuning::default()
            }
            None => {
                log::warn!("GAME_CONFIG is not serializable, using defaults");
                Tuning::default()
            }
        }
    }

    /// Face image path from `window.GAME_ASSETS.face`
    fn face_src(window: &web_sys::Window) -> String {
        js_sys::Reflect::get(window, &JsValue::from_str("GAME_ASSETS"))
            .ok()
            .filter(|assets| assets.is_object())
            .and_then(|assets| js_sys::Reflect::get(&assets, &JsValue::from_str("face")).ok())
            .and_then(|face| face.as_string())
            .unwrap_or_else(|| DEFAULT_FACE.to_string())
    }

    fn load_image(src: &str) -> HtmlImageElement {
        let img = HtmlImageElement::new().expect("failed to create image");
        img.set_src(src);
        img
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Lamp Run starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        // Images load in the background; the scene draws placeholders until then
        let face = load_image(&face_src(&window));
        let logo = load_image(LOGO);

        let mut surface = CanvasSurface::new(ctx, face, logo);
        let dpr = window.device_pixel_ratio();
        let viewport = surface.fit(&canvas, dpr);

        let tuning = load_tuning(&window);
        let app = Rc::new(RefCell::new(App {
            game: Game::new(tuning, viewport),
            surface,
            canvas,
            dpr,
            last_time: 0.0,
            shown: None,
        }));
        app.borrow().update_hud();

        setup_keyboard(app.clone());
        setup_touch_controls(app.clone());
        setup_overlay_button(app.clone());
        setup_focus_loss(app.clone());

        request_animation_frame(app);

        log::info!("Lamp Run running!");
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();

        for (event_name, down) in [("keydown", true), ("keyup", false)] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().game.handle_key(&event.key(), down);
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Hold-to-press on-screen buttons
    fn bind_hold(document: &Document, id: &str, binding: Binding, app: Rc<RefCell<App>>) {
        let Some(btn) = document.get_element_by_id(id) else {
            return;
        };

        {
            let app = app.clone();
            let btn_clone = btn.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                app.borrow_mut().game.press(binding);
                let _ = btn_clone.set_pointer_capture(event.pointer_id());
            });
            let _ = btn
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        for event_name in ["pointerup", "pointercancel", "pointerleave"] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                app.borrow_mut().game.release(binding);
            });
            let _ = btn
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_touch_controls(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        bind_hold(&document, "btn-left", Binding::TouchLeft, app.clone());
        bind_hold(&document, "btn-right", Binding::TouchRight, app.clone());
        bind_hold(&document, "btn-plug", Binding::TouchPlug, app.clone());

        if let Some(btn) = document.get_element_by_id("btn-reset") {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                app.borrow_mut().game.reset();
            });
            let _ = btn
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// One delegated listener serves whichever overlay button is showing
    fn setup_overlay_button(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        let Some(root) = document.get_element_by_id("overlay") else {
            log::warn!("No #overlay element, outcome messages disabled");
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MouseEvent| {
            let on_button = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
                .is_some_and(|el| el.tag_name().eq_ignore_ascii_case("button"));
            if !on_button {
                return;
            }

            let mut a = app.borrow_mut();
            if let Some(action) = a.shown.as_ref().map(|o| o.action) {
                a.game.activate_overlay(action);
                a.sync_overlay();
                a.update_hud();
            }
        });
        let _ = root.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Drop held inputs when the page loses focus so nothing sticks down
    fn setup_focus_loss(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        {
            let app = app.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    app.borrow_mut().game.release_all();
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            app.borrow_mut().game.release_all();
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Lamp Run (native) starting...");
    log::info!("The game runs in the browser - build for wasm32 and serve the page");

    println!("\nRunning headless demo round...");
    demo_round();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Walk the street plugging every lamp in range, then report the outcome
#[cfg(not(target_arch = "wasm32"))]
fn demo_round() {
    use lamp_run::sim::{Binding, GameEvent, Outcome};
    use lamp_run::{Game, Tuning, Viewport};

    let mut game = Game::new(Tuning::default(), Viewport::default());
    game.press(Binding::ArrowRight);

    let mut ticks = 0u32;
    while game.state().outcome == Outcome::Playing && ticks < 10_000 {
        // Tap the plug key every other tick
        if ticks % 2 == 0 {
            game.press(Binding::KeyE);
        } else {
            game.release(Binding::KeyE);
        }
        for event in game.step() {
            if let GameEvent::LightOn { index } = event {
                println!("  lamp {index} on at tick {ticks}, ${}", game.hud().money);
            }
        }
        ticks += 1;
    }

    println!("Outcome after {ticks} ticks: {:?}", game.state().outcome);
    if let Some(overlay) = game.overlay() {
        println!("{}", overlay.title);
        for line in &overlay.lines {
            println!("  {line}");
        }
    }
}
