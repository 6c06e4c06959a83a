//! Heart Drop entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent};

    use heart_drop::audio::{AudioManager, SoundEffect};
    use heart_drop::consts::*;
    use heart_drop::sim::{GameEvent, GameState, TickInput, tick};
    use heart_drop::tuning::Tuning;

    /// Screen element ids the game transitions between
    const GAME_SCREEN: &str = "screen-game";
    const RESULTS_SCREEN: &str = "screen-results";

    /// Game instance holding all state
    pub struct Game {
        state: GameState,
        input: TickInput,
        accumulator: f32,
        last_time: f64,
        audio: AudioManager,
        play_area: HtmlElement,
        basket: HtmlElement,
        /// DOM node per live falling heart, keyed by entity id
        item_nodes: HashMap<u32, HtmlElement>,
    }

    impl Game {
        fn new(seed: u64, tuning: Tuning, play_area: HtmlElement, basket: HtmlElement) -> Self {
            Self {
                state: GameState::new(seed, tuning),
                input: TickInput::default(),
                accumulator: 0.0,
                last_time: 0.0,
                audio: AudioManager::new(),
                play_area,
                basket,
                item_nodes: HashMap::new(),
            }
        }

        /// Convert a clientX coordinate to percent of play-area width
        fn client_x_to_percent(&self, client_x: f32) -> f32 {
            let rect = self.play_area.get_bounding_client_rect();
            let width = rect.width() as f32;
            if width <= 0.0 {
                return self.state.basket.x_percent;
            }
            (client_x - rect.left() as f32) / width * PLAY_AREA_WIDTH_PCT
        }

        /// Run simulation ticks
        fn update(&mut self, dt_ms: f32) {
            let dt_ms = dt_ms.min(100.0);
            self.accumulator += dt_ms;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
                let input = self.input.clone();
                tick(&mut self.state, &input, SIM_DT_MS);
                self.accumulator -= SIM_DT_MS;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.start = false;
                self.input.steps = 0;
                self.input.target_x = None;
            }
        }

        /// Mirror this frame's discrete events into the DOM
        fn handle_events(&mut self, document: &Document) {
            for event in self.state.drain_events() {
                match event {
                    GameEvent::Started => {
                        self.clear_item_nodes();
                        set_text(document, "hud-score", "0");
                        set_text(document, "hud-time", &self.state.time_remaining.to_string());
                        set_text(document, "hud-level", "1");
                    }
                    GameEvent::TimeTick { remaining } => {
                        set_text(document, "hud-time", &remaining.to_string());
                    }
                    GameEvent::LevelUp { level } => {
                        set_text(document, "hud-level", &level.to_string());
                        self.audio.play(SoundEffect::LevelUp);
                    }
                    GameEvent::Spawned {
                        id,
                        kind,
                        x_percent,
                        ..
                    } => {
                        if let Some(node) = create_item_node(document, kind.glyph(), x_percent) {
                            let _ = self.play_area.append_child(&node);
                            self.item_nodes.insert(id, node);
                        }
                    }
                    GameEvent::Caught { id, score } => {
                        self.remove_item_node(id);
                        set_text(document, "hud-score", &score.to_string());
                        self.audio.play(SoundEffect::Catch);
                    }
                    GameEvent::Missed { id } | GameEvent::Expired { id } => {
                        self.remove_item_node(id);
                    }
                    GameEvent::Ended { score } => {
                        self.clear_item_nodes();
                        self.audio.play(SoundEffect::GameOver);
                        schedule_results(score);
                    }
                }
            }
        }

        /// Write the continuous visual state (positions, pulse feedback)
        fn render(&self) {
            let style = self.basket.style();
            let _ = style.set_property("left", &format!("{}%", self.state.basket.x_percent));

            let class_list = self.basket.class_list();
            if self.state.basket.pulse_ms > 0.0 {
                let _ = class_list.add_1("pulse");
            } else {
                let _ = class_list.remove_1("pulse");
            }

            for heart in &self.state.hearts {
                if let Some(node) = self.item_nodes.get(&heart.id) {
                    let _ = node
                        .style()
                        .set_property("top", &format!("{}%", heart.top_percent()));
                }
            }
        }

        fn remove_item_node(&mut self, id: u32) {
            if let Some(node) = self.item_nodes.remove(&id) {
                node.remove();
            }
        }

        fn clear_item_nodes(&mut self) {
            for (_, node) in self.item_nodes.drain() {
                node.remove();
            }
        }
    }

    /// Build one `.falling-item` element; x is fixed for the item's lifetime
    fn create_item_node(document: &Document, glyph: &str, x_percent: f32) -> Option<HtmlElement> {
        let node: HtmlElement = document.create_element("div").ok()?.dyn_into().ok()?;
        node.set_class_name("falling-item");
        node.set_text_content(Some(glyph));
        let style = node.style();
        style.set_property("left", &format!("{}%", x_percent)).ok()?;
        style
            .set_property("top", &format!("{}%", ITEM_SPAWN_TOP_PCT))
            .ok()?;
        Some(node)
    }

    fn set_text(document: &Document, id: &str, value: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(value));
        } else {
            log::warn!("Missing HUD element #{}", id);
        }
    }

    /// Toggle the `active` class among `.screen` sections
    fn go_to_screen(document: &Document, screen_id: &str) {
        if let Ok(screens) = document.query_selector_all(".screen") {
            for i in 0..screens.length() {
                if let Some(node) = screens.item(i) {
                    if let Some(el) = node.dyn_ref::<web_sys::Element>() {
                        let _ = el.class_list().remove_1("active");
                    }
                }
            }
        }
        if let Some(el) = document.get_element_by_id(screen_id) {
            let _ = el.class_list().add_1("active");
        } else {
            log::warn!("Missing screen #{}", screen_id);
        }
        if let Some(window) = web_sys::window() {
            window.scroll_to_with_x_and_y(0.0, 0.0);
        }
    }

    /// After the results delay, surface the final score and leave the game screen
    fn schedule_results(score: u32) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let cb = Closure::once(move || {
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                set_text(&document, "final-score", &score.to_string());
                go_to_screen(&document, RESULTS_SCREEN);
            }
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            RESULTS_DELAY_MS,
        );
        cb.forget();
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Heart Drop starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let play_area: HtmlElement = document
            .get_element_by_id("game-area")
            .ok_or_else(|| JsValue::from_str("no #game-area"))?
            .dyn_into()?;
        let basket: HtmlElement = document
            .get_element_by_id("basket")
            .ok_or_else(|| JsValue::from_str("no #basket"))?
            .dyn_into()?;

        let tuning = Tuning::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, tuning, play_area, basket)));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&document, game.clone());
        setup_screen_buttons(&document, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Heart Drop running!");
        Ok(())
    }

    fn setup_input_handlers(document: &Document, game: Rc<RefCell<Game>>) {
        let play_area = game.borrow().play_area.clone();

        // Mouse move over the play area
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let percent = g.client_x_to_percent(event.client_x() as f32);
                g.input.target_x = Some(percent);
            });
            let _ = play_area
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move over the play area
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let percent = g.client_x_to_percent(touch.client_x() as f32);
                    g.input.target_x = Some(percent);
                }
            });
            let _ = play_area
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Discrete left/right buttons (mouse and touch)
        for (btn_id, direction) in [("left-btn", -1i32), ("right-btn", 1i32)] {
            if let Some(btn) = document.get_element_by_id(btn_id) {
                for event_name in ["mousedown", "touchstart"] {
                    let game = game.clone();
                    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                        game.borrow_mut().input.steps += direction;
                    });
                    let _ = btn.add_event_listener_with_callback(
                        event_name,
                        closure.as_ref().unchecked_ref(),
                    );
                    closure.forget();
                }
            } else {
                log::warn!("Missing control button #{}", btn_id);
            }
        }

        // Keyboard
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.input.steps -= 1,
                    "ArrowRight" => g.input.steps += 1,
                    " " | "Enter" => g.input.start = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_screen_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        // Start button on the game screen
        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.input.start = true;
                // User gesture: safe point to unlock audio
                g.audio.resume();
                if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                    go_to_screen(&document, GAME_SCREEN);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("Missing #start-btn");
        }

        // Replay from the results screen
        if let Some(btn) = document.get_element_by_id("play-again-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.input.start = true;
                g.audio.resume();
                if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                    go_to_screen(&document, GAME_SCREEN);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time in milliseconds
            let dt_ms = if g.last_time > 0.0 {
                (time - g.last_time) as f32
            } else {
                SIM_DT_MS
            };
            g.last_time = time;

            g.update(dt_ms);
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.handle_events(&document);
            }
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use heart_drop::consts::SIM_DT_MS;
    use heart_drop::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use heart_drop::tuning::Tuning;

    env_logger::init();
    log::info!("Heart Drop (native) starting...");

    // Headless demo: one seeded 20-second game with the pointer sweeping the
    // play area, so the full sim runs end-to-end off-browser.
    let mut state = GameState::new(0xC0FFEE, Tuning::default());
    tick(
        &mut state,
        &TickInput {
            start: true,
            ..Default::default()
        },
        SIM_DT_MS,
    );

    let mut t_ms = 0.0f32;
    while state.phase == GamePhase::Playing {
        let sweep = 50.0 + 40.0 * (t_ms / 900.0).sin();
        let input = TickInput {
            target_x: Some(sweep),
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT_MS);
        t_ms += SIM_DT_MS;

        for event in state.drain_events() {
            match event {
                GameEvent::TimeTick { remaining } => log::info!("{}s left", remaining),
                GameEvent::LevelUp { level } => log::info!("level {}", level),
                GameEvent::Caught { score, .. } => log::info!("caught! score {}", score),
                _ => {}
            }
        }
    }

    println!("Final score: {}", state.score);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
