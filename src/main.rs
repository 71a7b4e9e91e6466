//! Flappy Glide entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use flappy_glide::BestScore;
    use flappy_glide::consts::MAX_DEVICE_PIXEL_RATIO;
    use flappy_glide::render::CanvasRenderer;
    use flappy_glide::sim::{GamePhase, GameState, Intent, advance, apply_intent};
    use flappy_glide::tuning::Tunables;

    /// Game context owned by the frame driver; no ambient globals
    struct Game {
        state: GameState,
        tunables: Tunables,
        best: BestScore,
        /// Input intents queued by event handlers, drained once per tick
        intents: VecDeque<Intent>,
        renderer: CanvasRenderer,
        canvas: HtmlCanvasElement,
        last_time: f64,
        /// Previous tick's phase, to catch the Running -> GameOver edge
        last_phase: GamePhase,
    }

    impl Game {
        /// Map a primary action to an intent based on the current phase
        fn queue_primary_action(&mut self) {
            let intent = if self.state.phase == GamePhase::GameOver {
                Intent::Reset
            } else {
                Intent::Flap
            };
            self.intents.push_back(intent);
        }

        /// Drain inputs, advance the sim, persist a fresh best score
        fn update(&mut self, dt: f32) {
            while let Some(intent) = self.intents.pop_front() {
                apply_intent(&mut self.state, intent, &self.tunables);
            }
            advance(&mut self.state, dt, &self.tunables);

            if self.state.phase == GamePhase::GameOver && self.last_phase == GamePhase::Running {
                self.best.record(self.state.score);
            }
            self.last_phase = self.state.phase;
        }

        fn render(&self) {
            self.renderer.render(&self.state, &self.tunables);
        }

        /// Fit the canvas backing store to the window and swap in a fresh
        /// tunables snapshot. Runs in event handlers, which the browser
        /// serializes with the frame callback, so the swap lands between
        /// ticks.
        fn fit_to_window(&mut self) {
            let window = web_sys::window().expect("no window");
            let (w, h) = window_size(&window);
            self.tunables = Tunables::for_viewport(w, h);

            let dpr = window.device_pixel_ratio().min(MAX_DEVICE_PIXEL_RATIO);
            let vw = self.tunables.view_width as f64;
            let vh = self.tunables.view_height as f64;
            self.canvas.set_width((vw * dpr) as u32);
            self.canvas.set_height((vh * dpr) as u32);
            let style = self.canvas.style();
            let _ = style.set_property("width", &format!("{vw}px"));
            let _ = style.set_property("height", &format!("{vh}px"));
            self.renderer.set_pixel_ratio(dpr);

            self.state.refit(&self.tunables);
            log::info!("viewport {vw}x{vh} (dpr {dpr:.2})");
        }
    }

    /// Window inner size in logical pixels; zero on failure, which the
    /// tunables floor to the documented minimums anyway
    fn window_size(window: &web_sys::Window) -> (f32, f32) {
        let w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        (w as f32, h as f32)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Flappy Glide starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("context lookup failed")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let (w, h) = window_size(&window);
        let tunables = Tunables::for_viewport(w, h);
        let mut state = GameState::new(seed, &tunables);

        let best = BestScore::load();
        state.best_score = best.value;

        let game = Rc::new(RefCell::new(Game {
            state,
            tunables,
            best,
            intents: VecDeque::new(),
            renderer: CanvasRenderer::new(ctx),
            canvas: canvas.clone(),
            last_time: 0.0,
            last_phase: GamePhase::Ready,
        }));
        game.borrow_mut().fit_to_window();

        setup_input_handlers(&canvas, game.clone());
        setup_resize_handler(game.clone());

        request_animation_frame(game);

        log::info!("Flappy Glide running (seed {seed})");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard: Space or ArrowUp is the primary action
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match event.code().as_str() {
                    "Space" | "ArrowUp" => {
                        event.prevent_default();
                        game.borrow_mut().queue_primary_action();
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer press covers both mouse and touch
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                game.borrow_mut().queue_primary_action();
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().fit_to_window();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
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

            // First tick has no previous timestamp; dt = 0 by convention
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            g.last_time = time;

            g.update(dt);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flappy_glide::sim::{GamePhase, GameState, advance, flap};
    use flappy_glide::tuning::Tunables;

    env_logger::init();
    log::info!("Flappy Glide (native) starting...");
    log::info!("Headless demo run; serve the wasm build for the playable version");

    let tun = Tunables::for_viewport(800.0, 600.0);
    let mut state = GameState::new(0xF1A9, &tun);
    flap(&mut state, &tun);

    // Naive autopilot: flap whenever falling past the start line
    let dt = 1.0 / 60.0;
    let mut ticks = 0u32;
    while state.phase == GamePhase::Running && ticks < 60 * 120 {
        if state.bird.pos.y > tun.bird_start_y && state.bird.vel_y > 0.0 {
            flap(&mut state, &tun);
        }
        advance(&mut state, dt, &tun);
        ticks += 1;
    }

    println!(
        "demo run over: score {} after {:.1}s",
        state.score,
        ticks as f32 * dt
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
