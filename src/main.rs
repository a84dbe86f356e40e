//! Mammoth Run entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use mammoth_run::Settings;
    use mammoth_run::Viewport;
    use mammoth_run::audio::AudioManager;
    use mammoth_run::platform::{Clock, DateClock, InputTrigger, dispatch_events};
    use mammoth_run::renderer::{CanvasRenderer, FrameView, Renderer};
    use mammoth_run::sim::{Catalog, GameSession, StepResult, autopilot};
    use mammoth_run::ui::DomScoreboard;

    /// Game instance holding all state
    struct Game {
        session: GameSession,
        renderer: Option<CanvasRenderer>,
        audio: AudioManager,
        scoreboard: DomScoreboard,
        clock: DateClock,
        settings: Settings,
        /// Demo mode - autopilot plays the game
        demo: bool,
    }

    impl Game {
        fn new(settings: Settings, viewport: Viewport, seed: u64) -> Self {
            let session = GameSession::new(
                settings.effective_tuning(),
                Catalog::reference(),
                viewport,
                seed,
            );
            Self {
                session,
                renderer: None,
                audio: AudioManager::new(settings.mix()),
                scoreboard: DomScoreboard::new("score"),
                clock: DateClock,
                settings,
                demo: false,
            }
        }

        fn flush_events(&mut self) -> Option<u32> {
            let events = self.session.drain_events();
            dispatch_events(&events, &mut self.audio, &mut self.scoreboard)
        }

        fn render(&mut self) {
            if let Some(renderer) = self.renderer.as_mut() {
                renderer.draw(&FrameView::capture(&self.session));
            }
        }

        fn start(&mut self) {
            self.session.start(self.clock.now_ms());
            self.flush_events();
        }

        fn jump(&mut self) {
            self.audio.resume();
            if self.session.jump() {
                self.flush_events();
            }
        }

        /// Flip mute, apply it to the mixer and persist it
        fn toggle_mute(&mut self) {
            self.settings.muted = !self.settings.muted;
            self.audio.set_mix(self.settings.mix());
            self.settings.save();
            log::info!("Muted: {}", self.settings.muted);
        }

        /// One animation frame
        fn frame(&mut self) -> StepResult {
            if self.demo && autopilot::wants_jump(&self.session) {
                self.session.jump();
            }
            let result = self.session.step(self.clock.now_ms());
            // On death this is the dead-mammoth frame
            self.render();
            self.flush_events();
            result
        }

        /// Show the final score once the dead frame has been up long enough.
        /// `None` while the deadline has not passed, otherwise whether a new
        /// run was started.
        fn finish_game_over(&mut self) -> Option<bool> {
            self.session.resolve_game_over(self.clock.now_ms())?;
            // Blocks on the alert
            self.flush_events();
            if !self.settings.auto_restart {
                return Some(false);
            }
            self.start();
            Some(true)
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Mammoth Run starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Canvas fills its container
        let (width, height) = match document.query_selector(".game-container").ok().flatten() {
            Some(container) => (container.client_width(), container.client_height()),
            None => (canvas.client_width(), canvas.client_height()),
        };
        canvas.set_width(width.max(0) as u32);
        canvas.set_height(height.max(0) as u32);

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let viewport = Viewport::new(width as f32, height as f32);

        let game = Rc::new(RefCell::new(Game::new(settings, viewport, seed)));
        {
            let mut g = game.borrow_mut();
            let renderer = CanvasRenderer::new(&canvas, g.session.catalog(), "");
            if renderer.is_none() {
                log::error!("Canvas 2D context unavailable");
            }
            g.renderer = renderer;
        }

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());

        game.borrow_mut().start();
        request_animation_frame(game);

        log::info!("Mammoth Run running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard
        {
            let game = game.clone();
            let window = web_sys::window().expect("no window");
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let trigger = InputTrigger::Key(event.code());
                let mut g = game.borrow_mut();
                if trigger.is_jump() {
                    event.prevent_default();
                    g.jump();
                } else if event.key() == "i" || event.key() == "I" {
                    g.demo = !g.demo;
                    log::info!("Demo mode: {}", g.demo);
                } else if event.key() == "m" || event.key() == "M" {
                    g.toggle_mute();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse click
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                if InputTrigger::Pointer.is_jump() {
                    game.borrow_mut().jump();
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let result = game.borrow_mut().frame();
        match result {
            StepResult::Continue => request_animation_frame(game),
            StepResult::Died => {
                let delay = game.borrow().session.tuning().game_over_delay_ms;
                schedule_game_over(game, delay);
            }
            StepResult::Halted => {}
        }
    }

    /// Deferred death -> notice -> reset sequence
    fn schedule_game_over(game: Rc<RefCell<Game>>, delay_ms: u32) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move || {
            let outcome = game.borrow_mut().finish_game_over();
            match outcome {
                Some(true) => request_animation_frame(game),
                Some(false) => {}
                // Timer fired before the deadline
                None => schedule_game_over(game, 10),
            }
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            delay_ms as i32,
        );
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Mammoth Run (native) starting...");
    log::info!("Native mode runs a headless demo - serve the wasm build for the playable version");

    run_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play one headless run with the autopilot at 60 frames per second
#[cfg(not(target_arch = "wasm32"))]
fn run_demo() {
    use mammoth_run::audio::SilentAudio;
    use mammoth_run::platform::{Clock, ManualClock, dispatch_events};
    use mammoth_run::sim::{Catalog, GameSession, StepResult, autopilot};
    use mammoth_run::ui::LogScoreboard;
    use mammoth_run::{Settings, Viewport};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 60 * 5;

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Demo seed: {}", seed);

    let mut session = GameSession::new(
        settings.effective_tuning(),
        Catalog::reference(),
        Viewport::default(),
        seed,
    );
    let mut clock = ManualClock::new(0.0);
    let mut audio = SilentAudio;
    let mut scoreboard = LogScoreboard::default();

    session.start(clock.now_ms());
    for _ in 0..MAX_FRAMES {
        clock.advance(FRAME_MS);
        if autopilot::wants_jump(&session) {
            session.jump();
        }
        let result = session.step(clock.now_ms());
        dispatch_events(&session.drain_events(), &mut audio, &mut scoreboard);

        if result == StepResult::Died {
            clock.advance(f64::from(session.tuning().game_over_delay_ms));
            session.resolve_game_over(clock.now_ms());
            dispatch_events(&session.drain_events(), &mut audio, &mut scoreboard);
            return;
        }
    }

    log::info!(
        "Demo stopped after {} frames at score {} (speed {})",
        MAX_FRAMES,
        session.score(),
        session.difficulty().scroll_speed
    );
}
