//! Snake 3D entry point
//!
//! Native: headless run with a simple autopilot, printing the final snapshot.
//! Web: wires keyboard and HUD buttons to the session and drives it from
//! `requestAnimationFrame`. Meshes are drawn by the page's own renderer,
//! which reads the snapshot published on `window.snake3dSnapshot`.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(not(target_arch = "wasm32"))]
use snake3d::sim::{Direction, GameState, advance, is_near, out_of_bounds};

/// Pick the safe direction that brings the head closest to the food
#[cfg(not(target_arch = "wasm32"))]
pub fn autopilot(state: &GameState) -> Direction {
    let rules = state.rules;
    let head = state.head();
    let distance_to_food = |d: Direction| advance(head, d, rules.step).distance(state.food);

    [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
        .into_iter()
        .filter(|&d| {
            let next = advance(head, d, rules.step);
            !out_of_bounds(next, rules.boundary)
                && !state
                    .obstacles
                    .iter()
                    .any(|obs| is_near(next, *obs, rules.collision_threshold))
        })
        .min_by(|a, b| distance_to_food(*a).total_cmp(&distance_to_food(*b)))
        .unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use snake3d::Settings;
    use snake3d::sim::Session;

    let settings_path = std::env::args().nth(1);
    let settings = match settings_path.as_deref().map(|path| Settings::load(path)) {
        Some(Ok(settings)) => settings,
        Some(Err(e)) => {
            eprintln!("snake3d: {}", e);
            std::process::exit(1);
        }
        None => Settings::default(),
    };

    let filter = settings.log_filter.as_deref().unwrap_or("info");
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    log::info!("Snake 3D (native) starting...");
    if let Some(path) = &settings_path {
        log::info!("Using settings from {}", path);
    }
    match settings.to_json() {
        Ok(json) => log::debug!("Effective settings: {}", json),
        Err(e) => log::warn!("Failed to serialize settings: {}", e),
    }

    let clock_seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    let seed = settings.seed_or(clock_seed);
    log::info!("Seed: {}", seed);

    let mut session = match Session::new(seed, settings.rules) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("snake3d: {}", e);
            std::process::exit(1);
        }
    };
    session.start_session();

    let mut now_ms = 0;
    for _ in 0..settings.demo_ticks {
        session.set_direction(autopilot(session.state()));
        now_ms += session.state().speed_ms as u64;
        for event in session.update(now_ms) {
            log::debug!("{:?}", event);
        }
        if session.state().game_over {
            break;
        }
    }

    let state = session.state();
    log::info!(
        "Finished after {} ticks: score {}, level {}, lives {}",
        state.time_ticks,
        state.score,
        state.level,
        state.lives
    );

    match session.snapshot().to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use snake3d::sim::{GameEvent, Session};
    use snake3d::{ConfigError, Settings, sim::Rules};

    /// Game instance holding the session
    struct Game {
        session: Session,
    }

    impl Game {
        fn new(seed: u64, rules: Rules) -> Result<Self, ConfigError> {
            Ok(Self {
                session: Session::new(seed, rules)?,
            })
        }

        fn update(&mut self, time: f64) {
            for event in self.session.update(time as u64) {
                match event {
                    GameEvent::GameOver { score, .. } => log::info!("Game over, score {}", score),
                    other => log::debug!("{:?}", other),
                }
            }
        }

        /// Publish the snapshot and update HUD elements in the DOM
        fn update_hud(&self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let Some(document) = window.document() else {
                return;
            };
            let snapshot = self.session.snapshot();

            if let Ok(json) = snapshot.to_json() {
                let _ = js_sys::Reflect::set(
                    window.as_ref(),
                    &JsValue::from_str("snake3dSnapshot"),
                    &JsValue::from_str(&json),
                );
            }

            let hud = &snapshot.hud;
            let set_text = |id: &str, text: String| {
                if let Some(el) = document.get_element_by_id(id) {
                    el.set_text_content(Some(&text));
                }
            };
            set_text("hud-level", format!("Level: {}", hud.level));
            set_text("hud-score", format!("Score: {}", hud.score));
            set_text("hud-lives", format!("Lives: {}", hud.lives));
            set_text("hud-speed", format!("Speed: {}ms", hud.speed_ms));
            set_text("pause-btn", if hud.paused { "Resume" } else { "Pause" }.to_string());
            set_text("notification", snapshot.notifications.join("\n"));
            set_text("final-score", hud.score.to_string());

            let show = |id: &str, visible: bool| {
                if let Some(el) = document.get_element_by_id(id) {
                    let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
                }
            };
            show("start-overlay", !hud.started && !hud.game_over);
            show("game-over", hud.game_over);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Snake 3D starting...");

        let seed = js_sys::Date::now() as u64;
        let settings = Settings::default();
        let game = match Game::new(settings.seed_or(seed), settings.rules) {
            Ok(game) => Rc::new(RefCell::new(game)),
            Err(e) => {
                log::error!("Failed to create game: {}", e);
                return;
            }
        };
        log::info!("Game initialized with seed: {}", settings.seed_or(seed));

        setup_keyboard(game.clone());
        setup_buttons(game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("Snake 3D running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut g = game.borrow_mut();
            let key = event.key();
            if g.session.handle_key(&key) {
                event.prevent_default();
            } else if key == "Escape" || key == "p" {
                g.session.toggle_pause();
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        let bind = |id: &str, action: fn(&mut Session)| {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    action(&mut game.borrow_mut().session);
                });
                let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        };

        bind("start-btn", Session::start_session);
        bind("play-again-btn", Session::start_session);
        bind("restart-btn", Session::restart_session);
        bind("pause-btn", Session::toggle_pause);
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        // Window blur (click outside)
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            let mut g = game.borrow_mut();
            if g.session.state().is_active() {
                g.session.toggle_pause();
                log::info!("Auto-paused (window blur)");
            }
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use snake3d::sim::Rules;

    fn started(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Rules::default());
        state.started = true;
        state
    }

    #[test]
    fn test_autopilot_heads_for_food() {
        let mut state = started(1);
        state.food = Vec3::new(0.0, 3.0, 0.0);
        assert_eq!(autopilot(&state), Direction::Up);

        state.food = Vec3::new(-2.0, 0.0, 0.0);
        assert_eq!(autopilot(&state), Direction::Left);
    }

    #[test]
    fn test_autopilot_avoids_walls_and_obstacles() {
        let mut state = started(1);
        state.snake = vec![Vec3::new(5.0, 0.0, 0.0)];
        state.food = Vec3::new(5.0, 3.0, 0.0);
        state.obstacles = vec![Vec3::new(5.0, 0.5, 0.0)];

        let choice = autopilot(&state);
        assert_ne!(choice, Direction::Right);
        assert_ne!(choice, Direction::Up);
    }
}
