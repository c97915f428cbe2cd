//! Pong Tournament entry point
//!
//! Browser builds run an interactive tournament on a WebGPU canvas. Native
//! builds run the whole round-robin headless with CPU paddles and print the
//! results.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlInputElement, KeyboardEvent};

    use pong_tournament::consts::SIM_DT;
    use pong_tournament::game::{MatchController, MatchPhase};
    use pong_tournament::renderer::{RenderSink, RenderState};
    use pong_tournament::sim::{Autopilot, HeldKeys, Side, TickInput};
    use pong_tournament::tournament::{MatchId, Tournament};
    use pong_tournament::Settings;

    type KeyClosure = Closure<dyn FnMut(KeyboardEvent)>;

    /// Everything registered for one running match; dropped on stop
    struct MatchHandles {
        keydown: KeyClosure,
        keyup: KeyClosure,
        frame_id: Option<i32>,
    }

    /// The browser session
    struct App {
        tournament: Tournament,
        controller: MatchController,
        keys: HeldKeys,
        autopilot: Option<Autopilot>,
        render_state: Option<RenderState>,
        active: Option<MatchId>,
        handles: Option<MatchHandles>,
        last_time: f64,
    }

    impl App {
        fn new(settings: Settings) -> Self {
            let controller = MatchController::new(settings.arena, settings.win_policy())
                .with_tick_rate(settings.tick_rate);
            let autopilot = settings
                .p2_autopilot
                .then(|| Autopilot::new(Side::Right, settings.autopilot_skill));
            Self {
                tournament: Tournament::with_seed(js_sys::Date::now() as u64),
                controller,
                keys: HeldKeys::new(),
                autopilot,
                render_state: None,
                active: None,
                handles: None,
                last_time: 0.0,
            }
        }

        /// Step the match for one animation frame; true once it has finished
        fn frame(&mut self, time: f64) -> bool {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            self.last_time = time;

            let arena = *self.controller.arena();
            let keys = &self.keys;
            let autopilot = self.autopilot;
            let report = self.controller.advance_with(dt, |state| {
                let held = keys.sample();
                match autopilot {
                    Some(cpu) => TickInput {
                        p2_up: false,
                        p2_down: false,
                        ..held
                    }
                    .merge(cpu.drive(state, &arena)),
                    None => held,
                }
            });
            for side in &report.scored {
                log::debug!("Point to {:?}", side);
            }

            if let Some(render_state) = self.render_state.as_mut() {
                render_state.draw(self.controller.state(), &arena);
            }
            self.update_hud();
            report.finished
        }

        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            let state = self.controller.state();
            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&format!("{} - {}", state.score1, state.score2)));
            }

            if let Some(el) = document.get_element_by_id("current-match") {
                let text = match self.tournament.current_match() {
                    Some(m) => format!("{} vs {}", m.player1.alias, m.player2.alias),
                    None if self.tournament.is_complete() => "Tournament complete".to_string(),
                    None => String::new(),
                };
                el.set_text_content(Some(&text));
            }

            if let Some(el) = document.get_element_by_id("standings") {
                let lines: Vec<String> = self
                    .tournament
                    .standings()
                    .entries
                    .iter()
                    .enumerate()
                    .map(|(i, e)| {
                        format!(
                            "{}. {} ({}W {}L, {:+})",
                            i + 1,
                            e.player.alias,
                            e.wins,
                            e.losses,
                            e.point_diff()
                        )
                    })
                    .collect();
                el.set_text_content(Some(&lines.join("\n")));
            }

            if let Some(el) = document.get_element_by_id("roster") {
                let aliases: Vec<&str> = self
                    .tournament
                    .roster()
                    .iter()
                    .map(|p| p.alias.as_str())
                    .collect();
                el.set_text_content(Some(&aliases.join(", ")));
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Pong Tournament starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let app = Rc::new(RefCell::new(App::new(Settings::load())));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height).await {
            Ok(render_state) => app.borrow_mut().render_state = Some(render_state),
            // Tournament bookkeeping still works without a canvas
            Err(e) => log::error!("Renderer unavailable: {e}"),
        }

        setup_buttons(&document, app.clone());
        app.borrow().update_hud();

        log::info!("Pong Tournament ready");
        Ok(())
    }

    fn on_click(document: &web_sys::Document, id: &str, mut handler: impl FnMut() + 'static) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Missing button #{id}");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| handler());
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        // Buttons live as long as the page
        closure.forget();
    }

    fn setup_buttons(document: &web_sys::Document, app: Rc<RefCell<App>>) {
        {
            let app = app.clone();
            let doc = document.clone();
            on_click(document, "add-player-btn", move || {
                let Some(input) = doc
                    .get_element_by_id("alias-input")
                    .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                else {
                    return;
                };
                let mut a = app.borrow_mut();
                match a.tournament.add_player(&input.value(), None) {
                    Ok(_) => input.set_value(""),
                    Err(e) => show_error(&e.to_string()),
                }
                a.update_hud();
            });
        }

        {
            let app = app.clone();
            on_click(document, "start-btn", move || {
                let mut a = app.borrow_mut();
                if let Err(e) = a.tournament.start() {
                    show_error(&e.to_string());
                }
                a.update_hud();
            });
        }

        {
            let app = app.clone();
            on_click(document, "play-btn", move || start_match(&app));
        }

        for (id, side) in [("p1-wins-btn", Side::Left), ("p2-wins-btn", Side::Right)] {
            let app = app.clone();
            on_click(document, id, move || {
                stop_match(&app);
                let mut a = app.borrow_mut();
                let Some(match_id) = a.tournament.current_match().map(|m| m.id.clone()) else {
                    return;
                };
                if let Err(e) = a.tournament.declare_winner(&match_id, side) {
                    show_error(&e.to_string());
                }
                a.active = None;
                a.update_hud();
            });
        }

        {
            let app = app.clone();
            on_click(document, "reset-btn", move || {
                stop_match(&app);
                let mut a = app.borrow_mut();
                a.tournament.reset();
                a.controller.reset();
                a.active = None;
                a.update_hud();
            });
        }
    }

    fn show_error(message: &str) {
        log::warn!("{message}");
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("error"))
        {
            el.set_text_content(Some(message));
        }
    }

    /// Begin the tournament's current match and hook up input and frames
    fn start_match(app: &Rc<RefCell<App>>) {
        stop_match(app);

        {
            let mut a = app.borrow_mut();
            let Some(id) = a.tournament.current_match().map(|m| m.id.clone()) else {
                show_error("No match to play");
                return;
            };
            if let Err(e) = a.tournament.begin_match(&id) {
                show_error(&e.to_string());
                return;
            }
            a.controller.reset();
            if let Err(e) = a.controller.start(js_sys::Date::now()) {
                show_error(&e.to_string());
                return;
            }
            a.keys.clear();
            a.last_time = 0.0;
            a.active = Some(id);
        }

        let Some(window) = web_sys::window() else {
            return;
        };

        let keydown = {
            let app = app.clone();
            KeyClosure::new(move |event: KeyboardEvent| {
                if app.borrow_mut().keys.press_named(&event.key()) {
                    event.prevent_default();
                }
            })
        };
        let keyup = {
            let app = app.clone();
            KeyClosure::new(move |event: KeyboardEvent| {
                app.borrow_mut().keys.release_named(&event.key());
            })
        };
        let _ = window.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref());
        let _ = window.add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref());

        app.borrow_mut().handles = Some(MatchHandles {
            keydown,
            keyup,
            frame_id: None,
        });
        request_frame(app);
    }

    /// Remove the key listeners and cancel the pending frame
    fn stop_match(app: &Rc<RefCell<App>>) {
        let handles = app.borrow_mut().handles.take();
        let Some(handles) = handles else {
            return;
        };
        if let Some(window) = web_sys::window() {
            let _ = window.remove_event_listener_with_callback(
                "keydown",
                handles.keydown.as_ref().unchecked_ref(),
            );
            let _ = window
                .remove_event_listener_with_callback("keyup", handles.keyup.as_ref().unchecked_ref());
            if let Some(id) = handles.frame_id {
                let _ = window.cancel_animation_frame(id);
            }
        }
        let mut a = app.borrow_mut();
        a.keys.clear();
        if a.controller.phase() == MatchPhase::Running {
            let _ = a.controller.finish(js_sys::Date::now());
        }
        log::info!("Match loop stopped");
    }

    fn request_frame(app: &Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let next = app.clone();
        // Frees itself once invoked
        let callback = Closure::once_into_js(move |time: f64| on_frame(&next, time));
        match window.request_animation_frame(callback.unchecked_ref()) {
            Ok(id) => {
                if let Some(handles) = app.borrow_mut().handles.as_mut() {
                    handles.frame_id = Some(id);
                }
            }
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
    }

    fn on_frame(app: &Rc<RefCell<App>>, time: f64) {
        if app.borrow().handles.is_none() {
            return;
        }
        let finished = app.borrow_mut().frame(time);
        if !finished {
            request_frame(app);
            return;
        }

        stop_match(app);
        let mut a = app.borrow_mut();
        let outcome = a.controller.result().cloned();
        let active = a.active.take();
        if let (Some(id), Some(outcome)) = (active, outcome) {
            if let Err(e) = a
                .tournament
                .complete_match(&id, outcome.score1, outcome.score2)
            {
                show_error(&e.to_string());
            }
        }
        a.update_hud();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use pong_tournament::game::{MatchController, MatchOutcome, MatchPhase};
    use pong_tournament::renderer::{RenderSink, VertexRecorder};
    use pong_tournament::sim::{Autopilot, Side};
    use pong_tournament::tournament::{Match, PlayerId, Tournament, records};
    use pong_tournament::Settings;

    /// Ten minutes at 60 Hz; evenly matched CPUs can rally forever
    const MAX_MATCH_TICKS: u64 = 36_000;

    const DEFAULT_PLAYERS: [&str; 4] = ["CPU Ada", "CPU Bob", "CPU Cy", "CPU Di"];

    fn skill_for(roster_index: usize) -> u8 {
        5 + (roster_index % 4) as u8
    }

    fn play(
        m: &Match,
        tournament: &Tournament,
        settings: &Settings,
        clock_ms: &mut f64,
    ) -> MatchOutcome {
        let index_of = |id: &PlayerId| {
            tournament
                .roster()
                .iter()
                .position(|p| p.id == *id)
                .unwrap_or(0)
        };
        let left = Autopilot::new(Side::Left, skill_for(index_of(&m.player1.id)));
        let right = Autopilot::new(Side::Right, skill_for(index_of(&m.player2.id)));

        let mut controller = MatchController::new(settings.arena, settings.win_policy())
            .with_tick_rate(settings.tick_rate);
        let arena = *controller.arena();
        let dt = 1.0 / controller.tick_rate() as f32;
        let mut sink = VertexRecorder::new();

        if let Err(e) = controller.start(*clock_ms) {
            log::error!("{e}");
        }
        while controller.phase() == MatchPhase::Running {
            controller.advance_with(dt, |state| {
                left.drive(state, &arena).merge(right.drive(state, &arena))
            });
            sink.draw(controller.state(), &arena);
            if controller.state().ticks >= MAX_MATCH_TICKS {
                log::warn!("Match {} hit the tick limit", m.id);
                break;
            }
        }

        *clock_ms += controller.state().ticks as f64 * f64::from(dt) * 1000.0;
        if let Some(outcome) = controller.result() {
            return outcome.clone();
        }
        // Tick limit: stop with whatever the score is
        let state = controller.state().clone();
        controller.finish(*clock_ms).unwrap_or_else(|e| {
            log::error!("{e}");
            MatchOutcome {
                score1: state.score1,
                score2: state.score2,
                winner: state.leader(),
                ticks: state.ticks,
                started_at_ms: 0.0,
                finished_at_ms: *clock_ms,
            }
        })
    }

    pub fn run() -> i32 {
        let settings = Settings::load();
        let args: Vec<String> = std::env::args().skip(1).collect();
        let aliases: Vec<&str> = if args.is_empty() {
            DEFAULT_PLAYERS.to_vec()
        } else {
            args.iter().map(String::as_str).collect()
        };

        let mut tournament = Tournament::new();
        for alias in &aliases {
            if let Err(e) = tournament.add_player(alias, None) {
                eprintln!("Skipping '{alias}': {e}");
            }
        }
        if let Err(e) = tournament.start() {
            eprintln!("Cannot start tournament: {e}");
            return 1;
        }

        let mut clock_ms = 0.0;
        while let Some(m) = tournament.current_match().cloned() {
            if let Err(e) = tournament.begin_match(&m.id) {
                log::error!("{e}");
                return 1;
            }
            let outcome = play(&m, &tournament, &settings, &mut clock_ms);
            println!(
                "Round {} match {}: {} {} - {} {}",
                m.round, m.number, m.player1.alias, outcome.score1, outcome.score2, m.player2.alias
            );
            if let Err(e) = tournament.complete_match(&m.id, outcome.score1, outcome.score2) {
                log::error!("{e}");
                return 1;
            }
        }

        println!("\nStandings:");
        for (rank, entry) in tournament.standings().entries.iter().enumerate() {
            println!(
                "{:>2}. {:<16} P{} W{} L{} D{}  {:>3}:{:<3} ({:+})",
                rank + 1,
                entry.player.alias,
                entry.played,
                entry.wins,
                entry.losses,
                entry.draws,
                entry.points_for,
                entry.points_against,
                entry.point_diff()
            );
        }

        match records::to_json(&tournament.records(1)) {
            Ok(json) => println!("\nRecords:\n{json}"),
            Err(e) => log::error!("Failed to serialize records: {e}"),
        }
        0
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Pong Tournament (native, headless) starting...");
    std::process::exit(headless::run());
}
