//! Square Chase entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent,
    };

    use square_chase::platform::{FrameClock, LoopControl, Scheduler};
    use square_chase::renderer::{DrawCmd, Frame, build_frame};
    use square_chase::sim::{GameEvent, World, tick};
    use square_chase::{ArenaSize, CanvasMapping, DeviceProfile, GameConfig, InputTracker};

    /// Game instance holding all state
    struct Game {
        world: World,
        input: InputTracker,
        clock: FrameClock,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
    }

    impl Game {
        /// Run the ticks owed for this frame
        fn update(&mut self, time: f64) {
            let ticks = self.clock.advance(time);
            let mut score_changed = false;
            for _ in 0..ticks {
                let input = self.input.tick_input();
                for event in tick(&mut self.world, &input) {
                    match event {
                        GameEvent::PointCollected { .. } => score_changed = true,
                        GameEvent::PointsRespawned => log::info!("All points collected"),
                        GameEvent::Collision { .. } => {
                            log::debug!("Game over with score {}", self.world.score)
                        }
                    }
                }
            }
            if score_changed {
                self.update_hud();
            }
        }

        /// Render the current frame
        fn render(&self) {
            let guide = self.input.show_guide().then(|| self.input.target());
            paint(&self.ctx, &build_frame(&self.world, guide));
        }

        /// Update the score element in the DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&self.world.score.to_string()));
            }
        }

        /// Reset game state for restart
        fn restart(&mut self) {
            self.world.reset();
            self.input.release();
            self.input.set_target(self.world.player.pos);
            self.clock.reset();
            self.update_hud();
        }

        /// Size the canvas for the current viewport and refresh the input mapping
        fn fit_canvas(&mut self, regenerate: bool) {
            if regenerate {
                let arena = self.world.config.arena.resolve(container_size(&self.canvas));
                self.world.resize(arena);
                self.input.set_target(self.world.player.pos);
            }
            self.canvas.set_width(self.world.arena.x as u32);
            self.canvas.set_height(self.world.arena.y as u32);
            self.input.set_mapping(canvas_mapping(&self.canvas));
        }
    }

    /// Schedules frames with `requestAnimationFrame`
    struct AnimationFrameScheduler;

    impl Scheduler for AnimationFrameScheduler {
        fn run<F>(self, mut frame: F)
        where
            F: FnMut(f64) -> LoopControl + 'static,
        {
            let handle: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
            let next = handle.clone();

            *handle.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |time: f64| {
                if frame(time) == LoopControl::Stop {
                    return;
                }
                if let Some(callback) = next.borrow().as_ref() {
                    request_animation_frame(callback);
                }
            }));

            if let Some(callback) = handle.borrow().as_ref() {
                request_animation_frame(callback);
            }
        }
    }

    fn request_animation_frame(callback: &Closure<dyn FnMut(f64)>) {
        if let Some(window) = web_sys::window() {
            let _ = window.request_animation_frame(callback.as_ref().unchecked_ref());
        }
    }

    /// Paint a draw list onto a 2D context
    fn paint(ctx: &CanvasRenderingContext2d, frame: &Frame) {
        for cmd in &frame.commands {
            match cmd {
                DrawCmd::Clear { color } => {
                    ctx.set_fill_style_str(&color.to_css());
                    ctx.fill_rect(0.0, 0.0, frame.size.x as f64, frame.size.y as f64);
                }
                DrawCmd::FillRect { rect, color } => {
                    ctx.set_fill_style_str(&color.to_css());
                    ctx.fill_rect(
                        rect.min.x as f64,
                        rect.min.y as f64,
                        rect.size.x as f64,
                        rect.size.y as f64,
                    );
                }
                DrawCmd::FillCircle {
                    center,
                    radius,
                    color,
                } => {
                    ctx.set_fill_style_str(&color.to_css());
                    ctx.begin_path();
                    let _ = ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU);
                    ctx.fill();
                }
                DrawCmd::Line {
                    from,
                    to,
                    width,
                    color,
                } => {
                    ctx.set_stroke_style_str(&color.to_css());
                    ctx.set_line_width(*width as f64);
                    ctx.begin_path();
                    ctx.move_to(from.x as f64, from.y as f64);
                    ctx.line_to(to.x as f64, to.y as f64);
                    ctx.stroke();
                }
                DrawCmd::Text {
                    text,
                    pos,
                    px,
                    align,
                    color,
                } => {
                    ctx.set_fill_style_str(&color.to_css());
                    ctx.set_font(&format!("{}px Arial", px));
                    ctx.set_text_align(align.as_css());
                    let _ = ctx.fill_text(text, pos.x as f64, pos.y as f64);
                }
            }
        }
    }

    /// Space the canvas may fill: its parent element, or the window
    fn container_size(canvas: &HtmlCanvasElement) -> Vec2 {
        if let Some(parent) = canvas.parent_element() {
            let (w, h) = (parent.client_width(), parent.client_height());
            if w > 0 && h > 0 {
                return Vec2::new(w as f32, h as f32);
            }
        }
        window_size()
    }

    fn window_size() -> Vec2 {
        let Some(window) = web_sys::window() else {
            return Vec2::ZERO;
        };
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        Vec2::new(w as f32, h as f32)
    }

    fn canvas_mapping(canvas: &HtmlCanvasElement) -> CanvasMapping {
        let rect = canvas.get_bounding_client_rect();
        CanvasMapping::new(
            Vec2::new(rect.left() as f32, rect.top() as f32),
            Vec2::new(rect.width() as f32, rect.height() as f32),
            Vec2::new(canvas.width() as f32, canvas.height() as f32),
        )
    }

    fn detect_profile() -> DeviceProfile {
        let touch_points = web_sys::window()
            .map(|w| w.navigator().max_touch_points())
            .unwrap_or(0);
        DeviceProfile::detect(touch_points, window_size().x)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }
        log::info!("Square Chase starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("gameCanvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #gameCanvas element");
            return;
        };
        let Some(ctx) = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            log::error!("Canvas 2D context unavailable");
            return;
        };

        // Device branching happens once, here
        let profile = detect_profile();
        let config = match profile {
            DeviceProfile::Desktop => GameConfig::from_profile(profile),
            DeviceProfile::Mobile => GameConfig::responsive(profile),
        };
        log::info!("Detected {} profile", profile.as_str());

        let arena = config.arena.resolve(container_size(&canvas));
        let seed = js_sys::Date::now() as u64;
        let input_mode = config.input_mode;
        let world = World::new(config, arena, seed);
        canvas.set_width(world.arena.x as u32);
        canvas.set_height(world.arena.y as u32);
        let input = InputTracker::new(input_mode, canvas_mapping(&canvas), world.player.pos);

        let game = Rc::new(RefCell::new(Game {
            world,
            input,
            clock: FrameClock::new(),
            canvas: canvas.clone(),
            ctx,
        }));
        game.borrow().update_hud();

        setup_input_handlers(&canvas, game.clone());
        setup_resize_handler(game.clone());

        // Start game loop
        AnimationFrameScheduler.run(move |time| {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            LoopControl::Continue
        });
        log::info!("Square Chase running!");
    }

    fn client_pos(event: &MouseEvent) -> Vec2 {
        Vec2::new(event.client_x() as f32, event.client_y() as f32)
    }

    fn first_touch(event: &TouchEvent) -> Option<Vec2> {
        let touch = event.touches().get(0)?;
        Some(Vec2::new(touch.client_x() as f32, touch.client_y() as f32))
    }

    /// Press start: restarts when the run is over, otherwise begins steering
    fn press(game: &Rc<RefCell<Game>>, pos: Vec2) {
        let mut g = game.borrow_mut();
        if g.world.is_over() {
            g.restart();
        } else {
            g.input.press(pos);
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                press(&game, client_pos(&event));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().input.move_to(client_pos(&event));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up / leave
        for name in ["mouseup", "mouseleave"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.release();
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(pos) = first_touch(&event) {
                    press(&game, pos);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(pos) = first_touch(&event) {
                    game.borrow_mut().input.move_to(pos);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end / cancel
        for name in ["touchend", "touchcancel"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().input.release();
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // R restarts after a crash
        if let Some(window) = web_sys::window() {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if g.world.is_over() && event.key().eq_ignore_ascii_case("r") {
                    g.restart();
                }
            });
            let _ =
                window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            // Fixed canvases keep their board; only the CSS scale may have changed
            let regenerate = g.world.config.arena == ArenaSize::Fill;
            g.fit_canvas(regenerate);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;
    use std::time::Duration;

    use anyhow::{Result, anyhow};
    use clap::Parser;
    use glam::Vec2;

    use square_chase::consts::{DESKTOP_HEIGHT, DESKTOP_WIDTH};
    use square_chase::platform::{FixedRateScheduler, LoopControl, Scheduler};
    use square_chase::renderer::build_frame;
    use square_chase::sim::{GameEvent, World, tick};
    use square_chase::{CanvasMapping, GameConfig, InputTracker, Preset};

    #[derive(Parser, Debug)]
    #[command(name = "square-chase")]
    #[command(about = "Headless Square Chase run with a simple autopilot", long_about = None)]
    #[command(version)]
    pub struct Cli {
        /// JSON config file overriding the preset defaults
        #[arg(long)]
        config: Option<PathBuf>,

        /// Starting preset (classic, desktop, mobile or responsive)
        #[arg(long, default_value = "desktop")]
        preset: String,

        /// RNG seed for obstacle and point placement
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Number of ticks to simulate
        #[arg(long, default_value_t = 3600)]
        ticks: u64,

        /// Ticks per second; 0 runs as fast as possible
        #[arg(long, default_value_t = 0)]
        fps: u32,

        /// Start over after a crash instead of stopping
        #[arg(long)]
        restart: bool,

        /// Print the final frame's draw list as JSON
        #[arg(long)]
        dump: bool,
    }

    struct Demo {
        world: World,
        input: InputTracker,
        crashes: u32,
        best_score: u64,
    }

    /// Head for the nearest uncollected point
    fn autopilot_target(world: &World) -> Vec2 {
        world
            .points
            .iter()
            .filter(|p| !p.collected)
            .map(|p| p.center())
            .min_by(|a, b| {
                a.distance_squared(world.player.pos)
                    .total_cmp(&b.distance_squared(world.player.pos))
            })
            .unwrap_or(world.arena / 2.0)
    }

    pub fn run() -> Result<()> {
        let cli = Cli::parse();

        let config = match &cli.config {
            Some(path) => GameConfig::load(path)?,
            None => {
                let preset = Preset::from_str(&cli.preset)
                    .ok_or_else(|| anyhow!("unknown preset '{}'", cli.preset))?;
                log::info!("Using {} preset", preset.as_str());
                preset.config()
            }
        };

        let arena = config
            .arena
            .resolve(Vec2::new(DESKTOP_WIDTH, DESKTOP_HEIGHT));
        let input_mode = config.input_mode;
        let world = World::new(config, arena, cli.seed);
        let input = InputTracker::new(
            input_mode,
            CanvasMapping::identity(world.arena),
            world.player.pos,
        );

        let demo = Rc::new(RefCell::new(Demo {
            world,
            input,
            crashes: 0,
            best_score: 0,
        }));

        let interval = if cli.fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(1.0 / cli.fps as f64)
        };
        let restart = cli.restart;

        let state = demo.clone();
        FixedRateScheduler::new(interval)
            .with_max_frames(cli.ticks)
            .run(move |_now| {
                let mut d = state.borrow_mut();
                let goal = autopilot_target(&d.world);
                d.input.press(goal);

                let input = d.input.tick_input();
                for event in tick(&mut d.world, &input) {
                    if let GameEvent::Collision { obstacle_index } = event {
                        d.crashes += 1;
                        d.best_score = d.best_score.max(d.world.score);
                        log::debug!(
                            "Crashed into obstacle {} with score {}",
                            obstacle_index,
                            d.world.score
                        );
                        if !restart {
                            return LoopControl::Stop;
                        }
                        d.world.reset();
                    }
                }
                LoopControl::Continue
            });

        let d = demo.borrow();
        let best = d.best_score.max(d.world.score);
        println!(
            "Seed: {}  Ticks: {}  Score: {}  Best: {}  Crashes: {}",
            d.world.seed, d.world.time_ticks, d.world.score, best, d.crashes
        );

        if cli.dump {
            let guide = d.input.show_guide().then(|| d.input.target());
            let frame = build_frame(&d.world, guide);
            println!("{}", serde_json::to_string_pretty(&frame)?);
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Square Chase (native) starting...");
    native::run()
}
