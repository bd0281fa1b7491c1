mod app;
mod camera;
mod config;
mod constants;
mod error;
mod grid;
mod hit_test;
mod input;
mod media;
mod render;
mod renderer;
mod store;
mod telemetry;
mod tile;
mod ui;

use camera::Camera;
use config::EditorConfig;
use constants::*;
use error::EditorError;
use hit_test::HoverTracker;
use input::InputState;
use media::MediaManager;
use render::RenderContext;
use store::{Store, StoreEvent};
use tile::{TileId, TileType};

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Instant;

use glutin::prelude::*;
use glutin::surface::WindowSurface;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, TouchPhase, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use egui_glow::EguiGlow;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = EditorConfig::load()?;
    telemetry::init_logging(&config.log_level)?;
    let _profiler = if config.profiler {
        telemetry::start_profiler()
    } else {
        None
    };

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

struct App {
    config: EditorConfig,
    state: Option<AppState>,
    /// Fatal startup error, reported after the event loop exits
    error: Option<EditorError>,
}

struct AppState {
    // Window and GL
    window: Window,
    gl_surface: glutin::surface::Surface<WindowSurface>,
    gl_context: glutin::context::PossiblyCurrentContext,
    gl: Arc<glow::Context>,
    egui_glow: EguiGlow,

    // Rendering
    render: RenderContext,

    // Editor state
    store: Store,
    media: MediaManager,
    hover: HoverTracker,
    grid_origin: Vec2,
    rng: StdRng,

    // Input state
    input: InputState,

    // Timing
    started: Instant,
    last_frame_time: Instant,
}

impl App {
    fn new(config: EditorConfig) -> Self {
        Self {
            config,
            state: None,
            error: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        match AppState::new(event_loop, &self.config) {
            Ok(state) => self.state = Some(state),
            Err(e) => {
                tracing::error!("startup failed: {e}");
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let state = match &mut self.state {
            Some(s) => s,
            None => return,
        };

        // Let egui handle the event first
        let egui_consumed = state.egui_glow.on_window_event(&state.window, &event).consumed;
        let time_ms = state.time_ms();

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                app::resize_surface(&state.gl_surface, &state.gl_context, size.width, size.height);
                let (w, h) = state.canvas_size();
                state.render.camera.resize(w as f32, h as f32);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if !egui_consumed && event.state == ElementState::Pressed {
                    if let PhysicalKey::Code(key) = event.physical_key {
                        state.input.keys_pressed.insert(key);
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let window_pos = Vec2::new(position.x as f32, position.y as f32);
                let toolbar_px = state.toolbar_px();
                let canvas_pos = input::canvas_point(window_pos, toolbar_px);
                // An ongoing drag keeps following the cursor over the toolbar
                let pos = if state.input.is_pressed() {
                    Some(Vec2::new(window_pos.x, window_pos.y - toolbar_px))
                } else {
                    canvas_pos.filter(|_| !egui_consumed)
                };
                state.input.mouse_move(&mut state.render.camera, pos, time_ms);
            }
            WindowEvent::CursorLeft { .. } => {
                state.input.mouse_left(&mut state.render.camera, time_ms);
            }
            WindowEvent::MouseInput {
                state: btn_state,
                button: MouseButton::Left,
                ..
            } => match btn_state {
                ElementState::Pressed => {
                    if let Some(pos) = state.input.mouse_pos.filter(|_| !egui_consumed) {
                        state.input.mouse_down(&mut state.render.camera, pos, time_ms);
                    }
                }
                ElementState::Released => {
                    if let Some(click) = state.input.mouse_up(&mut state.render.camera, time_ms) {
                        state.handle_click(click);
                    }
                }
            },
            WindowEvent::MouseWheel { delta, .. } => {
                if let Some(pos) = state.input.mouse_pos.filter(|_| !egui_consumed) {
                    state.render.camera.wheel(input::scroll_lines(delta), pos);
                }
            }
            WindowEvent::Touch(touch) => {
                let window_pos = Vec2::new(touch.location.x as f32, touch.location.y as f32);
                let toolbar_px = state.toolbar_px();
                let pos = Vec2::new(window_pos.x, window_pos.y - toolbar_px);
                let camera = &mut state.render.camera;
                match touch.phase {
                    TouchPhase::Started => {
                        if !egui_consumed && input::canvas_point(window_pos, toolbar_px).is_some() {
                            state.input.touch_start(camera, touch.id, pos, time_ms);
                        }
                    }
                    TouchPhase::Moved => state.input.touch_move(camera, touch.id, pos, time_ms),
                    TouchPhase::Ended => {
                        if let Some(tap) = state.input.touch_end(camera, touch.id, time_ms) {
                            state.handle_click(tap);
                        }
                    }
                    TouchPhase::Cancelled => {
                        state.input.touch_end(camera, touch.id, time_ms);
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                state.update_and_render();
                state.window.request_redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }
}

impl AppState {
    fn new(event_loop: &ActiveEventLoop, config: &EditorConfig) -> error::Result<Self> {
        let app::WindowContext {
            window,
            gl_surface,
            gl_context,
            gl,
            egui_glow,
        } = app::create_window(event_loop, config)?;

        let size = window.inner_size();
        let toolbar_px = TOOLBAR_HEIGHT * window.scale_factor() as f32;
        let canvas_height = (size.height as f32 - toolbar_px).max(1.0);
        let render = RenderContext::new(
            gl.clone(),
            size.width as f32,
            canvas_height,
            config.min_scale,
            config.max_scale,
        )?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let tiles = config.grid.generate_tiles(&mut rng);
        tracing::info!(count = tiles.len(), "generated tiles");

        let mut media = MediaManager::new(gl.clone(), config.load_media);
        media.start(&tiles, &mut rng);

        let mut store = Store::new();
        store.set_tiles(tiles);

        let now = Instant::now();
        Ok(Self {
            window,
            gl_surface,
            gl_context,
            gl,
            egui_glow,
            render,
            store,
            media,
            hover: HoverTracker::new(),
            grid_origin: config.grid.origin(),
            rng,
            input: InputState::new(),
            started: now,
            last_frame_time: now,
        })
    }

    fn time_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    /// Toolbar height in physical pixels
    fn toolbar_px(&self) -> f32 {
        TOOLBAR_HEIGHT * self.window.scale_factor() as f32
    }

    /// Canvas area below the toolbar in physical pixels
    fn canvas_size(&self) -> (i32, i32) {
        let size = self.window.inner_size();
        let height = (size.height as f32 - self.toolbar_px()).max(1.0);
        (size.width.max(1) as i32, height as i32)
    }

    fn handle_click(&mut self, screen: Vec2) {
        let world = self.render.camera.screen_to_world(screen);
        if let Some(id) = select_at(&mut self.store, self.grid_origin, world) {
            self.media.toggle_audio(&id);
        }
    }

    fn handle_input(&mut self) {
        let result = input::process_keyboard(&mut self.input);

        if result.toggle_fullscreen {
            use winit::window::Fullscreen;
            let fullscreen = if self.window.fullscreen().is_some() {
                None
            } else {
                Some(Fullscreen::Borderless(None))
            };
            self.window.set_fullscreen(fullscreen);
        }

        if result.clear_selection {
            self.store.set_selected_tile_id(None);
        }

        if result.reset_camera {
            self.store.reset_camera();
        }
    }

    fn update_hover(&mut self) {
        let camera = &self.render.camera;
        let under = self
            .input
            .mouse_pos
            .map(|pos| camera.screen_to_world(pos))
            .and_then(|world| hit_test::tile_at(self.store.tiles(), self.grid_origin, world))
            .map(|tile| &tile.id);

        let change = self.hover.update(under);
        if !change.is_empty() {
            tracing::trace!(left = ?change.left, entered = ?change.entered, "hover changed");
        }
    }

    fn update_and_render(&mut self) {
        puffin::GlobalProfiler::lock().new_frame();
        puffin::profile_function!();

        let current_time = Instant::now();
        let dt = (current_time - self.last_frame_time).as_secs_f32();
        self.last_frame_time = current_time;

        self.handle_input();

        self.media.update(dt, &mut self.rng);
        self.render.camera.update(dt);
        sync_store(&mut self.store, &mut self.render.camera);

        self.update_hover();
        let visuals = render::build_visuals(&self.store, self.grid_origin, &self.hover, &self.media);

        // Run UI; toolbar actions apply before the overlay reads the camera
        {
            puffin::profile_scope!("ui");
            let store = &mut self.store;
            let camera = &mut self.render.camera;
            self.egui_glow.run(&self.window, |ctx| {
                let mut actions = ui::UiActions::default();
                ui::draw_toolbar(ctx, store, &mut actions);
                if actions.reset_view {
                    store.reset_camera();
                }
                if let Some(level) = actions.detail_level {
                    store.set_detail_level(level);
                }
                sync_store(store, camera);
                ui::draw_tile_overlay(ctx, &visuals, camera);
            });
        }

        self.render
            .render_frame(&self.gl, &visuals, &self.media, self.canvas_size());

        // egui paints over the whole window
        unsafe {
            use glow::HasContext;
            let size = self.window.inner_size();
            self.gl.viewport(0, 0, size.width as i32, size.height as i32);
        }
        self.egui_glow.paint(&self.window);

        if let Err(e) = self.gl_surface.swap_buffers(&self.gl_context) {
            tracing::error!("swap_buffers failed: {e}");
        }
    }
}

/// Select the tile under a click. Returns the id when it is an audio tile to toggle.
fn select_at(store: &mut Store, origin: Vec2, world: Vec2) -> Option<TileId> {
    let Some(tile) = hit_test::tile_at(store.tiles(), origin, world) else {
        tracing::debug!(x = world.x, y = world.y, "click on empty canvas");
        return None;
    };

    let id = tile.id.clone();
    let is_audio = tile.tile_type == TileType::Audio;
    tracing::info!("Tile clicked: {id}");
    store.set_selected_tile_id(Some(id.clone()));
    is_audio.then_some(id)
}

/// Apply store requests to the camera, then mirror camera motion into the store
fn sync_store(store: &mut Store, camera: &mut Camera) {
    for event in store.drain_events() {
        match event {
            StoreEvent::CameraResetRequested => camera.reset(),
            StoreEvent::SelectionChanged { previous, current } => {
                tracing::debug!(?previous, ?current, "selection changed");
            }
            StoreEvent::DetailLevelChanged(_) | StoreEvent::TilesChanged | StoreEvent::CameraChanged(_) => {}
        }
    }

    if camera.take_changes().any() {
        store.set_camera_state(camera.state());
    }
}
