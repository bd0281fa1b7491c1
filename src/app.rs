//! Application window and OpenGL context management.
//!
//! Window creation, OpenGL 3.3 context setup and egui integration. Keeps
//! platform and graphics plumbing out of the editor logic.

use std::ffi::CString;
use std::num::NonZeroU32;
use std::sync::Arc;

use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, Version};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{SurfaceAttributesBuilder, WindowSurface};
use glutin_winit::DisplayBuilder;
use raw_window_handle::HasWindowHandle;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

use egui_glow::EguiGlow;

use crate::config::EditorConfig;
use crate::constants::WINDOW_TITLE;
use crate::error::{EditorError, Result};

/// Result of window and GL context creation.
pub struct WindowContext {
    pub window: Window,
    pub gl_surface: glutin::surface::Surface<WindowSurface>,
    pub gl_context: glutin::context::PossiblyCurrentContext,
    pub gl: Arc<glow::Context>,
    pub egui_glow: EguiGlow,
}

/// Create a window with OpenGL context and egui integration.
pub fn create_window(event_loop: &ActiveEventLoop, config: &EditorConfig) -> Result<WindowContext> {
    let window_attrs = WindowAttributes::default()
        .with_title(WINDOW_TITLE)
        .with_inner_size(PhysicalSize::new(config.window_width, config.window_height))
        .with_resizable(true);

    // The tile shader antialiases its own edges; no multisampling is requested
    let template = ConfigTemplateBuilder::new().with_alpha_size(8);
    let display_builder = DisplayBuilder::new().with_window_attributes(Some(window_attrs));

    let (window, gl_config) = display_builder
        .build(event_loop, template, |configs| {
            configs
                .reduce(|accum, config| {
                    if config.num_samples() > accum.num_samples() {
                        config
                    } else {
                        accum
                    }
                })
                .expect("glutin offers at least one config")
        })
        .map_err(|e| EditorError::Window(e.to_string()))?;

    let window = window.ok_or_else(|| EditorError::Window("no window was created".to_string()))?;
    let window_handle = window
        .window_handle()
        .map_err(|e| EditorError::Window(e.to_string()))?;
    let gl_display = gl_config.display();

    let context_attrs = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
        .build(Some(window_handle.as_raw()));

    let gl_context = unsafe {
        gl_display
            .create_context(&gl_config, &context_attrs)
            .map_err(|e| EditorError::Gl(format!("failed to create OpenGL context: {e}")))?
    };

    let size = window.inner_size();
    let surface_attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
        window_handle.as_raw(),
        non_zero(size.width),
        non_zero(size.height),
    );

    let gl_surface = unsafe {
        gl_display
            .create_window_surface(&gl_config, &surface_attrs)
            .map_err(|e| EditorError::Gl(format!("failed to create surface: {e}")))?
    };

    let gl_context = gl_context
        .make_current(&gl_surface)
        .map_err(|e| EditorError::Gl(format!("failed to make context current: {e}")))?;

    let gl = Arc::new(unsafe {
        glow::Context::from_loader_function(|s| match CString::new(s) {
            Ok(s) => gl_display.get_proc_address(&s) as *const _,
            Err(_) => std::ptr::null(),
        })
    });

    let egui_glow = EguiGlow::new(event_loop, gl.clone(), None, None, false);
    egui_glow.egui_ctx.set_style(crate::ui::style::editor_style());

    tracing::info!(
        width = size.width,
        height = size.height,
        samples = gl_config.num_samples(),
        "window created"
    );

    Ok(WindowContext {
        window,
        gl_surface,
        gl_context,
        gl,
        egui_glow,
    })
}

/// Resize the GL surface to match the window size.
pub fn resize_surface(
    gl_surface: &glutin::surface::Surface<WindowSurface>,
    gl_context: &glutin::context::PossiblyCurrentContext,
    width: u32,
    height: u32,
) {
    if let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) {
        gl_surface.resize(gl_context, w, h);
    }
}

fn non_zero(value: u32) -> NonZeroU32 {
    NonZeroU32::new(value).unwrap_or(NonZeroU32::MIN)
}
