//! Rendering context - owns the camera and GL resources, separate from UI state.

pub mod scene;

use crate::camera::Camera;
use crate::constants::CANVAS_BACKGROUND;
use crate::error::Result;
use crate::hit_test::HoverTracker;
use crate::media::MediaManager;
use crate::renderer::{Renderer, SpriteDraw};
use crate::store::Store;
use crate::tile::{hex_to_rgba, TileId};
use glam::Vec2;
use scene::{tile_visual, TileStatus, TileVisual};

use std::sync::Arc;

/// Rendering resources - lives in the application shell (main.rs).
pub struct RenderContext {
    pub camera: Camera,
    pub renderer: Renderer,
}

impl RenderContext {
    pub fn new(
        gl: Arc<glow::Context>,
        viewport_width: f32,
        viewport_height: f32,
        min_scale: f32,
        max_scale: f32,
    ) -> Result<Self> {
        let camera = Camera::with_limits(viewport_width, viewport_height, min_scale, max_scale);
        let renderer = Renderer::new(gl)?;
        Ok(Self { camera, renderer })
    }

    /// Render the tile canvas. `canvas_px` is the canvas size in physical pixels,
    /// anchored at the bottom-left of the window.
    pub fn render_frame(
        &mut self,
        gl: &glow::Context,
        visuals: &[TileVisual],
        media: &MediaManager,
        canvas_px: (i32, i32),
    ) {
        puffin::profile_function!();

        self.renderer.begin_frame();
        unsafe {
            use glow::HasContext;
            let bg = hex_to_rgba(CANVAS_BACKGROUND, 1.0);
            gl.viewport(0, 0, canvas_px.0, canvas_px.1);
            gl.clear_color(bg.x, bg.y, bg.z, bg.w);
            gl.clear(glow::COLOR_BUFFER_BIT);
        }

        let visible = self.camera.visible_rect();
        let on_screen: Vec<&TileVisual> = visuals.iter().filter(|v| v.bounds.intersects(&visible)).collect();

        {
            puffin::profile_scope!("render_fills");
            let fills: Vec<_> = on_screen.iter().flat_map(|v| v.fills.iter().copied()).collect();
            self.renderer.render_rects(&self.camera, &fills);
        }
        {
            puffin::profile_scope!("render_sprites");
            let sprites: Vec<SpriteDraw> = on_screen
                .iter()
                .filter_map(|v| {
                    let rect = v.sprite?;
                    let texture = media.sprite(&v.id)?;
                    Some(SpriteDraw {
                        rect,
                        texture: texture.texture,
                    })
                })
                .collect();
            self.renderer.render_sprites(&self.camera, &sprites);
        }
        {
            puffin::profile_scope!("render_borders");
            let borders: Vec<_> = on_screen.iter().map(|v| v.border).collect();
            self.renderer.render_rects(&self.camera, &borders);
        }
    }
}

/// Per-tile media state the scene reads
pub trait TileMedia {
    fn bar_heights(&self, id: &TileId) -> Option<&[f32]>;
    fn is_playing(&self, id: &TileId) -> bool;
}

impl TileMedia for MediaManager {
    fn bar_heights(&self, id: &TileId) -> Option<&[f32]> {
        MediaManager::bar_heights(self, id)
    }

    fn is_playing(&self, id: &TileId) -> bool {
        MediaManager::is_playing(self, id)
    }
}

/// Build the visual of every tile from current store, hover and media state
pub fn build_visuals(store: &Store, origin: Vec2, hover: &HoverTracker, media: &impl TileMedia) -> Vec<TileVisual> {
    puffin::profile_function!();
    store
        .tiles()
        .iter()
        .map(|tile| {
            let status = TileStatus {
                selected: store.is_selected(&tile.id),
                hovered: hover.is_hovered(&tile.id),
                bar_heights: media.bar_heights(&tile.id),
                playing: media.is_playing(&tile.id),
            };
            tile_visual(tile, origin, status)
        })
        .collect()
}
