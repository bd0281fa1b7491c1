//! World-space text and icons drawn over the canvas with egui.
//!
//! Tile labels and play triangles zoom with the camera. The painter is
//! clipped to the canvas so nothing bleeds under the toolbar.

use crate::camera::Camera;
use crate::constants::{OVERLAY_COLOR, TOOLBAR_HEIGHT};
use crate::render::scene::TileVisual;
use crate::tile::hex_to_color32;
use glam::Vec2;

/// Labels smaller than this (in points) are skipped
const MIN_LABEL_POINTS: f32 = 3.0;

/// Maps canvas physical pixels to egui points below the toolbar
#[derive(Debug, Clone, Copy)]
pub struct CanvasTransform {
    pub pixels_per_point: f32,
}

impl CanvasTransform {
    pub fn to_egui(&self, camera: &Camera, world: Vec2) -> egui::Pos2 {
        let px = camera.world_to_screen(world);
        egui::pos2(px.x / self.pixels_per_point, px.y / self.pixels_per_point + TOOLBAR_HEIGHT)
    }

    /// World length to points
    pub fn scale(&self, camera: &Camera, length: f32) -> f32 {
        length * camera.scale / self.pixels_per_point
    }
}

pub fn draw_tile_overlay(ctx: &egui::Context, visuals: &[TileVisual], camera: &Camera) {
    puffin::profile_function!();

    let transform = CanvasTransform {
        pixels_per_point: ctx.pixels_per_point(),
    };
    let screen = ctx.screen_rect();
    let canvas = egui::Rect::from_min_max(egui::pos2(screen.min.x, screen.min.y + TOOLBAR_HEIGHT), screen.max);

    let painter = ctx
        .layer_painter(egui::LayerId::new(egui::Order::Background, egui::Id::new("tile_overlay")))
        .with_clip_rect(canvas);

    let visible = camera.visible_rect();
    for visual in visuals.iter().filter(|v| v.bounds.intersects(&visible)) {
        if let Some(icon) = &visual.play_icon {
            let points = icon.points.iter().map(|&p| transform.to_egui(camera, p)).collect();
            painter.add(egui::Shape::convex_polygon(
                points,
                hex_to_color32(OVERLAY_COLOR, icon.alpha),
                egui::Stroke::NONE,
            ));
        }

        let size = transform.scale(camera, visual.label.size);
        if size < MIN_LABEL_POINTS {
            continue;
        }
        painter.text(
            transform.to_egui(camera, visual.label.position),
            egui::Align2::CENTER_CENTER,
            &visual.label.text,
            egui::FontId::proportional(size),
            hex_to_color32(OVERLAY_COLOR, 1.0),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_origin_maps_to_canvas_center() {
        let camera = Camera::new(800.0, 600.0);
        let transform = CanvasTransform { pixels_per_point: 2.0 };
        assert_eq!(transform.to_egui(&camera, Vec2::ZERO), egui::pos2(200.0, 150.0 + TOOLBAR_HEIGHT));
    }

    #[test]
    fn test_label_scales_with_zoom() {
        let mut camera = Camera::new(800.0, 600.0);
        camera.set_zoom(2.0);
        let transform = CanvasTransform { pixels_per_point: 1.0 };
        assert_eq!(transform.scale(&camera, 14.0), 28.0);
    }
}
