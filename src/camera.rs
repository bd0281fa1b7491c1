//! Pan/zoom viewport over the tile world.
//!
//! World and screen space both grow downward on y. A world point maps to the
//! screen with `(world - center) * scale + viewport / 2`. Screen coordinates
//! are relative to the canvas area, not the window.
//!
//! Timestamps passed to the drag handlers are in milliseconds on any
//! monotonic clock; only differences matter.

use crate::constants::*;
use crate::store::CameraState;
use crate::tile::Rect;
use glam::{Mat4, Vec2};
use std::collections::VecDeque;

/// Which aspects of the camera changed since the last `take_changes`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CameraChanges {
    pub moved: bool,
    pub zoomed: bool,
}

impl CameraChanges {
    pub fn any(&self) -> bool {
        self.moved || self.zoomed
    }
}

struct DragState {
    last: Vec2,
    /// (timestamp ms, screen position) of recent pointer moves
    samples: VecDeque<(f64, Vec2)>,
}

struct PinchState {
    midpoint: Vec2,
    distance: f32,
}

pub struct Camera {
    pub center: Vec2,
    pub scale: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    min_scale: f32,
    max_scale: f32,
    drag: Option<DragState>,
    pinch: Option<PinchState>,
    /// Inertial velocity in screen px per ms
    velocity: Vec2,
    changes: CameraChanges,
}

impl Camera {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self::with_limits(viewport_width, viewport_height, CAMERA_MIN_SCALE, CAMERA_MAX_SCALE)
    }

    pub fn with_limits(viewport_width: f32, viewport_height: f32, min_scale: f32, max_scale: f32) -> Self {
        let mut camera = Self {
            center: Vec2::new(CAMERA_INITIAL_X, CAMERA_INITIAL_Y),
            scale: CAMERA_INITIAL_SCALE,
            viewport_width,
            viewport_height,
            min_scale,
            max_scale,
            drag: None,
            pinch: None,
            velocity: Vec2::ZERO,
            changes: CameraChanges::default(),
        };
        camera.scale = camera.clamp_scale(camera.scale);
        camera
    }

    /// Keeps the world center fixed
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    fn half_viewport(&self) -> Vec2 {
        Vec2::new(self.viewport_width, self.viewport_height) * 0.5
    }

    fn clamp_scale(&self, scale: f32) -> f32 {
        scale.clamp(self.min_scale, self.max_scale)
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.half_viewport()) / self.scale + self.center
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.center) * self.scale + self.half_viewport()
    }

    pub fn state(&self) -> CameraState {
        CameraState {
            x: self.center.x,
            y: self.center.y,
            scale: self.scale,
        }
    }

    /// Return and clear pending change flags
    pub fn take_changes(&mut self) -> CameraChanges {
        std::mem::take(&mut self.changes)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some() || self.pinch.is_some()
    }

    pub fn move_center(&mut self, center: Vec2) {
        if self.center != center {
            self.center = center;
            self.changes.moved = true;
        }
    }

    /// Zoom about the current center
    pub fn set_zoom(&mut self, scale: f32) {
        let scale = self.clamp_scale(scale);
        if self.scale != scale {
            self.scale = scale;
            self.changes.zoomed = true;
        }
    }

    /// Back to the initial center and scale, dropping any motion
    pub fn reset(&mut self) {
        self.drag = None;
        self.pinch = None;
        self.velocity = Vec2::ZERO;
        self.move_center(Vec2::new(CAMERA_INITIAL_X, CAMERA_INITIAL_Y));
        self.set_zoom(CAMERA_INITIAL_SCALE);
    }

    // -------------------------------------------------------------------------
    // Drag with inertia
    // -------------------------------------------------------------------------

    pub fn drag_start(&mut self, screen: Vec2, time_ms: f64) {
        if self.pinch.is_some() {
            return;
        }
        self.velocity = Vec2::ZERO;
        let mut samples = VecDeque::new();
        samples.push_back((time_ms, screen));
        self.drag = Some(DragState { last: screen, samples });
    }

    pub fn drag_move(&mut self, screen: Vec2, time_ms: f64) {
        let scale = self.scale;
        let Some(drag) = self.drag.as_mut() else {
            return;
        };

        let delta = screen - drag.last;
        drag.last = screen;
        drag.samples.push_back((time_ms, screen));
        while drag.samples.len() > 1
            && drag.samples.front().is_some_and(|(t, _)| time_ms - t > CAMERA_VELOCITY_WINDOW_MS)
        {
            drag.samples.pop_front();
        }

        if delta != Vec2::ZERO {
            self.center -= delta / scale;
            self.changes.moved = true;
        }
    }

    /// Ends the drag and starts decelerating with the recent pointer velocity
    pub fn drag_end(&mut self, time_ms: f64) {
        let Some(drag) = self.drag.take() else {
            return;
        };

        let oldest = drag
            .samples
            .iter()
            .find(|(t, _)| time_ms - t <= CAMERA_VELOCITY_WINDOW_MS);

        self.velocity = match oldest {
            Some(&(t, pos)) if time_ms > t => {
                let v = (drag.last - pos) / (time_ms - t) as f32;
                if v.length() >= CAMERA_DECELERATE_MIN_SPEED {
                    v
                } else {
                    Vec2::ZERO
                }
            }
            _ => Vec2::ZERO,
        };
    }

    // -------------------------------------------------------------------------
    // Wheel and pinch zoom
    // -------------------------------------------------------------------------

    /// Zoom by `CAMERA_WHEEL_STEP^lines`, keeping the world point under the cursor fixed
    pub fn wheel(&mut self, lines: f32, screen: Vec2) {
        self.velocity = Vec2::ZERO;
        let factor = CAMERA_WHEEL_STEP.powf(lines);
        self.zoom_at(self.scale * factor, screen, screen);
    }

    pub fn pinch_start(&mut self, a: Vec2, b: Vec2) {
        self.drag = None;
        self.velocity = Vec2::ZERO;
        self.pinch = Some(PinchState {
            midpoint: (a + b) * 0.5,
            distance: a.distance(b),
        });
    }

    /// Scale by the finger distance ratio and follow the midpoint
    pub fn pinch_move(&mut self, a: Vec2, b: Vec2) {
        let Some(pinch) = self.pinch.as_ref() else {
            return;
        };
        let midpoint = (a + b) * 0.5;
        let distance = a.distance(b);

        let target_scale = if pinch.distance > 0.0 && distance > 0.0 {
            self.scale * distance / pinch.distance
        } else {
            self.scale
        };
        let anchor = pinch.midpoint;
        self.zoom_at(target_scale, anchor, midpoint);

        self.pinch = Some(PinchState { midpoint, distance });
    }

    pub fn pinch_end(&mut self) {
        self.pinch = None;
    }

    /// Set the scale so that the world point under `anchor` ends up under `target`
    fn zoom_at(&mut self, scale: f32, anchor: Vec2, target: Vec2) {
        let world = self.screen_to_world(anchor);
        let scale = self.clamp_scale(scale);
        if scale != self.scale {
            self.scale = scale;
            self.changes.zoomed = true;
        }
        let center = world - (target - self.half_viewport()) / self.scale;
        self.move_center(center);
    }

    // -------------------------------------------------------------------------
    // Per-frame update
    // -------------------------------------------------------------------------

    /// Advance inertial motion. Returns true if the camera moved.
    pub fn update(&mut self, dt_secs: f32) -> bool {
        if self.is_dragging() || self.velocity == Vec2::ZERO {
            return false;
        }

        let dt_ms = dt_secs * 1000.0;
        self.center -= self.velocity * dt_ms / self.scale;
        self.changes.moved = true;

        self.velocity *= CAMERA_DECELERATE_FRICTION.powf(dt_ms / CAMERA_DECELERATE_FRAME_MS);
        if self.velocity.length() < CAMERA_DECELERATE_MIN_SPEED {
            self.velocity = Vec2::ZERO;
        }
        true
    }

    // -------------------------------------------------------------------------
    // Rendering helpers
    // -------------------------------------------------------------------------

    /// World region covered by the viewport
    pub fn visible_rect(&self) -> Rect {
        let half = self.half_viewport() / self.scale;
        Rect {
            min: self.center - half,
            max: self.center + half,
        }
    }

    /// Orthographic projection with world y pointing down the screen
    pub fn projection_matrix(&self) -> Mat4 {
        let rect = self.visible_rect();
        Mat4::orthographic_rh(rect.min.x, rect.max.x, rect.max.y, rect.min.y, -1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    fn camera() -> Camera {
        Camera::new(800.0, 600.0)
    }

    #[test]
    fn test_origin_at_viewport_center() {
        let cam = camera();
        assert!(approx(cam.world_to_screen(Vec2::ZERO), Vec2::new(400.0, 300.0)));
        assert!(approx(cam.screen_to_world(Vec2::new(400.0, 300.0)), Vec2::ZERO));
    }

    #[test]
    fn test_screen_world_roundtrip_when_zoomed() {
        let mut cam = camera();
        cam.move_center(Vec2::new(120.0, -45.0));
        cam.set_zoom(2.5);
        let p = Vec2::new(13.0, 577.0);
        assert!(approx(cam.world_to_screen(cam.screen_to_world(p)), p));
    }

    #[test]
    fn test_drag_keeps_point_under_cursor() {
        let mut cam = camera();
        cam.set_zoom(2.0);
        let start = Vec2::new(100.0, 100.0);
        let grabbed = cam.screen_to_world(start);

        cam.drag_start(start, 0.0);
        cam.drag_move(Vec2::new(180.0, 60.0), 16.0);
        assert!(approx(cam.screen_to_world(Vec2::new(180.0, 60.0)), grabbed));
        assert!(cam.take_changes().moved);
    }

    #[test]
    fn test_release_starts_deceleration() {
        let mut cam = camera();
        cam.drag_start(Vec2::new(0.0, 0.0), 0.0);
        cam.drag_move(Vec2::new(50.0, 0.0), 20.0);
        cam.drag_move(Vec2::new(100.0, 0.0), 40.0);
        cam.drag_end(40.0);
        assert!(cam.velocity != Vec2::ZERO);

        let before = cam.center;
        assert!(cam.update(1.0 / 60.0));
        // Dragging right moves the world right, so the center keeps moving left
        assert!(cam.center.x < before.x);
    }

    #[test]
    fn test_deceleration_eventually_stops() {
        let mut cam = camera();
        cam.drag_start(Vec2::ZERO, 0.0);
        cam.drag_move(Vec2::new(30.0, 30.0), 10.0);
        cam.drag_end(10.0);
        for _ in 0..2000 {
            cam.update(1.0 / 60.0);
        }
        assert!(cam.velocity == Vec2::ZERO);
        assert!(!cam.update(1.0 / 60.0));
    }

    #[test]
    fn test_release_after_pause_has_no_inertia() {
        let mut cam = camera();
        cam.drag_start(Vec2::ZERO, 0.0);
        cam.drag_move(Vec2::new(100.0, 0.0), 10.0);
        // Pointer held still for longer than the sample window
        cam.drag_end(500.0);
        assert!(cam.velocity == Vec2::ZERO);
    }

    #[test]
    fn test_no_inertia_while_dragging() {
        let mut cam = camera();
        cam.drag_start(Vec2::ZERO, 0.0);
        cam.drag_move(Vec2::new(40.0, 0.0), 10.0);
        cam.drag_end(10.0);
        cam.drag_start(Vec2::new(40.0, 0.0), 20.0);
        assert!(cam.velocity == Vec2::ZERO);
        assert!(!cam.update(1.0 / 60.0));
    }

    #[test]
    fn test_wheel_zooms_about_cursor() {
        let mut cam = camera();
        let cursor = Vec2::new(650.0, 120.0);
        let under = cam.screen_to_world(cursor);
        cam.wheel(3.0, cursor);
        assert!((cam.scale - 1.1f32.powi(3)).abs() < 1e-4);
        assert!(approx(cam.screen_to_world(cursor), under));
        let changes = cam.take_changes();
        assert!(changes.zoomed && changes.moved);
    }

    #[test]
    fn test_zoom_clamped() {
        let mut cam = camera();
        cam.wheel(1000.0, Vec2::new(400.0, 300.0));
        assert_eq!(cam.scale, CAMERA_MAX_SCALE);
        cam.wheel(-1000.0, Vec2::new(400.0, 300.0));
        assert_eq!(cam.scale, CAMERA_MIN_SCALE);
        cam.set_zoom(0.0);
        assert_eq!(cam.scale, CAMERA_MIN_SCALE);
    }

    #[test]
    fn test_pinch_scales_by_distance_ratio() {
        let mut cam = camera();
        cam.pinch_start(Vec2::new(300.0, 300.0), Vec2::new(500.0, 300.0));
        let anchor_world = cam.screen_to_world(Vec2::new(400.0, 300.0));
        cam.pinch_move(Vec2::new(250.0, 300.0), Vec2::new(550.0, 300.0));
        assert!((cam.scale - 1.5).abs() < 1e-4);
        assert!(approx(cam.screen_to_world(Vec2::new(400.0, 300.0)), anchor_world));
    }

    #[test]
    fn test_pinch_follows_midpoint() {
        let mut cam = camera();
        cam.pinch_start(Vec2::new(100.0, 100.0), Vec2::new(200.0, 100.0));
        let anchor_world = cam.screen_to_world(Vec2::new(150.0, 100.0));
        cam.pinch_move(Vec2::new(150.0, 200.0), Vec2::new(250.0, 200.0));
        assert!((cam.scale - 1.0).abs() < 1e-5);
        assert!(approx(cam.screen_to_world(Vec2::new(200.0, 200.0)), anchor_world));
        cam.pinch_end();
        assert!(!cam.is_dragging());
    }

    #[test]
    fn test_pinch_cancels_drag() {
        let mut cam = camera();
        cam.drag_start(Vec2::ZERO, 0.0);
        cam.pinch_start(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0));
        cam.drag_move(Vec2::new(100.0, 0.0), 5.0);
        assert_eq!(cam.center, Vec2::ZERO);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut cam = camera();
        cam.drag_start(Vec2::ZERO, 0.0);
        cam.drag_move(Vec2::new(60.0, 10.0), 10.0);
        cam.drag_end(10.0);
        cam.set_zoom(3.0);
        cam.take_changes();

        cam.reset();
        assert_eq!(cam.state(), CameraState::INITIAL);
        assert!(cam.velocity == Vec2::ZERO);
        assert!(cam.take_changes().any());
    }

    #[test]
    fn test_reset_at_initial_state_reports_nothing() {
        let mut cam = camera();
        cam.reset();
        assert!(!cam.take_changes().any());
    }

    #[test]
    fn test_resize_keeps_center() {
        let mut cam = camera();
        cam.move_center(Vec2::new(30.0, 40.0));
        cam.resize(1024.0, 768.0);
        assert!(approx(cam.screen_to_world(Vec2::new(512.0, 384.0)), Vec2::new(30.0, 40.0)));
    }

    #[test]
    fn test_projection_is_y_down() {
        let mut cam = camera();
        cam.move_center(Vec2::new(10.0, 20.0));
        let proj = cam.projection_matrix();
        let top_left = cam.screen_to_world(Vec2::ZERO);
        let ndc = proj * Vec4::new(top_left.x, top_left.y, 0.0, 1.0);
        assert!((ndc.x + 1.0).abs() < 1e-4);
        assert!((ndc.y - 1.0).abs() < 1e-4);
        let center = proj * Vec4::new(10.0, 20.0, 0.0, 1.0);
        assert!(center.x.abs() < 1e-4 && center.y.abs() < 1e-4);
    }

    #[test]
    fn test_visible_rect() {
        let mut cam = camera();
        cam.set_zoom(2.0);
        let rect = cam.visible_rect();
        assert!(approx(rect.min, Vec2::new(-200.0, -150.0)));
        assert!(approx(rect.max, Vec2::new(200.0, 150.0)));
    }
}
