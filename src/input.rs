//! Input handling for the canvas.
//!
//! Turns raw mouse, touch and keyboard events into camera gestures and
//! tile clicks. Positions are canvas-relative physical pixels.

use crate::camera::Camera;
use crate::constants::{CAMERA_WHEEL_PIXELS_PER_LINE, CLICK_DRAG_THRESHOLD};
use glam::Vec2;
use std::collections::{BTreeMap, HashSet};
use winit::event::MouseScrollDelta;
use winit::keyboard::KeyCode;

/// A primary pointer that went down on the canvas
struct Press {
    start: Vec2,
    /// Moved past the click threshold
    dragged: bool,
}

/// Input state tracking
#[derive(Default)]
pub struct InputState {
    pub keys_pressed: HashSet<KeyCode>,
    pub mouse_pos: Option<Vec2>,
    press: Option<Press>,
    touches: BTreeMap<u64, Vec2>,
    pinching: bool,
}

/// Result of processing keyboard input
#[derive(Debug, Default, PartialEq, Eq)]
pub struct KeyActions {
    pub clear_selection: bool,
    pub toggle_fullscreen: bool,
    pub reset_camera: bool,
}

/// Process keyboard input and return actions to take
pub fn process_keyboard(input: &mut InputState) -> KeyActions {
    KeyActions {
        clear_selection: input.keys_pressed.remove(&KeyCode::Escape),
        toggle_fullscreen: input.keys_pressed.remove(&KeyCode::F11),
        reset_camera: input.keys_pressed.remove(&KeyCode::Home),
    }
}

/// Wheel delta in lines; pixel deltas (touchpads) are scaled down
pub fn scroll_lines(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / CAMERA_WHEEL_PIXELS_PER_LINE,
    }
}

/// Window position to canvas position; None over the toolbar
pub fn canvas_point(window: Vec2, toolbar_px: f32) -> Option<Vec2> {
    let p = Vec2::new(window.x, window.y - toolbar_px);
    (p.y >= 0.0).then_some(p)
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A pointer is down (mouse button or touch)
    pub fn is_pressed(&self) -> bool {
        self.press.is_some() || !self.touches.is_empty()
    }

    // -------------------------------------------------------------------------
    // Mouse
    // -------------------------------------------------------------------------

    pub fn mouse_down(&mut self, camera: &mut Camera, pos: Vec2, time_ms: f64) {
        self.mouse_pos = Some(pos);
        self.press = Some(Press {
            start: pos,
            dragged: false,
        });
        camera.drag_start(pos, time_ms);
    }

    pub fn mouse_move(&mut self, camera: &mut Camera, pos: Option<Vec2>, time_ms: f64) {
        self.mouse_pos = pos;
        let Some(pos) = pos else {
            return;
        };
        if let Some(press) = self.press.as_mut() {
            if press.start.distance(pos) > CLICK_DRAG_THRESHOLD {
                press.dragged = true;
            }
            camera.drag_move(pos, time_ms);
        }
    }

    /// Release the mouse. Returns the click position if the press never became a drag.
    pub fn mouse_up(&mut self, camera: &mut Camera, time_ms: f64) -> Option<Vec2> {
        let press = self.press.take()?;
        camera.drag_end(time_ms);
        (!press.dragged).then_some(press.start)
    }

    /// Cursor left the window; ends any drag without a click
    pub fn mouse_left(&mut self, camera: &mut Camera, time_ms: f64) {
        self.mouse_pos = None;
        if self.press.take().is_some() {
            camera.drag_end(time_ms);
        }
    }

    // -------------------------------------------------------------------------
    // Touch
    // -------------------------------------------------------------------------

    pub fn touch_start(&mut self, camera: &mut Camera, id: u64, pos: Vec2, time_ms: f64) {
        self.touches.insert(id, pos);
        match self.touches.len() {
            1 => {
                self.press = Some(Press {
                    start: pos,
                    dragged: false,
                });
                camera.drag_start(pos, time_ms);
            }
            _ => {
                // A second finger turns the gesture into a pinch; no click afterwards
                self.press = None;
                self.pinching = true;
                self.restart_pinch(camera);
            }
        }
    }

    pub fn touch_move(&mut self, camera: &mut Camera, id: u64, pos: Vec2, time_ms: f64) {
        let Some(slot) = self.touches.get_mut(&id) else {
            return;
        };
        *slot = pos;

        if self.pinching {
            if let Some((a, b)) = self.first_two() {
                camera.pinch_move(a, b);
            }
        } else if let Some(press) = self.press.as_mut() {
            if press.start.distance(pos) > CLICK_DRAG_THRESHOLD {
                press.dragged = true;
            }
            camera.drag_move(pos, time_ms);
        }
    }

    /// Lift a finger. Returns the tap position for a single-finger tap.
    pub fn touch_end(&mut self, camera: &mut Camera, id: u64, time_ms: f64) -> Option<Vec2> {
        self.touches.remove(&id)?;

        if self.pinching {
            if self.touches.len() < 2 {
                camera.pinch_end();
                self.pinching = false;
                // Remaining finger keeps panning
                if let Some(&rest) = self.touches.values().next() {
                    self.press = Some(Press {
                        start: rest,
                        dragged: true,
                    });
                    camera.drag_start(rest, time_ms);
                }
            } else {
                // The tracked pair may have changed
                self.restart_pinch(camera);
            }
            return None;
        }

        if self.touches.is_empty() {
            return self.mouse_up(camera, time_ms);
        }
        None
    }

    /// Measure further pinch motion from the current finger pair
    fn restart_pinch(&self, camera: &mut Camera) {
        if let Some((a, b)) = self.first_two() {
            camera.pinch_start(a, b);
        }
    }

    fn first_two(&self) -> Option<(Vec2, Vec2)> {
        let mut it = self.touches.values();
        Some((*it.next()?, *it.next()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    fn camera() -> Camera {
        Camera::new(800.0, 600.0)
    }

    #[test]
    fn test_small_motion_is_click() {
        let mut cam = camera();
        let mut input = InputState::new();
        input.mouse_down(&mut cam, Vec2::new(100.0, 100.0), 0.0);
        input.mouse_move(&mut cam, Some(Vec2::new(103.0, 102.0)), 10.0);
        let click = input.mouse_up(&mut cam, 20.0);
        assert_eq!(click, Some(Vec2::new(100.0, 100.0)));
        assert!(!input.is_pressed());
    }

    #[test]
    fn test_drag_is_not_click_and_pans() {
        let mut cam = camera();
        let mut input = InputState::new();
        input.mouse_down(&mut cam, Vec2::new(100.0, 100.0), 0.0);
        input.mouse_move(&mut cam, Some(Vec2::new(150.0, 100.0)), 16.0);
        assert_eq!(cam.center, Vec2::new(-50.0, 0.0));
        assert_eq!(input.mouse_up(&mut cam, 32.0), None);
    }

    #[test]
    fn test_leaving_window_cancels_click() {
        let mut cam = camera();
        let mut input = InputState::new();
        input.mouse_down(&mut cam, Vec2::new(10.0, 10.0), 0.0);
        input.mouse_left(&mut cam, 5.0);
        assert!(!cam.is_dragging());
        assert_eq!(input.mouse_up(&mut cam, 10.0), None);
    }

    #[test]
    fn test_single_tap() {
        let mut cam = camera();
        let mut input = InputState::new();
        input.touch_start(&mut cam, 1, Vec2::new(200.0, 200.0), 0.0);
        assert_eq!(input.touch_end(&mut cam, 1, 50.0), Some(Vec2::new(200.0, 200.0)));
    }

    #[test]
    fn test_pinch_zooms_and_suppresses_tap() {
        let mut cam = camera();
        let mut input = InputState::new();
        input.touch_start(&mut cam, 1, Vec2::new(350.0, 300.0), 0.0);
        input.touch_start(&mut cam, 2, Vec2::new(450.0, 300.0), 5.0);
        input.touch_move(&mut cam, 2, Vec2::new(550.0, 300.0), 20.0);
        input.touch_move(&mut cam, 1, Vec2::new(250.0, 300.0), 25.0);
        assert!(cam.scale > 1.0);

        assert_eq!(input.touch_end(&mut cam, 2, 40.0), None);
        // Remaining finger pans, and its release is not a tap
        assert!(cam.is_dragging());
        assert_eq!(input.touch_end(&mut cam, 1, 50.0), None);
        assert!(!input.is_pressed());
    }

    #[test]
    fn test_lifting_pinch_finger_with_third_down_keeps_zoom_steady() {
        let mut cam = camera();
        let mut input = InputState::new();
        input.touch_start(&mut cam, 1, Vec2::new(390.0, 300.0), 0.0);
        input.touch_start(&mut cam, 2, Vec2::new(410.0, 300.0), 5.0);
        input.touch_start(&mut cam, 3, Vec2::new(790.0, 590.0), 10.0);
        assert_eq!(cam.scale, 1.0);

        assert_eq!(input.touch_end(&mut cam, 1, 20.0), None);
        input.touch_move(&mut cam, 2, Vec2::new(411.0, 300.0), 30.0);
        assert!((cam.scale - 1.0).abs() < 0.01, "scale jumped to {}", cam.scale);
        assert!(cam.center.length() < 2.0, "center jumped to {:?}", cam.center);
    }

    #[test]
    fn test_third_finger_does_not_jump_pinch() {
        let mut cam = camera();
        let mut input = InputState::new();
        input.touch_start(&mut cam, 5, Vec2::new(300.0, 300.0), 0.0);
        input.touch_start(&mut cam, 7, Vec2::new(500.0, 300.0), 5.0);
        // Lower id sorts first, so the tracked pair becomes (2, 5)
        input.touch_start(&mut cam, 2, Vec2::new(100.0, 100.0), 10.0);
        input.touch_move(&mut cam, 5, Vec2::new(300.0, 300.0), 20.0);
        assert!((cam.scale - 1.0).abs() < 1e-4);
        assert!(cam.center.length() < 1e-3);
    }

    #[test]
    fn test_keyboard_actions_consume_keys() {
        let mut input = InputState::new();
        input.keys_pressed.insert(KeyCode::Escape);
        input.keys_pressed.insert(KeyCode::Home);
        let actions = process_keyboard(&mut input);
        assert_eq!(
            actions,
            KeyActions {
                clear_selection: true,
                toggle_fullscreen: false,
                reset_camera: true,
            }
        );
        assert_eq!(process_keyboard(&mut input), KeyActions::default());
    }

    #[test]
    fn test_scroll_lines() {
        assert_eq!(scroll_lines(MouseScrollDelta::LineDelta(0.0, 2.0)), 2.0);
        assert_eq!(
            scroll_lines(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -100.0))),
            -2.0
        );
    }

    #[test]
    fn test_canvas_point_excludes_toolbar() {
        assert_eq!(canvas_point(Vec2::new(10.0, 30.0), 64.0), None);
        assert_eq!(canvas_point(Vec2::new(10.0, 80.0), 64.0), Some(Vec2::new(10.0, 16.0)));
    }
}
