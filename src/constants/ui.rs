//! UI and window constants.

/// Default window width
pub const WINDOW_DEFAULT_WIDTH: u32 = 1280;
/// Default window height
pub const WINDOW_DEFAULT_HEIGHT: u32 = 720;
/// Window title
pub const WINDOW_TITLE: &str = "Canvas Editor";

/// Canvas clear color
pub const CANVAS_BACKGROUND: u32 = 0x0f1117;

/// Toolbar height in points
pub const TOOLBAR_HEIGHT: f32 = 64.0;

/// Click drag threshold (pixels) to distinguish click from drag
pub const CLICK_DRAG_THRESHOLD: f32 = 5.0;
