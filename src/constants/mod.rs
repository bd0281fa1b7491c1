//! Editor constants, one file per domain.
//!
//! Values here are the defaults; `EditorConfig` can override the window size,
//! grid geometry and zoom limits at startup.

mod camera;
mod grid;
mod media;
mod ui;

pub use camera::*;
pub use grid::*;
pub use media::*;
pub use ui::*;
