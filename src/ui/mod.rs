//! egui layer: toolbar widgets and the tile text overlay.

mod overlay;
pub mod style;
mod toolbar;

pub use overlay::draw_tile_overlay;
pub use toolbar::draw_toolbar;

use crate::store::DetailLevel;

/// Actions the UI wants to perform (returned to the shell)
#[derive(Debug, Default, PartialEq, Eq)]
pub struct UiActions {
    pub reset_view: bool,
    pub detail_level: Option<DetailLevel>,
}
