//! UI state container shared by the toolbar and the canvas.
//!
//! Setters record what changed as `StoreEvent`s so the application shell
//! can push the change to whichever layer did not originate it.

use crate::constants::*;
use crate::tile::{Tile, TileId};

/// Cosmetic quality preference shown in the toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl DetailLevel {
    pub const ALL: [DetailLevel; 3] = [DetailLevel::Low, DetailLevel::Medium, DetailLevel::High];

    pub fn name(&self) -> &'static str {
        match self {
            DetailLevel::Low => "Low",
            DetailLevel::Medium => "Medium",
            DetailLevel::High => "High",
        }
    }
}

/// Camera snapshot: world center and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

impl CameraState {
    pub const INITIAL: CameraState = CameraState {
        x: CAMERA_INITIAL_X,
        y: CAMERA_INITIAL_Y,
        scale: CAMERA_INITIAL_SCALE,
    };
}

impl Default for CameraState {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// What changed in the store
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    SelectionChanged {
        previous: Option<TileId>,
        current: Option<TileId>,
    },
    DetailLevelChanged(DetailLevel),
    TilesChanged,
    CameraChanged(CameraState),
    /// The camera should jump back to its initial state
    CameraResetRequested,
}

#[derive(Debug, Default)]
pub struct Store {
    selected_tile_id: Option<TileId>,
    detail_level: DetailLevel,
    tiles: Vec<Tile>,
    camera_state: CameraState,
    events: Vec<StoreEvent>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_tile_id(&self) -> Option<&TileId> {
        self.selected_tile_id.as_ref()
    }

    pub fn detail_level(&self) -> DetailLevel {
        self.detail_level
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn camera_state(&self) -> CameraState {
        self.camera_state
    }

    pub fn is_selected(&self, id: &TileId) -> bool {
        self.selected_tile_id.as_ref() == Some(id)
    }

    pub fn set_selected_tile_id(&mut self, id: Option<TileId>) {
        if self.selected_tile_id == id {
            return;
        }
        let previous = std::mem::replace(&mut self.selected_tile_id, id.clone());
        self.events.push(StoreEvent::SelectionChanged {
            previous,
            current: id,
        });
    }

    pub fn set_detail_level(&mut self, level: DetailLevel) {
        if self.detail_level == level {
            return;
        }
        tracing::info!("Detail level changed to: {}", level.name());
        self.detail_level = level;
        self.events.push(StoreEvent::DetailLevelChanged(level));
    }

    pub fn set_tiles(&mut self, tiles: Vec<Tile>) {
        // A stale selection would otherwise point at nothing
        if let Some(selected) = &self.selected_tile_id {
            if !tiles.iter().any(|t| &t.id == selected) {
                self.set_selected_tile_id(None);
            }
        }
        self.tiles = tiles;
        self.events.push(StoreEvent::TilesChanged);
    }

    pub fn set_camera_state(&mut self, state: CameraState) {
        if self.camera_state == state {
            return;
        }
        self.camera_state = state;
        self.events.push(StoreEvent::CameraChanged(state));
    }

    pub fn reset_camera(&mut self) {
        tracing::info!("Resetting camera to default position");
        self.camera_state = CameraState::INITIAL;
        self.events.push(StoreEvent::CameraResetRequested);
    }

    /// Drain all pending change notifications
    pub fn drain_events(&mut self) -> impl Iterator<Item = StoreEvent> + '_ {
        self.events.drain(..)
    }
}
