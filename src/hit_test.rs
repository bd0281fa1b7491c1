//! Pointer hit testing and hover tracking for tiles.

use crate::constants::TILE_CORNER_RADIUS;
use crate::tile::{Tile, TileId};
use glam::Vec2;

/// Topmost tile whose rounded bounds contain `world`.
///
/// Tiles are drawn in slice order, so later tiles win.
pub fn tile_at(tiles: &[Tile], origin: Vec2, world: Vec2) -> Option<&Tile> {
    tiles
        .iter()
        .rev()
        .find(|tile| tile.world_rect(origin).contains_rounded(world, TILE_CORNER_RADIUS))
}

/// Result of moving the pointer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HoverChange {
    pub left: Option<TileId>,
    pub entered: Option<TileId>,
}

impl HoverChange {
    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.entered.is_none()
    }
}

/// Remembers which tile is under the pointer
#[derive(Debug, Default)]
pub struct HoverTracker {
    hovered: Option<TileId>,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_hovered(&self, id: &TileId) -> bool {
        self.hovered.as_ref() == Some(id)
    }

    /// Record the tile now under the pointer (None when over empty canvas or off-canvas)
    pub fn update(&mut self, under_pointer: Option<&TileId>) -> HoverChange {
        if self.hovered.as_ref() == under_pointer {
            return HoverChange::default();
        }
        let left = self.hovered.take();
        self.hovered = under_pointer.cloned();
        HoverChange {
            left,
            entered: self.hovered.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridLayout;
    use crate::tile::TileType;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn layout_and_tiles() -> (Vec2, Vec<Tile>) {
        let layout = GridLayout::default();
        let tiles = layout.generate_tiles(&mut StdRng::seed_from_u64(9));
        (layout.origin(), tiles)
    }

    #[test]
    fn test_hit_first_tile() {
        let (origin, tiles) = layout_and_tiles();
        // Grid origin is (-340, -270); first tile spans 120 units from there
        let hit = tile_at(&tiles, origin, Vec2::new(-280.0, -210.0)).unwrap();
        assert_eq!(hit.id.as_str(), "tile-0");
    }

    #[test]
    fn test_gap_is_empty() {
        let (origin, tiles) = layout_and_tiles();
        // Between column 0 (ends at -220) and column 1 (starts at -200)
        assert!(tile_at(&tiles, origin, Vec2::new(-210.0, -210.0)).is_none());
    }

    #[test]
    fn test_outside_grid_is_empty() {
        let (origin, tiles) = layout_and_tiles();
        assert!(tile_at(&tiles, origin, Vec2::new(1000.0, 1000.0)).is_none());
    }

    #[test]
    fn test_rounded_corner_misses() {
        let (origin, tiles) = layout_and_tiles();
        assert!(tile_at(&tiles, origin, origin + Vec2::new(0.5, 0.5)).is_none());
        assert!(tile_at(&tiles, origin, origin + Vec2::new(8.0, 8.0)).is_some());
    }

    #[test]
    fn test_last_tile_wins_on_overlap() {
        let (origin, mut tiles) = layout_and_tiles();
        let mut top = tiles[0].clone();
        top.id = TileId::from_index(100);
        top.tile_type = TileType::Color;
        tiles.push(top);
        let hit = tile_at(&tiles, origin, Vec2::new(-280.0, -210.0)).unwrap();
        assert_eq!(hit.id.as_str(), "tile-100");
    }

    #[test]
    fn test_hover_enter_move_leave() {
        let mut hover = HoverTracker::new();
        let a = TileId::from_index(1);
        let b = TileId::from_index(2);

        let change = hover.update(Some(&a));
        assert_eq!(change, HoverChange { left: None, entered: Some(a.clone()) });
        assert!(hover.update(Some(&a)).is_empty());

        let change = hover.update(Some(&b));
        assert_eq!(change, HoverChange { left: Some(a.clone()), entered: Some(b.clone()) });
        assert!(hover.is_hovered(&b));

        let change = hover.update(None);
        assert_eq!(change, HoverChange { left: Some(b.clone()), entered: None });
        assert!(!hover.is_hovered(&b));
    }
}
