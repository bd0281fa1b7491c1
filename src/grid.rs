//! Grid layout and tile generation.

use crate::constants::*;
use crate::tile::{Tile, TileId, TileType};
use glam::Vec2;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

/// How many tiles of each type are laid out, in fill order.
/// The last entry absorbs any cells left over on larger grids.
pub const MEDIA_DISTRIBUTION: [(TileType, usize); 4] = [
    (TileType::Video, 4),
    (TileType::Image, 6),
    (TileType::Audio, 3),
    (TileType::Color, 7),
];

/// Grid geometry
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridLayout {
    pub cols: u32,
    pub rows: u32,
    pub tile_size: f32,
    pub gap: f32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            cols: GRID_COLS,
            rows: GRID_ROWS,
            tile_size: TILE_SIZE,
            gap: TILE_GAP,
        }
    }
}

impl GridLayout {
    /// Distance between the top-left corners of neighbouring tiles
    pub fn pitch(&self) -> f32 {
        self.tile_size + self.gap
    }

    /// Total extent of the grid (no trailing gap)
    pub fn size(&self) -> Vec2 {
        Vec2::new(
            self.cols as f32 * self.pitch() - self.gap,
            self.rows as f32 * self.pitch() - self.gap,
        )
    }

    /// Offset of the grid container so the grid is centered on the world origin
    pub fn origin(&self) -> Vec2 {
        -self.size() * 0.5
    }

    /// Build the tile set, row-major
    pub fn generate_tiles<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Tile> {
        let count = self.cols as usize * self.rows as usize;
        let mut tiles = Vec::with_capacity(count);
        let mut types = TypeSequence::new();

        for row in 0..self.rows {
            for col in 0..self.cols {
                let id = tiles.len();
                let tile_type = types.next_type();

                tiles.push(Tile {
                    id: TileId::from_index(id),
                    x: col as f32 * self.pitch(),
                    y: row as f32 * self.pitch(),
                    width: self.tile_size,
                    height: self.tile_size,
                    color: random_color(rng),
                    label: format!("{} {}", tile_type.name(), id + 1),
                    tile_type,
                    media_url: media_url_for(tile_type, id),
                });
            }
        }

        tiles
    }
}

/// Walks `MEDIA_DISTRIBUTION`, handing out one type per cell
struct TypeSequence {
    index: usize,
    used: usize,
}

impl TypeSequence {
    fn new() -> Self {
        Self { index: 0, used: 0 }
    }

    fn next_type(&mut self) -> TileType {
        let (tile_type, count) = MEDIA_DISTRIBUTION[self.index];
        self.used += 1;
        if self.used >= count && self.index < MEDIA_DISTRIBUTION.len() - 1 {
            self.index += 1;
            self.used = 0;
        }
        tile_type
    }
}

fn random_color<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    *TILE_PALETTE.choose(rng).unwrap_or(&TILE_PALETTE[0])
}

fn media_url_for(tile_type: TileType, id: usize) -> Option<String> {
    match tile_type {
        TileType::Video => Some(VIDEO_URLS[id % VIDEO_URLS.len()].to_string()),
        TileType::Image => Some(IMAGE_URLS[id % IMAGE_URLS.len()].to_string()),
        TileType::Audio => Some(AUDIO_URLS[0].to_string()),
        TileType::Color => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tiles() -> Vec<Tile> {
        GridLayout::default().generate_tiles(&mut StdRng::seed_from_u64(1))
    }

    #[test]
    fn test_default_grid_has_twenty_tiles() {
        let tiles = tiles();
        assert_eq!(tiles.len(), 20);
        assert_eq!(tiles[0].id.as_str(), "tile-0");
        assert_eq!(tiles[19].id.as_str(), "tile-19");
    }

    #[test]
    fn test_distribution_order() {
        let types: Vec<TileType> = tiles().iter().map(|t| t.tile_type).collect();
        assert!(types[0..4].iter().all(|t| *t == TileType::Video));
        assert!(types[4..10].iter().all(|t| *t == TileType::Image));
        assert!(types[10..13].iter().all(|t| *t == TileType::Audio));
        assert!(types[13..20].iter().all(|t| *t == TileType::Color));
    }

    #[test]
    fn test_last_type_absorbs_extra_cells() {
        let layout = GridLayout {
            cols: 6,
            rows: 5,
            ..GridLayout::default()
        };
        let tiles = layout.generate_tiles(&mut StdRng::seed_from_u64(1));
        assert_eq!(tiles.len(), 30);
        assert!(tiles[13..].iter().all(|t| t.tile_type == TileType::Color));
    }

    #[test]
    fn test_labels_and_urls() {
        let tiles = tiles();
        assert_eq!(tiles[0].label, "Video 1");
        assert_eq!(tiles[4].label, "Image 5");
        assert_eq!(tiles[10].label, "Audio 11");
        assert_eq!(tiles[19].label, "Color 20");

        assert_eq!(tiles[3].media_url.as_deref(), Some(VIDEO_URLS[0]));
        assert_eq!(tiles[4].media_url.as_deref(), Some(IMAGE_URLS[4]));
        assert_eq!(tiles[6].media_url.as_deref(), Some(IMAGE_URLS[0]));
        assert_eq!(tiles[12].media_url.as_deref(), Some(AUDIO_URLS[0]));
        assert_eq!(tiles[13].media_url, None);
    }

    #[test]
    fn test_positions_follow_pitch() {
        let tiles = tiles();
        assert_eq!((tiles[0].x, tiles[0].y), (0.0, 0.0));
        assert_eq!((tiles[1].x, tiles[1].y), (140.0, 0.0));
        assert_eq!((tiles[5].x, tiles[5].y), (0.0, 140.0));
        assert!(tiles.iter().all(|t| t.width == TILE_SIZE && t.height == TILE_SIZE));
    }

    #[test]
    fn test_origin_centers_grid() {
        let layout = GridLayout::default();
        assert_eq!(layout.size(), Vec2::new(680.0, 540.0));
        assert_eq!(layout.origin(), Vec2::new(-340.0, -270.0));
    }

    #[test]
    fn test_colors_from_palette_and_seeded() {
        let a = tiles();
        let b = tiles();
        assert!(a.iter().all(|t| TILE_PALETTE.contains(&t.color)));
        assert_eq!(a, b);
    }
}
