//! Tile data: the payload kinds a grid cell can carry and its geometry.

use glam::{Vec2, Vec4};
use std::fmt;

/// What a tile shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileType {
    Color,
    Video,
    Image,
    Audio,
}

impl TileType {
    /// Capitalized name used in labels
    pub fn name(&self) -> &'static str {
        match self {
            TileType::Color => "Color",
            TileType::Video => "Video",
            TileType::Image => "Image",
            TileType::Audio => "Audio",
        }
    }

    /// Whether the tile pulls its content from a URL
    pub fn has_media(&self) -> bool {
        !matches!(self, TileType::Color)
    }
}

/// Stable tile identifier (`tile-N`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(String);

impl TileId {
    pub fn from_index(index: usize) -> Self {
        Self(format!("tile-{index}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single cell of the grid.
///
/// `x`/`y` are relative to the grid container; add the grid origin to get
/// world coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub id: TileId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// 0xRRGGBB
    pub color: u32,
    pub label: String,
    pub tile_type: TileType,
    pub media_url: Option<String>,
}

impl Tile {
    /// Bounds inside the grid container
    pub fn local_rect(&self) -> Rect {
        Rect::from_min_size(Vec2::new(self.x, self.y), Vec2::new(self.width, self.height))
    }

    /// Bounds in world space
    pub fn world_rect(&self, origin: Vec2) -> Rect {
        self.local_rect().translate(origin)
    }
}

/// Axis-aligned rectangle in world units (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self { min, max: min + size }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn translate(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Edges are inclusive
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Containment test that excludes the cut-off corners of a rounded rect
    pub fn contains_rounded(&self, p: Vec2, radius: f32) -> bool {
        if !self.contains(p) {
            return false;
        }
        let r = radius.min(self.size().x * 0.5).min(self.size().y * 0.5).max(0.0);
        if r == 0.0 {
            return true;
        }
        // Nearest point on the inner rect (shrunk by the radius)
        let inner_min = self.min + Vec2::splat(r);
        let inner_max = self.max - Vec2::splat(r);
        let nearest = p.clamp(inner_min, inner_max);
        p.distance_squared(nearest) <= r * r
    }
}

/// Split 0xRRGGBB into normalized RGBA with the given alpha
pub fn hex_to_rgba(hex: u32, alpha: f32) -> Vec4 {
    let r = ((hex >> 16) & 0xff) as f32 / 255.0;
    let g = ((hex >> 8) & 0xff) as f32 / 255.0;
    let b = (hex & 0xff) as f32 / 255.0;
    Vec4::new(r, g, b, alpha)
}

/// egui color from 0xRRGGBB and alpha
pub fn hex_to_color32(hex: u32, alpha: f32) -> egui::Color32 {
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(
        ((hex >> 16) & 0xff) as u8,
        ((hex >> 8) & 0xff) as u8,
        (hex & 0xff) as u8,
        a,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_id_format() {
        assert_eq!(TileId::from_index(0).as_str(), "tile-0");
        assert_eq!(TileId::from_index(19).to_string(), "tile-19");
    }

    #[test]
    fn test_rect_contains_is_inclusive() {
        let r = Rect::from_min_size(Vec2::ZERO, Vec2::new(10.0, 10.0));
        assert!(r.contains(Vec2::new(0.0, 0.0)));
        assert!(r.contains(Vec2::new(10.0, 10.0)));
        assert!(!r.contains(Vec2::new(10.1, 5.0)));
    }

    #[test]
    fn test_rounded_corner_excluded() {
        let r = Rect::from_min_size(Vec2::ZERO, Vec2::new(120.0, 120.0));
        // Inside the bounding box but outside the 8px corner arc
        assert!(!r.contains_rounded(Vec2::new(0.5, 0.5), 8.0));
        // Along an edge away from corners
        assert!(r.contains_rounded(Vec2::new(0.5, 60.0), 8.0));
        assert!(r.contains_rounded(Vec2::new(60.0, 60.0), 8.0));
    }

    #[test]
    fn test_hex_to_rgba() {
        let c = hex_to_rgba(0xff8000, 0.5);
        assert!((c.x - 1.0).abs() < 1e-6);
        assert!((c.y - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.z, 0.0);
        assert_eq!(c.w, 0.5);
    }

    #[test]
    fn test_world_rect_offsets_by_origin() {
        let tile = Tile {
            id: TileId::from_index(0),
            x: 140.0,
            y: 0.0,
            width: 120.0,
            height: 120.0,
            color: 0,
            label: String::new(),
            tile_type: TileType::Color,
            media_url: None,
        };
        let rect = tile.world_rect(Vec2::new(-340.0, -270.0));
        assert_eq!(rect.min, Vec2::new(-200.0, -270.0));
        assert_eq!(rect.max, Vec2::new(-80.0, -150.0));
    }
}
