//! Tile appearance: turns tiles plus interaction state into draw primitives.
//!
//! Everything here is in world units. The GL renderer draws the rect and
//! sprite layers, the egui overlay draws labels and play icons.

use crate::constants::*;
use crate::tile::{hex_to_rgba, Rect, Tile, TileId, TileType};
use glam::{Vec2, Vec4};

/// Outline drawn around a tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Border {
    /// 0xRRGGBB
    pub color: u32,
    pub width: f32,
}

/// Selection wins over hover
pub fn tile_border(is_selected: bool, is_hovered: bool) -> Border {
    if is_selected {
        Border {
            color: BORDER_SELECTED_COLOR,
            width: BORDER_HIGHLIGHT_WIDTH,
        }
    } else if is_hovered {
        Border {
            color: BORDER_HOVER_COLOR,
            width: BORDER_HIGHLIGHT_WIDTH,
        }
    } else {
        Border {
            color: BORDER_DEFAULT_COLOR,
            width: BORDER_DEFAULT_WIDTH,
        }
    }
}

/// One rounded rectangle (fill, outline, or both)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectInstance {
    pub rect: Rect,
    pub radius: f32,
    pub fill: Vec4,
    pub border_color: Vec4,
    pub border_width: f32,
}

impl RectInstance {
    pub fn filled(rect: Rect, radius: f32, fill: Vec4) -> Self {
        Self {
            rect,
            radius,
            fill,
            border_color: Vec4::ZERO,
            border_width: 0.0,
        }
    }

    pub fn outline(rect: Rect, radius: f32, border: Border) -> Self {
        Self {
            rect,
            radius,
            fill: Vec4::ZERO,
            border_color: hex_to_rgba(border.color, 1.0),
            border_width: border.width,
        }
    }
}

/// Text centered on `position`
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub position: Vec2,
    pub size: f32,
}

/// Play triangle of an audio tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayIcon {
    pub points: [Vec2; 3],
    pub alpha: f32,
}

/// Everything needed to draw one tile
#[derive(Debug, Clone, PartialEq)]
pub struct TileVisual {
    pub id: TileId,
    pub bounds: Rect,
    /// Background and visualizer bars, in draw order
    pub fills: Vec<RectInstance>,
    /// Where the image/video texture goes
    pub sprite: Option<Rect>,
    pub border: RectInstance,
    pub label: Label,
    pub play_icon: Option<PlayIcon>,
}

/// Per-tile dynamic state the scene needs
#[derive(Debug, Clone, Copy, Default)]
pub struct TileStatus<'a> {
    pub selected: bool,
    pub hovered: bool,
    pub bar_heights: Option<&'a [f32]>,
    pub playing: bool,
}

/// Build the visual for a tile placed at `origin`
pub fn tile_visual(tile: &Tile, origin: Vec2, status: TileStatus<'_>) -> TileVisual {
    let bounds = tile.world_rect(origin);
    let top_left = bounds.min;
    let (w, h) = (tile.width, tile.height);
    let border = RectInstance::outline(bounds, TILE_CORNER_RADIUS, tile_border(status.selected, status.hovered));

    let media_label = || Label {
        text: tile.label.clone(),
        position: top_left + Vec2::new(w / 2.0, h - MEDIA_LABEL_BOTTOM_OFFSET),
        size: LABEL_SIZE_SMALL,
    };
    let sprite_rect = || {
        Rect::from_min_size(
            top_left + Vec2::splat(SPRITE_INSET),
            Vec2::new(w - 2.0 * SPRITE_INSET, h - SPRITE_LABEL_STRIP),
        )
    };
    let background = |hex: u32, alpha: f32| RectInstance::filled(bounds, TILE_CORNER_RADIUS, hex_to_rgba(hex, alpha));

    match tile.tile_type {
        TileType::Color => TileVisual {
            id: tile.id.clone(),
            bounds,
            fills: vec![background(tile.color, COLOR_TILE_ALPHA)],
            sprite: None,
            border,
            label: Label {
                text: tile.label.clone(),
                position: bounds.center(),
                size: LABEL_SIZE_LARGE,
            },
            play_icon: None,
        },
        TileType::Video | TileType::Image => {
            let bg = if tile.tile_type == TileType::Video {
                VIDEO_TILE_BG
            } else {
                IMAGE_TILE_BG
            };
            TileVisual {
                id: tile.id.clone(),
                bounds,
                fills: vec![background(bg, MEDIA_TILE_BG_ALPHA)],
                sprite: Some(sprite_rect()),
                border,
                label: media_label(),
                play_icon: None,
            }
        }
        TileType::Audio => {
            let mut fills = vec![background(AUDIO_TILE_BG, MEDIA_TILE_BG_ALPHA)];
            if let Some(heights) = status.bar_heights {
                fills.extend(audio_bars(top_left, w, h, heights));
            }
            let mid = top_left + Vec2::new(w / 2.0, h / 2.0);
            TileVisual {
                id: tile.id.clone(),
                bounds,
                fills,
                sprite: None,
                border,
                label: media_label(),
                play_icon: Some(PlayIcon {
                    points: [
                        mid + Vec2::new(-8.0, -10.0),
                        mid + Vec2::new(8.0, 0.0),
                        mid + Vec2::new(-8.0, 10.0),
                    ],
                    alpha: if status.playing {
                        PLAY_ICON_ALPHA_PLAYING
                    } else {
                        PLAY_ICON_ALPHA_IDLE
                    },
                }),
            }
        }
    }
}

/// Width of a single visualizer bar for a tile of width `w`
pub fn audio_bar_width(w: f32) -> f32 {
    (w - 2.0 * AUDIO_BAR_PADDING) / AUDIO_BAR_COUNT as f32 - AUDIO_BAR_SPACING
}

fn audio_bars(top_left: Vec2, w: f32, h: f32, heights: &[f32]) -> impl Iterator<Item = RectInstance> + '_ {
    let bar_width = audio_bar_width(w);
    let color = hex_to_rgba(AUDIO_BAR_COLOR, AUDIO_BAR_ALPHA);
    heights.iter().enumerate().map(move |(i, &height)| {
        let x = AUDIO_BAR_PADDING + i as f32 * (bar_width + AUDIO_BAR_SPACING);
        let y = h / 2.0 - height / 2.0;
        RectInstance::filled(
            Rect::from_min_size(top_left + Vec2::new(x, y), Vec2::new(bar_width, height)),
            0.0,
            color,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(tile_type: TileType) -> Tile {
        Tile {
            id: TileId::from_index(0),
            x: 0.0,
            y: 0.0,
            width: 120.0,
            height: 120.0,
            color: 0x10b981,
            label: "Tile 1".to_string(),
            tile_type,
            media_url: None,
        }
    }

    #[test]
    fn test_border_priority() {
        assert_eq!(tile_border(false, false), Border { color: 0x475569, width: 2.0 });
        assert_eq!(tile_border(false, true), Border { color: 0x3b82f6, width: 3.0 });
        assert_eq!(tile_border(true, false), Border { color: 0xa855f7, width: 3.0 });
        assert_eq!(tile_border(true, true), Border { color: 0xa855f7, width: 3.0 });
    }

    #[test]
    fn test_color_tile_visual() {
        let visual = tile_visual(&tile(TileType::Color), Vec2::ZERO, TileStatus::default());
        assert_eq!(visual.fills.len(), 1);
        assert_eq!(visual.fills[0].fill, hex_to_rgba(0x10b981, 0.8));
        assert_eq!(visual.fills[0].radius, 8.0);
        assert_eq!(visual.label.position, Vec2::new(60.0, 60.0));
        assert_eq!(visual.label.size, 14.0);
        assert!(visual.sprite.is_none());
        assert!(visual.play_icon.is_none());
    }

    #[test]
    fn test_media_sprite_layout() {
        let origin = Vec2::new(-340.0, -270.0);
        let visual = tile_visual(&tile(TileType::Image), origin, TileStatus::default());
        let sprite = visual.sprite.unwrap();
        assert_eq!(sprite.min, origin + Vec2::new(2.0, 2.0));
        assert_eq!(sprite.size(), Vec2::new(116.0, 100.0));
        assert_eq!(visual.label.position, origin + Vec2::new(60.0, 112.0));
        assert_eq!(visual.label.size, 10.0);
        assert_eq!(visual.fills[0].fill, hex_to_rgba(IMAGE_TILE_BG, 0.9));
    }

    #[test]
    fn test_video_background() {
        let visual = tile_visual(&tile(TileType::Video), Vec2::ZERO, TileStatus::default());
        assert_eq!(visual.fills[0].fill, hex_to_rgba(VIDEO_TILE_BG, 0.9));
        assert!(visual.sprite.is_some());
    }

    #[test]
    fn test_audio_bars_layout() {
        let heights = [10.0, 20.0, 30.0, 40.0, 50.0, 20.0, 10.0, 30.0];
        let status = TileStatus {
            bar_heights: Some(&heights),
            ..TileStatus::default()
        };
        let visual = tile_visual(&tile(TileType::Audio), Vec2::ZERO, status);
        assert_eq!(visual.fills.len(), 1 + 8);

        assert_eq!(audio_bar_width(120.0), 10.5);
        let second = visual.fills[2].rect;
        assert_eq!(second.min, Vec2::new(10.0 + 12.5, 60.0 - 10.0));
        assert_eq!(second.size(), Vec2::new(10.5, 20.0));
    }

    #[test]
    fn test_play_icon_alpha_tracks_playback() {
        let idle = tile_visual(&tile(TileType::Audio), Vec2::ZERO, TileStatus::default());
        assert_eq!(idle.play_icon.unwrap().alpha, 0.9);
        assert_eq!(
            idle.play_icon.unwrap().points,
            [Vec2::new(52.0, 50.0), Vec2::new(68.0, 60.0), Vec2::new(52.0, 70.0)]
        );

        let playing = tile_visual(
            &tile(TileType::Audio),
            Vec2::ZERO,
            TileStatus {
                playing: true,
                ..TileStatus::default()
            },
        );
        assert_eq!(playing.play_icon.unwrap().alpha, 0.3);
    }

    #[test]
    fn test_selected_border_on_media_tile() {
        let visual = tile_visual(
            &tile(TileType::Video),
            Vec2::ZERO,
            TileStatus {
                selected: true,
                ..TileStatus::default()
            },
        );
        assert_eq!(visual.border.border_width, 3.0);
        assert_eq!(visual.border.border_color, hex_to_rgba(0xa855f7, 1.0));
        assert_eq!(visual.border.fill, Vec4::ZERO);
    }
}
