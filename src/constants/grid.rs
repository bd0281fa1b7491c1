//! Tile grid layout and palette.

/// Number of tile columns
pub const GRID_COLS: u32 = 5;
/// Number of tile rows
pub const GRID_ROWS: u32 = 4;
/// Most columns or rows a configured grid may have
pub const GRID_MAX_SIDE: u32 = 256;
/// Tile edge length in world units
pub const TILE_SIZE: f32 = 120.0;
/// Space between neighbouring tiles
pub const TILE_GAP: f32 = 20.0;
/// Corner radius of every tile
pub const TILE_CORNER_RADIUS: f32 = 8.0;

/// Colors a tile can be filled with
pub const TILE_PALETTE: [u32; 8] = [
    0x3b82f6, // blue
    0x8b5cf6, // purple
    0x06b6d4, // cyan
    0x10b981, // emerald
    0xf59e0b, // amber
    0xef4444, // red
    0xec4899, // pink
    0x6366f1, // indigo
];

/// Fill alpha of plain color tiles
pub const COLOR_TILE_ALPHA: f32 = 0.8;
/// Background of video tiles
pub const VIDEO_TILE_BG: u32 = 0x1a1a2e;
/// Background of image tiles
pub const IMAGE_TILE_BG: u32 = 0x2a2a3e;
/// Background of audio tiles
pub const AUDIO_TILE_BG: u32 = 0x3a3a5e;
/// Fill alpha of media tile backgrounds
pub const MEDIA_TILE_BG_ALPHA: f32 = 0.9;

/// Border when neither hovered nor selected
pub const BORDER_DEFAULT_COLOR: u32 = 0x475569;
pub const BORDER_DEFAULT_WIDTH: f32 = 2.0;
/// Border under the cursor
pub const BORDER_HOVER_COLOR: u32 = 0x3b82f6;
/// Border of the selected tile
pub const BORDER_SELECTED_COLOR: u32 = 0xa855f7;
/// Width of hover and selection borders
pub const BORDER_HIGHLIGHT_WIDTH: f32 = 3.0;

/// Label font size on color tiles
pub const LABEL_SIZE_LARGE: f32 = 14.0;
/// Label font size on media tiles
pub const LABEL_SIZE_SMALL: f32 = 10.0;
/// Media labels sit this far above the tile's bottom edge
pub const MEDIA_LABEL_BOTTOM_OFFSET: f32 = 8.0;
/// Inset of media sprites from the tile's left/top/right edges
pub const SPRITE_INSET: f32 = 2.0;
/// Height reserved below media sprites for the label
pub const SPRITE_LABEL_STRIP: f32 = 20.0;
/// Tile labels and the audio play icon
pub const OVERLAY_COLOR: u32 = 0xffffff;
