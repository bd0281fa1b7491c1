//! Media tile constants.

/// Sample video loops
pub const VIDEO_URLS: [&str; 3] = [
    "https://pixijs.com/assets/video.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerBlazes.mp4",
];

/// Sample images
pub const IMAGE_URLS: [&str; 6] = [
    "https://picsum.photos/200/200?random=1",
    "https://picsum.photos/200/200?random=2",
    "https://picsum.photos/200/200?random=3",
    "https://picsum.photos/200/200?random=4",
    "https://picsum.photos/200/200?random=5",
    "https://picsum.photos/200/200?random=6",
];

/// Sample audio tracks
pub const AUDIO_URLS: [&str; 2] = [
    "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-1.mp3",
    "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-2.mp3",
];

/// Bars in an audio visualizer
pub const AUDIO_BAR_COUNT: usize = 8;
/// Shortest bar (world units)
pub const AUDIO_BAR_MIN_HEIGHT: f32 = 10.0;
/// Random extra height added on top of the minimum
pub const AUDIO_BAR_HEIGHT_RANGE: f32 = 40.0;
/// Space between bars
pub const AUDIO_BAR_SPACING: f32 = 2.0;
/// Horizontal padding inside the tile
pub const AUDIO_BAR_PADDING: f32 = 10.0;
/// Bar color
pub const AUDIO_BAR_COLOR: u32 = 0x8b5cf6;
/// Bar alpha
pub const AUDIO_BAR_ALPHA: f32 = 0.8;
/// Shortest re-roll interval (seconds)
pub const AUDIO_BAR_MIN_INTERVAL: f32 = 0.2;
/// Random extra interval added on top of the minimum
pub const AUDIO_BAR_INTERVAL_RANGE: f32 = 0.3;
/// Playback volume of audio tiles
pub const AUDIO_VOLUME: f32 = 0.3;
/// Play icon alpha while paused
pub const PLAY_ICON_ALPHA_IDLE: f32 = 0.9;
/// Play icon alpha while playing
pub const PLAY_ICON_ALPHA_PLAYING: f32 = 0.3;

/// Decoded video frames are downscaled to fit this width
pub const VIDEO_MAX_FRAME_WIDTH: u32 = 256;
/// Timeout for media downloads (seconds)
pub const MEDIA_FETCH_TIMEOUT_SECS: u64 = 30;
