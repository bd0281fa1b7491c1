//! Media tiles: image and video textures, audio playback and visualizers.
//!
//! `MediaManager` owns every per-tile media resource. The shell calls
//! `start` once with the tile set, `update` every frame, and queries it while
//! building the scene.

mod audio;
mod fetch;
mod texture;
mod video;
mod visualizer;

pub use texture::SpriteTexture;

use audio::{AudioPlayer, ToggleOutcome};
use fetch::{MediaEvent, MediaLoader};
use texture::TextureCache;
use video::VideoPlayer;
use visualizer::AudioVisualizer;

use crate::tile::{Tile, TileId, TileType};
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;

pub struct MediaManager {
    loader: Option<MediaLoader>,
    textures: TextureCache,
    visualizers: HashMap<TileId, AudioVisualizer>,
    audio: Option<AudioPlayer>,
    videos: HashMap<TileId, VideoPlayer>,
    /// Source URL per media tile, for lazy audio fetches and error messages
    urls: HashMap<TileId, String>,
}

impl MediaManager {
    /// `load_media = false` keeps every tile on its placeholder background
    pub fn new(gl: Arc<glow::Context>, load_media: bool) -> Self {
        let loader = if load_media {
            match MediaLoader::new() {
                Ok(loader) => Some(loader),
                Err(e) => {
                    tracing::error!("media loading disabled: {e}");
                    None
                }
            }
        } else {
            tracing::info!("media loading disabled by config");
            None
        };

        let audio = match AudioPlayer::new() {
            Ok(player) => Some(player),
            Err(e) => {
                tracing::warn!("audio tiles will be silent: {e}");
                None
            }
        };

        Self {
            loader,
            textures: TextureCache::new(gl),
            visualizers: HashMap::new(),
            audio,
            videos: HashMap::new(),
            urls: HashMap::new(),
        }
    }

    /// Kick off loads for every media tile and create audio visualizers
    pub fn start<R: Rng + ?Sized>(&mut self, tiles: &[Tile], rng: &mut R) {
        let mut video_warned = false;

        for tile in tiles {
            if tile.tile_type == TileType::Audio {
                self.visualizers.insert(tile.id.clone(), AudioVisualizer::new(rng));
            }

            if !tile.tile_type.has_media() {
                continue;
            }
            let Some(url) = tile.media_url.clone() else {
                continue;
            };
            self.urls.insert(tile.id.clone(), url.clone());

            let Some(loader) = self.loader.as_mut() else {
                continue;
            };

            match tile.tile_type {
                TileType::Image => loader.load_image(tile.id.clone(), url),
                TileType::Video => match VideoPlayer::start(&url) {
                    Ok(player) => {
                        self.videos.insert(tile.id.clone(), player);
                    }
                    Err(e) => {
                        if !video_warned {
                            tracing::warn!("Error loading video: {e}");
                            video_warned = true;
                        }
                    }
                },
                // Audio is fetched on first play
                TileType::Audio | TileType::Color => {}
            }
        }
    }

    /// Per-frame work: finished downloads, new video frames, visualizer bars
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) {
        puffin::profile_function!();

        if let Some(loader) = self.loader.as_mut() {
            let events = loader.poll();
            if !events.is_empty() {
                tracing::debug!(finished = events.len(), pending = loader.in_flight(), "media loads completed");
            }
            for event in events {
                self.handle_event(event);
            }
        }

        for (id, player) in &self.videos {
            if let Some(frame) = player.take_frame() {
                if let Err(e) = self.textures.upload(id, frame.width, frame.height, &frame.rgba) {
                    tracing::warn!(tile = %id, "video frame upload failed: {e}");
                }
            }
        }

        for visualizer in self.visualizers.values_mut() {
            visualizer.update(dt, rng);
        }
    }

    fn handle_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::ImageReady { id, image } => {
                let (w, h) = image.dimensions();
                match self.textures.upload(&id, w, h, image.as_raw()) {
                    Ok(()) => tracing::debug!(tile = %id, "image loaded ({w}x{h})"),
                    Err(e) => tracing::error!(tile = %id, "Error loading image: {e}"),
                }
            }
            MediaEvent::AudioReady { id, bytes } => {
                let url = self.urls.get(&id).cloned().unwrap_or_default();
                if let Some(audio) = self.audio.as_mut() {
                    if let Err(e) = audio.attach(&id, &url, bytes) {
                        tracing::error!(tile = %id, "Error loading audio: {e}");
                    }
                }
            }
            MediaEvent::Failed { id, error } => {
                tracing::error!(tile = %id, "Error loading media: {error}");
                if self.audio.as_mut().is_some_and(|audio| audio.mark_failed(&id)) {
                    tracing::debug!(tile = %id, "audio track unavailable");
                }
            }
        }
    }

    /// Play/pause an audio tile, fetching it on first use
    pub fn toggle_audio(&mut self, id: &TileId) {
        let Some(audio) = self.audio.as_mut() else {
            tracing::warn!(tile = %id, "no audio output available");
            return;
        };

        match audio.toggle(id) {
            ToggleOutcome::NeedsFetch => match (self.loader.as_mut(), self.urls.get(id)) {
                (Some(loader), Some(url)) => loader.load_audio(id.clone(), url.clone()),
                _ => {
                    tracing::warn!(tile = %id, "audio source unavailable");
                    audio.mark_failed(id);
                }
            },
            ToggleOutcome::Playing => tracing::info!(tile = %id, "audio playing"),
            ToggleOutcome::Paused => tracing::info!(tile = %id, "audio paused"),
            ToggleOutcome::Unavailable => tracing::warn!(tile = %id, "audio failed to load earlier"),
        }
    }

    pub fn is_playing(&self, id: &TileId) -> bool {
        self.audio.as_ref().is_some_and(|audio| audio.is_playing(id))
    }

    pub fn sprite(&self, id: &TileId) -> Option<SpriteTexture> {
        self.textures.get(id)
    }

    pub fn bar_heights(&self, id: &TileId) -> Option<&[f32]> {
        self.visualizers.get(id).map(|v| v.heights())
    }
}
