//! Looping playback for audio tiles.
//!
//! Tracks are fetched lazily on the first toggle. Until the bytes arrive the
//! tile remembers whether the user last asked for play or pause.

use crate::constants::AUDIO_VOLUME;
use crate::error::{EditorError, Result};
use crate::tile::TileId;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::collections::HashMap;
use std::io::Cursor;

enum Track {
    Loading { play_when_ready: bool },
    Ready(Sink),
    Failed,
}

/// What the caller must do after a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Track is not loaded yet; start fetching it
    NeedsFetch,
    Playing,
    Paused,
    Unavailable,
}

/// Per-tile track states, independent of the output device
#[derive(Default)]
struct Tracks {
    map: HashMap<TileId, Track>,
}

impl Tracks {
    fn toggle(&mut self, id: &TileId) -> ToggleOutcome {
        match self.map.get_mut(id) {
            None => {
                self.map.insert(id.clone(), Track::Loading { play_when_ready: true });
                ToggleOutcome::NeedsFetch
            }
            Some(Track::Loading { play_when_ready }) => {
                *play_when_ready = !*play_when_ready;
                if *play_when_ready {
                    ToggleOutcome::Playing
                } else {
                    ToggleOutcome::Paused
                }
            }
            Some(Track::Ready(sink)) => {
                if sink.is_paused() {
                    sink.play();
                    ToggleOutcome::Playing
                } else {
                    sink.pause();
                    ToggleOutcome::Paused
                }
            }
            Some(Track::Failed) => ToggleOutcome::Unavailable,
        }
    }

    fn is_playing(&self, id: &TileId) -> bool {
        match self.map.get(id) {
            Some(Track::Loading { play_when_ready }) => *play_when_ready,
            Some(Track::Ready(sink)) => !sink.is_paused(),
            _ => false,
        }
    }

    /// Play request of a track still loading
    fn pending(&self, id: &TileId) -> Option<bool> {
        match self.map.get(id) {
            Some(Track::Loading { play_when_ready }) => Some(*play_when_ready),
            _ => None,
        }
    }

    /// Fail a loading track. Returns false when nothing was loading for `id`.
    fn fail_pending(&mut self, id: &TileId) -> bool {
        match self.map.get_mut(id) {
            Some(track @ Track::Loading { .. }) => {
                *track = Track::Failed;
                true
            }
            _ => false,
        }
    }

    fn insert(&mut self, id: &TileId, track: Track) {
        self.map.insert(id.clone(), track);
    }
}

pub struct AudioPlayer {
    // Dropping the stream stops all sound
    _stream: OutputStream,
    handle: OutputStreamHandle,
    tracks: Tracks,
}

impl AudioPlayer {
    pub fn new() -> Result<Self> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| EditorError::AudioOutput(e.to_string()))?;
        Ok(Self {
            _stream: stream,
            handle,
            tracks: Tracks::default(),
        })
    }

    /// Flip play/pause for a tile
    pub fn toggle(&mut self, id: &TileId) -> ToggleOutcome {
        self.tracks.toggle(id)
    }

    /// Shown as playing while loading if the user asked for playback
    pub fn is_playing(&self, id: &TileId) -> bool {
        self.tracks.is_playing(id)
    }

    /// Attach fetched bytes to a pending track
    pub fn attach(&mut self, id: &TileId, url: &str, bytes: Vec<u8>) -> Result<()> {
        let Some(play) = self.tracks.pending(id) else {
            return Ok(());
        };

        match self.build_sink(url, bytes) {
            Ok(sink) => {
                if !play {
                    sink.pause();
                }
                self.tracks.insert(id, Track::Ready(sink));
                Ok(())
            }
            Err(e) => {
                self.tracks.insert(id, Track::Failed);
                Err(e)
            }
        }
    }

    /// Only tracks waiting on a fetch can fail; other tiles are ignored
    pub fn mark_failed(&mut self, id: &TileId) -> bool {
        self.tracks.fail_pending(id)
    }

    fn build_sink(&self, url: &str, bytes: Vec<u8>) -> Result<Sink> {
        let decoder = Decoder::new(Cursor::new(bytes)).map_err(|e| EditorError::AudioDecode {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        let sink = Sink::try_new(&self.handle).map_err(|e| EditorError::AudioOutput(e.to_string()))?;
        sink.set_volume(AUDIO_VOLUME);
        sink.append(decoder.repeat_infinite());
        Ok(sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_toggle_requests_fetch_then_flips_request() {
        let mut tracks = Tracks::default();
        let id = TileId::from_index(3);
        assert_eq!(tracks.toggle(&id), ToggleOutcome::NeedsFetch);
        assert!(tracks.is_playing(&id));
        assert_eq!(tracks.toggle(&id), ToggleOutcome::Paused);
        assert_eq!(tracks.pending(&id), Some(false));
        assert!(!tracks.is_playing(&id));
    }

    #[test]
    fn test_failure_only_marks_loading_tracks() {
        let mut tracks = Tracks::default();
        let audio = TileId::from_index(3);
        let image = TileId::from_index(0);
        tracks.toggle(&audio);

        assert!(!tracks.fail_pending(&image));
        assert!(tracks.map.get(&image).is_none());

        assert!(tracks.fail_pending(&audio));
        assert_eq!(tracks.toggle(&audio), ToggleOutcome::Unavailable);
        assert!(!tracks.fail_pending(&audio));
    }
}
