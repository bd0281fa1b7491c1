//! Background media downloads.
//!
//! Each request runs on its own worker thread and reports back through a
//! channel that the main loop drains once per frame. URLs without an
//! `http://` or `https://` scheme are read from the local filesystem.

use crate::constants::MEDIA_FETCH_TIMEOUT_SECS;
use crate::error::{EditorError, Result};
use crate::tile::TileId;
use image::RgbaImage;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;
use std::time::Duration;

/// Completed (or failed) media request
#[derive(Debug)]
pub enum MediaEvent {
    ImageReady { id: TileId, image: RgbaImage },
    AudioReady { id: TileId, bytes: Vec<u8> },
    Failed { id: TileId, error: EditorError },
}

pub struct MediaLoader {
    client: reqwest::blocking::Client,
    tx: Sender<MediaEvent>,
    rx: Receiver<MediaEvent>,
    in_flight: usize,
}

impl MediaLoader {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(MEDIA_FETCH_TIMEOUT_SECS))
            .build()
            .map_err(EditorError::HttpClient)?;
        let (tx, rx) = channel();
        Ok(Self {
            client,
            tx,
            rx,
            in_flight: 0,
        })
    }

    /// Requests that have not reported back yet
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Fetch and decode an image into RGBA
    pub fn load_image(&mut self, id: TileId, url: String) {
        self.spawn(id, url, |id, url, bytes| {
            decode_image(&url, &bytes).map(|image| MediaEvent::ImageReady { id, image })
        });
    }

    /// Fetch raw audio bytes; decoding happens on the audio thread
    pub fn load_audio(&mut self, id: TileId, url: String) {
        self.spawn(id, url, |id, _url, bytes| Ok(MediaEvent::AudioReady { id, bytes }));
    }

    fn spawn<F>(&mut self, id: TileId, url: String, finish: F)
    where
        F: FnOnce(TileId, String, Vec<u8>) -> Result<MediaEvent> + Send + 'static,
    {
        let client = self.client.clone();
        let tx = self.tx.clone();
        self.in_flight += 1;
        tracing::debug!(tile = %id, %url, "fetching media");

        let spawned = thread::Builder::new()
            .name(format!("fetch-{id}"))
            .spawn(move || {
                let event = match fetch_bytes(&client, &url) {
                    Ok(bytes) => finish(id.clone(), url, bytes)
                        .unwrap_or_else(|error| MediaEvent::Failed { id, error }),
                    Err(error) => MediaEvent::Failed { id, error },
                };
                // Receiver gone means the app is shutting down
                let _ = tx.send(event);
            });

        if let Err(e) = spawned {
            tracing::error!("failed to spawn fetch thread: {e}");
            self.in_flight -= 1;
        }
    }

    /// Drain everything that finished since the last call
    pub fn poll(&mut self) -> Vec<MediaEvent> {
        let events: Vec<MediaEvent> = self.rx.try_iter().collect();
        self.in_flight = self.in_flight.saturating_sub(events.len());
        events
    }
}

fn is_remote(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Download `url`, or read it from disk if it is not an HTTP(S) URL
pub fn fetch_bytes(client: &reqwest::blocking::Client, url: &str) -> Result<Vec<u8>> {
    if !is_remote(url) {
        let path = PathBuf::from(url.strip_prefix("file://").unwrap_or(url));
        return std::fs::read(&path).map_err(|source| EditorError::MediaRead { path, source });
    }

    client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.bytes())
        .map(|bytes| bytes.to_vec())
        .map_err(|source| EditorError::Fetch {
            url: url.to_string(),
            source,
        })
}

pub fn decode_image(url: &str, bytes: &[u8]) -> Result<RgbaImage> {
    image::load_from_memory(bytes)
        .map(|img| img.into_rgba8())
        .map_err(|source| EditorError::ImageDecode {
            url: url.to_string(),
            source,
        })
}
