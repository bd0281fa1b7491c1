//! Looping video tiles.
//!
//! With the `video` feature each tile gets a decode thread that streams
//! downscaled RGBA frames into a latest-frame slot at the clip's frame rate
//! and seeks back to the start at end of stream. Without the feature,
//! `VideoPlayer::start` always fails and the tile keeps its background.

use crate::error::{EditorError, Result};

/// Tightly packed RGBA frame
#[cfg_attr(not(feature = "video"), allow(dead_code))]
#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

#[cfg_attr(not(feature = "video"), allow(dead_code))]
/// Output size that fits `max_width` while keeping the aspect ratio
pub fn fit_frame_size(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }
    if width <= max_width {
        return (width, height);
    }
    let scaled_height = (height as u64 * max_width as u64 / width as u64).max(1) as u32;
    (max_width, scaled_height)
}

#[cfg_attr(not(feature = "video"), allow(dead_code))]
/// Remove row padding from a strided plane
pub fn pack_rows(data: &[u8], stride: usize, width: u32, height: u32) -> Vec<u8> {
    let row_bytes = width as usize * 4;
    if stride == row_bytes {
        return data[..row_bytes * height as usize].to_vec();
    }
    let mut out = Vec::with_capacity(row_bytes * height as usize);
    for y in 0..height as usize {
        let start = y * stride;
        out.extend_from_slice(&data[start..start + row_bytes]);
    }
    out
}

#[cfg(feature = "video")]
mod decode {
    use super::{fit_frame_size, pack_rows, VideoFrame};
    use crate::constants::VIDEO_MAX_FRAME_WIDTH;
    use crate::error::{EditorError, Result};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};
    use std::thread::{self, JoinHandle};
    use std::time::{Duration, Instant};

    struct SharedState {
        latest: Mutex<Option<VideoFrame>>,
        running: AtomicBool,
    }

    pub struct VideoPlayer {
        state: Arc<SharedState>,
        thread: Option<JoinHandle<()>>,
    }

    impl VideoPlayer {
        pub fn start(url: &str) -> Result<Self> {
            ffmpeg_next::init().map_err(|e| EditorError::Video {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

            let state = Arc::new(SharedState {
                latest: Mutex::new(None),
                running: AtomicBool::new(true),
            });
            let thread_state = Arc::clone(&state);
            let thread_url = url.to_string();

            let thread = thread::Builder::new()
                .name("video-decode".into())
                .spawn(move || {
                    if let Err(e) = decode_loop(&thread_state, &thread_url) {
                        tracing::warn!(url = %thread_url, "video decode stopped: {e}");
                    }
                })
                .map_err(|e| EditorError::Video {
                    url: url.to_string(),
                    reason: e.to_string(),
                })?;

            Ok(Self {
                state,
                thread: Some(thread),
            })
        }

        /// Latest decoded frame, if a new one arrived
        pub fn take_frame(&self) -> Option<VideoFrame> {
            self.state.latest.lock().ok().and_then(|mut slot| slot.take())
        }
    }

    impl Drop for VideoPlayer {
        fn drop(&mut self) {
            self.state.running.store(false, Ordering::Release);
            if let Some(handle) = self.thread.take() {
                if handle.join().is_err() {
                    tracing::warn!("video decode thread panicked");
                }
            }
        }
    }

    fn decode_loop(state: &SharedState, url: &str) -> std::result::Result<(), ffmpeg_next::Error> {
        use ffmpeg_next::format::Pixel;
        use ffmpeg_next::media::Type;
        use ffmpeg_next::software::scaling::{Context as Scaler, Flags};
        use ffmpeg_next::util::frame::Video as Frame;

        let mut input = ffmpeg_next::format::input(&url)?;
        let stream = input.streams().best(Type::Video).ok_or(ffmpeg_next::Error::StreamNotFound)?;
        let stream_index = stream.index();

        let rate = stream.avg_frame_rate();
        let fps = if rate.denominator() > 0 && rate.numerator() > 0 {
            rate.numerator() as f64 / rate.denominator() as f64
        } else {
            30.0
        };
        let frame_duration = Duration::from_secs_f64(1.0 / fps);

        let context = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())?;
        let mut decoder = context.decoder().video()?;
        let (out_w, out_h) = fit_frame_size(decoder.width(), decoder.height(), VIDEO_MAX_FRAME_WIDTH);
        let mut scaler = Scaler::get(
            decoder.format(),
            decoder.width(),
            decoder.height(),
            Pixel::RGBA,
            out_w,
            out_h,
            Flags::BILINEAR,
        )?;

        tracing::info!(%url, "video opened: {}x{} -> {}x{} @ {:.2}fps", decoder.width(), decoder.height(), out_w, out_h, fps);

        let mut next_frame_time = Instant::now();
        let mut emit = |decoded: &Frame, next_frame_time: &mut Instant| -> std::result::Result<(), ffmpeg_next::Error> {
            let mut rgba = Frame::empty();
            scaler.run(decoded, &mut rgba)?;
            let frame = VideoFrame {
                width: out_w,
                height: out_h,
                rgba: pack_rows(rgba.data(0), rgba.stride(0), out_w, out_h),
            };

            let now = Instant::now();
            if now < *next_frame_time {
                thread::sleep(*next_frame_time - now);
            }
            *next_frame_time += frame_duration;
            if *next_frame_time < Instant::now() {
                *next_frame_time = Instant::now();
            }

            if let Ok(mut slot) = state.latest.lock() {
                *slot = Some(frame);
            }
            Ok(())
        };

        while state.running.load(Ordering::Acquire) {
            let mut decoded = Frame::empty();
            for (stream, packet) in input.packets() {
                if !state.running.load(Ordering::Acquire) {
                    return Ok(());
                }
                if stream.index() != stream_index {
                    continue;
                }
                decoder.send_packet(&packet)?;
                while decoder.receive_frame(&mut decoded).is_ok() {
                    emit(&decoded, &mut next_frame_time)?;
                }
            }

            decoder.send_eof()?;
            while decoder.receive_frame(&mut decoded).is_ok() {
                emit(&decoded, &mut next_frame_time)?;
            }

            tracing::debug!(%url, "video looping");
            input.seek(0, ..)?;
            decoder.flush();
        }
        Ok(())
    }
}

#[cfg(feature = "video")]
pub use decode::VideoPlayer;

#[cfg(not(feature = "video"))]
pub struct VideoPlayer;

#[cfg(not(feature = "video"))]
impl VideoPlayer {
    pub fn start(url: &str) -> Result<Self> {
        Err(EditorError::Video {
            url: url.to_string(),
            reason: "built without the `video` feature".to_string(),
        })
    }

    pub fn take_frame(&self) -> Option<VideoFrame> {
        None
    }
}
