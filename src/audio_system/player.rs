/// Rodio playback backend
///
/// Owns the system output stream on a dedicated thread (the stream itself
/// cannot move between threads) and turns clip references into rodio sinks.

use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{bounded, Sender};
use parking_lot::Mutex;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use super::device::{FinishCallback, PlaybackBackend, Voice};
use super::mode::AudioMode;
use crate::catalog::AudioRef;
use crate::error::AudioError;

/// Playback backend on the default system output
pub struct RodioBackend {
    assets_root: PathBuf,
    mode: AudioMode,
    stream_handle: OutputStreamHandle,
    /// Clip bytes preloaded into memory, keyed by reference
    clips: Mutex<HashMap<AudioRef, Arc<Vec<u8>>>>,
    /// Dropping this ends the device thread and closes the stream
    _shutdown: Sender<()>,
}

impl RodioBackend {
    /// Open the default output device
    pub fn open(assets_root: &Path, mode: AudioMode) -> Result<Self, AudioError> {
        let (ready_tx, ready_rx) = bounded::<Result<OutputStreamHandle, String>>(1);
        let (shutdown_tx, shutdown_rx) = bounded::<()>(1);

        thread::Builder::new()
            .name("audio-device".to_string())
            .spawn(move || match OutputStream::try_default() {
                Ok((stream, handle)) => {
                    if ready_tx.send(Ok(handle)).is_err() {
                        return;
                    }
                    // Park until the backend goes away
                    let _ = shutdown_rx.recv();
                    drop(stream);
                    tracing::debug!("Audio output stream closed");
                }
                Err(e) => {
                    let _ = ready_tx.send(Err(e.to_string()));
                }
            })
            .map_err(|e| AudioError::DeviceUnavailable(e.to_string()))?;

        let stream_handle = ready_rx
            .recv()
            .map_err(|e| AudioError::DeviceUnavailable(e.to_string()))?
            .map_err(AudioError::DeviceUnavailable)?;

        tracing::debug!(
            "Opened audio output: assets={}, volume={}, fade_in={:?}ms, limit={:?}ms",
            assets_root.display(),
            mode.volume,
            mode.fade_in_ms,
            mode.limit_ms
        );

        Ok(Self {
            assets_root: assets_root.to_path_buf(),
            mode,
            stream_handle,
            clips: Mutex::new(HashMap::new()),
            _shutdown: shutdown_tx,
        })
    }

    fn clip_bytes(&self, clip: &AudioRef) -> Result<Arc<Vec<u8>>, AudioError> {
        if let Some(bytes) = self.clips.lock().get(clip) {
            return Ok(Arc::clone(bytes));
        }

        let path = self.assets_root.join(clip.as_str());
        if !path.is_file() {
            return Err(AudioError::NotFound {
                path: path.display().to_string(),
            });
        }

        let bytes = std::fs::read(&path).map_err(|e| AudioError::LoadFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;
        tracing::debug!("Preloaded audio file: {} ({} bytes)", path.display(), bytes.len());

        let bytes = Arc::new(bytes);
        self.clips.lock().insert(clip.clone(), Arc::clone(&bytes));
        Ok(bytes)
    }
}

impl PlaybackBackend for RodioBackend {
    fn name(&self) -> &str {
        "system output"
    }

    fn preload(&self, clips: &[AudioRef]) -> usize {
        clips
            .iter()
            .filter(|clip| match self.clip_bytes(clip) {
                Ok(_) => true,
                Err(e) => {
                    tracing::warn!("Preload skipped: {}", e);
                    false
                }
            })
            .count()
    }

    fn load(&self, clip: &AudioRef) -> Result<Box<dyn Voice>, AudioError> {
        let bytes = self.clip_bytes(clip)?;

        // Note: We must clone here as rodio's Decoder requires owned data with 'static lifetime
        let decoder = Decoder::new(Cursor::new((*bytes).clone())).map_err(|e| {
            AudioError::DecodeFailed {
                path: clip.to_string(),
                source: Box::new(e),
            }
        })?;

        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| AudioError::PlaybackFailed(Box::new(e)))?;
        sink.set_volume(self.mode.volume);

        Ok(Box::new(RodioVoice {
            clip: clip.clone(),
            sink: Arc::new(sink),
            source: Some(self.mode.apply(decoder)),
        }))
    }
}

/// A decoded clip attached to its own sink
struct RodioVoice {
    clip: AudioRef,
    sink: Arc<Sink>,
    source: Option<Box<dyn Source<Item = i16> + Send>>,
}

impl Voice for RodioVoice {
    fn start(&mut self, on_finished: FinishCallback) -> Result<(), AudioError> {
        let source = self
            .source
            .take()
            .ok_or_else(|| AudioError::PlaybackFailed("voice already started".into()))?;

        self.sink.append(source);
        self.sink.play();

        let sink = Arc::clone(&self.sink);
        let clip = self.clip.clone();
        thread::Builder::new()
            .name("audio-clip".to_string())
            .spawn(move || {
                sink.sleep_until_end();
                tracing::debug!("Clip drained: {}", clip);
                on_finished();
            })
            .map_err(|e| AudioError::PlaybackFailed(Box::new(e)))?;

        Ok(())
    }

    fn stop(&mut self) {
        self.sink.stop();
    }
}

impl Drop for RodioVoice {
    fn drop(&mut self) {
        self.sink.stop();
    }
}
