//! Audio playback for downloaded episode and answer clips.
//!
//! One [`Playback`] wraps one rodio sink; the app state keeps at most one
//! alive at a time, so the main episode and an answer clip can never sound
//! over each other.

use anyhow::{Context, Result};
use rodio::{Decoder, OutputStream, Sink};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

pub struct Playback {
    _stream: OutputStream,
    sink: Sink,
}

impl Playback {
    /// Open the clip at `path`, optionally seeking before starting. Seek
    /// failures are logged and playback continues from the start of the clip.
    pub fn load(path: &Path, start_at: Duration, paused: bool) -> Result<Self> {
        let (_stream, handle) = OutputStream::try_default().context("Opening audio output")?;
        let sink = Sink::try_new(&handle).context("Creating audio sink")?;
        let file = File::open(path)
            .with_context(|| format!("Opening audio clip {}", path.display()))?;
        let source = Decoder::new(BufReader::new(file)).context("Decoding audio clip")?;
        sink.append(source);

        if start_at > Duration::ZERO {
            if let Err(err) = sink.try_seek(start_at) {
                warn!(
                    offset_secs = start_at.as_secs_f64(),
                    "Could not seek clip, playing from the start: {err:?}"
                );
            }
        }
        if paused {
            sink.pause();
        } else {
            sink.play();
        }
        debug!(
            path = %path.display(),
            offset_secs = start_at.as_secs_f64(),
            paused,
            "Loaded audio clip"
        );
        Ok(Playback { _stream, sink })
    }

    pub fn pause(&self) {
        self.sink.pause();
    }

    pub fn play(&self) {
        self.sink.play();
    }

    pub fn is_paused(&self) -> bool {
        self.sink.is_paused()
    }

    /// Current playback position within the clip.
    pub fn position(&self) -> Duration {
        self.sink.get_pos()
    }

    /// True once the clip has played to its natural end.
    pub fn is_finished(&self) -> bool {
        self.sink.empty()
    }

    pub fn stop(self) {
        self.sink.stop();
        // stream dropped automatically
    }
}
