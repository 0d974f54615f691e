//! Playback Sink Abstraction
//!
//! [`PlaybackSink`] is the seam between the loader and the audio output.
//! The loader only writes to a sink: it assigns the decoded clip and starts
//! playback. It never constructs, owns or destroys one. The crate ships a
//! rodio-backed sink behind the `playback` feature; custom outputs (test
//! recorders, file writers) implement the trait directly.

use crate::clip::AudioClip;

/// An externally owned audio output that can hold and play one clip
///
/// Methods take `&self`; implementations provide interior mutability for
/// their clip slot.
pub trait PlaybackSink {
    /// Replace the sink's current clip with `clip`
    fn assign_clip(&self, clip: AudioClip);

    /// Start playback of the assigned clip
    fn play(&self);
}

/// Default rodio-based playback sink
#[cfg(feature = "playback")]
pub mod rodio {
    use super::PlaybackSink;
    use crate::clip::AudioClip;
    use crate::{DataClipError, Result};
    use parking_lot::Mutex;
    use rodio::buffer::SamplesBuffer;
    use rodio::{OutputStream, Sink};

    /// Plays assigned clips on the system's default audio device
    ///
    /// Holds the output stream for the lifetime of the sink; dropping the
    /// sink stops playback.
    pub struct RodioPlaybackSink {
        _stream: OutputStream,
        sink: Sink,
        pending: Mutex<Option<AudioClip>>,
    }

    impl RodioPlaybackSink {
        /// Open the default audio device and create an idle sink
        pub fn new() -> Result<Self> {
            let (stream, stream_handle) = OutputStream::try_default().map_err(|e| {
                DataClipError::AudioDevice(format!("failed to open output stream: {e}"))
            })?;

            let sink = Sink::try_new(&stream_handle).map_err(|e| {
                DataClipError::AudioDevice(format!("failed to create audio sink: {e}"))
            })?;

            Ok(RodioPlaybackSink {
                _stream: stream,
                sink,
                pending: Mutex::new(None),
            })
        }

        /// Block the current thread until the queued audio has finished
        pub fn wait_until_end(&self) {
            self.sink.sleep_until_end();
        }
    }

    impl PlaybackSink for RodioPlaybackSink {
        fn assign_clip(&self, clip: AudioClip) {
            *self.pending.lock() = Some(clip);
        }

        fn play(&self) {
            // The assigned clip is queued on first play; rodio expects a
            // non-empty buffer with non-zero rate and channel count.
            if let Some(clip) = self.pending.lock().take() {
                let channels = clip.channels();
                let sample_rate = clip.sample_rate();
                let buffer = SamplesBuffer::new(channels, sample_rate, clip.into_samples());
                self.sink.append(buffer);
            }
            self.sink.play();
        }
    }
}
