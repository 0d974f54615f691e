//! Single-Shot Load-and-Play Orchestration
//!
//! [`AudioLoader`] ties the stages together: validate and decode the data
//! URL, write the scratch file, await the decode service, attach the clip to
//! the sink, start playback and schedule the deferred cleanup. One logical
//! flow per invocation; concurrent invocations only share the filesystem
//! namespace, which the collision-resistant scratch names keep conflict-free.

use crate::clip::AudioFormat;
use crate::data_url::DataUrlParser;
use crate::decode::{ClipDecoder, DecodeReply};
use crate::scratch;
use crate::sink::PlaybackSink;
use crate::{DataClipError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Configuration for [`AudioLoader`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Codec the decoded payload is declared as
    pub format: AudioFormat,
    /// Milliseconds between play start and scratch file deletion
    pub cleanup_delay_ms: u64,
    /// Directory for scratch files; the system temp directory when unset
    pub scratch_dir: Option<PathBuf>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig {
            format: AudioFormat::OggVorbis,
            cleanup_delay_ms: scratch::DEFAULT_CLEANUP_DELAY.as_millis() as u64,
            scratch_dir: None,
        }
    }
}

impl LoaderConfig {
    /// Default configuration with the given declared codec
    pub fn for_format(format: AudioFormat) -> Self {
        LoaderConfig {
            format,
            ..LoaderConfig::default()
        }
    }

    /// Cleanup delay as a [`Duration`]
    pub fn cleanup_delay(&self) -> Duration {
        Duration::from_millis(self.cleanup_delay_ms)
    }
}

/// How a load request concluded when it did not raise
#[derive(Debug)]
pub enum LoadOutcome {
    /// Clip attached to the sink, playback started, cleanup scheduled
    Started(StartedPlayback),
    /// The decode transport reported failure; logged, never raised. The
    /// sink is untouched and no playback happens.
    Unavailable {
        /// Reason given by the decode transport
        reason: String,
    },
}

/// Details of a successfully started playback
#[derive(Debug)]
pub struct StartedPlayback {
    /// Scratch file the clip was decoded from; deleted after the delay
    pub scratch_path: PathBuf,
    /// Duration of the clip handed to the sink
    pub clip_duration: Duration,
    /// Handle of the detached cleanup task
    pub cleanup: JoinHandle<()>,
}

/// Loads audio clips from data URLs and plays them through a sink
#[derive(Debug, Clone, Default)]
pub struct AudioLoader {
    config: LoaderConfig,
}

impl AudioLoader {
    /// Create a loader with the given configuration
    pub fn new(config: LoaderConfig) -> Self {
        AudioLoader { config }
    }

    /// The loader's configuration
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Validate, decode and play the audio payload of `data_url`.
    ///
    /// On success the sink holds a ready clip, playback has started and the
    /// scratch file is scheduled for deletion after the configured delay.
    /// `label` is an opaque diagnostic identifier carried into every log
    /// line; it has no behavioral meaning.
    ///
    /// Two failure channels exist and stay separate:
    /// - malformed input, I/O trouble and invalid decoder output raise a
    ///   [`DataClipError`];
    /// - a transport-level decode failure is logged and returned as
    ///   [`LoadOutcome::Unavailable`], leaving the sink untouched.
    pub async fn load_and_play<S, D>(
        &self,
        data_url: &str,
        sink: &S,
        decoder: &D,
        label: &str,
    ) -> Result<LoadOutcome>
    where
        S: PlaybackSink + ?Sized,
        D: ClipDecoder + ?Sized,
    {
        // No file exists yet; every failure up to here leaves no trace.
        let bytes = DataUrlParser::decode(data_url)?;
        tracing::info!("[{}] decoded {} bytes from data URL", label, bytes.len());

        let path = scratch::write_scratch(
            &bytes,
            self.config.format,
            self.config.scratch_dir.as_deref(),
        )?;
        tracing::debug!("[{}] wrote scratch file '{}'", label, path.display());

        match decoder.decode(&path, self.config.format).await {
            DecodeReply::Unavailable(reason) => {
                // Content being unavailable is an expected condition at this
                // layer; the caller sees a no-op, not an error. The scratch
                // file stays behind: cleanup is scheduled only once playback
                // has started.
                tracing::error!("[{}] decode transport failed: {}", label, reason);
                Ok(LoadOutcome::Unavailable { reason })
            }
            DecodeReply::Done(None) => Err(DataClipError::MissingClip(format!(
                "decoder reported success for '{}' but produced no clip",
                path.display()
            ))),
            DecodeReply::Done(Some(clip)) => {
                if clip.duration().is_zero() {
                    // Some decoders hand back an empty clip instead of
                    // reporting failure; starting playback would be silent.
                    return Err(DataClipError::EmptyClip(format!(
                        "decoded clip from '{}' has zero duration",
                        path.display()
                    )));
                }

                let clip_duration = clip.duration();
                sink.assign_clip(clip);
                sink.play();
                tracing::info!(
                    "[{}] playback started ({:?} clip, scratch '{}')",
                    label,
                    clip_duration,
                    path.display()
                );

                let cleanup =
                    scratch::schedule_cleanup(path.clone(), self.config.cleanup_delay(), label);

                Ok(LoadOutcome::Started(StartedPlayback {
                    scratch_path: path,
                    clip_duration,
                    cleanup,
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoaderConfig::default();
        assert_eq!(config.format, AudioFormat::OggVorbis);
        assert_eq!(config.cleanup_delay(), scratch::DEFAULT_CLEANUP_DELAY);
        assert!(config.scratch_dir.is_none());
    }

    #[test]
    fn test_config_for_format() {
        let config = LoaderConfig::for_format(AudioFormat::Flac);
        assert_eq!(config.format, AudioFormat::Flac);
        assert_eq!(config.cleanup_delay_ms, 5_000);
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = LoaderConfig {
            format: AudioFormat::Mp3,
            cleanup_delay_ms: 250,
            scratch_dir: Some(PathBuf::from("/tmp/clips")),
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: LoaderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.format, AudioFormat::Mp3);
        assert_eq!(back.cleanup_delay_ms, 250);
        assert_eq!(back.scratch_dir, config.scratch_dir);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: LoaderConfig = serde_json::from_str(r#"{"format":"flac"}"#).unwrap();
        assert_eq!(config.format, AudioFormat::Flac);
        assert_eq!(config.cleanup_delay_ms, 5_000);
    }
}
