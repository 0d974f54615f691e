//! Asynchronous Media-Decode Capability
//!
//! [`ClipDecoder`] abstracts the external service that turns a scratch file
//! into a playable clip. The caller suspends on the request; the reply is a
//! clip or a transport-level failure reason. Transport failures are never
//! raised as errors, the loader logs and swallows them.

use crate::clip::{AudioClip, AudioFormat};
use async_trait::async_trait;
use std::path::Path;

/// Reply to a decode request
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeReply {
    /// The transport completed; the decoded clip, when the backend produced
    /// one. Some backends report success while yielding no clip at all.
    Done(Option<AudioClip>),
    /// Transport-level failure (content missing, device or codec refusal)
    Unavailable(String),
}

/// Capability that decodes a local file into a playable clip
///
/// Implementations are handed the scratch file path together with the codec
/// the contents are declared as. The file is read exactly once.
#[async_trait]
pub trait ClipDecoder: Send + Sync {
    /// Decode the file at `path`, treating its contents as `format`
    async fn decode(&self, path: &Path, format: AudioFormat) -> DecodeReply;
}

/// Rodio-backed file decoder
#[cfg(feature = "playback")]
pub mod rodio {
    use super::{ClipDecoder, DecodeReply};
    use crate::clip::{AudioClip, AudioFormat};
    use async_trait::async_trait;
    use rodio::{Decoder, Source};
    use std::fs::File;
    use std::io::BufReader;
    use std::path::{Path, PathBuf};

    /// Decodes scratch files with rodio's bundled codec implementations
    ///
    /// Decoding runs on a blocking task so the async caller stays suspended
    /// without tying up a runtime worker.
    pub struct RodioFileDecoder;

    fn decode_file(path: &Path, format: AudioFormat) -> std::result::Result<AudioClip, String> {
        let file = File::open(path)
            .map_err(|e| format!("failed to open '{}': {}", path.display(), e))?;
        let reader = BufReader::new(file);

        let decoder = match format {
            AudioFormat::OggVorbis => Decoder::new_vorbis(reader),
            AudioFormat::Mp3 => Decoder::new_mp3(reader),
            AudioFormat::Wav => Decoder::new_wav(reader),
            AudioFormat::Flac => Decoder::new_flac(reader),
        }
        .map_err(|e| format!("decoder rejected '{}': {}", path.display(), e))?;

        let sample_rate = decoder.sample_rate();
        let channels = decoder.channels();
        let samples: Vec<f32> = decoder.convert_samples().collect();

        Ok(AudioClip::new(samples, sample_rate, channels))
    }

    #[async_trait]
    impl ClipDecoder for RodioFileDecoder {
        async fn decode(&self, path: &Path, format: AudioFormat) -> DecodeReply {
            let path: PathBuf = path.to_path_buf();
            match tokio::task::spawn_blocking(move || decode_file(&path, format)).await {
                Ok(Ok(clip)) => DecodeReply::Done(Some(clip)),
                Ok(Err(reason)) => DecodeReply::Unavailable(reason),
                Err(e) => DecodeReply::Unavailable(format!("decode task failed: {e}")),
            }
        }
    }
}
