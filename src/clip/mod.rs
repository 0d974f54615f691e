//! Decoded Clips and Declared Formats
//!
//! [`AudioClip`] holds a fully decoded clip in memory as interleaved f32
//! samples. [`AudioFormat`] names the compressed codec a scratch file is
//! declared as; it selects the file extension and the decode hint only, no
//! transcoding is performed.

use crate::{DataClipError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Compressed audio codec a scratch file is declared as
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioFormat {
    /// Ogg Vorbis (default)
    #[default]
    OggVorbis,
    /// MPEG layer III
    Mp3,
    /// RIFF WAVE
    Wav,
    /// Free Lossless Audio Codec
    Flac,
}

impl AudioFormat {
    /// File extension used for scratch files of this format
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::OggVorbis => "ogg",
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Wav => "wav",
            AudioFormat::Flac => "flac",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for AudioFormat {
    type Err = DataClipError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ogg" | "oga" | "vorbis" | "ogg_vorbis" => Ok(AudioFormat::OggVorbis),
            "mp3" => Ok(AudioFormat::Mp3),
            "wav" | "wave" => Ok(AudioFormat::Wav),
            "flac" => Ok(AudioFormat::Flac),
            other => Err(DataClipError::ConfigError(format!(
                "unknown audio format '{other}' (expected ogg, mp3, wav or flac)"
            ))),
        }
    }
}

/// A decoded, playable audio clip held fully in memory
///
/// Samples are interleaved f32 values: for stereo the layout is `L R L R ...`.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    samples: Vec<f32>,
    sample_rate: u32,
    channels: u16,
}

impl AudioClip {
    /// Create a clip from interleaved samples
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: u16) -> Self {
        AudioClip {
            samples,
            sample_rate,
            channels,
        }
    }

    /// Interleaved samples
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Consume the clip, returning its interleaved samples
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of channels (1 = mono, 2 = stereo)
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Number of frames (samples per channel)
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            0
        } else {
            self.samples.len() / self.channels as usize
        }
    }

    /// Wall-clock playback length
    ///
    /// Zero when the clip holds no audio, including degenerate clips with a
    /// zero sample rate or zero channels.
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frames() as f64 / self.sample_rate as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_extensions() {
        assert_eq!(AudioFormat::OggVorbis.extension(), "ogg");
        assert_eq!(AudioFormat::Mp3.extension(), "mp3");
        assert_eq!(AudioFormat::Wav.extension(), "wav");
        assert_eq!(AudioFormat::Flac.extension(), "flac");
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("ogg".parse::<AudioFormat>().unwrap(), AudioFormat::OggVorbis);
        assert_eq!("FLAC".parse::<AudioFormat>().unwrap(), AudioFormat::Flac);
        assert!("aiff".parse::<AudioFormat>().is_err());
    }

    #[test]
    fn test_clip_duration() {
        // One second of stereo audio at 44.1kHz
        let clip = AudioClip::new(vec![0.0; 88_200], 44_100, 2);
        assert_eq!(clip.frames(), 44_100);
        assert_eq!(clip.duration(), Duration::from_secs(1));
    }

    #[test]
    fn test_empty_clip_has_zero_duration() {
        let clip = AudioClip::new(Vec::new(), 44_100, 2);
        assert!(clip.duration().is_zero());
    }

    #[test]
    fn test_degenerate_clip_has_zero_duration() {
        assert!(AudioClip::new(vec![0.0; 100], 0, 2).duration().is_zero());
        assert!(AudioClip::new(vec![0.0; 100], 44_100, 0).duration().is_zero());
    }
}
