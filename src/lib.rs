//! Data-URL Audio Clip Loader
//!
//! Decodes base64 audio payloads embedded in `data:` URLs, bridges them to
//! file-based media decoders through a uniquely named scratch file, attaches
//! the decoded clip to a caller-owned playback sink and deletes the scratch
//! file after a fixed delay.
//!
//! # Features
//! - Fail-fast data-URL validation with a distinct error per failure mode
//! - Padding repair for producers that omit trailing `=` characters
//! - Pluggable decode capability ([`ClipDecoder`]) and playback sink
//!   ([`PlaybackSink`]) seams
//! - Collision-resistant scratch file names, safe under concurrent loads
//! - Deferred best-effort cleanup that never affects playback correctness
//!
//! # Crate feature flags
//! - `playback` (opt-in): rodio-backed playback sink and file decoder
//!   (`sink::rodio`, `decode::rodio`), plus the demo CLI
//!
//! # Quick start
//! ## Decode a payload without playing it
//! ```
//! use dataclip::decode_data_url;
//! // Trailing padding may be omitted; it is repaired before decoding.
//! let bytes = decode_data_url("data:audio/ogg;base64,U09NRQ").unwrap();
//! assert_eq!(bytes, b"SOME");
//! ```
//!
//! ## Load and play
//! ```no_run
//! # #[cfg(feature = "playback")]
//! # async fn demo() -> dataclip::Result<()> {
//! use dataclip::decode::rodio::RodioFileDecoder;
//! use dataclip::sink::rodio::RodioPlaybackSink;
//! use dataclip::{AudioLoader, LoadOutcome};
//!
//! let loader = AudioLoader::default();
//! let sink = RodioPlaybackSink::new()?;
//! let outcome = loader
//!     .load_and_play("data:audio/ogg;base64,T2dnUw", &sink, &RodioFileDecoder, "intro")
//!     .await?;
//! if let LoadOutcome::Unavailable { reason } = outcome {
//!     eprintln!("clip unavailable: {reason}");
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Domain modules
pub mod clip; // Decoded clips and declared formats
pub mod data_url; // Data URL validation and payload decoding
pub mod decode; // Asynchronous media-decode capability
pub mod loader; // Single-shot load-and-play orchestration
pub mod scratch; // Scratch file persistence and deferred cleanup
pub mod sink; // Playback sink abstraction

/// Error types for data-URL audio loading operations
#[derive(thiserror::Error, Debug)]
pub enum DataClipError {
    /// Input is not a well-formed data URL
    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    /// Payload uses characters outside the base64 alphabet or carries
    /// more than two trailing padding characters
    #[error("Invalid base64 payload: {0}")]
    InvalidPayload(String),

    /// Payload passed validation but the base64 engine rejected it
    #[error("Base64 decode failed: {0}")]
    DecodeFailed(String),

    /// IO error from filesystem
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Decode transport reported success without producing a clip
    #[error("Decoder produced no clip: {0}")]
    MissingClip(String),

    /// Decoded clip carries no audio
    #[error("Decoded clip is empty: {0}")]
    EmptyClip(String),

    /// Audio device error
    #[error("Audio device error: {0}")]
    AudioDevice(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for DataClipError {
    /// Converts a String into `DataClipError::Other`.
    ///
    /// Convenience conversion for generic string errors; prefer the specific
    /// variant constructors where the failure mode is known.
    fn from(msg: String) -> Self {
        DataClipError::Other(msg)
    }
}

impl From<&str> for DataClipError {
    /// Converts a string slice into `DataClipError::Other`.
    fn from(msg: &str) -> Self {
        DataClipError::Other(msg.to_string())
    }
}

/// Result type for data-URL audio loading operations
pub type Result<T> = std::result::Result<T, DataClipError>;

// Public API exports
pub use clip::{AudioClip, AudioFormat};
pub use data_url::{decode_data_url, DataUrlParser};
pub use decode::{ClipDecoder, DecodeReply};
pub use loader::{AudioLoader, LoadOutcome, LoaderConfig, StartedPlayback};
pub use scratch::{schedule_cleanup, write_scratch, DEFAULT_CLEANUP_DELAY};
pub use sink::PlaybackSink;
