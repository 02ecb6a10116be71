//! Error taxonomy for the generation engine.
//!
//! Three failure classes cross the public API:
//! - `InvalidSequence` — the input contains characters the language's
//!   inventory does not cover, or no segmentation exists for it.
//! - `UnknownLanguage` — no model is loaded for the requested identifier.
//! - `ResourceUnavailable` — a language bundle is missing or malformed at
//!   load time. Not retryable from inside the engine.
//!
//! Running out of time during a search is *not* an error; see
//! `scheduler::SearchStatus`.

/// Error type shared by all engine operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input contains characters outside the language inventory, or the
    /// inventory cannot cover the sequence.
    #[error("invalid sequence {0:?} for this language")]
    InvalidSequence(String),

    /// No language model loaded under this identifier.
    #[error("unknown language plugin {0:?}")]
    UnknownLanguage(String),

    /// Language bundle missing or malformed. Remediation (download,
    /// repair) is outside the engine.
    #[error("language bundle for {id:?} unavailable: {reason}")]
    ResourceUnavailable { id: String, reason: String },
}

impl Error {
    pub(crate) fn resource<R: Into<String>>(id: &str, reason: R) -> Self {
        Error::ResourceUnavailable {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
