use thiserror::Error;

/// Why a transcript fetch failed.
///
/// The display strings of the first three variants are part of the CLI's JSON
/// contract; every other variant is reported through the `error` field verbatim.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Transcripts are disabled for this video")]
    TranscriptsDisabled,

    #[error("Video is unavailable")]
    VideoUnavailable,

    #[error("No transcript found for this video")]
    NoTranscriptFound,

    #[error("Video is age restricted, sign-in would be required to fetch its transcript")]
    AgeRestricted,

    #[error("YouTube is blocking requests from this client, most likely because of too many requests")]
    RequestBlocked,

    #[error("Video is unplayable: {reason}")]
    VideoUnplayable { reason: String },

    #[error("YouTube requires cookie consent and it could not be granted automatically")]
    ConsentRequired,

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
