pub mod error;
pub mod transcript;

pub use error::FetchError;
pub use transcript::{FetchedTranscript, TranscriptOutcome, TranscriptSegment};
