pub mod cli;
pub mod config;
pub mod core;
pub mod extractors;

pub use self::core::{FetchError, FetchedTranscript, TranscriptOutcome, TranscriptSegment};
pub use self::extractors::TranscriptFetcher;
