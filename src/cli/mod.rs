use clap::Parser;

use crate::core::TranscriptOutcome;
use crate::extractors::TranscriptFetcher;

#[derive(Parser)]
#[command(name = "yt-transcript-fetcher")]
#[command(about = "Fetch the transcript of a YouTube video as JSON")]
#[command(version)]
pub struct Cli {
    /// Video ID of the video to fetch the transcript for
    #[arg(value_name = "VIDEO_ID", allow_hyphen_values = true)]
    pub video_id: String,
}

impl Cli {
    /// Runs the fetch and returns the outcome to print. Fetch failures are
    /// part of the outcome, never an `Err`.
    pub async fn run(&self) -> TranscriptOutcome {
        let fetcher = TranscriptFetcher::new();
        TranscriptOutcome::from(fetcher.fetch(&self.video_id).await)
    }
}

/// The outcome printed for malformed invocations (wrong argument count).
pub fn usage_error() -> TranscriptOutcome {
    TranscriptOutcome::failure(format!("Usage: {} <videoId>", env!("CARGO_PKG_NAME")))
}
