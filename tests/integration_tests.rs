use anyhow::Result;
use yt_transcript_fetcher::config::Config;
use yt_transcript_fetcher::core::{FetchError, FetchedTranscript, TranscriptOutcome, TranscriptSegment};
use yt_transcript_fetcher::TranscriptFetcher;

fn segment(text: &str, start: f64, duration: f64) -> TranscriptSegment {
    TranscriptSegment {
        text: text.to_string(),
        start,
        duration,
    }
}

#[tokio::test]
async fn test_fetcher_initialization() -> Result<()> {
    let fetcher = TranscriptFetcher::new();

    // Default language preference is exactly ["en"]; there is no wider
    // fallback list.
    assert_eq!(fetcher.config().preferred_languages, vec!["en".to_string()]);
    assert_eq!(fetcher.config().timeout, 30);

    Ok(())
}

#[tokio::test]
async fn test_fetcher_with_custom_config() -> Result<()> {
    let config = Config {
        preferred_languages: vec!["de".to_string(), "en".to_string()],
        ..Config::default()
    };
    let fetcher = TranscriptFetcher::with_config(config);

    assert_eq!(
        fetcher.config().preferred_languages,
        vec!["de".to_string(), "en".to_string()]
    );

    Ok(())
}

#[tokio::test]
async fn test_transcript_creation() -> Result<()> {
    let transcript = FetchedTranscript {
        video_id: "dQw4w9WgXcQ".to_string(),
        language_code: "en".to_string(),
        is_generated: false,
        segments: vec![
            segment("Never gonna give you up", 0.0, 2.4),
            segment("Never gonna let you down", 2.4, 2.2),
        ],
    };

    assert_eq!(transcript.video_id, "dQw4w9WgXcQ");
    assert_eq!(transcript.segments.len(), 2);
    assert_eq!(
        transcript.text(),
        "Never gonna give you up Never gonna let you down"
    );

    Ok(())
}

#[tokio::test]
async fn test_text_joining_is_order_preserving() -> Result<()> {
    let transcript = FetchedTranscript {
        video_id: "abc".to_string(),
        language_code: "en".to_string(),
        is_generated: true,
        segments: vec![
            segment("a", 0.0, 1.0),
            segment("b", 1.0, 1.0),
            segment("c", 2.0, 1.0),
        ],
    };

    assert_eq!(transcript.text(), "a b c");

    Ok(())
}

#[tokio::test]
async fn test_error_messages_match_the_contract() -> Result<()> {
    let cases = vec![
        (
            FetchError::TranscriptsDisabled,
            "Transcripts are disabled for this video",
        ),
        (FetchError::VideoUnavailable, "Video is unavailable"),
        (
            FetchError::NoTranscriptFound,
            "No transcript found for this video",
        ),
    ];

    for (err, expected) in cases {
        assert_eq!(err.to_string(), expected);
    }

    Ok(())
}

#[tokio::test]
async fn test_success_outcome_serialization() -> Result<()> {
    let transcript = FetchedTranscript {
        video_id: "abc".to_string(),
        language_code: "en".to_string(),
        is_generated: false,
        segments: vec![segment("hello", 0.0, 1.0), segment("world", 1.0, 1.0)],
    };

    let result: Result<FetchedTranscript, FetchError> = Ok(transcript);
    let outcome = TranscriptOutcome::from(result);
    assert!(outcome.is_success());
    assert_eq!(
        outcome.to_json(),
        r#"{"success":true,"transcript":"hello world","language":"en"}"#
    );

    Ok(())
}

#[tokio::test]
async fn test_failure_outcome_serialization() -> Result<()> {
    let result: Result<FetchedTranscript, FetchError> = Err(FetchError::VideoUnavailable);
    let outcome = TranscriptOutcome::from(result);
    assert!(!outcome.is_success());
    assert_eq!(
        outcome.to_json(),
        r#"{"success":false,"error":"Video is unavailable"}"#
    );

    Ok(())
}

#[tokio::test]
async fn test_unknown_failures_are_reported_verbatim() -> Result<()> {
    let result: Result<FetchedTranscript, FetchError> =
        Err(FetchError::Other(anyhow::anyhow!("connection reset by peer")));
    let outcome = TranscriptOutcome::from(result);
    assert_eq!(
        outcome.to_json(),
        r#"{"success":false,"error":"connection reset by peer"}"#
    );

    Ok(())
}
