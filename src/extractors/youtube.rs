use crate::config::Config;
use crate::core::{FetchError, FetchedTranscript, TranscriptSegment};
use anyhow::anyhow;
use regex::Regex;
use reqwest::cookie::Jar;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

/// Fetches transcript tracks straight from YouTube's watch page data.
///
/// The watch page embeds a `ytInitialPlayerResponse` object which carries the
/// caption track list; each track points at a timedtext URL that serves the
/// actual segments.
pub struct TranscriptFetcher {
    client: reqwest::Client,
    cookies: Arc<Jar>,
    config: Config,
}

/// One entry of `playerCaptionsTracklistRenderer.captionTracks`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    #[serde(default = "default_language_code")]
    language_code: String,
    #[serde(default)]
    kind: Option<String>,
}

impl CaptionTrack {
    /// Whether the track came out of speech recognition rather than a human.
    fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }
}

fn default_language_code() -> String {
    "en".to_string()
}

impl TranscriptFetcher {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        // Cookie jar is shared with the client so the consent cookie set on a
        // retry is actually sent.
        let cookies = Arc::new(Jar::default());
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(std::time::Duration::from_secs(config.timeout))
            .cookie_provider(cookies.clone())
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            cookies,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetches the transcript for `video_id`, preferring the configured
    /// languages (just "en" by default). The ID is used verbatim; it is never
    /// validated or extracted from a URL.
    pub async fn fetch(&self, video_id: &str) -> Result<FetchedTranscript, FetchError> {
        tracing::info!("Fetching transcript for video {}", video_id);

        let mut html = self.fetch_watch_page(video_id).await?;

        if is_consent_page(&html) {
            tracing::debug!("Watch page is a consent interstitial, retrying with consent cookie");
            self.create_consent_cookie(&html)?;
            html = self.fetch_watch_page(video_id).await?;
            if is_consent_page(&html) {
                return Err(FetchError::ConsentRequired);
            }
        }

        let player_response = extract_player_response(&html)?;
        check_playability(&player_response)?;

        let tracks = caption_tracks(&player_response)?;
        tracing::debug!("Found {} caption tracks", tracks.len());

        let track = select_track(&tracks, &self.config.preferred_languages)?;
        tracing::debug!(
            "Selected {} track for language {}",
            if track.is_generated() { "generated" } else { "manual" },
            track.language_code
        );

        let segments = self.fetch_caption_segments(track).await?;
        tracing::debug!("Parsed {} transcript segments", segments.len());

        Ok(FetchedTranscript {
            video_id: video_id.to_string(),
            language_code: track.language_code.clone(),
            is_generated: track.is_generated(),
            segments,
        })
    }

    async fn fetch_watch_page(&self, video_id: &str) -> Result<String, FetchError> {
        let watch_url = format!("https://www.youtube.com/watch?v={}", video_id);
        let response = self
            .client
            .get(&watch_url)
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header("Accept-Language", "en-US,en;q=0.5")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!("Failed to fetch watch page: HTTP {}", response.status()).into());
        }

        let html = response.text().await?;
        if html.is_empty() {
            return Err(anyhow!("Empty response from YouTube").into());
        }

        Ok(html)
    }

    /// The consent form carries the value YouTube expects back in the CONSENT
    /// cookie; mirror it into the jar for the retry.
    fn create_consent_cookie(&self, html: &str) -> Result<(), FetchError> {
        let value = Regex::new(r#"name="v" value="(.*?)""#)
            .ok()
            .and_then(|re| re.captures(html))
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or(FetchError::ConsentRequired)?;

        let origin = Url::parse("https://www.youtube.com")
            .map_err(|e| anyhow!("Invalid consent cookie origin: {}", e))?;
        self.cookies.add_cookie_str(
            &format!("CONSENT=YES+{}; Domain=.youtube.com; Path=/", value),
            &origin,
        );

        Ok(())
    }

    async fn fetch_caption_segments(
        &self,
        track: &CaptionTrack,
    ) -> Result<Vec<TranscriptSegment>, FetchError> {
        let url = caption_url(&track.base_url)?;

        let response = self
            .client
            .get(url)
            .header("Accept-Language", "en-US,en;q=0.5")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!("Failed to fetch caption track: HTTP {}", response.status()).into());
        }

        let payload = response.text().await?;
        parse_caption_events(&payload)
    }
}

impl Default for TranscriptFetcher {
    fn default() -> Self {
        Self::new()
    }
}

fn is_consent_page(html: &str) -> bool {
    html.contains(r#"action="https://consent.youtube.com/s""#)
}

/// Pulls the `ytInitialPlayerResponse` object out of a watch page.
///
/// The object is embedded as a JavaScript literal; these patterns cover the
/// shapes it shows up in. Parsing starts at the opening brace and reads a
/// single JSON value, so whatever script text follows is ignored.
fn extract_player_response(html: &str) -> Result<Value, FetchError> {
    let patterns = [
        r"var\s+ytInitialPlayerResponse\s*=\s*\{",
        r"ytInitialPlayerResponse\s*=\s*\{",
        r#""ytInitialPlayerResponse":\s*\{"#,
    ];

    for pattern in &patterns {
        if let Ok(re) = Regex::new(pattern) {
            if let Some(found) = re.find(html) {
                let start = found.end() - 1;
                let mut values = serde_json::Deserializer::from_str(&html[start..]).into_iter::<Value>();
                match values.next() {
                    Some(Ok(parsed)) => return Ok(parsed),
                    _ => continue,
                }
            }
        }
    }

    // A page with no player data at all is either a bot check or a video that
    // simply does not exist anymore.
    if html.contains(r#"class="g-recaptcha""#) {
        return Err(FetchError::RequestBlocked);
    }

    Err(FetchError::VideoUnavailable)
}

fn check_playability(player_response: &Value) -> Result<(), FetchError> {
    let playability = match player_response.get("playabilityStatus") {
        Some(playability) => playability,
        None => return Ok(()),
    };

    let status = playability
        .get("status")
        .and_then(|v| v.as_str())
        .unwrap_or("OK");
    let reason = playability
        .get("reason")
        .and_then(|v| v.as_str())
        .unwrap_or("");

    match status {
        "OK" => Ok(()),
        "ERROR" => Err(FetchError::VideoUnavailable),
        "LOGIN_REQUIRED" => {
            if reason.contains("bot") {
                return Err(FetchError::RequestBlocked);
            }
            if reason.contains("age") || reason.contains("inappropriate") {
                return Err(FetchError::AgeRestricted);
            }
            Err(FetchError::VideoUnplayable {
                reason: unplayable_reason(reason),
            })
        }
        _ => Err(FetchError::VideoUnplayable {
            reason: unplayable_reason(reason),
        }),
    }
}

fn unplayable_reason(reason: &str) -> String {
    if reason.is_empty() {
        "no reason given".to_string()
    } else {
        reason.to_string()
    }
}

/// Reads the caption track list out of the player response. A video with
/// captions switched off has no captions section at all, which is a different
/// condition than a track list that lacks the requested language.
fn caption_tracks(player_response: &Value) -> Result<Vec<CaptionTrack>, FetchError> {
    let renderer = player_response
        .get("captions")
        .and_then(|v| v.get("playerCaptionsTracklistRenderer"))
        .ok_or(FetchError::TranscriptsDisabled)?;

    let tracks = renderer
        .get("captionTracks")
        .ok_or(FetchError::TranscriptsDisabled)?;

    serde_json::from_value(tracks.clone())
        .map_err(|e| anyhow!("Could not parse caption track list: {}", e).into())
}

/// Applies the language preference: for each requested code, a manually
/// created track wins over a speech-recognition one. Codes match exactly;
/// "en" does not cover "en-GB".
fn select_track<'a>(
    tracks: &'a [CaptionTrack],
    languages: &[String],
) -> Result<&'a CaptionTrack, FetchError> {
    for language in languages {
        let manual = tracks
            .iter()
            .find(|track| !track.is_generated() && track.language_code == *language);
        if let Some(track) = manual {
            return Ok(track);
        }

        let generated = tracks
            .iter()
            .find(|track| track.is_generated() && track.language_code == *language);
        if let Some(track) = generated {
            return Ok(track);
        }
    }

    Err(FetchError::NoTranscriptFound)
}

/// The track's base URL with the JSON wire format selected.
fn caption_url(base_url: &str) -> Result<Url, FetchError> {
    let mut url =
        Url::parse(base_url).map_err(|e| anyhow!("Invalid caption track URL: {}", e))?;
    url.query_pairs_mut().append_pair("fmt", "json3");
    Ok(url)
}

#[derive(Debug, Deserialize)]
struct CaptionPayload {
    #[serde(default)]
    events: Vec<CaptionEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionEvent {
    #[serde(default)]
    t_start_ms: u64,
    #[serde(default)]
    d_duration_ms: u64,
    #[serde(default)]
    segs: Vec<CaptionSeg>,
}

#[derive(Debug, Deserialize)]
struct CaptionSeg {
    #[serde(default)]
    utf8: String,
}

/// Turns a `fmt=json3` payload into ordered transcript segments. Events with
/// no caption text (styling windows, bare newlines) are skipped.
fn parse_caption_events(payload: &str) -> Result<Vec<TranscriptSegment>, FetchError> {
    let payload: CaptionPayload = serde_json::from_str(payload)
        .map_err(|e| anyhow!("Could not parse caption data: {}", e))?;

    let mut segments = Vec::new();
    for event in payload.events {
        let text = event
            .segs
            .iter()
            .map(|seg| seg.utf8.trim())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if text.is_empty() {
            continue;
        }

        segments.push(TranscriptSegment {
            text,
            start: event.t_start_ms as f64 / 1000.0,
            duration: event.d_duration_ms as f64 / 1000.0,
        });
    }

    Ok(segments)
}
