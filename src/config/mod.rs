use serde::{Deserialize, Serialize};

/// Client settings for the fetcher. There is deliberately no file or
/// environment loading; each invocation runs with these in-code defaults
/// unless a library caller overrides them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub user_agent: String,
    /// Request timeout in seconds, applied by the HTTP client.
    pub timeout: u64,
    /// Language codes to try, in order. Within each code a manually created
    /// track beats an auto-generated one.
    pub preferred_languages: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
            timeout: 30,
            preferred_languages: vec!["en".to_string()],
        }
    }
}
