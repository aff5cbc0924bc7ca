use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, info, warn};

use crate::day::Day;
use crate::error::DayError;
use crate::parser::extract::STATE_BLOB_MARKER;

pub const CHALLENGE_BASE_URL: &str = "https://adventjs.dev/challenges";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Upper bound on reading the body before settling for what arrived.
const MARKER_WAIT: Duration = Duration::from_secs(20);

/// Either marker means the page carries challenge content.
const CONTENT_MARKERS: [&str; 2] = [STATE_BLOB_MARKER, "challenge-description"];

pub fn challenge_url(base_url: &str, day: Day, year: &str) -> String {
    format!("{}/{}/{}", base_url.trim_end_matches('/'), year, day)
}

/// Retrieves raw challenge pages over HTTP.
pub struct PageFetcher {
    client: Client,
    base_url: String,
}

impl PageFetcher {
    pub fn new(base_url: Option<&str>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("adventjs-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(PageFetcher {
            client,
            base_url: base_url.unwrap_or(CHALLENGE_BASE_URL).to_string(),
        })
    }

    pub fn url_for(&self, day: Day, year: &str) -> String {
        challenge_url(&self.base_url, day, year)
    }

    pub async fn fetch_raw_content(&self, day: Day, year: &str) -> Result<String, DayError> {
        let url = self.url_for(day, year);
        let fail = |reason: String| DayError::Fetch {
            url: url.clone(),
            reason,
        };

        info!("Fetching challenge page: {}", url);
        let mut response = self.client.get(&url).send().await.map_err(|e| fail(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fail(format!("HTTP {}", status)));
        }

        let deadline = Instant::now() + MARKER_WAIT;
        let mut body: Vec<u8> = Vec::new();
        let complete = loop {
            match timeout_at(deadline, response.chunk()).await {
                Ok(Ok(Some(chunk))) => body.extend_from_slice(&chunk),
                Ok(Ok(None)) => break true,
                Ok(Err(e)) if body.is_empty() => return Err(fail(e.to_string())),
                Ok(Err(e)) => {
                    warn!(day = day.number(), "body read interrupted: {}", e);
                    break false;
                }
                Err(_) => break false,
            }
        };

        if body.is_empty() {
            return Err(fail("empty response body".to_string()));
        }

        let text = String::from_utf8_lossy(&body).into_owned();
        if !complete {
            warn!(day = day.number(), bytes = text.len(), "page did not finish loading; using partial content");
        }
        if !CONTENT_MARKERS.iter().any(|m| text.contains(m)) {
            warn!(day = day.number(), "no challenge marker in page; extraction will likely fail");
        }

        debug!(day = day.number(), bytes = text.len(), "page fetched");
        Ok(text)
    }
}
