//! Catalog HTTP client.
//!
//! Implements the Netease Cloud Music wire contract: the song-search POST and
//! the lyric-fetch GET. The [`CatalogClient`] trait is the seam the pipeline
//! depends on, so tests drive the orchestration with an in-memory fake
//! instead of the network.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use thiserror::Error;

use crate::config::Config;
use crate::models::{LyricPayload, SearchEnvelope, SongCandidate};

const SEARCH_URL: &str = "https://music.163.com/api/search/get/";
const LYRIC_URL: &str = "https://music.163.com/api/song/lyric";
const REFERER: &str = "https://music.163.com/";
const HOST: &str = "music.163.com";
/// Browser identity; the catalog serves the web API only to browser-looking
/// clients.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/84.0.4147.89 Safari/537.36";
/// Explicitly empty tracking cookie. Without the override the catalog
/// personalizes search results per tracking id, which skews candidate order
/// between runs.
const COOKIE_OVERRIDE: &str = "NMTID=";
/// Success code inside the catalog's JSON envelope (distinct from HTTP 200).
const CATALOG_OK: i64 = 200;

/// Transport/parse failures from the catalog.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed with status: {0}")]
    Http(reqwest::StatusCode),
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error("malformed lyric payload: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Catalog operations the pipeline needs. One search per pass, one lyric
/// fetch per accepted candidate.
#[async_trait]
pub trait CatalogClient {
    /// Search the catalog for songs matching `query`.
    ///
    /// `Ok(None)` is a normal outcome covering both "no results" and a
    /// malformed or non-success envelope; only transport failures are
    /// errors. Retry policy, if any, belongs to the caller.
    async fn search(&self, query: &str, limit: u32)
        -> Result<Option<Vec<SongCandidate>>, ClientError>;

    /// Fetch the lyric payload for one song id. Requests plain, unencrypted
    /// lyric text and no karaoke timing data.
    async fn lyric(&self, song_id: i64) -> Result<LyricPayload, ClientError>;
}

/// Production client over `reqwest`.
pub struct NeteaseClient {
    http: reqwest::Client,
}

impl NeteaseClient {
    /// Build a client with the configured per-request timeout and the fixed
    /// browser identity headers.
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl CatalogClient for NeteaseClient {
    async fn search(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Option<Vec<SongCandidate>>, ClientError> {
        let response = self
            .http
            .post(SEARCH_URL)
            .header("Referer", REFERER)
            .header("Host", HOST)
            .header("Cookie", COOKIE_OVERRIDE)
            .form(&[
                ("s", query),
                ("type", "1"),
                ("limit", &limit.to_string()),
                ("offset", "0"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Http(status));
        }

        let body = response.text().await?;
        let envelope: SearchEnvelope = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(err) => {
                // Absence of matches, not a fault: the catalog sometimes
                // answers odd queries with non-JSON bodies.
                debug!("search returned unparseable envelope: {err}");
                return Ok(None);
            }
        };

        if envelope.code != CATALOG_OK {
            debug!("search envelope code {} for query {query:?}", envelope.code);
            return Ok(None);
        }

        Ok(envelope.result.and_then(|r| r.songs))
    }

    async fn lyric(&self, song_id: i64) -> Result<LyricPayload, ClientError> {
        let url = format!("{LYRIC_URL}?os=pc&id={song_id}&lv=-1&kv=-1&tv=-1");
        let response = self
            .http
            .get(&url)
            .header("Referer", REFERER)
            .header("Cookie", COOKIE_OVERRIDE)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Http(status));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Build the search term for a pass: title plus artist on the exact pass,
/// title alone on the loose fallback.
pub fn search_term(title: &str, artist: &str, exact: bool) -> String {
    if exact && !artist.is_empty() {
        format!("{title} {artist}")
    } else {
        title.to_string()
    }
}
