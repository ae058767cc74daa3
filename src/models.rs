//! Core data models for lyric retrieval.
//!
//! This module contains the caller-supplied query type, the catalog's search
//! and lyric wire envelopes, and the assembled output record handed to the
//! host sink.

use serde::Deserialize;

// ============================================================================
// Caller Input
// ============================================================================

/// Caller-supplied track metadata, verbatim from the local file's tags.
/// `raw_title` is required (empty input makes the whole lookup a no-op);
/// `raw_artist` may be empty. Never mutated; output records copy these
/// fields back verbatim so downstream identity matching in the host works
/// even when the catalog's display names differ (e.g. "feat." suffixes).
#[derive(Clone, Debug)]
pub struct TrackQuery {
    pub raw_title: String,
    pub raw_artist: String,
}

impl TrackQuery {
    pub fn new(raw_title: impl Into<String>, raw_artist: impl Into<String>) -> Self {
        Self {
            raw_title: raw_title.into(),
            raw_artist: raw_artist.into(),
        }
    }
}

// ============================================================================
// Catalog Search Envelope
// ============================================================================

/// Performer entry inside a search candidate.
#[derive(Clone, Debug, Deserialize)]
pub struct CandidateArtist {
    #[serde(default)]
    pub name: String,
}

/// Album entry inside a search candidate.
#[derive(Clone, Debug, Deserialize)]
pub struct CandidateAlbum {
    #[serde(default)]
    pub name: String,
}

/// One song entry from the catalog's search endpoint. Only the fields the
/// scorer and assembler need; everything else in the payload is ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct SongCandidate {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artists: Vec<CandidateArtist>,
    #[serde(default)]
    pub album: Option<CandidateAlbum>,
}

impl SongCandidate {
    /// Joined performer names for logging and artist scoring.
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Search response envelope: `{code: 200, result: {songs: [...]}}`.
/// `code` values other than 200 mean the catalog rejected the query even
/// though the HTTP layer returned success.
#[derive(Debug, Deserialize)]
pub struct SearchEnvelope {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub result: Option<SearchResult>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub songs: Option<Vec<SongCandidate>>,
}

// ============================================================================
// Lyric Fetch Payload
// ============================================================================

/// One lyric body inside the fetch response.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LyricBody {
    #[serde(default)]
    pub lyric: Option<String>,
}

/// Lyric fetch response: `{lrc: {lyric}, tlyric?: {lyric}}`.
/// A missing `lrc.lyric` is the catalog's normal "no lyric for this song"
/// outcome, not a malformed response.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LyricPayload {
    #[serde(default)]
    pub lrc: Option<LyricBody>,
    #[serde(default)]
    pub tlyric: Option<LyricBody>,
}

impl LyricPayload {
    /// The original-language lyric text, if the song has one.
    pub fn original(&self) -> Option<&str> {
        self.lrc
            .as_ref()
            .and_then(|b| b.lyric.as_deref())
            .filter(|s| !s.is_empty())
    }

    /// The translated lyric text, if present.
    pub fn translation(&self) -> Option<&str> {
        self.tlyric
            .as_ref()
            .and_then(|b| b.lyric.as_deref())
            .filter(|s| !s.is_empty())
    }
}

// ============================================================================
// Output Record
// ============================================================================

/// Assembled lyric record handed to the host sink.
///
/// `title` and `artist` are always the raw caller values from [`TrackQuery`],
/// never the normalized form or the catalog's display names. `album` comes
/// from the matched candidate (empty when the catalog has none).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LyricRecord {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub lyric_text: String,
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_envelope_full() {
        let body = r#"{"code":200,"result":{"songs":[
            {"id":42,"name":"Song","artists":[{"name":"A"},{"name":"B"}],
             "album":{"name":"Album"}}]}}"#;
        let env: SearchEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(env.code, 200);
        let songs = env.result.unwrap().songs.unwrap();
        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].id, 42);
        assert_eq!(songs[0].artist_names(), "A/B");
        assert_eq!(songs[0].album.as_ref().unwrap().name, "Album");
    }

    #[test]
    fn test_search_envelope_missing_result() {
        let env: SearchEnvelope = serde_json::from_str(r#"{"code":400}"#).unwrap();
        assert_eq!(env.code, 400);
        assert!(env.result.is_none());
    }

    #[test]
    fn test_lyric_payload_accessors() {
        let body = r#"{"lrc":{"lyric":"line one"},"tlyric":{"lyric":"译文"}}"#;
        let payload: LyricPayload = serde_json::from_str(body).unwrap();
        assert_eq!(payload.original(), Some("line one"));
        assert_eq!(payload.translation(), Some("译文"));
    }

    #[test]
    fn test_lyric_payload_empty_lyric_is_none() {
        let payload: LyricPayload = serde_json::from_str(r#"{"lrc":{"lyric":""}}"#).unwrap();
        assert_eq!(payload.original(), None);
        assert_eq!(payload.translation(), None);
    }
}
