//! Retrieval orchestration and lyric assembly.
//!
//! Sequences one lookup end to end: normalize the caller's query, run the
//! exact search pass, fall back to a loose (title-only) pass when the exact
//! pass yields no confident match, fetch the lyric for the winning candidate
//! and hand assembled records to the host sink.
//!
//! The public entry point absorbs every transport and parse error at this
//! boundary: failures are logged with stage context and reported as a
//! terminal [`Outcome`], never propagated to the host. Completion of the
//! returned future is the host's signal that all work for the request has
//! settled.

use anyhow::Context;
use log::{debug, info, warn};

use crate::client::{search_term, CatalogClient};
use crate::config::Config;
use crate::models::{LyricPayload, LyricRecord, SongCandidate, TrackQuery};
use crate::normalize::NormalizedQuery;
use crate::scoring::best_match;

/// Source tag for the original-language record.
pub const SOURCE_ORIGINAL: &str = "Netease Cloud Music (original)";
/// Source tag for the combined original+translation record.
pub const SOURCE_COMBINED: &str = "Netease Cloud Music (original+translation)";

// ============================================================================
// Host Sink
// ============================================================================

/// Host-provided destination for assembled records. Ownership of each record
/// transfers on the call; the pipeline never touches it again.
pub trait LyricSink {
    fn add_lyric(&mut self, record: LyricRecord);
}

/// Plain collection sink, used by the CLI and tests.
impl LyricSink for Vec<LyricRecord> {
    fn add_lyric(&mut self, record: LyricRecord) {
        self.push(record);
    }
}

// ============================================================================
// Outcome
// ============================================================================

/// Terminal outcome of one retrieval. Only [`Outcome::Added`] means the sink
/// received records; everything else is an informational end state — none of
/// them is an error from the host's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Records handed to the sink (1 or 2).
    Added(usize),
    /// The normalized title was empty; nothing was attempted.
    EmptyQuery,
    /// Neither search pass produced a candidate above the threshold.
    NoMatch,
    /// A candidate was accepted but the catalog has no lyric text for it.
    NoLyric,
    /// A transport or parse failure ended the flow early (already logged).
    Failed,
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Run one lyric lookup. Never returns an error; see [`Outcome`].
pub async fn fetch_lyrics<C, S>(
    client: &C,
    query: &TrackQuery,
    sink: &mut S,
    config: &Config,
) -> Outcome
where
    C: CatalogClient + ?Sized,
    S: LyricSink + ?Sized,
{
    match run(client, query, sink, config).await {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!("lyric retrieval aborted: {err:#}");
            Outcome::Failed
        }
    }
}

async fn run<C, S>(
    client: &C,
    query: &TrackQuery,
    sink: &mut S,
    config: &Config,
) -> anyhow::Result<Outcome>
where
    C: CatalogClient + ?Sized,
    S: LyricSink + ?Sized,
{
    let normalized = NormalizedQuery::from_query(query, config);
    if normalized.title.is_empty() {
        return Ok(Outcome::EmptyQuery);
    }
    debug!(
        "cleaned search terms: title={:?} artist={:?}",
        normalized.title, normalized.artist
    );

    // Exact pass: title + artist.
    let term = search_term(&normalized.title, &normalized.artist, true);
    let candidates = client
        .search(&term, config.search_limit)
        .await
        .context("exact search")?;
    let mut best = candidates
        .as_deref()
        .and_then(|c| best_match(c, &normalized, config))
        .cloned();

    // Loose pass: title only. The single fallback tier.
    if best.is_none() {
        info!("exact search gave no confident match, trying loose search");
        let term = search_term(&normalized.title, &normalized.artist, false);
        let candidates = client
            .search(&term, config.search_limit)
            .await
            .context("loose search")?;
        best = candidates
            .as_deref()
            .and_then(|c| best_match(c, &normalized, config))
            .cloned();
    }

    let Some(candidate) = best else {
        info!("no suitable match after all search attempts");
        return Ok(Outcome::NoMatch);
    };
    info!(
        "best match: {:?} - {:?} (id {})",
        candidate.name,
        candidate.artist_names(),
        candidate.id
    );

    let payload = client
        .lyric(candidate.id)
        .await
        .with_context(|| format!("lyric fetch for candidate {}", candidate.id))?;

    let records = assemble(&payload, &candidate, query);
    if records.is_empty() {
        info!("candidate {} has no lyric text", candidate.id);
        return Ok(Outcome::NoLyric);
    }

    let count = records.len();
    for record in records {
        sink.add_lyric(record);
    }
    Ok(Outcome::Added(count))
}

// ============================================================================
// Lyric Assembler
// ============================================================================

/// Build the output records for a fetched payload.
///
/// Title and artist come verbatim from the caller's raw query so the host's
/// identity matching succeeds even when the catalog's display names differ.
/// No `lrc` text produces zero records; a translation adds a second record
/// whose text is the original, a newline, then the translation.
pub fn assemble(
    payload: &LyricPayload,
    candidate: &SongCandidate,
    query: &TrackQuery,
) -> Vec<LyricRecord> {
    let Some(original) = payload.original() else {
        return Vec::new();
    };
    let album = candidate
        .album
        .as_ref()
        .map(|a| a.name.clone())
        .unwrap_or_default();

    let mut records = vec![LyricRecord {
        title: query.raw_title.clone(),
        artist: query.raw_artist.clone(),
        album: album.clone(),
        lyric_text: original.to_string(),
        source: SOURCE_ORIGINAL.to_string(),
    }];

    if let Some(translation) = payload.translation() {
        records.push(LyricRecord {
            title: query.raw_title.clone(),
            artist: query.raw_artist.clone(),
            album,
            lyric_text: format!("{original}\n{translation}"),
            source: SOURCE_COMBINED.to_string(),
        });
    }

    records
}

// ============================================================================
// TESTS
// ============================================================================
