//! Candidate scoring for catalog search results.
//!
//! Ranks the candidates a search pass returned against the normalized query
//! using a deterministic point system, and applies the acceptance threshold
//! that decides whether the best of them is confident enough to fetch.
//!
//! Point system per candidate:
//! - Hard gate: the candidate's normalized name must contain the query title
//!   as a substring, otherwise the candidate scores 0 and is eliminated no
//!   matter how well its artists match.
//! - [`TITLE_BASE_SCORE`] for containment, plus [`EXACT_TITLE_BONUS`] when
//!   the names are equal, rewarding precise over partial matches.
//! - Artist corroboration: the fraction of query-artist words found as
//!   substrings of the joined candidate performers, scaled to 100 points.
//!
//! The default threshold equals the title base score and must be *strictly*
//! exceeded, so a partial title hit with no supporting evidence never wins.

use log::debug;

use crate::config::{Config, EXACT_TITLE_BONUS, TITLE_BASE_SCORE};
use crate::models::SongCandidate;
use crate::normalize::{normalize_keywords, NormalizedQuery};

/// Score one candidate against the normalized query.
/// Pure and deterministic; 0.0 means eliminated by the title gate.
pub fn score_candidate(candidate: &SongCandidate, query: &NormalizedQuery, config: &Config) -> f64 {
    let candidate_title = normalize_keywords(&candidate.name, config.strip_parentheticals);

    if !candidate_title.contains(&query.title) {
        return 0.0;
    }

    let mut score = TITLE_BASE_SCORE;
    if candidate_title == query.title {
        score += EXACT_TITLE_BONUS;
    }

    if !query.artist.is_empty() && !candidate.artists.is_empty() {
        let joined = candidate
            .artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let candidate_artists = normalize_keywords(&joined, config.strip_parentheticals);

        let words: Vec<&str> = query.artist.split_whitespace().collect();
        if !words.is_empty() {
            let matched = words
                .iter()
                .filter(|w| candidate_artists.contains(**w))
                .count();
            score += (matched as f64 / words.len() as f64) * 100.0;
        }
    }

    score
}

/// Pick the confident best match out of a search pass, if any.
///
/// Candidates are ranked descending by score; ties keep the catalog's own
/// order (an earlier candidate is only displaced by a strictly higher score).
/// Returns `None` when no candidate strictly exceeds
/// `config.accept_threshold` — a normal "no confident match" outcome.
pub fn best_match<'a>(
    candidates: &'a [SongCandidate],
    query: &NormalizedQuery,
    config: &Config,
) -> Option<&'a SongCandidate> {
    let mut best: Option<(&SongCandidate, f64)> = None;

    for candidate in candidates {
        let score = score_candidate(candidate, query, config);
        debug!(
            "scored candidate id={} name={:?} score={:.1}",
            candidate.id, candidate.name, score
        );
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((candidate, score)),
        }
    }

    best.filter(|(_, score)| *score > config.accept_threshold)
        .map(|(candidate, _)| candidate)
}
