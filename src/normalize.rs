//! Shared normalization for catalog matching.
//!
//! Canonicalizes the noisy human-entered title/artist strings from local file
//! tags so they can be compared against catalog search results: lowercasing,
//! punctuation and CJK bracket stripping, whitespace collapsing, and
//! voice-actor ("CV") extraction from parenthesized artist annotations.
//!
//! All functions here are total and deterministic; `normalize_keywords` is
//! idempotent for either parenthetical mode.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::Config;
use crate::models::TrackQuery;

// ============================================================================
// REGEX PATTERNS
// ============================================================================

/// Quote/bracket/currency symbols replaced by a single space, including the
/// CJK bracket variants (《》「」『』) and plain parentheses. Parentheses are
/// in this class so that in non-stripping mode `song (remix)` still
/// normalizes to `song remix` rather than keeping literal parens.
static QUOTE_BRACKETS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"['·$&–\[\]\{\}()（）《》「」『』]").unwrap());

/// Whole parenthetical groups, ASCII or full-width. Only applied when
/// `Config::strip_parentheticals` is set; stripping happens before symbol
/// collapsing so the group content disappears entirely.
static PAREN_GROUPS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(.*?\)|（.*?）").unwrap());

/// Runs of ASCII symbol characters collapsed to a single space:
/// `-`, `/`, `:`..`@`, `[`..`` ` ``, `{`..`~`.
static SYMBOL_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\-/:-@\[-`{-~]+").unwrap());

/// Full-width punctuation and CJK punctuation removed outright
/// (em dash, curly quote, ellipsis, 、。《》『』【】・！（），：；？～￥).
static FULLWIDTH_PUNCT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        "[\u{2014}\u{2018}\u{201C}\u{2026}\u{3001}\u{3002}\u{300A}\u{300B}\u{300E}\u{300F}\
         \u{3010}\u{3011}\u{30FB}\u{FF01}\u{FF08}\u{FF09}\u{FF0C}\u{FF1A}\u{FF1B}\u{FF1F}\
         \u{FF5E}\u{FFE5}]+",
    )
    .unwrap()
});

/// Regex to collapse whitespace runs into a single space
static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Voice-actor marker inside a parenthesized artist annotation:
/// `(CV.春日さくら)`, `（cv 春日さくら）`. The marker must open the group;
/// the captured remainder is the performer name.
static CV_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[(（]\s*cv[\s.。、]*([^)）]+)[)）]").unwrap());

// ============================================================================
// NORMALIZATION FUNCTIONS
// ============================================================================

/// Normalize a title or artist string for matching.
///
/// Lowercases, replaces quote/bracket symbols with spaces, collapses ASCII
/// symbol runs, removes full-width punctuation, and collapses whitespace.
/// With `strip_parentheticals` set, whole `(...)`/`（...）` groups are removed
/// first, so `Song (Remix)` becomes `song`; without it the group content
/// survives as plain words (`song remix`).
pub fn normalize_keywords(s: &str, strip_parentheticals: bool) -> String {
    if s.is_empty() {
        return String::new();
    }

    let mut result = s.to_lowercase();
    if strip_parentheticals {
        result = PAREN_GROUPS.replace_all(&result, "").to_string();
    }
    result = QUOTE_BRACKETS.replace_all(&result, " ").to_string();
    result = SYMBOL_RUNS.replace_all(&result, " ").to_string();
    result = FULLWIDTH_PUNCT.replace_all(&result, "").to_string();

    MULTI_SPACE.replace_all(result.trim(), " ").to_string()
}

/// Extract the voice-actor name from a character-annotated artist field.
///
/// Anime soundtracks commonly tag the artist as `character (CV.performer)`;
/// the catalog indexes by performer. When a parenthesized group opening with
/// a `cv` marker is present, the captured performer name replaces the whole
/// field. A missing group, or a group without the marker (`Char(Note)`),
/// leaves the input unchanged.
///
/// Must run on the raw, pre-normalization artist string: normalization
/// destroys the brackets this looks for.
pub fn extract_performer(artist: &str) -> String {
    if let Some(caps) = CV_MARKER.captures(artist) {
        let performer = caps[1].trim();
        if !performer.is_empty() {
            return performer.to_string();
        }
    }
    artist.to_string()
}

// ============================================================================
// Normalized Query
// ============================================================================

/// Normalized (title, artist) pair derived from a [`TrackQuery`].
/// An empty `title` means the lookup should be skipped entirely.
#[derive(Clone, Debug)]
pub struct NormalizedQuery {
    pub title: String,
    pub artist: String,
}

impl NormalizedQuery {
    /// Normalize a caller query. The artist passes through CV extraction
    /// before general normalization (bracket detection needs the original
    /// punctuation).
    pub fn from_query(query: &TrackQuery, config: &Config) -> Self {
        Self {
            title: normalize_keywords(&query.raw_title, config.strip_parentheticals),
            artist: normalize_keywords(
                &extract_performer(&query.raw_artist),
                config.strip_parentheticals,
            ),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_basic() {
        assert_eq!(normalize_keywords("Song Name", true), "song name");
        assert_eq!(normalize_keywords("  Song   Name  ", true), "song name");
        assert_eq!(normalize_keywords("Jay-Z: 99 Problems", true), "jay z 99 problems");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_keywords("", true), "");
        assert_eq!(normalize_keywords("", false), "");
    }

    #[test]
    fn test_normalize_cjk_brackets() {
        assert_eq!(normalize_keywords("《起风了》", true), "起风了");
        assert_eq!(normalize_keywords("「夜に駆ける」YOASOBI", true), "夜に駆ける yoasobi");
        // Full-width tilde is removed outright, not spaced.
        assert_eq!(normalize_keywords("曲名～テーマ～", true), "曲名テーマ");
    }

    #[test]
    fn test_normalize_fullwidth_punct_removed() {
        assert_eq!(normalize_keywords("曲名！？", true), "曲名");
        assert_eq!(normalize_keywords("a，b：c", true), "abc");
    }

    #[test]
    fn test_normalize_strip_parentheticals() {
        assert_eq!(normalize_keywords("Song (Remix)", true), "song");
        assert_eq!(normalize_keywords("曲（インスト）", true), "曲");
    }

    #[test]
    fn test_normalize_keep_parentheticals() {
        // Non-stripping mode keeps the group content as plain words.
        assert_eq!(normalize_keywords("Song (Remix)", false), "song remix");
        assert_eq!(normalize_keywords("曲（インスト）", false), "曲 インスト");
    }

    #[test]
    fn test_normalize_idempotent() {
        let inputs = [
            "Song (Remix)",
            "《起风了》- 吴青峰",
            "It's a Test!! -- [demo]",
            "赤城ユイナ(CV.春日さくら)",
            "",
        ];
        for strip in [true, false] {
            for input in inputs {
                let once = normalize_keywords(input, strip);
                assert_eq!(normalize_keywords(&once, strip), once, "input: {input:?}");
            }
        }
    }

    #[test]
    fn test_extract_performer_cv() {
        assert_eq!(extract_performer("赤城ユイナ(CV.春日さくら)"), "春日さくら");
        assert_eq!(extract_performer("赤城ユイナ（CV。春日さくら）"), "春日さくら");
        assert_eq!(extract_performer("Char (cv Jane Doe)"), "Jane Doe");
    }

    #[test]
    fn test_extract_performer_no_bracket() {
        assert_eq!(extract_performer("John Smith"), "John Smith");
        assert_eq!(extract_performer(""), "");
    }

    #[test]
    fn test_extract_performer_bracket_without_marker() {
        assert_eq!(extract_performer("Char(Note)"), "Char(Note)");
    }

    #[test]
    fn test_normalized_query_applies_cv_extraction() {
        let config = Config::default();
        let query = TrackQuery::new("Song", "赤城ユイナ(CV.春日さくら)");
        let norm = NormalizedQuery::from_query(&query, &config);
        assert_eq!(norm.title, "song");
        assert_eq!(norm.artist, "春日さくら");
    }
}
