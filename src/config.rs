//! Tunables for the retrieval pipeline.

// ============================================================================
// Scoring Constants
// ============================================================================

/// Points for a candidate whose normalized name contains the query title.
pub const TITLE_BASE_SCORE: f64 = 100.0;

/// Extra points when the candidate name equals the query title exactly.
pub const EXACT_TITLE_BONUS: f64 = 50.0;

/// Default acceptance threshold. Equal to [`TITLE_BASE_SCORE`], and the
/// scorer requires a score *strictly* above it, so a bare title-substring hit
/// (100) is never accepted on its own: acceptance needs the exact-name bonus
/// or at least partial artist corroboration on top.
pub const DEFAULT_ACCEPT_THRESHOLD: f64 = TITLE_BASE_SCORE;

// ============================================================================
// Config
// ============================================================================

/// Pipeline configuration. `Default` mirrors the hardened revision of the
/// original source script.
#[derive(Clone, Debug)]
pub struct Config {
    /// Strip whole `(...)`/`（...）` groups from titles and artists before
    /// symbol collapsing. On (the default), `Song (Remix)` matches plain
    /// `Song`; off, the group content is kept as extra words. Changes match
    /// outcomes for qualified titles, which is why it is a setting and not
    /// hard-wired.
    pub strip_parentheticals: bool,
    /// Minimum score a candidate must strictly exceed to be accepted.
    pub accept_threshold: f64,
    /// Maximum number of candidates requested per search pass.
    pub search_limit: u32,
    /// Per-request HTTP timeout in seconds. The source environment imposed
    /// none; a hung catalog request would otherwise stall the host forever.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strip_parentheticals: true,
            accept_threshold: DEFAULT_ACCEPT_THRESHOLD,
            search_limit: 15,
            timeout_secs: 12,
        }
    }
}
