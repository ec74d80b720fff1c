use super::{ChapterVersion, SiteKind};

/// Candidate "latest chapter" produced by a single fetch. Transient: only
/// the reconciler decides whether any of it reaches the persisted record.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub kind: SiteKind,
    /// Opaque identifier for the candidate chapter (API id or canonical
    /// URL). Used to spot a re-released chapter whose number didn't move.
    pub chapter_ref: String,
    pub version: ChapterVersion,
    /// Display link for the chapter, never used for comparison.
    pub url: String,
}
