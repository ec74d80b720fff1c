use std::collections::BTreeMap;

use parser::model::{ChapterVersion, SiteKind};
use serde::{Deserialize, Serialize};

/// Last accepted chapter for one source. The three fields move together,
/// atomically, and only the reconciler writes them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChapterState {
    pub last_chapter_ref: String,
    pub last_chapter_version: ChapterVersion,
    pub last_url: String,
}

/// What a site needs to be asked for a title: one variant per site kind, so
/// required identity fields are checked when the store is read, not on first
/// use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceIdentity {
    Mangadex { manga_id: String, lang: String },
    Mangakakalot { manga_url: String, selector: String },
}

impl SourceIdentity {
    pub fn kind(&self) -> SiteKind {
        match self {
            SourceIdentity::Mangadex { .. } => SiteKind::Mangadex,
            SourceIdentity::Mangakakalot { .. } => SiteKind::Mangakakalot,
        }
    }
}

/// Per-site persisted state for a title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedSource {
    // State first: its keys must be claimed before the untagged identity
    // match sees the remaining map.
    #[serde(flatten)]
    pub state: ChapterState,
    #[serde(flatten)]
    pub identity: SourceIdentity,
}

impl TrackedSource {
    pub fn new(identity: SourceIdentity) -> Self {
        TrackedSource {
            state: ChapterState::default(),
            identity,
        }
    }

    pub fn kind(&self) -> SiteKind {
        self.identity.kind()
    }
}

/// One tracked title. The title itself is the store's map key; a record may
/// carry any number of sources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MangaRecord {
    #[serde(flatten)]
    pub sources: BTreeMap<SiteKind, TrackedSource>,
    /// The source currently holding the most advanced chapter; set by the
    /// reconciler, never behind any sibling's version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authoritative_site: Option<SiteKind>,
}

impl MangaRecord {
    pub fn with_source(source: TrackedSource) -> Self {
        let mut sources = BTreeMap::new();
        sources.insert(source.kind(), source);
        MangaRecord {
            sources,
            authoritative_site: None,
        }
    }

    /// Version shown in listings: the authoritative source if set, otherwise
    /// the furthest-along source.
    pub fn display_version(&self) -> ChapterVersion {
        self.authoritative_site
            .and_then(|site| self.sources.get(&site))
            .map(|source| source.state.last_chapter_version)
            .or_else(|| {
                self.sources
                    .values()
                    .map(|source| source.state.last_chapter_version)
                    .max()
            })
            .unwrap_or(ChapterVersion::Unset)
    }

    pub fn display_url(&self) -> Option<&str> {
        self.authoritative_site
            .and_then(|site| self.sources.get(&site))
            .map(|source| source.state.last_url.as_str())
            .filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mangadex_json() -> &'static str {
        r#"{
            "mangadex": {
                "manga_id": "a96676e5-8ae2-425e-b549-7f15dd34a6d8",
                "lang": "en",
                "last_chapter_ref": "abc",
                "last_chapter_version": "12",
                "last_url": "https://mangadex.org/chapter/abc"
            },
            "authoritative_site": "mangadex"
        }"#
    }

    #[test]
    fn fresh_chapter_state_is_empty_and_unset() {
        let state = ChapterState::default();
        assert!(state.last_chapter_ref.is_empty());
        assert!(state.last_chapter_version.is_unset());
        assert!(state.last_url.is_empty());
    }

    #[test]
    fn record_round_trips_through_json() {
        let record: MangaRecord = serde_json::from_str(mangadex_json()).unwrap();
        assert_eq!(record.authoritative_site, Some(SiteKind::Mangadex));

        let source = &record.sources[&SiteKind::Mangadex];
        assert_eq!(source.kind(), SiteKind::Mangadex);
        assert_eq!(source.state.last_chapter_ref, "abc");
        assert_eq!(
            source.state.last_chapter_version,
            ChapterVersion::parse("12").unwrap()
        );

        let encoded = serde_json::to_string(&record).unwrap();
        let again: MangaRecord = serde_json::from_str(&encoded).unwrap();
        assert_eq!(again, record);
    }

    #[test]
    fn identity_fields_pick_the_variant() {
        let json = r#"{
            "mangakakalot": {
                "manga_url": "https://www.mangakakalot.gg/manga/solo-max",
                "selector": "div.chapter-list a",
                "last_chapter_ref": "",
                "last_chapter_version": "",
                "last_url": ""
            }
        }"#;

        let record: MangaRecord = serde_json::from_str(json).unwrap();
        let source = &record.sources[&SiteKind::Mangakakalot];
        assert!(matches!(
            source.identity,
            SourceIdentity::Mangakakalot { .. }
        ));
        assert!(source.state.last_chapter_version.is_unset());
        assert_eq!(record.authoritative_site, None);
    }

    #[test]
    fn missing_identity_fields_fail_at_read_time() {
        let json = r#"{"mangadex": {"last_chapter_ref": "", "last_chapter_version": "", "last_url": ""}}"#;
        assert!(serde_json::from_str::<MangaRecord>(json).is_err());
    }

    #[test]
    fn empty_version_string_round_trips_as_unset() {
        let record = MangaRecord::with_source(TrackedSource::new(SourceIdentity::Mangadex {
            manga_id: "id".into(),
            lang: "en".into(),
        }));

        let encoded = serde_json::to_string(&record).unwrap();
        assert!(encoded.contains(r#""last_chapter_version":"""#));

        let again: MangaRecord = serde_json::from_str(&encoded).unwrap();
        assert!(again.sources[&SiteKind::Mangadex]
            .state
            .last_chapter_version
            .is_unset());
    }

    #[test]
    fn display_version_prefers_the_authoritative_source() {
        let mut record: MangaRecord = serde_json::from_str(mangadex_json()).unwrap();
        assert_eq!(
            record.display_version(),
            ChapterVersion::parse("12").unwrap()
        );

        // Without the pointer, fall back to the highest version around.
        record.authoritative_site = None;
        record.sources.insert(
            SiteKind::Mangakakalot,
            TrackedSource {
                state: ChapterState {
                    last_chapter_ref: "x".into(),
                    last_chapter_version: ChapterVersion::parse("14").unwrap(),
                    last_url: "https://www.mangakakalot.gg/chapter/solo-max/chapter-14".into(),
                },
                identity: SourceIdentity::Mangakakalot {
                    manga_url: "https://www.mangakakalot.gg/manga/solo-max".into(),
                    selector: "a".into(),
                },
            },
        );
        assert_eq!(
            record.display_version(),
            ChapterVersion::parse("14").unwrap()
        );
    }
}
