use std::collections::BTreeMap;
use std::fmt;

use futures::future::join_all;
use parser::model::{ChapterVersion, FetchOutcome, SiteKind};
use parser::parse_error;
use parser::parser::Parser;
use parser::plugin::{MangaDex, MangaKakalot};

use crate::model::{MangaRecord, SourceIdentity};

/// What one reconciliation pass had to say about a record. Every record
/// yields exactly one `SourceUpdated` or `NoChange`, plus one `FetchFailed`
/// per source whose fetch went wrong; nothing is dropped silently.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateEvent {
    SourceUpdated {
        name: String,
        site: SiteKind,
        url: String,
    },
    NoChange {
        name: String,
    },
    FetchFailed {
        name: String,
        site: SiteKind,
        reason: String,
    },
}

impl fmt::Display for UpdateEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateEvent::SourceUpdated { name, url, .. } => {
                write!(f, "Manga Update Found: \t\t{}\t\t{}", name, url)
            }
            UpdateEvent::NoChange { .. } => write!(f, "Nothing new (-_-)"),
            UpdateEvent::FetchFailed { name, site, reason } => {
                write!(f, "{} Error: {} - {}", site, name, reason)
            }
        }
    }
}

fn adapter_for(identity: &SourceIdentity) -> Box<dyn Parser + Send + Sync> {
    match identity {
        SourceIdentity::Mangadex { manga_id, lang } => Box::new(MangaDex::new(manga_id, lang)),
        SourceIdentity::Mangakakalot {
            manga_url,
            selector,
        } => Box::new(MangaKakalot::new(manga_url, selector)),
    }
}

/// Fetches every configured source of a record concurrently. The sources hit
/// disjoint remote endpoints; nothing shared is touched until all outcomes
/// are in.
async fn fetch_sources(record: &MangaRecord) -> Vec<(SiteKind, parse_error::Result<FetchOutcome>)> {
    let fetches = record.sources.values().map(|source| {
        let adapter = adapter_for(&source.identity);
        async move { (adapter.kind(), adapter.fetch_latest().await) }
    });

    join_all(fetches).await
}

/// Synchronous, in-memory reconciliation of one record against the outcomes
/// of all its sources. This is the only place persisted chapter state is
/// written.
pub fn reconcile_record(
    name: &str,
    record: &mut MangaRecord,
    outcomes: Vec<(SiteKind, parse_error::Result<FetchOutcome>)>,
) -> Vec<UpdateEvent> {
    let mut events = vec![];
    let mut dirty: Vec<SiteKind> = vec![];

    for (site, outcome) in outcomes {
        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("[{}] {} fetch failed: {}", name, site, e);
                events.push(UpdateEvent::FetchFailed {
                    name: name.to_owned(),
                    site,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let Some(source) = record.sources.get_mut(&site) else {
            warn!("[{}] outcome for untracked source {}", name, site);
            continue;
        };

        let state = &mut source.state;
        let newer = outcome.version.is_newer_than(&state.last_chapter_version);
        // A reused or absent number with a changed remote id is still a new
        // release.
        let rereleased = outcome.version == state.last_chapter_version
            && outcome.chapter_ref != state.last_chapter_ref;

        if newer || rereleased {
            debug!(
                "[{}] {} advanced '{}' -> '{}'",
                name, site, state.last_chapter_version, outcome.version
            );
            state.last_chapter_ref = outcome.chapter_ref;
            state.last_chapter_version = outcome.version;
            state.last_url = outcome.url;
            dirty.push(site);
        }
    }

    if dirty.is_empty() {
        events.push(UpdateEvent::NoChange {
            name: name.to_owned(),
        });
        return events;
    }

    // Arbitration over however many sources are configured. The pointer only
    // moves when a source updated this pass sits at the record-wide top
    // version; an equal-version tie keeps the incumbent, otherwise the fixed
    // site precedence decides.
    let top = record
        .sources
        .values()
        .map(|source| source.state.last_chapter_version)
        .max()
        .unwrap_or(ChapterVersion::Unset);

    let at_top = |site: &SiteKind| record.sources[site].state.last_chapter_version == top;

    if dirty.iter().any(at_top) {
        let incumbent = record.authoritative_site.filter(at_top);
        record.authoritative_site = incumbent.or_else(|| {
            record
                .sources
                .keys()
                .find(|site| at_top(site))
                .copied()
        });
    }

    // Report the best source this pass touched, preferring the one that just
    // became (or stayed) authoritative.
    let reported = record
        .authoritative_site
        .filter(|site| dirty.contains(site))
        .unwrap_or_else(|| {
            *dirty
                .iter()
                .max_by_key(|site| (record.sources[*site].state.last_chapter_version, std::cmp::Reverse(**site)))
                .unwrap_or(&dirty[0])
        });

    events.push(UpdateEvent::SourceUpdated {
        name: name.to_owned(),
        site: reported,
        url: record.sources[&reported].state.last_url.clone(),
    });

    events
}

/// Runs one full pass over all tracked titles: records sequentially, the
/// sources of each record concurrently. The caller prints the events and
/// saves the store.
pub async fn reconcile_all(records: &mut BTreeMap<String, MangaRecord>) -> Vec<UpdateEvent> {
    let mut events = vec![];

    for (name, record) in records.iter_mut() {
        let outcomes = fetch_sources(record).await;
        events.extend(reconcile_record(name, record, outcomes));
    }

    events
}
