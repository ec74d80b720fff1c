use parser::Url;
use thiserror::Error;

use crate::model::{MangaRecord, SourceIdentity, TrackedSource};

/// Selector for the newest chapter link on a mangakakalot-style title page.
pub const KAKALOT_LATEST_SELECTOR: &str =
    "#chapter > div > div.chapter-list > div:nth-of-type(1) > span:nth-of-type(1) > a";

const DEFAULT_LANG: &str = "en";

#[derive(Error, Debug)]
pub enum TrackError {
    #[error("Not a valid url: {0}")]
    BadUrl(String),
    #[error("Only mangakakalot & mangadex urls are supported: {0}")]
    UnsupportedSite(String),
    #[error("Could not find a manga id in {0}")]
    MissingMangaId(String),
}

/// Builds a fresh record (no chapter recorded yet) from a title page URL,
/// deriving the display title from the URL slug.
pub fn record_from_url(raw: &str) -> Result<(String, MangaRecord), TrackError> {
    let url = Url::parse(raw.trim()).map_err(|_| TrackError::BadUrl(raw.to_owned()))?;
    let host = url.host_str().unwrap_or_default();

    if host.contains("mangadex") {
        record_from_mangadex(&url)
    } else if host.contains("mangakakalot") {
        record_from_mangakakalot(&url)
    } else {
        Err(TrackError::UnsupportedSite(raw.to_owned()))
    }
}

fn record_from_mangadex(url: &Url) -> Result<(String, MangaRecord), TrackError> {
    // https://mangadex.org/title/<id>/<slug>
    let segments: Vec<&str> = url
        .path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    let manga_id = match segments.as_slice() {
        ["title" | "manga", id, ..] => (*id).to_owned(),
        _ => return Err(TrackError::MissingMangaId(url.to_string())),
    };
    let name = segments
        .get(2)
        .map(|slug| title_case(slug))
        .unwrap_or_else(|| manga_id.clone());

    let record = MangaRecord::with_source(TrackedSource::new(SourceIdentity::Mangadex {
        manga_id,
        lang: DEFAULT_LANG.to_owned(),
    }));
    Ok((name, record))
}

fn record_from_mangakakalot(url: &Url) -> Result<(String, MangaRecord), TrackError> {
    let slug = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .ok_or_else(|| TrackError::MissingMangaId(url.to_string()))?;
    let name = title_case(slug);

    let record = MangaRecord::with_source(TrackedSource::new(SourceIdentity::Mangakakalot {
        manga_url: url.to_string(),
        selector: KAKALOT_LATEST_SELECTOR.to_owned(),
    }));
    Ok((name, record))
}

fn title_case(slug: &str) -> String {
    slug.split(['-', '_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
