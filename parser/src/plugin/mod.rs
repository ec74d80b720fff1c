mod manga_kakalot;
mod mangadex;

pub use manga_kakalot::MangaKakalot;
pub use mangadex::MangaDex;
