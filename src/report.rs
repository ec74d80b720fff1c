use std::collections::BTreeMap;

use crate::model::MangaRecord;

/// Prints the tracked titles as an aligned table of title and latest chapter
/// number; `with_urls` adds the chapter link of the authoritative source.
pub fn print_list(records: &BTreeMap<String, MangaRecord>, with_urls: bool) {
    let longest = records.keys().map(String::len).max().unwrap_or(0).max(10);
    let index_width = records.len().to_string().len();

    println!("{:<longest$} | Chapter", "Manga Name", longest = longest + index_width + 2);
    println!("{}", "=".repeat(longest + index_width + 26));
    for (index, (name, record)) in records.iter().enumerate() {
        let version = record.display_version();
        let chapter = if version.is_unset() {
            "-".to_owned()
        } else {
            version.to_string()
        };
        print!(
            "{:<index_width$}- {:<longest$} | {}",
            index + 1,
            name,
            chapter,
            index_width = index_width,
            longest = longest
        );
        if with_urls {
            if let Some(url) = record.display_url() {
                print!("  {}", url);
            }
        }
        println!();
    }
    println!("{}", "=".repeat(longest + index_width + 26));
}
