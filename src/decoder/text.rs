//! Display-text normalization for facility records.
//!
//! Source datasets carry names and categories in inconsistent, frequently
//! all-caps form ("HOSPITAL GENERAL CASTANER"). Normalization keeps the
//! first character of each word and lowercases the rest, collapses runs of
//! whitespace, and renders the word "And" as an ampersand.

/// Re-format a raw string value so it is no longer in all-caps form.
pub fn prettify(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    let words: Vec<String> = value
        .split(' ')
        .filter_map(|segment| {
            let trimmed = segment.trim_matches(' ');
            let mut chars = trimmed.chars();
            chars.next().map(|first| {
                let mut word = String::with_capacity(trimmed.len());
                word.push(first);
                word.push_str(&chars.as_str().to_lowercase());
                word
            })
        })
        .collect();

    words.join(" ").replace(" And ", " & ")
}
