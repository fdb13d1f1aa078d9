//! Field normalization helpers applied to every scraped value.
//!
//! All functions are pure `&str -> String` transforms.

/// Strip newlines and tabs, then trim surrounding whitespace.
///
/// If nothing is left, the original input is returned unchanged rather than an
/// empty string, so `clean_text("\n\t") == "\n\t"`.
pub fn clean_text(input: &str) -> String {
    let without_newlines = input.replace('\n', "");
    let cleaned = without_newlines.trim().replace('\t', "");
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        input.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Turn a human-readable label into a lowerCamelCase record key.
///
/// `"Type Of Dinosaur"` becomes `"typeOfDinosaur"`; empty input stays empty.
pub fn to_identifier_case(phrase: &str) -> String {
    let mut out = String::with_capacity(phrase.len());

    for (i, token) in phrase.split_whitespace().enumerate() {
        if i == 0 {
            out.push_str(&token.to_lowercase());
        } else {
            out.push_str(&capitalize(&token.to_lowercase()));
        }
    }

    out
}

/// Derive a display name from a page slug: `"late-cretaceous"` → `"Late Cretaceous"`.
pub fn humanize_slug(slug: &str) -> String {
    slug.replace('-', " ")
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
