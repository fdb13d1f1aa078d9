//! Detail page extraction.
//!
//! A detail page comes in one of three shapes, checked in order:
//! 1. an embedded `__NEXT_DATA__` JSON payload,
//! 2. the legacy `.dinosaur--*` markup,
//! 3. neither, which is read as "no data found" for the entity.
//!
//! "No data" is not an error: it yields [`DetailRecord::no_data`].

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};
use serde::Deserialize;
use tracing::{debug, instrument};

use dinodir_shared::{
    DetailRecord, DinoDirError, NO_DATA, Result, clean_text, to_identifier_case,
};

use crate::client::SourceClient;
use crate::document::{Document, element_text, selector};

static NEXT_DATA: LazyLock<Selector> = LazyLock::new(|| selector("script#__NEXT_DATA__"));
static MARKUP: LazyLock<Selector> = LazyLock::new(|| {
    selector(".dinosaur--name-unhyphenated, .dinosaur--meaning, .dinosaur--list")
});
static NAME: LazyLock<Selector> = LazyLock::new(|| selector(".dinosaur--name-unhyphenated"));
static PRONUNCIATION: LazyLock<Selector> =
    LazyLock::new(|| selector(".dinosaur--pronunciation"));
static MEANING: LazyLock<Selector> = LazyLock::new(|| selector(".dinosaur--meaning"));
static PICTURE: LazyLock<Selector> = LazyLock::new(|| selector(".dinosaur--image"));
static CONTENT: LazyLock<Selector> =
    LazyLock::new(|| selector(".dinosaur--content-container p"));
static TERM: LazyLock<Selector> = LazyLock::new(|| selector(".dinosaur--list dt"));

static HTML_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

// ---------------------------------------------------------------------------
// Fetching
// ---------------------------------------------------------------------------

/// Relative path of an entity's detail page: the lowercased name plus `.html`.
///
/// Whitespace is kept as-is, so a multi-word name recovered from a slug
/// (e.g. `"Tyrannosaurus Rex"`) does not map back to its hyphenated page and
/// usually ends up as a no-data record.
pub fn detail_path(name: &str) -> String {
    format!("/{}.html", name.to_lowercase())
}

/// Fetch and normalize the detail page for `name`.
///
/// A 404 from the source counts as "no data" and returns the degraded record.
#[instrument(skip(client), level = "debug")]
pub async fn fetch_detail(client: &SourceClient, name: &str) -> Result<DetailRecord> {
    let path = detail_path(name);

    let body = match client.fetch(&path).await {
        Ok(body) => body,
        Err(e) if e.is_not_found() => {
            debug!(name, "detail page not found, returning no-data record");
            return Ok(DetailRecord::no_data(name));
        }
        Err(e) => return Err(e),
    };

    parse_detail(&body, name)
}

/// Extract a detail record from a page body.
pub fn parse_detail(body: &str, name: &str) -> Result<DetailRecord> {
    let doc = Document::parse(body)?;

    let payload = doc
        .first_text(&NEXT_DATA)
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty());

    let mut record = if let Some(raw) = payload {
        match parse_payload(&raw)? {
            Some(dino) => dino.into_record(),
            None => return Ok(DetailRecord::no_data(name)),
        }
    } else if doc.exists(&MARKUP) {
        extract_markup(&doc)
    } else {
        debug!(name, "no recognizable detail data on page");
        return Ok(DetailRecord::no_data(name));
    };

    for (key, value) in definition_pairs(&doc) {
        record.insert(key, value);
    }

    if record.name.trim().is_empty() {
        record.name = name.to_string();
    }

    Ok(record)
}

// ---------------------------------------------------------------------------
// Legacy markup
// ---------------------------------------------------------------------------

fn extract_markup(doc: &Document) -> DetailRecord {
    DetailRecord {
        name: clean_text(&doc.text(&NAME)),
        pronunciation: clean_text(&doc.text(&PRONUNCIATION)),
        meaning: normalize_meaning(&doc.text(&MEANING)),
        picture: doc.attr(&PICTURE, "src").unwrap_or_default(),
        content: clean_text(&doc.text(&CONTENT)),
        ..Default::default()
    }
}

/// The site prefixes the meaning with a punctuation marker; drop it.
/// Missing meaning becomes the [`NO_DATA`] sentinel.
fn normalize_meaning(raw: &str) -> String {
    let cleaned = clean_text(raw);
    let mut chars = cleaned.trim().chars();
    if chars.next().is_none() {
        return NO_DATA.to_string();
    }

    let meaning = chars.as_str().trim();
    if meaning.is_empty() {
        NO_DATA.to_string()
    } else {
        meaning.to_string()
    }
}

/// Key/value pairs from the attribute list: each `dt` with the element after it.
fn definition_pairs(doc: &Document) -> Vec<(String, String)> {
    doc.select(&TERM)
        .filter_map(|term| {
            let label = clean_text(&element_text(term));
            let key = to_identifier_case(label.trim_end_matches(':'));
            if key.is_empty() {
                return None;
            }

            let value = term
                .next_siblings()
                .find_map(ElementRef::wrap)
                .map(element_text)
                .unwrap_or_default();

            Some((key, clean_text(&value)))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Embedded payload
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct NextData {
    #[serde(default)]
    props: Props,
}

#[derive(Debug, Default, Deserialize)]
struct Props {
    #[serde(default, rename = "pageProps")]
    page_props: PageProps,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageProps {
    #[serde(default)]
    dinosaur: Option<DinosaurPayload>,
    #[serde(default)]
    dinosaur_error_message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DinosaurPayload {
    #[serde(default)]
    genus: Option<String>,
    // Spelled this way by the source.
    #[serde(default)]
    name_pronounciation: Option<String>,
    #[serde(default)]
    name_meaning: Option<String>,
    #[serde(default)]
    diet_type_name: Option<String>,
    #[serde(default)]
    body_shape: Option<BodyShape>,
    #[serde(default)]
    period: Option<Period>,
    #[serde(default)]
    length_from: Option<f64>,
    #[serde(default)]
    length_to: Option<f64>,
    #[serde(default)]
    mass_from: Option<f64>,
    #[serde(default)]
    mass_to: Option<f64>,
    #[serde(default)]
    text_block_collection: Vec<TextBlock>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BodyShape {
    #[serde(default)]
    body_shape: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Period {
    #[serde(default)]
    period: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextBlock {
    #[serde(default)]
    text_block: Option<String>,
}

/// Decode the payload; `None` means the page reported no dinosaur.
fn parse_payload(raw: &str) -> Result<Option<DinosaurPayload>> {
    let data: NextData = serde_json::from_str(raw)
        .map_err(|e| DinoDirError::parse(format!("invalid __NEXT_DATA__ payload: {e}")))?;

    let page = data.props.page_props;
    if page.dinosaur.is_none() {
        debug!(message = ?page.dinosaur_error_message, "payload carries no dinosaur");
    }
    Ok(page.dinosaur)
}

impl DinosaurPayload {
    fn into_record(self) -> DetailRecord {
        let content = self
            .text_block_collection
            .iter()
            .filter_map(|tb| tb.text_block.as_deref())
            .filter(|block| !block.is_empty())
            .map(strip_html)
            .collect::<Vec<_>>()
            .join(" \n ");

        let meaning = clean_text(self.name_meaning.as_deref().unwrap_or_default());
        let meaning = if meaning.trim().is_empty() {
            NO_DATA.to_string()
        } else {
            meaning
        };

        let mut record = DetailRecord {
            name: clean_text(self.genus.as_deref().unwrap_or_default()),
            pronunciation: clean_text(self.name_pronounciation.as_deref().unwrap_or_default()),
            meaning,
            // The payload has no stable absolute image URL.
            picture: String::new(),
            content: clean_text(content.trim()),
            ..Default::default()
        };

        let shape = self.body_shape.and_then(|b| b.body_shape);
        if let Some(shape) = shape.filter(|s| !s.is_empty()) {
            record.insert("typeOfDinosaur", shape);
        }
        let period = self.period.and_then(|p| p.period);
        if let Some(period) = period.filter(|p| !p.is_empty()) {
            record.insert("period", period);
        }
        if let Some(diet) = self.diet_type_name.filter(|d| !d.is_empty()) {
            record.insert("diet", diet);
        }
        if let Some(length) = format_range(self.length_from, self.length_to, 1, "m") {
            record.insert("length", length);
        }
        if let Some(weight) = format_range(self.mass_from, self.mass_to, 0, "kg") {
            record.insert("weight", weight);
        }

        record
    }
}

/// Render a numeric range as `"<from>–<to> <unit>"`, or `"<from> <unit>"` without
/// an upper bound. `None` when there is no lower bound.
pub fn format_range(from: Option<f64>, to: Option<f64>, precision: usize, unit: &str) -> Option<String> {
    let from = from?;
    Some(match to {
        Some(to) => format!("{from:.precision$}–{to:.precision$} {unit}"),
        None => format!("{from:.precision$} {unit}"),
    })
}

fn strip_html(s: &str) -> String {
    HTML_TAG_RE.replace_all(s, "").trim().to_string()
}
