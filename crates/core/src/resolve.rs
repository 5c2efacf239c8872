//! Render-side resolution of stored notification payloads.
//!
//! The UI reads `title`/`message` columns back through [`resolve_text`]:
//! structured envelopes are looked up in the translation catalog and
//! interpolated; anything that cannot be resolved (a legacy row, an
//! unknown key after the suffix fallback) renders the stored string
//! verbatim. This two-level fallback is what keeps rows written before a
//! catalog change readable.

use std::collections::{BTreeMap, HashMap};

use crate::messages::TITLE_SUFFIX;
use crate::payload::{self, DecodedMessage, MessageParams};

/// Source of localized message templates, keyed by translation key.
///
/// Templates use `{param}` placeholders matching the payload's param names.
pub trait TranslationCatalog {
    fn lookup(&self, key: &str) -> Option<&str>;
}

impl TranslationCatalog for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl TranslationCatalog for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

/// A notification's title and body, resolved for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNotification {
    pub title: String,
    pub body: String,
}

/// Resolve one stored column into display text.
///
/// Decode the payload; for structured envelopes look the key up (direct,
/// then the `_title`-suffix swap) and interpolate. On any miss the stored
/// string comes back verbatim.
pub fn resolve_text(catalog: &dyn TranslationCatalog, stored: &str) -> String {
    match payload::decode(stored) {
        DecodedMessage::Legacy { text } => text,
        DecodedMessage::Structured { key, params } => match lookup_with_fallback(catalog, &key) {
            Some(template) => interpolate(template, &params),
            None => stored.to_string(),
        },
    }
}

/// Resolve a notification's stored title and message columns together.
pub fn resolve_pair(
    catalog: &dyn TranslationCatalog,
    title: &str,
    message: &str,
) -> RenderedNotification {
    RenderedNotification {
        title: resolve_text(catalog, title),
        body: resolve_text(catalog, message),
    }
}

/// Try the key directly, then its suffix-swapped form: a `*_title` key
/// falls back to its base entry, any other key to its `_title` entry.
fn lookup_with_fallback<'a>(catalog: &'a dyn TranslationCatalog, key: &str) -> Option<&'a str> {
    if let Some(template) = catalog.lookup(key) {
        return Some(template);
    }
    let alternate = match key.strip_suffix(TITLE_SUFFIX) {
        Some(base) => base.to_string(),
        None => format!("{key}{TITLE_SUFFIX}"),
    };
    catalog.lookup(&alternate)
}

/// Replace each `{name}` placeholder with its param value. Placeholders
/// without a matching param are left as-is.
fn interpolate(template: &str, params: &MessageParams) -> String {
    let mut out = template.to_string();
    for (name, value) in params {
        out = out.replace(&format!("{{{name}}}"), value);
    }
    out
}
