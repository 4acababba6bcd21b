//! Anchor extraction from free-text relation fields
//!
//! Relation fields are user-authored markup. The graph only cares about the
//! anchors in them, so extraction turns raw text into a list of [`Anchor`]s
//! behind the [`RelationLinkExtractor`] trait; the graph builder never looks at
//! the text itself.

use regex::Regex;

use crate::error::Result;
use crate::person::PersonId;

/// Prefix of hrefs that point at a person page
pub const PERSON_HREF_PREFIX: &str = "person?id=";

/// One anchor found in a relation field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub href: String,
    /// Visible text, empty when the anchor was never closed
    pub text: String,
}

impl Anchor {
    pub fn new(href: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            text: text.into(),
        }
    }

    /// The person id this anchor refers to, if its href has the person-page
    /// shape and the remainder parses as an id.
    pub fn person_id(&self) -> Option<PersonId> {
        self.href
            .trim()
            .strip_prefix(PERSON_HREF_PREFIX)
            .and_then(|candidate| PersonId::from_string(candidate.trim()).ok())
    }
}

/// Turns a relation field into the anchors it contains, in document order
pub trait RelationLinkExtractor: Send + Sync {
    fn extract_anchors(&self, text: &str) -> Result<Vec<Anchor>>;
}

impl<E: RelationLinkExtractor + ?Sized> RelationLinkExtractor for Box<E> {
    fn extract_anchors(&self, text: &str) -> Result<Vec<Anchor>> {
        (**self).extract_anchors(text)
    }
}

/// Tolerant regex-based anchor scanner
///
/// Accepts `<a>` tags in any case, with the href quoted by `"` or `'` or left
/// unquoted, among any other attributes. Quoted attribute values may contain
/// `>`. Tags without an href are skipped. Visible text is taken up to the
/// matching `</a>` and is left empty when another `<a>` opens first.
pub struct RegexAnchorExtractor {
    open: Regex,
    close: Regex,
    href: Regex,
}

impl RegexAnchorExtractor {
    pub fn new() -> Self {
        Self {
            open: Regex::new(r#"(?i)<a\b((?:[^>"']|"[^"]*"|'[^']*')*)>"#)
                .expect("Invalid anchor pattern"),
            close: Regex::new(r"(?i)</a\s*>").expect("Invalid closing tag pattern"),
            href: Regex::new(r#"(?i)\bhref\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
                .expect("Invalid href pattern"),
        }
    }

    fn href_of(&self, attributes: &str) -> Option<String> {
        let caps = self.href.captures(attributes)?;
        caps.get(1)
            .or_else(|| caps.get(2))
            .or_else(|| caps.get(3))
            .map(|m| m.as_str().to_string())
    }

    /// Text between the end of an opening tag and its `</a>`
    fn visible_text<'t>(&self, text: &'t str, from: usize) -> &'t str {
        let Some(close) = self.close.find_at(text, from) else {
            return "";
        };
        match self.open.find_at(text, from) {
            Some(next) if next.start() < close.start() => "",
            _ => text[from..close.start()].trim(),
        }
    }
}

impl Default for RegexAnchorExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl RelationLinkExtractor for RegexAnchorExtractor {
    fn extract_anchors(&self, text: &str) -> Result<Vec<Anchor>> {
        let mut anchors = Vec::new();

        for cap in self.open.captures_iter(text) {
            let attributes = cap.get(1).map(|m| m.as_str()).unwrap_or_default();
            let Some(href) = self.href_of(attributes) else {
                continue;
            };
            let end = cap.get(0).map(|m| m.end()).unwrap_or_default();
            anchors.push(Anchor::new(href, self.visible_text(text, end)));
        }

        Ok(anchors)
    }
}
