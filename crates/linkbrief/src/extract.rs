//! HTML metadata extraction
//!
//! Extraction never fails: malformed markup or missing tags degrade to empty
//! strings and safe defaults. The [`Extractor`] trait lets callers swap the
//! implementation; [`HtmlExtractor`] parses the document structurally.

use crate::text::{collapse_whitespace, truncate_chars};
use crate::types::WebMetadata;
use crate::urls::{origin_of, resolve_url};
use scraper::{ElementRef, Html, Node};

/// Maximum characters of body text kept in [`WebMetadata::content`]
pub const MAX_CONTENT_CHARS: usize = 8000;

/// Elements whose subtree never counts as page content
const STRIPPED_ELEMENTS: &[&str] = &["script", "style", "nav", "footer", "header", "aside"];

/// Elements that separate words even when the markup has no whitespace
const BLOCK_ELEMENTS: &[&str] = &[
    "p", "div", "br", "h1", "h2", "h3", "h4", "h5", "h6", "li", "tr", "td", "th", "section",
    "article", "main", "ul", "ol", "table", "blockquote", "pre", "figure", "figcaption", "dd",
    "dt",
];

/// Turns raw HTML into page metadata
pub trait Extractor: Send + Sync {
    /// Identifier for logging
    fn name(&self) -> &'static str;

    /// Extract metadata from `html` fetched from `base_url`
    ///
    /// Must be pure: the same input always yields the same output.
    fn extract(&self, html: &str, base_url: &str) -> WebMetadata;
}

/// Structural HTML extractor built on `scraper`
#[derive(Debug, Clone)]
pub struct HtmlExtractor {
    max_content_chars: usize,
}

impl HtmlExtractor {
    /// Create an extractor with the default content bound
    pub fn new() -> Self {
        Self {
            max_content_chars: MAX_CONTENT_CHARS,
        }
    }

    /// Override the content bound
    pub fn with_max_content_chars(mut self, max_chars: usize) -> Self {
        self.max_content_chars = max_chars;
        self
    }
}

impl Default for HtmlExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for HtmlExtractor {
    fn name(&self) -> &'static str {
        "html"
    }

    fn extract(&self, html: &str, base_url: &str) -> WebMetadata {
        let document = Html::parse_document(html);
        let page = PageScan::scan(&document);

        let title = page
            .title
            .clone()
            .or_else(|| page.meta("property", "og:title"))
            .or_else(|| page.meta("name", "title"))
            .unwrap_or_else(|| base_url.to_string());

        let description = page
            .meta("name", "description")
            .or_else(|| page.meta("property", "og:description"))
            .unwrap_or_default();

        let image_url = page
            .meta("property", "og:image")
            .or_else(|| page.meta("name", "image"))
            .map(|candidate| resolve_url(&candidate, base_url))
            .filter(|resolved| !resolved.is_empty());

        let favicon_url = page
            .icon("icon")
            .or_else(|| page.icon("shortcut icon"))
            .map(|candidate| resolve_url(&candidate, base_url))
            .filter(|resolved| !resolved.is_empty())
            .or_else(|| origin_of(base_url).map(|origin| format!("{}/favicon.ico", origin)));

        let content = page
            .body
            .map(|body| visible_text(body, self.max_content_chars))
            .unwrap_or_default();

        WebMetadata {
            title,
            description,
            image_url,
            favicon_url,
            content,
            url: base_url.to_string(),
        }
    }
}

/// Single pass over the document collecting the tags we care about
struct PageScan<'a> {
    title: Option<String>,
    /// `(attribute, key, content)` for every `<meta>` with content
    metas: Vec<(&'static str, String, String)>,
    /// `(rel, href)` for every `<link>` with an href
    links: Vec<(String, String)>,
    body: Option<ElementRef<'a>>,
}

impl<'a> PageScan<'a> {
    fn scan(document: &'a Html) -> Self {
        let mut page = PageScan {
            title: None,
            metas: Vec::new(),
            links: Vec::new(),
            body: None,
        };

        for node in document.root_element().descendants() {
            let Some(element) = ElementRef::wrap(node) else {
                continue;
            };
            let value = element.value();
            match value.name() {
                "title" if page.title.is_none() => {
                    let text = collapse_whitespace(&element.text().collect::<String>());
                    if !text.is_empty() {
                        page.title = Some(text);
                    }
                }
                "meta" => {
                    let Some(content) = value.attr("content").map(str::trim) else {
                        continue;
                    };
                    if content.is_empty() {
                        continue;
                    }
                    for attr in ["property", "name"] {
                        if let Some(key) = value.attr(attr) {
                            page.metas.push((
                                attr,
                                key.trim().to_ascii_lowercase(),
                                content.to_string(),
                            ));
                        }
                    }
                }
                "link" => {
                    if let (Some(rel), Some(href)) = (value.attr("rel"), value.attr("href")) {
                        let href = href.trim();
                        if !href.is_empty() {
                            let rel = collapse_whitespace(rel).to_ascii_lowercase();
                            page.links.push((rel, href.to_string()));
                        }
                    }
                }
                "body" if page.body.is_none() => page.body = Some(element),
                _ => {}
            }
        }

        page
    }

    /// First non-empty `content` of a `<meta>` whose `attr` equals `key`
    fn meta(&self, attr: &str, key: &str) -> Option<String> {
        self.metas
            .iter()
            .find(|(a, k, _)| *a == attr && k == key)
            .map(|(_, _, content)| content.clone())
    }

    /// First `href` of a `<link>` whose `rel` equals `rel`
    fn icon(&self, rel: &str) -> Option<String> {
        self.links
            .iter()
            .find(|(r, _)| r == rel)
            .map(|(_, href)| href.clone())
    }
}

/// Text of `body` outside stripped elements, whitespace-collapsed and bounded
fn visible_text(body: ElementRef<'_>, max_chars: usize) -> String {
    let mut raw = String::new();
    // `None` marks the end of a block element
    let mut stack = vec![Some(*body)];

    while let Some(entry) = stack.pop() {
        let Some(node) = entry else {
            raw.push(' ');
            continue;
        };
        match node.value() {
            Node::Text(text) => raw.push_str(text),
            Node::Element(element) if STRIPPED_ELEMENTS.contains(&element.name()) => {}
            Node::Element(element) => {
                if BLOCK_ELEMENTS.contains(&element.name()) {
                    raw.push(' ');
                    stack.push(None);
                }
                stack.extend(node.children().rev().map(Some));
            }
            _ => {}
        }
    }

    let collapsed = collapse_whitespace(&raw);
    truncate_chars(&collapsed, max_chars).trim_end().to_string()
}
