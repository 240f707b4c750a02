//! Content extraction from raw HTML.
//!
//! Regex-based, tolerant of malformed markup. Worst case is empty
//! output, never an error. Output size is bounded so downstream prompt
//! building works with predictable budgets.

use indexmap::IndexMap;
use regex::Regex;

use crate::types::PageLink;

/// Upper bound on extracted main-page text, in characters.
pub const MAX_CONTENT_CHARS: usize = 50_000;

/// Keywords that mark an anchor as relevant for an ethics review.
const LINK_KEYWORDS: [&str; 5] = ["privacy", "terms", "about", "contact", "policy"];

/// Truncate a string to at most `max` characters, on a char boundary.
pub(crate) fn truncate_chars(mut s: String, max: usize) -> String {
    if let Some((idx, _)) = s.char_indices().nth(max) {
        s.truncate(idx);
    }
    s
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}

/// Extract readable text from HTML.
///
/// Removes script, style, nav and footer blocks entirely, strips the
/// remaining tags, decodes common entities and collapses whitespace.
/// The result is capped at [`MAX_CONTENT_CHARS`] characters.
pub fn extract_text(html: &str) -> String {
    let mut text = html.to_string();

    // Remove blocks whose text content is never user-facing prose
    let script_pattern = Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap();
    let style_pattern = Regex::new(r"(?is)<style[^>]*>.*?</style>").unwrap();
    let nav_pattern = Regex::new(r"(?is)<nav[^>]*>.*?</nav>").unwrap();
    let footer_pattern = Regex::new(r"(?is)<footer[^>]*>.*?</footer>").unwrap();
    text = script_pattern.replace_all(&text, " ").to_string();
    text = style_pattern.replace_all(&text, " ").to_string();
    text = nav_pattern.replace_all(&text, " ").to_string();
    text = footer_pattern.replace_all(&text, " ").to_string();

    // Strip remaining tags
    let tag_pattern = Regex::new(r"<[^>]+>").unwrap();
    text = tag_pattern.replace_all(&text, " ").to_string();

    text = decode_entities(&text);

    // Collapse whitespace runs to single spaces
    let ws_pattern = Regex::new(r"\s+").unwrap();
    text = ws_pattern.replace_all(&text, " ").trim().to_string();

    truncate_chars(text, MAX_CONTENT_CHARS)
}

fn attr_value(tag: &str, attr: &str) -> Option<String> {
    let pattern = Regex::new(&format!(
        r#"(?i)\b{}\s*=\s*["']([^"']*)["']"#,
        regex::escape(attr)
    ))
    .unwrap();
    pattern
        .captures(tag)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}

/// Extract meta tags keyed by their `name` or `property` attribute.
///
/// Tags are scanned in document order; when a key repeats, the last
/// occurrence wins while the key keeps its first position.
pub fn extract_metadata(html: &str) -> IndexMap<String, String> {
    let mut metadata = IndexMap::new();

    let meta_pattern = Regex::new(r"(?is)<meta\b[^>]*>").unwrap();
    for tag in meta_pattern.find_iter(html) {
        let tag = tag.as_str();
        let key = match attr_value(tag, "name").or_else(|| attr_value(tag, "property")) {
            Some(key) if !key.is_empty() => key,
            _ => continue,
        };
        let Some(content) = attr_value(tag, "content") else {
            continue;
        };
        metadata.insert(key, decode_entities(&content));
    }

    metadata
}

/// Extract anchors whose href or visible text mentions a review keyword.
///
/// Keyword matching is case-insensitive; the recorded text and href are
/// kept as they appear (text is tag-stripped and trimmed).
pub fn extract_important_links(html: &str) -> Vec<PageLink> {
    let mut links = Vec::new();

    let anchor_pattern =
        Regex::new(r#"(?is)<a\b[^>]*\bhref\s*=\s*["']([^"']*)["'][^>]*>(.*?)</a>"#).unwrap();
    let tag_pattern = Regex::new(r"<[^>]+>").unwrap();
    let ws_pattern = Regex::new(r"\s+").unwrap();

    for cap in anchor_pattern.captures_iter(html) {
        let href = cap.get(1).map(|m| m.as_str()).unwrap_or_default();
        let inner = cap.get(2).map(|m| m.as_str()).unwrap_or_default();

        let text = tag_pattern.replace_all(inner, " ");
        let text = decode_entities(&text);
        let text = ws_pattern.replace_all(text.trim(), " ").to_string();

        let href_lower = href.to_lowercase();
        let text_lower = text.to_lowercase();
        let relevant = LINK_KEYWORDS
            .iter()
            .any(|kw| href_lower.contains(kw) || text_lower.contains(kw));

        if relevant {
            links.push(PageLink::new(text, href));
        }
    }

    links
}

/// Extract the document title from HTML.
pub fn extract_title(html: &str) -> Option<String> {
    let title_pattern = Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap();
    title_pattern
        .captures(html)
        .and_then(|cap| cap.get(1))
        .map(|m| decode_entities(m.as_str()).trim().to_string())
        .filter(|t| !t.is_empty())
}
