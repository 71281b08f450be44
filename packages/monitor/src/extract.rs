//! Listing-count extraction from page markup.
//!
//! The monitored pages render the number of open listings as a bare
//! number somewhere in the main content, usually deep inside nested
//! wrapper divs. The heuristic here: collect every paragraph-like
//! element whose visible text is purely numeric, then take the most
//! deeply nested one. Counters in headers, footers and inline scripts
//! sit much shallower in the tree, so depth is a better discriminator
//! than any site-specific selector.

use scraper::{ElementRef, Html, Selector};

/// Candidate selectors for the main content region, tried in order.
const MAIN_CONTENT_SELECTORS: &[&str] = &[
    "main",
    "article",
    "[role='main']",
    "#content",
    "#main",
    ".content",
    ".main",
];

/// Elements that can carry the count as their text.
const PARAGRAPH_LIKE: &str = "p, div, span, li, td, dd, h1, h2, h3, h4, h5, h6, strong, b";

/// Extract the listing count from raw page markup.
///
/// Returns `None` when no paragraph-like element in the main content
/// region has purely numeric text. Ties in depth keep the first element
/// in document order.
pub fn extract_listing_count(html: &str) -> Option<u64> {
    let document = Html::parse_document(html);
    let region = main_content_region(&document);

    let selector = Selector::parse(PARAGRAPH_LIKE).ok()?;

    let mut best: Option<(usize, u64)> = None;
    for element in region.select(&selector) {
        let text = visible_text(element);
        let trimmed = text.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }

        // Counts that overflow u64 are noise, not listing counts.
        let Ok(count) = trimmed.parse::<u64>() else {
            continue;
        };

        let depth = element.ancestors().count();
        match best {
            Some((max_depth, _)) if depth <= max_depth => {}
            _ => best = Some((depth, count)),
        }
    }

    best.map(|(_, count)| count)
}

/// Locate the main content region, falling back to the document root.
fn main_content_region(document: &Html) -> ElementRef<'_> {
    for css in MAIN_CONTENT_SELECTORS {
        if let Ok(selector) = Selector::parse(css) {
            if let Some(region) = document.select(&selector).next() {
                return region;
            }
        }
    }
    document.root_element()
}

/// Collect the element's text, skipping script/style/noscript subtrees.
fn visible_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    push_visible_text(element, &mut out);
    out
}

fn push_visible_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            if !matches!(child_element.value().name(), "script" | "style" | "noscript") {
                push_visible_text(child_element, out);
            }
        }
    }
}
