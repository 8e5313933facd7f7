//! Cleanup passes for plain-text extracts.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Slicing options for a text extract, taken from the invocation params.
#[derive(Debug, Clone, Default)]
pub struct TextOptions<'a> {
    /// Reduce the body to the named section, if present.
    pub section: Option<&'a str>,
    /// Keep only the first n `<p>` blocks, if present.
    pub paragraphs: Option<usize>,
}

/// Run the full text cleanup pipeline.
///
/// Order matters: tag stripping and newline collapse happen before any
/// section or paragraph slicing, so the slicing regexes see a single
/// unbroken line.
pub fn clean_text(body: &str, opts: &TextOptions) -> String {
    let mut result = strip_link_tags(body);
    result = collapse_newlines(&result);

    if let Some(section) = opts.section {
        result = slice_section(&result, section);
    }

    if let Some(count) = opts.paragraphs {
        result = limit_paragraphs(&result, count);
    }

    result
}

// ---------------------------------------------------------------------------
// Pass 1: Strip <link> tags
// ---------------------------------------------------------------------------

/// Remove every `<link ...>` tag from the body. These are style/template
/// injection artifacts the TextExtracts API leaves behind.
fn strip_link_tags(body: &str) -> String {
    static LINK_TAG_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)<link[^>]*>").expect("valid regex"));

    LINK_TAG_RE.replace_all(body, "").to_string()
}

// ---------------------------------------------------------------------------
// Pass 2: Collapse newlines
// ---------------------------------------------------------------------------

/// Remove all newline characters; the extract becomes one unbroken line.
fn collapse_newlines(body: &str) -> String {
    body.replace(['\r', '\n'], "")
}

// ---------------------------------------------------------------------------
// Pass 3: Section slicing
// ---------------------------------------------------------------------------

/// Reduce the body to the content between the heading whose inner `<span>`
/// text equals `section` (case-sensitive exact match) and the next heading
/// at any level.
///
/// When the pattern does not match (unknown section name, or the matched
/// heading is the last one in the body), the body is returned unchanged.
fn slice_section(body: &str, section: &str) -> String {
    let pattern = format!(
        r"<h[1-6][^>]*>[^<]*<span[^>]*>{}</span>.*?</h[1-6]>(.*?)<h[1-6]",
        regex::escape(section)
    );

    let Ok(re) = Regex::new(&pattern) else {
        debug!(section, "section pattern failed to compile, keeping whole body");
        return body.to_string();
    };

    match re.captures(body) {
        Some(caps) => caps[1].to_string(),
        None => {
            debug!(section, "section heading not found, keeping whole body");
            body.to_string()
        }
    }
}

// ---------------------------------------------------------------------------
// Pass 4: Paragraph limiting
// ---------------------------------------------------------------------------

/// Keep only the first `count` `<p>...</p>` blocks, concatenated in
/// document order. Everything outside those blocks is discarded.
fn limit_paragraphs(body: &str, count: usize) -> String {
    static PARA_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?is)<p[^>]*>.*?</p>").expect("valid regex"));

    PARA_RE
        .find_iter(body)
        .take(count)
        .map(|m| m.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_link_tags_removes_style_artifacts() {
        let body = r#"<link rel="mw-deduplicated-inline-style" href="mw-data:x"><p>Hi</p>"#;
        assert_eq!(strip_link_tags(body), "<p>Hi</p>");
    }

    #[test]
    fn collapse_newlines_removes_all() {
        assert_eq!(collapse_newlines("a\nb\r\nc"), "abc");
    }

    #[test]
    fn slice_section_extracts_between_headings() {
        let body = concat!(
            "<p>Lead.</p>",
            "<h2><span class=\"mw-headline\">History</span></h2>",
            "<p>Founded long ago.</p>",
            "<h2><span class=\"mw-headline\">Geography</span></h2>",
            "<p>Flat.</p>",
        );
        assert_eq!(slice_section(body, "History"), "<p>Founded long ago.</p>");
    }

    #[test]
    fn slice_section_is_case_sensitive() {
        let body = "<h2><span>History</span></h2><p>x</p><h2><span>Next</span></h2>";
        // No match for a differently-cased name: whole body kept.
        assert_eq!(slice_section(body, "history"), body);
    }

    #[test]
    fn slice_section_without_following_heading_keeps_body() {
        let body = "<h2><span>History</span></h2><p>Tail content.</p>";
        assert_eq!(slice_section(body, "History"), body);
    }

    #[test]
    fn limit_paragraphs_keeps_first_n() {
        let body = "<p>One</p>between<p>Two</p><p>Three</p>";
        assert_eq!(limit_paragraphs(body, 2), "<p>One</p><p>Two</p>");
    }

    #[test]
    fn limit_paragraphs_is_case_insensitive_and_spans_lines() {
        let body = "<P>First\nline</P><p>Second</p>";
        assert_eq!(limit_paragraphs(body, 1), "<P>First\nline</P>");
    }

    #[test]
    fn limit_paragraphs_discards_prose_outside_blocks() {
        let body = "intro text <p>Kept</p> trailing text";
        assert_eq!(limit_paragraphs(body, 5), "<p>Kept</p>");
    }

    #[test]
    fn clean_text_applies_passes_in_order() {
        // Newline collapse and link-strip must run before paragraph slicing.
        let body = "<link rel=x><p>Hello</p>\nWorld";
        let opts = TextOptions {
            section: None,
            paragraphs: Some(1),
        };
        assert_eq!(clean_text(body, &opts), "<p>Hello</p>");
    }

    #[test]
    fn clean_text_without_options_only_normalizes() {
        let body = "<link rel=x>line one\nline two";
        let opts = TextOptions::default();
        assert_eq!(clean_text(body, &opts), "line oneline two");
    }

    #[test]
    fn clean_text_section_then_paragraphs() {
        let body = concat!(
            "<h2><span>Intro</span></h2><p>A</p>",
            "<h2><span>Body</span></h2><p>B1</p><p>B2</p><p>B3</p>",
            "<h2><span>End</span></h2><p>C</p>",
        );
        let opts = TextOptions {
            section: Some("Body"),
            paragraphs: Some(2),
        };
        assert_eq!(clean_text(body, &opts), "<p>B1</p><p>B2</p>");
    }
}
