//! Cleanup passes for HTML extracts.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Rewrite every root-relative `href` in the body into an absolute URL
/// against `origin` (`scheme://host[:port]`, no trailing slash).
///
/// Absolute and protocol-relative (`//host/...`) hrefs are left untouched.
/// This is a textual single-pass rewrite over the body, not a DOM
/// transform: link text, other attributes, and element content stay as-is.
pub fn absolutize_links(body: &str, origin: &str) -> String {
    static HREF_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r#"href="(/[^"]*)""#).expect("valid regex"));

    let origin = origin.trim_end_matches('/');
    HREF_RE
        .replace_all(body, |caps: &Captures| {
            let path = &caps[1];
            if path.starts_with("//") {
                // Protocol-relative: the browser resolves the host.
                caps[0].to_string()
            } else {
                format!("href=\"{origin}{path}\"")
            }
        })
        .to_string()
}
