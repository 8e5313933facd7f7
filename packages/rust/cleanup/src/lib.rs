//! Format-specific post-processing for fetched extracts.
//!
//! Each pass is a function `&str -> String` applied in sequence, mirroring
//! the shape of a remote extract after it leaves the fetcher:
//! - text extracts get tag stripping, newline collapse, and optional
//!   section/paragraph slicing ([`clean_text`])
//! - HTML extracts get root-relative links rewritten against the remote
//!   site's origin ([`absolutize_links`])
//! - wikitext passes through untouched.

mod html;
mod text;

pub use html::absolutize_links;
pub use text::{TextOptions, clean_text};
