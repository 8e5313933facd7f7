//! User-facing error message rendering.
//!
//! The pipeline only produces a stable message key; turning that key into
//! localized text is the host's job. [`MessageRenderer`] is the injected
//! capability, [`EnglishMessages`] the built-in catalog used by the CLI.

use crate::error::ExtractError;

/// Namespace prefix for all message lookup names.
pub const MESSAGE_PREFIX: &str = "interwikiextracts";

/// Turns a message lookup name into user-facing text.
pub trait MessageRenderer {
    /// Render the message registered under `name`.
    fn render(&self, name: &str) -> String;
}

/// Built-in English message catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishMessages;

impl MessageRenderer for EnglishMessages {
    fn render(&self, name: &str) -> String {
        let text = match name {
            "interwikiextracts-error" => "Could not retrieve the requested extract.",
            "interwikiextracts-no-api" => "No API endpoint found for the requested wiki.",
            "interwikiextracts-missing-title" => "The requested page does not exist.",
            "interwikiextracts-no-such-section" => "The requested section does not exist.",
            "interwikiextracts-invalid-section" => "The requested section is invalid.",
            // Unknown names render as a missing-message placeholder.
            _ => return format!("\u{29fc}{name}\u{29fd}"),
        };
        text.to_string()
    }
}

/// Convert an error into the minimal host-facing marker fragment.
pub fn error_marker(err: &ExtractError, renderer: &dyn MessageRenderer) -> String {
    let message = renderer.render(&format!("{MESSAGE_PREFIX}-{}", err.key()));
    format!("<span class=\"error\">{message}</span>")
}
