//! Core domain types for the extract retrieval pipeline.

use std::collections::HashMap;

// ---------------------------------------------------------------------------
// ExtractFormat
// ---------------------------------------------------------------------------

/// Output format of a remote extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractFormat {
    /// Plain-text excerpt via the TextExtracts query API.
    Text,
    /// Rendered HTML via the parse API.
    Html,
    /// Raw wikitext via the parse API.
    Wiki,
}

impl ExtractFormat {
    /// Parse a user-supplied format string, case-insensitively.
    ///
    /// Unrecognized values return `None`; the caller keeps the default in
    /// effect rather than raising an error.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "html" => Some(Self::Html),
            "wiki" => Some(Self::Wiki),
            _ => None,
        }
    }
}

impl Default for ExtractFormat {
    fn default() -> Self {
        Self::Html
    }
}

impl std::fmt::Display for ExtractFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Html => "html",
            Self::Wiki => "wiki",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// ParamValue / InvocationParams
// ---------------------------------------------------------------------------

/// Value of a single invocation parameter.
///
/// Parameters arrive as free-form `name=value` tokens or bare flags; a bare
/// flag is a boolean `true` without any string payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// A `name=value` token's trimmed value.
    Str(String),
    /// A bare flag token (`name` with no `=`).
    Flag,
}

impl ParamValue {
    /// The string payload, if this is a `name=value` parameter.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s.as_str()),
            Self::Flag => None,
        }
    }

    /// The string payload if present and non-empty.
    pub fn non_empty(&self) -> Option<&str> {
        self.as_str().filter(|s| !s.is_empty())
    }

    /// Serialized form for a remote query string: the value itself, or the
    /// conventional truthy `1` for bare flags.
    pub fn query_value(&self) -> &str {
        match self {
            Self::Str(s) => s.as_str(),
            Self::Flag => "1",
        }
    }
}

/// Parsed invocation parameters: option name → string or boolean-true value.
///
/// Created fresh per invocation. The resolver and dispatcher remove the
/// reserved keys (`api`, `wiki`, `format`) before the remaining map reaches
/// a format-specific fetch.
pub type InvocationParams = HashMap<String, ParamValue>;

// ---------------------------------------------------------------------------
// RenderHint / Extract
// ---------------------------------------------------------------------------

/// How the host should treat returned content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderHint {
    /// Raw HTML; embed without further escaping.
    Html,
    /// Wikitext; the host re-parses it.
    Wikitext,
}

/// A successfully retrieved (and post-processed) extract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extract {
    /// The extract body.
    pub body: String,
    /// Render hint for the host; `None` for plain text.
    pub hint: Option<RenderHint>,
}

impl Extract {
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            hint: None,
        }
    }

    pub fn html(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            hint: Some(RenderHint::Html),
        }
    }

    pub fn wikitext(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            hint: Some(RenderHint::Wikitext),
        }
    }
}

// ---------------------------------------------------------------------------
// PrefixDirectory
// ---------------------------------------------------------------------------

/// One entry in the interwiki prefix directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterwikiPrefix {
    /// The configured short-name (e.g. `wikipedia`).
    pub prefix: String,
    /// API base URL for the remote site, if one is configured.
    pub api: Option<String>,
}

/// Directory of interwiki short-names, supplied by the host site
/// configuration. Lookup only; the pipeline never mutates it.
pub trait PrefixDirectory {
    /// The full prefix list, in authoritative iteration order.
    fn all_prefixes(&self) -> Vec<InterwikiPrefix>;
}

impl PrefixDirectory for Vec<InterwikiPrefix> {
    fn all_prefixes(&self) -> Vec<InterwikiPrefix> {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parse_is_case_insensitive() {
        assert_eq!(ExtractFormat::parse("TEXT"), Some(ExtractFormat::Text));
        assert_eq!(ExtractFormat::parse("Html"), Some(ExtractFormat::Html));
        assert_eq!(ExtractFormat::parse(" wiki "), Some(ExtractFormat::Wiki));
    }

    #[test]
    fn format_parse_rejects_unknown() {
        assert_eq!(ExtractFormat::parse("jsonfm"), None);
        assert_eq!(ExtractFormat::parse(""), None);
    }

    #[test]
    fn default_format_is_html() {
        assert_eq!(ExtractFormat::default(), ExtractFormat::Html);
    }

    #[test]
    fn flag_serializes_as_one() {
        assert_eq!(ParamValue::Flag.query_value(), "1");
        assert_eq!(ParamValue::Str("0".into()).query_value(), "0");
    }

    #[test]
    fn non_empty_filters_empty_values() {
        assert_eq!(ParamValue::Str(String::new()).non_empty(), None);
        assert_eq!(ParamValue::Str("x".into()).non_empty(), Some("x"));
        assert_eq!(ParamValue::Flag.non_empty(), None);
    }
}
