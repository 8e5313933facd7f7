//! Remote extract fetching.
//!
//! Builds the format-specific remote query, issues one GET against the
//! resolved endpoint, and disambiguates the JSON response shape into the
//! underlying content field. Every transport or remote failure maps into
//! the typed error taxonomy; the caller never sees a raw HTTP or JSON
//! decode failure.

use std::time::Duration;

use interwiki_shared::{Extract, ExtractError, ExtractFormat, InvocationParams, Result};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::resolver::ResolvedEndpoint;

/// User-Agent string identifying this client to remote APIs.
pub const USER_AGENT: &str = concat!("InterwikiExtracts/", env!("CARGO_PKG_VERSION"));

/// Parameter names passed through from the invocation into a TextExtracts
/// query, as `(invocation key, remote key)` pairs.
const TEXT_PASSTHROUGH: &[(&str, &str)] = &[
    ("chars", "exchars"),
    ("sentences", "exsentences"),
    ("intro", "exintro"),
    ("plaintext", "explaintext"),
    ("sectionformat", "exsectionformat"),
];

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// HTTP client configuration for the fetcher.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// User-Agent header value. Process-wide fixed configuration in
    /// production; injectable for tests.
    pub user_agent: String,
    /// Timeout for the outbound request in seconds.
    pub timeout_secs: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            user_agent: USER_AGENT.to_string(),
            timeout_secs: 30,
        }
    }
}

// ---------------------------------------------------------------------------
// Fetcher
// ---------------------------------------------------------------------------

/// Issues remote extract queries over a shared HTTP client.
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new(opts: &ClientOptions) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&opts.user_agent)
            .timeout(Duration::from_secs(opts.timeout_secs))
            .build()
            .map_err(|e| {
                debug!(error = %e, "failed to build HTTP client");
                ExtractError::Generic
            })?;

        Ok(Self { client })
    }

    /// Fetch the raw extract for `title` from `endpoint`.
    ///
    /// The returned [`Extract`] carries the content field the response
    /// shape selected, tagged with its render hint; post-processing is the
    /// caller's job.
    #[instrument(skip_all, fields(endpoint = %endpoint.as_str(), %title, %format))]
    pub async fn fetch(
        &self,
        endpoint: &ResolvedEndpoint,
        title: &str,
        params: &InvocationParams,
        format: ExtractFormat,
    ) -> Result<Extract> {
        let query = build_query(format, title, params);
        let value = self.query_remote(endpoint, &query).await?;
        disambiguate(&value)
    }

    /// Issue the GET and parse the body as JSON.
    async fn query_remote(
        &self,
        endpoint: &ResolvedEndpoint,
        query: &[(String, String)],
    ) -> Result<Value> {
        let response = self
            .client
            .get(endpoint.as_str())
            .query(query)
            .send()
            .await
            .map_err(|e| {
                debug!(error = %e, "transport failure");
                ExtractError::Generic
            })?;

        let status = response.status();
        if !status.is_success() {
            debug!(%status, "remote API returned non-success status");
            return Err(ExtractError::Generic);
        }

        let value: Value = response.json().await.map_err(|e| {
            debug!(error = %e, "response body is not valid JSON");
            ExtractError::Generic
        })?;

        if value.is_null() {
            debug!("response body decoded to null");
            return Err(ExtractError::Generic);
        }

        Ok(value)
    }
}

// ---------------------------------------------------------------------------
// Query construction
// ---------------------------------------------------------------------------

/// Build the remote query for one request. Empty and unset invocation
/// values are dropped; bare flags serialize as `1`.
pub(crate) fn build_query(
    format: ExtractFormat,
    title: &str,
    params: &InvocationParams,
) -> Vec<(String, String)> {
    match format {
        ExtractFormat::Html | ExtractFormat::Wiki => parse_query(format, title, params),
        ExtractFormat::Text => extracts_query(title, params),
    }
}

/// Query for the parse API (`prop=text` or `prop=wikitext`).
fn parse_query(
    format: ExtractFormat,
    title: &str,
    params: &InvocationParams,
) -> Vec<(String, String)> {
    let mut query = vec![
        ("action".into(), "parse".into()),
        ("format".into(), "json".into()),
        ("formatversion".into(), "2".into()),
        ("redirects".into(), "1".into()),
    ];

    if format == ExtractFormat::Html {
        query.push(("disableeditsection".into(), "1".into()));
        query.push(("prop".into(), "text".into()));
    } else {
        query.push(("prop".into(), "wikitext".into()));
    }

    if let Some(section) = passthrough(params, "section") {
        query.push(("section".into(), section.into()));
    }

    // oldid and page are mutually exclusive; oldid wins.
    match passthrough(params, "oldid") {
        Some(oldid) => query.push(("oldid".into(), oldid.into())),
        None => query.push(("page".into(), title.into())),
    }

    query
}

/// Query for the TextExtracts API.
fn extracts_query(title: &str, params: &InvocationParams) -> Vec<(String, String)> {
    let mut query = vec![
        ("action".into(), "query".into()),
        ("titles".into(), title.into()),
        ("prop".into(), "extracts".into()),
        ("exlimit".into(), "1".into()),
        ("redirects".into(), "true".into()),
        ("format".into(), "json".into()),
        ("formatversion".into(), "2".into()),
    ];

    for (from, to) in TEXT_PASSTHROUGH {
        if let Some(value) = passthrough(params, from) {
            query.push(((*to).into(), value.into()));
        }
    }

    query
}

/// A param's query-string form, if present and non-empty.
fn passthrough<'a>(params: &'a InvocationParams, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .map(|value| value.query_value())
        .filter(|value| !value.is_empty())
}

// ---------------------------------------------------------------------------
// Response disambiguation
// ---------------------------------------------------------------------------

/// Disambiguate a remote response into its content field, checked in
/// precedence order: `parse.text`, `parse.wikitext`,
/// `query.pages[0].extract`. Anything else is a remote failure.
fn disambiguate(value: &Value) -> Result<Extract> {
    if let Some(text) = value.pointer("/parse/text").and_then(Value::as_str) {
        return Ok(Extract::html(text));
    }
    if let Some(wikitext) = value.pointer("/parse/wikitext").and_then(Value::as_str) {
        return Ok(Extract::wikitext(wikitext));
    }
    if let Some(extract) = value
        .pointer("/query/pages/0/extract")
        .and_then(Value::as_str)
    {
        return Ok(Extract::text(extract));
    }

    Err(remote_error(value))
}

/// Map a contentless response onto the error taxonomy.
fn remote_error(value: &Value) -> ExtractError {
    if let Some(code) = value.pointer("/error/code").and_then(Value::as_str) {
        debug!(code, "remote API error");
        // Section lookup failures surface from the API as invalidsection
        // or missingtitle; unknown codes fall through to the generic error.
        return match code {
            "missingtitle" => ExtractError::MissingTitle,
            "invalidsection" => ExtractError::InvalidSection,
            _ => ExtractError::Generic,
        };
    }

    if value
        .pointer("/query/pages/0/missing")
        .is_some_and(|missing| missing.as_bool().unwrap_or(true))
    {
        debug!("remote page is missing");
        return ExtractError::MissingTitle;
    }

    debug!("response matched no recognized shape");
    ExtractError::Generic
}
