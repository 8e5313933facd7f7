//! Remote endpoint resolution.
//!
//! Decides which remote API base URL an invocation targets: an explicit
//! `api=` override, or a short-name lookup against the host's interwiki
//! prefix directory. Consumes both reserved keys from the params so the
//! format-specific fetch never sees them.

use interwiki_shared::{ExtractError, InvocationParams, ParamValue, PrefixDirectory, Result};
use tracing::{debug, warn};
use url::Url;

/// Short-name used when the invocation names no wiki.
pub const DEFAULT_WIKI: &str = "wikipedia";

/// A resolved remote API base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    url: Url,
}

impl ResolvedEndpoint {
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// The endpoint's origin (`scheme://host[:port]`), used to absolutize
    /// root-relative links in HTML extracts.
    pub fn origin(&self) -> String {
        let scheme = self.url.scheme();
        let host = self.url.host_str().unwrap_or_default();
        match self.url.port() {
            Some(port) => format!("{scheme}://{host}:{port}"),
            None => format!("{scheme}://{host}"),
        }
    }
}

/// Resolve the remote endpoint for one invocation.
///
/// Removes the reserved `api` and `wiki` keys from `params` regardless of
/// which path resolves. A non-empty `api` value wins outright and the
/// directory is never consulted; otherwise the `wiki` short-name (default
/// [`DEFAULT_WIKI`]) is matched exactly against the directory, first match
/// wins. Fails with [`ExtractError::NoApi`] when neither path yields a
/// usable absolute http(s) URL.
pub fn resolve_endpoint(
    params: &mut InvocationParams,
    directory: &dyn PrefixDirectory,
) -> Result<ResolvedEndpoint> {
    let api = params.remove("api");
    let wiki = params.remove("wiki");

    let endpoint = match api.as_ref().and_then(ParamValue::non_empty) {
        Some(override_url) => {
            debug!(endpoint = override_url, "using explicit api override");
            Some(override_url.to_string())
        }
        None => {
            let name = wiki
                .as_ref()
                .and_then(ParamValue::as_str)
                .unwrap_or(DEFAULT_WIKI);
            let found = directory
                .all_prefixes()
                .into_iter()
                .find(|entry| entry.prefix == name)
                .and_then(|entry| entry.api.filter(|api| !api.is_empty()));
            match &found {
                Some(api) => debug!(wiki = name, endpoint = %api, "resolved interwiki prefix"),
                None => warn!(wiki = name, "no interwiki prefix with an API endpoint"),
            }
            found
        }
    };

    let Some(endpoint) = endpoint else {
        return Err(ExtractError::NoApi);
    };

    let url = Url::parse(&endpoint).map_err(|e| {
        warn!(endpoint, error = %e, "endpoint is not a valid URL");
        ExtractError::NoApi
    })?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        warn!(endpoint, "endpoint is not an absolute http(s) URL");
        return Err(ExtractError::NoApi);
    }

    Ok(ResolvedEndpoint { url })
}
