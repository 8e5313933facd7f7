//! Remote-extract retrieval pipeline for InterwikiExtracts.
//!
//! One invocation is a straight-line flow with no shared mutable state:
//! parse the raw tokens, resolve the remote endpoint, pick the output
//! format, issue one GET, disambiguate the response shape, post-process
//! the body. Failures surface as [`ExtractError`] values that the
//! invocation boundary turns into a minimal error marker.

mod fetcher;
mod params;
mod resolver;

use interwiki_cleanup::{TextOptions, absolutize_links, clean_text};
use interwiki_shared::{
    Extract, InvocationParams, MessageRenderer, ParamValue, PrefixDirectory, RenderHint, Result,
    error_marker,
};
use tracing::{debug, instrument, warn};

pub use fetcher::{ClientOptions, Fetcher, USER_AGENT};
pub use params::{parse_params, take_format};
pub use resolver::{DEFAULT_WIKI, ResolvedEndpoint, resolve_endpoint};

// ---------------------------------------------------------------------------
// ExtractClient
// ---------------------------------------------------------------------------

/// Entry point for extract invocations.
pub struct ExtractClient {
    fetcher: Fetcher,
}

impl ExtractClient {
    pub fn new(opts: &ClientOptions) -> Result<Self> {
        Ok(Self {
            fetcher: Fetcher::new(opts)?,
        })
    }

    /// Run one invocation: `title` is the subject page, `raw_args` the raw
    /// `key=value` / flag tokens from the embed site, `directory` the
    /// host's interwiki prefix directory.
    #[instrument(skip_all, fields(%title))]
    pub async fn extract(
        &self,
        title: &str,
        raw_args: &[String],
        directory: &dyn PrefixDirectory,
    ) -> Result<Extract> {
        let mut params = parse_params(raw_args);
        let endpoint = resolve_endpoint(&mut params, directory)?;
        let format = take_format(&mut params);
        debug!(%format, endpoint = %endpoint.as_str(), "dispatching extract fetch");

        let raw = self.fetcher.fetch(&endpoint, title, &params, format).await?;
        Ok(post_process(raw, &endpoint, &params))
    }

    /// The invocation boundary: like [`extract`](Self::extract), but a
    /// failure becomes the minimal `<span class="error">…</span>` marker
    /// rendered through the host's message catalog. No partial output ever
    /// accompanies an error.
    pub async fn render(
        &self,
        title: &str,
        raw_args: &[String],
        directory: &dyn PrefixDirectory,
        renderer: &dyn MessageRenderer,
    ) -> Extract {
        match self.extract(title, raw_args, directory).await {
            Ok(extract) => extract,
            Err(err) => {
                warn!(key = err.key(), "extract failed");
                Extract::html(error_marker(&err, renderer))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Post-processing dispatch
// ---------------------------------------------------------------------------

/// Apply the format-specific cleanup to a fetched extract.
fn post_process(extract: Extract, endpoint: &ResolvedEndpoint, params: &InvocationParams) -> Extract {
    match extract.hint {
        Some(RenderHint::Html) => {
            Extract::html(absolutize_links(&extract.body, &endpoint.origin()))
        }
        Some(RenderHint::Wikitext) => extract,
        None => {
            let opts = TextOptions {
                section: params.get("section").and_then(ParamValue::non_empty),
                paragraphs: paragraph_count(params.get("paragraphs")),
            };
            Extract::text(clean_text(&extract.body, &opts))
        }
    }
}

/// Interpret the `paragraphs` param: a bare flag means one paragraph, a
/// positive numeric string means that many, anything else disables slicing.
fn paragraph_count(value: Option<&ParamValue>) -> Option<usize> {
    match value? {
        ParamValue::Flag => Some(1),
        ParamValue::Str(s) => s.trim().parse::<usize>().ok().filter(|n| *n > 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use interwiki_shared::{EnglishMessages, InterwikiPrefix};
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    fn directory_for(server: &MockServer) -> Vec<InterwikiPrefix> {
        vec![InterwikiPrefix {
            prefix: "mockwiki".into(),
            api: Some(format!("{}/w/api.php", server.uri())),
        }]
    }

    #[test]
    fn paragraph_count_interpretation() {
        assert_eq!(paragraph_count(None), None);
        assert_eq!(paragraph_count(Some(&ParamValue::Flag)), Some(1));
        assert_eq!(paragraph_count(Some(&ParamValue::Str("3".into()))), Some(3));
        assert_eq!(paragraph_count(Some(&ParamValue::Str("0".into()))), None);
        assert_eq!(paragraph_count(Some(&ParamValue::Str("".into()))), None);
        assert_eq!(paragraph_count(Some(&ParamValue::Str("many".into()))), None);
    }

    #[tokio::test]
    async fn text_pipeline_cleans_and_slices() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .and(query_param("action", "query"))
            .and(query_param("titles", "Science"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "query": {"pages": [{
                    "extract": "<link rel=x><p>Hello</p>\nWorld"
                }]}
            })))
            .mount(&server)
            .await;

        let client = ExtractClient::new(&ClientOptions::default()).unwrap();
        let extract = client
            .extract(
                "Science",
                &args(&["wiki=mockwiki", "format=text", "paragraphs=1"]),
                &directory_for(&server),
            )
            .await
            .unwrap();

        assert_eq!(extract.body, "<p>Hello</p>");
        assert_eq!(extract.hint, None);
    }

    #[tokio::test]
    async fn html_pipeline_rewrites_root_relative_links() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .and(query_param("action", "parse"))
            .and(query_param("prop", "text"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "parse": {"text":
                    "<a href=\"/wiki/Science\">in</a> <a href=\"https://other.example/x\">out</a>"
                }
            })))
            .mount(&server)
            .await;

        let client = ExtractClient::new(&ClientOptions::default()).unwrap();
        let extract = client
            .extract("Science", &args(&["wiki=mockwiki"]), &directory_for(&server))
            .await
            .unwrap();

        let origin = server.uri();
        assert!(extract.body.contains(&format!("href=\"{origin}/wiki/Science\"")));
        assert!(extract.body.contains("href=\"https://other.example/x\""));
        assert_eq!(extract.hint, Some(RenderHint::Html));
    }

    #[tokio::test]
    async fn wiki_pipeline_passes_body_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("prop", "wikitext"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "parse": {"wikitext": "''Hello'' [[World]]\n"}
            })))
            .mount(&server)
            .await;

        let client = ExtractClient::new(&ClientOptions::default()).unwrap();
        let extract = client
            .extract(
                "Science",
                &args(&["wiki=mockwiki", "format=wiki"]),
                &directory_for(&server),
            )
            .await
            .unwrap();

        assert_eq!(extract.body, "''Hello'' [[World]]\n");
        assert_eq!(extract.hint, Some(RenderHint::Wikitext));
    }

    #[tokio::test]
    async fn render_converts_failure_to_error_marker() {
        let client = ExtractClient::new(&ClientOptions::default()).unwrap();
        let extract = client
            .render(
                "Science",
                &args(&["wiki=nowhere"]),
                &Vec::<InterwikiPrefix>::new(),
                &EnglishMessages,
            )
            .await;

        assert_eq!(
            extract.body,
            "<span class=\"error\">No API endpoint found for the requested wiki.</span>"
        );
    }

    #[tokio::test]
    async fn missing_page_surfaces_missing_title_marker() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "query": {"pages": [{"missing": true}]}
            })))
            .mount(&server)
            .await;

        let client = ExtractClient::new(&ClientOptions::default()).unwrap();
        let extract = client
            .render(
                "Nonexistent",
                &args(&["wiki=mockwiki", "format=text"]),
                &directory_for(&server),
                &EnglishMessages,
            )
            .await;

        assert_eq!(
            extract.body,
            "<span class=\"error\">The requested page does not exist.</span>"
        );
    }
}
