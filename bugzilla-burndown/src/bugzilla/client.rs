//! Bugzilla REST client.

use super::error::FetchError;
use super::links::with_trailing_slash;
use super::query::SearchQuery;
use crate::bugs::BugSearchResponse;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use std::future::Future;
use tracing::{debug, info, info_span, Instrument};
use url::Url;

/// Mozilla's Bugzilla instance.
pub const DEFAULT_BUGZILLA_URL: &str = "https://bugzilla.mozilla.org/";

/// Fields requested for every bug: the defaults plus time tracking.
const INCLUDE_FIELDS: &str = "_default,estimated_time,actual_time,remaining_time";

/// A source of raw bugs for a search.
///
/// Implementations own transport and any retry policy; callers treat a
/// failure as final.
pub trait BugSource {
    /// Returns every bug matching `query` as an undecoded JSON entry.
    fn search_bugs(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<Vec<Value>, FetchError>> + Send;
}

/// Fetches bugs over the Bugzilla REST API.
#[derive(Debug, Clone)]
pub struct BugzillaClient {
    http: reqwest::Client,
    rest_url: Url,
}

impl BugzillaClient {
    /// Creates a client for the Bugzilla instance at `web_url`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the HTTP client cannot be built or the REST
    /// root cannot be derived from `web_url`.
    pub fn new(web_url: &Url) -> Result<Self, FetchError> {
        let rest_url = with_trailing_slash(web_url).join("rest/")?;
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, rest_url })
    }

    /// Builds the search URL for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Url`] if the endpoint cannot be joined.
    pub fn search_url(&self, query: &SearchQuery) -> Result<Url, FetchError> {
        let mut url = self.rest_url.join("bug")?;
        {
            let mut pairs = url.query_pairs_mut();
            for (field, value) in query.terms() {
                pairs.append_pair(field, value);
            }
            pairs.append_pair("include_fields", INCLUDE_FIELDS);
        }
        Ok(url)
    }
}

impl BugSource for BugzillaClient {
    async fn search_bugs(&self, query: &SearchQuery) -> Result<Vec<Value>, FetchError> {
        let span = info_span!("search_bugs", query = %query.describe());

        async {
            let url = self.search_url(query)?;
            debug!(url = %url, "Searching bugs");

            let response = self
                .http
                .get(url)
                .header(reqwest::header::ACCEPT, "application/json")
                .send()
                .await?;
            let status = response.status();
            let body = response.bytes().await?;

            let bugs = parse_search_response(status, &body)?;
            info!(count = bugs.len(), "Search complete");
            Ok(bugs)
        }
        .instrument(span)
        .await
    }
}

/// Error body Bugzilla sends instead of a result.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[allow(dead_code)]
    error: bool,
    message: String,
    code: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SearchBody {
    Error(ApiErrorBody),
    Bugs(BugSearchResponse),
}

/// Interprets a search response.
fn parse_search_response(status: StatusCode, body: &[u8]) -> Result<Vec<Value>, FetchError> {
    match serde_json::from_slice::<SearchBody>(body) {
        Ok(SearchBody::Error(e)) => Err(FetchError::Api {
            code: e.code,
            message: e.message,
        }),
        Ok(SearchBody::Bugs(response)) if status.is_success() => Ok(response.bugs),
        Err(e) if status.is_success() => Err(FetchError::Decode(e)),
        _ => Err(FetchError::Status {
            status: status.as_u16(),
        }),
    }
}
