//! Links back into the Bugzilla web UI.

use url::Url;

/// Builds human-facing Bugzilla URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BugLinks {
    web_url: Url,
}

impl BugLinks {
    /// Creates links rooted at a Bugzilla web URL, e.g. `https://bugzilla.mozilla.org/`.
    #[must_use]
    pub fn new(web_url: &Url) -> Self {
        Self {
            web_url: with_trailing_slash(web_url),
        }
    }

    /// Web URL for a single bug.
    #[must_use]
    pub fn bug_url(&self, id: u64) -> String {
        self.page("show_bug.cgi", &format!("id={id}"))
    }

    /// Web URL listing all the given bugs at once.
    #[must_use]
    pub fn bug_list_url(&self, ids: &[u64]) -> String {
        let ids = ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.page("buglist.cgi", &format!("bug_id={ids}"))
    }

    fn page(&self, page: &str, query: &str) -> String {
        let mut url = self.web_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(page);
        }
        url.set_query(Some(query));
        url.to_string()
    }
}

/// Returns `url` with a path ending in `/`, so relative joins stay beneath it.
#[must_use]
pub fn with_trailing_slash(url: &Url) -> Url {
    let mut url = url.clone();
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
