//! Blocking client for the forge's REST API

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

/// Public GitHub API endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Page size for the branch listing (only the first page is requested)
pub const BRANCHES_PER_PAGE: u32 = 100;

const USER_AGENT: &str = concat!("repo-size/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid API URL '{url}': {source}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("API URL '{0}' cannot carry a path")]
    NotABase(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Repository metadata (`GET /repos/{owner}/{repo}`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepoMetadata {
    /// Size in kilobytes
    pub size: Option<u64>,
    pub language: Option<String>,
    pub stargazers_count: Option<u64>,
    pub forks_count: Option<u64>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Branch {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Tree {
    #[serde(default)]
    pub tree: Vec<TreeEntry>,
    #[serde(default)]
    pub truncated: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreeEntry {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Blob size in bytes (absent for trees and submodules)
    pub size: Option<u64>,
}

impl Tree {
    /// Total bytes of all blob entries
    pub fn blob_bytes(&self) -> u64 {
        self.tree
            .iter()
            .filter(|e| e.kind.as_deref() == Some("blob"))
            .filter_map(|e| e.size)
            .sum()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RateLimitResponse {
    pub rate: Option<RateInfo>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct RateInfo {
    pub remaining: Option<u64>,
    /// Unix timestamp (seconds)
    pub reset: Option<i64>,
}

/// HTTP client bound to one API base URL and optional token
pub struct ForgeClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl ForgeClient {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, ApiError> {
        let parsed = Url::parse(base_url).map_err(|source| ApiError::BaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::NotABase(base_url.to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            http,
            base_url: parsed,
            token,
        })
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Base URL with each segment appended percent-encoded, so names containing
    /// `#`, `?`, `%` or `/` stay a single path segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, url: Url) -> RequestBuilder {
        let request = self.http.get(url);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        tracing::debug!("GET {}", url);
        let display = url.to_string();

        let response = self.request(url).send().map_err(|source| ApiError::Request {
            url: display.clone(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url: display,
                status,
            });
        }

        response
            .json::<T>()
            .map_err(|source| ApiError::Decode {
                url: display,
                source,
            })
    }

    pub fn repository(&self, owner: &str, repo: &str) -> Result<RepoMetadata, ApiError> {
        self.get_json(self.endpoint(&["repos", owner, repo]))
    }

    pub fn branches(&self, owner: &str, repo: &str) -> Result<Vec<Branch>, ApiError> {
        let mut url = self.endpoint(&["repos", owner, repo, "branches"]);
        url.query_pairs_mut()
            .append_pair("per_page", &BRANCHES_PER_PAGE.to_string());
        self.get_json(url)
    }

    pub fn tree(&self, owner: &str, repo: &str, branch: &str) -> Result<Tree, ApiError> {
        let mut url = self.endpoint(&["repos", owner, repo, "git", "trees", branch]);
        url.query_pairs_mut().append_pair("recursive", "1");
        self.get_json(url)
    }

    pub fn rate_limit(&self) -> Result<RateLimitResponse, ApiError> {
        self.get_json(self.endpoint(&["rate_limit"]))
    }
}
