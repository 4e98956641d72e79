//! Hugging Face Hub client configuration and repository identity.
//!
//! This module owns remote-specific configuration (endpoint, credential,
//! download root) and the immutable [`Repo`] identity used to build listing
//! and resolve URLs. Listing, glob selection, and metadata probing live in
//! the submodules.

pub mod listing;
pub mod metadata;
pub(crate) mod transport;

use std::path::{Path, PathBuf};

use ureq::Agent;
use url::Url;

use crate::auth;
use crate::error::HubError;

const DEFAULT_ENDPOINT: &str = "https://huggingface.co";
const DEFAULT_REVISION: &str = "main";

/// Kind of remote repository.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RepoKind {
    Model,
    Dataset,
    Space,
}

impl RepoKind {
    /// Path segment used by the listing API (`/api/<segment>/<id>`).
    pub(crate) fn api_segment(self) -> &'static str {
        match self {
            RepoKind::Model => "models",
            RepoKind::Dataset => "datasets",
            RepoKind::Space => "spaces",
        }
    }
}

/// Canonical reference to a Hub repository.
///
/// Immutable once constructed; the revision defaults to `main`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Repo {
    id: String,
    kind: RepoKind,
    revision: String,
}

impl Repo {
    /// Reference a repository of the given kind at the `main` revision.
    pub fn new(id: impl Into<String>, kind: RepoKind) -> Result<Self, HubError> {
        Self::with_revision(id, kind, DEFAULT_REVISION)
    }

    /// Reference a model repository at the `main` revision.
    pub fn model(id: impl Into<String>) -> Result<Self, HubError> {
        Self::new(id, RepoKind::Model)
    }

    /// Reference a dataset repository at the `main` revision.
    pub fn dataset(id: impl Into<String>) -> Result<Self, HubError> {
        Self::new(id, RepoKind::Dataset)
    }

    /// Reference a space repository at the `main` revision.
    pub fn space(id: impl Into<String>) -> Result<Self, HubError> {
        Self::new(id, RepoKind::Space)
    }

    /// Reference a repository pinned to a branch or tag.
    pub fn with_revision(
        id: impl Into<String>,
        kind: RepoKind,
        revision: impl Into<String>,
    ) -> Result<Self, HubError> {
        let id = validate_repo_id(&id.into())?;
        let revision = revision.into();
        Ok(Repo { id, kind, revision })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> RepoKind {
        self.kind
    }

    pub fn revision(&self) -> &str {
        &self.revision
    }
}

fn validate_repo_id(input: &str) -> Result<String, HubError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(HubError::InvalidRepoId {
            input: input.to_string(),
            message: "repo id is empty".to_string(),
        });
    }

    let segments: Vec<&str> = trimmed.split('/').collect();
    if segments.len() > 2 || segments.iter().any(|segment| segment.is_empty()) {
        return Err(HubError::InvalidRepoId {
            input: input.to_string(),
            message: "expected '<name>' or '<namespace>/<name>'".to_string(),
        });
    }

    Ok(trimmed.to_string())
}

/// Immutable client for Hub metadata resolution.
///
/// Construction resolves the credential once; the resulting value is
/// read-only and may be shared freely across threads. Requests carry
/// `Authorization: Bearer <token>` whenever a token is configured.
#[derive(Clone)]
pub struct HubClient {
    endpoint: String,
    token: Option<String>,
    download_root: PathBuf,
    listing_agent: Agent,
    probe_agent: Agent,
}

impl HubClient {
    /// Client with default configuration: `https://huggingface.co`, the
    /// token discovered by [`auth::resolve_token`], and a download root
    /// under `~/.cache/huggingface`.
    pub fn new() -> Result<Self, HubError> {
        Self::builder().build()
    }

    pub fn builder() -> HubClientBuilder {
        HubClientBuilder::new()
    }

    /// API endpoint base URL, without a trailing slash.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Base directory under which collaborators place downloaded content.
    /// Metadata resolution itself never writes here.
    pub fn download_root(&self) -> &Path {
        &self.download_root
    }

    pub(crate) fn listing_agent(&self) -> &Agent {
        &self.listing_agent
    }

    pub(crate) fn probe_agent(&self) -> &Agent {
        &self.probe_agent
    }

    /// Listing endpoint for a repository
    /// (`{endpoint}/api/{kind}/{id}[/revision/{revision}]`).
    pub(crate) fn api_url(&self, repo: &Repo) -> Result<Url, HubError> {
        let mut raw = format!(
            "{}/api/{}/{}",
            self.endpoint,
            repo.kind().api_segment(),
            repo.id()
        );
        if repo.revision() != DEFAULT_REVISION {
            raw.push_str("/revision/");
            raw.push_str(repo.revision());
        }
        parse_url(&raw)
    }

    /// Content-resolution URL for one file
    /// (`{endpoint}/{id}/resolve/{revision}/{filename}`).
    pub fn resolve_url(&self, repo: &Repo, filename: &str) -> Result<Url, HubError> {
        let raw = format!(
            "{}/{}/resolve/{}/{}",
            self.endpoint,
            repo.id(),
            repo.revision(),
            filename
        );
        parse_url(&raw)
    }
}

fn parse_url(raw: &str) -> Result<Url, HubError> {
    Url::parse(raw).map_err(|source| HubError::InvalidUrl {
        input: raw.to_string(),
        source,
    })
}

/// Builder for [`HubClient`].
///
/// `new()` seeds the token from the resolver chain; `with_token(None)`
/// makes the client anonymous regardless of the environment.
pub struct HubClientBuilder {
    endpoint: String,
    token: Option<String>,
    download_root: Option<PathBuf>,
}

impl HubClientBuilder {
    pub fn new() -> Self {
        HubClientBuilder {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token: auth::resolve_token(),
            download_root: None,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn with_download_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.download_root = Some(root.into());
        self
    }

    pub fn build(self) -> Result<HubClient, HubError> {
        let endpoint = self.endpoint.trim_end_matches('/').to_string();
        parse_url(&endpoint)?;

        let download_root = self.download_root.unwrap_or_else(|| {
            home::home_dir()
                .unwrap_or_default()
                .join(".cache/huggingface")
        });

        Ok(HubClient {
            endpoint,
            token: self.token,
            download_root,
            listing_agent: transport::listing_agent(),
            probe_agent: transport::probe_agent(),
        })
    }
}

impl Default for HubClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
