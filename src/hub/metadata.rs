//! Per-file metadata probing and normalization.
//!
//! One HEAD probe per file, through the redirect policy. The hub reports LFS
//! files with `X-Linked-Etag`/`X-Linked-Size` headers and a 302 whose
//! `Location` points at the CDN blob; plain files answer with ordinary
//! `Etag`/`Content-Length`.

use tracing::debug;
use url::Url;

use super::listing::select_globs;
use super::{transport, HubClient, Repo};
use crate::error::HubError;

/// Metadata for one remote file, computed fresh per call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileMetadata {
    /// Commit the probed revision currently points at (`X-Repo-Commit`).
    pub commit_hash: Option<String>,
    /// Content validator, stripped of weak-validator and quoting syntax.
    pub etag: Option<String>,
    /// Where a download of this file would be served from. Falls back to the
    /// originally requested URL when no redirect occurred.
    pub location: String,
    /// Exact content size in bytes, when the server reports one.
    pub size: Option<u64>,
}

impl HubClient {
    /// Probe one resolve URL and derive normalized file metadata.
    pub fn file_metadata(&self, url: &Url) -> Result<FileMetadata, HubError> {
        let reply = transport::http_head(self, url)?;

        // 302 is the hub's documented "pointer to CDN" answer: the Location
        // header is the real download location. Other redirect-family
        // statuses fall through to the resolved URL.
        let location = if reply.status == 302 {
            reply
                .header("Location")
                .map(str::to_string)
                .unwrap_or_else(|| reply.final_url.to_string())
        } else {
            reply.final_url.to_string()
        };

        let commit_hash = reply.header("X-Repo-Commit").map(str::to_string);
        let etag = reply
            .header("X-Linked-Etag")
            .or_else(|| reply.header("Etag"))
            .map(normalize_etag);
        let size = reply
            .header("X-Linked-Size")
            .or_else(|| reply.header("Content-Length"))
            .and_then(|value| value.trim().parse::<u64>().ok());

        debug!(%url, ?etag, ?size, "probed file metadata");
        Ok(FileMetadata {
            commit_hash,
            etag,
            location,
            size,
        })
    }

    /// List, select, and probe: metadata for every file matching `globs`.
    ///
    /// Probes run sequentially in selection order; the first failure aborts
    /// the batch with no partial result.
    pub fn repo_file_metadata(
        &self,
        repo: &Repo,
        globs: &[String],
    ) -> Result<Vec<FileMetadata>, HubError> {
        let filenames = self.repo_filenames(repo)?;
        let selected = select_globs(&filenames, globs)?;

        let mut metadata = Vec::with_capacity(selected.len());
        for filename in &selected {
            let url = self.resolve_url(repo, filename)?;
            metadata.push(self.file_metadata(&url)?);
        }
        Ok(metadata)
    }
}

/// Strip a weak-validator marker and surrounding quotes from an ETag value.
fn normalize_etag(raw: &str) -> String {
    raw.strip_prefix("W/")
        .unwrap_or(raw)
        .trim_matches('"')
        .to_string()
}
