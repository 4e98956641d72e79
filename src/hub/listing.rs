//! Repository filename listing and glob-based selection.

use std::collections::BTreeSet;

use serde::Deserialize;
use tracing::debug;

use super::{transport, HubClient, Repo};
use crate::error::HubError;

/// Listing endpoint payload. Only the sibling paths matter here.
#[derive(Debug, Deserialize)]
struct RepoInfo {
    siblings: Vec<Sibling>,
}

/// One file entry within a repository listing.
#[derive(Debug, Deserialize)]
struct Sibling {
    rfilename: String,
}

impl HubClient {
    /// List every filename in the repository, in server order.
    ///
    /// The endpoint returns the complete listing in one response; no
    /// pagination is assumed.
    pub fn repo_filenames(&self, repo: &Repo) -> Result<Vec<String>, HubError> {
        let url = self.api_url(repo)?;
        let reply = transport::http_get(self, &url)?;

        let info: RepoInfo =
            serde_json::from_str(&reply.body).map_err(|source| HubError::Parse {
                url: url.to_string(),
                source,
            })?;

        debug!(repo = repo.id(), files = info.siblings.len(), "listed repository");
        Ok(info
            .siblings
            .into_iter()
            .map(|sibling| sibling.rfilename)
            .collect())
    }
}

/// Filter filenames against shell-style glob patterns.
///
/// With no patterns the filenames come back unchanged, in listing order.
/// Otherwise each pattern matches with POSIX shell-glob semantics (`*`, `?`,
/// `[...]`, no path-separator special-casing) and the per-pattern results
/// union into one set, returned sorted for determinism. The output is always
/// a subset of the input.
pub fn select_globs(filenames: &[String], globs: &[String]) -> Result<Vec<String>, HubError> {
    if globs.is_empty() {
        return Ok(filenames.to_vec());
    }

    let mut selected = BTreeSet::new();
    for raw in globs {
        let pattern = glob::Pattern::new(raw).map_err(|source| HubError::Pattern {
            pattern: raw.clone(),
            source,
        })?;
        for name in filenames {
            if pattern.matches(name) {
                selected.insert(name.clone());
            }
        }
    }

    Ok(selected.into_iter().collect())
}
