//! Access-token discovery for authenticated Hub requests.
//!
//! Tokens come from a fixed priority chain: the `HF_TOKEN` and
//! `HUGGING_FACE_HUB_TOKEN` environment variables, then token files named by
//! `HF_TOKEN_PATH` and `HF_HOME`, then the conventional locations under the
//! home directory. A source that is unset, unreadable, or blank simply yields
//! to the next one; nothing here is a hard failure.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Resolve a bearer token from the standard sources, first match wins.
///
/// Order: `HF_TOKEN`, `HUGGING_FACE_HUB_TOKEN`, the file at `HF_TOKEN_PATH`,
/// `${HF_HOME}/token`, `~/.cache/huggingface/token`, `~/.huggingface/token`.
/// Values are whitespace-trimmed; empty values count as absent. Returns
/// `None` when every source is exhausted.
pub fn resolve_token() -> Option<String> {
    resolve_from(|name| std::env::var(name).ok(), home::home_dir().as_deref())
}

fn resolve_from<F>(env: F, home: Option<&Path>) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    for name in ["HF_TOKEN", "HUGGING_FACE_HUB_TOKEN"] {
        if let Some(token) = env(name).and_then(non_empty) {
            debug!(source = name, "resolved access token from environment");
            return Some(token);
        }
    }

    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(path) = env("HF_TOKEN_PATH") {
        candidates.push(expand_tilde(&path, home));
    }
    if let Some(hf_home) = env("HF_HOME") {
        candidates.push(expand_tilde(&hf_home, home).join("token"));
    }
    if let Some(home) = home {
        candidates.push(home.join(".cache/huggingface/token"));
        candidates.push(home.join(".huggingface/token"));
    }

    for path in candidates {
        if let Some(token) = fs::read_to_string(&path).ok().and_then(non_empty) {
            debug!(path = %path.display(), "resolved access token from file");
            return Some(token);
        }
    }

    None
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn expand_tilde(raw: &str, home: Option<&Path>) -> PathBuf {
    if raw == "~" {
        if let Some(home) = home {
            return home.to_path_buf();
        }
    }
    if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = home {
            return home.join(rest);
        }
    }
    PathBuf::from(raw)
}
