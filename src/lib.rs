//! Hubprobe: remote Hugging Face Hub metadata resolution.
//!
//! Hubprobe answers "which files does this repository hold, and what are
//! their content hashes, sizes, and download locations" without transferring
//! any file contents. It discovers an access token from the standard
//! environment and token-file sources, lists repository filenames, selects
//! them with shell-style globs, and probes each selected file with an
//! authenticated HEAD request that refuses to chase cross-host redirects.
//!
//! # Modules
//!
//! - [`auth`]: Access-token discovery across environment variables and token files
//! - [`hub`]: Client configuration, filename listing, and per-file metadata probing
//! - [`error`]: Error types for hubprobe operations
//!
//! # Example
//!
//! ```no_run
//! use hubprobe::{HubClient, Repo};
//!
//! let client = HubClient::new()?;
//! let repo = Repo::model("coreml/whisper-tiny")?;
//! let metadata = client.repo_file_metadata(&repo, &["*.json".to_string()])?;
//! for file in metadata {
//!     println!("{} -> {:?} ({:?} bytes)", file.location, file.etag, file.size);
//! }
//! # Ok::<(), hubprobe::HubError>(())
//! ```

pub mod auth;
pub mod error;
pub mod hub;

pub use error::HubError;
pub use hub::listing::select_globs;
pub use hub::metadata::FileMetadata;
pub use hub::{HubClient, HubClientBuilder, Repo, RepoKind};
