//! Read-only access to bundled streaming assets.
//!
//! On desktop builds and in the editor the asset tree is a normal directory.
//! On packaged web and mobile builds it is only reachable through byte
//! fetches, with no way to list a directory. This crate hides the difference
//! behind [`StreamingAssets`]: existence checks and listings are answered from
//! the filesystem when possible, and from a pre-generated manifest otherwise.
//!
//! # Architecture
//!
//! All reads return boxed futures (`Pin<Box<dyn Future + Send>>`). These
//! futures are not self-driving; await them on a tokio runtime, or use
//! [`poll_now`] for the blocking providers:
//!
//! ```ignore
//! let assets = StreamingAssets::new(CatalogProvider::new(HttpTransport::new()));
//! assets.initialize(&root).await;
//!
//! let levels = assets.list_files("levels", "*.json", false)?;
//! let text = assets.read_text(&levels[0], &token).await;
//! ```
//!
//! # Providers
//!
//! - [`DirectProvider`]: Queries the native filesystem (native only)
//! - [`CatalogProvider`]: Queries the `__catalog__.txt` manifest fetched
//!   through a [`Transport`]
//!
//! # Transports
//!
//! - [`MemoryTransport`]: In-memory storage for tests and embedded assets
//! - [`FileTransport`]: Local files (native only)
//! - [`HttpTransport`]: HTTP(S) fetches (requires `http` feature)
//!
//! # Manifest
//!
//! [`CatalogBuilder`] walks an asset directory before packaging and writes
//! one root-relative path per line. The `build-catalog` tool wraps it.

mod assets;
#[cfg(all(feature = "filesystem", not(target_arch = "wasm32")))]
mod builder;
mod catalog;
mod catalog_provider;
pub mod config;
#[cfg(all(feature = "filesystem", not(target_arch = "wasm32")))]
mod direct;
mod error;
#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(all(feature = "http", not(target_arch = "wasm32")))]
mod http;
mod memory;
pub mod path;
mod poll;
mod provider;
mod transport;
mod wildcard;

pub use assets::StreamingAssets;
#[cfg(all(feature = "filesystem", not(target_arch = "wasm32")))]
pub use builder::CatalogBuilder;
pub use catalog::{CATALOG_FILE_NAME, Catalog, SIDECAR_SUFFIX};
pub use catalog_provider::CatalogProvider;
pub use config::AssetsConfig;
#[cfg(all(feature = "filesystem", not(target_arch = "wasm32")))]
pub use direct::DirectProvider;
pub use error::VfsError;
#[cfg(not(target_arch = "wasm32"))]
pub use file::FileTransport;
#[cfg(all(feature = "http", not(target_arch = "wasm32")))]
pub use http::HttpTransport;
pub use memory::MemoryTransport;
pub use poll::poll_now;
pub use provider::AssetsProvider;
pub use tokio_util::sync::CancellationToken;
pub use transport::{AssetFuture, Transport, with_cancellation};
pub use wildcard::WildcardPattern;
