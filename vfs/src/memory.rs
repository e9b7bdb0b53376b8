use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio_util::sync::CancellationToken;

use crate::transport::{AssetFuture, Transport};

/// In-memory transport for tests and embedded assets.
///
/// Keys are full paths as produced by
/// [`resolve_full_path`](crate::path::resolve_full_path), so a catalog
/// provider initialized with root `"builtin"` fetches its manifest from
/// `"builtin/__catalog__.txt"`.
///
/// Cloning shares the underlying store; inserts after mounting are visible.
///
/// # Example
///
/// ```ignore
/// let transport = MemoryTransport::new();
/// transport.insert("builtin/__catalog__.txt", b"shaders/basic.wgsl\n".to_vec());
/// transport.insert("builtin/shaders/basic.wgsl", shader_bytes);
///
/// let assets = StreamingAssets::new(CatalogProvider::new(transport));
/// assets.initialize("builtin").await;
/// ```
#[derive(Clone, Default)]
pub struct MemoryTransport {
    files: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a resource, overwriting any existing one at the same path.
    pub fn insert(&self, full_path: impl Into<String>, data: Vec<u8>) {
        self.files.write().insert(full_path.into(), data);
    }

    /// Remove a resource, returning its data if it existed.
    pub fn remove(&self, full_path: &str) -> Option<Vec<u8>> {
        self.files.write().remove(full_path)
    }
}

impl Transport for MemoryTransport {
    fn fetch_bytes(&self, full_path: &str, cancel: &CancellationToken) -> AssetFuture<Option<Vec<u8>>> {
        let files = self.files.clone();
        let full_path = full_path.to_owned();
        let cancel = cancel.clone();
        Box::pin(async move {
            if cancel.is_cancelled() {
                log::debug!("Cancelled: {full_path}");
                return None;
            }
            let data = files.read().get(&full_path).cloned();
            if data.is_none() {
                log::warn!("Not found: {full_path}");
            }
            data
        })
    }
}
