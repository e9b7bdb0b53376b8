use std::fs::File;
use std::path::Path;

use tokio_util::sync::CancellationToken;

use crate::transport::{AssetFuture, Transport, discard_partial, prepare_output};

/// Transport that reads resources from the local filesystem.
///
/// Useful for running the catalog provider against an unpacked build, and
/// as the manifest source on desktop test rigs. All I/O is blocking
/// (`std::fs`) inside the returned futures; run them on an IO thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileTransport;

impl FileTransport {
    pub fn new() -> Self {
        Self
    }
}

impl Transport for FileTransport {
    fn fetch_bytes(&self, full_path: &str, cancel: &CancellationToken) -> AssetFuture<Option<Vec<u8>>> {
        let full_path = full_path.to_owned();
        let cancel = cancel.clone();
        Box::pin(async move {
            if cancel.is_cancelled() {
                log::debug!("Cancelled: {full_path}");
                return None;
            }
            match std::fs::read(&full_path) {
                Ok(data) => Some(data),
                Err(e) => {
                    log::warn!("Failed to read {full_path}: {e}");
                    None
                }
            }
        })
    }

    fn fetch_to_file(&self, full_path: &str, output: &Path, cancel: &CancellationToken) -> AssetFuture<bool> {
        let full_path = full_path.to_owned();
        let output = output.to_path_buf();
        let cancel = cancel.clone();
        Box::pin(async move {
            if cancel.is_cancelled() {
                log::debug!("Cancelled: copy {full_path}");
                return false;
            }
            let mut input = match File::open(&full_path) {
                Ok(file) => file,
                Err(e) => {
                    log::warn!("Failed to open {full_path}: {e}");
                    return false;
                }
            };
            let copied = prepare_output(&output)
                .and_then(|()| File::create(&output))
                .and_then(|mut out| std::io::copy(&mut input, &mut out));
            match copied {
                Ok(_) => true,
                Err(e) => {
                    log::warn!("Failed to copy {full_path} to {}: {e}", output.display());
                    discard_partial(&output);
                    false
                }
            }
        })
    }
}
