use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use tokio_util::sync::CancellationToken;

/// A boxed, `Send` future.
///
/// Returned from every [`Transport`] and [`AssetsProvider`](crate::AssetsProvider)
/// operation. The futures do not drive themselves; the caller runs them on
/// its async runtime.
pub type AssetFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Byte-fetching collaborator behind the catalog provider.
///
/// Implementations resolve every failure to `None` (or `false` for copies):
/// non-success responses and IO errors are logged, cancellation is logged at
/// debug level. No transport error ever reaches the caller as a panic or an
/// error value.
///
/// `full_path` is the location produced by
/// [`resolve_full_path`](crate::path::resolve_full_path): a filesystem path,
/// a URL, or a key into an in-memory store, depending on the transport.
pub trait Transport: Send + Sync + 'static {
    /// Fetch the whole resource.
    fn fetch_bytes(&self, full_path: &str, cancel: &CancellationToken)
    -> AssetFuture<Option<Vec<u8>>>;

    /// Fetch the resource as UTF-8 text.
    fn fetch_text(&self, full_path: &str, cancel: &CancellationToken) -> AssetFuture<Option<String>> {
        let fetch = self.fetch_bytes(full_path, cancel);
        let full_path = full_path.to_owned();
        Box::pin(async move {
            let bytes = fetch.await?;
            match String::from_utf8(bytes) {
                Ok(text) => Some(text),
                Err(e) => {
                    log::warn!("{full_path} is not valid UTF-8: {e}");
                    None
                }
            }
        })
    }

    /// Copy the resource into `output`, returning whether it succeeded.
    ///
    /// The default buffers the whole resource through
    /// [`fetch_bytes`](Transport::fetch_bytes). Transports that can stream
    /// should override it to keep memory bounded.
    fn fetch_to_file(
        &self,
        full_path: &str,
        output: &Path,
        cancel: &CancellationToken,
    ) -> AssetFuture<bool> {
        let fetch = self.fetch_bytes(full_path, cancel);
        let output = output.to_path_buf();
        Box::pin(async move {
            let Some(bytes) = fetch.await else {
                return false;
            };
            match prepare_output(&output).and_then(|()| std::fs::write(&output, bytes)) {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("Failed to write {}: {e}", output.display());
                    discard_partial(&output);
                    false
                }
            }
        })
    }
}

/// Race `future` against `cancel`, resolving to `None` on cancellation.
///
/// A token that is already cancelled wins without polling `future`.
pub async fn with_cancellation<T>(
    future: impl Future<Output = Option<T>>,
    cancel: CancellationToken,
    what: &str,
) -> Option<T> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            log::debug!("Cancelled: {what}");
            None
        }
        result = future => result,
    }
}

/// Create the parent directories of a copy destination.
pub(crate) fn prepare_output(output: &Path) -> std::io::Result<()> {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Remove a partially written copy destination, ignoring errors.
pub(crate) fn discard_partial(output: &Path) {
    if output.exists()
        && let Err(e) = std::fs::remove_file(output)
    {
        log::warn!("Failed to remove partial file {}: {e}", output.display());
    }
}
