use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;

use crate::transport::{AssetFuture, Transport, discard_partial, prepare_output, with_cancellation};

/// Transport that fetches resources over HTTP(S).
///
/// This is the transport for packaged web builds, where the asset tree is
/// only reachable by URL. Non-success status codes and network errors are
/// logged and resolve to `None`. Requires a tokio runtime.
///
/// # Example
///
/// ```ignore
/// let provider = CatalogProvider::new(HttpTransport::new());
/// let assets = StreamingAssets::new(provider);
/// assets.initialize("https://cdn.example.com/game/StreamingAssets").await;
/// ```
#[derive(Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured client (timeouts, headers, proxies).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

async fn get(client: &reqwest::Client, url: &str) -> Option<reqwest::Response> {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            log::warn!("Request to {url} failed: {e}");
            return None;
        }
    };
    let status = response.status();
    if !status.is_success() {
        log::warn!("Request to {url} returned {status}");
        return None;
    }
    Some(response)
}

async fn download(client: reqwest::Client, url: String) -> Option<Vec<u8>> {
    let response = get(&client, &url).await?;
    match response.bytes().await {
        Ok(bytes) => Some(bytes.to_vec()),
        Err(e) => {
            log::warn!("Failed to read body of {url}: {e}");
            None
        }
    }
}

/// Write the response body chunk by chunk; memory stays bounded by chunk size.
async fn stream_to_file(client: reqwest::Client, url: String, output: PathBuf) -> Option<()> {
    let mut response = get(&client, &url).await?;
    if let Err(e) = prepare_output(&output) {
        log::warn!("Failed to create parent of {}: {e}", output.display());
        return None;
    }
    let mut file = match tokio::fs::File::create(&output).await {
        Ok(file) => file,
        Err(e) => {
            log::warn!("Failed to create {}: {e}", output.display());
            return None;
        }
    };
    loop {
        match response.chunk().await {
            Ok(Some(chunk)) => {
                if let Err(e) = file.write_all(&chunk).await {
                    log::warn!("Failed to write {}: {e}", output.display());
                    return None;
                }
            }
            Ok(None) => break,
            Err(e) => {
                log::warn!("Download of {url} interrupted: {e}");
                return None;
            }
        }
    }
    if let Err(e) = file.flush().await {
        log::warn!("Failed to flush {}: {e}", output.display());
        return None;
    }
    Some(())
}

impl Transport for HttpTransport {
    fn fetch_bytes(&self, full_path: &str, cancel: &CancellationToken) -> AssetFuture<Option<Vec<u8>>> {
        let client = self.client.clone();
        let url = full_path.to_owned();
        let cancel = cancel.clone();
        Box::pin(async move {
            let what = url.clone();
            with_cancellation(download(client, url), cancel, &what).await
        })
    }

    fn fetch_to_file(&self, full_path: &str, output: &Path, cancel: &CancellationToken) -> AssetFuture<bool> {
        let client = self.client.clone();
        let url = full_path.to_owned();
        let output = output.to_path_buf();
        let cancel = cancel.clone();
        Box::pin(async move {
            let what = format!("copy {url}");
            let copied =
                with_cancellation(stream_to_file(client, url, output.clone()), cancel, &what).await;
            if copied.is_none() {
                discard_partial(&output);
            }
            copied.is_some()
        })
    }
}
