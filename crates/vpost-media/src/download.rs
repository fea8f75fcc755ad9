//! Streaming media download.

use std::path::Path;

use futures::StreamExt;
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::error::{MediaError, MediaResult};

/// Download `url` to `dest`, streaming the body to disk chunk by chunk.
///
/// The body is never buffered whole in memory. Any transport error,
/// non-success status, or write error aborts with an error; a partial file
/// may remain at `dest` and is the caller's to clean up.
///
/// Returns the number of bytes written.
pub async fn download_to(
    http: &reqwest::Client,
    url: &str,
    dest: impl AsRef<Path>,
) -> MediaResult<u64> {
    let dest = dest.as_ref();

    let response = http.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(MediaError::download_failed(format!(
            "HTTP {status} for {url}"
        )));
    }

    let mut file = tokio::fs::File::create(dest).await?;
    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;

    info!(
        url,
        dest = %dest.display(),
        size_kb = written / 1024,
        "downloaded media"
    );

    Ok(written)
}
