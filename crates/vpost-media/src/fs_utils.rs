//! Best-effort artifact removal.

use std::path::Path;

use tracing::{debug, warn};

/// Remove a file if it exists. Deletion errors are logged and swallowed;
/// cleanup must never fail a run.
pub async fn remove_if_exists(path: impl AsRef<Path>) {
    let path = path.as_ref();
    match tokio::fs::remove_file(path).await {
        Ok(()) => debug!(path = %path.display(), "removed local artifact"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), error = %e, "failed to remove artifact"),
    }
}
