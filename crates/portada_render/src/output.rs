use std::path::{Path, PathBuf};

use portada_core::Result;
use uuid::Uuid;

/// Write rendered image bytes under `output_dir` with a unique name,
/// creating the directory on first use.
pub async fn write_temp_image(bytes: &[u8], output_dir: &Path) -> Result<PathBuf> {
    tokio::fs::create_dir_all(output_dir).await?;
    let path = output_dir.join(format!("image_{}.png", Uuid::new_v4()));
    tokio::fs::write(&path, bytes).await?;
    Ok(path)
}

/// Best-effort removal of a temporary image. A leftover file is worth a
/// warning, not a failed pass.
pub async fn remove_temp_image(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        tracing::warn!("Failed to remove temporary image {}: {}", path.display(), e);
    }
}
