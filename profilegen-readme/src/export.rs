//! Writing the rendered profile to disk

use profilegen_core::{ErrorContext, ProfileError, ProfileResult};
use std::path::Path;
use tokio::fs;
use tracing::info;

/// Writes rendered documents, replacing whatever was there before
#[derive(Debug, Default, Clone, Copy)]
pub struct ReadmeWriter;

impl ReadmeWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write `content` to `output_path`, creating parent directories as needed
    pub async fn write(&self, content: &str, output_path: &Path) -> ProfileResult<()> {
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        fs::write(output_path, content)
            .await
            .map_err(|e| ProfileError::Storage {
                message: format!("Failed to write {}: {}", output_path.display(), e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("readme_writer")
                    .with_operation("write")
                    .with_suggestion("Check if the output location is writable"),
            })?;

        info!(
            path = %output_path.display(),
            bytes = content.len(),
            "Profile document written"
        );
        Ok(())
    }
}
