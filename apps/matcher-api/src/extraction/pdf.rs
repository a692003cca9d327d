use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use crate::errors::AppError;
use crate::extraction::TextExtractor;

/// Text extraction backend using the `pdf-extract` crate.
///
/// Parsing is CPU-bound and can panic on malformed input, so it runs on the blocking
/// pool; both library errors and panics surface as `AppError::Extraction`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract_text(&self, path: &Path) -> Result<String, AppError> {
        let owned = path.to_path_buf();
        let label = path.display().to_string();

        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text(&owned))
            .await
            .map_err(|e| AppError::Extraction(format!("{label}: PDF parser aborted: {e}")))?
            .map_err(|e| AppError::Extraction(format!("{label}: {e}")))?;

        if text.trim().is_empty() {
            return Err(AppError::Extraction(format!(
                "{label}: no extractable text (scanned or empty PDF?)"
            )));
        }

        debug!("Extracted {} chars from {label}", text.len());
        Ok(text)
    }
}
