// Report output: a paginated PDF summary plus a JSON sidecar of the full MatchResult.
// Rendering is synchronous file I/O; async callers run `Reporter::write` on the blocking pool.

pub mod document;
pub mod layout;
pub mod metrics;
pub mod pdf;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::MatchResult;

/// Paths of the artifacts written for one match.
#[derive(Debug, Clone, Serialize)]
pub struct ReportArtifacts {
    pub pdf_path: PathBuf,
    pub json_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Reporter {
    output_dir: PathBuf,
}

impl Reporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Writes `<stem>.pdf` and `<stem>.json`. If the JSON write fails the PDF is removed,
    /// so a failed call leaves nothing behind.
    pub fn write(&self, result: &MatchResult) -> Result<ReportArtifacts, AppError> {
        let stem = artifact_stem(&result.timestamp);
        let pdf_path = self.output_dir.join(format!("{stem}.pdf"));
        let json_path = self.output_dir.join(format!("{stem}.json"));

        let pdf_bytes = render_report(result)?;
        std::fs::write(&pdf_path, pdf_bytes)
            .map_err(|e| AppError::Report(format!("{}: {e}", pdf_path.display())))?;

        let json_write = serde_json::to_vec_pretty(result)
            .map_err(|e| AppError::Report(format!("JSON encoding failed: {e}")))
            .and_then(|json| {
                std::fs::write(&json_path, json)
                    .map_err(|e| AppError::Report(format!("{}: {e}", json_path.display())))
            });
        if let Err(e) = json_write {
            if let Err(cleanup) = std::fs::remove_file(&pdf_path) {
                warn!("Could not remove {}: {cleanup}", pdf_path.display());
            }
            return Err(e);
        }

        info!(
            "Report written: {} / {}",
            pdf_path.display(),
            json_path.display()
        );
        Ok(ReportArtifacts {
            pdf_path,
            json_path,
        })
    }
}

/// Lays out and encodes the PDF report without touching the filesystem.
pub fn render_report(result: &MatchResult) -> Result<Vec<u8>, AppError> {
    let blocks = document::build_report(result);
    let pages = layout::paginate(&blocks);
    pdf::render_pdf(&pages).map_err(|e| AppError::Report(format!("PDF encoding failed: {e}")))
}

/// `match_result_<YYYYmmdd_HHMMSS>_<8 hex>`; the random suffix keeps concurrent requests apart.
fn artifact_stem(timestamp: &DateTime<Utc>) -> String {
    let token = Uuid::new_v4().simple().to_string();
    format!(
        "match_result_{}_{}",
        timestamp.format("%Y%m%d_%H%M%S"),
        &token[..8]
    )
}
