//! Axum route handler for the matching API.

use std::path::{Path, PathBuf};

use anyhow::Context;
use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::MatchResult;
use crate::state::AppState;

struct Upload {
    file_name: String,
    data: Bytes,
}

/// POST /match-cv-job
///
/// Multipart upload with two PDF parts, `cv_file` and `job_file`. Both are staged to the
/// input directory, run through the match pipeline, and the resulting `MatchResult`
/// is returned. The PDF report and JSON sidecar are written to the output directory.
pub async fn handle_match(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MatchResult>, AppError> {
    let mut cv: Option<Upload> = None;
    let mut job: Option<Upload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let (slot, not_pdf) = match name.as_str() {
            "cv_file" => (&mut cv, "CV file must be a PDF"),
            "job_file" => (&mut job, "Job file must be a PDF"),
            other => {
                debug!("Ignoring multipart field '{other}'");
                continue;
            }
        };

        let file_name = field.file_name().unwrap_or_default().to_string();
        if !is_pdf_name(&file_name) {
            return Err(AppError::Validation(not_pdf.to_string()));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read '{name}': {e}")))?;
        debug!("Received '{name}' ({file_name}, {} bytes)", data.len());

        *slot = Some(Upload { file_name, data });
    }

    let cv = cv.ok_or_else(|| AppError::Validation("Missing 'cv_file' upload".to_string()))?;
    let job = job.ok_or_else(|| AppError::Validation("Missing 'job_file' upload".to_string()))?;

    let cv_path = stage(&state.config.input_dir, "cv", &cv).await?;
    let job_path = stage(&state.config.input_dir, "job", &job).await?;

    let outcome = state.pipeline.run(&cv_path, &job_path).await?;
    info!(
        "Match complete: score={} pdf={} json={}",
        outcome.result.score_breakdown.total_score,
        outcome.artifacts.pdf_path.display(),
        outcome.artifacts.json_path.display()
    );

    Ok(Json(outcome.result))
}

fn is_pdf_name(file_name: &str) -> bool {
    file_name.to_lowercase().ends_with(".pdf")
}

/// Writes an upload to `<dir>/<prefix>_<uuid>_<sanitized name>`.
async fn stage(dir: &Path, prefix: &str, upload: &Upload) -> Result<PathBuf, AppError> {
    let path = dir.join(format!(
        "{prefix}_{}_{}",
        Uuid::new_v4().simple(),
        sanitize_file_name(&upload.file_name)
    ));
    tokio::fs::write(&path, &upload.data)
        .await
        .with_context(|| format!("Failed to stage upload at {}", path.display()))?;
    Ok(path)
}

/// Keeps only the final path component and replaces anything outside `[A-Za-z0-9._-]`.
fn sanitize_file_name(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload.pdf");
    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
