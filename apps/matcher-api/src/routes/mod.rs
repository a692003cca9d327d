pub mod health;
pub mod matching;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/match-cv-job", post(matching::handle_match))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::errors::AppError;
    use crate::extraction::{ProfileExtractor, TextExtractor};
    use crate::models::{CandidateProfile, JobProfile};
    use crate::pipeline::MatchPipeline;
    use crate::report::Reporter;

    const BOUNDARY: &str = "matcher-test-boundary";

    /// Treats the staged upload bytes as the document text.
    struct StagedText;

    #[async_trait]
    impl TextExtractor for StagedText {
        async fn extract_text(&self, path: &Path) -> Result<String, AppError> {
            let text = tokio::fs::read_to_string(path)
                .await
                .map_err(|e| AppError::Extraction(e.to_string()))?;
            if text.trim().is_empty() {
                return Err(AppError::Extraction(format!(
                    "{}: no extractable text",
                    path.display()
                )));
            }
            Ok(text)
        }
    }

    struct FixedProfiles;

    #[async_trait]
    impl ProfileExtractor for FixedProfiles {
        async fn extract_candidate(&self, _cv_text: &str) -> Result<CandidateProfile, AppError> {
            Ok(CandidateProfile {
                name: "Jane Doe".to_string(),
                skills: vec!["Python".into(), "SQL".into(), "Communication".into()],
                education: vec!["Bachelor of Science in Computer Science".into()],
                experience: vec!["Data Analyst Intern".into()],
            })
        }

        async fn extract_job(&self, _job_text: &str) -> Result<JobProfile, AppError> {
            Ok(JobProfile {
                required_skills: vec!["python".into(), "sql".into(), "leadership".into()],
                qualifications: vec!["bachelor in computer science".into()],
                experience_needed: "2 years required".to_string(),
            })
        }
    }

    struct TestApp {
        router: Router,
        input: tempfile::TempDir,
        output: tempfile::TempDir,
    }

    fn test_app() -> TestApp {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let input_dir = input.path().to_str().unwrap().to_string();
        let output_dir = output.path().to_str().unwrap().to_string();

        let config = Config::from_lookup(|key| match key {
            "GOOGLE_API_KEY" => Some("test-key".to_string()),
            "INPUT_DIR" => Some(input_dir.clone()),
            "OUTPUT_DIR" => Some(output_dir.clone()),
            _ => None,
        })
        .unwrap();

        let pipeline = MatchPipeline::new(
            Arc::new(StagedText),
            Arc::new(FixedProfiles),
            Reporter::new(&config.output_dir),
        );
        let state = AppState {
            config: Arc::new(config),
            pipeline: Arc::new(pipeline),
        };

        TestApp {
            router: build_router(state),
            input,
            output,
        }
    }

    fn multipart_request(parts: &[(&str, &str, &str)]) -> Request<Body> {
        let mut body = String::new();
        for (field, file_name, content) in parts {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: application/pdf\r\n\r\n{content}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));

        Request::builder()
            .method("POST")
            .uri("/match-cv-job")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn count_files(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[tokio::test]
    async fn test_health_reports_status_version_and_title() {
        let app = test_app();
        let response = app
            .router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(body["title"], health::API_TITLE);
    }

    #[tokio::test]
    async fn test_match_returns_result_and_writes_artifacts() {
        let app = test_app();
        let request = multipart_request(&[
            ("cv_file", "jane.pdf", "Jane Doe, Python, SQL"),
            ("job_file", "ROLE.PDF", "Data engineer, 2 years"),
        ]);

        let response = app.router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["scoreBreakdown"]["totalScore"], 72);
        assert_eq!(body["scoreBreakdown"]["skillMatchCount"], 2);
        assert_eq!(body["candidate"]["name"], "Jane Doe");
        assert!(body["interpretation"]
            .as_str()
            .unwrap()
            .starts_with("Good Match!"));
        assert!(body["timestamp"].as_str().is_some());

        assert_eq!(count_files(app.input.path()), 2);
        assert_eq!(count_files(app.output.path()), 2);
    }

    #[tokio::test]
    async fn test_non_pdf_cv_is_rejected_before_processing() {
        let app = test_app();
        let request = multipart_request(&[
            ("cv_file", "resume.docx", "Jane"),
            ("job_file", "role.pdf", "Engineer"),
        ]);

        let response = app.router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("CV file must be a PDF"));
        assert_eq!(count_files(app.input.path()), 0);
        assert_eq!(count_files(app.output.path()), 0);
    }

    #[tokio::test]
    async fn test_non_pdf_job_is_rejected() {
        let app = test_app();
        let request = multipart_request(&[
            ("cv_file", "resume.pdf", "Jane"),
            ("job_file", "role.txt", "Engineer"),
        ]);

        let response = app.router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("Job file must be a PDF"));
    }

    #[tokio::test]
    async fn test_missing_job_part_is_bad_request() {
        let app = test_app();
        let request = multipart_request(&[("cv_file", "resume.pdf", "Jane")]);

        let response = app.router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("job_file"));
    }

    #[tokio::test]
    async fn test_extraction_failure_is_server_error_with_cause() {
        let app = test_app();
        let request = multipart_request(&[
            ("cv_file", "resume.pdf", "   "),
            ("job_file", "role.pdf", "Engineer"),
        ]);

        let response = app.router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "EXTRACTION_FAILED");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("no extractable text"));
        assert_eq!(count_files(app.output.path()), 0);
    }
}
