use crate::application::FeedbackAnalysisUseCase;
use crate::domain::error::{AppError, ErrorClass, Result};
use actix_cors::Cors;
use actix_multipart::{Field, Multipart};
use actix_web::http::StatusCode;
use actix_web::{dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder, ResponseError};
use futures_util::StreamExt;
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

/// MIME types browsers send for `.csv` uploads
pub const ALLOWED_CONTENT_TYPES: [&str; 2] = ["text/csv", "application/vnd.ms-excel"];

const UPLOAD_FIELD: &str = "file";

pub struct HttpState {
    pub analysis: FeedbackAnalysisUseCase,
    pub max_upload_bytes: usize,
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
    code: &'static str,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        if let AppError::PayloadTooLarge(_) = self {
            return StatusCode::PAYLOAD_TOO_LARGE;
        }
        match self.class() {
            ErrorClass::Client => StatusCode::BAD_REQUEST,
            ErrorClass::Upstream => StatusCode::BAD_GATEWAY,
            ErrorClass::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            detail: self.public_message(),
            code: self.code(),
        })
    }
}

#[post("/analyze")]
async fn analyze(
    data: web::Data<HttpState>,
    payload: Multipart,
) -> std::result::Result<HttpResponse, AppError> {
    let upload = read_upload(payload, data.max_upload_bytes)
        .await
        .map_err(|err| {
            warn!(code = err.code(), "Rejected upload: {}", err);
            err
        })?;

    info!(bytes = upload.len(), "Analyzing feedback upload");

    let result = data.analysis.execute(&upload).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

/// Pull the bytes of the `file` part, enforcing filename, content type, size, and non-emptiness.
async fn read_upload(mut payload: Multipart, max_bytes: usize) -> Result<Vec<u8>> {
    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| {
            AppError::ValidationError(format!("Malformed multipart body: {}", e))
        })?;

        let (name, filename) = field
            .content_disposition()
            .map(|cd| {
                (
                    cd.get_name().map(str::to_string),
                    cd.get_filename().map(str::to_string),
                )
            })
            .unwrap_or((None, None));

        if name.as_deref() != Some(UPLOAD_FIELD) {
            drain(&mut field).await?;
            continue;
        }

        if filename.map_or(true, |f| f.is_empty()) {
            return Err(AppError::ValidationError("No file uploaded.".to_string()));
        }

        let content_type = field.content_type().map(|mime| mime.essence_str().to_string());
        if !content_type
            .as_deref()
            .map_or(false, |ct| ALLOWED_CONTENT_TYPES.contains(&ct))
        {
            return Err(AppError::ValidationError(
                "Unsupported file type. Upload a CSV.".to_string(),
            ));
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| {
                AppError::ValidationError(format!("Failed to read upload: {}", e))
            })?;
            if bytes.len() + chunk.len() > max_bytes {
                return Err(AppError::PayloadTooLarge(
                    "Uploaded file is too large.".to_string(),
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        if bytes.is_empty() {
            return Err(AppError::ValidationError("Uploaded file is empty.".to_string()));
        }
        return Ok(bytes);
    }

    Err(AppError::ValidationError("No file uploaded.".to_string()))
}

async fn drain(field: &mut Field) -> Result<()> {
    while let Some(chunk) = field.next().await {
        chunk.map_err(|e| AppError::ValidationError(format!("Malformed multipart body: {}", e)))?;
    }
    Ok(())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(analyze).service(health);
}

pub fn start_server(state: HttpState, host: &str, port: u16) -> std::io::Result<Server> {
    let state = web::Data::new(state);

    let server = HttpServer::new(move || {
        // Browser front-ends are served from arbitrary dev origins.
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((host, port))?
    .run();

    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm_config::LLMConfig;
    use crate::infrastructure::llm_clients::stub::StubClient;
    use actix_web::http::header;
    use actix_web::test;
    use std::sync::Arc;

    const BOUNDARY: &str = "----feedbackboundary";
    const GOOD_REPLY: &str =
        r#"{"summary": "Customers like the app", "improvement_suggestions": ["Faster sync", "Dark mode", "Offline"]}"#;

    fn multipart_body(filename: &str, content_type: &str, content: &str) -> String {
        format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{f}\"\r\nContent-Type: {ct}\r\n\r\n{c}\r\n--{b}--\r\n",
            b = BOUNDARY,
            f = filename,
            ct = content_type,
            c = content
        )
    }

    fn state(client: Arc<StubClient>, max_upload_bytes: usize) -> web::Data<HttpState> {
        web::Data::new(HttpState {
            analysis: FeedbackAnalysisUseCase::new(client, LLMConfig::default()),
            max_upload_bytes,
        })
    }

    async fn post_upload(
        client: Arc<StubClient>,
        body: String,
    ) -> (StatusCode, serde_json::Value) {
        let app = test::init_service(
            App::new()
                .app_data(state(client, 1024))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/analyze")
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            ))
            .set_payload(body)
            .to_request();

        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let json: serde_json::Value = test::read_body_json(resp).await;
        (status, json)
    }

    #[actix_web::test]
    async fn test_health() {
        let app = test::init_service(
            App::new()
                .app_data(state(StubClient::replying(GOOD_REPLY), 1024))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let json: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(json, json!({ "status": "ok" }));
    }

    #[actix_web::test]
    async fn test_analyze_success() {
        let body = multipart_body(
            "feedback.csv",
            "text/csv",
            "feedback_id,text,rating\n1,great,4\n2,ok,3\n3,bad,1",
        );

        let (status, json) = post_upload(StubClient::replying(GOOD_REPLY), body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["summary"], "Customers like the app");
        assert_eq!(
            json["improvement_suggestions"],
            json!(["Faster sync", "Dark mode"])
        );
        assert_eq!(json["sentiment_stats"]["positive"]["count"], 1);
        assert_eq!(json["sentiment_stats"]["neutral"]["percent"], 33.33);
        assert_eq!(json["sentiment_stats"]["negative"]["percent"], 33.33);
    }

    #[actix_web::test]
    async fn test_excel_mime_accepted() {
        let body = multipart_body(
            "feedback.csv",
            "application/vnd.ms-excel",
            "feedback_id,text,rating\n1,great,5",
        );

        let (status, _) = post_upload(StubClient::replying(GOOD_REPLY), body).await;

        assert_eq!(status, StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_unsupported_content_type() {
        let client = StubClient::replying(GOOD_REPLY);
        let body = multipart_body("feedback.json", "application/json", "{}");

        let (status, json) = post_upload(client.clone(), body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["detail"], "Unsupported file type. Upload a CSV.");
        assert_eq!(client.calls(), 0);
    }

    #[actix_web::test]
    async fn test_empty_upload() {
        let body = multipart_body("feedback.csv", "text/csv", "");

        let (status, json) = post_upload(StubClient::replying(GOOD_REPLY), body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["detail"], "Uploaded file is empty.");
    }

    #[actix_web::test]
    async fn test_missing_file_field() {
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nhello\r\n--{b}--\r\n",
            b = BOUNDARY
        );

        let (status, json) = post_upload(StubClient::replying(GOOD_REPLY), body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["detail"], "No file uploaded.");
    }

    #[actix_web::test]
    async fn test_oversized_upload() {
        let content = format!("feedback_id,text,rating\n1,{},5", "x".repeat(2048));
        let body = multipart_body("feedback.csv", "text/csv", &content);

        let (status, json) = post_upload(StubClient::replying(GOOD_REPLY), body).await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(json["code"], "payload_too_large");
    }

    #[actix_web::test]
    async fn test_missing_column_is_client_error() {
        let body = multipart_body("feedback.csv", "text/csv", "feedback_id,text\n1,hello");

        let (status, json) = post_upload(StubClient::replying(GOOD_REPLY), body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["detail"], "Missing required columns: rating.");
        assert_eq!(json["code"], "missing_columns");
    }

    #[actix_web::test]
    async fn test_non_numeric_rating_is_client_error() {
        let body = multipart_body("feedback.csv", "text/csv", "feedback_id,text,rating\n1,hi,abc");

        let (status, json) = post_upload(StubClient::replying(GOOD_REPLY), body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "non_numeric_rating");
    }

    #[actix_web::test]
    async fn test_model_failure_is_bad_gateway() {
        let body = multipart_body("feedback.csv", "text/csv", "feedback_id,text,rating\n1,hi,5");

        let (status, json) = post_upload(StubClient::failing("connection reset"), body).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(
            json["detail"],
            "Failed to generate summary from language model."
        );
    }

    #[actix_web::test]
    async fn test_too_few_suggestions_is_bad_gateway() {
        let body = multipart_body("feedback.csv", "text/csv", "feedback_id,text,rating\n1,hi,5");
        let client = StubClient::replying(r#"{"summary": "S", "improvement_suggestions": ["one"]}"#);

        let (status, json) = post_upload(client, body).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(
            json["detail"],
            "Language model did not return the expected suggestions."
        );
    }
}
