//! Backend client tests against an in-process mock server

use axum::extract::{Multipart, Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use resume_desk::api::BackendClient;
use resume_desk::guard::{AuthState, GuardOutcome, RouteGuard};
use resume_desk::input::uploads::{FormFile, UploadSet};
use resume_desk::models::{FilterCriteria, ProfileKind};
use resume_desk::processing::filter::FilterSession;
use resume_desk::ResumeDeskError;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::time::Duration;

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] == "secret" {
        Json(json!({ "message": "Login successful", "access_token": "tok-admin" })).into_response()
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({ "detail": "Invalid credentials" }))).into_response()
    }
}

async fn verify_token(headers: HeaderMap) -> Response {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    match auth {
        "Bearer tok-admin" => Json(json!({ "data": { "role": "admin" } })).into_response(),
        "Bearer tok-user" => Json(json!({ "data": {} })).into_response(),
        _ => (StatusCode::UNAUTHORIZED, Json(json!({ "detail": "Invalid token" }))).into_response(),
    }
}

async fn logout() -> StatusCode {
    StatusCode::OK
}

/// Echoes the multipart request back inside each result.
async fn filter_uploaded_resumes(mut multipart: Multipart) -> Json<Value> {
    let mut files = Vec::new();
    let mut fields = Map::new();

    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        if name == "files" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let size = field.bytes().await.unwrap().len();
            files.push((file_name, content_type, size));
        } else {
            fields.insert(name, Value::String(field.text().await.unwrap()));
        }
    }

    let results: Vec<Value> = files
        .into_iter()
        .enumerate()
        .map(|(i, (file_name, content_type, size))| {
            json!({
                "name": format!("Candidate {}", i + 1),
                "filename": file_name,
                "education": { "bachelor": { "degree": "B.E CSE", "cgpa": format!("{}.5", 7 + i) } },
                "content_type": content_type,
                "size": size,
                "fields": fields.clone()
            })
        })
        .collect();

    Json(json!({ "results": results }))
}

async fn upload_resume() -> Json<Value> {
    Json(json!({ "error": "Could not parse PDF" }))
}

async fn analyze_leetcode(Path(user): Path<String>) -> Json<Value> {
    Json(json!({ "username": user, "solved": 321 }))
}

async fn analyze_github(Path(_user): Path<String>, Query(query): Query<HashMap<String, String>>) -> Response {
    if query.get("token").map(String::as_str) == Some("gh-token") {
        Json(json!({ "repos": 12 })).into_response()
    } else {
        (StatusCode::BAD_GATEWAY, "upstream timed out").into_response()
    }
}

async fn chat() -> &'static str {
    "this is not json"
}

async fn guidance(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({ "guidance": { "for": body["resume_data"]["name"] } }))
}

async fn spawn_backend() -> String {
    let router = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/verify_token", get(verify_token))
        .route("/auth/logout", post(logout))
        .route("/admin/filter_uploaded_resumes", post(filter_uploaded_resumes))
        .route("/resume/upload_resume", post(upload_resume))
        .route("/leetcode/analyze_leetcode/:user", get(analyze_leetcode))
        .route("/github/analyze_github/:user", get(analyze_github))
        .route("/ai/chat", post(chat))
        .route("/guidance/generate", post(guidance));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client(base_url: &str) -> BackendClient {
    BackendClient::new(base_url, Duration::from_secs(10)).unwrap()
}

#[tokio::test]
async fn test_sign_in_reports_role() {
    let base = spawn_backend().await;
    let signed_in = client(&base).sign_in("asha@example.com", "secret").await.unwrap();

    assert_eq!(signed_in.access_token, "tok-admin");
    assert_eq!(signed_in.role, "admin");
    assert_eq!(signed_in.message.as_deref(), Some("Login successful"));
}

#[tokio::test]
async fn test_login_failure_carries_detail() {
    let base = spawn_backend().await;
    let err = client(&base).login("asha@example.com", "wrong").await.unwrap_err();

    match err {
        ResumeDeskError::Http { status, ref detail } => {
            assert_eq!(status, 401);
            assert_eq!(detail, "Invalid credentials");
        }
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(err.user_message(), "Invalid credentials");
}

#[tokio::test]
async fn test_guard_against_backend() {
    let base = spawn_backend().await;
    let api = client(&base);

    let mut guard = RouteGuard::new(["admin"]);
    guard.resolve(Some("tok-admin"), &api).await;
    assert_eq!(guard.outcome(), GuardOutcome::Render);

    // verified without a role counts as "user"
    let mut guard = RouteGuard::new(["admin"]);
    guard.resolve(Some("tok-user"), &api).await;
    assert_eq!(
        guard.state(),
        &AuthState::Unauthorized {
            role: Some("user".to_string())
        }
    );

    let mut guard = RouteGuard::new(["admin", "user"]);
    guard.resolve(Some("expired"), &api).await;
    assert_eq!(guard.outcome(), GuardOutcome::Redirect("/login"));
}

#[tokio::test]
async fn test_filter_submission_sends_files_and_criteria() {
    let base = spawn_backend().await;
    let api = client(&base).with_token("tok-admin");

    let mut uploads = UploadSet::new();
    uploads.add_bytes("asha.pdf", b"%PDF-1.4 asha".to_vec()).unwrap();
    uploads.add_bytes("ravi.docx", b"PK ravi".to_vec()).unwrap();

    let mut criteria = FilterCriteria::new();
    criteria.cgpa = Some(7.5);
    criteria.add_skill("Python");
    criteria.add_skill("SQL");
    criteria.add_department("cse").unwrap();
    criteria.add_department("IT").unwrap();

    let mut session = FilterSession::new(uploads, criteria);
    assert_eq!(session.submit(&api).await.unwrap(), 2);
    assert_eq!(session.progress().processed, 2);
    assert_eq!(session.progress().total, 2);

    let first = &session.results()[0];
    assert_eq!(first.filename(), "asha.pdf");
    assert_eq!(first.extra["content_type"], "application/pdf");
    let fields = &first.extra["fields"];
    assert_eq!(fields["cgpa"], "7.5");
    assert_eq!(fields["skills"], "Python,SQL");
    assert_eq!(
        fields["department"],
        "Computer Science and Engineering,Information Technology"
    );
    assert!(fields.get("ats").is_none());
    assert!(first.preview_url().is_some());

    let stats = session.stats().unwrap();
    assert_eq!(stats.cgpa.map(|r| (r.min, r.max)), Some((7.5, 8.5)));
}

#[tokio::test]
async fn test_embedded_error_in_successful_response() {
    let base = spawn_backend().await;
    let file = FormFile {
        name: "broken.pdf".to_string(),
        mime: "application/pdf",
        bytes: b"%PDF".to_vec(),
    };

    let err = client(&base).upload_resume(&file).await.unwrap_err();
    assert!(matches!(err, ResumeDeskError::Backend(ref d) if d == "Could not parse PDF"));
}

#[tokio::test]
async fn test_profile_analysis() {
    let base = spawn_backend().await;
    let api = client(&base);

    let leetcode = api
        .analyze_profile(ProfileKind::LeetCode, "asha_r", None)
        .await
        .unwrap();
    assert_eq!(leetcode["username"], "asha_r");

    let github = api
        .analyze_profile(ProfileKind::GitHub, "asha", Some("gh-token"))
        .await
        .unwrap();
    assert_eq!(github["repos"], 12);

    // plain-text failure body becomes the detail
    let err = api
        .analyze_profile(ProfileKind::GitHub, "asha", None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ResumeDeskError::Http { status: 502, ref detail } if detail == "upstream timed out"
    ));
}

#[tokio::test]
async fn test_malformed_body_and_payloads() {
    let base = spawn_backend().await;
    let api = client(&base);

    let err = api.chat("How do I improve?", &json!({})).await.unwrap_err();
    assert!(matches!(err, ResumeDeskError::UnexpectedResponse(_)));
    assert_eq!(err.user_message(), "Unexpected response from server. Please try again.");

    let guidance = api
        .generate_guidance(&json!({ "name": "Asha" }))
        .await
        .unwrap();
    assert_eq!(guidance["for"], "Asha");
}

#[tokio::test]
async fn test_logout_accepts_empty_body() {
    let base = spawn_backend().await;
    client(&base).with_token("tok-admin").logout().await.unwrap();
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{}", addr))
        .login("asha@example.com", "secret")
        .await
        .unwrap_err();
    assert!(err.is_network());
    assert_eq!(
        err.user_message(),
        "Cannot connect to the server. Please check if the backend is running."
    );
}
