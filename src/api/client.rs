//! HTTP client for the resume backend

use crate::api::envelope::{ensure_success, read_json};
use crate::config::Config;
use crate::error::{Result, ResumeDeskError};
use crate::guard::{effective_role, TokenVerifier};
use crate::input::uploads::FormFile;
use crate::models::candidate::CandidateResult;
use crate::models::profile::ProfileKind;
use crate::models::user::{
    ChatRequest, GuidanceRequest, LoginRequest, LoginResponse, PortfolioRequest, ResumeAnalysis,
    UserAnalysis, VerifyResponse,
};
use crate::processing::filter::{FilterBackend, FilterForm, FILES_FIELD};
use log::{debug, info};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde_json::{Map, Value};
use std::time::Duration;

/// Outcome of a successful login followed by token verification.
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub message: Option<String>,
    pub access_token: String,
    pub role: String,
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

fn part(file: &FormFile) -> Result<Part> {
    Part::bytes(file.bytes.clone())
        .file_name(file.name.clone())
        .mime_str(file.mime)
        .map_err(|e| ResumeDeskError::InvalidInput(format!("Invalid content type for {}: {}", file.name, e)))
}

fn payload(mut body: Map<String, Value>, key: &str) -> Result<Value> {
    body.remove(key)
        .filter(|v| !v.is_null())
        .ok_or_else(|| ResumeDeskError::UnexpectedResponse(format!("response has no '{}' field", key)))
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ResumeDeskError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.backend.base_url, config.request_timeout())
    }

    /// Attach a bearer token to every subsequent request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `path` followed by one percent-encoded segment.
    fn url_with_segment(&self, path: &str, segment: &str) -> Result<Url> {
        let mut url = Url::parse(&self.url(path))
            .map_err(|e| ResumeDeskError::Configuration(format!("Invalid backend URL {}: {}", self.base_url, e)))?;
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                ResumeDeskError::Configuration(format!("Backend URL cannot take a path: {}", self.base_url))
            })?;
            segments.push(segment);
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: impl reqwest::IntoUrl) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        info!("Logging in as {}", email);
        let response = self
            .request(Method::POST, self.url("/auth/login"))
            .json(&LoginRequest { email, password })
            .send()
            .await?;
        let body = read_json(response).await?;
        Ok(serde_json::from_value(Value::Object(body))?)
    }

    /// Role attached to `token`, if the backend reports one.
    pub async fn verify_token(&self, token: &str) -> Result<Option<String>> {
        let response = self
            .http
            .get(self.url("/auth/verify_token"))
            .bearer_auth(token)
            .send()
            .await?;
        let body = read_json(response).await?;
        let verified: VerifyResponse = serde_json::from_value(Value::Object(body))?;
        Ok(verified.data.and_then(|d| d.role))
    }

    /// Log in, then verify the issued token to learn the role.
    /// A verified token without a role, or with a blank one, is treated as `user`.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SignedIn> {
        let login = self.login(email, password).await?;
        let access_token = login
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ResumeDeskError::UnexpectedResponse("No access token received".to_string()))?;

        let role = effective_role(self.verify_token(&access_token).await?);
        info!("Signed in with role {}", role);

        Ok(SignedIn {
            message: login.message,
            access_token,
            role,
        })
    }

    /// Succeeds only when the backend confirms with a 2xx; the body is ignored.
    pub async fn logout(&self) -> Result<()> {
        let response = self.request(Method::POST, self.url("/auth/logout")).send().await?;
        ensure_success(response).await?;
        Ok(())
    }

    /// Recruiter-side single resume parse.
    pub async fn upload_resume(&self, file: &FormFile) -> Result<ResumeAnalysis> {
        info!("Uploading resume {} for analysis", file.name);
        let form = Form::new().part("file", part(file)?);
        let response = self
            .request(Method::POST, self.url("/resume/upload_resume"))
            .multipart(form)
            .send()
            .await?;
        let body = read_json(response).await?;
        ResumeAnalysis::from_response(body)
            .ok_or_else(|| ResumeDeskError::UnexpectedResponse("response has no 'data' object".to_string()))
    }

    /// Coding-platform analysis for one handle. Only GitHub takes a token.
    pub async fn analyze_profile(
        &self,
        kind: ProfileKind,
        handle: &str,
        github_token: Option<&str>,
    ) -> Result<Value> {
        let mut url = self.url_with_segment(kind.endpoint(), handle)?;
        if let (ProfileKind::GitHub, Some(token)) = (kind, github_token.filter(|t| !t.is_empty())) {
            url.query_pairs_mut().append_pair("token", token);
        }
        debug!("Analysing {} profile {}", kind, handle);

        let response = self.request(Method::GET, url).send().await?;
        Ok(Value::Object(read_json(response).await?))
    }

    pub async fn upload_user_resume(&self, email: &str, file: &FormFile) -> Result<UserAnalysis> {
        info!("Uploading resume {} for {}", file.name, email);
        let form = Form::new()
            .text("email", email.to_string())
            .part("file", part(file)?);
        let response = self
            .request(Method::POST, self.url("/user/upload_resume"))
            .multipart(form)
            .send()
            .await?;
        let body = read_json(response).await?;
        Ok(serde_json::from_value(Value::Object(body))?)
    }

    /// Stored user document; an absent `user` field yields an empty object.
    pub async fn user_info(&self, email: &str) -> Result<Value> {
        let url = self.url_with_segment("/user/info", email)?;
        let response = self.request(Method::GET, url).send().await?;
        let mut body = read_json(response).await?;
        Ok(body
            .remove("user")
            .filter(|v| !v.is_null())
            .unwrap_or_else(|| Value::Object(Map::new())))
    }

    pub async fn portfolio(&self, email: &str) -> Result<Value> {
        let response = self
            .request(Method::POST, self.url("/user/portfolio"))
            .json(&PortfolioRequest { email })
            .send()
            .await?;
        payload(read_json(response).await?, "portfolio")
    }

    pub async fn chat(&self, query: &str, resume_data: &Value) -> Result<String> {
        let response = self
            .request(Method::POST, self.url("/ai/chat"))
            .json(&ChatRequest { query, resume_data })
            .send()
            .await?;
        match payload(read_json(response).await?, "response")? {
            Value::String(text) => Ok(text),
            other => Ok(other.to_string()),
        }
    }

    pub async fn generate_guidance(&self, resume_data: &Value) -> Result<Value> {
        let response = self
            .request(Method::POST, self.url("/guidance/generate"))
            .json(&GuidanceRequest { resume_data })
            .send()
            .await?;
        payload(read_json(response).await?, "guidance")
    }
}

impl FilterBackend for BackendClient {
    async fn filter_uploaded_resumes(&self, form: FilterForm) -> Result<Vec<CandidateResult>> {
        let mut multipart = Form::new();
        for file in &form.files {
            multipart = multipart.part(FILES_FIELD, part(file)?);
        }
        for (name, value) in form.fields {
            multipart = multipart.text(name, value);
        }

        let response = self
            .request(Method::POST, self.url("/admin/filter_uploaded_resumes"))
            .multipart(multipart)
            .send()
            .await?;
        let mut body = read_json(response).await?;

        match body.remove("results") {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(results @ Value::Array(_)) => Ok(serde_json::from_value(results)?),
            Some(_) => Err(ResumeDeskError::UnexpectedResponse(
                "'results' is not a list".to_string(),
            )),
        }
    }
}

impl TokenVerifier for BackendClient {
    async fn verify_token(&self, token: &str) -> Result<Option<String>> {
        BackendClient::verify_token(self, token).await
    }
}
