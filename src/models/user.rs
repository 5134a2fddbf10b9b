//! Payloads exchanged on the candidate-facing side: login, resume analysis, chat

use crate::models::candidate::{null_as_default, FieldValue};
use crate::models::profile::ProfileKind;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyResponse {
    #[serde(default)]
    pub data: Option<VerifyData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyData {
    #[serde(default)]
    pub role: Option<String>,
}

/// Result of the recruiter-side single resume upload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    /// Parsed resume fields as returned by the backend.
    pub data: Map<String, Value>,
    pub ats_score: Option<FieldValue>,
    pub word_count: Option<FieldValue>,
}

impl ResumeAnalysis {
    /// Build from the upload response, preferring root-level scores over
    /// the ones nested in `data`.
    pub fn from_response(mut body: Map<String, Value>) -> Option<Self> {
        let data = match body.remove("data") {
            Some(Value::Object(data)) => data,
            _ => return None,
        };

        let ats_score = body
            .get("ats_score")
            .or_else(|| data.get("ats_score"))
            .and_then(field_value);
        let word_count = body.get("word_count").and_then(field_value);

        Some(Self {
            data,
            ats_score,
            word_count,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.data.get("name").and_then(Value::as_str)
    }

    /// Profile links present in the parsed resume.
    pub fn profile_links(&self) -> Vec<(ProfileKind, String)> {
        ProfileKind::ALL
            .iter()
            .filter_map(|kind| {
                self.data
                    .get(kind.resume_key())
                    .and_then(Value::as_str)
                    .filter(|link| !link.trim().is_empty())
                    .map(|link| (*kind, link.to_string()))
            })
            .collect()
    }
}

fn field_value(value: &Value) -> Option<FieldValue> {
    match value {
        Value::Number(n) => n.as_f64().map(FieldValue::Number),
        Value::String(s) => Some(FieldValue::Text(s.clone())),
        _ => None,
    }
}

/// Result of the candidate-side resume upload, kept in the session so later
/// commands (chat, guidance, roles) can use it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserAnalysis {
    #[serde(default)]
    pub ats_score: Option<FieldValue>,
    #[serde(default)]
    pub word_count: Option<FieldValue>,
    #[serde(default, alias = "structured_info", deserialize_with = "null_as_default")]
    pub data: Map<String, Value>,
    #[serde(default)]
    pub ats_breakdown: Option<Value>,
    #[serde(default)]
    pub detected_role: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub suggested_skills: Vec<String>,
}

impl UserAnalysis {
    pub fn ats_score(&self) -> f64 {
        self.ats_score
            .as_ref()
            .and_then(FieldValue::leading_number)
            .unwrap_or(0.0)
    }

    pub fn name(&self) -> Option<&str> {
        self.data
            .get("name")
            .and_then(Value::as_str)
            .filter(|n| !n.trim().is_empty())
    }

    pub fn email(&self) -> Option<&str> {
        self.data
            .get("email")
            .and_then(Value::as_str)
            .filter(|e| !e.trim().is_empty())
    }

    pub fn technical_skills(&self) -> Vec<String> {
        self.data
            .get("skills")
            .and_then(|skills| skills.get("technical"))
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn suggested_skills(&self) -> Vec<String> {
        self.suggested_skills
            .iter()
            .map(|s| s.trim().to_string())
            .collect()
    }

    pub fn resume_data(&self) -> Value {
        Value::Object(self.data.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub query: &'a str,
    pub resume_data: &'a Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct GuidanceRequest<'a> {
    pub resume_data: &'a Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioRequest<'a> {
    pub email: &'a str,
}
