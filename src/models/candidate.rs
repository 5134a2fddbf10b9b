//! Parsed-and-scored resume records returned by the filtering endpoint

use crate::input::uploads::Preview;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::sync::{Arc, OnceLock};

/// A scalar the backend sends either as a JSON number or as free text
/// (`8.5`, `"7.2 CGPA"`, `"92%"`, `"N/A"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Number(n) => Cow::Owned(n.to_string()),
            FieldValue::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, FieldValue::Text(s) if s.trim().is_empty())
    }

    /// Number at the start of the value, ignoring trailing text.
    pub fn leading_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => parse_leading_float(s),
        }
    }

    /// First decimal number found anywhere in the value.
    pub fn first_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => first_decimal(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

fn leading_float_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").expect("valid leading float pattern")
    })
}

fn decimal_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+(?:\.\d+)?").expect("valid decimal pattern"))
}

/// Parse the longest numeric prefix of `text` (after leading whitespace).
/// `"7.2 CGPA"` gives 7.2, `"N/A"` gives nothing.
pub fn parse_leading_float(text: &str) -> Option<f64> {
    leading_float_regex()
        .find(text)
        .and_then(|m| m.as_str().trim().parse::<f64>().ok())
}

/// Parse the first unsigned decimal number anywhere in `text`.
pub fn first_decimal(text: &str) -> Option<f64> {
    decimal_regex()
        .find(text)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub education: Education,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ats_score: Option<FieldValue>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub languages: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Skills,

    /// Everything else the backend returned, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    #[serde(skip)]
    pub preview: Option<Arc<Preview>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Education {
    #[serde(rename = "10th", default, deserialize_with = "null_as_default")]
    pub tenth: SchoolRecord,

    #[serde(rename = "12th", default, deserialize_with = "null_as_default")]
    pub twelfth: SchoolRecord,

    #[serde(default, deserialize_with = "null_as_default")]
    pub bachelor: DegreeRecord,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchoolRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<FieldValue>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DegreeRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cgpa: Option<FieldValue>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Skills {
    #[serde(default, deserialize_with = "null_as_default")]
    pub technical: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub area_of_interest: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CandidateResult {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("Unknown")
    }

    pub fn filename(&self) -> &str {
        self.filename.as_deref().unwrap_or("")
    }

    /// Department as reported by the backend: the bachelor degree line.
    pub fn department(&self) -> &str {
        self.education.bachelor.degree.as_deref().unwrap_or("")
    }

    pub fn cgpa(&self) -> Option<&FieldValue> {
        self.education.bachelor.cgpa.as_ref()
    }

    pub fn tenth_percentage(&self) -> Option<&FieldValue> {
        self.education.tenth.percentage.as_ref()
    }

    pub fn twelfth_percentage(&self) -> Option<&FieldValue> {
        self.education.twelfth.percentage.as_ref()
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.preview.as_deref().map(Preview::url)
    }
}
