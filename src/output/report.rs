//! Report structures for a filtering session

use crate::models::candidate::{CandidateResult, FieldValue};
use crate::processing::filter::{FilterSession, Progress};
use crate::processing::sort::SortConfig;
use crate::processing::stats::AcademicStats;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of a filtering session, rows in display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterReport {
    pub generated_at: DateTime<Utc>,
    pub sort: SortConfig,
    pub progress: Progress,
    /// Number of criteria that constrained the request
    pub active_filters: usize,
    /// Absent when no record had usable academic data
    pub stats: Option<AcademicStats>,
    pub rows: Vec<CandidateRow>,
}

/// One table row. Values are kept as the backend sent them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateRow {
    pub name: String,
    pub filename: String,
    pub department: String,
    pub cgpa: Option<String>,
    pub ats_score: Option<String>,
    pub languages: Vec<String>,
    pub skills: Vec<String>,
    pub preview_url: Option<String>,
}

fn shown(value: Option<&FieldValue>) -> Option<String> {
    value
        .filter(|v| !v.is_blank())
        .map(|v| v.as_text().into_owned())
}

impl From<&CandidateResult> for CandidateRow {
    fn from(result: &CandidateResult) -> Self {
        Self {
            name: result.display_name().to_string(),
            filename: result.filename().to_string(),
            department: result.department().to_string(),
            cgpa: shown(result.cgpa()),
            ats_score: shown(result.ats_score.as_ref()),
            languages: result.languages.clone(),
            skills: result.skills.technical.clone(),
            preview_url: result.preview_url().map(str::to_string),
        }
    }
}

impl FilterReport {
    pub fn from_session(session: &FilterSession) -> Self {
        Self {
            generated_at: Utc::now(),
            sort: session.sort,
            progress: session.progress(),
            active_filters: session.active_filter_count(),
            stats: session.stats(),
            rows: session
                .sorted_results()
                .into_iter()
                .map(CandidateRow::from)
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
