//! Bulk filter submission and the state of one filtering session

use crate::error::{Result, ResumeDeskError};
use crate::input::uploads::{FormFile, UploadSet};
use crate::models::candidate::CandidateResult;
use crate::models::criteria::FilterCriteria;
use crate::processing::sort::{sorted, SortConfig, SortKey};
use crate::processing::stats::AcademicStats;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Multipart name under which every resume is sent.
pub const FILES_FIELD: &str = "files";

/// Body of a bulk filter request: resume parts first, then criteria fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterForm {
    pub files: Vec<FormFile>,
    pub fields: Vec<(String, String)>,
}

impl FilterForm {
    pub fn build(uploads: &UploadSet, criteria: &FilterCriteria) -> Self {
        Self {
            files: uploads.iter().map(FormFile::from).collect(),
            fields: criteria.form_fields(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub processed: usize,
    pub total: usize,
}

impl Progress {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.processed as f64 / self.total as f64
        }
    }
}

/// Anything that can run the bulk filtering request.
pub trait FilterBackend {
    fn filter_uploaded_resumes(
        &self,
        form: FilterForm,
    ) -> impl std::future::Future<Output = Result<Vec<CandidateResult>>> + Send;
}

#[derive(Debug, Default)]
pub struct FilterSession {
    pub uploads: UploadSet,
    pub criteria: FilterCriteria,
    pub sort: SortConfig,
    results: Vec<CandidateResult>,
    progress: Progress,
}

impl FilterSession {
    pub fn new(uploads: UploadSet, criteria: FilterCriteria) -> Self {
        Self {
            uploads,
            criteria,
            ..Self::default()
        }
    }

    /// Send every upload with the current criteria and replace the results.
    /// On failure the previous results are left untouched.
    pub async fn submit<B: FilterBackend>(&mut self, backend: &B) -> Result<usize> {
        if self.uploads.is_empty() {
            return Err(ResumeDeskError::InvalidInput(
                "Please upload at least one resume".to_string(),
            ));
        }

        let form = FilterForm::build(&self.uploads, &self.criteria);
        self.progress = Progress {
            processed: 0,
            total: form.files.len(),
        };
        info!(
            "Submitting {} resume(s) with {} active filter(s)",
            self.progress.total,
            self.criteria.active_filter_count()
        );

        let mut results = match backend.filter_uploaded_resumes(form).await {
            Ok(results) => results,
            Err(e) => {
                error!("Resume filtering failed: {}", e);
                return Err(e);
            }
        };

        for result in &mut results {
            match self.uploads.get(result.filename()) {
                Some(upload) => result.preview = Some(Arc::clone(&upload.preview)),
                None => warn!("No upload matches result file '{}'", result.filename()),
            }
        }

        self.results = results;
        self.progress.processed = self.results.len();
        info!("Filtering returned {} matching resume(s)", self.results.len());
        Ok(self.results.len())
    }

    pub fn results(&self) -> &[CandidateResult] {
        &self.results
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn sorted_results(&self) -> Vec<&CandidateResult> {
        sorted(&self.results, &self.sort)
    }

    pub fn stats(&self) -> Option<AcademicStats> {
        AcademicStats::compute(&self.results)
    }

    pub fn sort_by(&mut self, key: SortKey) {
        self.sort.toggle(key);
    }

    pub fn active_filter_count(&self) -> usize {
        self.criteria.active_filter_count()
    }
}
