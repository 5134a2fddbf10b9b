//! Academic min/max statistics over a result set

use crate::models::candidate::{parse_leading_float, CandidateResult, FieldValue};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    fn of(values: &[f64]) -> Option<Self> {
        let (first, rest) = values.split_first()?;
        Some(rest.iter().fold(
            Range {
                min: *first,
                max: *first,
            },
            |acc, v| Range {
                min: acc.min.min(*v),
                max: acc.max.max(*v),
            },
        ))
    }
}

/// Per-field ranges; a field with no parseable value is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcademicStats {
    pub cgpa: Option<Range>,
    pub tenth: Option<Range>,
    pub twelfth: Option<Range>,
}

fn present(value: Option<&FieldValue>) -> Option<&FieldValue> {
    value.filter(|v| !v.is_blank())
}

fn cgpa_value(value: &FieldValue) -> Option<f64> {
    value.first_number()
}

fn percentage_value(value: &FieldValue) -> Option<f64> {
    match value {
        FieldValue::Number(n) => Some(*n),
        FieldValue::Text(s) => parse_leading_float(s.replacen('%', "", 1).trim()),
    }
}

impl AcademicStats {
    /// `None` when no record yields any parseable CGPA or percentage.
    pub fn compute(results: &[CandidateResult]) -> Option<Self> {
        let mut cgpa = Vec::new();
        let mut tenth = Vec::new();
        let mut twelfth = Vec::new();

        for result in results {
            if let Some(v) = present(result.cgpa()).and_then(cgpa_value) {
                cgpa.push(v);
            }
            if let Some(v) = present(result.tenth_percentage()).and_then(percentage_value) {
                tenth.push(v);
            }
            if let Some(v) = present(result.twelfth_percentage()).and_then(percentage_value) {
                twelfth.push(v);
            }
        }

        if cgpa.is_empty() && tenth.is_empty() && twelfth.is_empty() {
            return None;
        }

        Some(Self {
            cgpa: Range::of(&cgpa),
            tenth: Range::of(&tenth),
            twelfth: Range::of(&twelfth),
        })
    }
}
