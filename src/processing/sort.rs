//! Column sorting for the filtered results table

use crate::error::ResumeDeskError;
use crate::models::candidate::{CandidateResult, FieldValue};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Name,
    Filename,
    Department,
    Cgpa,
    Ats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl FromStr for SortKey {
    type Err = ResumeDeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "filename" | "file" => Ok(SortKey::Filename),
            "department" | "dept" => Ok(SortKey::Department),
            "cgpa" => Ok(SortKey::Cgpa),
            "ats" | "ats_score" => Ok(SortKey::Ats),
            _ => Err(ResumeDeskError::InvalidInput(format!(
                "Invalid sort key: {}. Supported: name, filename, department, cgpa, ats",
                s
            ))),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::Name => "name",
            SortKey::Filename => "filename",
            SortKey::Department => "department",
            SortKey::Cgpa => "cgpa",
            SortKey::Ats => "ats",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: Option<SortKey>,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self {
            key: Some(key),
            direction,
        }
    }

    /// Header click: the same key flips direction, a new key starts ascending.
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == Some(key) {
            self.direction = self.direction.flipped();
        } else {
            self.key = Some(key);
            self.direction = SortDirection::Asc;
        }
    }
}

enum SortValue {
    Text(String),
    Number(f64),
}

fn numeric(value: Option<&FieldValue>) -> f64 {
    value.and_then(FieldValue::leading_number).unwrap_or(0.0)
}

fn sort_value(result: &CandidateResult, key: SortKey) -> SortValue {
    match key {
        SortKey::Name => SortValue::Text(result.name.as_deref().unwrap_or("").to_lowercase()),
        SortKey::Filename => SortValue::Text(result.filename().to_lowercase()),
        SortKey::Department => SortValue::Text(result.department().to_lowercase()),
        SortKey::Cgpa => SortValue::Number(numeric(result.cgpa())),
        SortKey::Ats => SortValue::Number(numeric(result.ats_score.as_ref())),
    }
}

fn compare(a: &SortValue, b: &SortValue) -> Ordering {
    match (a, b) {
        (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
        (SortValue::Number(a), SortValue::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    }
}

/// Ordered view over `results`. The input is never reordered; with no key
/// the input order is returned unchanged.
pub fn sorted<'a>(results: &'a [CandidateResult], config: &SortConfig) -> Vec<&'a CandidateResult> {
    let mut view: Vec<&CandidateResult> = results.iter().collect();
    let Some(key) = config.key else {
        return view;
    };

    // Descending is the exact reverse of ascending, ties included.
    view.sort_by(|a, b| compare(&sort_value(a, key), &sort_value(b, key)));
    if config.direction == SortDirection::Desc {
        view.reverse();
    }
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::DegreeRecord;

    fn candidate(name: &str, filename: &str, degree: &str, cgpa: Option<&str>, ats: Option<f64>) -> CandidateResult {
        let mut result = CandidateResult {
            name: Some(name.to_string()),
            filename: Some(filename.to_string()),
            ats_score: ats.map(FieldValue::Number),
            ..CandidateResult::default()
        };
        result.education.bachelor = DegreeRecord {
            degree: Some(degree.to_string()),
            cgpa: cgpa.map(FieldValue::from),
            ..DegreeRecord::default()
        };
        result
    }

    fn names(view: &[&CandidateResult]) -> Vec<String> {
        view.iter().map(|r| r.display_name().to_string()).collect()
    }

    fn sample() -> Vec<CandidateResult> {
        vec![
            candidate("meera", "c.pdf", "Mechanical Engineering", Some("7.9"), Some(64.0)),
            candidate("Asha", "a.pdf", "computer science", Some("8.5"), Some(81.0)),
            candidate("ravi", "B.pdf", "Civil Engineering", Some("N/A"), None),
        ]
    }

    #[test]
    fn test_no_key_preserves_input_order() {
        let results = sample();
        let view = sorted(&results, &SortConfig::default());
        assert_eq!(names(&view), vec!["meera", "Asha", "ravi"]);
    }

    #[test]
    fn test_text_keys_ignore_case() {
        let results = sample();
        let by_name = sorted(&results, &SortConfig::new(SortKey::Name, SortDirection::Asc));
        assert_eq!(names(&by_name), vec!["Asha", "meera", "ravi"]);

        let by_file = sorted(&results, &SortConfig::new(SortKey::Filename, SortDirection::Asc));
        assert_eq!(names(&by_file), vec!["Asha", "ravi", "meera"]);

        let by_dept = sorted(&results, &SortConfig::new(SortKey::Department, SortDirection::Asc));
        assert_eq!(names(&by_dept), vec!["ravi", "Asha", "meera"]);
    }

    #[test]
    fn test_numeric_keys_default_to_zero() {
        let results = sample();
        let by_cgpa = sorted(&results, &SortConfig::new(SortKey::Cgpa, SortDirection::Asc));
        assert_eq!(names(&by_cgpa), vec!["ravi", "meera", "Asha"]);

        let by_ats = sorted(&results, &SortConfig::new(SortKey::Ats, SortDirection::Desc));
        assert_eq!(names(&by_ats), vec!["Asha", "meera", "ravi"]);
    }

    #[test]
    fn test_toggle_reverses_order() {
        let results = sample();
        let mut config = SortConfig::default();
        for key in [SortKey::Name, SortKey::Filename, SortKey::Department, SortKey::Cgpa, SortKey::Ats] {
            config.toggle(key);
            assert_eq!(config.direction, SortDirection::Asc);
            let first = names(&sorted(&results, &config));

            config.toggle(key);
            assert_eq!(config.direction, SortDirection::Desc);
            let mut second = names(&sorted(&results, &config));
            second.reverse();

            assert_eq!(first, second, "key {}", key);
        }
    }

    #[test]
    fn test_toggle_reverses_order_with_ties() {
        let mut results = sample();
        results.push(candidate("kiran", "d.pdf", "Civil Engineering", None, None));
        results.push(candidate("Asha", "e.pdf", "computer science", Some("8.5"), Some(81.0)));

        for key in [SortKey::Name, SortKey::Department, SortKey::Cgpa, SortKey::Ats] {
            let asc: Vec<_> = sorted(&results, &SortConfig::new(key, SortDirection::Asc))
                .iter()
                .map(|r| r.filename())
                .collect();
            let mut desc: Vec<_> = sorted(&results, &SortConfig::new(key, SortDirection::Desc))
                .iter()
                .map(|r| r.filename())
                .collect();
            desc.reverse();
            assert_eq!(asc, desc, "key {}", key);
        }

        // ravi and kiran both lack an ATS score
        let by_ats = sorted(&results, &SortConfig::new(SortKey::Ats, SortDirection::Asc));
        assert_eq!(by_ats[0].filename(), "B.pdf");
        assert_eq!(by_ats[1].filename(), "d.pdf");
    }

    #[test]
    fn test_input_is_not_mutated() {
        let results = sample();
        let _ = sorted(&results, &SortConfig::new(SortKey::Name, SortDirection::Desc));
        assert_eq!(results[0].display_name(), "meera");
    }

    #[test]
    fn test_parse_sort_key() {
        assert_eq!("ATS".parse::<SortKey>().unwrap(), SortKey::Ats);
        assert_eq!("dept".parse::<SortKey>().unwrap(), SortKey::Department);
        assert!("salary".parse::<SortKey>().is_err());
    }
}
