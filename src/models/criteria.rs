//! Filter criteria entered by the recruiter and their multipart encoding

use crate::error::{Result, ResumeDeskError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Departments the filtering endpoint understands, keyed by short code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    Cse,
    Aids,
    It,
    Ece,
    Eee,
    Eie,
    Mech,
    Mct,
    Auto,
    Civil,
    Agri,
    Chem,
    Bt,
    Textile,
    Ft,
    Food,
    Ra,
    Csbs,
}

impl Department {
    pub const ALL: [Department; 18] = [
        Department::Cse,
        Department::Aids,
        Department::It,
        Department::Ece,
        Department::Eee,
        Department::Eie,
        Department::Mech,
        Department::Mct,
        Department::Auto,
        Department::Civil,
        Department::Agri,
        Department::Chem,
        Department::Bt,
        Department::Textile,
        Department::Ft,
        Department::Food,
        Department::Ra,
        Department::Csbs,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Department::Cse => "CSE",
            Department::Aids => "AIDS",
            Department::It => "IT",
            Department::Ece => "ECE",
            Department::Eee => "EEE",
            Department::Eie => "EIE",
            Department::Mech => "MECH",
            Department::Mct => "MCT",
            Department::Auto => "AUTO",
            Department::Civil => "CIVIL",
            Department::Agri => "AGRI",
            Department::Chem => "CHEM",
            Department::Bt => "BT",
            Department::Textile => "TEXTILE",
            Department::Ft => "FT",
            Department::Food => "FOOD",
            Department::Ra => "RA",
            Department::Csbs => "CSBS",
        }
    }

    pub fn full_name(&self) -> &'static str {
        match self {
            Department::Cse => "Computer Science and Engineering",
            Department::Aids => "Artificial Intelligence and Data Science",
            Department::It => "Information Technology",
            Department::Ece => "Electronics and Communication Engineering",
            Department::Eee => "Electrical and Electronics Engineering",
            Department::Eie => "Electronics and Instrumentation Engineering",
            Department::Mech => "Mechanical Engineering",
            Department::Mct => "Mechatronics Engineering",
            Department::Auto => "Automobile Engineering",
            Department::Civil => "Civil Engineering",
            Department::Agri => "Agricultural Engineering",
            Department::Chem => "Chemical Engineering",
            Department::Bt => "Bio-Technology",
            Department::Textile => "Textile Technology",
            Department::Ft => "Fashion Technology",
            Department::Food => "Food Technology",
            Department::Ra => "Robotics and Automation",
            Department::Csbs => "Computer Science and Business Systems",
        }
    }
}

impl FromStr for Department {
    type Err = ResumeDeskError;

    fn from_str(code: &str) -> Result<Self> {
        let wanted = code.trim().to_uppercase();
        Department::ALL
            .iter()
            .copied()
            .find(|d| d.code() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = Department::ALL.iter().map(|d| d.code()).collect();
                ResumeDeskError::InvalidInput(format!(
                    "Unknown department code: {}. Known codes: {}",
                    code,
                    known.join(", ")
                ))
            })
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.full_name())
    }
}

/// Constraints sent with a bulk filter request. Empty fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub cgpa: Option<f64>,
    pub cgpa_max: Option<f64>,
    pub tenth: Option<f64>,
    pub tenth_max: Option<f64>,
    pub twelfth: Option<f64>,
    pub twelfth_max: Option<f64>,
    pub ats: Option<f64>,
    pub language: Option<String>,
    pub degree: Option<String>,
    pub area_of_interest: Option<String>,
    pub skills: Vec<String>,
    pub departments: Vec<Department>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_skill(&mut self, skill: &str) {
        let skill = skill.trim();
        if !skill.is_empty() {
            self.skills.push(skill.to_string());
        }
    }

    pub fn remove_skill(&mut self, skill: &str) {
        self.skills.retain(|s| s != skill);
    }

    /// Resolve a short code and add it. Already selected codes are ignored.
    pub fn add_department(&mut self, code: &str) -> Result<()> {
        let department: Department = code.parse()?;
        if !self.departments.contains(&department) {
            self.departments.push(department);
        }
        Ok(())
    }

    pub fn remove_department(&mut self, code: &str) {
        let wanted = code.trim().to_uppercase();
        self.departments.retain(|d| d.code() != wanted);
    }

    /// Count of criteria that currently constrain the request.
    pub fn active_filter_count(&self) -> usize {
        let scalars = self.scalar_fields().len();
        scalars + usize::from(!self.skills.is_empty()) + usize::from(!self.departments.is_empty())
    }

    fn scalar_fields(&self) -> Vec<(&'static str, String)> {
        let number = |value: Option<f64>| value.map(|v| v.to_string());
        let text = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        [
            ("cgpa", number(self.cgpa)),
            ("cgpa_max", number(self.cgpa_max)),
            ("tenth", number(self.tenth)),
            ("tenth_max", number(self.tenth_max)),
            ("twelfth", number(self.twelfth)),
            ("twelfth_max", number(self.twelfth_max)),
            ("language", text(&self.language)),
            ("ats", number(self.ats)),
            ("degree", text(&self.degree)),
            ("area_of_interest", text(&self.area_of_interest)),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }

    /// Ordered multipart text fields: the generic pass over scalar criteria,
    /// then `skills` and `department` serialized as comma-joined lists.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        let mut fields: Vec<(String, String)> = self
            .scalar_fields()
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();

        if !self.skills.is_empty() {
            fields.push(("skills".to_string(), self.skills.join(",")));
        }
        if !self.departments.is_empty() {
            let names: Vec<&str> = self.departments.iter().map(|d| d.full_name()).collect();
            fields.push(("department".to_string(), names.join(",")));
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field<'a>(fields: &'a [(String, String)], name: &str) -> Option<&'a str> {
        fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_departments_resolve_to_full_names() {
        let mut criteria = FilterCriteria::new();
        criteria.add_department("CSE").unwrap();
        criteria.add_department("IT").unwrap();

        let fields = criteria.form_fields();
        assert_eq!(
            field(&fields, "department"),
            Some("Computer Science and Engineering,Information Technology")
        );
    }

    #[test]
    fn test_duplicate_and_unknown_departments() {
        let mut criteria = FilterCriteria::new();
        criteria.add_department("ece").unwrap();
        criteria.add_department("ECE").unwrap();
        assert_eq!(criteria.departments, vec![Department::Ece]);

        assert!(matches!(
            criteria.add_department("XYZ"),
            Err(ResumeDeskError::InvalidInput(_))
        ));

        criteria.remove_department("ece");
        assert!(criteria.departments.is_empty());
    }

    #[test]
    fn test_skills_join_in_entry_order() {
        let mut criteria = FilterCriteria::new();
        criteria.add_skill("Python");
        criteria.add_skill("   ");
        criteria.add_skill(" SQL ");

        let fields = criteria.form_fields();
        assert_eq!(field(&fields, "skills"), Some("Python,SQL"));

        criteria.remove_skill("Python");
        assert_eq!(criteria.skills, vec!["SQL"]);
    }

    #[test]
    fn test_empty_fields_are_skipped() {
        let criteria = FilterCriteria {
            cgpa: Some(7.5),
            language: Some("  ".to_string()),
            degree: Some("B.Tech".to_string()),
            ..FilterCriteria::default()
        };

        let fields = criteria.form_fields();
        assert_eq!(
            fields,
            vec![
                ("cgpa".to_string(), "7.5".to_string()),
                ("degree".to_string(), "B.Tech".to_string()),
            ]
        );
        assert_eq!(criteria.active_filter_count(), 2);
    }

    #[test]
    fn test_generic_pass_precedes_lists() {
        let mut criteria = FilterCriteria {
            cgpa_max: Some(9.0),
            ats: Some(60.0),
            language: Some("English".to_string()),
            area_of_interest: Some("Data".to_string()),
            ..FilterCriteria::default()
        };
        criteria.add_skill("Rust");
        criteria.add_department("CSBS").unwrap();

        let names: Vec<String> = criteria.form_fields().into_iter().map(|(n, _)| n).collect();
        assert_eq!(
            names,
            vec!["cgpa_max", "language", "ats", "area_of_interest", "skills", "department"]
        );
        assert_eq!(criteria.active_filter_count(), 6);
    }
}
