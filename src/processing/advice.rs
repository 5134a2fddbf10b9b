//! Career guidance heuristics derived from a candidate's own resume analysis

use crate::error::{Result, ResumeDeskError};
use aho_corasick::AhoCorasick;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Success,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub severity: Severity,
    pub message: &'static str,
}

const fn rec(severity: Severity, message: &'static str) -> Recommendation {
    Recommendation { severity, message }
}

/// Advice for an ATS score, by band: below 50, below 75, and the rest.
pub fn ats_recommendations(score: f64) -> Vec<Recommendation> {
    if score < 50.0 {
        vec![
            rec(Severity::Critical, "Add more technical keywords and skills relevant to your target role"),
            rec(Severity::Critical, "Include quantifiable achievements and metrics in your experience"),
            rec(Severity::Critical, "Expand your skills section with more relevant technologies"),
        ]
    } else if score < 75.0 {
        vec![
            rec(Severity::Warning, "Consider adding more industry-specific certifications"),
            rec(Severity::Warning, "Include more detailed project descriptions with outcomes"),
            rec(Severity::Success, "Good foundation - focus on quantifying your impact"),
        ]
    } else {
        vec![
            rec(Severity::Success, "Excellent ATS compatibility! Your resume is well-optimized"),
            rec(Severity::Success, "Strong keyword presence and clear structure"),
            rec(Severity::Info, "Keep updating with new skills and achievements regularly"),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleRecommendation {
    pub title: &'static str,
    #[serde(rename = "match")]
    pub match_percent: u8,
    pub description: &'static str,
    pub skills: &'static [&'static str],
}

// Indices into KEYWORDS; pattern ids reported by the matcher are these indices.
const KEYWORDS: [&str; 14] = [
    "react", "angular", "vue", "python", "java", "node", "mongodb", "sql", "ml", "ai",
    "tensorflow", "devops", "docker", "kubernetes",
];
const REACT: usize = 0;
const ANGULAR: usize = 1;
const VUE: usize = 2;
const PYTHON: usize = 3;
const JAVA: usize = 4;
const NODE: usize = 5;
const MONGODB: usize = 6;
const SQL: usize = 7;
const ML: usize = 8;
const AI: usize = 9;
const TENSORFLOW: usize = 10;
const DEVOPS: usize = 11;
const DOCKER: usize = 12;
const KUBERNETES: usize = 13;

const FRONTEND: RoleRecommendation = RoleRecommendation {
    title: "Frontend Developer",
    match_percent: 85,
    description: "Your frontend framework expertise makes you a strong candidate",
    skills: &["React", "JavaScript", "CSS", "HTML"],
};

const BACKEND: RoleRecommendation = RoleRecommendation {
    title: "Backend Developer",
    match_percent: 80,
    description: "Strong backend programming skills identified",
    skills: &["Python", "Java", "Node.js", "APIs"],
};

const FULL_STACK: RoleRecommendation = RoleRecommendation {
    title: "Full Stack Developer",
    match_percent: 90,
    description: "Complete stack proficiency detected",
    skills: &["Full Stack", "MERN", "Database", "APIs"],
};

const MACHINE_LEARNING: RoleRecommendation = RoleRecommendation {
    title: "Machine Learning Engineer",
    match_percent: 75,
    description: "ML/AI skills present in your profile",
    skills: &["Python", "TensorFlow", "ML", "Data Science"],
};

const DEVOPS_ENGINEER: RoleRecommendation = RoleRecommendation {
    title: "DevOps Engineer",
    match_percent: 78,
    description: "DevOps and infrastructure skills identified",
    skills: &["Docker", "Kubernetes", "CI/CD", "Cloud"],
};

const SOFTWARE_DEVELOPER: RoleRecommendation = RoleRecommendation {
    title: "Software Developer",
    match_percent: 70,
    description: "General software development role based on your technical background",
    skills: &["Programming", "Problem Solving", "Software Development"],
};

/// Suggests job roles from keyword families found in the technical skills.
/// Keywords match as case-insensitive substrings of a skill.
pub struct RoleAdvisor {
    matcher: AhoCorasick,
}

impl RoleAdvisor {
    pub fn new() -> Result<Self> {
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(KEYWORDS)
            .map_err(|e| ResumeDeskError::Configuration(format!("Failed to build role matcher: {}", e)))?;
        Ok(Self { matcher })
    }

    fn keywords_present(&self, skills: &[String]) -> HashSet<usize> {
        skills
            .iter()
            .flat_map(|skill| self.matcher.find_overlapping_iter(skill.as_str()))
            .map(|m| m.pattern().as_usize())
            .collect()
    }

    /// Matching roles, best match first. Never empty.
    pub fn recommend(&self, technical_skills: &[String]) -> Vec<RoleRecommendation> {
        let found = self.keywords_present(technical_skills);
        let any = |keys: &[usize]| keys.iter().any(|k| found.contains(k));

        let mut roles: Vec<RoleRecommendation> = [
            (any(&[REACT, ANGULAR, VUE]), FRONTEND),
            (any(&[PYTHON, JAVA, NODE]), BACKEND),
            (any(&[REACT, NODE]) && any(&[MONGODB, SQL]), FULL_STACK),
            (any(&[ML, AI, TENSORFLOW]), MACHINE_LEARNING),
            (any(&[DEVOPS, DOCKER, KUBERNETES]), DEVOPS_ENGINEER),
        ]
        .into_iter()
        .filter_map(|(matched, role)| matched.then_some(role))
        .collect();

        if roles.is_empty() {
            roles.push(SOFTWARE_DEVELOPER);
        }
        roles.sort_by(|a, b| b.match_percent.cmp(&a.match_percent));
        roles
    }
}

/// Inputs for the referral message drafts.
#[derive(Debug, Clone, Default)]
pub struct ReferralRequest<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub technical_skills: &'a [String],
    pub company: Option<&'a str>,
    pub role: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferralDrafts {
    pub linkedin_note: String,
    pub referral_message: String,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub fn referral_drafts(request: &ReferralRequest<'_>) -> ReferralDrafts {
    let name = non_blank(request.name).unwrap_or("I");
    let short_name = name.split(' ').next().unwrap_or(name);
    let company = non_blank(request.company).unwrap_or("your company");
    let role = non_blank(request.role).unwrap_or("a suitable role");

    let main_skills = request
        .technical_skills
        .iter()
        .take(4)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    let skills = if main_skills.is_empty() {
        "software development"
    } else {
        main_skills.as_str()
    };

    let linkedin_note = format!(
        "Hi, I'm {}, a fresher with skills in {}. I came across openings for {} at {} and would love to connect and learn more about your experience there.",
        short_name, skills, role, company
    );

    let mut lines = vec![
        "Hi,".to_string(),
        String::new(),
        format!(
            "I'm {}, currently looking for {} opportunities at {}. Based on my background in {}, I believe I could be a good fit.",
            name, role, company, skills
        ),
        String::new(),
        "If you are comfortable, could you please review my profile and let me know if a referral is possible?".to_string(),
    ];
    if let Some(email) = non_blank(request.email) {
        lines.push(String::new());
        lines.push(format!("You can also reach me at {}.", email));
    }
    lines.extend([
        String::new(),
        "Thank you for your time.".to_string(),
        "Regards,".to_string(),
        name.to_string(),
    ]);

    ReferralDrafts {
        linkedin_note,
        referral_message: lines.join("\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn titles(roles: &[RoleRecommendation]) -> Vec<&'static str> {
        roles.iter().map(|r| r.title).collect()
    }

    #[test]
    fn test_ats_bands() {
        let low = ats_recommendations(42.0);
        assert_eq!(low.len(), 3);
        assert!(low.iter().all(|r| r.severity == Severity::Critical));

        let mid = ats_recommendations(50.0);
        assert_eq!(
            mid.iter().map(|r| r.severity).collect::<Vec<_>>(),
            vec![Severity::Warning, Severity::Warning, Severity::Success]
        );

        let high = ats_recommendations(75.0);
        assert_eq!(high[0].message, "Excellent ATS compatibility! Your resume is well-optimized");
        assert_eq!(high[2].severity, Severity::Info);
    }

    #[test]
    fn test_mern_stack_roles() {
        let advisor = RoleAdvisor::new().unwrap();
        let roles = advisor.recommend(&skills(&["React", "Node.js", "MongoDB"]));
        assert_eq!(
            titles(&roles),
            vec!["Full Stack Developer", "Frontend Developer", "Backend Developer"]
        );
        assert_eq!(roles[0].match_percent, 90);
    }

    #[test]
    fn test_case_insensitive_substrings() {
        let advisor = RoleAdvisor::new().unwrap();
        let roles = advisor.recommend(&skills(&["KUBERNETES", "TensorFlow 2"]));
        assert_eq!(titles(&roles), vec!["DevOps Engineer", "Machine Learning Engineer"]);

        // "JavaScript" contains "java"
        let roles = advisor.recommend(&skills(&["JavaScript"]));
        assert_eq!(titles(&roles), vec!["Backend Developer"]);
    }

    #[test]
    fn test_fallback_role() {
        let advisor = RoleAdvisor::new().unwrap();
        let roles = advisor.recommend(&skills(&["Excel", "Go"]));
        assert_eq!(roles, vec![SOFTWARE_DEVELOPER]);
        assert_eq!(advisor.recommend(&[]), vec![SOFTWARE_DEVELOPER]);
    }

    #[test]
    fn test_referral_drafts_with_details() {
        let technical = skills(&["Rust", "SQL", "Docker", "AWS", "Go"]);
        let drafts = referral_drafts(&ReferralRequest {
            name: Some("Asha Raman"),
            email: Some("asha@example.com"),
            technical_skills: &technical,
            company: Some("Acme"),
            role: Some("Backend Engineer"),
        });

        assert_eq!(
            drafts.linkedin_note,
            "Hi, I'm Asha, a fresher with skills in Rust, SQL, Docker, AWS. I came across openings for Backend Engineer at Acme and would love to connect and learn more about your experience there."
        );
        let lines: Vec<&str> = drafts.referral_message.lines().collect();
        assert_eq!(lines[0], "Hi,");
        assert_eq!(
            lines[2],
            "I'm Asha Raman, currently looking for Backend Engineer opportunities at Acme. Based on my background in Rust, SQL, Docker, AWS, I believe I could be a good fit."
        );
        assert!(lines.contains(&"You can also reach me at asha@example.com."));
        assert_eq!(lines.last(), Some(&"Asha Raman"));
    }

    #[test]
    fn test_referral_drafts_defaults() {
        let drafts = referral_drafts(&ReferralRequest::default());
        assert!(drafts.linkedin_note.starts_with("Hi, I'm I, a fresher with skills in software development."));
        assert!(drafts.linkedin_note.contains("a suitable role at your company"));
        assert!(!drafts.referral_message.contains("reach me at"));
        assert!(drafts.referral_message.ends_with("Regards,\nI"));
    }
}
