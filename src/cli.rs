//! CLI interface for the resume desk

use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-desk")]
#[command(about = "Recruiter and candidate client for the resume screening backend")]
#[command(long_about = "Filter bulk resume uploads by academic and skill criteria, analyse single resumes and coding profiles, and get career guidance from your own resume")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and remember the session
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },

    /// Sign out; the local session is cleared once the backend confirms
    Logout,

    /// Show who is signed in
    Whoami,

    /// Upload resumes in bulk and list the ones matching the criteria (admin)
    Filter(FilterArgs),

    /// Single resume analysis (admin)
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },

    /// Coding profile analysis (admin)
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Candidate tools (user)
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Args)]
pub struct FilterArgs {
    /// Resume files (PDF, DOC, DOCX, TXT)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Minimum CGPA
    #[arg(long)]
    pub cgpa: Option<f64>,

    /// Maximum CGPA
    #[arg(long)]
    pub cgpa_max: Option<f64>,

    /// Minimum 10th percentage
    #[arg(long)]
    pub tenth: Option<f64>,

    /// Maximum 10th percentage
    #[arg(long)]
    pub tenth_max: Option<f64>,

    /// Minimum 12th percentage
    #[arg(long)]
    pub twelfth: Option<f64>,

    /// Maximum 12th percentage
    #[arg(long)]
    pub twelfth_max: Option<f64>,

    /// Minimum ATS score
    #[arg(long)]
    pub ats: Option<f64>,

    /// Spoken language the candidate must list
    #[arg(long)]
    pub language: Option<String>,

    /// Degree, e.g. "B.E"
    #[arg(long)]
    pub degree: Option<String>,

    /// Area of interest
    #[arg(long)]
    pub area_of_interest: Option<String>,

    /// Required skill; repeat or separate with commas
    #[arg(short, long = "skill", value_delimiter = ',')]
    pub skills: Vec<String>,

    /// Department code (CSE, IT, ECE, ...); repeat or separate with commas
    #[arg(short, long = "department", value_delimiter = ',')]
    pub departments: Vec<String>,

    /// Sort by: name, filename, department, cgpa, ats
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    /// Show skills, languages and preview links per candidate
    #[arg(long)]
    pub detailed: bool,

    /// Output format: console, json, markdown, html
    #[arg(short, long)]
    pub output: Option<String>,

    /// Save output to file
    #[arg(long)]
    pub save: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum AdminAction {
    /// Parse one resume and analyse every coding profile it links
    Upload {
        file: PathBuf,

        /// GitHub token forwarded to the GitHub analysis
        #[arg(long)]
        github_token: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Analyse a LeetCode profile (URL or username)
    Leetcode { handle: String },

    /// Analyse a CodeChef profile (URL or username)
    Codechef { handle: String },

    /// Analyse a GitHub profile (URL or username)
    Github {
        handle: String,

        #[arg(long)]
        token: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Upload your resume for analysis
    Upload { file: PathBuf },

    /// Show your stored profile
    Info,

    /// Show your generated portfolio
    Portfolio,

    /// Generate career guidance from your last analysis
    Guidance,

    /// Ask the assistant about your resume
    Chat {
        /// Your question
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Forget earlier messages first
        #[arg(long)]
        reset: bool,
    },

    /// Suggested roles and skills
    Roles,

    /// ATS score and recommendations
    Ats,

    /// Draft a LinkedIn note and referral message
    Referral {
        #[arg(long)]
        company: Option<String>,

        #[arg(long)]
        role: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "backend.base_url")
        key: String,

        /// Configuration value
        value: String,
    },
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.trim().to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, html",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_filter_args_split_commas() {
        let cli = Cli::parse_from([
            "resume-desk",
            "filter",
            "a.pdf",
            "b.pdf",
            "--cgpa",
            "7.5",
            "--skill",
            "Python,SQL",
            "-d",
            "cse",
            "-d",
            "IT",
            "--sort",
            "ats",
            "--desc",
        ]);
        let Commands::Filter(args) = cli.command else {
            panic!("expected filter");
        };
        assert_eq!(args.files.len(), 2);
        assert_eq!(args.cgpa, Some(7.5));
        assert_eq!(args.skills, vec!["Python", "SQL"]);
        assert_eq!(args.departments, vec!["cse", "IT"]);
        assert!(args.desc);
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("MD"), Ok(OutputFormat::Markdown));
        assert_eq!(parse_output_format("html"), Ok(OutputFormat::Html));
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("cv.PDF"), &["pdf"]).is_ok());
        assert!(validate_file_extension(Path::new("cv.png"), &["pdf"]).is_err());
        assert!(validate_file_extension(Path::new("cv"), &["pdf"]).is_err());
    }
}
