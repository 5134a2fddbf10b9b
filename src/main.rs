//! Resume desk: recruiter and candidate client for the resume screening backend

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use resume_desk::api::BackendClient;
use resume_desk::cli::{self, AdminAction, Cli, Commands, ConfigAction, FilterArgs, ProfileAction, UserAction};
use resume_desk::config::Config;
use resume_desk::error::{Result, ResumeDeskError};
use resume_desk::guard::{effective_role, landing_route, GuardOutcome, RouteGuard};
use resume_desk::input::uploads::{FormFile, UploadSet};
use resume_desk::models::profile::{extract_handle, ProfileKind};
use resume_desk::models::user::{ChatMessage, ChatRole, UserAnalysis};
use resume_desk::models::FilterCriteria;
use resume_desk::output::formatter::{save_report_to_file, suggest_filename};
use resume_desk::output::{FilterReport, ReportGenerator};
use resume_desk::processing::advice::{ats_recommendations, referral_drafts, ReferralRequest, RoleAdvisor, Severity};
use resume_desk::processing::filter::FilterSession;
use resume_desk::processing::sort::{SortConfig, SortDirection};
use resume_desk::session::Session;
use serde_json::Value;
use std::path::Path;
use std::process;
use std::time::Duration;

const RESUME_EXTENSIONS: [&str; 4] = ["pdf", "doc", "docx", "txt"];
const CHAT_FAILURE_REPLY: &str = "Sorry, I encountered an error. Please try again.";

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if !config.output.color_output {
        colored::control::set_override(false);
    }

    // Execute command
    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        eprintln!("❌ {}", e.user_message());
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: &Path) -> Result<()> {
    let mut session = Session::load(config.state_dir())?;

    match command {
        Commands::Login { email, password } => {
            let client = BackendClient::from_config(&config)?;
            let signed_in = client.sign_in(&email, &password).await?;

            if let Some(message) = &signed_in.message {
                println!("✅ {}", message);
            }
            session.access_token = Some(signed_in.access_token);
            session.email = Some(email);
            session.role = Some(signed_in.role.clone());
            session.save(config.state_dir())?;

            println!("👤 Signed in as {}", signed_in.role);
            println!("➡️  Landing page: {}", landing_route(&signed_in.role));
        }

        Commands::Logout => {
            let Some(token) = session.token() else {
                println!("ℹ️  Not signed in");
                return Ok(());
            };
            let client = BackendClient::from_config(&config)?.with_token(token);
            client.logout().await?;
            session.clear(config.state_dir())?;
            println!("👋 Logged out");
        }

        Commands::Whoami => {
            let Some(token) = session.token() else {
                println!("ℹ️  Not signed in");
                return Ok(());
            };
            let client = BackendClient::from_config(&config)?;
            match client.verify_token(token).await {
                Ok(role) => {
                    let role = effective_role(role);
                    println!("👤 {}", session.email.as_deref().unwrap_or("unknown email"));
                    println!("🔑 Role: {}", role);
                    println!("➡️  Landing page: {}", landing_route(&role));
                }
                Err(e) => {
                    warn!("Token verification failed: {}", e);
                    println!("ℹ️  Not signed in");
                }
            }
        }

        Commands::Filter(args) => {
            let client = authorized_client(&config, &session, "admin").await?;
            run_filter(&client, &config, args).await?;
        }

        Commands::Admin { action } => {
            let client = authorized_client(&config, &session, "admin").await?;
            match action {
                AdminAction::Upload { file, github_token } => {
                    admin_upload(&client, &file, github_token.as_deref()).await?;
                }
            }
        }

        Commands::Profile { action } => {
            let client = authorized_client(&config, &session, "admin").await?;
            let (kind, raw, token) = match action {
                ProfileAction::Leetcode { handle } => (ProfileKind::LeetCode, handle, None),
                ProfileAction::Codechef { handle } => (ProfileKind::CodeChef, handle, None),
                ProfileAction::Github { handle, token } => (ProfileKind::GitHub, handle, token),
            };
            let handle = extract_handle(&raw).ok_or_else(|| {
                ResumeDeskError::InvalidInput(format!("Enter a {} username or profile URL", kind))
            })?;

            println!("🔍 Analysing {} profile {}...", kind, handle);
            let analysis = client.analyze_profile(kind, &handle, token.as_deref()).await?;
            print_json(&analysis)?;
        }

        Commands::User { action } => {
            let client = authorized_client(&config, &session, "user").await?;
            run_user_action(&client, &config, &mut session, action).await?;
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("File: {}", config_path.display());
                println!("Backend URL: {}", config.backend.base_url);
                println!("Request timeout: {}s", config.backend.timeout_secs);
                println!("State directory: {}", config.session.state_dir.display());
                println!("Output format: {:?}", config.output.format);
                println!("Colour output: {}", config.output.color_output);
                println!("Pretty JSON: {}", config.output.pretty_json);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(config_path)?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Set { key, value }) => {
                config.set_value(&key, &value)?;
                config.save_to(config_path)?;
                println!("✅ {} = {}", key, value);
            }
        },
    }

    Ok(())
}

/// Client carrying the session token, once the guard admits `role`.
async fn authorized_client(config: &Config, session: &Session, role: &str) -> Result<BackendClient> {
    let client = BackendClient::from_config(config)?;
    let mut guard = RouteGuard::new([role]);
    guard.resolve(session.token(), &client).await;

    if let GuardOutcome::Redirect(route) = guard.outcome() {
        warn!("Access to {} commands denied, redirecting to {}", role, route);
    }
    guard.require()?;

    let token = session
        .token()
        .ok_or(ResumeDeskError::Unauthorized { role: None })?;
    Ok(client.with_token(token))
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn criteria_from_args(args: &FilterArgs) -> Result<FilterCriteria> {
    let mut criteria = FilterCriteria {
        cgpa: args.cgpa,
        cgpa_max: args.cgpa_max,
        tenth: args.tenth,
        tenth_max: args.tenth_max,
        twelfth: args.twelfth,
        twelfth_max: args.twelfth_max,
        ats: args.ats,
        language: args.language.clone(),
        degree: args.degree.clone(),
        area_of_interest: args.area_of_interest.clone(),
        ..FilterCriteria::new()
    };
    for skill in &args.skills {
        criteria.add_skill(skill);
    }
    for code in &args.departments {
        criteria.add_department(code)?;
    }
    Ok(criteria)
}

async fn run_filter(client: &BackendClient, config: &Config, args: FilterArgs) -> Result<()> {
    for file in &args.files {
        cli::validate_file_extension(file, &RESUME_EXTENSIONS)
            .map_err(|e| ResumeDeskError::InvalidInput(format!("{}: {}", file.display(), e)))?;
    }

    let output_format = match &args.output {
        Some(format) => cli::parse_output_format(format).map_err(ResumeDeskError::InvalidInput)?,
        None => config.output.format,
    };

    let mut uploads = UploadSet::new();
    uploads.add_paths(&args.files).await?;
    let mut filter = FilterSession::new(uploads, criteria_from_args(&args)?);
    if let Some(key) = &args.sort {
        let direction = if args.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        filter.sort = SortConfig::new(key.parse()?, direction);
    }

    println!(
        "🚀 Filtering {} resume(s) ({:.1} KB) with {} active filter(s)",
        filter.uploads.len(),
        filter.uploads.total_bytes() as f64 / 1024.0,
        filter.active_filter_count()
    );

    let progress = ProgressBar::new(filter.uploads.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg} [{bar:30.cyan/blue}] {pos}/{len}")
            .map_err(|e| ResumeDeskError::OutputFormatting(e.to_string()))?
            .progress_chars("=>-"),
    );
    progress.set_message("Filtering resumes");
    progress.enable_steady_tick(Duration::from_millis(120));

    match filter.submit(client).await {
        Ok(matched) => {
            progress.set_position(filter.progress().processed as u64);
            progress.finish_with_message(format!("{} matched", matched));
        }
        Err(e) => {
            progress.abandon_with_message("Filtering failed");
            return Err(e);
        }
    }

    let report = FilterReport::from_session(&filter);
    let generator = ReportGenerator::with_options(
        config.output.color_output,
        args.detailed,
        config.output.pretty_json,
        true,
        true,
    );
    let rendered = generator.generate_report(&report, output_format)?;

    match &args.save {
        Some(path) => {
            let target = if path.is_dir() {
                path.join(suggest_filename(output_format, true))
            } else {
                path.clone()
            };
            save_report_to_file(&rendered, &target)?;
            println!("💾 Report saved to {}", target.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

/// Analyse one profile link, if the resume has one.
async fn analyze_link(
    client: &BackendClient,
    kind: ProfileKind,
    link: Option<&str>,
    github_token: Option<&str>,
) -> Option<(ProfileKind, Result<Value>)> {
    let handle = link.and_then(extract_handle)?;
    info!("Analysing {} profile {}", kind, handle);
    Some((kind, client.analyze_profile(kind, &handle, github_token).await))
}

async fn admin_upload(client: &BackendClient, file: &Path, github_token: Option<&str>) -> Result<()> {
    cli::validate_file_extension(file, &RESUME_EXTENSIONS).map_err(ResumeDeskError::InvalidInput)?;

    println!("📄 Uploading {}...", file.display());
    let analysis = client.upload_resume(&FormFile::from_path(file).await?).await?;

    println!("\n👤 {}", analysis.name().unwrap_or("Unknown"));
    if let Some(score) = &analysis.ats_score {
        println!("🎯 ATS score: {}", score.as_text());
    }
    if let Some(words) = &analysis.word_count {
        println!("📝 Word count: {}", words.as_text());
    }
    print_json(&Value::Object(analysis.data.clone()))?;

    let links = analysis.profile_links();
    if links.is_empty() {
        println!("\nℹ️  No coding profiles linked in this resume");
        return Ok(());
    }
    let link = |kind: ProfileKind| {
        links
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, url)| url.as_str())
    };

    println!("\n🔍 Analysing {} linked profile(s)...", links.len());
    let (leetcode, codechef, github) = tokio::join!(
        analyze_link(client, ProfileKind::LeetCode, link(ProfileKind::LeetCode), None),
        analyze_link(client, ProfileKind::CodeChef, link(ProfileKind::CodeChef), None),
        analyze_link(client, ProfileKind::GitHub, link(ProfileKind::GitHub), github_token),
    );

    for (kind, outcome) in [leetcode, codechef, github].into_iter().flatten() {
        match outcome {
            Ok(profile) => {
                println!("\n✅ {} analysis", kind);
                print_json(&profile)?;
            }
            Err(e) => {
                error!("{} analysis failed: {}", kind, e);
                println!("\n❌ {} analysis failed: {}", kind, e.user_message());
            }
        }
    }

    Ok(())
}

fn require_analysis(session: &Session) -> Result<&UserAnalysis> {
    session.last_analysis.as_ref().ok_or_else(|| {
        ResumeDeskError::InvalidInput("Upload your resume first with `resume-desk user upload <file>`".to_string())
    })
}

fn require_email(session: &Session) -> Result<String> {
    session
        .email
        .clone()
        .ok_or(ResumeDeskError::Unauthorized { role: session.role.clone() })
}

async fn run_user_action(
    client: &BackendClient,
    config: &Config,
    session: &mut Session,
    action: UserAction,
) -> Result<()> {
    match action {
        UserAction::Upload { file } => {
            cli::validate_file_extension(&file, &["pdf"])
                .map_err(|_| ResumeDeskError::InvalidInput("Please select a valid PDF file".to_string()))?;
            let email = require_email(session)?;

            println!("📄 Uploading {}...", file.display());
            let analysis = client
                .upload_user_resume(&email, &FormFile::from_path(&file).await?)
                .await?;

            println!("🎯 ATS score: {}", analysis.ats_score());
            if let Some(words) = &analysis.word_count {
                println!("📝 Word count: {}", words.as_text());
            }
            if let Some(role) = &analysis.detected_role {
                println!("💼 Detected role: {}", role);
            }
            let suggested = analysis.suggested_skills();
            if !suggested.is_empty() {
                println!("💡 Suggested skills: {}", suggested.join(", "));
            }

            session.last_analysis = Some(analysis);
            session.chat_history.clear();
            session.save(config.state_dir())?;
        }

        UserAction::Info => {
            let user = client.user_info(&require_email(session)?).await?;
            print_json(&user)?;
        }

        UserAction::Portfolio => {
            let portfolio = client.portfolio(&require_email(session)?).await?;
            print_json(&portfolio)?;
        }

        UserAction::Guidance => {
            let analysis = require_analysis(session)?;
            println!("🧭 Generating career guidance...");
            let guidance = client.generate_guidance(&analysis.resume_data()).await?;
            print_json(&guidance)?;
        }

        UserAction::Chat { query, reset } => {
            let query = query.join(" ");
            if query.trim().is_empty() {
                return Err(ResumeDeskError::InvalidInput("Type a question first".to_string()));
            }
            let resume_data = require_analysis(session)?.resume_data();
            if reset {
                session.chat_history.clear();
            }

            session.chat_history.push(ChatMessage {
                role: ChatRole::User,
                content: query.clone(),
            });
            let reply = match client.chat(&query, &resume_data).await {
                Ok(reply) => reply,
                Err(e) => {
                    error!("Chat request failed: {}", e);
                    CHAT_FAILURE_REPLY.to_string()
                }
            };
            session.chat_history.push(ChatMessage {
                role: ChatRole::Assistant,
                content: reply,
            });
            session.save(config.state_dir())?;

            for message in session.chat_history.iter().rev().take(2).rev() {
                match message.role {
                    ChatRole::User => println!("🧑 {}", message.content),
                    ChatRole::Assistant => println!("🤖 {}", message.content),
                }
            }
        }

        UserAction::Roles => {
            let analysis = require_analysis(session)?;
            let advisor = RoleAdvisor::new()?;

            if let Some(role) = &analysis.detected_role {
                println!("💼 Detected role: {}\n", role);
            }
            println!("🎯 Recommended roles");
            for role in advisor.recommend(&analysis.technical_skills()) {
                println!("  • {} ({}% match)", role.title, role.match_percent);
                println!("    {}", role.description);
                println!("    Key skills: {}", role.skills.join(", "));
            }

            let suggested = analysis.suggested_skills();
            if !suggested.is_empty() {
                println!("\n💡 Skills to learn next: {}", suggested.join(", "));
            }
        }

        UserAction::Ats => {
            let analysis = require_analysis(session)?;
            let score = analysis.ats_score();
            println!("🎯 ATS score: {}", score);
            for recommendation in ats_recommendations(score) {
                let icon = match recommendation.severity {
                    Severity::Critical => "🚨",
                    Severity::Warning => "⚠️",
                    Severity::Success => "✅",
                    Severity::Info => "💡",
                };
                println!("  {} {}", icon, recommendation.message);
            }
            if let Some(breakdown) = &analysis.ats_breakdown {
                println!("\n📊 Breakdown");
                print_json(breakdown)?;
            }
        }

        UserAction::Referral { company, role } => {
            let analysis = require_analysis(session)?;
            let skills = analysis.technical_skills();
            let drafts = referral_drafts(&ReferralRequest {
                name: analysis.name(),
                email: analysis.email(),
                technical_skills: &skills,
                company: company.as_deref(),
                role: role.as_deref(),
            });

            println!("🔗 LinkedIn connection note\n");
            println!("{}\n", drafts.linkedin_note);
            println!("✉️  Referral message\n");
            println!("{}", drafts.referral_message);
        }
    }

    Ok(())
}

