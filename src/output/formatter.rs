//! Output formatters for filter reports

use crate::config::OutputFormat;
use crate::error::{Result, ResumeDeskError};
use crate::output::report::{CandidateRow, FilterReport};
use crate::processing::sort::SortDirection;
use crate::processing::stats::Range;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

pub trait OutputFormatter {
    fn format_report(&self, report: &FilterReport) -> Result<String>;
}

/// Coloured table for the terminal
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Picks the formatter for a requested output format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

const NOT_AVAILABLE: &str = "N/A";

fn or_na(value: Option<&str>) -> &str {
    value.unwrap_or(NOT_AVAILABLE)
}

fn range_text(range: Option<Range>, suffix: &str) -> String {
    match range {
        Some(r) => format!("{}{} - {}{}", r.min, suffix, r.max, suffix),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn sort_text(report: &FilterReport) -> String {
    match report.sort.key {
        Some(key) => {
            let arrow = match report.sort.direction {
                SortDirection::Asc => "↑",
                SortDirection::Desc => "↓",
            };
            format!("{} {}", key, arrow)
        }
        None => "as received".to_string(),
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let kept: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Filtered Resumes</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            color: #333;
            max-width: 1100px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        .stats {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
            gap: 15px;
            margin: 20px 0;
        }
        .stat {
            background: #f8f9fa;
            padding: 15px;
            border-radius: 6px;
            border-left: 4px solid #007acc;
        }
        table { width: 100%; border-collapse: collapse; }
        th, td { padding: 8px 10px; border-bottom: 1px solid #e9ecef; text-align: left; }
        th { color: #007acc; }
        .muted { color: #6c757d; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <h1>Filtered Resumes</h1>
        <p class="muted">Generated: {{ generated_at }} | Processed {{ processed }} of {{ total }} | Active filters: {{ active_filters }} | Sorted by: {{ sort }}</p>

        {% if has_stats %}
        <div class="stats">
            <div class="stat"><h4>CGPA</h4><p>{{ cgpa_range }}</p></div>
            <div class="stat"><h4>10th %</h4><p>{{ tenth_range }}</p></div>
            <div class="stat"><h4>12th %</h4><p>{{ twelfth_range }}</p></div>
        </div>
        {% endif %}

        {% if rows.is_empty() %}
        <p>No resumes matched the criteria.</p>
        {% else %}
        <table>
            <tr><th>#</th><th>Name</th><th>File</th><th>Department</th><th>CGPA</th><th>ATS</th><th>Skills</th><th>Preview</th></tr>
            {% for row in rows %}
            <tr>
                <td>{{ loop.index }}</td>
                <td>{{ row.name }}</td>
                <td>{{ row.filename }}</td>
                <td>{{ row.department }}</td>
                <td>{{ row.cgpa }}</td>
                <td>{{ row.ats_score }}</td>
                <td>{{ row.skills }}</td>
                <td>{% if row.preview_url.is_empty() %}-{% else %}<a href="{{ row.preview_url }}">open</a>{% endif %}</td>
            </tr>
            {% endfor %}
        </table>
        {% endif %}
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    generated_at: String,
    processed: usize,
    total: usize,
    active_filters: usize,
    sort: String,
    has_stats: bool,
    cgpa_range: String,
    tenth_range: String,
    twelfth_range: String,
    rows: Vec<HtmlRow>,
}

struct HtmlRow {
    name: String,
    filename: String,
    department: String,
    cgpa: String,
    ats_score: String,
    skills: String,
    preview_url: String,
}

impl From<&CandidateRow> for HtmlRow {
    fn from(row: &CandidateRow) -> Self {
        Self {
            name: row.name.clone(),
            filename: row.filename.clone(),
            department: row.department.clone(),
            cgpa: or_na(row.cgpa.as_deref()).to_string(),
            ats_score: or_na(row.ats_score.as_deref()).to_string(),
            skills: row.skills.join(", "),
            preview_url: row.preview_url.clone().unwrap_or_default(),
        }
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            3 => "▒",
            _ => "░",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            3 => Color::Yellow,
            _ => Color::White,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_ats(&self, ats: Option<&str>) -> String {
        let text = format!("{:<6}", or_na(ats));
        let score = ats.and_then(crate::models::candidate::parse_leading_float);
        let color = match score {
            Some(s) if s >= 75.0 => Color::Green,
            Some(s) if s >= 50.0 => Color::Yellow,
            Some(_) => Color::Red,
            None => Color::White,
        };
        self.colorize(&text, color)
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &FilterReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("📂 FILTERED RESUMES", 1));
        output.push_str(&format!(
            "Generated: {} | Processed {} of {} | Active filters: {} | Sorted by: {}\n",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.progress.processed,
            report.progress.total,
            report.active_filters,
            sort_text(report)
        ));

        if let Some(stats) = report.stats {
            output.push_str(&self.format_header("Academic Range", 2));
            output.push_str(&format!("🎓 CGPA:   {}\n", range_text(stats.cgpa, "")));
            output.push_str(&format!("📘 10th:   {}\n", range_text(stats.tenth, "%")));
            output.push_str(&format!("📗 12th:   {}\n", range_text(stats.twelfth, "%")));
        }

        output.push_str(&self.format_header(&format!("Candidates ({})", report.rows.len()), 2));
        if report.is_empty() {
            output.push_str(&self.colorize("No resumes matched the criteria.\n", Color::Yellow));
            return Ok(output);
        }

        output.push_str(&format!(
            "{:>3}  {:<24} {:<22} {:<30} {:<6} {:<6}\n",
            "#", "Name", "File", "Department", "CGPA", "ATS"
        ));
        for (index, row) in report.rows.iter().enumerate() {
            output.push_str(&format!(
                "{:>3}  {} {:<22} {:<30} {:<6} {}\n",
                index + 1,
                self.colorize(&format!("{:<24}", truncate(&row.name, 24)), Color::Cyan),
                truncate(&row.filename, 22),
                truncate(&row.department, 30),
                or_na(row.cgpa.as_deref()),
                self.format_ats(row.ats_score.as_deref())
            ));

            if self.detailed {
                if !row.skills.is_empty() {
                    output.push_str(&format!("       skills: {}\n", row.skills.join(", ")));
                }
                if !row.languages.is_empty() {
                    output.push_str(&format!("       languages: {}\n", row.languages.join(", ")));
                }
                if let Some(url) = &row.preview_url {
                    output.push_str(&format!("       preview: {}\n", self.colorize(url, Color::Blue)));
                }
            }
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &FilterReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn cell(text: &str) -> String {
        text.replace('|', "\\|")
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &FilterReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# 📂 Filtered Resumes\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processed:** {} of {} | **Active filters:** {} | **Sorted by:** {}\n\n",
                report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.progress.processed,
                report.progress.total,
                report.active_filters,
                sort_text(report)
            ));
        }

        if let Some(stats) = report.stats {
            output.push_str("## Academic Range\n\n");
            output.push_str("| Field | Range |\n");
            output.push_str("|-------|-------|\n");
            output.push_str(&format!("| CGPA | {} |\n", range_text(stats.cgpa, "")));
            output.push_str(&format!("| 10th | {} |\n", range_text(stats.tenth, "%")));
            output.push_str(&format!("| 12th | {} |\n\n", range_text(stats.twelfth, "%")));
        }

        output.push_str(&format!("## Candidates ({})\n\n", report.rows.len()));
        if report.is_empty() {
            output.push_str("_No resumes matched the criteria._\n");
            return Ok(output);
        }

        output.push_str("| # | Name | File | Department | CGPA | ATS | Skills |\n");
        output.push_str("|---|------|------|------------|------|-----|--------|\n");
        for (index, row) in report.rows.iter().enumerate() {
            output.push_str(&format!(
                "| {} | {} | `{}` | {} | {} | {} | {} |\n",
                index + 1,
                Self::cell(&row.name),
                Self::cell(&row.filename),
                Self::cell(&row.department),
                or_na(row.cgpa.as_deref()),
                or_na(row.ats_score.as_deref()),
                Self::cell(&row.skills.join(", "))
            ));
        }

        Ok(output)
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &FilterReport) -> HtmlTemplate {
        HtmlTemplate {
            include_styles: self.include_styles,
            generated_at: report.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            processed: report.progress.processed,
            total: report.progress.total,
            active_filters: report.active_filters,
            sort: sort_text(report),
            has_stats: report.stats.is_some(),
            cgpa_range: range_text(report.stats.and_then(|s| s.cgpa), ""),
            tenth_range: range_text(report.stats.and_then(|s| s.tenth), "%"),
            twelfth_range: range_text(report.stats.and_then(|s| s.twelfth), "%"),
            rows: report.rows.iter().map(HtmlRow::from).collect(),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &FilterReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| ResumeDeskError::OutputFormatting(e.to_string()))
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true, true)
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
        include_html_styles: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(include_html_styles),
        }
    }

    pub fn generate_report(&self, report: &FilterReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, timestamp: bool) -> String {
    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };
    format!("filtered_resumes{}.{}", timestamp_suffix, extension)
}
