use super::markdown::render_markdown;
use super::styles::Palette;
use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use jobtrack::api::{CmdMessage, MessageLevel};
use jobtrack::commands::helpers::short_id;
use jobtrack::model::{ApplicationRecord, Status};
use std::collections::HashMap;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ID_WIDTH: usize = 8;
const COMPANY_WIDTH: usize = 18;
const ROLE_WIDTH: usize = 22;
const STATUS_WIDTH: usize = 12;
const DATE_WIDTH: usize = 12;
const INTERVIEW_WIDTH: usize = 17;
const NOTES_PREVIEW_CHARS: usize = 50;
const GAP: &str = "  ";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_records(records: &[ApplicationRecord], palette: &Palette) {
    if records.is_empty() {
        println!("{}", palette.header.apply_to("No Applications Found"));
        println!(
            "{}",
            palette
                .muted
                .apply_to("Add one with `jobtrack add <company> <role>`.")
        );
        return;
    }

    let header = [
        fit("ID", ID_WIDTH),
        fit("Company", COMPANY_WIDTH),
        fit("Role", ROLE_WIDTH),
        fit("Status", STATUS_WIDTH),
        fit("Applied", DATE_WIDTH),
        fit("Interview", INTERVIEW_WIDTH),
        "Notes".to_string(),
    ]
    .join(GAP);
    println!("{}", palette.header.apply_to(header.trim_end()));

    for record in records {
        let id = fit(&short_id(&record.id), ID_WIDTH);
        let status = fit(record.status.as_str(), STATUS_WIDTH);
        println!(
            "{}{GAP}{}{GAP}{}{GAP}{}{GAP}{}{GAP}{}{GAP}{}",
            palette.id.apply_to(id),
            fit(&record.company, COMPANY_WIDTH),
            fit(&record.role, ROLE_WIDTH),
            palette.status(record.status).apply_to(status),
            fit(&format_date(record.date), DATE_WIDTH),
            fit(&interview_cell(record), INTERVIEW_WIDTH),
            notes_preview(record.notes.as_deref()),
        );
    }
}

pub(super) fn print_status_counts(counts: &HashMap<Status, usize>, palette: &Palette) {
    let parts: Vec<String> = Status::ALL
        .iter()
        .map(|status| {
            let n = counts.get(status).copied().unwrap_or(0);
            format!("{} {}", palette.status(*status).apply_to(status.as_str()), n)
        })
        .collect();
    println!("{}", parts.join(" · "));
}

pub(super) fn print_record_detail(record: &ApplicationRecord, palette: &Palette) {
    println!(
        "{} {}",
        palette.header.apply_to(&record.role),
        palette.muted.apply_to(format!("at {}", record.company))
    );
    println!("--------------------------------");
    println!("{:<11}{}", "Id:", palette.id.apply_to(record.id));
    println!(
        "{:<11}{}",
        "Status:",
        palette.status(record.status).apply_to(record.status)
    );
    println!(
        "{:<11}{} ({})",
        "Applied:",
        format_date(record.date),
        format_time_ago(record.date)
    );
    if let Some(when) = record.interview_date {
        println!("{:<11}{}", "Interview:", format_date_time(when));
    }

    println!();
    println!("{}", palette.heading.apply_to("Job Description"));
    match record.description.as_deref() {
        Some(text) => println!("{}", text.trim_end()),
        None => println!("{}", palette.muted.apply_to("No description")),
    }

    println!();
    println!("{}", palette.heading.apply_to("Notes"));
    match record.notes.as_deref() {
        Some(text) => print!("{}", render_markdown(text, palette)),
        None => println!("{}", palette.muted.apply_to("No summary")),
    }
}

pub(super) fn print_generated(text: &str, palette: &Palette) {
    print!("{}", render_markdown(text, palette));
}

fn interview_cell(record: &ApplicationRecord) -> String {
    match (record.status, record.interview_date) {
        (Status::Interviewing, Some(when)) => format_date_time(when),
        _ => "--".to_string(),
    }
}

fn notes_preview(notes: Option<&str>) -> String {
    let Some(notes) = notes else {
        return "No summary".to_string();
    };
    let flat: String = notes
        .chars()
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect();
    if flat.chars().count() > NOTES_PREVIEW_CHARS {
        let head: String = flat.chars().take(NOTES_PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        flat
    }
}

fn format_date(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

fn format_date_time(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Truncates to `width` columns (marking the cut with `…`) and pads with spaces.
fn fit(s: &str, width: usize) -> String {
    let cut = truncate_to_width(s, width);
    let padding = width.saturating_sub(cut.width());
    format!("{}{}", cut, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    Formatter::new().convert(duration.to_std().unwrap_or_default())
}
