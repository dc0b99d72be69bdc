//! Dispatch from parsed arguments to the API, and from `CmdResult` to the
//! terminal.

use super::print::{
    print_generated, print_messages, print_record_detail, print_records, print_status_counts,
};
use super::setup::{Cli, Commands, ListArgs, RecordFields};
use super::styles::{palette, Palette};
use clap::Parser;
use jobtrack::api::{ConfigAction, JobtrackApi, RecordPatch, ThemeAction};
use jobtrack::config::KEYS;
use jobtrack::error::{JobtrackError, Result};
use jobtrack::init::initialize;
use jobtrack::model::{parse_timestamp, ApplicationDraft, Status, ThemePreference};
use jobtrack::prep::{PendingPrep, PrepCompletion, PrepService};
use jobtrack::query::{
    count_by_status, SortConfig, SortDirection, SortKey, StatusFilter, ViewCriteria,
};
use jobtrack::store::fs_backend::FsBackend;
use std::io::{BufRead, IsTerminal, Read, Write};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "JOBTRACK_LOG";

struct AppContext {
    api: JobtrackApi<FsBackend>,
    palette: &'static Palette,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Add {
            company,
            role,
            fields,
        }) => handle_add(&mut ctx, company, role, fields),
        Some(Commands::List(args)) => handle_list(&mut ctx, args),
        Some(Commands::Show { id }) => handle_show(&mut ctx, &id),
        Some(Commands::Edit {
            id,
            company,
            role,
            fields,
            clear_interview_date,
        }) => handle_edit(&mut ctx, &id, company, role, fields, clear_interview_date),
        Some(Commands::Rm { id, yes }) => handle_rm(&mut ctx, &id, yes),
        Some(Commands::Theme { value }) => handle_theme(&mut ctx, value),
        Some(Commands::Summarize { id }) => handle_summarize(&mut ctx, &id),
        Some(Commands::Prep { id }) => handle_prep(&mut ctx, &id),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_list(&mut ctx, ListArgs::default()),
    }
}

/// Logs go to stderr; `JOBTRACK_LOG` takes precedence over `-v`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let ctx = initialize(cli.data.as_deref())?;
    let palette = palette(ctx.api.store().theme());
    Ok(AppContext {
        api: ctx.api,
        palette,
    })
}

fn handle_add(
    ctx: &mut AppContext,
    company: String,
    role: String,
    fields: RecordFields,
) -> Result<()> {
    let mut draft = ApplicationDraft::new(company, role);
    if let Some(status) = fields.status {
        draft = draft.with_status(status.parse::<Status>()?);
    }
    if let Some(description) = fields.description {
        draft = draft.with_description(read_text_arg(description)?);
    }
    if let Some(notes) = fields.notes {
        draft = draft.with_notes(notes);
    }
    if let Some(date) = fields.interview_date {
        draft = draft.with_interview_date(parse_date_arg(&date)?);
    }

    let result = ctx.api.add_application(draft)?;
    print_messages(&result.messages);
    if let Some(record) = result.affected_records.first() {
        println!("{}", ctx.palette.id.apply_to(record.id));
    }
    Ok(())
}

fn handle_list(ctx: &mut AppContext, args: ListArgs) -> Result<()> {
    let criteria = list_criteria(&args)?;
    let result = ctx.api.list_applications(&criteria)?;

    print_records(&result.listed_records, ctx.palette);
    if !ctx.api.store().is_empty() {
        println!();
        print_status_counts(&count_by_status(ctx.api.store().all()), ctx.palette);
    }
    print_messages(&result.messages);
    Ok(())
}

fn list_criteria(args: &ListArgs) -> Result<ViewCriteria> {
    let mut criteria = ViewCriteria::default();
    if let Some(status) = &args.status {
        criteria = criteria.with_status(status.parse::<StatusFilter>()?);
    }
    if let Some(term) = &args.search {
        criteria = criteria.with_search(term.clone());
    }

    let explicit = if args.asc {
        Some(SortDirection::Ascending)
    } else if args.desc {
        Some(SortDirection::Descending)
    } else {
        None
    };
    let sort = match (&args.sort, explicit) {
        (Some(key), Some(direction)) => SortConfig::new(key.parse::<SortKey>()?, direction),
        // Same as picking a column once from the default view.
        (Some(key), None) => SortConfig::default().toggled(key.parse::<SortKey>()?),
        (None, Some(direction)) => SortConfig::new(SortConfig::default().key, direction),
        (None, None) => SortConfig::default(),
    };
    Ok(criteria.with_sort(sort))
}

fn handle_show(ctx: &mut AppContext, id: &str) -> Result<()> {
    let result = ctx.api.view_application(id)?;
    for record in &result.listed_records {
        print_record_detail(record, ctx.palette);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(
    ctx: &mut AppContext,
    id: &str,
    company: Option<String>,
    role: Option<String>,
    fields: RecordFields,
    clear_interview_date: bool,
) -> Result<()> {
    let interview_date = if clear_interview_date {
        Some(None)
    } else {
        fields
            .interview_date
            .as_deref()
            .map(parse_date_arg)
            .transpose()?
            .map(Some)
    };

    let patch = RecordPatch {
        company,
        role,
        status: fields.status.map(|s| s.parse::<Status>()).transpose()?,
        description: fields.description.map(read_text_arg).transpose()?,
        notes: fields.notes,
        interview_date,
    };

    let result = ctx.api.update_application(id, patch)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_rm(ctx: &mut AppContext, id: &str, yes: bool) -> Result<()> {
    if let Some(record) = ctx.api.find_application(id)? {
        let question = format!("Delete {} at {}?", record.role, record.company);
        if !yes && !confirm(&question)? {
            println!("Cancelled.");
            return Ok(());
        }
    }
    let result = ctx.api.delete_application(id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_theme(ctx: &mut AppContext, value: Option<String>) -> Result<()> {
    let action = match value.as_deref() {
        None => ThemeAction::Show,
        Some(v) if v.eq_ignore_ascii_case("toggle") => ThemeAction::Toggle,
        Some(v) => ThemeAction::Set(v.parse::<ThemePreference>()?),
    };
    let result = ctx.api.theme(action)?;
    if let Some(theme) = result.theme {
        ctx.palette = palette(theme);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_summarize(ctx: &mut AppContext, id: &str) -> Result<()> {
    let pending = ctx.api.begin_summary(id)?;
    eprintln!("Summarizing job description...");
    let completion = await_generation(ctx.api.prep_service(), pending)?;
    let result = ctx.api.finish_summary(completion)?;
    if let Some(record) = result.affected_records.first() {
        if let Some(notes) = &record.notes {
            print_generated(notes, ctx.palette);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_prep(ctx: &mut AppContext, id: &str) -> Result<()> {
    let pending = ctx.api.begin_interview_prep(id)?;
    eprintln!("Generating interview prep...");
    let completion = await_generation(ctx.api.prep_service(), pending)?;
    let result = ctx.api.finish_interview_prep(completion);
    if let Some(text) = &result.generated {
        print_generated(text, ctx.palette);
    }
    print_messages(&result.messages);
    Ok(())
}

/// Runs one generation request; Ctrl-C dismisses it instead of killing the
/// process, so a late reply is dropped.
fn await_generation(service: &PrepService, pending: PendingPrep) -> Result<Option<PrepCompletion>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(JobtrackError::Io)?;

    let handle = pending.cancel_handle();
    let service = service.clone();
    Ok(runtime.block_on(async move {
        tokio::select! {
            done = service.generate(pending) => done,
            _ = tokio::signal::ctrl_c() => {
                handle.dismiss();
                None
            }
        }
    }))
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key.clone(), value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if key.is_none() {
        if let Some(config) = &result.config {
            for k in KEYS {
                if let Some(v) = config.get(k) {
                    println!("{} = {}", k, v);
                }
            }
        }
    }
    print_messages(&result.messages);
    if result.has_errors() {
        return Err(JobtrackError::Api("Configuration was not changed".into()));
    }
    Ok(())
}

/// `-` reads the value from stdin.
fn read_text_arg(value: String) -> Result<String> {
    if value != "-" {
        return Ok(value);
    }
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(JobtrackError::Io)?;
    Ok(buffer)
}

fn parse_date_arg(value: &str) -> Result<chrono::DateTime<chrono::Utc>> {
    parse_timestamp(value).ok_or_else(|| {
        JobtrackError::validation(format!(
            "Could not read '{}' as a date (try 2024-05-01T14:30)",
            value
        ))
    })
}

fn confirm(question: &str) -> Result<bool> {
    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        return Err(JobtrackError::Api(
            "Refusing to delete without confirmation; pass --yes".into(),
        ));
    }

    print!("{} [y/N] ", question);
    std::io::stdout().flush().map_err(JobtrackError::Io)?;

    let mut answer = String::new();
    stdin
        .lock()
        .read_line(&mut answer)
        .map_err(JobtrackError::Io)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_criteria_is_newest_first() {
        let criteria = list_criteria(&ListArgs::default()).unwrap();
        assert_eq!(criteria, ViewCriteria::default());
    }

    #[test]
    fn test_sort_key_without_direction_starts_ascending() {
        let args = ListArgs {
            sort: Some("company".into()),
            ..Default::default()
        };
        let criteria = list_criteria(&args).unwrap();
        assert_eq!(
            criteria.sort,
            SortConfig::new(SortKey::Company, SortDirection::Ascending)
        );

        let args = ListArgs {
            sort: Some("date".into()),
            ..Default::default()
        };
        assert_eq!(
            list_criteria(&args).unwrap().sort.direction,
            SortDirection::Ascending
        );
    }

    #[test]
    fn test_explicit_direction_wins() {
        let args = ListArgs {
            sort: Some("role".into()),
            desc: true,
            ..Default::default()
        };
        assert_eq!(
            list_criteria(&args).unwrap().sort,
            SortConfig::new(SortKey::Role, SortDirection::Descending)
        );
    }

    #[test]
    fn test_bad_status_filter_is_error() {
        let args = ListArgs {
            status: Some("ghosted".into()),
            ..Default::default()
        };
        assert!(list_criteria(&args).is_err());
    }

    #[test]
    fn test_parse_date_arg() {
        assert!(parse_date_arg("2024-05-01T14:30").is_ok());
        assert!(parse_date_arg("next tuesday").is_err());
    }
}
