//! `submit` command: compose and send an incident report.
//!
//! Prompts are pre-filled with whatever the report already holds, so after
//! a validation failure the reporter walks the form again and only fixes
//! what is wrong. After a transport failure the same report is offered for
//! resubmission unchanged.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{NaiveDate, NaiveTime};
use dialoguer::theme::Theme;
use dialoguer::{Confirm, Input, Select};
use emergency_alert_client::{ApiClient, SubmissionSurface, SubmitError};
use emergency_alert_client_models::SubmissionReceipt;
use emergency_alert_report::{IncidentReport, RequiredField, ValidationError};
use emergency_alert_report_models::{
    CandidateFile, DATE_FORMAT, DESCRIPTION_MAX_CHARS, DESCRIPTION_MIN_CHARS, IncidentCategory,
    MAX_EVIDENCE_BYTES, MAX_EVIDENCE_FILES, MediaType, TIME_FORMAT, UrgencyLevel,
};

use crate::context::{CliError, Context};

/// How often the submit loop checks whether to show its spinner.
const SPINNER_POLL: Duration = Duration::from_millis(100);

/// Declared type for files whose extension is not a known media type.
const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

#[allow(clippy::future_not_send)]
pub async fn run(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let mut surface = SubmissionSurface::new(ctx.anonymous_client());
    let theme = ctx.prompt_theme();

    println!("Report an Incident");
    println!();

    compose(theme.as_ref(), &mut surface)?;

    loop {
        match send(ctx, &mut surface).await {
            Ok(receipt) => {
                print_receipt(&receipt);
                return Ok(());
            }
            Err(SubmitError::Validation(e)) => {
                println!("{e}");
                println!("  check the {}", field_hint(&e));
                let edit = Confirm::with_theme(theme.as_ref())
                    .with_prompt("Edit the report and try again?")
                    .default(true)
                    .interact()?;
                if !edit {
                    return Err(e.into());
                }
                compose(theme.as_ref(), &mut surface)?;
            }
            Err(e @ SubmitError::Transport(_)) => {
                println!("{e}");
                let retry = Confirm::with_theme(theme.as_ref())
                    .with_prompt("Retry with the same report?")
                    .default(true)
                    .interact()?;
                if !retry {
                    return Err(e.into());
                }
            }
        }
    }
}

/// Submits once, showing a spinner only while the report is actually
/// awaiting the backend.
#[allow(clippy::future_not_send)]
async fn send(
    ctx: &Context,
    surface: &mut SubmissionSurface<ApiClient>,
) -> Result<SubmissionReceipt, SubmitError> {
    let busy = surface.in_flight();
    let submit = surface.submit();
    tokio::pin!(submit);

    let mut spinner = None;
    let result = loop {
        tokio::select! {
            biased;
            result = &mut submit => break result,
            () = tokio::time::sleep(SPINNER_POLL) => {
                if spinner.is_none() && busy.is_active() {
                    spinner = Some(emergency_alert_cli_utils::in_flight(&ctx.multi, "Submitting..."));
                }
            }
        }
    };

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    result
}

/// Walks every field of the form, starting from the report's current
/// values.
fn compose(
    theme: &dyn Theme,
    surface: &mut SubmissionSurface<ApiClient>,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = surface.report_mut();
    prompt_category(theme, report)?;
    prompt_location(theme, report)?;
    prompt_occurred_at(theme, report)?;
    prompt_description(theme, report)?;
    prompt_urgency(theme, report)?;
    prompt_evidence(theme, surface)?;

    let report = surface.report_mut();
    report.consent_confirmed = Confirm::with_theme(theme)
        .with_prompt("I confirm that the information provided is accurate")
        .default(report.consent_confirmed)
        .interact()?;
    Ok(())
}

fn prompt_category(
    theme: &dyn Theme,
    report: &mut IncidentReport,
) -> Result<(), Box<dyn std::error::Error>> {
    let labels: Vec<&str> = IncidentCategory::all().iter().map(|c| c.label()).collect();
    let current = report
        .category
        .and_then(|c| IncidentCategory::all().iter().position(|x| *x == c))
        .unwrap_or(0);
    let idx = Select::with_theme(theme)
        .with_prompt("Category")
        .items(&labels)
        .default(current)
        .interact()?;
    let category = IncidentCategory::all()[idx];
    report.category = Some(category);

    if category == IncidentCategory::Other {
        report.other_category = Input::with_theme(theme)
            .with_prompt("Specify category")
            .with_initial_text(report.other_category.clone())
            .allow_empty(true)
            .interact_text()?;
    }
    Ok(())
}

fn prompt_location(
    theme: &dyn Theme,
    report: &mut IncidentReport,
) -> Result<(), Box<dyn std::error::Error>> {
    let location = &mut report.location;
    location.pincode = text(theme, "Pincode", &location.pincode)?;
    location.city = text(theme, "City (optional)", &location.city)?;
    location.address = text(theme, "Address (optional)", &location.address)?;
    Ok(())
}

fn prompt_occurred_at(
    theme: &dyn Theme,
    report: &mut IncidentReport,
) -> Result<(), Box<dyn std::error::Error>> {
    let occurred_at = &mut report.occurred_at;

    let date: String = Input::with_theme(theme)
        .with_prompt("Date (YYYY-MM-DD, optional)")
        .with_initial_text(occurred_at.date_field())
        .allow_empty(true)
        .validate_with(|input: &String| -> Result<(), String> {
            parse_optional(input, |s| NaiveDate::parse_from_str(s, DATE_FORMAT))
                .map(|_| ())
                .map_err(|_| "Use the YYYY-MM-DD format".to_string())
        })
        .interact_text()?;
    occurred_at.date = parse_optional(&date, |s| NaiveDate::parse_from_str(s, DATE_FORMAT))?;

    let time: String = Input::with_theme(theme)
        .with_prompt("Time (HH:MM, optional)")
        .with_initial_text(occurred_at.time_field())
        .allow_empty(true)
        .validate_with(|input: &String| -> Result<(), String> {
            parse_optional(input, |s| NaiveTime::parse_from_str(s, TIME_FORMAT))
                .map(|_| ())
                .map_err(|_| "Use the HH:MM format".to_string())
        })
        .interact_text()?;
    occurred_at.time = parse_optional(&time, |s| NaiveTime::parse_from_str(s, TIME_FORMAT))?;
    Ok(())
}

fn prompt_description(
    theme: &dyn Theme,
    report: &mut IncidentReport,
) -> Result<(), Box<dyn std::error::Error>> {
    report.description = text(
        theme,
        &format!("Description ({DESCRIPTION_MIN_CHARS}-{DESCRIPTION_MAX_CHARS} characters)"),
        &report.description,
    )?;
    println!(
        "  {}/{DESCRIPTION_MAX_CHARS} characters",
        report.description_len()
    );
    Ok(())
}

fn prompt_urgency(
    theme: &dyn Theme,
    report: &mut IncidentReport,
) -> Result<(), Box<dyn std::error::Error>> {
    let labels: Vec<String> = UrgencyLevel::all().iter().map(ToString::to_string).collect();
    let current = report
        .urgency
        .and_then(|u| UrgencyLevel::all().iter().position(|x| *x == u))
        .unwrap_or(0);
    let idx = Select::with_theme(theme)
        .with_prompt("Urgency level")
        .items(&labels)
        .default(current)
        .interact()?;
    report.urgency = Some(UrgencyLevel::all()[idx]);
    Ok(())
}

/// Lists attached evidence, offers removal, then attaches new files one
/// path at a time and asks for a caption for each.
fn prompt_evidence(
    theme: &dyn Theme,
    surface: &mut SubmissionSurface<ApiClient>,
) -> Result<(), Box<dyn std::error::Error>> {
    while !surface.report().evidence.is_empty() {
        let mut items: Vec<String> = surface
            .report()
            .evidence
            .iter()
            .map(|(file, caption)| format!("Remove {} ({caption:?})", file.name))
            .collect();
        items.push("Keep attached files".to_string());

        let idx = Select::with_theme(theme)
            .with_prompt("Attached evidence")
            .items(&items)
            .default(items.len() - 1)
            .interact()?;
        if idx == items.len() - 1 {
            break;
        }
        let removed = surface.remove_evidence(idx)?;
        println!("  removed {}", removed.name);
    }

    println!("Evidence: JPG, PNG, or MP4, at most {MAX_EVIDENCE_FILES} files of 10MB each.");
    while surface.report().evidence.remaining_capacity() > 0 {
        let path: String = Input::with_theme(theme)
            .with_prompt("File path (empty to finish)")
            .allow_empty(true)
            .interact_text()?;
        if path.trim().is_empty() {
            break;
        }

        let candidate = read_candidate(Path::new(path.trim()))?;
        let outcome = surface.attach_files(vec![candidate])?;
        for rejection in &outcome.rejected {
            println!("  {}: {}", rejection.name, rejection.reason);
        }
        if outcome.admitted == 1 {
            let index = surface.report().evidence.len() - 1;
            let caption = text(theme, "Caption (optional)", "")?;
            surface.set_caption(index, caption)?;
        }
    }
    Ok(())
}

/// Reads a file from disk as a picker would present it. The media type is
/// declared from the extension; oversized files are not read into memory.
fn read_candidate(path: &Path) -> Result<CandidateFile, CliError> {
    let read_err = |source| CliError::ReadEvidence {
        path: PathBuf::from(path),
        source,
    };

    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    let declared_type = declared_type(path);
    let size = std::fs::metadata(path).map_err(read_err)?.len();

    if size > MAX_EVIDENCE_BYTES {
        return Ok(CandidateFile {
            name,
            declared_type,
            size,
            bytes: Vec::new(),
        });
    }

    let bytes = std::fs::read(path).map_err(read_err)?;
    Ok(CandidateFile::new(name, declared_type, bytes))
}

fn declared_type(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(MediaType::from_extension)
        .map_or(UNKNOWN_MEDIA_TYPE, MediaType::mime)
        .to_string()
}

fn text(theme: &dyn Theme, prompt: &str, initial: &str) -> Result<String, dialoguer::Error> {
    Input::with_theme(theme)
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()
}

/// Parses `input` unless it is blank.
fn parse_optional<T, E>(input: &str, parse: impl Fn(&str) -> Result<T, E>) -> Result<Option<T>, E> {
    let input = input.trim();
    if input.is_empty() {
        Ok(None)
    } else {
        parse(input).map(Some)
    }
}

fn print_receipt(receipt: &SubmissionReceipt) {
    println!();
    println!("{}", receipt.message);
    println!("  reference:  {}", receipt.postgresql_id);
    println!("  live feed:  {}", receipt.firebase_id);
    println!("  status:     {}", receipt.status);
    println!("  submitted:  {}", receipt.timestamp);
}

/// Which prompt fixes a validation failure.
const fn field_hint(error: &ValidationError) -> &'static str {
    match error {
        ValidationError::MissingField(RequiredField::Category) => "category",
        ValidationError::MissingField(RequiredField::Pincode) => "pincode",
        ValidationError::MissingField(RequiredField::Description)
        | ValidationError::DescriptionOutOfBounds { .. } => "description",
        ValidationError::MissingField(RequiredField::Urgency) => "urgency level",
        ValidationError::ConsentNotGiven => "confirmation",
    }
}
