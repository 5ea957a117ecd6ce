//! Fleet lookup and job entry.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use log::{info, warn};
use serde::Serialize;
use tokio::io::AsyncReadExt;

use jobcard::dates;
use jobcard::entry::{FormField, JobType, LogProgress};
use jobcard::tsv::CopyOutcome;
use jobcard::JobEntrySession;

use super::emit;
use crate::render;
use crate::state::AppState;

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Spreadsheet row to paste into the form (`-` reads stdin)
    #[arg(long, value_name = "FILE")]
    pub paste: Option<PathBuf>,

    /// Fleet number; looked up and used to fill machine and customer fields
    #[arg(long)]
    pub fleet_number: Option<String>,

    #[arg(long)]
    pub job_number: Option<String>,

    /// Job date (YYYY-MM-DD or DD/MM/YYYY); defaults to today
    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub technician: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long, value_parser = parse_job_type)]
    pub job_type: Option<JobType>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub customer: Option<String>,

    #[arg(long)]
    pub customer_po: Option<String>,

    #[arg(long)]
    pub site_address: Option<String>,

    #[arg(long)]
    pub suburb: Option<String>,

    #[arg(long)]
    pub city: Option<String>,

    /// Use an existing site contact of the machine
    #[arg(long, value_name = "ID", conflicts_with_all = ["contact_name", "contact_phone", "contact_email"])]
    pub contact: Option<String>,

    #[arg(long)]
    pub contact_name: Option<String>,

    #[arg(long)]
    pub contact_phone: Option<String>,

    #[arg(long)]
    pub contact_email: Option<String>,

    #[arg(long)]
    pub tyre_front: Option<String>,

    #[arg(long)]
    pub tyre_rear: Option<String>,

    /// Whether tyres are covered by the rental agreement
    #[arg(long)]
    pub tyres_covered: Option<bool>,

    #[arg(long)]
    pub scheduled_date: Option<String>,

    #[arg(long)]
    pub scheduled_date_end: Option<String>,

    /// Leave the job unscheduled
    #[arg(long, conflicts_with_all = ["scheduled_date", "scheduled_date_end"])]
    pub unscheduled: bool,

    /// Copy the job book row to the clipboard before submitting
    #[arg(long)]
    pub copy: bool,

    /// Fill and validate the form without submitting
    #[arg(long)]
    pub dry_run: bool,
}

fn parse_job_type(raw: &str) -> Result<JobType, String> {
    raw.parse::<JobType>().map_err(|e| e.to_string())
}

impl CreateArgs {
    /// Explicit field flags, in form order. Dates are normalised to ISO.
    fn field_values(&self) -> Vec<(FormField, String)> {
        let date = |value: &Option<String>| value.as_deref().map(dates::to_iso_date_only);
        let fields = [
            (FormField::JobNumber, self.job_number.clone()),
            (FormField::Date, date(&self.date)),
            (FormField::Technician, self.technician.clone()),
            (FormField::Description, self.description.clone()),
            (FormField::Model, self.model.clone()),
            (FormField::Customer, self.customer.clone()),
            (FormField::SiteAddress, self.site_address.clone()),
            (FormField::SiteAddressSuburb, self.suburb.clone()),
            (FormField::SiteAddressCity, self.city.clone()),
            (FormField::SiteContact, self.contact_name.clone()),
            (FormField::SiteContactPhone, self.contact_phone.clone()),
            (FormField::SiteContactEmail, self.contact_email.clone()),
            (FormField::CustomerPo, self.customer_po.clone()),
            (
                FormField::JobType,
                self.job_type.map(|t| t.as_str().to_string()),
            ),
            (FormField::TyreFront, self.tyre_front.clone()),
            (FormField::TyreRear, self.tyre_rear.clone()),
            (FormField::ScheduledDate, date(&self.scheduled_date)),
            (FormField::ScheduledDateEnd, date(&self.scheduled_date_end)),
        ];
        fields
            .into_iter()
            .filter_map(|(field, value)| value.map(|v| (field, v)))
            .collect()
    }
}

async fn read_paste(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("Failed to read pasted row from stdin")?;
        return Ok(text);
    }
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

/// Looks up a machine and shows the form it would produce.
pub async fn lookup(state: &AppState, fleet_number: &str, json: bool) -> Result<()> {
    let mut session = JobEntrySession::new();
    session.set_field(FormField::FleetNumber, fleet_number);

    let result = session
        .lookup_fleet(&state.backend)
        .await
        .map(|_| session.clone());

    emit(result, json, |session| {
        if session.machine.machine_not_found {
            println!("No machine found for fleet number '{}'", fleet_number);
            return;
        }
        render::print_form(&session.form);
        render::print_contacts(&session.machine);
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DryRun {
    form: jobcard::JobEntryForm,
    export_row: Vec<String>,
}

/// Fills the form from a pasted row, a fleet lookup and explicit flags, then
/// submits it.
pub async fn create(state: &AppState, args: CreateArgs, json: bool) -> Result<()> {
    let backend = &state.backend;
    let mut session = JobEntrySession::new();
    session.scheduled = !args.unscheduled;

    if let Some(path) = &args.paste {
        let text = read_paste(path).await?;
        match session.paste_from_excel(backend, &text).await {
            Some(patch) => info!("Pasted {} field(s)", patch.len()),
            None => bail!("Pasted text contains no row"),
        }
    }

    if let Some(fleet_number) = &args.fleet_number {
        let changed = fleet_number.trim() != session.form.fleet_number.trim();
        if changed || session.machine.machine_id.is_none() {
            session.set_field(FormField::FleetNumber, fleet_number.as_str());
            // Recorded in lookup_error.
            let _ = session.lookup_fleet(backend).await;
        }
    }
    if let Some(message) = &session.lookup_error {
        warn!("Fleet lookup failed, continuing with entered values: {}", message);
    }
    if session.machine.machine_not_found {
        warn!(
            "Fleet number '{}' not found; a new machine will be created",
            session.form.fleet_number
        );
    }

    if let Some(contact_id) = &args.contact {
        session.select_contact(Some(contact_id.as_str()))?;
    }
    for (field, value) in args.field_values() {
        session.set_field(field, value);
    }
    if args.tyres_covered.is_some() {
        session.set_tyres_covered(args.tyres_covered);
    }

    if args.copy {
        match session.copy_to_clipboard().await {
            CopyOutcome::Clipboard(tool) => info!("Copied job book row via {}", tool),
            // Keeps stdout free for the submission result.
            CopyOutcome::ManualSelection(row) => eprintln!("{}", row),
        }
    }

    if args.dry_run {
        let result = session
            .form
            .validate()
            .map(|()| DryRun {
                form: session.form.clone(),
                export_row: session.export_row(),
            })
            .map_err(|e| e.to_string());
        return emit(result, json, |dry| {
            render::print_form(&dry.form);
            println!("Form is valid; nothing was submitted");
        });
    }

    let result = session.submit(backend, &LogProgress).await;
    emit(result, json, |outcome| {
        println!("Created job {}", outcome.job_id);
        println!("  machine  {}", outcome.machine_id);
        if let Some(contact_id) = &outcome.contact_id {
            println!("  contact  {}", contact_id);
        }
        println!("  submission {}", outcome.submission_id);
    })
}
