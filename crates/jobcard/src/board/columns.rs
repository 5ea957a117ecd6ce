//! Column definitions for the job list and ops board tables.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::dates;
use crate::error::ValidationError;
use crate::model::{JobListItem, JobStatus};

/// Placeholder shown for an empty cell.
pub const EMPTY_CELL: &str = "—";

/// A field of [`JobListItem`] that a table column can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum JobField {
    Status,
    JobNumber,
    Date,
    Mechanic,
    Model,
    FleetNumber,
    CompanyName,
    Description,
    SiteAddress,
    SiteSuburb,
    SiteCity,
    CustomerPo,
    ContactName,
    ContactPhone,
}

impl JobField {
    pub const ALL: [JobField; 14] = [
        JobField::Status,
        JobField::JobNumber,
        JobField::Date,
        JobField::Mechanic,
        JobField::Model,
        JobField::FleetNumber,
        JobField::CompanyName,
        JobField::Description,
        JobField::SiteAddress,
        JobField::SiteSuburb,
        JobField::SiteCity,
        JobField::CustomerPo,
        JobField::ContactName,
        JobField::ContactPhone,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            JobField::Status => "status",
            JobField::JobNumber => "jobNumber",
            JobField::Date => "date",
            JobField::Mechanic => "mechanic",
            JobField::Model => "model",
            JobField::FleetNumber => "fleetNumber",
            JobField::CompanyName => "companyName",
            JobField::Description => "description",
            JobField::SiteAddress => "siteAddress",
            JobField::SiteSuburb => "siteSuburb",
            JobField::SiteCity => "siteCity",
            JobField::CustomerPo => "customerPo",
            JobField::ContactName => "contactName",
            JobField::ContactPhone => "contactPhone",
        }
    }

    pub fn get<'a>(&self, job: &'a JobListItem) -> &'a str {
        match self {
            JobField::Status => &job.status,
            JobField::JobNumber => &job.job_number,
            JobField::Date => &job.date,
            JobField::Mechanic => &job.mechanic,
            JobField::Model => &job.model,
            JobField::FleetNumber => &job.fleet_number,
            JobField::CompanyName => &job.company_name,
            JobField::Description => &job.description,
            JobField::SiteAddress => &job.site_address,
            JobField::SiteSuburb => &job.site_suburb,
            JobField::SiteCity => &job.site_city,
            JobField::CustomerPo => &job.customer_po,
            JobField::ContactName => &job.contact_name,
            JobField::ContactPhone => &job.contact_phone,
        }
    }

    pub fn set(&self, job: &mut JobListItem, value: String) {
        let slot = match self {
            JobField::Status => &mut job.status,
            JobField::JobNumber => &mut job.job_number,
            JobField::Date => &mut job.date,
            JobField::Mechanic => &mut job.mechanic,
            JobField::Model => &mut job.model,
            JobField::FleetNumber => &mut job.fleet_number,
            JobField::CompanyName => &mut job.company_name,
            JobField::Description => &mut job.description,
            JobField::SiteAddress => &mut job.site_address,
            JobField::SiteSuburb => &mut job.site_suburb,
            JobField::SiteCity => &mut job.site_city,
            JobField::CustomerPo => &mut job.customer_po,
            JobField::ContactName => &mut job.contact_name,
            JobField::ContactPhone => &mut job.contact_phone,
        };
        *slot = value;
    }
}

impl fmt::Display for JobField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for JobField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        JobField::ALL
            .into_iter()
            .find(|field| field.key().to_ascii_lowercase() == wanted)
            .ok_or_else(|| ValidationError::new(format!("Unknown job field '{}'", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub label: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "options")]
pub enum ColumnKind {
    Text,
    Select(Vec<SelectOption>),
}

/// How a column renders its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellFormat {
    Plain,
    NzDate,
    /// Address joined with suburb and city.
    FullAddress,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobColumn {
    pub field: JobField,
    pub label: &'static str,
    pub mono: bool,
    pub min_width: u16,
    pub kind: ColumnKind,
    pub format: CellFormat,
    /// Editable without entering row-edit mode.
    pub always_editable: bool,
}

impl JobColumn {
    fn text(field: JobField, label: &'static str, min_width: u16) -> Self {
        Self {
            field,
            label,
            mono: false,
            min_width,
            kind: ColumnKind::Text,
            format: CellFormat::Plain,
            always_editable: false,
        }
    }

    fn mono(mut self) -> Self {
        self.mono = true;
        self
    }

    fn format(mut self, format: CellFormat) -> Self {
        self.format = format;
        self
    }

    fn status() -> Self {
        Self {
            field: JobField::Status,
            label: "Status",
            mono: false,
            min_width: 120,
            kind: ColumnKind::Select(status_options()),
            format: CellFormat::Plain,
            always_editable: true,
        }
    }

    /// The cell's display text, possibly empty.
    pub fn value(&self, job: &JobListItem) -> String {
        match self.format {
            CellFormat::Plain => self.field.get(job).to_string(),
            CellFormat::NzDate => dates::format_nz_date(Some(job.date.as_str())),
            CellFormat::FullAddress => job.full_address(),
        }
    }

    /// The cell's display text with [`EMPTY_CELL`] for blanks.
    pub fn display(&self, job: &JobListItem) -> String {
        let value = self.value(job);
        if value.is_empty() {
            EMPTY_CELL.to_string()
        } else {
            value
        }
    }
}

pub fn status_options() -> Vec<SelectOption> {
    JobStatus::ALL
        .iter()
        .map(|status| SelectOption {
            label: status.label(),
            value: status.as_str(),
        })
        .collect()
}

/// Status selector plus the nine job book columns, address combined.
pub fn basic_columns() -> Vec<JobColumn> {
    vec![
        JobColumn::status(),
        JobColumn::text(JobField::JobNumber, "Job", 90).mono(),
        JobColumn::text(JobField::Date, "Date", 110).format(CellFormat::NzDate),
        JobColumn::text(JobField::Mechanic, "Technician", 100),
        JobColumn::text(JobField::Model, "Model", 140),
        JobColumn::text(JobField::FleetNumber, "Fleet", 110).mono(),
        JobColumn::text(JobField::CompanyName, "Customer", 180),
        JobColumn::text(JobField::Description, "Description of the Job", 280),
        JobColumn::text(JobField::SiteAddress, "Address", 320).format(CellFormat::FullAddress),
    ]
}

/// All thirteen job list columns, without the status selector.
pub fn full_columns() -> Vec<JobColumn> {
    vec![
        JobColumn::text(JobField::JobNumber, "Job", 90).mono(),
        JobColumn::text(JobField::Date, "Date", 110).format(CellFormat::NzDate),
        JobColumn::text(JobField::Mechanic, "Technician", 140),
        JobColumn::text(JobField::Model, "Model", 140),
        JobColumn::text(JobField::FleetNumber, "Fleet", 110).mono(),
        JobColumn::text(JobField::CompanyName, "Customer", 180),
        JobColumn::text(JobField::Description, "Description of the Job", 280),
        JobColumn::text(JobField::SiteAddress, "Address", 220),
        JobColumn::text(JobField::SiteSuburb, "Suburb", 140),
        JobColumn::text(JobField::SiteCity, "City", 140),
        JobColumn::text(JobField::CustomerPo, "Customer PO", 140).mono(),
        JobColumn::text(JobField::ContactName, "Contact Name", 160),
        JobColumn::text(JobField::ContactPhone, "Phone", 140).mono(),
    ]
}

/// Job book row for the ops board: NZ date then the nine job book fields.
pub fn board_export_row(job: &JobListItem) -> Vec<String> {
    vec![
        dates::format_nz_date(Some(job.date.as_str())),
        job.mechanic.clone(),
        job.model.clone(),
        job.fleet_number.clone(),
        job.company_name.clone(),
        job.description.clone(),
        job.site_address.clone(),
        job.site_suburb.clone(),
        job.site_city.clone(),
        job.customer_po.clone(),
    ]
}

/// Board row plus contact name and phone.
pub fn full_export_row(job: &JobListItem) -> Vec<String> {
    let mut row = board_export_row(job);
    row.push(job.contact_name.clone());
    row.push(job.contact_phone.clone());
    row
}
