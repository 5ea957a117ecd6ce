use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dates;
use crate::error::ValidationError;
use crate::model::payload::non_blank;
use crate::model::{CreateJobPayload, CreateMachinePayload, JobDetails, MachineDetails};

/// The job card being entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobEntryForm {
    pub job_number: String,
    pub date: String,
    pub technician: String,
    pub description: String,
    pub model: String,
    pub fleet_number: String,
    pub customer: String,
    pub site_address: String,
    pub site_address_suburb: String,
    pub site_address_city: String,
    pub site_contact: String,
    pub site_contact_phone: String,
    pub site_contact_email: String,
    #[serde(rename = "customerPO")]
    pub customer_po: String,
    pub job_type: String,

    pub tyre_front: String,
    pub tyre_rear: String,
    pub tyres_covered_in_rental_agreement: Option<bool>,

    pub scheduled_date: Option<String>,
    pub scheduled_date_end: Option<String>,
}

impl Default for JobEntryForm {
    fn default() -> Self {
        Self {
            job_number: String::new(),
            date: dates::today_iso(),
            technician: String::new(),
            description: String::new(),
            model: String::new(),
            fleet_number: String::new(),
            customer: String::new(),
            site_address: String::new(),
            site_address_suburb: String::new(),
            site_address_city: String::new(),
            site_contact: String::new(),
            site_contact_phone: String::new(),
            site_contact_email: String::new(),
            customer_po: String::new(),
            job_type: String::new(),
            tyre_front: String::new(),
            tyre_rear: String::new(),
            tyres_covered_in_rental_agreement: None,
            scheduled_date: None,
            scheduled_date_end: None,
        }
    }
}

/// Every text field of [`JobEntryForm`] that an input is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    JobNumber,
    Date,
    Technician,
    Description,
    Model,
    FleetNumber,
    Customer,
    SiteAddress,
    SiteAddressSuburb,
    SiteAddressCity,
    SiteContact,
    SiteContactPhone,
    SiteContactEmail,
    CustomerPo,
    JobType,
    TyreFront,
    TyreRear,
    ScheduledDate,
    ScheduledDateEnd,
}

impl FormField {
    pub const ALL: [FormField; 19] = [
        FormField::JobNumber,
        FormField::Date,
        FormField::Technician,
        FormField::Description,
        FormField::Model,
        FormField::FleetNumber,
        FormField::Customer,
        FormField::SiteAddress,
        FormField::SiteAddressSuburb,
        FormField::SiteAddressCity,
        FormField::SiteContact,
        FormField::SiteContactPhone,
        FormField::SiteContactEmail,
        FormField::CustomerPo,
        FormField::JobType,
        FormField::TyreFront,
        FormField::TyreRear,
        FormField::ScheduledDate,
        FormField::ScheduledDateEnd,
    ];

    /// Field key as used by the form's JSON shape.
    pub fn key(&self) -> &'static str {
        match self {
            FormField::JobNumber => "jobNumber",
            FormField::Date => "date",
            FormField::Technician => "technician",
            FormField::Description => "description",
            FormField::Model => "model",
            FormField::FleetNumber => "fleetNumber",
            FormField::Customer => "customer",
            FormField::SiteAddress => "siteAddress",
            FormField::SiteAddressSuburb => "siteAddressSuburb",
            FormField::SiteAddressCity => "siteAddressCity",
            FormField::SiteContact => "siteContact",
            FormField::SiteContactPhone => "siteContactPhone",
            FormField::SiteContactEmail => "siteContactEmail",
            FormField::CustomerPo => "customerPO",
            FormField::JobType => "jobType",
            FormField::TyreFront => "tyreFront",
            FormField::TyreRear => "tyreRear",
            FormField::ScheduledDate => "scheduledDate",
            FormField::ScheduledDateEnd => "scheduledDateEnd",
        }
    }

    /// Editing one of these means the user is entering a new contact.
    pub fn is_contact_field(&self) -> bool {
        matches!(
            self,
            FormField::SiteContact | FormField::SiteContactPhone | FormField::SiteContactEmail
        )
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FormField {
    type Err = ValidationError;

    /// Accepts the JSON key in any case, with or without `_`/`-` separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        FormField::ALL
            .into_iter()
            .find(|field| field.key().to_ascii_lowercase() == wanted)
            .ok_or_else(|| ValidationError::new(format!("Unknown form field '{}'", s)))
    }
}

/// Job types offered by the job type selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobType {
    Breakdown,
    Maintenance,
    Tyres,
    Transport,
    Prep,
    Workshop,
}

impl JobType {
    pub const ALL: [JobType; 6] = [
        JobType::Breakdown,
        JobType::Maintenance,
        JobType::Tyres,
        JobType::Transport,
        JobType::Prep,
        JobType::Workshop,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::Breakdown => "Breakdown",
            JobType::Maintenance => "Maintenance",
            JobType::Tyres => "Tyres",
            JobType::Transport => "Transport",
            JobType::Prep => "Prep",
            JobType::Workshop => "Workshop",
        }
    }
}

impl FromStr for JobType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::new(format!("Unknown job type '{}'", s.trim())))
    }
}

/// Sections of the entry page, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormSection {
    JobDetails,
    Machine,
    Customer,
    SiteContact,
    Tyres,
    Scheduling,
}

impl JobEntryForm {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::JobNumber => &self.job_number,
            FormField::Date => &self.date,
            FormField::Technician => &self.technician,
            FormField::Description => &self.description,
            FormField::Model => &self.model,
            FormField::FleetNumber => &self.fleet_number,
            FormField::Customer => &self.customer,
            FormField::SiteAddress => &self.site_address,
            FormField::SiteAddressSuburb => &self.site_address_suburb,
            FormField::SiteAddressCity => &self.site_address_city,
            FormField::SiteContact => &self.site_contact,
            FormField::SiteContactPhone => &self.site_contact_phone,
            FormField::SiteContactEmail => &self.site_contact_email,
            FormField::CustomerPo => &self.customer_po,
            FormField::JobType => &self.job_type,
            FormField::TyreFront => &self.tyre_front,
            FormField::TyreRear => &self.tyre_rear,
            FormField::ScheduledDate => self.scheduled_date.as_deref().unwrap_or(""),
            FormField::ScheduledDateEnd => self.scheduled_date_end.as_deref().unwrap_or(""),
        }
    }

    /// Writes one field. Clearing a scheduled date unsets it.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        let slot = match field {
            FormField::JobNumber => &mut self.job_number,
            FormField::Date => &mut self.date,
            FormField::Technician => &mut self.technician,
            FormField::Description => &mut self.description,
            FormField::Model => &mut self.model,
            FormField::FleetNumber => &mut self.fleet_number,
            FormField::Customer => &mut self.customer,
            FormField::SiteAddress => &mut self.site_address,
            FormField::SiteAddressSuburb => &mut self.site_address_suburb,
            FormField::SiteAddressCity => &mut self.site_address_city,
            FormField::SiteContact => &mut self.site_contact,
            FormField::SiteContactPhone => &mut self.site_contact_phone,
            FormField::SiteContactEmail => &mut self.site_contact_email,
            FormField::CustomerPo => &mut self.customer_po,
            FormField::JobType => &mut self.job_type,
            FormField::TyreFront => &mut self.tyre_front,
            FormField::TyreRear => &mut self.tyre_rear,
            FormField::ScheduledDate => {
                self.scheduled_date = Some(value).filter(|v| !v.is_empty());
                return;
            }
            FormField::ScheduledDateEnd => {
                self.scheduled_date_end = Some(value).filter(|v| !v.is_empty());
                return;
            }
        };
        *slot = value;
    }

    pub fn job_type(&self) -> Option<JobType> {
        self.job_type.parse().ok()
    }

    /// Required-field checks, run before anything is sent.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.fleet_number.trim().is_empty() {
            return Err(ValidationError::new("Fleet Number is required."));
        }
        if self.date.trim().is_empty() {
            return Err(ValidationError::new("Date is required."));
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::new("Description is required."));
        }
        if self.job_type.trim().is_empty() {
            return Err(ValidationError::new("Job Type is required."));
        }
        Ok(())
    }

    pub fn has_contact_details(&self) -> bool {
        [
            &self.site_contact,
            &self.site_contact_phone,
            &self.site_contact_email,
        ]
        .iter()
        .any(|v| !v.trim().is_empty())
    }

    pub fn clear_contact_details(&mut self) {
        self.site_contact.clear();
        self.site_contact_phone.clear();
        self.site_contact_email.clear();
    }

    /// Body for the create-or-update machine call.
    pub fn machine_payload(&self) -> CreateMachinePayload {
        CreateMachinePayload {
            machine: MachineDetails {
                fleet_number: self.fleet_number.trim().to_string(),
                model: self.model.clone(),
                customer: self.customer.clone(),
                site_address: self.site_address.clone(),
                site_address_suburb: self.site_address_suburb.clone(),
                site_address_city: self.site_address_city.clone(),
                tyres_covered_in_rental_agreement: self.tyres_covered_in_rental_agreement,
                tyre_front: self.tyre_front.clone(),
                tyre_rear: self.tyre_rear.clone(),
            },
        }
    }

    /// Body for the create-job call, referencing the ensured machine and contact.
    pub fn job_payload(&self, machine_id: &str, contact_id: Option<&str>) -> CreateJobPayload {
        let optional = |value: Option<&String>| value.and_then(|v| non_blank(v));

        CreateJobPayload {
            job: JobDetails {
                job_number: non_blank(&self.job_number),
                date: self.date.trim().to_string(),
                technician: non_blank(&self.technician),
                description: self.description.trim().to_string(),
                job_type: self.job_type.trim().to_string(),
                customer_po: non_blank(&self.customer_po),

                machine_id: machine_id.to_string(),
                contact_id: contact_id.map(str::to_string),

                fleet_number: self.fleet_number.trim().to_string(),
                model: non_blank(&self.model),
                customer: non_blank(&self.customer),
                site_address: non_blank(&self.site_address),
                site_address_suburb: non_blank(&self.site_address_suburb),
                site_address_city: non_blank(&self.site_address_city),

                contact_name: non_blank(&self.site_contact),
                contact_phone: non_blank(&self.site_contact_phone),
                contact_email: non_blank(&self.site_contact_email),

                tyres_covered_in_rental_agreement: self.tyres_covered_in_rental_agreement,
                tyre_front: non_blank(&self.tyre_front),
                tyre_rear: non_blank(&self.tyre_rear),

                scheduled_date: optional(self.scheduled_date.as_ref()),
                scheduled_date_end: optional(self.scheduled_date_end.as_ref()),
            },
        }
    }

    /// Job book row: date, technician, model, fleet, customer, description,
    /// address, suburb, city, customer PO.
    pub fn export_row(&self) -> Vec<String> {
        [
            &self.date,
            &self.technician,
            &self.model,
            &self.fleet_number,
            &self.customer,
            &self.description,
            &self.site_address,
            &self.site_address_suburb,
            &self.site_address_city,
            &self.customer_po,
        ]
        .iter()
        .map(|v| v.to_string())
        .collect()
    }
}
