//! Translation from backend job records to [`JobListItem`].
//!
//! This is the only place that knows the backend's job field names.

use crate::model::{JobListItem, RawJob};

const FORMATTED_SUFFIX: &str = "@OData.Community.Display.V1.FormattedValue";

/// Display-formatted variant of a field, e.g. `gr_date@OData...FormattedValue`.
fn formatted(raw: &RawJob, key: &str) -> Option<String> {
    raw.text(&format!("{}{}", key, FORMATTED_SUFFIX))
}

/// Maps one raw job. Total: missing fields become empty strings.
pub fn map_raw_job(raw: &RawJob) -> JobListItem {
    let field = |key: &str| raw.text(key).unwrap_or_default();

    JobListItem {
        id: field("gr_jobsid"),
        job_number: field("gr_jobnumber"),
        date: formatted(raw, "gr_date")
            .or_else(|| raw.text("gr_date"))
            .unwrap_or_default(),
        mechanic: field("gr_technician"),
        model: field("gr_modelsnap"),
        fleet_number: raw
            .text("gr_fleetnumbersnap")
            .or_else(|| formatted(raw, "_gr_machine_value"))
            .unwrap_or_default(),
        company_name: field("gr_customersnap"),
        description: field("gr_description"),
        site_address: field("gr_siteaddresssnap"),
        site_suburb: field("gr_sitesuburbsnap"),
        site_city: field("gr_sitecitysnap"),
        customer_po: field("gr_customerpo"),
        contact_name: field("gr_contactnamesnap"),
        contact_phone: field("gr_contactphonesnap"),
        status: field("gr_status"),
    }
}

pub fn map_raw_jobs(raw: &[RawJob]) -> Vec<JobListItem> {
    raw.iter().map(map_raw_job).collect()
}
