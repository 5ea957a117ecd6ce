use log::warn;

use crate::dates;
use crate::model::UpdateJobPayload;

use super::columns::JobField;
use super::editor::JobPatch;

impl UpdateJobPayload {
    /// Translates row changes to the update flow's field names.
    ///
    /// Dates are sent as backend datetimes; a date that cannot be read is
    /// left out. Contact columns are display-only and never sent.
    pub fn from_patch(patch: &JobPatch) -> Self {
        let mut payload = UpdateJobPayload::new(patch.id.clone());

        for (field, value) in &patch.changes {
            let value = value.clone();
            match field {
                JobField::Status => payload.status = Some(value),
                JobField::JobNumber => payload.job_number = Some(value),
                JobField::Date => {
                    payload.date = dates::to_backend_datetime(&value);
                    if payload.date.is_none() {
                        warn!("Ignoring unreadable date '{}' for job {}", value, patch.id);
                    }
                }
                JobField::Mechanic => payload.technician = Some(value),
                JobField::Model => payload.model = Some(value),
                JobField::FleetNumber => payload.fleet_number = Some(value),
                JobField::CompanyName => payload.customer = Some(value),
                JobField::Description => payload.description = Some(value),
                JobField::SiteAddress => payload.site_address = Some(value),
                JobField::SiteSuburb => payload.site_suburb = Some(value),
                JobField::SiteCity => payload.site_city = Some(value),
                JobField::CustomerPo => payload.customer_po = Some(value),
                JobField::ContactName | JobField::ContactPhone => {}
            }
        }

        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_translates_to_backend_names() {
        let patch = JobPatch::new("j-1")
            .with(JobField::Mechanic, "Jane")
            .with(JobField::CompanyName, "Acme")
            .with(JobField::SiteSuburb, "Suburb")
            .with(JobField::Date, "05/01/2024");

        let payload = UpdateJobPayload::from_patch(&patch);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "id": "j-1",
                "technician": "Jane",
                "customer": "Acme",
                "siteSuburb": "Suburb",
                "date": "2024-01-05T00:00:00Z"
            })
        );
    }

    #[test]
    fn test_contact_columns_are_dropped() {
        let patch = JobPatch::new("j-1")
            .with(JobField::ContactName, "Sam")
            .with(JobField::ContactPhone, "021");
        assert!(UpdateJobPayload::from_patch(&patch).is_empty());
    }

    #[test]
    fn test_unreadable_date_is_left_out() {
        let patch = JobPatch::new("j-1").with(JobField::Date, "soon");
        let payload = UpdateJobPayload::from_patch(&patch);
        assert_eq!(payload.date, None);
        assert!(payload.is_empty());
    }

    #[test]
    fn test_empty_values_are_sent() {
        let patch = JobPatch::new("j-1").with(JobField::CustomerPo, "");
        let payload = UpdateJobPayload::from_patch(&patch);
        assert_eq!(payload.customer_po.as_deref(), Some(""));
    }
}
