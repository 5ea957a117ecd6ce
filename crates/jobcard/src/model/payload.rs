//! Request and response bodies for the create/update flows.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateMachinePayload {
    pub machine: MachineDetails,
}

/// Machine snapshot sent to the create-or-update machine flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineDetails {
    pub fleet_number: String,
    pub model: String,
    pub customer: String,
    pub site_address: String,
    pub site_address_suburb: String,
    pub site_address_city: String,
    #[serde(rename = "tyrecoverinra", skip_serializing_if = "Option::is_none")]
    pub tyres_covered_in_rental_agreement: Option<bool>,
    pub tyre_front: String,
    pub tyre_rear: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMachineResponse {
    pub machine_id: String,
    #[serde(default)]
    pub created: Option<bool>,
    #[serde(default)]
    pub updated: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateContactPayload {
    pub contact: ContactDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub machine_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactResponse {
    pub contact_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateJobPayload {
    pub job: JobDetails,
}

/// The job card as sent to the create-job flow. Blank optional fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_number: Option<String>,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technician: Option<String>,
    pub description: String,
    pub job_type: String,
    #[serde(rename = "customerPO", skip_serializing_if = "Option::is_none")]
    pub customer_po: Option<String>,

    pub machine_id: String,
    pub contact_id: Option<String>,

    pub fleet_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_address_suburb: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_address_city: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,

    #[serde(rename = "tyrecoverinra", skip_serializing_if = "Option::is_none")]
    pub tyres_covered_in_rental_agreement: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tyre_front: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tyre_rear: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_date_end: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobResponse {
    pub job_id: String,
}

/// Partial update of a job, keyed by backend field names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobPayload {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technician: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fleet_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_suburb: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_po: Option<String>,
}

impl UpdateJobPayload {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// True when no field besides `id` would be sent.
    pub fn is_empty(&self) -> bool {
        let UpdateJobPayload {
            id: _,
            status,
            job_number,
            date,
            technician,
            model,
            fleet_number,
            customer,
            description,
            site_address,
            site_suburb,
            site_city,
            customer_po,
        } = self;
        [
            status,
            job_number,
            date,
            technician,
            model,
            fleet_number,
            customer,
            description,
            site_address,
            site_suburb,
            site_city,
            customer_po,
        ]
        .iter()
        .all(|field| field.is_none())
    }
}

/// `Some(trimmed)` for non-blank input.
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_job_payload_omits_blank_optionals_but_keeps_null_contact() {
        let payload = CreateJobPayload {
            job: JobDetails {
                date: "2024-01-05".into(),
                description: "Fix pump".into(),
                job_type: "Breakdown".into(),
                machine_id: "m-1".into(),
                fleet_number: "FL-42".into(),
                customer_po: Some("PO-9".into()),
                ..Default::default()
            },
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "job": {
                    "date": "2024-01-05",
                    "description": "Fix pump",
                    "jobType": "Breakdown",
                    "customerPO": "PO-9",
                    "machineId": "m-1",
                    "contactId": null,
                    "fleetNumber": "FL-42"
                }
            })
        );
    }

    #[test]
    fn test_contact_payload_shape() {
        let payload = CreateContactPayload {
            contact: ContactDetails {
                name: Some("Sam".into()),
                phone: None,
                email: Some("sam@example.com".into()),
                machine_id: "m-1".into(),
            },
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({ "contact": { "name": "Sam", "email": "sam@example.com", "machineId": "m-1" } })
        );
    }

    #[test]
    fn test_update_payload_is_empty() {
        let mut payload = UpdateJobPayload::new("j-1");
        assert!(payload.is_empty());
        payload.customer_po = Some("PO".into());
        assert!(!payload.is_empty());
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({ "id": "j-1", "customerPo": "PO" })
        );
    }

    #[test]
    fn test_machine_response_optional_flags() {
        let response: CreateMachineResponse =
            serde_json::from_str(r#"{ "machineId": "m-9" }"#).unwrap();
        assert_eq!(response.machine_id, "m-9");
        assert_eq!(response.created, None);
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank("  "), None);
        assert_eq!(non_blank(" x "), Some("x".to_string()));
    }
}
