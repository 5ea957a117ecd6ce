//! Builders for backend records used across tests.

#![allow(dead_code)]

use serde_json::{json, Map, Value};

use jobcard::model::{MachineLookupResponse, MachineRow, RawJob, SiteContactRow};
use jobcard::JobEntryForm;

/// Builder for `MachineRow`. Every optional field starts absent.
pub struct MachineBuilder {
    machine: MachineRow,
}

impl MachineBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            machine: MachineRow {
                id: id.to_string(),
                ..Default::default()
            },
        }
    }

    pub fn fleet_number(mut self, value: &str) -> Self {
        self.machine.fleet_number = Some(value.to_string());
        self
    }

    pub fn customer(mut self, value: &str) -> Self {
        self.machine.customer = Some(value.to_string());
        self
    }

    pub fn model(mut self, value: &str) -> Self {
        self.machine.model = Some(value.to_string());
        self
    }

    pub fn site(mut self, address: &str, suburb: &str, city: &str) -> Self {
        self.machine.site_address = Some(address.to_string());
        self.machine.site_address_suburb = Some(suburb.to_string());
        self.machine.site_address_city = Some(city.to_string());
        self
    }

    pub fn tyres(mut self, front: &str, rear: &str) -> Self {
        self.machine.front_tyres = Some(front.to_string());
        self.machine.rear_tyres = Some(rear.to_string());
        self
    }

    pub fn build(self) -> MachineRow {
        self.machine
    }
}

/// A contact with an actual name, phone and email.
pub fn contact(id: &str, name: &str, phone: &str, email: &str) -> SiteContactRow {
    SiteContactRow {
        id: id.to_string(),
        actual_name: Some(name.to_string()),
        name: Some(name.to_string()),
        phone: Some(phone.to_string()),
        email: Some(email.to_string()),
        created_on: None,
    }
}

pub fn lookup_found(machine: MachineRow, contacts: Vec<SiteContactRow>) -> MachineLookupResponse {
    MachineLookupResponse {
        machine: Some(machine),
        contacts,
    }
}

pub fn lookup_not_found() -> MachineLookupResponse {
    MachineLookupResponse::default()
}

/// Builder for raw job records as the jobs endpoint returns them.
pub struct RawJobBuilder {
    fields: Map<String, Value>,
}

impl RawJobBuilder {
    pub fn new(id: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("gr_jobsid".to_string(), json!(id));
        Self { fields }
    }

    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn status(self, status: &str) -> Self {
        self.field("gr_status", status)
    }

    pub fn job_number(self, value: &str) -> Self {
        self.field("gr_jobnumber", value)
    }

    /// Raw date plus its display-formatted variant.
    pub fn date(self, raw: &str, formatted: &str) -> Self {
        self.field("gr_date", raw)
            .field("gr_date@OData.Community.Display.V1.FormattedValue", formatted)
    }

    pub fn technician(self, value: &str) -> Self {
        self.field("gr_technician", value)
    }

    pub fn fleet_number(self, value: &str) -> Self {
        self.field("gr_fleetnumbersnap", value)
    }

    pub fn customer(self, value: &str) -> Self {
        self.field("gr_customersnap", value)
    }

    pub fn description(self, value: &str) -> Self {
        self.field("gr_description", value)
    }

    pub fn contact(self, name: &str, phone: &str) -> Self {
        self.field("gr_contactnamesnap", name)
            .field("gr_contactphonesnap", phone)
    }

    pub fn build(self) -> RawJob {
        RawJob(self.fields)
    }
}

/// A form that passes validation.
pub fn valid_form() -> JobEntryForm {
    JobEntryForm {
        fleet_number: "FL-42".to_string(),
        date: "2024-01-05".to_string(),
        description: "Fix pump".to_string(),
        job_type: "Breakdown".to_string(),
        ..Default::default()
    }
}
