use serde::{Deserialize, Serialize};

/// A machine record as returned by the lookup flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MachineRow {
    #[serde(rename = "gr_machinesid")]
    pub id: String,
    #[serde(rename = "gr_fleetnumber", default)]
    pub fleet_number: Option<String>,
    #[serde(rename = "gr_machinename", default)]
    pub name: Option<String>,
    #[serde(rename = "gr_customer", default)]
    pub customer: Option<String>,
    #[serde(rename = "gr_model", default)]
    pub model: Option<String>,
    #[serde(rename = "gr_siteaddress", default)]
    pub site_address: Option<String>,
    #[serde(rename = "gr_siteaddresssuburb", default)]
    pub site_address_suburb: Option<String>,
    #[serde(rename = "gr_siteaddresscity", default)]
    pub site_address_city: Option<String>,
    #[serde(rename = "gr_fronttyres", default)]
    pub front_tyres: Option<String>,
    #[serde(rename = "gr_reartyres", default)]
    pub rear_tyres: Option<String>,
    #[serde(rename = "gr_tyrecoverinra", default)]
    pub tyres_covered_in_rental_agreement: Option<bool>,
}

/// A site contact linked to a machine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteContactRow {
    #[serde(rename = "gr_sitecontactsid")]
    pub id: String,
    #[serde(rename = "gr_contactactualname", default)]
    pub actual_name: Option<String>,
    #[serde(rename = "gr_contactname", default)]
    pub name: Option<String>,
    #[serde(rename = "gr_contactphone", default)]
    pub phone: Option<String>,
    #[serde(rename = "gr_contactemail", default)]
    pub email: Option<String>,
    #[serde(rename = "createdon", default)]
    pub created_on: Option<String>,
}

impl SiteContactRow {
    /// The person's name: the actual name when recorded, else the contact name.
    pub fn display_name(&self) -> Option<&str> {
        self.actual_name.as_deref().or(self.name.as_deref())
    }

    /// Label for a contact picker, e.g. `Sam Smith (021 555 123)`.
    pub fn option_label(&self) -> String {
        let name = self.display_name().unwrap_or("Unnamed");
        match self.phone.as_deref() {
            Some(phone) if !phone.is_empty() => format!("{} ({})", name, phone),
            _ => name.to_string(),
        }
    }
}

/// Response of the lookup-machine flow. Contacts are ordered newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MachineLookupResponse {
    #[serde(default)]
    pub machine: Option<MachineRow>,
    #[serde(default)]
    pub contacts: Vec<SiteContactRow>,
}
