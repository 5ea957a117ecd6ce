//! Machine lookup and contact hydration for one job-entry form.

use log::{info, warn};
use serde::Serialize;

use crate::api::{FlowBackend, SubmissionId};
use crate::error::{ApiError, ValidationError};
use crate::model::payload::non_blank;
use crate::model::{ContactDetails, CreateContactPayload, MachineRow, SiteContactRow};

use super::form::JobEntryForm;

/// Machine and contact state owned by a single form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MachineContacts {
    pub machine_id: Option<String>,
    pub machine_not_found: bool,
    pub loading_machine: bool,
    /// Newest first, as returned by the lookup.
    pub contacts: Vec<SiteContactRow>,
    /// `None` means the contact fields are a new, manually entered contact.
    pub selected_contact_id: Option<String>,
}

/// Overwrites `slot` only when the backend supplied a value.
fn hydrate(slot: &mut String, value: &Option<String>) {
    if let Some(value) = value {
        slot.clone_from(value);
    }
}

fn fill_contact(form: &mut JobEntryForm, contact: &SiteContactRow) {
    form.site_contact = contact.display_name().unwrap_or_default().to_string();
    form.site_contact_phone = contact.phone.clone().unwrap_or_default();
    form.site_contact_email = contact.email.clone().unwrap_or_default();
}

impl MachineContacts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the form's fleet number and hydrates the form from the result.
    ///
    /// On a match, machine fields the backend provided replace the form's
    /// values, the contact list is replaced and the newest contact selected.
    /// Without a match the form is left as it is.
    pub async fn lookup_and_hydrate<B>(
        &mut self,
        backend: &B,
        form: &mut JobEntryForm,
    ) -> Result<Option<MachineRow>, ApiError>
    where
        B: FlowBackend + ?Sized,
    {
        self.loading_machine = true;
        let result = backend.lookup_machine(&form.fleet_number).await;
        self.loading_machine = false;
        let response = result?;

        let Some(machine) = response.machine else {
            info!("No machine found for fleet number '{}'", form.fleet_number.trim());
            self.machine_id = None;
            self.machine_not_found = true;
            self.contacts.clear();
            self.selected_contact_id = None;
            return Ok(None);
        };

        info!(
            "Machine {} found with {} contact(s)",
            machine.id,
            response.contacts.len()
        );
        self.machine_not_found = false;
        self.machine_id = Some(machine.id.clone());

        hydrate(&mut form.customer, &machine.customer);
        hydrate(&mut form.model, &machine.model);
        hydrate(&mut form.site_address, &machine.site_address);
        hydrate(&mut form.site_address_suburb, &machine.site_address_suburb);
        hydrate(&mut form.site_address_city, &machine.site_address_city);
        hydrate(&mut form.tyre_front, &machine.front_tyres);
        hydrate(&mut form.tyre_rear, &machine.rear_tyres);
        if machine.tyres_covered_in_rental_agreement.is_some() {
            form.tyres_covered_in_rental_agreement = machine.tyres_covered_in_rental_agreement;
        }

        self.contacts = response.contacts;
        match self.contacts.first() {
            Some(newest) => {
                self.selected_contact_id = Some(newest.id.clone());
                fill_contact(form, newest);
            }
            None => {
                self.selected_contact_id = None;
                form.clear_contact_details();
            }
        }

        Ok(Some(machine))
    }

    /// Resolves the contact to attach to a new job.
    ///
    /// A selected contact is returned as is. Otherwise a contact is created
    /// from the form's contact fields, unless they are all blank.
    pub async fn ensure_contact_id<B>(
        &mut self,
        backend: &B,
        form: &JobEntryForm,
        machine_id: &str,
        submission: Option<&SubmissionId>,
    ) -> Result<Option<String>, ApiError>
    where
        B: FlowBackend + ?Sized,
    {
        if let Some(id) = &self.selected_contact_id {
            return Ok(Some(id.clone()));
        }

        let name = non_blank(&form.site_contact);
        let phone = non_blank(&form.site_contact_phone);
        let email = non_blank(&form.site_contact_email);
        if name.is_none() && phone.is_none() && email.is_none() {
            return Ok(None);
        }

        let payload = CreateContactPayload {
            contact: ContactDetails {
                name: name.clone(),
                phone: phone.clone(),
                email: email.clone(),
                machine_id: machine_id.to_string(),
            },
        };
        let created = backend.create_contact(&payload, submission).await?;
        info!("Created contact {} for machine {}", created.contact_id, machine_id);

        self.contacts.insert(
            0,
            SiteContactRow {
                id: created.contact_id.clone(),
                actual_name: name.clone(),
                name,
                phone,
                email,
                created_on: Some(chrono::Utc::now().to_rfc3339()),
            },
        );
        self.selected_contact_id = Some(created.contact_id.clone());

        Ok(Some(created.contact_id))
    }

    /// Picks a contact from the list, or `None` for manual entry.
    ///
    /// Choosing a contact copies its details into the form; choosing manual
    /// entry clears them.
    pub fn select_contact(
        &mut self,
        contact_id: Option<&str>,
        form: &mut JobEntryForm,
    ) -> Result<(), ValidationError> {
        let Some(id) = contact_id.filter(|id| !id.is_empty()) else {
            self.selected_contact_id = None;
            form.clear_contact_details();
            return Ok(());
        };

        let contact = self
            .contacts
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| {
                warn!("Contact {} is not linked to this machine", id);
                ValidationError::new(format!("Unknown contact '{}'", id))
            })?;

        fill_contact(form, contact);
        self.selected_contact_id = Some(contact.id.clone());
        Ok(())
    }

    /// The user edited a contact field: they are now entering a new contact.
    pub fn mark_manual_entry(&mut self) {
        self.selected_contact_id = None;
    }

    pub fn selected_contact(&self) -> Option<&SiteContactRow> {
        let id = self.selected_contact_id.as_deref()?;
        self.contacts.iter().find(|c| c.id == id)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(id: &str, name: &str, phone: &str) -> SiteContactRow {
        SiteContactRow {
            id: id.into(),
            actual_name: Some(name.into()),
            phone: Some(phone.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_select_contact_fills_form() {
        let mut state = MachineContacts {
            contacts: vec![contact("c-1", "Sam", "021"), contact("c-2", "Alex", "022")],
            selected_contact_id: Some("c-1".into()),
            ..Default::default()
        };
        let mut form = JobEntryForm {
            site_contact_email: "old@example.com".into(),
            ..Default::default()
        };

        state.select_contact(Some("c-2"), &mut form).unwrap();
        assert_eq!(state.selected_contact_id.as_deref(), Some("c-2"));
        assert_eq!(form.site_contact, "Alex");
        assert_eq!(form.site_contact_phone, "022");
        assert_eq!(form.site_contact_email, "");
    }

    #[test]
    fn test_select_manual_entry_clears_contact_fields() {
        let mut state = MachineContacts {
            contacts: vec![contact("c-1", "Sam", "021")],
            selected_contact_id: Some("c-1".into()),
            ..Default::default()
        };
        let mut form = JobEntryForm {
            site_contact: "Sam".into(),
            ..Default::default()
        };

        state.select_contact(None, &mut form).unwrap();
        assert_eq!(state.selected_contact_id, None);
        assert!(!form.has_contact_details());
    }

    #[test]
    fn test_select_unknown_contact_is_rejected() {
        let mut state = MachineContacts::new();
        let mut form = JobEntryForm::default();
        assert!(state.select_contact(Some("nope"), &mut form).is_err());
        assert_eq!(state.selected_contact_id, None);
    }

    #[test]
    fn test_mark_manual_entry_and_reset() {
        let mut state = MachineContacts {
            machine_id: Some("m-1".into()),
            contacts: vec![contact("c-1", "Sam", "021")],
            selected_contact_id: Some("c-1".into()),
            ..Default::default()
        };
        assert_eq!(state.selected_contact().map(|c| c.id.as_str()), Some("c-1"));

        state.mark_manual_entry();
        assert_eq!(state.selected_contact_id, None);
        assert_eq!(state.contacts.len(), 1);

        state.reset();
        assert_eq!(state, MachineContacts::default());
    }
}
