//! Filling the form from a row copied out of the job book spreadsheet.

use crate::dates;

use super::form::{FormField, JobEntryForm};

/// Spreadsheet column order of a job book row.
const PASTE_COLUMNS: [FormField; 11] = [
    FormField::JobNumber,
    FormField::Date,
    FormField::Technician,
    FormField::Model,
    FormField::FleetNumber,
    FormField::Customer,
    FormField::Description,
    FormField::SiteAddress,
    FormField::SiteAddressSuburb,
    FormField::SiteAddressCity,
    FormField::CustomerPo,
];

/// Fields found in a pasted row. Only these are written to the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPatch {
    values: Vec<(FormField, String)>,
}

impl FormPatch {
    pub fn get(&self, field: FormField) -> Option<&str> {
        self.values
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.values.iter().map(|(f, _)| *f)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn fleet_number(&self) -> Option<&str> {
        self.get(FormField::FleetNumber)
    }

    pub fn apply(&self, form: &mut JobEntryForm) {
        for (field, value) in &self.values {
            form.set(*field, value.as_str());
        }
    }
}

/// Trims surrounding whitespace but keeps tabs, which carry column positions.
fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() && c != '\t')
}

/// Parses pasted spreadsheet text into a patch.
///
/// The last non-blank line is the data row, so a copied header row is
/// ignored. Cells map positionally; blank cells are left out of the patch.
/// Returns `None` when there is nothing to paste.
pub fn parse_excel_row(text: &str) -> Option<FormPatch> {
    let row = text
        .lines()
        .map(trim_line)
        .rev()
        .find(|line| !line.trim().is_empty())?;

    let values = PASTE_COLUMNS
        .iter()
        .zip(row.split('\t'))
        .filter_map(|(field, cell)| {
            let cell = cell.trim();
            if cell.is_empty() {
                return None;
            }
            let value = if *field == FormField::Date {
                dates::to_iso_date_only(cell)
            } else {
                cell.to_string()
            };
            Some((*field, value))
        })
        .collect();

    Some(FormPatch { values })
}
