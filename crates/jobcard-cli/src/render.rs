//! Plain-text rendering of forms, tables and lanes.

use jobcard::board::LaneView;
use jobcard::entry::{FormField, MachineContacts};
use jobcard::{JobColumn, JobEntryForm, JobListItem};

/// Widest a column is allowed to grow in terminal output.
const MAX_CELL_WIDTH: usize = 40;

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn pad(value: &str, width: usize) -> String {
    let len = value.chars().count();
    format!("{}{}", value, " ".repeat(width.saturating_sub(len)))
}

/// Renders rows as an aligned table with a header line.
pub fn table<'a, I>(columns: &[JobColumn], jobs: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a JobListItem>,
{
    let rows: Vec<Vec<String>> = jobs
        .into_iter()
        .map(|job| {
            columns
                .iter()
                .map(|column| truncate(&column.display(job), MAX_CELL_WIDTH))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(column.label.chars().count()))
                .max()
                .unwrap_or(0)
                .min(MAX_CELL_WIDTH)
        })
        .collect();

    let line = |cells: Vec<String>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad(cell, *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header = columns
        .iter()
        .map(|column| truncate(column.label, MAX_CELL_WIDTH))
        .collect();
    let mut lines = vec![line(header)];
    lines.extend(rows.into_iter().map(line));
    lines
}

pub fn print_table<'a, I>(columns: &[JobColumn], jobs: I)
where
    I: IntoIterator<Item = &'a JobListItem>,
{
    for line in table(columns, jobs) {
        println!("{}", line);
    }
}

pub fn print_lane(lane: &LaneView<'_>, columns: &[JobColumn]) {
    let access = if lane.lane.editable { "" } else { " (read-only)" };
    println!("== {} [{}]{} ==", lane.lane.title, lane.jobs.len(), access);
    if lane.jobs.is_empty() {
        println!("   no jobs");
    } else {
        print_table(columns, lane.jobs.iter().copied());
    }
    println!();
}

pub fn print_form(form: &JobEntryForm) {
    for field in FormField::ALL {
        let value = form.get(field);
        if !value.is_empty() {
            println!("{:<20} {}", field.key(), value);
        }
    }
    if let Some(covered) = form.tyres_covered_in_rental_agreement {
        println!("{:<20} {}", "tyresCovered", if covered { "yes" } else { "no" });
    }
}

pub fn print_contacts(machine: &MachineContacts) {
    if machine.contacts.is_empty() {
        return;
    }
    println!("Site contacts (newest first):");
    for contact in &machine.contacts {
        let marker = if machine.selected_contact_id.as_deref() == Some(contact.id.as_str()) {
            "*"
        } else {
            " "
        };
        println!(
            " {} {}  {}  {}",
            marker,
            contact.id,
            contact.option_label(),
            contact.email.as_deref().unwrap_or("-"),
        );
    }
}
