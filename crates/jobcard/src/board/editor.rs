//! Inline row editing for job tables.
//!
//! One row at a time may be in edit mode. Within it, one cell at a time is
//! active and receives input. Edits accumulate in a [`JobDraft`] until the
//! row is saved or cancelled.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::JobListItem;

use super::columns::JobField;

/// The cell currently taking input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveCell {
    pub row_id: String,
    pub field: JobField,
}

/// Edits layered over one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobDraft {
    base: JobListItem,
    edits: BTreeMap<JobField, String>,
}

impl JobDraft {
    pub fn new(base: JobListItem) -> Self {
        Self {
            base,
            edits: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.base.id
    }

    pub fn base(&self) -> &JobListItem {
        &self.base
    }

    /// Records a value. Setting a field back to its original value drops the edit.
    pub fn set(&mut self, field: JobField, value: impl Into<String>) {
        let value = value.into();
        if field.get(&self.base) == value {
            self.edits.remove(&field);
        } else {
            self.edits.insert(field, value);
        }
    }

    pub fn get(&self, field: JobField) -> &str {
        self.edits
            .get(&field)
            .map(String::as_str)
            .unwrap_or_else(|| field.get(&self.base))
    }

    /// The row as it would look after saving.
    pub fn current(&self) -> JobListItem {
        let mut row = self.base.clone();
        for (field, value) in &self.edits {
            field.set(&mut row, value.clone());
        }
        row
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn changed_fields(&self) -> impl Iterator<Item = JobField> + '_ {
        self.edits.keys().copied()
    }

    pub fn into_patch(self) -> JobPatch {
        JobPatch {
            id: self.base.id,
            changes: self.edits,
        }
    }
}

/// Changed fields of one job, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobPatch {
    pub id: String,
    pub changes: BTreeMap<JobField, String>,
}

impl JobPatch {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            changes: BTreeMap::new(),
        }
    }

    pub fn with(mut self, field: JobField, value: impl Into<String>) -> Self {
        self.changes.insert(field, value.into());
        self
    }

    pub fn get(&self, field: JobField) -> Option<&str> {
        self.changes.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Writes the changes into a local row.
    pub fn apply_to(&self, job: &mut JobListItem) {
        for (field, value) in &self.changes {
            field.set(job, value.clone());
        }
    }
}

/// Edit state shared by all tables of one page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableEditor {
    draft: Option<JobDraft>,
    active_cell: Option<ActiveCell>,
}

impl TableEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.draft.as_ref().map(JobDraft::id)
    }

    pub fn is_editing(&self, row_id: &str) -> bool {
        self.editing_id() == Some(row_id)
    }

    pub fn draft(&self) -> Option<&JobDraft> {
        self.draft.as_ref()
    }

    pub fn active_cell(&self) -> Option<&ActiveCell> {
        self.active_cell.as_ref()
    }

    pub fn can_begin_edit(&self) -> bool {
        self.draft.is_none()
    }

    /// Puts `row` into edit mode with a copy of it as the draft.
    ///
    /// Returns `false`, changing nothing, while another row is being edited.
    pub fn begin_edit(&mut self, row: &JobListItem) -> bool {
        if !self.can_begin_edit() {
            return false;
        }
        self.draft = Some(JobDraft::new(row.clone()));
        self.active_cell = None;
        true
    }

    /// Activates a cell of the editing row. The status selector is never
    /// activated this way.
    pub fn activate_cell(&mut self, row_id: &str, field: JobField) -> bool {
        if !self.is_editing(row_id) || field == JobField::Status {
            return false;
        }
        self.active_cell = Some(ActiveCell {
            row_id: row_id.to_string(),
            field,
        });
        true
    }

    pub fn is_active(&self, row_id: &str, field: JobField) -> bool {
        self.active_cell
            .as_ref()
            .is_some_and(|cell| cell.row_id == row_id && cell.field == field)
    }

    /// Input into the active cell. Ignored when no cell is active.
    pub fn input(&mut self, value: impl Into<String>) -> bool {
        let (Some(cell), Some(draft)) = (&self.active_cell, &mut self.draft) else {
            return false;
        };
        draft.set(cell.field, value);
        true
    }

    /// Focus left the active cell. The row stays in edit mode.
    pub fn blur(&mut self) {
        self.active_cell = None;
    }

    /// Convenience for activate, input, blur.
    pub fn set_cell(&mut self, row_id: &str, field: JobField, value: impl Into<String>) -> bool {
        if !self.activate_cell(row_id, field) {
            return false;
        }
        self.input(value);
        self.blur();
        true
    }

    /// What a table should render for `row`: the draft while it is editing.
    pub fn row_view(&self, row: &JobListItem) -> JobListItem {
        match &self.draft {
            Some(draft) if draft.id() == row.id => draft.current(),
            _ => row.clone(),
        }
    }

    /// Leaves edit mode, discarding the draft.
    pub fn cancel(&mut self) {
        self.draft = None;
        self.active_cell = None;
    }

    /// Leaves edit mode, returning the changes to save, if any.
    pub fn finish(&mut self) -> Option<JobPatch> {
        self.active_cell = None;
        self.draft
            .take()
            .filter(|draft| !draft.is_empty())
            .map(JobDraft::into_patch)
    }
}
