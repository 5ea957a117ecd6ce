//! Job list, ops board and inline edits.

use anyhow::{anyhow, bail, Result};
use log::info;
use serde::Serialize;

use jobcard::board::{basic_columns, full_columns};
use jobcard::tsv::{self, CopyOutcome};
use jobcard::{JobBoard, JobField, JobListItem};

use super::emit;
use crate::render;
use crate::state::AppState;

async fn loaded_board(state: &AppState) -> Result<JobBoard> {
    let mut board = JobBoard::new();
    board.load(&state.backend).await.map_err(|e| anyhow!(e))?;
    Ok(board)
}

pub async fn list(state: &AppState, full: bool, json: bool) -> Result<()> {
    let board = loaded_board(state).await?;
    let columns = if full { full_columns() } else { basic_columns() };

    emit(Ok(board.jobs().to_vec()), json, |jobs: &Vec<JobListItem>| {
        render::print_table(&columns, jobs.iter());
    })
}

pub async fn board(state: &AppState, json: bool) -> Result<()> {
    let board = loaded_board(state).await?;
    let columns = basic_columns();

    emit(Ok(board.lanes()), json, |lanes| {
        for lane in lanes {
            render::print_lane(lane, &columns);
        }
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EditResult {
    id: String,
    sent: bool,
    job: Option<JobListItem>,
}

/// Edits cells of one row the way the board does: enter edit mode, type into
/// each cell, save.
pub async fn edit(state: &AppState, id: &str, cells: Vec<(JobField, String)>, json: bool) -> Result<()> {
    if cells.iter().any(|(field, _)| *field == JobField::Status) {
        bail!("Status is changed with `jobcard status`, not as a cell edit");
    }

    let mut board = loaded_board(state).await?;
    if !board.begin_edit(id)? {
        bail!("Job '{}' is in a read-only lane", id);
    }
    for (field, value) in cells {
        board.activate_cell(id, field);
        board.input(value);
        board.blur();
    }

    let result = board.save_edit(&state.backend).await.map(|sent| EditResult {
        id: id.to_string(),
        sent,
        job: board.job(id).cloned(),
    });

    emit(result, json, |result| {
        if result.sent {
            println!("Saved job {}", result.id);
        } else {
            println!("No changes to save for job {}", result.id);
        }
    })
}

pub async fn status(state: &AppState, id: &str, status: &str, json: bool) -> Result<()> {
    let mut board = loaded_board(state).await?;

    let result = board
        .set_status(&state.backend, id, status)
        .await
        .map(|_| EditResult {
            id: id.to_string(),
            sent: true,
            job: board.job(id).cloned(),
        });

    emit(result, json, |result| {
        let status = result.job.as_ref().map(|job| job.status.as_str()).unwrap_or("?");
        println!("Job {} is now {}", result.id, status);
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CopyResult {
    row: Vec<String>,
    clipboard: Option<&'static str>,
}

pub async fn copy(state: &AppState, id: &str, full: bool, json: bool) -> Result<()> {
    let board = loaded_board(state).await?;
    let row = if full {
        board.export_full_row(id)
    } else {
        board.export_row(id)
    }
    .ok_or_else(|| anyhow!("Job '{}' not found", id))?;

    let clipboard = match tsv::copy_row_to_clipboard(&row).await {
        CopyOutcome::Clipboard(tool) => {
            info!("Copied job {} via {}", id, tool);
            Some(tool)
        }
        CopyOutcome::ManualSelection(_) => None,
    };

    emit(Ok(CopyResult { row, clipboard }), json, |result| match result.clipboard {
        Some(tool) => println!("Copied job book row to the clipboard ({})", tool),
        None => println!("{}", tsv::tsv_row(&result.row)),
    })
}
