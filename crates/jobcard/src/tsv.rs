//! Tab-separated rows for pasting into the job book spreadsheet.

use std::process::Stdio;

use log::{debug, warn};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Replaces characters that would break a single spreadsheet row.
pub fn escape_for_tsv(value: &str) -> String {
    value.replace('\t', " ").replace("\r\n", " ").replace('\n', " ")
}

/// Joins escaped values with tabs.
pub fn tsv_row<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(|v| escape_for_tsv(v.as_ref()))
        .collect::<Vec<_>>()
        .join("\t")
}

/// How a row reached the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Written to the system clipboard by the named tool.
    Clipboard(&'static str),
    /// No clipboard tool worked; the row is returned for manual selection.
    ManualSelection(String),
}

/// Clipboard commands tried in order.
const CLIPBOARD_COMMANDS: [(&str, &[&str]); 5] = [
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("clip", &[]),
];

/// Copies a row of values to the system clipboard as TSV.
///
/// Hands the row back for manual selection when no clipboard tool is usable.
pub async fn copy_row_to_clipboard<S: AsRef<str>>(values: &[S]) -> CopyOutcome {
    let row = tsv_row(values);

    for (program, args) in CLIPBOARD_COMMANDS {
        match write_with(program, args, &row).await {
            Ok(()) => {
                debug!("Copied row to clipboard via {}", program);
                return CopyOutcome::Clipboard(program);
            }
            Err(e) => debug!("Clipboard via {} unavailable: {}", program, e),
        }
    }

    warn!("No clipboard available, row left for manual selection");
    CopyOutcome::ManualSelection(row)
}

async fn write_with(program: &str, args: &[&str], text: &str) -> std::io::Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes()).await?;
        stdin.shutdown().await?;
    }

    let status = child.wait().await?;
    if status.success() {
        Ok(())
    } else {
        Err(std::io::Error::other(format!("{} exited with {}", program, status)))
    }
}
