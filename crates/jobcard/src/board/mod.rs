//! Job list and ops board: columns, inline editing and save-back.

pub mod columns;
pub mod editor;
pub mod patch;
pub mod view;

pub use columns::{
    basic_columns, board_export_row, full_columns, full_export_row, CellFormat, ColumnKind,
    JobColumn, JobField, SelectOption, EMPTY_CELL,
};
pub use editor::{ActiveCell, JobDraft, JobPatch, TableEditor};
pub use view::{JobBoard, Lane, LaneView, LANES};
