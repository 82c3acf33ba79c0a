//! # Editor
//!
//! Interactive editing state: the [`EditorSession`] reducer and the
//! percentage-space drag [`Positioner`] it drives.

pub mod drag;
pub mod session;

pub use drag::{DragCommit, Positioner};
pub use session::{Controls, Edit, EditorSession, ElementControls, ExportJob, Notice, NoticeLevel, Ticket};
