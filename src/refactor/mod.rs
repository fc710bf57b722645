//! Applying rewrites
//!
//! [`fix_source`] runs the rule repeatedly over one source text;
//! [`FileEditor`] drives it over files on disk.

mod editor;
mod fixer;

pub use editor::{EditOutcome, FileEditor, FileFix};
pub use fixer::{apply_edits, fix_source, FixResult};
