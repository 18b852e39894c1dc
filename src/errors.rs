// errors.rs
use std::fmt;

use crate::export::ExportError;
use crate::fetch::FetchError;

/// Run-level failures. Each variant names the pipeline stage that aborted,
/// so every diagnostic printed on exit identifies where the run died.
///
/// Fragment-level parse problems are not represented here: a bad fragment is
/// skipped and logged, never fatal.
#[derive(Debug)]
pub enum RunError {
    Fetch(FetchError),
    Parse(String),
    Export(ExportError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Fetch(e) => write!(f, "fetch failed: {e}"),
            RunError::Parse(msg) => write!(f, "parse failed: {msg}"),
            RunError::Export(e) => write!(f, "export failed: {e}"),
        }
    }
}

impl std::error::Error for RunError {}
