//! Report persistence
//!
//! The persisted report is indented JSON so operators can diff successive
//! cycles. Saves replace the file atomically via a sibling temp file; loads
//! distinguish "no report yet" from real I/O failure and validate the parsed
//! report before returning it.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::report::MeshReport;
use crate::{Error, Result};

/// Persists the current mesh report at a fixed path
#[derive(Debug, Clone)]
pub struct ReportStore {
    path: PathBuf,
}

impl ReportStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the report, fully replacing any prior one.
    ///
    /// Writes to a temp file in the same directory and renames it into
    /// place, so a concurrent reader never observes a partial file.
    pub fn save(&self, report: &MeshReport) -> Result<()> {
        let content = serde_json::to_string_pretty(report)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, &self.path)?;

        info!(path = %self.path.display(), peers = report.peers_total, "saved mesh report");
        Ok(())
    }

    /// Load the last persisted report.
    ///
    /// A missing file is the expected first-run state and returns
    /// `Ok(None)`. Permission problems and any other read, parse or
    /// validation failure abort the load; a partially valid report is never
    /// returned. Aggregate counts and SI display strings are re-derived
    /// from the peer sequence rather than trusted as persisted.
    pub fn load(&self) -> Result<Option<MeshReport>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no previous report");
                return Ok(None);
            }
            Err(err) if err.kind() == ErrorKind::PermissionDenied => {
                return Err(Error::PermissionDenied {
                    path: self.path.display().to_string(),
                });
            }
            Err(err) => return Err(err.into()),
        };

        let mut report: MeshReport = serde_json::from_str(&raw)?;
        report.validate()?;
        report.rederive();

        Ok(Some(report))
    }
}
