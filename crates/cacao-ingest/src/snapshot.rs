//! Raw, interim and processed snapshots of a pipeline run.

use std::fmt;
use std::path::{Path, PathBuf};

use cacao_model::Table;
use tracing::info;

use crate::csv::write_csv_table;
use crate::error::{IngestError, Result};

/// Checkpoint at which a table is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Snapshot {
    /// Straight from extraction, before any cleaning.
    Raw,
    /// After text and format cleaning, before imputation.
    Interim,
    /// Final cleaned table.
    Processed,
}

impl Snapshot {
    pub const ALL: [Snapshot; 3] = [Self::Raw, Self::Interim, Self::Processed];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Interim => "interim",
            Self::Processed => "processed",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Raw => "cacao_raw.csv",
            Self::Interim => "cacao_interim.csv",
            Self::Processed => "cacao_clean.csv",
        }
    }

    /// `<root>/<raw|interim|processed>/<file name>`.
    pub fn path(self, root: &Path) -> PathBuf {
        root.join(self.as_str()).join(self.file_name())
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Writes `table` to its snapshot location under `root` and returns the path.
///
/// Tables without rows or columns are refused.
pub fn save_snapshot(table: &Table, snapshot: Snapshot, root: &Path) -> Result<PathBuf> {
    if table.is_empty() || table.width() == 0 {
        return Err(IngestError::EmptyTable {
            snapshot: snapshot.as_str(),
        });
    }
    let path = snapshot.path(root);
    write_csv_table(table, &path)?;
    info!(
        snapshot = %snapshot,
        path = %path.display(),
        rows = table.height(),
        "snapshot saved"
    );
    Ok(path)
}
