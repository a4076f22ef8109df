//! Table ingestion and persistence.
//!
//! # Features
//!
//! - **CSV Loading**: read a CSV file into a [`Table`](cacao_model::Table)
//!   with every column as text
//! - **Frame Conversion**: move tables in and out of Polars DataFrames
//! - **Snapshots**: write the raw, interim and processed tables under one
//!   output directory
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use cacao_ingest::{Snapshot, read_csv_table, save_snapshot};
//!
//! let table = read_csv_table(Path::new("data/flavors_of_cacao.csv"))?;
//! let path = save_snapshot(&table, Snapshot::Raw, Path::new("data"))?;
//! ```

mod csv;
mod error;
mod frame;
mod snapshot;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV ===
pub use csv::{normalize_header, read_csv_table, write_csv_table};

// === DataFrame Conversion ===
pub use frame::{frame_to_table, table_to_frame};

// === Snapshots ===
pub use snapshot::{Snapshot, save_snapshot};
