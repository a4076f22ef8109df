//! Data model for the cacao cleaning pipeline.
//!
//! - **table**: [`Table`], [`Column`] and the tagged [`CellValue`]
//! - **options**: per-pass configuration with documented defaults
//! - **report**: diagnostics returned by every pass
//! - **schema**: canonical column names of the review dataset

pub mod error;
pub mod options;
pub mod report;
pub mod schema;
pub mod table;

pub use error::{CleanError, Result};
pub use options::{
    CastMode, CastOptions, CastSpec, CountryOptions, EncodingFix, EncodingOptions, FormatOptions,
    ImputationOptions, ImputationStrategy, PipelineConfig, SpecialCharOptions,
};
pub use report::{ChangeExample, ColumnChange, MAX_EXAMPLES, PassKind, PassReport};
pub use table::{CellKey, CellValue, Column, ColumnType, Table};
