//! Cleaning passes for the cacao review table.
//!
//! Every pass takes a borrowed [`Table`](cacao_model::Table) and returns a new
//! table together with a [`PassReport`](cacao_model::PassReport); the input is
//! never modified and row count and order are always preserved.
//!
//! - **convert**: safe text-to-number conversion
//! - **blank**: blank-cell standardization
//! - **text**: control characters, edge special characters, encoding problems
//! - **format**: percent, date and title-case normalization
//! - **cast**: column type casting and numeric coercion
//! - **country**: country-name uniformization
//! - **imputation**: missingness analysis, decision and filling
//! - **normalize**: min-max scaling
//! - **quality**: duplicate and missing-value counts

pub mod blank;
pub mod cast;
mod changes;
pub mod convert;
pub mod country;
pub mod format;
pub mod imputation;
pub mod normalize;
pub mod quality;
pub mod text;

pub use blank::standardize_blank_cells;
pub use cast::{cast_columns, coerce_numeric};
pub use convert::{is_placeholder, safe_float};
pub use country::uniformize_countries;
pub use format::{normalize_dates, percent_to_float, title_case, title_case_columns};
pub use imputation::{
    ImputationDecision, MissingnessAnalysis, MissingnessReport, Rationale, analyze_missingness,
    apply_decisions, impute_with_mode, impute_with_sentinel,
};
pub use normalize::normalize_min_max;
pub use quality::{QualitySummary, count_duplicates, count_missing};
pub use text::{fix_encoding_issues, strip_control_chars, strip_edge_special_chars};
