//! Missing-value handling.
//!
//! [`analyze_missingness`] inspects columns and recommends a fill strategy
//! without touching the table. The fill functions and [`apply_decisions`]
//! are the only passes allowed to turn a missing cell into a value.

mod decision;
mod fill;

pub use decision::{
    ImputationDecision, MissingnessAnalysis, MissingnessReport, Rationale, analyze_column,
    analyze_missingness, decide,
};
pub use fill::{apply_decisions, impute_with_mode, impute_with_sentinel};
