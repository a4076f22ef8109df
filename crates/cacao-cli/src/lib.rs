//! Library side of the `cacao` command: the pipeline orchestrator,
//! configuration loading and logging setup.

pub mod config;
pub mod logging;
pub mod pipeline;
