use std::path::PathBuf;

use cacao_ingest::Snapshot;
use cacao_model::ColumnType;
use cacao_transform::{MissingnessAnalysis, QualitySummary};

use cacao_cli::pipeline::PipelineReport;

#[derive(Debug)]
pub struct CleanResult {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub raw_rows: usize,
    /// Empty on a dry run.
    pub snapshots: Vec<(Snapshot, PathBuf)>,
    pub report_json: Option<PathBuf>,
    pub report: PipelineReport,
}

#[derive(Debug)]
pub struct AnalyzeResult {
    pub input: PathBuf,
    pub rows: usize,
    pub analysis: MissingnessAnalysis,
}

#[derive(Debug)]
pub struct CheckResult {
    pub input: PathBuf,
    pub quality: QualitySummary,
}

#[derive(Debug)]
pub struct ColumnSummary {
    pub name: String,
    pub kind: ColumnType,
    pub role: Option<&'static str>,
    pub missing: usize,
}

#[derive(Debug)]
pub struct ColumnsResult {
    pub input: PathBuf,
    pub rows: usize,
    pub columns: Vec<ColumnSummary>,
    /// Expected columns absent from the file.
    pub absent: Vec<&'static str>,
}
