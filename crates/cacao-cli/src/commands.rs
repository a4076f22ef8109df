use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use cacao_cli::config::{ConfigOverrides, load_config};
use cacao_cli::pipeline::{prepare_interim, run_pipeline};
use cacao_ingest::{Snapshot, read_csv_table, save_snapshot};
use cacao_model::{CastMode, Table, schema};
use cacao_transform::{QualitySummary, analyze_missingness};

use crate::cli::{AnalyzeArgs, CastModeArg, CleanArgs, InputArgs, PipelineArgs};
use crate::types::{AnalyzeResult, CheckResult, CleanResult, ColumnSummary, ColumnsResult};

pub fn run_clean(args: &CleanArgs) -> Result<CleanResult> {
    let run_span = info_span!("clean", input = %args.input.display());
    let _run_guard = run_span.enter();

    let mut overrides = overrides_from(&args.pipeline);
    overrides.normalize_columns = args.normalize.clone();
    let config = load_config(args.pipeline.config.as_deref(), &overrides)?;
    let raw = read_input(&args.input)?;

    let output = run_pipeline(&raw, &config)?;

    let mut snapshots = Vec::new();
    if args.dry_run {
        info!("dry run, snapshots not written");
    } else {
        let output_start = Instant::now();
        for (snapshot, table) in [
            (Snapshot::Raw, &raw),
            (Snapshot::Interim, &output.interim),
            (Snapshot::Processed, &output.clean),
        ] {
            let path = save_snapshot(table, snapshot, &args.output_dir)
                .with_context(|| format!("write {snapshot} snapshot"))?;
            snapshots.push((snapshot, path));
        }
        debug!(
            output_dir = %args.output_dir.display(),
            duration_ms = output_start.elapsed().as_millis(),
            "snapshots written"
        );
    }

    if let Some(path) = &args.report_json {
        let json = serde_json::to_string_pretty(&output.report)
            .context("Failed to serialize pipeline report")?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
    }

    Ok(CleanResult {
        input: args.input.clone(),
        output_dir: args.output_dir.clone(),
        raw_rows: raw.height(),
        snapshots,
        report_json: args.report_json.clone(),
        report: output.report,
    })
}

pub fn run_analyze(args: &AnalyzeArgs) -> Result<AnalyzeResult> {
    let config = load_config(args.pipeline.config.as_deref(), &overrides_from(&args.pipeline))?;
    let raw = read_input(&args.input)?;
    let interim = prepare_interim(&raw, &config)?;
    let analysis = analyze_missingness(&interim.table, &config.imputation)
        .context("missingness analysis")?;
    Ok(AnalyzeResult {
        input: args.input.clone(),
        rows: interim.table.height(),
        analysis,
    })
}

pub fn run_check(args: &InputArgs) -> Result<CheckResult> {
    let table = read_input(&args.input)?;
    Ok(CheckResult {
        input: args.input.clone(),
        quality: QualitySummary::of(&table),
    })
}

pub fn run_columns(args: &InputArgs) -> Result<ColumnsResult> {
    let table = read_input(&args.input)?;
    let columns = table
        .columns()
        .iter()
        .map(|column| ColumnSummary {
            name: column.name.clone(),
            kind: column.kind,
            role: schema::column_role(&column.name),
            missing: column.missing_count(),
        })
        .collect();
    let absent = schema::EXPECTED_COLUMNS
        .iter()
        .copied()
        .filter(|name| !table.has_column(name))
        .collect();
    Ok(ColumnsResult {
        input: args.input.clone(),
        rows: table.height(),
        columns,
        absent,
    })
}

fn read_input(path: &Path) -> Result<Table> {
    let start = Instant::now();
    let table = read_csv_table(path).with_context(|| format!("read {}", path.display()))?;
    debug!(
        path = %path.display(),
        rows = table.height(),
        columns = table.width(),
        duration_ms = start.elapsed().as_millis(),
        "input loaded"
    );
    Ok(table)
}

fn overrides_from(args: &PipelineArgs) -> ConfigOverrides {
    ConfigOverrides {
        mode_threshold: args.mode_threshold,
        drop_threshold: args.drop_threshold,
        cast_mode: args.cast_mode.map(|mode| match mode {
            CastModeArg::Strict => CastMode::Strict,
            CastModeArg::Coerce => CastMode::Coerce,
        }),
        normalize_columns: Vec::new(),
    }
}
