//! Cleaning pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Text**: blank cells, control characters, edge special characters, encoding
//! 2. **Format**: percentages, dates, numeric coercion and casts, title case, countries
//! 3. **Impute**: missingness analysis and filling per decision
//! 4. **Rescale**: optional min-max normalization
//!
//! The table after stage 2 is the *interim* snapshot, the table after stage 4
//! the *clean* one. Any structural error halts the run; the error names the
//! stage and no table is returned.

use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use cacao_model::{PassKind, PassReport, PipelineConfig, Table};
use cacao_transform::{
    MissingnessAnalysis, QualitySummary, analyze_missingness, apply_decisions, cast_columns,
    coerce_numeric, fix_encoding_issues, normalize_dates, normalize_min_max, percent_to_float,
    standardize_blank_cells, strip_control_chars, strip_edge_special_chars, title_case_columns,
    uniformize_countries,
};

/// Diagnostics of a full run, suitable for JSON export.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    /// One report per pass, in execution order.
    pub passes: Vec<PassReport>,
    pub analysis: MissingnessAnalysis,
    pub interim_quality: QualitySummary,
    pub clean_quality: QualitySummary,
}

impl PipelineReport {
    pub fn pass(&self, kind: PassKind) -> Option<&PassReport> {
        self.passes.iter().find(|report| report.pass == kind)
    }
}

/// Tables and diagnostics produced by [`run_pipeline`].
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub interim: Table,
    pub clean: Table,
    pub report: PipelineReport,
}

/// Result of the stages that lead to the interim snapshot.
#[derive(Debug, Clone)]
pub struct InterimResult {
    pub table: Table,
    pub passes: Vec<PassReport>,
}

// ============================================================================
// Stage 1: Text
// ============================================================================

/// Runs the text cleaners; none of them can fail.
pub fn clean_text(raw: &Table, config: &PipelineConfig) -> InterimResult {
    let (table, blank) = standardize_blank_cells(raw);
    let (table, control) = strip_control_chars(&table);
    let (table, special) = strip_edge_special_chars(&table, &config.special_chars);
    let (table, encoding) = fix_encoding_issues(&table, &config.encoding);
    InterimResult {
        table,
        passes: vec![blank, control, special, encoding],
    }
}

// ============================================================================
// Stage 2: Format
// ============================================================================

/// Normalizes formats and types of the text-cleaned table.
///
/// Numeric and cast columns that are absent are skipped with a notice, like
/// every other per-column pass.
pub fn normalize_formats(table: &Table, config: &PipelineConfig) -> Result<InterimResult> {
    let (table, percent) = percent_to_float(table, &config.format);
    let (mut table, dates) = normalize_dates(&table, &config.format);
    let mut passes = vec![percent, dates];

    let mut numeric = PassReport::new(PassKind::NumericCoercion);
    for column in &config.casts.numeric_columns {
        if !table.has_column(column) {
            warn!(column = %column, "numeric column not found");
            numeric.skipped_column(column);
            continue;
        }
        let (next, step) =
            coerce_numeric(&table, column).with_context(|| format!("coerce {column}"))?;
        merge_into(&mut numeric, step);
        table = next;
    }
    passes.push(numeric);

    let mut cast = PassReport::new(PassKind::Cast);
    for spec in &config.casts.casts {
        if !table.has_column(&spec.column) {
            warn!(column = %spec.column, "cast column not found");
            cast.skipped_column(&spec.column);
            continue;
        }
        let (next, step) = cast_columns(
            &table,
            std::slice::from_ref(&spec.column),
            spec.target,
            config.casts.mode,
        )
        .with_context(|| format!("cast {} to {}", spec.column, spec.target))?;
        merge_into(&mut cast, step);
        table = next;
    }
    passes.push(cast);

    let (table, titles) = title_case_columns(&table, &config.format);
    let (table, countries) = uniformize_countries(&table, &config.countries);
    passes.push(titles);
    passes.push(countries);
    Ok(InterimResult { table, passes })
}

fn merge_into(target: &mut PassReport, step: PassReport) {
    for change in step.columns {
        target.push_column(change);
    }
    target.notices.extend(step.notices);
}

/// Stages 1 and 2: from the raw extraction to the interim table.
pub fn prepare_interim(raw: &Table, config: &PipelineConfig) -> Result<InterimResult> {
    let text = info_span!("text").in_scope(|| {
        let start = Instant::now();
        let result = clean_text(raw, config);
        debug!(
            rows = result.table.height(),
            changed = total_changed(&result.passes),
            duration_ms = start.elapsed().as_millis(),
            "text cleaning complete"
        );
        result
    });

    let formats = info_span!("format").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let result = normalize_formats(&text.table, config).context("format stage")?;
        debug!(
            rows = result.table.height(),
            changed = total_changed(&result.passes),
            missing_introduced = total_missing_introduced(&result.passes),
            duration_ms = start.elapsed().as_millis(),
            "format normalization complete"
        );
        Ok(result)
    })?;

    let mut passes = text.passes;
    passes.extend(formats.passes);
    Ok(InterimResult {
        table: formats.table,
        passes,
    })
}

// ============================================================================
// Full run
// ============================================================================

/// Runs every stage on `raw` in the fixed order.
///
/// `raw` itself is never modified.
pub fn run_pipeline(raw: &Table, config: &PipelineConfig) -> Result<PipelineOutput> {
    config.validate().context("invalid pipeline configuration")?;
    let run_start = Instant::now();

    let InterimResult {
        table: interim,
        mut passes,
    } = prepare_interim(raw, config)?;
    let interim_quality = QualitySummary::of(&interim);

    let (imputed, analysis) = info_span!("impute").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let analysis =
            analyze_missingness(&interim, &config.imputation).context("imputation stage")?;
        let (imputed, report) = apply_decisions(&interim, &analysis.decisions, &config.imputation)
            .context("imputation stage")?;
        for decision in &analysis.decisions {
            debug!(
                column = decision.column(),
                proportion_missing = decision.report.proportion_missing,
                strategy = %decision.effective_strategy(),
                "imputation applied"
            );
        }
        debug!(
            filled = report.total_changed(),
            skipped = analysis.skipped.len(),
            duration_ms = start.elapsed().as_millis(),
            "imputation complete"
        );
        passes.push(report);
        Ok((imputed, analysis))
    })?;

    let clean = info_span!("rescale").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let mut current = imputed;
        for column in &config.normalize_columns {
            let (next, report) = normalize_min_max(&current, column)
                .with_context(|| format!("rescale stage: normalize {column}"))?;
            passes.push(report);
            current = next;
        }
        debug!(
            columns = config.normalize_columns.len(),
            duration_ms = start.elapsed().as_millis(),
            "rescale complete"
        );
        Ok(current)
    })?;
    let clean_quality = QualitySummary::of(&clean);

    info!(
        rows = clean.height(),
        passes = passes.len(),
        missing_before = interim_quality.total_missing(),
        missing_after = clean_quality.total_missing(),
        duration_ms = run_start.elapsed().as_millis(),
        "pipeline complete"
    );
    Ok(PipelineOutput {
        interim,
        clean,
        report: PipelineReport {
            passes,
            analysis,
            interim_quality,
            clean_quality,
        },
    })
}

fn total_changed(passes: &[PassReport]) -> usize {
    passes.iter().map(PassReport::total_changed).sum()
}

fn total_missing_introduced(passes: &[PassReport]) -> usize {
    passes.iter().map(PassReport::total_missing_introduced).sum()
}
