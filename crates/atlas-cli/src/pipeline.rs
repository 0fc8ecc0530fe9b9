//! Pipeline stages.
//!
//! 1. **Pricing**: clean the plan price export
//! 2. **Indicators**: reshape, merge and normalize the indicator exports
//! 3. **Align**: rewrite economic country names into the pricing convention
//!
//! Each stage builds its frame in memory, then writes it unless the run is a
//! dry run. [`run_all`] hands frames from one stage to the next directly, so
//! a dry run needs no files from earlier stages.

use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{info, info_span};

use atlas_ingest::{
    load_country_metadata, load_indicator_export, load_pricing_export, read_csv_frame,
};
use atlas_model::columns::pricing::COUNTRY;
use atlas_model::{economic_names, indicator_columns, pricing_names};
use atlas_output::write_csv;
use atlas_transform::{
    AlignStats, CoverageReport, CrossDatasetAligner, IndicatorFrame, NormalizeOptions,
    NormalizeStats, PricingOutcome, attach_metadata, clean_pricing, join_coverage,
    merge_indicators, normalize_records, reshape_indicator,
};

use crate::config::PipelineConfig;
use crate::types::{RunSummary, Stage, StageSummary};

// ============================================================================
// Stage 1: Pricing
// ============================================================================

/// Loads and cleans the pricing export.
pub fn build_pricing(config: &PipelineConfig) -> Result<PricingOutcome> {
    let path = config.input_path(&config.inputs.pricing);
    let raw = load_pricing_export(&path).context("load pricing export")?;
    let outcome = clean_pricing(&raw, &pricing_names())
        .with_context(|| format!("clean {}", path.display()))?;
    Ok(outcome)
}

pub fn run_pricing(config: &PipelineConfig, summary: &mut RunSummary) -> Result<DataFrame> {
    let span = info_span!("pricing");
    let _guard = span.enter();
    let start = Instant::now();

    let outcome = build_pricing(config)?;
    let path = config.output_path(&config.outputs.pricing);
    if !summary.dry_run {
        write_csv(&outcome.frame, &path)?;
    }
    info!(
        rows = outcome.frame.height(),
        snapshot_date = ?outcome.snapshot_date,
        filled_prices = outcome.filled_prices,
        duration_ms = start.elapsed().as_millis(),
        "pricing complete"
    );

    summary.snapshot_date = outcome.snapshot_date;
    summary.stages.push(StageSummary {
        stage: Stage::Pricing,
        rows: outcome.frame.height(),
        path,
        written: !summary.dry_run,
    });
    Ok(outcome.frame)
}

// ============================================================================
// Stage 2: Indicators
// ============================================================================

/// Reshapes every configured indicator, merges them with country metadata
/// and normalizes the result.
pub fn build_indicators(config: &PipelineConfig) -> Result<(DataFrame, NormalizeStats)> {
    let mut frames = Vec::with_capacity(config.indicators.len());
    for spec in &config.indicators {
        let path = config.input_path(&spec.file);
        let wide = load_indicator_export(&path, config.preamble_lines)
            .context("load indicator export")?;
        let long = reshape_indicator(&wide, &spec.column)
            .with_context(|| format!("reshape {}", path.display()))?;
        frames.push(IndicatorFrame::new(spec.column.clone(), long));
    }
    let merged = merge_indicators(&frames).context("merge indicators")?;

    let metadata_path = config.input_path(&config.inputs.metadata);
    let metadata = load_country_metadata(&metadata_path).context("load country metadata")?;
    let merged = attach_metadata(merged, &metadata).context("attach country metadata")?;

    let options = NormalizeOptions {
        cutoff_year: config.cutoff_year,
        indicator_columns: indicator_columns(&config.indicators),
    };
    let normalized =
        normalize_records(merged, &economic_names(), &options).context("normalize records")?;
    Ok(normalized)
}

pub fn run_indicators(config: &PipelineConfig, summary: &mut RunSummary) -> Result<DataFrame> {
    let span = info_span!("indicators", cutoff_year = config.cutoff_year);
    let _guard = span.enter();
    let start = Instant::now();

    let (frame, stats) = build_indicators(config)?;
    let path = config.output_path(&config.outputs.indicators);
    if !summary.dry_run {
        write_csv(&frame, &path)?;
    }
    info!(
        rows = frame.height(),
        renamed = stats.renamed,
        duration_ms = start.elapsed().as_millis(),
        "indicators complete"
    );

    summary.normalize = Some(stats);
    summary.stages.push(StageSummary {
        stage: Stage::Indicators,
        rows: frame.height(),
        path,
        written: !summary.dry_run,
    });
    Ok(frame)
}

// ============================================================================
// Stage 3: Align
// ============================================================================

/// Aligned economic frame, rewrite counts and, when pricing data was
/// available, name coverage against it.
#[derive(Debug)]
pub struct AlignResult {
    pub frame: DataFrame,
    pub stats: AlignStats,
    pub coverage: Option<CoverageReport>,
}

pub fn build_alignment(
    config: &PipelineConfig,
    mut economic: DataFrame,
    pricing: Option<&DataFrame>,
) -> Result<AlignResult> {
    let aligner = CrossDatasetAligner::builtin();
    let stats = aligner
        .align_column(&mut economic, &config.align_column)
        .context("align country names")?;
    let coverage = match pricing {
        Some(pricing) => Some(
            join_coverage(&economic, &config.align_column, pricing, COUNTRY)
                .context("compare country names")?,
        ),
        None => None,
    };
    Ok(AlignResult {
        frame: economic,
        stats,
        coverage,
    })
}

/// Runs the align stage. Frames not handed in are read back from the
/// outputs of earlier runs; a missing pricing output only skips the
/// coverage report.
pub fn run_align(
    config: &PipelineConfig,
    economic: Option<DataFrame>,
    pricing: Option<DataFrame>,
    summary: &mut RunSummary,
) -> Result<()> {
    let span = info_span!("align", column = %config.align_column);
    let _guard = span.enter();
    let start = Instant::now();

    let economic = match economic {
        Some(frame) => frame,
        None => {
            let path = config.output_path(&config.outputs.indicators);
            read_csv_frame(&path, 0).context("load cleaned indicators")?
        }
    };
    let pricing = match pricing {
        Some(frame) => Some(frame),
        None => {
            let path = config.output_path(&config.outputs.pricing);
            if path.is_file() {
                Some(read_csv_frame(&path, 0).context("load cleaned pricing")?)
            } else {
                tracing::warn!(
                    path = %path.display(),
                    "cleaned pricing table not found, skipping coverage"
                );
                None
            }
        }
    };

    let result = build_alignment(config, economic, pricing.as_ref())?;
    let path = config.output_path(&config.outputs.aligned);
    if !summary.dry_run {
        write_csv(&result.frame, &path)?;
    }
    info!(
        rows = result.frame.height(),
        exact = result.stats.exact,
        fallback = result.stats.fallback,
        duration_ms = start.elapsed().as_millis(),
        "align complete"
    );

    summary.stages.push(StageSummary {
        stage: Stage::Align,
        rows: result.frame.height(),
        path,
        written: !summary.dry_run,
    });
    summary.align = Some(result.stats);
    summary.coverage = result.coverage;
    Ok(())
}

/// Pricing, indicators and align in sequence.
pub fn run_all(config: &PipelineConfig, dry_run: bool) -> Result<RunSummary> {
    let mut summary = RunSummary::new(dry_run);
    let pricing = run_pricing(config, &mut summary)?;
    let economic = run_indicators(config, &mut summary)?;
    run_align(config, Some(economic), Some(pricing), &mut summary)?;
    Ok(summary)
}
