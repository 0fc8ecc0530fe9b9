use anyhow::{Context, Result};
use tracing::info_span;

use atlas_cli::config::{PipelineConfig, load_config};
use atlas_cli::pipeline::{run_align, run_all, run_indicators, run_pricing};
use atlas_cli::types::{RunSummary, Stage};
use atlas_model::builtin_tables;

use crate::cli::{AliasesArgs, StageArgs};
use crate::summary::print_aliases;

/// Runs one stage, or all of them in order when `stage` is `None`.
pub fn run_stage(stage: Option<Stage>, args: &StageArgs) -> Result<RunSummary> {
    let config = resolve_config(args)?;
    let span = info_span!("pipeline", data_dir = %config.data_dir().display());
    let _guard = span.enter();

    let Some(stage) = stage else {
        return run_all(&config, args.dry_run);
    };
    let mut summary = RunSummary::new(args.dry_run);
    match stage {
        Stage::Pricing => {
            run_pricing(&config, &mut summary)?;
        }
        Stage::Indicators => {
            run_indicators(&config, &mut summary)?;
        }
        Stage::Align => run_align(&config, None, None, &mut summary)?,
    }
    Ok(summary)
}

pub fn run_aliases(args: &AliasesArgs) {
    print_aliases(&builtin_tables(), args.plain);
}

fn resolve_config(args: &StageArgs) -> Result<PipelineConfig> {
    load_config(args.config.as_deref(), &args.overrides()).context("load configuration")
}
