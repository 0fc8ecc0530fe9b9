use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;

use atlas_transform::{AlignStats, CoverageReport, NormalizeStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Pricing,
    Indicators,
    Align,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Pricing => "pricing",
            Stage::Indicators => "indicators",
            Stage::Align => "align",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct StageSummary {
    pub stage: Stage,
    pub rows: usize,
    pub path: PathBuf,
    /// False on a dry run.
    pub written: bool,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub stages: Vec<StageSummary>,
    pub snapshot_date: Option<NaiveDate>,
    pub normalize: Option<NormalizeStats>,
    pub align: Option<AlignStats>,
    pub coverage: Option<CoverageReport>,
    pub dry_run: bool,
}

impl RunSummary {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    pub fn stage(&self, stage: Stage) -> Option<&StageSummary> {
        self.stages.iter().find(|summary| summary.stage == stage)
    }
}
