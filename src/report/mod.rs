//! Human-readable and JSON reports for export sessions.
//!
//! Reports are purely observational: they are derived from a finished
//! [`ExportSession`] and never feed back into processing.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::export::{ExportSession, TileOutcome, TileRecord};
use crate::grid::GridPlan;
use crate::split::FileOutcome;

const RULE: &str = "============================================================";

/// Summary of one processed source image.
#[derive(Clone, Debug, Serialize)]
pub struct SessionReport {
    /// Source file name (without directory).
    pub file_name: String,
    /// Full source path as given.
    pub source: PathBuf,
    /// Original image size.
    pub image_width: u32,
    pub image_height: u32,
    /// Truncated area that was actually visited.
    pub usable_width: u32,
    pub usable_height: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    pub export_dir: PathBuf,
    pub saved: usize,
    pub total: usize,
    pub empty: usize,
    pub failed: usize,
    pub tiles: Vec<TileRecord>,
}

/// Build the report for a finished session.
pub fn summarize(source: &Path, plan: &GridPlan, session: &ExportSession) -> SessionReport {
    let file_name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.display().to_string());

    SessionReport {
        file_name,
        source: source.to_path_buf(),
        image_width: plan.image_width(),
        image_height: plan.image_height(),
        usable_width: plan.usable_width(),
        usable_height: plan.usable_height(),
        cell_width: plan.cell_width(),
        cell_height: plan.cell_height(),
        export_dir: session.export_dir().to_path_buf(),
        saved: session.saved_count(),
        total: session.total_count(),
        empty: session.empty_count(),
        failed: session.failed_count(),
        tiles: session.records().to_vec(),
    }
}

impl SessionReport {
    /// Display adapter that optionally includes one line per visited tile.
    pub fn display(&self, with_tiles: bool) -> ReportDisplay<'_> {
        ReportDisplay {
            report: self,
            with_tiles,
        }
    }

    /// Records for tiles whose save failed.
    pub fn failures(&self) -> impl Iterator<Item = &TileRecord> {
        self.tiles
            .iter()
            .filter(|t| matches!(t.outcome, TileOutcome::Failed { .. }))
    }
}

impl fmt::Display for SessionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display(false), f)
    }
}

/// See [`SessionReport::display`].
pub struct ReportDisplay<'a> {
    report: &'a SessionReport,
    with_tiles: bool,
}

impl fmt::Display for ReportDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.report;

        writeln!(f, "{}", RULE)?;
        writeln!(f, "File:       {}", r.file_name)?;
        writeln!(
            f,
            "Size:       {}x{} ({}x{})",
            r.usable_width, r.usable_height, r.image_width, r.image_height
        )?;
        writeln!(f, "Tile size:  {}x{}", r.cell_width, r.cell_height)?;
        writeln!(f, "Export:     {}", r.export_dir.display())?;
        writeln!(f, "{}", RULE)?;

        if self.with_tiles {
            for tile in &r.tiles {
                writeln!(f, "  {}", TileLine(tile))?;
            }
        } else {
            for tile in r.failures() {
                writeln!(f, "  {}", TileLine(tile))?;
            }
        }

        writeln!(f, "{}", RULE)?;
        writeln!(f, "Done! Saved {} of {} tiles", r.saved, r.total)?;
        if r.failed > 0 {
            writeln!(f, "Failed to save {} tile(s)", r.failed)?;
        }
        if r.saved > 0 {
            writeln!(f, "Export folder: {}", r.export_dir.display())?;
        }
        writeln!(f, "{}", RULE)
    }
}

struct TileLine<'a>(&'a TileRecord);

impl fmt::Display for TileLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let origin = self.0.origin;
        match &self.0.outcome {
            TileOutcome::Saved { index, file_name } => {
                write!(f, "Saved tile {:03}: {}", index, file_name)
            }
            TileOutcome::Empty => write!(f, "Skipped empty tile ({},{})", origin.x, origin.y),
            TileOutcome::Failed { message } => {
                write!(f, "Failed tile ({},{}): {}", origin.x, origin.y, message)
            }
        }
    }
}

/// Totals for a whole run over many input paths.
#[derive(Clone, Debug, Default, Serialize)]
pub struct RunSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub tiles_saved: usize,
    pub tiles_total: usize,
}

impl RunSummary {
    /// Aggregate per-file outcomes.
    pub fn from_outcomes(outcomes: &[FileOutcome]) -> Self {
        let mut summary = Self::default();
        for outcome in outcomes {
            match outcome {
                FileOutcome::Processed(report) => {
                    summary.processed += 1;
                    summary.tiles_saved += report.saved;
                    summary.tiles_total += report.total;
                }
                FileOutcome::Skipped { .. } => summary.skipped += 1,
                FileOutcome::Failed { .. } => summary.failed += 1,
            }
        }
        summary
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} file(s) processed, {} skipped, {} failed; {} of {} tiles saved",
            self.processed, self.skipped, self.failed, self.tiles_saved, self.tiles_total
        )
    }
}
