//! Sequential export of non-empty tiles.
//!
//! Accepted tiles are numbered densely in visitation order: the n-th saved
//! tile of a session is written as `icon_{n:03}.png`, independent of its grid
//! position. Empty tiles and failed saves never consume a number.

use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::TilecutError;
use crate::extract::{ExtractedTile, TileRect};
use crate::grid::CellOrigin;

/// Suffix appended to the source file stem to name its export directory.
pub const EXPORT_DIR_SUFFIX: &str = "_export";

/// Output file name for the tile with the given sequence number.
///
/// Padding is three digits; numbers past 999 simply grow wider.
pub fn tile_file_name(index: usize) -> String {
    format!("icon_{:03}.png", index)
}

/// Export directory for a source image: `<dir>/<stem>_export`.
///
/// Relative paths are resolved against the current directory.
pub fn export_dir_for(source: &Path) -> Result<PathBuf, TilecutError> {
    let absolute = std::path::absolute(source)?;
    let stem = absolute
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let parent = absolute.parent().unwrap_or_else(|| Path::new(""));
    Ok(parent.join(format!("{}{}", stem, EXPORT_DIR_SUFFIX)))
}

/// Create the export directory (and parents) if it does not exist.
pub fn create_export_dir(dir: &Path) -> Result<(), TilecutError> {
    fs::create_dir_all(dir).map_err(|source| TilecutError::CreateExportDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Destination for accepted tiles.
pub trait TileSink {
    /// Persist `tile` at `path`.
    fn save(&mut self, tile: &DynamicImage, path: &Path) -> Result<(), TilecutError>;
}

/// Writes tiles as PNG files.
#[derive(Clone, Copy, Debug, Default)]
pub struct PngSink;

impl TileSink for PngSink {
    fn save(&mut self, tile: &DynamicImage, path: &Path) -> Result<(), TilecutError> {
        tile.save_with_format(path, ImageFormat::Png)
            .map_err(|source| TilecutError::TileSave {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// What happened to one visited cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TileOutcome {
    /// Saved with the given sequence number.
    Saved { index: usize, file_name: String },
    /// No content; nothing written.
    Empty,
    /// The sink failed; nothing written and no number consumed.
    Failed { message: String },
}

/// Per-cell record kept by an [`ExportSession`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TileRecord {
    pub origin: CellOrigin,
    pub rect: TileRect,
    pub outcome: TileOutcome,
}

/// Bookkeeping for exporting one source image.
///
/// Invariant: `saved_count() <= total_count()`.
#[derive(Clone, Debug)]
pub struct ExportSession {
    export_dir: PathBuf,
    saved: usize,
    total: usize,
    records: Vec<TileRecord>,
}

impl ExportSession {
    /// Starts an empty session writing into `export_dir`.
    pub fn new(export_dir: impl Into<PathBuf>) -> Self {
        Self {
            export_dir: export_dir.into(),
            saved: 0,
            total: 0,
            records: Vec::new(),
        }
    }

    /// Account for one visited cell, saving it through `sink` if non-empty.
    pub fn consider<S>(&mut self, tile: &ExtractedTile, sink: &mut S) -> &TileRecord
    where
        S: TileSink + ?Sized,
    {
        self.total += 1;

        let outcome = if tile.is_empty {
            debug!(x = tile.origin.x, y = tile.origin.y, "skipping empty tile");
            TileOutcome::Empty
        } else {
            let index = self.saved;
            let file_name = tile_file_name(index);
            let path = self.export_dir.join(&file_name);
            match sink.save(&tile.content, &path) {
                Ok(()) => {
                    debug!(index, path = %path.display(), "saved tile");
                    self.saved += 1;
                    TileOutcome::Saved { index, file_name }
                }
                Err(err) => {
                    warn!(x = tile.origin.x, y = tile.origin.y, error = %err, "tile save failed");
                    TileOutcome::Failed {
                        message: err.to_string(),
                    }
                }
            }
        };

        self.records.push(TileRecord {
            origin: tile.origin,
            rect: tile.rect,
            outcome,
        });
        // records is never empty here
        &self.records[self.records.len() - 1]
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// Number of tiles written.
    pub fn saved_count(&self) -> usize {
        self.saved
    }

    /// Number of cells visited.
    pub fn total_count(&self) -> usize {
        self.total
    }

    pub fn empty_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.outcome == TileOutcome::Empty)
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, TileOutcome::Failed { .. }))
            .count()
    }

    /// Records in visitation order.
    pub fn records(&self) -> &[TileRecord] {
        &self.records
    }
}
