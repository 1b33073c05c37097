//! Per-file split pipeline.
//!
//! For one source image: plan the grid, classify every cell, export the
//! non-empty ones, and summarize. Files are processed one at a time and share
//! no state; a failure in one file never affects the next.

use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::TilecutError;
use crate::export::{self, ExportSession, PngSink, TileSink};
use crate::extract::{self, BoundingBoxClassifier, ContentClassifier};
use crate::grid;
use crate::report::{self, SessionReport};

/// Result of handling one input path.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// The file was split; see the report for tile counts.
    Processed(SessionReport),
    /// The path was not a regular file.
    Skipped { path: PathBuf, reason: String },
    /// Decoding, directory creation, or another fault stopped this file.
    Failed { path: PathBuf, reason: String },
}

impl FileOutcome {
    /// The input path this outcome belongs to.
    pub fn path(&self) -> &Path {
        match self {
            FileOutcome::Processed(report) => &report.source,
            FileOutcome::Skipped { path, .. } | FileOutcome::Failed { path, .. } => path,
        }
    }
}

/// Split an already decoded image into `export_dir`.
///
/// The export directory must already exist when `sink` writes to disk.
pub fn split_loaded<C, S>(
    source: &Path,
    image: &DynamicImage,
    export_dir: &Path,
    config: &Config,
    classifier: &C,
    sink: &mut S,
) -> SessionReport
where
    C: ContentClassifier + ?Sized,
    S: TileSink + ?Sized,
{
    let (width, height) = image.dimensions();
    let plan = grid::plan(width, height, config);
    let mut session = ExportSession::new(export_dir);

    for origin in plan.origins() {
        let tile = extract::extract(
            image,
            origin,
            config.cell_width(),
            config.cell_height(),
            classifier,
        );
        session.consider(&tile, sink);
    }

    report::summarize(source, &plan, &session)
}

/// Split the image at `path` with a custom classifier and sink.
pub fn split_image_with<C, S>(
    path: &Path,
    config: &Config,
    classifier: &C,
    sink: &mut S,
) -> Result<SessionReport, TilecutError>
where
    C: ContentClassifier + ?Sized,
    S: TileSink + ?Sized,
{
    if !path.is_file() {
        return Err(TilecutError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let image = image::open(path).map_err(|source| TilecutError::ImageDecode {
        path: path.to_path_buf(),
        source,
    })?;

    let export_dir = export::export_dir_for(path)?;
    export::create_export_dir(&export_dir)?;

    info!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        export_dir = %export_dir.display(),
        "splitting image"
    );
    let report = split_loaded(path, &image, &export_dir, config, classifier, sink);
    info!(saved = report.saved, total = report.total, "finished image");

    Ok(report)
}

/// Split the image at `path` into PNG tiles next to it.
pub fn split_image(path: &Path, config: &Config) -> Result<SessionReport, TilecutError> {
    split_image_with(path, config, &BoundingBoxClassifier, &mut PngSink)
}

/// Handle one input path, turning errors into a recoverable outcome.
pub fn process_path(path: &Path, config: &Config) -> FileOutcome {
    match split_image(path, config) {
        Ok(report) => FileOutcome::Processed(report),
        Err(err @ TilecutError::InputNotFound { .. }) => {
            warn!(path = %path.display(), "skipping missing input");
            FileOutcome::Skipped {
                path: path.to_path_buf(),
                reason: err.to_string(),
            }
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to process file");
            FileOutcome::Failed {
                path: path.to_path_buf(),
                reason: err.to_string(),
            }
        }
    }
}

/// Fuzz-only entrypoint: decode `data` and split it in memory with 4x4 cells.
#[cfg(feature = "fuzzing")]
pub fn fuzz_split_bytes(data: &[u8], export_dir: &Path) -> Option<SessionReport> {
    struct Discard;

    impl TileSink for Discard {
        fn save(&mut self, _tile: &DynamicImage, _path: &Path) -> Result<(), TilecutError> {
            Ok(())
        }
    }

    let image = image::load_from_memory(data).ok()?;
    if image.width() > 1024 || image.height() > 1024 {
        return None;
    }
    let config = Config::new(4, 4).ok()?;
    Some(split_loaded(
        Path::new("<fuzz>"),
        &image,
        export_dir,
        &config,
        &BoundingBoxClassifier,
        &mut Discard,
    ))
}
