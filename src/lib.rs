//! Tilecut: split sprite sheets and icon atlases into individual tiles.
//!
//! Tilecut walks a fixed-size grid over an image, drops cells with no
//! visible content, and writes the remaining cells as sequentially numbered
//! PNG files into a `<name>_export/` directory next to the source.
//!
//! # Modules
//!
//! - [`config`]: Immutable run configuration
//! - [`grid`]: Grid planning and the truncation policy
//! - [`extract`]: Cropping and emptiness classification
//! - [`export`]: Dense sequential numbering and tile persistence
//! - [`report`]: Per-file and per-run summaries
//! - [`split`]: The per-file pipeline tying the above together
//! - [`error`]: Error types for tilecut operations

pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod grid;
pub mod report;
pub mod split;

use std::ffi::OsString;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

pub use config::{Config, DEFAULT_CELL_SIZE};
pub use error::TilecutError;
pub use split::{split_image, FileOutcome};

use report::RunSummary;

/// Single-dash long flags accepted for compatibility, with their help text.
const LEGACY_FLAGS: &[(&str, &str)] = &[
    ("-input", "prompt for additional options before processing"),
    ("-s", "silent: print only per-file summaries"),
    ("-cellW", "tile width in pixels (default 16)"),
    ("-cellH", "tile height in pixels (default 16)"),
];

/// The tilecut CLI application.
#[derive(Parser, Debug)]
#[command(name = "tilecut")]
#[command(version, about)]
#[command(args_override_self = true)]
struct Cli {
    /// Prompt for additional options before processing.
    #[arg(long = "input")]
    input: bool,

    /// Silent mode: suppress per-tile lines, print only summaries.
    #[arg(short = 's', long = "silent")]
    silent: bool,

    /// Tile width in pixels.
    #[arg(long = "cellW", value_name = "PX", default_value_t = DEFAULT_CELL_SIZE)]
    cell_width: u32,

    /// Tile height in pixels.
    #[arg(long = "cellH", value_name = "PX", default_value_t = DEFAULT_CELL_SIZE)]
    cell_height: u32,

    /// Output format for summaries.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Image files to split.
    paths: Vec<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Rewrite single-dash long flags (`-cellW`) to the `--cellW` form.
///
/// Only exact matches are rewritten; every other token, including paths
/// that are not valid UTF-8, passes through untouched.
pub fn normalize_args<I, S>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if LEGACY_LONG_FLAGS.iter().any(|flag| arg == *flag) {
                let mut long = OsString::from("-");
                long.push(&arg);
                long
            } else {
                arg
            }
        })
        .collect()
}

/// Flags rewritten by [`normalize_args`].
const LEGACY_LONG_FLAGS: &[&str] = &["-input", "-cellW", "-cellH"];

/// Install the stderr diagnostics subscriber (`RUST_LOG`, default `warn`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Run the tilecut CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
/// Reports go to stdout; the option listing and interactive prompts go to
/// stderr so stdout stays machine-readable with `--output json`.
pub fn run() -> Result<(), TilecutError> {
    let args: Vec<OsString> = std::env::args_os().skip(1).collect();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();
    run_from(
        args,
        &mut stdin.lock(),
        &mut stdout.lock(),
        &mut stderr.lock(),
    )
}

/// Run the CLI over explicit arguments, prompt input and outputs.
///
/// Only configuration and output errors are returned; per-file problems are
/// reported on `out` and processing moves on to the next path.
pub fn run_from<R, W, P>(
    args: Vec<OsString>,
    input: &mut R,
    out: &mut W,
    prompt: &mut P,
) -> Result<(), TilecutError>
where
    R: BufRead,
    W: Write,
    P: Write,
{
    let mut args = args;
    if args.is_empty() {
        writeln!(prompt, "No arguments given. Available options:")?;
        for (flag, help) in LEGACY_FLAGS {
            writeln!(prompt, "  {:<8} {}", flag, help)?;
        }
        args = prompt_tokens(input, prompt, "Enter command: ")?;
    }

    let Some(mut cli) = parse_cli(&args, out)? else {
        return Ok(());
    };

    if cli.input {
        let extra = prompt_tokens(input, prompt, "Additional options (optional): ")?;
        if !extra.is_empty() {
            args.extend(extra);
            cli = match parse_cli(&args, out)? {
                Some(cli) => cli,
                None => return Ok(()),
            };
        }
    }

    let config = Config::new(cli.cell_width, cli.cell_height)?
        .with_quiet(cli.silent)
        .with_interactive_input(cli.input);

    if cli.paths.is_empty() {
        match cli.output {
            OutputFormat::Text => writeln!(out, "No image files specified")?,
            OutputFormat::Json => writeln!(prompt, "No image files specified")?,
        }
        return Ok(());
    }

    let mut outcomes = Vec::with_capacity(cli.paths.len());
    for path in &cli.paths {
        let outcome = split::process_path(path, &config);
        if cli.output == OutputFormat::Text {
            write_outcome(out, &outcome, &config)?;
        }
        outcomes.push(outcome);
    }

    let summary = RunSummary::from_outcomes(&outcomes);
    match cli.output {
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct JsonRun<'a> {
                config: &'a Config,
                files: &'a [FileOutcome],
                summary: &'a RunSummary,
            }
            let json = serde_json::to_string_pretty(&JsonRun {
                config: &config,
                files: &outcomes,
                summary: &summary,
            })?;
            writeln!(out, "{}", json)?;
        }
        OutputFormat::Text => {
            if outcomes.len() > 1 {
                writeln!(out, "{}", summary)?;
            }
        }
    }

    Ok(())
}

/// Parse arguments, printing help or version text when requested.
///
/// Returns `Ok(None)` when clap handled the request itself.
fn parse_cli<W: Write>(args: &[OsString], out: &mut W) -> Result<Option<Cli>, TilecutError> {
    let argv =
        std::iter::once(OsString::from("tilecut")).chain(normalize_args(args.iter().cloned()));
    match Cli::try_parse_from(argv) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            write!(out, "{}", err.render())?;
            Ok(None)
        }
        Err(err) => Err(TilecutError::Config(
            err.render().to_string().trim_end().to_string(),
        )),
    }
}

/// Read one line of whitespace-separated tokens.
///
/// Invalid UTF-8 is replaced rather than rejected; a typed path that cannot
/// be decoded then simply fails to resolve and is skipped like any other
/// missing file.
fn prompt_tokens<R, P>(
    input: &mut R,
    prompt: &mut P,
    text: &str,
) -> Result<Vec<OsString>, TilecutError>
where
    R: BufRead,
    P: Write,
{
    write!(prompt, "{}", text)?;
    prompt.flush()?;
    let mut line = Vec::new();
    input.read_until(b'\n', &mut line)?;
    Ok(String::from_utf8_lossy(&line)
        .split_whitespace()
        .map(OsString::from)
        .collect())
}

fn write_outcome<W: Write>(out: &mut W, outcome: &FileOutcome, config: &Config) -> io::Result<()> {
    let path = outcome.path().display();
    match outcome {
        FileOutcome::Processed(report) => write!(out, "{}", report.display(!config.quiet())),
        FileOutcome::Skipped { .. } => writeln!(out, "Skipping missing file: {}", path),
        FileOutcome::Failed { reason, .. } => {
            writeln!(out, "Error processing file {}: {}", path, reason)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Captured {
        result: Result<(), TilecutError>,
        out: String,
        prompts: String,
    }

    fn run_capture(args: &[&str], stdin: &[u8]) -> Captured {
        run_capture_os(args.iter().map(OsString::from).collect(), stdin)
    }

    fn run_capture_os(args: Vec<OsString>, stdin: &[u8]) -> Captured {
        let mut input = stdin;
        let mut out = Vec::new();
        let mut prompts = Vec::new();
        let result = run_from(args, &mut input, &mut out, &mut prompts);
        Captured {
            result,
            out: String::from_utf8(out).expect("utf8 output"),
            prompts: String::from_utf8(prompts).expect("utf8 prompts"),
        }
    }

    fn os_args(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn normalize_rewrites_only_known_flags() {
        let args = normalize_args(["-cellW", "8", "-s", "-input", "-cellH", "4", "-x", "a.png", "-cellWx"]);
        assert_eq!(
            args,
            os_args(&["--cellW", "8", "-s", "--input", "--cellH", "4", "-x", "a.png", "-cellWx"])
        );
    }

    #[cfg(unix)]
    #[test]
    fn normalize_keeps_non_utf8_tokens() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let raw = OsStr::from_bytes(b"caf\xe9.png").to_os_string();
        let args = normalize_args([OsString::from("-cellH"), raw.clone()]);
        assert_eq!(args, vec![OsString::from("--cellH"), raw]);
    }

    #[test]
    fn legacy_flags_parse() {
        let mut out = Vec::new();
        let args = os_args(&["-cellW", "8", "-cellH", "32", "-s", "a.png", "b.png"]);
        let cli = parse_cli(&args, &mut out).unwrap().unwrap();
        assert_eq!((cli.cell_width, cli.cell_height), (8, 32));
        assert!(cli.silent);
        assert!(!cli.input);
        assert_eq!(cli.paths.len(), 2);
    }

    #[test]
    fn later_values_override_earlier() {
        let mut out = Vec::new();
        let args = os_args(&["-cellW", "8", "-cellW", "24"]);
        let cli = parse_cli(&args, &mut out).unwrap().unwrap();
        assert_eq!(cli.cell_width, 24);
    }

    #[test]
    fn non_integer_cell_size_is_config_error() {
        let run = run_capture(&["-cellW", "wide", "a.png"], b"");
        let err = run.result.unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("cellW"));
    }

    #[test]
    fn missing_value_is_config_error() {
        let run = run_capture(&["a.png", "-cellH"], b"");
        assert!(run.result.unwrap_err().is_config_error());
    }

    #[test]
    fn zero_cell_size_is_rejected() {
        let run = run_capture(&["-cellW", "0", "a.png"], b"");
        assert!(matches!(
            run.result,
            Err(TilecutError::InvalidCellSize { width: 0, .. })
        ));
    }

    #[test]
    fn no_arguments_lists_flags_and_reads_command() {
        let run = run_capture(&[], b"\n");
        assert!(run.result.is_ok());
        assert!(run.prompts.contains("-cellW"));
        assert!(run.prompts.contains("Enter command: "));
        assert!(run.out.contains("No image files specified"));
    }

    #[test]
    fn interactive_input_adds_options() {
        let run = run_capture(&["-input"], b"-cellW 0\n");
        assert!(run.prompts.contains("Additional options (optional): "));
        assert!(run.result.unwrap_err().is_config_error());
    }

    #[test]
    fn invalid_utf8_on_stdin_is_not_an_error() {
        let run = run_capture(&["-input", "-s"], b"\xff\n");
        assert!(run.result.is_ok());
        assert!(run.out.contains("Skipping missing file: \u{fffd}"));
    }

    #[test]
    fn json_mode_keeps_prompts_off_stdout() {
        let run = run_capture(&[], b"--output json -input missing.png\n-s\n");
        assert!(run.result.is_ok());
        assert!(run.prompts.contains("Enter command: "));
        assert!(run.prompts.contains("Additional options"));
        let json: serde_json::Value = serde_json::from_str(&run.out).expect("stdout is json");
        assert_eq!(json["summary"]["skipped"], 1);
    }

    #[test]
    fn missing_files_are_reported_not_fatal() {
        let run = run_capture(&["does/not/exist.png"], b"");
        assert!(run.result.is_ok());
        assert!(run.out.contains("Skipping missing file: does/not/exist.png"));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_path_is_skipped_not_fatal() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let args = vec![OsStr::from_bytes(b"no/such/caf\xe9.png").to_os_string()];
        let run = run_capture_os(args, b"");
        assert!(run.result.is_ok());
        assert!(run.out.contains("Skipping missing file: no/such/caf"));
    }

    #[test]
    fn version_is_printed() {
        let run = run_capture(&["-V"], b"");
        assert!(run.result.is_ok());
        assert_eq!(run.out, format!("tilecut {}\n", env!("CARGO_PKG_VERSION")));
    }
}
