// MQLSleuth - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Config loading and logging initialisation (debug mode support)
// 3. `report`: parse a MetaEditor log and print positioned diagnostics
// 4. `tree`: scan for sources and print the picker's file tree viewport

use clap::{Parser, Subcommand, ValueEnum};
use mqlsleuth::app::outcome::{self, BuildOutcome};
use mqlsleuth::app::picker::{PickerCommand, PickerState};
use mqlsleuth::app::present;
use mqlsleuth::app::source_cache::SourceCache;
use mqlsleuth::core::discovery::{self, DiscoveryConfig};
use mqlsleuth::core::model::BuildMode;
use mqlsleuth::core::parser;
use mqlsleuth::platform::config::{self, AppConfig, PlatformPaths};
use mqlsleuth::platform::fs;
use mqlsleuth::ui::report;
use mqlsleuth::util::constants;
use mqlsleuth::util::error::{MqlSleuthError, Result, TreeError};
use std::path::{Path, PathBuf};

/// MQLSleuth - MetaEditor build log reader.
///
/// Turns MQL4 compiler logs into diagnostics overlaid on the source lines
/// they point at, and shows the source tree a build target is picked from.
#[derive(Parser, Debug)]
#[command(name = "mqlsleuth", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    /// Config file to use instead of the platform default.
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a compiler log and print its diagnostics.
    Report {
        /// Log file, or the source file whose log MetaEditor wrote to the
        /// working directory.
        log: PathBuf,

        /// Which MetaEditor run wrote the log.
        #[arg(short = 'm', long = "mode", value_enum, default_value_t = ModeArg::Compile)]
        mode: ModeArg,

        /// Exit status of the compiler process.
        #[arg(short = 's', long = "status", default_value_t = 0, allow_negative_numbers = true)]
        status: i32,

        /// Excerpt width in characters.
        #[arg(short = 'w', long = "width")]
        width: Option<usize>,

        /// Directory relative script paths are resolved against.
        #[arg(long = "source-root")]
        source_root: Option<PathBuf>,

        /// Emit the presentation as JSON instead of text.
        #[arg(long = "json")]
        json: bool,
    },

    /// Print the source file tree around the selected file.
    Tree {
        /// Directory to scan.
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Index of the selected file in scan order.
        #[arg(long = "select", default_value_t = 0)]
        select: usize,

        /// Viewport height in rows; 0 or absent uses the terminal height minus
        /// the help bar.
        #[arg(long = "height")]
        height: Option<usize>,

        /// Source file extension to scan for.
        #[arg(long = "ext")]
        ext: Option<String>,

        /// Also print the first N lines of the selected file.
        #[arg(long = "preview")]
        preview: Option<usize>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Compile,
    Syntax,
}

impl From<ModeArg> for BuildMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Compile => BuildMode::Compile,
            ModeArg::Syntax => BuildMode::Syntax,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PlatformPaths::resolve().config_file());
    let (app_config, config_warnings) = config::load_config(&config_path);

    // Initialise logging subsystem
    mqlsleuth::util::logging::init(cli.debug, app_config.log_level.as_deref());

    tracing::info!(
        version = constants::APP_VERSION,
        debug = cli.debug,
        config = %config_path.display(),
        "MQLSleuth starting"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
        eprintln!("Warning: {warning}");
    }

    let result = match cli.command {
        Command::Report {
            log,
            mode,
            status,
            width,
            source_root,
            json,
        } => run_report(
            &app_config,
            &log,
            mode.into(),
            status,
            width,
            source_root,
            json,
        ),
        Command::Tree {
            root,
            select,
            height,
            ext,
            preview,
        } => run_tree(&app_config, &root, select, height, ext, preview).map(|()| 0),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    }
}

/// Parse, present and print one log. Returns the process exit code.
fn run_report(
    app_config: &AppConfig,
    log: &Path,
    mode: BuildMode,
    status: i32,
    width: Option<usize>,
    source_root: Option<PathBuf>,
    json: bool,
) -> Result<i32> {
    let log_path = resolve_log_path(log, &app_config.extension);
    let raw = fs::read_file_lossy(&log_path).map_err(|source| MqlSleuthError::Io {
        path: log_path.clone(),
        operation: "read log",
        source,
    })?;

    let batch = parser::parse(&raw, mode);
    let mut cache = match source_root {
        Some(dir) => SourceCache::with_base_dir(dir),
        None => SourceCache::new(),
    };
    let width = width
        .unwrap_or(app_config.excerpt_width)
        .clamp(constants::MIN_EXCERPT_WIDTH, constants::MAX_EXCERPT_WIDTH);

    let presentation = present::present(&batch, &mut cache, width);
    let outcome = BuildOutcome::evaluate(mode, status, &batch);

    if json {
        println!("{}", report::render_json(&presentation, &outcome)?);
    } else {
        print!("{}", report::render_report(&presentation, &outcome));
    }

    Ok(if outcome.success { 0 } else { 1 })
}

/// A source file argument is swapped for the log MetaEditor writes for it.
fn resolve_log_path(path: &Path, source_extension: &str) -> PathBuf {
    let is_source = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(source_extension));
    if is_source {
        let log = outcome::log_file_for(path);
        tracing::debug!(
            source_file = %path.display(),
            log = %log.display(),
            "Using the source file's log"
        );
        log
    } else {
        path.to_path_buf()
    }
}

fn run_tree(
    app_config: &AppConfig,
    root: &Path,
    select: usize,
    height: Option<usize>,
    ext: Option<String>,
    preview: Option<usize>,
) -> Result<()> {
    let discovery_config = DiscoveryConfig {
        extension: ext.unwrap_or_else(|| app_config.extension.clone()),
        max_depth: app_config.max_depth,
        ..DiscoveryConfig::default()
    };
    let (files, warnings) = discovery::discover_sources(root, &discovery_config)?;
    for warning in &warnings {
        tracing::warn!(warning = %warning, "Discovery warning");
    }

    let root_name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());

    let viewport_height = app_config.viewport_height_with(height);
    let mut picker = PickerState::new(files, viewport_height.unwrap_or(0))
        .map_err(|_| TreeError::NoFilesFound {
            root: root_name.clone(),
        })?
        .with_root(root);
    if viewport_height.is_none() {
        picker.apply(PickerCommand::Resize(terminal_rows()));
    }
    picker.select(select);

    let lines = picker.visible_tree(&root_name)?;
    let preview_lines = preview.map(|n| picker.preview(n));
    print!("{}", report::render_tree(&lines, preview_lines.as_deref()));
    Ok(())
}

/// Terminal height in rows, or the fallback when stdout is not a terminal.
fn terminal_rows() -> usize {
    match terminal_size::terminal_size() {
        Some((_, terminal_size::Height(h))) => usize::from(h),
        None => constants::FALLBACK_TERMINAL_HEIGHT,
    }
}
