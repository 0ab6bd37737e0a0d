// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use caption_prefs::app_config::{Config, LogLevel};
use caption_prefs::captions::{CaptionDisplayMode, CaptionPreferences, TaskQueue, configure_text_tracks};
use caption_prefs::errors::AppError;
use caption_prefs::text_track::{MenuItem, TrackListSnapshot};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for CaptionDisplayMode to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliDisplayMode {
    Automatic,
    ForcedOnly,
    AlwaysOn,
}

impl From<CliDisplayMode> for CaptionDisplayMode {
    fn from(cli_mode: CliDisplayMode) -> Self {
        match cli_mode {
            CliDisplayMode::Automatic => CaptionDisplayMode::Automatic,
            CliDisplayMode::ForcedOnly => CaptionDisplayMode::ForcedOnly,
            CliDisplayMode::AlwaysOn => CaptionDisplayMode::AlwaysOn,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the ranked caption menu for a track list
    Menu {
        /// Track list snapshot (JSON)
        #[arg(value_name = "TRACKS_JSON")]
        tracks: PathBuf,
    },

    /// Print the selection score of every track
    Score {
        /// Track list snapshot (JSON)
        #[arg(value_name = "TRACKS_JSON")]
        tracks: PathBuf,
    },

    /// Run automatic track selection and print the enabled tracks
    Select {
        /// Track list snapshot (JSON)
        #[arg(value_name = "TRACKS_JSON")]
        tracks: PathBuf,
    },

    /// Generate shell completions for caption-prefs
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// caption-prefs - caption and subtitle track preferences
///
/// Scores text tracks, ranks the caption menu and runs automatic track
/// selection for a track list snapshot, using the configured preferences.
#[derive(Parser, Debug)]
#[command(name = "caption-prefs")]
#[command(version = "1.0.0")]
#[command(about = "Caption track scoring and menu ranking")]
#[command(long_about = "caption-prefs applies caption preferences to a text track list.

EXAMPLES:
    caption-prefs menu tracks.json                        # Ranked caption menu
    caption-prefs score tracks.json                       # Score of every track
    caption-prefs --display-mode always-on select tracks.json
    caption-prefs -l fr -l en score tracks.json           # Prefer French, then English
    caption-prefs completions bash > caption-prefs.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config: String,

    /// Set logging level
    #[arg(long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,

    /// Caption display mode
    #[arg(short, long, value_enum, global = true)]
    display_mode: Option<CliDisplayMode>,

    /// Preferred language, most preferred first (repeatable)
    #[arg(short, long = "language", global = true)]
    languages: Vec<String>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger::new(level)))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {:<5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Trace is the ceiling; the effective level is set once the config is loaded
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "caption-prefs", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli).context(format!("Failed to load configuration from {}", cli.config))?;
    log::set_max_level(config.log_level.to_level_filter());

    let queue = TaskQueue::new();
    let prefs = config.build_preferences(queue.clone());
    debug!(
        "Display mode {}, preferred languages [{}]",
        prefs.caption_display_mode(),
        prefs.preferred_languages().join(", ")
    );

    match cli.command {
        Commands::Menu { tracks } => run_menu(&prefs, &tracks)?,
        Commands::Score { tracks } => run_score(&prefs, &tracks)?,
        Commands::Select { tracks } => run_select(&prefs, &tracks)?,
        Commands::Completions { .. } => {}
    }

    let delivered = queue.run_pending();
    debug!("Delivered {} pending notification(s)", delivered);
    Ok(())
}

/// Load or create the configuration, then apply command line overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config, AppError> {
    let config_path = Path::new(&cli.config);
    let mut config = if config_path.exists() {
        Config::load_from_file(config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", cli.config);
        let config = Config::default();
        config.save_to_file(config_path)?;
        config
    };

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }
    if let Some(display_mode) = &cli.display_mode {
        config.preferences.display_mode = display_mode.clone().into();
        if let Some(accessibility) = config.accessibility.as_mut() {
            accessibility.display_mode = display_mode.clone().into();
        }
    }
    if !cli.languages.is_empty() {
        config.preferences.system_languages = cli.languages.clone();
    }

    // Also rejects malformed --language values.
    config.validate()?;
    Ok(config)
}

fn load_tracks(path: &Path) -> Result<TrackListSnapshot, AppError> {
    let snapshot = TrackListSnapshot::load(path)?;
    info!("Loaded {} track(s) from {}", snapshot.tracks.len(), path.display());
    Ok(snapshot)
}

fn run_menu(prefs: &CaptionPreferences, path: &Path) -> Result<()> {
    let snapshot = load_tracks(path).context(format!("Failed to load track list: {}", path.display()))?;
    let menu = prefs.sorted_track_list_for_menu(&snapshot.tracks);

    let mut stdout = std::io::stdout();
    for (position, item) in menu.iter().enumerate() {
        let marker = match item {
            MenuItem::Track(track) if track.is_showing() => "*",
            _ => " ",
        };
        let id = item.track().map(|track| track.id.as_str()).unwrap_or("-");
        writeln!(stdout, "{:>3} {} {:<8} {}", position, marker, id, prefs.display_name_for_menu_item(item))?;
    }
    Ok(())
}

fn run_score(prefs: &CaptionPreferences, path: &Path) -> Result<()> {
    let snapshot = load_tracks(path).context(format!("Failed to load track list: {}", path.display()))?;

    let mut stdout = std::io::stdout();
    for track in &snapshot.tracks {
        let score = prefs.text_track_selection_score(track, Some(&snapshot.media));
        writeln!(stdout, "{:<8} {:>4}  {}", track.id, score, prefs.display_name_for_track(track))?;
    }
    Ok(())
}

fn run_select(prefs: &CaptionPreferences, path: &Path) -> Result<()> {
    let mut snapshot = load_tracks(path).context(format!("Failed to load track list: {}", path.display()))?;
    let forced_language = configure_text_tracks(prefs, &mut snapshot.tracks, Some(&snapshot.media), false);

    let mut stdout = std::io::stdout();
    let mut enabled = 0;
    for track in snapshot.tracks.iter().filter(|track| track.is_showing()) {
        enabled += 1;
        writeln!(stdout, "{:<8} {:<12} {}", track.id, track.kind, prefs.display_name_for_track(track))?;
    }
    if enabled == 0 {
        info!("No track enabled");
    }
    if let Some(language) = forced_language {
        info!("Captions enabled automatically for language '{}'", language);
    }
    Ok(())
}
