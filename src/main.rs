// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use ytsubtrans::app_config::{self, Config, TranslationProvider};
use ytsubtrans::app_controller::Controller;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    #[value(alias = "google")]
    Bulk,
    #[value(alias = "deepseek")]
    Llm,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Bulk => TranslationProvider::Bulk,
            CliTranslationProvider::Llm => TranslationProvider::Llm,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a transcript JSON file into a bilingual report
    Translate(TranslateArgs),

    /// Generate shell completions for ytsubtrans
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Transcript JSON produced by the acquisition step
    #[arg(value_name = "INPUT_JSON")]
    input_path: PathBuf,

    /// Report output path (default: <input>.<target>.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of an existing report
    #[arg(short, long)]
    force_overwrite: bool,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Target language code (e.g., 'zh-CN', 'fr', 'ja')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Model name for the llm provider
    #[arg(short, long)]
    model: Option<String>,

    /// Unique fragments per request
    #[arg(long)]
    batch_size: Option<usize>,

    /// Maximum requests in flight
    #[arg(long)]
    workers: Option<usize>,

    /// Retries per failed request
    #[arg(long)]
    retries: Option<u32>,

    /// API key for the llm provider
    #[arg(long, env = "DEEPSEEK_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Also translate every cue individually
    #[arg(long)]
    translate_cues: bool,

    /// Translate duplicate fragments separately
    #[arg(long)]
    no_dedup: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// ytsubtrans - bilingual subtitle translation
///
/// Translates a video transcript with a machine translation service or an
/// LLM and writes a bilingual report for the renderer.
#[derive(Parser, Debug)]
#[command(name = "ytsubtrans")]
#[command(version)]
#[command(about = "Batch subtitle translation into bilingual reports")]
#[command(long_about = "ytsubtrans translates a transcript (cues, title, chapters) and writes a bilingual JSON report.

EXAMPLES:
    ytsubtrans translate video.json                       # Translate using default config
    ytsubtrans translate -f video.json                    # Overwrite an existing report
    ytsubtrans translate -p bulk -t fr video.json         # Machine translation into French
    ytsubtrans translate --translate-cues video.json      # Also translate every cue
    ytsubtrans completions bash > ytsubtrans.bash         # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.

SUPPORTED PROVIDERS:
    bulk - Google Translate web endpoint (no API key)
    llm  - OpenAI-compatible chat completions, DeepSeek by default (requires DEEPSEEK_API_KEY)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI colour for log level
    fn get_color_for_level(level: Level) -> &'static str {
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
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(record.level()),
                now,
                Self::get_emoji_for_level(record.level()),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install with the most verbose level; the effective level is set by max_level below
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "ytsubtrans", &mut std::io::stdout());
            Ok(())
        }
        Commands::Translate(args) => run_translate(args).await,
    }
}

/// Load the config file, or write the default one when it is missing
fn load_or_create_config(config_path: &str) -> Result<Config> {
    if Path::new(config_path).exists() {
        return Config::from_file(config_path);
    }

    warn!("Config file not found at '{}', creating default config.", config_path);
    let config = Config::default();
    config
        .save(config_path)
        .with_context(|| format!("Failed to write default config to file: {}", config_path))?;
    Ok(config)
}

/// Apply command line overrides on top of the file configuration
fn apply_overrides(config: &mut Config, options: &TranslateArgs) {
    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }
    if let Some(target_language) = &options.target_language {
        config.target_language = target_language.clone();
    }
    if let Some(model) = &options.model {
        config.translation.llm.model = model.clone();
    }
    if let Some(batch_size) = options.batch_size {
        config.translation.batch_size = batch_size;
    }
    if let Some(workers) = options.workers {
        config.translation.concurrent_workers = workers;
    }
    if let Some(retries) = options.retries {
        config.translation.max_retries = retries;
    }
    if let Some(api_key) = options.api_key.as_ref().filter(|k| !k.trim().is_empty()) {
        config.translation.llm.api_key = api_key.clone();
    }
    if options.translate_cues {
        config.translation.translate_cues = true;
    }
    if options.no_dedup {
        config.translation.deduplicate = false;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    // Apply the command line level right away so config loading is logged at that level
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = load_or_create_config(&options.config_path)?;
    apply_overrides(&mut config, &options);
    log::set_max_level(config.log_level.to_level_filter());

    config.validate().context("Configuration validation failed")?;

    if !options.input_path.is_file() {
        return Err(anyhow!("Input file does not exist: {:?}", options.input_path));
    }

    let controller = Controller::with_config(config)?;
    let output_path = controller
        .run(options.input_path.clone(), options.output.clone(), options.force_overwrite)
        .await?;

    info!("Success: {:?}", output_path);
    Ok(())
}
