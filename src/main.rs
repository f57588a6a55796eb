// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::{IsTerminal, Read, Write};
use std::path::PathBuf;

use transcade::app_config::{self, Config, ProviderKind};
use transcade::translation::{StaticDescription, TranslationManager};

/// CLI Wrapper for ProviderKind to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliProvider {
    Google,
    #[value(name = "libretranslate", alias = "libre")]
    LibreTranslate,
    #[value(name = "mymemory")]
    MyMemory,
}

impl From<CliProvider> for ProviderKind {
    fn from(cli_provider: CliProvider) -> Self {
        match cli_provider {
            CliProvider::Google => ProviderKind::Google,
            CliProvider::LibreTranslate => ProviderKind::LibreTranslate,
            CliProvider::MyMemory => ProviderKind::MyMemory,
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
    /// Generate shell completions for transcade
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// transcade - translate short texts through a chain of free providers
///
/// Prints only the result on stdout. Diagnostics go to stderr.
#[derive(Parser, Debug)]
#[command(name = "transcade")]
#[command(version)]
#[command(about = "Translate short texts through a fallback chain of providers")]
#[command(long_about = "transcade translates a short text (such as a repository description) by trying
translation providers in order until one succeeds. If none does, the original text is printed.

EXAMPLES:
    transcade -t fr \"Sales Management\"          # English to French
    echo \"Gestión de ventas\" | transcade -s es -t en
    transcade -t de -p mymemory,google \"Hello\"  # Restrict and reorder providers
    transcade completions bash > transcade.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file doesn't exist,
    a default one is created. Provider order in the file is the fallback order.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Text to translate; read from stdin when omitted
    #[arg(value_name = "TEXT")]
    text: Option<String>,

    /// Target language code (e.g., 'fr', 'de', 'zh-CN')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Source language code (default: from config, normally 'en')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Providers to try, in order (overrides the config file)
    #[arg(short, long, value_enum, value_delimiter = ',')]
    providers: Vec<CliProvider>,

    /// Printed instead of an empty result when there is no text
    #[arg(long)]
    fallback_text: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Logger writing colored, timestamped lines to stderr
struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(StderrLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    StderrLogger::init(LevelFilter::Warn)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "transcade", &mut std::io::stdout());
        return Ok(());
    }

    run_translate(cli).await
}

async fn run_translate(options: CommandLineOptions) -> Result<()> {
    // Command line log level applies before the config is read
    if let Some(level) = &options.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&options.config_path)?;

    if let Some(source_language) = &options.source_language {
        config.source_language = source_language.clone();
    }
    if let Some(target_language) = &options.target_language {
        config.target_language = target_language.clone();
    }
    if !options.providers.is_empty() {
        let kinds: Vec<ProviderKind> = options.providers.iter().cloned().map(Into::into).collect();
        config.translation.restrict_to(&kinds);
    }
    match &options.log_level {
        Some(level) => config.log_level = level.clone().into(),
        None => log::set_max_level(config.log_level.to_level_filter()),
    }

    config.validate().context("Configuration validation failed")?;

    let manager = TranslationManager::from_config(&config.translation)?;
    debug!("Provider chain: {}", manager.provider_names().join(" -> "));

    let text = match options.text {
        Some(text) => text,
        None => read_stdin()?,
    };

    let source = if text.trim().is_empty() {
        StaticDescription::missing()
    } else {
        StaticDescription::new(text, config.source_language.clone())
    };

    let mut result = manager.translate_from(&source, &config.target_language).await;
    if result.is_empty() {
        if let Some(fallback) = options.fallback_text {
            result = fallback;
        }
    }

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", result)?;
    stdout.flush()?;

    Ok(())
}

fn read_stdin() -> Result<String> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(String::new());
    }

    let mut buffer = String::new();
    stdin.read_to_string(&mut buffer).context("Failed to read text from stdin")?;
    Ok(buffer.trim_end_matches(['\r', '\n']).to_string())
}
