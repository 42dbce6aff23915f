mod config;
mod logging;
mod report;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use appearance::{ThemeError, Theme};
use clap::{Parser, Subcommand};
use tracing::{debug, error};

use config::{Config, OutputFormat};
use report::Report;

/// Report whether the system uses a light or dark theme.
#[derive(Debug, Parser)]
#[command(name = "appearance", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Output format for `show`
    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,

    /// Log detection decisions at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, Subcommand)]
enum Command {
    /// Print the theme and both predicates
    #[default]
    Show,
    /// Exit 0 when the theme is dark, 1 otherwise
    IsDark,
    /// Exit 0 when the theme is light, 1 otherwise
    IsLight,
}

/// Exit status when detection fails.
const DETECTION_FAILED: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            let _ = writeln!(io::stderr().lock(), "Error: {err:#}");
            ExitCode::from(DETECTION_FAILED)
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let config = config::load(cli.config.as_deref())?;
    let verbose = cli.verbose || config.verbose;
    let log_file = cli.log_file.as_deref().or(config.log_file.as_deref());
    let _guard = logging::init(log_file, verbose)?;
    debug!(?config, "loaded config");

    let outcome = execute(cli, &config);
    if let Err(err) = &outcome {
        // main prints the error on stderr, log it only where it would otherwise be missing
        if !logging::writes_to_stderr(log_file) {
            error!("{err:#}");
        }
    }
    outcome
}

fn execute(cli: &Cli, config: &Config) -> Result<ExitCode> {
    let theme = detect(config).context("Failed to determine the system theme")?;
    match cli.command.unwrap_or_default() {
        Command::Show => {
            let format = cli.format.unwrap_or(config.format);
            let output = Report::new(theme).render(format)?;
            writeln!(io::stdout().lock(), "{output}").context("Failed to write report")?;
            Ok(ExitCode::SUCCESS)
        }
        Command::IsDark => Ok(exit_for(theme.is_dark())),
        Command::IsLight => Ok(exit_for(theme.is_light())),
    }
}

fn exit_for(matched: bool) -> ExitCode {
    if matched {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg_attr(not(target_os = "linux"), allow(unused_variables))]
fn detect(config: &Config) -> Result<Theme, ThemeError> {
    #[cfg(target_os = "linux")]
    if let Some(tool) = &config.gsettings {
        use appearance::ThemeSource;
        use appearance::theme::gsettings::GsettingsSource;

        return GsettingsSource::default().with_tool(tool.as_str()).theme();
    }
    appearance::resolve_theme()
}
