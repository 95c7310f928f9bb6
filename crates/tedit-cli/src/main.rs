//! TEdit command line.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tedit_cli::logging::{LogConfig, LogFormat, init_logging};
use tedit_core::{EditorSettings, SessionError};

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg};
use crate::commands::{
    run_check_updates, run_info, run_new, run_paint, run_resave, startup_version_check,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(error) => {
            eprintln!("error: failed to start runtime: {error}");
            std::process::exit(1);
        }
    };

    let settings = match &cli.config {
        Some(path) => EditorSettings::load_from(path),
        None => EditorSettings::load(),
    };
    let progress = !cli.no_progress && io::stderr().is_terminal();

    let result = runtime.block_on(async {
        if settings.updates.check_on_startup && !matches!(cli.command, Command::CheckUpdates(_)) {
            startup_version_check(&settings).await;
        }
        match &cli.command {
            Command::New(args) => run_new(args, &settings, progress).await,
            Command::Info(args) => run_info(args, &settings, progress).await,
            Command::Resave(args) => run_resave(args, &settings, progress).await,
            Command::Paint(args) => run_paint(args, &settings, progress).await,
            Command::CheckUpdates(args) => run_check_updates(args, &settings).await,
        }
    });

    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            report_error(&error);
            1
        }
    };
    std::process::exit(exit_code);
}

fn report_error(error: &anyhow::Error) {
    match error.downcast_ref::<SessionError>() {
        Some(session_error) => {
            eprintln!("error: {}", session_error.user_message());
            if let Some(suggestion) = session_error.suggestion() {
                eprintln!("hint: {suggestion}");
            }
        }
        None => eprintln!("error: {error:#}"),
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        use_env_filter: !cli.verbosity.is_present(),
        format: match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        },
        log_file: cli.log_file.clone(),
        with_ansi: match cli.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
        },
        ..LogConfig::default()
    }
}
