// src/main.rs

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion_cache::{
    call_tool, serve, tool_catalogue, Command, CommandLineInput, QueryEngine, ServerConfig,
    SqliteCache,
};
use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

/// Sets up logging configuration.
///
/// Console output goes to stderr: stdout carries protocol traffic.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("notion_cache.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

fn open_engine(config: &ServerConfig) -> Result<QueryEngine> {
    let cache = SqliteCache::open(&config.cache_path, config.busy_timeout).with_context(|| {
        format!(
            "Failed to open cache database at {}",
            config.cache_path.display()
        )
    })?;
    Ok(QueryEngine::new(Arc::new(cache)))
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

fn run(cli: CommandLineInput) -> Result<ExitCode> {
    let command = cli.command.clone().unwrap_or(Command::Serve);

    if command == Command::Tools {
        print_json(&serde_json::to_value(tool_catalogue())?)?;
        return Ok(ExitCode::SUCCESS);
    }

    let config = ServerConfig::resolve(&cli).context("Failed to resolve configuration")?;
    log::debug!("Configuration: {:?}", config);
    let engine = open_engine(&config)?;

    match command.as_tool_call() {
        Some((tool, arguments)) => {
            let outcome = call_tool(&engine, tool.as_str(), arguments)?;
            print_json(&outcome.payload)?;
            Ok(if outcome.is_error {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        None => {
            let stdin = io::stdin().lock();
            let stdout = io::stdout().lock();
            serve(stdin, stdout, &engine).context("Transport failed")?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    let cli = CommandLineInput::parse();

    if let Err(e) = setup_logging(cli.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            log::error!("{:#}", err);
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
