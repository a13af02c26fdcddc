use std::ffi::OsString;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use loadgen::app::{progress_line, render_report, run_load_test, write_report};
use loadgen::args::{LoadArgs, OutputFormat};
use loadgen::config::{DEFAULT_CONFIG_FILES, RunConfig, apply_config, load_config};
use loadgen::error::{AppError, AppResult, ValidationError};
use loadgen::http::{HttpClient, ReqwestClient};
use loadgen::metrics::Progress;
use loadgen::shutdown::shutdown_channel;

use crate::shutdown_handlers::setup_signal_shutdown_handler;

pub(crate) fn run() -> AppResult<()> {
    let (mut args, matches) = match parse_args()? {
        Some(parsed) => parsed,
        None => return Ok(()),
    };

    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, &matches, &config)?;
    }

    crate::logger::init_logging(args.verbose);

    let run_config = RunConfig::from_args(&args)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args, run_config))
}

fn parse_args() -> AppResult<Option<(LoadArgs, ArgMatches)>> {
    let mut cmd = LoadArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = LoadArgs::from_arg_matches(&matches)?;
    Ok(Some((args, matches)))
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    let treat_as_empty =
        matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--");
    if !treat_as_empty {
        return false;
    }

    !has_default_config() && std::env::var_os("LOADGEN_URL").is_none()
}

fn has_default_config() -> bool {
    DEFAULT_CONFIG_FILES
        .iter()
        .any(|path| Path::new(path).exists())
}

/// Progress goes to stderr when a JSON report is headed for stdout.
fn progress_on_stderr(args: &LoadArgs) -> bool {
    args.output.is_none() && args.output_format == OutputFormat::Json
}

fn print_progress(update: Progress, to_stderr: bool) {
    let line = progress_line(update);
    if to_stderr {
        eprintln!("{}", line);
    } else {
        let mut stdout = std::io::stdout().lock();
        if let Err(err) = writeln!(stdout, "{}", line) {
            tracing::debug!("Failed to write progress: {}", err);
        }
    }
}

async fn run_async(args: LoadArgs, config: RunConfig) -> AppResult<()> {
    let (shutdown_tx, _) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    let client: Arc<dyn HttpClient> = Arc::new(ReqwestClient::new(
        config.request_timeout(),
        config.concurrency(),
    )?);

    let show_progress = !args.no_progress;
    let to_stderr = progress_on_stderr(&args);
    let outcome = run_load_test(&config, client, &shutdown_tx, |update| {
        if show_progress {
            print_progress(update, to_stderr);
        }
    })
    .await;

    // The runner fires shutdown on every exit path except its own errors.
    loadgen::shutdown::trigger_shutdown(&shutdown_tx);
    signal_handle.await?;

    let report = outcome?;
    let rendered = render_report(&report, args.output_format)?;
    write_report(args.output.as_deref(), &rendered).await?;

    if !report.completed {
        tracing::error!(
            "Run stopped after {} of {} requests.",
            report.total_requests,
            report.expected_requests
        );
        return Err(AppError::validation(ValidationError::RunIncomplete {
            completed: report.total_requests,
            expected: report.expected_requests,
        }));
    }
    Ok(())
}
