use std::ffi::OsString;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::app::{self, RunOutcome};
use crate::args::BenchArgs;
use crate::config::{RunSettings, load_config, resolve_settings};
use crate::error::AppResult;
use crate::shutdown::{shutdown_channel, spawn_signal_listener};

/// Parses the command line, resolves settings, and drives one benchmark run to completion.
///
/// # Errors
///
/// Returns an error for invalid arguments or configuration and when the runtime or HTTP
/// client cannot be created. Errors during the run itself are logged and reported instead.
pub fn run() -> AppResult<()> {
    let (args, matches) = parse_args(std::env::args_os())?;

    crate::logger::init_logging(args.verbose, args.no_color);

    let config = load_config(args.config.as_deref())?;
    let settings = resolve_settings(&args, &matches, config.as_ref())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(settings))
}

fn parse_args<I>(raw_args: I) -> AppResult<(BenchArgs, ArgMatches)>
where
    I: IntoIterator<Item = OsString>,
{
    let matches = BenchArgs::command().get_matches_from(raw_args);
    let args = BenchArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

async fn run_async(settings: RunSettings) -> AppResult<()> {
    let (shutdown_tx, shutdown_rx) = shutdown_channel();
    let listener = spawn_signal_listener(&shutdown_tx);

    let outcome = app::run(&settings, shutdown_rx).await;

    drop(shutdown_tx.send(()));
    if let Err(err) = listener.await {
        tracing::debug!("Signal listener ended abnormally: {}", err);
    }

    match outcome? {
        RunOutcome::Completed => tracing::info!("Performance testing finished"),
        RunOutcome::Interrupted => tracing::info!("Partial results reported after interruption"),
        RunOutcome::Failed => tracing::info!("Partial results reported after failure"),
    }
    Ok(())
}
