use std::ffi::OsString;
use std::sync::Arc;

use clap::error::ErrorKind;
use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tracing::info;

use crate::app::{StopReason, run_dispatch};
use crate::args::{LoadArgs, LoadConfig};
use crate::config::{apply_config, load_config};
use crate::error::{AppError, AppResult};
use crate::http::build_executor;
use crate::shutdown::{setup_signal_shutdown_handler, shutdown_channel};
use crate::ui::Reporter;

/// Parses arguments, resolves configuration, and runs the load until the
/// configured duration elapses or the process is interrupted.
///
/// # Errors
///
/// Returns an error for invalid arguments, configuration, or headers, and
/// when the report cannot be written.
pub fn run() -> AppResult<()> {
    run_from(std::env::args_os())
}

pub(crate) fn run_from<I>(raw_args: I) -> AppResult<()>
where
    I: IntoIterator<Item = OsString>,
{
    let Some((mut args, matches)) = parse_args(raw_args)? else {
        return Ok(());
    };

    crate::logger::init_logging(args.verbose);

    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, &matches, &config)?;
    }
    let config = LoadConfig::try_from(args).map_err(AppError::validation)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(run_async(config));
    // Requests still in flight are abandoned rather than awaited.
    runtime.shutdown_background();
    result
}

fn parse_args<I>(raw_args: I) -> AppResult<Option<(LoadArgs, ArgMatches)>>
where
    I: IntoIterator<Item = OsString>,
{
    let matches = match LoadArgs::command().try_get_matches_from(raw_args) {
        Ok(matches) => matches,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.print()?;
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };
    let args = LoadArgs::from_arg_matches(&matches)?;
    Ok(Some((args, matches)))
}

async fn run_async(config: LoadConfig) -> AppResult<()> {
    let executor = Arc::new(build_executor(&config).map_err(AppError::http)?);
    info!(
        "Sending GET {} at {} requests/sec",
        config.address, config.rate
    );

    let (shutdown_tx, shutdown_rx) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);
    let mut reporter = Reporter::stdout(config.run_duration);

    let result = run_dispatch(&executor, &config, &mut reporter, shutdown_rx).await;

    drop(shutdown_tx.send(()));
    signal_handle.await?;

    let report = result?;
    match report.stop_reason {
        StopReason::DurationElapsed => info!("Run finished"),
        StopReason::Interrupted => info!("Run interrupted"),
    }
    Ok(())
}
