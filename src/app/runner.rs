use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info};

use crate::args::{LoadConfig, PositiveUsize};
use crate::error::AppResult;
use crate::http::{AdmissionController, RequestExecutor};
use crate::metrics::{Outcome, Sampler, Snapshot};
use crate::shutdown::ShutdownReceiver;
use crate::ui::Reporter;

/// Time between non-final renders.
const RENDER_INTERVAL: Duration = Duration::from_secs(1);
/// Timer wakes land up to about a millisecond late, and a full bucket drops
/// the overshoot. The loop wakes this far ahead of the next token and yields
/// through the remainder.
const TIMER_SLACK: Duration = Duration::from_millis(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StopReason {
    DurationElapsed,
    Interrupted,
}

#[derive(Debug)]
pub(crate) struct RunReport {
    pub stop_reason: StopReason,
    pub snapshot: Snapshot,
}

/// Drives one run: drains outcomes, admits and launches requests, and
/// renders once per second until the run duration elapses or a shutdown
/// arrives. Requests still in flight at stop are abandoned.
///
/// # Errors
///
/// Returns an error when the report cannot be written.
pub(crate) async fn run_dispatch<E, W>(
    executor: &Arc<E>,
    config: &LoadConfig,
    reporter: &mut Reporter<W>,
    mut shutdown_rx: ShutdownReceiver,
) -> AppResult<RunReport>
where
    E: RequestExecutor,
    W: Write,
{
    let (outcome_tx, mut outcome_rx) = mpsc::channel::<Outcome>(config.outcome_queue_capacity);
    let start = Instant::now();
    let deadline = config
        .run_duration
        .and_then(|duration| start.checked_add(duration));
    let mut admission = AdmissionController::starting_at(config.rate, start);
    let mut sampler = Sampler::new();
    let mut last_render = start;
    let mut shutdown_open = true;

    loop {
        let mut progressed = false;
        while let Ok(outcome) = outcome_rx.try_recv() {
            sampler.ingest(outcome);
            progressed = true;
        }

        let below_cap = has_capacity(&sampler, config.max_in_flight);
        if below_cap && admission.try_admit_at(Instant::now()) {
            launch_request(executor, &outcome_tx);
            sampler.record_issued();
            progressed = true;
        }

        let now = Instant::now();
        if now.saturating_duration_since(last_render) >= RENDER_INTERVAL {
            reporter.render(&sampler.snapshot(now.saturating_duration_since(start)), false)?;
            last_render = now;
        }

        if deadline.is_some_and(|deadline| now >= deadline) {
            info!("Run duration elapsed");
            return finish(&mut sampler, start, reporter, StopReason::DurationElapsed);
        }

        if shutdown_open {
            match shutdown_rx.try_recv() {
                Ok(()) | Err(TryRecvError::Lagged(_)) => {
                    info!("Shutdown requested");
                    return finish(&mut sampler, start, reporter, StopReason::Interrupted);
                }
                Err(TryRecvError::Closed) => shutdown_open = false,
                Err(TryRecvError::Empty) => {}
            }
        }

        if progressed {
            tokio::task::yield_now().await;
            continue;
        }

        let mut wake_at = last_render.checked_add(RENDER_INTERVAL).unwrap_or(now);
        if let Some(deadline) = deadline {
            wake_at = wake_at.min(deadline);
        }
        if below_cap {
            let token_wait = admission.time_until_next(now);
            if token_wait <= TIMER_SLACK {
                tokio::task::yield_now().await;
                continue;
            }
            if let Some(early_wake) = now.checked_add(token_wait.saturating_sub(TIMER_SLACK)) {
                wake_at = wake_at.min(early_wake);
            }
        }

        tokio::select! {
            received = outcome_rx.recv() => {
                if let Some(outcome) = received {
                    sampler.ingest(outcome);
                }
            }
            signal = shutdown_rx.recv(), if shutdown_open => {
                match signal {
                    Ok(()) | Err(RecvError::Lagged(_)) => {
                        info!("Shutdown requested");
                        return finish(&mut sampler, start, reporter, StopReason::Interrupted);
                    }
                    Err(RecvError::Closed) => {
                        shutdown_open = false;
                    }
                }
            }
            () = sleep_until(wake_at) => {}
        }
    }
}

fn has_capacity(sampler: &Sampler, max_in_flight: Option<PositiveUsize>) -> bool {
    max_in_flight.is_none_or(|cap| {
        let cap = u64::try_from(cap.get()).unwrap_or(u64::MAX);
        sampler.in_flight() < cap
    })
}

fn launch_request<E: RequestExecutor>(executor: &Arc<E>, outcome_tx: &mpsc::Sender<Outcome>) {
    let executor = Arc::clone(executor);
    let outcome_tx = outcome_tx.clone();
    tokio::spawn(async move {
        let outcome = executor.execute().await;
        if outcome_tx.send(outcome).await.is_err() {
            debug!("Outcome dropped after run stopped");
        }
    });
}

fn finish<W: Write>(
    sampler: &mut Sampler,
    start: Instant,
    reporter: &mut Reporter<W>,
    stop_reason: StopReason,
) -> AppResult<RunReport> {
    let snapshot = sampler.snapshot(start.elapsed());
    reporter.render(&snapshot, true)?;
    Ok(RunReport {
        stop_reason,
        snapshot,
    })
}
