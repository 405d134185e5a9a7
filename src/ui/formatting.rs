use std::time::Duration;

const NANOS_PER_MILLI: u128 = 1_000_000;
const HALF_MILLI_NANOS: u128 = 500_000;
const MS_PER_SEC: u128 = 1_000;
const MS_PER_MIN: u128 = 60_000;
const MS_PER_HOUR: u128 = 3_600_000;
const RPS_DIVISOR: u64 = 100;

/// Formats an x100 fixed-point rate with two decimals (`250` -> `2.50`).
#[must_use]
pub fn format_rps_x100(rps_x100: u64) -> String {
    let whole = rps_x100.checked_div(RPS_DIVISOR).unwrap_or(0);
    let frac = rps_x100.checked_rem(RPS_DIVISOR).unwrap_or(0);
    format!("{whole}.{frac:02}")
}

/// Rounds to the nearest millisecond, halves away from zero.
#[must_use]
pub(crate) fn round_to_millis(duration: Duration) -> Duration {
    let millis = duration
        .as_nanos()
        .saturating_add(HALF_MILLI_NANOS)
        .checked_div(NANOS_PER_MILLI)
        .unwrap_or(0);
    Duration::from_millis(u64::try_from(millis).unwrap_or(u64::MAX))
}

#[must_use]
pub(crate) fn truncate_to_secs(duration: Duration) -> Duration {
    Duration::from_secs(duration.as_secs())
}

/// Compact h/m/s rendering at millisecond precision: `0s`, `12ms`, `1.5s`,
/// `1m30s`, `1h0m0s`. Sub-millisecond parts are dropped.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();
    if total_ms == 0 {
        return "0s".to_owned();
    }
    if total_ms < MS_PER_SEC {
        return format!("{total_ms}ms");
    }

    let hours = total_ms.checked_div(MS_PER_HOUR).unwrap_or(0);
    let minutes = total_ms
        .checked_rem(MS_PER_HOUR)
        .and_then(|rest| rest.checked_div(MS_PER_MIN))
        .unwrap_or(0);
    let secs = total_ms
        .checked_rem(MS_PER_MIN)
        .and_then(|rest| rest.checked_div(MS_PER_SEC))
        .unwrap_or(0);
    let frac_ms = total_ms.checked_rem(MS_PER_SEC).unwrap_or(0);

    let seconds = if frac_ms == 0 {
        format!("{secs}s")
    } else {
        let digits = format!("{frac_ms:03}");
        format!("{secs}.{}s", digits.trim_end_matches('0'))
    };

    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}")
    } else {
        seconds
    }
}
