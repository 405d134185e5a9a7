use super::*;
use crate::metrics::Snapshot;
use std::collections::BTreeMap;
use std::time::Duration;

fn sample_snapshot() -> Snapshot {
    Snapshot {
        elapsed: Duration::from_millis(2_700),
        requests_issued: 14,
        success_count: 10,
        error_count: 3,
        rps_x100: 519,
        avg_latency: Duration::from_micros(10_400),
        p90: Duration::from_micros(12_600),
        p95: Duration::from_millis(14),
        p99: Duration::from_millis(1_500),
        error_tally: BTreeMap::from([("timeout".to_owned(), 1), ("500".to_owned(), 2)]),
    }
}

#[test]
fn format_duration_compact_forms() -> Result<(), String> {
    let cases = [
        (Duration::ZERO, "0s"),
        (Duration::from_millis(12), "12ms"),
        (Duration::from_millis(1_500), "1.5s"),
        (Duration::from_millis(1_250), "1.25s"),
        (Duration::from_secs(2), "2s"),
        (Duration::from_secs(90), "1m30s"),
        (Duration::from_secs(3_600), "1h0m0s"),
        (Duration::from_micros(900), "0s"),
    ];
    for (input, expected) in cases {
        let formatted = format_duration(input);
        if formatted != expected {
            return Err(format!("{:?} formatted as {}, expected {}", input, formatted, expected));
        }
    }
    Ok(())
}

#[test]
fn format_rps_uses_two_decimals() -> Result<(), String> {
    for (input, expected) in [(0, "0.00"), (5, "0.05"), (250, "2.50"), (100_000, "1000.00")] {
        let formatted = format_rps_x100(input);
        if formatted != expected {
            return Err(format!("{} formatted as {}, expected {}", input, formatted, expected));
        }
    }
    Ok(())
}

#[test]
fn report_lines_sort_errors_and_keys() -> Result<(), String> {
    let lines = report_lines(&sample_snapshot(), Some(Duration::from_secs(30)), false);
    let expected = vec![
        "Error 500: 2".to_owned(),
        "Error timeout: 1".to_owned(),
        "avg duration: 10ms duration: 30s elapsed: 2s error count: 3 requests: 14 rps: 5.19 success count: 10"
            .to_owned(),
    ];
    if lines != expected {
        return Err(format!("Unexpected lines: {:?}", lines));
    }
    Ok(())
}

#[test]
fn final_report_adds_percentiles() -> Result<(), String> {
    let lines = report_lines(&sample_snapshot(), None, true);
    let last = lines.last().ok_or("Missing lines")?;
    if last != "p99: 1.5s, p95: 14ms, p90: 13ms" {
        return Err(format!("Unexpected percentile line: {}", last));
    }
    if lines.iter().any(|line| line.contains("duration: 30s")) {
        return Err("Unbounded run must not report a duration".to_owned());
    }
    Ok(())
}

#[test]
fn reporter_writes_plain_text_without_terminal() -> Result<(), String> {
    let mut reporter = Reporter::new(Vec::new(), false, None);
    reporter
        .render(&Snapshot::default(), true)
        .map_err(|err| err.to_string())?;
    let output = String::from_utf8(reporter.into_inner()).map_err(|err| err.to_string())?;
    let expected = "avg duration: 0s elapsed: 0s error count: 0 requests: 0 rps: 0.00 success count: 0\np99: 0s, p95: 0s, p90: 0s\n";
    if output != expected {
        return Err(format!("Unexpected output: {:?}", output));
    }
    Ok(())
}

#[test]
fn reporter_clears_screen_on_terminal() -> Result<(), String> {
    let mut reporter = Reporter::new(Vec::new(), true, None);
    reporter
        .render(&Snapshot::default(), false)
        .map_err(|err| err.to_string())?;
    let output = reporter.into_inner();
    if !output.starts_with(b"\x1b[2J") {
        return Err(format!("Expected clear sequence, got {:?}", output));
    }
    Ok(())
}
