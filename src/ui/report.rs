use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use crossterm::{
    cursor, queue,
    terminal::{Clear, ClearType},
};

use crate::metrics::Snapshot;

use super::formatting::{format_duration, format_rps_x100, round_to_millis, truncate_to_secs};

/// Writes snapshots as a block of text, replacing the previous block when
/// the output is a terminal.
pub struct Reporter<W: Write> {
    out: W,
    clear_screen: bool,
    run_duration: Option<Duration>,
}

impl Reporter<io::Stdout> {
    /// Reports to stdout, clearing the screen only when stdout is a terminal.
    #[must_use]
    pub fn stdout(run_duration: Option<Duration>) -> Self {
        let out = io::stdout();
        let clear_screen = out.is_terminal();
        Self::new(out, clear_screen, run_duration)
    }
}

impl<W: Write> Reporter<W> {
    #[must_use]
    pub const fn new(out: W, clear_screen: bool, run_duration: Option<Duration>) -> Self {
        Self {
            out,
            clear_screen,
            run_duration,
        }
    }

    /// Renders one report. The final report adds latency percentiles.
    ///
    /// # Errors
    ///
    /// Returns an error when the output cannot be written.
    pub fn render(&mut self, snapshot: &Snapshot, final_render: bool) -> io::Result<()> {
        if self.clear_screen {
            queue!(self.out, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        }
        for line in report_lines(snapshot, self.run_duration, final_render) {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Report text: error categories (by name), then the metrics line with
/// keys in alphabetical order, then percentiles when `final_render`.
#[must_use]
pub fn report_lines(
    snapshot: &Snapshot,
    run_duration: Option<Duration>,
    final_render: bool,
) -> Vec<String> {
    let mut lines: Vec<String> = snapshot
        .error_tally
        .iter()
        .map(|(category, count)| format!("Error {category}: {count}"))
        .collect();

    let mut fields = vec![format!(
        "avg duration: {}",
        format_duration(round_to_millis(snapshot.avg_latency))
    )];
    if let Some(duration) = run_duration {
        fields.push(format!("duration: {}", format_duration(duration)));
    }
    fields.push(format!(
        "elapsed: {}",
        format_duration(truncate_to_secs(snapshot.elapsed))
    ));
    fields.push(format!("error count: {}", snapshot.error_count));
    fields.push(format!("requests: {}", snapshot.requests_issued));
    fields.push(format!("rps: {}", format_rps_x100(snapshot.rps_x100)));
    fields.push(format!("success count: {}", snapshot.success_count));
    lines.push(fields.join(" "));

    if final_render {
        lines.push(format!(
            "p99: {}, p95: {}, p90: {}",
            format_duration(round_to_millis(snapshot.p99)),
            format_duration(round_to_millis(snapshot.p95)),
            format_duration(round_to_millis(snapshot.p90))
        ));
    }
    lines
}
