//! Output formatting for engine reports

use chrono::TimeDelta;
use itertools::Itertools;
use recurrence_engine::RecurrenceValue;

use crate::executor::{EngineRun, Report, Triangle, describe};

/// Output formatter for engine reports
pub struct OutputFormatter {
    quiet: bool,
    start_time: std::time::Instant,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: std::time::Instant::now(),
        }
    }

    /// Format and print a report
    pub fn print_report<V: RecurrenceValue>(&self, report: &Report<V>) {
        if self.quiet {
            println!("{}", report.recursive.value);
        } else {
            print!("{}", format_report(report));
        }
    }

    /// Print timings of both engines and the elapsed wall-clock time
    pub fn print_summary<V: RecurrenceValue>(&self, report: &Report<V>) {
        if self.quiet {
            return;
        }

        let compared = report
            .recursive
            .triangle
            .as_ref()
            .map_or(1, |triangle| triangle.cell_count() + 1);

        println!();
        println!("--- Summary ---");
        for run in [&report.recursive, &report.iterative] {
            println!("{} engine: {}", run.engine, format_run_time(run));
        }
        println!("Cached pairs: {}", report.cached_pairs);
        println!("Engines agree on {} values", compared);
        println!(
            "Elapsed wall-clock time: {}",
            format_std_duration(self.start_time.elapsed())
        );
    }
}

/// Headline value followed by the triangle of each engine
fn format_report<V: RecurrenceValue>(report: &Report<V>) -> String {
    let mut out = format!("A({}, {}) = {}\n", report.n, report.m, report.recursive.value);

    for (heading, run) in [
        ("Calculating with recursion:", &report.recursive),
        ("Calculating without recursion:", &report.iterative),
    ] {
        if let Some(triangle) = &run.triangle {
            out.push('\n');
            out.push_str(heading);
            out.push('\n');
            out.push_str(&format_triangle(triangle));
        }
    }

    out
}

/// One line per row: `n=i: v  v  v`
fn format_triangle<V: RecurrenceValue>(triangle: &Triangle<V>) -> String {
    triangle
        .rows()
        .iter()
        .zip(1..)
        .map(|(row, i)| format!("n={}: {}\n", i, row.iter().map(describe).join("  ")))
        .collect()
}

fn format_run_time<V>(run: &EngineRun<V>) -> String {
    TimeDelta::from_std(run.duration)
        .map(format_duration)
        .unwrap_or_else(|_| "N/A".to_string())
}

/// Format a TimeDelta for display
fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

/// Format a std::time::Duration for display (used for wall-clock time)
fn format_std_duration(d: std::time::Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}
