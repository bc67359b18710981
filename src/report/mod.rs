//! Report Rendering Module
//!
//! Formats a [`Measurement`] as the human-readable statistics report
//! printed after the child exits: one labeled line per field, in fixed
//! order. Color is decided once by the caller and passed in explicitly;
//! nothing here inspects the terminal.

use colored::Colorize;

use crate::measure::Measurement;

/// CPU-time share of elapsed time, in percent.
///
/// Returns `None` when elapsed time is zero, so callers never divide by
/// zero. The result can exceed 100% for multi-threaded children, since
/// CPU time accumulates across cores while elapsed time does not.
pub fn percentage_of_elapsed(component_seconds: f64, elapsed_seconds: f64) -> Option<f64> {
    if elapsed_seconds == 0.0 {
        None
    } else {
        Some(100.0 * component_seconds / elapsed_seconds)
    }
}

/// Formats a percentage with one decimal, or `n/a` for a zero elapsed time.
fn format_percentage(component_seconds: f64, elapsed_seconds: f64) -> String {
    match percentage_of_elapsed(component_seconds, elapsed_seconds) {
        Some(pct) => format!("{:.1}%", pct),
        None => "n/a".to_string(),
    }
}

/// Renders the full statistics report.
///
/// Field order and labels are fixed; times are printed with two decimals,
/// percentages with one. With `color_enabled` the elapsed-time line is
/// highlighted in bold green.
pub fn render(m: &Measurement, color_enabled: bool) -> String {
    let mut out = String::new();

    out.push_str(&format!("Exit code      : {}\n", m.exit_code));

    let elapsed_line = format!("Elapsed time   : {:.2}", m.elapsed_seconds);
    if color_enabled {
        out.push_str(&format!("{}\n", elapsed_line.green().bold()));
    } else {
        out.push_str(&elapsed_line);
        out.push('\n');
    }

    out.push_str(&format!(
        "Kernel time    : {:.2} ({})\n",
        m.kernel_seconds,
        format_percentage(m.kernel_seconds, m.elapsed_seconds)
    ));
    out.push_str(&format!(
        "User time      : {:.2} ({})\n",
        m.user_seconds,
        format_percentage(m.user_seconds, m.elapsed_seconds)
    ));

    out.push_str(&format!("Page fault #   : {}\n", m.page_fault_count));
    out.push_str(&format!("Working set    : {} KB\n", m.peak_working_set_kb));
    out.push_str(&format!("Paged pool     : {} KB\n", m.paged_pool_kb));
    out.push_str(&format!("Non-paged pool : {} KB\n", m.nonpaged_pool_kb));
    out.push_str(&format!("Page file size : {} KB\n", m.peak_pagefile_kb));

    out
}

/// Prints the report to standard output.
pub fn print_report(m: &Measurement, color_enabled: bool) {
    print!("{}", render(m, color_enabled));
}
