//! Terminal output formatting with colors.

use colored::Colorize;

use crate::report::{RunReport, Verdict};

/// Format a RunReport for human-readable terminal output.
pub fn format_report(report: &RunReport) -> String {
    let mut output = String::new();
    let sep = "\u{2500}".repeat(62);

    output.push_str(&format!("matbench: \"{}\" kernel\n", report.kernel));
    output.push_str(&sep);
    output.push('\n');
    output.push('\n');

    let dims = report.config.dims;
    output.push_str(&format!(
        "  Runs: {} (M\u{d7}N\u{d7}P = {}\u{d7}{}\u{d7}{})\n\n",
        report.samples.len(),
        dims.m,
        dims.n,
        dims.p
    ));

    output.push_str(&format!("  Verifying results ... {}\n", format_verdict(report.verdict)));
    if let Some(mismatch) = &report.verification.first_mismatch {
        output.push_str(&format!(
            "    Mismatch at [{},{}] (flat {}): ref={:.7}  got={:.7}\n",
            mismatch.row, mismatch.col, mismatch.index, mismatch.expected, mismatch.actual
        ));
    }
    output.push('\n');

    output.push_str(&format!(
        "  Statistics (> {} stdevs removed):\n",
        report.config.stdev_threshold
    ));
    for stats in &report.rounds {
        output.push_str(&format!(
            "    + Round {}: mean={} ns, stdev={:.2}, excluded={}\n",
            stats.round, stats.mean_ns, stats.stdev_ns, stats.excluded
        ));
    }
    output.push('\n');

    output.push_str(&format!(
        "  Final runtime: {} ns over {} of {} samples\n",
        report.final_mean_ns,
        report.metadata.included_samples,
        report.samples.len()
    ));

    output.push('\n');
    output.push_str(&sep);
    output.push('\n');

    output
}

/// Format the combined verdict for display.
fn format_verdict(verdict: Verdict) -> String {
    match verdict {
        Verdict::Success => "\u{2713} Success".green().bold().to_string(),
        Verdict::Mismatch => "\u{26A0} Fail (mismatch)".yellow().bold().to_string(),
        Verdict::Overrun => "\u{26A0} Fail (overrun)".red().bold().to_string(),
        Verdict::MismatchAndOverrun => "\u{26A0} Fail (mismatch+overrun)".red().bold().to_string(),
    }
}
