//! CSV dump of raw per-run samples.
//!
//! Layout (one logical record per line, samples on one row):
//!
//! ```text
//! impl,naive
//! num_runs,10000
//! runtimes,812,790,801,...
//! avg,803
//! ```

use std::fs;
use std::io;
use std::path::Path;

use crate::report::RunReport;

/// Write a report's raw samples and final mean as CSV.
pub fn write_samples_csv(path: &Path, report: &RunReport) -> io::Result<()> {
    let mut out = String::new();
    out.push_str(&format!("impl,{}\n", report.kernel));
    out.push_str(&format!("num_runs,{}\n", report.samples.len()));

    out.push_str("runtimes");
    for sample in &report.samples {
        out.push_str(&format!(",{}", sample));
    }
    out.push('\n');

    out.push_str(&format!("avg,{}\n", report.final_mean_ns));

    fs::write(path, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BenchConfig;
    use crate::oracle::Verification;
    use crate::report::{Metadata, Verdict};

    #[test]
    fn test_csv_layout() {
        let report = RunReport {
            kernel: "vectorized".to_string(),
            config: BenchConfig::default(),
            samples: vec![10, 20, 30],
            rounds: Vec::new(),
            final_mean_ns: 20,
            verification: Verification {
                matched: true,
                first_mismatch: None,
            },
            guard_intact: true,
            verdict: Verdict::Success,
            metadata: Metadata {
                runtime_secs: 0.0,
                included_samples: 3,
                excluded_samples: 0,
            },
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runtimes.csv");
        write_samples_csv(&path, &report).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "impl,vectorized\nnum_runs,3\nruntimes,10,20,30\navg,20\n"
        );
    }
}
