use color_print::cprintln;

use crate::mode::{BuildMode, HARD_LIMIT};

/// Record stream for one verification run. Errors fail the verdict;
/// warnings and notes never do. Records keep emission order so two runs
/// over the same input compare equal.
#[derive(Debug, Default)]
pub struct Report {
    errors: Vec<String>,
    warnings: Vec<String>,
    notes: Vec<String>,
}

impl Report {
    pub fn new() -> Self {
        Report::default()
    }

    pub fn error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    pub fn warn(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn note(&mut self, msg: impl Into<String>) {
        self.notes.push(msg.into());
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }

    /// Final tally. Headroom against the hardware ceiling is shown whatever
    /// the mode thresholds say. Returns the verdict.
    pub fn summary(&self, mode: BuildMode, dgroup_size: u32) -> bool {
        let bar = "=".repeat(60);
        println!("\n{}", bar);
        println!("VERIFICATION SUMMARY ({} mode)", mode);
        println!("{}", bar);

        let headroom = HARD_LIMIT as i64 - dgroup_size as i64;
        println!("\nDGROUP: 0x{:X} ({} bytes)", dgroup_size, dgroup_size);
        println!(
            "Headroom: {} bytes ({:.1} KB)",
            headroom,
            headroom as f64 / 1024.0
        );
        println!(
            "Mode limits: max=0x{:X}, warn=0x{:X}",
            mode.max_size(),
            mode.warn_size()
        );

        if !self.errors.is_empty() {
            cprintln!("\n<red,bold>[ERRORS]</> ({}):", self.errors.len());
            for err in &self.errors {
                cprintln!("  - <red>{}</>", err);
            }
        }
        if !self.warnings.is_empty() {
            cprintln!("\n<yellow,bold>[WARNINGS]</> ({}):", self.warnings.len());
            for warn in &self.warnings {
                cprintln!("  - <yellow>{}</>", warn);
            }
        }

        println!();
        if self.errors.is_empty() {
            if self.warnings.is_empty() {
                cprintln!("  <green,bold>All checks PASSED</>");
            } else {
                cprintln!("  <green>PASSED with warnings</>");
            }
        } else {
            cprintln!("  <red,bold>FAILED</>: {} error(s)", self.errors.len());
        }
        println!("{}", bar);

        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_ignores_warnings() {
        let mut report = Report::new();
        report.warn("approaching limit");
        report.note("composition entry");
        assert!(report.passed());
        report.error("overflow");
        assert!(!report.passed());
    }

    #[test]
    fn test_records_keep_order() {
        let mut report = Report::new();
        report.error("first");
        report.error("second");
        assert_eq!(report.errors(), ["first", "second"]);
    }
}
