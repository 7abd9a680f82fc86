//! Scraper for the human-readable `dcm calculate-metrics --report-all` output.
//!
//! The labels below are tied to the tool's text format; run the `parse`
//! subcommand on a captured report to check them against a new tool release.

use tracing::debug;

use crate::models::metrics::{Metric, MetricCounts};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Last matching line wins
    Assign,
    /// Values from every matching line are summed
    Accumulate,
}

struct Rule {
    /// Substring identifying the line
    label: &'static str,
    /// Text after the label that precedes the number
    separator: &'static str,
    metric: Metric,
    mode: Mode,
}

/// Checked in order; the first rule whose label occurs in a line owns it.
static RULES: [Rule; 7] = [
    Rule {
        label: "SLOC",
        separator: "sum: ",
        metric: Metric::Sloc,
        mode: Mode::Assign,
    },
    Rule {
        label: "Scanned classes:",
        separator: "",
        metric: Metric::Noc,
        mode: Mode::Assign,
    },
    Rule {
        label: "number of methods",
        separator: ": ",
        metric: Metric::Nom,
        mode: Mode::Accumulate,
    },
    Rule {
        label: "depth of inheritance tree",
        separator: ": ",
        metric: Metric::Dit,
        mode: Mode::Accumulate,
    },
    Rule {
        label: "response for a class",
        separator: ": ",
        metric: Metric::Rfc,
        mode: Mode::Accumulate,
    },
    Rule {
        label: "coupling between object classes",
        separator: ": ",
        metric: Metric::Cbo,
        mode: Mode::Accumulate,
    },
    Rule {
        label: "weighted methods per class",
        separator: ": ",
        metric: Metric::Wmc,
        mode: Mode::Accumulate,
    },
];

/// Extract the seven metrics from an analyzer report.
///
/// Lines that match a label but carry no readable number are skipped.
pub fn parse_report(output: &str) -> MetricCounts {
    let mut counts = MetricCounts::default();

    for line in output.lines() {
        let Some(rule) = RULES.iter().find(|r| line.contains(r.label)) else {
            continue;
        };
        match extract_value(line, rule) {
            Some(value) => match rule.mode {
                Mode::Assign => counts.set(rule.metric, value),
                Mode::Accumulate => counts.add(rule.metric, value),
            },
            None => debug!(metric = %rule.metric, line, "no value on matching line"),
        }
    }

    counts
}

fn extract_value(line: &str, rule: &Rule) -> Option<u64> {
    let after_label = &line[line.find(rule.label)? + rule.label.len()..];
    let after_sep = &after_label[after_label.find(rule.separator)? + rule.separator.len()..];
    leading_integer(after_sep.trim_start())
}

/// Parse the digit run at the start of `s`, so `"12 (avg 3)"` and `"7,"` both work.
fn leading_integer(s: &str) -> Option<u64> {
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(s.len(), |(i, _)| i);
    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Analyzing lib/...
lib/src/user.dart:
    class User
        number of methods: 4 (threshold 0)
        depth of inheritance tree: 1 (threshold 0)
        response for a class: 9 (threshold 0)
        coupling between object classes: 2 (threshold 0)
        weighted methods per class: 6
    class Account
        number of methods: 3 (threshold 0)
        depth of inheritance tree: 2 (threshold 0)
        response for a class: 5 (threshold 0)
        coupling between object classes: 1 (threshold 0)
        weighted methods per class: 3

SLOC (source lines of code) sum: 120
Scanned classes: 5
";

    #[test]
    fn test_sample_report() {
        let counts = parse_report(SAMPLE);
        assert_eq!(counts.get(Metric::Sloc), 120);
        assert_eq!(counts.get(Metric::Noc), 5);
        assert_eq!(counts.get(Metric::Nom), 7);
        assert_eq!(counts.get(Metric::Dit), 3);
        assert_eq!(counts.get(Metric::Rfc), 14);
        assert_eq!(counts.get(Metric::Cbo), 3);
        assert_eq!(counts.get(Metric::Wmc), 9);
    }

    #[test]
    fn test_empty_output_is_all_zero() {
        assert_eq!(parse_report(""), MetricCounts::default());
        assert_eq!(
            parse_report("dcm: command not found\n"),
            MetricCounts::default()
        );
    }

    #[test]
    fn test_assign_metrics_keep_last_value() {
        let counts = parse_report("SLOC sum: 10\nSLOC sum: 30\nScanned classes: 2\nScanned classes: 4\n");
        assert_eq!(counts.get(Metric::Sloc), 30);
        assert_eq!(counts.get(Metric::Noc), 4);
    }

    #[test]
    fn test_unreadable_value_is_skipped() {
        let counts = parse_report(
            "SLOC (source lines of code)\nnumber of methods: n/a\nnumber of methods: 2\n",
        );
        assert_eq!(counts.get(Metric::Sloc), 0);
        assert_eq!(counts.get(Metric::Nom), 2);
    }

    #[test]
    fn test_first_rule_owns_the_line() {
        // Contains both "SLOC" and a methods label; only SLOC applies.
        let counts = parse_report("SLOC sum: 50, number of methods: 3\n");
        assert_eq!(counts.get(Metric::Sloc), 50);
        assert_eq!(counts.get(Metric::Nom), 0);
    }

    #[test]
    fn test_leading_integer() {
        assert_eq!(leading_integer("12 (avg 3)"), Some(12));
        assert_eq!(leading_integer("7,"), Some(7));
        assert_eq!(leading_integer("42"), Some(42));
        assert_eq!(leading_integer("-1"), None);
        assert_eq!(leading_integer(""), None);
    }
}
