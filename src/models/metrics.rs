use serde::Serialize;
use std::fmt;

/// One of the seven metrics collected per repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Source lines of code
    Sloc,
    /// Number of classes scanned
    Noc,
    /// Number of methods
    Nom,
    /// Depth of inheritance tree
    Dit,
    /// Response for a class
    Rfc,
    /// Coupling between object classes
    Cbo,
    /// Weighted methods per class
    Wmc,
}

impl Metric {
    /// All metrics in CSV column order.
    pub const ALL: [Metric; 7] = [
        Metric::Sloc,
        Metric::Noc,
        Metric::Nom,
        Metric::Dit,
        Metric::Rfc,
        Metric::Cbo,
        Metric::Wmc,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Short upper-case label used in progress lines.
    pub fn label(self) -> &'static str {
        match self {
            Self::Sloc => "SLOC",
            Self::Noc => "NOC",
            Self::Nom => "NOM",
            Self::Dit => "DIT",
            Self::Rfc => "RFC",
            Self::Cbo => "CBO",
            Self::Wmc => "WMC",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Interim metric values keyed by [`Metric`], filled while scanning a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricCounts([u64; 7]);

impl MetricCounts {
    pub fn get(&self, metric: Metric) -> u64 {
        self.0[metric.index()]
    }

    pub fn set(&mut self, metric: Metric, value: u64) {
        self.0[metric.index()] = value;
    }

    /// Add to the running total, saturating at `u64::MAX`.
    pub fn add(&mut self, metric: Metric, value: u64) {
        let slot = &mut self.0[metric.index()];
        *slot = slot.saturating_add(value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, u64)> + '_ {
        Metric::ALL.into_iter().map(move |m| (m, self.get(m)))
    }
}

impl Serialize for MetricCounts {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(Metric::ALL.len()))?;
        for (metric, value) in self.iter() {
            map.serialize_entry(&metric, &value)?;
        }
        map.end()
    }
}

/// Per-repository result row, written to the CSV in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsRecord {
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "SLOC (Source Lines of Code)")]
    pub sloc: u64,
    #[serde(rename = "NOC (Number of Classes)")]
    pub noc: u64,
    #[serde(rename = "NOM (Number of Methods)")]
    pub nom: u64,
    #[serde(rename = "DIT (Depth of Inheritance Tree)")]
    pub dit: u64,
    #[serde(rename = "RFC (Response for Class)")]
    pub rfc: u64,
    #[serde(rename = "CBO (Coupling Between Object Classes)")]
    pub cbo: u64,
    #[serde(rename = "WMC (Weighted Methods per Class)")]
    pub wmc: u64,
}

impl MetricsRecord {
    /// CSV header row, matching the serde renames above.
    pub const HEADERS: [&'static str; 8] = [
        "URL",
        "SLOC (Source Lines of Code)",
        "NOC (Number of Classes)",
        "NOM (Number of Methods)",
        "DIT (Depth of Inheritance Tree)",
        "RFC (Response for Class)",
        "CBO (Coupling Between Object Classes)",
        "WMC (Weighted Methods per Class)",
    ];

    /// A record with every metric at zero.
    pub fn empty(url: impl Into<String>) -> Self {
        Self::from_counts(url, &MetricCounts::default())
    }

    pub fn from_counts(url: impl Into<String>, counts: &MetricCounts) -> Self {
        Self {
            url: url.into(),
            sloc: counts.get(Metric::Sloc),
            noc: counts.get(Metric::Noc),
            nom: counts.get(Metric::Nom),
            dit: counts.get(Metric::Dit),
            rfc: counts.get(Metric::Rfc),
            cbo: counts.get(Metric::Cbo),
            wmc: counts.get(Metric::Wmc),
        }
    }

    /// `SLOC: 120, NOC: 5, ...` in column order.
    pub fn metrics_line(&self) -> String {
        [
            (Metric::Sloc, self.sloc),
            (Metric::Noc, self.noc),
            (Metric::Nom, self.nom),
            (Metric::Dit, self.dit),
            (Metric::Rfc, self.rfc),
            (Metric::Cbo, self.cbo),
            (Metric::Wmc, self.wmc),
        ]
        .iter()
        .map(|(m, v)| format!("{m}: {v}"))
        .collect::<Vec<_>>()
        .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_accumulates_and_saturates() {
        let mut counts = MetricCounts::default();
        counts.add(Metric::Nom, 3);
        counts.add(Metric::Nom, 4);
        assert_eq!(counts.get(Metric::Nom), 7);

        counts.set(Metric::Cbo, u64::MAX - 1);
        counts.add(Metric::Cbo, 10);
        assert_eq!(counts.get(Metric::Cbo), u64::MAX);
    }

    #[test]
    fn test_empty_record_is_all_zero() {
        let record = MetricsRecord::empty("https://example.com/repo.git");
        assert_eq!(record.url, "https://example.com/repo.git");
        assert_eq!(
            record.metrics_line(),
            "SLOC: 0, NOC: 0, NOM: 0, DIT: 0, RFC: 0, CBO: 0, WMC: 0"
        );
    }

    #[test]
    fn test_from_counts_maps_each_column() {
        let mut counts = MetricCounts::default();
        for (i, metric) in Metric::ALL.iter().enumerate() {
            counts.set(*metric, (i as u64 + 1) * 10);
        }
        let record = MetricsRecord::from_counts("u", &counts);
        assert_eq!(
            (record.sloc, record.noc, record.nom, record.dit),
            (10, 20, 30, 40)
        );
        assert_eq!((record.rfc, record.cbo, record.wmc), (50, 60, 70));
    }

    #[test]
    fn test_counts_serialize_as_lowercase_map() {
        let mut counts = MetricCounts::default();
        counts.set(Metric::Sloc, 120);
        let json = serde_json::to_value(counts).unwrap();
        assert_eq!(json["sloc"], 120);
        assert_eq!(json["wmc"], 0);
        assert_eq!(json.as_object().unwrap().len(), 7);
    }
}
