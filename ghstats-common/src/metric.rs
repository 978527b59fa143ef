use serde::{Deserialize, Serialize};

/// Traffic metric plotted by a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Total page views.
    #[default]
    Count,
    /// Unique visitors.
    Uniques,
}

impl Metric {
    /// All available metrics.
    pub const ALL: &'static [Metric] = &[Metric::Count, Metric::Uniques];

    /// Value sent in the `data_metric` query field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Count => "count",
            Metric::Uniques => "uniques",
        }
    }

    /// Parse a `data_metric` field value.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "count" => Some(Metric::Count),
            "uniques" => Some(Metric::Uniques),
            _ => None,
        }
    }

    /// Button label.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Count => "Total",
            Metric::Uniques => "Uniques",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_parse() {
        assert_eq!(Metric::parse("count"), Some(Metric::Count));
        assert_eq!(Metric::parse("uniques"), Some(Metric::Uniques));
        assert_eq!(Metric::parse("Count"), None);
        for metric in Metric::ALL {
            assert_eq!(Metric::parse(metric.as_str()), Some(*metric));
        }
    }
}
