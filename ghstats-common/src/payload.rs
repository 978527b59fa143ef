use serde::{Deserialize, Serialize};

use crate::datetime::Timestamp;
use crate::error::{Error, Result};

/// Stable identifier of a chart series (a repository slug).
///
/// Distinct from the series' display index, which may change between fetches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesId(String);

impl SeriesId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SeriesId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SeriesId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SeriesId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Chart data returned by the traffic endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPayload {
    /// Effective start of the displayed range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_datetime: Option<Timestamp>,

    /// Effective end of the displayed range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_datetime: Option<Timestamp>,

    /// Series identifier for each dataset, by dataset index.
    #[serde(default)]
    pub dataset_ids: Vec<SeriesId>,

    /// Series data in the chart's native layout.
    pub chart_data: ChartData,
}

impl ChartPayload {
    /// Parse and validate a payload from a JSON body.
    pub fn from_json(body: &[u8]) -> Result<Self> {
        let payload: ChartPayload = serde_json::from_slice(body)?;
        payload.validate()?;
        Ok(payload)
    }

    /// Check that every dataset has a series identifier.
    pub fn validate(&self) -> Result<()> {
        let datasets = self.chart_data.datasets.len();
        if self.dataset_ids.len() != datasets {
            return Err(Error::InvalidPayload(format!(
                "{} dataset ids for {} datasets",
                self.dataset_ids.len(),
                datasets
            )));
        }
        Ok(())
    }

    /// Series identifier for a dataset index.
    pub fn series_id(&self, index: usize) -> Option<&SeriesId> {
        self.dataset_ids.get(index)
    }

    /// Iterate datasets paired with their series identifiers.
    pub fn series(&self) -> impl Iterator<Item = (&SeriesId, &Dataset)> {
        self.dataset_ids.iter().zip(self.chart_data.datasets.iter())
    }

    /// Minimum and maximum point timestamps (epoch millis) across all datasets.
    pub fn data_bounds(&self) -> Option<(i64, i64)> {
        self.chart_data
            .datasets
            .iter()
            .flat_map(|d| d.data.iter())
            .filter_map(|p| p.t.millis())
            .fold(None, |acc, t| match acc {
                None => Some((t, t)),
                Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
            })
    }
}

/// Dataset collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(default)]
    pub datasets: Vec<Dataset>,
}

/// A single line series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Legend label.
    pub label: String,

    /// Points in time order.
    #[serde(default)]
    pub data: Vec<DataPoint>,

    /// Line color (`#rrggbb`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,

    /// Point fill color (`#rrggbb`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,

    #[serde(default)]
    pub fill: bool,

    #[serde(default)]
    pub line_tension: f32,

    /// Draw the line across missing values.
    #[serde(default)]
    pub span_gaps: bool,

    /// Initial visibility chosen by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
}

impl Dataset {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: Vec::new(),
            border_color: None,
            background_color: None,
            fill: false,
            line_tension: 0.0,
            span_gaps: false,
            hidden: None,
        }
    }

    /// Set both line and point colors.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        let color = color.into();
        self.background_color = Some(color.clone());
        self.border_color = Some(color);
        self
    }

    pub fn with_points(mut self, data: Vec<DataPoint>) -> Self {
        self.data = data;
        self
    }
}

/// A `{t, y}` point. `y` is null where the series has no sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub t: Timestamp,
    #[serde(default)]
    pub y: Option<f64>,
}

impl DataPoint {
    pub fn new(t: impl Into<Timestamp>, y: Option<f64>) -> Self {
        Self { t: t.into(), y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r##"{
        "start_datetime": "2018-04-01T00:00:00Z",
        "dataset_ids": ["nocarryr/ghstats", "nocarryr/other"],
        "chart_data": {
            "datasets": [
                {
                    "label": "nocarryr/ghstats Total",
                    "fill": false,
                    "backgroundColor": "#7fdbff",
                    "borderColor": "#7fdbff",
                    "lineTension": 0,
                    "spanGaps": true,
                    "hidden": false,
                    "data": [
                        {"t": "2018-04-01T00:00:00Z", "y": 4},
                        {"t": "2018-04-02T00:00:00Z", "y": null}
                    ]
                },
                {
                    "label": "nocarryr/other Total",
                    "data": [{"t": "2018-04-03T00:00:00Z", "y": 1}]
                }
            ]
        }
    }"##;

    #[test]
    fn test_parse_server_payload() {
        let payload = ChartPayload::from_json(BODY.as_bytes()).unwrap();

        assert_eq!(payload.dataset_ids.len(), 2);
        assert!(payload.end_datetime.is_none());
        assert_eq!(payload.series_id(1), Some(&SeriesId::from("nocarryr/other")));

        let first = &payload.chart_data.datasets[0];
        assert!(first.span_gaps);
        assert_eq!(first.hidden, Some(false));
        assert_eq!(first.border_color.as_deref(), Some("#7fdbff"));
        assert_eq!(first.data[1].y, None);

        let second = &payload.chart_data.datasets[1];
        assert_eq!(second.hidden, None);
        assert!(!second.span_gaps);
    }

    #[test]
    fn test_data_bounds() {
        let payload = ChartPayload::from_json(BODY.as_bytes()).unwrap();
        let (lo, hi) = payload.data_bounds().unwrap();
        assert_eq!(hi - lo, 2 * 86_400_000);
    }

    #[test]
    fn test_mismatched_ids_rejected() {
        let body = r#"{"dataset_ids": ["a"], "chart_data": {"datasets": []}}"#;
        let err = ChartPayload::from_json(body.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidPayload(_)));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = ChartPayload::from_json(b"{not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
