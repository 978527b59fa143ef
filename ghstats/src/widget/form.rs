//! Query form bound to a chart.

use reqwest::Url;

use ghstats_common::{ChartConfig, Error, Metric, Result};

use super::hidden::HiddenSeries;
use super::visibility::SeriesToggled;
use crate::view::formatting::format_picker_value;

/// Form fields submitted with every chart data request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartForm {
    action: String,
    start_datetime: String,
    end_datetime: String,
    data_metric: String,
    hidden: HiddenSeries,
}

impl ChartForm {
    /// Build the form from its initial values.
    ///
    /// Initial picker values are normalized to the picker format.
    pub fn from_config(config: &ChartConfig) -> Self {
        let picker = |value: &Option<String>| {
            value
                .as_deref()
                .and_then(|v| format_picker_value(v))
                .unwrap_or_default()
        };

        Self {
            action: config.action.clone(),
            start_datetime: picker(&config.start_datetime),
            end_datetime: picker(&config.end_datetime),
            data_metric: config.metric.as_str().to_string(),
            hidden: HiddenSeries::from_field_value(&config.hidden_series.join(",")),
        }
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn start_datetime(&self) -> &str {
        &self.start_datetime
    }

    pub fn end_datetime(&self) -> &str {
        &self.end_datetime
    }

    pub fn set_start_datetime(&mut self, value: String) {
        self.start_datetime = value;
    }

    pub fn set_end_datetime(&mut self, value: String) {
        self.end_datetime = value;
    }

    /// Current `data_metric` field value.
    pub fn data_metric(&self) -> &str {
        &self.data_metric
    }

    pub fn set_data_metric(&mut self, metric: Metric) {
        self.data_metric = metric.as_str().to_string();
    }

    pub fn hidden(&self) -> &HiddenSeries {
        &self.hidden
    }

    /// Record a legend toggle in the hidden-series field.
    pub fn apply_toggle(&mut self, event: &SeriesToggled) -> bool {
        self.hidden.apply(&event.id, event.hidden)
    }

    /// Serialized fields, in form order.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("start_datetime", self.start_datetime.clone()),
            ("end_datetime", self.end_datetime.clone()),
            ("data_metric", self.data_metric.clone()),
            ("hidden_repos", self.hidden.field_value()),
        ]
    }

    /// Request URL: the action resolved against `base`, with all fields as query parameters.
    pub fn request_url(&self, base: &Url) -> Result<Url> {
        let mut url = base
            .join(&self.action)
            .map_err(|e| Error::Url(format!("{}: {}", self.action, e)))?;
        url.query_pairs_mut().extend_pairs(self.fields());
        Ok(url)
    }
}
