use iced::{Point, Rectangle};

use ghstats_common::{ChartPayload, Metric, SeriesId};

use crate::widget::RequestToken;

/// Messages for the ghstats application.
#[derive(Debug, Clone)]
pub enum Message {
    /// User submitted a chart form (or a resubmission was triggered).
    Submit(ChartId),

    /// Chart data request finished.
    ChartLoaded(ChartId, RequestToken, Result<ChartPayload, String>),

    /// User edited the start picker.
    SetStartDatetime(ChartId, String),

    /// User edited the end picker.
    SetEndDatetime(ChartId, String),

    /// User clicked a metric selector button.
    SelectMetric(ChartId, Metric),

    /// User clicked a legend entry (dataset index).
    LegendClicked(ChartId, usize),

    /// Pointer moved; series matched by the nearest-element query.
    Hovered(ChartId, Vec<SeriesId>),

    /// Pointer clicked at a chart-relative position.
    PlotClicked(ChartId, Point, Rectangle),

    /// A click landed on a series inside the plotting area.
    SeriesClicked(ChartId, SeriesId),

    /// User dismissed the selected series.
    ClearSelection,
}

/// Identifier of a chart widget.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChartId(String);

impl ChartId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
