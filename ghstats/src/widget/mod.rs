//! Chart widget state: one per configured chart.
//!
//! A [`ChartWidget`] owns its query form, the last payload, the live chart
//! instance and the hover target. Handlers receive the widget by reference
//! from the application; no state is kept anywhere else.

pub mod form;
pub mod hidden;
pub mod hover;
pub mod instance;
pub mod layout;
pub mod visibility;

use iced::{Point, Rectangle};
use reqwest::Url;

use ghstats_common::{ChartConfig, ChartPayload, Metric, Result, SeriesId};

use crate::message::ChartId;
use crate::view::formatting::format_picker_value;
use form::ChartForm;
use hover::HoverTracker;
use instance::{ChartInstance, ChartOptions};
use visibility::SeriesToggled;

/// Sequence number attached to each outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl std::fmt::Display for RequestToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Data loading state of a widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The latest request succeeded.
    Loaded,
    /// The latest request failed. The previous chart, if any, stays visible.
    Error(String),
}

/// A request to issue for a widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub chart_id: ChartId,
    pub token: RequestToken,
    pub url: Url,
}

/// What happened to a response handed to [`ChartWidget::apply_response`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseOutcome {
    /// A newer request was issued since; the response was dropped.
    Stale,
    /// The chart was replaced.
    Loaded,
    /// The request failed; the chart was left as is.
    Failed,
}

/// Chart instance bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChartLifecycle {
    pub created: u64,
    pub destroyed: u64,
}

impl ChartLifecycle {
    /// Instances created and not yet destroyed.
    pub fn live(&self) -> u64 {
        self.created - self.destroyed
    }
}

/// State of one chart and its form.
#[derive(Debug)]
pub struct ChartWidget {
    id: ChartId,
    title: String,
    form: ChartForm,
    options: ChartOptions,
    payload: Option<ChartPayload>,
    hover: HoverTracker,
    chart: Option<ChartInstance>,
    load_state: LoadState,
    next_token: u64,
    latest_token: Option<RequestToken>,
    lifecycle: ChartLifecycle,
}

impl ChartWidget {
    pub fn new(config: &ChartConfig) -> Self {
        Self {
            id: ChartId::new(config.id.clone()),
            title: config.title.clone(),
            form: ChartForm::from_config(config),
            options: ChartOptions::default(),
            payload: None,
            hover: HoverTracker::default(),
            chart: None,
            load_state: LoadState::default(),
            next_token: 0,
            latest_token: None,
            lifecycle: ChartLifecycle::default(),
        }
    }

    pub fn id(&self) -> &ChartId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn form(&self) -> &ChartForm {
        &self.form
    }

    pub fn payload(&self) -> Option<&ChartPayload> {
        self.payload.as_ref()
    }

    pub fn chart(&self) -> Option<&ChartInstance> {
        self.chart.as_ref()
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn lifecycle(&self) -> ChartLifecycle {
        self.lifecycle
    }

    /// Token of the most recent submission, if any.
    pub fn latest_token(&self) -> Option<RequestToken> {
        self.latest_token
    }

    pub fn hover_target(&self) -> Option<&SeriesId> {
        self.hover.target()
    }

    pub fn set_start_datetime(&mut self, value: String) {
        self.form.set_start_datetime(value);
    }

    pub fn set_end_datetime(&mut self, value: String) {
        self.form.set_end_datetime(value);
    }

    /// Start a submission: build the request URL and issue a new token.
    pub fn submit(&mut self, base: &Url) -> Result<FetchRequest> {
        let url = match self.form.request_url(base) {
            Ok(url) => url,
            Err(e) => {
                self.load_state = LoadState::Error(e.to_string());
                return Err(e);
            }
        };

        self.next_token += 1;
        let token = RequestToken(self.next_token);
        self.latest_token = Some(token);
        self.load_state = LoadState::Loading;

        tracing::debug!(chart = %self.id, %token, %url, "Submitting chart form");

        Ok(FetchRequest {
            chart_id: self.id.clone(),
            token,
            url,
        })
    }

    /// Handle the response to a submission.
    ///
    /// Only the response to the most recent submission is applied.
    pub fn apply_response(
        &mut self,
        token: RequestToken,
        result: std::result::Result<ChartPayload, String>,
    ) -> ResponseOutcome {
        if self.latest_token != Some(token) {
            tracing::debug!(chart = %self.id, %token, "Dropping stale chart response");
            return ResponseOutcome::Stale;
        }

        match result {
            Ok(payload) => {
                self.install(payload);
                self.load_state = LoadState::Loaded;
                ResponseOutcome::Loaded
            }
            Err(error) => {
                tracing::warn!(chart = %self.id, %token, error = %error, "Chart data request failed");
                self.load_state = LoadState::Error(error);
                ResponseOutcome::Failed
            }
        }
    }

    /// Replace the chart with one built from `payload`.
    fn install(&mut self, payload: ChartPayload) {
        if let Some(previous) = self.chart.take() {
            previous.destroy();
            self.lifecycle.destroyed += 1;
        }

        self.hover.reset();

        if let Some(start) = payload
            .start_datetime
            .as_ref()
            .and_then(|t| format_picker_value(t))
        {
            self.form.set_start_datetime(start);
        }
        if let Some(end) = payload
            .end_datetime
            .as_ref()
            .and_then(|t| format_picker_value(t))
        {
            self.form.set_end_datetime(end);
        }

        self.lifecycle.created += 1;
        let chart = ChartInstance::new(
            self.lifecycle.created,
            &payload,
            self.form.hidden(),
            self.options.clone(),
        );

        tracing::info!(
            chart = %self.id,
            series = chart.series().len(),
            "Chart loaded"
        );

        self.chart = Some(chart);
        self.payload = Some(payload);
    }

    /// Toggle a series from its legend entry and record it in the form.
    pub fn toggle_series(&mut self, index: usize) -> Option<SeriesToggled> {
        let event = self.chart.as_mut()?.toggle(index)?;
        self.form.apply_toggle(&event);

        tracing::debug!(
            chart = %self.id,
            series = %event.id,
            hidden = event.hidden,
            hidden_repos = %self.form.hidden().field_value(),
            "Series visibility changed"
        );

        Some(event)
    }

    /// Update the hover target from a nearest-element query.
    pub fn hover(&mut self, matched: &[SeriesId]) {
        self.hover.hover(matched);
    }

    /// Resolve a click; returns the clicked series, if any.
    pub fn click(&self, position: Point, plot_area: Rectangle) -> Option<SeriesId> {
        self.hover.click(position, plot_area)
    }

    /// Select a metric. Returns `true` when the form must be resubmitted.
    pub fn select_metric(&mut self, metric: Metric) -> bool {
        if self.form.data_metric() == metric.as_str() {
            return false;
        }
        self.form.set_data_metric(metric);
        true
    }
}
