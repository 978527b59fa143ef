//! ghstats Iced application.

use iced::{Element, Task, Theme};
use reqwest::Url;

use ghstats_common::{ChartConfig, Error, Result, SeriesId, ServerConfig};

use crate::fetch::DataSource;
use crate::message::{ChartId, Message};
use crate::view::dashboard::dashboard_view;
use crate::widget::{ChartWidget, ResponseOutcome};

/// The main ghstats application.
pub struct GhStats {
    /// Server the chart form actions resolve against.
    base_url: Url,
    /// Where chart data comes from.
    source: DataSource,
    /// Header line describing the data source.
    source_label: String,
    /// One widget per configured chart, in configuration order.
    charts: Vec<ChartWidget>,
    /// Series clicked most recently.
    selected: Option<(ChartId, SeriesId)>,
}

impl GhStats {
    /// Build the application state; nothing is requested until [`GhStats::boot`].
    pub fn new(base_url: Url, charts: &[ChartConfig], source: DataSource) -> Self {
        let source_label = if source.is_demo() {
            "Demo data".to_string()
        } else {
            base_url.to_string()
        };

        Self {
            base_url,
            source,
            source_label,
            charts: charts.iter().map(ChartWidget::new).collect(),
            selected: None,
        }
    }

    /// Boot the application (called by iced::application): load every chart.
    pub fn boot(self) -> (Self, Task<Message>) {
        let mut app = self;
        let ids: Vec<ChartId> = app.charts.iter().map(|c| c.id().clone()).collect();
        let tasks: Vec<Task<Message>> = ids.into_iter().map(|id| app.submit(&id)).collect();

        tracing::info!(charts = app.charts.len(), source = %app.source_label, "Starting ghstats");

        (app, Task::batch(tasks))
    }

    /// Get the window title.
    pub fn title(&self) -> String {
        format!("ghstats - {}", self.source_label)
    }

    /// Handle incoming messages.
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Submit(id) => {
                return self.submit(&id);
            }

            Message::ChartLoaded(id, token, result) => {
                let outcome = self
                    .chart_mut(&id)
                    .map(|widget| widget.apply_response(token, result));

                // A replaced chart no longer shows the selected series.
                if outcome == Some(ResponseOutcome::Loaded)
                    && self.selected.as_ref().is_some_and(|(chart, _)| *chart == id)
                {
                    self.selected = None;
                }
            }

            Message::SetStartDatetime(id, value) => {
                if let Some(widget) = self.chart_mut(&id) {
                    widget.set_start_datetime(value);
                }
            }

            Message::SetEndDatetime(id, value) => {
                if let Some(widget) = self.chart_mut(&id) {
                    widget.set_end_datetime(value);
                }
            }

            Message::SelectMetric(id, metric) => {
                let resubmit = self
                    .chart_mut(&id)
                    .is_some_and(|widget| widget.select_metric(metric));
                if resubmit {
                    tracing::debug!(chart = %id, metric = %metric, "Metric changed");
                    return self.submit(&id);
                }
            }

            Message::LegendClicked(id, index) => {
                if let Some(widget) = self.chart_mut(&id) {
                    widget.toggle_series(index);
                }
            }

            Message::Hovered(id, matched) => {
                if let Some(widget) = self.chart_mut(&id) {
                    widget.hover(&matched);
                }
            }

            Message::PlotClicked(id, position, plot_area) => {
                if let Some(series) = self
                    .chart(&id)
                    .and_then(|widget| widget.click(position, plot_area))
                {
                    return Task::done(Message::SeriesClicked(id, series));
                }
            }

            Message::SeriesClicked(id, series) => {
                tracing::info!(chart = %id, series = %series, "Series selected");
                self.selected = Some((id, series));
            }

            Message::ClearSelection => {
                self.selected = None;
            }
        }

        Task::none()
    }

    /// Render the view.
    pub fn view(&self) -> Element<'_, Message> {
        dashboard_view(&self.charts, self.selected.as_ref(), &self.source_label)
    }

    /// Get the current theme.
    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub fn charts(&self) -> &[ChartWidget] {
        &self.charts
    }

    pub fn selected(&self) -> Option<&(ChartId, SeriesId)> {
        self.selected.as_ref()
    }

    pub fn chart(&self, id: &ChartId) -> Option<&ChartWidget> {
        self.charts.iter().find(|c| c.id() == id)
    }

    fn chart_mut(&mut self, id: &ChartId) -> Option<&mut ChartWidget> {
        self.charts.iter_mut().find(|c| c.id() == id)
    }

    /// Submit a chart's form and start the fetch.
    fn submit(&mut self, id: &ChartId) -> Task<Message> {
        let Some(widget) = self.charts.iter_mut().find(|c| c.id() == id) else {
            tracing::warn!(chart = %id, "Submit for unknown chart");
            return Task::none();
        };

        match widget.submit(&self.base_url) {
            Ok(request) => self.source.load(request),
            Err(e) => {
                tracing::error!(chart = %id, error = %e, "Failed to build chart request");
                Task::none()
            }
        }
    }
}

/// Parse the configured server URL.
pub fn parse_base_url(server: &ServerConfig) -> Result<Url> {
    Url::parse(&server.base_url).map_err(|e| Error::Url(format!("{}: {}", server.base_url, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghstats_common::{ChartData, ChartPayload, DataPoint, Dataset, Metric, ViewerConfig};
    use iced::{Point, Rectangle};

    use crate::widget::LoadState;

    fn config() -> ViewerConfig {
        ViewerConfig {
            charts: vec![
                ChartConfig::default(),
                ChartConfig {
                    id: "second".to_string(),
                    title: "Second".to_string(),
                    ..ChartConfig::default()
                },
            ],
            ..ViewerConfig::default()
        }
    }

    fn app() -> GhStats {
        let config = config();
        let base_url = parse_base_url(&config.server).unwrap();
        GhStats::new(base_url, &config.charts, DataSource::demo())
    }

    fn payload() -> ChartPayload {
        ChartPayload {
            start_datetime: Some(1_000_i64.into()),
            end_datetime: Some(86_401_000_i64.into()),
            dataset_ids: vec!["repoA".into()],
            chart_data: ChartData {
                datasets: vec![Dataset::new("repoA Total").with_points(vec![
                    DataPoint::new(1_000_i64, Some(3.0)),
                    DataPoint::new(86_401_000_i64, Some(7.0)),
                ])],
            },
        }
    }

    fn main_id() -> ChartId {
        ChartId::new("traffic-chart")
    }

    /// Submit the main chart and answer with `result`.
    fn load(app: &mut GhStats, result: std::result::Result<ChartPayload, String>) {
        let _ = app.update(Message::Submit(main_id()));
        let widget = app.chart_mut(&main_id()).unwrap();
        let request = widget.submit(&Url::parse("http://localhost/").unwrap()).unwrap();
        let _ = app.update(Message::ChartLoaded(main_id(), request.token, result));
    }

    #[test]
    fn test_boot_submits_every_chart() {
        let (app, _task) = app().boot();
        assert!(
            app.charts()
                .iter()
                .all(|c| *c.load_state() == LoadState::Loading)
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let mut config = config();
        config.server.base_url = "not a url".to_string();
        assert!(matches!(parse_base_url(&config.server), Err(Error::Url(_))));
    }

    #[test]
    fn test_loaded_response_installs_chart() {
        let mut app = app();
        load(&mut app, Ok(payload()));

        let widget = app.chart(&main_id()).unwrap();
        assert_eq!(*widget.load_state(), LoadState::Loaded);
        assert!(widget.chart().is_some());
        assert!(app.chart(&ChartId::new("second")).unwrap().chart().is_none());
    }

    #[test]
    fn test_failed_response_surfaces_error() {
        let mut app = app();
        load(&mut app, Err("500 Internal Server Error".to_string()));

        let widget = app.chart(&main_id()).unwrap();
        assert!(matches!(widget.load_state(), LoadState::Error(_)));
        assert!(widget.chart().is_none());
    }

    #[test]
    fn test_same_metric_does_not_resubmit() {
        let mut app = app();
        let _ = app.update(Message::SelectMetric(main_id(), Metric::Count));
        let widget = app.chart(&main_id()).unwrap();
        assert_eq!(*widget.load_state(), LoadState::Idle);
        assert!(widget.latest_token().is_none());

        let _ = app.update(Message::SelectMetric(main_id(), Metric::Uniques));
        let widget = app.chart(&main_id()).unwrap();
        assert_eq!(widget.form().data_metric(), "uniques");
        assert_eq!(*widget.load_state(), LoadState::Loading);
        assert_eq!(widget.latest_token().map(|t| t.to_string()).as_deref(), Some("#1"));

        // Selecting the current metric again issues no further request.
        let _ = app.update(Message::SelectMetric(main_id(), Metric::Uniques));
        let widget = app.chart(&main_id()).unwrap();
        assert_eq!(widget.latest_token().map(|t| t.to_string()).as_deref(), Some("#1"));
    }

    #[test]
    fn test_legend_click_updates_hidden_field() {
        let mut app = app();
        load(&mut app, Ok(payload()));

        let _ = app.update(Message::LegendClicked(main_id(), 0));
        let widget = app.chart(&main_id()).unwrap();
        assert_eq!(widget.form().hidden().field_value(), "repoA");
    }

    #[test]
    fn test_series_selection() {
        let mut app = app();
        let _ = app.update(Message::SeriesClicked(main_id(), "repoA".into()));
        assert_eq!(
            app.selected(),
            Some(&(main_id(), SeriesId::from("repoA")))
        );

        let _ = app.update(Message::ClearSelection);
        assert!(app.selected().is_none());
    }

    #[test]
    fn test_plot_click_without_hover_selects_nothing() {
        let mut app = app();
        load(&mut app, Ok(payload()));

        let area = Rectangle::new(Point::ORIGIN, iced::Size::new(100.0, 100.0));
        let _ = app.update(Message::PlotClicked(main_id(), Point::new(50.0, 50.0), area));
        assert!(app.selected().is_none());
    }
}
