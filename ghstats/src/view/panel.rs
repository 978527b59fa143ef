//! Panel for a single chart widget: query form, metric selector and chart.

use iced::widget::{button, column, container, row, text, text_input};
use iced::{Alignment, Color, Element, Length, Theme};

use ghstats_common::Metric;

use super::chart::{CHART_HEIGHT, chart_view};
use crate::message::{ChartId, Message};
use crate::widget::{ChartWidget, LoadState};

/// Placeholder shown in empty date-time pickers.
const PICKER_PLACEHOLDER: &str = "YYYY-MM-DDTHH:MM:00";

const MUTED: Color = Color::from_rgb(0.5, 0.5, 0.5);
const ERROR: Color = Color::from_rgb(0.9, 0.3, 0.3);

/// Render one chart panel.
pub fn chart_panel(widget: &ChartWidget) -> Element<'_, Message> {
    let header = render_header(widget);
    let form = render_form(widget);
    let metrics = render_metric_selector(widget);

    let body: Element<'_, Message> = match widget.chart() {
        Some(chart) => chart_view(widget.id(), chart),
        None => container(text("No data").size(16).style(muted))
            .center_x(Length::Fill)
            .center_y(Length::Fixed(CHART_HEIGHT))
            .into(),
    };

    let hover = match widget.hover_target() {
        Some(series) => text(format!("Hovering: {}", series)),
        None => text(""),
    }
    .size(12)
    .style(muted);

    column![header, form, metrics, body, hover]
        .spacing(10)
        .padding(15)
        .into()
}

/// Title and load status.
fn render_header(widget: &ChartWidget) -> Element<'_, Message> {
    let title = text(widget.title()).size(20);

    let status = match widget.load_state() {
        LoadState::Idle => text(""),
        LoadState::Loading => text("Loading...").style(muted),
        LoadState::Loaded => text(""),
        LoadState::Error(error) => {
            text(format!("Error: {}", error)).style(|_theme: &Theme| text::Style {
                color: Some(ERROR),
            })
        }
    }
    .size(13);

    row![title, status]
        .spacing(15)
        .align_y(Alignment::Center)
        .into()
}

/// Start/end pickers and the refresh button.
fn render_form(widget: &ChartWidget) -> Element<'_, Message> {
    let id = widget.id();
    let form = widget.form();

    let start = picker(id, form.start_datetime(), Message::SetStartDatetime);
    let end = picker(id, form.end_datetime(), Message::SetEndDatetime);

    let refresh = button(text("Refresh").size(14))
        .on_press(Message::Submit(id.clone()))
        .style(iced::widget::button::secondary);

    row![
        text("From:").size(14),
        start,
        text("To:").size(14),
        end,
        refresh
    ]
    .spacing(10)
    .align_y(Alignment::Center)
    .into()
}

fn picker<'a>(
    id: &ChartId,
    value: &str,
    on_input: fn(ChartId, String) -> Message,
) -> Element<'a, Message> {
    let input_id = id.clone();
    text_input(PICKER_PLACEHOLDER, value)
        .on_input(move |value| on_input(input_id.clone(), value))
        .on_submit(Message::Submit(id.clone()))
        .padding(6)
        .width(Length::Fixed(200.0))
        .into()
}

/// One button per metric; the active metric is highlighted.
fn render_metric_selector(widget: &ChartWidget) -> Element<'_, Message> {
    let current = widget.form().data_metric();

    let buttons = Metric::ALL.iter().map(|metric| {
        let style = if metric.as_str() == current {
            iced::widget::button::primary
        } else {
            iced::widget::button::secondary
        };
        button(text(metric.label()).size(13))
            .on_press(Message::SelectMetric(widget.id().clone(), *metric))
            .style(style)
            .into()
    });

    row(buttons).spacing(6).into()
}

fn muted(_theme: &Theme) -> text::Style {
    text::Style { color: Some(MUTED) }
}
