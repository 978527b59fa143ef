//! Dashboard view listing every configured chart.

use iced::widget::{Column, button, column, container, row, rule, scrollable, text};
use iced::{Alignment, Color, Element, Length, Theme};

use ghstats_common::SeriesId;

use super::panel::chart_panel;
use crate::message::{ChartId, Message};
use crate::widget::ChartWidget;

/// Dashboard view.
///
/// `source` describes where chart data comes from (server URL or demo).
pub fn dashboard_view<'a>(
    charts: &'a [ChartWidget],
    selected: Option<&'a (ChartId, SeriesId)>,
    source: &'a str,
) -> Element<'a, Message> {
    let header = render_header(source);
    let selection = render_selection(selected);

    let panels = charts
        .iter()
        .fold(Column::new().spacing(10), |col, widget| {
            col.push(chart_panel(widget)).push(rule::horizontal(1))
        });

    let content = column![header, selection, rule::horizontal(1), scrollable(panels)]
        .spacing(10)
        .padding(20);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn render_header(source: &str) -> Element<'_, Message> {
    let title = text("Repository Traffic").size(24);
    let source = text(source)
        .size(13)
        .style(|_theme: &Theme| text::Style {
            color: Some(Color::from_rgb(0.5, 0.5, 0.5)),
        });

    row![title, source]
        .spacing(15)
        .align_y(Alignment::Center)
        .into()
}

/// Series picked by clicking inside a chart.
fn render_selection<'a>(selected: Option<&'a (ChartId, SeriesId)>) -> Element<'a, Message> {
    let Some((chart, series)) = selected else {
        return text("Click a series to select it")
            .size(12)
            .style(|_theme: &Theme| text::Style {
                color: Some(Color::from_rgb(0.5, 0.5, 0.5)),
            })
            .into();
    };

    let clear = button(text("Clear").size(12))
        .on_press(Message::ClearSelection)
        .style(iced::widget::button::secondary);

    row![
        text(format!("Selected: {} ({})", series, chart)).size(14),
        clear
    ]
    .spacing(10)
    .align_y(Alignment::Center)
    .into()
}
