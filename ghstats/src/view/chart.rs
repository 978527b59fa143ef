//! Traffic line chart drawn on an Iced canvas.

use iced::mouse;
use iced::widget::canvas::{self, Canvas, Frame, Geometry, Path, Stroke, Text};
use iced::{Color, Element, Length, Point, Rectangle, Renderer, Size, Theme};

use ghstats_common::SeriesId;

use super::formatting::{format_axis_time, format_value};
use crate::message::{ChartId, Message};
use crate::widget::instance::{ChartInstance, Series};
use crate::widget::layout::{ChartLayout, LEGEND_ROW_HEIGHT};

/// Canvas height of a chart.
pub const CHART_HEIGHT: f32 = 360.0;

const BACKGROUND: Color = Color::from_rgb(0.1, 0.1, 0.12);
const PLOT_BACKGROUND: Color = Color::from_rgb(0.08, 0.08, 0.1);
const GRID: Color = Color::from_rgb(0.2, 0.2, 0.25);
const LABEL: Color = Color::from_rgb(0.5, 0.5, 0.5);
const DIMMED: Color = Color::from_rgb(0.35, 0.35, 0.38);

const VALUE_LINES: usize = 5;
const TIME_LINES: usize = 4;
const POINT_RADIUS: f32 = 2.5;
const SWATCH_SIZE: f32 = 12.0;

/// Pointer state between canvas events.
#[derive(Debug, Default)]
pub struct ChartInteraction {
    /// Instance the hover state refers to.
    generation: u64,
    /// Series matched on the last pointer move.
    hovered: Vec<SeriesId>,
}

impl ChartInteraction {
    /// Series hovered on `generation`, if the state is current.
    fn hovered_on(&self, generation: u64) -> &[SeriesId] {
        if self.generation == generation {
            &self.hovered
        } else {
            &[]
        }
    }
}

/// Canvas program for one chart instance.
pub struct ChartCanvas<'a> {
    chart_id: &'a ChartId,
    instance: &'a ChartInstance,
}

impl<'a> ChartCanvas<'a> {
    pub fn new(chart_id: &'a ChartId, instance: &'a ChartInstance) -> Self {
        Self { chart_id, instance }
    }

    /// Hover notification for a pointer at `position`, if the match changed.
    fn hover_message(
        &self,
        interaction: &mut ChartInteraction,
        position: Option<Point>,
        size: Size,
    ) -> Option<Message> {
        let layout = ChartLayout::compute(size);
        let matched = match position {
            Some(position) if layout.plot_area.contains(position) => {
                self.instance.nearest_series(position, &layout)
            }
            _ => Vec::new(),
        };

        // A replaced instance starts without a hover target.
        let generation = self.instance.generation();
        if interaction.generation != generation {
            interaction.generation = generation;
            interaction.hovered.clear();
        }

        if matched == interaction.hovered {
            return None;
        }
        interaction.hovered = matched.clone();
        Some(Message::Hovered(self.chart_id.clone(), matched))
    }

    /// Legend clicks toggle a series; anything else is a plot click.
    fn click_message(&self, position: Point, size: Size) -> Message {
        let layout = ChartLayout::compute(size);
        match layout.legend_hit(position, self.instance.series().len()) {
            Some(index) => Message::LegendClicked(self.chart_id.clone(), index),
            None => Message::PlotClicked(self.chart_id.clone(), position, layout.plot_area),
        }
    }
}

impl<'a> canvas::Program<Message> for ChartCanvas<'a> {
    type State = ChartInteraction;

    fn update(
        &self,
        interaction: &mut Self::State,
        event: &canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        let canvas::Event::Mouse(mouse_event) = event else {
            return None;
        };

        match mouse_event {
            mouse::Event::CursorMoved { .. } => {
                let position = cursor.position_in(bounds);
                self.hover_message(interaction, position, bounds.size())
                    .map(canvas::Action::publish)
            }
            mouse::Event::CursorLeft => self
                .hover_message(interaction, None, bounds.size())
                .map(canvas::Action::publish),
            mouse::Event::ButtonPressed(mouse::Button::Left) => {
                let position = cursor.position_in(bounds)?;
                let message = self.click_message(position, bounds.size());
                Some(canvas::Action::publish(message).and_capture())
            }
            _ => None,
        }
    }

    fn draw(
        &self,
        interaction: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let size = bounds.size();
        let layout = ChartLayout::compute(size);

        let chart = self.instance.cache().draw(renderer, size, |frame| {
            self.draw_chart(frame, &layout);
        });

        let hovered = interaction.hovered_on(self.instance.generation());
        if hovered.is_empty() {
            return vec![chart];
        }

        // Hover highlight changes on every pointer move, so it stays out of the cache.
        let mut overlay = Frame::new(renderer, size);
        for series in self
            .instance
            .series()
            .iter()
            .filter(|s| !s.is_hidden() && hovered.contains(&s.id))
        {
            self.draw_series(&mut overlay, series, &layout, 3.0);
        }

        vec![chart, overlay.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _interaction: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        let Some(position) = cursor.position_in(bounds) else {
            return mouse::Interaction::default();
        };
        let layout = ChartLayout::compute(bounds.size());

        if layout
            .legend_hit(position, self.instance.series().len())
            .is_some()
        {
            mouse::Interaction::Pointer
        } else if layout.plot_area.contains(position) {
            mouse::Interaction::Crosshair
        } else {
            mouse::Interaction::default()
        }
    }
}

impl<'a> ChartCanvas<'a> {
    fn draw_chart(&self, frame: &mut Frame, layout: &ChartLayout) {
        frame.fill(&Path::rectangle(Point::ORIGIN, layout.size), BACKGROUND);

        if !layout.is_drawable() {
            return;
        }

        let plot = layout.plot_area;
        frame.fill(
            &Path::rectangle(plot.position(), plot.size()),
            PLOT_BACKGROUND,
        );

        self.draw_grid(frame, layout);
        self.draw_axis_titles(frame, layout);

        for series in self.instance.series().iter().filter(|s| !s.is_hidden()) {
            self.draw_series(frame, series, layout, 2.0);
        }

        self.draw_legend(frame, layout);
    }

    /// Grid lines with value and time labels.
    fn draw_grid(&self, frame: &mut Frame, layout: &ChartLayout) {
        let plot = layout.plot_area;
        let (v0, v1) = self.instance.value_range();
        let (t0, t1) = self.instance.time_range();
        let stroke = || Stroke::default().with_color(GRID).with_width(1.0);

        for i in 0..=VALUE_LINES {
            let frac = i as f32 / VALUE_LINES as f32;
            let y = plot.y + frac * plot.height;
            let value = v1 - frac as f64 * (v1 - v0);

            frame.stroke(
                &Path::line(Point::new(plot.x, y), Point::new(plot.x + plot.width, y)),
                stroke(),
            );
            frame.fill_text(Text {
                content: format_value(value),
                position: Point::new(8.0, y - 6.0),
                color: LABEL,
                size: 10.0.into(),
                ..Text::default()
            });
        }

        for i in 0..=TIME_LINES {
            let frac = i as f64 / TIME_LINES as f64;
            let x = plot.x + frac as f32 * plot.width;
            let t = t0 + ((t1 - t0) as f64 * frac).round() as i64;

            frame.stroke(
                &Path::line(Point::new(x, plot.y), Point::new(x, plot.y + plot.height)),
                stroke(),
            );
            frame.fill_text(Text {
                content: format_axis_time(t),
                position: Point::new(x - 28.0, plot.y + plot.height + 8.0),
                color: LABEL,
                size: 10.0.into(),
                ..Text::default()
            });
        }
    }

    fn draw_axis_titles(&self, frame: &mut Frame, layout: &ChartLayout) {
        let plot = layout.plot_area;
        let options = self.instance.options();

        if let Some(title) = &options.title {
            frame.fill_text(Text {
                content: title.clone(),
                position: Point::new(plot.x, 0.0),
                color: Color::WHITE,
                size: 12.0.into(),
                ..Text::default()
            });
        }

        frame.fill_text(Text {
            content: options.y_label.clone(),
            position: Point::new(8.0, 0.0),
            color: LABEL,
            size: 11.0.into(),
            ..Text::default()
        });

        frame.fill_text(Text {
            content: options.x_label.clone(),
            position: Point::new(plot.center_x() - 12.0, plot.y + plot.height + 28.0),
            color: LABEL,
            size: 11.0.into(),
            ..Text::default()
        });
    }

    /// Polyline and point markers. Missing values break the line unless the
    /// series spans gaps.
    fn draw_series(&self, frame: &mut Frame, series: &Series, layout: &ChartLayout, width: f32) {
        let mut builder = canvas::path::Builder::new();
        let mut pen_down = false;
        let mut markers = Vec::with_capacity(series.points.len());

        for (t, value) in &series.points {
            match value {
                Some(value) => {
                    let point = self.instance.project(*t, *value, layout);
                    if pen_down {
                        builder.line_to(point);
                    } else {
                        builder.move_to(point);
                        pen_down = true;
                    }
                    markers.push(point);
                }
                None if !series.span_gaps => pen_down = false,
                None => {}
            }
        }

        frame.stroke(
            &builder.build(),
            Stroke::default().with_color(series.color).with_width(width),
        );
        for point in markers {
            frame.fill(&Path::circle(point, POINT_RADIUS), series.color);
        }
    }

    /// Legend entries with color swatches. Hidden series are dimmed.
    fn draw_legend(&self, frame: &mut Frame, layout: &ChartLayout) {
        for (index, series) in self.instance.series().iter().enumerate() {
            let entry = layout.legend_entry(index);
            if entry.y + entry.height > layout.size.height {
                break;
            }

            let swatch = Path::rectangle(
                Point::new(entry.x + 4.0, entry.y + (LEGEND_ROW_HEIGHT - SWATCH_SIZE) / 2.0),
                Size::new(SWATCH_SIZE, SWATCH_SIZE),
            );
            let text_color = if series.is_hidden() {
                frame.stroke(
                    &swatch,
                    Stroke::default().with_color(series.color).with_width(1.0),
                );
                DIMMED
            } else {
                frame.fill(&swatch, series.color);
                Color::from_rgb(0.85, 0.85, 0.85)
            };

            frame.fill_text(Text {
                content: series.label.clone(),
                position: Point::new(entry.x + SWATCH_SIZE + 10.0, entry.y + 3.0),
                color: text_color,
                size: 11.0.into(),
                ..Text::default()
            });
        }
    }
}

/// Create a chart element.
pub fn chart_view<'a>(chart_id: &'a ChartId, instance: &'a ChartInstance) -> Element<'a, Message> {
    Canvas::new(ChartCanvas::new(chart_id, instance))
        .width(Length::Fill)
        .height(Length::Fixed(CHART_HEIGHT))
        .into()
}
