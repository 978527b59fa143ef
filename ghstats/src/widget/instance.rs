//! Live chart instance built from one chart payload.

use iced::widget::canvas::Cache;
use iced::{Color, Point};

use ghstats_common::colors::hex_to_rgb;
use ghstats_common::{ChartPayload, ColorCycle, SeriesId};

use super::hidden::HiddenSeries;
use super::layout::ChartLayout;
use super::visibility::{SeriesToggled, SeriesVisibility};

/// Padding added around the time range when all points share a timestamp.
const FLAT_TIME_PADDING_MS: i64 = 3_600_000;

/// Maximum distance (pixels) between pointer and point for a hover match.
const HOVER_RADIUS: f32 = 8.0;

/// Points closer than this to the nearest distance count as ties.
const TIE_EPSILON: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
}

/// Spacing of the time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distribution {
    /// Position proportional to time.
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    Right,
}

/// Chart configuration applied to every instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub kind: ChartKind,
    /// Resize with the containing widget.
    pub responsive: bool,
    pub title: Option<String>,
    pub x_label: String,
    pub x_distribution: Distribution,
    pub y_label: String,
    pub legend: LegendPosition,
    pub hover_radius: f32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            kind: ChartKind::Line,
            responsive: true,
            title: None,
            x_label: "Date".to_string(),
            x_distribution: Distribution::Linear,
            y_label: "value".to_string(),
            legend: LegendPosition::Right,
            hover_radius: HOVER_RADIUS,
        }
    }
}

/// One plotted series.
#[derive(Debug, Clone)]
pub struct Series {
    pub id: SeriesId,
    pub label: String,
    pub color: Color,
    /// `(epoch millis, value)`; `None` marks a gap.
    pub points: Vec<(i64, Option<f64>)>,
    pub span_gaps: bool,
    /// Visibility before any legend interaction.
    pub default_hidden: bool,
    pub visibility: SeriesVisibility,
}

impl Series {
    pub fn is_hidden(&self) -> bool {
        self.visibility.is_hidden(self.default_hidden)
    }
}

/// A rendered chart. Owned by exactly one widget and destroyed before replacement.
#[derive(Debug)]
pub struct ChartInstance {
    generation: u64,
    options: ChartOptions,
    series: Vec<Series>,
    time_range: (i64, i64),
    value_range: (f64, f64),
    cache: Cache,
}

impl ChartInstance {
    /// Build an instance from a payload.
    ///
    /// A dataset without an explicit `hidden` flag starts hidden when the
    /// tracker lists its series.
    pub fn new(
        generation: u64,
        payload: &ChartPayload,
        hidden: &HiddenSeries,
        options: ChartOptions,
    ) -> Self {
        let mut palette = ColorCycle::new();

        let series: Vec<Series> = payload
            .series()
            .map(|(id, dataset)| {
                let fallback = palette.next();
                let color = dataset
                    .border_color
                    .as_deref()
                    .or(dataset.background_color.as_deref())
                    .or(fallback.as_deref())
                    .and_then(hex_to_rgb)
                    .map(|[r, g, b]| Color::from_rgb(r, g, b))
                    .unwrap_or(Color::WHITE);

                let points = dataset
                    .data
                    .iter()
                    .filter_map(|p| p.t.millis().map(|t| (t, p.y)))
                    .collect();

                Series {
                    id: id.clone(),
                    label: dataset.label.clone(),
                    color,
                    points,
                    span_gaps: dataset.span_gaps,
                    default_hidden: dataset.hidden.unwrap_or_else(|| hidden.contains(id)),
                    visibility: SeriesVisibility::Auto,
                }
            })
            .collect();

        let time_range = resolve_time_range(payload);

        let mut instance = Self {
            generation,
            options,
            series,
            time_range,
            value_range: (0.0, 1.0),
            cache: Cache::new(),
        };
        instance.recalculate_value_range();

        tracing::debug!(
            generation,
            series = instance.series.len(),
            "Created chart instance"
        );

        instance
    }

    /// Tear down the instance, releasing its cached geometry.
    pub fn destroy(self) {
        self.cache.clear();
        tracing::debug!(generation = self.generation, "Destroyed chart instance");
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn time_range(&self) -> (i64, i64) {
        self.time_range
    }

    pub fn value_range(&self) -> (f64, f64) {
        self.value_range
    }

    pub(crate) fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Flip a series' visibility from the legend and redraw.
    pub fn toggle(&mut self, index: usize) -> Option<SeriesToggled> {
        let series = self.series.get_mut(index)?;
        series.visibility = series.visibility.toggled(series.default_hidden);
        let event = SeriesToggled {
            id: series.id.clone(),
            hidden: series.is_hidden(),
        };

        self.recalculate_value_range();
        self.cache.clear();

        Some(event)
    }

    /// Map a data point into canvas coordinates.
    pub fn project(&self, t: i64, value: f64, layout: &ChartLayout) -> Point {
        let area = layout.plot_area;
        let (t0, t1) = self.time_range;
        let (v0, v1) = self.value_range;

        let x_frac = (t - t0) as f64 / (t1 - t0).max(1) as f64;
        let y_frac = (value - v0) / (v1 - v0).max(f64::EPSILON);

        Point::new(
            area.x + x_frac as f32 * area.width,
            area.y + area.height - y_frac as f32 * area.height,
        )
    }

    /// Series owning the visible points nearest to `position`.
    ///
    /// Only points within the hover radius count. Several series are returned
    /// when their nearest points tie.
    pub fn nearest_series(&self, position: Point, layout: &ChartLayout) -> Vec<SeriesId> {
        let mut best = self.options.hover_radius;
        let mut candidates: Vec<(f32, &SeriesId)> = Vec::new();

        for series in self.series.iter().filter(|s| !s.is_hidden()) {
            let nearest = series
                .points
                .iter()
                .filter_map(|(t, v)| v.map(|v| self.project(*t, v, layout)))
                .map(|p| p.distance(position))
                .fold(f32::INFINITY, f32::min);

            if nearest <= best + TIE_EPSILON {
                best = best.min(nearest);
                candidates.push((nearest, &series.id));
            }
        }

        candidates
            .into_iter()
            .filter(|(distance, _)| *distance <= best + TIE_EPSILON)
            .map(|(_, id)| id.clone())
            .collect()
    }

    fn recalculate_value_range(&mut self) {
        let values = self
            .series
            .iter()
            .filter(|s| !s.is_hidden())
            .flat_map(|s| s.points.iter().filter_map(|(_, v)| *v));

        let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

        if !min.is_finite() || !max.is_finite() {
            self.value_range = (0.0, 1.0);
            return;
        }

        let lo = min.min(0.0);
        let hi = if max > lo { max + (max - lo) * 0.1 } else { lo + 1.0 };
        self.value_range = (lo, hi);
    }
}

/// Displayed time range: the payload's range, else the data bounds.
fn resolve_time_range(payload: &ChartPayload) -> (i64, i64) {
    let bounds = payload.data_bounds();
    let start = payload
        .start_datetime
        .as_ref()
        .and_then(|t| t.millis())
        .or(bounds.map(|(lo, _)| lo));
    let end = payload
        .end_datetime
        .as_ref()
        .and_then(|t| t.millis())
        .or(bounds.map(|(_, hi)| hi));

    match (start, end) {
        (Some(start), Some(end)) if end > start => (start, end),
        (Some(t), _) | (_, Some(t)) => (t - FLAT_TIME_PADDING_MS, t + FLAT_TIME_PADDING_MS),
        (None, None) => (0, 1),
    }
}
