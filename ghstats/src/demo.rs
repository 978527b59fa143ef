//! Demo data source.
//!
//! Answers traffic chart requests without a server, so the viewer can be
//! explored offline. Values are generated per repository and per day from a
//! seeded RNG, so the same query always yields the same payload.

use std::f64::consts::PI;

use chrono::{DateTime, Duration, DurationRound, Utc};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use reqwest::Url;

use ghstats_common::datetime::now;
use ghstats_common::{
    ChartData, ChartPayload, ColorCycle, DataPoint, Dataset, Error, Metric, Result, SeriesId,
    Timestamp, dt_to_str, parse_query_dt,
};

/// Repositories served by the demo source.
pub const DEMO_REPOS: &[&str] = &[
    "nocarryr/gh-stats-python",
    "nocarryr/python-dispatch",
    "nocarryr/jvconnected",
    "nocarryr/tslumd",
    "nocarryr/rtlsdr-wwb-scanner",
    "nocarryr/vidhubcontrol",
    "nocarryr/pyjoystick-tools",
    "nocarryr/cyclone-mqtt",
    "nocarryr/midi-metronome",
    "nocarryr/openlp-remote",
    "nocarryr/aiogh-tools",
    "nocarryr/zeroconf-browser",
];

/// Maximum number of datasets per response.
const LIMIT: usize = 10;

/// Range used when the request has no start.
const DEFAULT_RANGE_DAYS: i64 = 14;

/// Longest range answered in one response.
const MAX_RANGE_DAYS: i64 = 5 * 366;

/// Probability of a missing daily sample.
const GAP_PROBABILITY: f64 = 0.04;

/// Offline stand-in for the traffic endpoint.
#[derive(Debug, Clone)]
pub struct DemoSource {
    /// Default end of the range, truncated to the day.
    anchor: DateTime<Utc>,
}

impl Default for DemoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoSource {
    /// Create a source anchored at the current day.
    pub fn new() -> Self {
        Self::with_anchor(now())
    }

    /// Create a source whose default range ends at `anchor`.
    pub fn with_anchor(anchor: DateTime<Utc>) -> Self {
        let anchor = anchor
            .duration_trunc(Duration::days(1))
            .unwrap_or(anchor);
        Self { anchor }
    }

    /// Build the payload the server would return for `url`.
    pub fn respond(&self, url: &Url) -> Result<ChartPayload> {
        let query = DemoQuery::from_url(url)?;
        let end = query.end.unwrap_or(self.anchor);
        let start = query
            .start
            .unwrap_or(end - Duration::days(DEFAULT_RANGE_DAYS));
        if start > end {
            return Err(Error::Http(format!(
                "400 Bad Request: start {} is after end {}",
                dt_to_str(&start),
                dt_to_str(&end)
            )));
        }
        if end - start > Duration::days(MAX_RANGE_DAYS) {
            return Err(Error::Http(format!(
                "400 Bad Request: range {} to {} exceeds {} days",
                dt_to_str(&start),
                dt_to_str(&end),
                MAX_RANGE_DAYS
            )));
        }

        let days = days_in_range(start, end);

        let mut ranked: Vec<(&str, Vec<Option<f64>>, f64)> = DEMO_REPOS
            .iter()
            .map(|slug| {
                let values: Vec<Option<f64>> = days
                    .iter()
                    .map(|day| daily_value(slug, *day, query.metric))
                    .collect();
                let total = values.iter().flatten().sum();
                (*slug, values, total)
            })
            .collect();
        ranked.sort_by(|a, b| b.2.total_cmp(&a.2).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(LIMIT);

        let timestamps: Vec<String> = days.iter().map(dt_to_str).collect();
        let mut colors = ColorCycle::new();
        let mut dataset_ids = Vec::with_capacity(ranked.len());
        let mut datasets = Vec::with_capacity(ranked.len());

        for ((slug, values, _), color) in ranked.into_iter().zip(&mut colors) {
            let points = timestamps
                .iter()
                .zip(values)
                .map(|(t, y)| DataPoint::new(t.as_str(), y))
                .collect();
            let mut dataset = Dataset::new(dataset_label(slug, query.metric))
                .with_color(color)
                .with_points(points);
            dataset.span_gaps = true;
            dataset.hidden = Some(query.hidden.iter().any(|h| h == slug));

            dataset_ids.push(SeriesId::from(slug));
            datasets.push(dataset);
        }

        // Empty ranges report the requested bounds.
        let (first, last) = match (timestamps.first(), timestamps.last()) {
            (Some(first), Some(last)) => (first.clone(), last.clone()),
            _ => (dt_to_str(&start), dt_to_str(&end)),
        };

        tracing::debug!(
            metric = %query.metric,
            datasets = datasets.len(),
            days = days.len(),
            "Demo response built"
        );

        Ok(ChartPayload {
            start_datetime: Some(Timestamp::from(first)),
            end_datetime: Some(Timestamp::from(last)),
            dataset_ids,
            chart_data: ChartData { datasets },
        })
    }
}

/// Query parameters understood by the demo source.
#[derive(Debug, Default)]
struct DemoQuery {
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    metric: Metric,
    hidden: Vec<String>,
}

impl DemoQuery {
    fn from_url(url: &Url) -> Result<Self> {
        let mut query = DemoQuery::default();
        for (key, value) in url.query_pairs() {
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "start_datetime" => query.start = Some(parse_query_dt(&value)?),
                "end_datetime" => query.end = Some(parse_query_dt(&value)?),
                "data_metric" => {
                    query.metric = Metric::parse(&value).ok_or_else(|| {
                        Error::Http(format!("400 Bad Request: unknown data_metric {:?}", value))
                    })?;
                }
                "hidden_repos" => {
                    query.hidden = value
                        .split(',')
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect();
                }
                _ => {}
            }
        }
        Ok(query)
    }
}

fn dataset_label(slug: &str, metric: Metric) -> String {
    match metric {
        Metric::Count => format!("{} Total", slug),
        Metric::Uniques => format!("{} Uniques", slug),
    }
}

/// UTC midnights within `[start, end]`.
fn days_in_range(start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<DateTime<Utc>> {
    let mut day = start.duration_trunc(Duration::days(1)).unwrap_or(start);
    if day < start {
        day += Duration::days(1);
    }
    let mut days = Vec::new();
    while day <= end {
        days.push(day);
        day += Duration::days(1);
    }
    days
}

/// FNV-1a, used to derive stable seeds from repository slugs.
fn slug_hash(slug: &str) -> u64 {
    slug.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
        (hash ^ byte as u64).wrapping_mul(0x0000_0100_0000_01b3)
    })
}

/// Traffic value for one repository on one day.
///
/// Count and uniques are drawn from the same sequence so uniques never
/// exceed count for a given day.
fn daily_value(slug: &str, day: DateTime<Utc>, metric: Metric) -> Option<f64> {
    let hash = slug_hash(slug);
    let day_index = day.timestamp().div_euclid(86_400);
    let mut rng = SmallRng::seed_from_u64(hash ^ day_index as u64);

    if rng.random_bool(GAP_PROBABILITY) {
        return None;
    }

    let base = 10.0 + (hash % 240) as f64;
    let phase = (hash % 7) as f64;
    let weekly = 1.0 + 0.4 * (2.0 * PI * (day_index as f64 + phase) / 7.0).sin();
    let noise = rng.random_range(0.7..1.3);
    let count = (base * weekly * noise).round().max(0.0);
    let ratio = rng.random_range(0.25..0.6);

    Some(match metric {
        Metric::Count => count,
        Metric::Uniques => (count * ratio).round(),
    })
}
