//! Integration tests for ghstats-common library.

use std::io::Write;

use ghstats_common::{
    ChartData, ChartPayload, ColorCycle, DataPoint, Dataset, Error, Metric, SeriesId, Timestamp,
    ViewerConfig, dt_to_str, parse_dt,
};

#[test]
fn test_load_viewer_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    write!(
        file,
        r#"{{
            // JSON5 comments are allowed
            server: {{ base_url: "http://localhost:9000/", timeout_secs: 5 }},
            charts: [
                {{ id: "views", metric: "count" }},
                {{ id: "uniques", metric: "uniques", hidden_series: ["a/b", "c/d"] }},
            ],
            demo: true,
        }}"#
    )
    .unwrap();

    let config = ViewerConfig::load(file.path()).expect("config loads");

    assert!(config.demo);
    assert_eq!(config.server.timeout_secs, 5);
    assert_eq!(config.charts.len(), 2);
    assert_eq!(config.charts[1].metric, Metric::Uniques);
    assert_eq!(config.charts[1].hidden_series, vec!["a/b", "c/d"]);
}

#[test]
fn test_load_missing_config_file() {
    let err = ViewerConfig::load("/nonexistent/ghstats/viewer.json5").unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_load_invalid_config_file() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    write!(file, "{{ charts: [] }}").unwrap();

    let err = ViewerConfig::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("at least one chart"));
}

#[test]
fn test_payload_built_like_the_server() {
    let start = parse_dt("2018-04-01T00:00:00Z").unwrap();
    let mut colors = ColorCycle::new();

    let datasets: Vec<Dataset> = ["nocarryr/a", "nocarryr/b"]
        .iter()
        .enumerate()
        .map(|(i, slug)| {
            let t = start + chrono::Duration::days(i as i64);
            Dataset::new(format!("{} Total", slug))
                .with_color(colors.next().unwrap())
                .with_points(vec![DataPoint::new(t, Some(i as f64))])
        })
        .collect();

    let payload = ChartPayload {
        start_datetime: Some(Timestamp::from(start)),
        end_datetime: None,
        dataset_ids: vec![SeriesId::from("nocarryr/a"), SeriesId::from("nocarryr/b")],
        chart_data: ChartData { datasets },
    };

    let body = serde_json::to_vec(&payload).unwrap();
    let text = String::from_utf8(body.clone()).unwrap();
    assert!(text.contains("\"borderColor\":\"#7fdbff\""));
    assert!(!text.contains("end_datetime"));

    let decoded = ChartPayload::from_json(&body).unwrap();
    assert_eq!(decoded, payload);
    assert_eq!(
        decoded.start_datetime.as_ref().and_then(|t| t.to_datetime()).map(|dt| dt_to_str(&dt)),
        Some("2018-04-01T00:00:00Z".to_string())
    );

    let ids: Vec<&str> = decoded.series().map(|(id, _)| id.as_str()).collect();
    assert_eq!(ids, vec!["nocarryr/a", "nocarryr/b"]);
}
