use airq_processor::analyzers::{DashboardView, PollutantAnalyzer};
use airq_processor::models::{DailyValue, TrendDirection, YearlyAverage};
use airq_processor::processors::{DatasetBuilder, DatasetLoader};
use airq_processor::readers::StationReader;
use airq_processor::settings::Settings;
use airq_processor::{InsufficientData, ProcessingError, Result};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

fn write_json(dir: &TempDir, name: &str, value: Value) {
    fs::write(dir.path().join(name), serde_json::to_string(&value).unwrap()).unwrap();
}

fn registry() -> Value {
    json!({"type": "FeatureCollection", "features": [
        {"type": "Feature",
         "properties": {"id_amat": 1, "nome": "A", "inquinanti": ["NO2", "PM10"]},
         "geometry": {"type": "Point", "coordinates": [9.0, 45.0]}},
        {"type": "Feature",
         "properties": {"id_amat": 2, "nome": "B", "inquinanti": ["NO2"]},
         "geometry": {"type": "Point", "coordinates": [9.1, 45.1]}}
    ]})
}

fn settings_for(dir: &TempDir, first_year: i32, last_year: i32) -> Settings {
    Settings {
        data_dir: dir.path().to_path_buf(),
        first_year,
        last_year,
        ..Settings::default()
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Registry of two stations and a single year with two good entries, one
/// orphan and one entry lacking a value.
fn single_year_fixture() -> (TempDir, Settings) {
    let dir = TempDir::new().unwrap();
    write_json(&dir, "stations.geojson", registry());
    write_json(
        &dir,
        "2020_qualita-aria.json",
        json!([
            {"stazione_id": 1, "data": "2020-01-01", "inquinante": "NO2", "valore": "10"},
            {"stazione_id": 1, "data": "2020-06-01", "inquinante": "NO2", "valore": "30"},
            {"stazione_id": 99, "data": "2020-01-01", "inquinante": "NO2", "valore": "5"},
            {"stazione_id": 2, "data": "2020-01-01", "inquinante": "NO2"}
        ]),
    );
    let settings = settings_for(&dir, 2020, 2020);
    (dir, settings)
}

fn two_year_fixture(first: f64, second: f64) -> (TempDir, Settings) {
    let dir = TempDir::new().unwrap();
    write_json(&dir, "stations.geojson", registry());
    write_json(
        &dir,
        "2020_qualita-aria.json",
        json!([{"stazione_id": 1, "data": "2020-03-01", "inquinante": "NO2", "valore": first}]),
    );
    write_json(
        &dir,
        "2021_qualita-aria.json",
        json!([{"stazione_id": 2, "data": "2021-03-01", "inquinante": "NO2", "valore": second}]),
    );
    let settings = settings_for(&dir, 2020, 2021);
    (dir, settings)
}

fn load(settings: &Settings) -> Result<PollutantAnalyzer> {
    let dataset = DatasetLoader::new(settings).load_or_rebuild()?;
    Ok(PollutantAnalyzer::new(dataset))
}

#[test]
fn test_end_to_end_single_year() -> Result<()> {
    let (_dir, settings) = single_year_fixture();
    let (dataset, report) = DatasetBuilder::new(&settings).build()?;

    assert_eq!(dataset.len(), 2);
    assert!(dataset.iter().all(|r| r.station_name == "A"));
    assert_eq!(report.years[0].entries, 4);
    assert_eq!(report.years[0].skipped_for("unknown station"), 1);
    assert_eq!(report.years[0].skipped_for("missing field"), 1);

    let analyzer = load(&settings)?;
    assert_eq!(
        analyzer.yearly_average("NO2"),
        vec![YearlyAverage {
            year: 2020,
            value: 20.0
        }]
    );
    assert_eq!(
        analyzer.daily_series("NO2", 2020, "A"),
        vec![
            DailyValue {
                date: date(2020, 1, 1),
                value: 10.0
            },
            DailyValue {
                date: date(2020, 6, 1),
                value: 30.0
            },
        ]
    );
    Ok(())
}

#[test]
fn test_every_record_resolves_to_registry_station() -> Result<()> {
    let (_dir, settings) = single_year_fixture();
    let registry = StationReader::new().read_stations_map(&settings.stations_path())?;
    let analyzer = load(&settings)?;

    for record in analyzer.dataset().iter() {
        let station = registry
            .get(&record.station_id)
            .expect("record references a station missing from the registry");
        assert_eq!(record.station_name, station.name);
        assert_eq!(record.coordinates, station.coordinates);
    }
    Ok(())
}

#[test]
fn test_rebuild_is_byte_identical() -> Result<()> {
    let (_dir, settings) = two_year_fixture(20.0, 15.0);
    let builder = DatasetBuilder::new(&settings);

    builder.build()?;
    let first = fs::read(settings.snapshot_path())?;
    builder.build()?;
    let second = fs::read(settings.snapshot_path())?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_trend_improvement() -> Result<()> {
    let (_dir, settings) = two_year_fixture(20.0, 15.0);
    let trend = load(&settings)?.trend("NO2")?;

    assert_eq!(trend.direction, TrendDirection::Improvement);
    assert!((trend.change_percent + 25.0).abs() < 1e-9);
    assert_eq!(trend.to_string(), "improvement (-25.0%) from 2020 to 2021");
    Ok(())
}

#[test]
fn test_trend_deterioration_uses_first_year_as_baseline() -> Result<()> {
    let (_dir, settings) = two_year_fixture(15.0, 20.0);
    let trend = load(&settings)?.trend("NO2")?;

    assert_eq!(trend.direction, TrendDirection::Deterioration);
    assert!((trend.change_percent - 100.0 / 3.0).abs() < 1e-9);
    assert_eq!(trend.to_string(), "deterioration (+33.3%) from 2020 to 2021");
    Ok(())
}

#[test]
fn test_trend_tie_is_deterioration() -> Result<()> {
    let (_dir, settings) = two_year_fixture(18.0, 18.0);
    let trend = load(&settings)?.trend("NO2")?;

    assert_eq!(trend.direction, TrendDirection::Deterioration);
    assert_eq!(trend.change_percent, 0.0);
    Ok(())
}

#[test]
fn test_trend_zero_baseline_is_reported() -> Result<()> {
    let (_dir, settings) = two_year_fixture(0.0, 12.0);
    let result = load(&settings)?.trend("NO2");

    assert_eq!(
        result,
        Err(InsufficientData::ZeroBaseline {
            pollutant: "NO2".to_string(),
            year: 2020
        })
    );
    Ok(())
}

#[test]
fn test_trend_single_year_is_insufficient() -> Result<()> {
    let (_dir, settings) = single_year_fixture();
    let result = load(&settings)?.trend("NO2");

    assert!(matches!(result, Err(InsufficientData::SingleYear { year: 2020, .. })));
    Ok(())
}

#[test]
fn test_ranking_is_bounded_and_descending() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let features: Vec<Value> = (1..=7)
        .map(|id| {
            json!({
                "properties": {"id_amat": id, "nome": format!("S{}", id), "inquinanti": ["PM10"]},
                "geometry": {"coordinates": [9.0 + id as f64 / 100.0, 45.0]}
            })
        })
        .collect();
    write_json(
        &dir,
        "stations.geojson",
        json!({"type": "FeatureCollection", "features": features}),
    );
    let means = [
        (1, 30.0),
        (2, 50.0),
        (3, 30.0),
        (4, 10.0),
        (5, 40.0),
        (6, 20.0),
        (7, 5.0),
    ];
    let entries: Vec<Value> = means
        .iter()
        .map(|(id, v)| {
            json!({"stazione_id": id, "data": "2022-02-01", "inquinante": "PM10", "valore": v})
        })
        .collect();
    write_json(&dir, "2022_qualita-aria.json", Value::Array(entries));
    let settings = settings_for(&dir, 2022, 2022);

    let ranking = load(&settings)?.station_ranking("PM10", 5)?;
    let names: Vec<&str> = ranking.iter().map(|s| s.station_name.as_str()).collect();

    assert_eq!(names, vec!["S2", "S5", "S1", "S3", "S6"]);
    assert!(ranking.windows(2).all(|w| w[0].value >= w[1].value));
    Ok(())
}

#[test]
fn test_absent_selection_gives_empty_series() -> Result<()> {
    let (_dir, settings) = single_year_fixture();
    let analyzer = load(&settings)?;

    assert!(analyzer.daily_series("NO2", 2020, "B").is_empty());
    assert!(analyzer.daily_series("NO2", 2019, "A").is_empty());
    assert!(analyzer.daily_series("SO2", 2020, "A").is_empty());
    Ok(())
}

#[test]
fn test_empty_sources_fail_after_one_rebuild() {
    let dir = TempDir::new().unwrap();
    write_json(&dir, "stations.geojson", registry());
    write_json(&dir, "2020_qualita-aria.json", json!([]));
    let settings = settings_for(&dir, 2020, 2020);

    let result = DatasetLoader::new(&settings).load_or_rebuild();
    assert!(matches!(result, Err(ProcessingError::EmptyDataset { .. })));
}

#[test]
fn test_dashboard_view_serializes() -> Result<()> {
    let (_dir, settings) = two_year_fixture(20.0, 15.0);
    let analyzer = load(&settings)?;

    let view = DashboardView::compose(&analyzer, "NO2", None, None, settings.ranking_size);
    let json = serde_json::to_value(&view)?;

    assert_eq!(json["selected_year"], json!(2021));
    assert_eq!(json["selected_station"], json!("B"));
    assert_eq!(json["stations"][0]["coordinates"], json!([9.0, 45.0]));
    assert_eq!(json["trend"]["trend"]["direction"], json!("improvement"));
    assert_eq!(json["no_data"], json!(false));
    Ok(())
}
