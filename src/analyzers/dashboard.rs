//! Everything the dashboard renders for one selection, computed up front so
//! the presentation side only has to draw it.

use crate::analyzers::PollutantAnalyzer;
use crate::models::{
    Coordinates, DailyValue, PollutantInfo, StationAverage, StationLocation, Trend, YearlyAverage,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendView {
    pub trend: Option<Trend>,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub pollutant: PollutantInfo,
    pub stations: Vec<StationLocation>,
    pub map_center: Option<Coordinates>,
    pub yearly_average: Vec<YearlyAverage>,
    pub trend: TrendView,
    pub ranking: Vec<StationAverage>,
    pub years: Vec<i32>,
    pub selected_year: Option<i32>,
    pub stations_for_year: Vec<String>,
    pub selected_station: Option<String>,
    pub daily: Vec<DailyValue>,
    pub no_data: bool,
}

impl DashboardView {
    /// Compose the view for a selection. Without an explicit year the most
    /// recent one is used; without a station, the first for that year.
    pub fn compose(
        analyzer: &PollutantAnalyzer,
        pollutant: &str,
        year: Option<i32>,
        station: Option<&str>,
        ranking_size: usize,
    ) -> Self {
        let years = analyzer.years_for(pollutant);
        let selected_year = year.or_else(|| years.first().copied());

        let stations_for_year = selected_year
            .map(|y| analyzer.stations_for_year(pollutant, y))
            .unwrap_or_default();
        let selected_station = station
            .map(str::to_string)
            .or_else(|| stations_for_year.first().cloned());

        let daily = match (selected_year, selected_station.as_deref()) {
            (Some(y), Some(s)) => analyzer.daily_series(pollutant, y, s),
            _ => Vec::new(),
        };

        let trend = match analyzer.trend(pollutant) {
            Ok(trend) => TrendView {
                label: trend.to_string(),
                trend: Some(trend),
            },
            Err(reason) => TrendView {
                trend: None,
                label: reason.to_string(),
            },
        };

        Self {
            pollutant: PollutantInfo::for_code(pollutant),
            stations: analyzer.stations_for(pollutant),
            map_center: analyzer.map_center(pollutant),
            yearly_average: analyzer.yearly_average(pollutant),
            trend,
            ranking: analyzer
                .station_ranking(pollutant, ranking_size)
                .unwrap_or_default(),
            no_data: daily.is_empty(),
            years,
            selected_year,
            stations_for_year,
            selected_station,
            daily,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Dataset, MeasurementRecord, Station};
    use chrono::NaiveDate;

    fn analyzer() -> PollutantAnalyzer {
        let a = Station::new(1, "A".to_string(), vec![], Coordinates::new(9.0, 45.0));
        let b = Station::new(2, "B".to_string(), vec![], Coordinates::new(9.2, 45.2));
        let day = |y, m, d| NaiveDate::from_ymd_opt(y, m, d);

        PollutantAnalyzer::new(Dataset::new(vec![
            MeasurementRecord::new(2020, day(2020, 1, 1), &a, "NO2".to_string(), 20.0),
            MeasurementRecord::new(2021, day(2021, 1, 2), &b, "NO2".to_string(), 16.0),
            MeasurementRecord::new(2021, day(2021, 1, 1), &b, "NO2".to_string(), 14.0),
        ]))
    }

    #[test]
    fn test_compose_defaults_to_latest_year_and_first_station() {
        let view = DashboardView::compose(&analyzer(), "NO2", None, None, 5);

        assert_eq!(view.pollutant.name, "Nitrogen dioxide");
        assert_eq!(view.years, vec![2021, 2020]);
        assert_eq!(view.selected_year, Some(2021));
        assert_eq!(view.selected_station.as_deref(), Some("B"));
        assert_eq!(view.daily.len(), 2);
        assert_eq!(view.daily[0].value, 14.0);
        assert!(!view.no_data);
        assert_eq!(view.ranking[0].station_name, "A");
        assert_eq!(view.trend.label, "improvement (-25.0%) from 2020 to 2021");
        assert!(view.map_center.is_some());
    }

    #[test]
    fn test_compose_with_unmatched_selection_has_no_data() {
        let view = DashboardView::compose(&analyzer(), "NO2", Some(2020), Some("B"), 5);

        assert!(view.daily.is_empty());
        assert!(view.no_data);
    }

    #[test]
    fn test_compose_unknown_pollutant() {
        let view = DashboardView::compose(&analyzer(), "SO2", None, None, 5);

        assert!(view.years.is_empty());
        assert!(view.selected_year.is_none());
        assert!(view.ranking.is_empty());
        assert!(view.trend.trend.is_none());
        assert!(view.no_data);
    }
}
