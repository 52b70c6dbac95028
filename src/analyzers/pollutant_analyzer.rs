use crate::error::InsufficientData;
use crate::models::{
    Coordinates, DailyValue, Dataset, MeasurementRecord, StationAverage, StationLocation, Trend,
    TrendDirection, YearlyAverage,
};
use crate::utils::coordinates::centroid;
use chrono::NaiveDate;
use indexmap::IndexMap;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Running sum for an arithmetic mean.
#[derive(Debug, Default, Clone, Copy)]
struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn value(&self) -> f64 {
        self.sum / self.count as f64
    }
}

/// Query operations over a loaded dataset. Every method is a pure function
/// of the dataset and its arguments.
#[derive(Debug, Clone)]
pub struct PollutantAnalyzer {
    dataset: Dataset,
}

impl PollutantAnalyzer {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    fn records_for<'a>(
        &'a self,
        pollutant: &'a str,
    ) -> impl Iterator<Item = &'a MeasurementRecord> + 'a {
        self.dataset.iter().filter(move |r| r.pollutant == pollutant)
    }

    /// Distinct pollutant codes, sorted.
    pub fn list_pollutants(&self) -> Vec<String> {
        let codes: BTreeSet<&str> = self.dataset.iter().map(|r| r.pollutant.as_str()).collect();
        codes.into_iter().map(str::to_string).collect()
    }

    /// Stations that recorded `pollutant`, one entry per station name sorted
    /// by name. The first coordinates seen for a name are kept.
    pub fn stations_for(&self, pollutant: &str) -> Vec<StationLocation> {
        let mut stations: BTreeMap<&str, Coordinates> = BTreeMap::new();
        for record in self.records_for(pollutant) {
            stations
                .entry(record.station_name.as_str())
                .or_insert(record.coordinates);
        }

        stations
            .into_iter()
            .map(|(name, coordinates)| StationLocation {
                station_name: name.to_string(),
                coordinates,
            })
            .collect()
    }

    /// Mean position of the stations that recorded `pollutant`.
    pub fn map_center(&self, pollutant: &str) -> Option<Coordinates> {
        let stations = self.stations_for(pollutant);
        centroid(stations.iter().map(|s| &s.coordinates))
    }

    /// Mean value per year, ascending by year. Years without records are absent.
    pub fn yearly_average(&self, pollutant: &str) -> Vec<YearlyAverage> {
        let mut by_year: BTreeMap<i32, Mean> = BTreeMap::new();
        for record in self.records_for(pollutant) {
            by_year.entry(record.year).or_default().add(record.value);
        }

        by_year
            .into_iter()
            .map(|(year, mean)| YearlyAverage {
                year,
                value: mean.value(),
            })
            .collect()
    }

    /// Compare the first and last yearly averages.
    ///
    /// A last value equal to the first is reported as a deterioration.
    pub fn trend(&self, pollutant: &str) -> Result<Trend, InsufficientData> {
        let averages = self.yearly_average(pollutant);

        let (first, last) = match (averages.first(), averages.last()) {
            (Some(first), Some(last)) if averages.len() >= 2 => (first, last),
            (Some(only), _) => {
                return Err(InsufficientData::SingleYear {
                    pollutant: pollutant.to_string(),
                    year: only.year,
                })
            }
            _ => {
                return Err(InsufficientData::NoRecords {
                    pollutant: pollutant.to_string(),
                })
            }
        };

        if first.value == 0.0 {
            return Err(InsufficientData::ZeroBaseline {
                pollutant: pollutant.to_string(),
                year: first.year,
            });
        }

        let change_percent = (last.value - first.value) / first.value * 100.0;
        let direction = if last.value < first.value {
            TrendDirection::Improvement
        } else {
            TrendDirection::Deterioration
        };

        Ok(Trend {
            first_year: first.year,
            last_year: last.year,
            first_value: first.value,
            last_value: last.value,
            change_percent,
            direction,
        })
    }

    /// Stations with the highest mean across all years, at most `top_n`.
    ///
    /// Stations are grouped by name in order of first appearance; equal means
    /// keep that order.
    pub fn station_ranking(
        &self,
        pollutant: &str,
        top_n: usize,
    ) -> Result<Vec<StationAverage>, InsufficientData> {
        let mut by_station: IndexMap<&str, Mean> = IndexMap::new();
        for record in self.records_for(pollutant) {
            by_station
                .entry(record.station_name.as_str())
                .or_default()
                .add(record.value);
        }

        if by_station.is_empty() {
            return Err(InsufficientData::NoStations {
                pollutant: pollutant.to_string(),
            });
        }

        let mut ranking: Vec<StationAverage> = by_station
            .into_iter()
            .map(|(name, mean)| StationAverage {
                station_name: name.to_string(),
                value: mean.value(),
            })
            .collect();

        ranking.sort_by(|a, b| b.value.total_cmp(&a.value));
        ranking.truncate(top_n);

        Ok(ranking)
    }

    /// Years with at least one record, most recent first.
    pub fn years_for(&self, pollutant: &str) -> Vec<i32> {
        let years: BTreeSet<i32> = self.records_for(pollutant).map(|r| r.year).collect();
        years.into_iter().rev().collect()
    }

    /// Station names with at least one record for `pollutant` in `year`, sorted.
    pub fn stations_for_year(&self, pollutant: &str, year: i32) -> Vec<String> {
        let names: BTreeSet<&str> = self
            .records_for(pollutant)
            .filter(|r| r.year == year)
            .map(|r| r.station_name.as_str())
            .collect();
        names.into_iter().map(str::to_string).collect()
    }

    /// Dated values for one station, pollutant and year, ascending by date.
    /// Records without a usable date are left out. No match is an empty series.
    pub fn daily_series(&self, pollutant: &str, year: i32, station: &str) -> Vec<DailyValue> {
        let mut series: Vec<DailyValue> = self
            .records_for(pollutant)
            .filter(|r| r.year == year && r.station_name == station)
            .filter_map(|r| {
                r.date.map(|date| DailyValue {
                    date,
                    value: r.value,
                })
            })
            .collect();

        series.sort_by_key(|point| point.date);
        series
    }

    /// Overall description of the loaded dataset.
    pub fn summarize(&self) -> DatasetSummary {
        let records = self.dataset.records();

        let stations: HashSet<&str> = records.iter().map(|r| r.station_name.as_str()).collect();
        let years: BTreeSet<i32> = records.iter().map(|r| r.year).collect();
        let dates: BTreeSet<NaiveDate> = records.iter().filter_map(|r| r.date).collect();

        let bounds = records.iter().fold(None, |bounds: Option<GeographicBounds>, r| {
            let c = r.coordinates;
            Some(match bounds {
                None => GeographicBounds {
                    min_lat: c.latitude,
                    max_lat: c.latitude,
                    min_lon: c.longitude,
                    max_lon: c.longitude,
                },
                Some(b) => GeographicBounds {
                    min_lat: b.min_lat.min(c.latitude),
                    max_lat: b.max_lat.max(c.latitude),
                    min_lon: b.min_lon.min(c.longitude),
                    max_lon: b.max_lon.max(c.longitude),
                },
            })
        });

        DatasetSummary {
            total_records: records.len(),
            unique_stations: stations.len(),
            pollutants: self.list_pollutants(),
            year_range: years.first().copied().zip(years.last().copied()),
            date_range: dates.first().copied().zip(dates.last().copied()),
            undated_records: records.iter().filter(|r| !r.has_date()).count(),
            geographic_bounds: bounds,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeographicBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub total_records: usize,
    pub unique_stations: usize,
    pub pollutants: Vec<String>,
    pub year_range: Option<(i32, i32)>,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub undated_records: usize,
    pub geographic_bounds: Option<GeographicBounds>,
}

impl DatasetSummary {
    pub fn summary(&self) -> String {
        let years = match self.year_range {
            Some((first, last)) => format!("{} to {}", first, last),
            None => "none".to_string(),
        };
        let dates = match self.date_range {
            Some((first, last)) => format!("{} to {}", first, last),
            None => "no usable dates".to_string(),
        };
        let coverage = match self.geographic_bounds {
            Some(b) => format!(
                "{:.3}°N-{:.3}°N, {:.3}°E-{:.3}°E",
                b.min_lat, b.max_lat, b.min_lon, b.max_lon
            ),
            None => "unknown".to_string(),
        };

        format!(
            "Records: {} total ({} without a usable date)\n\
            Stations: {}\n\
            Pollutants: {}\n\
            Years: {}\n\
            Date Range: {}\n\
            Coverage: {}",
            self.total_records,
            self.undated_records,
            self.unique_stations,
            self.pollutants.join(", "),
            years,
            dates,
            coverage
        )
    }
}
