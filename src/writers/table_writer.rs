use crate::error::Result;
use crate::models::{DailyValue, StationAverage, StationLocation, Trend, YearlyAverage};
use std::io::Write;

/// A flat table of query results, ready for text or CSV output.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<&'static str>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(&self.headers)?;
        for row in &self.rows {
            csv.write_record(row)?;
        }
        csv.flush()?;
        Ok(())
    }

    /// Render as left-aligned text columns.
    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let line = |cells: &[&str]| {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut out = Vec::with_capacity(self.rows.len() + 2);
        out.push(line(&self.headers[..]));
        out.push(
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("  "),
        );
        for row in &self.rows {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            out.push(line(&cells[..]));
        }

        out.join("\n")
    }
}

/// Conversion of query results into a `Table`.
pub trait ToTable {
    fn to_table(&self) -> Table;
}

fn format_value(value: f64) -> String {
    format!("{:.2}", value)
}

impl ToTable for [String] {
    fn to_table(&self) -> Table {
        let mut table = Table::new(vec!["value"]);
        for item in self {
            table.push(vec![item.clone()]);
        }
        table
    }
}

impl ToTable for [i32] {
    fn to_table(&self) -> Table {
        let mut table = Table::new(vec!["year"]);
        for year in self {
            table.push(vec![year.to_string()]);
        }
        table
    }
}

impl ToTable for [StationLocation] {
    fn to_table(&self) -> Table {
        let mut table = Table::new(vec!["station_name", "longitude", "latitude"]);
        for s in self {
            table.push(vec![
                s.station_name.clone(),
                s.coordinates.longitude.to_string(),
                s.coordinates.latitude.to_string(),
            ]);
        }
        table
    }
}

impl ToTable for [YearlyAverage] {
    fn to_table(&self) -> Table {
        let mut table = Table::new(vec!["year", "value"]);
        for y in self {
            table.push(vec![y.year.to_string(), format_value(y.value)]);
        }
        table
    }
}

impl ToTable for [StationAverage] {
    fn to_table(&self) -> Table {
        let mut table = Table::new(vec!["rank", "station_name", "value"]);
        for (i, s) in self.iter().enumerate() {
            table.push(vec![
                (i + 1).to_string(),
                s.station_name.clone(),
                format_value(s.value),
            ]);
        }
        table
    }
}

impl ToTable for [DailyValue] {
    fn to_table(&self) -> Table {
        let mut table = Table::new(vec!["date", "value"]);
        for d in self {
            table.push(vec![d.date.to_string(), format_value(d.value)]);
        }
        table
    }
}

impl ToTable for Trend {
    fn to_table(&self) -> Table {
        let mut table = Table::new(vec![
            "first_year",
            "first_value",
            "last_year",
            "last_value",
            "change_percent",
            "direction",
        ]);
        table.push(vec![
            self.first_year.to_string(),
            format_value(self.first_value),
            self.last_year.to_string(),
            format_value(self.last_value),
            format!("{:+.1}", self.change_percent),
            self.direction.label().to_string(),
        ]);
        table
    }
}
