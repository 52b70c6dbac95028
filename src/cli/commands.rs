use crate::analyzers::{DashboardView, PollutantAnalyzer};
use crate::cli::args::{Cli, Commands, OutputFormat, QueryOp};
use crate::error::{ProcessingError, Result};
use crate::processors::{DatasetBuilder, DatasetLoader};
use crate::settings::Settings;
use crate::writers::{JsonWriter, ToTable};
use serde::Serialize;
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(data_dir) = cli.data_dir {
        settings.data_dir = data_dir;
    }
    debug!(?settings, "Resolved settings");

    let show_progress = !cli.quiet;

    match cli.command {
        Commands::Build { validate_only } => {
            let builder = DatasetBuilder::new(&settings).with_progress(show_progress);

            if validate_only {
                let (_records, report) = builder.consolidate()?;
                println!("{}", report.summary());
                println!("Validation complete - no snapshot written");
                return Ok(());
            }

            let (dataset, report) = builder.build()?;
            println!("{}", report.summary());

            let snapshot = settings.snapshot_path();
            let file_info = JsonWriter::new().get_file_info(&snapshot, dataset.len())?;
            println!("{}", file_info.summary());
        }

        Commands::Info { sample } => {
            let dataset = DatasetLoader::new(&settings)
                .with_progress(show_progress)
                .load_or_rebuild()?;
            let analyzer = PollutantAnalyzer::new(dataset);

            println!("{}", analyzer.summarize().summary());

            let snapshot = settings.snapshot_path();
            let file_info = JsonWriter::new().get_file_info(&snapshot, analyzer.dataset().len())?;
            println!("{}", file_info.summary());

            if sample > 0 {
                println!("\nSample Records (showing up to {}):", sample);
                for (i, record) in analyzer.dataset().iter().take(sample).enumerate() {
                    let date = record
                        .date
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "undated".to_string());
                    println!(
                        "{}. {} ({}) on {}: {} = {}",
                        i + 1,
                        record.station_name,
                        record.year,
                        date,
                        record.pollutant,
                        record.value
                    );
                }
            }
        }

        Commands::Query { format, op } => {
            let dataset = DatasetLoader::new(&settings)
                .with_progress(show_progress)
                .load_or_rebuild()?;
            let analyzer = PollutantAnalyzer::new(dataset);
            run_query(&analyzer, op, format, settings.ranking_size)?;
        }

        Commands::Dashboard {
            pollutant,
            year,
            station,
        } => {
            let dataset = DatasetLoader::new(&settings)
                .with_progress(show_progress)
                .load_or_rebuild()?;
            let analyzer = PollutantAnalyzer::new(dataset);
            let view = DashboardView::compose(
                &analyzer,
                &pollutant,
                year,
                station.as_deref(),
                settings.ranking_size,
            );
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
    }

    Ok(())
}

fn run_query(
    analyzer: &PollutantAnalyzer,
    op: QueryOp,
    format: OutputFormat,
    ranking_size: usize,
) -> Result<()> {
    match op {
        QueryOp::Pollutants => emit(analyzer.list_pollutants().as_slice(), format),
        QueryOp::Stations { pollutant } => {
            emit(analyzer.stations_for(&pollutant).as_slice(), format)
        }
        QueryOp::Yearly { pollutant } => {
            emit(analyzer.yearly_average(&pollutant).as_slice(), format)
        }
        QueryOp::Trend { pollutant } => match analyzer.trend(&pollutant) {
            Ok(trend) => {
                if format == OutputFormat::Table {
                    println!("{}", trend);
                }
                emit(&trend, format)
            }
            Err(reason) => {
                println!("Insufficient data: {}", reason);
                Ok(())
            }
        },
        QueryOp::Ranking { pollutant, top } => {
            match analyzer.station_ranking(&pollutant, top.unwrap_or(ranking_size)) {
                Ok(ranking) => emit(ranking.as_slice(), format),
                Err(reason) => {
                    println!("Insufficient data: {}", reason);
                    Ok(())
                }
            }
        }
        QueryOp::Years { pollutant } => emit(analyzer.years_for(&pollutant).as_slice(), format),
        QueryOp::StationsForYear { pollutant, year } => emit(
            analyzer.stations_for_year(&pollutant, year).as_slice(),
            format,
        ),
        QueryOp::Daily {
            pollutant,
            year,
            station,
        } => emit(
            analyzer.daily_series(&pollutant, year, &station).as_slice(),
            format,
        ),
    }
}

fn emit<T>(value: &T, format: OutputFormat) -> Result<()>
where
    T: Serialize + ToTable + ?Sized,
{
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Csv => value.to_table().write_csv(io::stdout().lock())?,
        OutputFormat::Table => {
            let table = value.to_table();
            if table.is_empty() {
                println!("No data for this selection");
            } else {
                println!("{}", table.render());
            }
        }
    }
    Ok(())
}

/// `RUST_LOG` takes precedence over the verbosity flags.
fn init_logging(verbose: bool, quiet: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let result = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init(),
    };

    result.map_err(|e| ProcessingError::Config(format!("failed to initialise logging: {}", e)))
}
