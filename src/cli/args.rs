use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "airq-processor")]
#[command(about = "Consolidates and queries municipal air-quality measurements")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(
        short,
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Only log warnings and hide progress bars"
    )]
    pub quiet: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Settings file [default: ./airq.toml if present]")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Directory holding the source files and snapshot")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rebuild the consolidated snapshot from the registry and yearly files
    Build {
        #[arg(
            long,
            default_value = "false",
            help = "Ingest and report without writing the snapshot"
        )]
        validate_only: bool,
    },

    /// Summarise the consolidated dataset, building it first if needed
    Info {
        #[arg(short, long, default_value = "0")]
        sample: usize,
    },

    /// Run a single query against the consolidated dataset
    Query {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        #[command(subcommand)]
        op: QueryOp,
    },

    /// Emit everything the dashboard shows for a selection as JSON
    Dashboard {
        #[arg(short, long)]
        pollutant: String,

        #[arg(short, long)]
        year: Option<i32>,

        #[arg(short, long)]
        station: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum QueryOp {
    /// Distinct pollutant codes, sorted
    Pollutants,

    /// Stations that measured a pollutant, with coordinates
    Stations {
        #[arg(short, long)]
        pollutant: String,
    },

    /// Mean value per year for a pollutant
    Yearly {
        #[arg(short, long)]
        pollutant: String,
    },

    /// Change between the first and last yearly averages
    Trend {
        #[arg(short, long)]
        pollutant: String,
    },

    /// Stations with the highest mean value
    Ranking {
        #[arg(short, long)]
        pollutant: String,

        #[arg(short, long, help = "Number of stations [default: ranking_size setting]")]
        top: Option<usize>,
    },

    /// Years with data for a pollutant, most recent first
    Years {
        #[arg(short, long)]
        pollutant: String,
    },

    /// Stations with data for a pollutant in a given year
    StationsForYear {
        #[arg(short, long)]
        pollutant: String,

        #[arg(short, long)]
        year: i32,
    },

    /// Dated values for one station, pollutant and year
    Daily {
        #[arg(short, long)]
        pollutant: String,

        #[arg(short, long)]
        year: i32,

        #[arg(short, long)]
        station: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}
