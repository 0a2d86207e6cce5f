use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for geopick
#[derive(Debug, Parser)]
#[command(
    name = "geopick",
    version,
    about = "Browse countries, states and cities and build a location selection"
)]
pub struct CliArgs {
    /// Where location data comes from
    #[arg(
        short = 's',
        long = "source",
        value_enum,
        default_value_t = Source::Bundled,
        global = true
    )]
    pub source: Source,

    /// Base URL of the location API (required for `remote` and `fallback`)
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// Path to a dataset document (.json or .json.gz).
    /// Defaults to the one shipped with geopick-core
    #[arg(short = 'd', long = "dataset", global = true)]
    pub dataset: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Source {
    /// The remote HTTP API
    Remote,
    /// The dataset document
    Bundled,
    /// The remote API, the dataset when it fails
    Fallback,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the dataset contents (bundled data only)
    Stats,

    /// List all countries
    Countries {
        /// Keep only names containing this text (accent- and case-insensitive)
        #[arg(long)]
        filter: Option<String>,
    },

    /// List the states of a country
    States {
        /// Country id
        country_id: i64,

        #[arg(long)]
        filter: Option<String>,
    },

    /// List the cities of a state
    Cities {
        /// State id
        state_id: i64,

        #[arg(long)]
        filter: Option<String>,
    },

    /// Pick a location by ids and print the resulting selection as JSON
    Pick {
        country_id: i64,
        state_id: Option<i64>,
        city_id: Option<i64>,
    },
}
