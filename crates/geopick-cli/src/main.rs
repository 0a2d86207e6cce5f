//! geopick: command-line front end for geopick-core
//!
//! Lists countries, states and cities from the bundled dataset or a remote
//! API, and drives a full selection by ids.
//!
//! Usage examples
//! --------------
//!
//! - Show dataset stats
//!   $ geopick stats
//!
//! - List countries, optionally filtered by name
//!   $ geopick countries
//!   $ geopick countries --filter aland
//!
//! - Browse down the hierarchy by id
//!   $ geopick states 233
//!   $ geopick cities 1416 --filter san
//!
//! - Ask the API first, fall back to the dataset
//!   $ geopick --source fallback --base-url https://api.example.com countries
//!
//! - Pick a location and print it as JSON
//!   $ geopick pick 233 1416 110992
//!
//! Logging goes to stderr; use `-v`/`-vv` or `RUST_LOG` to see cache and
//! fallback decisions.
mod args;

use crate::args::{CliArgs, Commands, Source};
use anyhow::{bail, Context};
use clap::Parser;
use geopick_core::loader::default_dataset_path;
use geopick_core::provider::{self, BundledProvider};
use geopick_core::text::filter_by_name;
use geopick_core::{LocationProvider, LocationRepository, NameMatch, SelectionSession};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    let dataset = args.dataset.clone().unwrap_or_else(default_dataset_path);
    let repo = || -> anyhow::Result<Arc<LocationRepository<Box<dyn LocationProvider>>>> {
        let provider = build_provider(args.source, args.base_url.as_deref(), dataset.clone())?;
        Ok(Arc::new(LocationRepository::new(provider)))
    };

    match args.command {
        Commands::Stats => {
            let stats = BundledProvider::from_path(dataset.clone())
                .stats()
                .await
                .with_context(|| format!("loading {}", dataset.display()))?;
            println!("Dataset statistics:");
            println!("  Countries: {}", stats.countries);
            println!("  States/Regions: {}", stats.states);
            println!("  Cities: {}", stats.cities);
        }

        Commands::Countries { filter } => {
            let countries = repo()?.countries(false).await?;
            print_rows(&countries, filter.as_deref(), |c| c.id);
        }

        Commands::States { country_id, filter } => {
            let states = repo()?.states(country_id, false).await?;
            print_rows(&states, filter.as_deref(), |s| s.id);
        }

        Commands::Cities { state_id, filter } => {
            let cities = repo()?.cities(state_id, false).await?;
            print_rows(&cities, filter.as_deref(), |c| c.id);
        }

        Commands::Pick {
            country_id,
            state_id,
            city_id,
        } => {
            let session = SelectionSession::new(repo()?);

            let countries = session.load_countries(false).await?;
            let Some(country) = countries.into_iter().find(|c| c.id == country_id) else {
                bail!("no country with id {country_id}");
            };
            let states = session.select_country(Some(country), false).await?;

            if let Some(state_id) = state_id {
                let Some(state) = states.into_iter().find(|s| s.id == state_id) else {
                    bail!("country {country_id} has no state with id {state_id}");
                };
                let cities = session.select_state(Some(state), false).await?;

                if let Some(city_id) = city_id {
                    let Some(city) = cities.into_iter().find(|c| c.id == city_id) else {
                        bail!("state {state_id} has no city with id {city_id}");
                    };
                    session.select_city(Some(city)).await;
                }
            }

            let selection = session.response().await;
            println!("{}", serde_json::to_string_pretty(&selection)?);
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,geopick_core={level},geopick={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_rows<T: NameMatch>(items: &[T], filter: Option<&str>, id: impl Fn(&T) -> i64) {
    let rows = filter_by_name(items, filter.unwrap_or(""));
    if rows.is_empty() {
        println!("No entries found.");
        return;
    }
    for item in rows {
        println!("{:>8}  {}", id(item), item.name_str());
    }
}

fn build_provider(
    source: Source,
    base_url: Option<&str>,
    dataset: PathBuf,
) -> anyhow::Result<Box<dyn LocationProvider>> {
    tracing::debug!(?source, base_url, dataset = %dataset.display(), "building provider");
    if source == Source::Bundled {
        return Ok(provider::bundled(dataset));
    }
    let Some(base_url) = base_url else {
        bail!("--base-url is required with --source {source:?}");
    };
    remote_provider(source, base_url, dataset)
}

#[cfg(feature = "remote")]
fn remote_provider(
    source: Source,
    base_url: &str,
    dataset: PathBuf,
) -> anyhow::Result<Box<dyn LocationProvider>> {
    Ok(match source {
        Source::Fallback => provider::remote_with_bundled_fallback(base_url, dataset),
        _ => provider::remote(base_url),
    })
}

#[cfg(not(feature = "remote"))]
fn remote_provider(
    _source: Source,
    _base_url: &str,
    _dataset: PathBuf,
) -> anyhow::Result<Box<dyn LocationProvider>> {
    bail!("this build has no HTTP support (enable the `remote` feature)")
}
