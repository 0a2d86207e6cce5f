//! Basic usage example for geopick-rs
//!
//! Walks the bundled dataset the way a picker UI would:
//! - load the countries
//! - select a country, then a state, then a city
//! - change the country and watch the lower levels reset
//! - merge a typed city name into the final selection

use geopick_rs::prelude::*;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== geopick-rs Basic Usage Example ===\n");

    let repo = Arc::new(LocationRepository::new(BundledProvider::default()));
    let session = SelectionSession::new(repo);

    println!("--- Example 1: List countries ---");
    let countries = session.load_countries(false).await?;
    println!("Total countries: {}", countries.len());
    for (i, country) in countries.iter().take(5).enumerate() {
        println!("{}. {} (id {})", i + 1, country.name, country.id);
    }
    println!();

    println!("--- Example 2: Pick country, state and city ---");
    let Some(country) = countries.iter().find(|c| c.name == "United States").cloned() else {
        println!("United States not in dataset");
        return Ok(());
    };
    let states = session.select_country(Some(country), false).await?;
    println!("States: {}", states.len());
    let cities = session.select_state(states.first().cloned(), false).await?;
    println!("Cities in first state: {}", cities.len());
    session.select_city(cities.first().cloned()).await;
    println!("Stage: {:?}", session.stage().await);
    println!("Selection: {:?}\n", session.response().await);

    println!("--- Example 3: Changing the country resets the rest ---");
    let other = countries.iter().find(|c| c.name != "United States").cloned();
    session.select_country(other, false).await?;
    println!("Stage: {:?}", session.stage().await);
    println!("State still selected: {}\n", session.selected_state().await.is_some());

    println!("--- Example 4: Free-text city ---");
    let mut manual = ManualEntry::default();
    manual.set_city("Somewhere Small");
    let merged = LocationSelection::compose(&session.response().await, &manual);
    println!("{merged:?}");

    Ok(())
}
