mod models;
mod scrapers;
mod store;

use models::StayOutcome;
use scrapers::{ChromeBackend, DateWindowDriver, ScanParams};
use store::ResultStore;
use tracing::{info, Level};

const PARAMS_FILE: &str = "scan_params.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("🏨 Stay Scout - Room Availability Scanner");
    info!("==========================================");
    info!("");

    let params = ScanParams::load(PARAMS_FILE).await?;
    info!(
        "Scanning {} stays starting day {} of month {} {}",
        params.days_to_scan, params.start_day, params.start_month, params.year
    );
    info!("Property: {}", params.property_name);
    info!("");

    let output_path = params.output_path.clone();
    let store = ResultStore::new(&output_path);
    let driver = DateWindowDriver::new(ChromeBackend::new(), params, store)?;
    let results = driver.run()?;

    // Display results
    info!("\n✅ Scanned {} stays\n", results.len());

    let mut unavailable = 0;
    for (key, outcome) in &results {
        match outcome {
            StayOutcome::Unavailable { description } => {
                unavailable += 1;
                println!("{}  unavailable: {}", key, description);
            }
            StayOutcome::Available { offers } => {
                println!("{}  {} offers", key, offers.len());
                for offer in offers {
                    println!("   {} ({}, {})", offer.name, offer.price, offer.room_size);
                }
            }
        }
        println!();
    }

    info!("{} of {} stays unavailable", unavailable, results.len());
    info!("💾 Results checkpointed to {}", output_path.display());

    Ok(())
}
