//! Example demonstrating the matching pipeline over the mock directory.
//!
//! Seeds the in-memory directory, refreshes the store, and prints ranked
//! candidates for a requester in central Beijing.
//!
//! To run: cargo run --example matching_demo

use anyhow::Result;
use carelink_core::models::{Location, RequestId, VolunteerId};
use carelink_data::MockVolunteerDirectory;
use carelink_match::{MatchPipeline, MatchPlan};
use carelink_store::VolunteerStore;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let directory = MockVolunteerDirectory::seeded(Duration::from_millis(150));
    let store = Arc::new(VolunteerStore::new());
    let pipeline = MatchPipeline::new(directory, Arc::clone(&store));

    println!("Refreshing from the directory...");
    pipeline.refresh().await?;
    println!(
        "  {} volunteers, {} open requests\n",
        store.volunteers().len(),
        store.help_requests().len()
    );

    store.set_current_location(Some(Location {
        latitude: 39.9042,
        longitude: 116.4074,
        tag: carelink_geo::encode_tag(39.9042, 116.4074),
        address: "Jiaodaokou South Alley 12".to_string(),
        accuracy_m: None,
        fixed_at: Utc::now(),
    }));

    let plan = MatchPlan::new(5.0).with_min_rating(4.5);
    println!("Candidates within 5 km, rating 4.5+:");
    for candidate in pipeline.candidates(&plan) {
        println!(
            "  {:20} {:.1} km   rating {:.1}   skills: {}",
            candidate.volunteer.name,
            candidate.distance_km,
            candidate.volunteer.rating,
            candidate.volunteer.skills.join(", ")
        );
    }

    let took = pipeline
        .assign(&RequestId::from("r-clinic"), &VolunteerId::from("v-li"))
        .await?;
    println!("\nAssigning the clinic visit to Li Wei: {}", if took { "accepted" } else { "rejected" });

    Ok(())
}
