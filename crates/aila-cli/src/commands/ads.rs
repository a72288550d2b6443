use aila_core::{Config, Database, InterstitialGate, Platform, StubProvider};
use chrono::Utc;
use clap::Subcommand;

use super::session;

#[derive(Subcommand)]
pub enum AdsAction {
    /// Drive a fresh gate through N navigation events with a stub provider
    Simulate {
        /// Number of navigation events to simulate
        #[arg(long, default_value_t = 6)]
        events: u32,
        /// Simulate a paying user
        #[arg(long)]
        premium: bool,
        /// Target platform (android, ios, web)
        #[arg(long, default_value = "android")]
        platform: String,
    },
    /// Print the gate configuration and cached premium flag
    Status,
}

pub fn run(action: AdsAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AdsAction::Simulate {
            events,
            premium,
            platform,
        } => {
            let platform: Platform = platform.parse()?;
            let config = Config::load().ads;

            // A --premium flag wins; otherwise use the cached backend answer.
            let db = Database::open()?;
            let premium = premium
                || db
                    .kv_get("premium_active")
                    .ok()
                    .flatten()
                    .map(|v| v == "true")
                    .unwrap_or(false);

            let mut gate = InterstitialGate::new(StubProvider::new(), config, platform);
            gate.set_premium(premium);
            if let Some(e) = gate.preload(Utc::now()) {
                session::print_event(&e);
            }
            for i in 1..=events {
                for event in gate.on_navigation_event(&format!("page-{i}"), Utc::now()) {
                    session::print_event(&event);
                }
            }
            println!("{}", serde_json::to_string_pretty(&gate.stats())?);
        }
        AdsAction::Status => {
            let config = Config::load().ads;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }
    Ok(())
}
