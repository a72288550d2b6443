use aila_core::Database;
use chrono::Utc;
use clap::Subcommand;

use super::session;

#[derive(Subcommand)]
pub enum ReferralAction {
    /// Print the referral code, generating one on first use
    Code,
}

pub fn run(action: ReferralAction) -> Result<(), Box<dyn std::error::Error>> {
    let ReferralAction::Code = action;

    let db = Database::open()?;
    let (mut store, _) = session::load_store(&db);
    let (code, _) = store.generate_referral_code(Utc::now());
    println!("{code}");
    session::save_store(&db, &store)
}
