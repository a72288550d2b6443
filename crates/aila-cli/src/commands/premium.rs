use aila_core::{fetch_premium_status, Database, PremiumStatus};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum PremiumAction {
    /// Fetch the subscription status from the backend
    Status {
        /// Backend base URL
        #[arg(long, default_value = "https://api.aila.family")]
        base_url: String,
        /// Bearer token for the signed-in user
        #[arg(long, env = "AILA_TOKEN")]
        token: Option<String>,
    },
}

pub fn run(action: PremiumAction) -> Result<(), Box<dyn std::error::Error>> {
    let PremiumAction::Status { base_url, token } = action;

    let runtime = tokio::runtime::Runtime::new()?;
    let status = match runtime.block_on(fetch_premium_status(&base_url, token.as_deref())) {
        Ok(status) => status,
        Err(e) => {
            // Backend unreachable: degrade to not-premium, never fail.
            log::warn!("premium status check failed: {e}");
            PremiumStatus::inactive()
        }
    };

    // Cache the answer so `ads simulate` picks it up by default.
    let db = Database::open()?;
    db.kv_set(
        "premium_active",
        if status.is_active() { "true" } else { "false" },
    )?;

    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}
