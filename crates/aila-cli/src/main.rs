use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "aila-cli", version, about = "AILA engagement CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record user actions and evaluate prompt triggers
    Track {
        #[command(subcommand)]
        action: commands::track::TrackAction,
    },
    /// Tree-size snapshot updates
    Persons {
        #[command(subcommand)]
        action: commands::track::PersonsAction,
    },
    /// Pending prompt inspection and dismissal
    Prompt {
        #[command(subcommand)]
        action: commands::prompt::PromptAction,
    },
    /// Referral code management
    Referral {
        #[command(subcommand)]
        action: commands::referral::ReferralAction,
    },
    /// Interstitial gate simulation and stats
    Ads {
        #[command(subcommand)]
        action: commands::ads::AdsAction,
    },
    /// Premium subscription status
    Premium {
        #[command(subcommand)]
        action: commands::premium::PremiumAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print combined engagement state as JSON
    Status,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Track { action } => commands::track::run(action),
        Commands::Persons { action } => commands::track::run_persons(action),
        Commands::Prompt { action } => commands::prompt::run(action),
        Commands::Referral { action } => commands::referral::run(action),
        Commands::Ads { action } => commands::ads::run(action),
        Commands::Premium { action } => commands::premium::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Status => commands::status::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
