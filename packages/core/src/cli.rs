use std::path::PathBuf;

use clap::Parser;

/// Drug Shortage Notifier CLI arguments
#[derive(Debug, Parser)]
#[command(
    name = "drug-shortage-notifier",
    version,
    about = "Weekly drug shortage summary, delivered by email"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, default_value = "config.ini")]
    pub config: PathBuf,

    /// Path to the drug keys file
    #[arg(long, default_value = "drugs.txt")]
    pub drugs: PathBuf,

    /// Path to the recipients file
    #[arg(long, default_value = "recipients.txt")]
    pub recipients: PathBuf,
}
