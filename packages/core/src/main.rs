use clap::Parser;
use dotenvy::dotenv;

use drug_shortage_notifier::cli::Cli;
use drug_shortage_notifier::config::Settings;
use drug_shortage_notifier::job;
use drug_shortage_notifier::lists;
use drug_shortage_notifier::logging::init_logging;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv().ok();
    init_logging();

    let cli = Cli::parse();

    tracing::info!("Starting weekly drug shortage check");

    let settings = Settings::from_file(&cli.config).unwrap_or_else(|err| {
        tracing::error!("{}", err);
        std::process::exit(1);
    });
    tracing::debug!("Loaded settings: {:?}", settings);

    let keys = lists::read_tracked_keys(&cli.drugs);
    let recipients = lists::read_recipients(&cli.recipients);

    job::run(&settings, &keys, &recipients).await;

    tracing::info!("Drug shortage check completed");
}
