use clap::Parser;
use fabric_search::app::render::print_report;
use fabric_search::config::settings::DEFAULT_LOG_DIR;
use fabric_search::domain::ports::ConfigProvider;
use fabric_search::utils::{logger, validation::Validate};
use fabric_search::{ApicClient, Cli, FabricError, SearchEngine, Settings};
use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = match Settings::load(&cli.config) {
        Ok(settings) => settings.with_inventory_override(cli.inventory.clone()),
        Err(e) => {
            logger::init_cli_logger(cli.loglevel, Path::new(DEFAULT_LOG_DIR));
            tracing::error!("❌ Failed to load settings file '{}': {}", cli.config.display(), e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    logger::init_cli_logger(cli.loglevel, settings.log_dir());
    tracing::debug!("Settings: {:?}", settings);

    if let Err(e) = settings.validate() {
        match &e {
            FabricError::MissingConfigError { .. } => tracing::error!(
                "\"INVENTORY_USERNAME\" or \"INVENTORY_PASSWORD\" is undefined, please ensure they are set as environment variables or within the settings file."
            ),
            _ => tracing::error!("❌ Configuration validation failed: {}", e),
        }
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }
    let credentials = settings.credentials()?;

    let mode = cli.command.search_mode()?;

    let api = Arc::new(ApicClient::from_config(&settings)?);
    let engine = SearchEngine::new(api, credentials);

    let report = engine.search(settings.inventory_path(), mode).await;
    print_report(&report);

    Ok(())
}
