use agol_dump::utils::error::ErrorSeverity;
use agol_dump::utils::{logger, validation::Validate};
use agol_dump::{CliConfig, Connector, DumpSummary, ExportConfig, ItemDumper};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting agol-dump");

    let config = match ExportConfig::resolve(cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration resolution failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::debug!(
        "Portal: {}, output dir: {}, max items: {}",
        config.portal_url,
        config.output_dir,
        config.max_items
    );

    match run(config).await {
        Ok(summary) => {
            tracing::info!(
                "✅ Export completed: {} items written, {} skipped",
                summary.written,
                summary.skipped
            );
            println!("✅ Export completed successfully!");
            println!("📁 Output saved to: {}", summary.output_path.display());
        }
        Err(e) => {
            tracing::error!(
                "❌ Export failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

async fn run(config: ExportConfig) -> agol_dump::Result<DumpSummary> {
    let connector = Connector::new(
        &config.portal_url,
        config.credentials.clone(),
        config.insecure,
    )?;
    let session = connector.connect().await?;

    let dumper = ItemDumper::new(session, config);
    dumper.run().await
}
