use book_report::utils::{logger, validation::Validate};
use book_report::{CliConfig, LocalStorage, ReportEngine, ReportPipeline};
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting book-report CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if config.monitor {
        tracing::info!("🔍 Stage monitoring enabled");
    }

    let stage = config.stage;
    let monitor_enabled = config.monitor;
    let storage = LocalStorage::new(config.output_dir.clone());
    let csv_path = storage.full_path(&config.csv_file);
    let report_path = storage.full_path(&config.report_file);

    let pipeline = ReportPipeline::new(storage, config);
    let engine = ReportEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run_stage(stage).await {
        Ok(summary) => {
            if summary.rows_written.is_some() {
                println!("📁 CSV: {}", csv_path.display());
            }
            if let Some(report) = &summary.report {
                println!("📁 Report: {}", report_path.display());
                tracing::debug!("Report summary: {}", serde_json::to_string(report)?);
            }
            tracing::info!("✅ Pipeline finished");
        }
        Err(e) => {
            tracing::error!(
                "❌ Pipeline failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
