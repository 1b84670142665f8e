use anyhow::Context;
use book_report::core::{ConfigProvider, Stage};
use book_report::utils::{logger, validation::Validate};
use book_report::{LocalStorage, ReportEngine, ReportPipeline, TomlConfig};
use clap::Parser;

#[derive(Parser)]
#[command(name = "toml-report")]
#[command(about = "Book report pipeline with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "book-report.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Run a single stage instead of the whole pipeline
    #[arg(long, value_enum, default_value = "all")]
    stage: Stage,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 日誌格式要看設定檔，所以先載入配置
    let config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load config file '{}'", args.config))?;

    if config.json_logs() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based book report");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        perform_dry_run(&config, args.stage)?;
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 Stage monitoring enabled");
    }

    let storage = LocalStorage::new(config.output_dir().to_string());
    let pipeline = ReportPipeline::new(storage, config);
    let engine = ReportEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run_stage(args.stage).await {
        Ok(_) => {
            tracing::info!("✅ Book report pipeline completed");
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

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Source: {}", config.source_url());
    println!("  Output dir: {}", config.output_dir());
    println!("  Files: {} -> {}", config.csv_file(), config.report_file());
    println!("  Currency: {}", config.currency_symbol());
    println!("  SMTP relay: {}:{}", config.smtp_host(), config.smtp_port());
    println!("  Stage: {:?}", args.stage);

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig, stage: Stage) -> anyhow::Result<()> {
    println!("🔍 Dry Run Analysis:");
    println!();

    println!("⚙️ Stage Plan:");
    if stage.includes(Stage::Fetch) {
        println!("  1. GET {} and write {}", config.source_url(), config.csv_file());
    }
    if stage.includes(Stage::Aggregate) {
        println!("  2. Read {} and write {}", config.csv_file(), config.report_file());
    }
    if stage.includes(Stage::Notify) {
        println!(
            "  3. Mail {} from {} to {} via {}:{} (plaintext)",
            config.report_file(),
            config.mail_from(),
            config.mail_to(),
            config.smtp_host(),
            config.smtp_port()
        );
    }

    println!();
    println!("🧾 Effective configuration:");
    println!("{}", serde_json::to_string_pretty(config)?);

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");

    Ok(())
}
