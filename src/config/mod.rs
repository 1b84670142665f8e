pub mod cli;
pub mod toml_config;

/// Values used when neither a flag nor the TOML file sets them.
pub mod defaults {
    pub const SOURCE_URL: &str = "https://books.toscrape.com/";
    pub const OUTPUT_DIR: &str = ".";
    pub const CSV_FILE: &str = "books.csv";
    pub const REPORT_FILE: &str = "report.txt";
    pub const CURRENCY_SYMBOL: &str = "£";
    pub const REPORT_TITLE: &str = "Book Report";
    pub const SMTP_HOST: &str = "localhost";
    pub const SMTP_PORT: u16 = 25;
    pub const MAIL_FROM: &str = "reports@automation.example";
    pub const MAIL_TO: &str = "recipient@example.com";
    pub const MAIL_SUBJECT: &str = "📊 Automated Book Report";
}

#[cfg(feature = "cli")]
pub use cli_config::CliConfig;

#[cfg(feature = "cli")]
mod cli_config {
    use super::defaults;
    use crate::core::{ConfigProvider, Stage};
    use crate::utils::error::Result;
    use crate::utils::validation::{self, Validate};
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "book-report")]
    #[command(about = "Scrape a book catalog, summarize prices and mail the report")]
    pub struct CliConfig {
        #[arg(long, default_value = defaults::SOURCE_URL)]
        pub source_url: String,

        #[arg(long, default_value = defaults::OUTPUT_DIR)]
        pub output_dir: String,

        #[arg(long, default_value = defaults::CSV_FILE)]
        pub csv_file: String,

        #[arg(long, default_value = defaults::REPORT_FILE)]
        pub report_file: String,

        #[arg(long, default_value = defaults::CURRENCY_SYMBOL)]
        pub currency_symbol: String,

        #[arg(long, default_value = defaults::REPORT_TITLE)]
        pub report_title: String,

        #[arg(long, default_value = defaults::SMTP_HOST)]
        pub smtp_host: String,

        #[arg(long, default_value_t = defaults::SMTP_PORT)]
        pub smtp_port: u16,

        #[arg(long, default_value = defaults::MAIL_FROM)]
        pub mail_from: String,

        #[arg(long, default_value = defaults::MAIL_TO)]
        pub mail_to: String,

        #[arg(long, default_value = defaults::MAIL_SUBJECT)]
        pub mail_subject: String,

        #[arg(long, value_enum, default_value = "all", help = "Run one stage or the whole pipeline")]
        pub stage: Stage,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Log elapsed time and memory after each stage")]
        pub monitor: bool,
    }

    impl ConfigProvider for CliConfig {
        fn source_url(&self) -> &str {
            &self.source_url
        }

        fn output_dir(&self) -> &str {
            &self.output_dir
        }

        fn csv_file(&self) -> &str {
            &self.csv_file
        }

        fn report_file(&self) -> &str {
            &self.report_file
        }

        fn currency_symbol(&self) -> &str {
            &self.currency_symbol
        }

        fn report_title(&self) -> &str {
            &self.report_title
        }

        fn smtp_host(&self) -> &str {
            &self.smtp_host
        }

        fn smtp_port(&self) -> u16 {
            self.smtp_port
        }

        fn mail_from(&self) -> &str {
            &self.mail_from
        }

        fn mail_to(&self) -> &str {
            &self.mail_to
        }

        fn mail_subject(&self) -> &str {
            &self.mail_subject
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validation::validate_config(self)
        }
    }

}
