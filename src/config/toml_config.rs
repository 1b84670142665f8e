use super::defaults;
use crate::core::ConfigProvider;
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub files: FilesConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub smtp: SmtpConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_source_url")]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_csv_file")]
    pub csv: String,
    #[serde(default = "default_report_file")]
    pub report: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_report_title")]
    pub title: String,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    #[serde(default = "default_smtp_host")]
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    #[serde(default = "default_mail_from")]
    pub from: String,
    #[serde(default = "default_mail_to")]
    pub to: String,
    #[serde(default = "default_mail_subject")]
    pub subject: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    /// "compact" (預設) 或 "json"
    pub log_format: Option<String>,
}

fn default_source_url() -> String {
    defaults::SOURCE_URL.to_string()
}

fn default_output_dir() -> String {
    defaults::OUTPUT_DIR.to_string()
}

fn default_csv_file() -> String {
    defaults::CSV_FILE.to_string()
}

fn default_report_file() -> String {
    defaults::REPORT_FILE.to_string()
}

fn default_report_title() -> String {
    defaults::REPORT_TITLE.to_string()
}

fn default_currency_symbol() -> String {
    defaults::CURRENCY_SYMBOL.to_string()
}

fn default_smtp_host() -> String {
    defaults::SMTP_HOST.to_string()
}

fn default_smtp_port() -> u16 {
    defaults::SMTP_PORT
}

fn default_mail_from() -> String {
    defaults::MAIL_FROM.to_string()
}

fn default_mail_to() -> String {
    defaults::MAIL_TO.to_string()
}

fn default_mail_subject() -> String {
    defaults::MAIL_SUBJECT.to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_source_url(),
        }
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            csv: default_csv_file(),
            report: default_report_file(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: default_report_title(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: default_smtp_host(),
            port: default_smtp_port(),
            from: default_mail_from(),
            to: default_mail_to(),
            subject: default_mail_subject(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ReportError::ConfigValidation {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SMTP_HOST})，找不到的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ReportError::ConfigValidation {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.log_format.as_deref())
            .map(|f| f.eq_ignore_ascii_case("json"))
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn source_url(&self) -> &str {
        &self.source.url
    }

    fn output_dir(&self) -> &str {
        &self.files.output_dir
    }

    fn csv_file(&self) -> &str {
        &self.files.csv
    }

    fn report_file(&self) -> &str {
        &self.files.report
    }

    fn currency_symbol(&self) -> &str {
        &self.report.currency_symbol
    }

    fn report_title(&self) -> &str {
        &self.report.title
    }

    fn smtp_host(&self) -> &str {
        &self.smtp.host
    }

    fn smtp_port(&self) -> u16 {
        self.smtp.port
    }

    fn mail_from(&self) -> &str {
        &self.smtp.from
    }

    fn mail_to(&self) -> &str {
        &self.smtp.to
    }

    fn mail_subject(&self) -> &str {
        &self.smtp.subject
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_config(self)?;

        if let Some(format) = self.monitoring.as_ref().and_then(|m| m.log_format.as_ref()) {
            let valid_formats = ["compact", "json"];
            if !valid_formats.contains(&format.to_ascii_lowercase().as_str()) {
                return Err(ReportError::InvalidConfigValue {
                    field: "monitoring.log_format".to_string(),
                    value: format.clone(),
                    reason: format!("Unsupported format. Valid formats: {}", valid_formats.join(", ")),
                });
            }
        }

        Ok(())
    }
}
