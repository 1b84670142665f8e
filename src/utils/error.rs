use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("SMTP delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("HTML parsing error: {message}")]
    Html { message: String },

    #[error("Invalid price '{value}': {reason}")]
    Price { value: String, reason: String },

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid mail address for {field}: '{value}'")]
    MailAddress { field: String, value: String },

    #[error("Failed to build email: {0}")]
    MailBuild(#[from] lettre::error::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File '{path}' is not valid UTF-8")]
    Encoding { path: String },

    #[error("Catalog is empty: no prices to average")]
    EmptyCatalog,

    #[error("Configuration error in {field}: {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Parse,
    FileIo,
    EmptyInput,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ReportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ReportError::Http(_) | ReportError::Smtp(_) => ErrorCategory::Network,
            ReportError::Html { .. }
            | ReportError::Price { .. }
            | ReportError::Csv(_)
            | ReportError::MailAddress { .. }
            | ReportError::MailBuild(_) => ErrorCategory::Parse,
            ReportError::Io(_) | ReportError::Encoding { .. } => ErrorCategory::FileIo,
            ReportError::EmptyCatalog => ErrorCategory::EmptyInput,
            ReportError::ConfigValidation { .. }
            | ReportError::InvalidConfigValue { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::EmptyInput => ErrorSeverity::Low,
            // 網路問題通常重跑即可
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Parse | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::FileIo => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            ReportError::Http(e) => match e.status() {
                Some(status) => format!("The catalog server answered with HTTP {}", status),
                None => "Could not reach the catalog server".to_string(),
            },
            ReportError::Smtp(_) => "The mail relay rejected or dropped the message".to_string(),
            ReportError::Html { message } => format!("The catalog page could not be read: {}", message),
            ReportError::Price { value, .. } => format!("Found a price that is not a number: '{}'", value),
            ReportError::Csv(_) => "The catalog CSV file is malformed".to_string(),
            ReportError::MailAddress { field, value } => {
                format!("'{}' is not a usable {} address", value, field)
            }
            ReportError::MailBuild(_) => "The report email could not be assembled".to_string(),
            ReportError::Io(e) => format!("File access failed: {}", e),
            ReportError::Encoding { path } => format!("'{}' is not UTF-8 text", path),
            ReportError::EmptyCatalog => "The catalog has no books to summarize".to_string(),
            ReportError::ConfigValidation { .. }
            | ReportError::InvalidConfigValue { .. } => format!("Invalid configuration: {}", self),
        }
    }

    /// Process exit code for the binaries.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ReportError::Http(_) => "Check the network connection and the source URL, then run again",
            ReportError::Smtp(_) => "Check the SMTP relay logs and the sender/recipient addresses",
            ReportError::Html { .. } => "The page layout may have changed; inspect the product cards",
            ReportError::Price { .. } => "Verify the currency symbol setting matches the catalog",
            ReportError::Csv(_) => "Re-run the fetch stage to regenerate the CSV file",
            ReportError::MailAddress { .. } => "Fix the from/to addresses in the configuration",
            ReportError::MailBuild(_) => "Check the subject and addresses in the configuration",
            ReportError::Io(_) | ReportError::Encoding { .. } => {
                "Make sure the previous stage ran and the output directory is writable"
            }
            ReportError::EmptyCatalog => "Nothing to do until the catalog lists at least one book",
            ReportError::ConfigValidation { .. }
            | ReportError::InvalidConfigValue { .. } => "Review the command-line flags or TOML file",
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
