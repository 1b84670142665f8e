use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ReportError, Result};
use lettre::message::Mailbox;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ReportError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ReportError::InvalidConfigValue {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ReportError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ReportError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ReportError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_port(field_name: &str, port: u16) -> Result<()> {
    if port == 0 {
        return Err(ReportError::InvalidConfigValue {
            field: field_name.to_string(),
            value: port.to_string(),
            reason: "Port must be between 1 and 65535".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ReportError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 解析成 `Mailbox`，失敗時回報是哪個欄位
pub fn parse_mailbox(field_name: &str, address: &str) -> Result<Mailbox> {
    address
        .parse::<Mailbox>()
        .map_err(|_| ReportError::MailAddress {
            field: field_name.to_string(),
            value: address.to_string(),
        })
}

/// 所有設定來源共用的檢查
pub fn validate_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_url("source_url", config.source_url())?;
    validate_path("output_dir", config.output_dir())?;
    validate_path("csv_file", config.csv_file())?;
    validate_path("report_file", config.report_file())?;
    validate_non_empty_string("currency_symbol", config.currency_symbol())?;
    validate_non_empty_string("smtp_host", config.smtp_host())?;
    validate_port("smtp_port", config.smtp_port())?;
    parse_mailbox("mail_from", config.mail_from())?;
    parse_mailbox("mail_to", config.mail_to())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("source_url", "https://books.toscrape.com/").is_ok());
        assert!(validate_url("source_url", "http://127.0.0.1:8080/").is_ok());
        assert!(validate_url("source_url", "").is_err());
        assert!(validate_url("source_url", "invalid-url").is_err());
        assert!(validate_url("source_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_port() {
        assert!(validate_port("smtp_port", 25).is_ok());
        assert!(validate_port("smtp_port", 0).is_err());
    }

    #[test]
    fn test_parse_mailbox() {
        assert!(parse_mailbox("mail_from", "reports@automation.example").is_ok());
        assert!(parse_mailbox("mail_from", "Reports <reports@automation.example>").is_ok());

        match parse_mailbox("mail_to", "not an address") {
            Err(ReportError::MailAddress { field, .. }) => assert_eq!(field, "mail_to"),
            other => panic!("expected MailAddress error, got {:?}", other),
        }
    }
}
