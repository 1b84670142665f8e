use crate::domain::model::Delivery;
use crate::utils::error::Result;
use lettre::message::Message;
use lettre::transport::smtp::AsyncSmtpTransport;
use lettre::{AsyncTransport, Tokio1Executor};
use std::error::Error as StdError;

/// Plaintext SMTP relay: no TLS, no authentication.
pub struct SmtpRelay {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    address: String,
}

impl SmtpRelay {
    pub fn plaintext(host: &str, port: u16) -> Self {
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(port)
            .build();

        Self {
            mailer,
            address: format!("{}:{}", host, port),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// 只有「連線被拒」轉成 `Delivery::RelayUnavailable`，其他錯誤照常回傳
    pub async fn deliver(&self, message: Message) -> Result<Delivery> {
        tracing::debug!("Connecting to SMTP relay at {}", self.address);

        match self.mailer.send(message).await {
            Ok(response) => {
                tracing::debug!("SMTP relay accepted message: {:?}", response.code());
                Ok(Delivery::Sent)
            }
            Err(e) if is_connection_refused(&e) => {
                tracing::warn!("SMTP relay at {} refused the connection", self.address);
                Ok(Delivery::RelayUnavailable {
                    relay: self.address.clone(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn is_connection_refused(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(io) = e.downcast_ref::<std::io::Error>() {
            if io.kind() == std::io::ErrorKind::ConnectionRefused {
                return true;
            }
        }
        current = e.source();
    }
    false
}
