//! SmtpAlerter - mail delivery through a relay

use lettre::message::Message;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use tracing::{info, instrument};

use contracts::{AlertMessage, AlertTransport, ContractError, SmtpConfig};

/// SMTP transport with static sender, recipient, and credentials.
///
/// The password comes from the environment variable named in the config;
/// a missing variable is a startup error, not a send-time one.
pub struct SmtpAlerter {
    name: String,
    sender: String,
    recipient: String,
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpAlerter {
    /// Build the transport from configuration.
    pub fn from_config(config: &SmtpConfig) -> Result<Self, ContractError> {
        let password = std::env::var(&config.password_env).map_err(|_| {
            ContractError::config_validation(
                "alerts.smtp.password_env",
                format!("environment variable '{}' not set", config.password_env),
            )
        })?;

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| ContractError::alert_send("smtp", e.to_string()))?
            .port(config.port)
            .credentials(Credentials::new(config.sender.clone(), password))
            .build();

        Ok(Self {
            name: format!("smtp:{}", config.host),
            sender: config.sender.clone(),
            recipient: config.recipient.clone(),
            mailer,
        })
    }

    fn build_message(&self, alert: &AlertMessage) -> Result<Message, ContractError> {
        let from = self
            .sender
            .parse()
            .map_err(|e| ContractError::alert_send(&self.name, format!("bad sender: {e}")))?;
        let to = self
            .recipient
            .parse()
            .map_err(|e| ContractError::alert_send(&self.name, format!("bad recipient: {e}")))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(alert.subject.clone())
            .body(alert.body.clone())
            .map_err(|e| ContractError::alert_send(&self.name, e.to_string()))
    }
}

impl AlertTransport for SmtpAlerter {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(name = "smtp_alerter_send", skip(self, alert), fields(transport = %self.name))]
    async fn send(&self, alert: &AlertMessage) -> Result<(), ContractError> {
        let message = self.build_message(alert)?;
        self.mailer
            .send(message)
            .await
            .map_err(|e| ContractError::alert_send(&self.name, e.to_string()))?;
        info!(transport = %self.name, recipient = %self.recipient, "alert delivered");
        Ok(())
    }
}
