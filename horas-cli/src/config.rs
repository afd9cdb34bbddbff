//! Environment-backed configuration, loaded once at startup.
//!
//! Every missing variable is reported in a single error so a fresh
//! deployment can be fixed in one pass instead of one restart per
//! variable.

use anyhow::{Result, bail};

pub const DEFAULT_SMTP_HOST: &str = "smtp.office365.com";

/// Identity of the app registration and its certificate credential.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub client_id: String,
    pub tenant_id: String,
    /// Hex-encoded SHA-1 fingerprint of the registered certificate.
    pub cert_thumbprint: String,
    /// Base64 of the PEM-encoded RSA private key.
    pub cert_base64: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut missing = Vec::new();
        let client_id = required_var(&get, "CLIENT_ID", &mut missing);
        let tenant_id = required_var(&get, "TENANT_ID", &mut missing);
        let cert_thumbprint = required_var(&get, "THUMBPRINT", &mut missing);
        let cert_base64 = required_var(&get, "CERTIFICADO_BASE64", &mut missing);

        if !missing.is_empty() {
            bail!("Missing required environment variables: {}", missing.join(", "));
        }

        Ok(Self {
            client_id,
            tenant_id,
            cert_thumbprint,
            cert_base64,
        })
    }
}

/// Shared mailbox used to deliver the results report.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub sender: String,
    pub password: String,
    pub recipients: Vec<String>,
    pub smtp_host: String,
}

impl MailConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut missing = Vec::new();
        let sender = required_var(&get, "EMAIL_REMETENTE", &mut missing);
        let password = required_var(&get, "SENHA_EMAIL", &mut missing);
        let recipients_raw = required_var(&get, "EMAILS_DESTINO", &mut missing);

        if !missing.is_empty() {
            bail!("Missing required environment variables: {}", missing.join(", "));
        }

        let recipients: Vec<String> = recipients_raw
            .split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .collect();
        if recipients.is_empty() {
            bail!("EMAILS_DESTINO does not contain any address");
        }

        let smtp_host = get("SMTP_HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string());

        Ok(Self {
            sender,
            password,
            recipients,
            smtp_host,
        })
    }
}

fn required_var(
    get: &impl Fn(&str) -> Option<String>,
    name: &str,
    missing: &mut Vec<String>,
) -> String {
    match get(name) {
        Some(value) if !value.trim().is_empty() => value,
        _ => {
            missing.push(name.to_string());
            String::new()
        }
    }
}
