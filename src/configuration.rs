use crate::domain::ContactEmail;
use crate::email_client::EmailClient;
use secrecy::{ExposeSecret, Secret};
use serde_aux::field_attributes::deserialize_number_from_string;

const DEFAULT_PROVIDER_URL: &str = "https://api.mailgun.net";

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub email_client: EmailClientSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

/// Mailgun settings. The three optional values are only checked when a
/// message is about to be sent, so a half-configured deployment still starts
/// and reports what is missing on each submission.
#[derive(serde::Deserialize, Clone)]
pub struct EmailClientSettings {
    #[serde(default = "default_provider_url")]
    pub base_url: String,
    pub timeout_milliseconds: u64,
    #[serde(default)]
    pub api_key: Option<Secret<String>>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub recipient: Option<String>,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum MissingSetting {
    #[error("API Key")]
    ApiKey,
    #[error("Domain")]
    Domain,
    #[error("Recipient")]
    Recipient,
}

impl MissingSetting {
    pub fn variable(&self) -> &'static str {
        match self {
            MissingSetting::ApiKey => "MAILGUN_API_KEY",
            MissingSetting::Domain => "MAILGUN_DOMAIN",
            MissingSetting::Recipient => "RECIPIENT_EMAIL",
        }
    }
}

impl EmailClientSettings {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }

    /// An empty base URL falls back to Mailgun's standard endpoint.
    pub fn base_url(&self) -> &str {
        if self.base_url.trim().is_empty() {
            DEFAULT_PROVIDER_URL
        } else {
            &self.base_url
        }
    }

    /// Builds a client and the recipient address, reporting the first
    /// missing value in the order API key, domain, recipient. Empty values
    /// count as missing.
    pub fn client(&self) -> Result<(EmailClient, ContactEmail), MissingSetting> {
        let api_key = self
            .api_key
            .clone()
            .filter(|api_key| !api_key.expose_secret().trim().is_empty())
            .ok_or(MissingSetting::ApiKey)?;
        let domain = self
            .domain
            .clone()
            .filter(|domain| !domain.trim().is_empty())
            .ok_or(MissingSetting::Domain)?;
        let recipient = self
            .recipient
            .clone()
            .filter(|recipient| !recipient.trim().is_empty())
            .ok_or(MissingSetting::Recipient)
            .and_then(|r| ContactEmail::parse(r).map_err(|_| MissingSetting::Recipient))?;

        let client = EmailClient::new(self.base_url().to_string(), domain, api_key, self.timeout());
        Ok((client, recipient))
    }
}

/// Reads an environment variable, treating an empty value as unset.
pub fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn default_provider_url() -> String {
    DEFAULT_PROVIDER_URL.to_string()
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

pub fn get_settings() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .expect("Failed to parse APP_ENVIRONMENT.");
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        // E.g. `APP_APPLICATION__PORT=5001` sets `Settings.application.port`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        // The provider's conventional variable names win over everything else.
        .set_override_option("email_client.api_key", non_empty_env("MAILGUN_API_KEY"))?
        .set_override_option("email_client.domain", non_empty_env("MAILGUN_DOMAIN"))?
        .set_override_option("email_client.recipient", non_empty_env("RECIPIENT_EMAIL"))?
        .set_override_option("email_client.base_url", non_empty_env("MAILGUN_URL"))?
        .build()?;

    settings.try_deserialize::<Settings>()
}
