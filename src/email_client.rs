use crate::domain::ContactEmail;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};

/// Client for Mailgun's message-creation endpoint, scoped to one sending
/// domain.
#[derive(Debug)]
pub struct EmailClient {
    http_client: Client,
    base_url: String,
    domain: String,
    sender: String,
    api_key: Secret<String>,
}

#[derive(serde::Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
    #[serde(rename = "h:Reply-To")]
    reply_to: &'a str,
}

/// What Mailgun answers with on a queued message.
#[derive(Debug, Default, serde::Deserialize)]
pub struct ProviderResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(serde::Deserialize)]
struct ProviderErrorBody {
    message: String,
}

#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    #[error("{message}")]
    Rejected {
        status: StatusCode,
        message: String,
    },
    #[error("{0}")]
    Transport(#[source] reqwest::Error),
}

impl EmailClient {
    pub fn new(
        base_url: String,
        domain: String,
        api_key: Secret<String>,
        timeout: std::time::Duration,
    ) -> Self {
        let http_client = Client::builder().timeout(timeout).build().unwrap();
        let sender = format!("Portfolio Bot <mailgun@{}>", domain);
        Self {
            http_client,
            base_url,
            domain,
            sender,
            api_key,
        }
    }

    #[tracing::instrument(
        name = "Sending an email through Mailgun",
        skip(self, subject, text_content),
        fields(recipient = %recipient, reply_to = %reply_to)
    )]
    pub async fn send_email(
        &self,
        recipient: &ContactEmail,
        reply_to: &ContactEmail,
        subject: &str,
        text_content: &str,
    ) -> Result<ProviderResponse, ProviderError> {
        let url = format!(
            "{}/v3/{}/messages",
            self.base_url.trim_end_matches('/'),
            self.domain
        );
        let request_body = SendEmailRequest {
            from: &self.sender,
            to: recipient.as_ref(),
            subject,
            text: text_content,
            reply_to: reply_to.as_ref(),
        };

        let response = self
            .http_client
            .post(&url)
            .basic_auth("api", Some(self.api_key.expose_secret()))
            .form(&request_body)
            .send()
            .await
            .map_err(ProviderError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = read_body(response).await;
            return Err(ProviderError::Rejected {
                status,
                message: rejection_message(status, &body),
            });
        }

        // A queued message is a success even if the body is not the usual JSON.
        let body = read_body(response).await;
        Ok(serde_json::from_str(&body).unwrap_or_default())
    }
}

async fn read_body(response: reqwest::Response) -> String {
    let status = response.status();
    match response.text().await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(
                error.cause_chain = ?e,
                %status,
                "Failed to read the email provider's response body"
            );
            String::new()
        }
    }
}

/// Mailgun reports failures as `{"message": "..."}`; anything else falls back
/// to the raw body, then to the status line.
fn rejection_message(status: StatusCode, body: &str) -> String {
    if let Ok(ProviderErrorBody { message }) = serde_json::from_str(body) {
        if !message.trim().is_empty() {
            return message;
        }
    }
    let body = body.trim();
    if body.is_empty() {
        format!("Email provider responded with {}", status)
    } else {
        body.to_string()
    }
}
