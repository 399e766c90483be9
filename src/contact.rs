use crate::configuration::{EmailClientSettings, MissingSetting};
use crate::domain::{ContactFormData, ContactSubmission};
use crate::email_client::ProviderError;
use crate::routes::error_chain_fmt;
use std::fmt::Formatter;

const GENERIC_PROVIDER_FAILURE: &str = "Failed to send email due to an unknown error.";

/// What the caller gets back: `{"success": bool, "error": string|null}`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubmissionOutcome {
    pub success: bool,
    pub error: Option<String>,
}

impl SubmissionOutcome {
    pub fn sent() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: &ContactError) -> Self {
        let message = error.to_string();
        Self {
            success: false,
            error: Some(if message.trim().is_empty() {
                GENERIC_PROVIDER_FAILURE.to_string()
            } else {
                message
            }),
        }
    }
}

//region ContactError & Implementations
#[derive(thiserror::Error)]
pub enum ContactError {
    #[error("Invalid data provided.")]
    ValidationError(String),
    #[error("Server configuration error [{0}].")]
    ConfigurationError(MissingSetting),
    #[error("{0}")]
    ProviderError(#[source] ProviderError),
}

impl std::fmt::Debug for ContactError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
//endregion

/// Validates and relays one contact message. Never fails: every error is
/// folded into the returned outcome.
#[tracing::instrument(name = "Submitting a contact message", skip_all)]
pub async fn submit(data: ContactFormData, settings: &EmailClientSettings) -> SubmissionOutcome {
    match send_contact_message(data, settings).await {
        Ok(()) => SubmissionOutcome::sent(),
        Err(e) => SubmissionOutcome::failed(&e),
    }
}

#[tracing::instrument(
    name = "Relaying a contact message",
    skip(data, settings),
    fields(contact_email = %data.email, contact_name = %data.name)
)]
pub async fn send_contact_message(
    data: ContactFormData,
    settings: &EmailClientSettings,
) -> Result<(), ContactError> {
    let submission = ContactSubmission::parse(data).map_err(|errors| {
        let summary = errors
            .iter()
            .map(|(field, reason)| format!("{}: {}", field, reason))
            .collect::<Vec<_>>()
            .join("; ");
        tracing::warn!(field_errors = %summary, "Contact submission failed validation");
        ContactError::ValidationError(summary)
    })?;

    let (email_client, recipient) = settings.client().map_err(|missing| {
        tracing::error!("{} is not set in the environment", missing.variable());
        ContactError::ConfigurationError(missing)
    })?;

    let response = email_client
        .send_email(
            &recipient,
            &submission.email,
            &submission.subject(),
            &submission.text_body(),
        )
        .await
        .map_err(|e| {
            tracing::error!(error.cause_chain = ?e, "Mailgun API error");
            ContactError::ProviderError(e)
        })?;

    tracing::info!(
        provider_id = response.id.as_deref().unwrap_or_default(),
        provider_message = response.message.as_deref().unwrap_or_default(),
        "Mailgun accepted the contact message"
    );
    Ok(())
}
