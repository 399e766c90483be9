use crate::configuration::EmailClientSettings;
use crate::contact::{send_contact_message, ContactError, SubmissionOutcome};
use crate::domain::ContactFormData;
use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            ContactError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ContactError::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ContactError::ProviderError(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(SubmissionOutcome::failed(self))
    }
}

//region HTTP handlers
pub async fn contact(
    form: web::Json<ContactFormData>,
    email_client_settings: web::Data<EmailClientSettings>,
) -> Result<HttpResponse, ContactError> {
    send_contact_message(form.into_inner(), &email_client_settings).await?;
    Ok(HttpResponse::Ok().json(SubmissionOutcome::sent()))
}
//endregion

//region Helper functions
/// Malformed bodies get the same generic answer as a schema failure.
pub fn contact_payload_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::warn!(error = %err, "Rejected a malformed contact payload");
    ContactError::ValidationError(err.to_string()).into()
}
//endregion
