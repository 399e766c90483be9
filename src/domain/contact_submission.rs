use crate::domain::{ContactBudget, ContactDetails, ContactEmail, ContactName};

/// The payload as the browser sends it, before any validation.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ContactFormData {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub budget: Option<String>,
    pub details: String,
}

#[derive(Debug, Clone)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: ContactEmail,
    pub budget: ContactBudget,
    pub details: ContactDetails,
}

/// Field name paired with the reason it was rejected.
pub type FieldErrors = Vec<(&'static str, String)>;

impl ContactSubmission {
    /// Parses every field and collects all the failures instead of stopping
    /// at the first one, so the log line carries the full picture.
    pub fn parse(form: ContactFormData) -> Result<ContactSubmission, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = ContactName::parse(form.name)
            .map_err(|e| errors.push(("name", e)))
            .ok();
        let email = ContactEmail::parse(form.email)
            .map_err(|e| errors.push(("email", e)))
            .ok();
        let details = ContactDetails::parse(form.details)
            .map_err(|e| errors.push(("details", e)))
            .ok();
        let budget = ContactBudget::parse(form.budget);

        match (name, email, details) {
            (Some(name), Some(email), Some(details)) => Ok(ContactSubmission {
                name,
                email,
                budget,
                details,
            }),
            _ => Err(errors),
        }
    }

    pub fn subject(&self) -> String {
        format!("New Portfolio Contact: {}", self.name)
    }

    pub fn text_body(&self) -> String {
        format!(
            "You received a new message from your portfolio contact form:\n\
             \n\
             Name: {}\n\
             Email: {}\n\
             Budget: {}\n\
             \n\
             Details:\n\
             {}\n",
            self.name,
            self.email,
            self.budget.as_ref(),
            self.details.as_ref()
        )
    }
}
