mod contact_budget;
mod contact_details;
mod contact_email;
mod contact_name;
mod contact_submission;

pub use contact_budget::ContactBudget;
pub use contact_details::ContactDetails;
pub use contact_email::ContactEmail;
pub use contact_name::ContactName;
pub use contact_submission::{ContactFormData, ContactSubmission};
