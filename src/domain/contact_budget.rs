const NOT_SPECIFIED: &str = "Not specified";

/// The budget range picked on the form. Free text is accepted: the form
/// offers a fixed list, but nothing upstream guarantees it was used.
#[derive(Debug, Clone, Default)]
pub struct ContactBudget(Option<String>);

impl ContactBudget {
    pub fn parse(s: Option<String>) -> ContactBudget {
        Self(s.filter(|budget| !budget.is_empty()))
    }
}

impl AsRef<str> for ContactBudget {
    fn as_ref(&self) -> &str {
        self.0.as_deref().unwrap_or(NOT_SPECIFIED)
    }
}
