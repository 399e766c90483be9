const MIN_NAME_LENGTH: usize = 2;

#[derive(Debug, Clone)]
pub struct ContactName(String);

impl ContactName {
    /// Length is counted in UTF-16 code units, the way the browser form
    /// counts it, so both sides agree on what passes.
    pub fn parse(s: String) -> Result<ContactName, String> {
        if s.encode_utf16().count() < MIN_NAME_LENGTH {
            Err(format!(
                "`{}` is not a valid name: it must be at least {} characters",
                s, MIN_NAME_LENGTH
            ))
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for ContactName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContactName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
