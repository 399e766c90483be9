const MIN_DETAILS_LENGTH: usize = 10;

#[derive(Debug, Clone)]
pub struct ContactDetails(String);

impl ContactDetails {
    pub fn parse(s: String) -> Result<ContactDetails, String> {
        let length = s.encode_utf16().count();
        if length < MIN_DETAILS_LENGTH {
            Err(format!(
                "Details must be at least {} characters, got {}",
                MIN_DETAILS_LENGTH, length
            ))
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for ContactDetails {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
