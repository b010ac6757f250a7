// Order and delivery status. Free text, no transition table is enforced.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusText(String);

const MAX_STATUS_LENGTH: usize = 50;

pub const PENDING: &str = "pending";
pub const DELIVERED: &str = "delivered";
pub const AVAILABLE: &str = "available";
pub const PICKED_UP: &str = "picked up";

impl StatusText {
    pub fn parse(status: String) -> Result<StatusText, String> {
        let trimmed = status.trim();

        if trimmed.is_empty() {
            return Err("status must not be empty".to_string());
        }

        if trimmed.chars().count() > MAX_STATUS_LENGTH {
            return Err(format!("status must be at most {} characters", MAX_STATUS_LENGTH));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn inner(&self) -> String {
        self.0.clone()
    }
}

impl AsRef<str> for StatusText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
