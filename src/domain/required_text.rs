// Non-blank free text such as names and addresses
#[derive(Debug, Clone, PartialEq)]
pub struct RequiredText(String);

const MAX_TEXT_LENGTH: usize = 255;

impl RequiredText {
    pub fn parse(field: &str, value: String) -> Result<RequiredText, String> {
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(format!("{} must not be empty", field));
        }

        if trimmed.chars().count() > MAX_TEXT_LENGTH {
            return Err(format!("{} must be at most {} characters", field, MAX_TEXT_LENGTH));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn inner(self) -> String {
        self.0
    }
}
