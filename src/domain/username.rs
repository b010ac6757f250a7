#[derive(Debug, Clone, PartialEq)]
pub struct Username(String);

const MAX_USERNAME_LENGTH: usize = 255;

impl Username {
    pub fn parse(username: String) -> Result<Username, String> {
        let trimmed = username.trim();

        if trimmed.is_empty() {
            return Err("username must not be empty".to_string());
        }

        if trimmed.chars().count() > MAX_USERNAME_LENGTH {
            return Err(format!("username must be at most {} characters", MAX_USERNAME_LENGTH));
        }

        if trimmed.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(format!("{} is not a valid username", trimmed));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn inner(&self) -> String {
        self.0.clone()
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
