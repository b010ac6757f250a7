// Money in minor units (cents), never negative
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Amount(i32);

impl Amount {
    pub fn parse(field: &str, value: i32) -> Result<Amount, String> {
        if value < 0 {
            return Err(format!("{} must not be negative", field));
        }

        Ok(Self(value))
    }

    pub fn inner(&self) -> i32 {
        self.0
    }
}
