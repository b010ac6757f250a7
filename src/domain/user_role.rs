use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Customer,
    RestaurantOwner,
    DeliveryPersonnel,
    #[serde(alias = "admin")]
    Administrator,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Customer => "customer",
            UserRole::RestaurantOwner => "restaurant_owner",
            UserRole::DeliveryPersonnel => "delivery_personnel",
            UserRole::Administrator => "administrator",
        }
    }

    pub fn parse(role: &str) -> Result<UserRole, String> {
        match role.trim().to_lowercase().as_str() {
            "customer" => Ok(UserRole::Customer),
            "restaurant_owner" => Ok(UserRole::RestaurantOwner),
            "delivery_personnel" => Ok(UserRole::DeliveryPersonnel),
            "administrator" | "admin" => Ok(UserRole::Administrator),
            other => Err(format!("{} is not a valid role", other)),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
