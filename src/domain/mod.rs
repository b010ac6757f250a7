pub mod amount;
pub mod required_text;
pub mod status;
pub mod user_role;
pub mod username;

pub use amount::Amount;
pub use required_text::RequiredText;
pub use status::StatusText;
pub use user_role::UserRole;
pub use username::Username;
