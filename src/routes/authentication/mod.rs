pub mod login;
pub mod register;

pub use login::*;
pub use register::*;
