pub mod extractors;
pub mod jwt;
