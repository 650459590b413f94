pub mod common;
pub mod generate;
pub mod types;
