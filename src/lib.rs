pub mod config;
pub mod crypto;
pub mod db;
pub mod error;
pub mod seed;

pub use config::SeedConfig;
pub use error::SeedError;
