//! Database module: models, schema, and the store the seeder drives.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `store.rs`: pool lifecycle plus typed find/create/update operations

pub mod models;
pub mod schema;
pub mod store;

pub use models::{Destination, GitSource, GitSourceType, Setting};
pub use schema::SQLITE_INIT;
pub use store::{DestinationCreate, GitSourceCreate, SeedStore, SettingCreate, SettingPatch};
