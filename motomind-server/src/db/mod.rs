//! Database layer - connection pool and repositories
//!
//! # Design Principles
//!
//! - Connection pool shared by all handlers, acquired per query
//! - Listing queries JOIN every enrichment table in one round trip
//! - Review insert and trust-score update run in one transaction
//! - Bilingual columns are fetched in full; language is selected in Rust

pub mod pool;
pub mod repos;

pub use pool::{create_pool, DbConfig, SslMode};
pub use repos::*;
