//! motomind-server: HTTP API for the MotoMind used-car marketplace
//!
//! Serves listings enriched with price position and oracle scores,
//! quiz-driven recommendations, two-way reviews with trust-score upkeep,
//! a bilingual community feed and seller profiles.

pub mod db;
pub mod http;

pub use db::{create_pool, DbConfig, SslMode};
pub use http::{build_router, run_server, ServerConfig, ServerError};
