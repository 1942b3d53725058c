//! Route handlers organized by resource

pub mod community;
pub mod health;
pub mod listings;
pub mod recommendations;
pub mod reviews;
pub mod users;
