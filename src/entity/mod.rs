//! SeaORM entities
//!
//! Storage works on these rows and converts them into the domain types in
//! `models`. `users`, `courses` and `orders` belong to other platform
//! services and are only read here.

pub mod courses;
pub mod live_classes;
pub mod orders;
pub mod users;
