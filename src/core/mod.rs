//! Business logic layer.
//!
//! Every operation is a free async function over a `DatabaseConnection` returning
//! [`crate::errors::Result`]. The HTTP layer in [`crate::api`] only parses requests
//! and serializes what these functions return.

pub mod achievement;
pub mod favorite;
pub mod rating;
pub mod seed;
pub mod stats;
pub mod user;
