//! Route modules

pub mod posts;
pub mod users;
