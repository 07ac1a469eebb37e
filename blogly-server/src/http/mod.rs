//! HTTP layer: error mapping, templates, routes

pub mod error;
pub mod routes;
pub mod templates;
