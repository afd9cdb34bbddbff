//! Authentication and SharePoint REST access.

pub mod auth;
pub mod client;
pub mod constants;
pub mod models;
