//! Spreadsheet ingestion and the per-row submission loop.

pub mod mapper;
pub mod reader;
pub mod runner;
pub mod types;
