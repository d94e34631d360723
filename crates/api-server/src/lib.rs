//! HTTP surface for analysis requests and snapshot ingest.

pub mod rest;
pub mod server;

pub use server::ApiServer;
