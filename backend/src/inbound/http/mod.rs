//! HTTP inbound adapter exposing the complaint REST endpoints.

pub mod complaints;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;

pub use error::ApiResult;
