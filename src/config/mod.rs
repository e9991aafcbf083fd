//! Configuration model for distill.
//!
//! This module defines the Config struct that represents `.distill/config.yaml`.
//! Every field is optional; unknown fields are preserved so a newer config
//! survives a round trip through an older binary.

mod model;
mod operations;
pub mod types;


pub use model::Config;
