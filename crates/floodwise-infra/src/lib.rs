//! Infrastructure layer for Floodwise.
//!
//! Implements the model loader trait from `floodwise-core` on top of JSON
//! artifacts on disk, and provides configuration and data-directory helpers.

pub mod config;
pub mod filesystem;
pub mod model;
