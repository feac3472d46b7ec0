//! Shared domain types for Floodwise.
//!
//! This crate contains the core domain types used across the Floodwise
//! workspace: the static feature schema, the wizard's form and phase, the
//! prediction result with its risk classification, configuration, and the
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod config;
pub mod error;
pub mod form;
pub mod prediction;
pub mod schema;
pub mod wizard;
