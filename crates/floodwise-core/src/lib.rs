//! Business logic and model trait definitions for Floodwise.
//!
//! This crate defines the "ports" (model and loader traits) that the
//! infrastructure layer implements, together with the wizard state machine,
//! the template loader and the prediction adapter. It depends only on
//! `floodwise-types` -- never on `floodwise-infra` or any IO crate.

pub mod adapter;
pub mod model;
pub mod template;
pub mod wizard;
