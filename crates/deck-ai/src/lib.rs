//! Core library for the AI-assisted presentation editor backend.
//!
//! The centerpiece is the template matching engine under
//! [`workflows::slides::matching`]: given one slide's AI-generated content
//! and a pool of candidate visual templates, it selects the template that
//! best accommodates that content, degrading gracefully when semantic
//! annotations are missing on either side.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
