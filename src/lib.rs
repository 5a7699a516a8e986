//! Compliance health scoring and service relevance ranking for
//! business-formation entities.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
