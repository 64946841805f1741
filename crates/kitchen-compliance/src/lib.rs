//! Compliance scoring and incident triage for restaurant kitchens operating under
//! HACCP food-safety and HMS workplace-safety rules.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
