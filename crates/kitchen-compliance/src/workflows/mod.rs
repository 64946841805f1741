pub mod dashboard;
pub mod incidents;
