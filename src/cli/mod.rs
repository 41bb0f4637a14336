//! Workflow layer between argument parsing and the library components

pub mod orchestration;

pub use orchestration::{BumpReport, BumpWorkflow, WorkflowOutcome};
