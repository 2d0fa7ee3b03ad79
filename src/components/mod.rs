//! UI components.

pub mod workflow;
