//! Data model, statistics and chart adapters behind the material dashboard.
//!
//! The desktop binary loads the two source tables, builds a
//! [`context::DashboardContext`] once, and asks the [`charts`] adapters for a
//! fresh series on every filter change.

pub mod charts;
pub mod color;
pub mod context;
pub mod data;
pub mod stats;

pub use context::DashboardContext;
pub use data::builder::DatasetError;
