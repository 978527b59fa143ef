//! View components for the ghstats viewer.

pub mod chart;
pub mod dashboard;
pub mod formatting;
pub mod panel;
