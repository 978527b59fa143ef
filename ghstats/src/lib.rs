//! ghstats - Desktop viewer for GitHub repository traffic charts.
//!
//! This library exposes the core components for testing.

pub mod app;
pub mod demo;
pub mod fetch;
pub mod message;
pub mod view;
pub mod widget;

// Re-export commonly used types
pub use app::GhStats;
pub use fetch::DataSource;
pub use message::{ChartId, Message};
pub use widget::ChartWidget;
