//! Reusable UI components

pub mod chart_view;
pub mod status_bar;

pub use chart_view::ChartView;
pub use status_bar::StatusBar;
