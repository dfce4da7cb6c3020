//! UI module for stampscope
//!
//! This module draws charts in the terminal and blocks until the viewer is
//! dismissed.

pub mod components;
pub mod layout;
pub mod renderer;

pub use layout::LayoutManager;
pub use renderer::TerminalChart;
