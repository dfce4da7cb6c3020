//! Utility modules for stampscope.
//!
//! - [`datetime`] - Timestamp and step-duration parsing and formatting

pub mod datetime;
