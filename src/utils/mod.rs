//! Utility functions and helpers

pub mod atomic;
pub mod time;
