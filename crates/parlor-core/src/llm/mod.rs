//! Completion provider port.

pub mod provider;
