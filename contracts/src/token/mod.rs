//! Token standards.
pub mod vrc25;
