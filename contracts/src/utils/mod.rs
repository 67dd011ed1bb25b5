//! Common utilities shared by the token components.

pub mod cryptography;
pub mod nonces;

pub use nonces::Nonces;
