//! Signature recovery and typed structured data hashing.
pub mod ecdsa;
pub mod eip712;
