//! Common extensions to the VRC25 standard.
pub mod metadata;
pub mod native_wrapper;
pub mod permit;

pub use metadata::Vrc25Metadata;
pub use native_wrapper::{NativeWrapper, WrapperFees};
pub use permit::Vrc25Permit;
