//! Access control mechanisms guarding the token's administrative operations.
pub mod ownable;
pub mod ownable_two_step;

pub use ownable::{Error as OwnableError, Ownable};
pub use ownable_two_step::{Error as Ownable2StepError, Ownable2Step};
