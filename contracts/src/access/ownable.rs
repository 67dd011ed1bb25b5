//! Basic access control mechanism, where there is an account (an owner) that
//! can be granted exclusive access to specific functions.
//!
//! The initial owner is the deployer. The VRC25 owner also plays the role of
//! fee issuer: every fee charged by the token is credited to it.
//!
//! Ownership changes go through [`super::ownable_two_step::Ownable2Step`];
//! this module only provides [`Ownable::only_owner`] and the raw ownership
//! record.

use alloy_primitives::Address;
use alloy_sol_types::{sol, SolError};

use crate::host::CallContext;

sol! {
    /// Emitted when ownership gets transferred between accounts.
    ///
    /// * `previous_owner` - Address of the previous owner.
    /// * `new_owner` - Address of the new owner.
    #[derive(Debug, PartialEq, Eq)]
    #[allow(missing_docs)]
    event OwnershipTransferred(address indexed previous_owner, address indexed new_owner);
}

sol! {
    /// The caller account is not authorized to perform an operation.
    ///
    /// * `account` - Account that was found to not be authorized.
    #[derive(Debug, PartialEq, Eq)]
    #[allow(missing_docs)]
    error OwnableUnauthorizedAccount(address account);
    /// The owner is not a valid owner account. (eg. [`Address::ZERO`])
    ///
    /// * `owner` - Account that's not allowed to become the owner.
    #[derive(Debug, PartialEq, Eq)]
    #[allow(missing_docs)]
    error OwnableInvalidOwner(address owner);
}

/// An error that occurred in the implementation of an [`Ownable`] component.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The caller account is not the owner.
    #[error("VRC25: caller is not the owner")]
    NotOwner(OwnableUnauthorizedAccount),
    /// The owner is not a valid owner account. (eg. [`Address::ZERO`])
    #[error("VRC25: new owner is the zero address")]
    ZeroAddress(OwnableInvalidOwner),
}

impl From<OwnableUnauthorizedAccount> for Error {
    fn from(value: OwnableUnauthorizedAccount) -> Self {
        Error::NotOwner(value)
    }
}

impl From<OwnableInvalidOwner> for Error {
    fn from(value: OwnableInvalidOwner) -> Self {
        Error::ZeroAddress(value)
    }
}

impl From<Error> for Vec<u8> {
    fn from(value: Error) -> Vec<u8> {
        match value {
            Error::NotOwner(e) => e.abi_encode(),
            Error::ZeroAddress(e) => e.abi_encode(),
        }
    }
}

/// State of an [`Ownable`] component.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ownable {
    /// The current owner of this contract.
    owner: Address,
}

impl Ownable {
    /// Constructor.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Context of the deployment call.
    /// * `initial_owner` - The initial owner of this contract.
    ///
    /// # Errors
    ///
    /// * [`Error::ZeroAddress`] - If `initial_owner` is the [`Address::ZERO`].
    ///
    /// # Events
    ///
    /// * [`OwnershipTransferred`].
    pub fn new(
        ctx: &mut CallContext<'_>,
        initial_owner: Address,
    ) -> Result<Self, Error> {
        if initial_owner.is_zero() {
            return Err(OwnableInvalidOwner { owner: Address::ZERO }.into());
        }
        let mut ownable = Self::default();
        ownable._transfer_ownership(ctx, initial_owner);
        Ok(ownable)
    }

    /// Returns the address of the current owner.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Checks if the caller of the current call is the owner.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the component's state.
    /// * `ctx` - Context of the current call.
    ///
    /// # Errors
    ///
    /// * [`Error::NotOwner`] - If called by any account other than the owner.
    pub fn only_owner(&self, ctx: &CallContext<'_>) -> Result<(), Error> {
        let account = ctx.sender();
        if self.owner != account {
            return Err(OwnableUnauthorizedAccount { account }.into());
        }

        Ok(())
    }

    /// Transfers ownership of the contract to a new account (`new_owner`).
    /// Internal function without access restriction.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the component's state.
    /// * `ctx` - Context of the current call.
    /// * `new_owner` - Account that's gonna be the next owner.
    ///
    /// # Events
    ///
    /// * [`OwnershipTransferred`].
    pub fn _transfer_ownership(
        &mut self,
        ctx: &mut CallContext<'_>,
        new_owner: Address,
    ) {
        let previous_owner = self.owner;
        self.owner = new_owner;
        tracing::info!(
            target: "vrc25",
            %previous_owner,
            %new_owner,
            "ownership transferred"
        );
        ctx.emit(&OwnershipTransferred { previous_owner, new_owner });
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, Address};

    use super::{Error, Ownable, OwnableUnauthorizedAccount, OwnershipTransferred};
    use crate::test_utils::{emits, MockHost};

    const ALICE: Address = address!("A11CEacF9aa32246d767FCCD72e02d6bCbcC375d");
    const BOB: Address = address!("B0B0cB49ec2e96DF5F5fFB081acaE66A2cBBc2e2");

    #[test]
    fn constructor_sets_owner() {
        let host = MockHost::default();
        let mut ctx = host.ctx(ALICE);

        let ownable = Ownable::new(&mut ctx, ALICE).expect("should deploy");
        assert_eq!(ALICE, ownable.owner());
        assert!(emits(
            &ctx,
            &OwnershipTransferred { previous_owner: Address::ZERO, new_owner: ALICE }
        ));
    }

    #[test]
    fn constructor_rejects_zero_owner() {
        let host = MockHost::default();
        let mut ctx = host.ctx(ALICE);

        let err = Ownable::new(&mut ctx, Address::ZERO)
            .expect_err("should not deploy without an owner");
        assert!(matches!(err, Error::ZeroAddress(_)));
        assert!(ctx.logs().is_empty());
    }

    #[test]
    fn only_owner_accepts_owner() {
        let host = MockHost::default();
        let ownable =
            Ownable::new(&mut host.ctx(ALICE), ALICE).expect("should deploy");

        assert!(ownable.only_owner(&host.ctx(ALICE)).is_ok());
    }

    #[test]
    fn only_owner_rejects_others() {
        let host = MockHost::default();
        let ownable =
            Ownable::new(&mut host.ctx(ALICE), ALICE).expect("should deploy");

        let err = ownable.only_owner(&host.ctx(BOB)).expect_err("bob is not owner");
        assert_eq!(
            Error::NotOwner(OwnableUnauthorizedAccount { account: BOB }),
            err
        );
        assert_eq!("VRC25: caller is not the owner", err.to_string());
    }
}
