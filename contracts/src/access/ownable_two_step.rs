//! Access control with a two-step ownership transfer.
//!
//! The new owner must call [`Ownable2Step::accept_ownership`] in order to
//! replace the old one. This can help prevent common mistakes, such as
//! transfers of ownership to incorrect accounts, or to contracts that are
//! unable to interact with the permission system.
//!
//! The ownership record moves through two states: `Active(owner)` while
//! [`Ownable2Step::pending_owner`] is [`Address::ZERO`], and
//! `TransferPending(owner, pending)` once the owner proposed a successor.
//! A second proposal while pending replaces the pending owner.

use alloy_primitives::Address;
use alloy_sol_types::{sol, SolError};

use crate::{
    access::ownable::{self, Ownable, OwnableInvalidOwner},
    host::CallContext,
};

sol! {
    /// Emitted when ownership transfer starts.
    ///
    /// * `previous_owner` - Address of the current owner.
    /// * `new_owner` - Address of the proposed owner.
    #[derive(Debug, PartialEq, Eq)]
    #[allow(missing_docs)]
    event OwnershipTransferStarted(address indexed previous_owner, address indexed new_owner);
}

sol! {
    /// The caller account is not the pending owner.
    ///
    /// * `account` - Account that tried to accept ownership.
    #[derive(Debug, PartialEq, Eq)]
    #[allow(missing_docs)]
    error OwnableNotPendingOwner(address account);
}

/// An error that occurred in the implementation of an [`Ownable2Step`]
/// component.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Error type from [`Ownable`] component.
    #[error(transparent)]
    Ownable(#[from] ownable::Error),
    /// The caller account is not the pending owner.
    #[error("VRC25: caller is not the pending owner")]
    NotPendingOwner(OwnableNotPendingOwner),
}

impl From<OwnableNotPendingOwner> for Error {
    fn from(value: OwnableNotPendingOwner) -> Self {
        Error::NotPendingOwner(value)
    }
}

impl From<Error> for Vec<u8> {
    fn from(value: Error) -> Vec<u8> {
        match value {
            Error::Ownable(e) => e.into(),
            Error::NotPendingOwner(e) => e.abi_encode(),
        }
    }
}

/// State of an [`Ownable2Step`] component.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ownable2Step {
    /// [`Ownable`] component.
    ownable: Ownable,
    /// Pending owner of the contract.
    pending_owner: Address,
}

impl Ownable2Step {
    /// Constructor.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Context of the deployment call.
    /// * `initial_owner` - The initial owner of this contract.
    ///
    /// # Errors
    ///
    /// * [`ownable::Error::ZeroAddress`] - If `initial_owner` is the
    ///   [`Address::ZERO`].
    pub fn new(
        ctx: &mut CallContext<'_>,
        initial_owner: Address,
    ) -> Result<Self, ownable::Error> {
        let ownable = Ownable::new(ctx, initial_owner)?;
        Ok(Self { ownable, pending_owner: Address::ZERO })
    }

    /// Returns the address of the current owner.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.ownable.owner()
    }

    /// Returns the address of the pending owner, [`Address::ZERO`] when no
    /// transfer is in progress.
    #[must_use]
    pub fn pending_owner(&self) -> Address {
        self.pending_owner
    }

    /// Checks if the caller of the current call is the owner.
    ///
    /// # Errors
    ///
    /// * [`ownable::Error::NotOwner`] - If called by any account other than
    ///   the owner.
    pub fn only_owner(&self, ctx: &CallContext<'_>) -> Result<(), ownable::Error> {
        self.ownable.only_owner(ctx)
    }

    /// Starts the ownership transfer of the contract to a new account.
    /// Replaces the pending transfer if there is one. Can only be called by
    /// the current owner.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the component's state.
    /// * `ctx` - Context of the current call.
    /// * `new_owner` - The next owner of this contract.
    ///
    /// # Errors
    ///
    /// * [`ownable::Error::NotOwner`] - If called by any account other than
    ///   the owner.
    /// * [`ownable::Error::ZeroAddress`] - If `new_owner` is the
    ///   [`Address::ZERO`].
    ///
    /// # Events
    ///
    /// * [`OwnershipTransferStarted`].
    pub fn transfer_ownership(
        &mut self,
        ctx: &mut CallContext<'_>,
        new_owner: Address,
    ) -> Result<(), Error> {
        self.ownable.only_owner(ctx)?;

        if new_owner.is_zero() {
            return Err(ownable::Error::from(OwnableInvalidOwner {
                owner: Address::ZERO,
            })
            .into());
        }

        self.pending_owner = new_owner;

        let previous_owner = self.owner();
        tracing::info!(
            target: "vrc25",
            %previous_owner,
            %new_owner,
            "ownership transfer started"
        );
        ctx.emit(&OwnershipTransferStarted { previous_owner, new_owner });
        Ok(())
    }

    /// Accepts the ownership of the contract. Can only be called by the
    /// pending owner.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the component's state.
    /// * `ctx` - Context of the current call.
    ///
    /// # Errors
    ///
    /// * [`Error::NotPendingOwner`] - If called by any account other than the
    ///   pending owner, or when no transfer is in progress.
    ///
    /// # Events
    ///
    /// * [`ownable::OwnershipTransferred`].
    pub fn accept_ownership(
        &mut self,
        ctx: &mut CallContext<'_>,
    ) -> Result<(), Error> {
        let sender = ctx.sender();
        if self.pending_owner.is_zero() || sender != self.pending_owner {
            return Err(OwnableNotPendingOwner { account: sender }.into());
        }
        self._transfer_ownership(ctx, sender);
        Ok(())
    }

    /// Transfers ownership of the contract to a new account (`new_owner`) and
    /// clears [`Self::pending_owner`].
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
    /// * [`ownable::OwnershipTransferred`].
    fn _transfer_ownership(
        &mut self,
        ctx: &mut CallContext<'_>,
        new_owner: Address,
    ) {
        self.pending_owner = Address::ZERO;
        self.ownable._transfer_ownership(ctx, new_owner);
    }
}
